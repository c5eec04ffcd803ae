//! Safe Rust wrappers for FFmpeg codec contexts
//!
//! This module provides an RAII owner around AVCodecContext and a borrowed view type
//! with typed field accessors, ensuring the context is torn down exactly once.

pub mod context;

pub use context::{CodecContext, CodecContextRef, MAX_EXTRADATA_SIZE};

use crate::ffi::{AVCodecID, AVMediaType, AVPixelFormat, AVRational};

/// Bulk configuration for a codec context
///
/// Every `Some` field is written through the matching setter by
/// [`CodecContextRef::configure`]; `None` leaves the context untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextConfig {
    /// Stream kind
    pub media_type: Option<AVMediaType>,
    /// Codec algorithm
    pub codec_id: Option<AVCodecID>,
    /// Target bitrate in bits per second
    pub bit_rate: Option<i64>,
    /// Unit of timestamps
    pub time_base: Option<AVRational>,
    /// Frames per second
    pub framerate: Option<AVRational>,
    /// Video width in pixels
    pub width: Option<i32>,
    /// Video height in pixels
    pub height: Option<i32>,
    /// Pixel format
    pub pixel_format: Option<AVPixelFormat>,
    /// `AV_CODEC_FLAG_*` bitmask
    pub flags: Option<i32>,
    /// Group of pictures size (keyframe interval)
    pub gop_size: Option<i32>,
    /// Maximum B-frames between non-B frames
    pub max_b_frames: Option<i32>,
    /// Number of threads (0 for auto)
    pub thread_count: Option<i32>,
    /// Motion estimation search range
    pub me_range: Option<i32>,
    /// Maximum quantizer difference between frames
    pub max_qdiff: Option<i32>,
    /// Minimum quantizer
    pub qmin: Option<i32>,
    /// Maximum quantizer
    pub qmax: Option<i32>,
    /// Quantizer compression ratio between easy and hard scenes
    pub qcompress: Option<f32>,
    /// Extra data (codec-specific, e.g., SPS/PPS for H.264)
    pub extradata: Option<Vec<u8>>,
}

impl ContextConfig {
    /// Typical starting point for a video encoder
    pub fn video(codec_id: AVCodecID, width: i32, height: i32) -> Self {
        Self {
            media_type: Some(AVMediaType::Video),
            codec_id: Some(codec_id),
            width: Some(width),
            height: Some(height),
            pixel_format: Some(AVPixelFormat::Yuv420p),
            time_base: Some(AVRational::new(1, 30)),
            framerate: Some(AVRational::new(30, 1)),
            ..Self::default()
        }
    }
}

/// Codec error type
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("FFmpeg error: {0}")]
    Ffmpeg(#[from] crate::ffi::FFmpegError),

    #[error("Codec not found: {0}")]
    CodecNotFound(String),

    #[error("Encoder not found for codec: {0:?}")]
    EncoderNotFound(AVCodecID),

    #[error("Decoder not found for codec: {0:?}")]
    DecoderNotFound(AVCodecID),

    #[error("Failed to allocate {0}")]
    AllocationFailed(&'static str),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type CodecResult<T> = Result<T, CodecError>;
