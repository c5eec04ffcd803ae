//! Hand-written FFmpeg C bindings (no bindgen)
//!
//! This module provides the minimal libavcodec/libavutil surface needed to own and
//! configure an AVCodecContext. All FFmpeg structs are opaque - we access fields via
//! the thin C accessor library.

pub mod accessors;
pub mod avcodec;
pub mod avutil;
pub mod error;
pub mod types;

pub use error::{check_error, FFmpegError, FFmpegResult};
pub use types::*;
