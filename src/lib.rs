#![deny(clippy::all)]

//! Typed access to FFmpeg's AVCodecContext
//!
//! This crate binds the codec context structure of a native libavcodec: every field is
//! reached through typed getter/setter pairs, extradata is exposed as a zero-copy view,
//! and the context is closed and freed exactly once. Encoding, decoding and everything
//! else the library does with a context is left to the library.

// FFmpeg C bindings (hand-written, no bindgen)
pub mod ffi;

// zlib for statically linked libavcodec
use libz_sys as _;

// Safe codec context wrappers (RAII)
pub mod codec;

// Node.js surface (NAPI classes)
#[cfg(feature = "node")]
pub mod node;

pub use codec::{CodecContext, CodecContextRef, CodecError, CodecResult, ContextConfig};
pub use ffi::{AVCodecID, AVMediaType, AVPixelFormat, AVRational, FFmpegError};
