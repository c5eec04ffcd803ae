//! Node.js surface via NAPI-RS
//!
//! Exposes the codec context accessors to JavaScript. Built only with the `node` feature.

mod codec_context;
pub mod error;

pub use codec_context::{JsCodecContext, Rational};
