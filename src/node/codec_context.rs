//! CodecContext - JavaScript view of an AVCodecContext
//!
//! Every field is exposed as a getter/setter property. Numbers arriving from JS are
//! converted the Node-API way: `int32` properties wrap modulo 2^32 (ECMAScript ToInt32),
//! `bitRate` goes through `int64`, and `qcompress` is narrowed from double to float.
//! `extradata` is copied in both directions because a JS buffer cannot borrow from a
//! context that `close()` may free at any time.

use super::error::{codec_error, invalid_state_error};
use crate::codec::{CodecContext, CodecContextRef};
use crate::ffi::{AVCodecID, AVMediaType, AVPixelFormat, AVRational};
use napi::bindgen_prelude::*;
use napi_derive::napi;
use std::sync::Mutex;

/// Numerator/denominator pair (time base, frame rate)
#[napi(object)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rational {
  pub num: i32,
  pub den: i32,
}

impl From<AVRational> for Rational {
  fn from(r: AVRational) -> Self {
    Self {
      num: r.num,
      den: r.den,
    }
  }
}

impl From<Rational> for AVRational {
  fn from(r: Rational) -> Self {
    AVRational::new(r.num, r.den)
  }
}

/// Codec context owned by a JavaScript object
///
/// `close()` frees the native context; every accessor afterwards throws
/// `InvalidStateError` instead of touching freed memory.
#[napi(js_name = "CodecContext")]
pub struct JsCodecContext {
  inner: Mutex<Option<CodecContext>>,
}

#[napi]
impl JsCodecContext {
  /// Allocate a context with library defaults and no codec attached
  #[napi(constructor)]
  pub fn new() -> Result<Self> {
    CodecContext::new().map(Self::wrap).map_err(codec_error)
  }

  /// Allocate a context preset for the encoder of `codecId`
  #[napi(factory)]
  pub fn encoder(codec_id: i32) -> Result<Self> {
    CodecContext::new_encoder(AVCodecID::from_raw(codec_id))
      .map(Self::wrap)
      .map_err(codec_error)
  }

  /// Allocate a context preset for a named encoder (e.g. "libx264")
  #[napi(factory)]
  pub fn encoder_by_name(name: String) -> Result<Self> {
    CodecContext::new_encoder_by_name(&name)
      .map(Self::wrap)
      .map_err(codec_error)
  }

  /// Allocate a context preset for the decoder of `codecId`
  #[napi(factory)]
  pub fn decoder(codec_id: i32) -> Result<Self> {
    CodecContext::new_decoder(AVCodecID::from_raw(codec_id))
      .map(Self::wrap)
      .map_err(codec_error)
  }

  fn wrap(ctx: CodecContext) -> Self {
    Self {
      inner: Mutex::new(Some(ctx)),
    }
  }

  /// Whether close() has been called
  #[napi(getter)]
  pub fn closed(&self) -> Result<bool> {
    let guard = self
      .inner
      .lock()
      .map_err(|_| Error::new(Status::GenericFailure, "Lock poisoned"))?;
    Ok(guard.is_none())
  }

  // ========================================================================
  // Stream identity
  // ========================================================================

  #[napi(getter)]
  pub fn media_type(&self) -> Result<i32> {
    self.with_ctx(|ctx| ctx.media_type().as_raw())
  }

  #[napi(setter, js_name = "mediaType")]
  pub fn set_media_type(&self, value: i32) -> Result<()> {
    self.with_ctx_mut(|ctx| ctx.set_media_type(AVMediaType::from_raw(value)))
  }

  #[napi(getter)]
  pub fn codec_id(&self) -> Result<i32> {
    self.with_ctx(|ctx| ctx.codec_id().as_raw())
  }

  #[napi(setter, js_name = "codecId")]
  pub fn set_codec_id(&self, value: i32) -> Result<()> {
    self.with_ctx_mut(|ctx| ctx.set_codec_id(AVCodecID::from_raw(value)))
  }

  /// Library name of the current codec ID (e.g. "h264")
  #[napi(getter)]
  pub fn codec_name(&self) -> Result<String> {
    self.with_ctx(|ctx| ctx.codec_id().name().to_string())
  }

  // ========================================================================
  // Rate control / timing
  // ========================================================================

  #[napi(getter)]
  pub fn bit_rate(&self) -> Result<i64> {
    self.with_ctx(|ctx| ctx.bit_rate())
  }

  #[napi(setter, js_name = "bitRate")]
  pub fn set_bit_rate(&self, value: i64) -> Result<()> {
    self.with_ctx_mut(|ctx| ctx.set_bit_rate(value))
  }

  #[napi(getter)]
  pub fn time_base(&self) -> Result<Rational> {
    self.with_ctx(|ctx| ctx.time_base().into())
  }

  #[napi(setter, js_name = "timeBase")]
  pub fn set_time_base(&self, value: Rational) -> Result<()> {
    self.with_ctx_mut(|ctx| ctx.set_time_base(value.into()))
  }

  #[napi(getter)]
  pub fn framerate(&self) -> Result<Rational> {
    self.with_ctx(|ctx| ctx.framerate().into())
  }

  #[napi(setter, js_name = "framerate")]
  pub fn set_framerate(&self, value: Rational) -> Result<()> {
    self.with_ctx_mut(|ctx| ctx.set_framerate(value.into()))
  }

  #[napi(getter)]
  pub fn gop_size(&self) -> Result<i32> {
    self.with_ctx(|ctx| ctx.gop_size())
  }

  #[napi(setter, js_name = "gopSize")]
  pub fn set_gop_size(&self, value: i32) -> Result<()> {
    self.with_ctx_mut(|ctx| ctx.set_gop_size(value))
  }

  #[napi(getter)]
  pub fn max_b_frames(&self) -> Result<i32> {
    self.with_ctx(|ctx| ctx.max_b_frames())
  }

  #[napi(setter, js_name = "maxBFrames")]
  pub fn set_max_b_frames(&self, value: i32) -> Result<()> {
    self.with_ctx_mut(|ctx| ctx.set_max_b_frames(value))
  }

  #[napi(getter)]
  pub fn thread_count(&self) -> Result<i32> {
    self.with_ctx(|ctx| ctx.thread_count())
  }

  #[napi(setter, js_name = "threadCount")]
  pub fn set_thread_count(&self, value: i32) -> Result<()> {
    self.with_ctx_mut(|ctx| ctx.set_thread_count(value))
  }

  // ========================================================================
  // Picture geometry
  // ========================================================================

  #[napi(getter)]
  pub fn width(&self) -> Result<i32> {
    self.with_ctx(|ctx| ctx.width())
  }

  #[napi(setter, js_name = "width")]
  pub fn set_width(&self, value: i32) -> Result<()> {
    self.with_ctx_mut(|ctx| ctx.set_width(value))
  }

  #[napi(getter)]
  pub fn height(&self) -> Result<i32> {
    self.with_ctx(|ctx| ctx.height())
  }

  #[napi(setter, js_name = "height")]
  pub fn set_height(&self, value: i32) -> Result<()> {
    self.with_ctx_mut(|ctx| ctx.set_height(value))
  }

  #[napi(getter)]
  pub fn pixel_format(&self) -> Result<i32> {
    self.with_ctx(|ctx| ctx.pixel_format().as_raw())
  }

  #[napi(setter, js_name = "pixelFormat")]
  pub fn set_pixel_format(&self, value: i32) -> Result<()> {
    self.with_ctx_mut(|ctx| ctx.set_pixel_format(AVPixelFormat::from_raw(value)))
  }

  #[napi(getter)]
  pub fn flags(&self) -> Result<i32> {
    self.with_ctx(|ctx| ctx.flags())
  }

  #[napi(setter, js_name = "flags")]
  pub fn set_flags(&self, value: i32) -> Result<()> {
    self.with_ctx_mut(|ctx| ctx.set_flags(value))
  }

  // ========================================================================
  // Encoder tuning
  // ========================================================================

  #[napi(getter)]
  pub fn me_range(&self) -> Result<i32> {
    self.with_ctx(|ctx| ctx.me_range())
  }

  #[napi(setter, js_name = "meRange")]
  pub fn set_me_range(&self, value: i32) -> Result<()> {
    self.with_ctx_mut(|ctx| ctx.set_me_range(value))
  }

  #[napi(getter)]
  pub fn max_qdiff(&self) -> Result<i32> {
    self.with_ctx(|ctx| ctx.max_qdiff())
  }

  #[napi(setter, js_name = "maxQdiff")]
  pub fn set_max_qdiff(&self, value: i32) -> Result<()> {
    self.with_ctx_mut(|ctx| ctx.set_max_qdiff(value))
  }

  #[napi(getter)]
  pub fn qmin(&self) -> Result<i32> {
    self.with_ctx(|ctx| ctx.qmin())
  }

  #[napi(setter, js_name = "qmin")]
  pub fn set_qmin(&self, value: i32) -> Result<()> {
    self.with_ctx_mut(|ctx| ctx.set_qmin(value))
  }

  #[napi(getter)]
  pub fn qmax(&self) -> Result<i32> {
    self.with_ctx(|ctx| ctx.qmax())
  }

  #[napi(setter, js_name = "qmax")]
  pub fn set_qmax(&self, value: i32) -> Result<()> {
    self.with_ctx_mut(|ctx| ctx.set_qmax(value))
  }

  #[napi(getter)]
  pub fn qcompress(&self) -> Result<f64> {
    self.with_ctx(|ctx| ctx.qcompress() as f64)
  }

  #[napi(setter, js_name = "qcompress")]
  pub fn set_qcompress(&self, value: f64) -> Result<()> {
    self.with_ctx_mut(|ctx| ctx.set_qcompress(value as f32))
  }

  // ========================================================================
  // Extradata
  // ========================================================================

  /// Copy of the codec extradata
  #[napi(getter)]
  pub fn extradata(&self) -> Result<Uint8Array> {
    self.with_ctx(|ctx| Uint8Array::new(ctx.extradata().to_vec()))
  }

  #[napi(setter, js_name = "extradata")]
  pub fn set_extradata(&self, value: Uint8Array) -> Result<()> {
    self
      .with_ctx_mut(|ctx| ctx.set_extradata(&value))?
      .map_err(codec_error)
  }

  // ========================================================================
  // Lifecycle
  // ========================================================================

  /// Close the codec and free the native context
  ///
  /// Safe to call more than once; later calls do nothing.
  #[napi]
  pub fn close(&self) -> Result<()> {
    let mut guard = self
      .inner
      .lock()
      .map_err(|_| Error::new(Status::GenericFailure, "Lock poisoned"))?;

    match guard.take() {
      Some(ctx) => ctx.release(),
      None => tracing::warn!(target: "codec_context", "close() called on a closed CodecContext"),
    }
    Ok(())
  }

  // ========================================================================
  // Internal helpers
  // ========================================================================

  fn with_ctx<F, R>(&self, f: F) -> Result<R>
  where
    F: FnOnce(&CodecContextRef) -> R,
  {
    let guard = self
      .inner
      .lock()
      .map_err(|_| Error::new(Status::GenericFailure, "Lock poisoned"))?;

    match guard.as_ref() {
      Some(ctx) => Ok(f(ctx)),
      None => Err(invalid_state_error("CodecContext is closed")),
    }
  }

  fn with_ctx_mut<F, R>(&self, f: F) -> Result<R>
  where
    F: FnOnce(&mut CodecContextRef) -> R,
  {
    let mut guard = self
      .inner
      .lock()
      .map_err(|_| Error::new(Status::GenericFailure, "Lock poisoned"))?;

    match guard.as_mut() {
      Some(ctx) => Ok(f(ctx)),
      None => Err(invalid_state_error("CodecContext is closed")),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_properties_round_trip() {
    let ctx = JsCodecContext::new().unwrap();
    ctx.set_width(640).unwrap();
    ctx.set_flags(i32::MIN).unwrap();
    ctx
      .set_time_base(Rational { num: 1, den: 90_000 })
      .unwrap();

    assert_eq!(ctx.width().unwrap(), 640);
    assert_eq!(ctx.flags().unwrap(), i32::MIN);
    assert_eq!(ctx.time_base().unwrap(), Rational { num: 1, den: 90_000 });
  }

  #[test]
  fn test_qcompress_narrowed_to_float() {
    let ctx = JsCodecContext::new().unwrap();
    ctx.set_qcompress(0.1).unwrap();
    assert_eq!(ctx.qcompress().unwrap(), 0.1f32 as f64);
  }

  #[test]
  fn test_extradata_copied_both_ways() {
    let ctx = JsCodecContext::new().unwrap();
    ctx
      .set_extradata(Uint8Array::new(vec![0x01, 0x64, 0x00, 0x1f]))
      .unwrap();

    let out = ctx.extradata().unwrap();
    assert_eq!(out.to_vec(), vec![0x01, 0x64, 0x00, 0x1f]);
  }

  #[test]
  fn test_close_is_idempotent() {
    let ctx = JsCodecContext::new().unwrap();
    assert!(!ctx.closed().unwrap());

    assert!(ctx.close().is_ok());
    assert!(ctx.close().is_ok());
    assert!(ctx.closed().unwrap());
  }

  #[test]
  fn test_accessors_after_close_fail() {
    let ctx = JsCodecContext::new().unwrap();
    ctx.close().unwrap();

    let err = ctx.width().unwrap_err();
    assert!(err.reason.starts_with("InvalidStateError:"));
    let err = ctx.set_qmax(10).unwrap_err();
    assert!(err.reason.starts_with("InvalidStateError:"));
    assert!(ctx.extradata().is_err());
  }
}
