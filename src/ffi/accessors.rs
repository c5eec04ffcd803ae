//! Rust declarations for C accessor functions
//!
//! These functions provide access to AVCodecContext fields via the thin C accessor library.

use super::types::*;
use std::os::raw::c_int;

unsafe extern "C" {
  // ========================================================================
  // AVCodecContext Setters
  // ========================================================================

  pub fn ffctx_set_codec_type(ctx: *mut AVCodecContext, codec_type: c_int);
  pub fn ffctx_set_codec_id(ctx: *mut AVCodecContext, codec_id: c_int);
  pub fn ffctx_set_bit_rate(ctx: *mut AVCodecContext, bit_rate: i64);
  pub fn ffctx_set_time_base(ctx: *mut AVCodecContext, num: c_int, den: c_int);
  pub fn ffctx_set_framerate(ctx: *mut AVCodecContext, num: c_int, den: c_int);
  pub fn ffctx_set_gop_size(ctx: *mut AVCodecContext, gop_size: c_int);
  pub fn ffctx_set_max_b_frames(ctx: *mut AVCodecContext, max_b_frames: c_int);
  pub fn ffctx_set_thread_count(ctx: *mut AVCodecContext, thread_count: c_int);
  pub fn ffctx_set_width(ctx: *mut AVCodecContext, width: c_int);
  pub fn ffctx_set_height(ctx: *mut AVCodecContext, height: c_int);
  pub fn ffctx_set_pix_fmt(ctx: *mut AVCodecContext, pix_fmt: c_int);
  pub fn ffctx_set_flags(ctx: *mut AVCodecContext, flags: c_int);

  // ========================================================================
  // AVCodecContext Getters
  // ========================================================================

  pub fn ffctx_get_codec_type(ctx: *const AVCodecContext) -> c_int;
  pub fn ffctx_get_codec_id(ctx: *const AVCodecContext) -> c_int;
  pub fn ffctx_get_bit_rate(ctx: *const AVCodecContext) -> i64;
  pub fn ffctx_get_time_base(ctx: *const AVCodecContext, num: *mut c_int, den: *mut c_int);
  pub fn ffctx_get_framerate(ctx: *const AVCodecContext, num: *mut c_int, den: *mut c_int);
  pub fn ffctx_get_gop_size(ctx: *const AVCodecContext) -> c_int;
  pub fn ffctx_get_max_b_frames(ctx: *const AVCodecContext) -> c_int;
  pub fn ffctx_get_thread_count(ctx: *const AVCodecContext) -> c_int;
  pub fn ffctx_get_width(ctx: *const AVCodecContext) -> c_int;
  pub fn ffctx_get_height(ctx: *const AVCodecContext) -> c_int;
  pub fn ffctx_get_pix_fmt(ctx: *const AVCodecContext) -> c_int;
  pub fn ffctx_get_flags(ctx: *const AVCodecContext) -> c_int;

  // ========================================================================
  // AVCodecContext Encoder Tuning
  // ========================================================================

  pub fn ffctx_set_me_range(ctx: *mut AVCodecContext, me_range: c_int);
  pub fn ffctx_set_max_qdiff(ctx: *mut AVCodecContext, max_qdiff: c_int);
  pub fn ffctx_set_qmin(ctx: *mut AVCodecContext, qmin: c_int);
  pub fn ffctx_set_qmax(ctx: *mut AVCodecContext, qmax: c_int);
  pub fn ffctx_set_qcompress(ctx: *mut AVCodecContext, qcompress: f32);

  pub fn ffctx_get_me_range(ctx: *const AVCodecContext) -> c_int;
  pub fn ffctx_get_max_qdiff(ctx: *const AVCodecContext) -> c_int;
  pub fn ffctx_get_qmin(ctx: *const AVCodecContext) -> c_int;
  pub fn ffctx_get_qmax(ctx: *const AVCodecContext) -> c_int;
  pub fn ffctx_get_qcompress(ctx: *const AVCodecContext) -> f32;

  // ========================================================================
  // AVCodecContext Extradata
  // ========================================================================

  pub fn ffctx_get_extradata(ctx: *const AVCodecContext) -> *const u8;
  pub fn ffctx_get_extradata_mut(ctx: *mut AVCodecContext) -> *mut u8;
  pub fn ffctx_get_extradata_size(ctx: *const AVCodecContext) -> c_int;

  /// Replace extradata with a padded, libavutil-owned copy of `data`
  ///
  /// Frees the previous buffer. `size <= 0` clears the field.
  /// Returns 0, or AVERROR(ENOMEM) with the context left untouched.
  pub fn ffctx_set_extradata(ctx: *mut AVCodecContext, data: *const u8, size: c_int) -> c_int;
}

// ============================================================================
// Codec Flags
// ============================================================================

/// Well-known `AV_CODEC_FLAG_*` bits
///
/// The accessor layer treats `flags` as an opaque mask; these are conveniences only.
pub mod codec_flag {
  use std::os::raw::c_int;

  /// Allow decoders to produce frames with data planes not aligned to CPU requirements
  pub const UNALIGNED: c_int = 1 << 0;

  /// Use fixed qscale
  pub const QSCALE: c_int = 1 << 1;

  /// Use internal 2-pass rate control in first pass mode
  pub const PASS1: c_int = 1 << 9;

  /// Use internal 2-pass rate control in second pass mode
  pub const PASS2: c_int = 1 << 10;

  /// Only decode/encode grayscale
  pub const GRAY: c_int = 1 << 13;

  /// Error[?] variables will be set during encoding
  pub const PSNR: c_int = 1 << 15;

  /// Use interlaced DCT
  pub const INTERLACED_DCT: c_int = 1 << 18;

  /// Force low delay
  pub const LOW_DELAY: c_int = 1 << 19;

  /// Place global headers in extradata instead of every keyframe
  pub const GLOBAL_HEADER: c_int = 1 << 22;

  /// Use only bitexact stuff (except (I)DCT)
  pub const BITEXACT: c_int = 1 << 23;

  /// Closed GOP
  pub const CLOSED_GOP: c_int = 1 << 31;
}
