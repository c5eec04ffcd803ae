//! libavcodec function declarations
//!
//! Codec discovery and codec context lifecycle. Encoding and decoding entry points are
//! deliberately absent: this crate only configures and tears down contexts.

use super::types::*;
use std::os::raw::{c_char, c_int};

unsafe extern "C" {
  // ========================================================================
  // Codec Discovery
  // ========================================================================

  /// Find an encoder by codec ID
  pub fn avcodec_find_encoder(id: c_int) -> *const AVCodec;

  /// Find an encoder by name (e.g., "libx264", "h264_videotoolbox")
  pub fn avcodec_find_encoder_by_name(name: *const c_char) -> *const AVCodec;

  /// Find a decoder by codec ID
  pub fn avcodec_find_decoder(id: c_int) -> *const AVCodec;

  /// Find a decoder by name
  pub fn avcodec_find_decoder_by_name(name: *const c_char) -> *const AVCodec;

  // ========================================================================
  // Codec Context Lifecycle
  // ========================================================================

  /// Allocate an AVCodecContext and set its fields to default values
  ///
  /// `codec` may be NULL, in which case codec-specific defaults are not applied.
  pub fn avcodec_alloc_context3(codec: *const AVCodec) -> *mut AVCodecContext;

  /// Close the codec (release internal state, extradata, etc.), free the context itself
  /// and write NULL to the provided pointer
  pub fn avcodec_free_context(avctx: *mut *mut AVCodecContext);

  // ========================================================================
  // Codec Parameters
  // ========================================================================

  /// Get the name of a codec
  pub fn avcodec_get_name(id: c_int) -> *const c_char;

  /// Get the media type of a codec ID
  pub fn avcodec_get_type(codec_id: c_int) -> c_int;
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Media type a codec ID belongs to (Unknown for unrecognized IDs)
pub fn codec_media_type(codec_id: AVCodecID) -> AVMediaType {
  AVMediaType::from_raw(unsafe { avcodec_get_type(codec_id.as_raw()) })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_codec_media_type() {
    assert_eq!(codec_media_type(AVCodecID::H264), AVMediaType::Video);
    assert_eq!(codec_media_type(AVCodecID::Aac), AVMediaType::Audio);
    assert_eq!(codec_media_type(AVCodecID::DvdSubtitle), AVMediaType::Subtitle);
    assert_eq!(codec_media_type(AVCodecID::from_raw(i32::MAX)), AVMediaType::Unknown);
  }
}
