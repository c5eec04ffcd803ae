//! DOMException-style error helpers for the Node.js surface
//!
//! Errors cross into JavaScript as `napi::Error` whose message is prefixed with a
//! W3C DOMException name, e.g. `InvalidStateError: CodecContext is closed`.

use crate::codec::CodecError;
use napi::bindgen_prelude::*;

/// DOMException error names used by this binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DOMExceptionName {
  /// Unsupported codec or configuration
  NotSupportedError,
  /// Wrong state (e.g., operating on closed object)
  InvalidStateError,
  /// Invalid data format
  DataError,
  /// Allocation or other native failure
  OperationError,
}

impl DOMExceptionName {
  pub fn as_str(&self) -> &'static str {
    match self {
      DOMExceptionName::NotSupportedError => "NotSupportedError",
      DOMExceptionName::InvalidStateError => "InvalidStateError",
      DOMExceptionName::DataError => "DataError",
      DOMExceptionName::OperationError => "OperationError",
    }
  }
}

/// Create an error with DOMException-style naming
pub fn dom_exception(name: DOMExceptionName, message: &str) -> Error {
  Error::new(
    Status::GenericFailure,
    format!("{}: {}", name.as_str(), message),
  )
}

/// Helper to create InvalidStateError for closed objects
pub fn invalid_state_error(message: &str) -> Error {
  dom_exception(DOMExceptionName::InvalidStateError, message)
}

/// Map a codec error onto the DOMException name a JS caller would expect
pub fn exception_name(err: &CodecError) -> DOMExceptionName {
  match err {
    CodecError::CodecNotFound(_)
    | CodecError::EncoderNotFound(_)
    | CodecError::DecoderNotFound(_) => DOMExceptionName::NotSupportedError,
    CodecError::InvalidConfig(_) => DOMExceptionName::DataError,
    CodecError::AllocationFailed(_) | CodecError::Ffmpeg(_) => DOMExceptionName::OperationError,
  }
}

/// Convert a codec error into a JS error
pub fn codec_error(err: CodecError) -> Error {
  dom_exception(exception_name(&err), &err.to_string())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ffi::AVCodecID;

  #[test]
  fn test_exception_names() {
    assert_eq!(
      exception_name(&CodecError::EncoderNotFound(AVCodecID::H264)),
      DOMExceptionName::NotSupportedError
    );
    assert_eq!(
      exception_name(&CodecError::InvalidConfig("x".into())),
      DOMExceptionName::DataError
    );
    assert_eq!(
      exception_name(&CodecError::AllocationFailed("AVCodecContext")),
      DOMExceptionName::OperationError
    );
  }

  #[test]
  fn test_message_prefix() {
    let err = invalid_state_error("CodecContext is closed");
    assert_eq!(err.reason, "InvalidStateError: CodecContext is closed");
  }
}
