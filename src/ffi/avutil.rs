//! libavutil function declarations
//!
//! Only the helpers the codec context layer needs: error strings, media type names and
//! the library's own log level.

use std::os::raw::{c_char, c_int};

unsafe extern "C" {
    // ========================================================================
    // Error Handling
    // ========================================================================

    /// Put a description of the AVERROR code errnum in errbuf
    ///
    /// # Arguments
    /// * `errnum` - Error code to describe
    /// * `errbuf` - Buffer to put description in
    /// * `errbuf_size` - Size of errbuf
    ///
    /// # Returns
    /// 0 on success, negative if truncated
    pub fn av_strerror(errnum: c_int, errbuf: *mut c_char, errbuf_size: usize) -> c_int;

    // ========================================================================
    // Media Types
    // ========================================================================

    /// Return a string describing the media type, or NULL if unknown
    pub fn av_get_media_type_string(media_type: c_int) -> *const c_char;

    // ========================================================================
    // Logging
    // ========================================================================

    /// Set the logging level
    pub fn av_log_set_level(level: c_int);

    /// Get the current logging level
    pub fn av_log_get_level() -> c_int;
}

// ============================================================================
// Logging Levels
// ============================================================================

pub mod log_level {
    use std::os::raw::c_int;

    pub const QUIET: c_int = -8;
    pub const PANIC: c_int = 0;
    pub const FATAL: c_int = 8;
    pub const ERROR: c_int = 16;
    pub const WARNING: c_int = 24;
    pub const INFO: c_int = 32;
    pub const VERBOSE: c_int = 40;
    pub const DEBUG: c_int = 48;
    pub const TRACE: c_int = 56;
}

/// Set libav* console logging verbosity (see [`log_level`])
pub fn set_log_level(level: c_int) {
    unsafe { av_log_set_level(level) }
}

/// Current libav* console logging verbosity
pub fn current_log_level() -> c_int {
    unsafe { av_log_get_level() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_round_trip() {
        let previous = current_log_level();
        set_log_level(log_level::QUIET);
        assert_eq!(current_log_level(), log_level::QUIET);
        set_log_level(previous);
    }
}
