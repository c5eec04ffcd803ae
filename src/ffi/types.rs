//! Core FFmpeg type definitions
//!
//! All FFmpeg structs are opaque (zero-sized) to avoid version-specific layout dependencies.
//! Field access is done via the thin C accessor library in accessors.c
//!
//! FFmpeg enums are modelled as transparent `c_int` newtypes with named constants instead of
//! Rust enums: a codec context may hold any value the library knows about (or any value a caller
//! chose to store), and every one of them has to survive a read back into Rust.

use std::ffi::CStr;
use std::fmt;
use std::marker::PhantomData;
use std::os::raw::{c_char, c_int};

// ============================================================================
// Rational Number
// ============================================================================

/// Rational number for time bases and frame rates
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct AVRational {
    /// Numerator
    pub num: c_int,
    /// Denominator
    pub den: c_int,
}

impl AVRational {
    pub const fn new(num: c_int, den: c_int) -> Self {
        Self { num, den }
    }

    pub fn as_f64(&self) -> f64 {
        if self.den == 0 {
            0.0
        } else {
            self.num as f64 / self.den as f64
        }
    }
}

impl fmt::Display for AVRational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

// ============================================================================
// Enum newtypes
// ============================================================================

macro_rules! ffi_enum {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $value:expr,)*
        }
    ) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub c_int);

        #[allow(non_upper_case_globals)]
        impl $name {
            $($(#[$vmeta])* pub const $variant: Self = Self($value);)*

            /// Wrap a raw FFmpeg value (unknown values are kept as-is)
            #[inline]
            pub const fn from_raw(raw: c_int) -> Self {
                Self(raw)
            }

            /// Get the raw FFmpeg value
            #[inline]
            pub const fn as_raw(&self) -> c_int {
                self.0
            }

            /// Name of the constant this value matches, if any
            pub fn known_name(&self) -> Option<&'static str> {
                match *self {
                    $(Self::$variant => Some(stringify!($variant)),)*
                    _ => None,
                }
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self.known_name() {
                    Some(name) => write!(f, "{}::{}", stringify!($name), name),
                    None => write!(f, "{}({})", stringify!($name), self.0),
                }
            }
        }

        impl From<c_int> for $name {
            fn from(raw: c_int) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for c_int {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

// ============================================================================
// Media Types
// ============================================================================

ffi_enum! {
    /// Stream kind (`enum AVMediaType`)
    pub struct AVMediaType {
        Unknown = -1,
        Video = 0,
        Audio = 1,
        Data = 2,
        Subtitle = 3,
        Attachment = 4,
    }
}

impl Default for AVMediaType {
    fn default() -> Self {
        Self::Unknown
    }
}

impl AVMediaType {
    /// FFmpeg's printable name ("video", "audio", ...), `None` for unknown values
    pub fn name(&self) -> Option<&'static str> {
        unsafe { static_str(super::avutil::av_get_media_type_string(self.0)) }
    }
}

// ============================================================================
// Codec IDs
// ============================================================================

ffi_enum! {
    /// Codec algorithm identifier (`enum AVCodecID`)
    pub struct AVCodecID {
        None = 0,
        // Video
        Mpeg1video = 1,
        Mpeg2video = 2,
        H263 = 4,
        Mjpeg = 7,
        Mpeg4 = 12,
        Rawvideo = 13,
        H264 = 27,
        Vp8 = 139,
        Vp9 = 167,
        Hevc = 173, // H.265
        Av1 = 226,
        // Audio
        PcmS16le = 0x10000,
        Mp2 = 0x15000,
        Mp3 = 0x15001,
        Aac = 0x15002,
        Ac3 = 0x15003,
        Vorbis = 0x15005,
        Flac = 0x1500c,
        Opus = 0x1503c,
        // Subtitles
        DvdSubtitle = 0x17000,
        DvbSubtitle = 0x17001,
    }
}

impl Default for AVCodecID {
    fn default() -> Self {
        Self::None
    }
}

impl AVCodecID {
    /// FFmpeg's canonical codec name ("h264", "aac", ...)
    ///
    /// Unknown IDs yield the library's placeholder name rather than failing.
    pub fn name(&self) -> &'static str {
        unsafe { static_str(super::avcodec::avcodec_get_name(self.0)) }.unwrap_or("unknown_codec")
    }
}

// ============================================================================
// Pixel Formats
// ============================================================================

ffi_enum! {
    /// Video pixel layout (`enum AVPixelFormat`)
    pub struct AVPixelFormat {
        None = -1,
        // Planar YUV formats
        Yuv420p = 0,
        Yuv422p = 4,
        Yuv444p = 5,
        Yuva420p = 33,
        Gray8 = 8,
        // Semi-planar formats
        Nv12 = 23,
        Nv21 = 24,
        // RGB formats
        Rgb24 = 2,
        Bgr24 = 3,
        Argb = 25,
        Rgba = 26,
        Abgr = 27,
        Bgra = 28,
        // 10-bit formats
        Yuv420p10le = 64,
    }
}

impl Default for AVPixelFormat {
    fn default() -> Self {
        Self::None
    }
}

/// Borrow a NUL-terminated string with static storage owned by FFmpeg
///
/// # Safety
/// `ptr` must be null or point to a string that lives for the whole program.
unsafe fn static_str(ptr: *const c_char) -> Option<&'static str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

// ============================================================================
// Opaque FFmpeg Types
// ============================================================================

/// Opaque AVCodec structure (codec implementation descriptor)
#[repr(C)]
pub struct AVCodec {
    _opaque: [u8; 0],
    _marker: PhantomData<(*mut u8, std::marker::PhantomPinned)>,
}

/// Opaque AVCodecContext structure (encoder/decoder instance)
#[repr(C)]
pub struct AVCodecContext {
    _opaque: [u8; 0],
    _marker: PhantomData<(*mut u8, std::marker::PhantomPinned)>,
}

// ============================================================================
// Constants
// ============================================================================

/// Zeroed bytes FFmpeg expects after every extradata/bitstream buffer
pub const AV_INPUT_BUFFER_PADDING_SIZE: usize = 64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_values_survive() {
        let id = AVCodecID::from_raw(987_654);
        assert_eq!(id.as_raw(), 987_654);
        assert_eq!(id.known_name(), None);
        assert_eq!(format!("{:?}", id), "AVCodecID(987654)");
    }

    #[test]
    fn test_known_names() {
        assert_eq!(AVCodecID::H264.known_name(), Some("H264"));
        assert_eq!(format!("{:?}", AVMediaType::Audio), "AVMediaType::Audio");
        assert_eq!(AVCodecID::H264.name(), "h264");
        assert_eq!(AVMediaType::Video.name(), Some("video"));
        assert_eq!(AVMediaType::from_raw(42).name(), None);
    }

    #[test]
    fn test_rational() {
        let tb = AVRational::new(1, 30);
        assert_eq!(AVRational::new(5, 0).as_f64(), 0.0);
        assert_eq!(tb.to_string(), "1/30");
    }
}
