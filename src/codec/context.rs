//! Safe wrappers around FFmpeg AVCodecContext
//!
//! [`CodecContext`] owns a context and tears it down exactly once (on drop, or through
//! [`CodecContext::release`]). [`CodecContextRef`] is the borrowed view that carries every
//! field accessor; it is what you get when the context belongs to someone else.

use crate::ffi::{
    self,
    accessors::{
        ffctx_get_bit_rate, ffctx_get_codec_id, ffctx_get_codec_type, ffctx_get_extradata,
        ffctx_get_extradata_mut, ffctx_get_extradata_size, ffctx_get_flags, ffctx_get_framerate,
        ffctx_get_gop_size, ffctx_get_height, ffctx_get_max_b_frames, ffctx_get_max_qdiff,
        ffctx_get_me_range, ffctx_get_pix_fmt, ffctx_get_qcompress, ffctx_get_qmax,
        ffctx_get_qmin, ffctx_get_thread_count, ffctx_get_time_base, ffctx_get_width,
        ffctx_set_bit_rate, ffctx_set_codec_id, ffctx_set_codec_type, ffctx_set_extradata,
        ffctx_set_flags, ffctx_set_framerate, ffctx_set_gop_size, ffctx_set_height,
        ffctx_set_max_b_frames, ffctx_set_max_qdiff, ffctx_set_me_range, ffctx_set_pix_fmt,
        ffctx_set_qcompress, ffctx_set_qmax, ffctx_set_qmin, ffctx_set_thread_count,
        ffctx_set_time_base, ffctx_set_width,
    },
    avcodec::{
        avcodec_alloc_context3, avcodec_find_decoder, avcodec_find_decoder_by_name,
        avcodec_find_encoder, avcodec_find_encoder_by_name, avcodec_free_context,
    },
    AVCodec, AVCodecContext, AVCodecID, AVMediaType, AVPixelFormat, AVRational,
    AV_INPUT_BUFFER_PADDING_SIZE,
};
use std::ffi::CString;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::os::raw::c_int;
use std::ptr::{self, NonNull};

use super::{CodecError, CodecResult, ContextConfig};

/// Largest extradata payload the context can hold (size field is a C int, plus padding)
pub const MAX_EXTRADATA_SIZE: usize = c_int::MAX as usize - AV_INPUT_BUFFER_PADDING_SIZE;

// ============================================================================
// Borrowed view
// ============================================================================

/// Borrowed view of an AVCodecContext
///
/// Only ever handled as `&CodecContextRef` / `&mut CodecContextRef`; the reference lifetime
/// bounds how long the foreign context may be touched. Neither `Send` nor `Sync`: callers
/// that share a context across threads have to serialize access themselves.
#[repr(transparent)]
pub struct CodecContextRef(AVCodecContext);

impl CodecContextRef {
    /// Borrow a context owned elsewhere
    ///
    /// # Safety
    /// `ptr` must point to a live AVCodecContext that is not freed, and not mutated through
    /// another path, for the whole of `'a`.
    pub unsafe fn from_ptr<'a>(ptr: *const AVCodecContext) -> &'a Self {
        unsafe { &*(ptr as *const Self) }
    }

    /// Mutably borrow a context owned elsewhere
    ///
    /// # Safety
    /// `ptr` must point to a live AVCodecContext that is not freed, and not accessed through
    /// any other path, for the whole of `'a`.
    pub unsafe fn from_ptr_mut<'a>(ptr: *mut AVCodecContext) -> &'a mut Self {
        unsafe { &mut *(ptr as *mut Self) }
    }

    /// Get raw pointer (for FFmpeg API calls)
    #[inline]
    pub fn as_ptr(&self) -> *const AVCodecContext {
        self as *const Self as *const AVCodecContext
    }

    /// Get mutable raw pointer
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut AVCodecContext {
        self as *mut Self as *mut AVCodecContext
    }

    // ========================================================================
    // Stream identity
    // ========================================================================

    /// Stream kind (video, audio, ...)
    pub fn media_type(&self) -> AVMediaType {
        AVMediaType::from_raw(unsafe { ffctx_get_codec_type(self.as_ptr()) })
    }

    pub fn set_media_type(&mut self, media_type: AVMediaType) {
        unsafe { ffctx_set_codec_type(self.as_mut_ptr(), media_type.as_raw()) }
    }

    /// Codec algorithm identifier
    pub fn codec_id(&self) -> AVCodecID {
        AVCodecID::from_raw(unsafe { ffctx_get_codec_id(self.as_ptr()) })
    }

    /// Store a codec identifier
    ///
    /// Not validated: an ID the library does not know is stored as-is and only fails once
    /// the library tries to use the context.
    pub fn set_codec_id(&mut self, codec_id: AVCodecID) {
        unsafe { ffctx_set_codec_id(self.as_mut_ptr(), codec_id.as_raw()) }
    }

    // ========================================================================
    // Rate control / timing
    // ========================================================================

    /// Average bitrate in bits per second
    pub fn bit_rate(&self) -> i64 {
        unsafe { ffctx_get_bit_rate(self.as_ptr()) }
    }

    pub fn set_bit_rate(&mut self, bit_rate: i64) {
        unsafe { ffctx_set_bit_rate(self.as_mut_ptr(), bit_rate) }
    }

    /// Fundamental unit of time in which frame timestamps are represented
    pub fn time_base(&self) -> AVRational {
        let mut tb = AVRational::default();
        unsafe { ffctx_get_time_base(self.as_ptr(), &mut tb.num, &mut tb.den) };
        tb
    }

    /// Store a time base; a zero denominator is passed through untouched
    pub fn set_time_base(&mut self, time_base: AVRational) {
        unsafe { ffctx_set_time_base(self.as_mut_ptr(), time_base.num, time_base.den) }
    }

    pub fn framerate(&self) -> AVRational {
        let mut rate = AVRational::default();
        unsafe { ffctx_get_framerate(self.as_ptr(), &mut rate.num, &mut rate.den) };
        rate
    }

    pub fn set_framerate(&mut self, framerate: AVRational) {
        unsafe { ffctx_set_framerate(self.as_mut_ptr(), framerate.num, framerate.den) }
    }

    pub fn gop_size(&self) -> i32 {
        unsafe { ffctx_get_gop_size(self.as_ptr()) }
    }

    pub fn set_gop_size(&mut self, gop_size: i32) {
        unsafe { ffctx_set_gop_size(self.as_mut_ptr(), gop_size) }
    }

    pub fn max_b_frames(&self) -> i32 {
        unsafe { ffctx_get_max_b_frames(self.as_ptr()) }
    }

    pub fn set_max_b_frames(&mut self, max_b_frames: i32) {
        unsafe { ffctx_set_max_b_frames(self.as_mut_ptr(), max_b_frames) }
    }

    pub fn thread_count(&self) -> i32 {
        unsafe { ffctx_get_thread_count(self.as_ptr()) }
    }

    pub fn set_thread_count(&mut self, thread_count: i32) {
        unsafe { ffctx_set_thread_count(self.as_mut_ptr(), thread_count) }
    }

    // ========================================================================
    // Picture geometry
    // ========================================================================

    pub fn width(&self) -> i32 {
        unsafe { ffctx_get_width(self.as_ptr()) }
    }

    pub fn set_width(&mut self, width: i32) {
        unsafe { ffctx_set_width(self.as_mut_ptr(), width) }
    }

    pub fn height(&self) -> i32 {
        unsafe { ffctx_get_height(self.as_ptr()) }
    }

    pub fn set_height(&mut self, height: i32) {
        unsafe { ffctx_set_height(self.as_mut_ptr(), height) }
    }

    pub fn pixel_format(&self) -> AVPixelFormat {
        AVPixelFormat::from_raw(unsafe { ffctx_get_pix_fmt(self.as_ptr()) })
    }

    pub fn set_pixel_format(&mut self, pixel_format: AVPixelFormat) {
        unsafe { ffctx_set_pix_fmt(self.as_mut_ptr(), pixel_format.as_raw()) }
    }

    /// `AV_CODEC_FLAG_*` bitmask, see [`ffi::accessors::codec_flag`]
    pub fn flags(&self) -> i32 {
        unsafe { ffctx_get_flags(self.as_ptr()) }
    }

    pub fn set_flags(&mut self, flags: i32) {
        unsafe { ffctx_set_flags(self.as_mut_ptr(), flags) }
    }

    // ========================================================================
    // Encoder tuning
    // ========================================================================

    /// Maximum motion estimation search range in subpel units
    pub fn me_range(&self) -> i32 {
        unsafe { ffctx_get_me_range(self.as_ptr()) }
    }

    pub fn set_me_range(&mut self, me_range: i32) {
        unsafe { ffctx_set_me_range(self.as_mut_ptr(), me_range) }
    }

    /// Maximum quantizer difference between frames
    pub fn max_qdiff(&self) -> i32 {
        unsafe { ffctx_get_max_qdiff(self.as_ptr()) }
    }

    pub fn set_max_qdiff(&mut self, max_qdiff: i32) {
        unsafe { ffctx_set_max_qdiff(self.as_mut_ptr(), max_qdiff) }
    }

    pub fn qmin(&self) -> i32 {
        unsafe { ffctx_get_qmin(self.as_ptr()) }
    }

    pub fn set_qmin(&mut self, qmin: i32) {
        unsafe { ffctx_set_qmin(self.as_mut_ptr(), qmin) }
    }

    pub fn qmax(&self) -> i32 {
        unsafe { ffctx_get_qmax(self.as_ptr()) }
    }

    pub fn set_qmax(&mut self, qmax: i32) {
        unsafe { ffctx_set_qmax(self.as_mut_ptr(), qmax) }
    }

    /// Amount of qscale change between easy and hard scenes (0.0-1.0)
    pub fn qcompress(&self) -> f32 {
        unsafe { ffctx_get_qcompress(self.as_ptr()) }
    }

    pub fn set_qcompress(&mut self, qcompress: f32) {
        unsafe { ffctx_set_qcompress(self.as_mut_ptr(), qcompress) }
    }

    // ========================================================================
    // Extradata
    // ========================================================================

    /// Codec extradata (e.g., SPS/PPS for H.264)
    ///
    /// The slice aliases the context's own buffer; nothing is copied. Empty when the
    /// context carries no extradata.
    pub fn extradata(&self) -> &[u8] {
        unsafe {
            let ptr = ffctx_get_extradata(self.as_ptr());
            let size = ffctx_get_extradata_size(self.as_ptr());
            if ptr.is_null() || size <= 0 {
                &[]
            } else {
                std::slice::from_raw_parts(ptr, size as usize)
            }
        }
    }

    /// Mutable view of the context's extradata buffer
    ///
    /// Writes land directly in the foreign buffer and are seen by every later reader.
    pub fn extradata_mut(&mut self) -> &mut [u8] {
        unsafe {
            let size = ffctx_get_extradata_size(self.as_ptr());
            let ptr = ffctx_get_extradata_mut(self.as_mut_ptr());
            if ptr.is_null() || size <= 0 {
                &mut []
            } else {
                std::slice::from_raw_parts_mut(ptr, size as usize)
            }
        }
    }

    /// Replace the extradata with a copy of `data`
    ///
    /// The copy lives in a padded buffer allocated by libavutil, so the context never points
    /// into Rust-owned memory and frees it itself on teardown. An empty slice clears the field.
    pub fn set_extradata(&mut self, data: &[u8]) -> CodecResult<()> {
        if data.len() > MAX_EXTRADATA_SIZE {
            return Err(CodecError::InvalidConfig(format!(
                "extradata of {} bytes exceeds the {} byte limit",
                data.len(),
                MAX_EXTRADATA_SIZE
            )));
        }

        let ret =
            unsafe { ffctx_set_extradata(self.as_mut_ptr(), data.as_ptr(), data.len() as c_int) };
        ffi::check_error(ret)?;

        tracing::debug!(target: "codec_context", size = data.len(), "replaced extradata");
        Ok(())
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Apply every field present in `config`
    pub fn configure(&mut self, config: &ContextConfig) -> CodecResult<()> {
        if let Some(media_type) = config.media_type {
            self.set_media_type(media_type);
        }
        if let Some(codec_id) = config.codec_id {
            self.set_codec_id(codec_id);
        }
        if let Some(bit_rate) = config.bit_rate {
            self.set_bit_rate(bit_rate);
        }
        if let Some(time_base) = config.time_base {
            self.set_time_base(time_base);
        }
        if let Some(framerate) = config.framerate {
            self.set_framerate(framerate);
        }
        if let Some(width) = config.width {
            self.set_width(width);
        }
        if let Some(height) = config.height {
            self.set_height(height);
        }
        if let Some(pixel_format) = config.pixel_format {
            self.set_pixel_format(pixel_format);
        }
        if let Some(flags) = config.flags {
            self.set_flags(flags);
        }
        if let Some(gop_size) = config.gop_size {
            self.set_gop_size(gop_size);
        }
        if let Some(max_b_frames) = config.max_b_frames {
            self.set_max_b_frames(max_b_frames);
        }
        if let Some(thread_count) = config.thread_count {
            self.set_thread_count(thread_count);
        }
        if let Some(me_range) = config.me_range {
            self.set_me_range(me_range);
        }
        if let Some(max_qdiff) = config.max_qdiff {
            self.set_max_qdiff(max_qdiff);
        }
        if let Some(qmin) = config.qmin {
            self.set_qmin(qmin);
        }
        if let Some(qmax) = config.qmax {
            self.set_qmax(qmax);
        }
        if let Some(qcompress) = config.qcompress {
            self.set_qcompress(qcompress);
        }
        if let Some(ref extradata) = config.extradata {
            self.set_extradata(extradata)?;
        }

        Ok(())
    }
}

impl fmt::Debug for CodecContextRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecContextRef")
            .field("media_type", &self.media_type())
            .field("codec_id", &self.codec_id())
            .field("bit_rate", &self.bit_rate())
            .field("time_base", &self.time_base())
            .field("width", &self.width())
            .field("height", &self.height())
            .field("pixel_format", &self.pixel_format())
            .field("flags", &format_args!("{:#x}", self.flags()))
            .field("qmin", &self.qmin())
            .field("qmax", &self.qmax())
            .field("extradata_len", &self.extradata().len())
            .finish()
    }
}

// ============================================================================
// Owned context
// ============================================================================

/// Owned AVCodecContext, freed exactly once
pub struct CodecContext {
    ptr: NonNull<AVCodecContext>,
}

impl CodecContext {
    /// Allocate a context with library defaults and no codec attached
    pub fn new() -> CodecResult<Self> {
        Self::from_codec(ptr::null())
    }

    /// Create a new encoder context for the given codec ID
    pub fn new_encoder(codec_id: AVCodecID) -> CodecResult<Self> {
        let codec = unsafe { avcodec_find_encoder(codec_id.as_raw()) };
        if codec.is_null() {
            return Err(CodecError::EncoderNotFound(codec_id));
        }
        Self::from_codec(codec)
    }

    /// Create a new encoder context by codec name (e.g., "libx264", "h264_videotoolbox")
    pub fn new_encoder_by_name(name: &str) -> CodecResult<Self> {
        let c_name =
            CString::new(name).map_err(|_| CodecError::InvalidConfig("Invalid codec name".into()))?;
        let codec = unsafe { avcodec_find_encoder_by_name(c_name.as_ptr()) };
        if codec.is_null() {
            return Err(CodecError::CodecNotFound(name.to_string()));
        }
        Self::from_codec(codec)
    }

    /// Create a new decoder context for the given codec ID
    pub fn new_decoder(codec_id: AVCodecID) -> CodecResult<Self> {
        let codec = unsafe { avcodec_find_decoder(codec_id.as_raw()) };
        if codec.is_null() {
            return Err(CodecError::DecoderNotFound(codec_id));
        }
        Self::from_codec(codec)
    }

    /// Create a new decoder context by codec name
    pub fn new_decoder_by_name(name: &str) -> CodecResult<Self> {
        let c_name =
            CString::new(name).map_err(|_| CodecError::InvalidConfig("Invalid codec name".into()))?;
        let codec = unsafe { avcodec_find_decoder_by_name(c_name.as_ptr()) };
        if codec.is_null() {
            return Err(CodecError::CodecNotFound(name.to_string()));
        }
        Self::from_codec(codec)
    }

    fn from_codec(codec: *const AVCodec) -> CodecResult<Self> {
        let ptr = unsafe { avcodec_alloc_context3(codec) };
        let ctx = NonNull::new(ptr)
            .map(|ptr| Self { ptr })
            .ok_or(CodecError::AllocationFailed("AVCodecContext"))?;

        tracing::trace!(target: "codec_context", ptr = ?ctx.ptr, "allocated codec context");
        Ok(ctx)
    }

    /// Take ownership of a context allocated elsewhere
    ///
    /// # Safety
    /// The pointer must come from `avcodec_alloc_context3`, and nothing else may free it.
    pub unsafe fn from_raw(ptr: *mut AVCodecContext) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| Self { ptr })
    }

    /// Consume the CodecContext and return the raw pointer
    /// The caller is responsible for freeing the context
    pub fn into_raw(self) -> *mut AVCodecContext {
        let ptr = self.ptr.as_ptr();
        std::mem::forget(self);
        ptr
    }

    /// Close the codec and free the context
    ///
    /// Same as dropping; spelled out for call sites where teardown should be visible.
    pub fn release(self) {
        drop(self)
    }
}

impl Deref for CodecContext {
    type Target = CodecContextRef;

    #[inline]
    fn deref(&self) -> &CodecContextRef {
        unsafe { CodecContextRef::from_ptr(self.ptr.as_ptr()) }
    }
}

impl DerefMut for CodecContext {
    #[inline]
    fn deref_mut(&mut self) -> &mut CodecContextRef {
        unsafe { CodecContextRef::from_ptr_mut(self.ptr.as_ptr()) }
    }
}

impl AsRef<CodecContextRef> for CodecContext {
    fn as_ref(&self) -> &CodecContextRef {
        self
    }
}

impl AsMut<CodecContextRef> for CodecContext {
    fn as_mut(&mut self) -> &mut CodecContextRef {
        self
    }
}

impl Drop for CodecContext {
    fn drop(&mut self) {
        tracing::trace!(target: "codec_context", ptr = ?self.ptr, "releasing codec context");
        unsafe {
            let mut ptr = self.ptr.as_ptr();
            avcodec_free_context(&mut ptr);
        }
    }
}

// CodecContext is NOT Sync - FFmpeg contexts are not thread-safe
unsafe impl Send for CodecContext {}

impl fmt::Debug for CodecContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CodecContext").field(&**self).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ffi::accessors::codec_flag;

    fn pattern(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i % 251) as u8).collect()
    }

    #[test]
    fn test_fresh_context_defaults() {
        let ctx = CodecContext::new().unwrap();
        assert_eq!(ctx.media_type(), AVMediaType::Unknown);
        assert_eq!(ctx.codec_id(), AVCodecID::None);
        assert_eq!(ctx.pixel_format(), AVPixelFormat::None);
        assert_eq!(ctx.width(), 0);
        assert_eq!(ctx.qmin(), 2);
        assert_eq!(ctx.qmax(), 31);
        assert!(ctx.extradata().is_empty());
    }

    #[test]
    fn test_int_fields_round_trip() {
        let mut ctx = CodecContext::new().unwrap();
        for v in [0, 1, -1, 1920, i32::MIN, i32::MAX] {
            ctx.set_width(v);
            ctx.set_height(v);
            ctx.set_flags(v);
            ctx.set_me_range(v);
            ctx.set_max_qdiff(v);
            ctx.set_qmin(v);
            ctx.set_qmax(v);
            ctx.set_gop_size(v);
            ctx.set_max_b_frames(v);
            ctx.set_thread_count(v);

            assert_eq!(ctx.width(), v);
            assert_eq!(ctx.height(), v);
            assert_eq!(ctx.flags(), v);
            assert_eq!(ctx.me_range(), v);
            assert_eq!(ctx.max_qdiff(), v);
            assert_eq!(ctx.qmin(), v);
            assert_eq!(ctx.qmax(), v);
            assert_eq!(ctx.gop_size(), v);
            assert_eq!(ctx.max_b_frames(), v);
            assert_eq!(ctx.thread_count(), v);
        }
    }

    #[test]
    fn test_bit_rate_round_trip() {
        let mut ctx = CodecContext::new().unwrap();
        for v in [0, 5_000_000, -1, i64::MIN, i64::MAX] {
            ctx.set_bit_rate(v);
            assert_eq!(ctx.bit_rate(), v);
        }
    }

    #[test]
    fn test_qcompress_round_trip() {
        let mut ctx = CodecContext::new().unwrap();
        for v in [0.0f32, 0.6, -1.5, f32::MAX, f32::MIN_POSITIVE, f32::INFINITY] {
            ctx.set_qcompress(v);
            assert_eq!(ctx.qcompress().to_bits(), v.to_bits());
        }
        ctx.set_qcompress(f32::NAN);
        assert!(ctx.qcompress().is_nan());
    }

    #[test]
    fn test_enum_fields_keep_unknown_values() {
        let mut ctx = CodecContext::new().unwrap();

        for media_type in [AVMediaType::Video, AVMediaType::Subtitle, AVMediaType::from_raw(77)] {
            ctx.set_media_type(media_type);
            assert_eq!(ctx.media_type(), media_type);
        }
        for codec_id in [AVCodecID::H264, AVCodecID::Aac, AVCodecID::from_raw(999_999)] {
            ctx.set_codec_id(codec_id);
            assert_eq!(ctx.codec_id(), codec_id);
        }
        for pixel_format in [AVPixelFormat::Nv12, AVPixelFormat::from_raw(-5)] {
            ctx.set_pixel_format(pixel_format);
            assert_eq!(ctx.pixel_format(), pixel_format);
        }
    }

    #[test]
    fn test_time_base_round_trip() {
        let mut ctx = CodecContext::new().unwrap();
        for (num, den) in [(1, 30), (1001, 30000), (0, 0), (7, 0), (i32::MIN, i32::MAX)] {
            ctx.set_time_base(AVRational::new(num, den));
            assert_eq!(ctx.time_base(), AVRational::new(num, den));

            ctx.set_framerate(AVRational::new(num, den));
            assert_eq!(ctx.framerate(), AVRational::new(num, den));
        }
    }

    #[test]
    fn test_extradata_round_trip() {
        let mut ctx = CodecContext::new().unwrap();
        for len in [0, 1, 65536] {
            let data = pattern(len);
            ctx.set_extradata(&data).unwrap();
            assert_eq!(ctx.extradata(), &data[..]);
            assert_eq!(ctx.extradata().len(), len);
            assert_eq!(ctx.extradata_mut().len(), len);
        }
    }

    #[test]
    fn test_extradata_view_aliases_context() {
        let mut ctx = CodecContext::new().unwrap();
        ctx.set_extradata(&[1, 2, 3]).unwrap();

        let first = ctx.extradata().as_ptr();
        ctx.extradata_mut()[0] = 9;

        assert_eq!(ctx.extradata(), &[9, 2, 3]);
        assert_eq!(ctx.extradata().as_ptr(), first);
    }

    #[test]
    fn test_extradata_setter_copies() {
        let mut ctx = CodecContext::new().unwrap();
        let mut source = vec![0x01, 0x64, 0x00, 0x1f];
        ctx.set_extradata(&source).unwrap();

        assert_ne!(ctx.extradata().as_ptr(), source.as_ptr());
        source[1] = 0xff;
        drop(source);

        assert_eq!(ctx.extradata(), &[0x01, 0x64, 0x00, 0x1f]);
    }

    #[test]
    fn test_extradata_empty_clears() {
        let mut ctx = CodecContext::new().unwrap();
        ctx.set_extradata(&[0xAA; 16]).unwrap();
        ctx.set_extradata(&[]).unwrap();

        assert!(ctx.extradata().is_empty());
        assert!(ctx.extradata_mut().is_empty());
    }

    unsafe extern "C" {
        fn av_max_alloc(max: usize);
    }

    #[test]
    fn test_extradata_kept_when_allocation_fails() {
        let mut ctx = CodecContext::new().unwrap();
        ctx.set_extradata(&[1, 2, 3]).unwrap();

        // Process-wide cap, high enough for the small allocations of concurrent tests
        unsafe { av_max_alloc(256 * 1024) };
        let result = ctx.set_extradata(&vec![0u8; 1024 * 1024]);
        unsafe { av_max_alloc(c_int::MAX as usize) };

        match result {
            Err(CodecError::Ffmpeg(err)) => assert!(err.is_oom()),
            other => panic!("expected ENOMEM, got {:?}", other),
        }
        assert_eq!(ctx.extradata(), &[1, 2, 3]);
    }

    #[test]
    fn test_extradata_set_from_own_buffer() {
        let mut ctx = CodecContext::new().unwrap();
        ctx.set_extradata(&[4, 5, 6, 7]).unwrap();

        let current = ctx.extradata();
        let own = unsafe { std::slice::from_raw_parts(current.as_ptr(), current.len()) };
        ctx.set_extradata(&own[1..]).unwrap();

        assert_eq!(ctx.extradata(), &[5, 6, 7]);
    }

    #[test]
    fn test_borrowed_view_shares_state() {
        let mut owner = CodecContext::new().unwrap();
        let raw = owner.as_mut_ptr();

        {
            let view = unsafe { CodecContextRef::from_ptr_mut(raw) };
            view.set_width(640);
            view.set_extradata(&[0xAA, 0xBB]).unwrap();
        }
        assert_eq!(owner.width(), 640);
        assert_eq!(owner.extradata(), &[0xAA, 0xBB]);

        owner.set_height(480);
        let view = unsafe { CodecContextRef::from_ptr(owner.as_ptr()) };
        assert_eq!(view.height(), 480);
    }

    #[test]
    fn test_configure_applies_fields() {
        let mut ctx = CodecContext::new().unwrap();
        let config = ContextConfig {
            bit_rate: Some(2_500_000),
            flags: Some(codec_flag::GLOBAL_HEADER),
            qmin: Some(10),
            qmax: Some(51),
            qcompress: Some(0.6),
            extradata: Some(vec![0x01, 0x42]),
            ..ContextConfig::video(AVCodecID::H264, 1280, 720)
        };
        ctx.configure(&config).unwrap();

        assert_eq!(ctx.media_type(), AVMediaType::Video);
        assert_eq!(ctx.codec_id(), AVCodecID::H264);
        assert_eq!(ctx.width(), 1280);
        assert_eq!(ctx.height(), 720);
        assert_eq!(ctx.pixel_format(), AVPixelFormat::Yuv420p);
        assert_eq!(ctx.time_base(), AVRational::new(1, 30));
        assert_eq!(ctx.bit_rate(), 2_500_000);
        assert_eq!(ctx.flags() & codec_flag::GLOBAL_HEADER, codec_flag::GLOBAL_HEADER);
        assert_eq!((ctx.qmin(), ctx.qmax()), (10, 51));
        assert_eq!(ctx.qcompress(), 0.6);
        assert_eq!(ctx.extradata(), &[0x01, 0x42]);
    }

    #[test]
    fn test_configure_leaves_unset_fields() {
        let mut ctx = CodecContext::new().unwrap();
        ctx.set_width(320);
        ctx.set_extradata(&[7]).unwrap();

        ctx.configure(&ContextConfig::default()).unwrap();

        assert_eq!(ctx.width(), 320);
        assert_eq!(ctx.extradata(), &[7]);
    }

    #[test]
    fn test_decoder_context_carries_codec() {
        let ctx = CodecContext::new_decoder(AVCodecID::Rawvideo).unwrap();
        assert_eq!(ctx.codec_id(), AVCodecID::Rawvideo);
        assert_eq!(ctx.media_type(), AVMediaType::Video);
    }

    #[test]
    fn test_lookup_failures() {
        let bogus = AVCodecID::from_raw(i32::MAX);
        assert!(matches!(
            CodecContext::new_encoder(bogus),
            Err(CodecError::EncoderNotFound(id)) if id == bogus
        ));
        assert!(matches!(
            CodecContext::new_decoder(bogus),
            Err(CodecError::DecoderNotFound(_))
        ));
        assert!(matches!(
            CodecContext::new_encoder_by_name("no-such-encoder"),
            Err(CodecError::CodecNotFound(_))
        ));
        assert!(matches!(
            CodecContext::new_decoder_by_name("bad\0name"),
            Err(CodecError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_raw_ownership_transfer() {
        let mut ctx = CodecContext::new().unwrap();
        ctx.set_width(99);

        let raw = ctx.into_raw();
        let ctx = unsafe { CodecContext::from_raw(raw) }.unwrap();
        assert_eq!(ctx.width(), 99);
        ctx.release();

        assert!(unsafe { CodecContext::from_raw(ptr::null_mut()) }.is_none());
    }

    #[test]
    fn test_debug_output() {
        let mut ctx = CodecContext::new().unwrap();
        ctx.set_extradata(&[1, 2, 3]).unwrap();
        let text = format!("{:?}", ctx);
        assert!(text.starts_with("CodecContext(CodecContextRef"));
        assert!(text.contains("extradata_len: 3"));
    }

    #[test]
    fn test_context_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<CodecContext>();
    }
}
