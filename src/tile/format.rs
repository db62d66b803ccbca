//! Pixel format and encoding descriptors.
//!
//! These value types describe how a tile's bytes are to be interpreted:
//! which compression (if any) was applied, how wide each sample is, and
//! whether 32-bit samples are integer or floating point.
//!
//! The element size used for every buffer size computation in this crate
//! comes from a single accessor, [`PixelFormat::bytes_per_channel`], so the
//! interpretation used to allocate a buffer can never diverge from the one
//! used to transform it.

use serde::{Deserialize, Serialize};

// =============================================================================
// Sample Format
// =============================================================================

/// Sample representation for a channel value.
///
/// Only meaningful at 32 bits per channel, where it selects between
/// `f32` and `u32` interpretation. Narrower samples are always fixed point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SampleFormat {
    /// Fixed-point (unsigned integer) samples
    #[default]
    FixedPoint,

    /// IEEE-754 floating-point samples
    FloatingPoint,
}

// =============================================================================
// Tile Encoding
// =============================================================================

/// Compression applied to a tile's bytes when not in raw pixel form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileEncoding {
    /// Encoding could not be determined or is not handled
    Unsupported,

    /// Uncompressed pixel data
    #[default]
    Raw,

    /// TIFF-wrapped data
    Tiff,

    /// JPEG 2000 codestream
    Jpeg2000,

    /// Baseline JPEG
    Jpeg,

    /// DEFLATE-compressed data
    Deflate,

    /// PNG image
    Png,

    /// WebP image
    Webp,

    /// AVIF image
    Avif,
}

impl TileEncoding {
    /// Get a human-readable name for the encoding.
    pub const fn name(&self) -> &'static str {
        match self {
            TileEncoding::Unsupported => "unsupported",
            TileEncoding::Raw => "raw",
            TileEncoding::Tiff => "TIFF",
            TileEncoding::Jpeg2000 => "JPEG 2000",
            TileEncoding::Jpeg => "JPEG",
            TileEncoding::Deflate => "DEFLATE",
            TileEncoding::Png => "PNG",
            TileEncoding::Webp => "WebP",
            TileEncoding::Avif => "AVIF",
        }
    }
}

// =============================================================================
// Pixel Format
// =============================================================================

/// Bit depth and sample representation of a tile's channels.
///
/// The element size every buffer computation uses is derived here and
/// nowhere else: 32-bit samples occupy 4 bytes, 16-bit samples 2 bytes,
/// anything else 1 byte. The sample format distinguishes `f32` from `u32`
/// at 32 bits but never changes the size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelFormat {
    /// Bits per channel (8, 16 and 32 are the supported element widths)
    pub bits_per_channel: u32,

    /// Integer or floating-point samples (meaningful at 32 bits only)
    pub sample_format: SampleFormat,
}

impl PixelFormat {
    /// Create a fixed-point format with the given bit depth.
    pub const fn new(bits_per_channel: u32) -> Self {
        Self {
            bits_per_channel,
            sample_format: SampleFormat::FixedPoint,
        }
    }

    /// Create a format with an explicit sample representation.
    pub const fn with_sample_format(bits_per_channel: u32, sample_format: SampleFormat) -> Self {
        Self {
            bits_per_channel,
            sample_format,
        }
    }

    /// Bytes occupied by one channel sample.
    ///
    /// 32-bit → 4, 16-bit → 2, any other depth → 1.
    pub const fn bytes_per_channel(&self) -> usize {
        match self.bits_per_channel {
            32 => 4,
            16 => 2,
            _ => 1,
        }
    }

    /// Whether samples are 32-bit floating point.
    pub const fn is_floating_point(&self) -> bool {
        self.bits_per_channel == 32
            && matches!(self.sample_format, SampleFormat::FloatingPoint)
    }
}

impl Default for PixelFormat {
    fn default() -> Self {
        Self::new(0)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_per_channel_mapping() {
        assert_eq!(PixelFormat::new(32).bytes_per_channel(), 4);
        assert_eq!(PixelFormat::new(16).bytes_per_channel(), 2);
        assert_eq!(PixelFormat::new(8).bytes_per_channel(), 1);

        // Anything outside the supported widths falls back to single bytes
        assert_eq!(PixelFormat::new(0).bytes_per_channel(), 1);
        assert_eq!(PixelFormat::new(1).bytes_per_channel(), 1);
        assert_eq!(PixelFormat::new(12).bytes_per_channel(), 1);
        assert_eq!(PixelFormat::new(64).bytes_per_channel(), 1);
    }

    #[test]
    fn test_sample_format_size_independent() {
        let float = PixelFormat::with_sample_format(32, SampleFormat::FloatingPoint);
        let fixed = PixelFormat::new(32);
        assert_eq!(float.bytes_per_channel(), fixed.bytes_per_channel());
    }

    #[test]
    fn test_is_floating_point() {
        assert!(PixelFormat::with_sample_format(32, SampleFormat::FloatingPoint)
            .is_floating_point());
        assert!(!PixelFormat::new(32).is_floating_point());

        // The sample format is only meaningful at 32 bits
        assert!(!PixelFormat::with_sample_format(16, SampleFormat::FloatingPoint)
            .is_floating_point());
    }

    #[test]
    fn test_defaults() {
        let format = PixelFormat::default();
        assert_eq!(format.bits_per_channel, 0);
        assert_eq!(format.sample_format, SampleFormat::FixedPoint);
        assert_eq!(TileEncoding::default(), TileEncoding::Raw);
    }

    #[test]
    fn test_encoding_name() {
        assert_eq!(TileEncoding::Jpeg.name(), "JPEG");
        assert_eq!(TileEncoding::Jpeg2000.name(), "JPEG 2000");
        assert_eq!(TileEncoding::Raw.name(), "raw");
    }

    #[test]
    fn test_encoding_serde_round_trip() {
        let json = serde_json::to_string(&TileEncoding::Webp).unwrap();
        let back: TileEncoding = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TileEncoding::Webp);
    }
}
