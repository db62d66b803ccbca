//! The raw tile entity.
//!
//! A [`RawTile`] is a single rectangular block of image data moving through
//! a tiling pipeline: the descriptor needed to locate it (tile number,
//! resolution level, sequence angles, source), the format needed to
//! interpret its bytes, and the buffer holding them. Producers (decoders,
//! caches) construct and populate tiles; consumers read the metadata,
//! optionally crop or expand the pixel data, and either take the buffer
//! over or read it in place.
//!
//! Tile identity — what an external cache compares to decide whether a
//! stored tile answers a request — is deliberately narrower than the full
//! value: see [`RawTile::key`] and the `PartialEq` implementation.

use std::sync::Arc;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::TileError;

use super::buffer::TileBuffer;
use super::format::{PixelFormat, SampleFormat, TileEncoding};

// =============================================================================
// Tile Key
// =============================================================================

/// Identity key for a tile.
///
/// Two tiles with equal keys are interchangeable answers to the same
/// request: same position in the pyramid, same encoding, same quality,
/// same source image. Buffer contents, geometry, and timestamp are
/// deliberately excluded, so a cache can match a stored tile against a
/// request without touching pixel data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileKey {
    /// Source image identifier (typically a path)
    pub source: Arc<str>,

    /// Tile number within the resolution level
    pub tile_num: u32,

    /// Resolution level within the pyramid (0 = smallest)
    pub resolution: u32,

    /// Horizontal viewing-angle sequence index
    pub h_sequence: u32,

    /// Vertical viewing-angle sequence index
    pub v_sequence: u32,

    /// Compression applied to the tile's bytes
    pub encoding: TileEncoding,

    /// Compression quality or rate
    pub quality: i32,
}

impl TileKey {
    /// Create a new tile key.
    pub fn new(
        source: impl Into<Arc<str>>,
        tile_num: u32,
        resolution: u32,
        h_sequence: u32,
        v_sequence: u32,
        encoding: TileEncoding,
        quality: i32,
    ) -> Self {
        Self {
            source: source.into(),
            tile_num,
            resolution,
            h_sequence,
            v_sequence,
            encoding,
            quality,
        }
    }
}

// =============================================================================
// Raw Tile
// =============================================================================

/// A single image tile: descriptor, pixel format, and data buffer.
///
/// Scalar metadata is public and freely mutable by pipeline stages. The
/// buffer is private so the length/capacity relationship and the ownership
/// state can only change through methods that keep them consistent.
///
/// # Example
///
/// ```
/// use rawtile::RawTile;
///
/// // 4x4 greyscale tile, 8 bits per channel
/// let mut tile = RawTile::new(0, 2, 0, 0).with_geometry(4, 4, 1, 8);
/// tile.allocate(0).unwrap(); // size derived from geometry
/// assert_eq!(tile.capacity(), 16);
/// ```
#[derive(Debug, Clone)]
pub struct RawTile {
    /// Identifier of the source image this tile comes from
    pub source: String,

    /// Tile number within the resolution level
    pub tile_num: u32,

    /// Resolution level within the pyramid
    pub resolution: u32,

    /// Horizontal viewing-angle sequence index
    pub h_sequence: u32,

    /// Vertical viewing-angle sequence index
    pub v_sequence: u32,

    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,

    /// Number of channels
    pub channels: u32,

    /// Bit depth and sample representation
    pub format: PixelFormat,

    /// Compression applied to the buffer's bytes
    pub encoding: TileEncoding,

    /// Compression quality or rate
    pub quality: i32,

    /// Creation timestamp, seconds since the Unix epoch (set by producers)
    pub timestamp: u64,

    buffer: TileBuffer,
}

impl RawTile {
    /// Create an empty tile at the given pyramid position.
    ///
    /// Geometry is zero and no buffer is held; defaults match a freshly
    /// decoded tile (raw encoding, fixed-point samples, quality 0).
    pub fn new(tile_num: u32, resolution: u32, h_sequence: u32, v_sequence: u32) -> Self {
        Self {
            source: String::new(),
            tile_num,
            resolution,
            h_sequence,
            v_sequence,
            width: 0,
            height: 0,
            channels: 0,
            format: PixelFormat::default(),
            encoding: TileEncoding::Raw,
            quality: 0,
            timestamp: 0,
            buffer: TileBuffer::empty(),
        }
    }

    /// Set geometry and bit depth.
    pub fn with_geometry(mut self, width: u32, height: u32, channels: u32, bits: u32) -> Self {
        self.width = width;
        self.height = height;
        self.channels = channels;
        self.format = PixelFormat::with_sample_format(bits, self.format.sample_format);
        self
    }

    /// Set the source image identifier.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Set the sample representation (meaningful at 32 bits per channel).
    pub fn with_sample_format(mut self, sample_format: SampleFormat) -> Self {
        self.format.sample_format = sample_format;
        self
    }

    /// Buffer size implied by the current geometry and format, in bytes.
    pub fn implicit_size(&self) -> usize {
        self.width as usize
            * self.height as usize
            * self.channels as usize
            * self.format.bytes_per_channel()
    }

    // -------------------------------------------------------------------------
    // Buffer management
    // -------------------------------------------------------------------------

    /// Allocate a fresh owned buffer, replacing any previously held one.
    ///
    /// A `size` of zero means "derive from geometry":
    /// width × height × channels × bytes-per-channel, so geometry and
    /// format must already be set in that case. A previously shared buffer
    /// is simply dropped; a previously owned one is released.
    ///
    /// # Errors
    ///
    /// Returns [`TileError::AllocationFailed`] if the region cannot be
    /// reserved. The tile's previous buffer is unchanged on failure.
    pub fn allocate(&mut self, size: usize) -> Result<(), TileError> {
        let size = if size == 0 { self.implicit_size() } else { size };
        self.buffer = TileBuffer::allocate(size)?;
        Ok(())
    }

    /// Release the buffer, leaving the tile empty.
    ///
    /// Owned memory is freed; shared memory is merely un-referenced.
    /// Idempotent: a tile with no buffer is left as-is.
    pub fn deallocate(&mut self) {
        self.buffer.release();
    }

    /// The used portion of the tile's data.
    pub fn data(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    /// Writable access to the full capacity of an owned buffer.
    ///
    /// `None` when the tile holds no buffer or a shared (read-only) one.
    pub fn data_mut(&mut self) -> Option<&mut [u8]> {
        self.buffer.as_mut_slice()
    }

    /// Logical data length in bytes.
    pub fn data_len(&self) -> usize {
        self.buffer.len()
    }

    /// Allocated buffer capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Whether this tile owns (and will release) its buffer.
    pub fn owns_buffer(&self) -> bool {
        self.buffer.is_owned()
    }

    /// Record how many bytes of the buffer are in use.
    ///
    /// # Panics
    ///
    /// Panics if `len` exceeds the allocated capacity.
    pub fn set_data_len(&mut self, len: usize) {
        self.buffer.set_len(len);
    }

    /// Adopt a vector as this tile's owned buffer.
    ///
    /// Length and capacity become the vector's length.
    pub fn set_data(&mut self, data: Vec<u8>) {
        self.buffer = TileBuffer::from_vec(data);
    }

    /// Reference shared data owned elsewhere (e.g. a cache entry).
    ///
    /// The tile becomes non-owning: it will never release this memory,
    /// and a later [`take`](Self::take) copies rather than transfers.
    pub fn set_shared_data(&mut self, data: Bytes) {
        self.buffer = TileBuffer::from_shared(data);
    }

    /// Hand the tile to the next pipeline stage without copying pixels.
    ///
    /// The returned tile carries the full descriptor and the buffer:
    /// transferred outright if this tile owned it, or as an independent
    /// owned copy if it was shared (shared memory may not outlive the
    /// hand-off; the source keeps its view). Afterwards an owning source
    /// is left with no buffer, zero length, zero capacity.
    pub fn take(&mut self) -> RawTile {
        RawTile {
            source: self.source.clone(),
            tile_num: self.tile_num,
            resolution: self.resolution,
            h_sequence: self.h_sequence,
            v_sequence: self.v_sequence,
            width: self.width,
            height: self.height,
            channels: self.channels,
            format: self.format,
            encoding: self.encoding,
            quality: self.quality,
            timestamp: self.timestamp,
            buffer: self.buffer.take(),
        }
    }

    // -------------------------------------------------------------------------
    // Transforms
    // -------------------------------------------------------------------------

    /// Crop to a sub-rectangle anchored at the top-left corner.
    ///
    /// Copies the first `new_width` pixels of each of the first
    /// `new_height` scanlines into a fresh owned buffer and updates the
    /// geometry. Works whether or not the tile owns its current buffer;
    /// afterwards it always owns the replacement, with
    /// length = capacity = the new size.
    ///
    /// # Errors
    ///
    /// - [`TileError::CropOutOfBounds`] if either dimension exceeds the
    ///   current one (enlargement is rejected, not clamped).
    /// - [`TileError::BufferTooShort`] if the buffer holds fewer bytes
    ///   than the cropped region requires.
    /// - [`TileError::AllocationFailed`] if the replacement buffer cannot
    ///   be reserved; the tile is unchanged.
    pub fn crop(&mut self, new_width: u32, new_height: u32) -> Result<(), TileError> {
        if new_width > self.width || new_height > self.height {
            return Err(TileError::CropOutOfBounds {
                requested_width: new_width,
                requested_height: new_height,
                width: self.width,
                height: self.height,
            });
        }

        let pixel_stride = self.channels as usize * self.format.bytes_per_channel();
        let src_stride = self.width as usize * pixel_stride;
        let dst_stride = new_width as usize * pixel_stride;
        let new_len = new_height as usize * dst_stride;

        // Last source byte the copy touches
        let required = if new_len == 0 {
            0
        } else {
            (new_height as usize - 1) * src_stride + dst_stride
        };

        let src = self.buffer.as_slice();
        if src.len() < required {
            return Err(TileError::BufferTooShort {
                required,
                actual: src.len(),
            });
        }

        let mut cropped: Vec<u8> = Vec::new();
        cropped
            .try_reserve_exact(new_len)
            .map_err(|_| TileError::AllocationFailed { requested: new_len })?;

        // One contiguous scanline at a time
        if new_len > 0 {
            for row in 0..new_height as usize {
                let start = row * src_stride;
                cropped.extend_from_slice(&src[start..start + dst_stride]);
            }
        }

        self.buffer = TileBuffer::from_vec(cropped);
        self.width = new_width;
        self.height = new_height;
        Ok(())
    }

    /// Expand a single-channel tile to three channels by duplication.
    ///
    /// Each source element is written into three consecutive channel
    /// slots, so `[v0, v1, ...]` becomes `[v0, v0, v0, v1, v1, v1, ...]`
    /// at the same element width. A no-op on tiles that do not have
    /// exactly one channel. Afterwards the tile owns the replacement
    /// buffer with length = capacity = pixels × 3 × bytes-per-channel —
    /// always a byte count, including at 16- and 32-bit depths.
    ///
    /// # Errors
    ///
    /// - [`TileError::BufferTooShort`] if the buffer holds fewer bytes
    ///   than the geometry implies.
    /// - [`TileError::AllocationFailed`] if the replacement buffer cannot
    ///   be reserved; the tile is unchanged.
    pub fn triplicate(&mut self) -> Result<(), TileError> {
        if self.channels != 1 {
            return Ok(());
        }

        let element = self.format.bytes_per_channel();
        let pixels = self.width as usize * self.height as usize;
        let required = pixels * element;

        let src = self.buffer.as_slice();
        if src.len() < required {
            return Err(TileError::BufferTooShort {
                required,
                actual: src.len(),
            });
        }

        let new_len = required * 3;
        let mut expanded: Vec<u8> = Vec::new();
        expanded
            .try_reserve_exact(new_len)
            .map_err(|_| TileError::AllocationFailed { requested: new_len })?;

        for sample in src[..required].chunks_exact(element) {
            expanded.extend_from_slice(sample);
            expanded.extend_from_slice(sample);
            expanded.extend_from_slice(sample);
        }

        self.channels = 3;
        self.buffer = TileBuffer::from_vec(expanded);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Identity
    // -------------------------------------------------------------------------

    /// The identity key of this tile, for use by external caches.
    pub fn key(&self) -> TileKey {
        TileKey::new(
            self.source.as_str(),
            self.tile_num,
            self.resolution,
            self.h_sequence,
            self.v_sequence,
            self.encoding,
            self.quality,
        )
    }
}

impl Default for RawTile {
    fn default() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

/// Identity comparison: position, encoding, quality, and source only.
///
/// Buffer contents, geometry, and timestamp are excluded, so a cached
/// tile compares equal to a request for the same tile even though one
/// side has pixels and the other does not.
impl PartialEq for RawTile {
    fn eq(&self, other: &Self) -> bool {
        self.tile_num == other.tile_num
            && self.resolution == other.resolution
            && self.h_sequence == other.h_sequence
            && self.v_sequence == other.v_sequence
            && self.encoding == other.encoding
            && self.quality == other.quality
            && self.source == other.source
    }
}

impl Eq for RawTile {}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// 8-bit single-channel tile with pixel values 0, 1, 2, ...
    fn sequential_tile(width: u32, height: u32) -> RawTile {
        let mut tile = RawTile::new(0, 0, 0, 0).with_geometry(width, height, 1, 8);
        tile.set_data((0..(width * height) as usize).map(|v| v as u8).collect());
        tile
    }

    #[test]
    fn test_new_tile_is_empty() {
        let tile = RawTile::new(3, 1, 0, 0);
        assert_eq!(tile.capacity(), 0);
        assert_eq!(tile.data_len(), 0);
        assert!(!tile.owns_buffer());
        assert_eq!(tile.encoding, TileEncoding::Raw);
        assert_eq!(tile.format.sample_format, SampleFormat::FixedPoint);
        assert_eq!(tile.quality, 0);
        assert_eq!(tile.timestamp, 0);
    }

    #[test]
    fn test_implicit_size() {
        let tile = RawTile::new(0, 0, 0, 0).with_geometry(256, 256, 3, 8);
        assert_eq!(tile.implicit_size(), 256 * 256 * 3);

        let tile16 = RawTile::new(0, 0, 0, 0).with_geometry(64, 64, 1, 16);
        assert_eq!(tile16.implicit_size(), 64 * 64 * 2);

        let tile32 = RawTile::new(0, 0, 0, 0)
            .with_geometry(8, 8, 1, 32)
            .with_sample_format(SampleFormat::FloatingPoint);
        assert_eq!(tile32.implicit_size(), 8 * 8 * 4);
    }

    #[test]
    fn test_allocate_implicit_then_deallocate() {
        for (channels, bits, expected) in [(1, 8, 16), (3, 8, 48), (1, 16, 32), (3, 32, 192)] {
            let mut tile = RawTile::new(0, 0, 0, 0).with_geometry(4, 4, channels, bits);
            tile.allocate(0).unwrap();
            assert_eq!(tile.capacity(), expected, "{channels} ch, {bits} bpc");
            assert!(tile.owns_buffer());

            tile.deallocate();
            assert_eq!(tile.capacity(), 0);
            assert_eq!(tile.data_len(), 0);

            // Deallocating again is a safe no-op
            tile.deallocate();
            assert_eq!(tile.capacity(), 0);
        }
    }

    #[test]
    fn test_allocate_explicit_size() {
        let mut tile = RawTile::new(0, 0, 0, 0);
        tile.allocate(100).unwrap();
        assert_eq!(tile.capacity(), 100);
        assert_eq!(tile.data_len(), 0);

        tile.data_mut().unwrap()[..3].copy_from_slice(&[1, 2, 3]);
        tile.set_data_len(3);
        assert_eq!(tile.data(), &[1, 2, 3]);
    }

    #[test]
    fn test_clone_copies_bytes_into_new_buffer() {
        let original = sequential_tile(4, 2);
        let mut copy = original.clone();

        assert_eq!(copy.data(), original.data());
        assert_ne!(copy.data().as_ptr(), original.data().as_ptr());
        assert!(copy.owns_buffer());

        // Mutating the copy leaves the original alone
        copy.data_mut().unwrap()[0] = 0xAB;
        assert_eq!(original.data()[0], 0);
    }

    #[test]
    fn test_clone_of_shared_tile_owns() {
        let mut original = RawTile::new(0, 0, 0, 0).with_geometry(2, 2, 1, 8);
        original.set_shared_data(Bytes::from(vec![1u8, 2, 3, 4]));
        assert!(!original.owns_buffer());

        let copy = original.clone();
        assert!(copy.owns_buffer());
        assert_eq!(copy.data(), original.data());
    }

    #[test]
    fn test_take_transfers_owned_buffer() {
        let mut source = sequential_tile(4, 4).with_source("a.tif");
        let buffer_ptr = source.data().as_ptr();

        let moved = source.take();

        // Exact same buffer, no copy
        assert_eq!(moved.data().as_ptr(), buffer_ptr);
        assert_eq!(moved.source, "a.tif");
        assert_eq!(moved.width, 4);

        // Source buffer state is fully reset
        assert_eq!(source.capacity(), 0);
        assert_eq!(source.data_len(), 0);
        assert!(!source.owns_buffer());
    }

    #[test]
    fn test_take_from_shared_tile_copies() {
        let mut source = RawTile::new(0, 0, 0, 0).with_geometry(2, 1, 1, 8);
        source.set_shared_data(Bytes::from(vec![7u8, 8]));
        let buffer_ptr = source.data().as_ptr();

        let moved = source.take();

        assert!(moved.owns_buffer());
        assert_eq!(moved.data(), &[7, 8]);
        assert_ne!(moved.data().as_ptr(), buffer_ptr);

        // Source unchanged, still non-owning
        assert_eq!(source.data(), &[7, 8]);
        assert!(!source.owns_buffer());
    }

    #[test]
    fn test_crop_extracts_rows() {
        // 3x2, rows [10, 20, 30] and [40, 50, 60]
        let mut tile = RawTile::new(0, 0, 0, 0).with_geometry(3, 2, 1, 8);
        tile.set_data(vec![10, 20, 30, 40, 50, 60]);

        tile.crop(2, 2).unwrap();

        assert_eq!(tile.width, 2);
        assert_eq!(tile.height, 2);
        assert_eq!(tile.data(), &[10, 20, 40, 50]);
        assert_eq!(tile.data_len(), 4);
        assert_eq!(tile.capacity(), 4);
        assert!(tile.owns_buffer());
    }

    #[test]
    fn test_crop_multichannel_16bit() {
        // 2x2 pixels, 2 channels, 16 bits: 8 bytes per scanline
        let mut tile = RawTile::new(0, 0, 0, 0).with_geometry(2, 2, 2, 16);
        tile.set_data((0..16).collect());

        tile.crop(1, 2).unwrap();

        // First pixel (4 bytes) of each row survives
        assert_eq!(tile.data(), &[0, 1, 2, 3, 8, 9, 10, 11]);
        assert_eq!(tile.data_len(), 8);
    }

    #[test]
    fn test_crop_of_shared_buffer_produces_owned() {
        let mut tile = RawTile::new(0, 0, 0, 0).with_geometry(2, 2, 1, 8);
        tile.set_shared_data(Bytes::from(vec![1u8, 2, 3, 4]));

        tile.crop(1, 1).unwrap();

        assert_eq!(tile.data(), &[1]);
        assert!(tile.owns_buffer());
    }

    #[test]
    fn test_crop_enlargement_rejected() {
        let mut tile = sequential_tile(2, 2);
        let err = tile.crop(3, 2).unwrap_err();
        assert_eq!(
            err,
            TileError::CropOutOfBounds {
                requested_width: 3,
                requested_height: 2,
                width: 2,
                height: 2,
            }
        );

        // Tile unchanged after rejection
        assert_eq!(tile.width, 2);
        assert_eq!(tile.data_len(), 4);
    }

    #[test]
    fn test_crop_with_short_buffer_rejected() {
        let mut tile = RawTile::new(0, 0, 0, 0).with_geometry(4, 4, 1, 8);
        tile.set_data(vec![0; 4]); // geometry promises 16

        let err = tile.crop(4, 2).unwrap_err();
        assert!(matches!(err, TileError::BufferTooShort { .. }));
    }

    #[test]
    fn test_crop_to_zero() {
        let mut tile = sequential_tile(2, 2);
        tile.crop(0, 0).unwrap();
        assert_eq!(tile.width, 0);
        assert_eq!(tile.height, 0);
        assert_eq!(tile.data_len(), 0);
    }

    #[test]
    fn test_triplicate_duplicates_each_value() {
        let mut tile = RawTile::new(0, 0, 0, 0).with_geometry(2, 1, 1, 8);
        tile.set_data(vec![10, 20]);

        tile.triplicate().unwrap();

        assert_eq!(tile.channels, 3);
        assert_eq!(tile.data(), &[10, 10, 10, 20, 20, 20]);
        assert_eq!(tile.data_len(), 6);
        assert_eq!(tile.capacity(), 6);
        assert!(tile.owns_buffer());
    }

    #[test]
    fn test_triplicate_preserves_element_width() {
        // One 16-bit pixel: length must come out in bytes, not samples
        let mut tile = RawTile::new(0, 0, 0, 0).with_geometry(2, 1, 1, 16);
        tile.set_data(vec![0x12, 0x34, 0x56, 0x78]);

        tile.triplicate().unwrap();

        assert_eq!(
            tile.data(),
            &[0x12, 0x34, 0x12, 0x34, 0x12, 0x34, 0x56, 0x78, 0x56, 0x78, 0x56, 0x78]
        );
        assert_eq!(tile.data_len(), 2 * 3 * 2);
    }

    #[test]
    fn test_triplicate_again_is_noop() {
        let mut tile = RawTile::new(0, 0, 0, 0).with_geometry(1, 1, 1, 8);
        tile.set_data(vec![5]);

        tile.triplicate().unwrap();
        let after_first = tile.data().to_vec();

        tile.triplicate().unwrap();
        assert_eq!(tile.channels, 3);
        assert_eq!(tile.data(), after_first.as_slice());
    }

    #[test]
    fn test_triplicate_on_shared_buffer() {
        let mut tile = RawTile::new(0, 0, 0, 0).with_geometry(1, 1, 1, 8);
        tile.set_shared_data(Bytes::from(vec![9u8]));

        tile.triplicate().unwrap();

        assert_eq!(tile.data(), &[9, 9, 9]);
        assert!(tile.owns_buffer());
    }

    #[test]
    fn test_triplicate_with_short_buffer_rejected() {
        let mut tile = RawTile::new(0, 0, 0, 0).with_geometry(2, 2, 1, 8);
        tile.set_data(vec![0; 2]); // geometry promises 4

        let err = tile.triplicate().unwrap_err();
        assert!(matches!(err, TileError::BufferTooShort { .. }));
        assert_eq!(tile.channels, 1);
    }

    #[test]
    fn test_identity_ignores_geometry_and_buffer() {
        let make = |quality| {
            let mut tile = RawTile::new(5, 2, 0, 0).with_source("a.tif");
            tile.encoding = TileEncoding::Jpeg;
            tile.quality = quality;
            tile
        };

        let mut a = make(80).with_geometry(256, 256, 3, 8);
        a.set_data(vec![1, 2, 3]);
        let b = make(80).with_geometry(128, 64, 1, 16);

        assert_eq!(a, b);

        let c = make(90);
        assert_ne!(a, c);
    }

    #[test]
    fn test_identity_fields_each_distinguish() {
        let base = RawTile::new(1, 2, 3, 4).with_source("s");

        let mut other = base.clone();
        other.tile_num = 9;
        assert_ne!(base, other);

        let mut other = base.clone();
        other.resolution = 9;
        assert_ne!(base, other);

        let mut other = base.clone();
        other.h_sequence = 9;
        assert_ne!(base, other);

        let mut other = base.clone();
        other.v_sequence = 9;
        assert_ne!(base, other);

        let mut other = base.clone();
        other.encoding = TileEncoding::Png;
        assert_ne!(base, other);

        let mut other = base.clone();
        other.source = "t".to_string();
        assert_ne!(base, other);

        // Timestamp is not part of identity
        let mut other = base.clone();
        other.timestamp = 1_700_000_000;
        assert_eq!(base, other);
    }

    #[test]
    fn test_key_matches_identity() {
        let mut a = RawTile::new(5, 2, 0, 0).with_source("a.tif");
        a.encoding = TileEncoding::Jpeg;
        a.quality = 80;

        let mut b = a.clone().with_geometry(512, 512, 3, 8);
        b.timestamp = 42;

        assert_eq!(a.key(), b.key());

        b.quality = 90;
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn test_key_serde_round_trip() {
        let key = TileKey::new("slides/a.tif", 5, 2, 0, 0, TileEncoding::Jpeg, 80);
        let json = serde_json::to_string(&key).unwrap();
        let back: TileKey = serde_json::from_str(&json).unwrap();
        assert_eq!(key, back);
    }

    #[test]
    fn test_allocate_replaces_shared_buffer() {
        let mut tile = RawTile::new(0, 0, 0, 0).with_geometry(2, 2, 1, 8);
        tile.set_shared_data(Bytes::from(vec![1u8, 2, 3, 4]));
        assert!(!tile.owns_buffer());

        tile.allocate(0).unwrap();
        assert!(tile.owns_buffer());
        assert_eq!(tile.capacity(), 4);
        assert_eq!(tile.data_len(), 0);
    }
}
