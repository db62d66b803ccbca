//! Tile value types.
//!
//! This module models a single rectangular tile of image data as it moves
//! through a tiling pipeline: the pixel or encoded bytes plus the metadata
//! needed to locate, interpret, and re-encode them.
//!
//! # Components
//!
//! - [`RawTile`]: the tile itself — descriptor, geometry, format, buffer,
//!   and the crop/triplicate transforms
//! - [`TileBuffer`]: the buffer ownership model (owned, shared, or empty)
//! - [`TileKey`]: identity key used by external caches to match a stored
//!   tile against a request without comparing pixel data
//! - [`PixelFormat`], [`SampleFormat`]: bit depth and sample representation,
//!   the single source of truth for element sizes
//! - [`TileEncoding`]: compression kind applied to the tile's bytes
//!
//! # Ownership
//!
//! A tile either owns its buffer exclusively (released when the tile is
//! dropped or deallocated), shares a read-only view of memory owned
//! elsewhere, or holds nothing. Cloning always produces an independent
//! owned copy; [`RawTile::take`] hands the buffer to the next stage
//! without copying when the source owns it.
//!
//! # Example
//!
//! ```
//! use rawtile::{RawTile, TileEncoding};
//!
//! // A decoder produces a 3x2 greyscale tile
//! let mut tile = RawTile::new(7, 2, 0, 0)
//!     .with_source("slides/sample.tif")
//!     .with_geometry(3, 2, 1, 8);
//! tile.set_data(vec![10, 20, 30, 40, 50, 60]);
//!
//! // A pipeline stage trims it to the image edge and expands to RGB
//! tile.crop(2, 1).unwrap();
//! tile.triplicate().unwrap();
//! assert_eq!(tile.data(), &[10, 10, 10, 20, 20, 20]);
//!
//! // A cache compares identity without touching pixels
//! assert_eq!(tile.encoding, TileEncoding::Raw);
//! let key = tile.key();
//! assert_eq!(key.tile_num, 7);
//! ```

mod buffer;
mod format;
mod raw;

pub use buffer::TileBuffer;
pub use format::{PixelFormat, SampleFormat, TileEncoding};
pub use raw::{RawTile, TileKey};
