//! # rawtile
//!
//! Raw tile buffer and descriptor types for image tiling pipelines.
//!
//! A tiling pipeline — decoder, cache, encoder, server — passes rectangular
//! blocks of image data between its stages. This crate provides the value
//! type those stages exchange: a [`RawTile`] holding the pixel (or still
//! encoded) bytes together with the metadata needed to locate the tile in
//! a resolution pyramid, interpret its samples, and re-encode it.
//!
//! ## Features
//!
//! - **Ownership-safe buffers**: a tile's buffer is owned, shared, or
//!   absent — never a raw pointer with a "remember to free" flag. Double
//!   release and use-after-release cannot be expressed.
//! - **Zero-copy hand-off**: [`RawTile::take`] transfers an owned buffer
//!   to the next stage without copying; cloning snapshots it instead.
//! - **Structural transforms**: crop to an edge-clipped sub-rectangle and
//!   expand greyscale to three channels, at 8, 16, and 32 bits per channel.
//! - **Cache identity**: tiles compare by pyramid position, encoding,
//!   quality, and source — never by pixel content — and export a hashable
//!   [`TileKey`] for cache maps.
//!
//! ## Example
//!
//! ```
//! use rawtile::RawTile;
//!
//! // Producer side: describe and allocate a 256x256 RGB tile
//! let mut tile = RawTile::new(12, 3, 0, 0)
//!     .with_source("slides/sample.tif")
//!     .with_geometry(256, 256, 3, 8);
//! tile.allocate(0).unwrap();
//! assert_eq!(tile.capacity(), 256 * 256 * 3);
//!
//! // ... decoder fills tile.data_mut() and records the length ...
//! tile.set_data_len(256 * 256 * 3);
//!
//! // Consumer side: hand the tile downstream without copying pixels
//! let downstream = tile.take();
//! assert_eq!(tile.capacity(), 0);
//! assert_eq!(downstream.data_len(), 256 * 256 * 3);
//! ```
//!
//! ## Scope
//!
//! This crate is the in-process contract only: no codecs, no cache, no
//! I/O, no server. A tile is a passive value with no interior locking;
//! collaborators that share one across threads must guarantee no
//! concurrent mutation.

pub mod error;
pub mod tile;

// Re-export commonly used types
pub use error::TileError;
pub use tile::{PixelFormat, RawTile, SampleFormat, TileBuffer, TileEncoding, TileKey};
