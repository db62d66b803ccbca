//! Buffer ownership model for tile data.
//!
//! A [`TileBuffer`] is the storage behind a tile: a heap region this tile
//! owns exclusively, a shared [`Bytes`] view into memory owned elsewhere,
//! or nothing at all. The three states make the classic raw-pointer
//! hazards unrepresentable:
//!
//! - An owned region is released exactly once, when the buffer is dropped
//!   or explicitly [`release`](TileBuffer::release)d.
//! - A shared view never releases the memory it aliases; dropping it only
//!   drops the handle.
//! - A released or moved-from buffer is [`Empty`](TileBuffer::is_empty) and
//!   holds no dangling handle to use after the fact.
//!
//! Alongside the storage, the buffer tracks a logical length: the number of
//! bytes actually in use, which may be less than the allocated capacity
//! (e.g. an encoded payload written into a buffer sized for raw pixels).
//! `len <= capacity` holds after every mutation.

use bytes::Bytes;

use crate::error::TileError;

// =============================================================================
// Storage
// =============================================================================

/// Backing storage for a tile buffer.
#[derive(Debug)]
enum Storage {
    /// No buffer
    Empty,

    /// Exclusively owned heap region, released on drop
    Owned(Box<[u8]>),

    /// Shared view of memory owned elsewhere; read-only, never released here
    Shared(Bytes),
}

/// Allocate a zeroed heap region, surfacing failure instead of aborting.
fn alloc_zeroed(size: usize) -> Result<Box<[u8]>, TileError> {
    let mut region = Vec::new();
    region
        .try_reserve_exact(size)
        .map_err(|_| TileError::AllocationFailed { requested: size })?;
    region.resize(size, 0u8);
    Ok(region.into_boxed_slice())
}

// =============================================================================
// Tile Buffer
// =============================================================================

/// Heap storage for a tile, with tracked ownership and logical length.
///
/// # Example
///
/// ```
/// use rawtile::TileBuffer;
///
/// let mut buffer = TileBuffer::allocate(16).unwrap();
/// assert_eq!(buffer.capacity(), 16);
/// assert!(buffer.is_owned());
///
/// // Fill the first four bytes and mark them used
/// buffer.as_mut_slice().unwrap()[..4].copy_from_slice(&[1, 2, 3, 4]);
/// buffer.set_len(4);
/// assert_eq!(buffer.as_slice(), &[1, 2, 3, 4]);
///
/// buffer.release();
/// assert_eq!(buffer.capacity(), 0);
/// assert_eq!(buffer.len(), 0);
/// ```
#[derive(Debug, Default)]
pub struct TileBuffer {
    storage: Storage,

    /// Bytes of the region actually in use
    len: usize,
}

impl Default for Storage {
    fn default() -> Self {
        Storage::Empty
    }
}

impl TileBuffer {
    /// Create an empty buffer with no storage.
    pub const fn empty() -> Self {
        Self {
            storage: Storage::Empty,
            len: 0,
        }
    }

    /// Allocate an owned, zeroed region of exactly `size` bytes.
    ///
    /// The logical length starts at zero; callers write data and then
    /// record how much with [`set_len`](Self::set_len).
    ///
    /// # Errors
    ///
    /// Returns [`TileError::AllocationFailed`] if the heap region cannot
    /// be reserved.
    pub fn allocate(size: usize) -> Result<Self, TileError> {
        Ok(Self {
            storage: Storage::Owned(alloc_zeroed(size)?),
            len: 0,
        })
    }

    /// Adopt an existing vector as an owned buffer.
    ///
    /// Capacity and logical length are both the vector's length.
    pub fn from_vec(data: Vec<u8>) -> Self {
        let len = data.len();
        Self {
            storage: Storage::Owned(data.into_boxed_slice()),
            len,
        }
    }

    /// Wrap a shared view of memory owned elsewhere.
    ///
    /// The buffer is non-owning: it will never release the underlying
    /// memory and cannot be written through.
    pub fn from_shared(data: Bytes) -> Self {
        let len = data.len();
        Self {
            storage: Storage::Shared(data),
            len,
        }
    }

    /// Allocated capacity in bytes.
    pub fn capacity(&self) -> usize {
        match &self.storage {
            Storage::Empty => 0,
            Storage::Owned(region) => region.len(),
            Storage::Shared(view) => view.len(),
        }
    }

    /// Logical length in bytes (how much of the capacity is in use).
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the buffer holds no storage at all.
    pub fn is_empty(&self) -> bool {
        matches!(self.storage, Storage::Empty)
    }

    /// Whether this buffer exclusively owns a live heap region.
    ///
    /// Empty and shared buffers report `false`: there is nothing this
    /// instance would be responsible for releasing.
    pub fn is_owned(&self) -> bool {
        matches!(self.storage, Storage::Owned(_))
    }

    /// Set the logical length.
    ///
    /// # Panics
    ///
    /// Panics if `len` exceeds the capacity. That relationship is a
    /// programming contract, not a runtime condition (see module docs).
    pub fn set_len(&mut self, len: usize) {
        assert!(
            len <= self.capacity(),
            "logical length {len} exceeds capacity {}",
            self.capacity()
        );
        self.len = len;
    }

    /// The used portion of the buffer (first `len` bytes).
    pub fn as_slice(&self) -> &[u8] {
        match &self.storage {
            Storage::Empty => &[],
            Storage::Owned(region) => &region[..self.len],
            Storage::Shared(view) => &view[..self.len],
        }
    }

    /// Writable access to the full capacity of an owned region.
    ///
    /// Returns `None` for empty and shared buffers: shared memory is
    /// read-only by construction.
    pub fn as_mut_slice(&mut self) -> Option<&mut [u8]> {
        match &mut self.storage {
            Storage::Owned(region) => Some(region),
            _ => None,
        }
    }

    /// Release the buffer.
    ///
    /// Drops an owned region, drops a shared handle (without touching the
    /// memory it aliases), and resets capacity and length to zero.
    /// Idempotent: releasing an empty buffer is a no-op.
    pub fn release(&mut self) {
        self.storage = Storage::Empty;
        self.len = 0;
    }

    /// Detach the buffer for transfer to another tile.
    ///
    /// - Owned: the region moves out without a byte copy and the source is
    ///   left empty, non-owning, zero-length.
    /// - Shared: the source's memory may not outlive the transfer, so the
    ///   result is an independent owned copy of the used bytes; the source
    ///   is left untouched, still sharing.
    /// - Empty: yields another empty buffer.
    pub fn take(&mut self) -> TileBuffer {
        match &self.storage {
            Storage::Owned(_) => std::mem::take(self),
            Storage::Shared(_) => TileBuffer::from_vec(self.as_slice().to_vec()),
            Storage::Empty => TileBuffer::empty(),
        }
    }
}

/// Deep copy: the clone always owns a fresh region holding the source's
/// used bytes, regardless of whether the source owned or shared its
/// storage. Cloning an empty buffer yields an empty buffer.
impl Clone for TileBuffer {
    fn clone(&self) -> Self {
        if self.is_empty() {
            TileBuffer::empty()
        } else {
            TileBuffer::from_vec(self.as_slice().to_vec())
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
