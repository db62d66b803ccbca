use thiserror::Error;

/// Errors from tile buffer management and structural transforms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TileError {
    /// Heap allocation for a tile buffer failed
    #[error("Allocation failed: could not reserve {requested} bytes")]
    AllocationFailed { requested: usize },

    /// Crop target is larger than the source tile
    #[error(
        "Crop out of bounds: requested {requested_width}x{requested_height}, tile is {width}x{height}"
    )]
    CropOutOfBounds {
        requested_width: u32,
        requested_height: u32,
        width: u32,
        height: u32,
    },

    /// The tile's buffer holds fewer bytes than its geometry implies
    #[error("Buffer too short: need {required} bytes, buffer holds {actual}")]
    BufferTooShort { required: usize, actual: usize },
}
