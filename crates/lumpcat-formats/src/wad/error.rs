//! Error types for WAD directory operations

use thiserror::Error;

/// WAD operation result type
pub type WadResult<T> = Result<T, WadError>;

/// Reasons a WAD directory is rejected
#[derive(Debug, Error)]
pub enum WadError {
    /// Stream is shorter than the fixed header
    #[error("Stream too short for WAD header: {0} bytes")]
    TooShort(u64),

    /// Magic is neither IWAD nor PWAD
    #[error("Invalid WAD magic: {0:02x?}")]
    InvalidMagic([u8; 4]),

    /// Declared lump count is not positive
    #[error("Invalid lump count: {0}")]
    InvalidLumpCount(i32),

    /// Directory table offset points into the header or is negative
    #[error("Invalid directory table offset: {0}")]
    InvalidTableOffset(i32),

    /// Directory table extends past the end of the stream
    #[error("Directory table out of bounds: offset {offset} + length {length} exceeds size {size}")]
    TableOutOfBounds {
        /// Table offset from the header
        offset: u64,
        /// Table length in bytes
        length: u64,
        /// Stream size in bytes
        size: u64,
    },

    /// Fewer table bytes could be read than the header promised
    #[error("Truncated directory table: expected {expected} bytes, read {actual}")]
    TruncatedTable {
        /// Number of bytes expected
        expected: u64,
        /// Number of bytes actually read
        actual: u64,
    },

    /// Binary read/write error
    #[error("Binary format error: {0}")]
    BinRead(#[from] binrw::Error),
}

impl WadError {
    /// Check whether the error comes from the header rather than the table
    pub fn is_header_error(&self) -> bool {
        matches!(
            self,
            Self::TooShort(_)
                | Self::InvalidMagic(_)
                | Self::InvalidLumpCount(_)
                | Self::InvalidTableOffset(_)
        )
    }
}
