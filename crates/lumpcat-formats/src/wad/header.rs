//! WAD header and directory record structures

use std::io::Cursor;

use binrw::{BinRead, BinWrite};

use crate::name::{LUMP_NAME_LENGTH, LumpName};
use crate::wad::error::{WadError, WadResult};

/// Magic of an internal (base game) WAD
pub const IWAD_MAGIC: [u8; 4] = *b"IWAD";

/// Magic of a patch WAD
pub const PWAD_MAGIC: [u8; 4] = *b"PWAD";

/// Size of the fixed header in bytes
pub const HEADER_SIZE: usize = 12;

/// Size of one directory record in bytes
pub const RECORD_SIZE: usize = 4 + 4 + LUMP_NAME_LENGTH;

/// Archive flavour, taken from the magic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WadKind {
    /// `IWAD`: a complete base game
    Iwad,
    /// `PWAD`: a patch loaded on top of a base game
    Pwad,
}

impl WadKind {
    /// Identify the archive flavour from its magic
    pub fn from_magic(magic: [u8; 4]) -> Option<Self> {
        match magic {
            IWAD_MAGIC => Some(Self::Iwad),
            PWAD_MAGIC => Some(Self::Pwad),
            _ => None,
        }
    }

    /// The magic written for this flavour
    pub const fn magic(self) -> [u8; 4] {
        match self {
            Self::Iwad => IWAD_MAGIC,
            Self::Pwad => PWAD_MAGIC,
        }
    }
}

/// WAD header (12 bytes, little-endian)
///
/// | Offset | Size | Field |
/// |--------|------|-------|
/// | 0x00   | 4    | Magic (`IWAD` or `PWAD`) |
/// | 0x04   | 4    | Lump count (i32) |
/// | 0x08   | 4    | Directory table offset (i32) |
#[derive(Debug, Clone, Copy, PartialEq, Eq, BinRead, BinWrite)]
#[brw(little)]
pub struct WadHeader {
    /// Magic bytes
    pub magic: [u8; 4],
    /// Number of directory records
    pub lump_count: i32,
    /// Offset of the directory table from the start of the stream
    pub table_offset: i32,
}

impl WadHeader {
    /// Create a header for the given flavour
    pub const fn new(kind: WadKind, lump_count: i32, table_offset: i32) -> Self {
        Self {
            magic: kind.magic(),
            lump_count,
            table_offset,
        }
    }

    /// Parse the header from the first bytes of a stream
    ///
    /// Only the layout is decoded here; call [`validate`](Self::validate)
    /// to check the fields against the stream.
    pub fn parse(data: &[u8]) -> WadResult<Self> {
        if data.len() < HEADER_SIZE {
            return Err(WadError::TooShort(data.len() as u64));
        }
        Ok(Self::read(&mut Cursor::new(&data[..HEADER_SIZE]))?)
    }

    /// Archive flavour, or `None` for an unknown magic
    pub fn kind(&self) -> Option<WadKind> {
        WadKind::from_magic(self.magic)
    }

    /// Length of the directory table in bytes
    pub fn table_length(&self) -> u64 {
        u64::from(self.lump_count.max(0).unsigned_abs()) * RECORD_SIZE as u64
    }

    /// Validate the header against a stream of `stream_size` bytes
    pub fn validate(&self, stream_size: u64) -> WadResult<WadKind> {
        let kind = self.kind().ok_or(WadError::InvalidMagic(self.magic))?;

        if self.lump_count < 1 {
            return Err(WadError::InvalidLumpCount(self.lump_count));
        }

        if self.table_offset < HEADER_SIZE as i32 {
            return Err(WadError::InvalidTableOffset(self.table_offset));
        }

        let offset = u64::from(self.table_offset.unsigned_abs());
        let length = self.table_length();
        if offset + length > stream_size {
            return Err(WadError::TableOutOfBounds {
                offset,
                length,
                size: stream_size,
            });
        }

        Ok(kind)
    }
}

/// Directory record (16 bytes, little-endian)
#[derive(Debug, Clone, Copy, PartialEq, Eq, BinRead, BinWrite)]
#[brw(little)]
pub struct LumpRecord {
    /// Offset of the lump data
    pub offset: i32,
    /// Length of the lump data
    pub length: i32,
    /// Raw name bytes, not necessarily NUL-terminated
    pub name: [u8; LUMP_NAME_LENGTH],
}

impl LumpRecord {
    /// Canonical form of the record name
    pub fn lump_name(&self) -> LumpName {
        LumpName::from_raw(&self.name)
    }
}
