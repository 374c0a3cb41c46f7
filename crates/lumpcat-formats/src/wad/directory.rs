//! Lump directory
//!
//! The directory is a dense arena of [`LumpEntry`] records. A lump's
//! [`LumpId`] is its position in table order and stays valid for as long as
//! the directory exists.

use std::io::Cursor;

use binrw::BinRead;
use tracing::{debug, warn};

use crate::name::LumpName;
use crate::wad::error::{WadError, WadResult};
use crate::wad::header::{LumpRecord, RECORD_SIZE, WadHeader, WadKind};

/// Position of a lump in its directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LumpId(pub u32);

impl LumpId {
    /// Index into the directory arena
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The id following this one
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for LumpId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:05}", self.0)
    }
}

/// One named, offset-addressed blob
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LumpEntry {
    /// Canonical name
    pub name: LumpName,
    /// Byte offset of the data; negative values come straight from the table
    pub offset: i32,
    /// Byte length of the data
    pub length: i32,
}

impl LumpEntry {
    /// Create a new entry
    pub const fn new(name: LumpName, offset: i32, length: i32) -> Self {
        Self {
            name,
            offset,
            length,
        }
    }

    /// Check that `[offset, offset + length)` lies within `stream_size` bytes
    pub fn fits_within(&self, stream_size: u64) -> bool {
        match (u64::try_from(self.offset), u64::try_from(self.length)) {
            (Ok(offset), Ok(length)) => offset + length <= stream_size,
            _ => false,
        }
    }

    /// Offset as an unsigned stream position (0 for negative offsets)
    pub fn position(&self) -> u64 {
        u64::try_from(self.offset).unwrap_or(0)
    }

    /// Length in bytes (0 for negative lengths)
    pub fn size(&self) -> u32 {
        u32::try_from(self.length).unwrap_or(0)
    }
}

impl From<LumpRecord> for LumpEntry {
    fn from(record: LumpRecord) -> Self {
        Self::new(record.lump_name(), record.offset, record.length)
    }
}

/// Ordered lump directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LumpDirectory {
    entries: Vec<LumpEntry>,
}

impl LumpDirectory {
    /// Create an empty directory
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Create an empty directory with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Decode `count` records from a directory table
    ///
    /// The table is read in one pass; all records must be present.
    pub fn from_table(table: &[u8], count: usize) -> WadResult<Self> {
        let expected = count * RECORD_SIZE;
        if table.len() < expected {
            return Err(WadError::TruncatedTable {
                expected: expected as u64,
                actual: table.len() as u64,
            });
        }

        let mut cursor = Cursor::new(&table[..expected]);
        let mut directory = Self::with_capacity(count);
        for _ in 0..count {
            let record = LumpRecord::read(&mut cursor)?;
            directory.push(LumpEntry::from(record));
        }
        Ok(directory)
    }

    /// Parse a complete in-memory archive
    pub fn parse(data: &[u8]) -> WadResult<(WadKind, Self)> {
        let header = WadHeader::parse(data)?;
        let kind = header.validate(data.len() as u64)?;
        let start = header.table_offset as usize;
        let end = start + header.table_length() as usize;
        let directory = Self::from_table(&data[start..end], header.lump_count as usize)?;
        debug!(
            "Parsed {:?} directory: {} lumps at offset {}",
            kind,
            directory.len(),
            start
        );
        Ok((kind, directory))
    }

    /// Parse an in-memory archive, degrading to an empty directory on error
    pub fn parse_or_empty(data: &[u8]) -> (Option<WadKind>, Self) {
        match Self::parse(data) {
            Ok((kind, directory)) => (Some(kind), directory),
            Err(e) => {
                warn!("Rejecting WAD directory: {e}");
                (None, Self::new())
            }
        }
    }

    /// Append an entry, returning its id
    pub fn push(&mut self, entry: LumpEntry) -> LumpId {
        let id = LumpId(self.entries.len() as u32);
        self.entries.push(entry);
        id
    }

    /// Look up an entry by id
    pub fn get(&self, id: LumpId) -> Option<&LumpEntry> {
        self.entries.get(id.index())
    }

    /// Name of the entry with the given id
    pub fn name(&self, id: LumpId) -> Option<LumpName> {
        self.get(id).map(|entry| entry.name)
    }

    /// Check whether `id` refers to an entry
    pub fn contains(&self, id: LumpId) -> bool {
        id.index() < self.entries.len()
    }

    /// Id of the last entry named `name`
    ///
    /// Later lumps override earlier ones of the same name, so the search
    /// runs backwards.
    pub fn find(&self, name: &LumpName) -> Option<LumpId> {
        self.entries
            .iter()
            .rposition(|entry| entry.name == *name)
            .map(|index| LumpId(index as u32))
    }

    /// Iterate entries together with their ids
    pub fn iter(&self) -> impl Iterator<Item = (LumpId, &LumpEntry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (LumpId(index as u32), entry))
    }

    /// Names in directory order
    pub fn names(&self) -> Vec<LumpName> {
        self.entries.iter().map(|entry| entry.name).collect()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the directory is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries whose data lies within `stream_size` bytes
    pub fn count_within(&self, stream_size: u64) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.fits_within(stream_size))
            .count()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::wad::builder::WadBuilder;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_entry_bounds() {
        let entry = LumpEntry::new(LumpName::new("A"), 10, 5);
        assert!(entry.fits_within(15));
        assert!(!entry.fits_within(14));

        let negative = LumpEntry::new(LumpName::new("B"), -1, 5);
        assert!(!negative.fits_within(u64::MAX / 2));
        let negative = LumpEntry::new(LumpName::new("C"), 0, -5);
        assert!(!negative.fits_within(100));
        assert_eq!(negative.size(), 0);
    }

    #[test]
    fn test_parse_preserves_table_order() {
        let data = WadBuilder::pwad()
            .lump("playpal", b"abc")
            .lump("COLORMAP", b"")
            .lump("ENDOOM", b"0123456789")
            .build()
            .expect("build");

        let (kind, directory) = LumpDirectory::parse(&data).expect("parse");
        assert_eq!(kind, WadKind::Pwad);
        assert_eq!(
            directory.names(),
            vec![
                LumpName::new("PLAYPAL"),
                LumpName::new("COLORMAP"),
                LumpName::new("ENDOOM"),
            ]
        );

        let entry = directory.get(LumpId(2)).expect("entry");
        assert_eq!(entry.length, 10);
        let start = entry.position() as usize;
        assert_eq!(&data[start..start + 10], b"0123456789");
    }

    #[test]
    fn test_find_prefers_last_duplicate() {
        let data = WadBuilder::pwad()
            .lump("DEMO1", b"a")
            .lump("DEMO1", b"b")
            .build()
            .expect("build");
        let (_, directory) = LumpDirectory::parse(&data).expect("parse");
        assert_eq!(directory.find(&LumpName::new("demo1")), Some(LumpId(1)));
        assert_eq!(directory.find(&LumpName::new("DEMO2")), None);
    }

    #[test]
    fn test_truncated_table_rejected() {
        let result = LumpDirectory::from_table(&[0u8; 20], 2);
        assert!(matches!(
            result,
            Err(WadError::TruncatedTable {
                expected: 32,
                actual: 20
            })
        ));
    }

    #[test]
    fn test_parse_or_empty_degrades() {
        let (kind, directory) = LumpDirectory::parse_or_empty(b"IWAD");
        assert_eq!(kind, None);
        assert!(directory.is_empty());

        let (kind, directory) = LumpDirectory::parse_or_empty(b"JUNKJUNKJUNKJUNK");
        assert_eq!(kind, None);
        assert!(directory.is_empty());
    }

    #[test]
    fn test_count_within() {
        let mut directory = LumpDirectory::new();
        directory.push(LumpEntry::new(LumpName::new("A"), 12, 4));
        directory.push(LumpEntry::new(LumpName::new("B"), 16, 100));
        directory.push(LumpEntry::new(LumpName::new("C"), 12, 0));
        assert_eq!(directory.count_within(20), 2);
        assert!(directory.contains(LumpId(2)));
        assert!(!directory.contains(LumpId(3)));
    }
}
