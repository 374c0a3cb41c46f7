//! WAD archive builder
//!
//! Writes the classic layout: header, lump data in insertion order, then
//! the directory table.

use std::io::Cursor;

use binrw::BinWrite;

use crate::name::LumpName;
use crate::wad::error::WadResult;
use crate::wad::header::{HEADER_SIZE, LumpRecord, WadHeader, WadKind};

enum PendingLump {
    Data { name: LumpName, data: Vec<u8> },
    Raw { name: LumpName, offset: i32, length: i32 },
}

/// Builder for WAD archives
pub struct WadBuilder {
    kind: WadKind,
    lumps: Vec<PendingLump>,
}

impl WadBuilder {
    /// Create a builder for the given flavour
    pub fn new(kind: WadKind) -> Self {
        Self {
            kind,
            lumps: Vec::new(),
        }
    }

    /// Create an `IWAD` builder
    pub fn iwad() -> Self {
        Self::new(WadKind::Iwad)
    }

    /// Create a `PWAD` builder
    pub fn pwad() -> Self {
        Self::new(WadKind::Pwad)
    }

    /// Add a lump with data
    pub fn add_lump(&mut self, name: &str, data: &[u8]) {
        self.lumps.push(PendingLump::Data {
            name: LumpName::new(name),
            data: data.to_vec(),
        });
    }

    /// Add a zero-length marker lump
    pub fn add_marker(&mut self, name: &str) {
        self.add_lump(name, &[]);
    }

    /// Add a directory record with an explicit offset and length
    ///
    /// No data is written for the record, so it can point anywhere,
    /// including past the end of the archive.
    pub fn add_raw_record(&mut self, name: &str, offset: i32, length: i32) {
        self.lumps.push(PendingLump::Raw {
            name: LumpName::new(name),
            offset,
            length,
        });
    }

    /// Chaining form of [`add_lump`](Self::add_lump)
    #[must_use]
    pub fn lump(mut self, name: &str, data: &[u8]) -> Self {
        self.add_lump(name, data);
        self
    }

    /// Chaining form of [`add_marker`](Self::add_marker)
    #[must_use]
    pub fn marker(mut self, name: &str) -> Self {
        self.add_marker(name);
        self
    }

    /// Chaining form of [`add_raw_record`](Self::add_raw_record)
    #[must_use]
    pub fn raw_record(mut self, name: &str, offset: i32, length: i32) -> Self {
        self.add_raw_record(name, offset, length);
        self
    }

    /// Number of lumps added so far
    pub fn len(&self) -> usize {
        self.lumps.len()
    }

    /// Check whether no lumps were added
    pub fn is_empty(&self) -> bool {
        self.lumps.is_empty()
    }

    /// Serialize the archive
    pub fn build(&self) -> WadResult<Vec<u8>> {
        let mut body = Vec::new();
        let mut records = Vec::with_capacity(self.lumps.len());

        for lump in &self.lumps {
            let record = match lump {
                PendingLump::Data { name, data } => {
                    let offset = HEADER_SIZE + body.len();
                    body.extend_from_slice(data);
                    LumpRecord {
                        offset: offset as i32,
                        length: data.len() as i32,
                        name: name.to_bytes(),
                    }
                }
                PendingLump::Raw {
                    name,
                    offset,
                    length,
                } => LumpRecord {
                    offset: *offset,
                    length: *length,
                    name: name.to_bytes(),
                },
            };
            records.push(record);
        }

        let header = WadHeader::new(
            self.kind,
            records.len() as i32,
            (HEADER_SIZE + body.len()) as i32,
        );

        let mut out = Cursor::new(Vec::new());
        header.write(&mut out)?;
        out.get_mut().extend_from_slice(&body);
        out.set_position(out.get_ref().len() as u64);
        for record in &records {
            record.write(&mut out)?;
        }
        Ok(out.into_inner())
    }
}
