//! WAD archive support
//!
//! A WAD is a single file bundling many named, offset-addressed lumps:
//!
//! ```text
//! +--------------------+  0x00
//! | header (12 bytes)  |  magic, lump count, table offset
//! +--------------------+
//! | lump data ...      |
//! +--------------------+  table offset
//! | directory table    |  lump count x 16-byte records
//! +--------------------+
//! ```
//!
//! Directory parsing never surfaces partial entries: any header or bounds
//! violation rejects the whole table.
//!
//! # Example
//!
//! ```rust
//! use lumpcat_formats::wad::{LumpDirectory, WadBuilder, WadKind};
//!
//! let data = WadBuilder::pwad()
//!     .lump("DEHACKED", b"Patch File for DeHackEd v3.0")
//!     .build()?;
//!
//! let (kind, directory) = LumpDirectory::parse(&data)?;
//! assert_eq!(kind, WadKind::Pwad);
//! assert_eq!(directory.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod builder;
mod directory;
mod error;
mod header;

pub use builder::WadBuilder;
pub use directory::{LumpDirectory, LumpEntry, LumpId};
pub use error::{WadError, WadResult};
pub use header::{
    HEADER_SIZE, IWAD_MAGIC, LumpRecord, PWAD_MAGIC, RECORD_SIZE, WadHeader, WadKind,
};
