//! WAD archive formats and lump classification
//!
#![allow(clippy::cast_possible_truncation)] // Intentional for binary format parsing
#![allow(clippy::cast_possible_wrap)] // Table offsets are i32 on disk
#![allow(clippy::cast_lossless)] // Sometimes clearer than From
#![allow(clippy::uninlined_format_args)] // Backwards compatibility
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
#![allow(clippy::return_self_not_must_use)] // Builder patterns
//! This crate is the I/O-free half of lumpcat. It turns the raw bytes of a
//! WAD archive into a directory of canonical lump names and decides which
//! namespace each lump belongs to.
//!
//! # Modules
//!
//! - **wad**: header and directory table codec (parser and builder)
//! - **name**: canonical 8-byte lump names and the reserved map lump set
//! - **markers**: `<PREFIX>_START` / `<PREFIX>_END` range table
//! - **path**: hierarchical resource paths and namespaces
//! - **classify**: map grouping, marker placement and the content
//!   classifier contract
//!
//! # Example
//!
//! ```rust
//! use lumpcat_formats::classify::LumpPlacer;
//! use lumpcat_formats::markers::MarkerTable;
//! use lumpcat_formats::path::Namespace;
//! use lumpcat_formats::wad::{LumpDirectory, LumpId, WadBuilder};
//!
//! let data = WadBuilder::pwad()
//!     .marker("S_START")
//!     .lump("TROOA1", &[0u8; 8])
//!     .marker("S_END")
//!     .build()?;
//!
//! let (_, directory) = LumpDirectory::parse(&data)?;
//! let markers = MarkerTable::build(&directory);
//! let mut placer = LumpPlacer::new(&directory, &markers);
//!
//! assert_eq!(placer.place(LumpId(0)), None);
//! assert_eq!(placer.place(LumpId(1)), Some(Namespace::Sprites));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]

pub mod classify;
pub mod markers;
pub mod name;
pub mod path;
pub mod wad;

pub use classify::{ContentClassifier, GlobalClassifier, LumpPlacer};
pub use markers::{MarkerRange, MarkerTable};
pub use name::{LumpName, is_map_lump_name};
pub use path::{Namespace, ResourcePath};
pub use wad::{LumpDirectory, LumpEntry, LumpId, WadError, WadKind};
