//! Resource containers for WAD-based game data.
//!
//! A container turns a source of game data into a set of named resources
//! and publishes them to a [`ResourceRegistry`]. Four container shapes are
//! supported:
//!
//! - **Single lump**: one loose file, registered under `/GLOBAL`
//! - **WAD**: an `IWAD`/`PWAD` archive with marker and map namespaces
//! - **Single-map WAD**: a WAD read by position, nothing registered
//! - **Directory**: a directory tree presented as an archive
//!
//! All parsing and classification happens while a container is opened.
//! Afterwards it serves `size_of` and `load` requests keyed by the
//! [`ResourceId`]s the registry handed out.
//!
//! # Example
//!
//! ```no_run
//! use lumpcat_containers::{OpenContext, ResourceCatalog, ResourceContainer};
//! use lumpcat_formats::ResourcePath;
//!
//! let catalog = ResourceCatalog::new();
//! let ctx = OpenContext::new(&catalog);
//! let mut doom = ResourceContainer::open("doom2.wad", catalog.allocate_container_id(), &ctx);
//!
//! if let Some(id) = catalog.lookup(&ResourcePath::parse("/GLOBAL/PLAYPAL")) {
//!     let palette = doom.load_vec(id);
//!     println!("PLAYPAL is {} bytes", palette.len());
//! }
//! ```

#![warn(missing_docs)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)] // Lump sizes and indices fit in u32

use thiserror::Error;

// Command line front end
pub mod cli;

// Container options
pub mod config;

// Container kinds
pub mod container;

// Resource id to lump id mapping
pub mod lookup;

// Resource registration
pub mod registry;

// Byte sources
pub mod source;

pub use config::ContainerConfig;
pub use container::{
    ContainerKind, DirectoryContainer, OpenContext, ResourceContainer, SingleLumpContainer,
    SingleMapWadContainer, WadContainer,
};
pub use lookup::ResourceIdMap;
pub use registry::{CatalogEntry, ContainerId, ResourceCatalog, ResourceId, ResourceRegistry};
pub use source::{ByteSource, FileSource, MemorySource, StreamSource};

/// Result type for container operations.
pub type Result<T> = std::result::Result<T, ContainerError>;

/// Errors that can occur while opening containers.
///
/// Containers never fail to open; these errors surface from helpers such
/// as configuration loading and are logged when a container degrades to
/// an empty one.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// WAD header or directory was rejected.
    #[error("WAD error: {0}")]
    Wad(#[from] lumpcat_formats::WadError),

    /// The byte source could not be opened.
    #[error("Source unavailable")]
    Unavailable,

    /// A path could not be mapped to a resource.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}
