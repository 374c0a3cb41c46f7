//! Resource container kinds
//!
//! Four container shapes share one read contract:
//! - [`SingleLumpContainer`]: one loose file exposed as one lump
//! - [`WadContainer`]: a WAD archive, every lump registered
//! - [`SingleMapWadContainer`]: a WAD holding a single map, nothing
//!   registered
//! - [`DirectoryContainer`]: a directory tree exposed as an archive
//!
//! The set is closed, so [`ResourceContainer`] is an enum and every
//! operation dispatches exhaustively over it.
//!
//! Construction does all the work: reading directories, classifying lumps
//! and registering them. Afterwards a container only serves reads. Failures
//! while opening never surface as errors; the container simply ends up with
//! fewer (or zero) resources.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use lumpcat_formats::wad::WadKind;
use lumpcat_formats::{ContentClassifier, GlobalClassifier};
use tracing::debug;

use crate::config::ContainerConfig;
use crate::registry::{ContainerId, ResourceId, ResourceRegistry};

pub mod directory;
pub mod single_lump;
pub mod single_map;
pub mod wad;

pub use directory::{DirectoryContainer, FileEntry};
pub use single_lump::SingleLumpContainer;
pub use single_map::SingleMapWadContainer;
pub use wad::WadContainer;

static GLOBAL_CLASSIFIER: GlobalClassifier = GlobalClassifier;

/// Collaborators used while a container registers its resources
pub struct OpenContext<'a> {
    /// Registry receiving discovered resources
    pub registry: &'a dyn ResourceRegistry,
    /// Classifier for lumps no marker or map claimed
    pub classifier: &'a dyn ContentClassifier,
    /// Container options
    pub config: ContainerConfig,
}

impl<'a> OpenContext<'a> {
    /// Context with the global classifier and default options
    pub fn new(registry: &'a dyn ResourceRegistry) -> Self {
        Self {
            registry,
            classifier: &GLOBAL_CLASSIFIER,
            config: ContainerConfig::default(),
        }
    }

    /// Use a different content classifier
    #[must_use]
    pub fn with_classifier(mut self, classifier: &'a dyn ContentClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Use different options
    #[must_use]
    pub fn with_config(mut self, config: ContainerConfig) -> Self {
        self.config = config;
        self
    }
}

/// Which container shape is in use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// Single loose file
    SingleLump,
    /// WAD archive
    Wad,
    /// Single-map WAD archive
    SingleMapWad,
    /// Directory tree
    Directory,
}

impl ContainerKind {
    /// Pick the container shape for `path`
    ///
    /// Directories map to [`ContainerKind::Directory`]; files starting with
    /// an `IWAD` or `PWAD` magic to [`ContainerKind::Wad`]; everything else,
    /// including unreadable paths, to [`ContainerKind::SingleLump`].
    pub fn detect(path: &Path) -> Self {
        if path.is_dir() {
            return Self::Directory;
        }

        let mut magic = [0u8; 4];
        let is_wad = File::open(path)
            .and_then(|mut file| file.read_exact(&mut magic))
            .is_ok()
            && WadKind::from_magic(magic).is_some();

        if is_wad { Self::Wad } else { Self::SingleLump }
    }
}

/// Any of the four container shapes
pub enum ResourceContainer {
    /// Single loose file
    SingleLump(SingleLumpContainer),
    /// WAD archive
    Wad(WadContainer),
    /// Single-map WAD archive
    SingleMapWad(SingleMapWadContainer),
    /// Directory tree
    Directory(DirectoryContainer),
}

impl ResourceContainer {
    /// Open `path` as whichever container shape fits it
    pub fn open(path: impl AsRef<Path>, id: ContainerId, ctx: &OpenContext<'_>) -> Self {
        let path = path.as_ref();
        let kind = ContainerKind::detect(path);
        debug!("Opening {} as {:?}", path.display(), kind);
        Self::open_as(kind, path, id, ctx)
    }

    /// Open `path` as a specific container shape
    pub fn open_as(
        kind: ContainerKind,
        path: impl AsRef<Path>,
        id: ContainerId,
        ctx: &OpenContext<'_>,
    ) -> Self {
        match kind {
            ContainerKind::SingleLump => Self::SingleLump(SingleLumpContainer::open(path, id, ctx)),
            ContainerKind::Wad => Self::Wad(WadContainer::open(path, id, ctx)),
            ContainerKind::SingleMapWad => Self::open_single_map(path, id),
            ContainerKind::Directory => Self::Directory(DirectoryContainer::open(path, id, ctx)),
        }
    }

    /// Open a single-map WAD; nothing is registered
    pub fn open_single_map(path: impl AsRef<Path>, id: ContainerId) -> Self {
        Self::SingleMapWad(SingleMapWadContainer::open(path, id))
    }

    /// Shape of this container
    pub const fn kind(&self) -> ContainerKind {
        match self {
            Self::SingleLump(_) => ContainerKind::SingleLump,
            Self::Wad(_) => ContainerKind::Wad,
            Self::SingleMapWad(_) => ContainerKind::SingleMapWad,
            Self::Directory(_) => ContainerKind::Directory,
        }
    }

    /// Container id
    pub const fn id(&self) -> ContainerId {
        match self {
            Self::SingleLump(c) => c.id(),
            Self::Wad(c) => c.id(),
            Self::SingleMapWad(c) => c.id(),
            Self::Directory(c) => c.id(),
        }
    }

    /// Number of resources the container holds
    pub fn count(&self) -> usize {
        match self {
            Self::SingleLump(c) => c.count(),
            Self::Wad(c) => c.count(),
            Self::SingleMapWad(c) => c.count(),
            Self::Directory(c) => c.count(),
        }
    }

    /// Size of `resource` in bytes, 0 if this container does not serve it
    pub fn size_of(&self, resource: ResourceId) -> u32 {
        match self {
            Self::SingleLump(c) => c.size_of(resource),
            Self::Wad(c) => c.size_of(resource),
            Self::SingleMapWad(c) => c.size_of(resource),
            Self::Directory(c) => c.size_of(resource),
        }
    }

    /// Copy `resource` into `buf`
    ///
    /// At most `min(buf.len(), size_of(resource))` bytes are written; the
    /// return value is the number actually written.
    pub fn load(&mut self, buf: &mut [u8], resource: ResourceId) -> usize {
        match self {
            Self::SingleLump(c) => c.load(buf, resource),
            Self::Wad(c) => c.load(buf, resource),
            Self::SingleMapWad(c) => c.load(buf, resource),
            Self::Directory(c) => c.load(buf, resource),
        }
    }

    /// Read the whole of `resource`
    pub fn load_vec(&mut self, resource: ResourceId) -> Vec<u8> {
        let mut data = vec![0u8; self.size_of(resource) as usize];
        let read = self.load(&mut data, resource);
        data.truncate(read);
        data
    }

    /// Resources this container registered
    pub fn resource_ids(&self) -> Vec<ResourceId> {
        match self {
            Self::SingleLump(c) => c.resource_id().into_iter().collect(),
            Self::Wad(c) => c.resource_ids(),
            Self::SingleMapWad(_) => Vec::new(),
            Self::Directory(c) => c.resource_ids(),
        }
    }

    /// The archive behind WAD-based containers
    pub const fn as_wad(&self) -> Option<&WadContainer> {
        match self {
            Self::Wad(c) => Some(c),
            Self::SingleMapWad(c) => Some(c.wad()),
            Self::SingleLump(_) | Self::Directory(_) => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::registry::ResourceCatalog;
    use lumpcat_formats::wad::WadBuilder;

    #[test]
    fn test_detect() {
        let dir = tempfile::tempdir().expect("tempdir");
        let wad = dir.path().join("doom.wad");
        std::fs::write(
            &wad,
            WadBuilder::iwad().lump("A", b"a").build().expect("build"),
        )
        .expect("write");
        let text = dir.path().join("readme.txt");
        std::fs::write(&text, b"hello").expect("write");
        let tiny = dir.path().join("x");
        std::fs::write(&tiny, b"IW").expect("write");

        assert_eq!(ContainerKind::detect(dir.path()), ContainerKind::Directory);
        assert_eq!(ContainerKind::detect(&wad), ContainerKind::Wad);
        assert_eq!(ContainerKind::detect(&text), ContainerKind::SingleLump);
        assert_eq!(ContainerKind::detect(&tiny), ContainerKind::SingleLump);
        assert_eq!(
            ContainerKind::detect(&dir.path().join("missing")),
            ContainerKind::SingleLump
        );
    }

    #[test]
    fn test_dispatch() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("pack.wad");
        std::fs::write(
            &path,
            WadBuilder::pwad()
                .lump("ENDOOM", b"0123")
                .build()
                .expect("build"),
        )
        .expect("write");

        let catalog = ResourceCatalog::new();
        let ctx = OpenContext::new(&catalog);
        let mut container = ResourceContainer::open(&path, catalog.allocate_container_id(), &ctx);
        assert_eq!(container.kind(), ContainerKind::Wad);
        assert_eq!(container.count(), 1);
        let ids = container.resource_ids();
        assert_eq!(ids.len(), 1);
        assert_eq!(container.size_of(ids[0]), 4);
        assert_eq!(container.load_vec(ids[0]), b"0123");
        assert!(container.as_wad().is_some());
    }
}
