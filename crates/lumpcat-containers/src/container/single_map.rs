//! WAD container holding exactly one map
//!
//! The archive is parsed like any other WAD, but nothing is published to
//! the registry. A map loader reads the lumps by position or name through
//! this container instead. The map name comes from the file name, not from
//! the marker inside the archive.

use std::path::Path;

use lumpcat_formats::name::lump_name_from_path;
use lumpcat_formats::wad::{LumpEntry, LumpId};
use lumpcat_formats::{LumpName, Namespace, ResourcePath};

use crate::container::wad::WadContainer;
use crate::registry::{ContainerId, ResourceId};
use crate::source::{ByteSource, FileSource};

/// Single-map WAD container with registration suppressed
pub struct SingleMapWadContainer {
    wad: WadContainer,
    map_name: Option<LumpName>,
}

impl SingleMapWadContainer {
    /// Open a single-map WAD file
    pub fn open(path: impl AsRef<Path>, id: ContainerId) -> Self {
        let path = path.as_ref();
        let map_name = lump_name_from_path(path);
        Self {
            wad: WadContainer::parse_source(Box::new(FileSource::open(path)), id),
            map_name,
        }
    }

    /// Build over an arbitrary source with an explicit map name
    pub fn from_source(
        source: Box<dyn ByteSource + Send>,
        id: ContainerId,
        map_name: Option<LumpName>,
    ) -> Self {
        Self {
            wad: WadContainer::parse_source(source, id),
            map_name,
        }
    }

    /// Container id
    pub const fn id(&self) -> ContainerId {
        self.wad.id()
    }

    /// Map name taken from the file name
    pub const fn map_name(&self) -> Option<LumpName> {
        self.map_name
    }

    /// Namespace the map's lumps would live under in the catalog
    pub fn map_path(&self) -> Option<ResourcePath> {
        self.map_name.map(|name| Namespace::map(&name).path())
    }

    /// The underlying archive
    pub const fn wad(&self) -> &WadContainer {
        &self.wad
    }

    /// Number of lumps whose data lies inside the file
    pub const fn count(&self) -> usize {
        self.wad.count()
    }

    /// Always 0; no resources are registered
    pub fn size_of(&self, resource: ResourceId) -> u32 {
        self.wad.size_of(resource)
    }

    /// Always 0; no resources are registered
    pub fn load(&mut self, buf: &mut [u8], resource: ResourceId) -> usize {
        self.wad.load(buf, resource)
    }

    /// Directory entries with their positions
    pub fn lump_entries(&self) -> impl Iterator<Item = (LumpId, &LumpEntry)> {
        self.wad.directory().iter()
    }

    /// Position of the last lump named `name`
    pub fn find_lump(&self, name: &LumpName) -> Option<LumpId> {
        self.wad.find_lump(name)
    }

    /// Size of the lump at `lump`, 0 if unknown or truncated
    pub fn lump_size(&self, lump: LumpId) -> u32 {
        self.wad.lump_size(lump)
    }

    /// Copy the lump at `lump` into `buf`
    pub fn load_lump(&mut self, buf: &mut [u8], lump: LumpId) -> usize {
        self.wad.load_lump(buf, lump)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use lumpcat_formats::wad::WadBuilder;

    #[test]
    fn test_map_name_strips_last_extension() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("map01.v2.wad");
        let data = WadBuilder::pwad()
            .lump("MAP01", b"")
            .lump("THINGS", b"t")
            .build()
            .expect("build");
        std::fs::write(&path, data).expect("write");

        let map = SingleMapWadContainer::open(&path, ContainerId(0));
        assert_eq!(map.map_name(), Some(LumpName::new("MAP01.V2")));
        assert_eq!(
            map.map_path().map(|p| p.to_string()),
            Some("/MAPS/MAP01.V2".to_string())
        );
    }

    #[test]
    fn test_map_access_path() {
        let data = WadBuilder::pwad()
            .lump("MAP07", b"")
            .lump("THINGS", b"things!")
            .lump("LINEDEFS", b"lines")
            .build()
            .expect("build");
        let mut map = SingleMapWadContainer::from_source(
            Box::new(MemorySource::from_bytes(data)),
            ContainerId(3),
            Some(LumpName::new("mymap")),
        );

        assert_eq!(map.count(), 3);
        assert_eq!(map.map_name(), Some(LumpName::new("MYMAP")));
        assert_eq!(
            map.map_path().map(|p| p.to_string()),
            Some("/MAPS/MYMAP".to_string())
        );
        assert!(map.wad().resource_ids().is_empty());

        let things = map.find_lump(&LumpName::new("THINGS")).expect("things");
        assert_eq!(map.lump_size(things), 7);
        let mut buf = [0u8; 16];
        assert_eq!(map.load_lump(&mut buf, things), 7);
        assert_eq!(&buf[..7], b"things!");

        assert_eq!(map.load(&mut buf, ResourceId(0)), 0);
        assert_eq!(map.size_of(ResourceId(0)), 0);
        assert_eq!(map.lump_entries().count(), 3);
    }
}
