//! WAD archive container
//!
//! Reads the directory table, builds the marker range table and registers
//! every lump whose data lies inside the file. A file with a malformed
//! header or table becomes an empty container.

use std::path::{Path, PathBuf};

use lumpcat_formats::wad::{HEADER_SIZE, LumpDirectory, LumpEntry, LumpId, WadHeader, WadKind};
use lumpcat_formats::{LumpName, LumpPlacer, MarkerTable, Namespace, ResourcePath};
use tracing::{debug, info, warn};

use crate::container::OpenContext;
use crate::lookup::ResourceIdMap;
use crate::registry::{ContainerId, ResourceId};
use crate::source::{ByteSource, FileSource};
use crate::{ContainerError, Result};

/// Container over a WAD archive
pub struct WadContainer {
    id: ContainerId,
    path: Option<PathBuf>,
    source: Box<dyn ByteSource + Send>,
    kind: Option<WadKind>,
    directory: LumpDirectory,
    markers: MarkerTable,
    lookup: ResourceIdMap,
    lump_count: usize,
}

impl WadContainer {
    /// Open a WAD file and register its lumps
    pub fn open(path: impl AsRef<Path>, id: ContainerId, ctx: &OpenContext<'_>) -> Self {
        let path = path.as_ref();
        let mut container = Self::parse_source(Box::new(FileSource::open(path)), id);
        container.path = Some(path.to_path_buf());
        container.register(ctx);
        container
    }

    /// Build a container over an arbitrary source and register its lumps
    pub fn from_source(
        source: Box<dyn ByteSource + Send>,
        id: ContainerId,
        ctx: &OpenContext<'_>,
    ) -> Self {
        let mut container = Self::parse_source(source, id);
        container.register(ctx);
        container
    }

    /// Parse the directory and marker table without registering anything
    pub(crate) fn parse_source(mut source: Box<dyn ByteSource + Send>, id: ContainerId) -> Self {
        let (kind, directory) = match read_directory(source.as_mut()) {
            Ok((kind, directory)) => (Some(kind), directory),
            Err(e) => {
                warn!("Container {id}: rejecting WAD directory: {e}");
                (None, LumpDirectory::new())
            }
        };

        let markers = MarkerTable::build(&directory);
        let lump_count = directory.count_within(source.size());

        Self {
            id,
            path: None,
            source,
            kind,
            directory,
            markers,
            lookup: ResourceIdMap::new(),
            lump_count,
        }
    }

    /// Classify every in-bounds lump and register it
    pub(crate) fn register(&mut self, ctx: &OpenContext<'_>) {
        let Self {
            id,
            source,
            directory,
            markers,
            lookup,
            ..
        } = self;
        let stream_size = source.size();
        let mut placer = LumpPlacer::new(directory, markers);

        for (lump_id, entry) in directory.iter() {
            if !entry.fits_within(stream_size) {
                warn!(
                    "Container {id}: skipping truncated lump {lump_id} {} (offset {}, length {}, file size {stream_size})",
                    entry.name, entry.offset, entry.length
                );
                continue;
            }

            let namespace = match placer.place(lump_id) {
                Some(namespace) => namespace.path(),
                None => identify(source.as_mut(), entry, ctx),
            };

            let path = namespace.join_lump(&entry.name);
            debug!("Adding WAD lump {lump_id} {path}");
            let resource = ctx.registry.add_resource(path, *id);
            lookup.insert(resource, lump_id);
        }

        info!(
            "Container {}: registered {} of {} lumps",
            self.id,
            self.lookup.len(),
            self.directory.len()
        );
    }

    /// Container id
    pub const fn id(&self) -> ContainerId {
        self.id
    }

    /// Path the archive was opened from
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Archive flavour, `None` when the directory was rejected
    pub const fn kind(&self) -> Option<WadKind> {
        self.kind
    }

    /// Whether the archive is an `IWAD`
    pub fn is_iwad(&self) -> bool {
        self.kind == Some(WadKind::Iwad)
    }

    /// Parsed lump directory
    pub const fn directory(&self) -> &LumpDirectory {
        &self.directory
    }

    /// Marker range table
    pub const fn markers(&self) -> &MarkerTable {
        &self.markers
    }

    /// Number of lumps whose data lies inside the file
    pub const fn count(&self) -> usize {
        self.lump_count
    }

    /// Registered resources in directory order
    pub fn resource_ids(&self) -> Vec<ResourceId> {
        self.lookup.resource_ids()
    }

    /// Lump serving a registered resource
    pub fn lump_id(&self, resource: ResourceId) -> Option<LumpId> {
        self.lookup.lump_id(resource)
    }

    /// Resource registered for a lump
    pub fn resource_id(&self, lump: LumpId) -> Option<ResourceId> {
        self.lookup.resource_id(lump)
    }

    /// Size of a registered resource, 0 if unknown
    pub fn size_of(&self, resource: ResourceId) -> u32 {
        self.lookup
            .lump_id(resource)
            .map_or(0, |lump| self.lump_size(lump))
    }

    /// Copy a registered resource into `buf`
    ///
    /// Reads at most the resource size; returns the number of bytes
    /// written, 0 for unknown resources.
    pub fn load(&mut self, buf: &mut [u8], resource: ResourceId) -> usize {
        match self.lookup.lump_id(resource) {
            Some(lump) => self.load_lump(buf, lump),
            None => 0,
        }
    }

    /// Size of an in-bounds lump, 0 if unknown or truncated
    pub fn lump_size(&self, lump: LumpId) -> u32 {
        self.directory
            .get(lump)
            .filter(|entry| entry.fits_within(self.source.size()))
            .map_or(0, LumpEntry::size)
    }

    /// Copy a lump into `buf` by directory position
    pub fn load_lump(&mut self, buf: &mut [u8], lump: LumpId) -> usize {
        let size = buf.len().min(self.lump_size(lump) as usize);
        if size == 0 {
            return 0;
        }
        let Some(entry) = self.directory.get(lump) else {
            return 0;
        };
        if !self.source.seek(entry.position()) {
            return 0;
        }
        self.source.read(&mut buf[..size])
    }

    /// Find the last lump named `name`
    pub fn find_lump(&self, name: &LumpName) -> Option<LumpId> {
        self.directory.find(name)
    }
}

/// Read and validate the header and directory table from `source`
pub(crate) fn read_directory(source: &mut dyn ByteSource) -> Result<(WadKind, LumpDirectory)> {
    if !source.valid() {
        return Err(ContainerError::Unavailable);
    }

    let mut header = [0u8; HEADER_SIZE];
    let read = if source.seek(0) {
        source.read(&mut header)
    } else {
        0
    };
    let header = WadHeader::parse(&header[..read])?;
    let kind = header.validate(source.size())?;

    let table_length = header.table_length() as usize;
    let mut table = vec![0u8; table_length];
    let read = if source.seek(u64::from(header.table_offset.unsigned_abs())) {
        source.read(&mut table)
    } else {
        0
    };
    let directory = LumpDirectory::from_table(&table[..read], header.lump_count as usize)?;

    debug!(
        "Read {:?} directory: {} lumps, table at {}",
        kind,
        directory.len(),
        header.table_offset
    );
    Ok((kind, directory))
}

/// Namespace for a lump that no marker or map claimed
fn identify(source: &mut dyn ByteSource, entry: &LumpEntry, ctx: &OpenContext<'_>) -> ResourcePath {
    if !ctx.config.classify_by_content {
        return Namespace::Global.path();
    }

    let mut data = vec![0u8; entry.size() as usize];
    if !source.seek(entry.position()) || source.read(&mut data) != data.len() {
        return Namespace::Global.path();
    }
    ctx.classifier.identify(&entry.name, &data)
}
