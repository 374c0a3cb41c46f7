//! Container presenting a directory tree as an archive
//!
//! Each regular file below the root becomes one lump. Files are not
//! buffered; every load opens the file again and reads from the start.

use std::path::{Path, PathBuf};

use lumpcat_formats::name::lump_name_from_file_name;
use lumpcat_formats::{LumpId, ResourcePath};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::ContainerConfig;
use crate::container::OpenContext;
use crate::lookup::ResourceIdMap;
use crate::registry::{ContainerId, ResourceId};
use crate::source::{ByteSource, FileSource};

/// One file exposed by a directory container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Location on disk
    pub path: PathBuf,
    /// Path the file is registered under
    pub resource_path: ResourcePath,
    /// Size in bytes when the container was opened
    pub length: u64,
}

/// Container over a directory tree
pub struct DirectoryContainer {
    id: ContainerId,
    root: PathBuf,
    entries: Vec<FileEntry>,
    lookup: ResourceIdMap,
}

impl DirectoryContainer {
    /// Walk `root` and register every file with a usable name
    pub fn open(root: impl AsRef<Path>, id: ContainerId, ctx: &OpenContext<'_>) -> Self {
        let root = root.as_ref().to_path_buf();
        let mut container = Self {
            id,
            root,
            entries: Vec::new(),
            lookup: ResourceIdMap::new(),
        };
        container.register(ctx);
        container
    }

    fn register(&mut self, ctx: &OpenContext<'_>) {
        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(ctx.config.max_directory_depth)
            .follow_links(ctx.config.follow_links)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Container {}: skipping unreadable entry: {e}", self.id);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            let Some(resource_path) = resource_path_for(relative, &ctx.config) else {
                debug!("Skipping {}: empty lump name", entry.path().display());
                continue;
            };
            let length = match entry.metadata() {
                Ok(metadata) => metadata.len(),
                Err(e) => {
                    warn!("Skipping {}: {e}", entry.path().display());
                    continue;
                }
            };

            let lump_id = LumpId(self.entries.len() as u32);
            debug!("Adding lump {lump_id} {resource_path}");
            let resource = ctx.registry.add_resource(resource_path.clone(), self.id);
            self.lookup.insert(resource, lump_id);
            self.entries.push(FileEntry {
                path: entry.into_path(),
                resource_path,
                length,
            });
        }

        info!(
            "Container {}: registered {} files from {}",
            self.id,
            self.entries.len(),
            self.root.display()
        );
    }

    /// Container id
    pub const fn id(&self) -> ContainerId {
        self.id
    }

    /// Root of the tree
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Registered files in walk order
    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    /// Number of registered files
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Registered resources in walk order
    pub fn resource_ids(&self) -> Vec<ResourceId> {
        self.lookup.resource_ids()
    }

    fn entry(&self, resource: ResourceId) -> Option<&FileEntry> {
        let lump = self.lookup.lump_id(resource)?;
        self.entries.get(lump.index())
    }

    /// Size recorded for `resource`, 0 if unknown
    pub fn size_of(&self, resource: ResourceId) -> u32 {
        self.entry(resource)
            .map_or(0, |entry| u32::try_from(entry.length).unwrap_or(u32::MAX))
    }

    /// Read `resource` from disk into `buf`, clamped to its recorded size
    pub fn load(&self, buf: &mut [u8], resource: ResourceId) -> usize {
        let Some(entry) = self.entry(resource) else {
            return 0;
        };
        let size = buf.len().min(self.size_of(resource) as usize);
        if size == 0 {
            return 0;
        }
        let mut file = FileSource::open(&entry.path);
        if !file.seek(0) {
            return 0;
        }
        file.read(&mut buf[..size])
    }
}

/// Catalog path for a file at `relative` below the container root
///
/// Directory segments are upper-cased. The file name becomes a lump name
/// (extension stripped, upper-cased, at most eight characters), except
/// below the scripts directory where it is kept as-is. Returns `None` when
/// no name is left.
pub fn resource_path_for(relative: &Path, config: &ContainerConfig) -> Option<ResourcePath> {
    let segments: Vec<String> = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .collect();
    let (file_name, directories) = segments.split_last()?;

    let in_scripts = directories
        .first()
        .is_some_and(|first| first.eq_ignore_ascii_case(&config.scripts_directory));

    let mut path = ResourcePath::root();
    for directory in directories {
        path = path.join(directory.to_ascii_uppercase());
    }

    if in_scripts {
        if file_name.is_empty() {
            return None;
        }
        return Some(path.join(file_name.clone()));
    }

    let name = lump_name_from_file_name(file_name)?;
    Some(path.join_lump(&name))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn path_for(relative: &str) -> Option<String> {
        resource_path_for(Path::new(relative), &ContainerConfig::default()).map(|p| p.to_string())
    }

    #[test]
    fn test_lump_names() {
        assert_eq!(path_for("sounds/boom.wav").as_deref(), Some("/SOUNDS/BOOM"));
        assert_eq!(path_for("playpal.lmp").as_deref(), Some("/PLAYPAL"));
        assert_eq!(
            path_for("graphics/titlescreen.png").as_deref(),
            Some("/GRAPHICS/TITLESCR")
        );
        assert_eq!(path_for("sounds/.hidden"), None);
    }

    #[test]
    fn test_scripts_keep_full_name() {
        assert_eq!(
            path_for("scripts/intro.txt").as_deref(),
            Some("/SCRIPTS/intro.txt")
        );
        assert_eq!(
            path_for("SCRIPTS/a_really_long_name.acs").as_deref(),
            Some("/SCRIPTS/a_really_long_name.acs")
        );
        // Only the top-level scripts directory is special
        assert_eq!(
            path_for("maps/scripts/intro.txt").as_deref(),
            Some("/MAPS/SCRIPTS/INTRO")
        );
    }

    #[test]
    fn test_custom_scripts_directory() {
        let config = ContainerConfig::default().with_scripts_directory("acs");
        let path = resource_path_for(Path::new("acs/Library.o"), &config).expect("path");
        assert_eq!(path.to_string(), "/ACS/Library.o");
    }
}
