//! Container presenting one loose file as a single lump

use std::path::Path;

use lumpcat_formats::name::lump_name_from_path;
use lumpcat_formats::{LumpName, Namespace};
use tracing::{debug, warn};

use crate::container::OpenContext;
use crate::registry::{ContainerId, ResourceId};
use crate::source::{ByteSource, FileSource};

/// Name every DeHackEd patch is registered under
pub const DEHACKED_LUMP_NAME: &str = "DEHACKED";

const DEHACKED_SIGNATURE: &[u8] = b"Patch File for DeHackEd";
const DEHACKED_EXTENSIONS: [&str; 2] = ["deh", "bex"];

/// Container whose only resource is the whole file
pub struct SingleLumpContainer {
    id: ContainerId,
    source: FileSource,
    name: Option<LumpName>,
    resource: Option<ResourceId>,
}

impl SingleLumpContainer {
    /// Open `path` and register it under the global namespace
    ///
    /// The lump name is the file's base name without its last extension, upper-cased
    /// and cut to eight characters. DeHackEd patches are always named
    /// `DEHACKED`.
    pub fn open(path: impl AsRef<Path>, id: ContainerId, ctx: &OpenContext<'_>) -> Self {
        let path = path.as_ref();
        let mut source = FileSource::open(path);

        let name = if source.valid() {
            lump_name_for(path, &mut source)
        } else {
            None
        };

        let resource = name.map(|name| {
            let path = Namespace::Global.path().join_lump(&name);
            debug!("Adding file lump {path}");
            ctx.registry.add_resource(path, id)
        });

        if source.valid() && resource.is_none() {
            warn!(
                "Container {id}: no usable lump name for {}",
                path.display()
            );
        }

        Self {
            id,
            source,
            name,
            resource,
        }
    }

    /// Container id
    pub const fn id(&self) -> ContainerId {
        self.id
    }

    /// Name the file was registered under
    pub const fn lump_name(&self) -> Option<LumpName> {
        self.name
    }

    /// The registered resource, if any
    pub const fn resource_id(&self) -> Option<ResourceId> {
        self.resource
    }

    /// 1 when the file could be opened, otherwise 0
    pub fn count(&self) -> usize {
        usize::from(self.source.valid())
    }

    /// Size of the file if `resource` is this container's resource
    pub fn size_of(&self, resource: ResourceId) -> u32 {
        if self.resource == Some(resource) {
            u32::try_from(self.source.size()).unwrap_or(u32::MAX)
        } else {
            0
        }
    }

    /// Copy the file into `buf`, clamped to the file size
    pub fn load(&mut self, buf: &mut [u8], resource: ResourceId) -> usize {
        let size = buf.len().min(self.size_of(resource) as usize);
        if size == 0 || !self.source.seek(0) {
            return 0;
        }
        self.source.read(&mut buf[..size])
    }
}

fn lump_name_for(path: &Path, source: &mut FileSource) -> Option<LumpName> {
    if is_dehacked_file(path, source) {
        return Some(LumpName::new(DEHACKED_LUMP_NAME));
    }
    lump_name_from_path(path)
}

/// Check for a DeHackEd patch by extension or leading signature
pub fn is_dehacked_file(path: &Path, source: &mut dyn ByteSource) -> bool {
    let by_extension = path
        .extension()
        .map(|ext| ext.to_string_lossy())
        .is_some_and(|ext| {
            DEHACKED_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(&ext))
        });
    if by_extension {
        return true;
    }

    let mut head = [0u8; DEHACKED_SIGNATURE.len()];
    source.seek(0) && source.read(&mut head) == head.len() && head == DEHACKED_SIGNATURE
}
