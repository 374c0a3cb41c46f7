//! Resource registration
//!
//! Containers publish every resource they discover to a
//! [`ResourceRegistry`], which hands back an opaque [`ResourceId`]. The
//! registry owns id uniqueness; containers only keep the mapping back to
//! their own lumps.
//!
//! [`ResourceCatalog`] is an in-memory registry that can be shared between
//! threads.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use lumpcat_formats::ResourcePath;
use parking_lot::RwLock;

/// Opaque identifier of a registered resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(pub u32);

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier of a container, assigned by its owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(pub u32);

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Receiver of discovered resources
pub trait ResourceRegistry {
    /// Register `path` as provided by `container`
    fn add_resource(&self, path: ResourcePath, container: ContainerId) -> ResourceId;
}

/// One registered resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Id handed out at registration
    pub id: ResourceId,
    /// Full resource path
    pub path: ResourcePath,
    /// Container providing the resource
    pub container: ContainerId,
}

#[derive(Default)]
struct CatalogInner {
    entries: Vec<CatalogEntry>,
    by_path: HashMap<ResourcePath, Vec<ResourceId>>,
}

/// In-memory resource registry
///
/// Ids are dense and allocated in registration order. Several resources may
/// share a path; lookups return the most recently registered one.
#[derive(Default)]
pub struct ResourceCatalog {
    inner: RwLock<CatalogInner>,
    next_container: AtomicU32,
}

impl ResourceCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh container id
    pub fn allocate_container_id(&self) -> ContainerId {
        ContainerId(self.next_container.fetch_add(1, Ordering::Relaxed))
    }

    /// Number of registered resources
    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    /// Check whether nothing has been registered
    pub fn is_empty(&self) -> bool {
        self.inner.read().entries.is_empty()
    }

    /// Entry for `id`
    pub fn get(&self, id: ResourceId) -> Option<CatalogEntry> {
        self.inner.read().entries.get(id.0 as usize).cloned()
    }

    /// Most recently registered resource at `path`
    pub fn lookup(&self, path: &ResourcePath) -> Option<ResourceId> {
        self.inner
            .read()
            .by_path
            .get(path)
            .and_then(|ids| ids.last().copied())
    }

    /// All resources registered at `path`, oldest first
    pub fn lookup_all(&self, path: &ResourcePath) -> Vec<ResourceId> {
        self.inner
            .read()
            .by_path
            .get(path)
            .cloned()
            .unwrap_or_default()
    }

    /// Resources provided by `container`, in registration order
    pub fn resources_of(&self, container: ContainerId) -> Vec<CatalogEntry> {
        self.inner
            .read()
            .entries
            .iter()
            .filter(|entry| entry.container == container)
            .cloned()
            .collect()
    }

    /// Resources under the namespace `prefix`, in registration order
    pub fn resources_under(&self, prefix: &ResourcePath) -> Vec<CatalogEntry> {
        self.inner
            .read()
            .entries
            .iter()
            .filter(|entry| entry.path.starts_with(prefix))
            .cloned()
            .collect()
    }

    /// Snapshot of every entry
    pub fn entries(&self) -> Vec<CatalogEntry> {
        self.inner.read().entries.clone()
    }
}

impl ResourceRegistry for ResourceCatalog {
    fn add_resource(&self, path: ResourcePath, container: ContainerId) -> ResourceId {
        let mut inner = self.inner.write();
        let id = ResourceId(inner.entries.len() as u32);
        inner.by_path.entry(path.clone()).or_default().push(id);
        inner.entries.push(CatalogEntry {
            id,
            path,
            container,
        });
        id
    }
}
