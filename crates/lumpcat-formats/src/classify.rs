//! Lump placement
//!
//! Decides which namespace each archive lump belongs to. Placement is tried
//! in priority order:
//!
//! 1. **Map grouping**: a lump followed by a reserved map data lump
//!    (`THINGS`, `SEGS`, ...) starts a map. It and every following map data
//!    lump are placed under `/MAPS/<marker>/` until a lump that is neither a
//!    map marker nor map data ends the group.
//! 2. **Marker ranges**: lumps strictly inside a recognized marker range
//!    take that range's namespace.
//! 3. **Content**: anything left is handed to a [`ContentClassifier`] with
//!    the lump's bytes.

use crate::markers::MarkerTable;
use crate::name::LumpName;
use crate::path::{Namespace, ResourcePath};
use crate::wad::{LumpDirectory, LumpId};

/// Identifies a lump's namespace from its contents
///
/// Implementations are pure: no I/O and no side effects.
pub trait ContentClassifier {
    /// Return the namespace path for a lump with the given name and data
    ///
    /// Returning the global namespace path confirms the lump stays global.
    fn identify(&self, name: &LumpName, data: &[u8]) -> ResourcePath;
}

/// Classifier that leaves every lump in the global namespace
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalClassifier;

impl ContentClassifier for GlobalClassifier {
    fn identify(&self, _name: &LumpName, _data: &[u8]) -> ResourcePath {
        Namespace::Global.path()
    }
}

impl<F> ContentClassifier for F
where
    F: Fn(&LumpName, &[u8]) -> ResourcePath,
{
    fn identify(&self, name: &LumpName, data: &[u8]) -> ResourcePath {
        self(name, data)
    }
}

/// Forward-scanning placement state for one directory
///
/// [`place`](Self::place) must be called with ascending ids because the
/// active map group is carried from one lump to the next. Lumps that are
/// skipped entirely (for example because they are truncated) should not be
/// passed in at all.
pub struct LumpPlacer<'a> {
    directory: &'a LumpDirectory,
    markers: &'a MarkerTable,
    current_map: Option<LumpName>,
}

impl<'a> LumpPlacer<'a> {
    /// Create a placer over a directory and its marker table
    pub const fn new(directory: &'a LumpDirectory, markers: &'a MarkerTable) -> Self {
        Self {
            directory,
            markers,
            current_map: None,
        }
    }

    /// Namespace for `id` from map grouping or marker ranges
    ///
    /// Returns `None` when neither applies and the lump needs content
    /// classification.
    pub fn place(&mut self, id: LumpId) -> Option<Namespace> {
        let name = self.directory.name(id)?;

        let is_map_lump = name.is_map_lump();
        let is_map_marker = !is_map_lump
            && self
                .directory
                .name(id.next())
                .is_some_and(|next| next.is_map_lump());

        if is_map_marker {
            self.current_map = Some(name);
        } else if !is_map_lump {
            self.current_map = None;
        }

        match &self.current_map {
            Some(map) => Some(Namespace::map(map)),
            None => self.markers.namespace_for(id),
        }
    }

    /// Map marker of the group currently being placed
    pub fn current_map(&self) -> Option<&LumpName> {
        self.current_map.as_ref()
    }
}
