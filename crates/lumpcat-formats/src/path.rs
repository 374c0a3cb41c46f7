//! Hierarchical resource paths and namespaces
//!
//! A resource path is the externally visible address of a resource, for
//! example `/SPRITES/TROOA1` or `/MAPS/MAP01/THINGS`. Namespace paths are
//! ordinary paths naming a directory; joining a lump name onto a namespace
//! yields the full path the resource is registered under.

use std::fmt;

use crate::name::LumpName;

/// Separator between path segments
pub const PATH_DELIMITER: char = '/';

/// Hierarchical, namespace-qualified resource address
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ResourcePath {
    segments: Vec<String>,
}

impl ResourcePath {
    /// The root path (`/`)
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Parse a `/`-delimited path; empty segments are ignored
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path
                .split(PATH_DELIMITER)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }

    /// Append a segment, returning the extended path
    #[must_use]
    pub fn join(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// Append a canonical lump name
    #[must_use]
    pub fn join_lump(&self, name: &LumpName) -> Self {
        self.join(name.as_str().into_owned())
    }

    /// Path segments from the root
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The final segment (the resource name for full paths)
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// The path without its final segment
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.segments.split_last()?;
        Some(Self {
            segments: rest.to_vec(),
        })
    }

    /// Check whether `self` lies under the namespace `prefix`
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    /// Check whether this is the root path
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "{PATH_DELIMITER}");
        }
        for segment in &self.segments {
            write!(f, "{PATH_DELIMITER}{segment}")?;
        }
        Ok(())
    }
}

impl From<&str> for ResourcePath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

/// Classification bucket for a resource
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Flat, unnamed global namespace
    Global,
    /// Floor and ceiling textures (`F_START`/`F_END`, `FF_START`/`FF_END`)
    Flats,
    /// Sprite frames (`S_START`/`S_END`, `SS_START`/`SS_END`)
    Sprites,
    /// Wall patches (`P_START`/`P_END`, `PP_START`/`PP_END`)
    Patches,
    /// Colormaps (`C_START`/`C_END`)
    Colormaps,
    /// Standalone textures (`TX_START`/`TX_END`)
    Textures,
    /// High resolution replacements (`HI_START`/`HI_END`)
    Hires,
    /// Data lumps belonging to the named map
    Map(String),
}

impl Namespace {
    /// Directory name of the global namespace
    pub const GLOBAL_DIRECTORY: &'static str = "GLOBAL";
    /// Directory name of the flats namespace
    pub const FLATS_DIRECTORY: &'static str = "FLATS";
    /// Directory name of the sprites namespace
    pub const SPRITES_DIRECTORY: &'static str = "SPRITES";
    /// Directory name of the patches namespace
    pub const PATCHES_DIRECTORY: &'static str = "PATCHES";
    /// Directory name of the colormaps namespace
    pub const COLORMAPS_DIRECTORY: &'static str = "COLORMAPS";
    /// Directory name of the textures namespace
    pub const TEXTURES_DIRECTORY: &'static str = "TEXTURES";
    /// Directory name of the hires namespace
    pub const HIRES_DIRECTORY: &'static str = "HIRES";
    /// Parent directory of all per-map namespaces
    pub const MAPS_DIRECTORY: &'static str = "MAPS";

    /// Namespace for a marker range prefix, if the prefix is recognized
    pub fn from_marker_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "F" | "FF" => Some(Self::Flats),
            "S" | "SS" => Some(Self::Sprites),
            "P" | "PP" => Some(Self::Patches),
            "C" => Some(Self::Colormaps),
            "TX" => Some(Self::Textures),
            "HI" => Some(Self::Hires),
            _ => None,
        }
    }

    /// Per-map namespace for the given map marker
    pub fn map(name: &LumpName) -> Self {
        Self::Map(name.as_str().into_owned())
    }

    /// The directory path of this namespace
    pub fn path(&self) -> ResourcePath {
        let root = ResourcePath::root();
        match self {
            Self::Global => root.join(Self::GLOBAL_DIRECTORY),
            Self::Flats => root.join(Self::FLATS_DIRECTORY),
            Self::Sprites => root.join(Self::SPRITES_DIRECTORY),
            Self::Patches => root.join(Self::PATCHES_DIRECTORY),
            Self::Colormaps => root.join(Self::COLORMAPS_DIRECTORY),
            Self::Textures => root.join(Self::TEXTURES_DIRECTORY),
            Self::Hires => root.join(Self::HIRES_DIRECTORY),
            Self::Map(name) => root.join(Self::MAPS_DIRECTORY).join(name.clone()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let path = ResourcePath::parse("/MAPS//MAP01/THINGS/");
        assert_eq!(path.segments(), ["MAPS", "MAP01", "THINGS"]);
        assert_eq!(path.to_string(), "/MAPS/MAP01/THINGS");
        assert_eq!(ResourcePath::root().to_string(), "/");
    }

    #[test]
    fn test_join_lump() {
        let path = Namespace::Sprites.path().join_lump(&LumpName::new("trooa1"));
        assert_eq!(path.to_string(), "/SPRITES/TROOA1");
        assert_eq!(path.last(), Some("TROOA1"));
        assert_eq!(path.parent(), Some(Namespace::Sprites.path()));
    }

    #[test]
    fn test_map_namespace() {
        let ns = Namespace::map(&LumpName::new("MAP01"));
        assert_eq!(ns.path().to_string(), "/MAPS/MAP01");
        let lump = ns.path().join_lump(&LumpName::new("THINGS"));
        assert!(lump.starts_with(&ResourcePath::parse("/MAPS")));
    }

    #[test]
    fn test_marker_prefixes() {
        assert_eq!(Namespace::from_marker_prefix("F"), Some(Namespace::Flats));
        assert_eq!(Namespace::from_marker_prefix("FF"), Some(Namespace::Flats));
        assert_eq!(Namespace::from_marker_prefix("SS"), Some(Namespace::Sprites));
        assert_eq!(Namespace::from_marker_prefix("PP"), Some(Namespace::Patches));
        assert_eq!(Namespace::from_marker_prefix("C"), Some(Namespace::Colormaps));
        assert_eq!(Namespace::from_marker_prefix("TX"), Some(Namespace::Textures));
        assert_eq!(Namespace::from_marker_prefix("HI"), Some(Namespace::Hires));
        assert_eq!(Namespace::from_marker_prefix("XX"), None);
        assert_eq!(Namespace::from_marker_prefix("f"), None);
    }
}
