//! Canonical lump names
//!
//! Every lump inside an archive is addressed by an 8-byte name. On disk the
//! name is not necessarily NUL-terminated and may use any case; the
//! canonical form is upper-cased and NUL-padded to exactly eight bytes.

use std::fmt;
use std::path::Path;

/// Width of a lump name in bytes
pub const LUMP_NAME_LENGTH: usize = 8;

/// Lump names reserved for the data lumps that follow a map marker
pub const MAP_LUMP_NAMES: [&str; 11] = [
    "THINGS", "LINEDEFS", "SIDEDEFS", "VERTEXES", "SEGS", "SSECTORS", "NODES", "SECTORS", "REJECT",
    "BLOCKMAP", "BEHAVIOR",
];

/// Canonical, fixed-width lump name
///
/// Stored as eight upper-cased bytes with trailing NUL padding. Bytes
/// after the first NUL of the raw name are dropped.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct LumpName([u8; LUMP_NAME_LENGTH]);

impl LumpName {
    /// Canonicalize raw name bytes
    ///
    /// Reads at most [`LUMP_NAME_LENGTH`] bytes, stops at the first NUL and
    /// upper-cases ASCII letters.
    pub fn from_raw(raw: &[u8]) -> Self {
        let mut bytes = [0u8; LUMP_NAME_LENGTH];
        for (dst, &src) in bytes
            .iter_mut()
            .zip(raw.iter().take(LUMP_NAME_LENGTH).take_while(|&&b| b != 0))
        {
            *dst = src.to_ascii_uppercase();
        }
        Self(bytes)
    }

    /// Canonicalize a name given as a string (truncated to eight bytes)
    pub fn new(name: &str) -> Self {
        Self::from_raw(name.as_bytes())
    }

    /// The padded on-disk representation
    pub const fn to_bytes(self) -> [u8; LUMP_NAME_LENGTH] {
        self.0
    }

    /// Name bytes without the NUL padding
    pub fn as_bytes(&self) -> &[u8] {
        let len = self
            .0
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(LUMP_NAME_LENGTH);
        &self.0[..len]
    }

    /// Name as a string, replacing non-UTF-8 bytes
    pub fn as_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    /// Check whether the name is empty
    pub fn is_empty(&self) -> bool {
        self.0[0] == 0
    }

    /// Check whether this is one of the reserved map data lump names
    pub fn is_map_lump(&self) -> bool {
        is_map_lump_name(&self.as_str())
    }
}

impl fmt::Display for LumpName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str())
    }
}

impl fmt::Debug for LumpName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LumpName({:?})", self.as_str())
    }
}

impl From<&str> for LumpName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Check whether `name` is reserved for map data lumps (case-insensitive)
pub fn is_map_lump_name(name: &str) -> bool {
    MAP_LUMP_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(name))
}

/// Turn a directory entry's file name into a lump name
///
/// Strips everything from the first `.`, upper-cases and truncates to eight
/// bytes. Returns `None` when nothing is left.
pub fn lump_name_from_file_name(file_name: &str) -> Option<LumpName> {
    let stem = file_name.split('.').next().unwrap_or_default();
    if stem.is_empty() {
        return None;
    }
    Some(LumpName::new(stem))
}

/// Turn the base name of a file path into a lump name
///
/// Only the last extension is stripped, so `v1.2.lmp` becomes `V1.2`. The
/// result is upper-cased and truncated to eight bytes. Returns `None` when
/// the path has no file name.
pub fn lump_name_from_path(path: &Path) -> Option<LumpName> {
    let stem = path.file_stem()?.to_string_lossy();
    if stem.is_empty() {
        return None;
    }
    Some(LumpName::new(&stem))
}
