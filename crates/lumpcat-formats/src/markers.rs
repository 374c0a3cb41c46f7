//! Marker range table
//!
//! Archives group related lumps between zero-length sentinel lumps named
//! `<PREFIX>_START` and `<PREFIX>_END`. The table maps each prefix to the
//! half-open span of directory positions it delimits.
//!
//! The table is built by a single forward scan that remembers the most
//! recently seen marker of any kind. When an end marker is reached, the
//! range runs from that remembered marker to the end marker. Unbalanced or
//! nested marker sequences are not repaired, and a prefix that is closed
//! more than once keeps only its last range.

use std::collections::BTreeMap;

use tracing::debug;

use crate::name::LumpName;
use crate::path::Namespace;
use crate::wad::{LumpDirectory, LumpId};

const START_SUFFIX: &str = "_START";
const END_SUFFIX: &str = "_END";

/// Which side of a range a marker sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// `<PREFIX>_START`
    Start,
    /// `<PREFIX>_END`
    End,
}

/// A lump name recognized as a marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    /// Namespace prefix, e.g. `S` or `FF`
    pub prefix: String,
    /// Start or end
    pub kind: MarkerKind,
}

impl Marker {
    /// Recognize a marker name; the prefix must not be empty
    pub fn parse(name: &LumpName) -> Option<Self> {
        let name = name.as_str();
        let (prefix, kind) = if let Some(prefix) = name.strip_suffix(START_SUFFIX) {
            (prefix, MarkerKind::Start)
        } else if let Some(prefix) = name.strip_suffix(END_SUFFIX) {
            (prefix, MarkerKind::End)
        } else {
            return None;
        };

        if prefix.is_empty() {
            return None;
        }

        Some(Self {
            prefix: prefix.to_owned(),
            kind,
        })
    }
}

/// Check whether a lump name is a marker
pub fn is_marker(name: &LumpName) -> bool {
    Marker::parse(name).is_some()
}

/// Span of directory positions delimited by a marker pair
///
/// Both boundary markers are excluded from the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerRange {
    /// Position of the opening marker, `None` when an end marker had no
    /// marker before it
    pub start: Option<LumpId>,
    /// Position of the closing marker
    pub end: LumpId,
}

impl MarkerRange {
    /// Check whether `id` lies strictly between the boundary markers
    pub fn contains(&self, id: LumpId) -> bool {
        self.start.is_some_and(|start| id > start) && id < self.end
    }
}

/// Namespace prefix to range mapping for one directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerTable {
    ranges: BTreeMap<String, MarkerRange>,
}

impl MarkerTable {
    /// Build the table with one pass over `directory`
    ///
    /// Each `_END` marker closes a range opened by the most recent marker
    /// of any prefix. A later range for the same prefix replaces an earlier
    /// one. Unbalanced sequences are kept as scanned.
    pub fn build(directory: &LumpDirectory) -> Self {
        let mut ranges = BTreeMap::new();
        let mut last_marker: Option<LumpId> = None;

        for (lump_id, entry) in directory.iter() {
            let Some(marker) = Marker::parse(&entry.name) else {
                continue;
            };

            if marker.kind == MarkerKind::End {
                let range = MarkerRange {
                    start: last_marker,
                    end: lump_id,
                };
                debug!(
                    "Added markers {prefix}_START ({start:?}) and {prefix}_END ({end})",
                    prefix = marker.prefix,
                    start = range.start.map(|id| id.0),
                    end = range.end.0
                );
                ranges.insert(marker.prefix, range);
            }
            last_marker = Some(lump_id);
        }

        Self { ranges }
    }

    /// Range recorded for `prefix`
    pub fn get(&self, prefix: &str) -> Option<&MarkerRange> {
        self.ranges.get(prefix)
    }

    /// Namespace of the first recognized range containing `id`
    ///
    /// Ranges are examined in prefix order; ranges with unrecognized
    /// prefixes are skipped.
    pub fn namespace_for(&self, id: LumpId) -> Option<Namespace> {
        self.ranges
            .iter()
            .filter(|(_, range)| range.contains(id))
            .find_map(|(prefix, _)| Namespace::from_marker_prefix(prefix))
    }

    /// Iterate ranges in prefix order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MarkerRange)> {
        self.ranges
            .iter()
            .map(|(prefix, range)| (prefix.as_str(), range))
    }

    /// Number of recorded prefixes
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Check whether no ranges were recorded
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::wad::LumpEntry;

    fn directory(names: &[&str]) -> LumpDirectory {
        let mut directory = LumpDirectory::new();
        for name in names {
            directory.push(LumpEntry::new(LumpName::new(name), 12, 0));
        }
        directory
    }

    #[test]
    fn test_marker_parsing() {
        assert_eq!(
            Marker::parse(&LumpName::new("S_START")),
            Some(Marker {
                prefix: "S".to_string(),
                kind: MarkerKind::Start
            })
        );
        assert_eq!(
            Marker::parse(&LumpName::new("FF_END")),
            Some(Marker {
                prefix: "FF".to_string(),
                kind: MarkerKind::End
            })
        );
        assert!(Marker::parse(&LumpName::new("_START")).is_none());
        assert!(Marker::parse(&LumpName::new("_END")).is_none());
        assert!(Marker::parse(&LumpName::new("TROOA1")).is_none());
        assert!(is_marker(&LumpName::new("hi_start")));
    }

    #[test]
    fn test_simple_range() {
        let table = MarkerTable::build(&directory(&["PLAYPAL", "S_START", "TROOA1", "S_END"]));
        assert_eq!(
            table.get("S"),
            Some(&MarkerRange {
                start: Some(LumpId(1)),
                end: LumpId(3)
            })
        );
        assert_eq!(table.namespace_for(LumpId(2)), Some(Namespace::Sprites));
        // Boundaries are excluded
        assert_eq!(table.namespace_for(LumpId(1)), None);
        assert_eq!(table.namespace_for(LumpId(3)), None);
        assert_eq!(table.namespace_for(LumpId(0)), None);
    }

    #[test]
    fn test_duplicate_prefix_last_wins() {
        let table = MarkerTable::build(&directory(&[
            "F_START", "FLAT1", "F_END", "F_START", "FLAT2", "F_END",
        ]));
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.get("F"),
            Some(&MarkerRange {
                start: Some(LumpId(3)),
                end: LumpId(5)
            })
        );
        assert_eq!(table.namespace_for(LumpId(1)), None);
        assert_eq!(table.namespace_for(LumpId(4)), Some(Namespace::Flats));
    }

    #[test]
    fn test_nested_markers_use_last_seen_marker() {
        let table = MarkerTable::build(&directory(&[
            "F_START", "F1_START", "FLAT1", "F1_END", "FLAT2", "F_END",
        ]));
        assert_eq!(
            table.get("F1"),
            Some(&MarkerRange {
                start: Some(LumpId(1)),
                end: LumpId(3)
            })
        );
        assert_eq!(
            table.get("F"),
            Some(&MarkerRange {
                start: Some(LumpId(3)),
                end: LumpId(5)
            })
        );
    }

    #[test]
    fn test_end_without_start() {
        let table = MarkerTable::build(&directory(&["A", "P_END", "B"]));
        let range = table.get("P").expect("range");
        assert_eq!(range.start, None);
        assert!(!range.contains(LumpId(0)));
    }

    #[test]
    fn test_unrecognized_prefix_falls_through() {
        let table = MarkerTable::build(&directory(&[
            "XX_START", "P_START", "WALL00", "P_END", "XX_END",
        ]));
        // XX range is (3, 4), P range is (1, 3)
        assert_eq!(table.namespace_for(LumpId(2)), Some(Namespace::Patches));
        let prefixes: Vec<&str> = table.iter().map(|(prefix, _)| prefix).collect();
        assert_eq!(prefixes, vec!["P", "XX"]);
    }

    #[test]
    fn test_deterministic() {
        let names = ["S_START", "A", "S_END", "F_START", "B", "F_END"];
        assert_eq!(
            MarkerTable::build(&directory(&names)),
            MarkerTable::build(&directory(&names))
        );
    }
}
