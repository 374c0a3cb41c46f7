#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for WAD directory parsing and lump placement
//!
//! Archives are produced with `WadBuilder` and then damaged in specific
//! ways to check that parsing either yields the full directory or nothing.

use lumpcat_formats::classify::LumpPlacer;
use lumpcat_formats::markers::MarkerTable;
use lumpcat_formats::name::LumpName;
use lumpcat_formats::path::Namespace;
use lumpcat_formats::wad::{HEADER_SIZE, LumpDirectory, LumpId, WadBuilder, WadError, WadKind};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn sample_archive() -> Vec<u8> {
    WadBuilder::iwad()
        .lump("PLAYPAL", &[1u8; 768])
        .lump("MAP01", b"")
        .lump("THINGS", &[2u8; 10])
        .lump("LINEDEFS", &[3u8; 14])
        .lump("BEHAVIOR", &[4u8; 4])
        .lump("SOMETEX", &[5u8; 6])
        .marker("S_START")
        .lump("TROOA1", &[6u8; 32])
        .marker("S_END")
        .build()
        .expect("build")
}

#[test]
fn parse_sample_archive() {
    let data = sample_archive();
    let (kind, directory) = LumpDirectory::parse(&data).expect("parse");
    assert_eq!(kind, WadKind::Iwad);
    assert_eq!(directory.len(), 9);
    assert_eq!(directory.count_within(data.len() as u64), 9);

    for (_, entry) in directory.iter() {
        let start = entry.position() as usize;
        let end = start + entry.size() as usize;
        assert!(end <= data.len());
    }
}

#[test]
fn short_stream_is_rejected() {
    for len in 0..HEADER_SIZE {
        let data = vec![b'P'; len];
        let result = LumpDirectory::parse(&data);
        assert!(matches!(result, Err(WadError::TooShort(n)) if n == len as u64));
    }
}

#[test]
fn wrong_magic_is_rejected() {
    let mut data = sample_archive();
    data[0..4].copy_from_slice(b"WAD2");
    assert!(matches!(
        LumpDirectory::parse(&data),
        Err(WadError::InvalidMagic(_))
    ));
}

#[test]
fn table_past_end_is_rejected() {
    let mut data = sample_archive();
    // Chop the last directory record off
    data.truncate(data.len() - 1);
    let err = LumpDirectory::parse(&data).unwrap_err();
    assert!(matches!(err, WadError::TableOutOfBounds { .. }));
    assert!(!err.is_header_error());
}

#[test]
fn truncated_lumps_are_kept_in_directory_but_out_of_bounds() {
    let data = WadBuilder::pwad()
        .lump("GOOD", b"abcd")
        .raw_record("BAD", 4, 10_000)
        .lump("ALSOGOOD", b"ef")
        .build()
        .expect("build");
    let (_, directory) = LumpDirectory::parse(&data).expect("parse");
    assert_eq!(directory.len(), 3);
    assert_eq!(directory.count_within(data.len() as u64), 2);
}

#[test]
fn identical_bytes_give_identical_results() {
    let data = sample_archive();
    let (_, a) = LumpDirectory::parse(&data).expect("parse");
    let (_, b) = LumpDirectory::parse(&data).expect("parse");
    assert_eq!(a.names(), b.names());
    assert_eq!(MarkerTable::build(&a), MarkerTable::build(&b));
}

#[test]
fn placement_of_sample_archive() {
    let data = sample_archive();
    let (_, directory) = LumpDirectory::parse(&data).expect("parse");
    let markers = MarkerTable::build(&directory);
    let mut placer = LumpPlacer::new(&directory, &markers);

    let placed: Vec<(LumpName, Option<Namespace>)> = directory
        .iter()
        .map(|(id, entry)| (entry.name, placer.place(id)))
        .collect();

    let map01 = Some(Namespace::Map("MAP01".to_string()));
    assert_eq!(placed[0], (LumpName::new("PLAYPAL"), None));
    assert_eq!(placed[1], (LumpName::new("MAP01"), map01.clone()));
    assert_eq!(placed[2], (LumpName::new("THINGS"), map01.clone()));
    assert_eq!(placed[3], (LumpName::new("LINEDEFS"), map01.clone()));
    assert_eq!(placed[4], (LumpName::new("BEHAVIOR"), map01));
    assert_eq!(placed[5], (LumpName::new("SOMETEX"), None));
    assert_eq!(placed[7], (LumpName::new("TROOA1"), Some(Namespace::Sprites)));
    assert_eq!(placer.current_map(), None);
    assert_eq!(directory.find(&LumpName::new("TROOA1")), Some(LumpId(7)));
}

proptest! {
    /// Arbitrary bytes either parse into in-range records or are rejected
    #[test]
    fn arbitrary_bytes_never_panic(data in prop::collection::vec(any::<u8>(), 0..512)) {
        let (kind, directory) = LumpDirectory::parse_or_empty(&data);
        if kind.is_none() {
            prop_assert!(directory.is_empty());
        } else {
            prop_assert!(!directory.is_empty());
            let markers = MarkerTable::build(&directory);
            let mut placer = LumpPlacer::new(&directory, &markers);
            for (id, _) in directory.iter() {
                let _ = placer.place(id);
            }
        }
    }

    /// Valid headers with random magic words are only accepted for IWAD/PWAD
    #[test]
    fn only_known_magic_accepted(magic in prop::array::uniform4(any::<u8>())) {
        let mut data = WadBuilder::pwad().lump("A", b"x").build().expect("build");
        data[0..4].copy_from_slice(&magic);
        let accepted = LumpDirectory::parse(&data).is_ok();
        prop_assert_eq!(accepted, &magic == b"IWAD" || &magic == b"PWAD");
    }
}
