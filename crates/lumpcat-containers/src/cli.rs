//! `lumpcat` command line front end
//!
//! Every command opens a single container into a fresh
//! [`ResourceCatalog`] and reports on what it registered.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lumpcat_formats::ResourcePath;
use serde::Serialize;
use tracing::info;

use crate::config::ContainerConfig;
use crate::container::{OpenContext, ResourceContainer};
use crate::registry::{CatalogEntry, ContainerId, ResourceCatalog, ResourceId};
use crate::ContainerError;

/// Inspect WAD archives, loose lumps and resource directories
#[derive(Debug, Parser)]
#[command(name = "lumpcat", version, about)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true, env = "LUMPCAT_VERBOSE")]
    pub verbose: bool,

    /// JSON container configuration
    #[arg(short, long, global = true, env = "LUMPCAT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every registered resource
    List {
        /// File or directory to open
        path: PathBuf,

        /// Open as a single-map WAD and list its lumps by position
        #[arg(long)]
        single_map: bool,

        /// Print a JSON array instead of a table
        #[arg(long)]
        json: bool,

        /// Include an MD5 digest of each resource
        #[arg(long)]
        checksums: bool,
    },

    /// Write one resource to a file or stdout
    Extract {
        /// File or directory to open
        path: PathBuf,

        /// Resource path, e.g. `/GLOBAL/PLAYPAL`
        resource: String,

        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the marker ranges of a WAD archive
    Markers {
        /// WAD file to open
        path: PathBuf,
    },
}

/// One row of `lumpcat list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListedResource {
    /// Registry id, or directory position for single-map listings
    pub id: u32,
    /// Size in bytes
    pub size: u32,
    /// Full resource path
    pub path: String,
    /// Hex MD5 digest of the data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,
}

impl Cli {
    /// Container options from `--config`, defaults otherwise
    pub fn container_config(&self) -> Result<ContainerConfig> {
        match &self.config {
            Some(path) => ContainerConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config {}", path.display())),
            None => Ok(ContainerConfig::default()),
        }
    }
}

/// Execute `cli`, writing command output to `out`
pub fn run(cli: Cli, out: &mut dyn Write) -> Result<()> {
    let config = cli.container_config()?;

    match cli.command {
        Command::List {
            path,
            single_map,
            json,
            checksums,
        } => {
            let rows = if single_map {
                list_single_map(&path, checksums)
            } else {
                list(&path, config, checksums)
            };
            if json {
                serde_json::to_writer_pretty(&mut *out, &rows)?;
                writeln!(out)?;
            } else {
                for row in &rows {
                    write!(out, "{:>5} {:>9} ", row.id, row.size)?;
                    if let Some(md5) = &row.md5 {
                        write!(out, "{md5} ")?;
                    }
                    writeln!(out, "{}", row.path)?;
                }
            }
        }
        Command::Extract {
            path,
            resource,
            output,
        } => {
            let data = extract(&path, &resource, config)?;
            match output {
                Some(file) => {
                    std::fs::write(&file, &data)
                        .with_context(|| format!("Failed to write {}", file.display()))?;
                    info!("Wrote {} bytes to {}", data.len(), file.display());
                }
                None => out.write_all(&data)?,
            }
        }
        Command::Markers { path } => {
            let catalog = ResourceCatalog::new();
            let ctx = OpenContext::new(&catalog).with_config(config);
            let container = ResourceContainer::open(&path, catalog.allocate_container_id(), &ctx);
            let wad = container
                .as_wad()
                .with_context(|| format!("{} is not a WAD archive", path.display()))?;
            for (prefix, range) in wad.markers().iter() {
                match range.start {
                    Some(start) => writeln!(out, "{prefix:<8} {start}..{}", range.end)?,
                    None => writeln!(out, "{prefix:<8} -..{}", range.end)?,
                }
            }
        }
    }

    Ok(())
}

/// Open `path` and describe every resource it registered
pub fn list(path: &Path, config: ContainerConfig, checksums: bool) -> Vec<ListedResource> {
    let catalog = ResourceCatalog::new();
    let ctx = OpenContext::new(&catalog).with_config(config);
    let container_id = catalog.allocate_container_id();
    let mut container = ResourceContainer::open(path, container_id, &ctx);

    catalog
        .resources_of(container_id)
        .into_iter()
        .map(|CatalogEntry { id, path, .. }| ListedResource {
            id: id.0,
            size: container.size_of(id),
            path: path.to_string(),
            md5: checksums.then(|| digest(&container.load_vec(id))),
        })
        .collect()
}

/// Open `path` as a single-map WAD and describe its lumps by position
pub fn list_single_map(path: &Path, checksums: bool) -> Vec<ListedResource> {
    let container = ResourceContainer::open_single_map(path, ContainerId(0));
    let ResourceContainer::SingleMapWad(mut map) = container else {
        return Vec::new();
    };
    let base = map.map_path().unwrap_or_else(ResourcePath::root);

    let lumps: Vec<_> = map
        .lump_entries()
        .map(|(lump, entry)| (lump, entry.name))
        .collect();
    lumps
        .into_iter()
        .map(|(lump, name)| {
            let size = map.lump_size(lump);
            let md5 = checksums.then(|| {
                let mut data = vec![0u8; size as usize];
                let read = map.load_lump(&mut data, lump);
                digest(&data[..read])
            });
            ListedResource {
                id: lump.0,
                size,
                path: base.join_lump(&name).to_string(),
                md5,
            }
        })
        .collect()
}

/// Open `path` and read the resource registered under `resource`
///
/// Paths are matched exactly first, then ignoring ASCII case.
pub fn extract(path: &Path, resource: &str, config: ContainerConfig) -> Result<Vec<u8>> {
    let catalog = ResourceCatalog::new();
    let ctx = OpenContext::new(&catalog).with_config(config);
    let container_id = catalog.allocate_container_id();
    let mut container = ResourceContainer::open(path, container_id, &ctx);

    let wanted = ResourcePath::parse(resource);
    let id = catalog
        .lookup(&wanted)
        .or_else(|| find_ignoring_case(&catalog, &wanted))
        .ok_or_else(|| ContainerError::InvalidPath(wanted.to_string()))?;

    Ok(container.load_vec(id))
}

fn find_ignoring_case(catalog: &ResourceCatalog, wanted: &ResourcePath) -> Option<ResourceId> {
    let wanted = wanted.to_string();
    catalog
        .entries()
        .into_iter()
        .rev()
        .find(|entry| entry.path.to_string().eq_ignore_ascii_case(&wanted))
        .map(|entry| entry.id)
}

fn digest(data: &[u8]) -> String {
    format!("{:x}", md5::compute(data))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use lumpcat_formats::wad::WadBuilder;
    use pretty_assertions::assert_eq;

    fn write_wad(dir: &Path) -> PathBuf {
        let path = dir.join("test.wad");
        let data = WadBuilder::pwad()
            .lump("PLAYPAL", b"palette")
            .marker("F_START")
            .lump("FLOOR0_1", b"flat")
            .marker("F_END")
            .build()
            .expect("build");
        std::fs::write(&path, data).expect("write");
        path
    }

    #[test]
    fn test_parse_args() {
        let cli = Cli::try_parse_from(["lumpcat", "list", "doom.wad", "--json", "--checksums"])
            .expect("parse");
        assert!(!cli.verbose);
        match cli.command {
            Command::List {
                path,
                single_map,
                json,
                checksums,
            } => {
                assert_eq!(path, PathBuf::from("doom.wad"));
                assert!(!single_map);
                assert!(json);
                assert!(checksums);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_list() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_wad(dir.path());
        let rows = list(&path, ContainerConfig::default(), true);
        let paths: Vec<_> = rows.iter().map(|row| row.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["/GLOBAL/PLAYPAL", "/GLOBAL/F_START", "/FLATS/FLOOR0_1", "/GLOBAL/F_END"]
        );
        assert_eq!(rows[0].size, 7);
        assert_eq!(rows[0].md5.as_deref(), Some(digest(b"palette").as_str()));
    }

    #[test]
    fn test_extract_ignores_case() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_wad(dir.path());
        let data = extract(&path, "/flats/floor0_1", ContainerConfig::default()).expect("extract");
        assert_eq!(data, b"flat");
        assert!(extract(&path, "/GLOBAL/MISSING", ContainerConfig::default()).is_err());
    }

    #[test]
    fn test_markers_output() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_wad(dir.path());
        let cli = Cli::try_parse_from(["lumpcat", "markers", path.to_str().expect("utf8")])
            .expect("parse");
        let mut out = Vec::new();
        run(cli, &mut out).expect("run");
        assert_eq!(String::from_utf8(out).expect("utf8"), "F        00001..00003\n");
    }

    #[test]
    fn test_single_map_listing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("e1m1.wad");
        let data = WadBuilder::pwad()
            .lump("MAP01", b"")
            .lump("THINGS", b"1234")
            .build()
            .expect("build");
        std::fs::write(&path, data).expect("write");

        let rows = list_single_map(&path, false);
        let paths: Vec<_> = rows.iter().map(|row| row.path.as_str()).collect();
        assert_eq!(paths, vec!["/MAPS/E1M1/MAP01", "/MAPS/E1M1/THINGS"]);
        assert_eq!(rows[1].size, 4);
    }
}
