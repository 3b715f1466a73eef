use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};
use serde::de::DeserializeOwned;
use tempfile::TempDir;

use crate::error::{Result, XornetError};
use crate::model::Network;

const MODEL_FILE: &str = "model.json";
const MANIFEST_FILE: &str = "manifest.json";
const FORMAT_VERSION: u32 = 1;

/// Sidecar metadata stamped on every exported artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub format_version: u32,
    /// Ordered usage tags, e.g. ["serve"]. Never empty.
    pub tags: Vec<String>,
    /// Step-counter value at export time.
    pub step: i64,
}

/// Stages an export in a unique temporary directory next to the
/// destination and commits it with a single rename, so the destination
/// only ever holds the previous artifact or the complete new one.
pub struct ExportBuilder {
    staging: TempDir,
    destination: PathBuf,
}

impl ExportBuilder {
    /// Creates a builder targeting `export_dir`. The staging directory is
    /// placed in the same parent so the final rename stays on one
    /// filesystem.
    pub fn new(export_dir: impl Into<PathBuf>) -> Result<ExportBuilder> {
        let destination = export_dir.into();
        let parent = match destination.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)?;
        let staging = tempfile::Builder::new()
            .prefix(".xornet-export-")
            .tempdir_in(&parent)?;
        Ok(ExportBuilder {
            staging,
            destination,
        })
    }

    /// Writes the network and its manifest into the staging directory.
    /// At least one tag is required.
    pub fn add_model(&self, network: &Network, step: i64, tags: &[String]) -> Result<()> {
        if tags.is_empty() {
            return Err(XornetError::EmptyTags);
        }
        write_json(&self.staging.path().join(MODEL_FILE), network)?;
        write_json(
            &self.staging.path().join(MANIFEST_FILE),
            &Manifest {
                format_version: FORMAT_VERSION,
                tags: tags.to_vec(),
                step,
            },
        )?;
        Ok(())
    }

    /// Replaces whatever is at the destination with the staged artifact.
    /// Pre-existing content is destroyed; there is no backup.
    pub fn save(self) -> Result<PathBuf> {
        let ExportBuilder {
            staging,
            destination,
        } = self;
        match fs::symlink_metadata(&destination) {
            Ok(meta) if meta.is_dir() => fs::remove_dir_all(&destination)?,
            Ok(_) => fs::remove_file(&destination)?,
            Err(_) => {}
        }
        fs::rename(staging.path(), &destination)?;
        // The staged directory now lives at the destination; disarm the
        // temp-dir cleanup so it does not chase the moved path.
        let _ = staging.into_path();
        Ok(destination)
    }
}

/// Exports the network and step under `tags`, replacing whatever is at
/// `export_dir`. Returns the destination path on success.
pub fn export(
    network: &Network,
    step: i64,
    export_dir: impl Into<PathBuf>,
    tags: &[String],
) -> Result<PathBuf> {
    let builder = ExportBuilder::new(export_dir)?;
    log::info!(
        "export_dir {}, tags {:?}",
        builder.destination.display(),
        tags
    );
    builder.add_model(network, step, tags)?;
    builder.save()
}

/// A previously exported artifact read back from disk.
pub struct SavedArtifact {
    pub manifest: Manifest,
    pub network: Network,
}

/// Loads an exported directory, independent of the process that wrote it.
pub fn load(dir: impl AsRef<Path>) -> Result<SavedArtifact> {
    let dir = dir.as_ref();
    let manifest = read_json(&dir.join(MANIFEST_FILE))?;
    let network = read_json(&dir.join(MODEL_FILE))?;
    Ok(SavedArtifact { manifest, network })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = fs::File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, value)?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = fs::File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}
