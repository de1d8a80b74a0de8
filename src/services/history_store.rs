use crate::models::History;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur reading or writing the history file
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access history file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse history file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to serialize history: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

/// YAML-backed pairing history
///
/// The file maps each participant to their partners and the RFC 3339 time
/// they were last paired:
///
/// ```yaml
/// alice:
///   bob: 2024-03-04T09:00:00Z
/// bob:
///   alice: 2024-03-04T09:00:00Z
/// ```
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the history; a missing file is an empty history
    pub fn load(&self) -> Result<History, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!("No history at {}, starting fresh", self.path.display());
                return Ok(History::new());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if contents.trim().is_empty() {
            return Ok(History::new());
        }

        let history: History =
            serde_yaml::from_str(&contents).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(
            "Loaded history for {} participants from {}",
            history.len(),
            self.path.display()
        );
        Ok(history)
    }

    /// Persist the history
    ///
    /// Writes to a sibling temp file first and renames it over the target,
    /// so a failed write leaves the previous file intact.
    pub fn save(&self, history: &History) -> Result<(), StoreError> {
        let yaml = serde_yaml::to_string(history)?;
        let tmp = self.temp_path();

        if let Err(e) = self.write_and_replace(&tmp, yaml.as_bytes()) {
            // Nothing to clean up when the temp file was never created
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }

        tracing::debug!(
            "Saved history for {} participants to {}",
            history.len(),
            self.path.display()
        );
        Ok(())
    }

    fn write_and_replace(&self, tmp: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        let tmp_err = |source: io::Error| StoreError::Io {
            path: tmp.to_path_buf(),
            source,
        };

        let mut file = fs::File::create(tmp).map_err(tmp_err)?;
        file.write_all(bytes).map_err(tmp_err)?;
        file.sync_all().map_err(tmp_err)?;
        drop(file);

        fs::rename(tmp, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
