use crate::models::Participant;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur loading a roster file
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("failed to read roster {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{name:?} on line {line} already appears on line {first_line}")]
    Duplicate {
        name: String,
        line: usize,
        first_line: usize,
    },
}

/// Parse a roster: one participant per line
///
/// Surrounding whitespace is trimmed; blank lines and lines starting with
/// `#` are skipped. Order is preserved since it decides matcher tie-breaks.
pub fn parse_roster(contents: &str) -> Result<Vec<Participant>, RosterError> {
    let mut participants = Vec::new();
    let mut first_seen: HashMap<&str, usize> = HashMap::new();

    for (idx, raw) in contents.lines().enumerate() {
        let line = idx + 1;
        let name = raw.trim();
        if name.is_empty() || name.starts_with('#') {
            continue;
        }

        if let Some(&first_line) = first_seen.get(name) {
            return Err(RosterError::Duplicate {
                name: name.to_string(),
                line,
                first_line,
            });
        }
        first_seen.insert(name, line);
        participants.push(name.to_string());
    }

    Ok(participants)
}

/// Read and parse a roster file
pub fn load_roster<P: AsRef<Path>>(path: P) -> Result<Vec<Participant>, RosterError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| RosterError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let participants = parse_roster(&contents)?;
    tracing::debug!("Loaded {} participants from {}", participants.len(), path.display());
    Ok(participants)
}
