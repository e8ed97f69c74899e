use std::fs;
use std::path::{Path, PathBuf};

use crate::history::{HistoricalEvent, HistoryError, parse_history};

#[derive(Debug)]
pub enum HistoryLoadError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: HistoryError,
    },
}

impl std::fmt::Display for HistoryLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryLoadError::Io { path, source } => {
                write!(f, "failed to read history {}: {source}", path.display())
            }
            HistoryLoadError::Parse { path, source } => {
                write!(f, "failed to parse history {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for HistoryLoadError {}

pub fn load_history_file(path: impl AsRef<Path>) -> Result<Vec<HistoricalEvent>, HistoryLoadError> {
    let path = path.as_ref();
    let payload = fs::read_to_string(path).map_err(|e| HistoryLoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_history(&payload).map_err(|e| HistoryLoadError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}
