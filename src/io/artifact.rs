//! Read/write model artifact JSON files.
//!
//! Artifacts are exported once from the training environment and read at
//! startup. Errors carry the offending path so a bad deployment is easy to spot.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[cfg(test)]
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::models::ArtifactError;

/// Read and deserialize one artifact file.
pub fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let file = File::open(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write one artifact file (pretty-printed). Only tests produce artifacts.
#[cfg(test)]
pub fn write_artifact<T: Serialize>(path: &Path, artifact: &T) -> Result<(), ArtifactError> {
    let file = File::create(path).map_err(|source| ArtifactError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::to_writer_pretty(file, artifact).map_err(|e| ArtifactError::Write {
        path: path.to_path_buf(),
        source: e.into(),
    })
}
