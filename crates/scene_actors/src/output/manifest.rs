use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::atomic_io::write_text_atomic;
use super::OutputError;

pub(crate) const OUTPUT_FORMAT_VERSION: u16 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub(crate) struct ExportManifest {
    pub format_version: u16,
    pub exporter_version: String,
    pub header_name: String,
    pub transition_count: usize,
    pub entrance_count: usize,
    pub input_hash_sha256_hex: String,
}

#[derive(Debug, Clone)]
pub(crate) enum ManifestReadState {
    Missing,
    Unreadable,
    Present(ExportManifest),
}

pub(crate) fn read_manifest(path: &Path) -> Result<ManifestReadState, OutputError> {
    if !path.exists() {
        return Ok(ManifestReadState::Missing);
    }

    let raw = fs::read_to_string(path).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed = match serde_json::from_str::<ExportManifest>(&raw) {
        Ok(value) => value,
        Err(_) => return Ok(ManifestReadState::Unreadable),
    };
    Ok(ManifestReadState::Present(parsed))
}

pub(crate) fn write_manifest_atomic(
    path: &Path,
    manifest: &ExportManifest,
) -> Result<(), OutputError> {
    let text = serde_json::to_string_pretty(manifest).map_err(|source| {
        OutputError::EncodeManifest {
            path: path.to_path_buf(),
            source,
        }
    })?;
    write_text_atomic(path, &text).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })
}
