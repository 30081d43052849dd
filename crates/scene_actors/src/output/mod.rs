mod atomic_io;
mod hashing;
mod manifest;
mod writer;

use std::path::PathBuf;

use thiserror::Error;

pub use hashing::{hash_export_inputs, ExportInputs};
pub use writer::{write_actor_tables, OutputPaths, RewriteReason, WriteOutcome};

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("i/o error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode manifest json for {path}: {source}")]
    EncodeManifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode export settings for hashing: {0}")]
    EncodeSettings(#[source] serde_json::Error),
}
