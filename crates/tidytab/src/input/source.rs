//! Source metadata for decoded inputs.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Metadata about the decoded source data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file, or the upload name.
    pub path: PathBuf,
    /// SHA-256 hash of the raw contents.
    pub hash: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Detected encoding.
    pub encoding: String,
    /// Number of data rows (excluding header), before cleaning.
    pub row_count: usize,
    /// Number of columns, before cleaning.
    pub column_count: usize,
    /// When the source was decoded.
    pub decoded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a decoded source.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            encoding: "utf-8".to_string(),
            row_count,
            column_count,
            decoded_at: Utc::now(),
        }
    }
}

/// Hash raw contents as `sha256:<hex>`.
pub(crate) fn hash_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("sha256:{:x}", hasher.finalize())
}
