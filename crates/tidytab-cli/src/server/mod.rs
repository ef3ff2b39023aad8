//! HTTP upload server.

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;

use std::path::PathBuf;

/// Server configuration, built from command-line arguments.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory where cleaned uploads are persisted.
    pub output_dir: PathBuf,
    /// Largest accepted request body.
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            output_dir: PathBuf::from("outputs"),
            max_upload_bytes: 25 * 1024 * 1024,
        }
    }
}
