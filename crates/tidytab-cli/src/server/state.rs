//! Application state for the web server.

use std::path::PathBuf;
use std::sync::Arc;

use tidytab::{Cleaner, Writer};

/// Shared application state.
///
/// Each request cleans its own table; nothing here is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    pub cleaner: Arc<Cleaner>,
    pub writer: Arc<Writer>,
    /// Directory where cleaned uploads are written.
    pub output_dir: PathBuf,
}

impl AppState {
    /// Create new application state.
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            cleaner: Arc::new(Cleaner::new()),
            writer: Arc::new(Writer::new()),
            output_dir,
        }
    }
}
