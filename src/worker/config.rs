//! Paint worker configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::types::Result;
use crate::voxel::buffer::ElementType;

/// Configuration for the paint worker
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Name of the dedicated worker thread
    pub thread_name: String,
    /// Element type for `start` requests that do not name one
    pub default_element_type: ElementType,
    /// Log how long each request took, at debug level
    pub log_request_timing: bool,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            thread_name: "voxpaint-worker".to_string(),
            default_element_type: ElementType::U8,
            log_request_timing: false,
        }
    }
}

impl WorkerConfig {
    /// Save to file (sync)
    pub fn save_sync(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from file (sync)
    pub fn load_sync(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}
