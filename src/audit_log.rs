use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::json;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-only audit log. Every analysis run can be recorded as one JSON
/// line; the log is insert-only and never read back by the tool.
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn record<T: Serialize>(&self, kind: &str, payload: &T) -> Result<()> {
        let entry = json!({
            "recorded_at": chrono::Utc::now().to_rfc3339(),
            "kind": kind,
            "data": payload,
        });

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open audit log: {}", self.path.display()))?;
        writeln!(file, "{}", entry)
            .with_context(|| format!("Failed to write audit log: {}", self.path.display()))?;

        Ok(())
    }
}
