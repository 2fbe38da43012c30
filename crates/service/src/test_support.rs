#![cfg(test)]
use std::path::PathBuf;

/// Unique scratch path under the system temp dir; nothing is created.
pub fn temp_json_path(prefix: &str) -> PathBuf {
    std::env::temp_dir().join(format!("{prefix}_{}.json", uuid::Uuid::new_v4()))
}

/// Best-effort cleanup for files created by a test.
pub async fn remove(path: &PathBuf) {
    let _ = tokio::fs::remove_file(path).await;
}
