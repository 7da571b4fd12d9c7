//! Location of the on-disk data directory

use std::fs;
use std::path::{Path, PathBuf};

/// Name of the per-project data directory
pub const DATA_DIR_NAME: &str = ".prompt-perfect";

/// Storage file name inside the data directory
const STORAGE_FILE_NAME: &str = "storage.json";

/// Get the .prompt-perfect directory path under `root`
/// Creates the directory if it doesn't exist
pub fn get_data_dir(root: &Path) -> PathBuf {
    let data_dir = root.join(DATA_DIR_NAME);

    if !data_dir.exists() {
        if let Err(e) = fs::create_dir_all(&data_dir) {
            tracing::warn!("Failed to create {} directory: {}", DATA_DIR_NAME, e);
        } else {
            add_to_gitignore(root);
        }
    }

    data_dir
}

/// Get the storage file path under `root`
pub fn get_storage_file_path(root: &Path) -> PathBuf {
    get_data_dir(root).join(STORAGE_FILE_NAME)
}

/// Add .prompt-perfect to an existing .gitignore
fn add_to_gitignore(root: &Path) {
    let gitignore_path = root.join(".gitignore");

    // Only touch repositories that already keep a .gitignore
    let content = match fs::read_to_string(&gitignore_path) {
        Ok(c) => c,
        Err(_) => return,
    };

    if gitignore_has_data_dir(&content) {
        return;
    }

    let new_content = if content.ends_with('\n') || content.is_empty() {
        format!("{}{}/\n", content, DATA_DIR_NAME)
    } else {
        format!("{}\n{}/\n", content, DATA_DIR_NAME)
    };

    if let Err(e) = fs::write(&gitignore_path, new_content) {
        tracing::warn!("Failed to update .gitignore: {}", e);
    }
}

fn gitignore_has_data_dir(content: &str) -> bool {
    content.lines().any(|line| {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return false;
        }
        let entry = line.split('#').next().unwrap_or(line).trim();
        entry.trim_end_matches('/') == DATA_DIR_NAME
    })
}
