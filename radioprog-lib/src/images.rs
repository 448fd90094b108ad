use std::path::{Path, PathBuf};

use crate::{Error, Result};

pub const DEFAULT_EXTENSION: &str = "img";

/// Memory image files available in `dir`, sorted by name.
pub fn list_images(dir: &Path, extension: &str) -> Result<Vec<String>> {
    let suffix = format!(".{}", extension.trim_start_matches('.'));
    let mut images = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if name.ends_with(&suffix) {
                images.push(name.to_string());
            }
        }
    }
    images.sort();
    Ok(images)
}

pub fn resolve_image(dir: &Path, name: &str) -> PathBuf {
    dir.join(name)
}

/// Fails with [`Error::MissingInputFile`] if there is nothing to upload at `path`.
pub fn require_existing(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(Error::MissingInputFile {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}
