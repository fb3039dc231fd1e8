//! Source tree scanning for class-folder image datasets.
//!
//! The expected layout is one level deep: every immediate subdirectory of the
//! source root is a class folder, and every recognized image file directly
//! inside it belongs to that class.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CleansplitError;

/// File extensions treated as images, matched case-insensitively.
pub const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// Decorative suffix removed from raw class folder names.
const CLASS_NAME_SUFFIX: &str = " Images";

/// One class folder with its qualifying image files.
#[derive(Clone, Debug)]
pub struct ClassBucket {
    /// Folder name as found on disk.
    pub raw_name: String,
    /// Clean class name used in output paths.
    pub name: String,
    /// Qualifying image files, sorted by file name.
    pub files: Vec<PathBuf>,
}

impl ClassBucket {
    /// True if the folder contained no qualifying image files.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Derive the clean class name from a raw folder name.
///
/// Removes the literal `" Images"` marker and trims surrounding whitespace,
/// so `"Plastic Images"` becomes `"Plastic"`.
pub fn clean_class_name(raw: &str) -> String {
    raw.replace(CLASS_NAME_SUFFIX, "").trim().to_string()
}

/// Returns true if the path has a recognized image extension.
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
}

/// Scan the immediate subdirectories of `root` into class buckets.
///
/// Buckets come back sorted by raw folder name so downstream output is
/// reproducible. Non-directory entries at the top level are ignored. Buckets
/// with zero qualifying files are kept so callers can warn about them before
/// skipping. Two folders that normalize to the same clean name would silently
/// merge two classes, so that is rejected here, before anything is written.
pub fn scan_source(root: &Path) -> Result<Vec<ClassBucket>, CleansplitError> {
    if !root.is_dir() {
        return Err(CleansplitError::SourceNotADirectory(root.to_path_buf()));
    }

    let mut folders = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue; // stray files at the top level
        }
        if let Some(raw_name) = path.file_name().and_then(|n| n.to_str()) {
            folders.push((raw_name.to_string(), path));
        }
    }
    folders.sort_by(|a, b| a.0.cmp(&b.0));

    let mut seen: HashMap<String, String> = HashMap::new();
    let mut buckets = Vec::with_capacity(folders.len());

    for (raw_name, path) in folders {
        let name = clean_class_name(&raw_name);
        if let Some(first) = seen.insert(name.clone(), raw_name.clone()) {
            return Err(CleansplitError::ClassNameCollision {
                name,
                first,
                second: raw_name,
            });
        }

        let files = list_image_files(&path)?;
        buckets.push(ClassBucket {
            raw_name,
            name,
            files,
        });
    }

    Ok(buckets)
}

fn list_image_files(dir: &Path) -> Result<Vec<PathBuf>, CleansplitError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && is_image_file(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_name_strips_suffix_and_whitespace() {
        assert_eq!(clean_class_name("Plastic Images"), "Plastic");
        assert_eq!(clean_class_name("  Organic Images  "), "Organic");
        assert_eq!(clean_class_name("Trash"), "Trash");
    }

    #[test]
    fn clean_name_of_bare_suffix_is_empty() {
        assert_eq!(clean_class_name(" Images"), "");
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        assert!(is_image_file(Path::new("a.jpg")));
        assert!(is_image_file(Path::new("b.JPEG")));
        assert!(is_image_file(Path::new("c.Png")));
        assert!(is_image_file(Path::new("d.BMP")));
    }

    #[test]
    fn unrecognized_extensions_are_rejected() {
        assert!(!is_image_file(Path::new("c.txt")));
        assert!(!is_image_file(Path::new("d.gif")));
        assert!(!is_image_file(Path::new("no_extension")));
        assert!(!is_image_file(Path::new("archive.jpg.zip")));
    }
}
