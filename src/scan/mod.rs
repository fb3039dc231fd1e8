//! Read-only inspection of a source tree.
//!
//! Answers "what would a split see" without writing anything: class folders,
//! the clean names they map to, and how many qualifying images each holds.

use serde::Serialize;
use std::fmt;
use std::path::Path;

use crate::dataset::scan_source;
use crate::error::CleansplitError;

/// A report describing the class folders under a source root.
#[derive(Clone, Debug, Serialize)]
pub struct ScanReport {
    pub source: String,
    /// One entry per class folder, in sorted folder-name order.
    pub classes: Vec<ClassEntry>,
}

/// One class folder and its qualifying image count.
#[derive(Clone, Debug, Serialize)]
pub struct ClassEntry {
    /// Folder name as found on disk.
    pub folder: String,
    /// Clean class name used in split output paths.
    pub name: String,
    /// Number of qualifying image files.
    pub images: usize,
}

impl ScanReport {
    pub fn total_images(&self) -> usize {
        self.classes.iter().map(|c| c.images).sum()
    }

    /// Class folders a split run would skip.
    pub fn empty_count(&self) -> usize {
        self.classes.iter().filter(|c| c.images == 0).count()
    }
}

impl fmt::Display for ScanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Source: {}", self.source)?;
        writeln!(f)?;

        for class in &self.classes {
            if class.images == 0 {
                writeln!(
                    f,
                    "  {:<20} (from '{}')  no qualifying images",
                    class.name, class.folder
                )?;
            } else {
                writeln!(
                    f,
                    "  {:<20} (from '{}')  {} image(s)",
                    class.name, class.folder, class.images
                )?;
            }
        }

        writeln!(f)?;
        writeln!(
            f,
            "{} class(es), {} image(s) total",
            self.classes.len(),
            self.total_images()
        )?;
        if self.empty_count() > 0 {
            writeln!(
                f,
                "{} folder(s) would be skipped by a split run",
                self.empty_count()
            )?;
        }

        Ok(())
    }
}

/// Scan `source` and summarize its class folders.
pub fn scan_report(source: &Path) -> Result<ScanReport, CleansplitError> {
    let buckets = scan_source(source)?;

    Ok(ScanReport {
        source: source.display().to_string(),
        classes: buckets
            .into_iter()
            .map(|bucket| ClassEntry {
                images: bucket.files.len(),
                folder: bucket.raw_name,
                name: bucket.name,
            })
            .collect(),
    })
}
