//! Split run reporting.
//!
//! Mirrors the structure of the scan report: a serializable struct with a
//! human-readable `Display`, printed by the CLI after the run. Copy failures
//! are collected here and turned into a non-zero exit status by the caller.

use serde::Serialize;
use std::fmt;
use std::path::Path;

/// A report generated by a split run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SplitReport {
    /// Source root that was scanned.
    pub source: String,
    /// Destination root that was written.
    pub destination: String,
    /// True when a pre-existing destination tree was removed first.
    pub replaced_destination: bool,
    /// One row per class that produced output, in processing order.
    pub classes: Vec<ClassSummary>,
    /// Raw folder names skipped because they held no qualifying images.
    pub skipped: Vec<String>,
    /// Individual files that could not be copied.
    pub failures: Vec<CopyFailure>,
}

impl SplitReport {
    pub fn new(source: &Path, destination: &Path) -> Self {
        Self {
            source: source.display().to_string(),
            destination: destination.display().to_string(),
            ..Default::default()
        }
    }

    /// Total files assigned across all classes and splits.
    pub fn total_files(&self) -> usize {
        self.classes.iter().map(ClassSummary::total).sum()
    }

    /// Per-split totals across all classes.
    pub fn totals(&self) -> (usize, usize, usize) {
        self.classes.iter().fold((0, 0, 0), |(t, v, s), c| {
            (t + c.train, v + c.val, s + c.test)
        })
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

impl fmt::Display for SplitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Split '{}' -> '{}'", self.source, self.destination)?;
        if self.replaced_destination {
            writeln!(f, "Removed existing destination tree first.")?;
        }
        writeln!(f)?;

        for class in &self.classes {
            writeln!(
                f,
                "  {:<20} {:>4} train | {:>4} val | {:>4} test",
                class.name, class.train, class.val, class.test
            )?;
        }

        if !self.skipped.is_empty() {
            writeln!(f)?;
            writeln!(f, "Warnings ({}):", self.skipped.len())?;
            for folder in &self.skipped {
                writeln!(f, "  - No images found in '{}', skipped", folder)?;
            }
        }

        if !self.failures.is_empty() {
            writeln!(f)?;
            writeln!(f, "Failures ({}):", self.failures.len())?;
            for failure in &self.failures {
                writeln!(f, "  - {}: {}", failure.path, failure.message)?;
            }
        }

        let (train, val, test) = self.totals();
        writeln!(f)?;
        writeln!(
            f,
            "Done: {} file(s) copied ({} train, {} val, {} test) into {}/{{train,val,test}}/<class>/",
            self.total_files(),
            train,
            val,
            test,
            self.destination
        )?;

        Ok(())
    }
}

/// Per-class assignment counts.
#[derive(Clone, Debug, Serialize)]
pub struct ClassSummary {
    pub name: String,
    pub train: usize,
    pub val: usize,
    pub test: usize,
}

impl ClassSummary {
    pub fn total(&self) -> usize {
        self.train + self.val + self.test
    }
}

/// A single file that could not be copied.
#[derive(Clone, Debug, Serialize)]
pub struct CopyFailure {
    pub path: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> SplitReport {
        SplitReport {
            source: "raw_images".to_string(),
            destination: "dataset".to_string(),
            replaced_destination: false,
            classes: vec![
                ClassSummary {
                    name: "Plastic".to_string(),
                    train: 70,
                    val: 15,
                    test: 15,
                },
                ClassSummary {
                    name: "Trash".to_string(),
                    train: 7,
                    val: 1,
                    test: 2,
                },
            ],
            skipped: vec!["Empty Images".to_string()],
            failures: Vec::new(),
        }
    }

    #[test]
    fn totals_add_up() {
        let report = sample_report();
        assert_eq!(report.total_files(), 110);
        assert_eq!(report.totals(), (77, 16, 17));
        assert!(!report.has_failures());
    }

    #[test]
    fn display_mentions_classes_and_warnings() {
        let text = sample_report().to_string();
        assert!(text.contains("Plastic"));
        assert!(text.contains("70 train"));
        assert!(text.contains("No images found in 'Empty Images'"));
        assert!(text.contains("110 file(s) copied"));
    }

    #[test]
    fn report_serializes_to_json() {
        let mut report = sample_report();
        report.failures.push(CopyFailure {
            path: "raw_images/Trash Images/x.jpg".to_string(),
            message: "permission denied".to_string(),
        });

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"classes\""));
        assert!(json.contains("\"Plastic\""));
        assert!(json.contains("\"permission denied\""));
    }
}
