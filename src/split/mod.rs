//! Ratio-respecting train/val/test partitioning of class folders.
//!
//! Planning is pure (shuffle plus contiguous slicing) and separated from the
//! filesystem pass so the partition properties can be tested without touching
//! disk. Randomness is injectable: a fixed seed drives a [`rand::rngs::StdRng`],
//! otherwise the thread-local generator is used.

mod report;

pub use report::{ClassSummary, CopyFailure, SplitReport};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::dataset::{scan_source, ClassBucket};
use crate::error::CleansplitError;

/// Names of the three output subtrees, in slice order.
pub const SPLIT_NAMES: [&str; 3] = ["train", "val", "test"];

const RATIO_SUM_TOLERANCE: f64 = 1e-9;

/// Target fractions for train/val/test.
///
/// Validated once at construction: each ratio lies in `[0, 1]` and the three
/// sum to 1.0 (within [`RATIO_SUM_TOLERANCE`], so 0.70/0.20/0.10 is accepted
/// despite binary rounding). Nothing downstream touches the filesystem before
/// this check passes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SplitRatios {
    train: f64,
    val: f64,
    test: f64,
}

impl SplitRatios {
    pub fn new(train: f64, val: f64, test: f64) -> Result<Self, CleansplitError> {
        for (name, value) in [("train", train), ("val", val), ("test", test)] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(CleansplitError::RatioOutOfRange { name, value });
            }
        }

        let sum = train + val + test;
        if (sum - 1.0).abs() > RATIO_SUM_TOLERANCE {
            return Err(CleansplitError::InvalidRatios {
                train,
                val,
                test,
                sum,
            });
        }

        Ok(Self { train, val, test })
    }

    pub fn train(&self) -> f64 {
        self.train
    }

    pub fn val(&self) -> f64 {
        self.val
    }

    pub fn test(&self) -> f64 {
        self.test
    }
}

impl Default for SplitRatios {
    /// The conventional 70/15/15 split.
    fn default() -> Self {
        Self {
            train: 0.70,
            val: 0.15,
            test: 0.15,
        }
    }
}

/// Per-class slice sizes, always summing to the class's file count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SplitCounts {
    pub train: usize,
    pub val: usize,
    pub test: usize,
}

/// Compute slice sizes for a class of `n` files.
///
/// Train and val each get `max(1, floor(ratio * n))`, clamped so the counts
/// never exceed what remains; test gets the remainder. When the remainder is
/// zero a test file is taken back from val, or from train when val is down to
/// its last file, so test is never empty once `n >= 2`. Degenerate classes
/// (`n <= 2`) may leave val empty and will be under-represented there.
pub fn split_counts(n: usize, ratios: &SplitRatios) -> SplitCounts {
    if n == 0 {
        return SplitCounts::default();
    }

    let mut train = ((ratios.train * n as f64).floor() as usize).clamp(1, n);
    let mut val = ((ratios.val * n as f64).floor() as usize)
        .max(1)
        .min(n - train);
    let mut test = n - train - val;

    if test == 0 {
        if val > 1 {
            val -= 1;
        } else if train > 1 {
            train -= 1;
        } else if val == 1 {
            // n == 2: one file for train, one for test.
            val = 0;
        }
        test = n - train - val;
    }

    SplitCounts { train, val, test }
}

/// A planned three-way partition of one class's files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassSplit {
    pub train: Vec<PathBuf>,
    pub val: Vec<PathBuf>,
    pub test: Vec<PathBuf>,
}

impl ClassSplit {
    /// The three slices paired with their output subtree names.
    pub fn slices(&self) -> [(&'static str, &[PathBuf]); 3] {
        [
            ("train", &self.train),
            ("val", &self.val),
            ("test", &self.test),
        ]
    }
}

/// Shuffle `files` uniformly and cut the result into contiguous
/// train/val/test slices sized by [`split_counts`].
pub fn plan_class_split<R: Rng + ?Sized>(
    files: &[PathBuf],
    ratios: &SplitRatios,
    rng: &mut R,
) -> ClassSplit {
    let mut shuffled = files.to_vec();
    shuffled.shuffle(rng);

    let counts = split_counts(shuffled.len(), ratios);
    let test = shuffled.split_off(counts.train + counts.val);
    let val = shuffled.split_off(counts.train);

    ClassSplit {
        train: shuffled,
        val,
        test,
    }
}

/// Options for a split run.
#[derive(Clone, Debug)]
pub struct SplitOptions {
    /// Directory whose immediate subdirectories are class folders.
    pub source: PathBuf,
    /// Output root for the train/val/test trees.
    pub destination: PathBuf,
    pub ratios: SplitRatios,
    /// Fixed shuffle seed; `None` uses the thread-local generator.
    pub seed: Option<u64>,
    /// Remove a non-empty pre-existing destination instead of refusing.
    pub force: bool,
}

/// Execute a full split run: scan, plan, copy.
///
/// Class folders are processed in sorted name order. Folders with no
/// qualifying images are recorded as skipped and produce no output
/// directories. Copies carry the source file's timestamps where the platform
/// supports it. Individual copy failures are collected in the report rather
/// than aborting the run; directory-level failures abort immediately.
pub fn run_split(options: &SplitOptions) -> Result<SplitReport, CleansplitError> {
    let buckets = scan_source(&options.source)?;

    let mut report = SplitReport::new(&options.source, &options.destination);
    report.replaced_destination = prepare_destination(&options.destination, options.force)?;

    for split_name in SPLIT_NAMES {
        fs::create_dir_all(options.destination.join(split_name))?;
    }

    match options.seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            split_buckets(&buckets, options, &mut rng, &mut report)?;
        }
        None => {
            let mut rng = rand::rng();
            split_buckets(&buckets, options, &mut rng, &mut report)?;
        }
    }

    Ok(report)
}

/// Remove a pre-existing destination tree when allowed.
///
/// Returns true when an old tree was removed. A non-empty destination without
/// `force` is an error, so the tool never discards data implicitly.
fn prepare_destination(destination: &Path, force: bool) -> Result<bool, CleansplitError> {
    if !destination.exists() {
        return Ok(false);
    }

    if destination.is_dir() && fs::read_dir(destination)?.next().is_none() {
        return Ok(false);
    }

    if !force {
        return Err(CleansplitError::DestinationNotEmpty {
            path: destination.to_path_buf(),
        });
    }

    if destination.is_dir() {
        fs::remove_dir_all(destination)?;
    } else {
        fs::remove_file(destination)?;
    }
    Ok(true)
}

fn split_buckets<R: Rng + ?Sized>(
    buckets: &[ClassBucket],
    options: &SplitOptions,
    rng: &mut R,
    report: &mut SplitReport,
) -> Result<(), CleansplitError> {
    for bucket in buckets {
        if bucket.is_empty() {
            report.skipped.push(bucket.raw_name.clone());
            continue;
        }

        let plan = plan_class_split(&bucket.files, &options.ratios, rng);

        for (split_name, files) in plan.slices() {
            let dest_dir = options.destination.join(split_name).join(&bucket.name);
            fs::create_dir_all(&dest_dir)?;

            for file in files {
                let Some(file_name) = file.file_name() else {
                    continue;
                };
                let target = dest_dir.join(file_name);
                let copied = fs::copy(file, &target).and_then(|_| copy_file_times(file, &target));
                if let Err(source) = copied {
                    report.failures.push(CopyFailure {
                        path: file.display().to_string(),
                        message: source.to_string(),
                    });
                }
            }
        }

        report.classes.push(ClassSummary {
            name: bucket.name.clone(),
            train: plan.train.len(),
            val: plan.val.len(),
            test: plan.test.len(),
        });
    }

    Ok(())
}

/// Carry the source file's timestamps onto the copy, like `shutil.copy2`.
///
/// Platforms that cannot report a timestamp simply leave it unset.
fn copy_file_times(source: &Path, target: &Path) -> io::Result<()> {
    let metadata = fs::metadata(source)?;

    let mut times = fs::FileTimes::new();
    if let Ok(modified) = metadata.modified() {
        times = times.set_modified(modified);
    }
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }

    let file = fs::File::options().write(true).open(target)?;
    file.set_times(times)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratios_must_sum_to_one() {
        assert!(SplitRatios::new(0.70, 0.15, 0.15).is_ok());
        assert!(SplitRatios::new(0.70, 0.20, 0.10).is_ok());

        let err = SplitRatios::new(0.7, 0.2, 0.2).unwrap_err();
        assert!(matches!(err, CleansplitError::InvalidRatios { .. }));
    }

    #[test]
    fn ratios_must_be_fractions() {
        assert!(matches!(
            SplitRatios::new(-0.1, 0.55, 0.55),
            Err(CleansplitError::RatioOutOfRange { name: "train", .. })
        ));
        assert!(matches!(
            SplitRatios::new(0.5, 1.5, -1.0),
            Err(CleansplitError::RatioOutOfRange { .. })
        ));
    }

    #[test]
    fn counts_for_tiny_classes_are_clamped() {
        let ratios = SplitRatios::default();

        let one = split_counts(1, &ratios);
        assert_eq!((one.train, one.val, one.test), (1, 0, 0));

        let two = split_counts(2, &ratios);
        assert_eq!((two.train, two.val, two.test), (1, 0, 1));

        let three = split_counts(3, &ratios);
        assert_eq!((three.train, three.val, three.test), (1, 1, 1));
    }

    #[test]
    fn counts_follow_ratios_for_larger_classes() {
        let ratios = SplitRatios::default();

        let counts = split_counts(20, &ratios);
        assert_eq!((counts.train, counts.val, counts.test), (14, 3, 3));

        let counts = split_counts(100, &ratios);
        assert_eq!((counts.train, counts.val, counts.test), (70, 15, 15));
    }

    #[test]
    fn plan_is_deterministic_with_a_fixed_seed() {
        let files: Vec<PathBuf> = (0..25)
            .map(|i| PathBuf::from(format!("img_{i:02}.jpg")))
            .collect();
        let ratios = SplitRatios::default();

        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);

        let a = plan_class_split(&files, &ratios, &mut rng_a);
        let b = plan_class_split(&files, &ratios, &mut rng_b);
        assert_eq!(a, b);
    }

    #[test]
    fn plan_slices_cover_every_file_exactly_once() {
        let files: Vec<PathBuf> = (0..37)
            .map(|i| PathBuf::from(format!("img_{i:02}.jpg")))
            .collect();
        let mut rng = StdRng::seed_from_u64(7);
        let plan = plan_class_split(&files, &SplitRatios::default(), &mut rng);

        let mut all: Vec<PathBuf> = plan
            .slices()
            .iter()
            .flat_map(|(_, slice)| slice.iter().cloned())
            .collect();
        all.sort();
        assert_eq!(all, files);
    }
}
