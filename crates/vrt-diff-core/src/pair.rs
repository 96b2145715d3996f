//! Comparison of a single baseline/current pair.
//!
//! Runs the linear Load -> Normalize -> Compare -> Classify -> Emit pipeline.
//! Every failure is converted into a [`Verdict`]; nothing here returns an
//! error to the caller.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::artifact::write_artifact;
use crate::compare::scan_pixels;
use crate::config::DiffConfig;
use crate::error::DiffError;
use crate::normalize::{normalize_pair, NormalizedPair};
use crate::png::load_rgba;

/// Why an image failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// No same-named file in the baseline directory.
    MissingBaseline,
    /// An image could not be read, decoded, or cropped.
    Load(String),
    /// Dimensions still differ after normalization.
    DimensionMismatch {
        baseline: (u32, u32),
        current: (u32, u32),
    },
    /// More pixels differ than `max_failed_pixels` allows.
    ThresholdExceeded {
        differing_pixels: u64,
        max_allowed: u64,
    },
}

impl Failure {
    /// Stable identifier used in machine-readable output.
    pub fn kind(&self) -> &'static str {
        match self {
            Failure::MissingBaseline => "missing_baseline",
            Failure::Load(_) => "load_error",
            Failure::DimensionMismatch { .. } => "dimension_mismatch",
            Failure::ThresholdExceeded { .. } => "threshold_exceeded",
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::MissingBaseline => write!(f, "Missing baseline"),
            Failure::Load(e) => write!(f, "Error loading images: {}", e),
            Failure::DimensionMismatch { baseline, current } => write!(
                f,
                "Dimension mismatch after resize: baseline={}x{} current={}x{}",
                baseline.0, baseline.1, current.0, current.1
            ),
            Failure::ThresholdExceeded {
                differing_pixels,
                max_allowed,
            } => write!(
                f,
                "{} differing pixels, max allowed: {}",
                differing_pixels, max_allowed
            ),
        }
    }
}

/// Outcome of comparing one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Passed; `differing_pixels` may be non-zero but within the limit.
    Pass { differing_pixels: u64 },
    Fail(Failure),
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass { .. })
    }

    /// Stable identifier used in machine-readable output.
    pub fn kind(&self) -> &'static str {
        match self {
            Verdict::Pass { .. } => "pass",
            Verdict::Fail(failure) => failure.kind(),
        }
    }

    /// Number of differing pixels, when a pixel scan took place.
    pub fn differing_pixels(&self) -> Option<u64> {
        match self {
            Verdict::Pass { differing_pixels }
            | Verdict::Fail(Failure::ThresholdExceeded {
                differing_pixels, ..
            }) => Some(*differing_pixels),
            Verdict::Fail(_) => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Pass { differing_pixels: 0 } => write!(f, "0 differing pixels"),
            Verdict::Pass { differing_pixels } => {
                write!(f, "{} differing pixels, within tolerance", differing_pixels)
            }
            Verdict::Fail(failure) => write!(f, "{}", failure),
        }
    }
}

/// Result of comparing one current image against its baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReport {
    /// File name of the current image
    pub name: String,
    pub verdict: Verdict,
    /// Diff artifact, written only when the threshold was exceeded
    pub artifact: Option<PathBuf>,
}

impl ImageReport {
    fn new(name: String, verdict: Verdict) -> Self {
        Self {
            name,
            verdict,
            artifact: None,
        }
    }

    pub fn passed(&self) -> bool {
        self.verdict.is_pass()
    }
}

fn load_and_normalize(
    baseline_path: &Path,
    current_path: &Path,
    crop_top_px: u32,
) -> Result<NormalizedPair, DiffError> {
    let current = load_rgba(current_path)?;
    let baseline = load_rgba(baseline_path)?;
    normalize_pair(baseline, current, crop_top_px)
}

/// Compare `current_path` against `baseline_path`.
///
/// On a threshold failure the diff artifact is written into `output_dir`,
/// which must already exist.
pub fn compare_pair(
    baseline_path: &Path,
    current_path: &Path,
    output_dir: &Path,
    config: &DiffConfig,
) -> ImageReport {
    let name = current_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| current_path.display().to_string());

    if !baseline_path.exists() {
        return ImageReport::new(name, Verdict::Fail(Failure::MissingBaseline));
    }

    let pair = match load_and_normalize(baseline_path, current_path, config.crop_top_px) {
        Ok(pair) => pair,
        Err(e) => return ImageReport::new(name, Verdict::Fail(Failure::Load(e.to_string()))),
    };

    if !pair.dimensions_match() {
        let failure = Failure::DimensionMismatch {
            baseline: pair.baseline.dimensions(),
            current: pair.current.dimensions(),
        };
        return ImageReport::new(name, Verdict::Fail(failure));
    }

    let scan = scan_pixels(&pair.baseline, &pair.current, config.tolerance);
    let differing_pixels = scan.differing_count();

    if scan.within_limit(config.max_failed_pixels) {
        return ImageReport::new(name, Verdict::Pass { differing_pixels });
    }

    let artifact = match write_artifact(&pair.baseline, &scan.differing, output_dir, &name) {
        Ok(path) => Some(path),
        Err(e) => {
            log::error!("failed to write diff artifact for {}: {}", name, e);
            None
        }
    };

    ImageReport {
        name,
        verdict: Verdict::Fail(Failure::ThresholdExceeded {
            differing_pixels,
            max_allowed: config.max_failed_pixels,
        }),
        artifact,
    }
}
