//! Type definitions for the diff command.
//!
//! Contains the serializable types emitted by `--json` and the in-memory
//! aggregate of a directory comparison.

use serde::{Deserialize, Serialize};
use vrt_diff_core::{DiffConfig, Failure, ImageReport, Verdict};

use crate::json_output::JsonError;

/// Every per-image report of a run plus the orphan baselines.
#[derive(Debug, Clone, Default)]
pub struct DirectoryReport {
    pub reports: Vec<ImageReport>,
    pub orphans: Vec<String>,
}

impl DirectoryReport {
    /// True iff every current image passed. Orphans never count.
    pub fn passed(&self) -> bool {
        self.reports.iter().all(|r| r.passed())
    }

    /// Names of the images that failed, in processing order.
    pub fn failing_names(&self) -> Vec<&str> {
        self.reports
            .iter()
            .filter(|r| !r.passed())
            .map(|r| r.name.as_str())
            .collect()
    }
}

/// Result of comparing a single image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiffFileResult {
    /// File name of the current image
    pub name: String,
    /// Whether the image passed
    pub passed: bool,
    /// One of `pass`, `missing_baseline`, `load_error`, `dimension_mismatch`,
    /// `threshold_exceeded`
    pub status: String,
    /// Differing pixel count (if a pixel scan took place)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub differing_pixels: Option<u64>,
    /// Configured maximum (for threshold failures)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_allowed: Option<u64>,
    /// Same detail text as the console line
    pub message: String,
    /// Path of the diff artifact (if one was written)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<String>,
}

impl From<&ImageReport> for DiffFileResult {
    fn from(report: &ImageReport) -> Self {
        let max_allowed = match &report.verdict {
            Verdict::Fail(Failure::ThresholdExceeded { max_allowed, .. }) => Some(*max_allowed),
            _ => None,
        };

        Self {
            name: report.name.clone(),
            passed: report.passed(),
            status: report.verdict.kind().to_string(),
            differing_pixels: report.verdict.differing_pixels(),
            max_allowed,
            message: report.verdict.to_string(),
            artifact: report.artifact.as_ref().map(|p| p.display().to_string()),
        }
    }
}

/// Summary of a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiffSummary {
    /// Current images compared
    pub total: usize,
    /// Images that passed
    pub passed: usize,
    /// Images that failed for any reason
    pub failed: usize,
    /// Baselines with no current image
    pub orphans: usize,
}

/// JSON output for the diff command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffOutput {
    /// Whether every current image passed
    pub success: bool,
    /// Effective configuration (absent when configuration failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<DiffConfig>,
    /// Individual image results
    pub results: Vec<DiffFileResult>,
    /// Baselines with no matching current image
    pub orphans: Vec<String>,
    /// Summary statistics
    pub summary: DiffSummary,
    /// Fatal errors encountered
    pub errors: Vec<JsonError>,
}

impl DiffOutput {
    /// Create output from a completed run.
    pub fn from_report(report: &DirectoryReport, config: DiffConfig) -> Self {
        let results: Vec<DiffFileResult> = report.reports.iter().map(Into::into).collect();
        let passed = results.iter().filter(|r| r.passed).count();

        Self {
            success: report.passed(),
            config: Some(config),
            summary: DiffSummary {
                total: results.len(),
                passed,
                failed: results.len() - passed,
                orphans: report.orphans.len(),
            },
            results,
            orphans: report.orphans.clone(),
            errors: vec![],
        }
    }

    /// Create output for a run that aborted before comparing anything.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            config: None,
            results: vec![],
            orphans: vec![],
            summary: DiffSummary {
                total: 0,
                passed: 0,
                failed: 0,
                orphans: 0,
            },
            errors,
        }
    }
}
