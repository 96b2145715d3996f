//! Visual Regression Diff Engine
//!
//! This crate compares pairs of PNG screenshots (a baseline and a fresh
//! capture) under a perceptual per-pixel distance and decides whether the
//! capture still matches its baseline.
//!
//! # Pipeline
//!
//! Each image pair goes through a fixed, linear pipeline:
//!
//! 1. **Load**: both files are decoded and converted to RGBA8
//! 2. **Normalize**: top rows (window chrome) are cropped in logical pixels,
//!    then both images are shrunk to their shared minimum resolution
//! 3. **Compare**: every coordinate is scanned; pixels whose perceptual
//!    distance exceeds the tolerance are recorded
//! 4. **Classify**: the differing-pixel count is checked against the
//!    configured maximum
//! 5. **Emit**: failing pairs get a diff artifact (grayscale baseline with
//!    differing pixels painted red)
//!
//! # Example
//!
//! ```no_run
//! use vrt_diff_core::{compare_pair, DiffConfig, Verdict};
//! use std::path::Path;
//!
//! let config = DiffConfig::default();
//! let report = compare_pair(
//!     Path::new("baselines/knob.png"),
//!     Path::new("current/knob.png"),
//!     Path::new("output"),
//!     &config,
//! );
//! assert!(matches!(report.verdict, Verdict::Pass { .. }));
//! ```

pub mod artifact;
pub mod compare;
pub mod config;
pub mod distance;
pub mod error;
pub mod normalize;
pub mod pair;
pub mod png;

pub use compare::{scan_pixels, PixelScan};
pub use config::{resolve, ConfigFile, ConfigOverrides, DiffConfig, ResolvedConfig, ValueSource};
pub use distance::perceptual_distance;
pub use error::{ConfigError, DiffError};
pub use normalize::{normalize_pair, NormalizedPair};
pub use pair::{compare_pair, Failure, ImageReport, Verdict};
