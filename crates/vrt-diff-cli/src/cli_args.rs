//! CLI argument definitions for the vrt-diff command-line interface.
//!
//! The `#[derive(Parser)]` type lives here, keeping `main.rs` focused on
//! logging setup and dispatch.

use std::path::PathBuf;

use clap::Parser;
use vrt_diff_core::ConfigOverrides;

use crate::commands::diff::DiffOptions;

/// Default directory for diff artifacts.
pub const DEFAULT_OUTPUT_DIR: &str = "tests/Visual/output";
/// Default location of the JSON config file.
pub const DEFAULT_CONFIG_PATH: &str = "tests/Visual/vrt_config.json";

/// vrt-diff - Visual regression diff engine for PNG screenshots
#[derive(Debug, Parser)]
#[command(name = "vrt-diff")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the accepted reference screenshots
    #[arg(long)]
    pub baseline_dir: PathBuf,

    /// Directory holding the freshly captured screenshots
    #[arg(long)]
    pub current_dir: PathBuf,

    /// Directory that receives diff_<name>.png artifacts for failures
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Maximum perceptual distance (0-100%) before a pixel counts as differing
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Maximum number of differing pixels an image may have and still pass
    #[arg(long)]
    pub max_failed_pixels: Option<u64>,

    /// Rows to crop from the top of both images, in logical (1x) pixels
    #[arg(long)]
    pub crop_top_px: Option<u32>,

    /// Path to the JSON config file (missing file means defaults)
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Output machine-readable JSON (no colored output)
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Convert parsed arguments into options for the diff command.
    pub fn into_options(self) -> DiffOptions {
        DiffOptions {
            baseline_dir: self.baseline_dir,
            current_dir: self.current_dir,
            output_dir: self.output_dir,
            config_path: self.config,
            overrides: ConfigOverrides {
                tolerance: self.tolerance,
                max_failed_pixels: self.max_failed_pixels,
                crop_top_px: self.crop_top_px,
            },
            json: self.json,
        }
    }
}
