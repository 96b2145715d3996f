//! Visual regression diff command implementation
//!
//! Compares every PNG in the current directory against the same-named PNG in
//! the baseline directory and reports a verdict per image. Baselines without
//! a current capture are reported as orphans and never fail the run.

mod discovery;
mod types;

pub use discovery::{image_name, list_pngs, orphan_baselines};
pub use types::{DiffFileResult, DiffOutput, DiffSummary, DirectoryReport};

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use vrt_diff_core::{
    compare_pair, resolve, ConfigError, ConfigFile, ConfigOverrides, DiffConfig, ImageReport,
    ResolvedConfig,
};

use crate::json_output::{error_codes, JsonError};

/// Inputs of the diff command.
#[derive(Debug, Clone)]
pub struct DiffOptions {
    pub baseline_dir: PathBuf,
    pub current_dir: PathBuf,
    pub output_dir: PathBuf,
    pub config_path: PathBuf,
    pub overrides: ConfigOverrides,
    pub json: bool,
}

/// Run the diff command.
///
/// # Returns
/// Exit code: 0 if every current image passes, 1 otherwise
pub fn run(options: &DiffOptions) -> Result<ExitCode> {
    let resolved = match load_config(&options.config_path, &options.overrides) {
        Ok(resolved) => resolved,
        Err(e) => {
            let error = config_error_to_json(&e, &options.config_path);
            return fail_fatal(options.json, error, e.into());
        }
    };

    if !options.json {
        print_config(&resolved);
    }

    // Created up front, even if no artifact ends up being written
    if let Err(e) = fs::create_dir_all(&options.output_dir) {
        let message = format!(
            "Failed to create output directory {}: {}",
            options.output_dir.display(),
            e
        );
        let error = JsonError::new(error_codes::OUTPUT_DIR, &message)
            .with_file(options.output_dir.display().to_string());
        return fail_fatal(options.json, error, anyhow::Error::new(e).context(message));
    }

    if !options.current_dir.is_dir() {
        let message = format!(
            "Current path is not a directory: {}",
            options.current_dir.display()
        );
        let error = JsonError::new(error_codes::CURRENT_DIR, &message)
            .with_file(options.current_dir.display().to_string());
        return fail_fatal(options.json, error, anyhow::anyhow!(message));
    }

    let report = compare_directories(
        &options.baseline_dir,
        &options.current_dir,
        &options.output_dir,
        &resolved.config,
    );

    if options.json {
        let output = DiffOutput::from_report(&report, resolved.config);
        let json = serde_json::to_string_pretty(&output).context("Failed to serialize report")?;
        println!("{}", json);
    } else {
        print_results(&report);
    }

    if report.passed() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

/// Load the config file and apply command-line overrides.
pub fn load_config(
    config_path: &Path,
    overrides: &ConfigOverrides,
) -> Result<ResolvedConfig, ConfigError> {
    let file = ConfigFile::load(config_path)?;
    resolve(overrides, &file)
}

/// Compare every current PNG against its baseline, then collect orphans.
pub fn compare_directories(
    baseline_dir: &Path,
    current_dir: &Path,
    output_dir: &Path,
    config: &DiffConfig,
) -> DirectoryReport {
    let current_images = list_pngs(current_dir);
    log::debug!(
        "comparing {} images from {} against {}",
        current_images.len(),
        current_dir.display(),
        baseline_dir.display()
    );

    let reports = current_images
        .iter()
        .map(|current_path| {
            let baseline_path = baseline_dir.join(image_name(current_path));
            compare_pair(&baseline_path, current_path, output_dir, config)
        })
        .collect();

    DirectoryReport {
        reports,
        orphans: orphan_baselines(baseline_dir, current_dir),
    }
}

fn config_error_to_json(error: &ConfigError, config_path: &Path) -> JsonError {
    let code = match error {
        ConfigError::Read { .. } => error_codes::CONFIG_READ,
        ConfigError::Parse { .. } => error_codes::CONFIG_PARSE,
        ConfigError::InvalidTolerance(_) => error_codes::CONFIG_INVALID,
    };
    JsonError::new(code, error.to_string()).with_file(config_path.display().to_string())
}

/// Report a fatal error: as a JSON document in JSON mode, otherwise as an
/// error for `main` to print.
fn fail_fatal(json: bool, error: JsonError, cause: anyhow::Error) -> Result<ExitCode> {
    if !json {
        return Err(cause);
    }
    let output = DiffOutput::failure(vec![error]);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(ExitCode::from(1))
}

fn print_config(resolved: &ResolvedConfig) {
    let config = &resolved.config;
    println!(
        "Using tolerance: {:?}% (from {})",
        config.tolerance, resolved.tolerance_source
    );
    println!(
        "Using max_failed_pixels: {} (from {})",
        config.max_failed_pixels, resolved.max_failed_pixels_source
    );
    if config.crop_top_px > 0 {
        println!(
            "Cropping top {}px logical (window chrome exclusion)",
            config.crop_top_px
        );
    }
}

fn print_image_report(report: &ImageReport) {
    let status = if report.passed() {
        "PASS".green()
    } else {
        "FAIL".red().bold()
    };
    println!("{}  {} ({})", status, report.name, report.verdict);
}

/// Print human-readable results.
fn print_results(report: &DirectoryReport) {
    for image in &report.reports {
        print_image_report(image);
    }

    for orphan in &report.orphans {
        println!(
            "{}  Orphan baseline: {} (no matching current image)",
            "WARN".yellow(),
            orphan
        );
    }

    if !report.passed() {
        println!(
            "\nFailing components: {}",
            report.failing_names().join(", ")
        );
    }
}
