//! vrt-diff CLI library.
//!
//! This crate provides the command-line surface of the visual regression
//! diff engine: argument definitions, PNG discovery across the baseline and
//! current directories, and human-readable or JSON reporting.

pub mod cli_args;
pub mod commands;
pub mod json_output;
