//! PNG discovery in the baseline and current directories.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase() == "png")
        .unwrap_or(false)
}

/// Regular files and symlinks not pointing at a directory. A dangling
/// symlink is kept so it surfaces as a load error.
fn is_file_entry(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && !entry.path().is_dir())
}

/// PNG entries directly inside `dir` (no recursion), sorted by path.
///
/// A missing or unreadable directory yields an empty list.
pub fn list_pngs(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("skipping unreadable entry in {}: {}", dir.display(), e);
                None
            }
        })
        .filter(is_file_entry)
        .map(|e| e.into_path())
        .filter(|p| is_png(p))
        .collect();

    // Sort for deterministic output
    files.sort();
    files
}

/// File name of a discovered image.
pub fn image_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Names of baseline PNGs with no same-named entry in `current_dir`.
///
/// Any entry counts, including a dangling symlink.
pub fn orphan_baselines(baseline_dir: &Path, current_dir: &Path) -> Vec<String> {
    let orphans: BTreeSet<String> = list_pngs(baseline_dir)
        .iter()
        .map(|p| image_name(p))
        .filter(|name| fs::symlink_metadata(current_dir.join(name)).is_err())
        .collect();
    orphans.into_iter().collect()
}
