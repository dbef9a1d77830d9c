use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use powermap_core::integrity::IntegrityReport;

use crate::format_pct;

/// Helper to print whether a directory exists.
pub fn print_dir_status(label: &str, path: &Path) {
    let exists = path.is_dir();
    println!("- {label}: {} ({})", if exists { "OK" } else { "MISSING" }, path.display());
}

/// Recursively copy `src` into `dst`, skipping entries for which `skip`
/// returns true. Returns the number of files copied.
pub fn copy_tree(src: &Path, dst: &Path, skip: &dyn Fn(&Path) -> bool) -> Result<usize> {
    fs::create_dir_all(dst).with_context(|| format!("Failed to create {}", dst.display()))?;
    let mut copied = 0;
    for entry in fs::read_dir(src).with_context(|| format!("Failed to read {}", src.display()))? {
        let entry = entry?;
        let path = entry.path();
        if skip(&path) {
            continue;
        }
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copied += copy_tree(&path, &target, skip)?;
        } else {
            fs::copy(&path, &target).with_context(|| {
                format!("Failed to copy {} to {}", path.display(), target.display())
            })?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Print the roster / department cross-reference.
pub fn print_integrity(report: &IntegrityReport) {
    println!("Roster integrity:");
    println!("  Ministers referenced by departments: {}", report.referenced);
    if report.missing.is_empty() {
        println!("  Missing from roster: none");
    } else {
        println!("  WARNING: {} ministers not in roster:", report.missing.len());
        for name in &report.missing {
            println!("    - {name}");
        }
    }
    println!(
        "  Ministers with parlId: {}/{} ({})",
        report.with_identifier,
        report.roster_size,
        format_pct(report.coverage * 100.0)
    );
}
