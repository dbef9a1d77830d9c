use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use powermap_core::extract::DEBUG_PREFIX;
use powermap_core::project::ProjectLayout;

use crate::canonicalize_or_current;
use crate::commands::copy_tree;

/// Skip raw third-party inputs and extraction debug artifacts.
fn excluded_from_dist(sources_dir: &Path, path: &Path) -> bool {
    if path == sources_dir {
        return true;
    }
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| name.starts_with(DEBUG_PREFIX))
}

/// Copy deployable files into `dist/`.
///
/// `dist/data` is rebuilt from scratch on every run; `dist/maps` is only
/// replaced when `maps/` has content.
pub fn dist_command(root: &str) -> Result<usize> {
    let root_path = canonicalize_or_current(root)?;
    let layout = ProjectLayout::new(&root_path);

    fs::create_dir_all(&layout.dist_dir)
        .with_context(|| format!("Failed to create dist dir: {}", layout.dist_dir.display()))?;

    let mut copied = 0;
    if layout.index_html_path.is_file() {
        let target = layout.dist_dir.join("index.html");
        fs::copy(&layout.index_html_path, &target)
            .with_context(|| format!("Failed to copy {}", layout.index_html_path.display()))?;
        copied += 1;
    }

    let dist_data = layout.dist_dir.join("data");
    if dist_data.exists() {
        fs::remove_dir_all(&dist_data)
            .with_context(|| format!("Failed to clean {}", dist_data.display()))?;
    }
    if layout.data_dir.is_dir() {
        let skip = |p: &Path| excluded_from_dist(&layout.sources_dir, p);
        copied += copy_tree(&layout.data_dir, &dist_data, &skip)?;
    }

    let maps_has_content = fs::read_dir(&layout.maps_dir)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false);
    if maps_has_content {
        let dist_maps = layout.dist_dir.join("maps");
        if dist_maps.exists() {
            fs::remove_dir_all(&dist_maps)
                .with_context(|| format!("Failed to clean {}", dist_maps.display()))?;
        }
        copied += copy_tree(&layout.maps_dir, &dist_maps, &|_: &Path| false)?;
    }

    println!("Built {} with {} files", layout.dist_dir.display(), copied);
    Ok(copied)
}
