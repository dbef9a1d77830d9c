use std::fs;

use anyhow::{Context, Result};
use powermap_core::project::{BuildConfig, BuildContext, ProjectLayout};
use serde::Serialize;

use crate::canonicalize_or_current;
use crate::commands::print_dir_status;

#[derive(Serialize)]
pub struct ProjectInfoSnapshot {
    pub root: String,
    pub config_file: Option<String>,
    pub source_document: String,
    pub source_document_present: bool,
    pub layout: ProjectInfoLayout,
    pub config: BuildConfig,
}

#[derive(Serialize)]
pub struct ProjectInfoLayout {
    pub data_dir: String,
    pub sources_dir: String,
    pub issues_dir: String,
    pub maps_dir: String,
    pub dist_dir: String,
    pub demographics_path: String,
    pub default_workbook_path: String,
}

/// Initialize a power map project at `root`.
pub fn init_command(root: &str) -> Result<()> {
    let root_path = canonicalize_or_current(root)?;
    let layout = ProjectLayout::new(&root_path);

    // Ensure directories exist.
    for dir in layout.directories() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }

    // Write a default config unless one is already present.
    let wrote_config = if layout.config_json_path.exists() || layout.config_yaml_path.exists() {
        false
    } else {
        let json = serde_json::to_string_pretty(&BuildConfig::default())?;
        fs::write(&layout.config_json_path, json).with_context(|| {
            format!("Failed to write build config: {}", layout.config_json_path.display())
        })?;
        true
    };

    println!("Initialized power map project:");
    println!("  Root: {}", layout.root.display());
    if wrote_config {
        println!("  Config: {}", layout.config_json_path.display());
    } else {
        println!("  Config: (existing config kept)");
    }
    println!("  Data dir: {}", layout.data_dir.display());
    println!("  Sources dir: {}", layout.sources_dir.display());
    println!("  Issues dir: {}", layout.issues_dir.display());
    println!("  Maps dir: {}", layout.maps_dir.display());
    println!("  Dist dir: {}", layout.dist_dir.display());

    Ok(())
}

/// Show layout and effective configuration for a project.
pub fn info_command(root: &str, json: bool) -> Result<()> {
    let root_path = canonicalize_or_current(root)?;
    let ctx = BuildContext::from_root(&root_path)?;
    let layout = &ctx.layout;

    let config_file = [&layout.config_json_path, &layout.config_yaml_path]
        .into_iter()
        .find(|p| p.is_file())
        .map(|p| p.display().to_string());
    let source_path = ctx.source_document_path();

    if json {
        let snapshot = ProjectInfoSnapshot {
            root: layout.root.display().to_string(),
            config_file,
            source_document: source_path.display().to_string(),
            source_document_present: source_path.is_file(),
            layout: ProjectInfoLayout {
                data_dir: layout.data_dir.display().to_string(),
                sources_dir: layout.sources_dir.display().to_string(),
                issues_dir: layout.issues_dir.display().to_string(),
                maps_dir: layout.maps_dir.display().to_string(),
                dist_dir: layout.dist_dir.display().to_string(),
                demographics_path: layout.demographics_path.display().to_string(),
                default_workbook_path: layout.default_workbook_path.display().to_string(),
            },
            config: ctx.config.clone(),
        };
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    println!("Power Map Project Info");
    println!("======================");
    println!("Root: {}", layout.root.display());
    println!("Config file: {}", config_file.as_deref().unwrap_or("(defaults)"));
    println!(
        "Source document: {} ({})",
        source_path.display(),
        if source_path.is_file() { "present" } else { "missing" }
    );
    println!("Fuzzy threshold: {:.2}", ctx.config.fuzzy_threshold);
    println!("Literals:");
    for target in &ctx.config.literals {
        println!("  - {} -> {}", target.name, target.file_name());
    }
    println!();

    println!("Directories:");
    print_dir_status("Data dir", &layout.data_dir);
    print_dir_status("Sources dir", &layout.sources_dir);
    print_dir_status("Issues dir", &layout.issues_dir);
    print_dir_status("Maps dir", &layout.maps_dir);
    print_dir_status("Dist dir", &layout.dist_dir);

    Ok(())
}
