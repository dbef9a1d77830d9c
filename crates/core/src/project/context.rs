use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};

use crate::project::{load_build_config, BuildConfig, ProjectLayout};

/// Convenience wrapper bundling layout and effective build config.
#[derive(Debug, Clone)]
pub struct BuildContext {
    pub layout: ProjectLayout,
    pub config: BuildConfig,
}

impl BuildContext {
    /// Load the build config (or defaults) for a given root.
    pub fn from_root(root: impl AsRef<Path>) -> Result<Self> {
        let layout = ProjectLayout::new(root);
        let config = load_build_config(&layout)?;
        Ok(Self { layout, config })
    }

    /// Absolute path of the configured source document.
    pub fn source_document_path(&self) -> PathBuf {
        self.layout.resolve(&self.config.source_document)
    }

    /// Where the roster literal is published.
    pub fn roster_path(&self) -> Result<PathBuf> {
        let target = self.config.roster_target().ok_or_else(|| {
            anyhow!("Roster literal '{}' is not configured", self.config.roster_literal)
        })?;
        Ok(self.layout.data_file(&target.file_name()))
    }

    /// Where the departments literal is published.
    pub fn departments_path(&self) -> Result<PathBuf> {
        let target = self.config.departments_target().ok_or_else(|| {
            anyhow!("Departments literal '{}' is not configured", self.config.departments_literal)
        })?;
        Ok(self.layout.data_file(&target.file_name()))
    }
}
