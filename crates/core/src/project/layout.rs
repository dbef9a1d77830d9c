use std::path::{Path, PathBuf};

/// Logical layout of a power map project on disk.
///
/// This is derived from a chosen root path. It does *not* perform any IO itself.
/// The CLI or other frontends are responsible for actually creating directories
/// and files based on this layout.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    /// Root directory of the project.
    pub root: PathBuf,
    /// Directory holding every generated JSON document (data).
    pub data_dir: PathBuf,
    /// Directory for downloaded third-party inputs (data/sources).
    pub sources_dir: PathBuf,
    /// Directory for per-issue badge data (data/issues).
    pub issues_dir: PathBuf,
    /// Directory for rendered map images (maps).
    pub maps_dir: PathBuf,
    /// Deployable output (dist).
    pub dist_dir: PathBuf,
    /// Front-end entry point copied into dist when present (index.html).
    pub index_html_path: PathBuf,
    /// Optional JSON build config (powermap.json).
    pub config_json_path: PathBuf,
    /// Optional YAML build config (powermap.yaml).
    pub config_yaml_path: PathBuf,
    /// Default location of the Commons Library ethnicity workbook.
    pub default_workbook_path: PathBuf,
    /// Published demographics document.
    pub demographics_path: PathBuf,
}

impl ProjectLayout {
    /// Compute the default layout for a project rooted at `root`.
    ///
    /// This does *not* touch the filesystem.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        let data_dir = root.join("data");
        let sources_dir = data_dir.join("sources");
        let issues_dir = data_dir.join("issues");
        let maps_dir = root.join("maps");
        let dist_dir = root.join("dist");
        let index_html_path = root.join("index.html");
        let config_json_path = root.join("powermap.json");
        let config_yaml_path = root.join("powermap.yaml");
        let default_workbook_path = sources_dir.join("constituency-ethnicity.xlsx");
        let demographics_path = data_dir.join("constituency-demographics.json");

        Self {
            root,
            data_dir,
            sources_dir,
            issues_dir,
            maps_dir,
            dist_dir,
            index_html_path,
            config_json_path,
            config_yaml_path,
            default_workbook_path,
            demographics_path,
        }
    }

    /// Directories `init` creates.
    pub fn directories(&self) -> [&Path; 5] {
        [&self.data_dir, &self.sources_dir, &self.issues_dir, &self.maps_dir, &self.dist_dir]
    }

    /// Resolve a path from config: absolute paths pass through, relative ones
    /// are taken from the project root.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Path of an extracted document inside `data/`.
    pub fn data_file(&self, file_name: &str) -> PathBuf {
        self.data_dir.join(file_name)
    }
}
