//! Project layout, build configuration, and helpers for reading the
//! documents earlier phases published.

mod config;
mod context;
mod layout;
mod util;

pub use config::{default_targets, BuildConfig, ConfigError};
pub use context::BuildContext;
pub use layout::ProjectLayout;
pub use util::{load_build_config, load_departments, load_roster};
