use anyhow::Result;

use crate::commands::{demographics_command, dist_command, extract_command};

/// Full build: extract, demographics (automatic source selection), dist.
pub fn build_command(root: &str) -> Result<()> {
    println!("=== Extract data from source document ===");
    extract_command(root, None)?;
    println!();
    println!("=== Constituency demographics ===");
    demographics_command(root, None, false)?;
    println!();
    println!("=== Building dist/ ===");
    dist_command(root)?;
    Ok(())
}
