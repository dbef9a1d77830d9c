use std::fs;

use anyhow::{anyhow, Context, Result};
use powermap_core::extract::{describe_document, extract_all, script_body, ExtractionBatch};
use powermap_core::integrity::{check_referential_integrity, IntegrityReport};
use powermap_core::model::{departments_from_value, roster_from_value};
use powermap_core::project::{load_departments, load_roster, BuildContext};
use tracing::warn;

use crate::canonicalize_or_current;
use crate::commands::print_integrity;

/// Extract every configured literal from the source document into `data/`,
/// then cross-check the roster against the department roles.
pub fn extract_command(root: &str, source: Option<&str>) -> Result<ExtractionBatch> {
    let root_path = canonicalize_or_current(root)?;
    let ctx = BuildContext::from_root(&root_path)?;

    let source_path = match source {
        Some(s) => ctx.layout.resolve(s),
        None => ctx.source_document_path(),
    };
    if !source_path.is_file() {
        return Err(anyhow!("Source document does not exist: {}", source_path.display()));
    }
    let document = fs::read_to_string(&source_path)
        .with_context(|| format!("Failed to read source document {}", source_path.display()))?;
    let body = script_body(&document);

    println!("Extracting data from {}...", source_path.display());
    let batch = extract_all(&ctx.config.literals, body, &ctx.layout.data_dir)?;

    for target in &ctx.config.literals {
        match batch.get(&target.name) {
            Some(doc) => {
                println!("  {} -> {}: {}", target.name, target.file_name(), describe_document(doc))
            }
            None => println!("  {} -> FAILED", target.name),
        }
    }
    for path in &batch.debug_artifacts {
        println!("  Debug artifact: {}", path.display());
    }
    println!(
        "Extracted {}/{} literals into {}",
        batch.succeeded(),
        batch.documents.len(),
        ctx.layout.data_dir.display()
    );

    if let Some(report) = integrity_from_batch(&ctx, &batch) {
        println!();
        print_integrity(&report);
    }

    Ok(batch)
}

/// Run the integrity check on freshly extracted documents, when both are present
/// and have the expected shape.
fn integrity_from_batch(ctx: &BuildContext, batch: &ExtractionBatch) -> Option<IntegrityReport> {
    let roster_value = batch.get(&ctx.config.roster_literal)?.clone();
    let departments_value = batch.get(&ctx.config.departments_literal)?.clone();

    let roster = match roster_from_value(roster_value) {
        Ok(r) => r,
        Err(err) => {
            warn!(literal = %ctx.config.roster_literal, "roster has an unexpected shape: {err}");
            return None;
        }
    };
    let departments = match departments_from_value(departments_value) {
        Ok(d) => d,
        Err(err) => {
            warn!(
                literal = %ctx.config.departments_literal,
                "departments have an unexpected shape: {err}"
            );
            return None;
        }
    };
    Some(check_referential_integrity(&roster, &departments))
}

/// Cross-check already extracted roster and departments files.
pub fn check_command(root: &str) -> Result<IntegrityReport> {
    let root_path = canonicalize_or_current(root)?;
    let ctx = BuildContext::from_root(&root_path)?;

    let roster = load_roster(&ctx.roster_path()?)?;
    let departments = load_departments(&ctx.departments_path()?)?;
    let report = check_referential_integrity(&roster, &departments);
    print_integrity(&report);
    Ok(report)
}
