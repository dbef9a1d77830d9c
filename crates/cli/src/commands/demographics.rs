use anyhow::{Context, Result};
use powermap_core::demographics::{
    build_output, load_source, validate_against_roster, DemographicsDocument,
    DemographicsSummary, SourceSelection, ValidationReport,
};
use powermap_core::extract::write_json;
use powermap_core::project::{load_roster, BuildContext};
use tracing::warn;

use crate::{canonicalize_or_current, format_pct};

/// Build `data/constituency-demographics.json`.
///
/// Source precedence: `--excel` path, then `--manual`, then the default
/// workbook under `data/sources/` if present, then the manual table.
pub fn demographics_command(
    root: &str,
    excel: Option<&str>,
    manual: bool,
) -> Result<DemographicsDocument> {
    let root_path = canonicalize_or_current(root)?;
    let ctx = BuildContext::from_root(&root_path)?;
    let layout = &ctx.layout;

    let explicit = excel.map(|p| layout.resolve(p));
    let selection = SourceSelection::resolve(
        explicit.as_deref(),
        manual,
        &layout.default_workbook_path,
    );
    match &selection {
        SourceSelection::Tabular { path, auto_detected } => println!(
            "Demographics source: workbook {}{}",
            path.display(),
            if *auto_detected { " (auto-detected)" } else { "" }
        ),
        SourceSelection::Manual => println!("Demographics source: manual constituency table"),
    }

    let constituencies =
        load_source(&selection).context("Failed to load constituency demographics")?;
    if constituencies.is_empty() {
        warn!("demographics source produced no constituencies");
    }
    println!("Loaded {} constituencies", constituencies.len());

    let roster_path = ctx.roster_path()?;
    let roster = load_roster(&roster_path)?;

    let report = validate_against_roster(&constituencies, &roster, ctx.config.fuzzy_threshold);
    print_validation(&report);

    let document = build_output(constituencies, &roster, &ctx.config.demographics);
    write_json(&layout.demographics_path, &document)?;

    println!();
    println!("Saved to {}", layout.demographics_path.display());
    print_summary(&DemographicsSummary::from_document(&document));

    Ok(document)
}

fn print_validation(report: &ValidationReport) {
    println!();
    println!("=== Validation against roster ===");
    println!("  Minister constituencies: {}", report.roster_constituencies);
    println!("  Demographics entries: {}", report.demographics_entries);
    println!("  Exact matches: {}", report.exact.len());
    println!("  Unmatched: {}", report.missing.len());

    if !report.fuzzy.is_empty() {
        println!("  Fuzzy matches found: {}", report.fuzzy.len());
        for link in &report.fuzzy {
            println!(
                "    '{}' -> '{}' (score: {:.2})",
                link.roster_name, link.candidate, link.score
            );
        }
    }
    if !report.missing.is_empty() {
        println!("  Still missing ({}):", report.missing.len());
        for miss in &report.missing {
            println!("    - {} (best score: {:.2})", miss.roster_name, miss.best_score);
        }
    }
}

fn print_summary(summary: &DemographicsSummary) {
    println!("  {} constituencies", summary.constituencies);
    println!("  With minister links: {}", summary.with_ministers);
    println!("  Avg non-White %: {}", format_pct(summary.average_nonwhite));
    if let Some((name, pct)) = &summary.most_diverse {
        println!("  Most diverse: {} ({})", name, format_pct(*pct));
    }
    if let Some((name, pct)) = &summary.least_diverse {
        println!("  Least diverse: {} ({})", name, format_pct(*pct));
    }
}

