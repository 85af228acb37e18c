//! Common display utilities for CLI commands.
//!
//! Summaries go to stderr so that stdout carries only the rendered graph.

use colored::Colorize;
use jxref::{ScanError, SourceReport};

const MAX_DISPLAY_ITEMS: usize = 5;

/// Print the outcome of a source analysis.
pub fn print_source_summary(report: &SourceReport) {
    let stats = report.graphs.stats();
    let catalog = report.graphs.catalog();

    eprintln!(
        "{} {} source roots: {} classes in {} packages",
        "Analyzed".green().bold(),
        report.roots_analyzed.len(),
        catalog.class_count(),
        catalog.package_count()
    );
    eprintln!(
        "{}: {} class edges, {} package edges",
        "Graphs".white().bold(),
        report.graphs.recorder().class_edge_count(),
        report.graphs.recorder().package_edge_count()
    );
    eprintln!(
        "{}: {} of {} usage sites ({:.1}%), {} by import heuristic",
        "Resolved".white().bold(),
        stats.resolved_sites(),
        stats.usage_sites,
        stats.resolution_rate() * 100.0,
        stats.heuristic_resolved
    );
    eprintln!("{}: {:.2?}", "Duration".dimmed(), report.duration);

    if !report.roots_skipped.is_empty() {
        eprintln!(
            "{}: {} source roots (tests, benchmarks)",
            "Skipped".yellow(),
            report.roots_skipped.len()
        );
    }

    if !report.directories_skipped.is_empty() {
        eprintln!(
            "{}: {} directories (unreadable)",
            "Skipped".yellow(),
            report.directories_skipped.len()
        );
    }

    print_errors(&report.errors);
}

/// Print file-level errors with truncation.
pub fn print_errors(errors: &[ScanError]) {
    if errors.is_empty() {
        return;
    }

    eprintln!();
    eprintln!("{} ({}):", "Errors".red().bold(), errors.len());
    for err in errors.iter().take(MAX_DISPLAY_ITEMS) {
        eprintln!("  {} {}: {}", "•".red(), err.path.display(), err.message);
    }
    if errors.len() > MAX_DISPLAY_ITEMS {
        eprintln!("  ... and {} more", errors.len() - MAX_DISPLAY_ITEMS);
    }
}
