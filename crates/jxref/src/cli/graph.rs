//! `jxref class` and `jxref package` command implementation.

use colored::Colorize;
use jxref::render::{render_edges, OutputFormat};
use jxref::Jxref;

use super::display::print_source_summary;

/// Granularity of the printed reference graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    /// Class → class edges
    Class,
    /// Package → package edges
    Package,
}

/// Run the class or package command.
pub fn run(
    jxref: &Jxref,
    granularity: Granularity,
    format: OutputFormat,
) -> Result<(), jxref::Error> {
    eprintln!(
        "{} {}...",
        "Analyzing".cyan().bold(),
        jxref.repo_root().display()
    );

    let report = jxref.analyze_sources()?;

    let edges = match granularity {
        Granularity::Class => report.graphs.class_edge_list(),
        Granularity::Package => report.graphs.package_edge_list(),
    };
    print!("{}", render_edges(&edges, format)?);

    eprintln!();
    print_source_summary(&report);

    Ok(())
}
