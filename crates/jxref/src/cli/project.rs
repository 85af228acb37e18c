//! `jxref project` command implementation.

use colored::Colorize;
use jxref::render::{render_edges, OutputFormat};
use jxref::{Edge, Jxref};

use super::display::print_errors;

/// Run the project command.
pub fn run(jxref: &Jxref, format: OutputFormat) -> Result<(), jxref::Error> {
    let report = jxref.analyze_projects();

    let edges: Vec<Edge> = report
        .dependencies
        .edges()
        .map(|(project, dependency)| Edge::new(project, dependency))
        .collect();
    print!("{}", render_edges(&edges, format)?);

    eprintln!();
    eprintln!(
        "{} {} manifests, {} project dependencies",
        "Read".green().bold(),
        report.manifests_read,
        report.dependencies.edge_count()
    );
    eprintln!("{}: {:.2?}", "Duration".dimmed(), report.duration);
    print_errors(&report.errors);

    Ok(())
}
