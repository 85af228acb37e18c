//! `jxref cycles` command implementation.

use colored::Colorize;
use jxref::graph::DependencyGraph;
use jxref::Jxref;

/// Run the cycles command.
pub fn run(jxref: &Jxref, json: bool) -> Result<(), jxref::Error> {
    let report = jxref.analyze_sources()?;

    let graph = DependencyGraph::from_edges(report.graphs.package_edges());
    let cycles = graph.detect_cycles();

    if json {
        println!("{}", serde_json::to_string_pretty(&cycles)?);
        return Ok(());
    }

    if cycles.is_empty() {
        println!("{}", "No circular package dependencies detected.".green());
        return Ok(());
    }

    println!(
        "Found {} circular package dependencies:",
        cycles.len().to_string().red().bold()
    );
    println!();

    for (i, cycle) in cycles.iter().enumerate() {
        println!("  {} {}:", "Cycle".yellow().bold(), i + 1);
        for package in &cycle.packages {
            println!("    {} {}", "•".dimmed(), package);
        }
    }

    Ok(())
}
