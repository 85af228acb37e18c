//! Text renderings of edge lists and the entity hierarchy.

use std::fmt::Write as _;

use clap::ValueEnum;

use crate::catalog::EntityCatalog;
use crate::error::Result;
use crate::graph::DependencyGraph;
use crate::types::Edge;

/// Output format of graph-producing commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `from -> to` line per edge
    #[default]
    Text,
    /// `PlantUML` component diagram
    Plantuml,
    /// Graphviz DOT
    Dot,
    /// JSON array of `{from, to}` objects
    Json,
}

/// Render an edge list.
///
/// # Errors
///
/// Returns `Error::Json` if JSON serialization fails.
pub fn render_edges(edges: &[Edge], format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Text => edges
            .iter()
            .map(|edge| format!("{} -> {}\n", edge.from, edge.to))
            .collect(),
        OutputFormat::Plantuml => {
            let mut out = String::from("@startuml\n");
            for edge in edges {
                let _ = writeln!(out, "[{}] --> [{}]", edge.from, edge.to);
            }
            out.push_str("@enduml\n");
            out
        }
        OutputFormat::Dot => {
            DependencyGraph::from_edges(edges.iter().map(|e| (e.from.as_str(), e.to.as_str())))
                .to_dot()
        }
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(edges)?;
            json.push('\n');
            json
        }
    };
    Ok(rendered)
}

/// Render the project → package → class tree of a catalog.
#[must_use]
pub fn render_hierarchy(catalog: &EntityCatalog) -> String {
    let mut out = String::new();
    for project in catalog.projects() {
        let _ = writeln!(out, "{project}");
        for package in catalog.packages_of(project) {
            let _ = writeln!(out, "  {package}");
            for class in catalog.classes_in(package) {
                let _ = writeln!(out, "    {class}");
            }
        }
    }
    out
}
