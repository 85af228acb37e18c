//! `jxref hierarchy` command implementation.

use jxref::render::render_hierarchy;
use jxref::Jxref;

use super::display::print_source_summary;

/// Run the hierarchy command.
pub fn run(jxref: &Jxref) -> Result<(), jxref::Error> {
    let report = jxref.analyze_sources()?;

    print!("{}", render_hierarchy(report.graphs.catalog()));

    eprintln!();
    print_source_summary(&report);

    Ok(())
}
