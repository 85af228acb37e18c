//! `jxref comments` command implementation.

use std::path::Path;

use colored::Colorize;
use jxref::Jxref;

use super::display::print_source_summary;

/// Run the comments command.
pub fn run(jxref: &Jxref, out_dir: Option<&Path>) -> Result<(), jxref::Error> {
    let report = jxref.analyze_sources()?;

    match out_dir {
        Some(dir) => {
            let written = report.comments.write_files(dir)?;
            for path in &written {
                eprintln!("{} {}", "Wrote".green().bold(), path.display());
            }
        }
        None => print!("{}", report.comments.render()),
    }

    eprintln!();
    eprintln!(
        "{}: {} in {} source roots",
        "Comments".white().bold(),
        report.comments.count(),
        report.comments.roots().count()
    );
    print_source_summary(&report);

    Ok(())
}
