//! `jxref extensions` command implementation.

use colored::Colorize;
use jxref::Jxref;

const SEPARATOR: &str = "+---------------------------------+";

/// Run the extensions command.
pub fn run(jxref: &Jxref) {
    let stats = jxref.extension_stats();
    let top = jxref.config().top_extensions;

    println!("{}", "File extensions:".cyan().bold());
    for (extension, count) in stats.top_by_count(top) {
        println!("{extension}: {count}");
    }
    println!("{SEPARATOR}");

    println!("{}", "File extension ratios:".cyan().bold());
    for (extension, ratio) in stats.top_by_ratio(top) {
        println!("{extension}: {ratio:.2}%");
    }
    println!("{SEPARATOR}");

    eprintln!("{}: {} files", "Counted".dimmed(), stats.total());
}
