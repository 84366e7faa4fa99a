//! Startup banner, per-task result lines and the run summary.

use crate::consts::{AUTHOR, HOMEPAGE, REPO, format_number};
use crate::engine::{Outcome, SortReport};
use crate::sorters::SorterDescription;

/// Run configuration for display in the startup banner.
pub struct BannerInfo<'a> {
    pub mode: &'a str,
    pub algorithms: &'a [String],
    pub input_len: usize,
}

/// Print the startup banner with run info.
pub fn print_banner(info: &BannerInfo) {
    println!(
        r#"
   ╔═══════════════════════════════════════╗
   ║            S O R T K I T              ║
   ║   six ways to put numbers in order    ║
   ╚═══════════════════════════════════════╝

   version   {}
   by        {}
   home      {}
   repo      {}
   mode      {}
   sorters   {}
   input     {} values
"#,
        env!("CARGO_PKG_VERSION"),
        AUTHOR,
        HOMEPAGE,
        REPO,
        info.mode,
        info.algorithms.join(", "),
        format_number(info.input_len as u64),
    );
}

/// Aligned `name  description` rows for `--list`.
pub fn sorter_listing(sorters: &[SorterDescription]) -> String {
    if sorters.is_empty() {
        return "  (no sorters registered)\n".to_string();
    }
    let width = sorters.iter().map(|s| s.name.len()).max().unwrap_or(10);

    let mut out = String::new();
    for sorter in sorters {
        out.push_str(&format!("  {:<width$}  {}\n", sorter.name, sorter.description));
    }
    out
}

/// One result line, e.g. `merge sort: [1, 2, 3]`.
pub fn result_line(algorithm: &str, sorted: &[i64]) -> String {
    format!("{} sort: {:?}", algorithm, sorted)
}

/// Print the run summary: per-task timing and any failures.
pub fn print_summary(report: &SortReport) {
    println!();
    for result in &report.results {
        match &result.outcome {
            Outcome::Sorted(_) => println!(
                "  [{}] ✓ {} µs",
                result.algorithm,
                format_number(result.elapsed_us)
            ),
            Outcome::Failed(reason) => println!("  [{}] ✗ {}", result.algorithm, reason),
        }
    }
    println!(
        "sorted {} values with {} algorithm(s), {} failed.",
        format_number(report.input_len as u64),
        report.results.len(),
        report.failures().len(),
    );
}
