use camino::Utf8Path;
use console::Style;

use crate::summary::RunSummary;

pub fn print_error(msg: &str) {
    let style = Style::new().red().bold();
    eprintln!("{} {}", style.apply_to("✗"), msg);
}

pub fn print_success(msg: &str) {
    let style = Style::new().green().bold();
    println!("{} {}", style.apply_to("✓"), msg);
}

pub fn print_run_summary(summary: &RunSummary, report: &Utf8Path) {
    let score_pct = summary.score() * 100.0;

    if summary.survived == 0 {
        print_success(&format!(
            "{} mutations written to {}, all detected ({:.1}%)",
            summary.total, report, score_pct,
        ));
        return;
    }

    let style = Style::new().yellow().bold();
    println!(
        "{} {} mutations written to {} ({} detected, {} survived, {:.1}% score)",
        style.apply_to("!"),
        summary.total,
        report,
        summary.detected,
        summary.survived,
        score_pct,
    );

    let dim = Style::new().dim();
    if summary.no_coverage > 0 {
        println!("  {} {} without test coverage", dim.apply_to("·"), summary.no_coverage);
    }
    if summary.timed_out > 0 {
        println!("  {} {} timed out", dim.apply_to("·"), summary.timed_out);
    }
}
