use anyhow::{Context, Result};
use colored::*;
use gentree_core::GenerationReport;
use std::io::{self, Write};

pub fn print_generation_summary(report: &GenerationReport, quiet: bool) {
    if quiet {
        return;
    }
    println!(
        "{} Tree saved to {} ({} entries)",
        "✅".green(),
        report.tree_file.display().to_string().blue(),
        report.entry_count
    );
    println!(
        "{} Comments JSON saved to {} ({} comments)",
        "✅".green(),
        report.comments_file.display().to_string().blue(),
        report.comment_count
    );
    println!(
        "{} Mermaid saved to {}",
        "✅".green(),
        report.mermaid_file.display().to_string().blue()
    );
}

pub fn write_to_stdout(content: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(content.as_bytes())
        .context("Failed to write to stdout")?;
    if !content.ends_with('\n') {
        handle
            .write_all(b"\n")
            .context("Failed to write newline to stdout")?;
    }
    handle.flush().context("Failed to flush stdout")?;
    Ok(())
}
