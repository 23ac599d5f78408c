use std::io::{self, Write};

use colored::Colorize;
use log::debug;

use crate::types::{FileReport, FileStatus, RunResult};

pub fn print_nothing_to_do_message<W: Write>(writer: &mut W) -> io::Result<()> {
    debug!("Nothing to rewrite");
    writeln!(writer, "{} No lodash imports to optimize.", "✓".green().bold())?;
    writer.flush()?;
    Ok(())
}

/// Prints every notable file with its warnings, followed by a summary.
pub fn print_report<W: Write>(writer: &mut W, result: &RunResult) -> io::Result<()> {
    debug!("Printing report for {} files", result.files.len());

    for file in &result.files {
        print_file(writer, file, result.written)?;
    }

    print_summary(writer, result)?;
    writer.flush()?;
    Ok(())
}

fn print_file<W: Write>(writer: &mut W, file: &FileReport, written: bool) -> io::Result<()> {
    let label = match file.status {
        FileStatus::Changed if written => "rewritten".green().bold(),
        FileStatus::Changed => "would rewrite".yellow().bold(),
        FileStatus::Failed => "failed".red().bold(),
        FileStatus::Unchanged => "unchanged".dimmed(),
    };
    writeln!(writer, "{} ({})", file.path.blue(), label)?;

    let mut lines: Vec<String> = Vec::new();
    if let Some(error) = &file.error {
        lines.extend(error.lines().map(|l| l.red().to_string()));
    }
    lines.extend(file.warnings.iter().map(|w| format!("{} {}", "⚠".yellow(), single_line(w))));

    for (idx, line) in lines.iter().enumerate() {
        let prefix = if idx == lines.len() - 1 { "└──" } else { "├──" };
        writeln!(writer, "{}  {}", prefix.dimmed(), line)?;
    }
    writeln!(writer)?;
    Ok(())
}

fn print_summary<W: Write>(writer: &mut W, result: &RunResult) -> io::Result<()> {
    let changed = result.changed_count().to_string();
    writeln!(writer, "{}", "─".repeat(60).dimmed())?;
    writeln!(writer, "{}", "Summary".bold())?;
    if result.written {
        writeln!(writer, "  Files rewritten: {}", changed.green().bold())?;
    } else {
        writeln!(writer, "  Files to rewrite: {}", changed.yellow().bold())?;
    }
    writeln!(writer, "  Imports left as is: {}", result.warning_count().to_string().yellow())?;
    if result.failed_count() > 0 {
        writeln!(writer, "  Failed files: {}", result.failed_count().to_string().red().bold())?;
    }
    if !result.written && result.changed_count() > 0 {
        writeln!(writer, "  Run again with {} to apply the changes.", "--write".cyan())?;
    }
    Ok(())
}

/// Writes `result` as pretty-printed JSON.
pub fn print_json<W: Write>(writer: &mut W, result: &RunResult) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, result)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
