use std::io::{self, Write};

use colored::Colorize;
use log::debug;

use crate::scan::ScanResult;

pub fn print_no_dependencies_message<W: Write>(writer: &mut W, files: usize) -> io::Result<()> {
    debug!("No dependencies detected");
    writeln!(
        writer,
        "{} No library usage detected in {} files.",
        "⚠".yellow().bold(),
        files.to_string().cyan()
    )?;
    writer.flush()?;
    Ok(())
}

/// Prints a short summary of a scan; `list` also prints every name.
pub fn print_scan_summary<W: Write>(writer: &mut W, result: &ScanResult, list: bool) -> io::Result<()> {
    debug!("Printing scan summary for {} dependencies", result.dependencies.len());

    if result.dependencies.is_empty() {
        return print_no_dependencies_message(writer, result.files_analyzed);
    }

    writeln!(
        writer,
        "{} {} dependencies from {} of {} files",
        "✓".green().bold(),
        result.dependencies.len().to_string().green().bold(),
        result.files_matched.to_string().cyan(),
        result.files_analyzed.to_string().cyan()
    )?;

    if list {
        for (idx, dep) in result.dependencies.iter().enumerate() {
            let is_last = idx == result.dependencies.len() - 1;
            let prefix = if is_last { "└──" } else { "├──" };
            writeln!(writer, "{}  {}", prefix.dimmed(), dep)?;
        }
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(result: &ScanResult, list: bool) -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        print_scan_summary(&mut out, result, list).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_summary_lists_tree() {
        let result = ScanResult {
            dependencies: vec!["Scene".to_string(), "Mesh".to_string()],
            files_analyzed: 4,
            files_matched: 2,
        };
        let out = render(&result, true);
        assert!(out.contains("2 dependencies from 2 of 4 files"));
        assert!(out.contains("├──  Scene"));
        assert!(out.contains("└──  Mesh"));
    }

    #[test]
    fn test_summary_without_list() {
        let result =
            ScanResult { dependencies: vec!["Scene".to_string()], files_analyzed: 1, files_matched: 1 };
        let out = render(&result, false);
        assert!(!out.contains("Scene"));
    }

    #[test]
    fn test_empty_result() {
        let result = ScanResult { dependencies: Vec::new(), files_analyzed: 3, files_matched: 0 };
        let out = render(&result, true);
        assert!(out.contains("No library usage detected in 3 files."));
    }
}
