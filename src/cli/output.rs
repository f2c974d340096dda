use crate::analyzer::SourceAnalysis;
use crate::SplitOutcome;
use colored::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

pub fn print_stage(message: &str, path: &Path, colored_output: bool) {
    if colored_output {
        println!(
            "{} {}",
            message.cyan().bold(),
            path.display().to_string().dimmed()
        );
    } else {
        println!("{} {}", message, path.display());
    }
}

pub fn print_created_dir(path: &Path, colored_output: bool) {
    if colored_output {
        println!("  created {}", format!("{}/", path.display()).dimmed());
    } else {
        println!("  created {}/", path.display());
    }
}

pub fn print_generated_file(path: &Path, colored_output: bool) {
    if colored_output {
        println!("  generated {}", path.display().to_string().dimmed());
    } else {
        println!("  generated {}", path.display());
    }
}

/// One warning line per loss the analysis recorded, all to stderr so they
/// never mix into a machine-readable stdout.
pub fn print_analysis_warnings(analysis: &SourceAnalysis) {
    for name in &analysis.duplicate_names {
        eprintln!(
            "Warning: Duplicate function name '{}', keeping the last definition",
            name
        );
    }

    if analysis.truncated_count > 0 {
        let word = if analysis.truncated_count == 1 {
            "function"
        } else {
            "functions"
        };
        eprintln!(
            "Warning: {} {} dropped, body never closes before end of file",
            analysis.truncated_count, word
        );
    }

    if !analysis.types.is_empty() {
        let word = if analysis.types.len() == 1 {
            "type definition"
        } else {
            "type definitions"
        };
        eprintln!(
            "Warning: {} {} detected but not migrated",
            analysis.types.len(),
            word
        );
    }
}

pub fn print_unrouted_warning(count: usize) {
    let word = if count == 1 { "function" } else { "functions" };
    eprintln!(
        "Warning: {} {} matched no destination file and will not appear in the output",
        count, word
    );
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonSummary {
    source: String,
    target: String,
    functions: usize,
    constants: usize,
    categories: BTreeMap<String, usize>,
    files_written: Vec<String>,
    report: String,
    unrouted: usize,
    truncated: usize,
}

pub fn print_summary(outcome: &SplitOutcome, colored_output: bool, format: &OutputFormat) {
    match format {
        OutputFormat::Text => print_text_summary(outcome, colored_output),
        OutputFormat::Json => print_json_summary(outcome),
    }
}

fn print_text_summary(outcome: &SplitOutcome, colored_output: bool) {
    println!();
    if outcome.function_count == 0 {
        if colored_output {
            println!("{}", "✓ No functions found to split".green().bold());
        } else {
            println!("✓ No functions found to split");
        }
        return;
    }

    let routed = outcome.function_count - outcome.unrouted_count;
    let function_word = if routed == 1 { "function" } else { "functions" };
    let file_count = outcome.files_written.len();
    let file_word = if file_count == 1 { "file" } else { "files" };

    if colored_output {
        println!(
            "{} {} {} split into {} {} under {}",
            "✓".green().bold(),
            routed.to_string().green().bold(),
            function_word,
            file_count,
            file_word,
            outcome.target.display()
        );
    } else {
        println!(
            "✓ {} {} split into {} {} under {}",
            routed,
            function_word,
            file_count,
            file_word,
            outcome.target.display()
        );
    }
}

fn print_json_summary(outcome: &SplitOutcome) {
    let output = JsonSummary {
        source: outcome.source.display().to_string(),
        target: outcome.target.display().to_string(),
        functions: outcome.function_count,
        constants: outcome.constant_count,
        categories: outcome
            .category_counts
            .iter()
            .map(|(label, count)| (label.to_string(), *count))
            .collect(),
        files_written: outcome
            .files_written
            .iter()
            .map(|path| path.display().to_string())
            .collect(),
        report: outcome.report.display().to_string(),
        unrouted: outcome.unrouted_count,
        truncated: outcome.truncated_count,
    };

    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing() {
        assert!(matches!("text".parse(), Ok(OutputFormat::Text)));
        assert!(matches!("JSON".parse(), Ok(OutputFormat::Json)));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Text.to_string(), "text");
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }
}
