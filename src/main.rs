use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use cleaver::cli::output::{self, OutputFormat};
use cleaver::{generator, report, router, Config, SourceAnalyzer, SplitError, SplitOutcome};
use std::fs;
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cleaver")]
#[command(version, about = "Split a monolithic Go source file by function category", long_about = None)]
struct Cli {
    /// Source file to analyze
    #[arg(value_name = "SOURCE", required_unless_present = "completion")]
    source: Option<PathBuf>,

    /// Directory for the generated file structure
    #[arg(value_name = "TARGET_DIR", required_unless_present = "completion")]
    target_dir: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Output format (text, json)
    #[arg(short = 'o', long, default_value = "text")]
    format: OutputFormat,

    /// Function name pattern to ignore (regex)
    #[arg(long)]
    ignore_pattern: Vec<String>,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // clap exits 2 on bad arguments; this tool promises 1, with
            // help and version still exiting 0.
            let _ = err.print();
            std::process::exit(if err.use_stderr() { 1 } else { 0 });
        }
    };

    // Handle shell completion generation
    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "cleaver", &mut io::stdout());
        return Ok(());
    }

    let (source, target_dir) = match (cli.source, cli.target_dir) {
        (Some(source), Some(target_dir)) => (source, target_dir),
        _ => anyhow::bail!("Usage: cleaver <SOURCE> <TARGET_DIR>"),
    };

    if !source.exists() {
        return Err(SplitError::SourceNotFound(source.clone()).into());
    }

    // Load configuration
    let config = Config::load(cli.ignore_pattern)?;

    let colored_output = !cli.no_color;
    let quiet = matches!(cli.format, OutputFormat::Json);

    // Analyze
    if !quiet {
        output::print_stage("Analyzing", &source, colored_output);
    }
    let content = fs::read_to_string(&source)
        .with_context(|| format!("Failed to read source file: {}", source.display()))?;
    let analysis = SourceAnalyzer::new(&config).analyze(&content);
    output::print_analysis_warnings(&analysis);

    // Route
    let mapping = router::route(&analysis.functions);
    if mapping.unrouted_count() > 0 {
        output::print_unrouted_warning(mapping.unrouted_count());
    }

    // Generate
    if !quiet {
        output::print_stage("Generating file structure in", &target_dir, colored_output);
    }
    let created = generator::create_scaffold(&target_dir, &mapping, config.create_empty_dirs)?;
    if !quiet {
        for dir in &created {
            output::print_created_dir(dir, colored_output);
        }
    }
    let files_written = generator::write_files(&target_dir, &mapping, &analysis.functions, &source)?;
    if !quiet {
        for file in &files_written {
            output::print_generated_file(file, colored_output);
        }
    }

    // Report
    if !quiet {
        output::print_stage(
            "Writing summary report",
            &target_dir.join(&config.report_filename),
            colored_output,
        );
    }
    let report_path = report::write_summary(&target_dir, &source, &analysis, &config.report_filename)?;

    let outcome = SplitOutcome {
        source,
        target: target_dir,
        function_count: analysis.functions.len(),
        constant_count: analysis.constants.len(),
        category_counts: analysis.category_counts(),
        files_written,
        report: report_path,
        unrouted_count: mapping.unrouted_count(),
        truncated_count: analysis.truncated_count,
    };

    output::print_summary(&outcome, colored_output, &cli.format);

    Ok(())
}
