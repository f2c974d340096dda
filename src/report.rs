use crate::analyzer::SourceAnalysis;
use crate::generator::SCAFFOLD_DIRS;
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Write the summary report under the target root and return its path.
///
/// The directory tree section is re-read from disk rather than taken from
/// the run's mapping, so files left behind by an earlier run still show up.
pub fn write_summary(
    target: &Path,
    source: &Path,
    analysis: &SourceAnalysis,
    report_filename: &str,
) -> Result<PathBuf> {
    let report_path = target.join(report_filename);
    fs::write(&report_path, render_summary(target, source, analysis))
        .with_context(|| format!("Failed to write report: {}", report_path.display()))?;
    Ok(report_path)
}

fn render_summary(target: &Path, source: &Path, analysis: &SourceAnalysis) -> String {
    let mut content = format!(
        "# Refactoring Summary\n\n\
         ## Source File Analysis\n\
         - Source file: `{}`\n\
         - Total functions: {}\n\
         - Total constants: {}\n\n\
         ## Function Categories\n",
        source.display(),
        analysis.functions.len(),
        analysis.constants.len(),
    );

    // BTreeMap iteration keeps the table sorted by label.
    for (category, count) in analysis.category_counts() {
        let noun = if count == 1 { "function" } else { "functions" };
        let _ = writeln!(content, "- {category}: {count} {noun}");
    }

    content.push_str("\n## Generated File Structure\n\n```\n");
    let _ = writeln!(content, "{}/", tree_root_label(target));

    for dir in SCAFFOLD_DIRS {
        let _ = writeln!(content, "├── {dir}/");
        let dir_path = target.join(dir);
        if dir_path.exists() {
            for file_name in go_files_in(&dir_path) {
                let _ = writeln!(content, "│   ├── {file_name}");
            }
        }
    }

    content.push_str("```\n\n");
    content.push_str(NEXT_STEPS);
    content
}

fn tree_root_label(target: &Path) -> String {
    target
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| ".".to_string())
}

fn go_files_in(dir: &Path) -> Vec<String> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "go"))
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect()
}

const NEXT_STEPS: &str = "\
## Next Steps

1. ✅ Structural extraction complete
2. 🔄 Adjust the import statements by hand
3. 🔄 Implement the interface definitions
4. 🔄 Write unit tests
5. 🔄 Verify with integration tests

## Notes

- Generated files need their import statements adjusted manually
- Dependencies between the migrated functions need reorganizing
- Migrate step by step and keep the original file as a backup
";
