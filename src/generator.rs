use crate::analyzer::FunctionSet;
use crate::router::{FileEntry, FileMapping};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directories created under the target, in this order.
pub const SCAFFOLD_DIRS: [&str; 8] = [
    "interfaces",
    "core",
    "commands",
    "callbacks",
    "renderers",
    "utils",
    "config",
    "types",
];

/// Create the scaffold directories and return them in creation order. With
/// `create_empty_dirs` off, only directories that receive files are created;
/// the target root itself always is.
pub fn create_scaffold(
    target: &Path,
    mapping: &FileMapping,
    create_empty_dirs: bool,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(target)
        .with_context(|| format!("Failed to create target directory: {}", target.display()))?;

    let mut created = Vec::new();
    for dir in SCAFFOLD_DIRS {
        if !create_empty_dirs && !mapping.routes_into(dir) {
            continue;
        }
        let path = target.join(dir);
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
        created.push(path);
    }

    Ok(created)
}

/// Write one generated Go file per non-empty destination, overwriting any
/// previous contents. Returns the written paths in mapping order.
pub fn write_files(
    target: &Path,
    mapping: &FileMapping,
    functions: &FunctionSet,
    source: &Path,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for entry in mapping.iter() {
        if entry.functions.is_empty() {
            continue;
        }

        let path = target.join(entry.destination);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::write(&path, render_file(entry, functions, source))
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        written.push(path);
    }

    Ok(written)
}

fn render_file(entry: &FileEntry, functions: &FunctionSet, source: &Path) -> String {
    // The first path component doubles as the Go package name.
    let package = entry.destination.split('/').next().unwrap_or("main");

    let mut content = format!(
        "package {package}\n\n\
         // This file was generated by cleaver\n\
         // Source file: {}\n\n\
         import (\n\
         \t// TODO: add the required imports\n\
         )\n\n",
        source.display()
    );

    for name in &entry.functions {
        if let Some(func) = functions.get(name) {
            content.push_str(&format!("// {name} - migrated from the original file\n"));
            content.push_str(&func.body);
            content.push_str("\n\n");
        }
    }

    content
}
