pub mod analyzer;
pub mod cli;
pub mod config;
pub mod generator;
pub mod report;
pub mod router;

pub use analyzer::SourceAnalyzer;
pub use config::Config;

use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

/// Aggregate describing one completed split run, handed to the output layer.
#[derive(Debug, Clone)]
pub struct SplitOutcome {
    pub source: PathBuf,
    pub target: PathBuf,
    pub function_count: usize,
    pub constant_count: usize,
    pub category_counts: BTreeMap<&'static str, usize>,
    pub files_written: Vec<PathBuf>,
    pub report: PathBuf,
    pub unrouted_count: usize,
    pub truncated_count: usize,
}

#[derive(Debug, Error)]
pub enum SplitError {
    #[error("source file not found: {}", .0.display())]
    SourceNotFound(PathBuf),
}
