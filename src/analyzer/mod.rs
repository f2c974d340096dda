pub mod classifier;
pub mod extractor;

use crate::Config;
use classifier::Category;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};

/// A function definition ready for routing.
#[derive(Debug, Clone)]
pub struct ExtractedFunction {
    pub name: String,
    pub receiver: String,
    pub body: String,
    pub category: Category,
}

/// Name-keyed function storage with insertion order preserved. Re-inserting
/// a name keeps the entry's original position and replaces its value, so
/// duplicate definitions resolve to the last body seen.
#[derive(Debug, Default)]
pub struct FunctionSet {
    items: Vec<ExtractedFunction>,
    index: HashMap<String, usize>,
}

impl FunctionSet {
    /// Returns true when an existing entry was replaced.
    pub fn insert(&mut self, func: ExtractedFunction) -> bool {
        match self.index.get(&func.name) {
            Some(&i) => {
                self.items[i] = func;
                true
            }
            None => {
                self.index.insert(func.name.clone(), self.items.len());
                self.items.push(func);
                false
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&ExtractedFunction> {
        self.index.get(name).map(|&i| &self.items[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExtractedFunction> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Everything learned from one pass over the source text.
#[derive(Debug, Default)]
pub struct SourceAnalysis {
    pub functions: FunctionSet,
    pub constants: BTreeMap<String, String>,
    pub types: Vec<String>,
    pub truncated_count: usize,
    pub duplicate_names: Vec<String>,
    pub skipped_count: usize,
}

impl SourceAnalysis {
    /// Function counts per category, keyed by label so iteration is already
    /// sorted for the report.
    pub fn category_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for func in self.functions.iter() {
            *counts.entry(func.category.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

pub struct SourceAnalyzer {
    ignore_patterns: Vec<Regex>,
}

impl SourceAnalyzer {
    pub fn new(config: &Config) -> Self {
        // Compile ignore patterns
        let mut ignore_patterns = Vec::new();
        for pattern in &config.ignore_patterns {
            match Regex::new(pattern) {
                Ok(re) => ignore_patterns.push(re),
                Err(e) => eprintln!("Warning: Invalid ignore pattern '{}': {}", pattern, e),
            }
        }

        Self { ignore_patterns }
    }

    /// Extract and classify every definition in `content`.
    pub fn analyze(&self, content: &str) -> SourceAnalysis {
        let scan = extractor::extract_functions(content);

        let mut functions = FunctionSet::default();
        let mut duplicate_names = Vec::new();
        let mut skipped_count = 0;

        for raw in scan.functions {
            if self.should_skip(&raw.name) {
                skipped_count += 1;
                continue;
            }

            let category = classifier::classify(&raw.name);
            let name = raw.name.clone();
            let replaced = functions.insert(ExtractedFunction {
                name: raw.name,
                receiver: raw.receiver,
                body: raw.body,
                category,
            });
            if replaced {
                duplicate_names.push(name);
            }
        }

        let mut constants = BTreeMap::new();
        for (name, value) in extractor::extract_constants(content) {
            constants.insert(name, value);
        }

        SourceAnalysis {
            functions,
            constants,
            types: extractor::detect_struct_types(content),
            truncated_count: scan.truncated,
            duplicate_names,
            skipped_count,
        }
    }

    fn should_skip(&self, name: &str) -> bool {
        self.ignore_patterns.iter().any(|p| p.is_match(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn func(name: &str, body: &str) -> ExtractedFunction {
        ExtractedFunction {
            name: name.to_string(),
            receiver: String::new(),
            body: body.to_string(),
            category: classifier::classify(name),
        }
    }

    #[test]
    fn test_duplicate_name_keeps_position() {
        let mut set = FunctionSet::default();
        assert!(!set.insert(func("first", "func first() { a() }")));
        assert!(!set.insert(func("second", "func second() { b() }")));
        assert!(set.insert(func("first", "func first() { c() }")));

        assert_eq!(set.len(), 2);
        let names: Vec<&str> = set.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert!(set.get("first").is_some_and(|f| f.body.contains("c()")));
    }

    #[test]
    fn test_analyze_records_duplicates() {
        let src = "func f() {\n\ta()\n}\n\nfunc f() {\n\tb()\n}\n";
        let analysis = SourceAnalyzer::new(&Config::default()).analyze(src);

        assert_eq!(analysis.functions.len(), 1);
        assert_eq!(analysis.duplicate_names, vec!["f".to_string()]);
        assert!(analysis
            .functions
            .get("f")
            .is_some_and(|f| f.body.contains("b()")));
    }

    #[test]
    fn test_analyze_classifies_inline() {
        let src = "func handleDownloadCommand() {\n\tgo()\n}\n\nfunc formatMessage() {\n\tx()\n}\n";
        let analysis = SourceAnalyzer::new(&Config::default()).analyze(src);

        assert_eq!(
            analysis.functions.get("handleDownloadCommand").map(|f| f.category),
            Some(Category::Command)
        );
        assert_eq!(
            analysis.functions.get("formatMessage").map(|f| f.category),
            Some(Category::Util)
        );
    }

    #[test]
    fn test_ignore_patterns_skip_names() {
        let config = Config {
            ignore_patterns: vec!["^Test".to_string()],
            ..Default::default()
        };
        let src = "func TestHandleStart() {\n\tt()\n}\n\nfunc handleStart() {\n\ts()\n}\n";
        let analysis = SourceAnalyzer::new(&config).analyze(src);

        assert_eq!(analysis.functions.len(), 1);
        assert_eq!(analysis.skipped_count, 1);
        assert!(analysis.functions.get("TestHandleStart").is_none());
    }

    #[test]
    fn test_invalid_ignore_pattern_not_fatal() {
        let config = Config {
            ignore_patterns: vec!["([".to_string()],
            ..Default::default()
        };
        let analysis = SourceAnalyzer::new(&config).analyze("func handleStart() {\n\tz()\n}\n");

        assert_eq!(analysis.functions.len(), 1);
    }

    #[test]
    fn test_duplicate_constants_take_last_value() {
        let src = "const retries = 3\nconst retries = 5\n";
        let analysis = SourceAnalyzer::new(&Config::default()).analyze(src);

        assert_eq!(analysis.constants.len(), 1);
        assert_eq!(analysis.constants.get("retries").map(String::as_str), Some("5"));
    }

    #[test]
    fn test_category_counts_keyed_by_label() {
        let src = "\
func handleStart() {\n\ta()\n}\n\n\
func handleHelpCommand() {\n\tb()\n}\n\n\
func renderMenu() {\n\tc()\n}\n";
        let analysis = SourceAnalyzer::new(&Config::default()).analyze(src);
        let counts = analysis.category_counts();

        assert_eq!(counts.get("command"), Some(&2));
        assert_eq!(counts.get("render"), Some(&1));
        assert_eq!(counts.get("util"), None);
    }
}
