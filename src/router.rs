//! Routing of classified functions to destination files.
//!
//! The policy is an ordered rule table evaluated top to bottom: the first
//! rule whose category matches and whose keyword automaton hits the function
//! name decides the destination. An empty keyword list is that category's
//! default branch. Categories without rules have no destination at all, so
//! their functions never reach an output file.

use crate::analyzer::classifier::Category;
use crate::analyzer::FunctionSet;
use aho_corasick::AhoCorasick;
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::path::Path;

struct RouteRule {
    category: Category,
    keywords: Option<AhoCorasick>,
    destination: &'static str,
}

impl RouteRule {
    fn matches(&self, name: &str, category: Category) -> bool {
        if self.category != category {
            return false;
        }
        match &self.keywords {
            Some(automaton) => automaton.is_match(name),
            None => true,
        }
    }
}

fn rule(category: Category, keywords: &[&str], destination: &'static str) -> RouteRule {
    let keywords = if keywords.is_empty() {
        None
    } else {
        Some(
            AhoCorasick::builder()
                .ascii_case_insensitive(true)
                .build(keywords)
                .unwrap(),
        )
    };
    RouteRule {
        category,
        keywords,
        destination,
    }
}

lazy_static! {
    // Default branches must stay below the keyworded rules of the same
    // category, or they would shadow them.
    static ref ROUTE_TABLE: Vec<RouteRule> = vec![
        rule(Category::Command, &["download"], "commands/download.go"),
        rule(Category::Command, &["file", "browse", "list"], "commands/file.go"),
        rule(
            Category::Command,
            &["task", "quick", "add", "del", "run"],
            "commands/task.go",
        ),
        rule(
            Category::Command,
            &["system", "health", "alist"],
            "commands/system.go",
        ),
        rule(Category::Command, &["start", "help"], "commands/help.go"),
        rule(Category::Command, &[], "commands/base.go"),
        rule(Category::Callback, &["menu"], "callbacks/menu.go"),
        rule(Category::Callback, &["file"], "callbacks/file_ops.go"),
        rule(Category::Callback, &["download"], "callbacks/download_ops.go"),
        rule(
            Category::Callback,
            &["preview", "manual"],
            "callbacks/preview.go",
        ),
        rule(Category::Callback, &[], "callbacks/base.go"),
        rule(
            Category::Util,
            &["format", "escape", "split"],
            "utils/formatter.go",
        ),
        rule(
            Category::Util,
            &["send", "edit", "answer"],
            "utils/message_sender.go",
        ),
        rule(
            Category::Util,
            &["encode", "decode", "path"],
            "utils/encoder.go",
        ),
        rule(Category::Util, &["parse", "valid"], "utils/validator.go"),
    ];
}

/// Destination file for a function, or `None` when no rule covers its
/// category or keywords.
pub fn destination_for(name: &str, category: Category) -> Option<&'static str> {
    ROUTE_TABLE
        .iter()
        .find(|rule| rule.matches(name, category))
        .map(|rule| rule.destination)
}

/// One destination file and the functions assigned to it, in encounter order.
#[derive(Debug)]
pub struct FileEntry {
    pub destination: &'static str,
    pub functions: Vec<String>,
}

/// Destination paths mapped to function names. Seeded with every destination
/// the table knows, in table order, so iteration (and therefore file
/// generation) follows the table even for empty destinations.
#[derive(Debug)]
pub struct FileMapping {
    entries: Vec<FileEntry>,
    index: HashMap<&'static str, usize>,
    unrouted: Vec<String>,
}

impl FileMapping {
    fn seeded() -> Self {
        let mut mapping = FileMapping {
            entries: Vec::new(),
            index: HashMap::new(),
            unrouted: Vec::new(),
        };
        for rule in ROUTE_TABLE.iter() {
            if !mapping.index.contains_key(rule.destination) {
                mapping.index.insert(rule.destination, mapping.entries.len());
                mapping.entries.push(FileEntry {
                    destination: rule.destination,
                    functions: Vec::new(),
                });
            }
        }
        mapping
    }

    fn push(&mut self, destination: &'static str, name: String) {
        if let Some(&i) = self.index.get(destination) {
            self.entries[i].functions.push(name);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileEntry> {
        self.entries.iter()
    }

    pub fn functions_for(&self, destination: &str) -> Option<&[String]> {
        self.index
            .get(destination)
            .map(|&i| self.entries[i].functions.as_slice())
    }

    /// True when any non-empty destination lives under `dir`.
    pub fn routes_into(&self, dir: &str) -> bool {
        self.entries.iter().any(|entry| {
            !entry.functions.is_empty() && Path::new(entry.destination).starts_with(dir)
        })
    }

    pub fn unrouted_count(&self) -> usize {
        self.unrouted.len()
    }
}

/// Assign every function in the set to its destination. Functions with no
/// destination are collected and only counted.
pub fn route(functions: &FunctionSet) -> FileMapping {
    let mut mapping = FileMapping::seeded();

    for func in functions.iter() {
        match destination_for(&func.name, func.category) {
            Some(destination) => mapping.push(destination, func.name.clone()),
            None => mapping.unrouted.push(func.name.clone()),
        }
    }

    mapping
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::classifier::classify;
    use crate::analyzer::ExtractedFunction;

    fn set_of(names: &[&str]) -> FunctionSet {
        let mut set = FunctionSet::default();
        for name in names {
            set.insert(ExtractedFunction {
                name: name.to_string(),
                receiver: String::new(),
                body: format!("func {name}() {{}}"),
                category: classify(name),
            });
        }
        set
    }

    #[test]
    fn test_command_keyword_priority() {
        assert_eq!(
            destination_for("handleDownloadCommand", Category::Command),
            Some("commands/download.go")
        );
        assert_eq!(
            destination_for("handleListCommand", Category::Command),
            Some("commands/file.go")
        );
        assert_eq!(
            destination_for("handleQuickTask", Category::Command),
            Some("commands/task.go")
        );
        assert_eq!(
            destination_for("handleHealthCommand", Category::Command),
            Some("commands/system.go")
        );
        assert_eq!(
            destination_for("handleStart", Category::Command),
            Some("commands/help.go")
        );
    }

    #[test]
    fn test_list_keyword_shadows_alist() {
        // "alist" contains "list", so the file rule wins over the system
        // rule for alist commands.
        assert_eq!(
            destination_for("handleAlistCommand", Category::Command),
            Some("commands/file.go")
        );
    }

    #[test]
    fn test_command_default_branch() {
        assert_eq!(
            destination_for("handleCancel", Category::Command),
            Some("commands/base.go")
        );
    }

    #[test]
    fn test_callback_routing() {
        assert_eq!(
            destination_for("handleMenuCallback", Category::Callback),
            Some("callbacks/menu.go")
        );
        assert_eq!(
            destination_for("handleFileCallback", Category::Callback),
            Some("callbacks/file_ops.go")
        );
        assert_eq!(
            destination_for("handleDownloadCallback", Category::Callback),
            Some("callbacks/download_ops.go")
        );
        assert_eq!(
            destination_for("handleManualWithEdit", Category::Callback),
            Some("callbacks/preview.go")
        );
        assert_eq!(
            destination_for("handleCallbackQuery", Category::Callback),
            Some("callbacks/base.go")
        );
    }

    #[test]
    fn test_util_routing() {
        assert_eq!(
            destination_for("formatMessage", Category::Util),
            Some("utils/formatter.go")
        );
        assert_eq!(
            destination_for("encodeCallbackData", Category::Util),
            Some("utils/encoder.go")
        );
        // "send" is checked before "encode", so the name lands in the
        // message sender file despite its prefix.
        assert_eq!(
            destination_for("encodeSendPayload", Category::Util),
            Some("utils/message_sender.go")
        );
    }

    #[test]
    fn test_keywords_match_case_insensitively() {
        assert_eq!(
            destination_for("handleDOWNLOADCommand", Category::Command),
            Some("commands/download.go")
        );
    }

    #[test]
    fn test_unrouted_categories_have_no_destination() {
        assert_eq!(destination_for("renderMenu", Category::Render), None);
        assert_eq!(destination_for("sendMessage", Category::Message), None);
        assert_eq!(destination_for("handleFileSelect", Category::File), None);
        assert_eq!(destination_for("handleSystemStatus", Category::System), None);
        assert_eq!(destination_for("doSomething", Category::Other), None);
    }

    #[test]
    fn test_mapping_seeded_in_table_order() {
        let mapping = route(&FunctionSet::default());
        let destinations: Vec<&str> = mapping.iter().map(|e| e.destination).collect();

        assert_eq!(destinations.len(), 15);
        assert_eq!(destinations[0], "commands/download.go");
        assert_eq!(destinations[5], "commands/base.go");
        assert_eq!(destinations[14], "utils/validator.go");
    }

    #[test]
    fn test_route_preserves_encounter_order() {
        let set = set_of(&["handleDownloadCommand", "handleCancelDownload"]);
        let mapping = route(&set);

        assert_eq!(
            mapping.functions_for("commands/download.go"),
            Some(
                &[
                    "handleDownloadCommand".to_string(),
                    "handleCancelDownload".to_string()
                ][..]
            )
        );
    }

    #[test]
    fn test_unrouted_functions_are_counted() {
        let set = set_of(&["renderMenu", "sendMessage", "formatText"]);
        let mapping = route(&set);

        assert_eq!(mapping.unrouted_count(), 2);
        assert!(!mapping
            .iter()
            .any(|e| e.functions.contains(&"renderMenu".to_string())));
    }

    #[test]
    fn test_routes_into_checks_directories() {
        let mapping = route(&set_of(&["formatText"]));

        assert!(mapping.routes_into("utils"));
        assert!(!mapping.routes_into("commands"));
        assert!(!mapping.routes_into("interfaces"));
    }
}
