use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

/// Closed set of categories a function name can classify into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Command,
    Callback,
    Render,
    Util,
    Message,
    File,
    Task,
    System,
    Manual,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Command => "command",
            Category::Callback => "callback",
            Category::Render => "render",
            Category::Util => "util",
            Category::Message => "message",
            Category::File => "file",
            Category::Task => "task",
            Category::System => "system",
            Category::Manual => "manual",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

struct CategoryRule {
    category: Category,
    patterns: Vec<Regex>,
}

fn rule(category: Category, patterns: &[&str]) -> CategoryRule {
    CategoryRule {
        category,
        // Anchored so a pattern must match from the start of the name,
        // but not necessarily the whole name.
        patterns: patterns
            .iter()
            .map(|p| Regex::new(&format!("^(?:{p})")).unwrap())
            .collect(),
    }
}

lazy_static! {
    // Evaluated in order; a broad pattern in an earlier rule shadows more
    // specific patterns further down (handleDownloadFile lands in command,
    // never in file).
    static ref CATEGORY_RULES: Vec<CategoryRule> = vec![
        rule(
            Category::Command,
            &[
                r"handle.*Command",
                r"handle(Start|Help|Download|List|Cancel|Tasks|AddTask|QuickTask|DelTask|RunTask)",
            ],
        ),
        rule(
            Category::Callback,
            &[r"handle.*Callback", r"handle.*WithEdit", r"handleCallbackQuery"],
        ),
        rule(Category::Render, &[r"render.*", r"get.*Keyboard", r"get.*Menu"]),
        rule(
            Category::Util,
            &[r"format.*", r"escape.*", r"split.*", r"encode.*", r"decode.*"],
        ),
        rule(Category::Message, &[r"send.*", r"edit.*", r"answer.*"]),
        rule(
            Category::File,
            &[r"handleFile.*", r"handleBrowse.*", r"handleDownloadFile.*"],
        ),
        rule(
            Category::Task,
            &[
                r"handleTask.*",
                r"handleQuick.*",
                r"handleAdd.*",
                r"handleDel.*",
                r"handleRun.*",
            ],
        ),
        rule(
            Category::System,
            &[r"handleSystem.*", r"handleHealth.*", r"handleAlist.*"],
        ),
        rule(
            Category::Manual,
            &[r"handleManual.*", r"parseTime.*", r"callManual.*"],
        ),
    ];
}

/// Assign a category to a function name. The first rule with a matching
/// pattern wins; names nothing matches fall back to `Other`.
pub fn classify(name: &str) -> Category {
    for rule in CATEGORY_RULES.iter() {
        if rule.patterns.iter().any(|p| p.is_match(name)) {
            return rule.category;
        }
    }
    Category::Other
}
