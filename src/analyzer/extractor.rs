//! Brace-balanced extraction of Go definitions from raw source text.
//!
//! Function headers are located with a regular expression, then the scanner
//! walks the bytes from the opening brace counting `{` and `}` until the
//! depth returns to zero. It is not string- or comment-aware: a brace inside
//! a string literal or comment corrupts the depth count for that function.
//! Headers whose body never closes before end-of-input are dropped from the
//! result and only counted.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Optional receiver clause, identifier, naive parameter list (no nested
    // parens), anything up to the opening brace of the body.
    static ref FUNC_HEADER: Regex =
        Regex::new(r"func\s+(\([^)]*\))?\s*([A-Za-z_][A-Za-z0-9_]*)\s*\([^)]*\)[^{]*\{").unwrap();
    static ref CONST_DEF: Regex = Regex::new(r"const\s+(\w+)\s*=\s*([^/\n]+)").unwrap();
    static ref STRUCT_TYPE: Regex = Regex::new(r"type\s+(\w+)\s+struct\s*\{[^}]*\}").unwrap();
}

/// A function definition captured verbatim from the source text.
#[derive(Debug, Clone)]
pub struct RawFunction {
    pub name: String,
    pub receiver: String,
    pub body: String,
}

/// All functions found in one pass, in header order, plus the number of
/// headers whose body never closed.
#[derive(Debug, Default)]
pub struct FunctionScan {
    pub functions: Vec<RawFunction>,
    pub truncated: usize,
}

pub fn extract_functions(content: &str) -> FunctionScan {
    let bytes = content.as_bytes();
    let mut scan = FunctionScan::default();

    for caps in FUNC_HEADER.captures_iter(content) {
        let (Some(header), Some(name)) = (caps.get(0), caps.get(2)) else {
            continue;
        };

        // The header pattern always ends on the opening brace.
        let open = header.end() - 1;
        match matching_brace(bytes, open) {
            Some(close) => scan.functions.push(RawFunction {
                name: name.as_str().to_string(),
                receiver: caps
                    .get(1)
                    .map_or_else(String::new, |m| m.as_str().trim().to_string()),
                body: content[header.start()..=close].to_string(),
            }),
            None => scan.truncated += 1,
        }
    }

    scan
}

/// Offset of the brace matching the one at `open`, or `None` when the text
/// ends first. Braces are ASCII, so scanning bytes is safe in UTF-8 input.
fn matching_brace(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth: i32 = 0;
    let mut pos = open;

    while pos < bytes.len() {
        match bytes[pos] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(pos);
                }
            }
            _ => {}
        }
        pos += 1;
    }

    None
}

/// `const NAME = value` pairs in source order, values trimmed. Duplicates
/// are kept; the caller decides how to collapse them.
pub fn extract_constants(content: &str) -> Vec<(String, String)> {
    CONST_DEF
        .captures_iter(content)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str().to_string();
            let value = caps.get(2)?.as_str().trim().to_string();
            Some((name, value))
        })
        .collect()
}

/// Names of `type NAME struct { .. }` definitions. Detected so the omission
/// can be reported; nothing is migrated.
pub fn detect_struct_types(content: &str) -> Vec<String> {
    STRUCT_TYPE
        .captures_iter(content)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect()
}
