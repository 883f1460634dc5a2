//! Parser for `[fault]...[/fault]` key=value blocks embedded in a fault
//! action's doc comment. This is a documentation convenience only — the
//! core never enforces that a registered action carries one, and nothing
//! in the scheduler reads it. It exists so an `ActionModule` implementation
//! can self-describe its actions for a `--list-faults`-style tool.

use std::collections::HashMap;

/// Extracts `key=value` pairs from the first `[fault]...[/fault]` block in
/// `doc`. Duplicate keys overwrite earlier ones. Lines outside a block, or
/// lines inside a block that are not `key=value`, are ignored.
pub fn parse_fault_block(doc: &str) -> HashMap<String, String> {
    let mut pairs = HashMap::new();
    let mut inside = false;
    for line in doc.lines() {
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("[fault]") {
            inside = true;
            continue;
        }
        if trimmed.eq_ignore_ascii_case("[/fault]") {
            break;
        }
        if !inside {
            continue;
        }
        if let Some((key, value)) = trimmed.split_once('=') {
            pairs.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    pairs
}

