//! Human-friendly name ordering
//!
//! Approximates the default collation of a locale-aware comparison:
//! case-insensitive first, whitespace before punctuation before digits
//! before letters, and lowercase before uppercase when names differ only
//! in case. Punctuation and symbols follow the root collation table.

use std::cmp::Ordering;

/// Compare two script names for display order.
pub fn collate(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| case_order(a, b))
        .then_with(|| a.cmp(b))
}

/// ASCII punctuation and symbols in root collation order.
const SYMBOL_ORDER: &str = "_-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

fn primary_key(s: &str) -> Vec<(u8, usize, char)> {
    s.chars()
        .flat_map(char::to_lowercase)
        .map(|c| (char_class(c), symbol_rank(c), c))
        .collect()
}

fn char_class(c: char) -> u8 {
    if c.is_whitespace() {
        0
    } else if c.is_alphabetic() {
        3
    } else if c.is_numeric() {
        2
    } else {
        1
    }
}

/// Position in [`SYMBOL_ORDER`]; symbols outside it sort after, by codepoint.
fn symbol_rank(c: char) -> usize {
    SYMBOL_ORDER
        .chars()
        .position(|s| s == c)
        .unwrap_or(SYMBOL_ORDER.len())
}

/// First case difference decides; lowercase sorts first.
fn case_order(a: &str, b: &str) -> Ordering {
    a.chars()
        .zip(b.chars())
        .map(|(x, y)| x.is_uppercase().cmp(&y.is_uppercase()))
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}
