//! Fuzzy text scoring for tab search.
//!
//! Scores follow a fixed ladder where the first matching rule wins:
//!
//! ```text
//! empty pattern        1
//! empty text           0
//! exact match        100
//! prefix              80
//! substring           60
//! subsequence      min(40, matched × 5)
//! no match             0
//! ```
//!
//! All comparisons are case-insensitive.

/// Score for an empty pattern, which matches everything.
pub const MATCH_ALL: u32 = 1;
pub const EXACT: u32 = 100;
pub const PREFIX: u32 = 80;
pub const SUBSTRING: u32 = 60;
/// Upper bound for an ordered, non-contiguous match.
pub const SUBSEQUENCE_CAP: u32 = 40;
const SUBSEQUENCE_PER_CHAR: u32 = 5;

/// Score how well `pattern` matches `text`, in `0..=100`.
pub fn score(text: &str, pattern: &str) -> u32 {
    if pattern.is_empty() {
        return MATCH_ALL;
    }
    if text.is_empty() {
        return 0;
    }

    let text = text.to_lowercase();
    let pattern = pattern.to_lowercase();

    if text == pattern {
        EXACT
    } else if text.starts_with(&pattern) {
        PREFIX
    } else if text.contains(&pattern) {
        SUBSTRING
    } else {
        subsequence(&text, &pattern)
    }
}

/// Greedy left-to-right subsequence scan. Both inputs are already lowercased.
fn subsequence(text: &str, pattern: &str) -> u32 {
    let mut pending = pattern.chars().peekable();
    let mut matched: u32 = 0;

    for c in text.chars() {
        match pending.peek() {
            Some(&p) if p == c => {
                matched += 1;
                pending.next();
            }
            Some(_) => {}
            None => break,
        }
    }

    if pending.peek().is_some() {
        return 0;
    }

    matched
        .saturating_mul(SUBSEQUENCE_PER_CHAR)
        .min(SUBSEQUENCE_CAP)
}
