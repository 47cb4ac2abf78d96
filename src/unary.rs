//! Unary number encoding: `3` becomes `&^^^`.
//!
//! Numbers inside `{...}` groups are mana symbols and are left alone.

use tracing::debug;

use crate::markers::{MANA_CLOSE, MANA_OPEN, UNARY_COUNTER, UNARY_MARKER, UNARY_MAX};

/// Values spelled out instead of clamped.
const EXCEPTIONS: [(u64, &str); 6] = [
    (25, "twenty~five"),
    (30, "thirty"),
    (40, "forty"),
    (50, "fifty"),
    (100, "one hundred"),
    (200, "two hundred"),
];

/// Unary form of a single count.
pub fn unary(n: usize) -> String {
    let mut out = String::with_capacity(n + 1);
    out.push(UNARY_MARKER);
    out.extend(std::iter::repeat_n(UNARY_COUNTER, n));
    out
}

/// Rewrite every decimal digit run outside braces into unary.
pub fn to_unary(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 2);
    let mut digits = String::new();
    let mut depth = 0usize;
    for ch in s.chars() {
        if ch.is_ascii_digit() && depth == 0 {
            digits.push(ch);
            continue;
        }
        flush_number(&mut out, &mut digits);
        match ch {
            MANA_OPEN => depth += 1,
            MANA_CLOSE => depth = depth.saturating_sub(1),
            _ => {}
        }
        out.push(ch);
    }
    flush_number(&mut out, &mut digits);
    out
}

fn flush_number(out: &mut String, digits: &mut String) {
    if digits.is_empty() {
        return;
    }
    // digit runs too long for u64 clamp like any other large number
    let value = digits.parse::<u64>().unwrap_or(u64::MAX);
    if let Some((_, word)) = EXCEPTIONS.iter().find(|(n, _)| *n == value) {
        out.push_str(word);
    } else if value > UNARY_MAX as u64 {
        debug!(value, max = UNARY_MAX, "clamping number to unary maximum");
        out.push_str(&unary(UNARY_MAX));
    } else {
        out.push_str(&unary(value as usize));
    }
    digits.clear();
}

/// Rewrite every `&^*` run back into decimal digits.
pub fn from_unary(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != UNARY_MARKER {
            out.push(ch);
            continue;
        }
        let mut count = 0usize;
        while chars.next_if_eq(&UNARY_COUNTER).is_some() {
            count += 1;
        }
        out.push_str(&count.to_string());
    }
    out
}

/// Parse a field that holds a single number, in unary or decimal.
pub fn parse_value(s: &str) -> Option<i64> {
    from_unary(s).trim().parse().ok()
}
