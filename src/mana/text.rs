use rand::Rng;

use super::cost::ManaCost;
use crate::markers::{MANA_CLOSE, MANA_OPEN, NEWLINE, RESERVED_MANA};

/// Canonical rules text with each embedded cost replaced by a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManaText {
    text: String,
    costs: Vec<ManaCost>,
    valid: bool,
}

impl Default for ManaText {
    fn default() -> Self {
        Self {
            text: String::new(),
            costs: Vec::new(),
            valid: true,
        }
    }
}

impl ManaText {
    /// Read text whose costs are runs of `{2}{G}` groups.
    pub fn from_json(src: &str) -> Self {
        Self::extract(src, true)
    }

    /// Read text whose costs are single `{^^GG}` groups.
    pub fn from_encoded(src: &str) -> Self {
        Self::extract(src, false)
    }

    fn extract(src: &str, json: bool) -> Self {
        let mut out = ManaText::default();
        let mut rest = src;
        while let Some(open) = rest.find(MANA_OPEN) {
            let Some(len) = group_run(&rest[open..], json) else {
                break;
            };
            let raw = &rest[open..open + len];
            let cost = if json {
                ManaCost::from_json(raw)
            } else {
                ManaCost::from_encoded(raw)
            };
            out.valid &= cost.valid();
            out.costs.push(cost);
            out.text.push_str(&rest[..open]);
            out.text.push(RESERVED_MANA);
            rest = &rest[open + len..];
        }
        out.text.push_str(rest);
        if out.text.contains([MANA_OPEN, MANA_CLOSE]) {
            out.valid = false;
        }
        out
    }

    /// Splice display text in front of the same costs.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            costs: self.costs.clone(),
            valid: self.valid,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn costs(&self) -> &[ManaCost] {
        &self.costs
    }

    pub fn valid(&self) -> bool {
        self.valid
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn encode(&self) -> String {
        self.splice(|cost| cost.encode())
    }

    /// Encoded form with the symbols of each cost shuffled.
    pub fn encode_shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        self.splice(|cost| cost.encode_shuffled(rng))
    }

    pub fn format(&self, forum: bool) -> String {
        self.splice(|cost| cost.format(forum))
    }

    /// Token stream for similarity keys: costs as `(tok)` groups,
    /// punctuation and markers split off as their own tokens.
    pub fn vectorize(&self) -> String {
        let mut spaced = String::with_capacity(self.text.len() * 2);
        for ch in self.text.chars() {
            if VECTOR_SPECIALS.contains(&ch) {
                spaced.push(' ');
                spaced.push(ch);
                spaced.push(' ');
            } else {
                spaced.push(ch);
            }
        }
        let placeholder = RESERVED_MANA.to_string();
        let mut costs = self.costs.iter();
        spaced
            .split_whitespace()
            .map(|token| {
                let cost = if token == placeholder { costs.next() } else { None };
                cost.map_or_else(|| token.to_string(), |c| c.vectorize(true))
            })
            .filter(|token| !token.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// One encoded text per line.
    pub fn lines(&self) -> Vec<ManaText> {
        let encoded = self.encode();
        if encoded.is_empty() {
            return Vec::new();
        }
        encoded.split(NEWLINE).map(ManaText::from_encoded).collect()
    }

    fn splice(&self, mut render: impl FnMut(&ManaCost) -> String) -> String {
        let mut out = String::with_capacity(self.text.len() + 8 * self.costs.len());
        let mut costs = self.costs.iter();
        for ch in self.text.chars() {
            match (ch == RESERVED_MANA).then(|| costs.next()).flatten() {
                Some(cost) => out.push_str(&render(cost)),
                None => out.push(ch),
            }
        }
        out
    }
}

const VECTOR_SPECIALS: [char; 15] = [
    '$', '@', '%', '~', '=', '\\', '[', ']', ':', '.', ',', ';', '"', 'T', 'Q',
];

/// Byte length of the cost starting at `s`, which begins with `{`.
/// JSON costs swallow adjacent groups.
fn group_run(s: &str, json: bool) -> Option<usize> {
    let mut len = 0;
    loop {
        let close = s[len..].find(MANA_CLOSE)?;
        let next_open = s[len + 1..].find(MANA_OPEN).map(|i| i + len + 1);
        if next_open.is_some_and(|o| o < len + close) {
            // nested or unbalanced
            return None;
        }
        len += close + 1;
        if !json || !s[len..].starts_with(MANA_OPEN) {
            return Some(len);
        }
    }
}
