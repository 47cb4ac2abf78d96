//! ASCII folding and letter-case helpers.
//!
//! The strategy is chosen once per process with [`install`]; everything
//! else reads it through [`current`].

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Text normalization capabilities used by the parsers and renderers.
pub trait Normalizer: Send + Sync {
    fn name(&self) -> &'static str;
    /// Fold to ASCII, dropping what cannot be folded.
    fn to_ascii(&self, s: &str) -> String;
    /// Capitalize a name or type line.
    fn title_case(&self, s: &str) -> String;
    /// Capitalize sentence starts on every `\n`-separated line.
    fn sentence_case(&self, s: &str) -> String;
}

/// Available strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Naive,
    #[default]
    Enhanced,
}

impl Strategy {
    fn build(self) -> &'static dyn Normalizer {
        match self {
            Strategy::Naive => &NaiveNormalizer,
            Strategy::Enhanced => &EnhancedNormalizer,
        }
    }
}

static ACTIVE: OnceLock<&'static dyn Normalizer> = OnceLock::new();

/// Select the strategy for this process. Returns false if one was already set.
pub fn install(strategy: Strategy) -> bool {
    ACTIVE.set(strategy.build()).is_ok()
}

/// The installed strategy, or the enhanced one if none was installed.
pub fn current() -> &'static dyn Normalizer {
    *ACTIVE.get_or_init(|| Strategy::Enhanced.build())
}

/// Plain per-word capitalization, no sentence handling.
pub struct NaiveNormalizer;

/// Small-word aware title case and sentence capitalization.
pub struct EnhancedNormalizer;

impl Normalizer for NaiveNormalizer {
    fn name(&self) -> &'static str {
        "naive"
    }

    fn to_ascii(&self, s: &str) -> String {
        fold(s, fold_basic)
    }

    fn title_case(&self, s: &str) -> String {
        capitalize_words(s)
    }

    fn sentence_case(&self, s: &str) -> String {
        s.to_string()
    }
}

impl Normalizer for EnhancedNormalizer {
    fn name(&self) -> &'static str {
        "enhanced"
    }

    fn to_ascii(&self, s: &str) -> String {
        fold(s, |ch| fold_accent(ch).or_else(|| fold_basic(ch)))
    }

    fn title_case(&self, s: &str) -> String {
        let words: Vec<&str> = s.split(' ').collect();
        let last = words.len().saturating_sub(1);
        words
            .iter()
            .enumerate()
            .map(|(i, word)| {
                if i != 0 && i != last && SMALL_WORDS.contains(word) {
                    word.to_string()
                } else {
                    capitalize_words(word)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn sentence_case(&self, s: &str) -> String {
        s.split('\n')
            .map(capitalize_sentences)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

const SMALL_WORDS: [&str; 18] = [
    "a", "an", "and", "as", "at", "but", "by", "en", "for", "if", "in", "of", "on", "or", "the",
    "to", "v", "via",
];

/// Upper-case the first letter of every alphabetic run, like `str.title`
/// without lower-casing the rest.
fn capitalize_words(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    let mut prev = ' ';
    for ch in s.chars() {
        // no capital after an apostrophe: "o'brien" -> "O'brien"
        let starts_word = !prev_alpha && prev != '\'';
        if ch.is_alphabetic() && starts_word {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        prev_alpha = ch.is_alphabetic();
        prev = ch;
    }
    out
}

fn capitalize_sentences(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut at_start = true;
    let mut prev = ' ';
    for ch in line.chars() {
        if at_start && ch.is_alphabetic() {
            out.extend(ch.to_uppercase());
            at_start = false;
        } else {
            if !ch.is_whitespace() && !matches!(ch, '"' | '\'' | '(') {
                at_start = false;
            }
            if ch.is_whitespace() && matches!(prev, '.' | '!' | '?' | '\u{2022}') {
                at_start = true;
            }
            out.push(ch);
        }
        prev = ch;
    }
    out
}

fn fold(s: &str, table: impl Fn(char) -> Option<&'static str>) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if ch.is_ascii() {
            out.push(ch);
        } else if let Some(folded) = table(ch) {
            out.push_str(folded);
        }
    }
    out
}

fn fold_basic(ch: char) -> Option<&'static str> {
    let folded = match ch {
        'æ' => "ae",
        'Æ' => "AE",
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => "a",
        'é' | 'è' | 'ê' | 'ë' => "e",
        'í' | 'ì' | 'î' | 'ï' => "i",
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => "o",
        'ú' | 'ù' | 'û' | 'ü' => "u",
        'ñ' => "n",
        'ç' => "c",
        '\u{2018}' | '\u{2019}' => "'",
        '\u{201c}' | '\u{201d}' => "\"",
        '\u{2014}' | '\u{2013}' | '\u{2212}' => "-",
        '\u{2022}' => "*",
        '\u{00bd}' => "1/2",
        '\u{221e}' => "infinity",
        _ => return None,
    };
    Some(folded)
}

fn fold_accent(ch: char) -> Option<&'static str> {
    let folded = match ch {
        'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' => "A",
        'É' | 'È' | 'Ê' | 'Ë' => "E",
        'Í' | 'Ì' | 'Î' | 'Ï' => "I",
        'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' | 'Ø' => "O",
        'Ú' | 'Ù' | 'Û' | 'Ü' => "U",
        'Ñ' => "N",
        'Ç' => "C",
        'ø' => "o",
        'ý' | 'ÿ' => "y",
        'Ý' => "Y",
        'ß' => "ss",
        'œ' => "oe",
        'Œ' => "OE",
        'ð' => "d",
        'þ' => "th",
        '\u{2026}' => "...",
        '\u{00a0}' => " ",
        _ => return None,
    };
    Some(folded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_to_ascii() {
        assert_eq!(NaiveNormalizer.to_ascii("Æther Vial"), "AEther Vial");
        assert_eq!(NaiveNormalizer.to_ascii("Lim-Dûl's Vault"), "Lim-Dul's Vault");
        assert_eq!(NaiveNormalizer.to_ascii("Ürsa"), "rsa");
        assert_eq!(EnhancedNormalizer.to_ascii("Ürsa"), "Ursa");
    }

    #[test]
    fn title_cases() {
        assert_eq!(NaiveNormalizer.title_case("sword of fire and ice"), "Sword Of Fire And Ice");
        assert_eq!(
            EnhancedNormalizer.title_case("sword of fire and ice"),
            "Sword of Fire and Ice"
        );
        assert_eq!(EnhancedNormalizer.title_case("jace, the mind sculptor"), "Jace, the Mind Sculptor");
        assert_eq!(NaiveNormalizer.title_case("o'brien"), "O'brien");
    }

    #[test]
    fn sentence_cases_each_line() {
        let text = "flying\nwhen @ dies, draw a card. then discard a card.";
        assert_eq!(
            EnhancedNormalizer.sentence_case(text),
            "Flying\nWhen @ dies, draw a card. Then discard a card."
        );
        assert_eq!(NaiveNormalizer.sentence_case(text), text);
    }

    #[test]
    fn bullets_start_sentences() {
        let text = "choose one -\n\u{2022} destroy target artifact.\n\u{2022} draw a card.";
        assert_eq!(
            EnhancedNormalizer.sentence_case(text),
            "Choose one -\n\u{2022} Destroy target artifact.\n\u{2022} Draw a card."
        );
    }

    #[test]
    fn default_strategy_is_enhanced() {
        assert_eq!(Strategy::default(), Strategy::Enhanced);
    }
}
