use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::symbol::{Color, ManaSymbol};
use crate::markers::{
    MANA_CLOSE, MANA_FORUM_CLOSE, MANA_FORUM_OPEN, MANA_JSON_HYBRID, MANA_OPEN, UNARY_MAX,
};

/// Spelling a cost was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// `{^^RR}`
    Encoded,
    /// `{2}{R}`
    Json,
    /// `2R`
    Plain,
}

/// An ordered mana cost plus the flags recorded while reading it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManaCost {
    symbols: Vec<ManaSymbol>,
    parsed: bool,
    valid: bool,
}

impl Default for ManaCost {
    fn default() -> Self {
        Self {
            symbols: Vec::new(),
            parsed: true,
            valid: true,
        }
    }
}

impl ManaCost {
    pub fn parse(raw: &str, dialect: Dialect) -> Self {
        let mut cost = ManaCost::default();
        let raw = raw.trim();
        if raw.is_empty() {
            return cost;
        }
        match dialect {
            Dialect::Encoded => cost.read_encoded(raw),
            Dialect::Json => cost.read_json(raw),
            Dialect::Plain => cost.read_plain(raw),
        }
        cost
    }

    pub fn from_encoded(raw: &str) -> Self {
        Self::parse(raw, Dialect::Encoded)
    }

    pub fn from_json(raw: &str) -> Self {
        Self::parse(raw, Dialect::Json)
    }

    pub fn from_plain(raw: &str) -> Self {
        Self::parse(raw, Dialect::Plain)
    }

    fn reject(&mut self) {
        self.parsed = false;
        self.valid = false;
    }

    fn read_encoded(&mut self, raw: &str) {
        let Some(body) = raw
            .strip_prefix(MANA_OPEN)
            .and_then(|r| r.strip_suffix(MANA_CLOSE))
        else {
            self.reject();
            return;
        };
        let chars: Vec<char> = body.chars().collect();
        let mut i = 0;
        while i < chars.len() {
            if chars[i] == '^' {
                self.symbols.push(ManaSymbol::Generic);
                i += 1;
                continue;
            }
            let pair = chars
                .get(i + 1)
                .and_then(|&next| ManaSymbol::from_pair(chars[i], next));
            if let Some(symbol) = pair {
                self.symbols.push(symbol);
                i += 2;
            } else if let Some(symbol) = ManaSymbol::from_letter(chars[i]) {
                self.symbols.push(symbol);
                i += 1;
            } else {
                self.reject();
                i += 1;
            }
        }
    }

    fn read_json(&mut self, raw: &str) {
        let mut rest = raw;
        while !rest.is_empty() {
            let Some(open) = rest.find(MANA_OPEN) else {
                self.reject();
                return;
            };
            if !rest[..open].trim().is_empty() {
                self.reject();
            }
            let Some(close) = rest[open..].find(MANA_CLOSE) else {
                self.reject();
                return;
            };
            self.read_group(&rest[open + 1..open + close]);
            rest = &rest[open + close + 1..];
        }
    }

    /// One `{...}` body, or one plain token. Generic amounts above
    /// [`UNARY_MAX`] are clamped and mark the cost unparsed.
    fn read_group(&mut self, group: &str) {
        if !group.is_empty() && group.chars().all(|c| c.is_ascii_digit()) {
            let n = match group.parse::<usize>() {
                Ok(n) if n <= UNARY_MAX => n,
                _ => {
                    debug!(group, max = UNARY_MAX, "clamping generic mana");
                    self.reject();
                    UNARY_MAX
                }
            };
            self.symbols
                .extend(std::iter::repeat_n(ManaSymbol::Generic, n));
            return;
        }
        let chars: Vec<char> = group.chars().collect();
        match chars[..] {
            [ch] => match ManaSymbol::from_letter(ch) {
                Some(symbol) => self.symbols.push(symbol),
                None => self.reject(),
            },
            [a, MANA_JSON_HYBRID, b] => self.read_halves(a, b),
            _ => self.reject(),
        }
    }

    fn read_halves(&mut self, a: char, b: char) {
        if let Some(symbol) = ManaSymbol::from_pair(a, b).filter(|_| a != b) {
            self.symbols.push(symbol);
            return;
        }
        // keep whichever half is recognizable
        self.valid = false;
        match ManaSymbol::from_letter(a).or_else(|| ManaSymbol::from_letter(b)) {
            Some(symbol) => self.symbols.push(symbol),
            None => self.parsed = false,
        }
    }

    fn read_plain(&mut self, raw: &str) {
        let chars: Vec<char> = raw.chars().collect();
        let mut i = 0;
        while i < chars.len() {
            let ch = chars[i];
            if ch.is_whitespace() {
                i += 1;
            } else if chars.get(i + 1) == Some(&MANA_JSON_HYBRID) && i + 2 < chars.len() {
                self.read_halves(ch, chars[i + 2]);
                i += 3;
            } else if ch.is_ascii_digit() {
                let end = (i..chars.len())
                    .find(|&j| !chars[j].is_ascii_digit())
                    .unwrap_or(chars.len());
                let digits: String = chars[i..end].iter().collect();
                self.read_group(&digits);
                i = end;
            } else {
                match ManaSymbol::from_letter(ch) {
                    Some(symbol) => self.symbols.push(symbol),
                    None => self.reject(),
                }
                i += 1;
            }
        }
    }

    pub fn symbols(&self) -> &[ManaSymbol] {
        &self.symbols
    }

    /// Every token matched a known symbol.
    pub fn parsed(&self) -> bool {
        self.parsed
    }

    /// No malformed hybrid or phyrexian halves.
    pub fn valid(&self) -> bool {
        self.valid
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Converted mana cost.
    pub fn cmc(&self) -> u32 {
        self.symbols.iter().map(|s| s.cmc()).sum()
    }

    /// Color letters in WUBRG order, each once.
    pub fn colors(&self) -> String {
        let mut colors: Vec<Color> = self.symbols.iter().flat_map(|s| s.colors()).collect();
        colors.sort_unstable();
        colors.dedup();
        colors.into_iter().map(Color::letter).collect()
    }

    fn generic(&self) -> usize {
        self.symbols
            .iter()
            .filter(|s| **s == ManaSymbol::Generic)
            .count()
    }

    pub fn encode(&self) -> String {
        encode_symbols(&self.symbols)
    }

    /// Encoded form with whole symbols shuffled.
    pub fn encode_shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let mut symbols = self.symbols.clone();
        symbols.shuffle(rng);
        encode_symbols(&symbols)
    }

    /// Printed form: `{2}{G}`, or `[mana]2G[/mana]` for forums.
    pub fn format(&self, forum: bool) -> String {
        if self.is_empty() {
            return "_NOCOST_".to_string();
        }
        let generic = self.generic();
        let rest = self.symbols.iter().filter_map(|s| s.printed());
        if forum {
            let mut out = String::from(MANA_FORUM_OPEN);
            if generic > 0 {
                out.push_str(&generic.to_string());
            }
            for body in rest {
                if body.len() == 1 {
                    out.push_str(&body);
                } else {
                    out.push_str(&format!("{{{body}}}"));
                }
            }
            out.push_str(MANA_FORUM_CLOSE);
            out
        } else {
            let mut out = String::new();
            if generic > 0 {
                out.push_str(&format!("{{{generic}}}"));
            }
            for body in rest {
                out.push_str(&format!("{{{body}}}"));
            }
            out
        }
    }

    /// Sorted encoded tokens, one per symbol.
    pub fn vectorize(&self, delimit: bool) -> String {
        let mut tokens: Vec<String> = self.symbols.iter().map(|s| s.encoded()).collect();
        tokens.sort();
        if delimit {
            tokens.iter().map(|t| format!("({t})")).collect::<Vec<_>>().join(" ")
        } else {
            tokens.join(" ")
        }
    }
}

fn encode_symbols(symbols: &[ManaSymbol]) -> String {
    if symbols.is_empty() {
        return String::new();
    }
    let mut out = String::from(MANA_OPEN);
    for symbol in symbols {
        out.push_str(&symbol.encoded());
    }
    out.push(MANA_CLOSE);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn oversized_generic_is_clamped() {
        for cost in [
            ManaCost::from_json("{18446744073709551615}"),
            ManaCost::from_json("{1000000}"),
            ManaCost::from_json("{99999999999999999999999}"),
            ManaCost::from_plain("1000000G"),
        ] {
            assert!(!cost.parsed());
            assert!(!cost.valid());
            let generic = cost
                .symbols()
                .iter()
                .filter(|s| **s == ManaSymbol::Generic)
                .count();
            assert_eq!(generic, UNARY_MAX);
        }
        let twenty = ManaCost::from_json("{20}");
        assert!(twenty.parsed());
        assert_eq!(twenty.cmc(), 20);
    }

    #[test]
    fn reads_json_costs() {
        let cost = ManaCost::from_json("{2}{W}{W/U}{G/P}{2/B}{X}");
        assert!(cost.parsed() && cost.valid());
        assert_eq!(cost.encode(), "{^^WWWUGP2BXX}");
        assert_eq!(cost.cmc(), 7);
        assert_eq!(cost.colors(), "WUBG");
    }

    #[test]
    fn reads_encoded_costs() {
        let cost = ManaCost::from_encoded("{^^RRUB}");
        assert!(cost.parsed() && cost.valid());
        assert_eq!(cost.format(false), "{2}{R}{U/B}");
        assert_eq!(cost.format(true), "[mana]2R{U/B}[/mana]");
    }

    #[test]
    fn lone_letter_is_accepted() {
        let cost = ManaCost::from_encoded("{r}");
        assert!(cost.parsed() && cost.valid());
        assert_eq!(cost.symbols(), [ManaSymbol::Colored(Color::R)]);
    }

    #[test]
    fn malformed_encoded_costs_are_flagged() {
        let bare = ManaCost::from_encoded("RR");
        assert!(!bare.parsed() && !bare.valid());
        let junk = ManaCost::from_encoded("{RR#}");
        assert!(!junk.parsed() && !junk.valid());
        assert_eq!(junk.symbols(), [ManaSymbol::Colored(Color::R)]);
    }

    #[test]
    fn bad_hybrid_keeps_best_effort_half() {
        let cost = ManaCost::from_json("{W/Z}");
        assert!(cost.parsed());
        assert!(!cost.valid());
        assert_eq!(cost.symbols(), [ManaSymbol::Colored(Color::W)]);
    }

    #[test]
    fn reads_plain_costs() {
        let cost = ManaCost::from_plain("2WW");
        assert_eq!(cost.encode(), "{^^WWWW}");
        let hybrid = ManaCost::from_plain("W/U 2/G");
        assert_eq!(
            hybrid.symbols(),
            [ManaSymbol::Hybrid(Color::W, Color::U), ManaSymbol::TwoHybrid(Color::G)]
        );
    }

    #[test]
    fn empty_cost_is_valid_and_silent() {
        let cost = ManaCost::from_json("");
        assert!(cost.parsed() && cost.valid());
        assert_eq!(cost.encode(), "");
        assert_eq!(cost.format(false), "_NOCOST_");
        assert_eq!(cost.vectorize(true), "");
    }

    #[test]
    fn shuffle_keeps_whole_symbols() {
        let cost = ManaCost::from_json("{1}{W/U}{G/P}{2/B}");
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let shuffled = ManaCost::from_encoded(&cost.encode_shuffled(&mut rng));
            let mut a = shuffled.symbols().to_vec();
            let mut b = cost.symbols().to_vec();
            a.sort();
            b.sort();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn vectorizes_sorted_tokens() {
        let cost = ManaCost::from_json("{G}{1}{W}");
        assert_eq!(cost.vectorize(true), "(GG) (WW) (^)");
        assert_eq!(cost.vectorize(false), "GG WW ^");
    }
}
