//! Single mana symbols and their spellings in each dialect.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the five colors, in WUBRG order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    W,
    U,
    B,
    R,
    G,
}

impl Color {
    pub const ALL: [Color; 5] = [Color::W, Color::U, Color::B, Color::R, Color::G];

    pub fn letter(self) -> char {
        match self {
            Color::W => 'W',
            Color::U => 'U',
            Color::B => 'B',
            Color::R => 'R',
            Color::G => 'G',
        }
    }

    /// Case-insensitive.
    pub fn from_letter(ch: char) -> Option<Self> {
        Color::ALL
            .into_iter()
            .find(|c| c.letter() == ch.to_ascii_uppercase())
    }
}

/// Hybrid pairs in their printed order.
const HYBRID_PAIRS: [(Color, Color); 10] = [
    (Color::W, Color::U),
    (Color::W, Color::B),
    (Color::U, Color::B),
    (Color::U, Color::R),
    (Color::B, Color::R),
    (Color::B, Color::G),
    (Color::R, Color::G),
    (Color::R, Color::W),
    (Color::G, Color::W),
    (Color::G, Color::U),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ManaSymbol {
    /// One unit of generic mana.
    Generic,
    Colored(Color),
    Hybrid(Color, Color),
    Phyrexian(Color),
    /// Two generic or one colored.
    TwoHybrid(Color),
    ColorlessPhyrexian,
    Snow,
    X,
    Colorless,
    Energy,
}

impl ManaSymbol {
    /// Hybrid of two colors given in either order.
    pub fn hybrid(a: Color, b: Color) -> Option<Self> {
        HYBRID_PAIRS
            .iter()
            .find(|&&(x, y)| (x, y) == (a, b) || (y, x) == (a, b))
            .map(|&(x, y)| ManaSymbol::Hybrid(x, y))
    }

    /// A symbol written as one letter: `W`, `X`, `S`...
    pub fn from_letter(ch: char) -> Option<Self> {
        if let Some(color) = Color::from_letter(ch) {
            return Some(ManaSymbol::Colored(color));
        }
        let symbol = match ch.to_ascii_uppercase() {
            'P' => ManaSymbol::ColorlessPhyrexian,
            'S' => ManaSymbol::Snow,
            'X' => ManaSymbol::X,
            'C' => ManaSymbol::Colorless,
            'E' => ManaSymbol::Energy,
            _ => return None,
        };
        Some(symbol)
    }

    /// A symbol written as two halves: `W/U`, `G/P`, `2/B`, or the
    /// doubled letters of the encoded dialect.
    pub fn from_pair(a: char, b: char) -> Option<Self> {
        let (a, b) = (a.to_ascii_uppercase(), b.to_ascii_uppercase());
        if a == b {
            return ManaSymbol::from_letter(a);
        }
        match (Color::from_letter(a), Color::from_letter(b)) {
            (Some(x), Some(y)) => ManaSymbol::hybrid(x, y),
            (Some(x), None) if b == 'P' => Some(ManaSymbol::Phyrexian(x)),
            (None, Some(y)) if a == '2' => Some(ManaSymbol::TwoHybrid(y)),
            _ => None,
        }
    }

    /// Token in the encoded dialect, without braces.
    pub fn encoded(self) -> String {
        match self {
            ManaSymbol::Generic => "^".to_string(),
            ManaSymbol::Colored(c) => [c.letter(), c.letter()].iter().collect(),
            ManaSymbol::Hybrid(a, b) => [a.letter(), b.letter()].iter().collect(),
            ManaSymbol::Phyrexian(c) => format!("{}P", c.letter()),
            ManaSymbol::TwoHybrid(c) => format!("2{}", c.letter()),
            ManaSymbol::ColorlessPhyrexian => "PP".to_string(),
            ManaSymbol::Snow => "SS".to_string(),
            ManaSymbol::X => "XX".to_string(),
            ManaSymbol::Colorless => "CC".to_string(),
            ManaSymbol::Energy => "EE".to_string(),
        }
    }

    /// Body of the `{...}` group in printed form. Generic mana has none,
    /// it is summed by the caller.
    pub fn printed(self) -> Option<String> {
        let body = match self {
            ManaSymbol::Generic => return None,
            ManaSymbol::Colored(c) => c.letter().to_string(),
            ManaSymbol::Hybrid(a, b) => format!("{}/{}", a.letter(), b.letter()),
            ManaSymbol::Phyrexian(c) => format!("{}/P", c.letter()),
            ManaSymbol::TwoHybrid(c) => format!("2/{}", c.letter()),
            ManaSymbol::ColorlessPhyrexian => "P".to_string(),
            ManaSymbol::Snow => "S".to_string(),
            ManaSymbol::X => "X".to_string(),
            ManaSymbol::Colorless => "C".to_string(),
            ManaSymbol::Energy => "E".to_string(),
        };
        Some(body)
    }

    /// Contribution to converted mana cost.
    pub fn cmc(self) -> u32 {
        match self {
            ManaSymbol::X | ManaSymbol::Energy => 0,
            ManaSymbol::TwoHybrid(_) => 2,
            _ => 1,
        }
    }

    pub fn colors(self) -> Vec<Color> {
        match self {
            ManaSymbol::Colored(c) | ManaSymbol::Phyrexian(c) | ManaSymbol::TwoHybrid(c) => {
                vec![c]
            }
            ManaSymbol::Hybrid(a, b) => vec![a, b],
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for ManaSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.printed() {
            Some(body) => write!(f, "{{{body}}}"),
            None => write!(f, "{{1}}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hybrids_accept_either_order() {
        assert_eq!(
            ManaSymbol::hybrid(Color::U, Color::W),
            Some(ManaSymbol::Hybrid(Color::W, Color::U))
        );
        assert_eq!(ManaSymbol::hybrid(Color::G, Color::G), None);
        assert_eq!(ManaSymbol::from_pair('w', 'r'), Some(ManaSymbol::Hybrid(Color::R, Color::W)));
    }

    #[test]
    fn pairs_cover_every_dialect_shape() {
        assert_eq!(ManaSymbol::from_pair('G', 'P'), Some(ManaSymbol::Phyrexian(Color::G)));
        assert_eq!(ManaSymbol::from_pair('2', 'B'), Some(ManaSymbol::TwoHybrid(Color::B)));
        assert_eq!(ManaSymbol::from_pair('x', 'x'), Some(ManaSymbol::X));
        assert_eq!(ManaSymbol::from_pair('W', 'Z'), None);
        assert_eq!(ManaSymbol::from_pair('3', 'B'), None);
    }

    #[test]
    fn encoded_and_printed_forms() {
        assert_eq!(ManaSymbol::Colored(Color::R).encoded(), "RR");
        assert_eq!(ManaSymbol::Hybrid(Color::B, Color::G).encoded(), "BG");
        assert_eq!(ManaSymbol::TwoHybrid(Color::W).printed().as_deref(), Some("2/W"));
        assert_eq!(ManaSymbol::Phyrexian(Color::U).to_string(), "{U/P}");
        assert_eq!(ManaSymbol::Generic.printed(), None);
    }
}
