//! Separators, in-text markers and field labels shared by every codec layer.
//!
//! All of these characters are reserved: source text is expected not to
//! contain them before the forward transforms run.

/// Separates whole cards in an encoded file.
pub const CARD_SEP: &str = "\n\n";
/// Separates the faces of a multi-face card.
pub const FACE_SEP: &str = "\n";
/// Separates fields within one face.
pub const FIELD_SEP: char = '|';
/// Stands in for a line break inside the rules text.
pub const NEWLINE: char = '\\';

pub const DASH: char = '~';
pub const BULLET: char = '=';
pub const THIS: char = '@';
pub const COUNTER: char = '%';
/// Placeholder for a cost embedded in rules text.
pub const RESERVED_MANA: char = '$';
pub const CHOICE_OPEN: char = '[';
pub const CHOICE_CLOSE: char = ']';
pub const X: char = 'X';
pub const TAP: char = 'T';
pub const UNTAP: char = 'Q';
/// Replacement for the verb sense of "counter".
pub const COUNTER_RENAME: &str = "uncast";

pub const UNARY_MARKER: char = '&';
pub const UNARY_COUNTER: char = '^';
pub const UNARY_MAX: usize = 20;

pub const MANA_OPEN: char = '{';
pub const MANA_CLOSE: char = '}';
pub const MANA_JSON_HYBRID: char = '/';
pub const MANA_FORUM_OPEN: &str = "[mana]";
pub const MANA_FORUM_CLOSE: &str = "[/mana]";

pub const LABEL_NAME: char = '1';
pub const LABEL_RARITY: char = '0';
pub const LABEL_COST: char = '3';
pub const LABEL_SUPERTYPES: char = '4';
pub const LABEL_TYPES: char = '5';
pub const LABEL_SUBTYPES: char = '6';
pub const LABEL_LOYALTY: char = '7';
pub const LABEL_PT: char = '8';
pub const LABEL_TEXT: char = '9';

pub const RARITY_COMMON: &str = "C";
pub const RARITY_UNCOMMON: &str = "U";
pub const RARITY_RARE: &str = "R";
pub const RARITY_MYTHIC: &str = "M";
pub const RARITY_SPECIAL: &str = "S";
pub const RARITY_BASIC_LAND: &str = "L";

/// (source rarity name, encoded marker)
const RARITIES: [(&str, &str); 6] = [
    ("Common", RARITY_COMMON),
    ("Uncommon", RARITY_UNCOMMON),
    ("Rare", RARITY_RARE),
    ("Mythic Rare", RARITY_MYTHIC),
    ("Special", RARITY_SPECIAL),
    ("Basic Land", RARITY_BASIC_LAND),
];

/// Map a source rarity name to its marker.
pub fn rarity_marker(name: &str) -> Option<&'static str> {
    RARITIES
        .iter()
        .find(|(full, _)| *full == name)
        .map(|(_, marker)| *marker)
}

/// Map a rarity marker back to the source rarity name.
pub fn rarity_name(marker: &str) -> Option<&'static str> {
    RARITIES
        .iter()
        .find(|(_, m)| *m == marker)
        .map(|(full, _)| *full)
}
