//! Core library for converting trading cards between a structured corpus,
//! a compact model-friendly encoding and readable spoiler text.

pub mod markers;
pub mod normalize;
pub mod transforms;
pub mod unary;

mod card;
mod corpus;
mod mana;
mod similarity;

pub use card::{
    Card, CardError, CardSource, DEFAULT_ORDER, Field, FieldLabels, FieldMap, FieldValue, Format,
    Loyalty, MseMetadata, ParsedFields, Position, Randomize, RenderOptions, RenderStyle,
    parse_encoded, position_label,
};
pub use corpus::{
    Corpus, Tally, cards_from_corpus, decode_text, encode_cards, load_json_corpus,
    parse_json_corpus, select_printing, write_cards,
};
pub use mana::{Color, Dialect, ManaCost, ManaSymbol, ManaText};
pub use similarity::Similarity;

/// Decode a single encoded card in the default format.
pub fn decode_card(text: &str) -> Result<Card, CardError> {
    Card::from_encoded(text, &Format::default())
}

/// Encode a single card in the default format.
pub fn encode_card(card: &Card) -> Result<String, CardError> {
    card.encode(&Format::default())
}
