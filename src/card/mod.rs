//! The card entity: one face plus an optional other side.
//!
//! Cards are built once, from encoded text ([`Card::from_encoded`]) or a
//! structured record ([`Card::from_source`]), and are read-only after.
//! Malformed input never fails construction; it shows up in the
//! [`Card::parsed`] and [`Card::valid`] flags and in [`Card::other`].

mod field;
mod render;
mod source;

pub use field::{
    CardError, DEFAULT_ORDER, Field, FieldLabels, FieldMap, FieldValue, Format, ParsedFields,
    Position, parse_encoded, position_label,
};
pub use render::{MseMetadata, RenderOptions, RenderStyle};
pub use source::{CardSource, Loyalty};

use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::mana::{ManaCost, ManaText};
use crate::markers::FACE_SEP;
use crate::unary::parse_value;

/// Output randomization used for data augmentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Randomize {
    /// Shuffle the order of the encoded fields.
    pub fields: bool,
    /// Shuffle the symbols inside every mana cost.
    pub mana: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Card {
    name: String,
    rarity: String,
    cost: ManaCost,
    supertypes: Vec<String>,
    types: Vec<String>,
    subtypes: Vec<String>,
    loyalty: String,
    loyalty_value: Option<i64>,
    pt: String,
    pt_p: Option<String>,
    pt_p_value: Option<i64>,
    pt_t: Option<String>,
    pt_t_value: Option<i64>,
    text: ManaText,
    text_lines: Vec<ManaText>,
    text_words: Vec<String>,
    other: Vec<(Position, String)>,
    parsed: bool,
    valid: bool,
    bside: Option<Box<Card>>,
}

type SpecificSetter = fn(&mut Card, Vec<(Position, FieldValue)>) -> Result<(), CardError>;

enum Setter {
    Specific(SpecificSetter),
    Default,
}

/// Setter table. Adding a field without deciding its setter fails to compile.
fn setter_for(field: Field) -> Setter {
    match field {
        Field::Loyalty => Setter::Specific(Card::set_loyalty),
        Field::Pt => Setter::Specific(Card::set_pt),
        Field::Text => Setter::Specific(Card::set_text),
        Field::Other => Setter::Specific(Card::set_other),
        Field::Name
        | Field::Rarity
        | Field::Cost
        | Field::Supertypes
        | Field::Types
        | Field::Subtypes => Setter::Default,
    }
}

impl Card {
    /// Build a card from one encoded chunk. Everything after the first
    /// face separator becomes the other side.
    pub fn from_encoded(src: &str, format: &Format) -> Result<Self, CardError> {
        let (face, rest) = match src.split_once(FACE_SEP) {
            Some((face, rest)) => (face, Some(rest)),
            None => (src, None),
        };
        let bside = rest
            .map(|rest| Card::from_encoded(rest, format))
            .transpose()?
            .map(Box::new);
        Card::build(parse_encoded(face, format), bside)
    }

    /// Build a card from a structured record and its linked other side.
    pub fn from_source(src: &CardSource) -> Result<Self, CardError> {
        let bside = src
            .bside
            .as_deref()
            .map(Card::from_source)
            .transpose()?
            .map(Box::new);
        Card::build(src.fields(), bside)
    }

    fn build(fields: ParsedFields, bside: Option<Box<Card>>) -> Result<Self, CardError> {
        let mut card = Card {
            parsed: fields.parsed && !fields.fields.is_empty(),
            valid: fields.valid,
            bside,
            ..Card::default()
        };
        for (field, values) in fields.fields {
            match setter_for(field) {
                Setter::Specific(set) => set(&mut card, values)?,
                Setter::Default => card.set_default(field, values)?,
            }
        }
        card.other.sort_by_key(|(position, _)| *position);
        Ok(card)
    }

    /// Split off the first value; every further one is demoted into `other`.
    fn take_first(
        &mut self,
        field: Field,
        values: Vec<(Position, FieldValue)>,
    ) -> Option<FieldValue> {
        let mut values = values.into_iter();
        let first = values.next().map(|(_, value)| value);
        for (position, value) in values {
            debug!(%field, position = %position_label(position), "duplicate field");
            self.valid = false;
            self.other.push((position, format!("<{field}> {value}")));
        }
        first
    }

    fn set_default(
        &mut self,
        field: Field,
        values: Vec<(Position, FieldValue)>,
    ) -> Result<(), CardError> {
        let Some(value) = self.take_first(field, values) else {
            return Ok(());
        };
        match (field, value) {
            (Field::Name, FieldValue::Text(s)) => self.name = s,
            (Field::Rarity, FieldValue::Text(s)) => self.rarity = s,
            (Field::Cost, FieldValue::Cost(cost)) => self.cost = cost,
            (Field::Supertypes, FieldValue::List(items)) => self.supertypes = items,
            (Field::Types, FieldValue::List(items)) => self.types = items,
            (Field::Subtypes, FieldValue::List(items)) => self.subtypes = items,
            (field, value) => {
                return Err(CardError::FieldValueMismatch {
                    field,
                    found: value.kind(),
                });
            }
        }
        Ok(())
    }

    fn set_loyalty(&mut self, values: Vec<(Position, FieldValue)>) -> Result<(), CardError> {
        match self.take_first(Field::Loyalty, values) {
            Some(FieldValue::Text(s)) => {
                self.loyalty_value = parse_value(&s);
                self.loyalty = s;
                Ok(())
            }
            Some(value) => Err(mismatch(Field::Loyalty, &value)),
            None => Ok(()),
        }
    }

    fn set_pt(&mut self, values: Vec<(Position, FieldValue)>) -> Result<(), CardError> {
        let s = match self.take_first(Field::Pt, values) {
            Some(FieldValue::Text(s)) => s,
            Some(value) => return Err(mismatch(Field::Pt, &value)),
            None => return Ok(()),
        };
        match s.split('/').collect::<Vec<_>>()[..] {
            [p, t] => {
                self.pt_p_value = parse_value(p);
                self.pt_t_value = parse_value(t);
                self.pt_p = Some(p.to_string());
                self.pt_t = Some(t.to_string());
            }
            _ => self.valid = false,
        }
        self.pt = s;
        Ok(())
    }

    fn set_text(&mut self, values: Vec<(Position, FieldValue)>) -> Result<(), CardError> {
        let text = match self.take_first(Field::Text, values) {
            Some(FieldValue::Rules(text)) => text,
            Some(value) => return Err(mismatch(Field::Text, &value)),
            None => return Ok(()),
        };
        let full = text.encode();
        if !full.is_empty() {
            self.text_lines = text.lines();
            self.text_words = words(&full);
        }
        self.text = text;
        Ok(())
    }

    fn set_other(&mut self, values: Vec<(Position, FieldValue)>) -> Result<(), CardError> {
        for (position, value) in values {
            self.other.push((position, value.to_string()));
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rarity marker, or the raw rarity if it was not recognized.
    pub fn rarity(&self) -> &str {
        &self.rarity
    }

    pub fn cost(&self) -> &ManaCost {
        &self.cost
    }

    pub fn supertypes(&self) -> &[String] {
        &self.supertypes
    }

    pub fn types(&self) -> &[String] {
        &self.types
    }

    pub fn subtypes(&self) -> &[String] {
        &self.subtypes
    }

    /// Loyalty as stored, usually unary.
    pub fn loyalty(&self) -> &str {
        &self.loyalty
    }

    pub fn loyalty_value(&self) -> Option<i64> {
        self.loyalty_value
    }

    /// Power/toughness as stored: `&^^/&^^^`.
    pub fn pt(&self) -> &str {
        &self.pt
    }

    pub fn pt_p(&self) -> Option<&str> {
        self.pt_p.as_deref()
    }

    pub fn pt_p_value(&self) -> Option<i64> {
        self.pt_p_value
    }

    pub fn pt_t(&self) -> Option<&str> {
        self.pt_t.as_deref()
    }

    pub fn pt_t_value(&self) -> Option<i64> {
        self.pt_t_value
    }

    pub fn text(&self) -> &ManaText {
        &self.text
    }

    pub fn text_lines(&self) -> &[ManaText] {
        &self.text_lines
    }

    pub fn text_words(&self) -> &[String] {
        &self.text_words
    }

    /// Unclassified and duplicate values with the position they were read at.
    pub fn other(&self) -> &[(Position, String)] {
        &self.other
    }

    pub fn parsed(&self) -> bool {
        self.parsed
    }

    pub fn valid(&self) -> bool {
        self.valid
    }

    pub fn bside(&self) -> Option<&Card> {
        self.bside.as_deref()
    }

    pub fn is_creature(&self) -> bool {
        field::is_creature(&self.types)
    }

    pub fn is_type(&self, ty: &str) -> bool {
        self.types.iter().any(|t| t == ty)
    }

    /// Encode in the given format, without randomization.
    pub fn encode(&self, format: &Format) -> Result<String, CardError> {
        self.encode_impl::<StdRng>(format, Randomize::default(), None)
    }

    /// Encode with field order and/or mana symbols shuffled by `rng`.
    pub fn encode_with<R: Rng + ?Sized>(
        &self,
        format: &Format,
        randomize: Randomize,
        rng: &mut R,
    ) -> Result<String, CardError> {
        self.encode_impl(format, randomize, Some(rng))
    }

    fn encode_impl<R: Rng + ?Sized>(
        &self,
        format: &Format,
        randomize: Randomize,
        mut rng: Option<&mut R>,
    ) -> Result<String, CardError> {
        let mut out = Vec::with_capacity(format.field_order.len() + 2);
        for &field in &format.field_order {
            let mut value = match field {
                Field::Name => self.name.clone(),
                Field::Rarity => self.rarity.clone(),
                Field::Cost => match rng.as_deref_mut() {
                    Some(rng) if randomize.mana => self.cost.encode_shuffled(rng),
                    _ => self.cost.encode(),
                },
                Field::Supertypes => self.supertypes.join(" "),
                Field::Types => self.types.join(" "),
                Field::Subtypes => self.subtypes.join(" "),
                Field::Loyalty => self.loyalty.clone(),
                Field::Pt => self.pt.clone(),
                Field::Text => match rng.as_deref_mut() {
                    Some(rng) if randomize.mana => self.text.encode_shuffled(rng),
                    _ => self.text.encode(),
                },
                Field::Other => return Err(CardError::NotEncodable(field)),
            };
            if let Some(label) = format.labels.as_ref().and_then(|l| l.get(field)) {
                value.insert(0, label);
            }
            out.push(value);
        }

        if randomize.fields {
            if let Some(rng) = rng.as_deref_mut() {
                out.shuffle(rng);
            }
        }
        if format.initial_sep {
            out.insert(0, String::new());
        }
        if format.final_sep {
            out.push(String::new());
        }

        let mut encoded = out.join(&format.field_sep.to_string());
        if let Some(bside) = &self.bside {
            encoded.push_str(FACE_SEP);
            encoded.push_str(&bside.encode_impl(format, randomize, rng)?);
        }
        Ok(encoded)
    }

    /// Parenthesized token stream used as a similarity key.
    pub fn vectorize(&self) -> String {
        let mut out = String::new();
        if !self.rarity.is_empty() {
            out.push_str(&format!("({}) ", self.rarity));
        }
        let cost = self.cost.vectorize(true);
        if !cost.is_empty() {
            out.push_str(&cost);
            out.push(' ');
        }
        let types: Vec<String> = self
            .supertypes
            .iter()
            .chain(&self.types)
            .map(|t| format!("({t})"))
            .collect();
        if !types.is_empty() {
            out.push_str(&types.join(" "));
            out.push(' ');
        }
        if !self.subtypes.is_empty() {
            out.push_str(&self.subtypes.join(" "));
            out.push(' ');
        }
        if !self.pt.is_empty() {
            let pt: Vec<String> = self
                .pt
                .replace('/', "/ /")
                .split_whitespace()
                .map(|s| format!("({s})"))
                .collect();
            out.push_str(&pt.join(" "));
            out.push(' ');
        }
        if !self.loyalty.is_empty() {
            out.push_str(&format!("(({})) ", self.loyalty));
        }
        out.push_str(&self.text.vectorize());
        match &self.bside {
            Some(bside) => format!("_ASIDE_ {out}\n\n_BSIDE_ {}", bside.vectorize()),
            None => out,
        }
    }
}

fn mismatch(field: Field, value: &FieldValue) -> CardError {
    CardError::FieldValueMismatch {
        field,
        found: value.kind(),
    }
}

/// Lower-case words of encoded text; markers and digits split words.
fn words(encoded: &str) -> Vec<String> {
    encoded
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c == '\'' {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creature_format() -> Format {
        Format::unlabeled(vec![Field::Name, Field::Types, Field::Pt, Field::Text])
    }

    #[test]
    fn every_field_has_a_setter() {
        for field in Field::ALL {
            let _ = setter_for(field);
        }
    }

    #[test]
    fn splits_power_and_toughness() {
        let card = Card::from_encoded("|bears|creature|&^^/&^^^||", &creature_format())
            .expect("card");
        assert_eq!(card.pt_p(), Some("&^^"));
        assert_eq!(card.pt_p_value(), Some(2));
        assert_eq!(card.pt_t_value(), Some(3));
        assert!(card.valid());
    }

    #[test]
    fn malformed_pt_is_invalid() {
        let card = Card::from_encoded("|bears|creature|&^^|", &creature_format()).expect("card");
        assert_eq!(card.pt(), "&^^");
        assert_eq!(card.pt_p(), None);
        assert!(!card.valid());
    }

    #[test]
    fn text_lines_and_words() {
        let card = Card::from_encoded(
            "|sage|creature|&^/&^|flying\\{^UU}, T: draw a card.|",
            &creature_format(),
        )
        .expect("card");
        assert_eq!(card.text_lines().len(), 2);
        assert_eq!(card.text_words(), ["flying", "draw", "a", "card"]);
    }

    #[test]
    fn duplicate_values_are_demoted() {
        let format = Format::unlabeled(vec![Field::Name, Field::Types, Field::Name]);
        let card = Card::from_encoded("|one|instant|two|", &format).expect("card");
        assert_eq!(card.name(), "one");
        assert!(!card.valid());
        assert_eq!(card.other(), [(Some(2), "<name> two".to_string())]);
    }

    #[test]
    fn mismatched_value_shape_is_fatal() {
        let mut card = Card::default();
        let err = card
            .set_default(Field::Name, vec![(None, FieldValue::List(Vec::new()))])
            .expect_err("list is not a name");
        assert_eq!(
            err,
            CardError::FieldValueMismatch {
                field: Field::Name,
                found: "list"
            }
        );
    }

    #[test]
    fn other_is_not_encodable() {
        let card = Card::default();
        let format = Format::unlabeled(vec![Field::Name, Field::Other]);
        assert_eq!(
            card.encode(&format),
            Err(CardError::NotEncodable(Field::Other))
        );
    }

    #[test]
    fn empty_input_is_unparsed() {
        let card = Card::from_encoded("", &Format::default()).expect("card");
        assert!(!card.parsed());
    }

    #[test]
    fn vectorizes_both_faces() {
        let card = Card::from_encoded(
            "|1fire|5instant|0U|3{^RR}|\n|1ice|5instant|0U|3{^UU}|",
            &Format::default(),
        )
        .expect("card");
        assert_eq!(
            card.vectorize(),
            "_ASIDE_ (U) (RR) (^) (instant) \n\n_BSIDE_ (U) (UU) (^) (instant) "
        );
    }
}
