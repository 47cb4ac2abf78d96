use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::mana::{ManaCost, ManaText};
use crate::markers::{
    FIELD_SEP, LABEL_COST, LABEL_LOYALTY, LABEL_NAME, LABEL_PT, LABEL_RARITY, LABEL_SUBTYPES,
    LABEL_SUPERTYPES, LABEL_TEXT, LABEL_TYPES,
};

/// The fields of one card face. `Other` collects what could not be
/// classified and is never encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Rarity,
    Cost,
    Supertypes,
    Types,
    Subtypes,
    Loyalty,
    Pt,
    Text,
    Other,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::Name,
        Field::Rarity,
        Field::Cost,
        Field::Supertypes,
        Field::Types,
        Field::Subtypes,
        Field::Loyalty,
        Field::Pt,
        Field::Text,
        Field::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Rarity => "rarity",
            Field::Cost => "cost",
            Field::Supertypes => "supertypes",
            Field::Types => "types",
            Field::Subtypes => "subtypes",
            Field::Loyalty => "loyalty",
            Field::Pt => "pt",
            Field::Text => "text",
            Field::Other => "other",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| CardError::UnknownField(s.to_string()))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CardError {
    #[error("unknown field: '{0}'")]
    UnknownField(String),
    #[error("field '{0}' cannot be encoded")]
    NotEncodable(Field),
    #[error("field '{field}' cannot hold a {found} value")]
    FieldValueMismatch { field: Field, found: &'static str },
}

/// Where a value was read: the slot index in encoded text, or `None`
/// for a structured record.
pub type Position = Option<usize>;

pub fn position_label(position: Position) -> String {
    match position {
        Some(idx) => idx.to_string(),
        None => "-1".to_string(),
    }
}

/// A raw field value before it is stored on a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
    Cost(ManaCost),
    Rules(ManaText),
}

impl FieldValue {
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::List(_) => "list",
            FieldValue::Cost(_) => "cost",
            FieldValue::Rules(_) => "rules",
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Cost(cost) => cost.is_empty(),
            FieldValue::Rules(text) => text.is_empty(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::List(items) => f.write_str(&items.join(" ")),
            FieldValue::Cost(cost) => f.write_str(&cost.encode()),
            FieldValue::Rules(text) => f.write_str(&text.encode()),
        }
    }
}

pub type FieldMap = BTreeMap<Field, Vec<(Position, FieldValue)>>;

/// The type line names a creature.
pub(crate) fn is_creature(types: &[String]) -> bool {
    types.iter().any(|t| t == "creature")
}

/// Result of reading one face, before a card is built from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFields {
    pub parsed: bool,
    pub valid: bool,
    pub fields: FieldMap,
}

impl ParsedFields {
    pub(crate) fn new() -> Self {
        Self {
            parsed: true,
            valid: true,
            fields: FieldMap::new(),
        }
    }

    /// Record a value; empty values are dropped.
    pub(crate) fn add(&mut self, field: Field, position: Position, value: FieldValue) {
        if value.is_empty() {
            return;
        }
        self.fields.entry(field).or_default().push((position, value));
    }

    /// Required fields are present and creatures, and only creatures,
    /// carry power/toughness.
    pub fn check(&self) -> bool {
        let (Some(_), Some(types)) = (
            self.fields.get(&Field::Name),
            self.fields.get(&Field::Types),
        ) else {
            return false;
        };
        let creature = types.iter().any(|(_, value)| {
            matches!(value, FieldValue::List(items) if is_creature(items))
        });
        creature == self.fields.contains_key(&Field::Pt)
    }

    /// Flip `parsed` off when a required field is missing.
    pub(crate) fn require(&mut self) {
        if !self.fields.contains_key(&Field::Name) || !self.fields.contains_key(&Field::Types) {
            self.parsed = false;
        }
    }
}

/// Label character for each labeled field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldLabels(BTreeMap<Field, char>);

impl Default for FieldLabels {
    fn default() -> Self {
        Self(BTreeMap::from([
            (Field::Name, LABEL_NAME),
            (Field::Rarity, LABEL_RARITY),
            (Field::Cost, LABEL_COST),
            (Field::Supertypes, LABEL_SUPERTYPES),
            (Field::Types, LABEL_TYPES),
            (Field::Subtypes, LABEL_SUBTYPES),
            (Field::Loyalty, LABEL_LOYALTY),
            (Field::Pt, LABEL_PT),
            (Field::Text, LABEL_TEXT),
        ]))
    }
}

impl FieldLabels {
    pub fn get(&self, field: Field) -> Option<char> {
        self.0.get(&field).copied()
    }

    pub fn field(&self, label: char) -> Option<Field> {
        self.0
            .iter()
            .find(|&(_, &l)| l == label)
            .map(|(&field, _)| field)
    }
}

/// Field order, labels and separators of an encoded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Format {
    pub field_order: Vec<Field>,
    pub labels: Option<FieldLabels>,
    pub field_sep: char,
    pub initial_sep: bool,
    pub final_sep: bool,
}

pub const DEFAULT_ORDER: [Field; 9] = [
    Field::Name,
    Field::Supertypes,
    Field::Types,
    Field::Loyalty,
    Field::Subtypes,
    Field::Rarity,
    Field::Pt,
    Field::Cost,
    Field::Text,
];

impl Default for Format {
    fn default() -> Self {
        Self {
            field_order: DEFAULT_ORDER.to_vec(),
            labels: Some(FieldLabels::default()),
            field_sep: FIELD_SEP,
            initial_sep: true,
            final_sep: true,
        }
    }
}

impl Format {
    /// Old files written without a rarity field.
    pub fn legacy() -> Self {
        Self {
            field_order: DEFAULT_ORDER
                .into_iter()
                .filter(|&f| f != Field::Rarity)
                .collect(),
            ..Self::default()
        }
    }

    /// Positional only, no labels.
    pub fn unlabeled(field_order: Vec<Field>) -> Self {
        Self {
            field_order,
            labels: None,
            ..Self::default()
        }
    }
}

/// Read the fields of one face from its encoded text.
pub fn parse_encoded(src: &str, format: &Format) -> ParsedFields {
    let mut out = ParsedFields::new();
    let slots: Vec<&str> = src.split(format.field_sep).collect();
    let last = slots.len().saturating_sub(1);
    let mut idx = 0;
    for (true_idx, slot) in slots.into_iter().enumerate() {
        if slot.is_empty() {
            // boundary separators carry no slot, interior ones keep positions aligned
            if true_idx != 0 && true_idx != last {
                idx += 1;
            }
            continue;
        }

        let mut value = slot.to_string();
        let mut labeled = None;
        if let Some(labels) = &format.labels {
            if let Some((at, field)) = slot
                .char_indices()
                .find_map(|(at, ch)| labels.field(ch).map(|field| (at, field)))
            {
                value.remove(at);
                labeled = Some(field);
            }
        }

        let field = match labeled.or_else(|| format.field_order.get(idx).copied()) {
            Some(field) => field,
            None => {
                debug!(position = idx, slot, "unrecognized field");
                out.parsed = false;
                out.valid = false;
                Field::Other
            }
        };

        let value = match field {
            Field::Cost => {
                let cost = ManaCost::from_encoded(&value);
                out.parsed &= cost.parsed();
                out.valid &= cost.valid();
                FieldValue::Cost(cost)
            }
            Field::Text => {
                let text = ManaText::from_encoded(&value);
                out.valid &= text.valid();
                FieldValue::Rules(text)
            }
            Field::Supertypes | Field::Types | Field::Subtypes => FieldValue::List(
                value.split_whitespace().map(str::to_string).collect(),
            ),
            _ => FieldValue::Text(value),
        };
        out.add(field, Some(idx), value);
        idx += 1;
    }
    out.require();
    out.valid &= out.check();
    out
}
