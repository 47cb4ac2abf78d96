use std::fmt;

use serde::{Deserialize, Serialize};

use super::field::{Field, FieldValue, ParsedFields};
use crate::mana::{ManaCost, ManaText};
use crate::markers::{DASH, rarity_marker};
use crate::normalize;
use crate::transforms::{self, PassContext};
use crate::unary::to_unary;

/// One printing as it appears in the structured corpus.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardSource {
    pub name: Option<String>,
    pub mana_cost: Option<String>,
    pub supertypes: Option<Vec<String>>,
    pub types: Option<Vec<String>>,
    pub subtypes: Option<Vec<String>>,
    pub text: Option<String>,
    pub power: Option<String>,
    pub toughness: Option<String>,
    pub loyalty: Option<Loyalty>,
    pub rarity: Option<String>,
    pub set_name: Option<String>,
    pub number: Option<String>,
    pub names: Option<Vec<String>>,
    pub layout: Option<String>,
    /// Second face, linked by the corpus loader.
    pub bside: Option<Box<CardSource>>,
}

/// Loyalty is a number in most printings and a string in a few.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Loyalty {
    Number(i64),
    Text(String),
}

impl fmt::Display for Loyalty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Loyalty::Number(n) => write!(f, "{n}"),
            Loyalty::Text(s) => f.write_str(s),
        }
    }
}

const NAME_NUMBERS: [(&str, &str); 3] = [
    ("100,000", "one hundred thousand"),
    ("1,000", "one thousand"),
    ("1996", "nineteen ninety~six"),
];

fn sanitize_name(name: &str) -> String {
    let mut out = name.replace(['!', '?'], "").replace('-', &DASH.to_string());
    for (digits, words) in NAME_NUMBERS {
        out = out.replace(digits, words);
    }
    out
}

fn fold_list(items: &[String]) -> Vec<String> {
    let normalizer = normalize::current();
    items
        .iter()
        .map(|s| normalizer.to_ascii(&s.to_lowercase()))
        .collect()
}

impl CardSource {
    /// Read the fields of this face. The `bside` is not visited.
    pub fn fields(&self) -> ParsedFields {
        let normalizer = normalize::current();
        let mut out = ParsedFields::new();

        let raw_name = self.name.as_deref().map(str::to_lowercase);
        match &raw_name {
            Some(name) => {
                let name = normalizer.to_ascii(&sanitize_name(name));
                out.add(Field::Name, None, FieldValue::Text(name));
            }
            None => out.parsed = false,
        }

        if let Some(raw) = &self.mana_cost {
            let cost = ManaCost::from_json(raw);
            out.parsed &= cost.parsed();
            out.valid &= cost.valid();
            out.add(Field::Cost, None, FieldValue::Cost(cost));
        }

        for (field, list) in [
            (Field::Supertypes, &self.supertypes),
            (Field::Types, &self.types),
            (Field::Subtypes, &self.subtypes),
        ] {
            if let Some(items) = list {
                out.add(field, None, FieldValue::List(fold_list(items)));
            }
        }
        if self.types.is_none() {
            out.parsed = false;
        }

        match self.rarity.as_deref() {
            Some(rarity) => {
                let marker = rarity_marker(rarity);
                if marker.is_none() {
                    out.parsed = false;
                }
                let value = marker.map_or_else(|| rarity.to_string(), str::to_string);
                out.add(Field::Rarity, None, FieldValue::Text(value));
            }
            None => out.parsed = false,
        }

        if let Some(loyalty) = &self.loyalty {
            out.add(
                Field::Loyalty,
                None,
                FieldValue::Text(to_unary(&loyalty.to_string())),
            );
        }

        let stat = |s: &str| normalizer.to_ascii(&to_unary(s));
        let pt = match (&self.power, &self.toughness) {
            (Some(p), Some(t)) => Some(format!("{}/{}", stat(p), stat(t))),
            (Some(p), None) => Some(format!("{}/", stat(p))),
            (None, Some(t)) => Some(format!("/{}", stat(t))),
            (None, None) => None,
        };
        if let Some(pt) = pt {
            out.parsed &= self.power.is_some() && self.toughness.is_some();
            out.add(Field::Pt, None, FieldValue::Text(pt));
        }

        if let Some(text) = &self.text {
            let ctx = PassContext::new(raw_name.as_deref().unwrap_or(""));
            let canonical = transforms::pass(&text.to_lowercase(), &ctx);
            let canonical = normalizer.to_ascii(&canonical);
            let mtext = ManaText::from_json(canonical.trim());
            out.valid &= mtext.valid();
            out.add(Field::Text, None, FieldValue::Rules(mtext));
        }

        out.valid &= out.check();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bears() -> CardSource {
        serde_json::from_str(
            r#"{
                "name": "Grizzly Bears",
                "manaCost": "{1}{G}",
                "types": ["Creature"],
                "subtypes": ["Bear"],
                "power": "2",
                "toughness": "2",
                "rarity": "Common",
                "setName": "Limited Edition Alpha"
            }"#,
        )
        .expect("card json")
    }

    #[test]
    fn reads_camel_case_records() {
        let src = bears();
        assert_eq!(src.mana_cost.as_deref(), Some("{1}{G}"));
        assert_eq!(src.set_name.as_deref(), Some("Limited Edition Alpha"));
        assert!(src.bside.is_none());
    }

    #[test]
    fn loyalty_accepts_numbers_and_strings() {
        let numeric: CardSource = serde_json::from_str(r#"{"loyalty": 3}"#).expect("json");
        let text: CardSource = serde_json::from_str(r#"{"loyalty": "X"}"#).expect("json");
        assert_eq!(numeric.loyalty, Some(Loyalty::Number(3)));
        assert_eq!(text.loyalty, Some(Loyalty::Text("X".to_string())));
    }

    #[test]
    fn fields_are_canonical() {
        let fields = bears().fields();
        assert!(fields.parsed && fields.valid);
        assert_eq!(
            fields.fields[&Field::Name],
            vec![(None, FieldValue::Text("grizzly bears".to_string()))]
        );
        assert_eq!(
            fields.fields[&Field::Pt],
            vec![(None, FieldValue::Text("&^^/&^^".to_string()))]
        );
        assert_eq!(
            fields.fields[&Field::Rarity],
            vec![(None, FieldValue::Text("C".to_string()))]
        );
    }

    #[test]
    fn unknown_rarity_is_kept_but_unparsed() {
        let src = CardSource {
            rarity: Some("Timeshifted".to_string()),
            ..bears()
        };
        let fields = src.fields();
        assert!(!fields.parsed);
        assert_eq!(
            fields.fields[&Field::Rarity],
            vec![(None, FieldValue::Text("Timeshifted".to_string()))]
        );
    }

    #[test]
    fn half_pt_is_unparsed() {
        let src = CardSource {
            toughness: None,
            ..bears()
        };
        let fields = src.fields();
        assert!(!fields.parsed);
        assert_eq!(
            fields.fields[&Field::Pt],
            vec![(None, FieldValue::Text("&^^/".to_string()))]
        );
    }

    #[test]
    fn names_are_sanitized() {
        assert_eq!(sanitize_name("yes! no? half-life"), "yes no half~life");
        assert_eq!(sanitize_name("1996 world champion"), "nineteen ninety~six world champion");
    }
}
