//! Whole-file drivers: loading a structured corpus, splitting encoded
//! files into cards, tallying the results and writing spoilers.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use rand::Rng;
use serde::Deserialize;
use tracing::{info, warn};

use crate::card::{Card, CardError, CardSource, Format, Randomize, RenderOptions, RenderStyle};
use crate::markers::{CARD_SEP, RARITY_SPECIAL, rarity_marker};
use crate::similarity::Similarity;

/// Printings grouped by lower-cased card name.
pub type Corpus = BTreeMap<String, Vec<CardSource>>;

const EXCLUDED_SETS: &[&str] = &["Unglued", "Unhinged", "Celebration"];

/// Cards examined by the legacy-format check.
const LEGACY_WINDOW: usize = 16;
const LEGACY_THRESHOLD: usize = 10;

#[derive(Debug, Deserialize)]
struct SetRecord {
    #[serde(default)]
    name: String,
    #[serde(default)]
    cards: Vec<CardSource>,
}

/// Read an all-sets JSON document from disk.
pub fn load_json_corpus(path: &Path) -> Result<Corpus> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read corpus {}", path.display()))?;
    let corpus = parse_json_corpus(&raw)
        .with_context(|| format!("failed to parse corpus {}", path.display()))?;
    info!(path = %path.display(), names = corpus.len(), "loaded corpus");
    Ok(corpus)
}

/// Group the printings of an all-sets document by name. Second halves
/// (`<number>b`) are attached to their first half instead of standing alone.
pub fn parse_json_corpus(raw: &str) -> Result<Corpus> {
    let sets: BTreeMap<String, SetRecord> =
        serde_json::from_str(raw).context("corpus is not an all-sets document")?;

    let mut corpus = Corpus::new();
    for (code, set) in sets {
        let mut halves: HashMap<String, CardSource> = HashMap::new();
        let mut fronts = Vec::with_capacity(set.cards.len());
        for mut card in set.cards {
            card.set_name = Some(set.name.clone());
            match card.number.as_deref().and_then(|n| n.strip_suffix('b')) {
                Some(number) => {
                    halves.insert(format!("{code}_{number}"), card);
                }
                None => fronts.push(card),
            }
        }

        for mut card in fronts {
            let key = card
                .number
                .as_deref()
                .and_then(|n| n.strip_suffix('a'))
                .map(|number| format!("{code}_{number}"));
            if let Some(half) = key.and_then(|key| halves.remove(&key)) {
                if half.name != card.name {
                    card.bside = Some(Box::new(half));
                }
            }
            let Some(name) = card.name.as_deref().map(str::to_lowercase) else {
                continue;
            };
            corpus.entry(name).or_default().push(card);
        }
    }
    Ok(corpus)
}

fn usable(printing: &CardSource) -> bool {
    let special = printing
        .rarity
        .as_deref()
        .and_then(rarity_marker)
        .is_some_and(|marker| marker == RARITY_SPECIAL);
    let excluded = printing
        .set_name
        .as_deref()
        .is_some_and(|set| EXCLUDED_SETS.contains(&set));
    !special && !excluded
}

/// Prefer a regular printing from a normal set, else the first one.
pub fn select_printing(printings: &[CardSource]) -> Option<&CardSource> {
    printings
        .iter()
        .find(|p| usable(p))
        .or_else(|| printings.first())
}

/// One card per name, in name order.
pub fn cards_from_corpus(corpus: &Corpus) -> Result<Vec<Card>, CardError> {
    corpus
        .values()
        .filter_map(|printings| select_printing(printings))
        .map(Card::from_source)
        .collect()
}

/// Split an encoded file into cards.
pub fn decode_text(text: &str, format: &Format) -> Result<Vec<Card>, CardError> {
    text.split(CARD_SEP)
        .map(|chunk| chunk.trim_matches('\n'))
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| Card::from_encoded(chunk, format))
        .collect()
}

/// Encode every card, each followed by the card separator.
pub fn encode_cards<R: Rng + ?Sized>(
    cards: &[Card],
    format: &Format,
    randomize: Randomize,
    rng: &mut R,
) -> Result<String, CardError> {
    let mut out = String::new();
    for card in cards {
        out.push_str(&card.encode_with(format, randomize, rng)?);
        out.push_str(CARD_SEP);
    }
    Ok(out)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub valid: usize,
    pub invalid: usize,
    pub unparsed: usize,
}

impl Tally {
    pub fn of(cards: &[Card]) -> Self {
        let mut tally = Tally::default();
        for card in cards {
            tally.add(card);
        }
        tally
    }

    pub fn add(&mut self, card: &Card) {
        if card.valid() {
            self.valid += 1;
        } else if card.parsed() {
            self.invalid += 1;
        } else {
            self.unparsed += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.valid + self.invalid + self.unparsed
    }

    pub fn log(&self) {
        info!(
            valid = self.valid,
            invalid = self.invalid,
            unparsed = self.unparsed,
            total = self.total(),
            "decoded cards"
        );
    }

    /// Files written without a rarity field misalign every slot after the
    /// types, which shows up as a run of unparsed cards with no text.
    pub fn looks_legacy(cards: &[Card]) -> bool {
        let suspicious = cards
            .iter()
            .take(LEGACY_WINDOW)
            .filter(|card| !card.parsed() && card.text().is_empty())
            .count();
        suspicious > LEGACY_THRESHOLD
    }

    pub fn warn_if_legacy(cards: &[Card]) {
        if Self::looks_legacy(cards) {
            warn!(
                window = LEGACY_WINDOW,
                "many unparsed cards with no text; this may be the legacy format, try --norarity"
            );
        }
    }
}

fn write_neighbours<W: Write>(
    writer: &mut W,
    header: &str,
    neighbours: &[(f64, String)],
    forum: bool,
) -> Result<()> {
    writeln!(writer, "~~ {header} ~~")?;
    for (distance, name) in neighbours {
        if forum {
            writeln!(writer, "[card]{name}[/card]: {distance}")?;
        } else {
            writeln!(writer, "{name}: {distance}")?;
        }
    }
    Ok(())
}

/// Render every card followed by a blank line. With an index, each card
/// is annotated with its nearest neighbours by content and by name.
pub fn write_cards<W: Write>(
    writer: &mut W,
    cards: &[Card],
    options: &RenderOptions,
    similarity: Option<&dyn Similarity>,
) -> Result<()> {
    for card in cards {
        writer
            .write_all(card.format(options).as_bytes())
            .context("failed to write card")?;
        if let Some(index) = similarity.filter(|_| options.style != RenderStyle::Mse) {
            write_neighbours(
                writer,
                "closest cards",
                &index.nearest_card(card),
                options.forum,
            )?;
            write_neighbours(
                writer,
                "closest names",
                &index.nearest_name(card.name()),
                options.forum,
            )?;
        }
        writeln!(writer)?;
    }
    writer.flush().context("failed to flush output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORPUS: &str = r#"{
        "LEA": {
            "name": "Limited Edition Alpha",
            "code": "LEA",
            "cards": [
                {"name": "Grizzly Bears", "manaCost": "{1}{G}", "types": ["Creature"],
                 "subtypes": ["Bear"], "power": "2", "toughness": "2", "rarity": "Common"}
            ]
        },
        "UGL": {
            "name": "Unglued",
            "code": "UGL",
            "cards": [
                {"name": "Grizzly Bears", "types": ["Creature"], "power": "2",
                 "toughness": "2", "rarity": "Common"}
            ]
        },
        "APC": {
            "name": "Apocalypse",
            "code": "APC",
            "cards": [
                {"name": "Fire", "number": "128a", "manaCost": "{1}{R}",
                 "types": ["Instant"], "rarity": "Uncommon"},
                {"name": "Ice", "number": "128b", "manaCost": "{1}{U}",
                 "types": ["Instant"], "rarity": "Uncommon"}
            ]
        }
    }"#;

    #[test]
    fn groups_by_lowercase_name_and_links_halves() {
        let corpus = parse_json_corpus(CORPUS).expect("corpus");
        assert_eq!(
            corpus.keys().collect::<Vec<_>>(),
            vec!["fire", "grizzly bears"]
        );
        assert_eq!(corpus["grizzly bears"].len(), 2);
        let fire = &corpus["fire"][0];
        assert_eq!(fire.set_name.as_deref(), Some("Apocalypse"));
        let ice = fire.bside.as_deref().expect("linked half");
        assert_eq!(ice.name.as_deref(), Some("Ice"));
    }

    #[test]
    fn selection_skips_excluded_sets() {
        let mut corpus = parse_json_corpus(CORPUS).expect("corpus");
        let bears = corpus.remove("grizzly bears").expect("bears");
        let unglued_first: Vec<CardSource> = bears.into_iter().rev().collect();
        let chosen = select_printing(&unglued_first).expect("printing");
        assert_eq!(chosen.set_name.as_deref(), Some("Limited Edition Alpha"));
    }

    #[test]
    fn selection_falls_back_to_first() {
        let special = CardSource {
            name: Some("Oddity".to_string()),
            rarity: Some("Special".to_string()),
            ..CardSource::default()
        };
        let printings = vec![special.clone(), special];
        let chosen = select_printing(&printings).expect("printing");
        assert!(std::ptr::eq(chosen, &printings[0]));
        assert!(select_printing(&[]).is_none());
    }

    #[test]
    fn empty_chunks_are_skipped() {
        let cards = decode_text("\n\n|1bolt|5instant|\n\n\n\n", &Format::default())
            .expect("decode");
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].name(), "bolt");
    }

    #[test]
    fn legacy_heuristic_needs_a_majority() {
        let blank = Card::from_encoded("|junk|", &Format::default()).expect("card");
        assert!(!blank.parsed());
        assert!(Tally::looks_legacy(&vec![blank.clone(); 11]));
        assert!(!Tally::looks_legacy(&vec![blank; 10]));
    }
}
