//! Convenience helpers shared across command handlers.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use cardcodec::{Card, Format, Tally, cards_from_corpus, decode_text, load_json_corpus};
use tracing::info;

/// Read a whole input file, or stdin when `-` is provided.
pub fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        return read_stdin();
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Read the entire stdin stream into memory.
pub fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("failed to read from stdin")?;
    Ok(buffer)
}

/// Persist a string either to a file or stdout when `-` is provided.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    if path.as_os_str() == "-" {
        let mut stdout = io::stdout().lock();
        stdout.write_all(content.as_bytes())?;
        stdout.flush()?;
        return Ok(());
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "wrote output");
    Ok(())
}

/// Resolve the encoded-file format from `--format` and `--norarity`.
pub fn load_format(path: Option<&Path>, norarity: bool) -> Result<Format> {
    match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read format {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse format {}", path.display()))
        }
        None if norarity => Ok(Format::legacy()),
        None => Ok(Format::default()),
    }
}

/// Inputs ending in `.json` are treated as an all-sets corpus.
pub fn is_corpus(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Load cards from a corpus or an encoded file and log the tally.
pub fn load_cards(path: &Path, format: &Format) -> Result<Vec<Card>> {
    let cards = if is_corpus(path) {
        info!(path = %path.display(), "reading json corpus");
        let corpus = load_json_corpus(path)?;
        cards_from_corpus(&corpus)?
    } else {
        info!(path = %path.display(), "reading encoded card file");
        let text = read_input(path)?;
        decode_text(&text, format)
            .with_context(|| format!("failed to decode {}", path.display()))?
    };
    Tally::of(&cards).log();
    Tally::warn_if_legacy(&cards);
    Ok(cards)
}
