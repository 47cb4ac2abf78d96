//! Encoded output (`cardcodec encode ...`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use cardcodec::{Randomize, encode_cards};
use clap::Args;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::cli::utils::{load_cards, load_format, write_output};

/// Arguments for `cardcodec encode`.
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Encoded card file or `.json` corpus (`-` for stdin).
    pub infile: PathBuf,
    /// Output file, defaults to stdout.
    #[arg(default_value = "-")]
    pub outfile: PathBuf,
    /// Shuffle the field order of every card.
    #[arg(long)]
    pub randomize_fields: bool,
    /// Shuffle the symbols inside every mana cost.
    #[arg(long)]
    pub randomize_mana: bool,
    /// Seed for the shuffles.
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,
    /// The input has no rarity field; use for legacy files.
    #[arg(long)]
    pub norarity: bool,
    /// Read the field layout from a JSON file.
    #[arg(long, value_name = "FILE")]
    pub format: Option<PathBuf>,
}

/// Execute an encode command.
pub fn handle(args: EncodeArgs) -> Result<()> {
    let format = load_format(args.format.as_deref(), args.norarity)?;
    let cards = load_cards(&args.infile, &format)?;

    let randomize = Randomize {
        fields: args.randomize_fields,
        mana: args.randomize_mana,
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let encoded = encode_cards(&cards, &format, randomize, &mut rng)
        .context("failed to encode cards")?;
    write_output(&args.outfile, &encoded)
}
