//! Spoiler output (`cardcodec decode ...`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use cardcodec::{RenderOptions, RenderStyle, write_cards};
use clap::Args;

use crate::cli::utils::{load_cards, load_format, write_output};

/// Arguments for `cardcodec decode`.
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Encoded card file or `.json` corpus (`-` for stdin).
    pub infile: PathBuf,
    /// Output file, defaults to stdout.
    #[arg(default_value = "-")]
    pub outfile: PathBuf,
    /// Emulate the Gatherer visual spoiler.
    #[arg(short = 'g', long)]
    pub gatherer: bool,
    /// Use forum markup for mana, names and choices.
    #[arg(short = 'f', long)]
    pub forum: bool,
    /// Write Magic Set Editor card blocks.
    #[arg(long)]
    pub mse: bool,
    /// The input has no rarity field; use for legacy files.
    #[arg(long)]
    pub norarity: bool,
    /// Read the field layout from a JSON file.
    #[arg(long, value_name = "FILE")]
    pub format: Option<PathBuf>,
}

/// Execute a decode command.
pub fn handle(args: DecodeArgs) -> Result<()> {
    let format = load_format(args.format.as_deref(), args.norarity)?;
    let cards = load_cards(&args.infile, &format)?;

    let style = if args.mse {
        RenderStyle::Mse
    } else if args.gatherer {
        RenderStyle::Gatherer
    } else {
        RenderStyle::Plain
    };
    let options = RenderOptions::new(style, args.forum);

    let mut rendered = Vec::new();
    write_cards(&mut rendered, &cards, &options, None)?;
    let rendered = String::from_utf8(rendered).context("rendered cards are not utf-8")?;
    write_output(&args.outfile, &rendered)
}
