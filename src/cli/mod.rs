//! Command-line interface wiring for the `cardcodec` binary.
//!
//! This module owns the clap definitions and delegates execution to one
//! submodule per command.

use anyhow::Result;
use cardcodec::normalize::Strategy;
use clap::{Parser, Subcommand, ValueEnum};

pub mod decode;
pub mod encode;
pub mod utils;

/// Parsed CLI entrypoint for the `cardcodec` binary.
#[derive(Parser, Debug)]
#[command(
    name = "cardcodec",
    version,
    about = "Convert trading cards between corpus JSON, encoded text and spoilers"
)]
pub struct Cli {
    /// Log parse details to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,
    /// Text normalization used for ASCII folding and casing.
    #[arg(long, value_enum, global = true, default_value_t = NormalizerArg::Enhanced)]
    pub normalizer: NormalizerArg,
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a corpus or an encoded file as readable text.
    Decode(decode::DecodeArgs),
    /// Write a corpus or an encoded file in the encoded format.
    Encode(encode::EncodeArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum NormalizerArg {
    Naive,
    Enhanced,
}

impl From<NormalizerArg> for Strategy {
    fn from(arg: NormalizerArg) -> Self {
        match arg {
            NormalizerArg::Naive => Strategy::Naive,
            NormalizerArg::Enhanced => Strategy::Enhanced,
        }
    }
}

/// Execute the requested command.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Decode(args) => decode::handle(args),
        Command::Encode(args) => encode::handle(args),
    }
}
