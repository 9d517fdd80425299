//! Command-line argument parsing for the `elsim` text-comparison binary.
//!
//! Unlike the teacher's hand-rolled `lz4cli.c`-derived parser (that surface
//! existed to stay byte-compatible with a C getopt loop this crate has no
//! counterpart to), this crate's CLI is new surface with no legacy syntax to
//! match, so it uses `clap`'s derive API directly rather than hand-rolling
//! one. The separation of concerns stays the same: a plain options struct
//! here, dispatch logic in `main.rs`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::compressor::Codec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CodecArg {
    Zlib,
    Bz2,
    Smaz,
    Lzma,
    Xz,
    Snappy,
    Blocksort,
}

impl From<CodecArg> for Codec {
    fn from(value: CodecArg) -> Self {
        match value {
            CodecArg::Zlib => Codec::Zlib,
            CodecArg::Bz2 => Codec::Bz2,
            CodecArg::Smaz => Codec::Smaz,
            CodecArg::Lzma => Codec::Lzma,
            CodecArg::Xz => Codec::Xz,
            CodecArg::Snappy => Codec::Snappy,
            CodecArg::Blocksort => Codec::BlockSort,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum VerbosityArg {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

/// Compares the sentences of two text files via normalized compression
/// distance and reports a structural similarity score.
#[derive(Debug, Parser)]
#[command(name = "elsim", version, about)]
pub struct Args {
    /// First file to compare.
    pub first: PathBuf,

    /// Second file to compare.
    pub second: PathBuf,

    /// Compressor used to estimate Kolmogorov complexity.
    #[arg(short, long, value_enum, default_value_t = CodecArg::Zlib)]
    pub codec: CodecArg,

    /// Compression level, 1-9 (ignored by codecs that aren't level-sensitive).
    #[arg(short = 'l', long, default_value_t = crate::config::LEVEL_DEFAULT)]
    pub level: i32,

    /// Override the ranking threshold (defaults to the Text preset's 0.6).
    #[arg(short = 't', long)]
    pub threshold: Option<f64>,

    /// Count elements with no counterpart on the other side as dissimilar.
    #[arg(long, default_value_t = true)]
    pub include_new: bool,

    /// Count elements that fail ranking as dissimilar.
    #[arg(long, default_value_t = true)]
    pub include_deleted: bool,

    #[arg(short, long, value_enum, default_value_t = VerbosityArg::Normal)]
    pub verbosity: VerbosityArg,
}
