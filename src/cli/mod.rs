//! CLI surface for the `elsim` binary: argument parsing (`args`) plus the
//! run loop that wires a parsed [`args::Args`] to a [`crate::engine::ComparisonEngine`]
//! over two text files, mirroring the teacher's split between `cli::args`
//! (parsing) and `main.rs` (dispatch).

pub mod args;

use std::fs;
use std::path::Path;

use anyhow::Context;

use crate::engine::ComparisonEngine;
use crate::error::Result as ElsimResult;
use crate::filter::{Filter, RawItem};
use crate::report::{Reporter, Verbosity};
use crate::similarity::SimilarityKernel;
use crate::text::TextProxy;

impl From<args::VerbosityArg> for Verbosity {
    fn from(value: args::VerbosityArg) -> Self {
        match value {
            args::VerbosityArg::Quiet => Verbosity::Quiet,
            args::VerbosityArg::Normal => Verbosity::Normal,
            args::VerbosityArg::Verbose => Verbosity::Verbose,
        }
    }
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// Runs one comparison session for `args` and writes the report to `out`.
pub fn run(args: args::Args, out: impl std::io::Write) -> anyhow::Result<()> {
    let first = read_text(&args.first)?;
    let second = read_text(&args.second)?;

    let proxy1 = TextProxy::new(&first);
    let proxy2 = TextProxy::new(&second);

    let filter = Filter::text();
    let mut sim = SimilarityKernel::new(args.codec.into());
    if args.level != crate::config::LEVEL_DEFAULT {
        sim.set_level(args.level)?;
    }

    let codec_name = sim.codec().name();
    let e1 = proxy1.sentences().iter().map(|s| RawItem::Sentence(s.as_str()));
    let e2 = proxy2.sentences().iter().map(|s| RawItem::Sentence(s.as_str()));

    let engine: ComparisonEngine = comparison(e1, e2, &filter, &mut sim, codec_name, &args)?;

    let reporter = Reporter::new(&engine, args.verbosity.into());
    reporter.write_to(out).context("writing report")?;
    Ok(())
}

fn comparison<'a>(
    e1: impl IntoIterator<Item = RawItem<'a>>,
    e2: impl IntoIterator<Item = RawItem<'a>>,
    filter: &Filter,
    sim: &mut SimilarityKernel,
    codec_name: &'static str,
    args: &args::Args,
) -> ElsimResult<ComparisonEngine> {
    ComparisonEngine::new(e1, e2, filter, sim, codec_name, args.threshold, args.include_new, args.include_deleted)
}
