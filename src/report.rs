//! Reporter (C7): text sink abstraction over a finished comparison, gated
//! by a verbosity level the way the teacher's `cli::constants::display_level`
//! gates `displaylevel!` calls — here as an explicit enum rather than a
//! global, since a `ComparisonEngine` has no analogue to `lz4cli`'s process-
//! wide notification counter.

use std::io::{self, Write};

use crate::element::{Element, ElementData};
use crate::engine::ComparisonEngine;

/// How much detail [`Reporter::write_to`] emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Score and counts only.
    Quiet,
    /// Adds the compressor name and thresholds used.
    Normal,
    /// Adds a per-category listing of every element's label/buffer preview.
    Verbose,
}

pub struct Reporter<'a> {
    engine: &'a ComparisonEngine,
    verbosity: Verbosity,
}

impl<'a> Reporter<'a> {
    pub fn new(engine: &'a ComparisonEngine, verbosity: Verbosity) -> Self {
        Reporter { engine, verbosity }
    }

    pub fn write_to(&self, mut out: impl Write) -> io::Result<()> {
        writeln!(out, "similarity: {:.4}%", self.engine.score())?;
        writeln!(
            out,
            "identical: {}  similar: {}  new: {}  deleted: {}  skipped: {}",
            self.engine.identical().len(),
            self.engine.similar().len(),
            self.engine.new_elements().len(),
            self.engine.deleted().len(),
            self.engine.skipped().len(),
        )?;

        if self.verbosity >= Verbosity::Normal {
            writeln!(
                out,
                "compressor: {}  threshold_sort: {:.2}  threshold_sim: {:.2}",
                self.engine.compressor_name(),
                self.engine.threshold_sort(),
                self.engine.threshold_sim(),
            )?;
        }

        if self.verbosity >= Verbosity::Verbose {
            self.write_category(&mut out, "identical", &self.engine.identical())?;
            self.write_category(&mut out, "similar", &self.engine.similar())?;
            self.write_category(&mut out, "deleted", &self.engine.deleted())?;
            self.write_category(&mut out, "new", &self.engine.new_elements())?;
        }

        Ok(())
    }

    fn write_category(&self, out: &mut impl Write, name: &str, elements: &[&std::rc::Rc<Element>]) -> io::Result<()> {
        if elements.is_empty() {
            return Ok(());
        }
        writeln!(out, "[{name}]")?;
        for el in elements {
            let preview = el.label().map(|s| s.to_string()).unwrap_or_else(|| {
                String::from_utf8_lossy(&el.buffer()[..el.buffer().len().min(40)]).into_owned()
            });
            if name == "similar" {
                if let Some((partner, distance)) = self.engine.match_for(el) {
                    let partner_preview = partner.label().map(|s| s.to_string()).unwrap_or_else(|| {
                        String::from_utf8_lossy(&partner.buffer()[..partner.buffer().len().min(40)]).into_owned()
                    });
                    writeln!(out, "  {preview} ~ {partner_preview} (d={distance:.4})")?;
                    continue;
                }
            }
            writeln!(out, "  {preview}")?;
        }
        Ok(())
    }
}
