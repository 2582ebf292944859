//! Command injector (spec.md §4.6, component C7, scenario Sc2): inserts
//! synthesized commands before and/or after specific commands in the
//! stream without disturbing anything else's `CmdId`.

use std::collections::HashMap;

use crate::command::{BoxedCmd, CmdId};
use crate::error::Error;
use crate::writer::Writer;

use super::Transform;

/// Commands to splice in around one original command.
#[derive(Default)]
struct Insertion {
    before: Vec<BoxedCmd>,
    after: Vec<BoxedCmd>,
}

/// Injects extra commands around specific points in the stream. Injected
/// commands carry [`CmdId::NO_ID`] (spec.md §4.1: synthesized commands are
/// never addressable by the original stream's numbering).
#[derive(Default)]
pub struct Injector {
    insertions: HashMap<CmdId, Insertion>,
}

impl Injector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit `cmd` immediately before the command with id `at`, every time
    /// `at` passes through this transform.
    pub fn insert_before(&mut self, at: CmdId, cmd: BoxedCmd) {
        self.insertions.entry(at).or_default().before.push(cmd);
    }

    /// Emit `cmd` immediately after the command with id `at`.
    pub fn insert_after(&mut self, at: CmdId, cmd: BoxedCmd) {
        self.insertions.entry(at).or_default().after.push(cmd);
    }
}

impl Transform for Injector {
    fn transform(&mut self, id: CmdId, cmd: BoxedCmd, out: &mut dyn Writer) -> Result<(), Error> {
        let insertion = self.insertions.remove(&id);
        let (before, after) = match insertion {
            Some(Insertion { before, after }) => (before, after),
            None => (Vec::new(), Vec::new()),
        };

        for synthesized in before {
            out.mutate_and_write(CmdId::NO_ID, synthesized)?;
        }
        out.mutate_and_write(id, cmd)?;
        for synthesized in after {
            out.mutate_and_write(CmdId::NO_ID, synthesized)?;
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "injector"
    }
}
