//! String tables (spec.md §6): localized message templates parsed from a
//! Markdown subset, substituted with per-call arguments at presentation
//! time (scenario Sc6). Treated everywhere else in the core as an external
//! collaborator -- the transform pipeline and dependency graph never read
//! one, but the replay server that hosts them needs the format somewhere.

pub mod node;
pub mod parser;

use std::collections::HashMap;

pub use node::{Msg, Node, Value};
pub use parser::ParseError;

/// A parsed string table for one culture (spec.md §6: "basename up to the
/// first `.` is the culture code" -- the culture code itself is a concern
/// of whatever loads the file, not of the parser).
#[derive(Debug, Clone, Default)]
pub struct StringTable {
    entries: HashMap<String, Vec<Node>>,
}

impl StringTable {
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        Ok(StringTable {
            entries: parser::parse(source)?,
        })
    }

    pub fn get(&self, identifier: &str) -> Option<&Vec<Node>> {
        self.entries.get(identifier)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
