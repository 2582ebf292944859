//! Per-command dependency-graph behaviour (spec.md §4.9, component C8).

use super::address::Addr;

/// The set of addresses one command reads, writes and modifies, plus the
/// two flags that short-circuit the DCE liveness sweep:
///
/// - `keep_alive`: this command must survive DCE regardless of whether
///   anything reads what it writes (side effects outside the tracked
///   address space -- e.g. a present, or a debug marker).
/// - `aborted`: `mutate` returned an error for this command; it is dead by
///   construction (spec.md §4.1, `Error::Mutation`).
#[derive(Debug, Clone, Default)]
pub struct AtomBehaviour {
    pub reads: Vec<Addr>,
    pub writes: Vec<Addr>,
    pub modifies: Vec<Addr>,
    pub keep_alive: bool,
    pub aborted: bool,
}

impl AtomBehaviour {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_read(mut self, addr: Addr) -> Self {
        self.reads.push(addr);
        self
    }

    pub fn with_write(mut self, addr: Addr) -> Self {
        self.writes.push(addr);
        self
    }

    /// A read-modify-write: depends on the prior writer like a read, and
    /// becomes the new writer of record like a write, but -- unlike a plain
    /// write -- never kills the prior writer outright (spec.md §4.8 rule 4,
    /// aliased-write conservatism; used for zero-length bindings and any
    /// address the provider cannot prove is fully overwritten).
    pub fn with_modify(mut self, addr: Addr) -> Self {
        self.modifies.push(addr);
        self
    }

    pub fn keep_alive(mut self) -> Self {
        self.keep_alive = true;
        self
    }
}
