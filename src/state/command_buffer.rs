//! Command-buffer recording state (spec.md §3, §4.8 rules 8-10, §9).
//!
//! A command-buffer's deferred command list only produces reads/writes once
//! it is submitted. Rather than stashing closures with captured
//! environments (DESIGN.md, "Deferred closures for command-buffer
//! recording"), each recorded command stores a small tagged variant that a
//! `match` at submit time rolls out against the bound memory.

use crate::state::table::Handle;

/// One deferred memory access, resolved against a `DeviceMemory`'s bindings
/// at submit time.
#[derive(Debug, Copy, Clone)]
pub struct BindingRef {
    pub memory: Handle,
    pub binding_index: usize,
}

/// A deferred behaviour queued by a command-buffer recording command,
/// rolled out when the command buffer is submitted (spec.md §9,
/// "Deferred closures for command-buffer recording").
#[derive(Debug, Clone)]
pub enum DeferredBehaviour {
    ReadBindings(Vec<BindingRef>),
    WriteBindings(Vec<BindingRef>),
    ModifyBindings(Vec<BindingRef>),
    ReadHandle(Handle),
    /// Descends into a secondary command buffer's own records
    /// (`CmdExecuteCommands`, spec.md §4.8 rule 9).
    SecondaryCommandBuffer(Handle),
}

/// One entry of a command-buffer's deferred command list.
#[derive(Debug, Clone, Default)]
pub struct RecordedCommand {
    pub behaviours: Vec<DeferredBehaviour>,
}

/// A command-buffer's `records` cell: an ordered list of
/// [`RecordedCommand`] entries, one per recording-time command.
#[derive(Debug, Clone, Default)]
pub struct CommandBufferRecord {
    pub handle: Option<Handle>,
    pub records: Vec<RecordedCommand>,
}

impl CommandBufferRecord {
    pub fn new(handle: Handle) -> Self {
        CommandBufferRecord {
            handle: Some(handle),
            records: Vec::new(),
        }
    }

    /// Append a new recorded command with the given deferred behaviours,
    /// unless the last entry already has the identical behaviour list (a
    /// rebuild replaying the same recording idempotently, spec.md §4.8
    /// rule 8: "iff it is not already the last element").
    pub fn push(&mut self, behaviours: Vec<DeferredBehaviour>) -> usize {
        if let Some(last) = self.records.last() {
            if behaviours_eq(&last.behaviours, &behaviours) {
                return self.records.len() - 1;
            }
        }
        self.records.push(RecordedCommand {
            behaviours,
        });
        self.records.len() - 1
    }
}

fn behaviours_eq(a: &[DeferredBehaviour], b: &[DeferredBehaviour]) -> bool {
    // Structural comparison good enough to detect the exact-duplicate case;
    // DeferredBehaviour intentionally does not derive PartialEq broadly
    // since BindingRef order inside a single behaviour is significant.
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).all(|(x, y)| format!("{:?}", x) == format!("{:?}", y))
}
