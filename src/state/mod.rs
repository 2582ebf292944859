//! The command-target state container (spec.md §3-§4.2, component C2).
//!
//! `State` owns every live API object as a plain [`table::ObjectTable`], plus
//! the byte-addressable memory a command's `mutate` reads and writes. It
//! knows nothing about the dependency graph (C8) or any transform (C4):
//! those layer on top by calling `mutate` and inspecting the object tables
//! before/after, mirroring how the teacher's `Context` owns device state
//! independently of the `PassGraph` built on top of it.

pub mod binding;
pub mod command_buffer;
pub mod memory;
pub mod table;

use std::collections::HashMap;

use crate::command::id::SubcommandIndex;
use crate::error::Error;
use binding::Binding;
use command_buffer::CommandBufferRecord;
use memory::{MemoryLayout, MemoryPools};
use table::{Handle, ObjectTable};

/// A `VkImage`. Layout/format tracking is intentionally thin -- only what
/// the Vulkan behaviour provider (C10) needs to decide read/write/modify.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Image {
    pub bound_memory: Option<Handle>,
    pub binding_index: Option<usize>,
}

/// A `VkBuffer`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Buffer {
    pub bound_memory: Option<Handle>,
    pub binding_index: Option<usize>,
}

/// A `VkDeviceMemory`. Owns the [`Binding`]s created by `vkBind*Memory`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceMemory {
    pub bindings: Vec<Binding>,
    pub mapped: bool,
}

impl DeviceMemory {
    pub fn bind(&mut self, range: crate::command::observation::MemoryRange) -> usize {
        self.bindings.push(Binding::new(range));
        self.bindings.len() - 1
    }
}

/// A `VkPipeline`. Opaque to the core; carried only so destroy/double-destroy
/// bookkeeping and liveness have something to point at.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pipeline;

/// One attachment slot of a `VkRenderPass`, as declared at `vkCreateRenderPass`
/// time (spec.md §4.10, render-pass load/store-op rewriting).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct AttachmentDesc {
    pub load_op: LoadOp,
    pub store_op: StoreOp,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoadOp {
    Load,
    Clear,
    DontCare,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum StoreOp {
    Store,
    DontCare,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderPass {
    pub attachments: Vec<AttachmentDesc>,
}

/// A `VkFramebuffer`: an ordered list of attachment image-view handles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Framebuffer {
    pub attachments: Vec<Handle>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Queue;

/// `VkImageUsageFlags`, kept as a small local bitset rather than pulled in
/// from an ash dependency (DESIGN.md, "Dropped from the teacher" -- the
/// core never needs the rest of ash's flag surface, only these four bits
/// for the attachment-readability rewrite, spec.md §4.10).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct ImageUsage(pub u32);

impl ImageUsage {
    pub const COLOR_ATTACHMENT: ImageUsage = ImageUsage(1 << 0);
    pub const DEPTH_STENCIL_ATTACHMENT: ImageUsage = ImageUsage(1 << 1);
    pub const SAMPLED: ImageUsage = ImageUsage(1 << 2);
    pub const TRANSFER_SRC: ImageUsage = ImageUsage(1 << 3);
    pub const TRANSFER_DST: ImageUsage = ImageUsage(1 << 4);

    pub fn contains(self, other: ImageUsage) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for ImageUsage {
    type Output = ImageUsage;
    fn bitor(self, rhs: ImageUsage) -> ImageUsage {
        ImageUsage(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for ImageUsage {
    fn bitor_assign(&mut self, rhs: ImageUsage) {
        self.0 |= rhs.0;
    }
}

/// A `VkSwapchainKHR`. Opaque beyond its own liveness and the usage bits
/// `makeAttachmentReadable` inspects (spec.md §4.10).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Swapchain;

/// A `VkDescriptorSet`. Bindings map a `(binding, array element)` slot to the
/// buffer/image handle last written via `vkUpdateDescriptorSets`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DescriptorSet {
    pub bindings: HashMap<u32, Handle>,
}

/// The command-target state (spec.md §3). One `State` is threaded through an
/// entire replay session; transforms and the terminator read and mutate it
/// via [`crate::command::Cmd::mutate`].
#[derive(Debug, Clone, Default)]
pub struct State {
    pub layout: MemoryLayout,
    pub memory_pools: MemoryPools,

    pub images: ObjectTable<Image>,
    pub buffers: ObjectTable<Buffer>,
    pub device_memories: ObjectTable<DeviceMemory>,
    pub pipelines: ObjectTable<Pipeline>,
    pub render_passes: ObjectTable<RenderPass>,
    pub framebuffers: ObjectTable<Framebuffer>,
    pub queues: ObjectTable<Queue>,
    pub descriptor_sets: ObjectTable<DescriptorSet>,
    pub command_buffers: ObjectTable<CommandBufferRecord>,
    pub swapchains: ObjectTable<Swapchain>,

    /// Executed-subcommand trail for the submission currently being
    /// mutated. The Vulkan behaviour provider calls
    /// [`begin_subcommand_tracking`](State::begin_subcommand_tracking)
    /// before walking a `QueueSubmit`'s command buffers, records each
    /// subcommand as it rolls it out via
    /// [`record_executed_subcommand`](State::record_executed_subcommand),
    /// then drains the trail with
    /// [`take_executed_subcommands`](State::take_executed_subcommands)
    /// (spec.md §4.8: "the order in which deferred behaviours are rolled
    /// out is the order in which subcommands executed during mutation, not
    /// the record order"). Our single-queue plugin defines execution order
    /// as depth-first record order per submit (DESIGN.md, Open Questions);
    /// real multi-queue reordering is out of scope.
    current_submission: Option<u64>,
    executed_subcommands: Vec<(u64, SubcommandIndex)>,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_subcommand_tracking(&mut self, submission: u64) {
        self.current_submission = Some(submission);
        self.executed_subcommands.clear();
    }

    pub fn record_executed_subcommand(&mut self, index: SubcommandIndex) {
        if let Some(submission) = self.current_submission {
            self.executed_subcommands.push((submission, index));
        }
    }

    /// Drain and return the subcommand trail recorded since the matching
    /// `begin_subcommand_tracking`. Idempotent: calling this without a
    /// prior `begin_subcommand_tracking` returns an empty trail.
    pub fn take_executed_subcommands(&mut self) -> Vec<(u64, SubcommandIndex)> {
        self.current_submission = None;
        std::mem::take(&mut self.executed_subcommands)
    }

    /// Resolve an image's bound byte range, or `None` if it has not been
    /// bound to memory yet (a command touching it is then a no-op on the
    /// dependency graph per spec.md §4.8 rule 3).
    pub fn image_binding<'a>(&'a self, image: Handle) -> Option<&'a Binding> {
        let img = self.images.get(image)?;
        let mem = self.device_memories.get(img.bound_memory?)?;
        mem.bindings.get(img.binding_index?)
    }

    pub fn buffer_binding<'a>(&'a self, buffer: Handle) -> Option<&'a Binding> {
        let buf = self.buffers.get(buffer)?;
        let mem = self.device_memories.get(buf.bound_memory?)?;
        mem.bindings.get(buf.binding_index?)
    }

    pub fn command_buffer_mut(&mut self, handle: Handle) -> Result<&mut CommandBufferRecord, Error> {
        self.command_buffers
            .get_mut(handle)
            .ok_or(Error::UnknownHandle)
    }
}
