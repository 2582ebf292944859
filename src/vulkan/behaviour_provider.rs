//! The Vulkan behaviour provider (spec.md §4.10, component C10): classifies
//! each command's [`AtomBehaviour`] for the dependency graph.
//!
//! Object-lifecycle and binding commands are classified directly from
//! `pre`/`post` state. `QueueSubmit` is the one command whose behaviour
//! isn't about itself: it aggregates every `DeferredBehaviour` queued by
//! the command buffers it submits, resolved into addresses by walking them
//! with [`subcommand::walk_submission`] (spec.md §4.8 rules 8-10).

use crate::command::Cmd;
use crate::graph::{AddressMap, AtomBehaviour, BehaviourProvider, ObjectKind, StateKey};
use crate::state::command_buffer::DeferredBehaviour;
use crate::state::State;

use super::commands::*;
use super::subcommand;

pub struct VulkanBehaviourProvider;

impl VulkanBehaviourProvider {
    pub fn new() -> Self {
        VulkanBehaviourProvider
    }
}

impl Default for VulkanBehaviourProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn addr_for_binding(addresses: &mut AddressMap, memory: crate::state::table::Handle, binding_index: usize) -> crate::graph::Addr {
    // A binding's data cell is a child of the memory object that owns it
    // (spec.md §3, §4.9): a write to the memory object's own address also
    // invalidates every binding carved out of it.
    let parent = addr_for_object(addresses, ObjectKind::DeviceMemory, memory);
    addresses.intern(Some(parent), StateKey::Binding(memory, binding_index))
}

fn addr_for_object(addresses: &mut AddressMap, kind: ObjectKind, handle: crate::state::table::Handle) -> crate::graph::Addr {
    addresses.intern_root(StateKey::Object(kind, handle))
}

impl BehaviourProvider for VulkanBehaviourProvider {
    fn behaviour(
        &self,
        _id: crate::command::CmdId,
        cmd: &dyn Cmd,
        _pre: &State,
        post: &State,
        addresses: &mut AddressMap,
    ) -> AtomBehaviour {
        let any = cmd.as_any();

        if let Some(c) = any.downcast_ref::<CreateImage>() {
            return AtomBehaviour::new().with_write(addr_for_object(addresses, ObjectKind::Image, c.handle));
        }
        if let Some(c) = any.downcast_ref::<DestroyImage>() {
            // Destruction is always live (spec.md §4.8 rule 2, §7): a
            // destructor is `modify`, never `read`, so a prior writer is
            // never pruned out from under it, and `keep_alive` keeps clean
            // teardown from being dropped by DCE even when nothing else
            // reads the handle again.
            return AtomBehaviour::new().with_modify(addr_for_object(addresses, ObjectKind::Image, c.handle)).keep_alive();
        }
        if let Some(c) = any.downcast_ref::<CreateBuffer>() {
            return AtomBehaviour::new().with_write(addr_for_object(addresses, ObjectKind::Buffer, c.handle));
        }
        if let Some(c) = any.downcast_ref::<DestroyBuffer>() {
            return AtomBehaviour::new().with_modify(addr_for_object(addresses, ObjectKind::Buffer, c.handle)).keep_alive();
        }
        if let Some(c) = any.downcast_ref::<AllocateMemory>() {
            let mut b = AtomBehaviour::new().with_write(addr_for_object(addresses, ObjectKind::DeviceMemory, c.handle));
            // pNext dedicated-allocation struct: the memory is allocated
            // specifically for one image or buffer, which this allocation
            // therefore reads (spec.md §4.10).
            match c.dedicated {
                Some(Dedicated::Image(image)) => b = b.with_read(addr_for_object(addresses, ObjectKind::Image, image)),
                Some(Dedicated::Buffer(buffer)) => b = b.with_read(addr_for_object(addresses, ObjectKind::Buffer, buffer)),
                None => {}
            }
            return b;
        }
        if let Some(c) = any.downcast_ref::<FreeMemory>() {
            return AtomBehaviour::new().with_modify(addr_for_object(addresses, ObjectKind::DeviceMemory, c.handle)).keep_alive();
        }
        if let Some(c) = any.downcast_ref::<MapMemory>() {
            return AtomBehaviour::new().with_modify(addr_for_object(addresses, ObjectKind::DeviceMemory, c.memory));
        }
        if let Some(c) = any.downcast_ref::<UnmapMemory>() {
            return AtomBehaviour::new().with_modify(addr_for_object(addresses, ObjectKind::DeviceMemory, c.memory));
        }
        if let Some(c) = any.downcast_ref::<FlushMappedMemoryRanges>() {
            let mut b = AtomBehaviour::new();
            if let Some(mem) = post.device_memories.get(c.memory) {
                for (idx, binding) in mem.bindings.iter().enumerate() {
                    if !c.range.overlaps(&binding.range) {
                        continue;
                    }
                    let addr = addr_for_binding(addresses, c.memory, idx);
                    // A flush that fully covers the binding writes it
                    // outright; a partial flush, or a binding whose size was
                    // never queried, is conservatively a modify (spec.md
                    // §4.8 rule 4, testable property 7).
                    if !binding.zero_length && c.range.covers(&binding.range) {
                        b = b.with_write(addr);
                    } else {
                        b = b.with_modify(addr);
                    }
                }
            }
            return b;
        }
        if let Some(c) = any.downcast_ref::<InvalidateMappedMemoryRanges>() {
            let mut b = AtomBehaviour::new();
            if let Some(mem) = post.device_memories.get(c.memory) {
                for (idx, binding) in mem.bindings.iter().enumerate() {
                    if c.range.overlaps(&binding.range) {
                        b = b.with_read(addr_for_binding(addresses, c.memory, idx));
                    }
                }
            }
            return b;
        }
        if let Some(c) = any.downcast_ref::<BindImageMemory>() {
            let mut b = AtomBehaviour::new()
                .with_read(addr_for_object(addresses, ObjectKind::Image, c.image))
                .with_read(addr_for_object(addresses, ObjectKind::DeviceMemory, c.memory));
            if let Some(img) = post.images.get(c.image) {
                if let Some(idx) = img.binding_index {
                    b = b.with_write(addr_for_binding(addresses, c.memory, idx));
                }
            }
            return b;
        }
        if let Some(c) = any.downcast_ref::<BindBufferMemory>() {
            let mut b = AtomBehaviour::new()
                .with_read(addr_for_object(addresses, ObjectKind::Buffer, c.buffer))
                .with_read(addr_for_object(addresses, ObjectKind::DeviceMemory, c.memory));
            if let Some(buf) = post.buffers.get(c.buffer) {
                if let Some(idx) = buf.binding_index {
                    b = b.with_write(addr_for_binding(addresses, c.memory, idx));
                }
            }
            return b;
        }
        if let Some(c) = any.downcast_ref::<CreateRenderPass>() {
            return AtomBehaviour::new().with_write(addr_for_object(addresses, ObjectKind::RenderPass, c.handle));
        }
        if let Some(c) = any.downcast_ref::<CreateFramebuffer>() {
            let mut b = AtomBehaviour::new().with_write(addr_for_object(addresses, ObjectKind::Framebuffer, c.handle));
            for &attachment in &c.attachments {
                b = b.with_read(addr_for_object(addresses, ObjectKind::Image, attachment));
            }
            return b;
        }
        if let Some(c) = any.downcast_ref::<CreateDescriptorSet>() {
            return AtomBehaviour::new().with_write(addr_for_object(addresses, ObjectKind::DescriptorSet, c.handle));
        }
        if let Some(c) = any.downcast_ref::<UpdateDescriptorSets>() {
            return AtomBehaviour::new()
                .with_read(addr_for_object(addresses, ObjectKind::Buffer, c.resource))
                .with_write(addr_for_object(addresses, ObjectKind::DescriptorSet, c.set));
        }
        if let Some(c) = any.downcast_ref::<CreateQueue>() {
            return AtomBehaviour::new().with_write(addr_for_object(addresses, ObjectKind::Queue, c.handle));
        }
        if let Some(c) = any.downcast_ref::<CreateSwapchainKHR>() {
            // makeAttachmentReadable's usage-bit rewrite (spec.md §4.10) runs
            // at the transform stage, before this command ever reaches the
            // graph; the usage bits themselves carry no extra dependency.
            return AtomBehaviour::new().with_write(addr_for_object(addresses, ObjectKind::Swapchain, c.handle));
        }
        if let Some(c) = any.downcast_ref::<CreatePipeline>() {
            let mut b = AtomBehaviour::new()
                .with_write(addr_for_object(addresses, ObjectKind::Pipeline, c.handle))
                .with_read(addr_for_object(addresses, ObjectKind::RenderPass, c.render_pass));
            for &module in &c.shader_modules {
                b = b.with_read(addr_for_object(addresses, ObjectKind::Opaque, module));
            }
            return b;
        }
        if let Some(c) = any.downcast_ref::<QueuePresent>() {
            return AtomBehaviour::new()
                .with_read(addr_for_object(addresses, ObjectKind::Queue, c.queue))
                .with_read(addr_for_object(addresses, ObjectKind::Image, c.image))
                .keep_alive();
        }
        if let Some(c) = any.downcast_ref::<BeginCommandBuffer>() {
            return AtomBehaviour::new().with_write(addr_for_object(addresses, ObjectKind::CommandBuffer, c.cb));
        }
        if any.downcast_ref::<EndCommandBuffer>().is_some() {
            // Recording commands contribute no graph behaviour of their own;
            // see the module doc comment.
            return AtomBehaviour::new();
        }
        if any
            .downcast_ref::<CmdBindVertexBuffers>()
            .map(|_| ())
            .or_else(|| any.downcast_ref::<CmdBindIndexBuffer>().map(|_| ()))
            .or_else(|| any.downcast_ref::<CmdBindDescriptorSets>().map(|_| ()))
            .or_else(|| any.downcast_ref::<CmdBeginRenderPass>().map(|_| ()))
            .or_else(|| any.downcast_ref::<CmdEndRenderPass>().map(|_| ()))
            .or_else(|| any.downcast_ref::<CmdCopyBuffer>().map(|_| ()))
            .or_else(|| any.downcast_ref::<CmdCopyImage>().map(|_| ()))
            .or_else(|| any.downcast_ref::<CmdBlitImage>().map(|_| ()))
            .or_else(|| any.downcast_ref::<CmdClearColorImage>().map(|_| ()))
            .or_else(|| any.downcast_ref::<CmdUpdateBuffer>().map(|_| ()))
            .or_else(|| any.downcast_ref::<CmdFillBuffer>().map(|_| ()))
            .or_else(|| any.downcast_ref::<CmdCopyQueryPoolResults>().map(|_| ()))
            .or_else(|| any.downcast_ref::<CmdPipelineBarrier>().map(|_| ()))
            .or_else(|| any.downcast_ref::<CmdDrawIndexed>().map(|_| ()))
            .or_else(|| any.downcast_ref::<CmdExecuteCommands>().map(|_| ()))
            .is_some()
        {
            // Every one of these queues its graph effect as a
            // `DeferredBehaviour` onto the recording command buffer; see the
            // module doc comment and `commands.rs`.
            return AtomBehaviour::new();
        }
        if any.downcast_ref::<SetEvent>().is_some() {
            // A synchronization boundary with no tracked address of its own
            // in this single-queue plugin (DESIGN.md, Open Questions); kept
            // alive unconditionally like any other unhandled command would
            // be (spec.md §4.8 rule 13).
            return AtomBehaviour::new().keep_alive();
        }
        if let Some(c) = any.downcast_ref::<QueueSubmit>() {
            let mut b = AtomBehaviour::new().with_read(addr_for_object(addresses, ObjectKind::Queue, c.queue));
            for visited in subcommand::walk_submission(post, 0, &c.command_buffers) {
                for behaviour in visited.behaviours {
                    match behaviour {
                        DeferredBehaviour::ReadBindings(refs) => {
                            for r in refs {
                                b = b.with_read(addr_for_binding(addresses, r.memory, r.binding_index));
                            }
                        }
                        DeferredBehaviour::WriteBindings(refs) => {
                            for r in refs {
                                b = b.with_write(addr_for_binding(addresses, r.memory, r.binding_index));
                            }
                        }
                        DeferredBehaviour::ModifyBindings(refs) => {
                            for r in refs {
                                b = b.with_modify(addr_for_binding(addresses, r.memory, r.binding_index));
                            }
                        }
                        DeferredBehaviour::ReadHandle(h) => {
                            b = b.with_read(addr_for_object(addresses, ObjectKind::Opaque, *h));
                        }
                        DeferredBehaviour::SecondaryCommandBuffer(h) => {
                            b = b.with_read(addr_for_object(addresses, ObjectKind::CommandBuffer, *h));
                        }
                    }
                }
            }
            return b;
        }

        // Framework-internal commands (`Noop`, `EndOfStream`) and anything
        // not recognised above: no graph effect.
        AtomBehaviour::new()
    }
}
