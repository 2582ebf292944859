//! Concrete Vulkan commands (spec.md §4.10, component C10).
//!
//! Each command is a thin struct plus a `mutate` that updates `State`'s
//! object tables. Command-buffer recording commands (`Cmd*` variants
//! issued between `BeginCommandBuffer`/`EndCommandBuffer`) do not touch the
//! dependency graph directly: they only enqueue a
//! [`DeferredBehaviour`](crate::state::command_buffer::DeferredBehaviour)
//! onto the recording command buffer's `records` list. The reads/writes
//! they describe only become real once a `QueueSubmit` rolls that list out
//! (spec.md §4.8 rules 8-10); see [`behaviour_provider`](super::behaviour_provider).

use crate::command::extras::Extras;
use crate::command::observation::MemoryRange;
use crate::command::{ApiId, Cmd, ReplayBuilder, ThreadId};
use crate::error::Error;
use crate::state::command_buffer::{BindingRef, CommandBufferRecord, DeferredBehaviour};
use crate::state::table::Handle;
use crate::state::{AttachmentDesc, Buffer, DescriptorSet, DeviceMemory, Framebuffer, Image, ImageUsage, Pipeline, Queue, RenderPass, State, Swapchain};

use super::render_pass;

fn image_binding_ref(state: &State, image: Handle) -> Option<BindingRef> {
    let img = state.images.get(image)?;
    Some(BindingRef {
        memory: img.bound_memory?,
        binding_index: img.binding_index?,
    })
}

fn buffer_binding_ref(state: &State, buffer: Handle) -> Option<BindingRef> {
    let buf = state.buffers.get(buffer)?;
    Some(BindingRef {
        memory: buf.bound_memory?,
        binding_index: buf.binding_index?,
    })
}

#[derive(Debug, Clone, Default)]
pub struct CreateImage {
    pub handle: Handle,
    pub usage: ImageUsage,
    pub thread: ThreadId,
    pub extras: Extras,
}

impl Cmd for CreateImage {
    fn mutate(&self, state: &mut State, _builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error> {
        state.images.insert(self.handle, Image::default());
        Ok(())
    }
    fn api(&self) -> Option<ApiId> {
        Some(ApiId::VULKAN)
    }
    fn thread(&self) -> ThreadId {
        self.thread
    }
    fn extras(&self) -> &Extras {
        &self.extras
    }
    fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }
    fn replace(&self, _data: Vec<u8>) -> Box<dyn Cmd> {
        Box::new(self.clone())
    }
    fn name(&self) -> &'static str {
        "vkCreateImage"
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct DestroyImage {
    pub handle: Handle,
    pub thread: ThreadId,
    pub extras: Extras,
}

impl Cmd for DestroyImage {
    fn mutate(&self, state: &mut State, _builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error> {
        state.images.remove(self.handle).map(|_| ())
    }
    fn api(&self) -> Option<ApiId> {
        Some(ApiId::VULKAN)
    }
    fn thread(&self) -> ThreadId {
        self.thread
    }
    fn extras(&self) -> &Extras {
        &self.extras
    }
    fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }
    fn replace(&self, _data: Vec<u8>) -> Box<dyn Cmd> {
        Box::new(self.clone())
    }
    fn name(&self) -> &'static str {
        "vkDestroyImage"
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreateBuffer {
    pub handle: Handle,
    pub thread: ThreadId,
    pub extras: Extras,
}

impl Cmd for CreateBuffer {
    fn mutate(&self, state: &mut State, _builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error> {
        state.buffers.insert(self.handle, Buffer::default());
        Ok(())
    }
    fn api(&self) -> Option<ApiId> {
        Some(ApiId::VULKAN)
    }
    fn thread(&self) -> ThreadId {
        self.thread
    }
    fn extras(&self) -> &Extras {
        &self.extras
    }
    fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }
    fn replace(&self, _data: Vec<u8>) -> Box<dyn Cmd> {
        Box::new(self.clone())
    }
    fn name(&self) -> &'static str {
        "vkCreateBuffer"
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct DestroyBuffer {
    pub handle: Handle,
    pub thread: ThreadId,
    pub extras: Extras,
}

impl Cmd for DestroyBuffer {
    fn mutate(&self, state: &mut State, _builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error> {
        state.buffers.remove(self.handle).map(|_| ())
    }
    fn api(&self) -> Option<ApiId> {
        Some(ApiId::VULKAN)
    }
    fn thread(&self) -> ThreadId {
        self.thread
    }
    fn extras(&self) -> &Extras {
        &self.extras
    }
    fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }
    fn replace(&self, _data: Vec<u8>) -> Box<dyn Cmd> {
        Box::new(self.clone())
    }
    fn name(&self) -> &'static str {
        "vkDestroyBuffer"
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// The `VkMemoryDedicatedAllocateInfo` struct found while chasing
/// `AllocateMemory`'s pNext chain (spec.md §4.10), if present.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Dedicated {
    Image(Handle),
    Buffer(Handle),
}

#[derive(Debug, Clone, Default)]
pub struct AllocateMemory {
    pub handle: Handle,
    pub dedicated: Option<Dedicated>,
    pub thread: ThreadId,
    pub extras: Extras,
}

impl Cmd for AllocateMemory {
    fn mutate(&self, state: &mut State, _builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error> {
        state.device_memories.insert(self.handle, DeviceMemory::default());
        Ok(())
    }
    fn api(&self) -> Option<ApiId> {
        Some(ApiId::VULKAN)
    }
    fn thread(&self) -> ThreadId {
        self.thread
    }
    fn extras(&self) -> &Extras {
        &self.extras
    }
    fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }
    fn replace(&self, _data: Vec<u8>) -> Box<dyn Cmd> {
        Box::new(self.clone())
    }
    fn name(&self) -> &'static str {
        "vkAllocateMemory"
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct FreeMemory {
    pub handle: Handle,
    pub thread: ThreadId,
    pub extras: Extras,
}

impl Cmd for FreeMemory {
    fn mutate(&self, state: &mut State, _builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error> {
        state.device_memories.remove(self.handle).map(|_| ())
    }
    fn api(&self) -> Option<ApiId> {
        Some(ApiId::VULKAN)
    }
    fn thread(&self) -> ThreadId {
        self.thread
    }
    fn extras(&self) -> &Extras {
        &self.extras
    }
    fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }
    fn replace(&self, _data: Vec<u8>) -> Box<dyn Cmd> {
        Box::new(self.clone())
    }
    fn name(&self) -> &'static str {
        "vkFreeMemory"
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct MapMemory {
    pub memory: Handle,
    pub thread: ThreadId,
    pub extras: Extras,
}

impl Cmd for MapMemory {
    fn mutate(&self, state: &mut State, _builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error> {
        state.device_memories.get_mut(self.memory).ok_or(Error::UnknownHandle)?.mapped = true;
        Ok(())
    }
    fn api(&self) -> Option<ApiId> {
        Some(ApiId::VULKAN)
    }
    fn thread(&self) -> ThreadId {
        self.thread
    }
    fn extras(&self) -> &Extras {
        &self.extras
    }
    fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }
    fn replace(&self, _data: Vec<u8>) -> Box<dyn Cmd> {
        Box::new(self.clone())
    }
    fn name(&self) -> &'static str {
        "vkMapMemory"
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct UnmapMemory {
    pub memory: Handle,
    pub thread: ThreadId,
    pub extras: Extras,
}

impl Cmd for UnmapMemory {
    fn mutate(&self, state: &mut State, _builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error> {
        state.device_memories.get_mut(self.memory).ok_or(Error::UnknownHandle)?.mapped = false;
        Ok(())
    }
    fn api(&self) -> Option<ApiId> {
        Some(ApiId::VULKAN)
    }
    fn thread(&self) -> ThreadId {
        self.thread
    }
    fn extras(&self) -> &Extras {
        &self.extras
    }
    fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }
    fn replace(&self, _data: Vec<u8>) -> Box<dyn Cmd> {
        Box::new(self.clone())
    }
    fn name(&self) -> &'static str {
        "vkUnmapMemory"
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// `vkFlushMappedMemoryRanges`. Per-binding coverage (full vs. partial)
/// decides `write` vs `modify`; classification happens in the behaviour
/// provider, which can see every binding the flush range overlaps
/// (spec.md §4.8 rule 4, testable property 7).
#[derive(Debug, Clone, Default)]
pub struct FlushMappedMemoryRanges {
    pub memory: Handle,
    pub range: MemoryRange,
    pub thread: ThreadId,
    pub extras: Extras,
}

impl Cmd for FlushMappedMemoryRanges {
    fn mutate(&self, state: &mut State, _builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error> {
        if !state.device_memories.contains(self.memory) {
            return Err(Error::UnknownHandle);
        }
        Ok(())
    }
    fn api(&self) -> Option<ApiId> {
        Some(ApiId::VULKAN)
    }
    fn thread(&self) -> ThreadId {
        self.thread
    }
    fn extras(&self) -> &Extras {
        &self.extras
    }
    fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }
    fn replace(&self, _data: Vec<u8>) -> Box<dyn Cmd> {
        Box::new(self.clone())
    }
    fn name(&self) -> &'static str {
        "vkFlushMappedMemoryRanges"
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// `vkInvalidateMappedMemoryRanges`: every overlapping binding is a `read`
/// (spec.md §4.8 rule 5).
#[derive(Debug, Clone, Default)]
pub struct InvalidateMappedMemoryRanges {
    pub memory: Handle,
    pub range: MemoryRange,
    pub thread: ThreadId,
    pub extras: Extras,
}

impl Cmd for InvalidateMappedMemoryRanges {
    fn mutate(&self, state: &mut State, _builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error> {
        if !state.device_memories.contains(self.memory) {
            return Err(Error::UnknownHandle);
        }
        Ok(())
    }
    fn api(&self) -> Option<ApiId> {
        Some(ApiId::VULKAN)
    }
    fn thread(&self) -> ThreadId {
        self.thread
    }
    fn extras(&self) -> &Extras {
        &self.extras
    }
    fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }
    fn replace(&self, _data: Vec<u8>) -> Box<dyn Cmd> {
        Box::new(self.clone())
    }
    fn name(&self) -> &'static str {
        "vkInvalidateMappedMemoryRanges"
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// `vkBindImageMemory`. A zero-length `range` (size never queried, e.g. the
/// app skipped `vkGetImageMemoryRequirements`) always produces a
/// conservatively `modify`d binding (spec.md §4.8 rule 4).
#[derive(Debug, Clone, Default)]
pub struct BindImageMemory {
    pub image: Handle,
    pub memory: Handle,
    pub range: MemoryRange,
    pub thread: ThreadId,
    pub extras: Extras,
}

impl Cmd for BindImageMemory {
    fn mutate(&self, state: &mut State, _builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error> {
        let idx = state
            .device_memories
            .get_mut(self.memory)
            .ok_or(Error::UnknownHandle)?
            .bind(self.range);
        let image = state.images.get_mut(self.image).ok_or(Error::UnknownHandle)?;
        image.bound_memory = Some(self.memory);
        image.binding_index = Some(idx);
        Ok(())
    }
    fn api(&self) -> Option<ApiId> {
        Some(ApiId::VULKAN)
    }
    fn thread(&self) -> ThreadId {
        self.thread
    }
    fn extras(&self) -> &Extras {
        &self.extras
    }
    fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }
    fn replace(&self, _data: Vec<u8>) -> Box<dyn Cmd> {
        Box::new(self.clone())
    }
    fn name(&self) -> &'static str {
        "vkBindImageMemory"
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct BindBufferMemory {
    pub buffer: Handle,
    pub memory: Handle,
    pub range: MemoryRange,
    pub thread: ThreadId,
    pub extras: Extras,
}

impl Cmd for BindBufferMemory {
    fn mutate(&self, state: &mut State, _builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error> {
        let idx = state
            .device_memories
            .get_mut(self.memory)
            .ok_or(Error::UnknownHandle)?
            .bind(self.range);
        let buffer = state.buffers.get_mut(self.buffer).ok_or(Error::UnknownHandle)?;
        buffer.bound_memory = Some(self.memory);
        buffer.binding_index = Some(idx);
        Ok(())
    }
    fn api(&self) -> Option<ApiId> {
        Some(ApiId::VULKAN)
    }
    fn thread(&self) -> ThreadId {
        self.thread
    }
    fn extras(&self) -> &Extras {
        &self.extras
    }
    fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }
    fn replace(&self, _data: Vec<u8>) -> Box<dyn Cmd> {
        Box::new(self.clone())
    }
    fn name(&self) -> &'static str {
        "vkBindBufferMemory"
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreateRenderPass {
    pub handle: Handle,
    pub attachments: Vec<AttachmentDesc>,
    pub thread: ThreadId,
    pub extras: Extras,
}

impl Cmd for CreateRenderPass {
    fn mutate(&self, state: &mut State, _builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error> {
        state.render_passes.insert(
            self.handle,
            RenderPass {
                attachments: self.attachments.clone(),
            },
        );
        Ok(())
    }
    fn api(&self) -> Option<ApiId> {
        Some(ApiId::VULKAN)
    }
    fn thread(&self) -> ThreadId {
        self.thread
    }
    fn extras(&self) -> &Extras {
        &self.extras
    }
    fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }
    fn replace(&self, _data: Vec<u8>) -> Box<dyn Cmd> {
        Box::new(self.clone())
    }
    fn name(&self) -> &'static str {
        "vkCreateRenderPass"
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// `vkCreateGraphicsPipelines` (one pipeline per command; the real entry
/// point creates a batch, but one [`Cmd`] per pipeline keeps `mutate`
/// uniform with the rest of the file).
#[derive(Debug, Clone, Default)]
pub struct CreatePipeline {
    pub handle: Handle,
    pub render_pass: Handle,
    pub shader_modules: Vec<Handle>,
    pub thread: ThreadId,
    pub extras: Extras,
}

impl Cmd for CreatePipeline {
    fn mutate(&self, state: &mut State, _builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error> {
        state.pipelines.insert(self.handle, Pipeline);
        Ok(())
    }
    fn api(&self) -> Option<ApiId> {
        Some(ApiId::VULKAN)
    }
    fn thread(&self) -> ThreadId {
        self.thread
    }
    fn extras(&self) -> &Extras {
        &self.extras
    }
    fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }
    fn replace(&self, _data: Vec<u8>) -> Box<dyn Cmd> {
        Box::new(self.clone())
    }
    fn name(&self) -> &'static str {
        "vkCreateGraphicsPipelines"
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreateFramebuffer {
    pub handle: Handle,
    pub attachments: Vec<Handle>,
    pub thread: ThreadId,
    pub extras: Extras,
}

impl Cmd for CreateFramebuffer {
    fn mutate(&self, state: &mut State, _builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error> {
        state.framebuffers.insert(
            self.handle,
            Framebuffer {
                attachments: self.attachments.clone(),
            },
        );
        Ok(())
    }
    fn api(&self) -> Option<ApiId> {
        Some(ApiId::VULKAN)
    }
    fn thread(&self) -> ThreadId {
        self.thread
    }
    fn extras(&self) -> &Extras {
        &self.extras
    }
    fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }
    fn replace(&self, _data: Vec<u8>) -> Box<dyn Cmd> {
        Box::new(self.clone())
    }
    fn name(&self) -> &'static str {
        "vkCreateFramebuffer"
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreateDescriptorSet {
    pub handle: Handle,
    pub thread: ThreadId,
    pub extras: Extras,
}

impl Cmd for CreateDescriptorSet {
    fn mutate(&self, state: &mut State, _builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error> {
        state.descriptor_sets.insert(self.handle, DescriptorSet::default());
        Ok(())
    }
    fn api(&self) -> Option<ApiId> {
        Some(ApiId::VULKAN)
    }
    fn thread(&self) -> ThreadId {
        self.thread
    }
    fn extras(&self) -> &Extras {
        &self.extras
    }
    fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }
    fn replace(&self, _data: Vec<u8>) -> Box<dyn Cmd> {
        Box::new(self.clone())
    }
    fn name(&self) -> &'static str {
        "vkAllocateDescriptorSets"
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateDescriptorSets {
    pub set: Handle,
    pub binding: u32,
    pub resource: Handle,
    pub thread: ThreadId,
    pub extras: Extras,
}

impl Cmd for UpdateDescriptorSets {
    fn mutate(&self, state: &mut State, _builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error> {
        let set = state.descriptor_sets.get_mut(self.set).ok_or(Error::UnknownHandle)?;
        set.bindings.insert(self.binding, self.resource);
        Ok(())
    }
    fn api(&self) -> Option<ApiId> {
        Some(ApiId::VULKAN)
    }
    fn thread(&self) -> ThreadId {
        self.thread
    }
    fn extras(&self) -> &Extras {
        &self.extras
    }
    fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }
    fn replace(&self, _data: Vec<u8>) -> Box<dyn Cmd> {
        Box::new(self.clone())
    }
    fn name(&self) -> &'static str {
        "vkUpdateDescriptorSets"
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct BeginCommandBuffer {
    pub cb: Handle,
    pub thread: ThreadId,
    pub extras: Extras,
}

impl Cmd for BeginCommandBuffer {
    fn mutate(&self, state: &mut State, _builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error> {
        state.command_buffers.insert(self.cb, CommandBufferRecord::new(self.cb));
        Ok(())
    }
    fn api(&self) -> Option<ApiId> {
        Some(ApiId::VULKAN)
    }
    fn thread(&self) -> ThreadId {
        self.thread
    }
    fn extras(&self) -> &Extras {
        &self.extras
    }
    fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }
    fn replace(&self, _data: Vec<u8>) -> Box<dyn Cmd> {
        Box::new(self.clone())
    }
    fn name(&self) -> &'static str {
        "vkBeginCommandBuffer"
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct EndCommandBuffer {
    pub cb: Handle,
    pub thread: ThreadId,
    pub extras: Extras,
}

impl Cmd for EndCommandBuffer {
    fn mutate(&self, _state: &mut State, _builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error> {
        Ok(())
    }
    fn api(&self) -> Option<ApiId> {
        Some(ApiId::VULKAN)
    }
    fn thread(&self) -> ThreadId {
        self.thread
    }
    fn extras(&self) -> &Extras {
        &self.extras
    }
    fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }
    fn replace(&self, _data: Vec<u8>) -> Box<dyn Cmd> {
        Box::new(self.clone())
    }
    fn name(&self) -> &'static str {
        "vkEndCommandBuffer"
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Reads are recorded at bind time, not at the later draw: by the time a
/// draw's submit is rolled out, only the last-bound buffer remains
/// reachable from `state`, so the dependency on the buffer bound *at this
/// point in the recording* would already be lost (spec.md §4.8 rule 9).
#[derive(Debug, Clone, Default)]
pub struct CmdBindVertexBuffers {
    pub cb: Handle,
    pub buffers: Vec<Handle>,
    pub thread: ThreadId,
    pub extras: Extras,
}

impl Cmd for CmdBindVertexBuffers {
    fn mutate(&self, state: &mut State, _builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error> {
        let mut refs = Vec::new();
        for &buffer in &self.buffers {
            if let Some(b) = state.buffers.get(buffer) {
                if let (Some(memory), Some(binding_index)) = (b.bound_memory, b.binding_index) {
                    refs.push(BindingRef {
                        memory,
                        binding_index,
                    });
                }
            }
        }
        state.command_buffer_mut(self.cb)?.push(vec![DeferredBehaviour::ReadBindings(refs)]);
        Ok(())
    }
    fn api(&self) -> Option<ApiId> {
        Some(ApiId::VULKAN)
    }
    fn thread(&self) -> ThreadId {
        self.thread
    }
    fn extras(&self) -> &Extras {
        &self.extras
    }
    fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }
    fn replace(&self, _data: Vec<u8>) -> Box<dyn Cmd> {
        Box::new(self.clone())
    }
    fn name(&self) -> &'static str {
        "vkCmdBindVertexBuffers"
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct CmdBindDescriptorSets {
    pub cb: Handle,
    pub sets: Vec<Handle>,
    pub thread: ThreadId,
    pub extras: Extras,
}

impl Cmd for CmdBindDescriptorSets {
    fn mutate(&self, state: &mut State, _builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error> {
        let mut behaviours = Vec::new();
        for &set in &self.sets {
            behaviours.push(DeferredBehaviour::ReadHandle(set));
            if let Some(descriptor_set) = state.descriptor_sets.get(set) {
                for &resource in descriptor_set.bindings.values() {
                    behaviours.push(DeferredBehaviour::ReadHandle(resource));
                }
            }
        }
        state.command_buffer_mut(self.cb)?.push(behaviours);
        Ok(())
    }
    fn api(&self) -> Option<ApiId> {
        Some(ApiId::VULKAN)
    }
    fn thread(&self) -> ThreadId {
        self.thread
    }
    fn extras(&self) -> &Extras {
        &self.extras
    }
    fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }
    fn replace(&self, _data: Vec<u8>) -> Box<dyn Cmd> {
        Box::new(self.clone())
    }
    fn name(&self) -> &'static str {
        "vkCmdBindDescriptorSets"
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// `vkCmdBeginRenderPass`: queues a read for every attachment whose
/// `loadOp` is `Load` (spec.md §4.10, scenario Sc4); `Clear`/`DontCare`
/// attachments need nothing from before this point.
#[derive(Debug, Clone, Default)]
pub struct CmdBeginRenderPass {
    pub cb: Handle,
    pub render_pass: Handle,
    pub framebuffer: Handle,
    pub thread: ThreadId,
    pub extras: Extras,
}

impl Cmd for CmdBeginRenderPass {
    fn mutate(&self, state: &mut State, _builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error> {
        let pass = state.render_passes.get(self.render_pass).ok_or(Error::UnknownHandle)?.clone();
        let fb = state.framebuffers.get(self.framebuffer).ok_or(Error::UnknownHandle)?.clone();

        let mut behaviours = vec![DeferredBehaviour::ReadHandle(self.render_pass), DeferredBehaviour::ReadHandle(self.framebuffer)];
        for (desc, &attachment) in pass.attachments.iter().zip(fb.attachments.iter()) {
            if let Some(binding) = image_binding_ref(state, attachment) {
                if let Some(b) = render_pass::begin_behaviour(desc.load_op, binding) {
                    behaviours.push(b);
                }
            }
        }
        state.command_buffer_mut(self.cb)?.push(behaviours);
        Ok(())
    }
    fn api(&self) -> Option<ApiId> {
        Some(ApiId::VULKAN)
    }
    fn thread(&self) -> ThreadId {
        self.thread
    }
    fn extras(&self) -> &Extras {
        &self.extras
    }
    fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }
    fn replace(&self, _data: Vec<u8>) -> Box<dyn Cmd> {
        Box::new(self.clone())
    }
    fn name(&self) -> &'static str {
        "vkCmdBeginRenderPass"
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// `vkCmdEndRenderPass`: queues a write for every attachment whose
/// `storeOp` is `Store`.
#[derive(Debug, Clone, Default)]
pub struct CmdEndRenderPass {
    pub cb: Handle,
    pub render_pass: Handle,
    pub framebuffer: Handle,
    pub thread: ThreadId,
    pub extras: Extras,
}

impl Cmd for CmdEndRenderPass {
    fn mutate(&self, state: &mut State, _builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error> {
        let pass = state.render_passes.get(self.render_pass).ok_or(Error::UnknownHandle)?.clone();
        let fb = state.framebuffers.get(self.framebuffer).ok_or(Error::UnknownHandle)?.clone();

        let mut behaviours = Vec::new();
        for (desc, &attachment) in pass.attachments.iter().zip(fb.attachments.iter()) {
            if let Some(binding) = image_binding_ref(state, attachment) {
                if let Some(b) = render_pass::end_behaviour(desc.store_op, binding) {
                    behaviours.push(b);
                }
            }
        }
        state.command_buffer_mut(self.cb)?.push(behaviours);
        Ok(())
    }
    fn api(&self) -> Option<ApiId> {
        Some(ApiId::VULKAN)
    }
    fn thread(&self) -> ThreadId {
        self.thread
    }
    fn extras(&self) -> &Extras {
        &self.extras
    }
    fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }
    fn replace(&self, _data: Vec<u8>) -> Box<dyn Cmd> {
        Box::new(self.clone())
    }
    fn name(&self) -> &'static str {
        "vkCmdEndRenderPass"
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct CmdCopyBuffer {
    pub cb: Handle,
    pub src: Handle,
    pub dst: Handle,
    pub thread: ThreadId,
    pub extras: Extras,
}

impl Cmd for CmdCopyBuffer {
    fn mutate(&self, state: &mut State, _builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error> {
        let mut behaviours = Vec::new();
        if let Some(binding) = buffer_binding_ref(state, self.src) {
            behaviours.push(DeferredBehaviour::ReadBindings(vec![binding]));
        }
        // A copy can target any sub-range of `dst`; sub-ranges aren't
        // tracked, so the destination is always a `modify`, never a pure
        // `write` (spec.md §4.10: aliasing conservatism).
        if let Some(binding) = buffer_binding_ref(state, self.dst) {
            behaviours.push(DeferredBehaviour::ModifyBindings(vec![binding]));
        }
        state.command_buffer_mut(self.cb)?.push(behaviours);
        Ok(())
    }
    fn api(&self) -> Option<ApiId> {
        Some(ApiId::VULKAN)
    }
    fn thread(&self) -> ThreadId {
        self.thread
    }
    fn extras(&self) -> &Extras {
        &self.extras
    }
    fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }
    fn replace(&self, _data: Vec<u8>) -> Box<dyn Cmd> {
        Box::new(self.clone())
    }
    fn name(&self) -> &'static str {
        "vkCmdCopyBuffer"
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// `vkCmdCopyImage`: same aliasing conservatism as [`CmdCopyBuffer`].
#[derive(Debug, Clone, Default)]
pub struct CmdCopyImage {
    pub cb: Handle,
    pub src: Handle,
    pub dst: Handle,
    pub thread: ThreadId,
    pub extras: Extras,
}

impl Cmd for CmdCopyImage {
    fn mutate(&self, state: &mut State, _builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error> {
        let mut behaviours = Vec::new();
        if let Some(binding) = image_binding_ref(state, self.src) {
            behaviours.push(DeferredBehaviour::ReadBindings(vec![binding]));
        }
        if let Some(binding) = image_binding_ref(state, self.dst) {
            behaviours.push(DeferredBehaviour::ModifyBindings(vec![binding]));
        }
        state.command_buffer_mut(self.cb)?.push(behaviours);
        Ok(())
    }
    fn api(&self) -> Option<ApiId> {
        Some(ApiId::VULKAN)
    }
    fn thread(&self) -> ThreadId {
        self.thread
    }
    fn extras(&self) -> &Extras {
        &self.extras
    }
    fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }
    fn replace(&self, _data: Vec<u8>) -> Box<dyn Cmd> {
        Box::new(self.clone())
    }
    fn name(&self) -> &'static str {
        "vkCmdCopyImage"
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// `vkCmdBlitImage`: same shape as [`CmdCopyImage`], different filtering --
/// irrelevant to the dependency graph.
#[derive(Debug, Clone, Default)]
pub struct CmdBlitImage {
    pub cb: Handle,
    pub src: Handle,
    pub dst: Handle,
    pub thread: ThreadId,
    pub extras: Extras,
}

impl Cmd for CmdBlitImage {
    fn mutate(&self, state: &mut State, _builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error> {
        let mut behaviours = Vec::new();
        if let Some(binding) = image_binding_ref(state, self.src) {
            behaviours.push(DeferredBehaviour::ReadBindings(vec![binding]));
        }
        if let Some(binding) = image_binding_ref(state, self.dst) {
            behaviours.push(DeferredBehaviour::ModifyBindings(vec![binding]));
        }
        state.command_buffer_mut(self.cb)?.push(behaviours);
        Ok(())
    }
    fn api(&self) -> Option<ApiId> {
        Some(ApiId::VULKAN)
    }
    fn thread(&self) -> ThreadId {
        self.thread
    }
    fn extras(&self) -> &Extras {
        &self.extras
    }
    fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }
    fn replace(&self, _data: Vec<u8>) -> Box<dyn Cmd> {
        Box::new(self.clone())
    }
    fn name(&self) -> &'static str {
        "vkCmdBlitImage"
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// `vkCmdClearColorImage`: no source, so the destination range can't be
/// compared against anything read first -- always a `modify`.
#[derive(Debug, Clone, Default)]
pub struct CmdClearColorImage {
    pub cb: Handle,
    pub image: Handle,
    pub thread: ThreadId,
    pub extras: Extras,
}

impl Cmd for CmdClearColorImage {
    fn mutate(&self, state: &mut State, _builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error> {
        let mut behaviours = Vec::new();
        if let Some(binding) = image_binding_ref(state, self.image) {
            behaviours.push(DeferredBehaviour::ModifyBindings(vec![binding]));
        }
        state.command_buffer_mut(self.cb)?.push(behaviours);
        Ok(())
    }
    fn api(&self) -> Option<ApiId> {
        Some(ApiId::VULKAN)
    }
    fn thread(&self) -> ThreadId {
        self.thread
    }
    fn extras(&self) -> &Extras {
        &self.extras
    }
    fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }
    fn replace(&self, _data: Vec<u8>) -> Box<dyn Cmd> {
        Box::new(self.clone())
    }
    fn name(&self) -> &'static str {
        "vkCmdClearColorImage"
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// `vkCmdUpdateBuffer`: small inline-data writes, still range-unaware.
#[derive(Debug, Clone, Default)]
pub struct CmdUpdateBuffer {
    pub cb: Handle,
    pub dst: Handle,
    pub thread: ThreadId,
    pub extras: Extras,
}

impl Cmd for CmdUpdateBuffer {
    fn mutate(&self, state: &mut State, _builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error> {
        let mut behaviours = Vec::new();
        if let Some(binding) = buffer_binding_ref(state, self.dst) {
            behaviours.push(DeferredBehaviour::ModifyBindings(vec![binding]));
        }
        state.command_buffer_mut(self.cb)?.push(behaviours);
        Ok(())
    }
    fn api(&self) -> Option<ApiId> {
        Some(ApiId::VULKAN)
    }
    fn thread(&self) -> ThreadId {
        self.thread
    }
    fn extras(&self) -> &Extras {
        &self.extras
    }
    fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }
    fn replace(&self, _data: Vec<u8>) -> Box<dyn Cmd> {
        Box::new(self.clone())
    }
    fn name(&self) -> &'static str {
        "vkCmdUpdateBuffer"
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// `vkCmdFillBuffer`: same shape as [`CmdUpdateBuffer`].
#[derive(Debug, Clone, Default)]
pub struct CmdFillBuffer {
    pub cb: Handle,
    pub dst: Handle,
    pub thread: ThreadId,
    pub extras: Extras,
}

impl Cmd for CmdFillBuffer {
    fn mutate(&self, state: &mut State, _builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error> {
        let mut behaviours = Vec::new();
        if let Some(binding) = buffer_binding_ref(state, self.dst) {
            behaviours.push(DeferredBehaviour::ModifyBindings(vec![binding]));
        }
        state.command_buffer_mut(self.cb)?.push(behaviours);
        Ok(())
    }
    fn api(&self) -> Option<ApiId> {
        Some(ApiId::VULKAN)
    }
    fn thread(&self) -> ThreadId {
        self.thread
    }
    fn extras(&self) -> &Extras {
        &self.extras
    }
    fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }
    fn replace(&self, _data: Vec<u8>) -> Box<dyn Cmd> {
        Box::new(self.clone())
    }
    fn name(&self) -> &'static str {
        "vkCmdFillBuffer"
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// `vkCmdCopyQueryPoolResults`: reads the query pool's (opaque) results and
/// writes them into `dst`, range-unaware like every other copy.
#[derive(Debug, Clone, Default)]
pub struct CmdCopyQueryPoolResults {
    pub cb: Handle,
    pub query_pool: Handle,
    pub dst: Handle,
    pub thread: ThreadId,
    pub extras: Extras,
}

impl Cmd for CmdCopyQueryPoolResults {
    fn mutate(&self, state: &mut State, _builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error> {
        let mut behaviours = vec![DeferredBehaviour::ReadHandle(self.query_pool)];
        if let Some(binding) = buffer_binding_ref(state, self.dst) {
            behaviours.push(DeferredBehaviour::ModifyBindings(vec![binding]));
        }
        state.command_buffer_mut(self.cb)?.push(behaviours);
        Ok(())
    }
    fn api(&self) -> Option<ApiId> {
        Some(ApiId::VULKAN)
    }
    fn thread(&self) -> ThreadId {
        self.thread
    }
    fn extras(&self) -> &Extras {
        &self.extras
    }
    fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }
    fn replace(&self, _data: Vec<u8>) -> Box<dyn Cmd> {
        Box::new(self.clone())
    }
    fn name(&self) -> &'static str {
        "vkCmdCopyQueryPoolResults"
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// `vkCmdPipelineBarrier`: no copy, but the transitioned resources still
/// need a `modify` so a later read orders after the barrier (spec.md
/// §4.10).
#[derive(Debug, Clone, Default)]
pub struct CmdPipelineBarrier {
    pub cb: Handle,
    pub buffers: Vec<Handle>,
    pub images: Vec<Handle>,
    pub thread: ThreadId,
    pub extras: Extras,
}

impl Cmd for CmdPipelineBarrier {
    fn mutate(&self, state: &mut State, _builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error> {
        let mut behaviours = Vec::new();
        for &buffer in &self.buffers {
            if let Some(binding) = buffer_binding_ref(state, buffer) {
                behaviours.push(DeferredBehaviour::ModifyBindings(vec![binding]));
            }
        }
        for &image in &self.images {
            if let Some(binding) = image_binding_ref(state, image) {
                behaviours.push(DeferredBehaviour::ModifyBindings(vec![binding]));
            }
        }
        state.command_buffer_mut(self.cb)?.push(behaviours);
        Ok(())
    }
    fn api(&self) -> Option<ApiId> {
        Some(ApiId::VULKAN)
    }
    fn thread(&self) -> ThreadId {
        self.thread
    }
    fn extras(&self) -> &Extras {
        &self.extras
    }
    fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }
    fn replace(&self, _data: Vec<u8>) -> Box<dyn Cmd> {
        Box::new(self.clone())
    }
    fn name(&self) -> &'static str {
        "vkCmdPipelineBarrier"
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// `vkCmdBindIndexBuffer`: same deferred-read treatment as
/// [`CmdBindVertexBuffers`].
#[derive(Debug, Clone, Default)]
pub struct CmdBindIndexBuffer {
    pub cb: Handle,
    pub buffer: Handle,
    pub thread: ThreadId,
    pub extras: Extras,
}

impl Cmd for CmdBindIndexBuffer {
    fn mutate(&self, state: &mut State, _builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error> {
        let mut behaviours = Vec::new();
        if let Some(binding) = buffer_binding_ref(state, self.buffer) {
            behaviours.push(DeferredBehaviour::ReadBindings(vec![binding]));
        }
        state.command_buffer_mut(self.cb)?.push(behaviours);
        Ok(())
    }
    fn api(&self) -> Option<ApiId> {
        Some(ApiId::VULKAN)
    }
    fn thread(&self) -> ThreadId {
        self.thread
    }
    fn extras(&self) -> &Extras {
        &self.extras
    }
    fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }
    fn replace(&self, _data: Vec<u8>) -> Box<dyn Cmd> {
        Box::new(self.clone())
    }
    fn name(&self) -> &'static str {
        "vkCmdBindIndexBuffer"
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// `vkCmdDrawIndexed`: contributes no bindings of its own -- everything it
/// touches was already declared by the preceding bind commands -- but still
/// needs a subcommand slot so stop points can land between draws.
#[derive(Debug, Clone, Default)]
pub struct CmdDrawIndexed {
    pub cb: Handle,
    pub thread: ThreadId,
    pub extras: Extras,
}

impl Cmd for CmdDrawIndexed {
    fn mutate(&self, state: &mut State, _builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error> {
        state.command_buffer_mut(self.cb)?.push(Vec::new());
        Ok(())
    }
    fn api(&self) -> Option<ApiId> {
        Some(ApiId::VULKAN)
    }
    fn thread(&self) -> ThreadId {
        self.thread
    }
    fn extras(&self) -> &Extras {
        &self.extras
    }
    fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }
    fn replace(&self, _data: Vec<u8>) -> Box<dyn Cmd> {
        Box::new(self.clone())
    }
    fn name(&self) -> &'static str {
        "vkCmdDrawIndexed"
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct CmdExecuteCommands {
    pub cb: Handle,
    pub secondary: Vec<Handle>,
    pub thread: ThreadId,
    pub extras: Extras,
}

impl Cmd for CmdExecuteCommands {
    fn mutate(&self, state: &mut State, _builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error> {
        let behaviours = self.secondary.iter().map(|&s| DeferredBehaviour::SecondaryCommandBuffer(s)).collect();
        state.command_buffer_mut(self.cb)?.push(behaviours);
        Ok(())
    }
    fn api(&self) -> Option<ApiId> {
        Some(ApiId::VULKAN)
    }
    fn thread(&self) -> ThreadId {
        self.thread
    }
    fn extras(&self) -> &Extras {
        &self.extras
    }
    fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }
    fn replace(&self, _data: Vec<u8>) -> Box<dyn Cmd> {
        Box::new(self.clone())
    }
    fn name(&self) -> &'static str {
        "vkCmdExecuteCommands"
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// `vkQueueSubmit`. Object-table state does not change here: the real
/// reads/writes were already queued, per command buffer, at recording
/// time. This only records the executed-subcommand trail (spec.md §4.8)
/// for the terminator's benefit; the dependency-graph behaviour for this
/// command is computed separately by
/// [`behaviour_provider`](super::behaviour_provider), which walks the same
/// command buffers without relying on this trail (so dependency-graph
/// construction does not depend on submission order of side effects).
#[derive(Debug, Clone, Default)]
pub struct QueueSubmit {
    pub queue: Handle,
    pub submission: u64,
    pub command_buffers: Vec<Handle>,
    pub thread: ThreadId,
    pub extras: Extras,
}

impl Cmd for QueueSubmit {
    fn mutate(&self, state: &mut State, _builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error> {
        if !state.queues.contains(self.queue) {
            return Err(Error::UnknownHandle);
        }
        state.begin_subcommand_tracking(self.submission);
        for visited in super::subcommand::walk_submission(state, 0, &self.command_buffers) {
            state_record(state, visited.index);
        }
        Ok(())
    }
    fn api(&self) -> Option<ApiId> {
        Some(ApiId::VULKAN)
    }
    fn thread(&self) -> ThreadId {
        self.thread
    }
    fn extras(&self) -> &Extras {
        &self.extras
    }
    fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }
    fn replace(&self, _data: Vec<u8>) -> Box<dyn Cmd> {
        Box::new(self.clone())
    }
    fn name(&self) -> &'static str {
        "vkQueueSubmit"
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

// `walk_submission` borrows `state` immutably while this needs `&mut
// state.record_executed_subcommand`; split into a free function so the
// borrow from the iterator is dropped before the mutable call.
fn state_record(state: &mut State, index: crate::command::SubcommandIndex) {
    state.record_executed_subcommand(index);
}

/// `vkCreateSwapchainKHR`. Carries the requested `usage` bits so
/// `makeAttachmentReadable` can decide whether it needs `TRANSFER_SRC`
/// added (spec.md §4.10, scenario Sc3).
#[derive(Debug, Clone, Default)]
pub struct CreateSwapchainKHR {
    pub handle: Handle,
    pub usage: ImageUsage,
    pub thread: ThreadId,
    pub extras: Extras,
}

impl Cmd for CreateSwapchainKHR {
    fn mutate(&self, state: &mut State, _builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error> {
        state.swapchains.insert(self.handle, Swapchain);
        Ok(())
    }
    fn api(&self) -> Option<ApiId> {
        Some(ApiId::VULKAN)
    }
    fn thread(&self) -> ThreadId {
        self.thread
    }
    fn extras(&self) -> &Extras {
        &self.extras
    }
    fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }
    fn replace(&self, _data: Vec<u8>) -> Box<dyn Cmd> {
        Box::new(self.clone())
    }
    fn name(&self) -> &'static str {
        "vkCreateSwapchainKHR"
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreateQueue {
    pub handle: Handle,
    pub thread: ThreadId,
    pub extras: Extras,
}

impl Cmd for CreateQueue {
    fn mutate(&self, state: &mut State, _builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error> {
        state.queues.insert(self.handle, Queue::default());
        Ok(())
    }
    fn api(&self) -> Option<ApiId> {
        Some(ApiId::VULKAN)
    }
    fn thread(&self) -> ThreadId {
        self.thread
    }
    fn extras(&self) -> &Extras {
        &self.extras
    }
    fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }
    fn replace(&self, _data: Vec<u8>) -> Box<dyn Cmd> {
        Box::new(self.clone())
    }
    fn name(&self) -> &'static str {
        "vkGetDeviceQueue"
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// `vkQueuePresentKHR`. Always `keep_alive` (a present is an externally
/// visible side effect DCE must never drop, spec.md §4.9).
#[derive(Debug, Clone, Default)]
pub struct QueuePresent {
    pub queue: Handle,
    pub image: Handle,
    pub thread: ThreadId,
    pub extras: Extras,
}

impl Cmd for QueuePresent {
    fn mutate(&self, state: &mut State, _builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error> {
        if !state.images.contains(self.image) {
            return Err(Error::UnknownHandle);
        }
        Ok(())
    }
    fn api(&self) -> Option<ApiId> {
        Some(ApiId::VULKAN)
    }
    fn thread(&self) -> ThreadId {
        self.thread
    }
    fn extras(&self) -> &Extras {
        &self.extras
    }
    fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }
    fn replace(&self, _data: Vec<u8>) -> Box<dyn Cmd> {
        Box::new(self.clone())
    }
    fn name(&self) -> &'static str {
        "vkQueuePresentKHR"
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// `vkSetEvent`: behaves like a boundary that rolls out previously pending
/// deferred behaviours, same as `QueueSubmit` (spec.md §4.8 rule 11). In a
/// single-queue plugin the only pending behaviours are the ones already
/// rolled out at `QueueSubmit`, so this carries no address of its own; it
/// only needs `keep_alive` so DCE never treats it as dead.
#[derive(Debug, Clone, Default)]
pub struct SetEvent {
    pub event: Handle,
    pub thread: ThreadId,
    pub extras: Extras,
}

impl Cmd for SetEvent {
    fn mutate(&self, _state: &mut State, _builder: Option<&mut dyn ReplayBuilder>) -> Result<(), Error> {
        Ok(())
    }
    fn api(&self) -> Option<ApiId> {
        Some(ApiId::VULKAN)
    }
    fn thread(&self) -> ThreadId {
        self.thread
    }
    fn extras(&self) -> &Extras {
        &self.extras
    }
    fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }
    fn replace(&self, _data: Vec<u8>) -> Box<dyn Cmd> {
        Box::new(self.clone())
    }
    fn name(&self) -> &'static str {
        "vkSetEvent"
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

