//! Scenario Sc3 (spec.md §4.10): `makeAttachmentReadable` unconditionally
//! adds `TRANSFER_SRC` to any `CreateImage`/`CreateSwapchainKHR` whose
//! usage declares an attachment bit.
//! Scenario Sc4: `makeAttachmentReadable` patches a targeted render pass's
//! `storeOp` to `Store` at creation time, since a render pass is immutable
//! once created, plus load/store-op dependency rules for render-pass
//! begin/end.

use gapir_core::prelude::*;
use gapir_core::state::{AttachmentDesc, ImageUsage, LoadOp, StoreOp};
use gapir_core::transform::Transform;
use gapir_core::vulkan::attachment_readable::AttachmentReadable;
use gapir_core::vulkan::commands::{CreateImage, CreateRenderPass, CreateSwapchainKHR};
use gapir_core::vulkan::render_pass::{begin_behaviour, end_behaviour};

/// A `Writer` that records the usage bits of the last `CreateImage` or
/// `CreateSwapchainKHR` it was handed, so tests can see what the transform
/// rewrote the command to without the state table exposing usage itself.
struct CapturingWriter<'s> {
    state: &'s mut State,
    last_usage: Option<ImageUsage>,
}

impl<'s> CapturingWriter<'s> {
    fn new(state: &'s mut State) -> Self {
        CapturingWriter {
            state,
            last_usage: None,
        }
    }
}

impl<'s> Writer for CapturingWriter<'s> {
    fn state(&self) -> &State {
        self.state
    }

    fn mutate_and_write(&mut self, _id: CmdId, cmd: BoxedCmd) -> Result<(), Error> {
        if let Some(c) = cmd.as_any().downcast_ref::<CreateImage>() {
            self.last_usage = Some(c.usage);
        }
        if let Some(c) = cmd.as_any().downcast_ref::<CreateSwapchainKHR>() {
            self.last_usage = Some(c.usage);
        }
        cmd.mutate(self.state, None)
    }
}

#[test]
fn color_attachment_image_gains_transfer_src() -> Result<(), Error> {
    let mut state = State::new();
    let mut writer = CapturingWriter::new(&mut state);
    let handle = Handle(10);
    let mut transform = AttachmentReadable::new();

    transform.transform(
        CmdId::new(0),
        Box::new(CreateImage {
            handle,
            usage: ImageUsage::COLOR_ATTACHMENT,
            ..Default::default()
        }),
        &mut writer,
    )?;

    let usage = writer.last_usage.unwrap();
    assert!(usage.contains(ImageUsage::COLOR_ATTACHMENT));
    assert!(usage.contains(ImageUsage::TRANSFER_SRC));
    Ok(())
}

#[test]
fn non_attachment_image_usage_is_untouched() -> Result<(), Error> {
    let mut state = State::new();
    let mut writer = CapturingWriter::new(&mut state);
    let handle = Handle(11);
    let mut transform = AttachmentReadable::new();

    transform.transform(
        CmdId::new(0),
        Box::new(CreateImage {
            handle,
            usage: ImageUsage::SAMPLED,
            ..Default::default()
        }),
        &mut writer,
    )?;

    let usage = writer.last_usage.unwrap();
    assert_eq!(usage, ImageUsage::SAMPLED);
    Ok(())
}

#[test]
fn depth_stencil_swapchain_gains_transfer_src() -> Result<(), Error> {
    let mut state = State::new();
    let mut writer = CapturingWriter::new(&mut state);
    let handle = Handle(12);
    let mut transform = AttachmentReadable::new();

    transform.transform(
        CmdId::new(0),
        Box::new(CreateSwapchainKHR {
            handle,
            usage: ImageUsage::DEPTH_STENCIL_ATTACHMENT,
            ..Default::default()
        }),
        &mut writer,
    )?;

    let usage = writer.last_usage.unwrap();
    assert!(usage.contains(ImageUsage::DEPTH_STENCIL_ATTACHMENT));
    assert!(usage.contains(ImageUsage::TRANSFER_SRC));
    assert!(state.swapchains.contains(handle));
    Ok(())
}

#[test]
fn patches_the_targeted_attachment_to_store() -> Result<(), Error> {
    let mut state = State::new();
    let mut writer = MutatingWriter::new(&mut state);
    let handle = Handle(1);

    let mut transform = AttachmentReadable::new();
    transform.make_readable(handle, 0);

    transform.transform(
        CmdId::new(0),
        Box::new(CreateRenderPass {
            handle,
            attachments: vec![
                AttachmentDesc {
                    load_op: LoadOp::Clear,
                    store_op: StoreOp::DontCare,
                },
                AttachmentDesc {
                    load_op: LoadOp::Clear,
                    store_op: StoreOp::DontCare,
                },
            ],
            ..Default::default()
        }),
        &mut writer,
    )?;

    let pass = state.render_passes.get(handle).unwrap();
    assert_eq!(pass.attachments[0].store_op, StoreOp::Store);
    // Attachment 1 was never targeted, it keeps the original DontCare.
    assert_eq!(pass.attachments[1].store_op, StoreOp::DontCare);
    Ok(())
}

#[test]
fn a_render_pass_with_no_targeted_attachments_passes_through_unchanged() -> Result<(), Error> {
    let mut state = State::new();
    let mut writer = MutatingWriter::new(&mut state);
    let handle = Handle(2);
    let mut transform = AttachmentReadable::new();

    transform.transform(
        CmdId::new(0),
        Box::new(CreateRenderPass {
            handle,
            attachments: vec![AttachmentDesc {
                load_op: LoadOp::Load,
                store_op: StoreOp::DontCare,
            }],
            ..Default::default()
        }),
        &mut writer,
    )?;

    let pass = state.render_passes.get(handle).unwrap();
    assert_eq!(pass.attachments[0].store_op, StoreOp::DontCare);
    Ok(())
}

#[test]
fn load_depends_on_what_is_bound_clear_and_dont_care_do_not() {
    let binding = gapir_core::state::command_buffer::BindingRef {
        memory: Handle(1),
        binding_index: 0,
    };
    assert!(begin_behaviour(LoadOp::Load, binding).is_some());
    assert!(begin_behaviour(LoadOp::Clear, binding).is_none());
    assert!(begin_behaviour(LoadOp::DontCare, binding).is_none());
}

#[test]
fn store_produces_a_write_dont_care_produces_nothing() {
    let binding = gapir_core::state::command_buffer::BindingRef {
        memory: Handle(1),
        binding_index: 0,
    };
    assert!(end_behaviour(StoreOp::Store, binding).is_some());
    assert!(end_behaviour(StoreOp::DontCare, binding).is_none());
}
