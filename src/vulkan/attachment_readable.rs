//! `makeAttachmentReadable` rewrite (spec.md §4.10), two scenarios:
//!
//! Sc3: every `vkCreateImage`/`vkCreateSwapchainKHR` whose usage declares
//! `COLOR_ATTACHMENT` or `DEPTH_STENCIL_ATTACHMENT` is unconditionally
//! rewritten to also carry `TRANSFER_SRC`, so the image can later be copied
//! out for a `Get`. Unlike Sc4 below this needs no targeting: any
//! attachment-capable image might be read back, and adding a usage bit it
//! didn't have is always legal to request.
//!
//! Sc4: forces specific render-pass attachments to `storeOp = Store` so a
//! later `Get` can read them back, even though the original capture
//! discarded them with `DontCare`. Render passes are immutable once
//! created, so this rewrite happens at `vkCreateRenderPass`: a targeted
//! pass is replaced by a clone with the requested attachments patched to
//! `Store`, under the same handle. Unlike Sc3, this needs the caller to
//! say which attachments -- patching every attachment of every render pass
//! would break ones never meant to be read back.

use std::collections::HashSet;

use crate::command::{BoxedCmd, CmdId};
use crate::error::Error;
use crate::state::table::Handle;
use crate::state::{ImageUsage, StoreOp};
use crate::transform::Transform;
use crate::writer::Writer;

use super::commands::{CreateImage, CreateRenderPass, CreateSwapchainKHR};

/// `(render pass handle, attachment index)` pairs to force readable.
#[derive(Default)]
pub struct AttachmentReadable {
    targets: HashSet<(Handle, usize)>,
}

impl AttachmentReadable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn make_readable(&mut self, render_pass: Handle, attachment: usize) {
        self.targets.insert((render_pass, attachment));
    }
}

/// True if `usage` marks the image usable as a color or depth/stencil
/// attachment, the trigger condition for Sc3's `TRANSFER_SRC` rewrite.
fn is_attachment_usage(usage: ImageUsage) -> bool {
    usage.contains(ImageUsage::COLOR_ATTACHMENT) || usage.contains(ImageUsage::DEPTH_STENCIL_ATTACHMENT)
}

impl Transform for AttachmentReadable {
    fn transform(&mut self, id: CmdId, cmd: BoxedCmd, out: &mut dyn Writer) -> Result<(), Error> {
        if let Some(create) = cmd.as_any().downcast_ref::<CreateImage>() {
            if is_attachment_usage(create.usage) && !create.usage.contains(ImageUsage::TRANSFER_SRC) {
                let mut patched = create.clone();
                patched.usage |= ImageUsage::TRANSFER_SRC;
                return out.mutate_and_write(id, Box::new(patched));
            }
            return out.mutate_and_write(id, cmd);
        }
        if let Some(create) = cmd.as_any().downcast_ref::<CreateSwapchainKHR>() {
            if is_attachment_usage(create.usage) && !create.usage.contains(ImageUsage::TRANSFER_SRC) {
                let mut patched = create.clone();
                patched.usage |= ImageUsage::TRANSFER_SRC;
                return out.mutate_and_write(id, Box::new(patched));
            }
            return out.mutate_and_write(id, cmd);
        }
        if let Some(create) = cmd.as_any().downcast_ref::<CreateRenderPass>() {
            let needs_patch = (0..create.attachments.len()).any(|i| self.targets.contains(&(create.handle, i)));
            if needs_patch {
                let mut patched = create.clone();
                for (i, attachment) in patched.attachments.iter_mut().enumerate() {
                    if self.targets.contains(&(create.handle, i)) {
                        attachment.store_op = StoreOp::Store;
                    }
                }
                return out.mutate_and_write(id, Box::new(patched));
            }
        }
        out.mutate_and_write(id, cmd)
    }

    fn name(&self) -> &'static str {
        "attachment_readable"
    }
}
