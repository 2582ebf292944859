//! The Vulkan API plug-in (spec.md §4.10, component C10): concrete
//! commands, the behaviour provider that classifies them for the
//! dependency graph, and the render-pass/attachment-readability/
//! command-buffer-rebuild rules specific to Vulkan's deferred,
//! command-buffer-recording execution model.

pub mod attachment_readable;
pub mod behaviour_provider;
pub mod command_buffer_rebuilder;
pub mod commands;
pub mod render_pass;
pub mod subcommand;

pub use behaviour_provider::VulkanBehaviourProvider;
