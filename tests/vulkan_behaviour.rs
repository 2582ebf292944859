//! Vulkan behaviour-provider classification (spec.md §4.10, component C10)
//! for scenarios not already covered by `attachment_readable.rs`: the
//! destruction-is-always-live rule, mapped-memory flush/invalidate range
//! coverage (testable property 7, spec.md §8), and the newly modeled
//! pipeline/swapchain/event commands.

use gapir_core::command::{Cmd, CmdId, Noop};
use gapir_core::command::observation::MemoryRange;
use gapir_core::graph::DependencyGraph;
use gapir_core::state::table::Handle;
use gapir_core::vulkan::behaviour_provider::VulkanBehaviourProvider;
use gapir_core::vulkan::commands::*;

type Stream = Vec<(CmdId, Box<dyn Cmd>)>;

fn stream(cmds: Vec<Box<dyn Cmd>>) -> Stream {
    cmds.into_iter().enumerate().map(|(i, c)| (CmdId::new(i as u64), c)).collect()
}

#[test]
fn destroy_buffer_is_modify_and_keep_alive() {
    let buffer = Handle(1);
    let cmds = stream(vec![
        Box::new(CreateBuffer {
            handle: buffer,
            ..Default::default()
        }),
        Box::new(DestroyBuffer {
            handle: buffer,
            ..Default::default()
        }),
    ]);

    let provider = VulkanBehaviourProvider::new();
    let (graph, _state) = DependencyGraph::build(&cmds, &provider).unwrap();

    let destroy = graph.behaviours.get(&CmdId::new(1)).unwrap();
    assert!(destroy.keep_alive, "destruction must always be live");
    assert_eq!(destroy.modifies.len(), 1, "destroy must modify, not write");
    assert!(destroy.writes.is_empty());
}

#[test]
fn destroy_image_and_free_memory_are_also_modify_and_keep_alive() {
    let image = Handle(1);
    let memory = Handle(2);
    let cmds = stream(vec![
        Box::new(CreateImage {
            handle: image,
            ..Default::default()
        }),
        Box::new(AllocateMemory {
            handle: memory,
            ..Default::default()
        }),
        Box::new(DestroyImage {
            handle: image,
            ..Default::default()
        }),
        Box::new(FreeMemory {
            handle: memory,
            ..Default::default()
        }),
    ]);

    let provider = VulkanBehaviourProvider::new();
    let (graph, _state) = DependencyGraph::build(&cmds, &provider).unwrap();

    let destroy_image = graph.behaviours.get(&CmdId::new(2)).unwrap();
    assert!(destroy_image.keep_alive);
    assert_eq!(destroy_image.modifies.len(), 1);
    assert!(destroy_image.writes.is_empty());

    let free_memory = graph.behaviours.get(&CmdId::new(3)).unwrap();
    assert!(free_memory.keep_alive);
    assert_eq!(free_memory.modifies.len(), 1);
    assert!(free_memory.writes.is_empty());
}

#[test]
fn flush_fully_covering_the_binding_is_a_write() {
    let buffer = Handle(1);
    let memory = Handle(2);
    let cmds = stream(vec![
        Box::new(CreateBuffer {
            handle: buffer,
            ..Default::default()
        }),
        Box::new(AllocateMemory {
            handle: memory,
            ..Default::default()
        }),
        Box::new(BindBufferMemory {
            buffer,
            memory,
            range: MemoryRange::new(0, 64),
            ..Default::default()
        }),
        Box::new(FlushMappedMemoryRanges {
            memory,
            range: MemoryRange::new(0, 64),
            ..Default::default()
        }),
    ]);

    let provider = VulkanBehaviourProvider::new();
    let (graph, _state) = DependencyGraph::build(&cmds, &provider).unwrap();

    let flush = graph.behaviours.get(&CmdId::new(3)).unwrap();
    assert_eq!(flush.writes.len(), 1, "a flush covering the whole binding is a write");
    assert!(flush.modifies.is_empty());
}

#[test]
fn flush_partially_covering_the_binding_is_a_modify() {
    let buffer = Handle(1);
    let memory = Handle(2);
    let cmds = stream(vec![
        Box::new(CreateBuffer {
            handle: buffer,
            ..Default::default()
        }),
        Box::new(AllocateMemory {
            handle: memory,
            ..Default::default()
        }),
        Box::new(BindBufferMemory {
            buffer,
            memory,
            range: MemoryRange::new(0, 64),
            ..Default::default()
        }),
        Box::new(FlushMappedMemoryRanges {
            memory,
            range: MemoryRange::new(0, 32),
            ..Default::default()
        }),
    ]);

    let provider = VulkanBehaviourProvider::new();
    let (graph, _state) = DependencyGraph::build(&cmds, &provider).unwrap();

    let flush = graph.behaviours.get(&CmdId::new(3)).unwrap();
    assert_eq!(flush.modifies.len(), 1, "a partial flush must not kill the previous writer outright");
    assert!(flush.writes.is_empty());
}

#[test]
fn flush_of_a_zero_length_binding_is_a_modify() {
    let buffer = Handle(1);
    let memory = Handle(2);
    let cmds = stream(vec![
        Box::new(CreateBuffer {
            handle: buffer,
            ..Default::default()
        }),
        Box::new(AllocateMemory {
            handle: memory,
            ..Default::default()
        }),
        Box::new(BindBufferMemory {
            buffer,
            memory,
            range: MemoryRange::new(0, 0),
            ..Default::default()
        }),
        Box::new(FlushMappedMemoryRanges {
            memory,
            range: MemoryRange::new(0, 0),
            ..Default::default()
        }),
    ]);

    let provider = VulkanBehaviourProvider::new();
    let (graph, _state) = DependencyGraph::build(&cmds, &provider).unwrap();

    let flush = graph.behaviours.get(&CmdId::new(3)).unwrap();
    assert_eq!(flush.modifies.len(), 1);
    assert!(flush.writes.is_empty());
}

#[test]
fn invalidate_overlapping_a_binding_is_a_read() {
    let buffer = Handle(1);
    let memory = Handle(2);
    let cmds = stream(vec![
        Box::new(CreateBuffer {
            handle: buffer,
            ..Default::default()
        }),
        Box::new(AllocateMemory {
            handle: memory,
            ..Default::default()
        }),
        Box::new(BindBufferMemory {
            buffer,
            memory,
            range: MemoryRange::new(0, 64),
            ..Default::default()
        }),
        Box::new(InvalidateMappedMemoryRanges {
            memory,
            range: MemoryRange::new(16, 32),
            ..Default::default()
        }),
    ]);

    let provider = VulkanBehaviourProvider::new();
    let (graph, _state) = DependencyGraph::build(&cmds, &provider).unwrap();

    let invalidate = graph.behaviours.get(&CmdId::new(3)).unwrap();
    assert_eq!(invalidate.reads.len(), 1);
}

#[test]
fn invalidate_disjoint_from_the_binding_touches_nothing() {
    let buffer = Handle(1);
    let memory = Handle(2);
    let cmds = stream(vec![
        Box::new(CreateBuffer {
            handle: buffer,
            ..Default::default()
        }),
        Box::new(AllocateMemory {
            handle: memory,
            ..Default::default()
        }),
        Box::new(BindBufferMemory {
            buffer,
            memory,
            range: MemoryRange::new(0, 16),
            ..Default::default()
        }),
        Box::new(InvalidateMappedMemoryRanges {
            memory,
            range: MemoryRange::new(32, 48),
            ..Default::default()
        }),
    ]);

    let provider = VulkanBehaviourProvider::new();
    let (graph, _state) = DependencyGraph::build(&cmds, &provider).unwrap();

    let invalidate = graph.behaviours.get(&CmdId::new(3)).unwrap();
    assert!(invalidate.reads.is_empty());
}

#[test]
fn create_pipeline_writes_its_own_address_and_reads_its_dependencies() {
    let render_pass = Handle(1);
    let shader = Handle(2);
    let pipeline = Handle(3);
    let cmds = stream(vec![
        Box::new(CreateRenderPass {
            handle: render_pass,
            ..Default::default()
        }),
        Box::new(CreatePipeline {
            handle: pipeline,
            render_pass,
            shader_modules: vec![shader],
            ..Default::default()
        }),
    ]);

    let provider = VulkanBehaviourProvider::new();
    let (graph, state) = DependencyGraph::build(&cmds, &provider).unwrap();
    assert!(state.pipelines.contains(pipeline));

    let create = graph.behaviours.get(&CmdId::new(1)).unwrap();
    assert_eq!(create.writes.len(), 1);
    assert_eq!(create.reads.len(), 2, "reads the render pass and the shader module");
}

#[test]
fn create_swapchain_writes_its_own_address() {
    let swapchain = Handle(1);
    let cmds = stream(vec![Box::new(CreateSwapchainKHR {
        handle: swapchain,
        ..Default::default()
    })]);

    let provider = VulkanBehaviourProvider::new();
    let (graph, state) = DependencyGraph::build(&cmds, &provider).unwrap();
    assert!(state.swapchains.contains(swapchain));

    let create = graph.behaviours.get(&CmdId::new(0)).unwrap();
    assert_eq!(create.writes.len(), 1);
}

#[test]
fn set_event_is_kept_alive_with_no_tracked_address() {
    let cmds = stream(vec![Box::new(SetEvent {
        event: Handle(1),
        ..Default::default()
    })]);

    let provider = VulkanBehaviourProvider::new();
    let (graph, _state) = DependencyGraph::build(&cmds, &provider).unwrap();

    let set_event = graph.behaviours.get(&CmdId::new(0)).unwrap();
    assert!(set_event.keep_alive);
    assert!(set_event.reads.is_empty() && set_event.writes.is_empty() && set_event.modifies.is_empty());
}

#[test]
fn unrecognised_commands_contribute_nothing() {
    let cmds = stream(vec![Box::new(Noop::new())]);
    let provider = VulkanBehaviourProvider::new();
    let (graph, _state) = DependencyGraph::build(&cmds, &provider).unwrap();
    let noop = graph.behaviours.get(&CmdId::new(0)).unwrap();
    assert!(!noop.keep_alive);
    assert!(noop.reads.is_empty() && noop.writes.is_empty() && noop.modifies.is_empty());
}
