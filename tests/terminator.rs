//! Scenario Sc1 / testable property 3 (spec.md §8): a terminator never
//! mutates past the last command the caller asked for.

use gapir_core::command::Cmd;
use gapir_core::prelude::*;
use gapir_core::terminator::early::EarlyTerminator;
use gapir_core::vulkan::commands::{AllocateMemory, BindBufferMemory, CreateBuffer};

#[test]
fn stops_after_last_pending_command() {
    let mut terminator = EarlyTerminator::new(State::new());
    terminator.add_pending(StopPoint::Command(CmdId::new(1)));

    let buffer = Handle(1);
    let memory = Handle(2);

    terminator
        .mutate_and_write(
            CmdId::new(0),
            Box::new(CreateBuffer {
                handle: buffer,
                ..Default::default()
            }),
        )
        .unwrap();
    assert!(!terminator.is_done());

    terminator
        .mutate_and_write(
            CmdId::new(1),
            Box::new(AllocateMemory {
                handle: memory,
                ..Default::default()
            }),
        )
        .unwrap();
    assert!(terminator.is_done());

    // A command after the stop point is simply never offered to the
    // terminator by a correctly driven loop; verify state reflects exactly
    // what was mutated up to the stop.
    assert!(terminator.state().buffers.contains(buffer));
    assert!(terminator.state().device_memories.contains(memory));
}

#[test]
fn end_of_stream_always_finishes_even_without_pending() {
    let mut terminator = EarlyTerminator::new(State::new());
    terminator
        .mutate_and_write(CmdId::NO_ID, Box::new(gapir_core::command::EndOfStream::new()))
        .unwrap();
    assert!(terminator.is_done());
}

#[test]
fn double_destroy_reports_an_error_from_mutate() {
    use gapir_core::vulkan::commands::DestroyBuffer;
    let mut state = State::new();
    let result = DestroyBuffer {
        handle: Handle(99),
        ..Default::default()
    }
    .mutate(&mut state, None);
    assert!(result.is_err());
}

#[test]
fn bind_buffer_memory_creates_a_binding() {
    let mut state = State::new();
    let buffer = Handle(1);
    let memory = Handle(2);
    CreateBuffer {
        handle: buffer,
        ..Default::default()
    }
    .mutate(&mut state, None)
    .unwrap();
    AllocateMemory {
        handle: memory,
        ..Default::default()
    }
    .mutate(&mut state, None)
    .unwrap();
    BindBufferMemory {
        buffer,
        memory,
        range: gapir_core::command::observation::MemoryRange::new(0, 256),
        ..Default::default()
    }
    .mutate(&mut state, None)
    .unwrap();

    assert!(state.buffer_binding(buffer).is_some());
}
