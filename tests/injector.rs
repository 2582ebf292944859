//! Scenario Sc2 / testable property 4 (spec.md §8): the injector splices
//! synthesized commands around a target without disturbing anything else's
//! `CmdId`.

use gapir_core::prelude::*;
use gapir_core::transform::injector::Injector;
use gapir_core::transform::Transform;
use gapir_core::vulkan::commands::{AllocateMemory, CreateBuffer, DestroyBuffer};

#[test]
fn inserts_before_and_after_the_target_command() -> Result<(), Error> {
    let mut state = State::new();
    let mut writer = MutatingWriter::new(&mut state);

    let mut injector = Injector::new();
    let target = Handle(1);
    let injected_memory = Handle(2);

    injector.insert_before(
        CmdId::new(0),
        Box::new(AllocateMemory {
            handle: injected_memory,
            ..Default::default()
        }),
    );
    injector.insert_after(
        CmdId::new(0),
        Box::new(DestroyBuffer {
            handle: target,
            ..Default::default()
        }),
    );

    injector.transform(
        CmdId::new(0),
        Box::new(CreateBuffer {
            handle: target,
            ..Default::default()
        }),
        &mut writer,
    )?;

    // before: memory allocated, target created, after: target destroyed again.
    assert!(state.device_memories.contains(injected_memory));
    assert!(!state.buffers.contains(target));
    Ok(())
}

#[test]
fn a_command_with_no_insertions_passes_through_unchanged() -> Result<(), Error> {
    let mut state = State::new();
    let mut writer = MutatingWriter::new(&mut state);
    let mut injector = Injector::new();
    let handle = Handle(7);

    injector.transform(
        CmdId::new(3),
        Box::new(CreateBuffer {
            handle,
            ..Default::default()
        }),
        &mut writer,
    )?;

    assert!(state.buffers.contains(handle));
    Ok(())
}

#[test]
fn insertions_only_fire_once_for_their_target_id() -> Result<(), Error> {
    let mut state = State::new();
    let mut writer = MutatingWriter::new(&mut state);
    let mut injector = Injector::new();
    let first = Handle(1);
    let second = Handle(2);

    injector.insert_after(
        CmdId::new(0),
        Box::new(AllocateMemory {
            handle: Handle(99),
            ..Default::default()
        }),
    );

    injector.transform(
        CmdId::new(0),
        Box::new(CreateBuffer {
            handle: first,
            ..Default::default()
        }),
        &mut writer,
    )?;
    injector.transform(
        CmdId::new(1),
        Box::new(CreateBuffer {
            handle: second,
            ..Default::default()
        }),
        &mut writer,
    )?;

    // The second CreateBuffer at a different id triggers no extra insertion.
    assert!(state.buffers.contains(first));
    assert!(state.buffers.contains(second));
    assert_eq!(state.device_memories.len(), 1);
    Ok(())
}
