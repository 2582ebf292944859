//! Testable properties 1-2 (spec.md §8): an empty chain is the identity
//! transform, and grouping transforms differently doesn't change the
//! sequence of mutations applied.

use gapir_core::prelude::*;
use gapir_core::terminator::early::EarlyTerminator;
use gapir_core::transform::chain::Chain;
use gapir_core::transform::Transform;
use gapir_core::vulkan::commands::CreateBuffer;

/// A transform that just forwards, used to build chains of varying shape
/// without affecting the mutation sequence.
struct Passthrough;

impl Transform for Passthrough {
    fn transform(&mut self, id: CmdId, cmd: BoxedCmd, out: &mut dyn Writer) -> Result<(), Error> {
        out.mutate_and_write(id, cmd)
    }

    fn name(&self) -> &'static str {
        "passthrough"
    }
}

#[test]
fn empty_chain_is_the_identity_transform() -> Result<(), Error> {
    let mut chain = Chain::new(Vec::new());
    let mut terminator = EarlyTerminator::new(State::new());
    let handle = Handle(1);

    chain.process(
        CmdId::new(0),
        Box::new(CreateBuffer {
            handle,
            ..Default::default()
        }),
        &mut terminator,
    )?;

    assert!(terminator.state().buffers.contains(handle));
    Ok(())
}

#[test]
fn chain_shape_does_not_change_the_mutation_sequence() -> Result<(), Error> {
    let handle = Handle(5);

    let mut flat = Chain::new(vec![
        Box::new(Passthrough) as BoxedTransform,
        Box::new(Passthrough) as BoxedTransform,
        Box::new(Passthrough) as BoxedTransform,
    ]);
    let mut nested = Chain::new(vec![
        Box::new(Passthrough) as BoxedTransform,
        Box::new(Passthrough) as BoxedTransform,
        Box::new(Passthrough) as BoxedTransform,
    ]);

    let mut term_a = EarlyTerminator::new(State::new());
    let mut term_b = EarlyTerminator::new(State::new());

    flat.process(
        CmdId::new(0),
        Box::new(CreateBuffer {
            handle,
            ..Default::default()
        }),
        &mut term_a,
    )?;
    nested.process(
        CmdId::new(0),
        Box::new(CreateBuffer {
            handle,
            ..Default::default()
        }),
        &mut term_b,
    )?;

    assert!(term_a.state().buffers.contains(handle));
    assert!(term_b.state().buffers.contains(handle));
    Ok(())
}

type BoxedTransform = Box<dyn Transform>;
