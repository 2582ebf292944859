//! Typed side-channel items attached to a command (`Cmd::extras()`,
//! spec.md §4.1). [`Observations`] is the only extra the core inspects
//! directly; other extras ride along opaquely for the capture writer.

use crate::command::observation::Observations;

/// One side-channel item attached to a command.
#[derive(Debug, Clone)]
pub enum Extra {
    /// Memory reads/writes performed by this command.
    Observations(Observations),
    /// An opaque, API-defined extra the core does not interpret (e.g. a
    /// debug marker string, or timing information attached by a capture
    /// tool). Preserved verbatim across transforms.
    Opaque {
        tag: &'static str,
        payload: Vec<u8>,
    },
}

/// An ordered bag of [`Extra`] items.
#[derive(Debug, Clone, Default)]
pub struct Extras(pub Vec<Extra>);

impl Extras {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, extra: Extra) {
        self.0.push(extra);
    }

    /// Find the first `Observations` extra, if any.
    pub fn observations(&self) -> Option<&Observations> {
        self.0.iter().find_map(|e| match e {
            Extra::Observations(obs) => Some(obs),
            _ => None,
        })
    }

    /// Find the first `Observations` extra mutably, inserting an empty one
    /// if none exists.
    pub fn observations_mut(&mut self) -> &mut Observations {
        if !self.0.iter().any(|e| matches!(e, Extra::Observations(_))) {
            self.0.push(Extra::Observations(Observations::new()));
        }
        self.0
            .iter_mut()
            .find_map(|e| match e {
                Extra::Observations(obs) => Some(obs),
                _ => None,
            })
            .expect("just inserted")
    }
}
