//! Spike representation: the fundamental timestamped event of the model.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unique identifier for a neuron in the population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NeuronId(pub u32);

impl NeuronId {
    /// Create a new neuron id
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw id value
    pub const fn raw(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for NeuronId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for NeuronId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<NeuronId> for u32 {
    fn from(id: NeuronId) -> Self {
        id.0
    }
}

impl From<NeuronId> for usize {
    fn from(id: NeuronId) -> Self {
        id.0 as usize
    }
}

/// A single spike: a neuron firing at an integer timestamp.
///
/// Two spikes are equal iff both `neuron` and `ts` match — this is the
/// `spike_equals` used throughout the spec to filter degenerate pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Spike {
    /// The neuron that fired
    pub neuron: NeuronId,
    /// The timestamp of the spike, in the implementation-chosen time unit
    pub ts: i64,
}

impl Spike {
    /// Create a new spike
    pub const fn new(neuron: NeuronId, ts: i64) -> Self {
        Self { neuron, ts }
    }
}

impl fmt::Display for Spike {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Spike(n={}, t={})", self.neuron, self.ts)
    }
}
