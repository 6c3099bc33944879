//! Ordered spike-pairs: the 2-D points indexed by the quadtree.

use crate::spike::Spike;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An ordered pair of two distinct spikes from the same neuron, interpreted
/// as the 2-D point `(sp1.ts, sp2.ts)`.
///
/// The pair-generation algorithm preserves the raster's file order and does
/// not enforce `sp1.ts < sp2.ts` — see the crate-level docs and `DESIGN.md`
/// for why this asymmetry is kept rather than normalised away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpikePair {
    /// First spike of the pair
    pub sp1: Spike,
    /// Second spike of the pair
    pub sp2: Spike,
}

impl SpikePair {
    /// Create a new spike-pair.
    ///
    /// Returns `None` if the invariant `sp1.neuron == sp2.neuron && sp1.ts !=
    /// sp2.ts` does not hold — this is a construction-time guard, not a
    /// recoverable runtime error, since any caller generating pairs from a
    /// single neuron's raster cannot violate it without a bug.
    pub fn new(sp1: Spike, sp2: Spike) -> Option<Self> {
        if sp1.neuron == sp2.neuron && sp1.ts != sp2.ts {
            Some(Self { sp1, sp2 })
        } else {
            None
        }
    }

    /// The 2-D point this pair represents: `(sp1.ts, sp2.ts)`.
    pub const fn point(&self) -> (i64, i64) {
        (self.sp1.ts, self.sp2.ts)
    }

    /// The neuron both spikes belong to.
    pub fn neuron(&self) -> crate::spike::NeuronId {
        self.sp1.neuron
    }
}

impl fmt::Display for SpikePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.sp1.ts, self.sp2.ts)
    }
}
