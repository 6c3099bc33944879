//! Per-neuron spike raster and spike-pair generation.
//!
//! Spikes are recorded per neuron in file order (the input format requires
//! non-decreasing timestamps). Pair generation walks each neuron's list
//! with a doubly-nested cursor — outer `s_a = head, head.next, ...`, inner
//! `s_b = s_a.next, ...` — so every generated pair has its first timestamp
//! no later than its second.

use crate::bbox::BoundingBox;
use crate::error::{GnatError, Result};
use crate::pair::SpikePair;
use crate::spike::{NeuronId, Spike};
use std::collections::HashMap;

/// Slack added beyond the exact midpoint-to-extreme distance when sizing a
/// root box, so a point sitting exactly on an extreme timestamp lands
/// strictly inside rather than exactly on the edge. Small relative to a
/// single tick so it does not perturb `c_radius`-scale pruning decisions.
const BOUNDARY_EPS: f64 = 1e-3;

/// Half-width for a root box spanning an extent of `span` ticks. A box of
/// exactly half-width `span/2` spans the open interval `(lo, hi)` on each
/// axis, so a neuron's own earliest and latest spikes — which every one of
/// its pairs references on at least one coordinate — would sit exactly on
/// the box edge and be rejected by the strict `BoundingBox::contains_point`,
/// aborting `Quadtree::insert`. Padding by [`BOUNDARY_EPS`] avoids that
/// without widening the box enough to defeat its own pruning.
fn pad_half_width(span: i64) -> f64 {
    span as f64 / 2.0 + BOUNDARY_EPS
}

/// Accumulates spikes per neuron and produces spike-pairs for the quadtree.
#[derive(Debug)]
pub struct SpikeRaster {
    n_cells: u32,
    by_neuron: HashMap<NeuronId, Vec<i64>>,
    extent_by_neuron: HashMap<NeuronId, (i64, i64)>,
    t_min: i64,
    t_max: i64,
    n_spikes: usize,
    finalized: bool,
}

impl SpikeRaster {
    /// Create an empty raster over a fixed population of `n_cells` neurons.
    pub fn init(n_cells: u32) -> Self {
        Self {
            n_cells,
            by_neuron: HashMap::new(),
            extent_by_neuron: HashMap::new(),
            t_min: i64::MAX,
            t_max: i64::MIN,
            n_spikes: 0,
            finalized: false,
        }
    }

    /// Fixed population size this raster was created with.
    pub fn n_cells(&self) -> u32 {
        self.n_cells
    }

    /// Append a spike, recording it under its neuron in file order and
    /// updating the running `t_min`/`t_max`. Returns
    /// [`GnatError::OutOfBounds`] if `spike.neuron >= n_cells`.
    ///
    /// Panics if called after [`SpikeRaster::finalize`] — appending to a
    /// finalized raster would silently invalidate any pairs already
    /// generated from it.
    pub fn append(&mut self, spike: Spike) -> Result<()> {
        assert!(!self.finalized, "cannot append to a finalized SpikeRaster");
        if spike.neuron.raw() >= self.n_cells {
            return Err(GnatError::OutOfBounds {
                id: spike.neuron.raw(),
                n_cells: self.n_cells,
            });
        }
        self.by_neuron.entry(spike.neuron).or_default().push(spike.ts);
        let entry = self
            .extent_by_neuron
            .entry(spike.neuron)
            .or_insert((spike.ts, spike.ts));
        entry.0 = entry.0.min(spike.ts);
        entry.1 = entry.1.max(spike.ts);
        self.t_min = self.t_min.min(spike.ts);
        self.t_max = self.t_max.max(spike.ts);
        self.n_spikes += 1;
        Ok(())
    }

    /// Mark the raster complete. No-op beyond flipping the guard flag; kept
    /// as an explicit step mirroring the spec's component lifecycle so a
    /// reader can see where accumulation ends and querying begins.
    pub fn finalize(&mut self) {
        self.finalized = true;
    }

    /// Number of distinct neurons that fired at least one spike.
    pub fn neuron_count(&self) -> usize {
        self.by_neuron.len()
    }

    /// Total number of spikes recorded across all neurons.
    pub fn spike_count(&self) -> usize {
        self.n_spikes
    }

    /// Neurons that fired at least one spike.
    pub fn neurons(&self) -> impl Iterator<Item = NeuronId> + '_ {
        self.by_neuron.keys().copied()
    }

    /// The top-level quadtree boundary shared across all neurons, per
    /// §4.2's default bulk-build: centred at `(mid, mid)` where `mid =
    /// (t_max + t_min) / 2` over the whole raster, half-width `(t_max -
    /// t_min) / 2` padded by one tick so a pair touching either extreme
    /// lands strictly inside (see [`pad_half_width`]). Empty if no spikes
    /// were recorded.
    pub fn shared_bounds(&self) -> Option<BoundingBox> {
        if self.n_spikes == 0 {
            return None;
        }
        let mid = (self.t_max as f64 + self.t_min as f64) / 2.0;
        let half = pad_half_width(self.t_max - self.t_min);
        Some(BoundingBox::new(mid, mid, half))
    }

    /// A per-neuron quadtree boundary, sized from that neuron's own
    /// `t_min`/`t_max` rather than the whole raster's — the equivalent
    /// alternative §4.2 allows explicitly. Tighter per-neuron boxes let the
    /// quadtree's box-intersection test actually prune candidates instead
    /// of every neuron sharing one box wide enough to contain everything.
    /// `None` if `neuron` never fired.
    pub fn bounds_for(&self, neuron: NeuronId) -> Option<BoundingBox> {
        let (lo, hi) = *self.extent_by_neuron.get(&neuron)?;
        let mid = (hi as f64 + lo as f64) / 2.0;
        let half = pad_half_width(hi - lo);
        Some(BoundingBox::new(mid, mid, half))
    }

    /// Iterate every ordered spike-pair for `neuron` with `s_a` at or before
    /// `s_b` in file order and distinct timestamps, per the nested
    /// outer/inner cursor walk.
    pub fn pairs_for(&self, neuron: NeuronId) -> impl Iterator<Item = SpikePair> + '_ {
        let times: &[i64] = self.by_neuron.get(&neuron).map(Vec::as_slice).unwrap_or(&[]);
        (0..times.len()).flat_map(move |i| {
            let t_a = times[i];
            ((i + 1)..times.len()).filter_map(move |j| {
                let t_b = times[j];
                if t_a == t_b {
                    None
                } else {
                    SpikePair::new(Spike::new(neuron, t_a), Spike::new(neuron, t_b))
                }
            })
        })
    }
}
