//! Physical connectivity: synapses between neurons with precomputed causal
//! distance, grounded on the `GraphNetwork`/`GraphEdge` shape used by the
//! teacher's connectivity graph but narrowed to this kernel's single
//! scalar-weight edge model.
//!
//! Synapses are indexed by their *postsynaptic* neuron, mirroring the
//! `tgt_id -> presyns` mapping the enumeration phase actually walks: for
//! every postsynaptic spike-pair the orchestrator needs every synapse
//! feeding that neuron, never the reverse lookup.

use crate::causal::gamma;
use crate::error::{GnatError, Result};
use crate::spike::NeuronId;
use std::collections::HashMap;

/// A directed physical synapse from `pre` to `post`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Synapse {
    /// Presynaptic neuron
    pub pre: NeuronId,
    /// Postsynaptic neuron
    pub post: NeuronId,
    /// Relative weight, must be `> 0`
    pub rel_w: f32,
    /// Conduction delay
    pub delay: f64,
    /// Precomputed `-ln(rel_w)`, cached at insertion time since it is read
    /// on every candidate edge evaluation during enumeration.
    neg_log_rel_w: f64,
}

impl Synapse {
    /// Causal distance for a pre/post gap of `delta` ticks and membrane
    /// time constant `tau`.
    pub fn gamma(&self, delta: f64, tau: f64) -> f64 {
        gamma(delta, self.delay, self.neg_log_rel_w, tau)
    }
}

/// A fixed-size physical network of `n_cells` neurons and their synapses,
/// indexed by postsynaptic target.
#[derive(Debug)]
pub struct PhysNetwork {
    n_cells: u32,
    /// Incoming synapses keyed by postsynaptic neuron.
    presyns: HashMap<NeuronId, Vec<Synapse>>,
}

impl PhysNetwork {
    /// Create an empty network over a fixed population of `n_cells` neurons.
    pub fn init(n_cells: u32) -> Self {
        Self {
            n_cells,
            presyns: HashMap::new(),
        }
    }

    /// Fixed population size.
    pub fn n_cells(&self) -> u32 {
        self.n_cells
    }

    fn check_bounds(&self, id: NeuronId) -> Result<()> {
        if id.raw() >= self.n_cells {
            Err(GnatError::OutOfBounds {
                id: id.raw(),
                n_cells: self.n_cells,
            })
        } else {
            Ok(())
        }
    }

    /// Add a synapse. Validates both endpoints are within `[0, n_cells)` and
    /// `rel_w > 0`, surfacing the latter as [`GnatError::DomainError`]
    /// rather than silently producing a non-finite `neg_log_rel_w`.
    pub fn add_synapse(&mut self, pre: NeuronId, post: NeuronId, rel_w: f32, delay: f64) -> Result<()> {
        self.check_bounds(pre)?;
        self.check_bounds(post)?;
        if rel_w <= 0.0 {
            return Err(GnatError::DomainError { rel_w });
        }
        let syn = Synapse {
            pre,
            post,
            rel_w,
            delay,
            neg_log_rel_w: -(rel_w as f64).ln(),
        };
        self.presyns.entry(post).or_default().push(syn);
        Ok(())
    }

    /// Every synapse feeding into `post` (its presynaptic partners).
    pub fn presyns(&self, post: NeuronId) -> &[Synapse] {
        self.presyns.get(&post).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of synapses in the network.
    pub fn synapse_count(&self) -> usize {
        self.presyns.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_synapse_within_bounds() {
        let mut net = PhysNetwork::init(3);
        net.add_synapse(NeuronId::new(0), NeuronId::new(1), 0.5, 2.0).unwrap();
        assert_eq!(net.synapse_count(), 1);
        let syns = net.presyns(NeuronId::new(1));
        assert_eq!(syns.len(), 1);
        assert_eq!(syns[0].pre, NeuronId::new(0));
    }

    #[test]
    fn test_add_synapse_out_of_bounds_pre() {
        let mut net = PhysNetwork::init(2);
        let err = net
            .add_synapse(NeuronId::new(5), NeuronId::new(0), 0.5, 1.0)
            .unwrap_err();
        assert!(matches!(err, GnatError::OutOfBounds { id: 5, n_cells: 2 }));
    }

    #[test]
    fn test_add_synapse_nonpositive_weight_rejected() {
        let mut net = PhysNetwork::init(2);
        let err = net
            .add_synapse(NeuronId::new(0), NeuronId::new(1), 0.0, 1.0)
            .unwrap_err();
        assert!(matches!(err, GnatError::DomainError { rel_w } if rel_w == 0.0));
    }

    #[test]
    fn test_presyns_of_isolated_neuron_is_empty() {
        let net = PhysNetwork::init(4);
        assert!(net.presyns(NeuronId::new(3)).is_empty());
    }

    #[test]
    fn test_gamma_zero_weight_one_neuron_boundary() {
        let mut net = PhysNetwork::init(2);
        net.add_synapse(NeuronId::new(0), NeuronId::new(1), 1.0, 1.0).unwrap();
        let syn = &net.presyns(NeuronId::new(1))[0];
        // rel_w = 1.0 => neg_log_rel_w = 0, delta == delay => gamma = 0
        assert_eq!(syn.gamma(1.0, 1.0), 0.0);
    }
}
