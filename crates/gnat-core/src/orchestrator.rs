//! Pipeline: wires the raster, per-neuron quadtrees, network and causal
//! kernel together to enumerate the second-order causal activity graph.
//!
//! Replaces the teacher's global-singleton `SpikeNetwork` container with a
//! plain owned value (`Pipeline`) built once per run and passed by
//! reference — there is exactly one pipeline per invocation of this tool,
//! so a singleton buys nothing but makes testing harder.

use crate::emitter::{CausalEdge, EdgeEmitter};
use crate::error::Result;
use crate::network::PhysNetwork;
use crate::quadtree::Quadtree;
use crate::raster::SpikeRaster;
use crate::spike::NeuronId;
use parking_lot::Mutex;
use rayon::prelude::*;
use tracing::info;

/// Tunable kernel parameters for enumeration.
#[derive(Debug, Clone, Copy)]
pub struct KernelParams {
    /// Membrane time constant used by `gamma`'s linear term
    pub tau: f64,
    /// Maximum causal distance for an edge predicate leg to accept
    pub thresh: f64,
    /// Half-width of the quadtree query region searched around each
    /// postsynaptic pair's coordinates
    pub c_radius: f64,
}

/// Phase 1 output: one quadtree per neuron, built from that neuron's own
/// spike-pair set, dense-indexed by neuron id.
struct QuadtreeArray {
    trees: Vec<Option<Quadtree>>,
}

impl QuadtreeArray {
    fn build(raster: &SpikeRaster) -> Result<Self> {
        let mut trees: Vec<Option<Quadtree>> = (0..raster.n_cells()).map(|_| None).collect();

        for neuron in raster.neurons() {
            // a single-spike neuron has t_min == t_max, so w2 == 0 and no
            // pair can ever be inserted — its tree stays empty, matching
            // the documented boundary behaviour.
            let Some(bounds) = raster.bounds_for(neuron) else {
                continue;
            };
            let mut tree = Quadtree::new(bounds);
            for pair in raster.pairs_for(neuron) {
                tree.insert(pair)?;
            }
            trees[usize::from(neuron)] = Some(tree);
        }
        Ok(Self { trees })
    }

    fn get(&self, neuron: NeuronId) -> Option<&Quadtree> {
        self.trees.get(usize::from(neuron)).and_then(Option::as_ref)
    }
}

/// Owns the raster, per-neuron quadtree array and network for a single
/// enumeration run.
pub struct Pipeline {
    raster: SpikeRaster,
    trees: QuadtreeArray,
    network: PhysNetwork,
    params: KernelParams,
}

impl Pipeline {
    /// Phase 1: build one quadtree per neuron from its own spike-pair set.
    pub fn build(raster: SpikeRaster, network: PhysNetwork, params: KernelParams) -> Result<Self> {
        let trees = QuadtreeArray::build(&raster)?;
        info!(
            n_cells = network.n_cells(),
            n_neurons_with_spikes = raster.neuron_count(),
            n_spikes = raster.spike_count(),
            n_synapses = network.synapse_count(),
            "pipeline built"
        );
        Ok(Self {
            raster,
            trees,
            network,
            params,
        })
    }

    /// Number of neurons with recorded spikes.
    pub fn neuron_count(&self) -> usize {
        self.raster.neuron_count()
    }

    /// Evaluate every presynaptic candidate pair for one postsynaptic pair
    /// against every synapse feeding `post`, invoking `on_edge` for each
    /// accepted match.
    fn enumerate_post_pair(
        &self,
        post: NeuronId,
        post_pair: crate::pair::SpikePair,
        on_edge: &mut dyn FnMut(CausalEdge) -> Result<()>,
    ) -> Result<()> {
        let (b1, b2) = post_pair.point();
        let region = crate::bbox::BoundingBox::new(b1 as f64, b2 as f64, self.params.c_radius);

        for syn in self.network.presyns(post) {
            let Some(qt_u) = self.trees.get(syn.pre) else {
                continue;
            };
            let mut accept_err: Option<crate::error::GnatError> = None;
            qt_u.query_map(&region, &mut |pre_pair| {
                if accept_err.is_some() {
                    return;
                }
                let (a1, a2) = pre_pair.point();
                let g1 = syn.gamma((b1 - a1) as f64, self.params.tau);
                let g2 = syn.gamma((b2 - a2) as f64, self.params.tau);
                if g1 <= self.params.thresh && g2 <= self.params.thresh {
                    let edge = CausalEdge {
                        pre_neuron: syn.pre,
                        pre_pair: *pre_pair,
                        post_neuron: post,
                        post_pair,
                    };
                    if let Err(e) = on_edge(edge) {
                        accept_err = Some(e);
                    }
                }
            });
            if let Some(e) = accept_err {
                return Err(e);
            }
        }
        Ok(())
    }

    /// Phase 2, sequential: for each postsynaptic neuron, for each of its
    /// spike-pairs, query every presynaptic partner's quadtree and stream
    /// accepted edges to `emitter`. This is the CLI's default path.
    pub fn enumerate(&self, emitter: &mut EdgeEmitter) -> Result<usize> {
        let mut n_emitted = 0usize;
        for post in 0..self.network.n_cells() {
            let post_id = NeuronId::new(post);
            for post_pair in self.raster.pairs_for(post_id) {
                self.enumerate_post_pair(post_id, post_pair, &mut |edge| {
                    emitter.add(edge)?;
                    n_emitted += 1;
                    Ok(())
                })?;
            }
        }
        emitter.flush()?;
        Ok(n_emitted)
    }

    /// Phase 2, parallel over postsynaptic neurons, guarding the shared
    /// emitter behind a `parking_lot::Mutex`. A library-only capability:
    /// the CLI always calls [`Pipeline::enumerate`], but this is covered by
    /// a differential test asserting both paths emit the same edge
    /// multiset.
    pub fn enumerate_parallel(&self, emitter: &Mutex<EdgeEmitter>) -> Result<usize> {
        let n_cells = self.network.n_cells();
        let results: Vec<Result<usize>> = (0..n_cells)
            .into_par_iter()
            .map(|post| {
                let post_id = NeuronId::new(post);
                let mut local_count = 0usize;
                for post_pair in self.raster.pairs_for(post_id) {
                    self.enumerate_post_pair(post_id, post_pair, &mut |edge| {
                        emitter.lock().add(edge)?;
                        local_count += 1;
                        Ok(())
                    })?;
                }
                Ok(local_count)
            })
            .collect();

        let mut total = 0;
        for r in results {
            total += r?;
        }
        emitter.lock().flush()?;
        Ok(total)
    }
}
