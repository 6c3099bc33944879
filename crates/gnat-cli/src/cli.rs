//! Command-line surface: fixed positional arguments only, matching the
//! distilled specification precisely — no subcommands, no optional flags
//! beyond `--help`/`--version`.

use clap::Parser;
use std::path::PathBuf;

/// Compute the second-order causal activity graph of a spiking neural
/// network using a quadtree-based spatial-search kernel.
#[derive(Debug, Parser)]
#[command(name = "gnat", version, about)]
pub struct GnatArgs {
    /// Fixed size of the neuron population
    pub n_cells: u32,

    /// Path to the spike raster file
    pub spike_file: PathBuf,

    /// Path to the physical network (synapse) file
    pub network_file: PathBuf,

    /// Membrane time constant used by the causal kernel
    pub tau: f64,

    /// Maximum admissible causal distance for an edge predicate leg to accept
    pub thresh: f64,

    /// Half-width of the quadtree query region searched around each
    /// postsynaptic spike-pair's coordinates
    pub c_radius: f64,
}
