//! Orchestration: wires argument parsing, input loading and the kernel
//! pipeline together for a single CLI invocation.

use crate::cli::GnatArgs;
use crate::error::CliResult;
use crate::input::{parse_network_file, parse_spike_file};
use gnat_core::{EdgeEmitter, KernelParams, Pipeline};
use tracing::info;

/// Output file written by every invocation, per the fixed CLI surface.
pub const OUTPUT_PATH: &str = "./gnat2_out.txt";

/// Run the full pipeline for one CLI invocation, returning the number of
/// edges emitted.
pub fn run(args: &GnatArgs) -> CliResult<usize> {
    info!(
        n_cells = args.n_cells,
        spike_file = %args.spike_file.display(),
        network_file = %args.network_file.display(),
        "starting enumeration"
    );

    let raster = parse_spike_file(&args.spike_file, args.n_cells)?;
    let network = parse_network_file(&args.network_file, args.n_cells)?;

    let params = KernelParams {
        tau: args.tau,
        thresh: args.thresh,
        c_radius: args.c_radius,
    };
    let pipeline = Pipeline::build(raster, network, params)?;

    let mut emitter = EdgeEmitter::create(OUTPUT_PATH)?;
    let n_edges = pipeline.enumerate(&mut emitter)?;

    info!(n_edges, output = OUTPUT_PATH, "enumeration complete");
    Ok(n_edges)
}
