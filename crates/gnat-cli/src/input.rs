//! Line-oriented parsers for the spike-raster and physical-network input
//! files.
//!
//! Both formats are whitespace-separated ASCII text, one record per line.
//! Spike timestamps are hexadecimal (no `0x` prefix); every other numeric
//! field is decimal.

use crate::error::{CliError, CliResult};
use gnat_core::{NeuronId, PhysNetwork, Spike, SpikeRaster};
use std::fs;
use std::path::Path;

/// Parse a spike-raster file into a [`SpikeRaster`] of `n_cells` neurons.
///
/// Each non-empty line is `<type:dec> <timestamp:hex> <neuron_id:dec>`.
/// `type` is parsed and ignored. Records are expected to already be sorted
/// in non-decreasing `timestamp` order; this parser does not re-sort.
pub fn parse_spike_file(path: &Path, n_cells: u32) -> CliResult<SpikeRaster> {
    let text = fs::read_to_string(path).map_err(CliError::Io)?;
    let file_name = path.display().to_string();

    let mut raster = SpikeRaster::init(n_cells);
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut fields = line.split_whitespace();
        let _type_field = fields
            .next()
            .ok_or_else(|| CliError::parse(&file_name, i + 1, "missing type field"))?;
        let ts_field = fields
            .next()
            .ok_or_else(|| CliError::parse(&file_name, i + 1, "missing timestamp field"))?;
        let neuron_field = fields
            .next()
            .ok_or_else(|| CliError::parse(&file_name, i + 1, "missing neuron id field"))?;
        if fields.next().is_some() {
            return Err(CliError::parse(&file_name, i + 1, "too many fields"));
        }

        let ts = i64::from_str_radix(ts_field, 16)
            .map_err(|_| CliError::parse(&file_name, i + 1, format!("invalid hex timestamp '{ts_field}'")))?;
        let neuron_id: u32 = neuron_field
            .parse()
            .map_err(|_| CliError::parse(&file_name, i + 1, format!("invalid neuron id '{neuron_field}'")))?;

        raster
            .append(Spike::new(NeuronId::new(neuron_id), ts))
            .map_err(|e| CliError::parse(&file_name, i + 1, e.to_string()))?;
    }
    raster.finalize();
    Ok(raster)
}

/// Parse a physical-network file into a [`PhysNetwork`] of `n_cells`
/// neurons.
///
/// Each non-empty line is `<src_id:dec> <tgt_id:dec> <rel_w:float>
/// <delay:float>`.
pub fn parse_network_file(path: &Path, n_cells: u32) -> CliResult<PhysNetwork> {
    let text = fs::read_to_string(path).map_err(CliError::Io)?;
    let file_name = path.display().to_string();

    let mut network = PhysNetwork::init(n_cells);
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut fields = line.split_whitespace();
        let src: u32 = fields
            .next()
            .ok_or_else(|| CliError::parse(&file_name, i + 1, "missing src_id field"))?
            .parse()
            .map_err(|_| CliError::parse(&file_name, i + 1, "invalid src_id field"))?;
        let tgt: u32 = fields
            .next()
            .ok_or_else(|| CliError::parse(&file_name, i + 1, "missing tgt_id field"))?
            .parse()
            .map_err(|_| CliError::parse(&file_name, i + 1, "invalid tgt_id field"))?;
        let rel_w: f32 = fields
            .next()
            .ok_or_else(|| CliError::parse(&file_name, i + 1, "missing rel_w field"))?
            .parse()
            .map_err(|_| CliError::parse(&file_name, i + 1, "invalid rel_w field"))?;
        let delay: f64 = fields
            .next()
            .ok_or_else(|| CliError::parse(&file_name, i + 1, "missing delay field"))?
            .parse()
            .map_err(|_| CliError::parse(&file_name, i + 1, "invalid delay field"))?;
        if fields.next().is_some() {
            return Err(CliError::parse(&file_name, i + 1, "too many fields"));
        }

        network
            .add_synapse(NeuronId::new(src), NeuronId::new(tgt), rel_w, delay)
            .map_err(|e| CliError::parse(&file_name, i + 1, e.to_string()))?;
    }
    Ok(network)
}
