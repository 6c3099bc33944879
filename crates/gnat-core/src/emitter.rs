//! Bounded, buffered edge emitter.
//!
//! Grounded on the teacher's `vevt` binary event-stream writer: buffer
//! writes in memory up to a fixed capacity, flush to the underlying file in
//! one syscall, and make sure a success-path close still surfaces any I/O
//! error instead of swallowing it in a `Drop` impl.

use crate::error::Result;
use crate::pair::SpikePair;
use crate::spike::NeuronId;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Number of edges buffered in memory before an automatic flush.
pub const N_EDGBUF: usize = 8192;

/// An emitted GNAT-graph edge: a matching presynaptic pair and postsynaptic
/// pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CausalEdge {
    /// Presynaptic neuron
    pub pre_neuron: NeuronId,
    /// The accepted presynaptic spike-pair
    pub pre_pair: SpikePair,
    /// Postsynaptic neuron
    pub post_neuron: NeuronId,
    /// The postsynaptic spike-pair it matched against
    pub post_pair: SpikePair,
}

/// Buffers and writes GNAT-graph edges to a plain-text edge file, one
/// `pre_id a1 a2 post_id b1 b2` line per edge.
pub struct EdgeEmitter {
    writer: BufWriter<File>,
    buf: Vec<CausalEdge>,
    emitted: usize,
    finalized: bool,
}

impl EdgeEmitter {
    /// Open `path` for writing and create an emitter buffering up to
    /// [`N_EDGBUF`] edges before each flush.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            buf: Vec::with_capacity(N_EDGBUF),
            emitted: 0,
            finalized: false,
        })
    }

    /// Queue an edge, flushing automatically once the buffer fills.
    pub fn add(&mut self, edge: CausalEdge) -> Result<()> {
        self.buf.push(edge);
        if self.buf.len() >= N_EDGBUF {
            self.flush()?;
        }
        Ok(())
    }

    /// Write every buffered edge to the underlying file and clear the
    /// buffer. Safe to call with an empty buffer.
    pub fn flush(&mut self) -> Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        debug!(n = self.buf.len(), "flushing edge buffer");
        for edge in self.buf.drain(..) {
            let (a1, a2) = edge.pre_pair.point();
            let (b1, b2) = edge.post_pair.point();
            writeln!(
                self.writer,
                "{} {} {} {} {} {}",
                edge.pre_neuron, a1, a2, edge.post_neuron, b1, b2
            )?;
            self.emitted += 1;
        }
        self.writer.flush()?;
        Ok(())
    }

    /// Total edges written so far, including buffered-but-not-yet-flushed.
    pub fn emitted_count(&self) -> usize {
        self.emitted + self.buf.len()
    }

    /// Flush any remaining buffered edges and mark the emitter closed.
    ///
    /// Exists alongside the `Drop` flush so that an I/O error on the final
    /// flush is observable on the success path, rather than only logged (or
    /// lost) from within `drop`.
    pub fn finalize(mut self) -> Result<usize> {
        self.flush()?;
        self.finalized = true;
        Ok(self.emitted)
    }
}

impl Drop for EdgeEmitter {
    fn drop(&mut self) {
        if !self.finalized && !self.buf.is_empty() {
            if let Err(err) = self.flush() {
                tracing::error!(error = %err, "failed to flush edge buffer on drop");
            }
        }
    }
}
