//! `gnat-cli`: command-line front-end for the GNAT causal-activity-graph
//! kernel.

pub mod cli;
pub mod error;
pub mod input;
pub mod run;

pub use cli::GnatArgs;
pub use error::{CliError, CliResult};
pub use run::{run, OUTPUT_PATH};
