//! Synthetic dataset generation for the TPC-H-shaped schema.
//!
//! Row synthesizers produce fully-populated batches for the eight tables,
//! with foreign keys drawn from in-memory key pools and composite-key
//! uniqueness guaranteed by construction. The pipeline runs the
//! synthesizers in dependency order and hands each batch to a
//! [`tpchseed_core::RowSink`].

pub mod errors;
pub mod model;
pub mod pipeline;
pub mod pools;
pub mod rows;
pub mod synth;
mod text;

pub use errors::GenerationError;
pub use model::{GenerateOptions, RowCounts, RunFailure, RunReport, TableOutcome};
pub use pipeline::Pipeline;
