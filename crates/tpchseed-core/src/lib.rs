//! Core contracts shared across tpchseed crates.
//!
//! This crate defines the fixed TPC-H table catalog, the generated cell
//! type, the batch-insert sink boundary, and connection-string redaction
//! for log output.

pub mod catalog;
pub mod redaction;
pub mod sink;
pub mod value;

pub use catalog::{INSERT_ORDER, Table};
pub use redaction::{RedactedConnection, redact_connection_string};
pub use sink::{RowSink, SinkError};
pub use value::Value;
