use async_trait::async_trait;
use thiserror::Error;

use crate::value::Value;

/// Errors raised at the storage boundary.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The store could not be reached or the pool could not be built.
    #[error("connection failed: {0}")]
    Connection(String),
    /// The bulk insert for one table's batch failed.
    #[error("bulk insert into {table} failed: {message}")]
    Write { table: String, message: String },
}

/// Batch-insert boundary for generated rows.
///
/// Implementations perform a best-effort bulk write with insert-or-ignore
/// semantics: a conflicting primary key is a silent no-op, not an error.
/// A failure is scoped to the one batch being written.
#[async_trait]
pub trait RowSink {
    /// Insert a batch, returning the number of rows actually stored.
    async fn insert(
        &self,
        table: &str,
        columns: &[&str],
        rows: &[Vec<Value>],
    ) -> Result<u64, SinkError>;
}
