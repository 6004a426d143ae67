//! Postgres-backed sink for generated row batches.

mod postgres;

pub use postgres::PgSink;
