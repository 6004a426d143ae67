use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::debug;

use tpchseed_core::{RowSink, SinkError, Value};

/// Sink performing insert-or-ignore batch writes against Postgres.
///
/// Each batch runs in its own transaction: committed on success, rolled
/// back (via drop) on the first failed statement, so one table's failure
/// never leaves a partial batch behind.
#[derive(Debug, Clone)]
pub struct PgSink {
    pool: PgPool,
}

impl PgSink {
    /// Connect with a bounded pool.
    pub async fn connect(url: &str) -> Result<Self, SinkError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(10))
            .connect(url)
            .await
            .map_err(|err| SinkError::Connection(err.to_string()))?;
        Ok(Self { pool })
    }

    /// Wrap a pre-configured pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Close the underlying pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl RowSink for PgSink {
    async fn insert(
        &self,
        table: &str,
        columns: &[&str],
        rows: &[Vec<Value>],
    ) -> Result<u64, SinkError> {
        if rows.is_empty() {
            return Ok(0);
        }

        let statement = insert_statement(table, columns);
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|err| write_error(table, err))?;

        let mut inserted = 0_u64;
        for row in rows {
            let mut query = sqlx::query(&statement);
            for value in row {
                query = match value {
                    Value::Int(value) => query.bind(*value),
                    Value::Float(value) => query.bind(*value),
                    Value::Text(value) => query.bind(value.as_str()),
                    Value::Date(value) => query.bind(*value),
                };
            }
            inserted += query
                .execute(&mut *tx)
                .await
                .map_err(|err| write_error(table, err))?
                .rows_affected();
        }

        tx.commit().await.map_err(|err| write_error(table, err))?;
        debug!(table, rows = rows.len(), inserted, "batch committed");
        Ok(inserted)
    }
}

fn insert_statement(table: &str, columns: &[&str]) -> String {
    let placeholders = (1..=columns.len())
        .map(|index| format!("${index}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT DO NOTHING",
        table,
        columns.join(", "),
        placeholders
    )
}

fn write_error(table: &str, err: sqlx::Error) -> SinkError {
    SinkError::Write {
        table: table.to_string(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statement_numbers_placeholders_from_one() {
        let statement = insert_statement("region", &["r_regionkey", "r_name", "r_comment"]);
        assert_eq!(
            statement,
            "INSERT INTO region (r_regionkey, r_name, r_comment) VALUES ($1, $2, $3) \
             ON CONFLICT DO NOTHING"
        );
    }
}
