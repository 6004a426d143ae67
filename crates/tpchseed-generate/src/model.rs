use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use tpchseed_core::Table;

/// Per-table row counts for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowCounts {
    pub regions: u64,
    pub nations: u64,
    pub parts: u64,
    pub suppliers: u64,
    pub partsupps: u64,
    pub customers: u64,
    pub orders: u64,
    pub lineitems: u64,
}

impl RowCounts {
    /// Row count used for every table when the caller specifies none.
    pub const DEFAULT_ROWS: u64 = 20;

    /// Same count for every table.
    pub fn uniform(rows: u64) -> Self {
        Self {
            regions: rows,
            nations: rows,
            parts: rows,
            suppliers: rows,
            partsupps: rows,
            customers: rows,
            orders: rows,
            lineitems: rows,
        }
    }

    pub fn for_table(&self, table: Table) -> u64 {
        match table {
            Table::Region => self.regions,
            Table::Nation => self.nations,
            Table::Part => self.parts,
            Table::Supplier => self.suppliers,
            Table::Partsupp => self.partsupps,
            Table::Customer => self.customers,
            Table::Orders => self.orders,
            Table::Lineitem => self.lineitems,
        }
    }
}

impl Default for RowCounts {
    fn default() -> Self {
        Self::uniform(Self::DEFAULT_ROWS)
    }
}

/// Options for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Seed for reproducible runs; a random seed is drawn when absent.
    pub seed: Option<u64>,
    /// Anchor for the historical date windows.
    pub anchor_date: NaiveDate,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            seed: None,
            anchor_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
        }
    }
}

/// Outcome of one table's synthesis and write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableOutcome {
    pub table: Table,
    pub rows_requested: u64,
    pub rows_generated: u64,
    /// Composite-key resample attempts spent on collisions.
    pub retries: u64,
    /// Rows the sink reported stored; `None` when the write failed.
    pub rows_persisted: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write_error: Option<String>,
}

/// Fatal synthesis failure that aborted the rest of the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunFailure {
    pub table: Table,
    pub message: String,
}

/// Report for a full generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: String,
    /// Seed the run actually used, whether caller-provided or drawn.
    pub seed: u64,
    pub tables: Vec<TableOutcome>,
    /// Tables never attempted because an earlier synthesizer failed.
    pub skipped: Vec<Table>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<RunFailure>,
    pub duration_ms: u64,
}

impl RunReport {
    pub(crate) fn new(run_id: String, seed: u64) -> Self {
        Self {
            run_id,
            seed,
            tables: Vec::new(),
            skipped: Vec::new(),
            failure: None,
            duration_ms: 0,
        }
    }

    /// True when every table was generated and persisted.
    pub fn succeeded(&self) -> bool {
        self.failure.is_none() && self.tables.iter().all(|table| table.write_error.is_none())
    }

    /// Tables whose batch was generated but failed to persist.
    pub fn failed_writes(&self) -> Vec<Table> {
        self.tables
            .iter()
            .filter(|outcome| outcome.write_error.is_some())
            .map(|outcome| outcome.table)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_counts_are_twenty_everywhere() {
        let counts = RowCounts::default();
        for table in tpchseed_core::INSERT_ORDER {
            assert_eq!(counts.for_table(table), 20);
        }
    }

    #[test]
    fn report_serializes_table_names_lowercase() {
        let mut report = RunReport::new("run".to_string(), 1);
        report.skipped.push(Table::Lineitem);
        let json = serde_json::to_string(&report).expect("serializable");
        assert!(json.contains("\"lineitem\""));
    }
}
