use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use tpchseed_core::{RowSink, SinkError, Table, Value};
use tpchseed_generate::{GenerateOptions, Pipeline, RowCounts};

struct Batch {
    table: String,
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

/// Sink capturing every batch in arrival order.
#[derive(Default)]
struct MemorySink {
    batches: Mutex<Vec<Batch>>,
}

impl MemorySink {
    fn tables(&self) -> Vec<String> {
        self.batches
            .lock()
            .expect("sink lock")
            .iter()
            .map(|batch| batch.table.clone())
            .collect()
    }

    fn rows(&self, table: &str) -> Vec<Vec<Value>> {
        self.batches
            .lock()
            .expect("sink lock")
            .iter()
            .find(|batch| batch.table == table)
            .map(|batch| batch.rows.clone())
            .unwrap_or_default()
    }

    fn columns(&self, table: &str) -> Vec<String> {
        self.batches
            .lock()
            .expect("sink lock")
            .iter()
            .find(|batch| batch.table == table)
            .map(|batch| batch.columns.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl RowSink for MemorySink {
    async fn insert(
        &self,
        table: &str,
        columns: &[&str],
        rows: &[Vec<Value>],
    ) -> Result<u64, SinkError> {
        let mut batches = self.batches.lock().expect("sink lock");
        batches.push(Batch {
            table: table.to_string(),
            columns: columns.iter().map(|column| column.to_string()).collect(),
            rows: rows.to_vec(),
        });
        Ok(rows.len() as u64)
    }
}

/// Sink that fails the write for one table and stores the rest.
struct FailingSink {
    fail_table: &'static str,
    inner: MemorySink,
}

#[async_trait]
impl RowSink for FailingSink {
    async fn insert(
        &self,
        table: &str,
        columns: &[&str],
        rows: &[Vec<Value>],
    ) -> Result<u64, SinkError> {
        if table == self.fail_table {
            return Err(SinkError::Write {
                table: table.to_string(),
                message: "connection reset".to_string(),
            });
        }
        self.inner.insert(table, columns, rows).await
    }
}

fn pipeline(seed: u64) -> Pipeline {
    Pipeline::new(GenerateOptions {
        seed: Some(seed),
        ..GenerateOptions::default()
    })
}

fn int_column(rows: &[Vec<Value>], index: usize) -> Vec<i64> {
    rows.iter()
        .map(|row| row[index].as_i64().expect("integer column"))
        .collect()
}

#[tokio::test]
async fn default_run_writes_every_table_in_dependency_order() {
    let sink = MemorySink::default();
    let report = pipeline(42).run(&sink, &RowCounts::default()).await;

    assert!(report.succeeded(), "failure: {:?}", report.failure);
    assert!(report.skipped.is_empty());
    let expected: Vec<String> = tpchseed_core::INSERT_ORDER
        .iter()
        .map(|table| table.name().to_string())
        .collect();
    assert_eq!(sink.tables(), expected);
    for outcome in &report.tables {
        assert_eq!(outcome.rows_generated, 20);
        assert_eq!(outcome.rows_persisted, Some(20));
    }
    assert_eq!(sink.columns("lineitem"), Table::Lineitem.columns());
}

#[tokio::test]
async fn small_scenario_keeps_every_reference_valid() {
    let sink = MemorySink::default();
    let counts = RowCounts {
        regions: 5,
        nations: 5,
        parts: 10,
        suppliers: 10,
        partsupps: 15,
        ..RowCounts::default()
    };
    let report = pipeline(7).run(&sink, &counts).await;
    assert!(report.succeeded(), "failure: {:?}", report.failure);

    for regionkey in int_column(&sink.rows("nation"), 2) {
        assert!((0..5).contains(&regionkey));
    }
    for nationkey in int_column(&sink.rows("supplier"), 3) {
        assert!((0..5).contains(&nationkey));
    }
    for nationkey in int_column(&sink.rows("customer"), 3) {
        assert!((0..5).contains(&nationkey));
    }

    let partsupp_rows = sink.rows("partsupp");
    assert_eq!(partsupp_rows.len(), 15);
    let mut pairs = HashSet::new();
    for row in &partsupp_rows {
        let pair = (
            row[0].as_i64().expect("partkey"),
            row[1].as_i64().expect("suppkey"),
        );
        assert!((0..10).contains(&pair.0));
        assert!((0..10).contains(&pair.1));
        assert!(pairs.insert(pair), "duplicate pair {pair:?}");
    }

    for row in &sink.rows("lineitem") {
        let pair = (
            row[1].as_i64().expect("partkey"),
            row[2].as_i64().expect("suppkey"),
        );
        assert!(pairs.contains(&pair), "lineitem pair {pair:?} not in partsupp");
        let ship = row[10].as_date().expect("shipdate");
        let commit = row[11].as_date().expect("commitdate");
        let receipt = row[12].as_date().expect("receiptdate");
        assert!(ship < commit && commit < receipt);
    }
}

#[tokio::test]
async fn exhausted_key_space_skips_all_downstream_tables() {
    let sink = MemorySink::default();
    let counts = RowCounts {
        parts: 10,
        suppliers: 10,
        partsupps: 101,
        ..RowCounts::default()
    };
    let report = pipeline(3).run(&sink, &counts).await;

    let failure = report.failure.as_ref().expect("partsupp must fail");
    assert_eq!(failure.table, Table::Partsupp);
    assert_eq!(
        report.skipped,
        vec![Table::Customer, Table::Orders, Table::Lineitem]
    );
    assert_eq!(sink.tables(), ["region", "nation", "part", "supplier"]);
}

#[tokio::test]
async fn missing_upstream_pool_aborts_at_the_dependent_table() {
    let sink = MemorySink::default();
    let counts = RowCounts {
        regions: 0,
        ..RowCounts::default()
    };
    let report = pipeline(5).run(&sink, &counts).await;

    let failure = report.failure.as_ref().expect("nation must fail");
    assert_eq!(failure.table, Table::Nation);
    assert_eq!(
        report.skipped,
        vec![
            Table::Part,
            Table::Supplier,
            Table::Partsupp,
            Table::Customer,
            Table::Orders,
            Table::Lineitem,
        ]
    );
    // The empty region batch itself is fine.
    assert_eq!(sink.tables(), ["region"]);
    assert!(sink.rows("region").is_empty());
}

#[tokio::test]
async fn failed_write_is_isolated_to_its_table() {
    let sink = FailingSink {
        fail_table: "supplier",
        inner: MemorySink::default(),
    };
    let report = pipeline(11).run(&sink, &RowCounts::default()).await;

    assert!(report.failure.is_none());
    assert_eq!(report.failed_writes(), vec![Table::Supplier]);
    let supplier = report
        .tables
        .iter()
        .find(|outcome| outcome.table == Table::Supplier)
        .expect("supplier outcome");
    assert_eq!(supplier.rows_generated, 20);
    assert_eq!(supplier.rows_persisted, None);
    assert!(supplier.write_error.as_deref().is_some_and(|err| err.contains("supplier")));

    // Partsupp still generates from the in-memory supplier pool and its
    // own write goes through.
    let partsupp_rows = sink.inner.rows("partsupp");
    assert_eq!(partsupp_rows.len(), 20);
    for suppkey in int_column(&partsupp_rows, 1) {
        assert!((0..20).contains(&suppkey));
    }
    assert_eq!(
        sink.inner.tables(),
        ["region", "nation", "part", "partsupp", "customer", "orders", "lineitem"]
    );
}

#[tokio::test]
async fn same_seed_reproduces_the_same_dataset() {
    let first = MemorySink::default();
    let second = MemorySink::default();
    let counts = RowCounts::default();
    pipeline(99).run(&first, &counts).await;
    pipeline(99).run(&second, &counts).await;

    for table in tpchseed_core::INSERT_ORDER {
        assert_eq!(
            first.rows(table.name()),
            second.rows(table.name()),
            "{table} differs between identically-seeded runs"
        );
    }
}

#[tokio::test]
async fn fresh_seeds_stay_structurally_valid() {
    for seed in [1, 2, 3] {
        let sink = MemorySink::default();
        let report = pipeline(seed).run(&sink, &RowCounts::default()).await;
        assert!(report.succeeded(), "seed {seed}: {:?}", report.failure);

        let nation_keys: HashSet<i64> = int_column(&sink.rows("nation"), 0).into_iter().collect();
        for nationkey in int_column(&sink.rows("customer"), 3) {
            assert!(nation_keys.contains(&nationkey));
        }
        let order_keys: HashSet<i64> = int_column(&sink.rows("orders"), 0).into_iter().collect();
        let mut line_keys = HashSet::new();
        for row in &sink.rows("lineitem") {
            let orderkey = row[0].as_i64().expect("orderkey");
            let linenumber = row[3].as_i64().expect("linenumber");
            assert!(order_keys.contains(&orderkey));
            assert!(line_keys.insert((orderkey, linenumber)), "duplicate line key");
        }
    }
}
