use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use tpchseed_core::{INSERT_ORDER, RowSink, Table, Value};

use crate::errors::GenerationError;
use crate::model::{GenerateOptions, RowCounts, RunFailure, RunReport, TableOutcome};
use crate::pools::KeyPool;
use crate::synth;

/// Dependency-ordered generation run against a sink.
///
/// Synthesizers run strictly sequentially; each table's key pool is
/// populated before any dependent table samples from it. A synthesis
/// failure aborts every remaining table; a write failure is isolated to
/// its table and downstream tables proceed from the in-memory pools.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    options: GenerateOptions,
}

impl Pipeline {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    pub async fn run<S: RowSink + ?Sized>(&self, sink: &S, counts: &RowCounts) -> RunReport {
        let start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        let seed = self.options.seed.unwrap_or_else(|| rand::rng().random());
        let anchor = self.options.anchor_date;
        let mut report = RunReport::new(run_id, seed);

        info!(
            run_id = %report.run_id,
            seed,
            anchor = %anchor,
            "generation started"
        );

        let rows = synth::region(counts.regions, &mut table_rng(seed, Table::Region));
        let regions = KeyPool::dense(rows.len() as u64);
        let values: Vec<_> = rows.into_iter().map(|row| row.into_values()).collect();
        persist(sink, Table::Region, counts.regions, 0, values, &mut report).await;

        let rows = match synth::nation(counts.nations, &regions, &mut table_rng(seed, Table::Nation))
        {
            Ok(rows) => rows,
            Err(err) => return abort(report, Table::Nation, err, start),
        };
        let nations = KeyPool::dense(rows.len() as u64);
        let values: Vec<_> = rows.into_iter().map(|row| row.into_values()).collect();
        persist(sink, Table::Nation, counts.nations, 0, values, &mut report).await;

        let rows = synth::part(counts.parts, &mut table_rng(seed, Table::Part));
        let parts = KeyPool::dense(rows.len() as u64);
        let values: Vec<_> = rows.into_iter().map(|row| row.into_values()).collect();
        persist(sink, Table::Part, counts.parts, 0, values, &mut report).await;

        let rows = match synth::supplier(
            counts.suppliers,
            &nations,
            &mut table_rng(seed, Table::Supplier),
        ) {
            Ok(rows) => rows,
            Err(err) => return abort(report, Table::Supplier, err, start),
        };
        let suppliers = KeyPool::dense(rows.len() as u64);
        let values: Vec<_> = rows.into_iter().map(|row| row.into_values()).collect();
        persist(sink, Table::Supplier, counts.suppliers, 0, values, &mut report).await;

        let batch = match synth::partsupp(
            counts.partsupps,
            &parts,
            &suppliers,
            &mut table_rng(seed, Table::Partsupp),
        ) {
            Ok(batch) => batch,
            Err(err) => return abort(report, Table::Partsupp, err, start),
        };
        let partsupps = batch.pairs;
        let values: Vec<_> = batch.rows.into_iter().map(|row| row.into_values()).collect();
        persist(
            sink,
            Table::Partsupp,
            counts.partsupps,
            batch.retries,
            values,
            &mut report,
        )
        .await;

        let rows = match synth::customer(
            counts.customers,
            &nations,
            &mut table_rng(seed, Table::Customer),
        ) {
            Ok(rows) => rows,
            Err(err) => return abort(report, Table::Customer, err, start),
        };
        let customers = KeyPool::dense(rows.len() as u64);
        let values: Vec<_> = rows.into_iter().map(|row| row.into_values()).collect();
        persist(sink, Table::Customer, counts.customers, 0, values, &mut report).await;

        let rows = match synth::orders(
            counts.orders,
            &customers,
            anchor,
            &mut table_rng(seed, Table::Orders),
        ) {
            Ok(rows) => rows,
            Err(err) => return abort(report, Table::Orders, err, start),
        };
        let order_keys = KeyPool::dense(rows.len() as u64);
        let values: Vec<_> = rows.into_iter().map(|row| row.into_values()).collect();
        persist(sink, Table::Orders, counts.orders, 0, values, &mut report).await;

        let rows = match synth::lineitem(
            counts.lineitems,
            &order_keys,
            &partsupps,
            anchor,
            &mut table_rng(seed, Table::Lineitem),
        ) {
            Ok(rows) => rows,
            Err(err) => return abort(report, Table::Lineitem, err, start),
        };
        let values: Vec<_> = rows.into_iter().map(|row| row.into_values()).collect();
        persist(sink, Table::Lineitem, counts.lineitems, 0, values, &mut report).await;

        report.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            run_id = %report.run_id,
            tables = report.tables.len(),
            duration_ms = report.duration_ms,
            "generation finished"
        );
        report
    }
}

async fn persist<S: RowSink + ?Sized>(
    sink: &S,
    table: Table,
    requested: u64,
    retries: u64,
    rows: Vec<Vec<Value>>,
    report: &mut RunReport,
) {
    let generated = rows.len() as u64;
    let mut outcome = TableOutcome {
        table,
        rows_requested: requested,
        rows_generated: generated,
        retries,
        rows_persisted: None,
        write_error: None,
    };

    match sink.insert(table.name(), table.columns(), &rows).await {
        Ok(persisted) => {
            info!(
                table = table.name(),
                rows = generated,
                persisted,
                retries,
                "table written"
            );
            outcome.rows_persisted = Some(persisted);
        }
        Err(err) => {
            warn!(table = table.name(), error = %err, "table write failed");
            outcome.write_error = Some(err.to_string());
        }
    }

    report.tables.push(outcome);
}

fn abort(
    mut report: RunReport,
    table: Table,
    err: GenerationError,
    start: Instant,
) -> RunReport {
    warn!(table = table.name(), error = %err, "synthesis failed");
    let position = INSERT_ORDER
        .iter()
        .position(|candidate| *candidate == table)
        .unwrap_or(INSERT_ORDER.len() - 1);
    report.skipped = INSERT_ORDER[position + 1..].to_vec();
    report.failure = Some(RunFailure {
        table,
        message: err.to_string(),
    });
    report.duration_ms = start.elapsed().as_millis() as u64;
    report
}

/// Independent stream per table so one table's draw count does not shift
/// every table after it.
fn table_rng(seed: u64, table: Table) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(hash_seed(seed, table.name()))
}

fn hash_seed(seed: u64, key: &str) -> u64 {
    let mut hash = seed ^ 0xcbf29ce484222325;
    for byte in key.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}
