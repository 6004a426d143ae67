//! Row synthesizers, one per table.
//!
//! Every synthesizer takes a target row count plus the key pools of the
//! tables it references and returns fully-populated rows. Primary keys for
//! single-key tables are assigned densely from 0; foreign keys are uniform
//! draws from the upstream pool; composite keys are unique by construction.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use rand::Rng;
use rand::seq::IndexedRandom;

use tpchseed_core::Table;

use crate::errors::GenerationError;
use crate::pools::{KeyPool, PairPool};
use crate::rows::{Customer, Lineitem, Nation, Order, Part, Partsupp, Region, Supplier};
use crate::text;

const CONTAINERS: &[&str] = &["SM CASE", "LG BOX", "MED BAG", "JUMBO PKG"];
const MARKET_SEGMENTS: &[&str] = &[
    "AUTOMOBILE",
    "BUILDING",
    "FURNITURE",
    "MACHINERY",
    "HOUSEHOLD",
];
const ORDER_STATUSES: &[&str] = &["O", "F", "P"];
const ORDER_PRIORITIES: &[&str] = &[
    "1-URGENT",
    "2-HIGH",
    "3-MEDIUM",
    "4-NOT SPECIFIED",
    "5-LOW",
];
const RETURN_FLAGS: &[&str] = &["R", "A", "N"];
const LINE_STATUSES: &[&str] = &["O", "F"];
const SHIP_INSTRUCTIONS: &[&str] = &["DELIVER IN PERSON", "COLLECT COD", "NONE", "TAKE BACK RETURN"];
const SHIP_MODES: &[&str] = &["AIR", "RAIL", "TRUCK", "SHIP"];

/// Historical window for order dates, in days before the anchor.
const ORDER_WINDOW_DAYS: i64 = 1825;
/// Historical window for ship dates, in days before the anchor.
const SHIP_WINDOW_DAYS: i64 = 730;
/// Maximum day delta between ship/commit and commit/receipt dates.
const DATE_STEP_DAYS: i64 = 30;

/// Resample attempts per requested row before composite sampling falls
/// back to a deterministic sweep of the key space.
const RESAMPLE_BUDGET: u64 = 64;

/// Generate `count` region rows with keys `0..count`.
pub fn region<R: Rng + ?Sized>(count: u64, rng: &mut R) -> Vec<Region> {
    (0..count)
        .map(|key| Region {
            regionkey: key as i64,
            name: text::clip(text::word_upper(rng), 25),
            comment: text::clip(text::sentence(rng, 10..20), 152),
        })
        .collect()
}

/// Generate nation rows referencing the region pool.
pub fn nation<R: Rng + ?Sized>(
    count: u64,
    regions: &KeyPool,
    rng: &mut R,
) -> Result<Vec<Nation>, GenerationError> {
    let mut rows = Vec::with_capacity(count as usize);
    for key in 0..count {
        rows.push(Nation {
            nationkey: key as i64,
            name: text::clip(text::country(rng), 25),
            regionkey: sample_fk(regions, rng, Table::Nation, Table::Region)?,
            comment: text::clip(text::sentence(rng, 10..20), 152),
        });
    }
    Ok(rows)
}

/// Generate `count` part rows with keys `0..count`.
pub fn part<R: Rng + ?Sized>(count: u64, rng: &mut R) -> Vec<Part> {
    (0..count)
        .map(|key| Part {
            partkey: key as i64,
            name: text::clip(text::sentence(rng, 4..6), 55),
            mfgr: text::clip(text::company(rng), 25),
            brand: text::clip(text::word_upper(rng), 10),
            type_name: text::clip(
                format!("{}{}", text::word_upper(rng), text::word_upper(rng)),
                25,
            ),
            size: rng.random_range(1..=50),
            container: pick(rng, CONTAINERS),
            retailprice: money(rng, 10.0, 1000.0),
            comment: text::clip(text::sentence(rng, 5..10), 23),
        })
        .collect()
}

/// Generate supplier rows referencing the nation pool.
pub fn supplier<R: Rng + ?Sized>(
    count: u64,
    nations: &KeyPool,
    rng: &mut R,
) -> Result<Vec<Supplier>, GenerationError> {
    let mut rows = Vec::with_capacity(count as usize);
    for key in 0..count {
        rows.push(Supplier {
            suppkey: key as i64,
            name: text::clip(text::company(rng), 25),
            address: text::clip(text::street_address(rng), 40),
            nationkey: sample_fk(nations, rng, Table::Supplier, Table::Nation)?,
            phone: text::clip(text::phone(rng), 15),
            acctbal: money(rng, -999.99, 9999.99),
            comment: text::clip(text::sentence(rng, 10..20), 101),
        });
    }
    Ok(rows)
}

/// Output of the partsupp synthesizer: rows plus the composite-key pool
/// downstream tables sample from.
#[derive(Debug, Default)]
pub struct PartsuppBatch {
    pub rows: Vec<Partsupp>,
    pub pairs: PairPool,
    pub retries: u64,
}

/// Generate partsupp rows with a unique (partkey, suppkey) pair per row.
///
/// Capacity is checked analytically before any sampling: requesting more
/// rows than `|part| * |supplier|` fails with `KeySpaceExhausted`. Candidate
/// pairs are rejected and resampled on collision under a bounded attempt
/// budget; once the budget is spent the remainder comes from a
/// deterministic sweep of the cross product, so the loop terminates even
/// when nearly every pair is taken.
pub fn partsupp<R: Rng + ?Sized>(
    count: u64,
    parts: &KeyPool,
    suppliers: &KeyPool,
    rng: &mut R,
) -> Result<PartsuppBatch, GenerationError> {
    if count == 0 {
        return Ok(PartsuppBatch::default());
    }
    if parts.is_empty() {
        return Err(GenerationError::MissingDependency {
            table: Table::Partsupp,
            dependency: Table::Part,
        });
    }
    if suppliers.is_empty() {
        return Err(GenerationError::MissingDependency {
            table: Table::Partsupp,
            dependency: Table::Supplier,
        });
    }

    let available = parts.len().saturating_mul(suppliers.len());
    if count > available {
        return Err(GenerationError::KeySpaceExhausted {
            table: Table::Partsupp,
            requested: count,
            available,
        });
    }

    let mut batch = PartsuppBatch::default();
    let budget = count.saturating_mul(RESAMPLE_BUDGET);
    while batch.pairs.len() < count && batch.retries < budget {
        let pair = match (parts.sample(rng), suppliers.sample(rng)) {
            (Some(partkey), Some(suppkey)) => (partkey, suppkey),
            _ => break,
        };
        if !batch.pairs.record(pair) {
            batch.retries += 1;
            continue;
        }
        batch.rows.push(partsupp_row(pair, rng));
    }

    // Dense pools can exhaust the attempt budget; sweep the remaining
    // cross product in key order.
    if batch.pairs.len() < count {
        'sweep: for partkey in parts.iter() {
            for suppkey in suppliers.iter() {
                if batch.pairs.len() == count {
                    break 'sweep;
                }
                if batch.pairs.record((partkey, suppkey)) {
                    batch.rows.push(partsupp_row((partkey, suppkey), rng));
                }
            }
        }
    }

    Ok(batch)
}

fn partsupp_row<R: Rng + ?Sized>((partkey, suppkey): (i64, i64), rng: &mut R) -> Partsupp {
    Partsupp {
        partkey,
        suppkey,
        availqty: rng.random_range(1..=1000),
        supplycost: money(rng, 1.0, 1000.0),
        comment: text::clip(text::sentence(rng, 10..20), 199),
    }
}

/// Generate customer rows referencing the nation pool.
pub fn customer<R: Rng + ?Sized>(
    count: u64,
    nations: &KeyPool,
    rng: &mut R,
) -> Result<Vec<Customer>, GenerationError> {
    let mut rows = Vec::with_capacity(count as usize);
    for key in 0..count {
        rows.push(Customer {
            custkey: key as i64,
            name: text::clip(text::person_name(rng), 25),
            address: text::clip(text::street_address(rng), 40),
            nationkey: sample_fk(nations, rng, Table::Customer, Table::Nation)?,
            phone: text::clip(text::phone(rng), 15),
            acctbal: money(rng, -999.99, 9999.99),
            mktsegment: pick(rng, MARKET_SEGMENTS),
            comment: text::clip(text::sentence(rng, 10..20), 117),
        });
    }
    Ok(rows)
}

/// Generate order rows referencing the customer pool. Order dates fall in
/// a bounded window before `anchor`.
pub fn orders<R: Rng + ?Sized>(
    count: u64,
    customers: &KeyPool,
    anchor: NaiveDate,
    rng: &mut R,
) -> Result<Vec<Order>, GenerationError> {
    let mut rows = Vec::with_capacity(count as usize);
    for key in 0..count {
        rows.push(Order {
            orderkey: key as i64,
            custkey: sample_fk(customers, rng, Table::Orders, Table::Customer)?,
            orderstatus: pick(rng, ORDER_STATUSES),
            totalprice: money(rng, 100.0, 100_000.0),
            orderdate: anchor - Duration::days(rng.random_range(0..=ORDER_WINDOW_DAYS)),
            orderpriority: text::clip(pick(rng, ORDER_PRIORITIES), 15),
            clerk: text::clip(text::person_name(rng), 15),
            shippriority: 0,
            comment: text::clip(text::sentence(rng, 10..20), 79),
        });
    }
    Ok(rows)
}

/// Generate lineitem rows referencing the orders pool and the partsupp
/// pair pool.
///
/// Line numbers restart at 1 for each order, so (orderkey, linenumber) is
/// unique by construction. Ship, commit, and receipt dates each advance by
/// a strictly positive day delta.
pub fn lineitem<R: Rng + ?Sized>(
    count: u64,
    orders: &KeyPool,
    partsupps: &PairPool,
    anchor: NaiveDate,
    rng: &mut R,
) -> Result<Vec<Lineitem>, GenerationError> {
    if count > 0 && partsupps.is_empty() {
        return Err(GenerationError::MissingDependency {
            table: Table::Lineitem,
            dependency: Table::Partsupp,
        });
    }

    let mut next_line: HashMap<i64, i64> = HashMap::new();
    let mut rows = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let orderkey = sample_fk(orders, rng, Table::Lineitem, Table::Orders)?;
        let linenumber = next_line.entry(orderkey).or_insert(0);
        *linenumber += 1;

        let (partkey, suppkey) = match partsupps.sample(rng) {
            Some(pair) => pair,
            None => break,
        };

        let shipdate = anchor - Duration::days(rng.random_range(0..=SHIP_WINDOW_DAYS));
        let commitdate = shipdate + Duration::days(rng.random_range(1..=DATE_STEP_DAYS));
        let receiptdate = commitdate + Duration::days(rng.random_range(1..=DATE_STEP_DAYS));

        rows.push(Lineitem {
            orderkey,
            partkey,
            suppkey,
            linenumber: *linenumber,
            quantity: money(rng, 1.0, 50.0),
            extendedprice: money(rng, 100.0, 5000.0),
            discount: money(rng, 0.0, 0.10),
            tax: money(rng, 0.01, 0.08),
            returnflag: pick(rng, RETURN_FLAGS),
            linestatus: pick(rng, LINE_STATUSES),
            shipdate,
            commitdate,
            receiptdate,
            shipinstruct: text::clip(pick(rng, SHIP_INSTRUCTIONS), 25),
            shipmode: text::clip(pick(rng, SHIP_MODES), 10),
            comment: text::clip(text::sentence(rng, 5..10), 44),
        });
    }
    Ok(rows)
}

fn sample_fk<R: Rng + ?Sized>(
    pool: &KeyPool,
    rng: &mut R,
    table: Table,
    dependency: Table,
) -> Result<i64, GenerationError> {
    pool.sample(rng)
        .ok_or(GenerationError::MissingDependency { table, dependency })
}

/// Closed-range uniform draw rounded to two decimal digits.
fn money<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    (rng.random_range(min..=max) * 100.0).round() / 100.0
}

fn pick<R: Rng + ?Sized>(rng: &mut R, values: &[&str]) -> String {
    values.choose(rng).copied().unwrap_or_default().to_string()
}
