use std::collections::HashSet;

use rand::Rng;
use rand::seq::IndexedRandom;

/// Key pool for a table with a single-column primary key.
///
/// Tracks every assigned key so downstream synthesizers can draw valid
/// foreign keys. Pools are populated by one synthesizer and read-only to
/// everything after it.
#[derive(Debug, Clone, Default)]
pub struct KeyPool {
    keys: Vec<i64>,
}

impl KeyPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pool holding the dense key range `0..count`.
    pub fn dense(count: u64) -> Self {
        Self {
            keys: (0..count as i64).collect(),
        }
    }

    pub fn record(&mut self, key: i64) {
        self.keys.push(key);
    }

    pub fn contains(&self, key: i64) -> bool {
        self.keys.contains(&key)
    }

    /// Uniformly chosen existing key, or `None` if the pool is empty.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<i64> {
        self.keys.choose(rng).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.keys.iter().copied()
    }

    pub fn len(&self) -> u64 {
        self.keys.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Key pool for a table with a two-column composite primary key.
///
/// Keeps a side set for constant-time membership so composite-key
/// synthesizers can reject duplicate candidates cheaply even at high fill
/// ratios.
#[derive(Debug, Clone, Default)]
pub struct PairPool {
    pairs: Vec<(i64, i64)>,
    seen: HashSet<(i64, i64)>,
}

impl PairPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pair; returns `false` without inserting if it was already
    /// present.
    pub fn record(&mut self, pair: (i64, i64)) -> bool {
        if !self.seen.insert(pair) {
            return false;
        }
        self.pairs.push(pair);
        true
    }

    pub fn contains(&self, pair: (i64, i64)) -> bool {
        self.seen.contains(&pair)
    }

    /// Uniformly chosen existing pair, or `None` if the pool is empty.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<(i64, i64)> {
        self.pairs.choose(rng).copied()
    }

    pub fn len(&self) -> u64 {
        self.pairs.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
