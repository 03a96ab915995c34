//! Global, merge-order-independent result of a run.

use std::collections::hash_map::Entry;
use std::fmt;
use std::io::{self, Write};

use ahash::AHashMap;

use crate::format;
use crate::stats::Stats;
use crate::table::StationTable;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    stations: AHashMap<Box<[u8]>, Stats>,
}

impl Summary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn get(&self, key: &[u8]) -> Option<&Stats> {
        self.stations.get(key)
    }

    /// Folds one accumulator in, taking ownership of its key.
    pub fn insert(&mut self, key: Box<[u8]>, stats: Stats) {
        match self.stations.entry(key) {
            Entry::Occupied(mut entry) => entry.get_mut().merge(&stats),
            Entry::Vacant(entry) => {
                entry.insert(stats);
            }
        }
    }

    /// Drains a finished worker table into the summary.
    pub fn merge_table(&mut self, table: StationTable) {
        for (key, stats) in table {
            self.insert(key, stats);
        }
    }

    pub fn merge(&mut self, other: Summary) {
        for (key, stats) in other.stations {
            self.insert(key, stats);
        }
    }

    /// Entries sorted by key bytes.
    pub fn stations(&self) -> Vec<(&[u8], &Stats)> {
        let mut stations: Vec<_> = self
            .stations
            .iter()
            .map(|(key, stats)| (&**key, stats))
            .collect();
        stations.sort_unstable_by(|a, b| a.0.cmp(b.0));
        stations
    }

    /// Writes `{key=min/mean/max, ...}` followed by a newline.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        format::write_summary(out, self.stations())
    }
}

/// Keys that are not valid UTF-8 are rendered lossily here; use
/// [`Summary::write_to`] for byte-exact output.
impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = Vec::new();
        self.write_to(&mut out).map_err(|_| fmt::Error)?;
        f.write_str(&String::from_utf8_lossy(&out))
    }
}
