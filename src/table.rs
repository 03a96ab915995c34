//! Fixed-capacity open-addressing table keyed by raw key bytes.

use crate::error::{Error, Result};
use crate::scan::hash_key;
use crate::stats::Stats;

#[derive(Debug)]
struct Entry {
    key: Box<[u8]>,
    stats: Stats,
}

/// Per-worker aggregation table with linear probing and no resizing.
///
/// Slots are claimed on first sight of a key and never vacated.
#[derive(Debug)]
pub struct StationTable {
    slots: Box<[Option<Entry>]>,
    mask: usize,
    len: usize,
}

impl StationTable {
    /// `capacity` must be a power of two.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        if !capacity.is_power_of_two() {
            return Err(Error::InvalidConfig("table capacity must be a power of two"));
        }
        let slots = std::iter::repeat_with(|| None).take(capacity).collect();
        Ok(Self {
            slots,
            mask: capacity - 1,
            len: 0,
        })
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Folds `value` into the accumulator for `key`, whose FNV-1 hash is
    /// `hash`. The key bytes are copied only when the key is new.
    #[inline]
    pub fn add(&mut self, key: &[u8], hash: u64, value: i16) -> Result<()> {
        let mut idx = hash as usize & self.mask;
        for _ in 0..self.slots.len() {
            let slot = &mut self.slots[idx];
            match slot {
                Some(entry) if *entry.key == *key => {
                    entry.stats.add(value);
                    return Ok(());
                }
                Some(_) => idx = (idx + 1) & self.mask,
                None => {
                    *slot = Some(Entry {
                        key: key.into(),
                        stats: Stats::new(value),
                    });
                    self.len += 1;
                    return Ok(());
                }
            }
        }
        Err(Error::TableFull {
            capacity: self.slots.len(),
        })
    }

    pub fn get(&self, key: &[u8]) -> Option<&Stats> {
        let mut idx = hash_key(key) as usize & self.mask;
        for _ in 0..self.slots.len() {
            match &self.slots[idx] {
                Some(entry) if *entry.key == *key => return Some(&entry.stats),
                Some(_) => idx = (idx + 1) & self.mask,
                None => return None,
            }
        }
        None
    }

    /// Occupied entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &Stats)> {
        self.slots
            .iter()
            .flatten()
            .map(|entry| (&*entry.key, &entry.stats))
    }

    /// Total number of records folded into the table.
    pub fn records(&self) -> u64 {
        self.iter().map(|(_, stats)| stats.count).sum()
    }
}

impl IntoIterator for StationTable {
    type Item = (Box<[u8]>, Stats);
    type IntoIter = IntoEntries;

    /// Drains the table, handing over ownership of every key.
    fn into_iter(self) -> Self::IntoIter {
        IntoEntries {
            slots: self.slots.into_vec().into_iter(),
        }
    }
}

pub struct IntoEntries {
    slots: std::vec::IntoIter<Option<Entry>>,
}

impl Iterator for IntoEntries {
    type Item = (Box<[u8]>, Stats);

    fn next(&mut self) -> Option<Self::Item> {
        self.slots
            .by_ref()
            .flatten()
            .next()
            .map(|entry| (entry.key, entry.stats))
    }
}
