//! Single-pass record scanner: finds the `;`, hashes the key on the way and
//! decodes the value that follows it.

use crate::decode;

pub const SEPARATOR: u8 = b';';
pub const TERMINATOR: u8 = b'\n';

// 64-bit FNV-1 constants.
const FNV_OFFSET: u64 = 14695981039346656037;
const FNV_PRIME: u64 = 1099511628211;

/// One decoded record. `key` borrows from the scanned window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    pub key: &'a [u8],
    pub hash: u64,
    pub value: i16,
    /// Offset just past the record terminator.
    pub next: usize,
}

/// Hashes a whole key the same way [`scan_record`] does.
#[inline]
pub fn hash_key(key: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET;
    for &c in key {
        hash ^= c as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Scans the record starting at `window[offset]`.
///
/// Returns `None` when no separator appears before the end of the window.
/// The value after the separator must be complete and followed by a
/// terminator; callers only hand over windows that end on one.
#[inline]
pub fn scan_record(window: &[u8], offset: usize) -> Option<Record<'_>> {
    let mut hash = FNV_OFFSET;
    let mut i = offset;
    while i < window.len() {
        let c = window[i];
        if c == SEPARATOR {
            let key = &window[offset..i];
            let value_bytes = &window[i + 1..];
            debug_assert!(
                memchr::memchr(TERMINATOR, value_bytes)
                    .is_some_and(|end| decode::is_well_formed(&value_bytes[..end])),
                "malformed value after key {:?}",
                String::from_utf8_lossy(key)
            );
            let (value, len) = decode::decode_prefix(value_bytes);
            return Some(Record {
                key,
                hash,
                value,
                next: i + 1 + len + 1,
            });
        }
        hash ^= c as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    None
}

/// Iterates the records of a window that ends on a terminator.
pub struct Records<'a> {
    window: &'a [u8],
    offset: usize,
}

impl<'a> Records<'a> {
    pub fn new(window: &'a [u8]) -> Self {
        Self { window, offset: 0 }
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = Record<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let record = scan_record(self.window, self.offset)?;
        self.offset = record.next;
        Some(record)
    }
}
