//! Renders `{key=min/mean/max, ...}` summaries.

use std::io::{self, Write};

use crate::stats::Stats;

/// Writes a scaled value with exactly one fractional digit.
pub fn write_tenths<W: Write>(out: &mut W, value: i64) -> io::Result<()> {
    let sign = if value < 0 { "-" } else { "" };
    let abs = value.unsigned_abs();
    write!(out, "{sign}{}.{}", abs / 10, abs % 10)
}

/// Writes one `key=min/mean/max` entry.
pub fn write_entry<W: Write>(out: &mut W, key: &[u8], stats: &Stats) -> io::Result<()> {
    out.write_all(key)?;
    out.write_all(b"=")?;
    write_tenths(out, stats.min as i64)?;
    write!(out, "/{:.1}/", stats.mean())?;
    write_tenths(out, stats.max as i64)
}

/// Writes the full summary line. `entries` must already be sorted.
pub fn write_summary<'a, W, I>(out: &mut W, entries: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = (&'a [u8], &'a Stats)>,
{
    out.write_all(b"{")?;
    for (i, (key, stats)) in entries.into_iter().enumerate() {
        if i > 0 {
            out.write_all(b", ")?;
        }
        write_entry(out, key, stats)?;
    }
    out.write_all(b"}\n")
}
