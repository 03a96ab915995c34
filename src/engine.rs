//! Parallel orchestration: one worker per chunk, one table per worker, and
//! a sequential fan-in merge on the calling thread.

use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use std::ops::Range;

use crossbeam_channel::bounded;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::partition::partition;
use crate::scan::{Records, TERMINATOR};
use crate::source::Source;
use crate::summary::Summary;
use crate::table::StationTable;

/// Folds every record of `window` into `table`. The window must end on a
/// record terminator.
pub fn aggregate_window(window: &[u8], table: &mut StationTable) -> Result<()> {
    for record in Records::new(window) {
        table.add(record.key, record.hash, record.value)?;
    }
    Ok(())
}

/// Folds a final record that lacks its newline.
fn aggregate_tail(tail: &[u8], table: &mut StationTable) -> Result<()> {
    if tail.is_empty() {
        return Ok(());
    }
    let mut last = tail.to_vec();
    last.push(TERMINATOR);
    aggregate_window(&last, table)
}

/// Scans the byte range `range` of `source` into a fresh table.
///
/// The range is streamed through a reusable buffer of `config.buffer_size`
/// bytes. Each fill is cut after its last newline and the partial record
/// behind it is moved to the front for the next read. A trailing record
/// without a newline at the end of the range is still counted.
pub fn scan_range<S: Source>(
    source: &S,
    range: Range<u64>,
    config: &Config,
) -> Result<StationTable> {
    let mut table = StationTable::with_capacity(config.capacity)?;
    let mut reader = source.open()?;
    reader.seek(SeekFrom::Start(range.start))?;
    let mut reader = reader.take(range.end - range.start);

    let mut buf = vec![0u8; config.buffer_size];
    let mut carry = 0;
    let mut offset = range.start;

    loop {
        let n = reader.read(&mut buf[carry..])?;
        if n == 0 {
            aggregate_tail(&buf[..carry], &mut table)?;
            break;
        }

        let filled = carry + n;
        let Some(nl) = memchr::memrchr(TERMINATOR, &buf[..filled]) else {
            if filled < buf.len() {
                carry = filled;
                continue;
            }
            // A full buffer without a newline is only fine for the last record.
            if reader.limit() > 0 {
                return Err(Error::RecordTooLong {
                    offset,
                    buffer_size: buf.len(),
                });
            }
            aggregate_tail(&buf[..filled], &mut table)?;
            break;
        };

        aggregate_window(&buf[..=nl], &mut table)?;
        buf.copy_within(nl + 1..filled, 0);
        carry = filled - nl - 1;
        offset += nl as u64 + 1;
    }

    Ok(table)
}

/// Partitions `source`, scans every chunk on its own thread and merges the
/// per-worker tables as they arrive.
///
/// The first failing worker aborts the run; the remaining workers still
/// finish before the error is returned.
pub fn aggregate<S: Source>(source: &S, config: &Config) -> Result<Summary> {
    config.validate()?;
    let ranges = partition(source, config.workers, config.lookback)?;
    let mut summary = Summary::new();
    if ranges.is_empty() {
        return Ok(summary);
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(ranges.len())
        .thread_name(|i| format!("brc-worker-{i}"))
        .build()?;
    let (tx, rx) = bounded(ranges.len());

    pool.in_place_scope(|scope| {
        for (chunk, range) in ranges.iter().cloned().enumerate() {
            let tx = tx.clone();
            scope.spawn(move |_| {
                let result = scan_range(source, range.clone(), config);
                if let Ok(table) = &result {
                    debug!(
                        chunk,
                        start = range.start,
                        end = range.end,
                        keys = table.len(),
                        records = table.records(),
                        "chunk scanned"
                    );
                }
                // Capacity is one slot per worker, so this never blocks.
                let _ = tx.send(result);
            });
        }
        drop(tx);

        for result in rx.iter() {
            summary.merge_table(result?);
        }
        Ok::<_, Error>(())
    })?;

    info!(chunks = ranges.len(), stations = summary.len(), "aggregation finished");
    Ok(summary)
}

/// Aggregates `source` and writes the formatted summary to `out`.
///
/// Nothing is written unless the whole aggregation succeeds.
pub fn run<S: Source, W: Write>(source: &S, config: &Config, out: W) -> Result<()> {
    let summary = aggregate(source, config)?;
    let mut out = BufWriter::new(out);
    summary.write_to(&mut out)?;
    out.flush()?;
    Ok(())
}
