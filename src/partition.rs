//! Splits a source into line-aligned byte ranges, one per worker.

use std::io::{Read, Seek, SeekFrom};
use std::ops::Range;

use tracing::debug;

use crate::error::{Error, Result};
use crate::scan::TERMINATOR;
use crate::source::Source;

/// Cuts `source` into at most `workers` contiguous ranges covering the
/// whole input, each ending right after a newline (the last one ends at
/// the end of input).
///
/// Every cut is searched for in the `lookback` bytes that precede a nominal
/// boundary at a multiple of `len / workers`. When the window is cut short
/// by the previous range and holds no newline the boundary is dropped, so
/// small inputs yield fewer ranges. Empty ranges are never produced.
pub fn partition<S: Source>(
    source: &S,
    workers: usize,
    lookback: usize,
) -> Result<Vec<Range<u64>>> {
    if workers == 0 {
        return Err(Error::InvalidConfig("worker count must be at least 1"));
    }
    let len = source.len()?;
    if len == 0 {
        return Ok(Vec::new());
    }

    let chunk_size = len / workers as u64;
    let mut ranges = Vec::with_capacity(workers);
    let mut start = 0u64;

    if chunk_size > 0 && workers > 1 {
        let mut reader = source.open()?;
        let mut buf = vec![0u8; lookback];

        for i in 1..workers as u64 {
            let boundary = i * chunk_size;
            if boundary <= start {
                continue;
            }
            let window_start = boundary.saturating_sub(lookback as u64).max(start);
            let window = &mut buf[..(boundary - window_start) as usize];
            reader.seek(SeekFrom::Start(window_start))?;
            reader.read_exact(window)?;

            match memchr::memrchr(TERMINATOR, window) {
                Some(pos) => {
                    let cut = window_start + pos as u64 + 1;
                    ranges.push(start..cut);
                    start = cut;
                }
                None if window_start == start => continue,
                None => {
                    return Err(Error::NoTerminator {
                        offset: boundary,
                        lookback,
                    })
                }
            }
        }
    }

    if start < len {
        ranges.push(start..len);
    }
    debug!(len, workers, chunks = ranges.len(), "partitioned source");
    Ok(ranges)
}
