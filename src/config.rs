use crate::error::{Error, Result};

/// Tunables for one aggregation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Number of chunks, and so of worker threads.
    pub workers: usize,
    /// Slots per worker table. Must be a power of two.
    pub capacity: usize,
    /// How far back from a nominal chunk boundary to look for a newline.
    pub lookback: usize,
    /// Per-worker read buffer; bounds the longest record.
    pub buffer_size: usize,
}

pub const DEFAULT_CAPACITY: usize = 1 << 17;
pub const DEFAULT_LOOKBACK: usize = 100;
pub const DEFAULT_BUFFER_SIZE: usize = 1024 * 1024;

impl Default for Config {
    fn default() -> Self {
        let workers = std::thread::available_parallelism().map_or(1, |n| n.get());
        Self {
            workers,
            capacity: DEFAULT_CAPACITY,
            lookback: DEFAULT_LOOKBACK,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl Config {
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_lookback(mut self, lookback: usize) -> Self {
        self.lookback = lookback;
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(Error::InvalidConfig("worker count must be at least 1"));
        }
        if !self.capacity.is_power_of_two() {
            return Err(Error::InvalidConfig("table capacity must be a power of two"));
        }
        if self.lookback == 0 {
            return Err(Error::InvalidConfig("lookback must be at least 1 byte"));
        }
        if self.buffer_size == 0 {
            return Err(Error::InvalidConfig("buffer size must be at least 1 byte"));
        }
        Ok(())
    }
}
