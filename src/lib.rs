//! Per-station min/mean/max over large `<key>;<value>\n` files.
//!
//! The input is cut into line-aligned chunks, each chunk is scanned on its
//! own thread into a private open-addressing table, and the tables are
//! merged into one [`Summary`] that renders as
//! `{key=min/mean/max, ...}`. Values are kept in tenths as integers until
//! they are printed.

pub mod config;
pub mod decode;
pub mod engine;
pub mod error;
pub mod format;
pub mod partition;
pub mod scan;
pub mod source;
pub mod stats;
pub mod summary;
pub mod table;

pub use config::Config;
pub use engine::{aggregate, run, scan_range};
pub use error::{Error, Result};
pub use partition::partition;
pub use source::{FileSource, MappedSource, MemorySource, Source};
pub use stats::Stats;
pub use summary::Summary;
pub use table::StationTable;
