//! Archive module for raw API responses
//!
//! The harvester keeps every raw page payload it fetched and writes them
//! out as one JSON artifact at the end of the run, purely for post-hoc
//! inspection and replay. Nothing else in the pipeline consumes it.

mod writer;

pub use writer::{write_archive, ArchiveError, ArchiveResult};
