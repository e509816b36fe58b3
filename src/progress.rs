// src/progress.rs
use crate::data::Partition;

/// Lightweight progress reporting for partition loads.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called before the first chunk of a partition is read.
    fn begin(&mut self, _partition: Partition) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called after each chunk is coerced; `rows` is the running total.
    fn chunk_done(&mut self, _chunk: usize, _rows: usize) {}

    /// Called once the partition is fully loaded.
    fn finish(&mut self, _partition: Partition, _rows: usize) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
