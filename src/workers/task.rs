use crate::mccfr::delta::Delta;
use std::ops::Range;

/// a message from the pool to a worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// traverse these iteration indices against the current tracker
    Batch { batch: usize, iterations: Range<usize> },
    Shutdown,
}

/// a message from a worker back to the pool
#[derive(Debug)]
pub enum Outcome {
    Done {
        worker: usize,
        batch: usize,
        delta: Delta,
    },
    /// the worker died; its partial delta is gone
    Failed {
        worker: usize,
        batch: usize,
        reason: String,
    },
}
