//! Sliding window buffer for one FROM-clause input.
//!
//! Admission appends at the tail and then applies the retention rule, so
//! the buffer always satisfies its range invariant between calls. Time
//! windows measure against the newest admitted tuple's event timestamp;
//! wall-clock time plays no part.

use crate::sql::execution::types::Tuple;
use crate::sql::planner::WindowRange;
use std::collections::VecDeque;

/// Ordered buffer of the tuples currently inside one input's window
#[derive(Debug)]
pub struct WindowBuffer {
    range: WindowRange,
    tuples: VecDeque<Tuple>,
}

impl WindowBuffer {
    pub fn new(range: WindowRange) -> Self {
        Self {
            range,
            tuples: VecDeque::new(),
        }
    }

    /// Admit one tuple and evict everything the range no longer retains
    ///
    /// Count windows keep the newest n tuples. Time windows keep tuples
    /// whose event timestamp is within the range of the admitted tuple's;
    /// a tuple exactly on the boundary is retained.
    pub fn admit(&mut self, tuple: Tuple) {
        let newest = tuple.event_timestamp;
        self.tuples.push_back(tuple);
        match self.range {
            WindowRange::Count(n) => {
                while self.tuples.len() > n {
                    self.tuples.pop_front();
                }
            }
            WindowRange::Time(span) => {
                let cutoff = newest - span;
                self.tuples.retain(|t| t.event_timestamp >= cutoff);
            }
        }
    }

    /// The admitted tuples in arrival order
    pub fn tuples(&self) -> &VecDeque<Tuple> {
        &self.tuples
    }

    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }
}
