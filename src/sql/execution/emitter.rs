//! Emitter bookkeeping: cadence gating and the R/I/DSTREAM disciplines.
//!
//! The state remembers per-input arrival counts for the cadence gate and
//! the previous cycle's rows for the incremental diffs. Skipped cycles
//! leave the memo untouched, as do errored cycles, so the next diff
//! always compares against the last good baseline.

use crate::sql::ast::EmitterKind;
use crate::sql::execution::types::Value;
use std::collections::HashMap;

/// Per-plan emitter state
#[derive(Debug)]
pub struct EmitterState {
    kind: EmitterKind,
    /// Relation name and emission threshold. Empty fires on every admission.
    cadence: Vec<(String, u64)>,
    arrival_counts: HashMap<String, u64>,
    prev_output: Vec<HashMap<String, Value>>,
}

impl EmitterState {
    pub fn new(kind: EmitterKind, cadence: Vec<(String, u64)>) -> Self {
        Self {
            kind,
            cadence,
            arrival_counts: HashMap::new(),
            prev_output: Vec::new(),
        }
    }

    /// Count one successful admission on the named input
    pub fn record_arrival(&mut self, input: &str) {
        *self.arrival_counts.entry(input.to_string()).or_insert(0) += 1;
    }

    /// Whether a cycle fires at the current arrival counts
    ///
    /// Every listed relation's counter must sit on a multiple of its
    /// threshold. With no cadence entries the gate is always open.
    pub fn gate_open(&self) -> bool {
        self.cadence.iter().all(|(relation, threshold)| {
            let count = self.arrival_counts.get(relation).copied().unwrap_or(0);
            count % threshold == 0
        })
    }

    /// Convert this cycle's row set into the emitted rows
    ///
    /// RSTREAM emits everything, ISTREAM the rows not present in the
    /// previous cycle, DSTREAM the previous rows no longer present. The
    /// memo is replaced by the current rows in all three cases.
    pub fn emit(
        &mut self,
        current: Vec<HashMap<String, Value>>,
    ) -> Vec<HashMap<String, Value>> {
        let output = match self.kind {
            EmitterKind::RStream => current.clone(),
            EmitterKind::IStream => stream_difference(&current, &self.prev_output),
            EmitterKind::DStream => stream_difference(&self.prev_output, &current),
        };
        self.prev_output = current;
        output
    }
}

/// Rows of the left operand that appear nowhere in the right operand,
/// in left-operand order
///
/// Presence on the right suppresses every equal row on the left, so a
/// cycle that keeps producing the same row emits it only once under
/// ISTREAM no matter how often the row repeats.
fn stream_difference(
    left: &[HashMap<String, Value>],
    right: &[HashMap<String, Value>],
) -> Vec<HashMap<String, Value>> {
    left.iter()
        .filter(|row| !right.contains(*row))
        .cloned()
        .collect()
}
