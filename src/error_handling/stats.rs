//! Trace failure statistics.
//!
//! Counts failed traces by [`TraceErrorKind`] so a run can end with a summary.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::TraceErrorKind;

/// Per-kind failure counters.
///
/// Every kind is initialized to zero on creation, so lookups never miss.
/// Counters are atomic and the struct can be shared behind an `Arc`.
pub struct TraceStats {
    errors: HashMap<TraceErrorKind, AtomicUsize>,
}

impl TraceStats {
    /// Creates a tracker with every counter at zero.
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for kind in TraceErrorKind::iter() {
            errors.insert(kind, AtomicUsize::new(0));
        }
        TraceStats { errors }
    }

    /// Increment the counter for an error kind.
    pub fn increment_error(&self, kind: TraceErrorKind) {
        if let Some(counter) = self.errors.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment error counter for {:?} which is not in the map",
                kind
            );
        }
    }

    /// Current count for an error kind.
    pub fn get_error_count(&self, kind: TraceErrorKind) -> usize {
        self.errors
            .get(&kind)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Sum of all counters.
    pub fn total_errors(&self) -> usize {
        self.errors.values().map(|c| c.load(Ordering::Relaxed)).sum()
    }

    /// Non-zero counters in declaration order.
    pub fn non_zero(&self) -> Vec<(TraceErrorKind, usize)> {
        TraceErrorKind::iter()
            .map(|kind| (kind, self.get_error_count(kind)))
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}

impl Default for TraceStats {
    fn default() -> Self {
        Self::new()
    }
}
