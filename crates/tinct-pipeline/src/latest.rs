//! Latest-wins gate for superseding in-flight filter applications.
//!
//! An interactive caller firing filter applications on every slider
//! tick only cares about the newest result: a computation that was
//! superseded while in flight should have its result discarded, not
//! queued. Cancellation is advisory — the gate never aborts pixel
//! work, it only refuses to let a stale result overwrite a newer one.
//!
//! Usage: call [`LatestGate::begin`] when a request starts, run the
//! pipeline, then call [`LatestGate::commit`] with the request's
//! generation; display the result only when `commit` returns `true`.

use std::sync::atomic::{AtomicU64, Ordering};

/// Token identifying one filter-application request.
///
/// Generations are totally ordered by issue time; later requests get
/// strictly larger generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

impl Generation {
    /// The raw sequence number.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// Lock-free latest-wins admission gate.
///
/// Safe to share across threads; all operations are single atomic
/// updates.
#[derive(Debug)]
pub struct LatestGate {
    next: AtomicU64,
    committed: AtomicU64,
}

impl LatestGate {
    /// Create a gate with no outstanding or committed requests.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
            committed: AtomicU64::new(0),
        }
    }

    /// Issue the generation for a new request.
    pub fn begin(&self) -> Generation {
        Generation(self.next.fetch_add(1, Ordering::Relaxed))
    }

    /// Try to commit a completed request's result.
    ///
    /// Returns `true` if the result may be displayed: no result from
    /// a later generation has been committed yet. Returns `false` for
    /// stale results, which the caller must discard. A generation can
    /// commit at most once.
    pub fn commit(&self, generation: Generation) -> bool {
        self.committed
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                (generation.0 > current).then_some(generation.0)
            })
            .is_ok()
    }
}

impl Default for LatestGate {
    fn default() -> Self {
        Self::new()
    }
}
