//! Event stream and shared run state between workers, coordinator and caller.

use crate::search::result::RoundStatistics;
use crossbeam_channel::{Receiver, Sender, unbounded};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Message streamed to the consumer of a run.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// A worker found an equation hitting the target.
    Solution {
        round: usize,
        worker_id: usize,
        text: String,
    },
    /// A worker reached its deadline without a solution.
    RoundExpired { round: usize, worker_id: usize },
    /// Every worker of a round has been joined.
    RoundCompleted(RoundStatistics),
}

/// Cooperative cancellation flag for one run.
#[derive(Debug, Default)]
pub struct RunControl {
    cancelled: AtomicBool,
}

impl RunControl {
    /// Signal all workers to stop after their current candidate.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Generation counters published at round join points.
///
/// Only the coordinator writes here, after it has joined a round; readers
/// may poll at any time.
#[derive(Debug, Default)]
pub struct RunProgress {
    this_round: AtomicU64,
    total: AtomicU64,
}

impl RunProgress {
    /// Record the total of a just-joined round.
    pub fn record_round(&self, generated: u64) {
        self.this_round.store(generated, Ordering::SeqCst);
        self.total.fetch_add(generated, Ordering::SeqCst);
    }

    pub fn reset(&self) {
        self.this_round.store(0, Ordering::SeqCst);
        self.total.store(0, Ordering::SeqCst);
    }

    /// Candidates generated in the most recently completed round.
    pub fn generated_this_round(&self) -> u64 {
        self.this_round.load(Ordering::SeqCst)
    }

    /// Candidates generated over all completed rounds of the run.
    pub fn generated_total(&self) -> u64 {
        self.total.load(Ordering::SeqCst)
    }
}

/// Create the event channel from workers and coordinator to the consumer.
///
/// Unbounded so workers never block on a slow consumer.
pub fn create_event_channel() -> (Sender<SearchEvent>, Receiver<SearchEvent>) {
    unbounded()
}
