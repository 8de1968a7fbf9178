//! Single-threaded round worker
//!
//! A worker draws candidates until one hits the target, its deadline passes
//! or the run is cancelled. Checks happen between candidates only, so a
//! worker can overrun its deadline by at most one generate-and-evaluate
//! cycle.

#![allow(dead_code)]

use crate::equation::Candidate;
use crate::search::config::SearchParams;
use crate::search::parallel::channel::{RunControl, SearchEvent};
use crossbeam_channel::Sender;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Lifecycle of a round worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Idle,
    Generating,
    SolutionFound,
    Expired,
    Cancelled,
    Done,
}

impl WorkerState {
    /// Solution, expiry or cancellation: the worker stops generating
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            WorkerState::SolutionFound | WorkerState::Expired | WorkerState::Cancelled
        )
    }
}

/// Why a worker stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerOutcome {
    SolutionFound,
    Expired,
    Cancelled,
}

/// What a finished worker hands back to the coordinator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerReport {
    pub worker_id: usize,
    pub round: usize,
    /// Candidates this worker generated
    pub generated: u64,
    pub outcome: WorkerOutcome,
}

pub struct RoundWorker {
    worker_id: usize,
    round: usize,
    params: Arc<SearchParams>,
    rng: ChaCha8Rng,
    /// `None` when the time to live reaches past what `Instant` can hold
    deadline: Option<Instant>,
    generated: u64,
    state: WorkerState,
}

impl RoundWorker {
    pub fn new(
        worker_id: usize,
        round: usize,
        params: Arc<SearchParams>,
        rng: ChaCha8Rng,
        deadline: Option<Instant>,
    ) -> Self {
        Self {
            worker_id,
            round,
            params,
            rng,
            deadline,
            generated: 0,
            state: WorkerState::Idle,
        }
    }

    pub fn state(&self) -> WorkerState {
        self.state
    }

    pub fn generated(&self) -> u64 {
        self.generated
    }

    /// Advance by one cooperative step and return the new state.
    ///
    /// A step either stops the worker (cancel or deadline observed) or
    /// generates and evaluates exactly one candidate. Terminal states are
    /// sticky.
    pub fn step(&mut self, control: &RunControl, events: &Sender<SearchEvent>) -> WorkerState {
        if self.state.is_terminal() || self.state == WorkerState::Done {
            return self.state;
        }
        self.state = WorkerState::Generating;

        if control.is_cancelled() {
            debug!(worker = self.worker_id, round = self.round, "worker cancelled");
            self.state = WorkerState::Cancelled;
            return self.state;
        }

        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            debug!(
                worker = self.worker_id,
                round = self.round,
                generated = self.generated,
                "worker deadline reached"
            );
            // The consumer may already be gone; the outcome still counts
            let _ = events.send(SearchEvent::RoundExpired {
                round: self.round,
                worker_id: self.worker_id,
            });
            self.state = WorkerState::Expired;
            return self.state;
        }

        let candidate = Candidate::generate(&self.params, &mut self.rng);
        self.generated += 1;

        if candidate.is_solution(self.params.target()) {
            let text = candidate.to_string();
            info!(worker = self.worker_id, round = self.round, %text, "solution found");
            let _ = events.send(SearchEvent::Solution {
                round: self.round,
                worker_id: self.worker_id,
                text,
            });
            self.state = WorkerState::SolutionFound;
        }

        self.state
    }

    /// Step until a terminal state, then report.
    pub fn run(mut self, control: &RunControl, events: &Sender<SearchEvent>) -> WorkerReport {
        while !self.step(control, events).is_terminal() {}

        let outcome = match self.state {
            WorkerState::SolutionFound => WorkerOutcome::SolutionFound,
            WorkerState::Expired => WorkerOutcome::Expired,
            _ => WorkerOutcome::Cancelled,
        };
        self.state = WorkerState::Done;

        WorkerReport {
            worker_id: self.worker_id,
            round: self.round,
            generated: self.generated,
            outcome,
        }
    }
}
