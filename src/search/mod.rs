//! Randomized parallel search for equations that hit a target value
//!
//! - `config`: validated search parameters shared by all workers
//! - `worker`: the single-threaded generate-and-test loop of one round
//! - `parallel`: rounds of concurrent workers, cancellation and progress
//! - `result`: round and run statistics

pub mod config;
pub mod parallel;
pub mod result;
pub mod worker;

pub use config::{SearchParams, TermPool};
#[allow(unused_imports)]
pub use parallel::{ParallelConfig, RunHandle, SearchEvent, SearchRunner};
pub use result::{RoundStatistics, RunStatistics};

/// Consumer of the results streamed by a run.
///
/// Called from a single thread (see [`RunHandle::deliver_to`]), in arrival
/// order; the order across workers is not deterministic.
pub trait ResultSink {
    /// A solution line, `"<t1> <op1> ... <tn> = <result>"`
    fn on_solution(&mut self, text: &str);

    /// A worker ran out of time without a solution
    fn on_round_expired(&mut self, _round: usize, _worker_id: usize) {}

    /// All workers of a round were joined
    fn on_round_completed(&mut self, _stats: &RoundStatistics) {}
}

/// Adapts a pair of callbacks to [`ResultSink`]
#[allow(dead_code)]
pub struct FnSink<F, G> {
    on_solution: F,
    on_round_expired: G,
}

#[allow(dead_code)]
impl<F, G> FnSink<F, G>
where
    F: FnMut(&str),
    G: FnMut(),
{
    pub fn new(on_solution: F, on_round_expired: G) -> Self {
        Self {
            on_solution,
            on_round_expired,
        }
    }
}

impl<F, G> ResultSink for FnSink<F, G>
where
    F: FnMut(&str),
    G: FnMut(),
{
    fn on_solution(&mut self, text: &str) {
        (self.on_solution)(text);
    }

    fn on_round_expired(&mut self, _round: usize, _worker_id: usize) {
        (self.on_round_expired)();
    }
}
