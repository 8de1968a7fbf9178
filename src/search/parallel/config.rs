//! Configuration for parallel, round-based search execution.

use std::time::Duration;

/// How many workers to run, for how long, and how often.
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Number of worker threads spawned per round.
    pub num_threads: usize,
    /// Number of rounds run back to back.
    pub num_rounds: usize,
    /// Time budget of each worker, counted from its spawn.
    pub time_to_live: Duration,
    /// Base random seed (worker `w` of round `r` gets `seed + r * threads + w`).
    pub base_seed: Option<u64>,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            num_threads: num_cpus::get(),
            num_rounds: 1,
            time_to_live: Duration::from_secs(6),
            base_seed: None,
        }
    }
}

impl ParallelConfig {
    /// Set the number of worker threads per round.
    pub fn with_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = num_threads.max(1);
        self
    }

    /// Set the number of rounds.
    pub fn with_rounds(mut self, num_rounds: usize) -> Self {
        self.num_rounds = num_rounds.max(1);
        self
    }

    /// Set the per-worker time budget.
    pub fn with_time_to_live(mut self, time_to_live: Duration) -> Self {
        self.time_to_live = time_to_live;
        self
    }

    /// Set the base random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.base_seed = Some(seed);
        self
    }

    /// Set the base random seed from an Option.
    pub fn with_seed_option(mut self, seed: Option<u64>) -> Self {
        self.base_seed = seed;
        self
    }

    /// Seed for one worker, or `None` to seed from the OS.
    pub fn worker_seed(&self, round: usize, worker_id: usize) -> Option<u64> {
        self.base_seed.map(|seed| {
            seed.wrapping_add((round as u64).wrapping_mul(self.num_threads as u64))
                .wrapping_add(worker_id as u64)
        })
    }
}
