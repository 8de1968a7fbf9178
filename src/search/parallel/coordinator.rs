//! Round-based search coordinator that manages worker threads.

#![allow(dead_code)]

use crate::error::{SearchError, SearchResult};
use crate::search::ResultSink;
use crate::search::config::SearchParams;
use crate::search::parallel::channel::{RunControl, RunProgress, SearchEvent, create_event_channel};
use crate::search::parallel::config::ParallelConfig;
use crate::search::result::{RoundStatistics, RunStatistics};
use crate::search::worker::RoundWorker;
use crossbeam_channel::{Receiver, Sender};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Starts search runs, allowing at most one active run at a time.
#[derive(Debug, Default)]
pub struct SearchRunner {
    active: Arc<AtomicBool>,
    progress: Arc<RunProgress>,
}

impl SearchRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a run on a background thread.
    ///
    /// Fails with [`SearchError::AlreadyRunning`] while a previous run is
    /// still active; that run is left untouched.
    pub fn start_run(
        &self,
        params: SearchParams,
        config: ParallelConfig,
    ) -> SearchResult<RunHandle> {
        if self
            .active
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(SearchError::AlreadyRunning);
        }

        self.progress.reset();
        let control = Arc::new(RunControl::default());
        let (events_tx, events_rx) = create_event_channel();

        info!(
            target_value = %params.target(),
            operations = params.operation_count(),
            operators = %params.operator_symbols(),
            threads = config.num_threads,
            rounds = config.num_rounds,
            ttl = ?config.time_to_live,
            "starting search run"
        );

        let guard = ActiveGuard(Arc::clone(&self.active));
        let params = Arc::new(params);
        let run_control = Arc::clone(&control);
        let progress = Arc::clone(&self.progress);

        let thread = std::thread::spawn(move || {
            let _guard = guard;
            run_rounds(&params, &config, &run_control, &progress, &events_tx)
        });

        Ok(RunHandle {
            control,
            progress: Arc::clone(&self.progress),
            events: events_rx,
            thread,
        })
    }

    /// True while a run's thread has not finished.
    pub fn is_running(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Candidates generated in the last completed round of the current run.
    pub fn generated_this_round(&self) -> u64 {
        self.progress.generated_this_round()
    }

    /// Candidates generated over all completed rounds of the current run.
    pub fn generated_total(&self) -> u64 {
        self.progress.generated_total()
    }
}

/// Clears the runner's active flag when the run thread exits, panics included.
#[derive(Debug)]
struct ActiveGuard(Arc<AtomicBool>);

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Handle to an active run.
#[derive(Debug)]
pub struct RunHandle {
    control: Arc<RunControl>,
    progress: Arc<RunProgress>,
    events: Receiver<SearchEvent>,
    thread: JoinHandle<RunStatistics>,
}

impl RunHandle {
    /// Ask every worker to stop after its current candidate.
    pub fn cancel(&self) {
        self.control.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Event stream of the run; it disconnects once the run has ended.
    pub fn events(&self) -> &Receiver<SearchEvent> {
        &self.events
    }

    pub fn generated_this_round(&self) -> u64 {
        self.progress.generated_this_round()
    }

    pub fn generated_total(&self) -> u64 {
        self.progress.generated_total()
    }

    /// Block until the run ends, discarding undelivered events.
    pub fn wait(self) -> RunStatistics {
        match self.thread.join() {
            Ok(stats) => stats,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }

    /// Drain events into `sink` on the calling thread until the run ends.
    pub fn deliver_to<S: ResultSink + ?Sized>(self, sink: &mut S) -> RunStatistics {
        for event in self.events.iter() {
            match event {
                SearchEvent::Solution { text, .. } => sink.on_solution(&text),
                SearchEvent::RoundExpired { round, worker_id } => {
                    sink.on_round_expired(round, worker_id);
                }
                SearchEvent::RoundCompleted(stats) => sink.on_round_completed(&stats),
            }
        }

        match self.thread.join() {
            Ok(stats) => stats,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}

/// Run every round: fan out the workers, join them, sum their counters.
fn run_rounds(
    params: &Arc<SearchParams>,
    config: &ParallelConfig,
    control: &Arc<RunControl>,
    progress: &RunProgress,
    events: &Sender<SearchEvent>,
) -> RunStatistics {
    let start_time = Instant::now();
    let mut stats = RunStatistics::new();

    for round in 0..config.num_rounds {
        if control.is_cancelled() {
            break;
        }

        let round_start = Instant::now();
        let handles: Vec<_> = (0..config.num_threads)
            .map(|worker_id| {
                let rng = match config.worker_seed(round, worker_id) {
                    Some(seed) => ChaCha8Rng::seed_from_u64(seed),
                    None => ChaCha8Rng::from_os_rng(),
                };
                // A time to live past the clock's range means no deadline
                let deadline = Instant::now().checked_add(config.time_to_live);
                let worker =
                    RoundWorker::new(worker_id, round, Arc::clone(params), rng, deadline);
                let control = Arc::clone(control);
                let events = events.clone();

                std::thread::spawn(move || worker.run(&control, &events))
            })
            .collect();

        let mut round_stats = RoundStatistics::new(round);
        for handle in handles {
            match handle.join() {
                Ok(report) => round_stats.record(&report),
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
        round_stats.elapsed_time = round_start.elapsed();

        debug!(
            round,
            generated = round_stats.generated,
            solutions = round_stats.solutions_found,
            expirations = round_stats.expirations,
            "round joined"
        );

        progress.record_round(round_stats.generated);
        let _ = events.send(SearchEvent::RoundCompleted(round_stats.clone()));
        stats.add_round(round_stats);
    }

    stats.cancelled = control.is_cancelled();
    stats.elapsed_time = start_time.elapsed();

    if stats.cancelled {
        warn!(rounds = stats.rounds.len(), "search run cancelled");
    }
    info!(
        generated = stats.generated_total,
        solutions = stats.solutions_found,
        elapsed = ?stats.elapsed_time,
        "search run finished"
    );

    stats
}
