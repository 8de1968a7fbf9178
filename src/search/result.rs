//! Round and run statistics

#![allow(dead_code)]

use crate::search::worker::{WorkerOutcome, WorkerReport};
use std::time::Duration;

/// Aggregated outcome of one round, built after all its workers are joined
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoundStatistics {
    /// Zero-based round index
    pub round: usize,
    /// Candidates generated by all workers of the round
    pub generated: u64,
    /// Generation count of each worker, indexed by worker id
    pub worker_generated: Vec<u64>,
    pub solutions_found: u64,
    pub expirations: u64,
    /// Workers that stopped on cancellation
    pub cancelled_workers: u64,
    pub elapsed_time: Duration,
}

impl RoundStatistics {
    pub fn new(round: usize) -> Self {
        Self {
            round,
            ..Default::default()
        }
    }

    /// Fold one worker's report into the round
    pub fn record(&mut self, report: &WorkerReport) {
        if self.worker_generated.len() <= report.worker_id {
            self.worker_generated.resize(report.worker_id + 1, 0);
        }
        self.worker_generated[report.worker_id] = report.generated;
        self.generated += report.generated;

        match report.outcome {
            WorkerOutcome::SolutionFound => self.solutions_found += 1,
            WorkerOutcome::Expired => self.expirations += 1,
            WorkerOutcome::Cancelled => self.cancelled_workers += 1,
        }
    }
}

/// Statistics of a complete run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStatistics {
    pub rounds: Vec<RoundStatistics>,
    pub generated_total: u64,
    pub solutions_found: u64,
    pub expirations: u64,
    /// The run stopped early on a cancel request
    pub cancelled: bool,
    pub elapsed_time: Duration,
}

impl RunStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a joined round and update the run totals
    pub fn add_round(&mut self, round: RoundStatistics) {
        self.generated_total += round.generated;
        self.solutions_found += round.solutions_found;
        self.expirations += round.expirations;
        self.rounds.push(round);
    }

    /// Generated count of the last completed round
    pub fn generated_last_round(&self) -> u64 {
        self.rounds.last().map_or(0, |round| round.generated)
    }

    /// Candidates generated per second
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed_time.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.generated_total as f64 / secs
        }
    }

    /// Format statistics as a human-readable string
    pub fn format_summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("Rounds completed: {}\n", self.rounds.len()));
        s.push_str(&format!("Time: {:.2?}\n", self.elapsed_time));
        s.push_str(&format!(
            "Equations generated this round: {}\n",
            self.generated_last_round()
        ));
        s.push_str(&format!(
            "Equations generated total: {}\n",
            self.generated_total
        ));
        s.push_str(&format!(
            "Throughput: {:.0} equations/sec\n",
            self.throughput()
        ));
        s.push_str(&format!("Solutions found: {}\n", self.solutions_found));
        s.push_str(&format!("Expired workers: {}\n", self.expirations));

        if self.cancelled {
            s.push_str("Run cancelled\n");
        }

        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(worker_id: usize, generated: u64, outcome: WorkerOutcome) -> WorkerReport {
        WorkerReport {
            worker_id,
            round: 0,
            generated,
            outcome,
        }
    }

    #[test]
    fn test_round_record() {
        let mut round = RoundStatistics::new(0);
        round.record(&report(1, 30, WorkerOutcome::Expired));
        round.record(&report(0, 12, WorkerOutcome::SolutionFound));
        round.record(&report(2, 5, WorkerOutcome::Cancelled));

        assert_eq!(round.generated, 47);
        assert_eq!(round.worker_generated, vec![12, 30, 5]);
        assert_eq!(round.solutions_found, 1);
        assert_eq!(round.expirations, 1);
        assert_eq!(round.cancelled_workers, 1);
    }

    #[test]
    fn test_run_totals() {
        let mut stats = RunStatistics::new();

        let mut first = RoundStatistics::new(0);
        first.record(&report(0, 100, WorkerOutcome::Expired));
        let mut second = RoundStatistics::new(1);
        second.record(&report(0, 25, WorkerOutcome::SolutionFound));

        stats.add_round(first);
        stats.add_round(second);

        assert_eq!(stats.generated_total, 125);
        assert_eq!(stats.generated_last_round(), 25);
        assert_eq!(stats.solutions_found, 1);
        assert_eq!(stats.expirations, 1);
    }

    #[test]
    fn test_throughput() {
        let mut stats = RunStatistics::new();
        stats.generated_total = 10_000;
        stats.elapsed_time = Duration::from_secs(10);
        assert!((stats.throughput() - 1000.0).abs() < 1e-10);

        assert_eq!(RunStatistics::new().throughput(), 0.0);
    }

    #[test]
    fn test_summary_mentions_counters() {
        let mut stats = RunStatistics::new();
        let mut round = RoundStatistics::new(0);
        round.record(&report(0, 9, WorkerOutcome::Expired));
        stats.add_round(round);
        stats.cancelled = true;

        let summary = stats.format_summary();
        assert!(summary.contains("Equations generated this round: 9"));
        assert!(summary.contains("Equations generated total: 9"));
        assert!(summary.contains("Run cancelled"));
    }
}
