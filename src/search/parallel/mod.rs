//! Parallel, round-based execution of search workers.
//!
//! # Architecture
//!
//! - A **runner** starts one run at a time on a background thread
//! - Each **round** spawns a fresh set of worker threads and joins them all
//! - Workers stream **events** (solutions, expirations) over a channel to a
//!   single consumer, and return their generation counts when joined
//! - The coordinator sums those counts at the join point and publishes them
//!
//! # Example
//!
//! ```ignore
//! let runner = SearchRunner::new();
//! let config = ParallelConfig::default()
//!     .with_threads(4)
//!     .with_rounds(3)
//!     .with_time_to_live(Duration::from_secs(6));
//!
//! let stats = runner.start_run(params, config)?.deliver_to(&mut result_log);
//! ```

pub mod channel;
pub mod config;
pub mod coordinator;

pub use channel::SearchEvent;
pub use config::ParallelConfig;
pub use coordinator::{RunHandle, SearchRunner};
