//! Candidate equations: operators, random generation and evaluation

pub mod candidate;
pub mod operation;

#[allow(unused_imports)]
pub use candidate::{Candidate, Term, format_value};
pub use operation::Operation;
