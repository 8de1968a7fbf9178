//! Randomly generated candidate equations and their left-to-right evaluation

#![allow(dead_code)]

use crate::equation::Operation;
use crate::search::config::SearchParams;
use rand::Rng;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

/// One `(value, operator)` pair of a candidate.
///
/// The operator is applied between this value and the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Term {
    pub value: Decimal,
    pub operation: Operation,
}

impl Term {
    pub fn new(value: impl Into<Decimal>, operation: Operation) -> Self {
        Self {
            value: value.into(),
            operation,
        }
    }
}

/// A fully built candidate equation with its result computed at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    terms: Vec<Term>,
    /// `None` when some step left the decimal domain
    result: Option<Decimal>,
}

impl Candidate {
    /// Draw a random candidate from the pools in `params`.
    ///
    /// Terms and operators are picked uniformly by index. A zero term right
    /// after a division is redrawn; the last pair always carries the
    /// terminator.
    pub fn generate<R: Rng>(params: &SearchParams, rng: &mut R) -> Self {
        let count = params.operation_count();
        let term_pool = params.term_pool();
        let operator_pool = params.operator_pool();

        let mut terms = Vec::with_capacity(count);
        let mut last_operation = Operation::None;

        for position in 1..=count {
            let value = loop {
                let drawn = term_pool[rng.random_range(0..term_pool.len())];
                if !(last_operation == Operation::Divide && drawn == 0) {
                    break drawn;
                }
            };

            let operation = if position == count {
                Operation::Equal
            } else {
                operator_pool[rng.random_range(0..operator_pool.len())]
            };

            terms.push(Term::new(value, operation));
            last_operation = operation;
        }

        Self::from_terms(terms)
    }

    /// Build a candidate from explicit pairs and evaluate it
    pub fn from_terms(terms: Vec<Term>) -> Self {
        let result = evaluate(&terms);
        Self { terms, result }
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn result(&self) -> Option<Decimal> {
        self.result
    }

    /// Exact decimal comparison against the target
    pub fn is_solution(&self, target: Decimal) -> bool {
        self.result == Some(target)
    }
}

/// Strict left-to-right evaluation: no operator precedence.
///
/// The running total starts at the first value; each following value is
/// combined with it through the operator of the pair before it. The
/// terminator is never applied.
fn evaluate(terms: &[Term]) -> Option<Decimal> {
    let (first, rest) = terms.split_first()?;
    let mut running_total = first.value;
    let mut pending = first.operation;

    for term in rest {
        running_total = pending.calculate(running_total, term.value)?;
        pending = term.operation;
    }

    Some(running_total)
}

/// Render a value with at most two fractional digits (`0.##`)
pub fn format_value(value: Decimal) -> String {
    value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string()
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for term in &self.terms {
            write!(f, "{} {} ", format_value(term.value), term.operation)?;
        }
        match self.result {
            Some(result) => write!(f, "{}", format_value(result)),
            None => write!(f, "overflow"),
        }
    }
}
