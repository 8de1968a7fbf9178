//! Validated, immutable search parameters shared by every worker

use crate::equation::Operation;
use crate::error::{SearchError, SearchResult};
use rust_decimal::Decimal;

/// Term pool builders
pub struct TermPool;

impl TermPool {
    /// Largest pool [`TermPool::descending`] will build
    pub const MAX_DESCENDING: i64 = 1_000_000;

    /// Every integer from `max` down to 1
    pub fn descending(max: i64) -> SearchResult<Vec<i64>> {
        if max > Self::MAX_DESCENDING {
            return Err(SearchError::InvalidParameters(format!(
                "largest term {} exceeds the limit of {}",
                max,
                Self::MAX_DESCENDING
            )));
        }
        Ok((1..=max).rev().collect())
    }

    /// A pool holding a single term
    pub fn single(term: i64) -> Vec<i64> {
        vec![term]
    }
}

/// What to look for and what to build candidates from.
///
/// Only constructible through [`SearchParams::new`], so a value of this type
/// is always valid.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    target: Decimal,
    operation_count: usize,
    term_pool: Vec<i64>,
    operator_pool: Vec<Operation>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            target: Decimal::from(27),
            operation_count: 9,
            term_pool: (1..=9).rev().collect(),
            operator_pool: vec![Operation::Add, Operation::Subtract, Operation::Multiply],
        }
    }
}

impl SearchParams {
    /// Validate and bundle search parameters.
    ///
    /// `operators` is a string of symbols such as `"+-*"`; whitespace and
    /// commas are ignored and repeated symbols count once.
    pub fn new(
        target: Decimal,
        operation_count: usize,
        term_pool: Vec<i64>,
        operators: &str,
    ) -> SearchResult<Self> {
        let mut operator_pool = Vec::new();
        for symbol in operators.chars().filter(|c| !c.is_whitespace() && *c != ',') {
            let operation = Operation::from_symbol(symbol)?;
            if !operator_pool.contains(&operation) {
                operator_pool.push(operation);
            }
        }

        if operation_count < 1 {
            return Err(SearchError::InvalidParameters(
                "operation count must be at least 1".to_string(),
            ));
        }
        if term_pool.is_empty() {
            return Err(SearchError::InvalidParameters(
                "term pool cannot be empty".to_string(),
            ));
        }
        if operator_pool.is_empty() {
            return Err(SearchError::InvalidParameters(
                "operator pool must contain at least one operator".to_string(),
            ));
        }
        // The zero-divisor redraw would never terminate
        if operator_pool.contains(&Operation::Divide) && term_pool.iter().all(|&t| t == 0) {
            return Err(SearchError::InvalidParameters(
                "division needs at least one non-zero term".to_string(),
            ));
        }

        Ok(Self {
            target,
            operation_count,
            term_pool,
            operator_pool,
        })
    }

    pub fn target(&self) -> Decimal {
        self.target
    }

    /// Number of `(value, operator)` pairs in every candidate
    pub fn operation_count(&self) -> usize {
        self.operation_count
    }

    pub fn term_pool(&self) -> &[i64] {
        &self.term_pool
    }

    pub fn operator_pool(&self) -> &[Operation] {
        &self.operator_pool
    }

    /// Operator pool rendered back to its symbols
    pub fn operator_symbols(&self) -> String {
        self.operator_pool.iter().map(|op| op.to_string()).collect()
    }
}
