//! Arithmetic operators and the two sentinels that close a candidate

#![allow(dead_code)]

use crate::error::SearchError;
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use std::fmt;

/// Operator attached to a term of a candidate equation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Raise,
    /// Terminator: closes every candidate, never drawn from the pool
    Equal,
    /// Placeholder before the first term has been read
    None,
}

impl Operation {
    /// Parse a single operator symbol
    pub fn from_symbol(symbol: char) -> Result<Self, SearchError> {
        match symbol {
            '+' => Ok(Operation::Add),
            '-' => Ok(Operation::Subtract),
            '*' => Ok(Operation::Multiply),
            '/' => Ok(Operation::Divide),
            '^' => Ok(Operation::Raise),
            other => Err(SearchError::InvalidSymbol(other.to_string())),
        }
    }

    /// True for the terminator and the blank placeholder
    pub fn is_sentinel(&self) -> bool {
        matches!(self, Operation::Equal | Operation::None)
    }

    /// Apply the operator to `(lhs, rhs)`.
    ///
    /// Returns `None` when the result does not fit the decimal domain.
    ///
    /// # Panics
    /// On a sentinel, or when dividing by zero. Both are contract violations:
    /// generation never places a zero term after a division.
    pub fn calculate(&self, lhs: Decimal, rhs: Decimal) -> Option<Decimal> {
        match self {
            Operation::Add => lhs.checked_add(rhs),
            Operation::Subtract => lhs.checked_sub(rhs),
            Operation::Multiply => lhs.checked_mul(rhs),
            Operation::Divide => {
                assert!(!rhs.is_zero(), "division by a zero term: {lhs} / {rhs}");
                lhs.checked_div(rhs)
            }
            Operation::Raise => {
                let power = lhs.to_f64()?.powf(rhs.to_f64()?);
                if power.is_finite() {
                    Decimal::from_f64(power)
                } else {
                    None
                }
            }
            Operation::Equal | Operation::None => {
                panic!("calculate invoked on sentinel operation {self:?}")
            }
        }
    }
}

impl std::str::FromStr for Operation {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(symbol), None) => Operation::from_symbol(symbol),
            _ => Err(SearchError::InvalidSymbol(s.to_string())),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "*",
            Operation::Divide => "/",
            Operation::Raise => "^",
            Operation::Equal => "=",
            Operation::None => " ",
        };
        f.write_str(symbol)
    }
}
