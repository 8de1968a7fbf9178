//! Error types for parameter validation and run control

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// An operator symbol outside `+ - * / ^`
    #[error("Invalid operator symbol: '{0}'. Valid symbols: + - * / ^")]
    InvalidSymbol(String),

    #[error("Invalid search parameters: {0}")]
    InvalidParameters(String),

    /// A run was requested while another one is still active
    #[error("A search run is already active")]
    AlreadyRunning,
}

pub type SearchResult<T> = Result<T, SearchError>;
