//! Error types for infranet
//!
//! Every failure a command can hit is detected before the network is touched,
//! so these errors always describe an operation that had no effect.

use thiserror::Error;

/// Main error type for network bookkeeping
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// A city token (index or name) matched nothing
    #[error("City not found: {0}")]
    CityNotFound(String),

    /// Both endpoints of a road are the same city
    #[error("Cannot create road between the same city ({index})")]
    SelfLoop { index: usize },

    /// The pair already has a road
    #[error("Road already exists between cities {a} and {b}")]
    AlreadyConnected { a: usize, b: usize },

    /// Budget assignment on a pair with no road
    #[error("No road exists between cities {a} and {b}")]
    NotConnected { a: usize, b: usize },

    /// Total city count would pass the configured limit
    #[error("City capacity reached: {current} of {max} cities registered")]
    CapacityExceeded { current: usize, max: usize },

    /// Budget is negative or not a finite number
    #[error("Invalid budget amount: {0}")]
    InvalidBudget(f64),

    /// City name failed validation
    #[error("Invalid city name '{name}': {reason}")]
    InvalidCityName { name: String, reason: String },

    /// Index already taken (only reachable while loading)
    #[error("Duplicate city index: {0}")]
    DuplicateIndex(usize),

    /// Index outside `1..=MAX_CITY_INDEX`, or no index left to assign
    #[error("Invalid city index {index}: {reason}")]
    InvalidIndex { index: usize, reason: String },

    /// Operator input ended before Save and Exit
    #[error("Input closed before Save and Exit")]
    InputClosed,

    /// Line editor failure other than EOF/interrupt
    #[error("Input error: {0}")]
    InputError(String),

    /// Persisted file could not be parsed
    #[error("{file}:{line}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for network operations
pub type Result<T> = std::result::Result<T, NetworkError>;
