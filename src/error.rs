//! Error types for partsim.
//!
//! This module provides a unified error type [`PartsError`] for the fallible
//! edges of the crate: trace parsing, part lookup, pin table validation and
//! configuration checks. Interactive control paths never produce errors; they
//! clamp out-of-range input and degrade to no-ops when geometry is missing.

use thiserror::Error;

/// Result type alias using [`PartsError`].
pub type Result<T> = std::result::Result<T, PartsError>;

/// Unified error type for all partsim operations.
#[derive(Error, Debug)]
pub enum PartsError {
    // ============ Trace Parsing Errors ============
    /// Error during lexical analysis
    #[error("Lexer error at line {line}, column {column}: {message}")]
    LexerError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Error during parsing
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Unknown trace command
    #[error("Unknown command '{command}' at line {line}")]
    UnknownCommand { command: String, line: usize },

    /// Unknown key name in a key event
    #[error("Unknown key '{key}' at line {line}")]
    UnknownKey { key: String, line: usize },

    // ============ Part Errors ============
    /// Part name not in the catalog
    #[error("Unknown part '{name}'")]
    UnknownPart { name: String },

    /// Trace did not select a part and none was given
    #[error("No part selected (use '.part <name>' or --part)")]
    MissingPart,

    /// Command needs an interactive control but the part has none
    #[error("Part '{part}' is not interactive (line {line})")]
    NotInteractive { part: String, line: usize },

    /// Value assertion in a trace did not hold
    #[error("Expectation failed at line {line}: expected {expected}, got {actual}")]
    ExpectationFailed {
        line: usize,
        expected: f64,
        actual: f64,
    },

    // ============ Pin Table Errors ============
    /// Two pins share a number
    #[error("Duplicate pin number {number} on '{name}'")]
    DuplicatePinNumber { number: u32, name: String },

    /// Two pins share a name
    #[error("Duplicate pin name '{name}'")]
    DuplicatePinName { name: String },

    /// Pin numbers are 1-based
    #[error("Pin '{name}' has number 0 (pin numbers are 1-based)")]
    ZeroPinNumber { name: String },

    /// Pin carries no signal
    #[error("Pin '{name}' has an empty signal list")]
    EmptySignals { name: String },

    /// Pin coordinate is NaN or infinite
    #[error("Pin '{name}' has a non-finite position ({x}, {y})")]
    InvalidPinPosition { name: String, x: f64, y: f64 },

    // ============ Configuration Errors ============
    /// Value range is empty or inverted
    #[error("Invalid range: min {min} must be less than max {max}")]
    InvalidRange { min: f64, max: f64 },

    /// Step must be positive
    #[error("Invalid step {step}: must be positive and finite")]
    InvalidStep { step: f64 },

    // ============ I/O Errors ============
    /// Error reading a trace file
    #[error("Failed to read trace file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error writing CLI output
    #[error("Output error: {message}")]
    OutputError { message: String },

    /// Pin table serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PartsError {
    /// Create a lexer error
    pub fn lexer(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::LexerError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create an unknown part error
    pub fn unknown_part(name: impl Into<String>) -> Self {
        Self::UnknownPart { name: name.into() }
    }
}
