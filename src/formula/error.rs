//! Error types for the formula layer.
//!
//! Parsing atoms and serializing nodes never fail: unknown tokens become
//! error nodes. The fallible surfaces are the LaTeX-to-atom adapter and the
//! loading of serialization options.
use thiserror::Error;

/// Errors raised while turning LaTeX text into atoms.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AtomError {
    /// Input ended while a construct was still open
    #[error("unexpected end of input at byte {0}")]
    UnexpectedEnd(usize),

    /// A `{` was never closed
    #[error("unbalanced brace opened at byte {0}")]
    UnbalancedBrace(usize),

    /// A `}` appeared without a matching `{`
    #[error("unexpected closing brace at byte {0}")]
    UnexpectedClosingBrace(usize),

    /// A command that takes arguments was not followed by them
    #[error("missing argument for \\{command} at byte {pos}")]
    MissingArgument { command: String, pos: usize },

    /// `\right` or `\middle` outside a `\left` group
    #[error("\\{0} without a matching \\left")]
    UnmatchedRight(String),

    /// `\left` or `\right` not followed by a delimiter
    #[error("missing delimiter after \\{command} at byte {pos}")]
    MissingDelimiter { command: String, pos: usize },
}

/// Errors raised while building or loading serialization options.
#[derive(Error, Debug)]
pub enum OptionsError {
    /// Notation name not one of `auto`, `engineering`, `on`
    #[error("unknown scientific notation mode: {0}")]
    UnknownNotation(String),

    /// Precision must allow at least one significant digit
    #[error("precision must be at least 1")]
    ZeroPrecision,

    /// YAML decoding failed
    #[error("invalid options document: {0}")]
    Yaml(String),
}

/// Error wrapping every fallible formula operation.
#[derive(Error, Debug)]
pub enum FormulaError {
    #[error("atom error: {0}")]
    Atom(#[from] AtomError),

    #[error("options error: {0}")]
    Options(#[from] OptionsError),
}

/// Result type for formula operations.
pub type Result<T> = std::result::Result<T, FormulaError>;
