//! Error kinds for invalid seed configurations.

use thiserror::Error;

/// Rejected loader input.
///
/// The engine itself cannot fail on a valid grid, so this is the only error
/// surface of the library. Nothing is clamped: a seed that does not fit the
/// declared field is refused outright.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Width or height is zero or negative.
    #[error("field dimensions must be positive, got {width}x{height}")]
    NonPositiveDimension {
        /// Declared width.
        width: i64,
        /// Declared height.
        height: i64,
    },

    /// A seed coordinate lies outside `[0, height) x [0, width)`.
    #[error("cell ({row}, {col}) is outside the {width}x{height} field")]
    CellOutOfBounds {
        /// Row of the offending cell.
        row: i64,
        /// Column of the offending cell.
        col: i64,
        /// Declared width.
        width: usize,
        /// Declared height.
        height: usize,
    },

    /// The generation count is negative.
    #[error("generation count must be non-negative, got {0}")]
    NegativeGenerations(i64),

    /// The seed text could not be parsed.
    #[error("line {line}: {message}")]
    Syntax {
        /// 1-based line number in the seed text.
        line: usize,
        /// What went wrong.
        message: String,
    },
}

impl ConfigError {
    pub(crate) fn syntax(line: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            message: message.into(),
        }
    }
}
