//! Money error types.

use thiserror::Error;

/// Result type alias using `MoneyError`.
pub type MoneyResult<T> = Result<T, MoneyError>;

/// Errors raised by money arithmetic, allocation, and exchange.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// Malformed input: bad allocation parts, non-finite amounts, unknown
    /// rounding modes or currency codes, non-positive rates, zero divisors.
    #[error("Validation error: {0}")]
    Validation(String),

    /// No rate is registered for the directed currency pair.
    #[error("No conversion rate known for '{from}' -> '{to}'")]
    UnknownRate {
        /// Source currency code.
        from: String,
        /// Target currency code.
        to: String,
    },

    /// The bank refuses to convert between currencies.
    #[error("No exchanging of currencies allowed: {from} to {to}")]
    DifferentCurrency {
        /// Source currency code.
        from: String,
        /// Target currency code.
        to: String,
    },

    /// Operand of an unsupported type.
    #[error("Type error: {0}")]
    Type(String),

    /// Cash rounding requested for a currency without a smallest denomination.
    #[error("Smallest denomination of {0} is not defined")]
    UndefinedDenomination(String),
}

impl MoneyError {
    /// Shorthand for a [`MoneyError::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Shorthand for a [`MoneyError::Type`].
    pub fn type_error(message: impl Into<String>) -> Self {
        Self::Type(message.into())
    }

    /// Returns the error code for machine-readable output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::UnknownRate { .. } => "UNKNOWN_RATE",
            Self::DifferentCurrency { .. } => "DIFFERENT_CURRENCY",
            Self::Type(_) => "TYPE_ERROR",
            Self::UndefinedDenomination(_) => "UNDEFINED_DENOMINATION",
        }
    }

    /// Returns true for business conditions a caller is expected to handle.
    ///
    /// Validation and type errors are programming mistakes and are not
    /// recoverable.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::UnknownRate { .. } | Self::DifferentCurrency { .. })
    }
}
