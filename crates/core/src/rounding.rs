//! Rounding mode context.
//!
//! Every time a precise decimal is narrowed to a representable amount, the
//! ambient rounding mode decides how. The ambient mode is the innermost
//! [`with_rounding_mode`] override on the current thread, falling back to the
//! process default (round half away from zero unless reconfigured).

use std::cell::RefCell;
use std::fmt;
use std::str::FromStr;
use std::sync::{PoisonError, RwLock};

use coinage_shared::MoneyError;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::context::{current_override, with_override};

/// Rule used to narrow a decimal to a fixed number of places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoundingMode {
    /// Round half away from zero (2.5 -> 3, -2.5 -> -3).
    #[default]
    HalfUp,
    /// Round half toward zero (2.5 -> 2).
    HalfDown,
    /// Banker's rounding (2.5 -> 2, 3.5 -> 4).
    HalfEven,
    /// Away from zero.
    Up,
    /// Toward zero (truncate).
    Down,
    /// Toward positive infinity.
    Ceiling,
    /// Toward negative infinity.
    Floor,
}

impl RoundingMode {
    /// All modes, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::HalfUp,
        Self::HalfDown,
        Self::HalfEven,
        Self::Up,
        Self::Down,
        Self::Ceiling,
        Self::Floor,
    ];

    /// The matching `rust_decimal` strategy.
    #[must_use]
    pub const fn strategy(self) -> RoundingStrategy {
        match self {
            Self::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            Self::HalfDown => RoundingStrategy::MidpointTowardZero,
            Self::HalfEven => RoundingStrategy::MidpointNearestEven,
            Self::Up => RoundingStrategy::AwayFromZero,
            Self::Down => RoundingStrategy::ToZero,
            Self::Ceiling => RoundingStrategy::ToPositiveInfinity,
            Self::Floor => RoundingStrategy::ToNegativeInfinity,
        }
    }

    /// Rounds `value` to `places` decimal places with this mode.
    #[must_use]
    pub fn apply(self, value: Decimal, places: u32) -> Decimal {
        value.round_dp_with_strategy(places, self.strategy())
    }

    /// Canonical snake_case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::HalfUp => "half_up",
            Self::HalfDown => "half_down",
            Self::HalfEven => "half_even",
            Self::Up => "up",
            Self::Down => "down",
            Self::Ceiling => "ceiling",
            Self::Floor => "floor",
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RoundingMode {
    type Err = MoneyError;

    /// Accepts `half_up`, `half-up`, `HALF_UP` and `ROUND_HALF_UP` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        let normalized = normalized.strip_prefix("round_").unwrap_or(&normalized);

        Self::ALL
            .into_iter()
            .find(|mode| mode.name() == normalized)
            .ok_or_else(|| MoneyError::validation(format!("Invalid rounding mode '{s}'")))
    }
}

static DEFAULT_MODE: RwLock<RoundingMode> = RwLock::new(RoundingMode::HalfUp);

thread_local! {
    static OVERRIDES: RefCell<Vec<RoundingMode>> = const { RefCell::new(Vec::new()) };
}

/// The rounding mode in effect on the current thread.
#[must_use]
pub fn rounding_mode() -> RoundingMode {
    current_override(&OVERRIDES).unwrap_or_else(default_rounding_mode)
}

/// The process-wide fallback mode.
#[must_use]
pub fn default_rounding_mode() -> RoundingMode {
    *DEFAULT_MODE.read().unwrap_or_else(PoisonError::into_inner)
}

/// Replaces the process-wide fallback mode.
///
/// Threads inside a [`with_rounding_mode`] scope keep their override.
pub fn set_default_rounding_mode(mode: RoundingMode) {
    *DEFAULT_MODE.write().unwrap_or_else(PoisonError::into_inner) = mode;
    tracing::debug!(mode = %mode, "Default rounding mode changed");
}

/// Runs `f` with `mode` as the current thread's rounding mode.
///
/// The previous mode is restored when `f` returns or unwinds. Other threads
/// never observe the override.
///
/// # Example
///
/// ```
/// use coinage_core::rounding::{rounding_mode, with_rounding_mode, RoundingMode};
///
/// let inside = with_rounding_mode(RoundingMode::Floor, rounding_mode);
/// assert_eq!(inside, RoundingMode::Floor);
/// ```
pub fn with_rounding_mode<R>(mode: RoundingMode, f: impl FnOnce() -> R) -> R {
    with_override(&OVERRIDES, mode, f)
}
