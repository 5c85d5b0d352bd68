//! Process defaults with thread-scoped overrides.
//!
//! The default bank, default currency and infinite-precision flag each have a
//! process-wide value plus a per-thread override stack. `with_*` functions
//! push an override for the duration of a closure and pop it on every exit
//! path, so concurrent threads only ever see their own overrides.

use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::thread::LocalKey;

use coinage_shared::config::ConversionPolicy;
use coinage_shared::{Currency, MoneyConfig, MoneyResult};
use once_cell::sync::Lazy;

use crate::exchange::{Bank, SingleCurrencyBank, SnapshotFormat, VariableExchangeBank};
use crate::rounding::{self, RoundingMode};

type Stack<T> = RefCell<Vec<T>>;

/// Pushes `value` onto a thread-local stack while `f` runs.
pub(crate) fn with_override<T: 'static, R>(
    key: &'static LocalKey<Stack<T>>,
    value: T,
    f: impl FnOnce() -> R,
) -> R {
    struct Restore<T: 'static>(&'static LocalKey<Stack<T>>);

    impl<T: 'static> Drop for Restore<T> {
        fn drop(&mut self) {
            self.0.with(|stack| {
                stack.borrow_mut().pop();
            });
        }
    }

    key.with(|stack| stack.borrow_mut().push(value));
    let _restore = Restore(key);
    f()
}

/// Innermost override on the current thread, if any.
pub(crate) fn current_override<T: Clone + 'static>(
    key: &'static LocalKey<Stack<T>>,
) -> Option<T> {
    key.with(|stack| stack.borrow().last().cloned())
}

static DEFAULT_BANK: Lazy<RwLock<Arc<dyn Bank>>> =
    Lazy::new(|| RwLock::new(Arc::new(VariableExchangeBank::new())));

static DEFAULT_CURRENCY: RwLock<Currency> = RwLock::new(Currency::USD);

static INFINITE_PRECISION: AtomicBool = AtomicBool::new(false);

thread_local! {
    static BANK_OVERRIDES: Stack<Arc<dyn Bank>> = const { RefCell::new(Vec::new()) };
    static CURRENCY_OVERRIDES: Stack<Currency> = const { RefCell::new(Vec::new()) };
    static PRECISION_OVERRIDES: Stack<bool> = const { RefCell::new(Vec::new()) };
}

// ============================================================================
// Default bank
// ============================================================================

/// The bank new money binds to on the current thread.
#[must_use]
pub fn default_bank() -> Arc<dyn Bank> {
    current_override(&BANK_OVERRIDES).unwrap_or_else(|| {
        Arc::clone(&DEFAULT_BANK.read().unwrap_or_else(PoisonError::into_inner))
    })
}

/// Replaces the process-wide default bank.
pub fn set_default_bank(bank: Arc<dyn Bank>) {
    tracing::debug!(bank = ?bank, "Default bank changed");
    *DEFAULT_BANK.write().unwrap_or_else(PoisonError::into_inner) = bank;
}

/// Runs `f` with `bank` as the current thread's default bank.
pub fn with_default_bank<R>(bank: Arc<dyn Bank>, f: impl FnOnce() -> R) -> R {
    with_override(&BANK_OVERRIDES, bank, f)
}

/// Makes every cross-currency operation on default-bank money fail.
pub fn disallow_currency_conversion() {
    set_default_bank(Arc::new(SingleCurrencyBank));
}

// ============================================================================
// Default currency
// ============================================================================

/// The currency used when none is given explicitly.
#[must_use]
pub fn default_currency() -> Currency {
    current_override(&CURRENCY_OVERRIDES)
        .unwrap_or_else(|| *DEFAULT_CURRENCY.read().unwrap_or_else(PoisonError::into_inner))
}

/// Replaces the process-wide default currency.
pub fn set_default_currency(currency: Currency) {
    *DEFAULT_CURRENCY.write().unwrap_or_else(PoisonError::into_inner) = currency;
    tracing::debug!(currency = %currency, "Default currency changed");
}

/// Runs `f` with `currency` as the current thread's default currency.
pub fn with_default_currency<R>(currency: Currency, f: impl FnOnce() -> R) -> R {
    with_override(&CURRENCY_OVERRIDES, currency, f)
}

// ============================================================================
// Infinite precision
// ============================================================================

/// Whether money keeps fractional subunits on the current thread.
#[must_use]
pub fn infinite_precision() -> bool {
    current_override(&PRECISION_OVERRIDES)
        .unwrap_or_else(|| INFINITE_PRECISION.load(Ordering::Relaxed))
}

/// Sets the process-wide infinite-precision flag.
pub fn set_infinite_precision(enabled: bool) {
    INFINITE_PRECISION.store(enabled, Ordering::Relaxed);
    tracing::debug!(enabled, "Default infinite precision changed");
}

/// Runs `f` with infinite precision switched on or off for this thread.
pub fn with_infinite_precision<R>(enabled: bool, f: impl FnOnce() -> R) -> R {
    with_override(&PRECISION_OVERRIDES, enabled, f)
}

// ============================================================================
// Configuration
// ============================================================================

/// Applies a loaded configuration to the process defaults.
///
/// `rates` is the text of a JSON rate snapshot to seed into a fresh default
/// bank. Reading it from `config.rates_file` is left to the caller.
///
/// # Errors
///
/// Returns a validation error for an unknown rounding mode or currency, or a
/// malformed snapshot. Nothing is changed when an error is returned.
pub fn configure(config: &MoneyConfig, rates: Option<&str>) -> MoneyResult<()> {
    let mode: RoundingMode = config.rounding_mode.parse()?;
    let currency = Currency::wrap(&config.default_currency)?;

    let bank: Arc<dyn Bank> = match config.conversion {
        ConversionPolicy::Variable => {
            let bank = VariableExchangeBank::new();
            if let Some(rates) = rates {
                bank.import_rates(SnapshotFormat::Json, rates)?;
            }
            Arc::new(bank)
        }
        ConversionPolicy::Disabled => {
            if rates.is_some() {
                tracing::warn!("Currency conversion is disabled, ignoring seeded rates");
            }
            Arc::new(SingleCurrencyBank)
        }
    };

    rounding::set_default_rounding_mode(mode);
    set_default_currency(currency);
    set_infinite_precision(config.infinite_precision);
    set_default_bank(bank);

    tracing::info!(
        currency = %currency,
        rounding_mode = %mode,
        infinite_precision = config.infinite_precision,
        "Money defaults configured"
    );
    Ok(())
}
