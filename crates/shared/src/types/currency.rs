//! Currency descriptors backed by a static ISO 4217 catalog.
//!
//! A [`Currency`] is a cheap `Copy` handle to immutable reference data.
//! Equality, ordering and hashing consider the ISO code only.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{MoneyError, MoneyResult};

/// Reference data describing one currency.
#[derive(Debug)]
pub struct CurrencyInfo {
    /// ISO 4217 code, upper case.
    pub code: &'static str,
    /// English name.
    pub name: &'static str,
    /// Number of subunits in one major unit (100 for cents).
    pub subunit_ratio: u32,
    /// Smallest cash denomination in subunits, when the currency defines one.
    pub smallest_denomination: Option<u32>,
}

/// Handle to a catalog currency.
#[derive(Clone, Copy)]
pub struct Currency(&'static CurrencyInfo);

/// Generates the catalog constants and the lookup table.
macro_rules! currencies {
    ($($code:ident => ($name:expr, $ratio:expr, $smallest:expr)),+ $(,)?) => {
        impl Currency {
            $(
                #[doc = $name]
                pub const $code: Currency = Currency(&CurrencyInfo {
                    code: stringify!($code),
                    name: $name,
                    subunit_ratio: $ratio,
                    smallest_denomination: $smallest,
                });
            )+
        }

        const CATALOG: &[Currency] = &[$(Currency::$code),+];
    };
}

currencies! {
    USD => ("United States Dollar", 100, Some(1)),
    EUR => ("Euro", 100, Some(1)),
    GBP => ("British Pound", 100, Some(1)),
    JPY => ("Japanese Yen", 1, Some(1)),
    CHF => ("Swiss Franc", 100, Some(5)),
    CAD => ("Canadian Dollar", 100, Some(5)),
    AUD => ("Australian Dollar", 100, Some(5)),
    NZD => ("New Zealand Dollar", 100, Some(10)),
    SEK => ("Swedish Krona", 100, Some(100)),
    NOK => ("Norwegian Krone", 100, Some(100)),
    DKK => ("Danish Krone", 100, Some(50)),
    HKD => ("Hong Kong Dollar", 100, Some(10)),
    SGD => ("Singapore Dollar", 100, Some(1)),
    CNY => ("Chinese Renminbi Yuan", 100, Some(1)),
    INR => ("Indian Rupee", 100, Some(50)),
    IDR => ("Indonesian Rupiah", 100, Some(5000)),
    BRL => ("Brazilian Real", 100, Some(5)),
    MXN => ("Mexican Peso", 100, Some(5)),
    ZAR => ("South African Rand", 100, Some(10)),
    KRW => ("South Korean Won", 1, Some(1)),
    BHD => ("Bahraini Dinar", 1000, Some(5)),
    KWD => ("Kuwaiti Dinar", 1000, Some(5)),
    MGA => ("Malagasy Ariary", 5, Some(1)),
    MRU => ("Mauritanian Ouguiya", 5, Some(1)),
    XTS => ("Codes specifically reserved for testing purposes", 100, None),
}

impl Currency {
    /// Looks up a currency by code, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn find(code: &str) -> Option<Self> {
        let code = code.trim();
        CATALOG
            .iter()
            .copied()
            .find(|c| c.0.code.eq_ignore_ascii_case(code))
    }

    /// Normalizes a code into a catalog currency.
    ///
    /// # Errors
    ///
    /// Returns a validation error for codes the catalog does not know.
    pub fn wrap(code: impl AsRef<str>) -> MoneyResult<Self> {
        let code = code.as_ref();
        Self::find(code).ok_or_else(|| MoneyError::validation(format!("Unknown currency '{code}'")))
    }

    /// Iterates over every catalog currency.
    pub fn all() -> impl Iterator<Item = Self> {
        CATALOG.iter().copied()
    }

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.0.code
    }

    /// English name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.0.name
    }

    /// Subunits per major unit.
    #[must_use]
    pub const fn subunit_ratio(&self) -> u32 {
        self.0.subunit_ratio
    }

    /// Subunit ratio as a `Decimal`, for arithmetic.
    #[must_use]
    pub fn subunit_ratio_decimal(&self) -> Decimal {
        Decimal::from(self.0.subunit_ratio)
    }

    /// Number of decimal places needed to express one subunit.
    ///
    /// Non-decimal ratios round up, so a ratio of 5 needs one place.
    #[must_use]
    pub const fn decimal_places(&self) -> u32 {
        let mut places = 0;
        let mut power = 1u64;
        while power < self.0.subunit_ratio as u64 {
            power *= 10;
            places += 1;
        }
        places
    }

    /// Smallest cash denomination in subunits.
    #[must_use]
    pub const fn smallest_denomination(&self) -> Option<u32> {
        self.0.smallest_denomination
    }
}

impl PartialEq for Currency {
    fn eq(&self, other: &Self) -> bool {
        self.0.code == other.0.code
    }
}

impl Eq for Currency {}

impl Hash for Currency {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.code.hash(state);
    }
}

impl PartialOrd for Currency {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Currency {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.code.cmp(other.0.code)
    }
}

impl fmt::Debug for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Currency({})", self.0.code)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.code)
    }
}

impl FromStr for Currency {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::wrap(s)
    }
}

impl TryFrom<&str> for Currency {
    type Error = MoneyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::wrap(value)
    }
}

impl Serialize for Currency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0.code)
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Self::wrap(&code).map_err(serde::de::Error::custom)
    }
}
