//! Decimal price representation and the feed's currency coercion rules.
//!
//! Feed prices arrive as free-form strings (`"1.50"`, `"$2"`, `" $ 3.25 "`).
//! [`Price::parse`] is the one place where such strings become numbers;
//! every consumer (filtering, cart, formatting) goes through it.
//!
//! # Coercion policy
//!
//! 1. Trim surrounding whitespace.
//! 2. Strip any leading run of non-numeric symbols (currency signs, `US$`).
//! 3. Read the longest leading number (optional sign, digits, fraction,
//!    exponent) and ignore whatever follows it, so `"1.50 USD"` is `1.50`
//!    and `"1e3"` is `1000`.
//!
//! Input with no leading number, a negative amount, or an amount above
//! [`Price::MAX_WHOLE_UNITS`] is a [`CoercionError`]. Callers treat the
//! error as "no numeric value" rather than propagating it.

use core::fmt;
use core::iter::Sum;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors produced when a feed string cannot be coerced into a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CoercionError {
    /// Nothing numeric was left after stripping symbols.
    #[error("price is empty")]
    Empty,
    /// The remaining text is not a decimal number.
    #[error("price {input:?} is not a number")]
    NotNumeric {
        /// The original input.
        input: String,
    },
    /// Prices are non-negative.
    #[error("price {input:?} is negative")]
    Negative {
        /// The original input.
        input: String,
    },
    /// The amount is above [`Price::MAX_WHOLE_UNITS`].
    #[error("price {input:?} is too large")]
    TooLarge {
        /// The original input.
        input: String,
    },
}

/// An amount in the shop's single currency.
///
/// Amounts coerced from feed text with [`Price::parse`] are never negative
/// and never above [`Price::MAX_WHOLE_UNITS`]. The `Decimal` constructors
/// take the amount as given.
///
/// Arithmetic is exact and saturates instead of overflowing; rounding to two decimal places happens only when the
/// amount is rendered with [`Price::to_fixed`] or `Display`.
///
/// ```
/// use rust_decimal::Decimal;
/// use sheetshop_core::Price;
///
/// let price = Price::parse("$1.50").unwrap();
/// assert_eq!(price.amount(), Decimal::new(150, 2));
/// assert_eq!(price.times(3).to_fixed(), "4.50");
/// assert_eq!(price.to_string(), "$1.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Symbol used when rendering prices.
    pub const SYMBOL: &'static str = "$";

    /// Largest amount, in whole currency units, that feed coercion accepts.
    pub const MAX_WHOLE_UNITS: i64 = 1_000_000_000_000;

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from an amount in cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Coerce a feed string into a price.
    ///
    /// # Errors
    ///
    /// Returns a [`CoercionError`] if nothing follows the leading symbols,
    /// if no number starts there, if the amount is negative, or if it is
    /// above [`Price::MAX_WHOLE_UNITS`].
    pub fn parse(s: &str) -> Result<Self, CoercionError> {
        let amount = Self::parse_amount(s)?;
        Ok(Self(amount))
    }

    /// Coerce a feed string into a raw decimal amount.
    ///
    /// # Errors
    ///
    /// Same as [`Price::parse`].
    pub fn parse_amount(s: &str) -> Result<Decimal, CoercionError> {
        let stripped = strip_leading_symbols(s.trim());
        if stripped.is_empty() {
            return Err(CoercionError::Empty);
        }

        let number = LeadingNumber::scan(stripped).ok_or_else(|| CoercionError::NotNumeric {
            input: s.to_owned(),
        })?;
        let amount = number.to_decimal().ok_or_else(|| CoercionError::TooLarge {
            input: s.to_owned(),
        })?;

        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(CoercionError::Negative {
                input: s.to_owned(),
            });
        }
        if amount > Decimal::from(Self::MAX_WHOLE_UNITS) {
            return Err(CoercionError::TooLarge {
                input: s.to_owned(),
            });
        }

        Ok(amount)
    }

    /// Returns the exact decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns this price multiplied by a quantity.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        self.0
            .checked_mul(Decimal::from(quantity))
            .map_or_else(|| self.saturated(), Self)
    }

    /// Returns the sum of two prices, saturating at the decimal bounds.
    #[must_use]
    pub fn saturating_add(self, other: Self) -> Self {
        self.0
            .checked_add(other.0)
            .map_or_else(|| self.saturated(), Self)
    }

    fn saturated(self) -> Self {
        if self.0.is_sign_negative() {
            Self(Decimal::MIN)
        } else {
            Self(Decimal::MAX)
        }
    }

    /// Render the amount with exactly two decimal places, without symbol.
    ///
    /// Midpoints round away from zero (`0.005` becomes `0.01`).
    #[must_use]
    pub fn to_fixed(&self) -> String {
        let mut rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(2);
        rounded.to_string()
    }
}

/// Strip the leading run of characters that cannot start a number.
fn strip_leading_symbols(s: &str) -> &str {
    s.trim_start_matches(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-'))
        .trim_start()
}

/// Exponents past this are out of range for any non-zero amount.
const MAX_EXPONENT: u32 = 64;

/// The longest number at the start of a string.
#[derive(Debug, PartialEq, Eq)]
struct LeadingNumber<'a> {
    negative: bool,
    integer: &'a str,
    fraction: &'a str,
    exponent: i64,
}

impl<'a> LeadingNumber<'a> {
    /// Returns `None` when the string does not start with at least one digit
    /// (after an optional sign and decimal point).
    fn scan(s: &'a str) -> Option<Self> {
        let (negative, rest) = s
            .strip_prefix('-')
            .map_or((false, s), |rest| (true, rest));

        let (integer, rest) = split_digits(rest);
        let (fraction, rest) = rest
            .strip_prefix('.')
            .map_or(("", rest), split_digits);
        if integer.is_empty() && fraction.is_empty() {
            return None;
        }

        // An exponent without digits ("1e", "2e+") is trailing text.
        let exponent = rest
            .strip_prefix(|c: char| c == 'e' || c == 'E')
            .and_then(|exp| {
                let (sign, exp) = match exp.strip_prefix('-') {
                    Some(exp) => (-1, exp),
                    None => (1, exp.strip_prefix('+').unwrap_or(exp)),
                };
                let (digits, _) = split_digits(exp);
                if digits.is_empty() {
                    return None;
                }
                // Overlong exponents only need to be recognised as huge.
                let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
                Some(sign * magnitude.min(i64::from(MAX_EXPONENT) + 1))
            })
            .unwrap_or(0);

        Some(Self {
            negative,
            integer,
            fraction,
            exponent,
        })
    }

    /// Returns `None` when the value does not fit in a `Decimal`.
    fn to_decimal(&self) -> Option<Decimal> {
        let integer = self.integer.trim_start_matches('0');
        let integer = if integer.is_empty() { "0" } else { integer };
        let mut text = String::with_capacity(integer.len() + self.fraction.len() + 2);
        if self.negative {
            text.push('-');
        }
        text.push_str(integer);
        if !self.fraction.is_empty() {
            text.push('.');
            text.push_str(self.fraction);
        }

        let mut amount = Decimal::from_str(&text).ok()?;
        if amount.is_zero() {
            return Some(amount);
        }
        for _ in 0..self.exponent.unsigned_abs().min(u64::from(MAX_EXPONENT) + 1) {
            amount = if self.exponent > 0 {
                amount.checked_mul(Decimal::TEN)?
            } else {
                amount.checked_div(Decimal::TEN)?
            };
        }
        Some(amount)
    }
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::SYMBOL, self.to_fixed())
    }
}

impl FromStr for Price {
    type Err = CoercionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}
