use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};

/// Monetary amount represented as **integer minor units** (BRL cents).
///
/// Use this type for **all** monetary values (cart amounts, flat split
/// shares, validation targets) to avoid floating-point drift.
///
/// Values produced by the parsers are never negative and never
/// fractional: a parse is always `round(major * 100)` computed on the
/// digit string itself.
///
/// # Examples
///
/// ```rust
/// use engine::Money;
///
/// assert_eq!(Money::parse_brl("1.234,56").minor(), 123_456);
/// assert_eq!(Money::new(123_456).format(), "1.234,56");
/// ```
///
/// Parsing is fail-open: this feeds a live input field, so malformed
/// text degrades to zero instead of erroring.
///
/// ```rust
/// use engine::Money;
///
/// assert_eq!(Money::parse_brl("abc"), Money::ZERO);
/// assert_eq!(Money::parse_brl(""), Money::ZERO);
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from integer minor units.
    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Returns the raw value in minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Parses free-form pt-BR currency text into minor units.
    ///
    /// Everything except digits, `,` and `.` is stripped; `,` is the
    /// decimal separator and `.` groups thousands. Fractions beyond
    /// two digits round half away from zero. Unparsable input (and
    /// anything that would overflow) yields [`Money::ZERO`].
    #[must_use]
    pub fn parse_brl(raw: &str) -> Self {
        let filtered: String = raw
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
            .collect();
        if filtered.is_empty() {
            return Self::ZERO;
        }

        // Split on the last comma; periods are grouping only.
        let (major_raw, frac_raw) = match filtered.rfind(',') {
            Some(pos) => (&filtered[..pos], &filtered[pos + 1..]),
            None => (filtered.as_str(), ""),
        };

        let major_digits: String = major_raw.chars().filter(char::is_ascii_digit).collect();
        let frac_digits: String = frac_raw.chars().filter(char::is_ascii_digit).collect();

        let major: i64 = if major_digits.is_empty() {
            0
        } else {
            match major_digits.parse() {
                Ok(value) => value,
                Err(_) => return Self::ZERO,
            }
        };

        let mut cents: i64 = 0;
        let mut digits = frac_digits.chars();
        for _ in 0..2 {
            let digit = digits.next().and_then(|c| c.to_digit(10)).unwrap_or(0);
            cents = cents * 10 + i64::from(digit);
        }
        // Round half away from zero on the third fractional digit.
        if let Some(digit) = digits.next().and_then(|c| c.to_digit(10))
            && digit >= 5
        {
            cents += 1;
        }

        match major.checked_mul(100).and_then(|v| v.checked_add(cents)) {
            Some(total) => Self(total),
            None => Self::ZERO,
        }
    }

    /// Parses keypad-style input where the digits **are** the minor
    /// units: typing `486` means `4,86`. Non-digits are discarded;
    /// empty or invalid input yields [`Money::ZERO`].
    #[must_use]
    pub fn parse_minor_digits(raw: &str) -> Self {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return Self::ZERO;
        }
        match digits.parse() {
            Ok(minor) => Self(minor),
            Err(_) => Self::ZERO,
        }
    }

    /// Formats as bare pt-BR text with two decimals and thousands
    /// grouping: `123456` becomes `1.234,56`. Used for live-editing
    /// mirrors.
    #[must_use]
    pub fn format(self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let major = abs / 100;
        let cents = abs % 100;

        let digits = major.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }

        format!("{sign}{grouped},{cents:02}")
    }

    /// Formats with the currency symbol, for user-facing messages:
    /// `123456` becomes `R$ 1.234,56`.
    #[must_use]
    pub fn format_symbol(self) -> String {
        format!("R$ {}", self.format())
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_brl_handles_grouping_and_decimals() {
        assert_eq!(Money::parse_brl("1.234,56").minor(), 123_456);
        assert_eq!(Money::parse_brl("1234,56").minor(), 123_456);
        assert_eq!(Money::parse_brl("100").minor(), 10_000);
        assert_eq!(Money::parse_brl("0,5").minor(), 50);
        assert_eq!(Money::parse_brl("R$ 2,30").minor(), 230);
    }

    #[test]
    fn parse_brl_degrades_to_zero() {
        assert_eq!(Money::parse_brl(""), Money::ZERO);
        assert_eq!(Money::parse_brl("abc"), Money::ZERO);
        assert_eq!(Money::parse_brl("-"), Money::ZERO);
        // Sign characters are stripped, so a negative never parses.
        assert_eq!(Money::parse_brl("-10,00").minor(), 1000);
    }

    #[test]
    fn parse_brl_rounds_half_away_from_zero() {
        assert_eq!(Money::parse_brl("0,125").minor(), 13);
        assert_eq!(Money::parse_brl("0,124").minor(), 12);
        assert_eq!(Money::parse_brl("0,999").minor(), 100);
    }

    #[test]
    fn parse_minor_digits_reads_cents() {
        assert_eq!(Money::parse_minor_digits("486").minor(), 486);
        assert_eq!(Money::parse_minor_digits("4,86").minor(), 486);
        assert_eq!(Money::parse_minor_digits("").minor(), 0);
        assert_eq!(Money::parse_minor_digits("x").minor(), 0);
    }

    #[test]
    fn format_groups_thousands() {
        assert_eq!(Money::new(0).format(), "0,00");
        assert_eq!(Money::new(1).format(), "0,01");
        assert_eq!(Money::new(123_456).format(), "1.234,56");
        assert_eq!(Money::new(100_000_000).format(), "1.000.000,00");
        assert_eq!(Money::new(123_456).format_symbol(), "R$ 1.234,56");
    }

    #[test]
    fn parse_format_round_trips() {
        for minor in [0i64, 1, 99, 100, 486, 10_000, 123_456, 987_654_321] {
            let text = Money::new(minor).format();
            assert_eq!(Money::parse_brl(&text).minor(), minor, "text {text}");
        }
    }
}
