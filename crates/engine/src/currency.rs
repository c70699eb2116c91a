use serde::{Deserialize, Serialize};

use crate::EngineError;

/// ISO-like currency code used to display money values.
///
/// Items store plain minor units (see `Money`); the currency is a setting of
/// the engine and only matters when amounts are rendered for humans.
///
/// ## Minor units
///
/// `minor_units()` returns how many decimal digits are used when converting
/// between:
/// - major units (human input/output, e.g. `10.50 THB`)
/// - minor units (stored integers, e.g. `1050`)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Thb,
    Eur,
    Usd,
}

impl Currency {
    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Thb => "THB",
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
        }
    }

    /// Symbol placed in front of formatted amounts.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Currency::Thb => "฿",
            Currency::Eur => "€",
            Currency::Usd => "$",
        }
    }

    /// Number of fraction digits used when formatting/parsing amounts.
    #[must_use]
    pub const fn minor_units(self) -> u8 {
        match self {
            Currency::Thb | Currency::Eur | Currency::Usd => 2,
        }
    }

    /// Formats an amount expressed in minor units.
    ///
    /// `fraction_digits` defaults to [`Currency::minor_units`]. The output uses
    /// `,` as thousands separator and `.` as decimal point, with the sign in
    /// front of the symbol.
    ///
    /// ```rust
    /// use engine::Currency;
    ///
    /// assert_eq!(Currency::Thb.format(123_456.0, None), "฿1,234.56");
    /// assert_eq!(Currency::Thb.format(-15_000.0, Some(0)), "-฿150");
    /// ```
    #[must_use]
    pub fn format(self, amount_minor: f64, fraction_digits: Option<u8>) -> String {
        let digits = usize::from(fraction_digits.unwrap_or(self.minor_units()));
        let amount_minor = if amount_minor.is_finite() {
            amount_minor
        } else {
            0.0
        };
        let major = amount_minor / 10f64.powi(i32::from(self.minor_units()));
        let rendered = format!("{:.*}", digits, major.abs());

        let (int_part, frac_part) = match rendered.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (rendered.as_str(), None),
        };

        let is_zero = !rendered.bytes().any(|b| b.is_ascii_digit() && b != b'0');
        let sign = if major < 0.0 && !is_zero { "-" } else { "" };

        let mut out = format!("{sign}{}{}", self.symbol(), group_thousands(int_part));
        if let Some(frac) = frac_part {
            out.push('.');
            out.push_str(frac);
        }
        out
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "THB" => Ok(Currency::Thb),
            "EUR" => Ok(Currency::Eur),
            "USD" => Ok(Currency::Usd),
            other => Err(EngineError::UnsupportedCurrency(other.to_string())),
        }
    }
}
