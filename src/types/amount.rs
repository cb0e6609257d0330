use crate::types::errors::AmountError;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const MAX_FRACTION_DIGITS: u32 = 3;
const GROUP_SEPARATOR: char = '.';
const DECIMAL_SEPARATOR: char = ',';

/// A transaction amount.
///
/// Stored as an exact decimal and displayed with Indonesian grouping, e.g.
/// `1.234.567,5`. At most three fraction digits are shown. Serialized as a
/// decimal string so no precision is lost on the way to a renderer.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
pub struct Amount(Decimal);

impl Amount {
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl Display for Amount {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let value = self.0.round_dp(MAX_FRACTION_DIGITS).normalize();
        let sign = if value.is_sign_negative() && !value.is_zero() { "-" } else { "" };
        let digits = value.abs().to_string();

        let (integer, fraction) = match digits.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (digits.as_str(), None)
        };

        write!(formatter, "{}{}", sign, group_thousands(integer))?;

        if let Some(fraction) = fraction {
            write!(formatter, "{}{}", DECIMAL_SEPARATOR, fraction)?;
        }

        Ok(())
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(digit);
    }

    grouped
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        //NOTE: Large JSON floats print in exponent form, e.g. `1.25e16`
        let decimal = Decimal::from_str(value).or_else(|error| Decimal::from_scientific(value).map_err(|_| error))?;

        Ok(Amount(decimal))
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        //NOTE: The API sends plain JSON numbers, saved responses sometimes carry strings. Decimal accepts both.
        <Decimal as Deserialize>::deserialize(deserializer).map(Amount)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        //NOTE: Written as the exact decimal string
        <Decimal as Serialize>::serialize(&self.0, serializer)
    }
}
