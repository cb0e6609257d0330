use crate::types::errors::AccountNumberError;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub const MAX_ACCOUNT_NUMBER_LENGTH: usize = 15;

/// A debit account number as accepted by the fraud-detection API.
///
/// The value is trimmed, must not be empty and is capped at
/// [`MAX_ACCOUNT_NUMBER_LENGTH`] characters. No further format is imposed since
/// the API treats it as an opaque string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AccountNumber(String);

impl AccountNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for AccountNumber {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl FromStr for AccountNumber {
    type Err = AccountNumberError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.is_empty() {
            return Err(AccountNumberError::Empty);
        }

        let length = value.chars().count();

        if length > MAX_ACCOUNT_NUMBER_LENGTH {
            return Err(AccountNumberError::TooLong { length, max: MAX_ACCOUNT_NUMBER_LENGTH });
        }

        Ok(AccountNumber(value.to_string()))
    }
}

impl<'de> Deserialize<'de> for AccountNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        AccountNumber::from_str(&value).map_err(de::Error::custom)
    }
}
