use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountNumberError {
    #[error("Account number error: Value is empty")]
    Empty,
    #[error("Account number error: Value has {length} characters, at most {max} are allowed")]
    TooLong {
        length: usize,
        max: usize
    }
}

#[derive(Debug, Error)]
pub enum AmountError {
    #[error("Amount error: {0}")]
    InvalidFormat(#[from] rust_decimal::Error)
}
