use crate::amm::AccountRole;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("missing account role {role} at instruction position {position}")]
    MissingRole { role: AccountRole, position: usize },

    #[error("account role {role} references index {index} outside the transaction account list")]
    UnresolvedAccount { role: AccountRole, index: usize },

    #[error("truncated payload: expected at least {expected} bytes, got {actual}")]
    TruncatedPayload { expected: usize, actual: usize },

    #[error("amount {amount} does not fit in an unsigned 64-bit integer")]
    AmountOverflow { amount: u128 },

    #[error("invalid or missing field: {field}")]
    InvalidField { field: String },

    #[error("unexpected instruction opcode {opcode}")]
    UnexpectedOpcode { opcode: u8 },

    #[error("invalid amount: {reason}")]
    InvalidAmount { reason: String },

    #[error("parse error: {reason}")]
    Parse { reason: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("base64 error: {0}")]
    Base64(#[from] base64::DecodeError),
}
