use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unauthorized: only {role} can perform this action")]
    Unauthorized { role: String },

    #[error("content hash already registered")]
    DuplicateContent,

    #[error("unknown item: {token_id}")]
    UnknownItem { token_id: u64 },

    #[error("transfer not allowed by policy")]
    PolicyDenied,

    #[error("invalid content hash length: {len} (expected 32 bytes)")]
    InvalidHashLength { len: usize },

    #[error("batch mint list is empty")]
    EmptyBatch,

    #[error("batch mint exceeds maximum of {max} items")]
    BatchTooLarge { max: u32 },

    #[error("unexpected funds sent with this message")]
    UnexpectedFunds,
}
