use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unauthorized: only {role} can perform this action")]
    Unauthorized { role: String },

    #[error("invalid pubkey length: {len} (expected 33 bytes)")]
    InvalidPubkey { len: usize },

    #[error("signer has no registered pubkey")]
    SignerNotRegistered,

    #[error("signature does not match request")]
    SignatureMismatch,
}
