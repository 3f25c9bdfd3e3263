use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unauthorized: only {role} can perform this action")]
    Unauthorized { role: String },

    #[error("unknown lootbox: {lootbox_id}")]
    LootboxNotFound { lootbox_id: u64 },

    #[error("no available stock")]
    NoStock,

    #[error("payment method not available: {token}")]
    PaymentMethodUnavailable { token: String },

    #[error("not enough funds transferred")]
    InsufficientFunds,

    #[error("wrong payment denom: {denom}")]
    WrongDenom { denom: String },

    #[error("invalid meta-sale signature")]
    InvalidSigner,

    #[error("invalid pubkey length: {len} (expected 33 bytes)")]
    InvalidPubkey { len: usize },

    #[error("invalid content hash length: {len} (expected 32 bytes)")]
    InvalidHashLength { len: usize },

    #[error("unexpected funds sent with this message")]
    UnexpectedFunds,
}
