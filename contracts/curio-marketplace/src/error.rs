use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unauthorized: only {role} can perform this action")]
    Unauthorized { role: String },

    #[error("caller does not own or control this offer")]
    InvalidSender,

    #[error("an offer already exists for item {token_id}")]
    OfferAlreadyExists { token_id: u64 },

    #[error("no live offer for item {token_id}")]
    OfferNotFound { token_id: u64 },

    #[error("rent duration must be positive")]
    ZeroDuration,

    #[error("item is currently rented")]
    AlreadyRented,

    #[error("payment method not available: {token}")]
    PaymentMethodUnavailable { token: String },

    #[error("not enough funds transferred")]
    InsufficientFunds,

    #[error("wrong payment denom: {denom}")]
    WrongDenom { denom: String },

    #[error("commission {bps} exceeds 10000 basis points")]
    InvalidCommission { bps: u16 },

    #[error("unexpected funds sent with this message")]
    UnexpectedFunds,
}
