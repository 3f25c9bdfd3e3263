use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unauthorized: only {role} can perform this action")]
    Unauthorized { role: String },

    #[error("payment method already exists: {token}")]
    PaymentMethodAlreadyExists { token: String },

    #[error("payment method not found: {token}")]
    PaymentMethodNotFound { token: String },

    #[error("payment not found: {token}")]
    PaymentNotFound { token: String },

    #[error("payment status unchanged")]
    PaymentStatusUnchanged,

    #[error("invalid params length")]
    InvalidParamsLength,

    #[error("discount {discount} must be lower than price {price}")]
    DiscountTooHigh { discount: String, price: String },

    #[error("invalid token identifier: {token}")]
    InvalidToken { token: String },

    #[error("arithmetic overflow")]
    Overflow,

    #[error("unexpected funds sent with this message")]
    UnexpectedFunds,
}
