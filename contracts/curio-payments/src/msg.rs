use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;

use crate::state::PaymentMethod;

#[cw_serde]
pub struct InstantiateMsg {
    pub admin: String,
    pub oracle: String,
    pub forwarder: String,
    /// Initial method table as parallel arrays (all four must share a length)
    pub tokens: Vec<String>,
    pub prices: Vec<Uint128>,
    pub decimals: Vec<u8>,
    pub discounts: Vec<Uint128>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Register a new accepted token (admin only)
    AddPaymentMethod {
        token: String,
        price: Uint128,
        decimals: u8,
        discount: Uint128,
    },
    /// Batch registration; all-or-nothing (admin only)
    AddPaymentMethods {
        tokens: Vec<String>,
        prices: Vec<Uint128>,
        decimals: Vec<u8>,
        discounts: Vec<Uint128>,
    },
    /// Update price and discount of a known token (oracle only)
    UpdatePaymentMethod {
        token: String,
        price: Uint128,
        discount: Uint128,
    },
    /// Enable or disable a known token (admin only)
    UpdatePaymentMethodStatus {
        token: String,
        enabled: bool,
    },
    /// Logical removal: the record stays, flagged unavailable (admin only)
    RemovePaymentMethodStatus {
        token: String,
    },
    /// Update the trusted relay contract (admin only)
    UpdateForwarder {
        forwarder: String,
    },
    /// Forwarder-only: re-dispatch `msg` as if sent by `sender`
    Relay {
        sender: String,
        msg: cosmwasm_std::Binary,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(crate::state::Config)]
    Config {},
    /// True iff the token is known and enabled
    #[returns(PaymentMethodAvailableResponse)]
    PaymentMethodAvailable { token: String },
    /// Full pricing record; errors unless known and enabled
    #[returns(PaymentMethodResponse)]
    PaymentMethod { token: String },
    /// Token amount owed for a reference amount; errors unless known and enabled
    #[returns(CostResponse)]
    Cost {
        token: String,
        reference_amount: Uint128,
    },
    /// Paginated listing of every record, enabled or not
    #[returns(PaymentMethodsResponse)]
    PaymentMethods {
        start_after: Option<String>,
        limit: Option<u32>,
    },
}

#[cw_serde]
pub struct PaymentMethodAvailableResponse {
    pub available: bool,
}

#[cw_serde]
pub struct PaymentMethodResponse {
    pub token: String,
    pub price: Uint128,
    pub decimals: u8,
    pub discount: Uint128,
    pub enabled: bool,
}

#[cw_serde]
pub struct CostResponse {
    pub token: String,
    pub reference_amount: Uint128,
    pub amount: Uint128,
}

#[cw_serde]
pub struct PaymentMethodEntry {
    pub token: String,
    pub method: PaymentMethod,
}

#[cw_serde]
pub struct PaymentMethodsResponse {
    pub methods: Vec<PaymentMethodEntry>,
}

#[cw_serde]
pub struct MigrateMsg {}
