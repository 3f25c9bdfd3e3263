use cosmwasm_schema::{cw_serde, QueryResponses};

#[cw_serde]
pub struct InstantiateMsg {
    /// Contract admin address
    pub admin: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Add or remove an account from the blacklist (admin only)
    SetBlacklistForAccount {
        account: String,
        blacklisted: bool,
    },
    /// Register or unregister a core contract (admin only).
    /// Core contracts bypass per-holder operator restrictions.
    SetCoreContract {
        contract: String,
        enabled: bool,
    },
    /// Hand the admin role to another account (admin only)
    UpdateAdmin {
        admin: String,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(crate::state::Config)]
    Config {},
    /// The single predicate consulted before any balance-changing transfer.
    /// `from`/`to` are absent for mints and burns respectively.
    #[returns(CanTransferResponse)]
    CanTransfer {
        operator: String,
        from: Option<String>,
        to: Option<String>,
        token_id: u64,
    },
    #[returns(BlacklistedResponse)]
    Blacklisted { account: String },
    #[returns(CoreContractResponse)]
    CoreContract { contract: String },
}

#[cw_serde]
pub struct CanTransferResponse {
    pub allowed: bool,
}

#[cw_serde]
pub struct BlacklistedResponse {
    pub blacklisted: bool,
}

#[cw_serde]
pub struct CoreContractResponse {
    pub enabled: bool,
}

#[cw_serde]
pub struct MigrateMsg {}
