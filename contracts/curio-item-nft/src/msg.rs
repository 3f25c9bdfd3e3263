use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Binary, HexBinary, Timestamp};

#[cw_serde]
pub struct InstantiateMsg {
    pub admin: String,
    /// Initial authorized minter (backend wallet; the lootbox seller is
    /// usually added after deployment)
    pub minter: String,
    pub policy: String,
    pub forwarder: String,
    pub name: String,
    pub symbol: String,
    pub base_uri: Option<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Mint one item for a 32-byte content hash (minter only)
    Mint {
        to: String,
        content_hash: HexBinary,
    },
    /// Batch mint; all-or-nothing — one duplicate hash fails the whole batch
    MintBatch {
        to: String,
        content_hashes: Vec<HexBinary>,
    },
    /// Transfer an item. Any outstanding rental grant survives the sale.
    TransferNft {
        recipient: String,
        token_id: u64,
    },
    /// Transfer to a contract with a cw721 receive callback
    SendNft {
        contract: String,
        token_id: u64,
        msg: Binary,
    },
    /// Approve a spender for a specific item
    Approve {
        spender: String,
        token_id: u64,
    },
    Revoke {
        token_id: u64,
    },
    ApproveAll {
        operator: String,
    },
    RevokeAll {
        operator: String,
    },
    /// Assign the time-boxed user (renter) role. Overwrites any prior grant,
    /// active or not. Owner, approved, or core-contract callers only.
    SetUser {
        token_id: u64,
        user: String,
        expires: Timestamp,
    },
    /// Grant or revoke the minter role (admin only)
    UpdateMinter {
        minter: String,
        enabled: bool,
    },
    UpdatePolicy {
        policy: String,
    },
    UpdateForwarder {
        forwarder: String,
    },
    UpdateBaseUri {
        base_uri: Option<String>,
    },
    /// Forwarder-only: re-dispatch `msg` as if sent by `sender`
    Relay {
        sender: String,
        msg: Binary,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(crate::state::Config)]
    Config {},
    #[returns(OwnerOfResponse)]
    OwnerOf { token_id: u64 },
    /// The current renter, or nothing once the grant has expired
    #[returns(UserOfResponse)]
    UserOf { token_id: u64 },
    #[returns(TokenIdResponse)]
    TokenIdByHash { hash: HexBinary },
    #[returns(TokenHashResponse)]
    TokenHashById { token_id: u64 },
    #[returns(NftInfoResponse)]
    NftInfo { token_id: u64 },
    #[returns(TokensResponse)]
    Tokens {
        owner: String,
        start_after: Option<u64>,
        limit: Option<u32>,
    },
    #[returns(TokensResponse)]
    AllTokens {
        start_after: Option<u64>,
        limit: Option<u32>,
    },
    #[returns(NumTokensResponse)]
    NumTokens {},
    #[returns(ApprovalResponse)]
    Approval { token_id: u64, spender: String },
    #[returns(OperatorResponse)]
    Operator { owner: String, operator: String },
    #[returns(MinterResponse)]
    Minter { address: String },
}

#[cw_serde]
pub struct OwnerOfResponse {
    pub owner: String,
    pub approvals: Vec<String>,
}

#[cw_serde]
pub struct UserOfResponse {
    pub user: Option<String>,
    pub expires: Option<Timestamp>,
}

#[cw_serde]
pub struct TokenIdResponse {
    pub token_id: u64,
}

#[cw_serde]
pub struct TokenHashResponse {
    pub hash: HexBinary,
}

#[cw_serde]
pub struct NftInfoResponse {
    pub token_id: u64,
    pub owner: String,
    pub content_hash: HexBinary,
    pub user: Option<String>,
    pub user_expires: Option<Timestamp>,
    pub token_uri: Option<String>,
    pub approval: Option<String>,
}

#[cw_serde]
pub struct TokensResponse {
    pub tokens: Vec<u64>,
}

#[cw_serde]
pub struct NumTokensResponse {
    pub count: u64,
}

#[cw_serde]
pub struct ApprovalResponse {
    pub approved: bool,
}

#[cw_serde]
pub struct OperatorResponse {
    pub approved: bool,
}

#[cw_serde]
pub struct MinterResponse {
    pub enabled: bool,
}

#[cw_serde]
pub struct MigrateMsg {}
