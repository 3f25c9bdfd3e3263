use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, HexBinary, Timestamp};
use cw_storage_plus::{Item, Map};

#[cw_serde]
pub struct Config {
    /// Contract admin — manages minters and collaborator addresses
    pub admin: Addr,
    /// Transfer policy gate, consulted before every balance-changing call
    pub policy: Addr,
    /// Trusted gasless-relay contract
    pub forwarder: Addr,
    pub name: String,
    pub symbol: String,
    /// Metadata URI prefix; token URI is `{base_uri}{token_id}`
    pub base_uri: Option<String>,
}

/// Time-boxed "user" (renter) role. The grant is never actively cleared:
/// liveness is recomputed from the block time on every read.
#[cw_serde]
pub struct UserGrant {
    pub user: Addr,
    pub expires: Timestamp,
}

/// Full on-chain item data
#[cw_serde]
pub struct TokenData {
    pub owner: Addr,
    /// 32-byte content hash, globally unique across the collection
    pub content_hash: HexBinary,
    pub user: Option<UserGrant>,
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const TOKEN_COUNT: Item<u64> = Item::new("token_count");

/// Accounts allowed to mint (lootbox seller, backend wallet)
pub const MINTERS: Map<&Addr, bool> = Map::new("minters");

/// token_id -> item data; ids are sequential and 1-based
pub const TOKENS: Map<u64, TokenData> = Map::new("tokens");

/// content hash bytes -> token_id (uniqueness index)
pub const TOKEN_BY_HASH: Map<&[u8], u64> = Map::new("token_by_hash");

/// token_id -> spender Addr (single approval per token)
pub const TOKEN_APPROVALS: Map<u64, Addr> = Map::new("token_approvals");

/// (owner, operator) -> bool
pub const OPERATOR_APPROVALS: Map<(&Addr, &Addr), bool> = Map::new("operator_approvals");

/// (owner, token_id) -> bool, secondary index for owner-based queries
pub const OWNER_TOKENS: Map<(&Addr, u64), bool> = Map::new("owner_tokens");
