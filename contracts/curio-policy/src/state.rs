use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

#[cw_serde]
pub struct Config {
    /// Contract admin — manages the blacklist and the core-contract registry
    pub admin: Addr,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// Accounts barred from sending or receiving value-bearing transfers
pub const BLACKLIST: Map<&Addr, bool> = Map::new("blacklist");

/// Marketplace/seller contracts that bypass per-holder operator restrictions
pub const CORE_CONTRACTS: Map<&Addr, bool> = Map::new("core_contracts");
