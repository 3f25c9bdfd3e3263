use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary};
use cw_storage_plus::{Item, Map};

#[cw_serde]
pub struct Config {
    pub admin: Addr,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// signer -> compressed secp256k1 pubkey (33 bytes), self-registered
pub const SIGNER_PUBKEYS: Map<&Addr, Binary> = Map::new("signer_pubkeys");

/// signer -> next expected nonce; missing means 0
pub const NONCES: Map<&Addr, u64> = Map::new("nonces");
