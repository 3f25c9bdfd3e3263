use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, HexBinary, Uint128};
use cw_storage_plus::{Item, Map};

/// Payment-token key for the chain's native value unit; every other key is a
/// cw20 contract address.
pub const NATIVE_TOKEN: &str = "native";

#[cw_serde]
pub struct Config {
    pub admin: Addr,
    /// Backend service account, allowed to restock lootboxes
    pub service: Addr,
    /// Item registry the boxes mint into
    pub item_contract: Addr,
    /// Pricing ledger consulted for every sale
    pub payment_methods: Addr,
    /// Treasury receiving all proceeds
    pub vault: Addr,
    pub forwarder: Addr,
    /// Off-chain signer authorizing meta sales
    pub meta_signer: Addr,
    /// Compressed secp256k1 pubkey (33 bytes) of the meta signer
    pub meta_signer_pubkey: Binary,
    pub native_denom: String,
}

#[cw_serde]
pub struct Lootbox {
    /// Price in reference units (18 decimals)
    pub price: Uint128,
    /// Full issuance history; entries before `next_index` are already sold
    pub content_hashes: Vec<HexBinary>,
    /// FIFO cursor: how many hashes have been issued
    pub next_index: u64,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// Number of lootboxes ever created; ids are sequential and 0-based
pub const LOOTBOX_COUNT: Item<u64> = Item::new("lootbox_count");
pub const LOOTBOXES: Map<u64, Lootbox> = Map::new("lootboxes");
