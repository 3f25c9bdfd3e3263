use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

/// Payment-token key for the chain's native value unit; every other key is a
/// cw20 contract address.
pub const NATIVE_TOKEN: &str = "native";

/// Commission denominator: commission_bps is a fraction of 10_000
pub const BPS_DENOMINATOR: u16 = 10_000;

#[cw_serde]
pub struct Config {
    pub admin: Addr,
    /// Item registry the offers refer to
    pub item_contract: Addr,
    /// Pricing ledger consulted on every settlement
    pub payment_methods: Addr,
    /// Treasury receiving the commission cut
    pub vault: Addr,
    pub forwarder: Addr,
    /// Commission in basis points, at most 10_000
    pub commission_bps: u16,
    pub native_denom: String,
}

#[cw_serde]
pub enum OfferKind {
    /// Outright sale at `price` reference units
    Sell { price: Uint128 },
    /// Rental: `price` reference units buys the user role for `duration` seconds
    Rent { price: Uint128, duration: u64 },
}

impl OfferKind {
    pub fn price(&self) -> Uint128 {
        match self {
            OfferKind::Sell { price } | OfferKind::Rent { price, .. } => *price,
        }
    }
}

#[cw_serde]
pub struct Offer {
    pub seller: Addr,
    pub kind: OfferKind,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// token_id -> offer; one offer per item, regardless of kind
pub const OFFERS: Map<u64, Offer> = Map::new("offers");
