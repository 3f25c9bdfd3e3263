use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

/// Sentinel token key for the chain's native value unit.
/// Every other key is a cw20 contract address.
pub const NATIVE_TOKEN: &str = "native";

/// Reference prices are quoted at 18 decimals.
pub const REFERENCE_DECIMALS: u32 = 18;

#[cw_serde]
pub struct Config {
    /// Structural changes and enable/disable
    pub admin: Addr,
    /// Price and discount updates only
    pub oracle: Addr,
    /// Trusted gasless-relay contract
    pub forwarder: Addr,
}

/// Pricing record for one accepted value token
#[cw_serde]
pub struct PaymentMethod {
    /// Token units per whole reference unit, scaled to `decimals`
    pub price: Uint128,
    /// The token's own decimal scale
    pub decimals: u8,
    /// Flat deduction from `price`, same scale; always `< price`
    pub discount: Uint128,
    pub enabled: bool,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// token key (cw20 address or NATIVE_TOKEN) -> pricing record
pub const PAYMENT_METHODS: Map<&str, PaymentMethod> = Map::new("payment_methods");
