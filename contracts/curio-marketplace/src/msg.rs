use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Binary, Uint128};

use crate::state::OfferKind;

#[cw_serde]
pub struct InstantiateMsg {
    pub admin: String,
    pub item_contract: String,
    pub payment_methods: String,
    pub vault: String,
    pub forwarder: String,
    /// Commission in basis points (≤ 10000)
    pub commission_bps: u16,
    pub native_denom: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// List an owned item for sale at `price` reference units
    CreateSellOffer {
        token_id: u64,
        price: Uint128,
    },
    /// List an owned item for rent: `price` buys `duration` seconds of use
    CreateRentOffer {
        token_id: u64,
        price: Uint128,
        duration: u64,
    },
    /// Reprice a live offer (recorded seller only); the kind is unchanged
    UpdateOfferPrice {
        token_id: u64,
        price: Uint128,
    },
    CancelOffer {
        token_id: u64,
    },
    /// Accept an offer, paying in `payment_token`. A sale clears the offer;
    /// a rental keeps it live for the next taker after expiry.
    TakeOffer {
        token_id: u64,
        payment_token: String,
    },
    UpdateForwarder {
        forwarder: String,
    },
    UpdateVault {
        vault: String,
    },
    UpdatePaymentMethods {
        payment_methods: String,
    },
    UpdateCommission {
        commission_bps: u16,
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
    #[returns(OfferResponse)]
    Offer { token_id: u64 },
    #[returns(OffersResponse)]
    Offers {
        start_after: Option<u64>,
        limit: Option<u32>,
    },
}

#[cw_serde]
pub struct OfferEntry {
    pub token_id: u64,
    pub seller: String,
    pub kind: OfferKind,
}

#[cw_serde]
pub struct OfferResponse {
    pub offer: Option<OfferEntry>,
}

#[cw_serde]
pub struct OffersResponse {
    pub offers: Vec<OfferEntry>,
}

#[cw_serde]
pub struct MigrateMsg {}
