use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Binary, HexBinary, Uint128};

#[cw_serde]
pub struct InstantiateMsg {
    pub admin: String,
    pub service: String,
    pub item_contract: String,
    pub payment_methods: String,
    pub vault: String,
    pub forwarder: String,
    pub meta_signer: String,
    /// Compressed secp256k1 pubkey (33 bytes)
    pub meta_signer_pubkey: Binary,
    pub native_denom: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Create a lootbox with an initial stock of content hashes (admin only)
    AddLootbox {
        price: Uint128,
        content_hashes: Vec<HexBinary>,
    },
    /// Restock an existing lootbox (admin or service)
    AddTokenHashes {
        lootbox_id: u64,
        content_hashes: Vec<HexBinary>,
    },
    UpdateLootboxPrice {
        lootbox_id: u64,
        price: Uint128,
    },
    /// Buy the next hash in FIFO order, paying in `payment_token`
    BuyAvailableLootbox {
        lootbox_id: u64,
        payment_token: String,
    },
    /// Buy a specific hash at a price authorized off-chain by the meta signer
    BuyMetaLootbox {
        price: Uint128,
        content_hash: HexBinary,
        payment_token: String,
        signature: Binary,
    },
    /// Sweep stray balances held by this contract to the vault (admin only)
    ClaimTokens {
        tokens: Vec<String>,
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
    UpdateAuthorizedMetaSigner {
        signer: String,
        pubkey: Binary,
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
    #[returns(LootboxResponse)]
    Lootbox { lootbox_id: u64 },
    #[returns(LootboxesResponse)]
    Lootboxes {
        start_after: Option<u64>,
        limit: Option<u32>,
    },
    #[returns(NumLootboxesResponse)]
    NumLootboxes {},
}

#[cw_serde]
pub struct LootboxResponse {
    pub lootbox_id: u64,
    pub price: Uint128,
    /// Total hashes ever stocked
    pub total: u64,
    /// Hashes already issued (FIFO cursor)
    pub issued: u64,
    pub remaining: u64,
}

#[cw_serde]
pub struct LootboxesResponse {
    pub lootboxes: Vec<LootboxResponse>,
}

#[cw_serde]
pub struct NumLootboxesResponse {
    pub count: u64,
}

#[cw_serde]
pub struct MigrateMsg {}
