use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Binary;

#[cw_serde]
pub struct InstantiateMsg {
    pub admin: String,
}

/// A call to forward on behalf of `from`. The signature covers every field
/// plus this contract's address and the chain id, so a request can never be
/// replayed elsewhere.
#[cw_serde]
pub struct ForwardRequest {
    pub from: String,
    /// Target contract; must accept a `Relay { sender, msg }` variant
    pub to: String,
    pub nonce: u64,
    /// Inner execute message, passed through opaque
    pub msg: Binary,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Register (or rotate) the caller's compressed secp256k1 pubkey
    RegisterSigner { pubkey: Binary },
    /// Verify and dispatch a signed request; attached funds travel with it
    Execute {
        request: ForwardRequest,
        signature: Binary,
    },
    UpdateAdmin { admin: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(crate::state::Config)]
    Config {},
    /// Next expected nonce for a signer (0 if never used)
    #[returns(NonceResponse)]
    Nonce { signer: String },
    #[returns(SignerPubkeyResponse)]
    SignerPubkey { signer: String },
}

#[cw_serde]
pub struct NonceResponse {
    pub nonce: u64,
}

#[cw_serde]
pub struct SignerPubkeyResponse {
    pub pubkey: Option<Binary>,
}

#[cw_serde]
pub struct MigrateMsg {}
