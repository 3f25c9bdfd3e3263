use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, Deps, Env};
use sha2::{Digest, Sha256};

use crate::error::ContractError;
use crate::msg::ForwardRequest;
use crate::state::CONFIG;

/// Relay variant every Curio core contract exposes; the target substitutes
/// `sender` for the message sender before re-dispatching `msg`.
#[cw_serde]
pub enum RelayMsg {
    Relay { sender: String, msg: Binary },
}

pub fn assert_admin(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if *sender != config.admin {
        return Err(ContractError::Unauthorized {
            role: "admin".to_string(),
        });
    }
    Ok(())
}

pub fn validate_pubkey(pubkey: &Binary) -> Result<(), ContractError> {
    if pubkey.len() != 33 {
        return Err(ContractError::InvalidPubkey { len: pubkey.len() });
    }
    Ok(())
}

/// Canonical digest a signer commits to: the full request, bound to this
/// chain and this forwarder instance.
pub fn forward_digest(env: &Env, request: &ForwardRequest) -> [u8; 32] {
    let payload = format!(
        "forward:{}:{}:{}:{}:{}:{}",
        env.block.chain_id,
        env.contract.address,
        request.from,
        request.to,
        request.nonce,
        request.msg.to_base64(),
    );
    let mut hasher = Sha256::new();
    hasher.update(payload.as_bytes());
    hasher.finalize().into()
}
