use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_json_binary, Addr, BankMsg, Binary, Coin, CosmosMsg, Deps, Env, HexBinary, MessageInfo,
    Uint128, WasmMsg,
};
use cw20::Cw20ExecuteMsg;
use sha2::{Digest, Sha256};

use crate::error::ContractError;
use crate::state::{Config, CONFIG, NATIVE_TOKEN};

// ─── Collaborator interfaces ────────────────────────────────────────────────

/// Pricing ledger (curio-payments) query surface we use
#[cw_serde]
pub enum PaymentsQueryMsg {
    Cost {
        token: String,
        reference_amount: Uint128,
    },
}

#[cw_serde]
pub struct CostResponse {
    pub token: String,
    pub reference_amount: Uint128,
    pub amount: Uint128,
}

/// Item registry (curio-item-nft) execute surface we use
#[cw_serde]
pub enum ItemExecuteMsg {
    Mint {
        to: String,
        content_hash: HexBinary,
    },
}

// ─── Role checks ────────────────────────────────────────────────────────────

pub fn assert_admin(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if *sender != config.admin {
        return Err(ContractError::Unauthorized {
            role: "admin".to_string(),
        });
    }
    Ok(())
}

pub fn assert_admin_or_service(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if *sender != config.admin && *sender != config.service {
        return Err(ContractError::Unauthorized {
            role: "admin or service".to_string(),
        });
    }
    Ok(())
}

pub fn reject_funds(info: &MessageInfo) -> Result<(), ContractError> {
    if !info.funds.is_empty() {
        return Err(ContractError::UnexpectedFunds);
    }
    Ok(())
}

pub fn validate_hash(hash: &HexBinary) -> Result<(), ContractError> {
    if hash.len() != 32 {
        return Err(ContractError::InvalidHashLength { len: hash.len() });
    }
    Ok(())
}

pub fn validate_pubkey(pubkey: &Binary) -> Result<(), ContractError> {
    if pubkey.len() != 33 {
        return Err(ContractError::InvalidPubkey { len: pubkey.len() });
    }
    Ok(())
}

// ─── Pricing ────────────────────────────────────────────────────────────────

/// Token amount owed for `reference_amount`, per the pricing ledger. Any
/// failure (unknown or disabled token) maps to `PaymentMethodUnavailable`.
pub fn query_cost(
    deps: Deps,
    config: &Config,
    token: &str,
    reference_amount: Uint128,
) -> Result<Uint128, ContractError> {
    let res: CostResponse = deps
        .querier
        .query_wasm_smart(
            &config.payment_methods,
            &PaymentsQueryMsg::Cost {
                token: token.to_string(),
                reference_amount,
            },
        )
        .map_err(|_| ContractError::PaymentMethodUnavailable {
            token: token.to_string(),
        })?;
    Ok(res.amount)
}

// ─── Payment collection ─────────────────────────────────────────────────────

/// Move `cost` of `token` from `buyer` to `recipient`.
///
/// Native path: attached funds must cover the cost in the configured denom,
/// exactly `cost` is forwarded and any excess is refunded to the buyer.
/// cw20 path: no funds may be attached; settlement runs through a
/// `TransferFrom` against the buyer's allowance.
pub fn collect_payment(
    info: &MessageInfo,
    config: &Config,
    buyer: &Addr,
    token: &str,
    cost: Uint128,
    recipient: &Addr,
) -> Result<Vec<CosmosMsg>, ContractError> {
    let mut msgs = Vec::new();

    if token == NATIVE_TOKEN {
        let mut paid = Uint128::zero();
        for coin in &info.funds {
            if coin.denom != config.native_denom {
                return Err(ContractError::WrongDenom {
                    denom: coin.denom.clone(),
                });
            }
            paid += coin.amount;
        }
        if paid < cost {
            return Err(ContractError::InsufficientFunds);
        }
        if !cost.is_zero() {
            msgs.push(
                BankMsg::Send {
                    to_address: recipient.to_string(),
                    amount: vec![Coin {
                        denom: config.native_denom.clone(),
                        amount: cost,
                    }],
                }
                .into(),
            );
        }
        let excess = paid - cost;
        if !excess.is_zero() {
            msgs.push(
                BankMsg::Send {
                    to_address: buyer.to_string(),
                    amount: vec![Coin {
                        denom: config.native_denom.clone(),
                        amount: excess,
                    }],
                }
                .into(),
            );
        }
    } else {
        reject_funds(info)?;
        if !cost.is_zero() {
            msgs.push(
                WasmMsg::Execute {
                    contract_addr: token.to_string(),
                    msg: to_json_binary(&Cw20ExecuteMsg::TransferFrom {
                        owner: buyer.to_string(),
                        recipient: recipient.to_string(),
                        amount: cost,
                    })?,
                    funds: vec![],
                }
                .into(),
            );
        }
    }

    Ok(msgs)
}

// ─── Meta-sale authorization ────────────────────────────────────────────────

/// Canonical digest the meta signer commits to: one specific price for one
/// specific content hash, bound to this chain and contract.
pub fn meta_sale_digest(env: &Env, price: Uint128, content_hash: &HexBinary) -> [u8; 32] {
    let payload = format!(
        "meta_sale:{}:{}:{}:{}",
        env.block.chain_id,
        env.contract.address,
        price,
        content_hash.to_hex(),
    );
    let mut hasher = Sha256::new();
    hasher.update(payload.as_bytes());
    hasher.finalize().into()
}

pub fn verify_meta_signature(
    deps: Deps,
    config: &Config,
    env: &Env,
    price: Uint128,
    content_hash: &HexBinary,
    signature: &Binary,
) -> Result<(), ContractError> {
    let digest = meta_sale_digest(env, price, content_hash);
    let valid = deps
        .api
        .secp256k1_verify(&digest, signature.as_slice(), &config.meta_signer_pubkey)
        .map_err(|_| ContractError::InvalidSigner)?;
    if !valid {
        return Err(ContractError::InvalidSigner);
    }
    Ok(())
}
