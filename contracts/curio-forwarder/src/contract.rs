use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
    WasmMsg,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::helpers::{assert_admin, forward_digest, validate_pubkey, RelayMsg};
use crate::msg::{
    ExecuteMsg, ForwardRequest, InstantiateMsg, MigrateMsg, NonceResponse, QueryMsg,
    SignerPubkeyResponse,
};
use crate::state::{Config, CONFIG, NONCES, SIGNER_PUBKEYS};

const CONTRACT_NAME: &str = "crates.io:curio-forwarder";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

// ─── Instantiate ────────────────────────────────────────────────────────────

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = Config {
        admin: deps.api.addr_validate(&msg.admin)?,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", CONTRACT_NAME)
        .add_attribute("admin", config.admin.as_str()))
}

// ─── Execute ────────────────────────────────────────────────────────────────

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::RegisterSigner { pubkey } => execute_register_signer(deps, info, pubkey),
        ExecuteMsg::Execute { request, signature } => {
            execute_forward(deps, env, info, request, signature)
        }
        ExecuteMsg::UpdateAdmin { admin } => execute_update_admin(deps, info, admin),
    }
}

pub fn execute_register_signer(
    deps: DepsMut,
    info: MessageInfo,
    pubkey: Binary,
) -> Result<Response, ContractError> {
    validate_pubkey(&pubkey)?;
    SIGNER_PUBKEYS.save(deps.storage, &info.sender, &pubkey)?;

    Ok(Response::new()
        .add_attribute("action", "register_signer")
        .add_attribute("signer", info.sender.as_str()))
}

pub fn execute_forward(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    request: ForwardRequest,
    signature: Binary,
) -> Result<Response, ContractError> {
    let from = deps.api.addr_validate(&request.from)?;
    let to = deps.api.addr_validate(&request.to)?;

    let pubkey = SIGNER_PUBKEYS
        .may_load(deps.storage, &from)?
        .ok_or(ContractError::SignerNotRegistered)?;
    let expected_nonce = NONCES.may_load(deps.storage, &from)?.unwrap_or(0);

    // A wrong nonce and a bad signature are indistinguishable to the caller:
    // the digest covers the nonce, so either way the check fails the same
    let digest = forward_digest(&env, &request);
    let valid = deps
        .api
        .secp256k1_verify(&digest, signature.as_slice(), &pubkey)
        .map_err(|_| ContractError::SignatureMismatch)?;
    if !valid || request.nonce != expected_nonce {
        return Err(ContractError::SignatureMismatch);
    }

    // Nonce is consumed before the call is dispatched
    NONCES.save(deps.storage, &from, &(expected_nonce + 1))?;

    let relay = WasmMsg::Execute {
        contract_addr: to.to_string(),
        msg: to_json_binary(&RelayMsg::Relay {
            sender: from.to_string(),
            msg: request.msg,
        })?,
        funds: info.funds,
    };

    Ok(Response::new()
        .add_message(relay)
        .add_attribute("action", "forward")
        .add_attribute("from", from.as_str())
        .add_attribute("to", to.as_str())
        .add_attribute("nonce", expected_nonce.to_string()))
}

pub fn execute_update_admin(
    deps: DepsMut,
    info: MessageInfo,
    admin: String,
) -> Result<Response, ContractError> {
    assert_admin(deps.as_ref(), &info.sender)?;

    let admin = deps.api.addr_validate(&admin)?;
    CONFIG.save(deps.storage, &Config { admin: admin.clone() })?;

    Ok(Response::new()
        .add_attribute("action", "update_admin")
        .add_attribute("admin", admin.as_str()))
}

// ─── Queries ────────────────────────────────────────────────────────────────

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?),
        QueryMsg::Nonce { signer } => {
            let signer = deps.api.addr_validate(&signer)?;
            to_json_binary(&NonceResponse {
                nonce: NONCES.may_load(deps.storage, &signer)?.unwrap_or(0),
            })
        }
        QueryMsg::SignerPubkey { signer } => {
            let signer = deps.api.addr_validate(&signer)?;
            to_json_binary(&SignerPubkeyResponse {
                pubkey: SIGNER_PUBKEYS.may_load(deps.storage, &signer)?,
            })
        }
    }
}

// ─── Migrate ────────────────────────────────────────────────────────────────

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
