use cosmwasm_std::{
    entry_point, from_json, to_json_binary, BankMsg, Binary, CosmosMsg, Deps, DepsMut, Env,
    HexBinary, MessageInfo, Order, Response, StdResult, Uint128, WasmMsg,
};
use cw2::set_contract_version;
use cw20::{BalanceResponse, Cw20ExecuteMsg, Cw20QueryMsg};
use cw_storage_plus::Bound;

use crate::error::ContractError;
use crate::helpers::{
    assert_admin, assert_admin_or_service, collect_payment, query_cost, reject_funds,
    validate_hash, validate_pubkey, verify_meta_signature, ItemExecuteMsg,
};
use crate::msg::{
    ExecuteMsg, InstantiateMsg, LootboxResponse, LootboxesResponse, MigrateMsg,
    NumLootboxesResponse, QueryMsg,
};
use crate::state::{Config, Lootbox, CONFIG, LOOTBOXES, LOOTBOX_COUNT, NATIVE_TOKEN};

const CONTRACT_NAME: &str = "crates.io:curio-lootbox";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_QUERY_LIMIT: u32 = 30;
const MAX_QUERY_LIMIT: u32 = 100;

// ─── Instantiate ────────────────────────────────────────────────────────────

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    validate_pubkey(&msg.meta_signer_pubkey)?;

    let config = Config {
        admin: deps.api.addr_validate(&msg.admin)?,
        service: deps.api.addr_validate(&msg.service)?,
        item_contract: deps.api.addr_validate(&msg.item_contract)?,
        payment_methods: deps.api.addr_validate(&msg.payment_methods)?,
        vault: deps.api.addr_validate(&msg.vault)?,
        forwarder: deps.api.addr_validate(&msg.forwarder)?,
        meta_signer: deps.api.addr_validate(&msg.meta_signer)?,
        meta_signer_pubkey: msg.meta_signer_pubkey,
        native_denom: msg.native_denom,
    };
    CONFIG.save(deps.storage, &config)?;
    LOOTBOX_COUNT.save(deps.storage, &0u64)?;

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
        ExecuteMsg::AddLootbox {
            price,
            content_hashes,
        } => execute_add_lootbox(deps, info, price, content_hashes),
        ExecuteMsg::AddTokenHashes {
            lootbox_id,
            content_hashes,
        } => execute_add_token_hashes(deps, info, lootbox_id, content_hashes),
        ExecuteMsg::UpdateLootboxPrice { lootbox_id, price } => {
            execute_update_lootbox_price(deps, info, lootbox_id, price)
        }
        ExecuteMsg::BuyAvailableLootbox {
            lootbox_id,
            payment_token,
        } => execute_buy_available(deps, env, info, lootbox_id, payment_token),
        ExecuteMsg::BuyMetaLootbox {
            price,
            content_hash,
            payment_token,
            signature,
        } => execute_buy_meta(deps, env, info, price, content_hash, payment_token, signature),
        ExecuteMsg::ClaimTokens { tokens } => execute_claim_tokens(deps, env, info, tokens),
        ExecuteMsg::UpdateForwarder { forwarder } => {
            execute_update_forwarder(deps, info, forwarder)
        }
        ExecuteMsg::UpdateVault { vault } => execute_update_vault(deps, info, vault),
        ExecuteMsg::UpdatePaymentMethods { payment_methods } => {
            execute_update_payment_methods(deps, info, payment_methods)
        }
        ExecuteMsg::UpdateAuthorizedMetaSigner { signer, pubkey } => {
            execute_update_meta_signer(deps, info, signer, pubkey)
        }
        ExecuteMsg::Relay { sender, msg } => execute_relay(deps, env, info, sender, msg),
    }
}

// ─── Execute: Stock management ──────────────────────────────────────────────

pub fn execute_add_lootbox(
    deps: DepsMut,
    info: MessageInfo,
    price: Uint128,
    content_hashes: Vec<HexBinary>,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_admin(deps.as_ref(), &info.sender)?;

    for hash in &content_hashes {
        validate_hash(hash)?;
    }

    let lootbox_id = LOOTBOX_COUNT.load(deps.storage)?;
    let lootbox = Lootbox {
        price,
        content_hashes,
        next_index: 0,
    };
    LOOTBOXES.save(deps.storage, lootbox_id, &lootbox)?;
    LOOTBOX_COUNT.save(deps.storage, &(lootbox_id + 1))?;

    Ok(Response::new()
        .add_attribute("action", "add_lootbox")
        .add_attribute("lootbox_id", lootbox_id.to_string())
        .add_attribute("price", price.to_string())
        .add_attribute("stock", lootbox.content_hashes.len().to_string()))
}

pub fn execute_add_token_hashes(
    deps: DepsMut,
    info: MessageInfo,
    lootbox_id: u64,
    content_hashes: Vec<HexBinary>,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_admin_or_service(deps.as_ref(), &info.sender)?;

    for hash in &content_hashes {
        validate_hash(hash)?;
    }

    let mut lootbox = LOOTBOXES
        .may_load(deps.storage, lootbox_id)?
        .ok_or(ContractError::LootboxNotFound { lootbox_id })?;
    let added = content_hashes.len();
    lootbox.content_hashes.extend(content_hashes);
    LOOTBOXES.save(deps.storage, lootbox_id, &lootbox)?;

    Ok(Response::new()
        .add_attribute("action", "add_token_hashes")
        .add_attribute("lootbox_id", lootbox_id.to_string())
        .add_attribute("added", added.to_string())
        .add_attribute("stock", lootbox.content_hashes.len().to_string()))
}

pub fn execute_update_lootbox_price(
    deps: DepsMut,
    info: MessageInfo,
    lootbox_id: u64,
    price: Uint128,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_admin(deps.as_ref(), &info.sender)?;

    let mut lootbox = LOOTBOXES
        .may_load(deps.storage, lootbox_id)?
        .ok_or(ContractError::LootboxNotFound { lootbox_id })?;
    lootbox.price = price;
    LOOTBOXES.save(deps.storage, lootbox_id, &lootbox)?;

    Ok(Response::new()
        .add_attribute("action", "update_lootbox_price")
        .add_attribute("lootbox_id", lootbox_id.to_string())
        .add_attribute("price", price.to_string()))
}

// ─── Execute: Purchases ─────────────────────────────────────────────────────

pub fn execute_buy_available(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    lootbox_id: u64,
    payment_token: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut lootbox = LOOTBOXES
        .may_load(deps.storage, lootbox_id)?
        .ok_or(ContractError::LootboxNotFound { lootbox_id })?;

    if lootbox.next_index as usize >= lootbox.content_hashes.len() {
        return Err(ContractError::NoStock);
    }
    let content_hash = lootbox.content_hashes[lootbox.next_index as usize].clone();

    let cost = query_cost(deps.as_ref(), &config, &payment_token, lootbox.price)?;

    // Cursor is persisted before any outbound message is dispatched
    lootbox.next_index += 1;
    LOOTBOXES.save(deps.storage, lootbox_id, &lootbox)?;

    let mut msgs = collect_payment(
        &info,
        &config,
        &info.sender,
        &payment_token,
        cost,
        &config.vault,
    )?;
    msgs.push(
        WasmMsg::Execute {
            contract_addr: config.item_contract.to_string(),
            msg: to_json_binary(&ItemExecuteMsg::Mint {
                to: info.sender.to_string(),
                content_hash: content_hash.clone(),
            })?,
            funds: vec![],
        }
        .into(),
    );

    Ok(Response::new()
        .add_messages(msgs)
        .add_attribute("action", "buy_lootbox")
        .add_attribute("lootbox_id", lootbox_id.to_string())
        .add_attribute("buyer", info.sender.as_str())
        .add_attribute("content_hash", content_hash.to_hex())
        .add_attribute("payment_token", payment_token)
        .add_attribute("amount", cost.to_string()))
}

#[allow(clippy::too_many_arguments)]
pub fn execute_buy_meta(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    price: Uint128,
    content_hash: HexBinary,
    payment_token: String,
    signature: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    validate_hash(&content_hash)?;
    verify_meta_signature(deps.as_ref(), &config, &env, price, &content_hash, &signature)?;

    let cost = query_cost(deps.as_ref(), &config, &payment_token, price)?;

    // No stock list is involved; the registry's duplicate-hash check is the
    // only uniqueness guard for meta sales
    let mut msgs = collect_payment(
        &info,
        &config,
        &info.sender,
        &payment_token,
        cost,
        &config.vault,
    )?;
    msgs.push(
        WasmMsg::Execute {
            contract_addr: config.item_contract.to_string(),
            msg: to_json_binary(&ItemExecuteMsg::Mint {
                to: info.sender.to_string(),
                content_hash: content_hash.clone(),
            })?,
            funds: vec![],
        }
        .into(),
    );

    Ok(Response::new()
        .add_messages(msgs)
        .add_attribute("action", "buy_meta_lootbox")
        .add_attribute("buyer", info.sender.as_str())
        .add_attribute("content_hash", content_hash.to_hex())
        .add_attribute("payment_token", payment_token)
        .add_attribute("amount", cost.to_string()))
}

// ─── Execute: Treasury ──────────────────────────────────────────────────────

pub fn execute_claim_tokens(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    tokens: Vec<String>,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_admin(deps.as_ref(), &info.sender)?;

    let config = CONFIG.load(deps.storage)?;
    let mut msgs: Vec<CosmosMsg> = Vec::new();
    let mut swept = 0usize;

    for token in &tokens {
        if token == NATIVE_TOKEN {
            let balance = deps
                .querier
                .query_balance(&env.contract.address, &config.native_denom)?;
            if !balance.amount.is_zero() {
                msgs.push(
                    BankMsg::Send {
                        to_address: config.vault.to_string(),
                        amount: vec![balance],
                    }
                    .into(),
                );
                swept += 1;
            }
        } else {
            let addr = deps.api.addr_validate(token)?;
            let res: BalanceResponse = deps.querier.query_wasm_smart(
                &addr,
                &Cw20QueryMsg::Balance {
                    address: env.contract.address.to_string(),
                },
            )?;
            if !res.balance.is_zero() {
                msgs.push(
                    WasmMsg::Execute {
                        contract_addr: addr.to_string(),
                        msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
                            recipient: config.vault.to_string(),
                            amount: res.balance,
                        })?,
                        funds: vec![],
                    }
                    .into(),
                );
                swept += 1;
            }
        }
    }

    Ok(Response::new()
        .add_messages(msgs)
        .add_attribute("action", "claim_tokens")
        .add_attribute("swept", swept.to_string()))
}

// ─── Execute: Admin ─────────────────────────────────────────────────────────

pub fn execute_update_forwarder(
    deps: DepsMut,
    info: MessageInfo,
    forwarder: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_admin(deps.as_ref(), &info.sender)?;

    let forwarder = deps.api.addr_validate(&forwarder)?;
    CONFIG.update(deps.storage, |mut c| -> StdResult<_> {
        c.forwarder = forwarder.clone();
        Ok(c)
    })?;

    Ok(Response::new()
        .add_attribute("action", "forwarder_updated")
        .add_attribute("forwarder", forwarder.as_str()))
}

pub fn execute_update_vault(
    deps: DepsMut,
    info: MessageInfo,
    vault: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_admin(deps.as_ref(), &info.sender)?;

    let vault = deps.api.addr_validate(&vault)?;
    CONFIG.update(deps.storage, |mut c| -> StdResult<_> {
        c.vault = vault.clone();
        Ok(c)
    })?;

    Ok(Response::new()
        .add_attribute("action", "vault_updated")
        .add_attribute("vault", vault.as_str()))
}

pub fn execute_update_payment_methods(
    deps: DepsMut,
    info: MessageInfo,
    payment_methods: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_admin(deps.as_ref(), &info.sender)?;

    let payment_methods = deps.api.addr_validate(&payment_methods)?;
    CONFIG.update(deps.storage, |mut c| -> StdResult<_> {
        c.payment_methods = payment_methods.clone();
        Ok(c)
    })?;

    Ok(Response::new()
        .add_attribute("action", "payment_methods_updated")
        .add_attribute("payment_methods", payment_methods.as_str()))
}

pub fn execute_update_meta_signer(
    deps: DepsMut,
    info: MessageInfo,
    signer: String,
    pubkey: Binary,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_admin(deps.as_ref(), &info.sender)?;

    validate_pubkey(&pubkey)?;
    let signer = deps.api.addr_validate(&signer)?;
    CONFIG.update(deps.storage, |mut c| -> StdResult<_> {
        c.meta_signer = signer.clone();
        c.meta_signer_pubkey = pubkey.clone();
        Ok(c)
    })?;

    Ok(Response::new()
        .add_attribute("action", "meta_signer_updated")
        .add_attribute("meta_signer", signer.as_str()))
}

pub fn execute_relay(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    sender: String,
    msg: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.forwarder {
        return Err(ContractError::Unauthorized {
            role: "forwarder".to_string(),
        });
    }
    let sender = deps.api.addr_validate(&sender)?;
    let inner: ExecuteMsg = from_json(&msg)?;
    let relayed_info = MessageInfo {
        sender,
        funds: info.funds,
    };
    execute(deps, env, relayed_info, inner)
}

// ─── Queries ────────────────────────────────────────────────────────────────

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?),
        QueryMsg::Lootbox { lootbox_id } => query_lootbox(deps, lootbox_id),
        QueryMsg::Lootboxes { start_after, limit } => query_lootboxes(deps, start_after, limit),
        QueryMsg::NumLootboxes {} => to_json_binary(&NumLootboxesResponse {
            count: LOOTBOX_COUNT.load(deps.storage)?,
        }),
    }
}

fn lootbox_response(lootbox_id: u64, lootbox: &Lootbox) -> LootboxResponse {
    let total = lootbox.content_hashes.len() as u64;
    LootboxResponse {
        lootbox_id,
        price: lootbox.price,
        total,
        issued: lootbox.next_index,
        remaining: total.saturating_sub(lootbox.next_index),
    }
}

pub fn query_lootbox(deps: Deps, lootbox_id: u64) -> StdResult<Binary> {
    let lootbox = LOOTBOXES.load(deps.storage, lootbox_id)?;
    to_json_binary(&lootbox_response(lootbox_id, &lootbox))
}

pub fn query_lootboxes(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(DEFAULT_QUERY_LIMIT).min(MAX_QUERY_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let lootboxes = LOOTBOXES
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(id, lb)| lootbox_response(id, &lb)))
        .collect::<StdResult<Vec<_>>>()?;

    to_json_binary(&LootboxesResponse { lootboxes })
}

// ─── Migrate ────────────────────────────────────────────────────────────────

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
