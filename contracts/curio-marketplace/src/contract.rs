use cosmwasm_std::{
    entry_point, from_json, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Order,
    Response, StdResult, Uint128, WasmMsg,
};
use cw2::set_contract_version;
use cw_storage_plus::Bound;

use crate::error::ContractError;
use crate::helpers::{
    assert_admin, collect_split_payment, commission_of, query_cost, query_item_owner,
    query_item_user, reject_funds, ItemExecuteMsg,
};
use crate::msg::{
    ExecuteMsg, InstantiateMsg, MigrateMsg, OfferEntry, OfferResponse, OffersResponse, QueryMsg,
};
use crate::state::{Config, Offer, OfferKind, BPS_DENOMINATOR, CONFIG, OFFERS};

const CONTRACT_NAME: &str = "crates.io:curio-marketplace";
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

    if msg.commission_bps > BPS_DENOMINATOR {
        return Err(ContractError::InvalidCommission {
            bps: msg.commission_bps,
        });
    }

    let config = Config {
        admin: deps.api.addr_validate(&msg.admin)?,
        item_contract: deps.api.addr_validate(&msg.item_contract)?,
        payment_methods: deps.api.addr_validate(&msg.payment_methods)?,
        vault: deps.api.addr_validate(&msg.vault)?,
        forwarder: deps.api.addr_validate(&msg.forwarder)?,
        commission_bps: msg.commission_bps,
        native_denom: msg.native_denom,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", CONTRACT_NAME)
        .add_attribute("admin", config.admin.as_str())
        .add_attribute("commission_bps", config.commission_bps.to_string()))
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
        ExecuteMsg::CreateSellOffer { token_id, price } => {
            execute_create_offer(deps, info, token_id, OfferKind::Sell { price })
        }
        ExecuteMsg::CreateRentOffer {
            token_id,
            price,
            duration,
        } => {
            if duration == 0 {
                return Err(ContractError::ZeroDuration);
            }
            execute_create_offer(deps, info, token_id, OfferKind::Rent { price, duration })
        }
        ExecuteMsg::UpdateOfferPrice { token_id, price } => {
            execute_update_offer_price(deps, info, token_id, price)
        }
        ExecuteMsg::CancelOffer { token_id } => execute_cancel_offer(deps, info, token_id),
        ExecuteMsg::TakeOffer {
            token_id,
            payment_token,
        } => execute_take_offer(deps, env, info, token_id, payment_token),
        ExecuteMsg::UpdateForwarder { forwarder } => {
            execute_update_forwarder(deps, info, forwarder)
        }
        ExecuteMsg::UpdateVault { vault } => execute_update_vault(deps, info, vault),
        ExecuteMsg::UpdatePaymentMethods { payment_methods } => {
            execute_update_payment_methods(deps, info, payment_methods)
        }
        ExecuteMsg::UpdateCommission { commission_bps } => {
            execute_update_commission(deps, info, commission_bps)
        }
        ExecuteMsg::Relay { sender, msg } => execute_relay(deps, env, info, sender, msg),
    }
}

// ─── Execute: Offer book ────────────────────────────────────────────────────

pub fn execute_create_offer(
    deps: DepsMut,
    info: MessageInfo,
    token_id: u64,
    kind: OfferKind,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;

    let config = CONFIG.load(deps.storage)?;
    let owner = query_item_owner(deps.as_ref(), &config, token_id)?;
    if owner != info.sender {
        return Err(ContractError::InvalidSender);
    }
    if OFFERS.has(deps.storage, token_id) {
        return Err(ContractError::OfferAlreadyExists { token_id });
    }

    let offer = Offer {
        seller: info.sender.clone(),
        kind: kind.clone(),
    };
    OFFERS.save(deps.storage, token_id, &offer)?;

    let mut res = Response::new();
    match kind {
        OfferKind::Sell { price } => {
            res = res
                .add_attribute("action", "new_sell_offer")
                .add_attribute("price", price.to_string());
        }
        OfferKind::Rent { price, duration } => {
            res = res
                .add_attribute("action", "new_rent_offer")
                .add_attribute("price", price.to_string())
                .add_attribute("duration", duration.to_string());
        }
    }
    Ok(res
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("seller", info.sender.as_str()))
}

pub fn execute_update_offer_price(
    deps: DepsMut,
    info: MessageInfo,
    token_id: u64,
    price: Uint128,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;

    let mut offer = OFFERS
        .may_load(deps.storage, token_id)?
        .ok_or(ContractError::OfferNotFound { token_id })?;
    if offer.seller != info.sender {
        return Err(ContractError::InvalidSender);
    }

    offer.kind = match offer.kind {
        OfferKind::Sell { .. } => OfferKind::Sell { price },
        OfferKind::Rent { duration, .. } => OfferKind::Rent { price, duration },
    };
    OFFERS.save(deps.storage, token_id, &offer)?;

    Ok(Response::new()
        .add_attribute("action", "update_offer_price")
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("price", price.to_string()))
}

pub fn execute_cancel_offer(
    deps: DepsMut,
    info: MessageInfo,
    token_id: u64,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;

    let offer = OFFERS
        .may_load(deps.storage, token_id)?
        .ok_or(ContractError::OfferNotFound { token_id })?;
    if offer.seller != info.sender {
        return Err(ContractError::InvalidSender);
    }
    OFFERS.remove(deps.storage, token_id);

    Ok(Response::new()
        .add_attribute("action", "cancel_offer")
        .add_attribute("token_id", token_id.to_string()))
}

pub fn execute_take_offer(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token_id: u64,
    payment_token: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let offer = OFFERS
        .may_load(deps.storage, token_id)?
        .ok_or(ContractError::OfferNotFound { token_id })?;

    // Stale-offer guard: a seller who gave the item away takes the offer with
    // them
    let owner = query_item_owner(deps.as_ref(), &config, token_id)?;
    if owner != offer.seller {
        return Err(ContractError::OfferNotFound { token_id });
    }

    let amount = query_cost(
        deps.as_ref(),
        &config,
        &payment_token,
        offer.kind.price(),
    )?;
    let commission = commission_of(amount, config.commission_bps);

    let registry_msg = match offer.kind {
        OfferKind::Sell { .. } => {
            // Offer is cleared before any outbound message
            OFFERS.remove(deps.storage, token_id);
            ItemExecuteMsg::TransferNft {
                recipient: info.sender.to_string(),
                token_id,
            }
        }
        OfferKind::Rent { duration, .. } => {
            if query_item_user(deps.as_ref(), &config, token_id)?.is_some() {
                return Err(ContractError::AlreadyRented);
            }
            // The offer stays live: once this grant lapses, the next renter
            // can take it again
            ItemExecuteMsg::SetUser {
                token_id,
                user: info.sender.to_string(),
                expires: env.block.time.plus_seconds(duration),
            }
        }
    };

    let mut msgs = collect_split_payment(
        &info,
        &config,
        &info.sender,
        &offer.seller,
        &payment_token,
        amount,
        commission,
    )?;
    msgs.push(
        WasmMsg::Execute {
            contract_addr: config.item_contract.to_string(),
            msg: to_json_binary(&registry_msg)?,
            funds: vec![],
        }
        .into(),
    );

    Ok(Response::new()
        .add_messages(msgs)
        .add_attribute("action", "offer_taken")
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("taker", info.sender.as_str())
        .add_attribute("payment_token", payment_token)
        .add_attribute("commission", commission.to_string())
        .add_attribute("amount", amount.to_string()))
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

pub fn execute_update_commission(
    deps: DepsMut,
    info: MessageInfo,
    commission_bps: u16,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_admin(deps.as_ref(), &info.sender)?;

    if commission_bps > BPS_DENOMINATOR {
        return Err(ContractError::InvalidCommission {
            bps: commission_bps,
        });
    }
    CONFIG.update(deps.storage, |mut c| -> StdResult<_> {
        c.commission_bps = commission_bps;
        Ok(c)
    })?;

    Ok(Response::new()
        .add_attribute("action", "commission_updated")
        .add_attribute("commission_bps", commission_bps.to_string()))
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
        QueryMsg::Offer { token_id } => query_offer(deps, token_id),
        QueryMsg::Offers { start_after, limit } => query_offers(deps, start_after, limit),
    }
}

pub fn query_offer(deps: Deps, token_id: u64) -> StdResult<Binary> {
    let offer = OFFERS.may_load(deps.storage, token_id)?.map(|o| OfferEntry {
        token_id,
        seller: o.seller.to_string(),
        kind: o.kind,
    });
    to_json_binary(&OfferResponse { offer })
}

pub fn query_offers(deps: Deps, start_after: Option<u64>, limit: Option<u32>) -> StdResult<Binary> {
    let limit = limit.unwrap_or(DEFAULT_QUERY_LIMIT).min(MAX_QUERY_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let offers = OFFERS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            item.map(|(token_id, o)| OfferEntry {
                token_id,
                seller: o.seller.to_string(),
                kind: o.kind,
            })
        })
        .collect::<StdResult<Vec<_>>>()?;

    to_json_binary(&OffersResponse { offers })
}

// ─── Migrate ────────────────────────────────────────────────────────────────

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
