use cosmwasm_std::{
    entry_point, from_json, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Order,
    Response, StdError, StdResult, Uint128,
};
use cw2::set_contract_version;
use cw_storage_plus::Bound;

use crate::error::ContractError;
use crate::helpers::{
    assert_admin, assert_oracle, compute_cost, reject_funds, validate_discount,
    validate_token_key,
};
use crate::msg::{
    CostResponse, ExecuteMsg, InstantiateMsg, MigrateMsg, PaymentMethodAvailableResponse,
    PaymentMethodEntry, PaymentMethodResponse, PaymentMethodsResponse, QueryMsg,
};
use crate::state::{Config, PaymentMethod, CONFIG, PAYMENT_METHODS};

const CONTRACT_NAME: &str = "crates.io:curio-payments";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_QUERY_LIMIT: u32 = 30;
const MAX_QUERY_LIMIT: u32 = 100;

// ─── Instantiate ────────────────────────────────────────────────────────────

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    mut deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let admin = deps.api.addr_validate(&msg.admin)?;
    let oracle = deps.api.addr_validate(&msg.oracle)?;
    let forwarder = deps.api.addr_validate(&msg.forwarder)?;

    let config = Config {
        admin,
        oracle,
        forwarder,
    };
    CONFIG.save(deps.storage, &config)?;

    let count = msg.tokens.len();
    if msg.prices.len() != count || msg.decimals.len() != count || msg.discounts.len() != count {
        return Err(ContractError::InvalidParamsLength);
    }
    for i in 0..count {
        add_method(
            deps.branch(),
            &msg.tokens[i],
            msg.prices[i],
            msg.decimals[i],
            msg.discounts[i],
        )?;
    }

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", CONTRACT_NAME)
        .add_attribute("methods", count.to_string()))
}

/// Shared add path: key validation, uniqueness, discount bound.
fn add_method(
    deps: DepsMut,
    token: &str,
    price: Uint128,
    decimals: u8,
    discount: Uint128,
) -> Result<(), ContractError> {
    validate_token_key(deps.as_ref(), token)?;
    validate_discount(price, discount)?;
    if PAYMENT_METHODS.has(deps.storage, token) {
        return Err(ContractError::PaymentMethodAlreadyExists {
            token: token.to_string(),
        });
    }
    let method = PaymentMethod {
        price,
        decimals,
        discount,
        enabled: true,
    };
    PAYMENT_METHODS.save(deps.storage, token, &method)?;
    Ok(())
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
        ExecuteMsg::AddPaymentMethod {
            token,
            price,
            decimals,
            discount,
        } => execute_add_payment_method(deps, info, token, price, decimals, discount),
        ExecuteMsg::AddPaymentMethods {
            tokens,
            prices,
            decimals,
            discounts,
        } => execute_add_payment_methods(deps, info, tokens, prices, decimals, discounts),
        ExecuteMsg::UpdatePaymentMethod {
            token,
            price,
            discount,
        } => execute_update_payment_method(deps, info, token, price, discount),
        ExecuteMsg::UpdatePaymentMethodStatus { token, enabled } => {
            execute_update_payment_method_status(deps, info, token, enabled)
        }
        ExecuteMsg::RemovePaymentMethodStatus { token } => {
            execute_remove_payment_method_status(deps, info, token)
        }
        ExecuteMsg::UpdateForwarder { forwarder } => {
            execute_update_forwarder(deps, info, forwarder)
        }
        ExecuteMsg::Relay { sender, msg } => execute_relay(deps, env, info, sender, msg),
    }
}

pub fn execute_add_payment_method(
    deps: DepsMut,
    info: MessageInfo,
    token: String,
    price: Uint128,
    decimals: u8,
    discount: Uint128,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_admin(deps.as_ref(), &info.sender)?;

    add_method(deps, &token, price, decimals, discount)?;

    Ok(Response::new()
        .add_attribute("action", "add_payment_method")
        .add_attribute("token", token)
        .add_attribute("price", price.to_string())
        .add_attribute("discount", discount.to_string()))
}

pub fn execute_add_payment_methods(
    mut deps: DepsMut,
    info: MessageInfo,
    tokens: Vec<String>,
    prices: Vec<Uint128>,
    decimals: Vec<u8>,
    discounts: Vec<Uint128>,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_admin(deps.as_ref(), &info.sender)?;

    let count = tokens.len();
    if prices.len() != count || decimals.len() != count || discounts.len() != count {
        return Err(ContractError::InvalidParamsLength);
    }
    for i in 0..count {
        add_method(
            deps.branch(),
            &tokens[i],
            prices[i],
            decimals[i],
            discounts[i],
        )?;
    }

    Ok(Response::new()
        .add_attribute("action", "add_payment_methods")
        .add_attribute("count", count.to_string()))
}

pub fn execute_update_payment_method(
    deps: DepsMut,
    info: MessageInfo,
    token: String,
    price: Uint128,
    discount: Uint128,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_oracle(deps.as_ref(), &info.sender)?;

    validate_discount(price, discount)?;
    let mut method = PAYMENT_METHODS.may_load(deps.storage, &token)?.ok_or(
        ContractError::PaymentMethodNotFound {
            token: token.clone(),
        },
    )?;

    // decimals and enabled are structural; the oracle may not touch them
    method.price = price;
    method.discount = discount;
    PAYMENT_METHODS.save(deps.storage, &token, &method)?;

    Ok(Response::new()
        .add_attribute("action", "update_payment_method")
        .add_attribute("token", token)
        .add_attribute("price", price.to_string())
        .add_attribute("discount", discount.to_string()))
}

pub fn execute_update_payment_method_status(
    deps: DepsMut,
    info: MessageInfo,
    token: String,
    enabled: bool,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_admin(deps.as_ref(), &info.sender)?;

    let mut method = PAYMENT_METHODS.may_load(deps.storage, &token)?.ok_or(
        ContractError::PaymentMethodNotFound {
            token: token.clone(),
        },
    )?;
    if method.enabled == enabled {
        return Err(ContractError::PaymentStatusUnchanged);
    }
    method.enabled = enabled;
    PAYMENT_METHODS.save(deps.storage, &token, &method)?;

    Ok(Response::new()
        .add_attribute("action", "update_payment_method_status")
        .add_attribute("token", token)
        .add_attribute("enabled", enabled.to_string()))
}

pub fn execute_remove_payment_method_status(
    deps: DepsMut,
    info: MessageInfo,
    token: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_admin(deps.as_ref(), &info.sender)?;

    let mut method = PAYMENT_METHODS.may_load(deps.storage, &token)?.ok_or(
        ContractError::PaymentNotFound {
            token: token.clone(),
        },
    )?;
    // Logical removal: historical pricing data is retained
    method.enabled = false;
    PAYMENT_METHODS.save(deps.storage, &token, &method)?;

    Ok(Response::new()
        .add_attribute("action", "remove_payment_method")
        .add_attribute("token", token))
}

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
        QueryMsg::PaymentMethodAvailable { token } => query_available(deps, token),
        QueryMsg::PaymentMethod { token } => query_payment_method(deps, token),
        QueryMsg::Cost {
            token,
            reference_amount,
        } => query_cost(deps, token, reference_amount),
        QueryMsg::PaymentMethods { start_after, limit } => {
            query_payment_methods(deps, start_after, limit)
        }
    }
}

/// Known and enabled, or an error naming the token.
fn load_available(deps: Deps, token: &str) -> StdResult<PaymentMethod> {
    match PAYMENT_METHODS.may_load(deps.storage, token)? {
        Some(method) if method.enabled => Ok(method),
        _ => Err(StdError::generic_err(format!(
            "payment method not available: {token}"
        ))),
    }
}

pub fn query_available(deps: Deps, token: String) -> StdResult<Binary> {
    let available = PAYMENT_METHODS
        .may_load(deps.storage, &token)?
        .map(|m| m.enabled)
        .unwrap_or(false);
    to_json_binary(&PaymentMethodAvailableResponse { available })
}

pub fn query_payment_method(deps: Deps, token: String) -> StdResult<Binary> {
    let method = load_available(deps, &token)?;
    to_json_binary(&PaymentMethodResponse {
        token,
        price: method.price,
        decimals: method.decimals,
        discount: method.discount,
        enabled: method.enabled,
    })
}

pub fn query_cost(deps: Deps, token: String, reference_amount: Uint128) -> StdResult<Binary> {
    let method = load_available(deps, &token)?;
    let amount = compute_cost(reference_amount, &method)
        .map_err(|e| StdError::generic_err(e.to_string()))?;
    to_json_binary(&CostResponse {
        token,
        reference_amount,
        amount,
    })
}

pub fn query_payment_methods(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(DEFAULT_QUERY_LIMIT).min(MAX_QUERY_LIMIT) as usize;
    let start = start_after.as_deref().map(Bound::exclusive);

    let methods: Vec<PaymentMethodEntry> = PAYMENT_METHODS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (token, method) = item?;
            Ok(PaymentMethodEntry { token, method })
        })
        .collect::<StdResult<Vec<_>>>()?;

    to_json_binary(&PaymentMethodsResponse { methods })
}

// ─── Migrate ────────────────────────────────────────────────────────────────

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
