use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::helpers::{assert_admin, is_blacklisted, is_core_contract, reject_funds};
use crate::msg::{
    BlacklistedResponse, CanTransferResponse, CoreContractResponse, ExecuteMsg, InstantiateMsg,
    MigrateMsg, QueryMsg,
};
use crate::state::{Config, BLACKLIST, CONFIG, CORE_CONTRACTS};

const CONTRACT_NAME: &str = "crates.io:curio-policy";
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

    let admin = deps.api.addr_validate(&msg.admin)?;
    CONFIG.save(deps.storage, &Config { admin: admin.clone() })?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", CONTRACT_NAME)
        .add_attribute("admin", admin.as_str()))
}

// ─── Execute ────────────────────────────────────────────────────────────────

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    match msg {
        ExecuteMsg::SetBlacklistForAccount {
            account,
            blacklisted,
        } => execute_set_blacklist(deps, info, account, blacklisted),
        ExecuteMsg::SetCoreContract { contract, enabled } => {
            execute_set_core_contract(deps, info, contract, enabled)
        }
        ExecuteMsg::UpdateAdmin { admin } => execute_update_admin(deps, info, admin),
    }
}

pub fn execute_set_blacklist(
    deps: DepsMut,
    info: MessageInfo,
    account: String,
    blacklisted: bool,
) -> Result<Response, ContractError> {
    assert_admin(deps.as_ref(), &info.sender)?;

    let account = deps.api.addr_validate(&account)?;
    if blacklisted {
        BLACKLIST.save(deps.storage, &account, &true)?;
    } else {
        BLACKLIST.remove(deps.storage, &account);
    }

    Ok(Response::new()
        .add_attribute("action", "blacklist")
        .add_attribute("account", account.as_str())
        .add_attribute("blacklisted", blacklisted.to_string()))
}

pub fn execute_set_core_contract(
    deps: DepsMut,
    info: MessageInfo,
    contract: String,
    enabled: bool,
) -> Result<Response, ContractError> {
    assert_admin(deps.as_ref(), &info.sender)?;

    let contract = deps.api.addr_validate(&contract)?;
    if enabled {
        CORE_CONTRACTS.save(deps.storage, &contract, &true)?;
    } else {
        CORE_CONTRACTS.remove(deps.storage, &contract);
    }

    Ok(Response::new()
        .add_attribute("action", "core_contract")
        .add_attribute("contract", contract.as_str())
        .add_attribute("enabled", enabled.to_string()))
}

pub fn execute_update_admin(
    deps: DepsMut,
    info: MessageInfo,
    admin: String,
) -> Result<Response, ContractError> {
    assert_admin(deps.as_ref(), &info.sender)?;

    let admin = deps.api.addr_validate(&admin)?;
    CONFIG.update(deps.storage, |mut c| -> StdResult<_> {
        c.admin = admin.clone();
        Ok(c)
    })?;

    Ok(Response::new()
        .add_attribute("action", "update_admin")
        .add_attribute("admin", admin.as_str()))
}

// ─── Queries ────────────────────────────────────────────────────────────────

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?),
        QueryMsg::CanTransfer {
            operator,
            from,
            to,
            token_id,
        } => query_can_transfer(deps, operator, from, to, token_id),
        QueryMsg::Blacklisted { account } => query_blacklisted(deps, account),
        QueryMsg::CoreContract { contract } => query_core_contract(deps, contract),
    }
}

pub fn query_can_transfer(
    deps: Deps,
    operator: String,
    from: Option<String>,
    to: Option<String>,
    _token_id: u64,
) -> StdResult<Binary> {
    let operator = deps.api.addr_validate(&operator)?;

    let mut allowed = true;
    if let Some(from) = from {
        let from = deps.api.addr_validate(&from)?;
        if is_blacklisted(deps, &from)? {
            allowed = false;
        }
    }
    if let Some(to) = to {
        let to = deps.api.addr_validate(&to)?;
        if is_blacklisted(deps, &to)? {
            allowed = false;
        }
    }
    // Registered core contracts may operate on behalf of any holder
    if allowed && is_blacklisted(deps, &operator)? && !is_core_contract(deps, &operator)? {
        allowed = false;
    }

    to_json_binary(&CanTransferResponse { allowed })
}

pub fn query_blacklisted(deps: Deps, account: String) -> StdResult<Binary> {
    let account = deps.api.addr_validate(&account)?;
    to_json_binary(&BlacklistedResponse {
        blacklisted: is_blacklisted(deps, &account)?,
    })
}

pub fn query_core_contract(deps: Deps, contract: String) -> StdResult<Binary> {
    let contract = deps.api.addr_validate(&contract)?;
    to_json_binary(&CoreContractResponse {
        enabled: is_core_contract(deps, &contract)?,
    })
}

// ─── Migrate ────────────────────────────────────────────────────────────────

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
