use cosmwasm_std::{
    entry_point, from_json, to_json_binary, Addr, Binary, Deps, DepsMut, Env, HexBinary,
    MessageInfo, Order, Response, StdError, StdResult, Timestamp, WasmMsg,
};
use cw2::set_contract_version;
use cw_storage_plus::Bound;

use crate::error::ContractError;
use crate::helpers::{
    assert_admin, assert_minter, check_policy, is_authorized, live_user, reject_funds,
    validate_hash,
};
use crate::msg::{
    ApprovalResponse, ExecuteMsg, InstantiateMsg, MigrateMsg, MinterResponse, NftInfoResponse,
    NumTokensResponse, OperatorResponse, OwnerOfResponse, QueryMsg, TokenHashResponse,
    TokenIdResponse, TokensResponse, UserOfResponse,
};
use crate::state::{
    Config, TokenData, UserGrant, CONFIG, MINTERS, OPERATOR_APPROVALS, OWNER_TOKENS,
    TOKENS, TOKEN_APPROVALS, TOKEN_BY_HASH, TOKEN_COUNT,
};

const CONTRACT_NAME: &str = "crates.io:curio-item-nft";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");
const MAX_BATCH_SIZE: u32 = 50;
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

    let admin = deps.api.addr_validate(&msg.admin)?;
    let minter = deps.api.addr_validate(&msg.minter)?;
    let policy = deps.api.addr_validate(&msg.policy)?;
    let forwarder = deps.api.addr_validate(&msg.forwarder)?;

    let config = Config {
        admin,
        policy,
        forwarder,
        name: msg.name,
        symbol: msg.symbol,
        base_uri: msg.base_uri,
    };
    CONFIG.save(deps.storage, &config)?;
    TOKEN_COUNT.save(deps.storage, &0u64)?;
    MINTERS.save(deps.storage, &minter, &true)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", CONTRACT_NAME)
        .add_attribute("admin", config.admin.as_str())
        .add_attribute("minter", minter.as_str()))
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
        ExecuteMsg::Mint { to, content_hash } => execute_mint(deps, env, info, to, content_hash),
        ExecuteMsg::MintBatch { to, content_hashes } => {
            execute_mint_batch(deps, env, info, to, content_hashes)
        }
        ExecuteMsg::TransferNft {
            recipient,
            token_id,
        } => execute_transfer_nft(deps, env, info, recipient, token_id),
        ExecuteMsg::SendNft {
            contract,
            token_id,
            msg,
        } => execute_send_nft(deps, env, info, contract, token_id, msg),
        ExecuteMsg::Approve { spender, token_id } => {
            execute_approve(deps, env, info, spender, token_id)
        }
        ExecuteMsg::Revoke { token_id } => execute_revoke(deps, env, info, token_id),
        ExecuteMsg::ApproveAll { operator } => execute_approve_all(deps, env, info, operator),
        ExecuteMsg::RevokeAll { operator } => execute_revoke_all(deps, env, info, operator),
        ExecuteMsg::SetUser {
            token_id,
            user,
            expires,
        } => execute_set_user(deps, env, info, token_id, user, expires),
        ExecuteMsg::UpdateMinter { minter, enabled } => {
            execute_update_minter(deps, info, minter, enabled)
        }
        ExecuteMsg::UpdatePolicy { policy } => execute_update_policy(deps, info, policy),
        ExecuteMsg::UpdateForwarder { forwarder } => {
            execute_update_forwarder(deps, info, forwarder)
        }
        ExecuteMsg::UpdateBaseUri { base_uri } => execute_update_base_uri(deps, info, base_uri),
        ExecuteMsg::Relay { sender, msg } => execute_relay(deps, env, info, sender, msg),
    }
}

// ─── Execute: Minting ───────────────────────────────────────────────────────

pub fn execute_mint(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    to: String,
    content_hash: HexBinary,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_minter(deps.as_ref(), &info.sender)?;

    let config = CONFIG.load(deps.storage)?;
    let recipient = deps.api.addr_validate(&to)?;
    check_policy(
        deps.as_ref(),
        &config,
        &info.sender,
        None,
        Some(&recipient),
        0,
    )?;

    let token_id = mint_single(deps, &recipient, &content_hash)?;

    Ok(Response::new()
        .add_attribute("action", "mint")
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("to", recipient.as_str())
        .add_attribute("content_hash", content_hash.to_hex()))
}

pub fn execute_mint_batch(
    mut deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    to: String,
    content_hashes: Vec<HexBinary>,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_minter(deps.as_ref(), &info.sender)?;

    if content_hashes.is_empty() {
        return Err(ContractError::EmptyBatch);
    }
    if content_hashes.len() as u32 > MAX_BATCH_SIZE {
        return Err(ContractError::BatchTooLarge {
            max: MAX_BATCH_SIZE,
        });
    }

    let config = CONFIG.load(deps.storage)?;
    let recipient = deps.api.addr_validate(&to)?;
    check_policy(
        deps.as_ref(),
        &config,
        &info.sender,
        None,
        Some(&recipient),
        0,
    )?;

    // All-or-nothing: one duplicate anywhere aborts the whole batch
    let mut first_id = 0u64;
    let mut last_id = 0u64;
    for hash in &content_hashes {
        let token_id = mint_single(deps.branch(), &recipient, hash)?;
        if first_id == 0 {
            first_id = token_id;
        }
        last_id = token_id;
    }

    Ok(Response::new()
        .add_attribute("action", "mint_batch")
        .add_attribute("count", content_hashes.len().to_string())
        .add_attribute("to", recipient.as_str())
        .add_attribute("first_token_id", first_id.to_string())
        .add_attribute("last_token_id", last_id.to_string()))
}

/// Atomic check-and-mint: hash validation, uniqueness, token creation.
fn mint_single(
    deps: DepsMut,
    recipient: &Addr,
    content_hash: &HexBinary,
) -> Result<u64, ContractError> {
    validate_hash(content_hash)?;

    if TOKEN_BY_HASH.has(deps.storage, content_hash.as_slice()) {
        return Err(ContractError::DuplicateContent);
    }

    let mut count = TOKEN_COUNT.load(deps.storage)?;
    count += 1;
    let token_id = count;

    let data = TokenData {
        owner: recipient.clone(),
        content_hash: content_hash.clone(),
        user: None,
    };

    TOKENS.save(deps.storage, token_id, &data)?;
    TOKEN_BY_HASH.save(deps.storage, content_hash.as_slice(), &token_id)?;
    OWNER_TOKENS.save(deps.storage, (recipient, token_id), &true)?;
    TOKEN_COUNT.save(deps.storage, &count)?;

    Ok(token_id)
}

// ─── Execute: Transfers ─────────────────────────────────────────────────────

fn transfer_internal(
    deps: DepsMut,
    sender: &Addr,
    recipient: &Addr,
    token_id: u64,
) -> Result<Addr, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut token = TOKENS
        .may_load(deps.storage, token_id)?
        .ok_or(ContractError::UnknownItem { token_id })?;

    if !is_authorized(deps.as_ref(), &config, &token, token_id, sender)? {
        return Err(ContractError::Unauthorized {
            role: "owner or approved".to_string(),
        });
    }
    check_policy(
        deps.as_ref(),
        &config,
        sender,
        Some(&token.owner),
        Some(recipient),
        token_id,
    )?;

    let old_owner = token.owner.clone();
    OWNER_TOKENS.remove(deps.storage, (&old_owner, token_id));
    OWNER_TOKENS.save(deps.storage, (recipient, token_id), &true)?;

    // The user grant is intentionally untouched: rentals survive a sale
    token.owner = recipient.clone();
    TOKENS.save(deps.storage, token_id, &token)?;
    TOKEN_APPROVALS.remove(deps.storage, token_id);

    Ok(old_owner)
}

pub fn execute_transfer_nft(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    recipient: String,
    token_id: u64,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    let recipient = deps.api.addr_validate(&recipient)?;
    let old_owner = transfer_internal(deps, &info.sender, &recipient, token_id)?;

    Ok(Response::new()
        .add_attribute("action", "transfer_nft")
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("from", old_owner.as_str())
        .add_attribute("to", recipient.as_str()))
}

pub fn execute_send_nft(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    contract: String,
    token_id: u64,
    msg: Binary,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    let contract_addr = deps.api.addr_validate(&contract)?;
    let old_owner = transfer_internal(deps, &info.sender, &contract_addr, token_id)?;

    // State mutation happens before the callback is dispatched
    let callback = cw721::receiver::Cw721ReceiveMsg {
        sender: info.sender.to_string(),
        token_id: token_id.to_string(),
        msg,
    };
    let callback_msg = WasmMsg::Execute {
        contract_addr: contract_addr.to_string(),
        msg: to_json_binary(&callback)?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(callback_msg)
        .add_attribute("action", "send_nft")
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("from", old_owner.as_str())
        .add_attribute("to", contract_addr.as_str()))
}

// ─── Execute: Rental (user role) ────────────────────────────────────────────

pub fn execute_set_user(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    token_id: u64,
    user: String,
    expires: Timestamp,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;

    let config = CONFIG.load(deps.storage)?;
    let mut token = TOKENS
        .may_load(deps.storage, token_id)?
        .ok_or(ContractError::UnknownItem { token_id })?;

    if !is_authorized(deps.as_ref(), &config, &token, token_id, &info.sender)? {
        return Err(ContractError::Unauthorized {
            role: "owner or approved".to_string(),
        });
    }

    let user = deps.api.addr_validate(&user)?;
    check_policy(
        deps.as_ref(),
        &config,
        &info.sender,
        Some(&token.owner),
        Some(&user),
        token_id,
    )?;

    // Overwrites any prior grant, active or not: the marketplace relies on
    // this to reassign a rental the moment the previous one lapses
    token.user = Some(UserGrant {
        user: user.clone(),
        expires,
    });
    TOKENS.save(deps.storage, token_id, &token)?;

    Ok(Response::new()
        .add_attribute("action", "update_user")
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("user", user.as_str())
        .add_attribute("expires", expires.seconds().to_string()))
}

// ─── Execute: Approvals ─────────────────────────────────────────────────────

pub fn execute_approve(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    spender: String,
    token_id: u64,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    let token = TOKENS
        .may_load(deps.storage, token_id)?
        .ok_or(ContractError::UnknownItem { token_id })?;
    if info.sender != token.owner {
        return Err(ContractError::Unauthorized {
            role: "token owner".to_string(),
        });
    }

    let spender = deps.api.addr_validate(&spender)?;
    TOKEN_APPROVALS.save(deps.storage, token_id, &spender)?;

    Ok(Response::new()
        .add_attribute("action", "approve")
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("spender", spender.as_str()))
}

pub fn execute_revoke(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    token_id: u64,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    let token = TOKENS
        .may_load(deps.storage, token_id)?
        .ok_or(ContractError::UnknownItem { token_id })?;
    if info.sender != token.owner {
        return Err(ContractError::Unauthorized {
            role: "token owner".to_string(),
        });
    }

    TOKEN_APPROVALS.remove(deps.storage, token_id);

    Ok(Response::new()
        .add_attribute("action", "revoke")
        .add_attribute("token_id", token_id.to_string()))
}

pub fn execute_approve_all(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    operator: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    let operator = deps.api.addr_validate(&operator)?;
    OPERATOR_APPROVALS.save(deps.storage, (&info.sender, &operator), &true)?;

    Ok(Response::new()
        .add_attribute("action", "approve_all")
        .add_attribute("owner", info.sender.as_str())
        .add_attribute("operator", operator.as_str()))
}

pub fn execute_revoke_all(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    operator: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    let operator = deps.api.addr_validate(&operator)?;
    OPERATOR_APPROVALS.remove(deps.storage, (&info.sender, &operator));

    Ok(Response::new()
        .add_attribute("action", "revoke_all")
        .add_attribute("owner", info.sender.as_str())
        .add_attribute("operator", operator.as_str()))
}

// ─── Execute: Admin ─────────────────────────────────────────────────────────

pub fn execute_update_minter(
    deps: DepsMut,
    info: MessageInfo,
    minter: String,
    enabled: bool,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_admin(deps.as_ref(), &info.sender)?;

    let minter = deps.api.addr_validate(&minter)?;
    if enabled {
        MINTERS.save(deps.storage, &minter, &true)?;
    } else {
        MINTERS.remove(deps.storage, &minter);
    }

    Ok(Response::new()
        .add_attribute("action", "update_minter")
        .add_attribute("minter", minter.as_str())
        .add_attribute("enabled", enabled.to_string()))
}

pub fn execute_update_policy(
    deps: DepsMut,
    info: MessageInfo,
    policy: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_admin(deps.as_ref(), &info.sender)?;

    let policy = deps.api.addr_validate(&policy)?;
    CONFIG.update(deps.storage, |mut c| -> StdResult<_> {
        c.policy = policy.clone();
        Ok(c)
    })?;

    Ok(Response::new()
        .add_attribute("action", "policy_updated")
        .add_attribute("policy", policy.as_str()))
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

pub fn execute_update_base_uri(
    deps: DepsMut,
    info: MessageInfo,
    base_uri: Option<String>,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_admin(deps.as_ref(), &info.sender)?;

    CONFIG.update(deps.storage, |mut c| -> StdResult<_> {
        c.base_uri = base_uri.clone();
        Ok(c)
    })?;

    Ok(Response::new().add_attribute("action", "update_base_uri"))
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
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?),
        QueryMsg::OwnerOf { token_id } => query_owner_of(deps, token_id),
        QueryMsg::UserOf { token_id } => query_user_of(deps, env, token_id),
        QueryMsg::TokenIdByHash { hash } => query_token_id_by_hash(deps, hash),
        QueryMsg::TokenHashById { token_id } => query_token_hash_by_id(deps, token_id),
        QueryMsg::NftInfo { token_id } => query_nft_info(deps, env, token_id),
        QueryMsg::Tokens {
            owner,
            start_after,
            limit,
        } => query_tokens(deps, owner, start_after, limit),
        QueryMsg::AllTokens { start_after, limit } => query_all_tokens(deps, start_after, limit),
        QueryMsg::NumTokens {} => {
            to_json_binary(&NumTokensResponse {
                count: TOKEN_COUNT.load(deps.storage)?,
            })
        }
        QueryMsg::Approval { token_id, spender } => query_approval(deps, token_id, spender),
        QueryMsg::Operator { owner, operator } => query_operator(deps, owner, operator),
        QueryMsg::Minter { address } => query_minter(deps, address),
    }
}

fn load_token(deps: Deps, token_id: u64) -> StdResult<TokenData> {
    TOKENS
        .may_load(deps.storage, token_id)?
        .ok_or_else(|| StdError::generic_err(format!("unknown item: {token_id}")))
}

pub fn query_owner_of(deps: Deps, token_id: u64) -> StdResult<Binary> {
    let token = load_token(deps, token_id)?;
    let approvals = TOKEN_APPROVALS
        .may_load(deps.storage, token_id)?
        .map(|a| a.to_string())
        .into_iter()
        .collect();

    to_json_binary(&OwnerOfResponse {
        owner: token.owner.to_string(),
        approvals,
    })
}

pub fn query_user_of(deps: Deps, env: Env, token_id: u64) -> StdResult<Binary> {
    let token = load_token(deps, token_id)?;
    let grant = live_user(&token, env.block.time);

    to_json_binary(&UserOfResponse {
        user: grant.map(|g| g.user.to_string()),
        expires: grant.map(|g| g.expires),
    })
}

pub fn query_token_id_by_hash(deps: Deps, hash: HexBinary) -> StdResult<Binary> {
    let token_id = TOKEN_BY_HASH
        .may_load(deps.storage, hash.as_slice())?
        .ok_or_else(|| StdError::generic_err(format!("unknown item: {}", hash.to_hex())))?;
    to_json_binary(&TokenIdResponse { token_id })
}

pub fn query_token_hash_by_id(deps: Deps, token_id: u64) -> StdResult<Binary> {
    let token = load_token(deps, token_id)?;
    to_json_binary(&TokenHashResponse {
        hash: token.content_hash,
    })
}

pub fn query_nft_info(deps: Deps, env: Env, token_id: u64) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    let token = load_token(deps, token_id)?;
    let grant = live_user(&token, env.block.time);
    let approval = TOKEN_APPROVALS
        .may_load(deps.storage, token_id)?
        .map(|a| a.to_string());

    to_json_binary(&NftInfoResponse {
        token_id,
        owner: token.owner.to_string(),
        content_hash: token.content_hash.clone(),
        user: grant.map(|g| g.user.to_string()),
        user_expires: grant.map(|g| g.expires),
        token_uri: config.base_uri.map(|base| format!("{base}{token_id}")),
        approval,
    })
}

pub fn query_tokens(
    deps: Deps,
    owner: String,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let owner = deps.api.addr_validate(&owner)?;
    let limit = limit.unwrap_or(DEFAULT_QUERY_LIMIT).min(MAX_QUERY_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let tokens: Vec<u64> = OWNER_TOKENS
        .prefix(&owner)
        .keys(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .collect::<StdResult<Vec<_>>>()?;

    to_json_binary(&TokensResponse { tokens })
}

pub fn query_all_tokens(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(DEFAULT_QUERY_LIMIT).min(MAX_QUERY_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let tokens: Vec<u64> = TOKENS
        .keys(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .collect::<StdResult<Vec<_>>>()?;

    to_json_binary(&TokensResponse { tokens })
}

pub fn query_approval(deps: Deps, token_id: u64, spender: String) -> StdResult<Binary> {
    let spender = deps.api.addr_validate(&spender)?;
    let approved = TOKEN_APPROVALS
        .may_load(deps.storage, token_id)?
        .map(|a| a == spender)
        .unwrap_or(false);
    to_json_binary(&ApprovalResponse { approved })
}

pub fn query_operator(deps: Deps, owner: String, operator: String) -> StdResult<Binary> {
    let owner = deps.api.addr_validate(&owner)?;
    let operator = deps.api.addr_validate(&operator)?;
    let approved = OPERATOR_APPROVALS
        .may_load(deps.storage, (&owner, &operator))?
        .unwrap_or(false);
    to_json_binary(&OperatorResponse { approved })
}

pub fn query_minter(deps: Deps, address: String) -> StdResult<Binary> {
    let address = deps.api.addr_validate(&address)?;
    let enabled = MINTERS.may_load(deps.storage, &address)?.unwrap_or(false);
    to_json_binary(&MinterResponse { enabled })
}

// ─── Migrate ────────────────────────────────────────────────────────────────

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
