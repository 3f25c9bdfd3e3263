use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Deps, HexBinary, MessageInfo, StdResult, Timestamp};

use crate::error::ContractError;
use crate::state::{
    Config, TokenData, UserGrant, CONFIG, MINTERS, OPERATOR_APPROVALS, TOKEN_APPROVALS,
};

// ─── Policy gate interface (curio-policy) ───────────────────────────────────

#[cw_serde]
pub enum PolicyQueryMsg {
    CanTransfer {
        operator: String,
        from: Option<String>,
        to: Option<String>,
        token_id: u64,
    },
    CoreContract {
        contract: String,
    },
}

#[cw_serde]
pub struct CanTransferResponse {
    pub allowed: bool,
}

#[cw_serde]
pub struct CoreContractResponse {
    pub enabled: bool,
}

/// Consult the policy gate; a denial aborts the call with no state change.
pub fn check_policy(
    deps: Deps,
    config: &Config,
    operator: &Addr,
    from: Option<&Addr>,
    to: Option<&Addr>,
    token_id: u64,
) -> Result<(), ContractError> {
    let res: CanTransferResponse = deps.querier.query_wasm_smart(
        &config.policy,
        &PolicyQueryMsg::CanTransfer {
            operator: operator.to_string(),
            from: from.map(|a| a.to_string()),
            to: to.map(|a| a.to_string()),
            token_id,
        },
    )?;
    if !res.allowed {
        return Err(ContractError::PolicyDenied);
    }
    Ok(())
}

fn is_core_contract(deps: Deps, config: &Config, addr: &Addr) -> StdResult<bool> {
    let res: CoreContractResponse = deps.querier.query_wasm_smart(
        &config.policy,
        &PolicyQueryMsg::CoreContract {
            contract: addr.to_string(),
        },
    )?;
    Ok(res.enabled)
}

// ─── Role / authorization checks ────────────────────────────────────────────

pub fn assert_admin(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if *sender != config.admin {
        return Err(ContractError::Unauthorized {
            role: "admin".to_string(),
        });
    }
    Ok(())
}

pub fn assert_minter(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    if !MINTERS.may_load(deps.storage, sender)?.unwrap_or(false) {
        return Err(ContractError::Unauthorized {
            role: "minter".to_string(),
        });
    }
    Ok(())
}

/// Check whether `spender` may move `token_id` or assign its user role.
/// Owner, token-level approval, operator approval, or a core contract
/// registered in the policy gate (marketplace/seller).
pub fn is_authorized(
    deps: Deps,
    config: &Config,
    token: &TokenData,
    token_id: u64,
    spender: &Addr,
) -> StdResult<bool> {
    if *spender == token.owner {
        return Ok(true);
    }
    if let Some(approved) = TOKEN_APPROVALS.may_load(deps.storage, token_id)? {
        if approved == *spender {
            return Ok(true);
        }
    }
    if let Some(true) = OPERATOR_APPROVALS.may_load(deps.storage, (&token.owner, spender))? {
        return Ok(true);
    }
    is_core_contract(deps, config, spender)
}

// ─── Misc ───────────────────────────────────────────────────────────────────

/// The current renter, if the grant has not lapsed. Expiry is a pure
/// read-time computation; nothing is ever stored back.
pub fn live_user(token: &TokenData, now: Timestamp) -> Option<&UserGrant> {
    token.user.as_ref().filter(|grant| now < grant.expires)
}

pub fn validate_hash(hash: &HexBinary) -> Result<(), ContractError> {
    if hash.len() != 32 {
        return Err(ContractError::InvalidHashLength { len: hash.len() });
    }
    Ok(())
}

pub fn reject_funds(info: &MessageInfo) -> Result<(), ContractError> {
    if !info.funds.is_empty() {
        return Err(ContractError::UnexpectedFunds);
    }
    Ok(())
}
