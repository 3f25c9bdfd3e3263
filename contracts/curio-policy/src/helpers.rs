use cosmwasm_std::{Addr, Deps, MessageInfo, StdResult};

use crate::error::ContractError;
use crate::state::{BLACKLIST, CONFIG, CORE_CONTRACTS};

/// Verify the caller is the contract admin.
pub fn assert_admin(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if *sender != config.admin {
        return Err(ContractError::Unauthorized {
            role: "admin".to_string(),
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

pub fn is_blacklisted(deps: Deps, account: &Addr) -> StdResult<bool> {
    Ok(BLACKLIST
        .may_load(deps.storage, account)?
        .unwrap_or(false))
}

pub fn is_core_contract(deps: Deps, contract: &Addr) -> StdResult<bool> {
    Ok(CORE_CONTRACTS
        .may_load(deps.storage, contract)?
        .unwrap_or(false))
}
