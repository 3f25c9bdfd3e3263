use cosmwasm_std::{Addr, Deps, MessageInfo, Uint128, Uint256};

use crate::error::ContractError;
use crate::state::{PaymentMethod, CONFIG, NATIVE_TOKEN, REFERENCE_DECIMALS};

pub fn assert_admin(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if *sender != config.admin {
        return Err(ContractError::Unauthorized {
            role: "admin".to_string(),
        });
    }
    Ok(())
}

pub fn assert_oracle(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if *sender != config.oracle {
        return Err(ContractError::Unauthorized {
            role: "oracle".to_string(),
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

/// A token key is either the native sentinel or a valid cw20 contract address.
pub fn validate_token_key(deps: Deps, token: &str) -> Result<(), ContractError> {
    if token == NATIVE_TOKEN {
        return Ok(());
    }
    deps.api
        .addr_validate(token)
        .map_err(|_| ContractError::InvalidToken {
            token: token.to_string(),
        })?;
    Ok(())
}

/// Discount is a flat deduction from the rate; a discount at or above the rate
/// would price purchases at zero or underflow. Checked at write time.
pub fn validate_discount(price: Uint128, discount: Uint128) -> Result<(), ContractError> {
    if discount >= price {
        return Err(ContractError::DiscountTooHigh {
            discount: discount.to_string(),
            price: price.to_string(),
        });
    }
    Ok(())
}

/// Token amount owed for `reference_amount` (18-decimal reference units):
/// `reference_amount * (price - discount) / 10^18`.
pub fn compute_cost(
    reference_amount: Uint128,
    method: &PaymentMethod,
) -> Result<Uint128, ContractError> {
    let rate = method
        .price
        .checked_sub(method.discount)
        .map_err(|_| ContractError::Overflow)?;
    let scale = Uint256::from(10u128.pow(REFERENCE_DECIMALS));
    let amount = reference_amount
        .full_mul(rate)
        .checked_div(scale)
        .map_err(|_| ContractError::Overflow)?;
    Uint128::try_from(amount).map_err(|_| ContractError::Overflow)
}
