use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_json_binary, Addr, BankMsg, Coin, CosmosMsg, Deps, MessageInfo, Timestamp, Uint128,
    WasmMsg,
};
use cw20::Cw20ExecuteMsg;

use crate::error::ContractError;
use crate::state::{Config, BPS_DENOMINATOR, CONFIG, NATIVE_TOKEN};

// ─── Collaborator interfaces ────────────────────────────────────────────────

/// Item registry (curio-item-nft) query surface we use
#[cw_serde]
pub enum ItemQueryMsg {
    OwnerOf { token_id: u64 },
    UserOf { token_id: u64 },
}

#[cw_serde]
pub struct OwnerOfResponse {
    pub owner: String,
    pub approvals: Vec<String>,
}

#[cw_serde]
pub struct UserOfResponse {
    pub user: Option<String>,
    pub expires: Option<Timestamp>,
}

/// Item registry execute surface we use; relies on this contract being
/// registered as a core contract in the policy gate
#[cw_serde]
pub enum ItemExecuteMsg {
    TransferNft {
        recipient: String,
        token_id: u64,
    },
    SetUser {
        token_id: u64,
        user: String,
        expires: Timestamp,
    },
}

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

pub fn reject_funds(info: &MessageInfo) -> Result<(), ContractError> {
    if !info.funds.is_empty() {
        return Err(ContractError::UnexpectedFunds);
    }
    Ok(())
}

// ─── Registry lookups ───────────────────────────────────────────────────────

pub fn query_item_owner(deps: Deps, config: &Config, token_id: u64) -> Result<Addr, ContractError> {
    let res: OwnerOfResponse = deps
        .querier
        .query_wasm_smart(&config.item_contract, &ItemQueryMsg::OwnerOf { token_id })?;
    Ok(deps.api.addr_validate(&res.owner)?)
}

pub fn query_item_user(
    deps: Deps,
    config: &Config,
    token_id: u64,
) -> Result<Option<String>, ContractError> {
    let res: UserOfResponse = deps
        .querier
        .query_wasm_smart(&config.item_contract, &ItemQueryMsg::UserOf { token_id })?;
    Ok(res.user)
}

// ─── Pricing and settlement ─────────────────────────────────────────────────

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

/// Commission cut of a settlement amount. The remainder to the seller is
/// `amount - commission`, so the two always sum to the settlement exactly.
pub fn commission_of(amount: Uint128, commission_bps: u16) -> Uint128 {
    amount.multiply_ratio(commission_bps as u128, BPS_DENOMINATOR as u128)
}

/// Move `amount` of `token` from `buyer`, split between the vault
/// (`commission`) and the `seller` (the remainder). Native excess is refunded.
pub fn collect_split_payment(
    info: &MessageInfo,
    config: &Config,
    buyer: &Addr,
    seller: &Addr,
    token: &str,
    amount: Uint128,
    commission: Uint128,
) -> Result<Vec<CosmosMsg>, ContractError> {
    let seller_amount = amount - commission;
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
        if paid < amount {
            return Err(ContractError::InsufficientFunds);
        }
        let mut send_native = |to: &Addr, value: Uint128| {
            if !value.is_zero() {
                msgs.push(
                    BankMsg::Send {
                        to_address: to.to_string(),
                        amount: vec![Coin {
                            denom: config.native_denom.clone(),
                            amount: value,
                        }],
                    }
                    .into(),
                );
            }
        };
        send_native(&config.vault, commission);
        send_native(seller, seller_amount);
        send_native(buyer, paid - amount);
    } else {
        reject_funds(info)?;
        let mut send_cw20 = |to: &Addr, value: Uint128| -> Result<(), ContractError> {
            if !value.is_zero() {
                msgs.push(
                    WasmMsg::Execute {
                        contract_addr: token.to_string(),
                        msg: to_json_binary(&Cw20ExecuteMsg::TransferFrom {
                            owner: buyer.to_string(),
                            recipient: to.to_string(),
                            amount: value,
                        })?,
                        funds: vec![],
                    }
                    .into(),
                );
            }
            Ok(())
        };
        send_cw20(&config.vault, commission)?;
        send_cw20(seller, seller_amount)?;
    }

    Ok(msgs)
}
