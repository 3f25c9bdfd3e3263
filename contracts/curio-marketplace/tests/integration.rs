use cosmwasm_std::testing::{message_info, mock_dependencies, mock_env, MockApi, MockQuerier};
use cosmwasm_std::{
    coin, from_json, to_json_binary, Addr, BankMsg, ContractResult, CosmosMsg, MemoryStorage,
    OwnedDeps, SystemResult, Uint128, WasmMsg, WasmQuery,
};

use curio_marketplace::contract::{execute, instantiate, query};
use curio_marketplace::error::ContractError;
use curio_marketplace::helpers::{
    CostResponse, ItemExecuteMsg, ItemQueryMsg, OwnerOfResponse, PaymentsQueryMsg, UserOfResponse,
};
use curio_marketplace::msg::*;
use curio_marketplace::state::{Config, OfferKind, NATIVE_TOKEN};

type TestDeps = OwnedDeps<MemoryStorage, MockApi, MockQuerier>;

const DENOM: &str = "uium";

fn a(deps: &TestDeps, name: &str) -> Addr {
    deps.api.addr_make(name)
}

/// Mock the item registry (ownership + rental state) and the pricing ledger
/// (a (numerator, denominator) multiplier per accepted payment token).
fn set_collaborators(
    deps: &mut TestDeps,
    owners: Vec<(u64, Addr)>,
    users: Vec<(u64, Addr)>,
    rates: Vec<(String, u128, u128)>,
) {
    let items = deps.api.addr_make("items").to_string();
    let payments = deps.api.addr_make("payments").to_string();
    deps.querier.update_wasm(move |req| {
        let WasmQuery::Smart { contract_addr, msg } = req else {
            panic!("unexpected wasm query: {req:?}");
        };
        let bin = if *contract_addr == items {
            match from_json(msg).unwrap() {
                ItemQueryMsg::OwnerOf { token_id } => {
                    let Some((_, owner)) = owners.iter().find(|(id, _)| *id == token_id) else {
                        return SystemResult::Ok(ContractResult::Err(format!(
                            "unknown item: {token_id}"
                        )));
                    };
                    to_json_binary(&OwnerOfResponse {
                        owner: owner.to_string(),
                        approvals: vec![],
                    })
                    .unwrap()
                }
                ItemQueryMsg::UserOf { token_id } => {
                    let user = users
                        .iter()
                        .find(|(id, _)| *id == token_id)
                        .map(|(_, u)| u.to_string());
                    to_json_binary(&UserOfResponse {
                        user,
                        expires: None,
                    })
                    .unwrap()
                }
            }
        } else if *contract_addr == payments {
            let PaymentsQueryMsg::Cost {
                token,
                reference_amount,
            } = from_json(msg).unwrap();
            let Some((_, num, den)) = rates.iter().find(|(t, _, _)| *t == token) else {
                return SystemResult::Ok(ContractResult::Err(format!(
                    "payment method not available: {token}"
                )));
            };
            let amount = reference_amount.multiply_ratio(*num, *den);
            to_json_binary(&CostResponse {
                token,
                reference_amount,
                amount,
            })
            .unwrap()
        } else {
            panic!("unexpected query target: {contract_addr}");
        };
        SystemResult::Ok(ContractResult::Ok(bin))
    });
}

fn setup_with_owner(token_id: u64, owner_name: &str) -> TestDeps {
    let mut deps = mock_dependencies();
    let owner = deps.api.addr_make(owner_name);
    set_collaborators(
        &mut deps,
        vec![(token_id, owner)],
        vec![],
        vec![(NATIVE_TOKEN.to_string(), 1, 1)],
    );
    let admin = deps.api.addr_make("admin");
    let msg = InstantiateMsg {
        admin: admin.to_string(),
        item_contract: deps.api.addr_make("items").to_string(),
        payment_methods: deps.api.addr_make("payments").to_string(),
        vault: deps.api.addr_make("vault").to_string(),
        forwarder: deps.api.addr_make("forwarder").to_string(),
        commission_bps: 400,
        native_denom: DENOM.to_string(),
    };
    instantiate(deps.as_mut(), mock_env(), message_info(&admin, &[]), msg).unwrap();
    deps
}

fn setup() -> TestDeps {
    setup_with_owner(1, "seller")
}

fn sell_offer(deps: &mut TestDeps, token_id: u64, price: u128) {
    let seller = deps.api.addr_make("seller");
    execute(
        deps.as_mut(),
        mock_env(),
        message_info(&seller, &[]),
        ExecuteMsg::CreateSellOffer {
            token_id,
            price: Uint128::new(price),
        },
    )
    .unwrap();
}

fn rent_offer(deps: &mut TestDeps, token_id: u64, price: u128, duration: u64) {
    let seller = deps.api.addr_make("seller");
    execute(
        deps.as_mut(),
        mock_env(),
        message_info(&seller, &[]),
        ExecuteMsg::CreateRentOffer {
            token_id,
            price: Uint128::new(price),
            duration,
        },
    )
    .unwrap();
}

fn offer_of(deps: &TestDeps, token_id: u64) -> Option<OfferEntry> {
    let res: OfferResponse =
        from_json(query(deps.as_ref(), mock_env(), QueryMsg::Offer { token_id }).unwrap()).unwrap();
    res.offer
}

fn attr(res: &cosmwasm_std::Response, key: &str) -> String {
    res.attributes
        .iter()
        .find(|attr| attr.key == key)
        .map(|attr| attr.value.clone())
        .unwrap()
}

// ─── Offer book ─────────────────────────────────────────────────────────────

#[test]
fn test_instantiate() {
    let deps = setup();
    let config: Config =
        from_json(query(deps.as_ref(), mock_env(), QueryMsg::Config {}).unwrap()).unwrap();
    assert_eq!(config.admin, a(&deps, "admin"));
    assert_eq!(config.commission_bps, 400);
}

#[test]
fn test_create_sell_offer() {
    let mut deps = setup();
    sell_offer(&mut deps, 1, 100);

    let offer = offer_of(&deps, 1).unwrap();
    assert_eq!(offer.seller, a(&deps, "seller").to_string());
    assert_eq!(
        offer.kind,
        OfferKind::Sell {
            price: Uint128::new(100)
        }
    );
}

#[test]
fn test_create_offer_requires_ownership() {
    let mut deps = setup();
    let stranger = a(&deps, "stranger");
    let err = execute(
        deps.as_mut(),
        mock_env(),
        message_info(&stranger, &[]),
        ExecuteMsg::CreateSellOffer {
            token_id: 1,
            price: Uint128::new(100),
        },
    )
    .unwrap_err();
    assert_eq!(err, ContractError::InvalidSender);
}

#[test]
fn test_one_offer_per_item() {
    let mut deps = setup();
    let seller = a(&deps, "seller");
    sell_offer(&mut deps, 1, 100);
    let err = execute(
        deps.as_mut(),
        mock_env(),
        message_info(&seller, &[]),
        ExecuteMsg::CreateRentOffer {
            token_id: 1,
            price: Uint128::new(50),
            duration: 3600,
        },
    )
    .unwrap_err();
    assert_eq!(err, ContractError::OfferAlreadyExists { token_id: 1 });
}

#[test]
fn test_rent_offer_rejects_zero_duration() {
    let mut deps = setup();
    let seller = a(&deps, "seller");
    let err = execute(
        deps.as_mut(),
        mock_env(),
        message_info(&seller, &[]),
        ExecuteMsg::CreateRentOffer {
            token_id: 1,
            price: Uint128::new(50),
            duration: 0,
        },
    )
    .unwrap_err();
    assert_eq!(err, ContractError::ZeroDuration);
}

#[test]
fn test_update_offer_price() {
    let mut deps = setup();
    let seller = a(&deps, "seller");
    rent_offer(&mut deps, 1, 100, 3600);

    execute(
        deps.as_mut(),
        mock_env(),
        message_info(&seller, &[]),
        ExecuteMsg::UpdateOfferPrice {
            token_id: 1,
            price: Uint128::new(70),
        },
    )
    .unwrap();

    // price changed, kind and duration preserved
    assert_eq!(
        offer_of(&deps, 1).unwrap().kind,
        OfferKind::Rent {
            price: Uint128::new(70),
            duration: 3600
        }
    );
}

#[test]
fn test_update_price_seller_only() {
    let mut deps = setup();
    let stranger = a(&deps, "stranger");
    sell_offer(&mut deps, 1, 100);
    let err = execute(
        deps.as_mut(),
        mock_env(),
        message_info(&stranger, &[]),
        ExecuteMsg::UpdateOfferPrice {
            token_id: 1,
            price: Uint128::new(70),
        },
    )
    .unwrap_err();
    assert_eq!(err, ContractError::InvalidSender);
}

#[test]
fn test_update_price_missing_offer() {
    let mut deps = setup();
    let seller = a(&deps, "seller");
    let err = execute(
        deps.as_mut(),
        mock_env(),
        message_info(&seller, &[]),
        ExecuteMsg::UpdateOfferPrice {
            token_id: 1,
            price: Uint128::new(70),
        },
    )
    .unwrap_err();
    assert_eq!(err, ContractError::OfferNotFound { token_id: 1 });
}

#[test]
fn test_cancel_offer() {
    let mut deps = setup();
    let seller = a(&deps, "seller");
    sell_offer(&mut deps, 1, 100);
    execute(
        deps.as_mut(),
        mock_env(),
        message_info(&seller, &[]),
        ExecuteMsg::CancelOffer { token_id: 1 },
    )
    .unwrap();
    assert_eq!(offer_of(&deps, 1), None);
}

// ─── Settlement ─────────────────────────────────────────────────────────────

#[test]
fn test_take_sell_offer_native_splits_commission() {
    let mut deps = setup();
    let buyer = a(&deps, "buyer");
    let seller = a(&deps, "seller");
    let vault = a(&deps, "vault");
    let items = a(&deps, "items");
    sell_offer(&mut deps, 1, 100);

    let res = execute(
        deps.as_mut(),
        mock_env(),
        message_info(&buyer, &[coin(100, DENOM)]),
        ExecuteMsg::TakeOffer {
            token_id: 1,
            payment_token: NATIVE_TOKEN.to_string(),
        },
    )
    .unwrap();

    // 400 bps of 100 = 4 to the vault, 96 to the seller, then the transfer
    assert_eq!(attr(&res, "commission"), "4");
    assert_eq!(attr(&res, "amount"), "100");
    assert_eq!(res.messages.len(), 3);
    assert_eq!(
        res.messages[0].msg,
        CosmosMsg::Bank(BankMsg::Send {
            to_address: vault.to_string(),
            amount: vec![coin(4, DENOM)],
        })
    );
    assert_eq!(
        res.messages[1].msg,
        CosmosMsg::Bank(BankMsg::Send {
            to_address: seller.to_string(),
            amount: vec![coin(96, DENOM)],
        })
    );
    match &res.messages[2].msg {
        CosmosMsg::Wasm(WasmMsg::Execute { contract_addr, msg, .. }) => {
            assert_eq!(contract_addr, items.as_str());
            let inner: ItemExecuteMsg = from_json(msg).unwrap();
            assert_eq!(
                inner,
                ItemExecuteMsg::TransferNft {
                    recipient: buyer.to_string(),
                    token_id: 1,
                }
            );
        }
        other => panic!("expected registry transfer, got {other:?}"),
    }

    // sale clears the offer
    assert_eq!(offer_of(&deps, 1), None);
}

#[test]
fn test_take_offer_refunds_excess_native() {
    let mut deps = setup();
    let buyer = a(&deps, "buyer");
    sell_offer(&mut deps, 1, 100);

    let res = execute(
        deps.as_mut(),
        mock_env(),
        message_info(&buyer, &[coin(120, DENOM)]),
        ExecuteMsg::TakeOffer {
            token_id: 1,
            payment_token: NATIVE_TOKEN.to_string(),
        },
    )
    .unwrap();

    assert_eq!(res.messages.len(), 4);
    assert_eq!(
        res.messages[2].msg,
        CosmosMsg::Bank(BankMsg::Send {
            to_address: buyer.to_string(),
            amount: vec![coin(20, DENOM)],
        })
    );
}

#[test]
fn test_take_offer_underpayment_fails() {
    let mut deps = setup();
    let buyer = a(&deps, "buyer");
    sell_offer(&mut deps, 1, 100);

    let err = execute(
        deps.as_mut(),
        mock_env(),
        message_info(&buyer, &[coin(99, DENOM)]),
        ExecuteMsg::TakeOffer {
            token_id: 1,
            payment_token: NATIVE_TOKEN.to_string(),
        },
    )
    .unwrap_err();
    assert_eq!(err, ContractError::InsufficientFunds);
}

#[test]
fn test_take_sell_offer_with_cw20() {
    let mut deps = mock_dependencies();
    let seller = deps.api.addr_make("seller");
    let moka = deps.api.addr_make("moka");
    set_collaborators(
        &mut deps,
        vec![(1, seller.clone())],
        vec![],
        vec![(moka.to_string(), 1, 1)],
    );
    let admin = deps.api.addr_make("admin");
    let items = deps.api.addr_make("items");
    let payments = deps.api.addr_make("payments");
    let vault = deps.api.addr_make("vault");
    let forwarder = deps.api.addr_make("forwarder");
    instantiate(
        deps.as_mut(),
        mock_env(),
        message_info(&admin, &[]),
        InstantiateMsg {
            admin: admin.to_string(),
            item_contract: items.to_string(),
            payment_methods: payments.to_string(),
            vault: vault.to_string(),
            forwarder: forwarder.to_string(),
            commission_bps: 400,
            native_denom: DENOM.to_string(),
        },
    )
    .unwrap();
    sell_offer(&mut deps, 1, 100);

    let buyer = deps.api.addr_make("buyer");
    let res = execute(
        deps.as_mut(),
        mock_env(),
        message_info(&buyer, &[]),
        ExecuteMsg::TakeOffer {
            token_id: 1,
            payment_token: moka.to_string(),
        },
    )
    .unwrap();

    // two allowance pulls (vault + seller) and the registry transfer
    assert_eq!(res.messages.len(), 3);
    let pull: cw20::Cw20ExecuteMsg = match &res.messages[0].msg {
        CosmosMsg::Wasm(WasmMsg::Execute { msg, .. }) => from_json(msg).unwrap(),
        other => panic!("expected cw20 pull, got {other:?}"),
    };
    assert_eq!(
        pull,
        cw20::Cw20ExecuteMsg::TransferFrom {
            owner: buyer.to_string(),
            recipient: deps.api.addr_make("vault").to_string(),
            amount: Uint128::new(4),
        }
    );
}

#[test]
fn test_take_offer_stale_seller() {
    let mut deps = setup();
    let buyer = a(&deps, "buyer");
    let new_owner = a(&deps, "new-owner");
    sell_offer(&mut deps, 1, 100);

    // the item changed hands outside the marketplace
    set_collaborators(
        &mut deps,
        vec![(1, new_owner)],
        vec![],
        vec![(NATIVE_TOKEN.to_string(), 1, 1)],
    );
    let err = execute(
        deps.as_mut(),
        mock_env(),
        message_info(&buyer, &[coin(100, DENOM)]),
        ExecuteMsg::TakeOffer {
            token_id: 1,
            payment_token: NATIVE_TOKEN.to_string(),
        },
    )
    .unwrap_err();
    assert_eq!(err, ContractError::OfferNotFound { token_id: 1 });
}

#[test]
fn test_take_offer_unknown_payment_token() {
    let mut deps = setup();
    let buyer = a(&deps, "buyer");
    let unknown_token = a(&deps, "unknown-token");
    sell_offer(&mut deps, 1, 100);
    let err = execute(
        deps.as_mut(),
        mock_env(),
        message_info(&buyer, &[]),
        ExecuteMsg::TakeOffer {
            token_id: 1,
            payment_token: unknown_token.to_string(),
        },
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ContractError::PaymentMethodUnavailable { .. }
    ));
}

// ─── Rentals ────────────────────────────────────────────────────────────────

#[test]
fn test_take_rent_offer_assigns_user() {
    let mut deps = setup();
    let renter = a(&deps, "renter");
    rent_offer(&mut deps, 1, 100, 3600);

    let env = mock_env();
    let res = execute(
        deps.as_mut(),
        env.clone(),
        message_info(&renter, &[coin(100, DENOM)]),
        ExecuteMsg::TakeOffer {
            token_id: 1,
            payment_token: NATIVE_TOKEN.to_string(),
        },
    )
    .unwrap();

    let inner: ItemExecuteMsg = match res.messages.last().map(|m| &m.msg) {
        Some(CosmosMsg::Wasm(WasmMsg::Execute { msg, .. })) => from_json(msg).unwrap(),
        other => panic!("expected registry call, got {other:?}"),
    };
    assert_eq!(
        inner,
        ItemExecuteMsg::SetUser {
            token_id: 1,
            user: renter.to_string(),
            expires: env.block.time.plus_seconds(3600),
        }
    );

    // a rental leaves the offer live for the next taker
    assert!(offer_of(&deps, 1).is_some());
}

#[test]
fn test_take_rent_offer_while_rented_fails() {
    let mut deps = setup();
    let renter = a(&deps, "renter");
    let current = a(&deps, "current-renter");
    let seller = a(&deps, "seller");
    rent_offer(&mut deps, 1, 100, 3600);

    set_collaborators(
        &mut deps,
        vec![(1, seller)],
        vec![(1, current)],
        vec![(NATIVE_TOKEN.to_string(), 1, 1)],
    );
    let err = execute(
        deps.as_mut(),
        mock_env(),
        message_info(&renter, &[coin(100, DENOM)]),
        ExecuteMsg::TakeOffer {
            token_id: 1,
            payment_token: NATIVE_TOKEN.to_string(),
        },
    )
    .unwrap_err();
    assert_eq!(err, ContractError::AlreadyRented);
}

#[test]
fn test_rent_offer_retakeable_after_expiry() {
    let mut deps = setup();
    let seller = a(&deps, "seller");
    let first = a(&deps, "first-renter");
    let second = a(&deps, "second-renter");
    rent_offer(&mut deps, 1, 100, 3600);

    execute(
        deps.as_mut(),
        mock_env(),
        message_info(&first, &[coin(100, DENOM)]),
        ExecuteMsg::TakeOffer {
            token_id: 1,
            payment_token: NATIVE_TOKEN.to_string(),
        },
    )
    .unwrap();

    // the registry now reports a live user; the offer is exclusive
    set_collaborators(
        &mut deps,
        vec![(1, seller.clone())],
        vec![(1, first)],
        vec![(NATIVE_TOKEN.to_string(), 1, 1)],
    );
    let err = execute(
        deps.as_mut(),
        mock_env(),
        message_info(&second, &[coin(100, DENOM)]),
        ExecuteMsg::TakeOffer {
            token_id: 1,
            payment_token: NATIVE_TOKEN.to_string(),
        },
    )
    .unwrap_err();
    assert_eq!(err, ContractError::AlreadyRented);

    // once the grant lapses the registry reports no user and the same offer
    // serves the next renter
    set_collaborators(
        &mut deps,
        vec![(1, seller)],
        vec![],
        vec![(NATIVE_TOKEN.to_string(), 1, 1)],
    );
    let res = execute(
        deps.as_mut(),
        mock_env(),
        message_info(&second, &[coin(100, DENOM)]),
        ExecuteMsg::TakeOffer {
            token_id: 1,
            payment_token: NATIVE_TOKEN.to_string(),
        },
    )
    .unwrap();
    let inner: ItemExecuteMsg = match res.messages.last().map(|m| &m.msg) {
        Some(CosmosMsg::Wasm(WasmMsg::Execute { msg, .. })) => from_json(msg).unwrap(),
        other => panic!("expected registry call, got {other:?}"),
    };
    assert_eq!(
        inner,
        ItemExecuteMsg::SetUser {
            token_id: 1,
            user: second.to_string(),
            expires: mock_env().block.time.plus_seconds(3600),
        }
    );
    assert!(offer_of(&deps, 1).is_some());
}

// ─── Admin ──────────────────────────────────────────────────────────────────

#[test]
fn test_update_commission_bounds() {
    let mut deps = setup();
    let admin = a(&deps, "admin");
    execute(
        deps.as_mut(),
        mock_env(),
        message_info(&admin, &[]),
        ExecuteMsg::UpdateCommission {
            commission_bps: 1000,
        },
    )
    .unwrap();

    let err = execute(
        deps.as_mut(),
        mock_env(),
        message_info(&admin, &[]),
        ExecuteMsg::UpdateCommission {
            commission_bps: 10_001,
        },
    )
    .unwrap_err();
    assert_eq!(err, ContractError::InvalidCommission { bps: 10_001 });
}

#[test]
fn test_update_commission_requires_admin() {
    let mut deps = setup();
    let alice = a(&deps, "alice");
    let err = execute(
        deps.as_mut(),
        mock_env(),
        message_info(&alice, &[]),
        ExecuteMsg::UpdateCommission { commission_bps: 0 },
    )
    .unwrap_err();
    assert_eq!(
        err,
        ContractError::Unauthorized {
            role: "admin".to_string()
        }
    );
}

// ─── Relay ──────────────────────────────────────────────────────────────────

#[test]
fn test_relay_substitutes_sender() {
    let mut deps = setup();
    let seller = a(&deps, "seller");
    let forwarder = a(&deps, "forwarder");

    let inner = to_json_binary(&ExecuteMsg::CreateSellOffer {
        token_id: 1,
        price: Uint128::new(100),
    })
    .unwrap();
    execute(
        deps.as_mut(),
        mock_env(),
        message_info(&forwarder, &[]),
        ExecuteMsg::Relay {
            sender: seller.to_string(),
            msg: inner,
        },
    )
    .unwrap();
    assert!(offer_of(&deps, 1).is_some());
}

#[test]
fn test_relay_from_non_forwarder_fails() {
    let mut deps = setup();
    let seller = a(&deps, "seller");
    let alice = a(&deps, "alice");

    let inner = to_json_binary(&ExecuteMsg::CancelOffer { token_id: 1 }).unwrap();
    let err = execute(
        deps.as_mut(),
        mock_env(),
        message_info(&alice, &[]),
        ExecuteMsg::Relay {
            sender: seller.to_string(),
            msg: inner,
        },
    )
    .unwrap_err();
    assert_eq!(
        err,
        ContractError::Unauthorized {
            role: "forwarder".to_string()
        }
    );
}
