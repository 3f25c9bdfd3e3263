use cosmwasm_std::testing::{message_info, mock_dependencies, mock_env, MockApi, MockQuerier};
use cosmwasm_std::{coin, from_json, Addr, MemoryStorage, OwnedDeps};

use curio_policy::contract::{execute, instantiate, query};
use curio_policy::error::ContractError;
use curio_policy::msg::*;
use curio_policy::state::Config;

type TestDeps = OwnedDeps<MemoryStorage, MockApi, MockQuerier>;

fn a(deps: &TestDeps, name: &str) -> Addr {
    deps.api.addr_make(name)
}

fn setup() -> TestDeps {
    let mut deps = mock_dependencies();
    let admin = deps.api.addr_make("admin");
    let msg = InstantiateMsg {
        admin: admin.to_string(),
    };
    let info = message_info(&admin, &[]);
    instantiate(deps.as_mut(), mock_env(), info, msg).unwrap();
    deps
}

fn set_blacklist(deps: &mut TestDeps, account: &Addr, blacklisted: bool) {
    let admin = deps.api.addr_make("admin");
    let info = message_info(&admin, &[]);
    execute(
        deps.as_mut(),
        mock_env(),
        info,
        ExecuteMsg::SetBlacklistForAccount {
            account: account.to_string(),
            blacklisted,
        },
    )
    .unwrap();
}

fn can_transfer(
    deps: &TestDeps,
    operator: &Addr,
    from: Option<&Addr>,
    to: Option<&Addr>,
) -> bool {
    let res: CanTransferResponse = from_json(
        query(
            deps.as_ref(),
            mock_env(),
            QueryMsg::CanTransfer {
                operator: operator.to_string(),
                from: from.map(|a| a.to_string()),
                to: to.map(|a| a.to_string()),
                token_id: 1,
            },
        )
        .unwrap(),
    )
    .unwrap();
    res.allowed
}

#[test]
fn test_instantiate() {
    let deps = setup();
    let config: Config =
        from_json(query(deps.as_ref(), mock_env(), QueryMsg::Config {}).unwrap()).unwrap();
    assert_eq!(config.admin, a(&deps, "admin"));
}

#[test]
fn test_default_allows_everyone() {
    let deps = setup();
    let alice = a(&deps, "alice");
    let bob = a(&deps, "bob");
    assert!(can_transfer(&deps, &alice, Some(&alice), Some(&bob)));
    assert!(can_transfer(&deps, &alice, None, Some(&bob)));
}

#[test]
fn test_blacklisted_recipient_denied() {
    let mut deps = setup();
    let alice = a(&deps, "alice");
    let bob = a(&deps, "bob");
    set_blacklist(&mut deps, &bob, true);

    assert!(!can_transfer(&deps, &alice, Some(&alice), Some(&bob)));
    // Mints to a blacklisted recipient are denied too
    assert!(!can_transfer(&deps, &alice, None, Some(&bob)));
}

#[test]
fn test_blacklisted_sender_denied() {
    let mut deps = setup();
    let alice = a(&deps, "alice");
    let bob = a(&deps, "bob");
    set_blacklist(&mut deps, &alice, true);

    assert!(!can_transfer(&deps, &bob, Some(&alice), Some(&bob)));
}

#[test]
fn test_blacklist_removal_restores_access() {
    let mut deps = setup();
    let alice = a(&deps, "alice");
    let bob = a(&deps, "bob");
    set_blacklist(&mut deps, &bob, true);
    assert!(!can_transfer(&deps, &alice, Some(&alice), Some(&bob)));

    set_blacklist(&mut deps, &bob, false);
    assert!(can_transfer(&deps, &alice, Some(&alice), Some(&bob)));
}

#[test]
fn test_blacklisted_operator_denied_unless_core() {
    let mut deps = setup();
    let admin = a(&deps, "admin");
    let market = a(&deps, "market");
    let alice = a(&deps, "alice");
    let bob = a(&deps, "bob");
    set_blacklist(&mut deps, &market, true);

    assert!(!can_transfer(&deps, &market, Some(&alice), Some(&bob)));

    let info = message_info(&admin, &[]);
    execute(
        deps.as_mut(),
        mock_env(),
        info,
        ExecuteMsg::SetCoreContract {
            contract: market.to_string(),
            enabled: true,
        },
    )
    .unwrap();

    assert!(can_transfer(&deps, &market, Some(&alice), Some(&bob)));
}

#[test]
fn test_set_blacklist_non_admin_fails() {
    let mut deps = setup();
    let alice = a(&deps, "alice");
    let info = message_info(&alice, &[]);
    let err = execute(
        deps.as_mut(),
        mock_env(),
        info,
        ExecuteMsg::SetBlacklistForAccount {
            account: alice.to_string(),
            blacklisted: true,
        },
    )
    .unwrap_err();
    assert_eq!(
        err,
        ContractError::Unauthorized {
            role: "admin".to_string()
        }
    );
}

#[test]
fn test_set_core_contract_emits_event() {
    let mut deps = setup();
    let admin = a(&deps, "admin");
    let market = a(&deps, "market");
    let info = message_info(&admin, &[]);
    let res = execute(
        deps.as_mut(),
        mock_env(),
        info,
        ExecuteMsg::SetCoreContract {
            contract: market.to_string(),
            enabled: true,
        },
    )
    .unwrap();
    assert!(res
        .attributes
        .iter()
        .any(|attr| attr.key == "action" && attr.value == "core_contract"));

    let res: CoreContractResponse = from_json(
        query(
            deps.as_ref(),
            mock_env(),
            QueryMsg::CoreContract {
                contract: market.to_string(),
            },
        )
        .unwrap(),
    )
    .unwrap();
    assert!(res.enabled);
}

#[test]
fn test_update_admin() {
    let mut deps = setup();
    let admin = a(&deps, "admin");
    let new_admin = a(&deps, "new_admin");

    let info = message_info(&admin, &[]);
    execute(
        deps.as_mut(),
        mock_env(),
        info,
        ExecuteMsg::UpdateAdmin {
            admin: new_admin.to_string(),
        },
    )
    .unwrap();

    // Old admin is locked out, new admin works
    let info = message_info(&admin, &[]);
    let err = execute(
        deps.as_mut(),
        mock_env(),
        info,
        ExecuteMsg::SetBlacklistForAccount {
            account: admin.to_string(),
            blacklisted: true,
        },
    )
    .unwrap_err();
    assert!(matches!(err, ContractError::Unauthorized { .. }));

    let info = message_info(&new_admin, &[]);
    execute(
        deps.as_mut(),
        mock_env(),
        info,
        ExecuteMsg::SetBlacklistForAccount {
            account: admin.to_string(),
            blacklisted: true,
        },
    )
    .unwrap();
}

#[test]
fn test_rejects_funds() {
    let mut deps = setup();
    let admin = a(&deps, "admin");
    let info = message_info(&admin, &[coin(5, "ucurio")]);
    let err = execute(
        deps.as_mut(),
        mock_env(),
        info,
        ExecuteMsg::SetBlacklistForAccount {
            account: admin.to_string(),
            blacklisted: true,
        },
    )
    .unwrap_err();
    assert_eq!(err, ContractError::UnexpectedFunds);
}
