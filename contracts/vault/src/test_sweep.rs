extern crate std;

use soroban_sdk::{testutils::Address as _, token::StellarAssetClient, Address};

use crate::test::{fee_free_config, setup, setup_with, START, WINDOW};
use crate::VaultError;

#[test]
fn test_sweep_requires_operator() {
    let v = setup();
    let intruder = Address::generate(&v.env);

    let result = v
        .client
        .try_sweep(&intruder, &v.reward_token, &intruder, &1);
    assert_eq!(result, Err(Ok(VaultError::PermissionDenied)));
}

#[test]
fn test_sweep_rejects_zero_amount() {
    let v = setup();
    let to = Address::generate(&v.env);
    v.set_time(START + 2 * WINDOW);

    let result = v.client.try_sweep(&v.admin, &v.reward_token, &to, &0);
    assert_eq!(result, Err(Ok(VaultError::InvalidAmount)));
}

#[test]
fn test_deposit_asset_is_never_sweepable() {
    let v = setup();
    let alice = v.holder(1_000);
    v.client.deposit(&alice, &1_000);

    // Not even after the reward timelock.
    v.set_time(START + 10 * WINDOW);
    let result = v
        .client
        .try_sweep(&v.admin, &v.deposit_token, &v.admin, &1);
    assert_eq!(result, Err(Ok(VaultError::ProtectedAsset)));
    assert_eq!(v.deposit_balance(&v.client.address), 995);
}

#[test]
fn test_reward_sweep_waits_for_timelock() {
    let v = setup();
    v.fund_rewards(1_000);
    let to = Address::generate(&v.env);

    v.set_time(START + 2 * WINDOW - 1);
    let result = v.client.try_sweep(&v.admin, &v.reward_token, &to, &100);
    assert_eq!(result, Err(Ok(VaultError::NotYetClaimable)));

    v.set_time(START + 2 * WINDOW);
    v.client.sweep(&v.admin, &v.reward_token, &to, &100);
    assert_eq!(v.reward_balance(&to), 100);
    assert_eq!(v.client.get_reward_pool(), 900);
}

#[test]
fn test_reward_sweep_capped_by_held_balance() {
    let v = setup();
    v.fund_rewards(1_000);
    let to = Address::generate(&v.env);
    v.set_time(START + 2 * WINDOW);

    let result = v.client.try_sweep(&v.admin, &v.reward_token, &to, &1_001);
    assert_eq!(result, Err(Ok(VaultError::InsufficientBalance)));

    v.client.sweep(&v.admin, &v.reward_token, &to, &1_000);
    assert_eq!(v.reward_balance(&v.client.address), 0);
    assert_eq!(v.client.get_reward_pool(), 0);
}

#[test]
fn test_reward_sweep_does_not_reserve_entitlements() {
    let v = setup_with(fee_free_config());
    let alice = v.holder(1_000);
    v.fund_rewards(1_000);
    v.client.deposit(&alice, &1_000);

    v.set_time(START + 2 * WINDOW);
    assert_eq!(v.client.get_estimated_pending_divs(&alice), 1_000);

    // The operator can take everything, leaving the entitlement unbacked.
    v.client.sweep(&v.admin, &v.reward_token, &v.admin, &1_000);
    assert_eq!(v.client.get_total_disbursed(), 1_000);
    assert_eq!(
        v.client.try_claim(&alice),
        Err(Ok(VaultError::InsufficientBalance))
    );

    // Principal stays recoverable via the forfeiting path.
    v.client.emergency_withdraw(&alice, &1_000);
    assert_eq!(v.deposit_balance(&alice), 1_000);
}

#[test]
fn test_unrelated_token_sweepable_anytime() {
    let v = setup();
    let stray = v
        .env
        .register_stellar_asset_contract_v2(Address::generate(&v.env))
        .address();
    StellarAssetClient::new(&v.env, &stray).mint(&v.client.address, &250);
    let to = Address::generate(&v.env);

    v.client.sweep(&v.admin, &stray, &to, &250);

    let stray_client = soroban_sdk::token::Client::new(&v.env, &stray);
    assert_eq!(stray_client.balance(&to), 250);
    assert_eq!(stray_client.balance(&v.client.address), 0);

    let result = v.client.try_sweep(&v.admin, &stray, &to, &1);
    assert_eq!(result, Err(Ok(VaultError::InsufficientBalance)));
}
