#![no_main]

use arbitrary::Arbitrary;
use dividend_vault::{DividendVault, DividendVaultClient, VaultConfig};
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Deposit { who: u8, amount: u32 },
    Withdraw { who: u8, amount: u32 },
    EmergencyWithdraw { who: u8, amount: u32 },
    Claim { who: u8 },
    Fund { amount: u32 },
    Advance { secs: u32 },
}

fn grant(env: &Env, token: &Address, owner: &Address, spender: &Address, amount: i128) {
    StellarAssetClient::new(env, token).mint(owner, &amount);
    let expiry = env.ledger().sequence() + 10_000;
    TokenClient::new(env, token).approve(owner, spender, &amount, &expiry);
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_000_000);

    let deposit = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(DividendVault, ());
    let client = DividendVaultClient::new(&env, &contract_id);
    let operator = Address::generate(&env);

    let config = VaultConfig {
        deposit_fee_bps: 30,
        withdraw_fee_bps: 70,
        lockup_duration: 3_600,
        deposit_window_end: u64::MAX,
        disbursement_target: 10_000_000,
        disbursement_duration: 30 * 86_400,
        admin_claimable_at: u64::MAX,
    };
    client.initialize(&operator, &deposit, &reward, &config);

    let users: Vec<Address> = (0..6).map(|_| Address::generate(&env)).collect();
    let mut last_rps = 0i128;

    // Rejected calls are expected; the point is that accepted ones never
    // break the stake-sum or monotonicity invariants and nothing traps.
    for action in actions {
        match action {
            FuzzAction::Deposit { who, amount } => {
                let caller = &users[who as usize % users.len()];
                grant(&env, &deposit, caller, &contract_id, amount as i128);
                let _ = client.try_deposit(caller, &(amount as i128));
            }
            FuzzAction::Withdraw { who, amount } => {
                let caller = &users[who as usize % users.len()];
                let _ = client.try_withdraw(caller, &(amount as i128));
            }
            FuzzAction::EmergencyWithdraw { who, amount } => {
                let caller = &users[who as usize % users.len()];
                let _ = client.try_emergency_withdraw(caller, &(amount as i128));
            }
            FuzzAction::Claim { who } => {
                let caller = &users[who as usize % users.len()];
                let _ = client.try_claim(caller);
            }
            FuzzAction::Fund { amount } => {
                grant(&env, &reward, &operator, &contract_id, amount as i128);
                let _ = client.try_add_contract_balance(&operator, &(amount as i128));
            }
            FuzzAction::Advance { secs } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now + secs as u64);
            }
        }

        let state = client.get_accrual_state();
        assert!(state.reward_per_share >= last_rps);
        last_rps = state.reward_per_share;

        let staked: i128 = users.iter().map(|u| client.get_staked(u)).sum();
        assert_eq!(staked, state.total_staked);
        assert_eq!(
            TokenClient::new(&env, &deposit).balance(&contract_id),
            state.total_staked
        );
        assert!(state.total_claimed + state.total_forfeited <= state.total_disbursed);
        assert!(state.total_disbursed + state.total_skipped <= config.disbursement_target);
    }
});
