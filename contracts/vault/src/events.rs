#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

use crate::config::VaultConfig;

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the vault is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultInitializedEvent {
    pub admin: Address,
    pub deposit_token: Address,
    pub reward_token: Address,
    pub config: VaultConfig,
    pub timestamp: u64,
}

/// Fired on every deposit.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub holder: Address,
    /// Registry slot the holder occupies after the deposit.
    pub index: u32,
    /// Net amount credited to the stake.
    pub amount: i128,
    pub fee: i128,
    pub lockup_start: u64,
    pub lockup_end: u64,
    pub timestamp: u64,
}

/// Fired on `withdraw` and `emergency_withdraw`.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakedEvent {
    pub holder: Address,
    /// Registry slot the holder occupied before the withdrawal.
    pub index: u32,
    /// Stake removed, before the withdraw fee.
    pub amount: i128,
    pub fee: i128,
    pub lockup_start: u64,
    pub lockup_end: u64,
    /// True for emergency withdrawals, which forfeit pending rewards.
    pub early: bool,
    pub timestamp: u64,
}

/// Fired whenever a non-zero reward is transferred to a holder.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardPaidEvent {
    pub holder: Address,
    pub amount: i128,
    pub total_earned: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardForfeitedEvent {
    pub holder: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when the operator tops up the reward pool.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardFundedEvent {
    pub funder: Address,
    pub amount: i128,
    pub new_reward_pool: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SweptEvent {
    pub asset: Address,
    pub to: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when an admin transfer is proposed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferProposedEvent {
    pub current_admin: Address,
    pub proposed_admin: Address,
    pub timestamp: u64,
}

/// Fired when an admin transfer is accepted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferAcceptedEvent {
    pub old_admin: Address,
    pub new_admin: Address,
    pub timestamp: u64,
}

/// Fired when a pending admin transfer is cancelled.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferCancelledEvent {
    pub admin: Address,
    pub cancelled_proposed: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    admin: Address,
    deposit_token: Address,
    reward_token: Address,
    config: VaultConfig,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        VaultInitializedEvent {
            admin,
            deposit_token,
            reward_token,
            config,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(
    env: &Env,
    holder: Address,
    index: u32,
    amount: i128,
    fee: i128,
    lockup_start: u64,
    lockup_end: u64,
) {
    env.events().publish(
        (symbol_short!("STAKED"), holder.clone()),
        StakedEvent {
            holder,
            index,
            amount,
            fee,
            lockup_start,
            lockup_end,
            timestamp: env.ledger().timestamp(),
        },
    );
}

#[allow(clippy::too_many_arguments)]
pub fn publish_unstaked(
    env: &Env,
    holder: Address,
    index: u32,
    amount: i128,
    fee: i128,
    lockup_start: u64,
    lockup_end: u64,
    early: bool,
) {
    env.events().publish(
        (symbol_short!("UNSTAKED"), holder.clone()),
        UnstakedEvent {
            holder,
            index,
            amount,
            fee,
            lockup_start,
            lockup_end,
            early,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_paid(env: &Env, holder: Address, amount: i128, total_earned: i128) {
    env.events().publish(
        (symbol_short!("CLAIMED"), holder.clone()),
        RewardPaidEvent {
            holder,
            amount,
            total_earned,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_forfeited(env: &Env, holder: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("FORFEIT"), holder.clone()),
        RewardForfeitedEvent {
            holder,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_funded(env: &Env, funder: Address, amount: i128, new_reward_pool: i128) {
    env.events().publish(
        (symbol_short!("FUNDED"),),
        RewardFundedEvent {
            funder,
            amount,
            new_reward_pool,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_swept(env: &Env, asset: Address, to: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("SWEPT"), asset.clone()),
        SweptEvent {
            asset,
            to,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_proposed(env: &Env, current_admin: Address, proposed_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_PROP"), current_admin.clone()),
        AdminTransferProposedEvent {
            current_admin,
            proposed_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_accepted(env: &Env, old_admin: Address, new_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_ACPT"), new_admin.clone()),
        AdminTransferAcceptedEvent {
            old_admin,
            new_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_cancelled(env: &Env, admin: Address, cancelled_proposed: Address) {
    env.events().publish(
        (symbol_short!("ADM_CNCL"), admin.clone()),
        AdminTransferCancelledEvent {
            admin,
            cancelled_proposed,
            timestamp: env.ledger().timestamp(),
        },
    );
}
