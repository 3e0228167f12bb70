use soroban_sdk::{contracttype, symbol_short, Env, Symbol};

use crate::accumulator::SCALE;
use crate::errors::VaultError;

const CONFIG: Symbol = symbol_short!("CONFIG");

/// Denominator for every basis-point fee.
pub const BPS_DENOMINATOR: i128 = 10_000;

/// Immutable vault parameters, fixed at `initialize`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultConfig {
    /// Fee taken from every deposit and forwarded to the operator.
    pub deposit_fee_bps: u32,
    /// Fee taken from the principal of every withdrawal.
    pub withdraw_fee_bps: u32,
    /// Seconds a deposit must sit before any withdrawal. Restarted by each deposit.
    pub lockup_duration: u64,
    /// Last timestamp (inclusive) at which deposits are accepted.
    pub deposit_window_end: u64,
    /// Total reward units the schedule releases over `disbursement_duration`.
    pub disbursement_target: i128,
    pub disbursement_duration: u64,
    /// Earliest timestamp at which the operator may sweep the reward asset.
    pub admin_claimable_at: u64,
}

impl VaultConfig {
    pub fn validate(&self) -> Result<(), VaultError> {
        if self.deposit_fee_bps as i128 > BPS_DENOMINATOR
            || self.withdraw_fee_bps as i128 > BPS_DENOMINATOR
        {
            return Err(VaultError::InvalidConfig);
        }
        if self.disbursement_duration == 0 || self.disbursement_target < 0 {
            return Err(VaultError::InvalidConfig);
        }
        // Every accrual scales a release by both of these; a target that
        // overflows either would make accrue, and so every exit, fail.
        let target = self.disbursement_target;
        if target.checked_mul(SCALE).is_none()
            || target
                .checked_mul(self.disbursement_duration as i128)
                .is_none()
        {
            return Err(VaultError::InvalidConfig);
        }
        Ok(())
    }

    pub fn deposit_fee(&self, amount: i128) -> Result<i128, VaultError> {
        fee_for(amount, self.deposit_fee_bps)
    }

    pub fn withdraw_fee(&self, amount: i128) -> Result<i128, VaultError> {
        fee_for(amount, self.withdraw_fee_bps)
    }
}

/// `floor(amount × bps / 10_000)`.
pub fn fee_for(amount: i128, bps: u32) -> Result<i128, VaultError> {
    amount
        .checked_mul(bps as i128)
        .map(|scaled| scaled / BPS_DENOMINATOR)
        .ok_or(VaultError::MathOverflow)
}

/// Deposit cut-off used by the reference deployment: deposits close one
/// lockup before the disbursement window ends, so the last depositor can
/// still exit while rewards are flowing.
pub fn standard_deposit_window_end(
    start: u64,
    disbursement_duration: u64,
    lockup_duration: u64,
) -> u64 {
    start
        .saturating_add(disbursement_duration)
        .saturating_sub(lockup_duration)
}

pub fn store(env: &Env, config: &VaultConfig) {
    env.storage().instance().set(&CONFIG, config);
}

pub fn load(env: &Env) -> Result<VaultConfig, VaultError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(VaultError::NotInitialized)
}
