//! Disbursement accumulator.
//!
//! The reward pool is released linearly over the configured disbursement
//! window and folded into a single scaled reward-per-share value:
//!
//! ```text
//! vested(now)     = target × min(now − start, duration) / duration
//! due             = vested(now) − total_disbursed − total_skipped
//! released        = min(due, reward_pool), or 0 when nothing is staked
//! total_skipped  += due − released
//! reward_per_share += released × SCALE / total_staked
//! ```
//!
//! A holder's entitlement is then `staked × (reward_per_share − checkpoint) / SCALE`,
//! which makes every operation O(1) in the number of holders.
//!
//! Each stretch of the schedule is settled exactly once, by the accrual that
//! first covers it. Whatever that accrual cannot release (no stake, or an
//! empty pool) is skipped for good: the units stay in `reward_pool` but are
//! never paid for that stretch, so stake that arrives later, or a later
//! top-up, only ever earns from the schedule going forward. Because `due` is
//! computed against the cumulative schedule, `total_disbursed + total_skipped`
//! tracks it to within the final floor no matter how often `accrue` runs.

use soroban_sdk::{contracttype, symbol_short, Env, Symbol};

use crate::config::VaultConfig;
use crate::errors::VaultError;

const ACCRUAL: Symbol = symbol_short!("ACCRUAL");

/// Fixed-point scaling factor for `reward_per_share` (12 decimal places).
pub const SCALE: i128 = 1_000_000_000_000;

/// Global vault bookkeeping. Mutated only through [`accrue`] and the
/// entry points in `lib.rs`, each of which runs as one atomic invocation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccrualState {
    /// Reward units funded but not yet released to stakers.
    pub reward_pool: i128,
    /// Cumulative reward per staked unit, scaled by [`SCALE`]. Never decreases.
    pub reward_per_share: i128,
    pub last_accrual_time: u64,
    /// Sum of every holder's `staked_amount`.
    pub total_staked: i128,
    /// Reward units moved out of the pool into `reward_per_share`. Capped at the target.
    pub total_disbursed: i128,
    pub total_claimed: i128,
    /// Entitlements discarded by emergency withdrawals.
    pub total_forfeited: i128,
    /// Scheduled units that came due with nothing staked or an empty pool.
    /// Never released; the funds stay in `reward_pool`.
    pub total_skipped: i128,
    /// Disbursement schedule origin (initialization time).
    pub start_time: u64,
}

impl AccrualState {
    pub fn new(start_time: u64) -> Self {
        Self {
            reward_pool: 0,
            reward_per_share: 0,
            last_accrual_time: start_time,
            total_staked: 0,
            total_disbursed: 0,
            total_claimed: 0,
            total_forfeited: 0,
            total_skipped: 0,
            start_time,
        }
    }

    /// Portion of the schedule that has come due since the last accrual.
    fn due(&self, config: &VaultConfig, now: u64) -> Result<i128, VaultError> {
        let vested = vested(
            config.disbursement_target,
            self.start_time,
            config.disbursement_duration,
            now,
        )?;
        let settled = self
            .total_disbursed
            .checked_add(self.total_skipped)
            .ok_or(VaultError::MathOverflow)?;
        Ok(vested
            .checked_sub(settled)
            .ok_or(VaultError::MathOverflow)?
            .max(0))
    }

    /// Amount the next accrual at `now` would move out of the pool.
    pub fn releasable(&self, config: &VaultConfig, now: u64) -> Result<i128, VaultError> {
        if self.total_staked <= 0 {
            return Ok(0);
        }
        Ok(self.due(config, now)?.min(self.reward_pool))
    }

    /// Release what the schedule allows at `now` and fold it into
    /// `reward_per_share`. Returns the released amount.
    ///
    /// The part of the due amount that cannot be released is skipped, so
    /// it is never handed to stake or funding that arrives afterwards.
    pub fn advance(&mut self, config: &VaultConfig, now: u64) -> Result<i128, VaultError> {
        let due = self.due(config, now)?;
        let released = self.releasable(config, now)?;
        if released > 0 {
            let delta = reward_per_share_delta(released, self.total_staked)?;
            self.reward_per_share = self
                .reward_per_share
                .checked_add(delta)
                .ok_or(VaultError::MathOverflow)?;
            self.reward_pool -= released;
            self.total_disbursed = self
                .total_disbursed
                .checked_add(released)
                .ok_or(VaultError::MathOverflow)?;
        }
        self.total_skipped = self
            .total_skipped
            .checked_add(due - released)
            .ok_or(VaultError::MathOverflow)?;
        self.last_accrual_time = self.last_accrual_time.max(now);
        Ok(released)
    }
}

// ── Pure math ────────────────────────────────────────────────────────────────

/// Portion of `target` the linear schedule has unlocked by `now`.
pub fn vested(target: i128, start: u64, duration: u64, now: u64) -> Result<i128, VaultError> {
    if duration == 0 {
        return Ok(target);
    }
    let elapsed = now.saturating_sub(start).min(duration);
    target
        .checked_mul(elapsed as i128)
        .map(|v| v / duration as i128)
        .ok_or(VaultError::MathOverflow)
}

/// `released × SCALE / total_staked`, zero when nothing is staked.
pub fn reward_per_share_delta(released: i128, total_staked: i128) -> Result<i128, VaultError> {
    if total_staked <= 0 {
        return Ok(0);
    }
    released
        .checked_mul(SCALE)
        .map(|v| v / total_staked)
        .ok_or(VaultError::MathOverflow)
}

/// `staked × (current − checkpoint) / SCALE`.
pub fn entitlement(staked: i128, current: i128, checkpoint: i128) -> Result<i128, VaultError> {
    if staked <= 0 || current <= checkpoint {
        return Ok(0);
    }
    staked
        .checked_mul(current - checkpoint)
        .map(|v| v / SCALE)
        .ok_or(VaultError::MathOverflow)
}

// ── Storage ──────────────────────────────────────────────────────────────────

pub fn store(env: &Env, state: &AccrualState) {
    env.storage().instance().set(&ACCRUAL, state);
}

pub fn load(env: &Env) -> Result<AccrualState, VaultError> {
    env.storage()
        .instance()
        .get(&ACCRUAL)
        .ok_or(VaultError::NotInitialized)
}

/// Bring the accumulator up to the current ledger time and persist it.
pub fn accrue(env: &Env, config: &VaultConfig) -> Result<AccrualState, VaultError> {
    let mut state = load(env)?;
    state.advance(config, env.ledger().timestamp())?;
    store(env, &state);
    Ok(state)
}

/// What [`accrue`] would produce right now, without writing anything.
pub fn project(env: &Env, config: &VaultConfig) -> Result<AccrualState, VaultError> {
    let mut state = load(env)?;
    state.advance(config, env.ledger().timestamp())?;
    Ok(state)
}
