#![no_std]

pub mod accumulator;
pub mod asset;
pub mod config;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod registry;

use soroban_sdk::{contract, contractimpl, contracttype, symbol_short, Address, Env, Symbol, Vec};

pub use accumulator::{AccrualState, SCALE};
pub use config::VaultConfig;
pub use errors::VaultError;
pub use ledger::{Holder, HolderStatus};

// ── Storage key constants ────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const PENDING_ADMIN: Symbol = symbol_short!("PEND_ADM");
const INITIALIZED: Symbol = symbol_short!("INIT");
const DEPOSIT_TOKEN: Symbol = symbol_short!("DEP_TOK");
const REWARD_TOKEN: Symbol = symbol_short!("RWD_TOK");

// ── Public-facing types ──────────────────────────────────────────────────────

/// One page of the holder registry, as parallel arrays.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HoldersPage {
    pub holders: Vec<Address>,
    pub deposit_times: Vec<u64>,
    pub last_claimed_times: Vec<u64>,
    pub staked_amounts: Vec<i128>,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct DividendVault;

#[contractimpl]
impl DividendVault {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the vault.
    ///
    /// * `admin`         – operator; receives fees, funds rewards, may sweep.
    /// * `deposit_token` – asset holders stake. Never sweepable.
    /// * `reward_token`  – asset paid out as rewards.
    /// * `config`        – fees, lockup, deposit window and disbursement schedule.
    ///
    /// The disbursement schedule starts at the current ledger time.
    pub fn initialize(
        env: Env,
        admin: Address,
        deposit_token: Address,
        reward_token: Address,
        config: VaultConfig,
    ) -> Result<(), VaultError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(VaultError::AlreadyInitialized);
        }
        if deposit_token == reward_token {
            return Err(VaultError::TokensIdentical);
        }
        config.validate()?;

        let now = env.ledger().timestamp();

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&DEPOSIT_TOKEN, &deposit_token);
        env.storage().instance().set(&REWARD_TOKEN, &reward_token);
        config::store(&env, &config);
        accumulator::store(&env, &AccrualState::new(now));
        Self::bump_instance(&env);

        events::publish_initialized(&env, admin, deposit_token, reward_token, config);

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Stake `amount` deposit tokens, pulled through the holder's allowance.
    ///
    /// The deposit fee goes straight to the operator. The accumulator is
    /// flushed before the new stake is credited, and any reward pending on
    /// an existing stake is paid out, so neither old nor new principal is
    /// mispriced. Restarts the lockup for the whole balance.
    pub fn deposit(env: Env, holder: Address, amount: i128) -> Result<(), VaultError> {
        let config = config::load(&env)?;
        holder.require_auth();

        if amount <= 0 {
            return Err(VaultError::InvalidAmount);
        }
        let now = env.ledger().timestamp();
        if now > config.deposit_window_end {
            return Err(VaultError::DepositsClosed);
        }

        let fee = config.deposit_fee(amount)?;
        let net = amount - fee;
        if net <= 0 {
            return Err(VaultError::InvalidAmount);
        }

        // 1. Pull principal and forward the fee.
        let deposit_token = Self::deposit_token(&env)?;
        asset::pull(&env, &deposit_token, &holder, amount)?;
        if fee > 0 {
            let operator = Self::get_admin(env.clone())?;
            asset::push(&env, &deposit_token, &operator, fee)?;
        }

        // 2. Flush the accumulator and settle the existing stake.
        let mut state = accumulator::accrue(&env, &config)?;
        let mut record = ledger::get_or_empty(&env, &holder);
        let pending = record.settle(state.reward_per_share)?;
        Self::pay_reward(&env, &holder, &mut record, &mut state, pending, now)?;

        // 3. Credit the new stake.
        record.staked_amount = record
            .staked_amount
            .checked_add(net)
            .ok_or(VaultError::MathOverflow)?;
        record.deposit_time = now;
        state.total_staked = state
            .total_staked
            .checked_add(net)
            .ok_or(VaultError::MathOverflow)?;

        ledger::put(&env, &holder, &record);
        accumulator::store(&env, &state);
        let index = registry::register(&env, &holder);
        Self::bump_instance(&env);

        events::publish_staked(
            &env,
            holder,
            index,
            net,
            fee,
            now,
            record.lockup_end(config.lockup_duration),
        );

        Ok(())
    }

    /// Withdraw `amount` of stake once the lockup has elapsed, paying out
    /// pending reward. The withdraw fee is taken from the returned principal.
    pub fn withdraw(env: Env, holder: Address, amount: i128) -> Result<(), VaultError> {
        Self::unstake(&env, &holder, amount, false)
    }

    /// Same as [`withdraw`](Self::withdraw) but pending reward is forfeited
    /// instead of paid. Still subject to the lockup.
    pub fn emergency_withdraw(env: Env, holder: Address, amount: i128) -> Result<(), VaultError> {
        Self::unstake(&env, &holder, amount, true)
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Pay the holder's pending reward. Zero payouts succeed and still
    /// advance `last_claimed_time`.
    pub fn claim(env: Env, holder: Address) -> Result<i128, VaultError> {
        let config = config::load(&env)?;
        holder.require_auth();

        let now = env.ledger().timestamp();
        let mut state = accumulator::accrue(&env, &config)?;

        let Some(mut record) = ledger::get(&env, &holder) else {
            // Never deposited; nothing to settle and no record to create.
            return Ok(0);
        };

        let pending = record.settle(state.reward_per_share)?;
        Self::pay_reward(&env, &holder, &mut record, &mut state, pending, now)?;

        ledger::put(&env, &holder, &record);
        accumulator::store(&env, &state);
        Self::bump_instance(&env);

        Ok(pending)
    }

    /// Operator top-up of the reward pool. Only `accrue` turns pooled
    /// units into distributed credit.
    pub fn add_contract_balance(env: Env, operator: Address, amount: i128) -> Result<(), VaultError> {
        let config = config::load(&env)?;
        operator.require_auth();
        Self::require_admin(&env, &operator)?;

        if amount <= 0 {
            return Err(VaultError::InvalidAmount);
        }

        let mut state = accumulator::accrue(&env, &config)?;

        let reward_token = Self::reward_token(&env)?;
        asset::pull(&env, &reward_token, &operator, amount)?;

        state.reward_pool = state
            .reward_pool
            .checked_add(amount)
            .ok_or(VaultError::MathOverflow)?;
        accumulator::store(&env, &state);
        Self::bump_instance(&env);

        events::publish_reward_funded(&env, operator, amount, state.reward_pool);

        Ok(())
    }

    // ── Admin sweep ─────────────────────────────────────────────────────────

    /// Recover tokens held by the vault.
    ///
    /// The deposit asset is never recoverable. The reward asset is locked
    /// until `admin_claimable_at`; after that it can be swept up to the
    /// vault's actual balance, with no reservation for unpaid entitlements.
    /// Any other asset can be swept at any time.
    pub fn sweep(
        env: Env,
        operator: Address,
        token: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), VaultError> {
        let config = config::load(&env)?;
        operator.require_auth();
        Self::require_admin(&env, &operator)?;

        if amount <= 0 {
            return Err(VaultError::InvalidAmount);
        }
        if token == Self::deposit_token(&env)? {
            return Err(VaultError::ProtectedAsset);
        }
        let is_reward = token == Self::reward_token(&env)?;
        if is_reward && env.ledger().timestamp() < config.admin_claimable_at {
            return Err(VaultError::NotYetClaimable);
        }
        if asset::held(&env, &token) < amount {
            return Err(VaultError::InsufficientBalance);
        }

        if is_reward {
            // Undistributed pool is reclaimed first so it never exceeds what the vault holds.
            let mut state = accumulator::accrue(&env, &config)?;
            state.reward_pool -= amount.min(state.reward_pool);
            accumulator::store(&env, &state);
        }

        asset::push(&env, &token, &to, amount)?;
        Self::bump_instance(&env);

        events::publish_swept(&env, token, to, amount);

        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Reward `holder` would receive from `claim` right now. Projects the
    /// accumulator without committing it.
    pub fn get_estimated_pending_divs(env: Env, holder: Address) -> Result<i128, VaultError> {
        let config = config::load(&env)?;
        let state = accumulator::project(&env, &config)?;
        match ledger::get(&env, &holder) {
            Some(record) => record.pending(state.reward_per_share),
            None => Ok(0),
        }
    }

    /// Reward units the next accrual would move out of the pool.
    pub fn get_pending_disbursement(env: Env) -> Result<i128, VaultError> {
        let config = config::load(&env)?;
        let state = accumulator::load(&env)?;
        state.releasable(&config, env.ledger().timestamp())
    }

    /// Page through the registry. Pages are independent snapshots; holders
    /// joining or leaving between calls can shift entries.
    pub fn get_holders_list(env: Env, offset: u32, count: u32) -> Result<HoldersPage, VaultError> {
        let holders = registry::page(&env, offset, count)?;

        let mut deposit_times = Vec::new(&env);
        let mut last_claimed_times = Vec::new(&env);
        let mut staked_amounts = Vec::new(&env);
        for addr in holders.iter() {
            let record = ledger::get_or_empty(&env, &addr);
            deposit_times.push_back(record.deposit_time);
            last_claimed_times.push_back(record.last_claimed_time);
            staked_amounts.push_back(record.staked_amount);
        }

        Ok(HoldersPage {
            holders,
            deposit_times,
            last_claimed_times,
            staked_amounts,
        })
    }

    pub fn get_number_of_holders(env: Env) -> u32 {
        registry::len(&env)
    }

    pub fn get_holder(env: Env, holder: Address) -> Option<Holder> {
        ledger::get(&env, &holder)
    }

    pub fn get_holder_status(env: Env, holder: Address) -> Result<HolderStatus, VaultError> {
        let config = config::load(&env)?;
        Ok(ledger::get_or_empty(&env, &holder)
            .status(env.ledger().timestamp(), config.lockup_duration))
    }

    pub fn get_staked(env: Env, holder: Address) -> i128 {
        ledger::get_or_empty(&env, &holder).staked_amount
    }

    pub fn get_deposit_time(env: Env, holder: Address) -> u64 {
        ledger::get_or_empty(&env, &holder).deposit_time
    }

    pub fn get_total_staked(env: Env) -> i128 {
        accumulator::load(&env).map(|s| s.total_staked).unwrap_or(0)
    }

    /// Funded reward units not yet released to stakers.
    pub fn get_reward_pool(env: Env) -> i128 {
        accumulator::load(&env).map(|s| s.reward_pool).unwrap_or(0)
    }

    pub fn get_total_disbursed(env: Env) -> i128 {
        accumulator::load(&env).map(|s| s.total_disbursed).unwrap_or(0)
    }

    pub fn get_total_claimed(env: Env) -> i128 {
        accumulator::load(&env).map(|s| s.total_claimed).unwrap_or(0)
    }

    pub fn get_total_forfeited(env: Env) -> i128 {
        accumulator::load(&env).map(|s| s.total_forfeited).unwrap_or(0)
    }

    /// Stored accumulator state, as of the last committed accrual.
    pub fn get_accrual_state(env: Env) -> Result<AccrualState, VaultError> {
        accumulator::load(&env)
    }

    pub fn get_config(env: Env) -> Result<VaultConfig, VaultError> {
        config::load(&env)
    }

    pub fn get_deposit_token(env: Env) -> Result<Address, VaultError> {
        Self::deposit_token(&env)
    }

    pub fn get_reward_token(env: Env) -> Result<Address, VaultError> {
        Self::reward_token(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn get_admin(env: Env) -> Result<Address, VaultError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(VaultError::NotInitialized)
    }

    // ── Admin transfer (two-step) ──────────────────────────────────────────

    /// Propose a new operator. The proposed address must call `accept_admin`.
    pub fn propose_admin(
        env: Env,
        current_admin: Address,
        new_admin: Address,
    ) -> Result<(), VaultError> {
        Self::require_initialized(&env)?;
        current_admin.require_auth();
        Self::require_admin(&env, &current_admin)?;

        env.storage().instance().set(&PENDING_ADMIN, &new_admin);

        events::publish_admin_transfer_proposed(&env, current_admin, new_admin);

        Ok(())
    }

    /// Accept the pending transfer. Fees are routed to the new operator from here on.
    pub fn accept_admin(env: Env, new_admin: Address) -> Result<(), VaultError> {
        Self::require_initialized(&env)?;
        new_admin.require_auth();

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_ADMIN)
            .ok_or(VaultError::NoPendingAdmin)?;

        if new_admin != pending {
            return Err(VaultError::PermissionDenied);
        }

        let old_admin = Self::get_admin(env.clone())?;

        env.storage().instance().set(&ADMIN, &new_admin);
        env.storage().instance().remove(&PENDING_ADMIN);

        events::publish_admin_transfer_accepted(&env, old_admin, new_admin);

        Ok(())
    }

    pub fn cancel_admin_transfer(env: Env, current_admin: Address) -> Result<(), VaultError> {
        Self::require_initialized(&env)?;
        current_admin.require_auth();
        Self::require_admin(&env, &current_admin)?;

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_ADMIN)
            .ok_or(VaultError::NoPendingAdmin)?;

        env.storage().instance().remove(&PENDING_ADMIN);

        events::publish_admin_transfer_cancelled(&env, current_admin, pending);

        Ok(())
    }

    pub fn get_pending_admin(env: Env) -> Option<Address> {
        env.storage().instance().get(&PENDING_ADMIN)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), VaultError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(VaultError::NotInitialized);
        }
        Ok(())
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), VaultError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(VaultError::NotInitialized)?;
        if *caller != admin {
            return Err(VaultError::PermissionDenied);
        }
        Ok(())
    }

    fn deposit_token(env: &Env) -> Result<Address, VaultError> {
        env.storage()
            .instance()
            .get(&DEPOSIT_TOKEN)
            .ok_or(VaultError::NotInitialized)
    }

    fn reward_token(env: &Env) -> Result<Address, VaultError> {
        env.storage()
            .instance()
            .get(&REWARD_TOKEN)
            .ok_or(VaultError::NotInitialized)
    }

    fn bump_instance(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(ledger::TTL_THRESHOLD, ledger::TTL_EXTEND_TO);
    }

    /// Transfer an already-settled entitlement and record it on the holder.
    fn pay_reward(
        env: &Env,
        holder: &Address,
        record: &mut Holder,
        state: &mut AccrualState,
        amount: i128,
        now: u64,
    ) -> Result<(), VaultError> {
        if amount > 0 {
            let reward_token = Self::reward_token(env)?;
            asset::push(env, &reward_token, holder, amount)?;
            state.total_claimed = state
                .total_claimed
                .checked_add(amount)
                .ok_or(VaultError::MathOverflow)?;
        }
        record.record_payout(amount, now)?;
        if amount > 0 {
            events::publish_reward_paid(env, holder.clone(), amount, record.total_earned);
        }
        Ok(())
    }

    /// Shared body of `withdraw` and `emergency_withdraw`.
    fn unstake(env: &Env, holder: &Address, amount: i128, forfeit: bool) -> Result<(), VaultError> {
        let config = config::load(env)?;
        holder.require_auth();

        if amount <= 0 {
            return Err(VaultError::InvalidAmount);
        }
        let now = env.ledger().timestamp();
        let mut record = ledger::get_or_empty(env, holder);
        if record.status(now, config.lockup_duration) == HolderStatus::Locked {
            return Err(VaultError::LockupActive);
        }
        if amount > record.staked_amount {
            return Err(VaultError::InsufficientStake);
        }
        let index = registry::index_of(env, holder).ok_or(VaultError::InsufficientStake)?;

        // 1. Flush the accumulator and settle before the stake shrinks.
        let mut state = accumulator::accrue(env, &config)?;
        let pending = record.settle(state.reward_per_share)?;
        if forfeit {
            if pending > 0 {
                state.total_forfeited = state
                    .total_forfeited
                    .checked_add(pending)
                    .ok_or(VaultError::MathOverflow)?;
                events::publish_reward_forfeited(env, holder.clone(), pending);
            }
        } else {
            Self::pay_reward(env, holder, &mut record, &mut state, pending, now)?;
        }

        // 2. Reduce the stake.
        record.staked_amount -= amount;
        state.total_staked -= amount;

        // 3. Return principal net of the withdraw fee.
        let fee = config.withdraw_fee(amount)?;
        let deposit_token = Self::deposit_token(env)?;
        asset::push(env, &deposit_token, holder, amount - fee)?;
        if fee > 0 {
            let operator = Self::get_admin(env.clone())?;
            asset::push(env, &deposit_token, &operator, fee)?;
        }

        ledger::put(env, holder, &record);
        accumulator::store(env, &state);
        if record.staked_amount == 0 {
            registry::unregister(env, holder);
        }
        Self::bump_instance(env);

        events::publish_unstaked(
            env,
            holder.clone(),
            index,
            amount,
            fee,
            record.deposit_time,
            record.lockup_end(config.lockup_duration),
            forfeit,
        );

        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────



#[cfg(test)]
mod test_sweep;
