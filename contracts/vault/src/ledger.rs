use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::accumulator;
use crate::errors::VaultError;

const HOLDER: Symbol = symbol_short!("HOLDER");

/// TTL constants for persistent storage (in ledgers)
pub const TTL_THRESHOLD: u32 = 17_280; // ~1 day
pub const TTL_EXTEND_TO: u32 = 518_400; // ~30 days

/// Per-holder stake record. Kept after the balance returns to zero so
/// `total_earned` history survives; only registry membership is dropped.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Holder {
    /// Stake net of the deposit fee.
    pub staked_amount: i128,
    /// `reward_per_share` at the last settlement.
    pub checkpoint: i128,
    /// Reset on every deposit; the lockup runs from here.
    pub deposit_time: u64,
    pub last_claimed_time: u64,
    /// Cumulative reward paid out. Never decreases.
    pub total_earned: i128,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HolderStatus {
    Unstaked,
    /// Inside the lockup started by the most recent deposit.
    Locked,
    /// Lockup elapsed with a positive balance.
    Unlockable,
}

impl Holder {
    pub fn empty() -> Self {
        Self {
            staked_amount: 0,
            checkpoint: 0,
            deposit_time: 0,
            last_claimed_time: 0,
            total_earned: 0,
        }
    }

    pub fn lockup_end(&self, lockup_duration: u64) -> u64 {
        self.deposit_time.saturating_add(lockup_duration)
    }

    pub fn status(&self, now: u64, lockup_duration: u64) -> HolderStatus {
        if self.staked_amount <= 0 {
            HolderStatus::Unstaked
        } else if now < self.lockup_end(lockup_duration) {
            HolderStatus::Locked
        } else {
            HolderStatus::Unlockable
        }
    }

    /// Entitlement accrued since the last settlement.
    pub fn pending(&self, reward_per_share: i128) -> Result<i128, VaultError> {
        accumulator::entitlement(self.staked_amount, reward_per_share, self.checkpoint)
    }

    /// Zero the pending entitlement by moving the checkpoint forward.
    /// Returns what was pending; the caller decides whether it is paid or forfeited.
    pub fn settle(&mut self, reward_per_share: i128) -> Result<i128, VaultError> {
        let pending = self.pending(reward_per_share)?;
        self.checkpoint = reward_per_share;
        Ok(pending)
    }

    pub fn record_payout(&mut self, paid: i128, now: u64) -> Result<(), VaultError> {
        self.total_earned = self
            .total_earned
            .checked_add(paid)
            .ok_or(VaultError::MathOverflow)?;
        self.last_claimed_time = now;
        Ok(())
    }
}

fn holder_key(addr: &Address) -> (Symbol, Address) {
    (HOLDER, addr.clone())
}

pub fn get(env: &Env, addr: &Address) -> Option<Holder> {
    let key = holder_key(addr);
    let holder: Option<Holder> = env.storage().persistent().get(&key);
    if holder.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    holder
}

pub fn get_or_empty(env: &Env, addr: &Address) -> Holder {
    get(env, addr).unwrap_or_else(Holder::empty)
}

pub fn put(env: &Env, addr: &Address, holder: &Holder) {
    let key = holder_key(addr);
    env.storage().persistent().set(&key, holder);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
