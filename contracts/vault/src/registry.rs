//! Enumerable set of addresses with a positive stake.
//!
//! Stored as an index-addressed list plus a reverse address → index map so
//! both insertion and removal are O(1). Removal swaps the last entry into the
//! vacated slot, so list order is not stable across removals; paged reads are
//! a snapshot of one moment and may skip or repeat entries if holders join or
//! leave between pages.

use soroban_sdk::{symbol_short, Address, Env, IntoVal, Symbol, Val, Vec};

use crate::errors::VaultError;
use crate::ledger::{TTL_EXTEND_TO, TTL_THRESHOLD};

const HOLDER_COUNT: Symbol = symbol_short!("HLD_CNT");
const HOLDER_AT: Symbol = symbol_short!("HLD_AT");
const HOLDER_INDEX: Symbol = symbol_short!("HLD_IDX");

pub(crate) fn slot_key(index: u32) -> (Symbol, u32) {
    (HOLDER_AT, index)
}

pub(crate) fn index_key(addr: &Address) -> (Symbol, Address) {
    (HOLDER_INDEX, addr.clone())
}

fn bump<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn len(env: &Env) -> u32 {
    env.storage().instance().get(&HOLDER_COUNT).unwrap_or(0)
}

fn set_len(env: &Env, len: u32) {
    env.storage().instance().set(&HOLDER_COUNT, &len);
}

pub fn index_of(env: &Env, addr: &Address) -> Option<u32> {
    let key = index_key(addr);
    let index = env.storage().persistent().get(&key)?;
    bump(env, &key);
    Some(index)
}

#[cfg(test)]
pub fn contains(env: &Env, addr: &Address) -> bool {
    env.storage().persistent().has(&index_key(addr))
}

pub fn at(env: &Env, index: u32) -> Option<Address> {
    let key = slot_key(index);
    let addr = env.storage().persistent().get(&key)?;
    bump(env, &key);
    Some(addr)
}

fn write_slot(env: &Env, index: u32, addr: &Address) {
    let slot = slot_key(index);
    let idx = index_key(addr);
    env.storage().persistent().set(&slot, addr);
    env.storage().persistent().set(&idx, &index);
    bump(env, &slot);
    bump(env, &idx);
}

/// Append `addr` if absent. Returns its index either way; an existing
/// entry has both of its keys' TTL extended.
pub fn register(env: &Env, addr: &Address) -> u32 {
    if let Some(index) = index_of(env, addr) {
        bump(env, &slot_key(index));
        return index;
    }
    let index = len(env);
    write_slot(env, index, addr);
    set_len(env, index + 1);
    index
}

/// Swap-delete `addr`. Returns the index it occupied, or `None` if absent.
pub fn unregister(env: &Env, addr: &Address) -> Option<u32> {
    let index = index_of(env, addr)?;
    let last = len(env) - 1;

    if index != last {
        if let Some(moved) = at(env, last) {
            write_slot(env, index, &moved);
        }
    }
    env.storage().persistent().remove(&slot_key(last));
    env.storage().persistent().remove(&index_key(addr));
    set_len(env, last);
    Some(index)
}

/// Up to `count` addresses starting at `offset`. An offset equal to the
/// registry size yields an empty page; anything past it is `OutOfRange`.
pub fn page(env: &Env, offset: u32, count: u32) -> Result<Vec<Address>, VaultError> {
    let size = len(env);
    if offset > size {
        return Err(VaultError::OutOfRange);
    }
    let end = offset.saturating_add(count).min(size);
    let mut out = Vec::new(env);
    for i in offset..end {
        if let Some(addr) = at(env, i) {
            out.push_back(addr);
        }
    }
    Ok(out)
}
