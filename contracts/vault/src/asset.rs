//! Adapter over the Soroban token interface.
//!
//! Balance and allowance are checked up front so shortfalls come back as
//! `VaultError` codes instead of a trap inside the token contract.

use soroban_sdk::{token, Address, Env};

use crate::errors::VaultError;

/// Pull `amount` of `asset` from `from` into the vault via its allowance.
pub fn pull(env: &Env, asset: &Address, from: &Address, amount: i128) -> Result<(), VaultError> {
    let client = token::Client::new(env, asset);
    let vault = env.current_contract_address();

    if client.allowance(from, &vault) < amount {
        return Err(VaultError::InsufficientAllowance);
    }
    if client.balance(from) < amount {
        return Err(VaultError::InsufficientBalance);
    }
    client.transfer_from(&vault, from, &vault, &amount);
    Ok(())
}

/// Send `amount` of `asset` from the vault to `to`. Zero is a no-op.
pub fn push(env: &Env, asset: &Address, to: &Address, amount: i128) -> Result<(), VaultError> {
    if amount == 0 {
        return Ok(());
    }
    let client = token::Client::new(env, asset);
    let vault = env.current_contract_address();

    if client.balance(&vault) < amount {
        return Err(VaultError::InsufficientBalance);
    }
    client.transfer(&vault, to, &amount);
    Ok(())
}

/// The vault's own balance of `asset`.
pub fn held(env: &Env, asset: &Address) -> i128 {
    token::Client::new(env, asset).balance(&env.current_contract_address())
}
