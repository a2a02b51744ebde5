//! Per-address custody accounting.
//!
//! Every write goes through `credit`, `debit` or `drain`, each of which moves
//! the per-address balance and `TotalContributed` by the same amount, so the
//! aggregate always equals the sum of balances.

use soroban_sdk::{Address, Env, Vec};

use crate::errors::PoolError;
use crate::storage::extend_persistent_ttl;
use crate::types::CoreKey;

/// Add `amount` to `who`'s balance. Returns `(balance, total)` after the credit.
/// The first positive credit appends `who` to the contributor list.
pub fn credit(env: &Env, who: &Address, amount: i128) -> Result<(i128, i128), PoolError> {
    if amount <= 0 {
        return Err(PoolError::ZeroAmount);
    }

    let balance = balance_of(env, who)
        .checked_add(amount)
        .ok_or(PoolError::Overflow)?;
    let total = total(env)
        .checked_add(amount)
        .ok_or(PoolError::Overflow)?;

    set_balance(env, who, balance);
    set_total(env, total);
    remember_contributor(env, who);

    Ok((balance, total))
}

/// Remove `amount` from `who`'s balance. Returns `(balance, total)` after the debit.
pub fn debit(env: &Env, who: &Address, amount: i128) -> Result<(i128, i128), PoolError> {
    if amount <= 0 {
        return Err(PoolError::ZeroAmount);
    }

    let current = balance_of(env, who);
    if amount > current {
        return Err(PoolError::InsufficientBalance);
    }

    let balance = current - amount;
    let total = total(env)
        .checked_sub(amount)
        .ok_or(PoolError::Overflow)?;

    set_balance(env, who, balance);
    set_total(env, total);

    Ok((balance, total))
}

/// Zero `who`'s balance and return what it held.
pub fn drain(env: &Env, who: &Address) -> Result<i128, PoolError> {
    let amount = balance_of(env, who);
    if amount > 0 {
        debit(env, who, amount)?;
    }
    Ok(amount)
}

pub fn balance_of(env: &Env, who: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&CoreKey::Contribution(who.clone()))
        .unwrap_or(0)
}

pub fn total(env: &Env) -> i128 {
    env.storage()
        .persistent()
        .get(&CoreKey::TotalContributed)
        .unwrap_or(0)
}

/// Everyone who ever made a positive contribution, in first-contribution order.
pub fn contributors(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&CoreKey::Contributors)
        .unwrap_or(Vec::new(env))
}

pub fn contributor_count(env: &Env) -> u32 {
    contributors(env).len()
}

fn set_balance(env: &Env, who: &Address, balance: i128) {
    let key = CoreKey::Contribution(who.clone());
    env.storage().persistent().set(&key, &balance);
    extend_persistent_ttl(env, &key);
}

fn set_total(env: &Env, total: i128) {
    let key = CoreKey::TotalContributed;
    env.storage().persistent().set(&key, &total);
    extend_persistent_ttl(env, &key);
}

fn remember_contributor(env: &Env, who: &Address) {
    let seen_key = CoreKey::ContributorSeen(who.clone());
    if env.storage().persistent().has(&seen_key) {
        return;
    }
    env.storage().persistent().set(&seen_key, &true);
    extend_persistent_ttl(env, &seen_key);

    let mut list = contributors(env);
    list.push_back(who.clone());
    let list_key = CoreKey::Contributors;
    env.storage().persistent().set(&list_key, &list);
    extend_persistent_ttl(env, &list_key);
}
