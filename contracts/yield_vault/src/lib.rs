#![no_std]

//! Rate-based yield vault backing a yield-savings pool.
//!
//! Managed assets grow linearly at the configured basis-point rate whenever
//! `accrue` runs. Growth is drawn from a reserve the admin funds up front, so
//! every unit reported by `total_assets` is held by the vault in tokens.

mod errors;
mod events;
mod storage;

pub use errors::VaultError;
use circle_core::{token, YieldVaultInterface};
use events::{ReserveFundedEvent, VaultDepositEvent, VaultWithdrawEvent, YieldAccruedEvent};
use soroban_sdk::{contract, contractimpl, panic_with_error, Address, Env};
use storage::DataKey;

pub const SECONDS_PER_YEAR: u64 = 31_536_000;
pub const BPS_DENOMINATOR: u64 = 10_000;

#[contract]
pub struct YieldVault;

#[contractimpl]
impl YieldVault {
    /// Configure the vault. Accrual starts from the current ledger time.
    pub fn __constructor(env: Env, admin: Address, asset: Address, apy_bps: u32) {
        storage::set(&env, &DataKey::Admin, &admin);
        storage::set(&env, &DataKey::Asset, &asset);
        storage::set(&env, &DataKey::ApyBps, &apy_bps);
        storage::set(&env, &DataKey::LastAccrual, &env.ledger().timestamp());
    }

    /// Bind the vault to the pool allowed to deposit and withdraw. One-shot.
    pub fn set_owner(env: Env, admin: Address, owner: Address) -> Result<(), VaultError> {
        if admin != storage::get_admin(&env) {
            return Err(VaultError::Unauthorized);
        }
        admin.require_auth();
        if storage::get_owner(&env).is_some() {
            return Err(VaultError::OwnerAlreadySet);
        }
        storage::set(&env, &DataKey::Owner, &owner);
        Ok(())
    }

    /// Add tokens that future accruals may pay out as yield.
    pub fn fund_reserve(env: Env, from: Address, amount: i128) -> Result<(), VaultError> {
        from.require_auth();
        if amount <= 0 {
            return Err(VaultError::InvalidAmount);
        }

        let reserve = storage::get_i128(&env, &DataKey::Reserve)
            .checked_add(amount)
            .ok_or(VaultError::Overflow)?;
        storage::set(&env, &DataKey::Reserve, &reserve);

        let asset = storage::get_asset(&env);
        token::transfer(&env, &asset, &from, &env.current_contract_address(), &amount);

        ReserveFundedEvent {
            from,
            amount,
            reserve,
        }
        .publish(&env);

        Ok(())
    }

    /// Tokens still available to pay future yield.
    pub fn reserve(env: Env) -> i128 {
        storage::get_i128(&env, &DataKey::Reserve)
    }

    /// Pool bound to the vault, if any.
    pub fn owner(env: Env) -> Option<Address> {
        storage::get_owner(&env)
    }

    /// Address allowed to bind the owner.
    pub fn admin(env: Env) -> Address {
        storage::get_admin(&env)
    }
}

#[contractimpl]
impl YieldVaultInterface for YieldVault {
    fn total_assets(env: Env) -> i128 {
        storage::get_i128(&env, &DataKey::Assets)
    }

    fn accrue(env: Env) {
        accrue_to_now(&env);
    }

    fn apy_bps(env: Env) -> u32 {
        storage::get_apy_bps(&env)
    }

    fn deposit(env: Env, from: Address, amount: i128) {
        require_owner(&env);
        if amount <= 0 {
            panic_with_error!(&env, VaultError::InvalidAmount);
        }
        accrue_to_now(&env);

        let assets = match storage::get_i128(&env, &DataKey::Assets).checked_add(amount) {
            Some(assets) => assets,
            None => panic_with_error!(&env, VaultError::Overflow),
        };
        storage::set(&env, &DataKey::Assets, &assets);

        let asset = storage::get_asset(&env);
        token::transfer(&env, &asset, &from, &env.current_contract_address(), &amount);

        VaultDepositEvent {
            from,
            amount,
            total_assets: assets,
        }
        .publish(&env);
    }

    fn withdraw(env: Env, to: Address, amount: i128) {
        require_owner(&env);
        if amount <= 0 {
            panic_with_error!(&env, VaultError::InvalidAmount);
        }
        accrue_to_now(&env);

        let current = storage::get_i128(&env, &DataKey::Assets);
        if amount > current {
            panic_with_error!(&env, VaultError::InsufficientAssets);
        }
        let assets = current - amount;
        storage::set(&env, &DataKey::Assets, &assets);

        let asset = storage::get_asset(&env);
        token::transfer(&env, &asset, &env.current_contract_address(), &to, &amount);

        VaultWithdrawEvent {
            to,
            amount,
            total_assets: assets,
        }
        .publish(&env);
    }
}

/// Linear yield owed on `assets` for `elapsed` seconds at `apy_bps`.
fn interest_for(assets: i128, apy_bps: u32, elapsed: u64) -> Option<i128> {
    if assets <= 0 || elapsed == 0 || apy_bps == 0 {
        return Some(0);
    }
    let scaled = (assets as u128)
        .checked_mul(apy_bps as u128)?
        .checked_mul(elapsed as u128)?;
    let interest = scaled / (BPS_DENOMINATOR as u128 * SECONDS_PER_YEAR as u128);
    i128::try_from(interest).ok()
}

fn accrue_to_now(env: &Env) {
    let now = env.ledger().timestamp();
    let last = storage::get_last_accrual(env);
    if now <= last {
        return;
    }

    let assets = storage::get_i128(env, &DataKey::Assets);
    let reserve = storage::get_i128(env, &DataKey::Reserve);
    let owed = match interest_for(assets, storage::get_apy_bps(env), now - last) {
        Some(owed) => owed,
        None => panic_with_error!(env, VaultError::Overflow),
    };
    let paid = owed.min(reserve);

    storage::set(env, &DataKey::LastAccrual, &now);
    if paid == 0 {
        return;
    }
    storage::set(env, &DataKey::Assets, &(assets + paid));
    storage::set(env, &DataKey::Reserve, &(reserve - paid));

    YieldAccruedEvent {
        amount: paid,
        total_assets: assets + paid,
        timestamp: now,
    }
    .publish(env);
}

fn require_owner(env: &Env) {
    match storage::get_owner(env) {
        Some(owner) => owner.require_auth(),
        None => panic_with_error!(env, VaultError::OwnerNotSet),
    }
}

#[cfg(test)]
mod test;
