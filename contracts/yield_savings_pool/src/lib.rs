#![no_std]

//! Yield-bearing group savings for a circle.
//!
//! Member principal is parked in an external yield vault. The vault's
//! reported surplus over aggregate principal is apportioned to members in
//! proportion to the principal they held while it accrued. Token-backed pools
//! pay yield out on withdrawal; native-asset pools show it but only ever
//! return principal.

mod accrual;
mod events;
mod storage;

use circle_core::events::{ContributionEvent, PoolClosedEvent, WithdrawalEvent};
use circle_core::{
    ledger, membership, CirclePool, PoolError, PoolInfo, PoolKind, YieldVaultClient,
};
use events::YieldPaidEvent;
use soroban_sdk::{contract, contractimpl, log, Address, BytesN, Env, String, Vec};
use storage::YieldIndex;
pub use storage::YieldConfig;

#[contract]
pub struct YieldSavingsPool;

#[contractimpl]
impl YieldSavingsPool {
    /// Configure the pool over `vault`. The creator becomes the first member.
    #[allow(clippy::too_many_arguments)]
    pub fn __constructor(
        env: Env,
        creator: Address,
        circle_id: BytesN<32>,
        name: String,
        asset: Address,
        is_native: bool,
        vault: Address,
        backend_manager: Option<Address>,
    ) {
        membership::seed(&env, &creator, &backend_manager);
        storage::set_config(
            &env,
            &YieldConfig {
                circle_id,
                name,
                asset,
                is_native,
                vault,
            },
        );
        storage::set_active(&env, true);
    }

    /// Withdraw `amount`, spending accrued yield before principal.
    ///
    /// Native-asset pools cap withdrawals at principal.
    pub fn withdraw(env: Env, caller: Address, amount: i128) -> Result<(), PoolError> {
        caller.require_auth();

        if amount <= 0 {
            return Err(PoolError::ZeroAmount);
        }
        membership::require_member(&env, &caller)?;

        let config = storage::get_config(&env);
        let vault = YieldVaultClient::new(&env, &config.vault);
        vault.accrue();

        let mut index = refresh_index(&env, &vault)?;
        let principal = ledger::balance_of(&env, &caller);
        let position = storage::get_position(&env, &caller);
        let earned = accrual::earned(&position, principal, &index)?;

        let yield_paid = if config.is_native {
            if amount > principal {
                return Err(PoolError::ExceedsPrincipalForNativeAsset);
            }
            0
        } else {
            if amount > principal + earned {
                return Err(PoolError::InsufficientBalance);
            }
            amount.min(earned)
        };
        let principal_paid = amount - yield_paid;

        let remaining_principal = if principal_paid > 0 {
            ledger::debit(&env, &caller, principal_paid)?.0
        } else {
            principal
        };

        // Exiting principal stops earning from here on.
        let mut position = accrual::settle(&position, principal, remaining_principal, &index)?;
        position.pending -= yield_paid;
        index.accounted -= yield_paid;
        storage::set_position(&env, &caller, &position);
        storage::set_index(&env, &index);

        vault.withdraw(&caller, &amount);

        if yield_paid > 0 {
            YieldPaidEvent {
                member: caller.clone(),
                amount: yield_paid,
            }
            .publish(&env);
        }
        WithdrawalEvent {
            member: caller,
            amount,
            remaining: remaining_principal,
        }
        .publish(&env);

        Ok(())
    }

    /// Stop accepting deposits (creator only). Withdrawals keep working.
    pub fn close_pool(env: Env, caller: Address) -> Result<(), PoolError> {
        membership::require_creator(&env, &caller)?;

        if !storage::is_active(&env) {
            return Err(PoolError::PoolClosed);
        }
        storage::set_active(&env, false);

        PoolClosedEvent {
            creator: caller,
            timestamp: env.ledger().timestamp(),
        }
        .publish(&env);

        Ok(())
    }

    /// Principal plus the member's share of the vault surplus.
    pub fn get_balance_with_yield(env: Env, who: Address) -> Result<i128, PoolError> {
        let earned = Self::get_yield_earned(env.clone(), who.clone())?;
        Ok(ledger::balance_of(&env, &who) + earned)
    }

    /// Yield attributed to `who` as of the vault's last accrual.
    pub fn get_yield_earned(env: Env, who: Address) -> Result<i128, PoolError> {
        let config = storage::get_config(&env);
        let vault = YieldVaultClient::new(&env, &config.vault);
        let index = accrual::fold(
            &storage::get_index(&env),
            surplus(&env, &vault),
            ledger::total(&env),
        )?;
        accrual::earned(
            &storage::get_position(&env, &who),
            ledger::balance_of(&env, &who),
            &index,
        )
    }

    /// Principal recorded for `who`, excluding yield.
    pub fn principal_of(env: Env, who: Address) -> i128 {
        ledger::balance_of(&env, &who)
    }

    /// `(total_principal, total_yield, total_value)`.
    pub fn get_pool_stats(env: Env) -> (i128, i128, i128) {
        let config = storage::get_config(&env);
        let vault = YieldVaultClient::new(&env, &config.vault);
        let total_principal = ledger::total(&env);
        let total_yield = surplus(&env, &vault);
        (total_principal, total_yield, total_principal + total_yield)
    }

    /// The vault's configured rate in basis points, passed through unchanged.
    pub fn get_apy(env: Env) -> u32 {
        let config = storage::get_config(&env);
        YieldVaultClient::new(&env, &config.vault).apy_bps()
    }

    /// Configuration fixed at construction.
    pub fn get_config(env: Env) -> YieldConfig {
        storage::get_config(&env)
    }

    /// Depositors in order of first deposit.
    pub fn depositors(env: Env) -> Vec<Address> {
        ledger::contributors(&env)
    }

    /// Replace or clear the backend manager (creator only).
    pub fn set_backend_manager(
        env: Env,
        caller: Address,
        manager: Option<Address>,
    ) -> Result<(), PoolError> {
        membership::set_backend_manager(&env, &caller, &manager)
    }

    /// Current backend manager, if any.
    pub fn backend_manager(env: Env) -> Option<Address> {
        membership::backend_manager(&env)
    }
}

#[contractimpl]
impl CirclePool for YieldSavingsPool {
    /// Deposit `amount` of principal into the vault. Members only, while open.
    fn contribute(env: Env, caller: Address, amount: i128) -> Result<(), PoolError> {
        caller.require_auth();

        if amount == 0 {
            return Err(PoolError::ZeroAmount);
        }
        if amount < 0 {
            return Err(PoolError::InvalidAmount);
        }
        membership::require_member(&env, &caller)?;
        if !storage::is_active(&env) {
            return Err(PoolError::PoolClosed);
        }

        let config = storage::get_config(&env);
        let vault = YieldVaultClient::new(&env, &config.vault);
        vault.accrue();

        let index = refresh_index(&env, &vault)?;
        let (balance, total) = ledger::credit(&env, &caller, amount)?;

        // Growth folded so far belongs to earlier principal.
        let position = accrual::settle(
            &storage::get_position(&env, &caller),
            balance - amount,
            balance,
            &index,
        )?;
        storage::set_position(&env, &caller, &position);

        vault.deposit(&caller, &amount);
        log!(&env, "principal deposited", amount, total);

        ContributionEvent {
            contributor: caller,
            amount,
            balance,
            total,
        }
        .publish(&env);

        Ok(())
    }

    /// `(total_principal, 0)`: yield pools carry no goal.
    fn get_progress(env: Env) -> (i128, i128) {
        (ledger::total(&env), 0)
    }

    fn balance_of(env: Env, who: Address) -> i128 {
        ledger::balance_of(&env, &who)
    }

    fn pool_info(env: Env) -> PoolInfo {
        let config = storage::get_config(&env);
        PoolInfo {
            circle_id: config.circle_id,
            name: config.name,
            kind: PoolKind::YieldSavings,
            creator: membership::creator(&env),
            asset: config.asset,
            is_native: config.is_native,
            is_active: storage::is_active(&env),
        }
    }

    fn invite(env: Env, inviter: Address, candidate: Address) -> Result<(), PoolError> {
        membership::invite(&env, &inviter, &candidate)
    }

    fn join(env: Env, caller: Address) -> Result<(), PoolError> {
        membership::join(&env, &caller)
    }

    fn is_member(env: Env, who: Address) -> bool {
        membership::is_member(&env, &who)
    }

    fn is_invited(env: Env, who: Address) -> bool {
        membership::is_invited(&env, &who)
    }

    fn member_count(env: Env) -> u32 {
        membership::member_count(&env)
    }

    fn members(env: Env) -> Vec<Address> {
        membership::members(&env)
    }
}

/// Fold the vault's current surplus into the stored index.
fn refresh_index(env: &Env, vault: &YieldVaultClient) -> Result<YieldIndex, PoolError> {
    let index = accrual::fold(
        &storage::get_index(env),
        surplus(env, vault),
        ledger::total(env),
    )?;
    storage::set_index(env, &index);
    Ok(index)
}

/// Vault value above aggregate principal, never negative.
fn surplus(env: &Env, vault: &YieldVaultClient) -> i128 {
    (vault.total_assets() - ledger::total(env)).max(0)
}
