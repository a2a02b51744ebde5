#![no_std]

//! Open-ended group savings for a circle.
//!
//! Members deposit while the pool is open and may withdraw their own balance
//! at any time, including after the creator closes the pool. The creator may
//! set (and later replace) a savings target.

mod events;
mod storage;

use circle_core::events::{ContributionEvent, GoalReachedEvent, PoolClosedEvent, WithdrawalEvent};
use circle_core::{
    ledger, membership, time_remaining, token, CirclePool, PoolError, PoolInfo, PoolKind,
};
use events::TargetSetEvent;
use soroban_sdk::{contract, contractimpl, Address, BytesN, Env, String, Vec};
pub use storage::{SavingsConfig, SavingsTarget};

#[contract]
pub struct SavingsPool;

#[contractimpl]
impl SavingsPool {
    /// Configure the pool. The creator becomes the first member.
    pub fn __constructor(
        env: Env,
        creator: Address,
        circle_id: BytesN<32>,
        name: String,
        asset: Address,
        is_native: bool,
        backend_manager: Option<Address>,
    ) {
        membership::seed(&env, &creator, &backend_manager);
        storage::set_config(
            &env,
            &SavingsConfig {
                circle_id,
                name,
                asset,
                is_native,
            },
        );
        storage::set_active(&env, true);
    }

    /// Withdraw `amount` of the caller's own balance. Never gated by
    /// `close_pool`.
    pub fn withdraw(env: Env, caller: Address, amount: i128) -> Result<(), PoolError> {
        caller.require_auth();

        if amount <= 0 {
            return Err(PoolError::ZeroAmount);
        }
        membership::require_member(&env, &caller)?;

        let (remaining, _) = ledger::debit(&env, &caller, amount)?;

        let config = storage::get_config(&env);
        token::transfer(
            &env,
            &config.asset,
            &env.current_contract_address(),
            &caller,
            &amount,
        );

        WithdrawalEvent {
            member: caller,
            amount,
            remaining,
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

    /// Set or replace the savings target (creator only).
    ///
    /// The goal-reached signal is re-armed for the new target; if the pool
    /// already holds enough it fires right away.
    pub fn set_target(
        env: Env,
        caller: Address,
        goal: i128,
        target_date: u64,
    ) -> Result<(), PoolError> {
        membership::require_creator(&env, &caller)?;

        if goal <= 0 {
            return Err(PoolError::ZeroGoal);
        }
        if target_date <= env.ledger().timestamp() {
            return Err(PoolError::TargetInPast);
        }

        storage::set_target(&env, &SavingsTarget { goal, target_date });
        storage::set_goal_signalled(&env, false);

        TargetSetEvent {
            creator: caller,
            goal,
            target_date,
        }
        .publish(&env);

        signal_goal_if_reached(&env, ledger::total(&env));

        Ok(())
    }

    /// Current savings target, zeroed while none is set.
    pub fn target(env: Env) -> SavingsTarget {
        storage::get_target(&env)
    }

    /// Whether current savings meet the target. False while no target is set.
    pub fn is_goal_reached(env: Env) -> bool {
        let target = storage::get_target(&env);
        target.goal > 0 && ledger::total(&env) >= target.goal
    }

    /// Seconds until the target date, zero when unset or passed.
    pub fn get_time_remaining(env: Env) -> u64 {
        time_remaining(&env, storage::get_target(&env).target_date)
    }

    /// Depositors in order of first deposit.
    pub fn depositors(env: Env) -> Vec<Address> {
        ledger::contributors(&env)
    }

    /// Number of distinct depositors.
    pub fn depositor_count(env: Env) -> u32 {
        ledger::contributor_count(&env)
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
impl CirclePool for SavingsPool {
    /// Deposit `amount`. Members only, and only while the pool is open.
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

        let (balance, total) = ledger::credit(&env, &caller, amount)?;

        let config = storage::get_config(&env);
        token::transfer(
            &env,
            &config.asset,
            &caller,
            &env.current_contract_address(),
            &amount,
        );

        ContributionEvent {
            contributor: caller,
            amount,
            balance,
            total,
        }
        .publish(&env);

        signal_goal_if_reached(&env, total);

        Ok(())
    }

    fn get_progress(env: Env) -> (i128, i128) {
        (ledger::total(&env), storage::get_target(&env).goal)
    }

    fn balance_of(env: Env, who: Address) -> i128 {
        ledger::balance_of(&env, &who)
    }

    fn pool_info(env: Env) -> PoolInfo {
        let config = storage::get_config(&env);
        PoolInfo {
            circle_id: config.circle_id,
            name: config.name,
            kind: PoolKind::Savings,
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

/// Publish the goal-reached signal the first time `total` meets the current
/// target.
fn signal_goal_if_reached(env: &Env, total: i128) {
    let target = storage::get_target(env);
    if target.goal == 0 || total < target.goal || storage::goal_signalled(env) {
        return;
    }
    storage::set_goal_signalled(env, true);
    GoalReachedEvent {
        total,
        goal: target.goal,
    }
    .publish(env);
}
