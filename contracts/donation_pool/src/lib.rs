#![no_std]

//! Goal-and-deadline donation drive for a circle.
//!
//! Anyone may donate while the drive is active and the deadline has not
//! passed. Once the goal is met, or the deadline passes, the creator may
//! release everything to the beneficiary. If the deadline passes short of the
//! goal the creator may instead open refunds, after which every donor can
//! reclaim exactly what they gave. Release and refunds exclude each other.

mod events;
mod storage;

use circle_core::events::{ContributionEvent, GoalReachedEvent};
use circle_core::{
    ledger, membership, time_remaining, token, CirclePool, PoolError, PoolInfo, PoolKind,
};
use events::{FundsReleasedEvent, RefundClaimedEvent, RefundsEnabledEvent};
use soroban_sdk::{contract, contractimpl, log, Address, BytesN, Env, String, Vec};
pub use storage::{DonationConfig, PoolStatus};

#[contract]
pub struct DonationPool;

#[contractimpl]
impl DonationPool {
    /// Configure the drive. The creator becomes the first member.
    #[allow(clippy::too_many_arguments)]
    pub fn __constructor(
        env: Env,
        creator: Address,
        circle_id: BytesN<32>,
        name: String,
        beneficiary: Address,
        goal: i128,
        deadline: u64,
        asset: Address,
        is_native: bool,
        backend_manager: Option<Address>,
    ) {
        membership::seed(&env, &creator, &backend_manager);
        storage::set_config(
            &env,
            &DonationConfig {
                circle_id,
                name,
                beneficiary,
                goal,
                deadline,
                asset,
                is_native,
            },
        );
        storage::set_status(&env, PoolStatus::Active);
    }

    /// Pay the whole custodied balance to the beneficiary (creator only).
    ///
    /// Allowed once the goal has been reached or the deadline has passed.
    /// Returns the amount released.
    pub fn release(env: Env, caller: Address) -> Result<i128, PoolError> {
        membership::require_creator(&env, &caller)?;
        ensure_active(&env)?;

        let config = storage::get_config(&env);
        let now = env.ledger().timestamp();
        if !storage::goal_reached(&env) && now <= config.deadline {
            return Err(PoolError::GoalNotMetDeadlineNotPassed);
        }

        storage::set_status(&env, PoolStatus::Released);

        let amount = ledger::total(&env);
        if amount > 0 {
            token::transfer(
                &env,
                &config.asset,
                &env.current_contract_address(),
                &config.beneficiary,
                &amount,
            );
        }
        log!(&env, "funds released", amount);

        FundsReleasedEvent {
            creator: caller,
            beneficiary: config.beneficiary,
            amount,
        }
        .publish(&env);

        Ok(amount)
    }

    /// Open refunds after a missed deadline (creator only).
    pub fn enable_refunds(env: Env, caller: Address) -> Result<(), PoolError> {
        membership::require_creator(&env, &caller)?;
        ensure_active(&env)?;

        let config = storage::get_config(&env);
        let now = env.ledger().timestamp();
        if now <= config.deadline {
            return Err(PoolError::DeadlineNotPassed);
        }
        if storage::goal_reached(&env) {
            return Err(PoolError::GoalWasMet);
        }

        storage::set_status(&env, PoolStatus::Refunding);

        let total_refundable = ledger::total(&env);
        log!(&env, "refunds enabled", total_refundable);

        RefundsEnabledEvent {
            creator: caller,
            total_refundable,
            timestamp: now,
        }
        .publish(&env);

        Ok(())
    }

    /// Return the caller's full donation once refunds are open.
    pub fn claim_refund(env: Env, caller: Address) -> Result<i128, PoolError> {
        caller.require_auth();

        if storage::get_status(&env) != PoolStatus::Refunding {
            return Err(PoolError::RefundsNotEnabled);
        }
        if ledger::balance_of(&env, &caller) == 0 {
            return Err(PoolError::NothingToRefund);
        }

        // Zero the record before paying out.
        let amount = ledger::drain(&env, &caller)?;

        let config = storage::get_config(&env);
        token::transfer(
            &env,
            &config.asset,
            &env.current_contract_address(),
            &caller,
            &amount,
        );

        RefundClaimedEvent {
            donor: caller,
            amount,
        }
        .publish(&env);

        Ok(amount)
    }

    /// Replace or revoke the backend manager allowed to invite (creator only).
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

    /// True from the call whose donation first met the goal onwards.
    pub fn is_goal_reached(env: Env) -> bool {
        storage::goal_reached(&env)
    }

    /// Seconds until the deadline, zero once it has passed.
    pub fn get_time_remaining(env: Env) -> u64 {
        time_remaining(&env, storage::get_config(&env).deadline)
    }

    /// Lifecycle phase of the drive.
    pub fn status(env: Env) -> PoolStatus {
        storage::get_status(&env)
    }

    /// Configuration fixed at construction.
    pub fn get_config(env: Env) -> DonationConfig {
        storage::get_config(&env)
    }

    /// Number of distinct donors.
    pub fn donor_count(env: Env) -> u32 {
        ledger::contributor_count(&env)
    }

    /// Donors in order of first donation.
    pub fn donors(env: Env) -> Vec<Address> {
        ledger::contributors(&env)
    }
}

#[contractimpl]
impl CirclePool for DonationPool {
    /// Donate `amount`. Open to anyone, member or not, until the deadline.
    fn contribute(env: Env, caller: Address, amount: i128) -> Result<(), PoolError> {
        caller.require_auth();

        if amount == 0 {
            return Err(PoolError::ZeroAmount);
        }
        if amount < 0 {
            return Err(PoolError::InvalidAmount);
        }
        ensure_active(&env)?;

        let config = storage::get_config(&env);
        if env.ledger().timestamp() > config.deadline {
            return Err(PoolError::DeadlinePassed);
        }

        let (balance, total) = ledger::credit(&env, &caller, amount)?;

        let crossed_goal = !storage::goal_reached(&env) && total >= config.goal;
        if crossed_goal {
            storage::set_goal_reached(&env);
        }

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

        if crossed_goal {
            GoalReachedEvent {
                total,
                goal: config.goal,
            }
            .publish(&env);
        }

        Ok(())
    }

    fn get_progress(env: Env) -> (i128, i128) {
        (ledger::total(&env), storage::get_config(&env).goal)
    }

    fn balance_of(env: Env, who: Address) -> i128 {
        ledger::balance_of(&env, &who)
    }

    fn pool_info(env: Env) -> PoolInfo {
        let config = storage::get_config(&env);
        PoolInfo {
            circle_id: config.circle_id,
            name: config.name,
            kind: PoolKind::Donation,
            creator: membership::creator(&env),
            asset: config.asset,
            is_native: config.is_native,
            is_active: storage::get_status(&env) == PoolStatus::Active,
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

fn ensure_active(env: &Env) -> Result<(), PoolError> {
    match storage::get_status(env) {
        PoolStatus::Active => Ok(()),
        PoolStatus::Released => Err(PoolError::AlreadyReleased),
        PoolStatus::Refunding => Err(PoolError::RefundsActive),
    }
}
