#![no_std]

//! Rotating savings (ROSCA) for a circle.
//!
//! Members gather while the pool is forming. Once the creator starts the
//! rotation the roster is frozen: every round each member pays the fixed
//! contribution and the whole pot goes to that round's recipient, in join
//! order, until everyone has been paid once.

mod events;
mod storage;

use circle_core::events::ContributionEvent;
use circle_core::{
    ledger, membership, time_remaining, token, CirclePool, PoolError, PoolInfo, PoolKind,
};
use events::{
    PayoutDistributedEvent, RotationCompletedEvent, RotationStartedEvent, RoundOpenedEvent,
};
use soroban_sdk::{
    contract, contractimpl, log, panic_with_error, Address, BytesN, Env, Map, String, Vec,
};
pub use storage::{RoscaConfig, RotationPhase, RoundInfo};

const MIN_MEMBERS: u32 = 2;

#[contract]
pub struct RoscaPool;

#[contractimpl]
impl RoscaPool {
    #[allow(clippy::too_many_arguments)]
    pub fn __constructor(
        env: Env,
        creator: Address,
        circle_id: BytesN<32>,
        name: String,
        asset: Address,
        is_native: bool,
        contribution_amount: i128,
        cycle_length: u64,
        backend_manager: Option<Address>,
    ) {
        if contribution_amount <= 0 || cycle_length == 0 {
            panic_with_error!(&env, PoolError::InvalidAmount);
        }
        membership::seed(&env, &creator, &backend_manager);
        storage::set_config(
            &env,
            &RoscaConfig {
                circle_id,
                name,
                asset,
                is_native,
                contribution_amount,
                cycle_length,
            },
        );
        storage::set_phase(&env, RotationPhase::Forming);
    }

    /// Freeze the roster and open round 1 (creator only).
    pub fn start_rotation(env: Env, caller: Address) -> Result<(), PoolError> {
        membership::require_creator(&env, &caller)?;

        if storage::get_phase(&env) != RotationPhase::Forming {
            return Err(PoolError::RotationStarted);
        }
        let order = membership::members(&env);
        if order.len() < MIN_MEMBERS {
            return Err(PoolError::InsufficientMembers);
        }

        storage::set_payout_order(&env, &order);
        storage::set_phase(&env, RotationPhase::Rotating);
        let first = open_round(&env, 1, &order)?;

        log!(&env, "rotation started", order.len(), first.deadline);
        RotationStartedEvent {
            creator: caller,
            member_count: order.len(),
            first_deadline: first.deadline,
        }
        .publish(&env);

        Ok(())
    }

    /// Pay the current round's pot to its recipient once every member has
    /// contributed. Anyone may trigger it. Returns the amount paid.
    pub fn distribute_payout(env: Env) -> Result<i128, PoolError> {
        if storage::get_phase(&env) != RotationPhase::Rotating {
            return Err(PoolError::RotationNotActive);
        }
        let mut round = current(&env)?;
        if !round.is_complete {
            return Err(PoolError::RoundNotComplete);
        }

        round.paid_out = true;
        storage::set_round(&env, &round);

        let config = storage::get_config(&env);
        token::transfer(
            &env,
            &config.asset,
            &env.current_contract_address(),
            &round.recipient,
            &round.pot,
        );

        PayoutDistributedEvent {
            recipient: round.recipient.clone(),
            round: round.round_number,
            amount: round.pot,
        }
        .publish(&env);

        let order = storage::get_payout_order(&env);
        if round.round_number >= order.len() {
            storage::set_phase(&env, RotationPhase::Completed);
            log!(&env, "rotation completed", round.round_number);
            RotationCompletedEvent {
                rounds: round.round_number,
                timestamp: env.ledger().timestamp(),
            }
            .publish(&env);
        } else {
            open_round(&env, round.round_number + 1, &order)?;
        }

        Ok(round.pot)
    }

    /// Round being collected, 0 while forming. Stays on the last round once
    /// the rotation completes.
    pub fn current_round(env: Env) -> u32 {
        storage::get_current_round(&env)
    }

    /// State of round `round`, fails for rounds not yet opened.
    pub fn round_info(env: Env, round: u32) -> Result<RoundInfo, PoolError> {
        storage::get_round(&env, round).ok_or(PoolError::RotationNotActive)
    }

    /// Members in payout order. Empty until the rotation starts.
    pub fn payout_order(env: Env) -> Vec<Address> {
        storage::get_payout_order(&env)
    }

    /// Member receiving the pot of the round being collected.
    pub fn current_recipient(env: Env) -> Result<Address, PoolError> {
        if storage::get_phase(&env) != RotationPhase::Rotating {
            return Err(PoolError::RotationNotActive);
        }
        Ok(current(&env)?.recipient)
    }

    /// Whether `who` paid into round `round`.
    pub fn has_contributed(env: Env, who: Address, round: u32) -> bool {
        storage::get_round(&env, round)
            .map(|info| info.contributions.contains_key(who))
            .unwrap_or(false)
    }

    /// Forming, rotating or completed.
    pub fn phase(env: Env) -> RotationPhase {
        storage::get_phase(&env)
    }

    /// Seconds left in the current round, zero when none is open.
    pub fn get_time_remaining(env: Env) -> u64 {
        if storage::get_phase(&env) != RotationPhase::Rotating {
            return 0;
        }
        match storage::get_round(&env, storage::get_current_round(&env)) {
            Some(round) => time_remaining(&env, round.deadline),
            None => 0,
        }
    }

    /// Configuration fixed at construction.
    pub fn get_config(env: Env) -> RoscaConfig {
        storage::get_config(&env)
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
impl CirclePool for RoscaPool {
    /// Pay this round's contribution. The amount must match the configured
    /// contribution exactly and each member pays once per round.
    fn contribute(env: Env, caller: Address, amount: i128) -> Result<(), PoolError> {
        caller.require_auth();

        let config = storage::get_config(&env);
        if amount == 0 {
            return Err(PoolError::ZeroAmount);
        }
        if amount != config.contribution_amount {
            return Err(PoolError::InvalidAmount);
        }
        membership::require_member(&env, &caller)?;
        if storage::get_phase(&env) != RotationPhase::Rotating {
            return Err(PoolError::RotationNotActive);
        }

        let mut round = current(&env)?;
        if round.contributions.contains_key(caller.clone()) {
            return Err(PoolError::AlreadyContributed);
        }

        let (balance, total) = ledger::credit(&env, &caller, amount)?;
        round.contributions.set(caller.clone(), true);
        round.pot = round.pot.checked_add(amount).ok_or(PoolError::Overflow)?;
        round.is_complete = round.contributions.len() == storage::get_payout_order(&env).len();
        storage::set_round(&env, &round);

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

        Ok(())
    }

    /// `(pot, full_pot)` for the round being collected.
    fn get_progress(env: Env) -> (i128, i128) {
        let config = storage::get_config(&env);
        let full_pot = config.contribution_amount * membership::member_count(&env) as i128;
        let pot = match storage::get_phase(&env) {
            RotationPhase::Rotating => storage::get_round(&env, storage::get_current_round(&env))
                .map(|round| round.pot)
                .unwrap_or(0),
            _ => 0,
        };
        (pot, full_pot)
    }

    /// Lifetime contributions of `who`.
    fn balance_of(env: Env, who: Address) -> i128 {
        ledger::balance_of(&env, &who)
    }

    fn pool_info(env: Env) -> PoolInfo {
        let config = storage::get_config(&env);
        PoolInfo {
            circle_id: config.circle_id,
            name: config.name,
            kind: PoolKind::Rosca,
            creator: membership::creator(&env),
            asset: config.asset,
            is_native: config.is_native,
            is_active: storage::get_phase(&env) != RotationPhase::Completed,
        }
    }

    fn invite(env: Env, inviter: Address, candidate: Address) -> Result<(), PoolError> {
        require_forming(&env)?;
        membership::invite(&env, &inviter, &candidate)
    }

    fn join(env: Env, caller: Address) -> Result<(), PoolError> {
        require_forming(&env)?;
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

fn require_forming(env: &Env) -> Result<(), PoolError> {
    if storage::get_phase(env) != RotationPhase::Forming {
        return Err(PoolError::RotationStarted);
    }
    Ok(())
}

fn current(env: &Env) -> Result<RoundInfo, PoolError> {
    storage::get_round(env, storage::get_current_round(env)).ok_or(PoolError::RotationNotActive)
}

/// Open round `number`, paying out to the member at that position.
fn open_round(env: &Env, number: u32, order: &Vec<Address>) -> Result<RoundInfo, PoolError> {
    let recipient = order.get(number - 1).ok_or(PoolError::RotationNotActive)?;
    let config = storage::get_config(env);
    let deadline = env
        .ledger()
        .timestamp()
        .checked_add(config.cycle_length)
        .ok_or(PoolError::Overflow)?;

    let round = RoundInfo {
        round_number: number,
        recipient: recipient.clone(),
        contributions: Map::new(env),
        pot: 0,
        is_complete: false,
        deadline,
        paid_out: false,
    };
    storage::set_round(env, &round);
    storage::set_current_round(env, number);

    RoundOpenedEvent {
        recipient,
        round: number,
        deadline,
    }
    .publish(env);

    Ok(round)
}
