#![no_std]

//! Single-use, expiring invitation codes scoped to a group.
//!
//! A backend service registers the hash of each code it hands out. Whoever
//! presents the matching preimage before expiry consumes the invite and learns
//! who issued it. The owner may rotate the backend at any time.

mod errors;
mod events;
mod storage;

pub use errors::InviteError;
use circle_core::is_null;
use events::{
    BackendUpdatedEvent, InviteCancelledEvent, InviteRegisteredEvent, InviteUsedEvent,
};
use soroban_sdk::{
    contract, contractclient, contractimpl, log, panic_with_error, Address, Bytes, BytesN, Env,
};
pub use storage::InviteRecord;

/// Hooks a group calls when its roster changes.
#[contractclient(name = "GroupPolicyClient")]
pub trait GroupPolicy {
    fn on_member_added(env: Env, group_id: BytesN<32>, member: Address) -> bool;
    fn on_member_removed(env: Env, group_id: BytesN<32>, member: Address) -> bool;
    fn on_member_left(env: Env, group_id: BytesN<32>, member: Address) -> bool;
}

#[contract]
pub struct InviteValidator;

#[contractimpl]
impl InviteValidator {
    /// Store the owner and the initial backend.
    pub fn __constructor(env: Env, owner: Address, backend: Address) {
        if is_null(&env, &backend) {
            panic_with_error!(&env, InviteError::InvalidBackend);
        }
        storage::set_owner(&env, &owner);
        storage::set_backend(&env, &backend);
    }

    /// Record `code_hash` as a live invite for `group_id` (backend only).
    ///
    /// A slot still holding an unused, unexpired invite or a consumed one is
    /// never overwritten. Expired, unused slots are.
    pub fn register_invite(
        env: Env,
        caller: Address,
        group_id: BytesN<32>,
        inviter: Address,
        code_hash: BytesN<32>,
        expires_at: u64,
    ) -> Result<(), InviteError> {
        require_backend(&env, &caller)?;

        let now = env.ledger().timestamp();
        if expires_at <= now {
            return Err(InviteError::InvalidExpiry);
        }
        if let Some(existing) = storage::get_invite(&env, &group_id, &code_hash) {
            if existing.used || now <= existing.expires_at {
                return Err(InviteError::AlreadyRegistered);
            }
        }

        storage::set_invite(
            &env,
            &group_id,
            &code_hash,
            &InviteRecord {
                inviter: inviter.clone(),
                expires_at,
                used: false,
                used_by: None,
            },
        );

        InviteRegisteredEvent {
            group_id,
            inviter,
            code_hash,
            expires_at,
        }
        .publish(&env);

        Ok(())
    }

    /// Consume the invite whose preimage is `code` and return its inviter.
    /// Valid up to and including `expires_at`.
    pub fn validate_and_consume(
        env: Env,
        group_id: BytesN<32>,
        code: Bytes,
        claimant: Address,
    ) -> Result<Address, InviteError> {
        claimant.require_auth();

        let code_hash = Self::hash_code(env.clone(), code);
        let mut record =
            storage::get_invite(&env, &group_id, &code_hash).ok_or(InviteError::InviteNotFound)?;

        if env.ledger().timestamp() > record.expires_at {
            return Err(InviteError::InviteExpired);
        }
        if record.used {
            return Err(InviteError::InviteAlreadyUsed);
        }

        record.used = true;
        record.used_by = Some(claimant.clone());
        storage::set_invite(&env, &group_id, &code_hash, &record);

        log!(&env, "invite consumed", group_id, claimant);
        InviteUsedEvent {
            group_id,
            claimant,
            inviter: record.inviter.clone(),
            code_hash,
        }
        .publish(&env);

        Ok(record.inviter)
    }

    /// Withdraw an unused invite (backend only). The slot is cleared so the
    /// same hash can be registered again.
    pub fn cancel_invite(
        env: Env,
        caller: Address,
        group_id: BytesN<32>,
        code_hash: BytesN<32>,
    ) -> Result<(), InviteError> {
        require_backend(&env, &caller)?;

        let record =
            storage::get_invite(&env, &group_id, &code_hash).ok_or(InviteError::InviteNotFound)?;
        if record.used {
            return Err(InviteError::InviteNotCancellable);
        }
        storage::remove_invite(&env, &group_id, &code_hash);

        InviteCancelledEvent {
            group_id,
            code_hash,
        }
        .publish(&env);

        Ok(())
    }

    /// Hand backend rights to `new_backend` (owner only). The previous
    /// backend loses them in the same call.
    pub fn update_backend(
        env: Env,
        caller: Address,
        new_backend: Address,
    ) -> Result<(), InviteError> {
        if caller != storage::get_owner(&env) {
            return Err(InviteError::OnlyOwner);
        }
        caller.require_auth();
        if is_null(&env, &new_backend) {
            return Err(InviteError::InvalidBackend);
        }

        let old_backend = storage::get_backend(&env);
        storage::set_backend(&env, &new_backend);

        BackendUpdatedEvent {
            owner: caller,
            old_backend,
            new_backend,
        }
        .publish(&env);

        Ok(())
    }

    /// Stored record for `code_hash` in `group_id`, if any.
    pub fn get_invite(
        env: Env,
        group_id: BytesN<32>,
        code_hash: BytesN<32>,
    ) -> Option<InviteRecord> {
        storage::get_invite(&env, &group_id, &code_hash)
    }

    /// SHA-256 of the raw code bytes, as stored by `register_invite`.
    pub fn hash_code(env: Env, code: Bytes) -> BytesN<32> {
        env.crypto().sha256(&code).to_bytes()
    }

    /// Address currently allowed to register and cancel invites.
    pub fn backend(env: Env) -> Address {
        storage::get_backend(&env)
    }

    /// Address allowed to rotate the backend.
    pub fn owner(env: Env) -> Address {
        storage::get_owner(&env)
    }
}

// Invites gate entry only; roster changes need no invite-specific checks.
#[contractimpl]
impl GroupPolicy for InviteValidator {
    fn on_member_added(_env: Env, _group_id: BytesN<32>, _member: Address) -> bool {
        true
    }

    fn on_member_removed(_env: Env, _group_id: BytesN<32>, _member: Address) -> bool {
        true
    }

    fn on_member_left(_env: Env, _group_id: BytesN<32>, _member: Address) -> bool {
        true
    }
}

fn require_backend(env: &Env, caller: &Address) -> Result<(), InviteError> {
    if *caller != storage::get_backend(env) {
        return Err(InviteError::OnlyBackend);
    }
    caller.require_auth();
    Ok(())
}

#[cfg(test)]
mod test;
