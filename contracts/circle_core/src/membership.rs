//! Invite/join registry shared by every pool variant.
//!
//! Membership is monotonic: an address moves from unknown to invited to
//! joined and never back. The creator is seeded as the first member.

use soroban_sdk::{Address, Env, Vec};

use crate::errors::PoolError;
use crate::events::{BackendManagerChangedEvent, MemberInvitedEvent, MemberJoinedEvent};
use crate::storage::{extend_instance_ttl, extend_persistent_ttl};
use crate::types::{CoreKey, MemberRecord};
use crate::is_null;

/// Record `creator` as the first member and store the optional backend manager.
pub fn seed(env: &Env, creator: &Address, backend_manager: &Option<Address>) {
    env.storage().instance().set(&CoreKey::PoolCreator, creator);
    if let Some(manager) = backend_manager {
        env.storage().instance().set(&CoreKey::BackendManager, manager);
    }
    extend_instance_ttl(env);

    set_record(
        env,
        creator,
        &MemberRecord {
            is_invited: false,
            is_member: true,
        },
    );
    let mut members = Vec::new(env);
    members.push_back(creator.clone());
    set_members(env, &members);
}

pub fn creator(env: &Env) -> Address {
    env.storage().instance().get(&CoreKey::PoolCreator).unwrap()
}

pub fn backend_manager(env: &Env) -> Option<Address> {
    env.storage().instance().get(&CoreKey::BackendManager)
}

/// Fails `Unauthorized` unless `caller` is the pool creator.
pub fn require_creator(env: &Env, caller: &Address) -> Result<(), PoolError> {
    if *caller != creator(env) {
        return Err(PoolError::Unauthorized);
    }
    caller.require_auth();
    Ok(())
}

pub fn require_member(env: &Env, who: &Address) -> Result<(), PoolError> {
    if !is_member(env, who) {
        return Err(PoolError::NotMember);
    }
    Ok(())
}

/// Mark `candidate` as invited. Only the creator or the backend manager may
/// invite.
pub fn invite(env: &Env, inviter: &Address, candidate: &Address) -> Result<(), PoolError> {
    let is_creator = *inviter == creator(env);
    let is_manager = backend_manager(env).as_ref() == Some(inviter);
    if !is_creator && !is_manager {
        return Err(PoolError::Unauthorized);
    }
    inviter.require_auth();

    if is_null(env, candidate) {
        return Err(PoolError::InvalidTarget);
    }

    let mut record = record(env, candidate);
    if record.is_member {
        return Err(PoolError::AlreadyMember);
    }
    if record.is_invited {
        return Err(PoolError::AlreadyInvited);
    }

    record.is_invited = true;
    set_record(env, candidate, &record);

    MemberInvitedEvent {
        inviter: inviter.clone(),
        member: candidate.clone(),
    }
    .publish(env);

    Ok(())
}

/// Self-service join for an invited address.
pub fn join(env: &Env, caller: &Address) -> Result<(), PoolError> {
    caller.require_auth();

    let mut record = record(env, caller);
    if record.is_member {
        return Err(PoolError::AlreadyMember);
    }
    if !record.is_invited {
        return Err(PoolError::NotInvited);
    }

    record.is_member = true;
    set_record(env, caller, &record);

    let mut members = members(env);
    members.push_back(caller.clone());
    set_members(env, &members);

    MemberJoinedEvent {
        member: caller.clone(),
        member_count: members.len(),
    }
    .publish(env);

    Ok(())
}

/// Replace the backend manager. The previous manager loses invite rights
/// immediately; `None` revokes the role altogether.
pub fn set_backend_manager(
    env: &Env,
    caller: &Address,
    manager: &Option<Address>,
) -> Result<(), PoolError> {
    require_creator(env, caller)?;

    let old_manager = backend_manager(env);
    match manager {
        Some(address) => {
            if is_null(env, address) {
                return Err(PoolError::InvalidTarget);
            }
            env.storage()
                .instance()
                .set(&CoreKey::BackendManager, address);
        }
        None => env.storage().instance().remove(&CoreKey::BackendManager),
    }
    extend_instance_ttl(env);

    BackendManagerChangedEvent {
        creator: caller.clone(),
        old_manager,
        new_manager: manager.clone(),
    }
    .publish(env);

    Ok(())
}

pub fn is_member(env: &Env, who: &Address) -> bool {
    record(env, who).is_member
}

pub fn is_invited(env: &Env, who: &Address) -> bool {
    record(env, who).is_invited
}

pub fn member_count(env: &Env) -> u32 {
    members(env).len()
}

/// Members in join order, creator first.
pub fn members(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&CoreKey::MemberList)
        .unwrap_or(Vec::new(env))
}

fn record(env: &Env, who: &Address) -> MemberRecord {
    env.storage()
        .persistent()
        .get(&CoreKey::MemberRecord(who.clone()))
        .unwrap_or_default()
}

fn set_record(env: &Env, who: &Address, record: &MemberRecord) {
    let key = CoreKey::MemberRecord(who.clone());
    env.storage().persistent().set(&key, record);
    extend_persistent_ttl(env, &key);
}

fn set_members(env: &Env, members: &Vec<Address>) {
    let key = CoreKey::MemberList;
    env.storage().persistent().set(&key, members);
    extend_persistent_ttl(env, &key);
}
