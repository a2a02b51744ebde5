use circle_core::storage::{extend_instance_ttl, extend_persistent_ttl};
use soroban_sdk::{contracttype, Address, BytesN, Env};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Owner,                             // -> Address
    Backend,                           // -> Address
    Invite(BytesN<32>, BytesN<32>), // (group_id, code_hash) -> InviteRecord
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InviteRecord {
    pub inviter: Address,
    pub expires_at: u64,
    pub used: bool,
    pub used_by: Option<Address>,
}

pub fn get_owner(env: &Env) -> Address {
    env.storage().instance().get(&DataKey::Owner).unwrap()
}

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
    extend_instance_ttl(env);
}

pub fn get_backend(env: &Env) -> Address {
    env.storage().instance().get(&DataKey::Backend).unwrap()
}

pub fn set_backend(env: &Env, backend: &Address) {
    env.storage().instance().set(&DataKey::Backend, backend);
    extend_instance_ttl(env);
}

pub fn get_invite(
    env: &Env,
    group_id: &BytesN<32>,
    code_hash: &BytesN<32>,
) -> Option<InviteRecord> {
    env.storage()
        .persistent()
        .get(&DataKey::Invite(group_id.clone(), code_hash.clone()))
}

pub fn set_invite(
    env: &Env,
    group_id: &BytesN<32>,
    code_hash: &BytesN<32>,
    record: &InviteRecord,
) {
    let key = DataKey::Invite(group_id.clone(), code_hash.clone());
    env.storage().persistent().set(&key, record);
    extend_persistent_ttl(env, &key);
}

/// Drop the record entirely so the slot can be registered again.
pub fn remove_invite(env: &Env, group_id: &BytesN<32>, code_hash: &BytesN<32>) {
    env.storage()
        .persistent()
        .remove(&DataKey::Invite(group_id.clone(), code_hash.clone()));
}
