use circle_core::storage::{extend_instance_ttl, extend_persistent_ttl};
use soroban_sdk::{contracttype, Address, BytesN, Env, String};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,            // -> YieldConfig
    PoolActive,        // -> bool
    YieldIndex,        // -> YieldIndex
    Position(Address), // -> Position
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct YieldConfig {
    pub circle_id: BytesN<32>,
    pub name: String,
    pub asset: Address,
    pub is_native: bool,
    pub vault: Address,
}

/// Yield per unit of principal, scaled by `accrual::PRECISION`, and the part
/// of the vault surplus already folded into it and not yet paid out.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct YieldIndex {
    pub per_share: i128,
    pub accounted: i128,
}

/// A member's settled yield plus `principal * per_share` at the last settle.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Position {
    pub pending: i128,
    pub reward_debt: i128,
}

pub fn get_config(env: &Env) -> YieldConfig {
    env.storage().instance().get(&DataKey::Config).unwrap()
}

pub fn set_config(env: &Env, config: &YieldConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    extend_instance_ttl(env);
}

pub fn is_active(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::PoolActive)
        .unwrap_or(false)
}

pub fn set_active(env: &Env, active: bool) {
    env.storage().instance().set(&DataKey::PoolActive, &active);
    extend_instance_ttl(env);
}

pub fn get_index(env: &Env) -> YieldIndex {
    env.storage()
        .persistent()
        .get(&DataKey::YieldIndex)
        .unwrap_or_default()
}

pub fn set_index(env: &Env, index: &YieldIndex) {
    let key = DataKey::YieldIndex;
    env.storage().persistent().set(&key, index);
    extend_persistent_ttl(env, &key);
}

pub fn get_position(env: &Env, member: &Address) -> Position {
    env.storage()
        .persistent()
        .get(&DataKey::Position(member.clone()))
        .unwrap_or_default()
}

pub fn set_position(env: &Env, member: &Address, position: &Position) {
    let key = DataKey::Position(member.clone());
    env.storage().persistent().set(&key, position);
    extend_persistent_ttl(env, &key);
}
