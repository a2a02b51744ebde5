use circle_core::storage::extend_instance_ttl;
use soroban_sdk::{contracttype, Address, BytesN, Env, String};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,        // -> SavingsConfig
    PoolActive,    // -> bool
    Target,        // -> SavingsTarget
    GoalSignalled, // -> bool, reset by every new target
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SavingsConfig {
    pub circle_id: BytesN<32>,
    pub name: String,
    pub asset: Address,
    pub is_native: bool,
}

/// Optional savings target. A zero goal means none has been set.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SavingsTarget {
    pub goal: i128,
    pub target_date: u64,
}

pub fn get_config(env: &Env) -> SavingsConfig {
    env.storage().instance().get(&DataKey::Config).unwrap()
}

pub fn set_config(env: &Env, config: &SavingsConfig) {
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

pub fn get_target(env: &Env) -> SavingsTarget {
    env.storage()
        .instance()
        .get(&DataKey::Target)
        .unwrap_or_default()
}

pub fn set_target(env: &Env, target: &SavingsTarget) {
    env.storage().instance().set(&DataKey::Target, target);
    extend_instance_ttl(env);
}

pub fn goal_signalled(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::GoalSignalled)
        .unwrap_or(false)
}

pub fn set_goal_signalled(env: &Env, signalled: bool) {
    env.storage()
        .instance()
        .set(&DataKey::GoalSignalled, &signalled);
    extend_instance_ttl(env);
}
