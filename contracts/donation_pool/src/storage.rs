use circle_core::storage::extend_instance_ttl;
use soroban_sdk::{contracttype, Address, BytesN, Env, String};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,      // -> DonationConfig
    Status,      // -> PoolStatus
    GoalReached, // -> bool
}

/// Where a donation drive stands. `Released` and `Refunding` are terminal.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PoolStatus {
    Active = 0,
    Released = 1,
    Refunding = 2,
}

/// Fixed at construction; the deadline never moves.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DonationConfig {
    pub circle_id: BytesN<32>,
    pub name: String,
    pub beneficiary: Address,
    pub goal: i128,
    pub deadline: u64,
    pub asset: Address,
    pub is_native: bool,
}

pub fn get_config(env: &Env) -> DonationConfig {
    env.storage().instance().get(&DataKey::Config).unwrap()
}

pub fn set_config(env: &Env, config: &DonationConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    extend_instance_ttl(env);
}

pub fn get_status(env: &Env) -> PoolStatus {
    env.storage()
        .instance()
        .get(&DataKey::Status)
        .unwrap_or(PoolStatus::Active)
}

pub fn set_status(env: &Env, status: PoolStatus) {
    env.storage().instance().set(&DataKey::Status, &status);
    extend_instance_ttl(env);
}

pub fn goal_reached(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::GoalReached)
        .unwrap_or(false)
}

pub fn set_goal_reached(env: &Env) {
    env.storage().instance().set(&DataKey::GoalReached, &true);
    extend_instance_ttl(env);
}
