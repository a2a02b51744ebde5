use circle_core::storage::{extend_instance_ttl, extend_persistent_ttl};
use soroban_sdk::{contracttype, Address, BytesN, Env, Map, String, Vec};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,       // -> RoscaConfig
    Phase,        // -> RotationPhase
    CurrentRound, // -> u32, 0 while forming
    PayoutOrder,  // -> Vec<Address>
    Round(u32),   // -> RoundInfo
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoscaConfig {
    pub circle_id: BytesN<32>,
    pub name: String,
    pub asset: Address,
    pub is_native: bool,
    pub contribution_amount: i128,
    pub cycle_length: u64,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RotationPhase {
    Forming = 0,
    Rotating = 1,
    Completed = 2,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoundInfo {
    pub round_number: u32,
    pub recipient: Address,
    pub contributions: Map<Address, bool>,
    pub pot: i128,
    pub is_complete: bool,
    pub deadline: u64,
    pub paid_out: bool,
}

pub fn get_config(env: &Env) -> RoscaConfig {
    env.storage().instance().get(&DataKey::Config).unwrap()
}

pub fn set_config(env: &Env, config: &RoscaConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    extend_instance_ttl(env);
}

pub fn get_phase(env: &Env) -> RotationPhase {
    env.storage()
        .instance()
        .get(&DataKey::Phase)
        .unwrap_or(RotationPhase::Forming)
}

pub fn set_phase(env: &Env, phase: RotationPhase) {
    env.storage().instance().set(&DataKey::Phase, &phase);
    extend_instance_ttl(env);
}

pub fn get_current_round(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::CurrentRound)
        .unwrap_or(0)
}

pub fn set_current_round(env: &Env, round: u32) {
    env.storage().instance().set(&DataKey::CurrentRound, &round);
    extend_instance_ttl(env);
}

pub fn get_payout_order(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::PayoutOrder)
        .unwrap_or(Vec::new(env))
}

pub fn set_payout_order(env: &Env, order: &Vec<Address>) {
    let key = DataKey::PayoutOrder;
    env.storage().persistent().set(&key, order);
    extend_persistent_ttl(env, &key);
}

pub fn get_round(env: &Env, round: u32) -> Option<RoundInfo> {
    env.storage().persistent().get(&DataKey::Round(round))
}

pub fn set_round(env: &Env, info: &RoundInfo) {
    let key = DataKey::Round(info.round_number);
    env.storage().persistent().set(&key, info);
    extend_persistent_ttl(env, &key);
}
