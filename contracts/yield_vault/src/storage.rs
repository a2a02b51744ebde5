use circle_core::storage::extend_instance_ttl;
use soroban_sdk::{contracttype, Address, Env, IntoVal, Val};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,       // -> Address
    Owner,       // -> Address, the pool allowed to move assets
    Asset,       // -> Address
    ApyBps,      // -> u32
    Assets,      // -> i128, principal plus accrued yield
    Reserve,     // -> i128, tokens backing future yield
    LastAccrual, // -> u64
}

pub fn get_admin(env: &Env) -> Address {
    env.storage().instance().get(&DataKey::Admin).unwrap()
}

pub fn get_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Owner)
}

pub fn get_asset(env: &Env) -> Address {
    env.storage().instance().get(&DataKey::Asset).unwrap()
}

pub fn get_apy_bps(env: &Env) -> u32 {
    env.storage().instance().get(&DataKey::ApyBps).unwrap_or(0)
}

pub fn get_i128(env: &Env, key: &DataKey) -> i128 {
    env.storage().instance().get(key).unwrap_or(0)
}

pub fn get_last_accrual(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::LastAccrual)
        .unwrap_or(0)
}

pub fn set<V>(env: &Env, key: &DataKey, value: &V)
where
    V: IntoVal<Env, Val>,
{
    env.storage().instance().set(key, value);
    extend_instance_ttl(env);
}
