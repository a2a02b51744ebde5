#![no_std]

//! Building blocks shared by the circle pool contracts: the membership
//! registry, the custody ledger, shared events and errors, and the contract
//! interfaces pools implement or consume.

use soroban_sdk::{Address, Env, String};

pub mod errors;
pub mod events;
pub mod interface;
pub mod ledger;
pub mod membership;
pub mod storage;
pub mod token;
pub mod types;

pub use errors::PoolError;
pub use interface::{CirclePool, CirclePoolClient, YieldVaultClient, YieldVaultInterface};
pub use types::{CoreKey, MemberRecord, PoolInfo, PoolKind};

/// Strkey of the all-zero ed25519 account, used wherever a "null" address
/// must be rejected.
pub const NULL_ACCOUNT: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";

pub fn null_address(env: &Env) -> Address {
    Address::from_string(&String::from_str(env, NULL_ACCOUNT))
}

pub fn is_null(env: &Env, address: &Address) -> bool {
    *address == null_address(env)
}

/// Seconds left until `deadline`, clamped at zero once it has passed.
pub fn time_remaining(env: &Env, deadline: u64) -> u64 {
    deadline.saturating_sub(env.ledger().timestamp())
}
