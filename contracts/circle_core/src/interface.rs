use soroban_sdk::{contractclient, Address, Env, Vec};

use crate::errors::PoolError;
use crate::types::PoolInfo;

/// Surface every pool variant exposes, whatever its release/withdraw policy.
///
/// Variant-specific transitions (release and refunds, withdrawals, rotation
/// payouts) stay inherent entry points on each contract.
#[contractclient(name = "CirclePoolClient")]
pub trait CirclePool {
    /// Credit `amount` from `caller` into the pool under the variant's gating rules.
    fn contribute(env: Env, caller: Address, amount: i128) -> Result<(), PoolError>;

    /// `(raised, goal)`; goal is zero when the variant has none set.
    fn get_progress(env: Env) -> (i128, i128);

    /// Value currently recorded for `who` in the custody ledger.
    fn balance_of(env: Env, who: Address) -> i128;

    fn pool_info(env: Env) -> PoolInfo;

    fn invite(env: Env, inviter: Address, candidate: Address) -> Result<(), PoolError>;

    fn join(env: Env, caller: Address) -> Result<(), PoolError>;

    fn is_member(env: Env, who: Address) -> bool;

    fn is_invited(env: Env, who: Address) -> bool;

    fn member_count(env: Env) -> u32;

    fn members(env: Env) -> Vec<Address>;
}

/// Yield-bearing vault the yield-savings pool parks principal in. The vault's
/// accounting is ground truth; pools only apportion what it reports.
#[contractclient(name = "YieldVaultClient")]
pub trait YieldVaultInterface {
    /// Assets managed on behalf of the owning pool, accrued yield included.
    fn total_assets(env: Env) -> i128;

    /// Bring accrued yield up to the current ledger time.
    fn accrue(env: Env);

    /// Configured annual rate in basis points.
    fn apy_bps(env: Env) -> u32;

    fn deposit(env: Env, from: Address, amount: i128);

    fn withdraw(env: Env, to: Address, amount: i128);
}
