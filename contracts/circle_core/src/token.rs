use soroban_sdk::{token, Address, Env};

/// Move `amount` of `asset` between two addresses. The token contract either
/// moves the whole amount or traps, which rolls back the calling invocation.
pub fn transfer(env: &Env, asset: &Address, from: &Address, to: &Address, amount: &i128) {
    token::Client::new(env, asset).transfer(from, to, amount);
}
