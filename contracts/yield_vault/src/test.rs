use crate::{VaultError, YieldVault, YieldVaultClient, SECONDS_PER_YEAR};
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token::{StellarAssetClient, TokenClient},
    Address, Env,
};

const START: u64 = 1_000_000;

fn create_token_contract<'a>(
    env: &Env,
    admin: &Address,
) -> (TokenClient<'a>, StellarAssetClient<'a>) {
    let contract_address = env.register_stellar_asset_contract_v2(admin.clone());
    (
        TokenClient::new(env, &contract_address.address()),
        StellarAssetClient::new(env, &contract_address.address()),
    )
}

/// Vault at 10% APY with a 100_000 reserve and an owner bound.
fn setup_test<'a>(env: &Env) -> (YieldVaultClient<'a>, Address, Address, TokenClient<'a>) {
    env.mock_all_auths_allowing_non_root_auth();
    env.ledger().set_timestamp(START);

    let admin = Address::generate(env);
    let owner = Address::generate(env);
    let depositor = Address::generate(env);
    let (token, asset_admin) = create_token_contract(env, &admin);
    asset_admin.mint(&admin, &100_000);
    asset_admin.mint(&depositor, &1_000_000);

    let vault = env.register(YieldVault, (admin.clone(), token.address.clone(), 1_000u32));
    let client = YieldVaultClient::new(env, &vault);
    client.set_owner(&admin, &owner);
    client.fund_reserve(&admin, &100_000);

    (client, admin, depositor, token)
}

#[test]
fn test_deposit_and_linear_accrual() {
    let env = Env::default();
    let (client, _, depositor, token) = setup_test(&env);

    client.deposit(&depositor, &1_000_000);
    assert_eq!(client.total_assets(), 1_000_000);
    assert_eq!(client.apy_bps(), 1_000);

    env.ledger().set_timestamp(START + SECONDS_PER_YEAR / 2);
    client.accrue();
    assert_eq!(client.total_assets(), 1_050_000);
    assert_eq!(client.reserve(), 50_000);
    assert_eq!(token.balance(&client.address), 1_100_000);
}

#[test]
fn test_accrual_capped_by_reserve() {
    let env = Env::default();
    let (client, _, depositor, _) = setup_test(&env);
    client.deposit(&depositor, &1_000_000);

    env.ledger().set_timestamp(START + SECONDS_PER_YEAR * 5);
    client.accrue();
    assert_eq!(client.total_assets(), 1_100_000);
    assert_eq!(client.reserve(), 0);
}

#[test]
fn test_no_accrual_without_elapsed_time() {
    let env = Env::default();
    let (client, _, depositor, _) = setup_test(&env);
    client.deposit(&depositor, &500_000);

    client.accrue();
    assert_eq!(client.total_assets(), 500_000);
}

#[test]
fn test_withdraw_pays_out_yield() {
    let env = Env::default();
    let (client, _, depositor, token) = setup_test(&env);
    client.deposit(&depositor, &1_000_000);

    env.ledger().set_timestamp(START + SECONDS_PER_YEAR);
    client.withdraw(&depositor, &1_100_000);
    assert_eq!(client.total_assets(), 0);
    assert_eq!(token.balance(&depositor), 1_100_000);
}

#[test]
fn test_withdraw_beyond_assets_fails() {
    let env = Env::default();
    let (client, _, depositor, _) = setup_test(&env);
    client.deposit(&depositor, &10);

    let result = client.try_withdraw(&depositor, &11);
    assert_eq!(result, Err(Ok(VaultError::InsufficientAssets.into())));
    let result = client.try_deposit(&depositor, &0);
    assert_eq!(result, Err(Ok(VaultError::InvalidAmount.into())));
}

#[test]
fn test_owner_is_set_once() {
    let env = Env::default();
    let (client, admin, depositor, _) = setup_test(&env);

    let result = client.try_set_owner(&admin, &depositor);
    assert_eq!(result, Err(Ok(VaultError::OwnerAlreadySet)));
    let result = client.try_set_owner(&depositor, &depositor);
    assert_eq!(result, Err(Ok(VaultError::Unauthorized)));
}

#[test]
fn test_unbound_vault_rejects_deposits() {
    let env = Env::default();
    env.mock_all_auths_allowing_non_root_auth();
    let admin = Address::generate(&env);
    let (token, _) = create_token_contract(&env, &admin);

    let vault = env.register(YieldVault, (admin.clone(), token.address.clone(), 500u32));
    let client = YieldVaultClient::new(&env, &vault);

    let result = client.try_deposit(&admin, &100);
    assert_eq!(result, Err(Ok(VaultError::OwnerNotSet.into())));
    assert_eq!(client.owner(), None);
}
