#![cfg(test)]
extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token::{StellarAssetClient, TokenClient},
    Address, Bytes, BytesN, Env, String,
};

use circle_core::{CirclePoolClient, PoolError, PoolKind};
use donation_pool::{DonationPool, DonationPoolClient, PoolStatus};
use invite_validator::{InviteValidator, InviteValidatorClient};
use rosca_pool::{RoscaPool, RoscaPoolClient};
use savings_pool::{SavingsPool, SavingsPoolClient};
use yield_savings_pool::{YieldSavingsPool, YieldSavingsPoolClient};
use yield_vault::{YieldVault, YieldVaultClient as VaultClient, SECONDS_PER_YEAR};

const START: u64 = 100_000;

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

fn circle_id(env: &Env, tag: u8) -> BytesN<32> {
    BytesN::from_array(env, &[tag; 32])
}

#[test]
fn test_invite_code_to_donation_release_e2e() {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(START);

    let admin = Address::generate(&env);
    let creator = Address::generate(&env);
    let backend = Address::generate(&env);
    let beneficiary = Address::generate(&env);
    let friend = Address::generate(&env);
    let stranger = Address::generate(&env);
    let (token, asset_admin) = create_token_contract(&env, &admin);
    asset_admin.mint(&friend, &3_000);
    asset_admin.mint(&stranger, &2_000);

    let circle = circle_id(&env, 1);
    let validator_id = env.register(InviteValidator, (admin.clone(), backend.clone()));
    let validator = InviteValidatorClient::new(&env, &validator_id);

    // The backend doubles as the pool's backend manager.
    let pool_id = env.register(
        DonationPool,
        (
            creator.clone(),
            circle.clone(),
            String::from_str(&env, "Clinic Roof"),
            beneficiary.clone(),
            5_000i128,
            START + 1_000,
            token.address.clone(),
            false,
            Some(backend.clone()),
        ),
    );
    let pool = DonationPoolClient::new(&env, &pool_id);

    // Off-chain: the backend hands `friend` a code and registers its hash.
    let code = Bytes::from_slice(&env, b"roof-2026");
    let hash = validator.hash_code(&code);
    validator.register_invite(&backend, &circle, &creator, &hash, &(START + 500));

    // `friend` redeems it, then the backend invites them on-chain.
    let inviter = validator.validate_and_consume(&circle, &code, &friend);
    assert_eq!(inviter, creator);
    pool.invite(&backend, &friend);
    pool.join(&friend);
    assert_eq!(pool.member_count(), 2);

    // Members and strangers alike may donate.
    pool.contribute(&friend, &3_000);
    pool.contribute(&stranger, &2_000);
    assert!(pool.is_goal_reached());
    assert_eq!(pool.get_progress(), (5_000, 5_000));
    assert_eq!(pool.donor_count(), 2);

    assert_eq!(pool.release(&creator), 5_000);
    assert_eq!(pool.status(), PoolStatus::Released);
    assert_eq!(token.balance(&beneficiary), 5_000);
    assert_eq!(token.balance(&pool_id), 0);

    let result = pool.try_contribute(&stranger, &1);
    assert_eq!(result, Err(Ok(PoolError::AlreadyReleased)));

    std::println!("circle e2e: invite code redeemed, goal met, funds released");
}

#[test]
fn test_all_variants_share_circle_pool_interface() {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(START);

    let admin = Address::generate(&env);
    let creator = Address::generate(&env);
    let member = Address::generate(&env);
    let (token, asset_admin) = create_token_contract(&env, &admin);
    asset_admin.mint(&member, &10_000);
    asset_admin.mint(&creator, &10_000);
    asset_admin.mint(&admin, &10_000);

    let donation = env.register(
        DonationPool,
        (
            creator.clone(),
            circle_id(&env, 10),
            String::from_str(&env, "Donation"),
            Address::generate(&env),
            1_000i128,
            START + 1_000,
            token.address.clone(),
            false,
            None::<Address>,
        ),
    );
    let savings = env.register(
        SavingsPool,
        (
            creator.clone(),
            circle_id(&env, 11),
            String::from_str(&env, "Savings"),
            token.address.clone(),
            false,
            None::<Address>,
        ),
    );
    let vault_id = env.register(YieldVault, (admin.clone(), token.address.clone(), 500u32));
    let yield_savings = env.register(
        YieldSavingsPool,
        (
            creator.clone(),
            circle_id(&env, 12),
            String::from_str(&env, "Yield"),
            token.address.clone(),
            false,
            vault_id.clone(),
            None::<Address>,
        ),
    );
    VaultClient::new(&env, &vault_id).set_owner(&admin, &yield_savings);
    let rosca = env.register(
        RoscaPool,
        (
            creator.clone(),
            circle_id(&env, 13),
            String::from_str(&env, "Rosca"),
            token.address.clone(),
            false,
            250i128,
            86_400u64,
            None::<Address>,
        ),
    );

    let pools = [
        (donation, PoolKind::Donation),
        (savings, PoolKind::Savings),
        (yield_savings, PoolKind::YieldSavings),
        (rosca.clone(), PoolKind::Rosca),
    ];
    for (address, kind) in pools.iter() {
        let pool = CirclePoolClient::new(&env, address);

        let info = pool.pool_info();
        assert_eq!(info.kind, *kind);
        assert_eq!(info.creator, creator);
        assert!(info.is_active);
        assert_eq!(pool.member_count(), 1);

        let result = pool.try_join(&member);
        assert_eq!(result, Err(Ok(PoolError::NotInvited)));
        pool.invite(&creator, &member);
        assert!(pool.is_invited(&member));
        pool.join(&member);
        assert!(pool.is_member(&member));
        assert_eq!(pool.members().len(), 2);

        let result = pool.try_contribute(&member, &0);
        assert_eq!(result, Err(Ok(PoolError::ZeroAmount)));
    }

    // ROSCA only accepts contributions once the rotation is running.
    RoscaPoolClient::new(&env, &rosca).start_rotation(&creator);
    for (address, _) in pools.iter() {
        let pool = CirclePoolClient::new(&env, address);
        pool.contribute(&member, &250);
        assert_eq!(pool.balance_of(&member), 250);
        assert_eq!(pool.get_progress().0, 250);
    }
    assert_eq!(token.balance(&member), 10_000 - 4 * 250);
}

#[test]
fn test_yield_savings_with_vault_e2e() {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(START);

    let admin = Address::generate(&env);
    let creator = Address::generate(&env);
    let (token, asset_admin) = create_token_contract(&env, &admin);
    asset_admin.mint(&admin, &50_000);
    asset_admin.mint(&creator, &100_000);

    let vault_id = env.register(YieldVault, (admin.clone(), token.address.clone(), 1_000u32));
    let vault = VaultClient::new(&env, &vault_id);
    let pool_id = env.register(
        YieldSavingsPool,
        (
            creator.clone(),
            circle_id(&env, 20),
            String::from_str(&env, "Nest Egg"),
            token.address.clone(),
            false,
            vault_id.clone(),
            None::<Address>,
        ),
    );
    let pool = YieldSavingsPoolClient::new(&env, &pool_id);
    vault.set_owner(&admin, &pool_id);
    vault.fund_reserve(&admin, &50_000);

    pool.contribute(&creator, &100_000);
    assert_eq!(token.balance(&vault_id), 150_000);

    env.ledger().set_timestamp(START + SECONDS_PER_YEAR);
    vault.accrue();
    assert_eq!(pool.get_yield_earned(&creator), 10_000);
    assert_eq!(pool.get_pool_stats(), (100_000, 10_000, 110_000));
    assert_eq!(pool.get_apy(), 1_000);

    pool.withdraw(&creator, &110_000);
    assert_eq!(token.balance(&creator), 110_000);
    assert_eq!(vault.total_assets(), 0);
    assert_eq!(vault.reserve(), 40_000);
}

#[test]
fn test_savings_and_rosca_side_by_side() {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(START);

    let admin = Address::generate(&env);
    let creator = Address::generate(&env);
    let member = Address::generate(&env);
    let (token, asset_admin) = create_token_contract(&env, &admin);
    asset_admin.mint(&creator, &1_000);
    asset_admin.mint(&member, &1_000);

    let savings_id = env.register(
        SavingsPool,
        (
            creator.clone(),
            circle_id(&env, 30),
            String::from_str(&env, "Trip"),
            token.address.clone(),
            false,
            None::<Address>,
        ),
    );
    let savings = SavingsPoolClient::new(&env, &savings_id);
    let rosca_id = env.register(
        RoscaPool,
        (
            creator.clone(),
            circle_id(&env, 31),
            String::from_str(&env, "Pot"),
            token.address.clone(),
            false,
            200i128,
            3_600u64,
            None::<Address>,
        ),
    );
    let rosca = RoscaPoolClient::new(&env, &rosca_id);

    for pool in [
        CirclePoolClient::new(&env, &savings_id),
        CirclePoolClient::new(&env, &rosca_id),
    ] {
        pool.invite(&creator, &member);
        pool.join(&member);
    }

    savings.set_target(&creator, &600, &(START + 10_000));
    savings.contribute(&creator, &300);
    savings.contribute(&member, &300);
    assert!(savings.is_goal_reached());
    savings.close_pool(&creator);
    savings.withdraw(&member, &300);

    rosca.start_rotation(&creator);
    rosca.contribute(&creator, &200);
    rosca.contribute(&member, &200);
    assert_eq!(rosca.distribute_payout(), 400);
    rosca.contribute(&creator, &200);
    rosca.contribute(&member, &200);
    assert_eq!(rosca.distribute_payout(), 400);

    assert_eq!(token.balance(&creator), 1_000 - 300);
    assert_eq!(token.balance(&member), 1_000);
    assert_eq!(token.balance(&savings_id), 300);
    assert_eq!(token.balance(&rosca_id), 0);
}
