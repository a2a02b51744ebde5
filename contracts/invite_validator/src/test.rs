use crate::{InviteError, InviteValidator, InviteValidatorClient};
use circle_core::null_address;
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    Address, Bytes, BytesN, Env,
};

const NOW: u64 = 1_000;
const EXPIRY: u64 = 2_000;

struct Setup<'a> {
    client: InviteValidatorClient<'a>,
    owner: Address,
    backend: Address,
    inviter: Address,
    group: BytesN<32>,
}

fn setup_test<'a>(env: &Env) -> Setup<'a> {
    env.mock_all_auths();
    env.ledger().set_timestamp(NOW);

    let owner = Address::generate(env);
    let backend = Address::generate(env);
    let contract_id = env.register(InviteValidator, (owner.clone(), backend.clone()));

    Setup {
        client: InviteValidatorClient::new(env, &contract_id),
        owner,
        backend,
        inviter: Address::generate(env),
        group: BytesN::from_array(env, &[1u8; 32]),
    }
}

fn code(env: &Env, raw: &str) -> Bytes {
    Bytes::from_slice(env, raw.as_bytes())
}

/// Register `raw` for the setup group, returning its hash.
fn register(env: &Env, s: &Setup, raw: &str, expires_at: u64) -> BytesN<32> {
    let hash = s.client.hash_code(&code(env, raw));
    s.client
        .register_invite(&s.backend, &s.group, &s.inviter, &hash, &expires_at);
    hash
}

#[test]
fn test_register_and_consume() {
    let env = Env::default();
    let s = setup_test(&env);
    let claimant = Address::generate(&env);

    let hash = register(&env, &s, "WELCOME-42", EXPIRY);
    let inviter = s
        .client
        .validate_and_consume(&s.group, &code(&env, "WELCOME-42"), &claimant);
    assert_eq!(inviter, s.inviter);

    let record = s.client.get_invite(&s.group, &hash).unwrap();
    assert!(record.used);
    assert_eq!(record.used_by, Some(claimant.clone()));

    let result = s
        .client
        .try_validate_and_consume(&s.group, &code(&env, "WELCOME-42"), &claimant);
    assert_eq!(result, Err(Ok(InviteError::InviteAlreadyUsed)));
}

#[test]
fn test_expiry_boundary_is_inclusive() {
    let env = Env::default();
    let s = setup_test(&env);
    register(&env, &s, "edge", EXPIRY);
    register(&env, &s, "late", EXPIRY);

    env.ledger().set_timestamp(EXPIRY);
    let claimant = Address::generate(&env);
    s.client
        .validate_and_consume(&s.group, &code(&env, "edge"), &claimant);

    env.ledger().set_timestamp(EXPIRY + 1);
    let result = s
        .client
        .try_validate_and_consume(&s.group, &code(&env, "late"), &claimant);
    assert_eq!(result, Err(Ok(InviteError::InviteExpired)));
}

#[test]
fn test_unknown_code_or_group() {
    let env = Env::default();
    let s = setup_test(&env);
    let claimant = Address::generate(&env);
    register(&env, &s, "right", EXPIRY);

    let result = s
        .client
        .try_validate_and_consume(&s.group, &code(&env, "wrong"), &claimant);
    assert_eq!(result, Err(Ok(InviteError::InviteNotFound)));

    let other_group = BytesN::from_array(&env, &[2u8; 32]);
    let result = s
        .client
        .try_validate_and_consume(&other_group, &code(&env, "right"), &claimant);
    assert_eq!(result, Err(Ok(InviteError::InviteNotFound)));
}

#[test]
fn test_only_backend_registers_and_cancels() {
    let env = Env::default();
    let s = setup_test(&env);
    let hash = s.client.hash_code(&code(&env, "abc"));

    let result = s
        .client
        .try_register_invite(&s.owner, &s.group, &s.inviter, &hash, &EXPIRY);
    assert_eq!(result, Err(Ok(InviteError::OnlyBackend)));

    register(&env, &s, "abc", EXPIRY);
    let result = s.client.try_cancel_invite(&s.inviter, &s.group, &hash);
    assert_eq!(result, Err(Ok(InviteError::OnlyBackend)));
}

#[test]
fn test_cancel_clears_slot_for_reuse() {
    let env = Env::default();
    let s = setup_test(&env);
    let claimant = Address::generate(&env);

    let hash = register(&env, &s, "reuse-me", EXPIRY);
    s.client.cancel_invite(&s.backend, &s.group, &hash);
    assert_eq!(s.client.get_invite(&s.group, &hash), None);

    let result = s
        .client
        .try_validate_and_consume(&s.group, &code(&env, "reuse-me"), &claimant);
    assert_eq!(result, Err(Ok(InviteError::InviteNotFound)));
    let result = s.client.try_cancel_invite(&s.backend, &s.group, &hash);
    assert_eq!(result, Err(Ok(InviteError::InviteNotFound)));

    register(&env, &s, "reuse-me", EXPIRY + 500);
    let record = s.client.get_invite(&s.group, &hash).unwrap();
    assert_eq!(record.expires_at, EXPIRY + 500);
    assert!(!record.used);
    assert_eq!(record.used_by, None);
}

#[test]
fn test_used_invite_cannot_be_cancelled() {
    let env = Env::default();
    let s = setup_test(&env);
    let claimant = Address::generate(&env);

    let hash = register(&env, &s, "once", EXPIRY);
    s.client
        .validate_and_consume(&s.group, &code(&env, "once"), &claimant);

    let result = s.client.try_cancel_invite(&s.backend, &s.group, &hash);
    assert_eq!(result, Err(Ok(InviteError::InviteNotCancellable)));
}

#[test]
fn test_register_collisions() {
    let env = Env::default();
    let s = setup_test(&env);
    let hash = register(&env, &s, "dup", EXPIRY);

    let result = s
        .client
        .try_register_invite(&s.backend, &s.group, &s.inviter, &hash, &(EXPIRY + 1));
    assert_eq!(result, Err(Ok(InviteError::AlreadyRegistered)));

    let result = s
        .client
        .try_register_invite(&s.backend, &s.group, &s.inviter, &hash, &NOW);
    assert_eq!(result, Err(Ok(InviteError::InvalidExpiry)));

    // Once expired and unused, the slot may be issued again.
    env.ledger().set_timestamp(EXPIRY + 1);
    register(&env, &s, "dup", EXPIRY + 100);
    assert_eq!(
        s.client.get_invite(&s.group, &hash).unwrap().expires_at,
        EXPIRY + 100
    );
}

#[test]
fn test_update_backend_revokes_previous() {
    let env = Env::default();
    let s = setup_test(&env);
    let new_backend = Address::generate(&env);

    let result = s.client.try_update_backend(&s.backend, &new_backend);
    assert_eq!(result, Err(Ok(InviteError::OnlyOwner)));
    let result = s.client.try_update_backend(&s.owner, &null_address(&env));
    assert_eq!(result, Err(Ok(InviteError::InvalidBackend)));

    s.client.update_backend(&s.owner, &new_backend);
    assert_eq!(s.client.backend(), new_backend);
    assert_eq!(s.client.owner(), s.owner);

    let hash = s.client.hash_code(&code(&env, "fresh"));
    let result = s
        .client
        .try_register_invite(&s.backend, &s.group, &s.inviter, &hash, &EXPIRY);
    assert_eq!(result, Err(Ok(InviteError::OnlyBackend)));
    s.client
        .register_invite(&new_backend, &s.group, &s.inviter, &hash, &EXPIRY);
}

#[test]
fn test_roster_hooks_always_approve() {
    let env = Env::default();
    let s = setup_test(&env);
    let member = Address::generate(&env);

    assert!(s.client.on_member_added(&s.group, &member));
    assert!(s.client.on_member_removed(&s.group, &member));
    assert!(s.client.on_member_left(&s.group, &member));
}
