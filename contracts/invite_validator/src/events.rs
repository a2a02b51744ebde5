use soroban_sdk::{contractevent, Address, BytesN};

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InviteRegisteredEvent {
    #[topic]
    pub group_id: BytesN<32>,
    #[topic]
    pub inviter: Address,
    pub code_hash: BytesN<32>,
    pub expires_at: u64,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InviteUsedEvent {
    #[topic]
    pub group_id: BytesN<32>,
    #[topic]
    pub claimant: Address,
    pub inviter: Address,
    pub code_hash: BytesN<32>,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InviteCancelledEvent {
    #[topic]
    pub group_id: BytesN<32>,
    pub code_hash: BytesN<32>,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BackendUpdatedEvent {
    #[topic]
    pub owner: Address,
    pub old_backend: Address,
    pub new_backend: Address,
}
