use soroban_sdk::{contractevent, Address};

/// `inviter` is whoever actually issued the invite: the creator or the
/// backend manager.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MemberInvitedEvent {
    #[topic]
    pub inviter: Address,
    #[topic]
    pub member: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MemberJoinedEvent {
    #[topic]
    pub member: Address,
    pub member_count: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BackendManagerChangedEvent {
    #[topic]
    pub creator: Address,
    pub old_manager: Option<Address>,
    pub new_manager: Option<Address>,
}

/// Donation, deposit or rotation contribution credited to `contributor`.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionEvent {
    #[topic]
    pub contributor: Address,
    pub amount: i128,
    pub balance: i128,
    pub total: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GoalReachedEvent {
    pub total: i128,
    pub goal: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawalEvent {
    #[topic]
    pub member: Address,
    pub amount: i128,
    pub remaining: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolClosedEvent {
    #[topic]
    pub creator: Address,
    pub timestamp: u64,
}
