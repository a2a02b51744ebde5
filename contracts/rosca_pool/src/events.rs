use soroban_sdk::{contractevent, Address};

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RotationStartedEvent {
    #[topic]
    pub creator: Address,
    pub member_count: u32,
    pub first_deadline: u64,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoundOpenedEvent {
    #[topic]
    pub recipient: Address,
    pub round: u32,
    pub deadline: u64,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PayoutDistributedEvent {
    #[topic]
    pub recipient: Address,
    pub round: u32,
    pub amount: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RotationCompletedEvent {
    pub rounds: u32,
    pub timestamp: u64,
}
