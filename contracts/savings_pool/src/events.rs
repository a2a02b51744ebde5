use soroban_sdk::{contractevent, Address};

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TargetSetEvent {
    #[topic]
    pub creator: Address,
    pub goal: i128,
    pub target_date: u64,
}
