use soroban_sdk::{contractevent, Address};

/// Portion of a withdrawal that came out of accrued yield.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct YieldPaidEvent {
    #[topic]
    pub member: Address,
    pub amount: i128,
}
