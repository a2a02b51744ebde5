use soroban_sdk::{contractevent, Address};

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct YieldAccruedEvent {
    pub amount: i128,
    pub total_assets: i128,
    pub timestamp: u64,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultDepositEvent {
    #[topic]
    pub from: Address,
    pub amount: i128,
    pub total_assets: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultWithdrawEvent {
    #[topic]
    pub to: Address,
    pub amount: i128,
    pub total_assets: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReserveFundedEvent {
    #[topic]
    pub from: Address,
    pub amount: i128,
    pub reserve: i128,
}
