use soroban_sdk::{contracttype, Address, BytesN, String};

/// Which policy a pool applies to the shared membership and ledger.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PoolKind {
    Donation = 0,
    Savings = 1,
    YieldSavings = 2,
    Rosca = 3,
}

/// Summary every pool variant reports about itself.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolInfo {
    pub circle_id: BytesN<32>,
    pub name: String,
    pub kind: PoolKind,
    pub creator: Address,
    pub asset: Address,
    pub is_native: bool,
    pub is_active: bool,
}

/// Per-address membership state. Both flags only ever go from false to true.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MemberRecord {
    pub is_invited: bool,
    pub is_member: bool,
}

/// Storage keys owned by the shared modules. Variant names must not clash with
/// the pool crates' own `DataKey` variants.
#[contracttype]
#[derive(Clone)]
pub enum CoreKey {
    PoolCreator,              // -> Address
    BackendManager,           // -> Address
    MemberRecord(Address),    // -> MemberRecord
    MemberList,               // -> Vec<Address>
    Contribution(Address),    // -> i128
    TotalContributed,         // -> i128
    ContributorSeen(Address), // -> bool
    Contributors,             // -> Vec<Address>
}
