use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum VaultError {
    Unauthorized = 1,
    OwnerAlreadySet = 2,
    OwnerNotSet = 3,
    InvalidAmount = 4,
    InsufficientAssets = 5,
    Overflow = 6,
}
