use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum InviteError {
    OnlyBackend = 1,
    OnlyOwner = 2,
    InviteNotFound = 3,
    InviteExpired = 4,
    InviteAlreadyUsed = 5,
    InviteNotCancellable = 6,
    AlreadyRegistered = 7,
    InvalidBackend = 8,
    InvalidExpiry = 9,
}
