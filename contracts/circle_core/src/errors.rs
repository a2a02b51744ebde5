use soroban_sdk::contracterror;

/// Failures shared by every pool variant.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum PoolError {
    Unauthorized = 1,
    AlreadyInvited = 2,
    NotInvited = 3,
    AlreadyMember = 4,
    InvalidTarget = 5,
    ZeroAmount = 6,
    NotMember = 7,
    DeadlinePassed = 8,
    DeadlineNotPassed = 9,
    AlreadyReleased = 10,
    GoalWasMet = 11,
    GoalNotMetDeadlineNotPassed = 12,
    RefundsNotEnabled = 13,
    NothingToRefund = 14,
    InsufficientBalance = 15,
    ExceedsPrincipalForNativeAsset = 16,
    RefundsActive = 17,
    ZeroGoal = 18,
    TargetInPast = 19,
    PoolClosed = 20,
    InvalidAmount = 21,
    AlreadyContributed = 22,
    RoundNotComplete = 23,
    RotationNotActive = 24,
    RotationStarted = 25,
    InsufficientMembers = 26,
    Overflow = 27,
}
