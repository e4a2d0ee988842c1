use soroban_sdk::contracterror;

/// Rejection reasons surfaced by every fallible vault entry point.
/// Missing signatures are still signalled by the host through `require_auth`.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
#[repr(u32)]
pub enum VaultError {
    /// `initialize` was called twice.
    AlreadyInitialized = 1,
    /// An entry point ran before `initialize`.
    NotInitialized = 2,
    /// Caller is not the administrator (or not the pending administrator).
    Unauthorized = 3,
    /// The recipient already holds a grant; it must be revoked first.
    GrantAlreadyExists = 4,
    /// Grant amount must be positive.
    InvalidAmount = 5,
    /// Cliff exceeds the policy cap (120 months by default).
    LockTooLong = 6,
    /// Duration exceeds the policy cap (300 months by default).
    DurationTooLong = 7,
    /// Duration must be at least one month.
    InvalidDuration = 8,
    /// `amount / vesting_duration` truncates to zero.
    ZeroMonthlyVesting = 9,
    /// The token refused to move the grant amount into custody.
    InsufficientFunds = 10,
    /// Nothing is claimable at the current ledger time.
    NothingVested = 11,
    /// The whole grant has already been paid out.
    GrantFullyClaimed = 12,
    /// No grant is stored for the recipient.
    GrantNotFound = 13,
    /// Month length and the duration cap must be positive.
    InvalidPolicy = 14,
    /// `accept_admin` without a preceding `propose_admin`.
    NoPendingAdmin = 15,
    /// A vesting computation left the `i128` range.
    MathOverflow = 16,
}

impl VaultError {
    pub fn reason(&self) -> &'static str {
        match self {
            VaultError::AlreadyInitialized => "vault already initialized",
            VaultError::NotInitialized => "vault not initialized",
            VaultError::Unauthorized => "caller is not the administrator",
            VaultError::GrantAlreadyExists => "grant already exists, must revoke first",
            VaultError::InvalidAmount => "grant amount cannot be 0",
            VaultError::LockTooLong => "lock greater than 10 years",
            VaultError::DurationTooLong => "duration greater than 25 years",
            VaultError::InvalidDuration => "duration must be at least one month",
            VaultError::ZeroMonthlyVesting => "per-month vesting amount must be positive",
            VaultError::InsufficientFunds => "token transfer into custody failed",
            VaultError::NothingVested => "nothing vested yet",
            VaultError::GrantFullyClaimed => "grant fully claimed",
            VaultError::GrantNotFound => "no active grant for recipient",
            VaultError::InvalidPolicy => "month length and duration cap must be positive",
            VaultError::NoPendingAdmin => "no administrator transfer pending",
            VaultError::MathOverflow => "arithmetic overflow",
        }
    }
}
