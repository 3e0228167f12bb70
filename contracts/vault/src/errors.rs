use soroban_sdk::contracterror;

/// Failure conditions surfaced by every vault entry point.
///
/// # Code ranges
/// | Range   | Purpose                                  |
/// |---------|------------------------------------------|
/// | 1 – 3   | Lifecycle and authorization              |
/// | 4 – 7   | Input validation                         |
/// | 8 – 13  | Vault state                              |
/// | 14 – 15 | Propagated from the fungible asset       |
/// | 16      | Arithmetic                               |
///
/// Any error aborts the whole invocation; the host rolls back every
/// storage write made before it was returned.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum VaultError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    /// Caller is not the operator.
    PermissionDenied = 3,

    /// Zero or negative amount.
    InvalidAmount = 4,
    /// Registry offset past the number of holders.
    OutOfRange = 5,
    InvalidConfig = 6,
    TokensIdentical = 7,

    /// `now > deposit_window_end`.
    DepositsClosed = 8,
    /// The holder's most recent deposit is still inside the lockup.
    LockupActive = 9,
    InsufficientStake = 10,
    /// The deposit asset can never be swept by the operator.
    ProtectedAsset = 11,
    /// Reward asset sweep attempted before `admin_claimable_at`.
    NotYetClaimable = 12,
    NoPendingAdmin = 13,

    InsufficientAllowance = 14,
    InsufficientBalance = 15,

    MathOverflow = 16,
}
