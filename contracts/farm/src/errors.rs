/// Errors returned by every farm entry point.
///
/// # Code ranges
/// | Range   | Purpose                        |
/// |---------|--------------------------------|
/// | 1 – 9   | Lifecycle / initialisation     |
/// | 10 – 19 | Authentication & authorisation |
/// | 20 – 29 | Resource not found             |
/// | 30 – 49 | Validation / input             |
/// | 50 – 59 | Contract state                 |
/// | 60+     | Arithmetic                     |
#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    // ── Lifecycle ──────────────────────────────────────────────
    NotInitialized = 1,
    AlreadyInitialized = 2,
    FarmNotStarted = 3,
    StartAlreadySet = 4,

    // ── Auth ───────────────────────────────────────────────────
    Unauthorized = 10,

    // ── Not found ──────────────────────────────────────────────
    PoolNotFound = 20,
    RewardStreamNotFound = 21,
    NoPendingAdmin = 22,

    // ── Validation ─────────────────────────────────────────────
    InvalidAddress = 30,
    InvalidAmount = 31,
    InsufficientStake = 32,
    DuplicatePoolAsset = 33,
    DuplicateRewardToken = 34,
    InvalidRewardToken = 35,
    InvalidEmissionRate = 36,
    InvalidStartTime = 37,
    NativeNotAccepted = 38,
    NativeAssetMismatch = 39,
    TooManyRewardStreams = 40,

    // ── State ──────────────────────────────────────────────────
    Reentrant = 50,

    // ── Arithmetic ─────────────────────────────────────────────
    MathOverflow = 60,
}
