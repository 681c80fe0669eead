//! Strategy errors.

use pinocchio::program_error::ProgramError;

/// Strategy error codes.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrategyError {
    /// Signer is not the strategy owner
    NotOwner = 0,
    /// Signer is not the vault
    NotVault = 1,
    /// Signer is not the pending owner
    NotPendingOwner = 2,
    /// Operation requires an active (unpaused) strategy
    StrategyPaused = 3,
    /// Operation requires a paused strategy
    StrategyNotPaused = 4,
    /// Strategy has been retired, capital operations are closed
    StrategyRetired = 5,
    /// Harvest was invoked through another program
    ContractCaller = 6,
    /// Arithmetic overflow
    ArithmeticOverflow = 7,
    /// Invalid instruction data
    InvalidInstructionData = 8,
    /// Account does not match the one registered in the strategy config
    InvalidAccount = 9,
    /// Route is empty, too long, or does not connect the expected assets
    InvalidRoute = 10,
    /// Fee schedule exceeds its denominators
    InvalidFeeSchedule = 11,
    /// Strategy config account already initialized
    AlreadyInitialized = 12,
    /// Strategy config account is missing, foreign, or malformed
    InvalidStrategyAccount = 13,
    /// Staking layer position account is malformed
    InvalidPosition = 14,
}

/// Error categories surfaced to callers.
///
/// Every category is fatal: the whole instruction aborts and the runtime
/// discards every effect it had.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller is not the identity the operation requires
    Authorization,
    /// Operation is not allowed in the current lifecycle state
    Lifecycle,
    /// Harvest invoked by a program rather than a transaction signer
    ContractCaller,
    /// Malformed input or accounts
    Validation,
    /// Checked arithmetic failed
    Arithmetic,
}

impl StrategyError {
    /// Convert to error code
    pub const fn to_u32(self) -> u32 {
        self as u32
    }

    /// Category of this error
    pub const fn kind(self) -> ErrorKind {
        match self {
            Self::NotOwner | Self::NotVault | Self::NotPendingOwner => ErrorKind::Authorization,
            Self::StrategyPaused | Self::StrategyNotPaused | Self::StrategyRetired => {
                ErrorKind::Lifecycle
            }
            Self::ContractCaller => ErrorKind::ContractCaller,
            Self::ArithmeticOverflow => ErrorKind::Arithmetic,
            Self::InvalidInstructionData
            | Self::InvalidAccount
            | Self::InvalidRoute
            | Self::InvalidFeeSchedule
            | Self::AlreadyInitialized
            | Self::InvalidStrategyAccount
            | Self::InvalidPosition => ErrorKind::Validation,
        }
    }

    /// Create from error code
    pub fn from_u32(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::NotOwner),
            1 => Some(Self::NotVault),
            2 => Some(Self::NotPendingOwner),
            3 => Some(Self::StrategyPaused),
            4 => Some(Self::StrategyNotPaused),
            5 => Some(Self::StrategyRetired),
            6 => Some(Self::ContractCaller),
            7 => Some(Self::ArithmeticOverflow),
            8 => Some(Self::InvalidInstructionData),
            9 => Some(Self::InvalidAccount),
            10 => Some(Self::InvalidRoute),
            11 => Some(Self::InvalidFeeSchedule),
            12 => Some(Self::AlreadyInitialized),
            13 => Some(Self::InvalidStrategyAccount),
            14 => Some(Self::InvalidPosition),
            _ => None,
        }
    }
}

impl From<StrategyError> for ProgramError {
    fn from(e: StrategyError) -> Self {
        ProgramError::Custom(e as u32)
    }
}
