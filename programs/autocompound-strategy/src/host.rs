//! Everything the strategy needs from the outside world, behind one seam.
//!
//! [`crate::cpi_host::CpiHost`] implements it with cross-program invocations;
//! tests implement it in memory.

use pinocchio::{program_error::ProgramError, pubkey::Pubkey};

use crate::{
    ledger::{TokenLedger, TokenTransfers},
    routes::SwapRouter,
    stake::{IntermediateLayer, SecondaryLayer},
};

/// Collaborators of the strategy: token accounts, the swap router, both
/// staking layers and the clock.
pub trait StrategyHost:
    TokenLedger + TokenTransfers + SwapRouter + IntermediateLayer + SecondaryLayer
{
    /// Current unix timestamp, used for swap deadlines.
    fn unix_timestamp(&self) -> Result<i64, ProgramError>;
}

/// Invocation stack height of an instruction that sits directly in a
/// transaction.
pub const TRANSACTION_LEVEL_STACK_HEIGHT: u64 = 1;

/// Invocation stack height of the running instruction.
pub fn stack_height() -> u64 {
    #[cfg(target_os = "solana")]
    {
        // SAFETY: the syscall takes no arguments and only reads runtime state
        unsafe { pinocchio::syscalls::sol_get_stack_height() }
    }
    #[cfg(not(target_os = "solana"))]
    {
        TRANSACTION_LEVEL_STACK_HEIGHT
    }
}

/// How the invoking identity reached the strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallOrigin {
    /// Instruction sits directly in a signed transaction
    TopLevel,
    /// Instruction was invoked by another program
    CrossProgram,
}

impl CallOrigin {
    /// Origin of the running instruction.
    pub fn current() -> Self {
        if stack_height() > TRANSACTION_LEVEL_STACK_HEIGHT {
            Self::CrossProgram
        } else {
            Self::TopLevel
        }
    }
}

/// Identity invoking an operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Caller {
    /// Signer key
    pub key: Pubkey,
    /// Invocation path
    pub origin: CallOrigin,
}

impl Caller {
    /// Caller signing a top-level instruction.
    pub const fn top_level(key: Pubkey) -> Self {
        Self {
            key,
            origin: CallOrigin::TopLevel,
        }
    }

    /// Caller reached through a cross-program invocation.
    pub const fn cross_program(key: Pubkey) -> Self {
        Self {
            key,
            origin: CallOrigin::CrossProgram,
        }
    }

    /// Whether the caller is a program rather than a transaction signer.
    ///
    /// This is a heuristic against atomic composition, not a reentrancy
    /// guarantee.
    pub const fn is_contract(&self) -> bool {
        matches!(self.origin, CallOrigin::CrossProgram)
    }
}
