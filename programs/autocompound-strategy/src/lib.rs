//! Autocompound Strategy Program
//!
//! Holds a vault's base asset and routes it through two staking layers:
//! base asset into the intermediate layer for receipts, receipts into the
//! secondary layer for rewards. Harvests sell a slice of the rewards into the
//! routing asset for fees and restake the rest.
//!
//! # Architecture
//!
//! Operations live in [`lifecycle::LifecycleController`] and only talk to the
//! outside world through [`host::StrategyHost`]. On chain that is
//! [`cpi_host::CpiHost`]; tests drive the same controller in memory.
//!
//! # Instructions
//!
//! - `Deposit`: Stake idle base asset
//! - `Withdraw`: Release capital to the vault, net of the withdrawal fee
//! - `Harvest`: Claim, distribute fees, compound
//! - `QueryBalance`: Report the capital split
//! - `Initialize`, `Pause`, `Unpause`, `Panic`, `Retire`: lifecycle
//! - `TransferOwnership`, `AcceptOwnership`: two-step ownership

#![cfg_attr(not(test), no_std)]

pub mod cpi_host;
pub mod errors;
pub mod events;
pub mod fees;
pub mod host;
pub mod instructions;
pub mod ledger;
pub mod lifecycle;
pub mod pda;
pub mod reconcile;
pub mod routes;
pub mod stake;
pub mod state;

// Error types
pub use errors::{ErrorKind, StrategyError};

// Instruction enum for dispatch
pub use instructions::StrategyInstruction;

// PDA derivation helpers
pub use pda::*;

// State types
pub use state::StrategyConfig;

use pinocchio::{
    ProgramResult, account_info::AccountInfo, program_error::ProgramError, pubkey::Pubkey,
};

/// Program ID, selected at compile time by network feature.
pub const ID: Pubkey = compounder_interface::STRATEGY_PROGRAM_ID;

#[cfg(not(feature = "no-entrypoint"))]
pinocchio::entrypoint!(process_instruction);

/// Dispatch an instruction by its one-byte discriminator.
pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    if program_id != &ID {
        return Err(ProgramError::IncorrectProgramId);
    }

    let (discriminator, data) = instruction_data
        .split_first()
        .ok_or(ProgramError::InvalidInstructionData)?;
    let instruction = StrategyInstruction::try_from(*discriminator)
        .map_err(|_| ProgramError::InvalidInstructionData)?;

    match instruction {
        StrategyInstruction::Deposit => instructions::process_deposit(accounts, data),
        StrategyInstruction::Withdraw => instructions::process_withdraw(accounts, data),
        StrategyInstruction::Harvest => instructions::process_harvest(accounts, data),
        StrategyInstruction::QueryBalance => instructions::process_query_balance(accounts, data),
        StrategyInstruction::Initialize => instructions::process_initialize(accounts, data),
        StrategyInstruction::Pause => instructions::process_pause(accounts, data),
        StrategyInstruction::Unpause => instructions::process_unpause(accounts, data),
        StrategyInstruction::Panic => instructions::process_panic(accounts, data),
        StrategyInstruction::Retire => instructions::process_retire(accounts, data),
        StrategyInstruction::Log => instructions::process_log(accounts, data),
        StrategyInstruction::TransferOwnership => {
            instructions::process_transfer_ownership(accounts, data)
        }
        StrategyInstruction::AcceptOwnership => {
            instructions::process_accept_ownership(accounts, data)
        }
    }
}
