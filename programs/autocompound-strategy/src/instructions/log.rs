//! Log instruction handler for emitting events.
//!
//! The strategy invokes itself with this instruction to put event bytes into
//! the program logs. Only a signer owned by this program may do so, which in
//! practice means the strategy config PDA signing through `invoke_signed`.

use pinocchio::{ProgramResult, account_info::AccountInfo, program_error::ProgramError};
use pinocchio_log::log;

/// Process a log instruction.
///
/// Data layout: [length: u32 LE, event type: u64 LE, event fields...]
///
/// # Accounts
/// 0. `[signer]` - Strategy config PDA
pub fn process_log(accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    let [authority, ..] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };

    if !authority.is_signer() {
        log!("log: authority must be a signer");
        return Err(ProgramError::MissingRequiredSignature);
    }

    if authority.owner() != &crate::ID {
        log!("log: authority must be owned by this program");
        return Err(ProgramError::IllegalOwner);
    }

    let Some((len_bytes, event_data)) = data.split_first_chunk::<4>() else {
        return Err(ProgramError::InvalidInstructionData);
    };
    let len = u32::from_le_bytes(*len_bytes) as usize;
    let Some(event) = event_data.get(..len) else {
        return Err(ProgramError::InvalidInstructionData);
    };

    pinocchio::log::sol_log_data(&[event]);

    Ok(())
}
