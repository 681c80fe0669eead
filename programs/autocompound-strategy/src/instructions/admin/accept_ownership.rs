//! `AcceptOwnership` instruction handler.

use compounder_interface::authority::accept_ownership_impl;
use pinocchio::{
    ProgramResult, account_info::AccountInfo, instruction::Signer, program_error::ProgramError,
};

use crate::{
    StrategyError,
    events::{OwnershipTransferredEvent, emit_event},
    gen_strategy_seeds,
    state::StrategyConfig,
};

/// Process accept ownership instruction.
///
/// The signer must be the pending owner. Clears the pending slot.
///
/// # Accounts
/// 0. `[writable]` - Strategy config PDA
/// 1. `[signer]` - Pending owner
/// 2. `[]` - Strategy program (for event emission)
pub fn process_accept_ownership(accounts: &[AccountInfo], _data: &[u8]) -> ProgramResult {
    let [strategy, signer, strategy_program, ..] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    if strategy_program.key() != &crate::ID {
        return Err(ProgramError::IncorrectProgramId);
    }
    if !signer.is_signer() {
        return Err(ProgramError::MissingRequiredSignature);
    }

    let mut config = StrategyConfig::load(strategy)?;
    let previous_owner = config.owner;
    accept_ownership_impl(&mut config, signer.key())
        .map_err(|_| ProgramError::from(StrategyError::NotPendingOwner))?;
    config.store(strategy)?;

    let bump = [config.bump];
    let seeds = gen_strategy_seeds(&config.vault, &bump);
    emit_event(
        strategy,
        strategy_program,
        Signer::from(&seeds),
        &OwnershipTransferredEvent {
            strategy: *strategy.key(),
            previous_owner,
            new_owner: config.owner,
        },
    )
}
