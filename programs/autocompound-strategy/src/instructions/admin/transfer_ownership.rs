//! `TransferOwnership` instruction handler.
//!
//! Nominates a pending owner. The nominee must call `AcceptOwnership` to
//! take over.

use compounder_interface::authority::transfer_ownership_impl;
use pinocchio::{
    ProgramResult, account_info::AccountInfo, instruction::Signer, program_error::ProgramError,
};
use pinocchio_log::log;

use crate::{
    StrategyError,
    events::{OwnershipTransferStartedEvent, emit_event},
    gen_strategy_seeds,
    state::StrategyConfig,
};

/// Process transfer ownership instruction.
///
/// # Accounts
/// 0. `[writable]` - Strategy config PDA
/// 1. `[signer]` - Current owner
/// 2. `[]` - Strategy program (for event emission)
/// 3. `[]` - Nominated owner
pub fn process_transfer_ownership(accounts: &[AccountInfo], _data: &[u8]) -> ProgramResult {
    let [strategy, authority, strategy_program, new_owner, ..] = accounts else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    if strategy_program.key() != &crate::ID {
        return Err(ProgramError::IncorrectProgramId);
    }
    if !authority.is_signer() {
        return Err(ProgramError::MissingRequiredSignature);
    }

    let mut config = StrategyConfig::load(strategy)?;
    if transfer_ownership_impl(&mut config, authority.key(), new_owner.key()).is_err() {
        log!("transfer_ownership: signer is not the owner");
        return Err(StrategyError::NotOwner.into());
    }
    config.store(strategy)?;

    log!("transfer_ownership: pending owner set");

    let bump = [config.bump];
    let seeds = gen_strategy_seeds(&config.vault, &bump);
    emit_event(
        strategy,
        strategy_program,
        Signer::from(&seeds),
        &OwnershipTransferStartedEvent {
            strategy: *strategy.key(),
            owner: config.owner,
            pending_owner: *new_owner.key(),
        },
    )
}
