//! Pause and unpause the strategy.
//!
//! Pausing revokes the router's allowances so no swap can pull funds while
//! the owner investigates; withdraw and retire keep working.

use pinocchio::{ProgramResult, account_info::AccountInfo};
use pinocchio_log::log;

use crate::{
    events::PauseChangedEvent, instructions::StrategyContext, lifecycle::LifecycleController,
};

fn set_paused(accounts: &[AccountInfo], paused: bool) -> ProgramResult {
    let mut ctx = StrategyContext::load(accounts, false)?;
    ctx.require_signer()?;

    let owner = *ctx.authority.key();
    let mut controller = LifecycleController::new(&mut ctx.config, &mut ctx.host);
    let result = if paused {
        controller.pause(&owner)
    } else {
        controller.unpause(&owner)
    };
    if let Err(err) = result {
        log!("set_paused: rejected");
        return Err(err);
    }

    ctx.store()?;

    ctx.emit(&PauseChangedEvent {
        strategy: *ctx.strategy.key(),
        owner,
        is_paused: paused as u8,
        _padding: [0; 7],
        timestamp: ctx.now()?,
    })
}

/// Process a pause instruction. Owner only; fails if already paused.
pub fn process_pause(accounts: &[AccountInfo], _data: &[u8]) -> ProgramResult {
    set_paused(accounts, true)
}

/// Process an unpause instruction. Owner only; fails unless paused, and a
/// retired strategy stays paused.
pub fn process_unpause(accounts: &[AccountInfo], _data: &[u8]) -> ProgramResult {
    set_paused(accounts, false)
}
