//! Panic instruction handler.

use pinocchio::{ProgramResult, account_info::AccountInfo};
use pinocchio_log::log;

use crate::{events::PanickedEvent, instructions::StrategyContext, lifecycle::LifecycleController};

/// Process a panic instruction.
///
/// Owner only. Pauses if needed, then pulls everything out of both layers
/// through their emergency paths. Funds stay idle in the strategy; pending
/// layer 2 rewards are forfeited.
pub fn process_panic(accounts: &[AccountInfo], _data: &[u8]) -> ProgramResult {
    let mut ctx = StrategyContext::load(accounts, false)?;
    ctx.require_signer()?;

    let owner = *ctx.authority.key();
    let pool = LifecycleController::new(&mut ctx.config, &mut ctx.host).panic(&owner)?;

    ctx.store()?;

    log!("panic: {} idle", pool.idle);

    ctx.emit(&PanickedEvent {
        strategy: *ctx.strategy.key(),
        owner,
        idle: pool.idle,
        timestamp: ctx.now()?,
    })
}
