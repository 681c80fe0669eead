//! Deposit instruction handler.
//!
//! Stakes whatever base asset the vault has sent to the strategy. Anyone may
//! call it; the strategy must be active.

use pinocchio::{ProgramResult, account_info::AccountInfo};
use pinocchio_log::log;

use super::StrategyContext;
use crate::{events::DepositedEvent, lifecycle::LifecycleController};

/// Process a deposit instruction.
///
/// 1. Validates the strategy is active
/// 2. Stakes all idle base asset into layer 1
/// 3. Stakes every receipt into layer 2
/// 4. Emits `DepositedEvent`
pub fn process_deposit(accounts: &[AccountInfo], _data: &[u8]) -> ProgramResult {
    let mut ctx = StrategyContext::load(accounts, false)?;

    if let Err(err) = ctx.config.require_active() {
        log!("deposit: strategy is not active");
        return Err(err.into());
    }

    let mut controller = LifecycleController::new(&mut ctx.config, &mut ctx.host);
    let staked = controller.deposit()?;
    let pool = controller.balance_of()?;

    ctx.store()?;

    if staked > 0 {
        log!("deposit: staked {}", staked);
    }

    ctx.emit(&DepositedEvent {
        strategy: *ctx.strategy.key(),
        staked,
        total_claimable: pool.total()?,
        timestamp: ctx.now()?,
    })
}
