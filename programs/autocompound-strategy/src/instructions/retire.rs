//! Retire instruction handler.

use pinocchio::{ProgramResult, account_info::AccountInfo};
use pinocchio_log::log;

use super::StrategyContext;
use crate::{events::RetiredEvent, lifecycle::LifecycleController};

/// Process a retire instruction.
///
/// Vault only, any state. Unwinds both layers through their emergency paths,
/// sends the whole base balance to the vault and marks the strategy retired.
/// Deposit and harvest fail from then on; withdraw keeps working.
pub fn process_retire(accounts: &[AccountInfo], _data: &[u8]) -> ProgramResult {
    let mut ctx = StrategyContext::load(accounts, false)?;
    ctx.require_signer()?;

    let vault = *ctx.authority.key();
    if let Err(err) = ctx.config.require_vault(&vault) {
        log!("retire: signer is not the vault");
        return Err(err.into());
    }

    let returned = LifecycleController::new(&mut ctx.config, &mut ctx.host).retire(&vault)?;

    ctx.store()?;

    log!("retire: returned {} to vault", returned);

    ctx.emit(&RetiredEvent {
        strategy: *ctx.strategy.key(),
        vault,
        returned,
        timestamp: ctx.now()?,
    })
}
