//! Withdraw instruction handler.
//!
//! The vault pulls capital back. Allowed while paused or retired so the vault
//! can always recover funds.

use compounder_interface::strategy::{WithdrawReturnData, parse_withdraw_amount};
use pinocchio::{ProgramResult, account_info::AccountInfo, program::set_return_data};
use pinocchio_log::log;

use super::StrategyContext;
use crate::{StrategyError, events::WithdrawnEvent, lifecycle::LifecycleController};

/// Process a withdraw instruction.
///
/// Instruction data: `amount: u64 LE`.
///
/// 1. Validates the vault signed
/// 2. Unstakes only what idle cannot cover
/// 3. Transfers the release, net of the withdrawal fee, to the vault
/// 4. Emits `WithdrawnEvent`
/// 5. Returns `WithdrawReturnData` via `set_return_data`
pub fn process_withdraw(accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    let amount = parse_withdraw_amount(data).ok_or(StrategyError::InvalidInstructionData)?;

    let mut ctx = StrategyContext::load(accounts, false)?;
    ctx.require_signer()?;

    let vault = *ctx.authority.key();
    if let Err(err) = ctx.config.require_vault(&vault) {
        log!("withdraw: signer is not the vault");
        return Err(err.into());
    }

    let mut controller = LifecycleController::new(&mut ctx.config, &mut ctx.host);
    let release = controller.withdraw(&vault, amount)?;
    let pool = controller.balance_of()?;

    ctx.store()?;

    if release.released < amount {
        log!(
            "withdraw: partial release {} of {}",
            release.released,
            amount
        );
    }

    // Emit before set_return_data: the self-CPI clears return data
    ctx.emit(&WithdrawnEvent {
        strategy: *ctx.strategy.key(),
        requested: release.requested,
        released: release.released,
        fee: release.fee,
        net: release.net,
        total_claimable: pool.total()?,
        timestamp: ctx.now()?,
    })?;

    let return_data = WithdrawReturnData {
        released: release.released,
        fee: release.fee,
        net: release.net,
    };
    set_return_data(bytemuck::bytes_of(&return_data));

    Ok(())
}
