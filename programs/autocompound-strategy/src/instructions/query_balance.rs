//! QueryBalance instruction handler.

use pinocchio::{ProgramResult, account_info::AccountInfo, program::set_return_data};

use super::StrategyContext;
use crate::lifecycle::LifecycleController;

/// Set the current `CapitalPool` (idle, intermediate, secondary) as return
/// data. Read-only; any state.
pub fn process_query_balance(accounts: &[AccountInfo], _data: &[u8]) -> ProgramResult {
    let mut ctx = StrategyContext::load(accounts, false)?;

    let pool = LifecycleController::new(&mut ctx.config, &mut ctx.host).balance_of()?;
    set_return_data(bytemuck::bytes_of(&pool));

    Ok(())
}
