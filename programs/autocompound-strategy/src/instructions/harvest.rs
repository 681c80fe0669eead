//! Harvest instruction handler.
//!
//! Claims rewards from both layers, pays the fee shares and compounds the
//! remainder. The caller receives the call fee as an incentive.

use pinocchio::{ProgramResult, account_info::AccountInfo};
use pinocchio_log::log;

use super::StrategyContext;
use crate::{
    StrategyError,
    events::HarvestedEvent,
    host::{CallOrigin, Caller},
    lifecycle::LifecycleController,
};

/// Process a harvest instruction.
///
/// The routing token account of the caller follows the shared account layout
/// (`strategy_accounts::HARVEST_CALLER_TOKEN`).
///
/// 1. Validates the strategy is active
/// 2. Rejects invocations from other programs
/// 3. Claims pending rewards from both layers
/// 4. Splits fees from the reward balance
/// 5. Reinvests all idle base asset
/// 6. Emits `HarvestedEvent` with the caller
pub fn process_harvest(accounts: &[AccountInfo], _data: &[u8]) -> ProgramResult {
    let mut ctx = StrategyContext::load(accounts, true)?;
    ctx.require_signer()?;

    if let Err(err) = ctx.config.require_active() {
        log!("harvest: strategy is not active");
        return Err(err.into());
    }

    let caller = Caller {
        key: *ctx.authority.key(),
        origin: CallOrigin::current(),
    };
    if caller.is_contract() {
        log!("harvest: must be called from a transaction, not a program");
        return Err(StrategyError::ContractCaller.into());
    }

    let report = LifecycleController::new(&mut ctx.config, &mut ctx.host).harvest(&caller)?;

    ctx.store()?;

    let split = report.split;
    let treasury_fee = split
        .treasury_half
        .checked_mul(2)
        .ok_or(StrategyError::ArithmeticOverflow)?;

    ctx.emit(&HarvestedEvent {
        strategy: *ctx.strategy.key(),
        caller: caller.key,
        reward_snapshot: split.reward_snapshot,
        routing_snapshot: split.routing_snapshot,
        caller_fee: split.caller,
        treasury_fee,
        rewards_fee: split.rewards,
        partner_fee: split.partner,
        residue: split.residue,
        compounded_reward: split.compounded_reward,
        reinvested: report.reinvested,
        total_claimable: report.pool.total()?,
        harvest_count: ctx.config.harvest_count,
        timestamp: ctx.config.last_harvest_timestamp,
    })
}
