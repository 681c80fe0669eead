//! Harvest fee distribution.
//!
//! A fixed slice of the claimed reward balance is sold for the routing asset.
//! The routing balance right after that swap is snapshotted once, and every
//! share is a fixed fraction of that same snapshot:
//!
//! ```text
//! routing snapshot S
//! ├─ S × call_fee     / MAX_FEE      → harvest caller
//! ├─ S × treasury_fee / MAX_FEE / 2  → treasury
//! ├─ S × treasury_fee / MAX_FEE / 2  → swapped → treasury fee token
//! ├─ S × rewards_fee  / MAX_FEE      → reward pool
//! ├─ S × partner_fee  / MAX_FEE      → swapped → partner DAO
//! └─ S × residue      / MAX_FEE      → treasury
//! ```
//!
//! The divisor base is never decremented between steps, so each share is
//! independent of the order the payouts happen in. Floor dust stays in the
//! routing account and joins the next snapshot.

use bytemuck::{Pod, Zeroable};
use compounder_interface::{
    DEFAULT_CALL_FEE, DEFAULT_HARVEST_SLICE, DEFAULT_PARTNER_FEE, DEFAULT_REWARDS_FEE,
    DEFAULT_TREASURY_FEE, DEFAULT_WITHDRAWAL_FEE, MAX_FEE, PER_MILLE, SWAP_DEADLINE_WINDOW,
    WITHDRAWAL_MAX, fee_share,
};
use pinocchio::program_error::ProgramError;

use crate::{
    StrategyError,
    host::StrategyHost,
    ledger::{Asset, Payee},
    routes::{RouteIntent, RouteTable},
};

/// Fee configuration stored in the strategy config.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct FeeSchedule {
    /// Harvest caller share (per `MAX_FEE`)
    pub call_fee: u16,
    /// Treasury share (per `MAX_FEE`)
    pub treasury_fee: u16,
    /// Reward pool share (per `MAX_FEE`)
    pub rewards_fee: u16,
    /// Partner DAO share (per `MAX_FEE`)
    pub partner_fee: u16,
    /// Reward slice sold for the routing asset (per mille)
    pub harvest_slice: u16,
    /// Withdrawal fee (per `WITHDRAWAL_MAX`)
    pub withdrawal_fee: u16,
    /// Padding
    pub _padding: [u8; 4],
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            call_fee: DEFAULT_CALL_FEE,
            treasury_fee: DEFAULT_TREASURY_FEE,
            rewards_fee: DEFAULT_REWARDS_FEE,
            partner_fee: DEFAULT_PARTNER_FEE,
            harvest_slice: DEFAULT_HARVEST_SLICE,
            withdrawal_fee: DEFAULT_WITHDRAWAL_FEE,
            _padding: [0; 4],
        }
    }
}

impl FeeSchedule {
    /// Sum of the four harvest share numerators.
    pub fn shares_total(&self) -> u64 {
        self.call_fee as u64
            + self.treasury_fee as u64
            + self.rewards_fee as u64
            + self.partner_fee as u64
    }

    /// Numerator of the share left over after the four named shares.
    pub fn residue(&self) -> u64 {
        MAX_FEE.saturating_sub(self.shares_total())
    }

    /// Check every numerator fits its denominator.
    pub fn validate(&self) -> Result<(), StrategyError> {
        if self.shares_total() > MAX_FEE
            || self.harvest_slice as u64 > PER_MILLE
            || self.withdrawal_fee as u64 > WITHDRAWAL_MAX
        {
            return Err(StrategyError::InvalidFeeSchedule);
        }
        Ok(())
    }
}

/// Amounts moved by one [`split`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeeSplit {
    /// Reward balance before the slice was sold
    pub reward_snapshot: u64,
    /// Reward sold for the routing asset
    pub slice: u64,
    /// Routing balance every share was computed from
    pub routing_snapshot: u64,
    /// Paid to the harvest caller
    pub caller: u64,
    /// Paid to the treasury directly, and separately swapped to the treasury
    /// fee token
    pub treasury_half: u64,
    /// Paid to the reward pool
    pub rewards: u64,
    /// Swapped to the partner DAO token
    pub partner: u64,
    /// Unallocated share paid to the treasury
    pub residue: u64,
    /// Reward swapped back into the base asset
    pub compounded_reward: u64,
}

impl FeeSplit {
    /// Routing asset that left the strategy.
    pub fn distributed(&self) -> Result<u64, StrategyError> {
        [
            self.caller,
            self.treasury_half,
            self.treasury_half,
            self.rewards,
            self.partner,
            self.residue,
        ]
        .iter()
        .try_fold(0u64, |acc, share| acc.checked_add(*share))
        .ok_or(StrategyError::ArithmeticOverflow)
    }
}

fn share(balance: u64, numerator: u64, denominator: u64) -> Result<u64, StrategyError> {
    fee_share(balance, numerator, denominator).ok_or(StrategyError::ArithmeticOverflow)
}

fn swap<H: StrategyHost>(
    host: &mut H,
    routes: &RouteTable,
    intent: RouteIntent,
    from: Asset,
    amount_in: u64,
    recipient: Payee,
    deadline: i64,
) -> Result<(), ProgramError> {
    if amount_in == 0 {
        return Ok(());
    }
    // No minimum output: price protection is left to the router's deadline
    let params = routes.route(intent).to_swap_params(amount_in, 0, deadline);
    host.swap_exact_in(from, &params, recipient)
}

fn pay<H: StrategyHost>(host: &mut H, to: Payee, amount: u64) -> Result<(), ProgramError> {
    if amount == 0 {
        return Ok(());
    }
    host.transfer(Asset::Routing, to, amount)
}

/// Distribute the claimed reward balance and swap the rest into the base
/// asset.
///
/// Zero amounts are skipped, so a split over an empty reward balance makes
/// no calls besides the balance reads.
pub fn split<H: StrategyHost>(
    host: &mut H,
    routes: &RouteTable,
    schedule: &FeeSchedule,
) -> Result<FeeSplit, ProgramError> {
    let deadline = host
        .unix_timestamp()?
        .checked_add(SWAP_DEADLINE_WINDOW)
        .ok_or(StrategyError::ArithmeticOverflow)?;

    let mut out = FeeSplit {
        reward_snapshot: host.balance_of(Asset::Reward)?,
        ..FeeSplit::default()
    };
    out.slice = share(out.reward_snapshot, schedule.harvest_slice as u64, PER_MILLE)?;
    swap(
        host,
        routes,
        RouteIntent::RewardToRouting,
        Asset::Reward,
        out.slice,
        Payee::Strategy(Asset::Routing),
        deadline,
    )?;

    let snapshot = host.balance_of(Asset::Routing)?;
    out.routing_snapshot = snapshot;

    out.caller = share(snapshot, schedule.call_fee as u64, MAX_FEE)?;
    pay(host, Payee::HarvestCaller, out.caller)?;

    out.treasury_half = share(snapshot, schedule.treasury_fee as u64, MAX_FEE)? / 2;
    pay(host, Payee::Treasury, out.treasury_half)?;
    swap(
        host,
        routes,
        RouteIntent::RoutingToTreasuryToken,
        Asset::Routing,
        out.treasury_half,
        Payee::TreasuryFeeToken,
        deadline,
    )?;

    out.rewards = share(snapshot, schedule.rewards_fee as u64, MAX_FEE)?;
    pay(host, Payee::RewardPool, out.rewards)?;

    out.partner = share(snapshot, schedule.partner_fee as u64, MAX_FEE)?;
    swap(
        host,
        routes,
        RouteIntent::RoutingToPartnerToken,
        Asset::Routing,
        out.partner,
        Payee::PartnerDao,
        deadline,
    )?;

    out.residue = share(snapshot, schedule.residue(), MAX_FEE)?;
    pay(host, Payee::Treasury, out.residue)?;

    out.compounded_reward = host.balance_of(Asset::Reward)?;
    swap(
        host,
        routes,
        RouteIntent::RewardToBase,
        Asset::Reward,
        out.compounded_reward,
        Payee::Strategy(Asset::Base),
        deadline,
    )?;

    Ok(out)
}
