//! Uniform operations over the two staking layers.
//!
//! ```text
//!   base ──enter──▶ intermediate layer ──receipt──▶ secondary layer ──▶ reward
//!   base ◀──leave── intermediate layer ◀──receipt── secondary layer
//! ```
//!
//! Both layers pay pending rewards whenever a position changes, so staking
//! zero claims rewards without moving principal.

use compounder_interface::StakePosition;
use pinocchio::{ProgramResult, program_error::ProgramError};

use crate::ledger::{Asset, CapitalPool, TokenLedger};

/// Layer 1: stakes base asset and mints receipts 1:1.
pub trait IntermediateLayer {
    /// Stake `amount` of base asset.
    fn enter(&mut self, amount: u64) -> ProgramResult;

    /// Burn `amount` of receipts and return the same amount of base asset.
    fn leave(&mut self, amount: u64) -> ProgramResult;

    /// The strategy's position in layer 1.
    fn intermediate_position(&self) -> Result<StakePosition, ProgramError>;
}

/// Layer 2: stakes receipts and earns the reward token.
pub trait SecondaryLayer {
    /// Stake `amount` of receipts.
    fn deposit(&mut self, amount: u64) -> ProgramResult;

    /// Unstake `amount` of receipts.
    fn withdraw(&mut self, amount: u64) -> ProgramResult;

    /// Unstake the whole position, forfeiting pending rewards.
    fn emergency_withdraw_all(&mut self) -> ProgramResult;

    /// The strategy's position in layer 2.
    fn secondary_position(&self) -> Result<StakePosition, ProgramError>;
}

/// Staking layer selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    /// Layer 1
    Intermediate,
    /// Layer 2
    Secondary,
}

impl Layer {
    /// Asset this layer takes as principal.
    pub const fn principal(self) -> Asset {
        match self {
            Self::Intermediate => Asset::Base,
            Self::Secondary => Asset::Receipt,
        }
    }
}

/// Stake `amount` into `layer`. Zero is a no-op.
pub fn stake<H>(host: &mut H, layer: Layer, amount: u64) -> ProgramResult
where
    H: IntermediateLayer + SecondaryLayer,
{
    if amount == 0 {
        return Ok(());
    }
    match layer {
        Layer::Intermediate => host.enter(amount),
        Layer::Secondary => host.deposit(amount),
    }
}

/// Unstake `amount` from `layer`. Zero is a no-op.
pub fn unstake<H>(host: &mut H, layer: Layer, amount: u64) -> ProgramResult
where
    H: IntermediateLayer + SecondaryLayer,
{
    if amount == 0 {
        return Ok(());
    }
    match layer {
        Layer::Intermediate => host.leave(amount),
        Layer::Secondary => host.withdraw(amount),
    }
}

/// Claim pending rewards from `layer` without changing principal.
pub fn harvest_only<H>(host: &mut H, layer: Layer) -> ProgramResult
where
    H: IntermediateLayer + SecondaryLayer,
{
    match layer {
        Layer::Intermediate => host.enter(0),
        Layer::Secondary => host.deposit(0),
    }
}

/// Principal currently staked in `layer`.
pub fn position_size<H>(host: &H, layer: Layer) -> Result<u64, ProgramError>
where
    H: IntermediateLayer + SecondaryLayer,
{
    let position = match layer {
        Layer::Intermediate => host.intermediate_position()?,
        Layer::Secondary => host.secondary_position()?,
    };
    Ok(position.amount)
}

/// Pull everything out of both layers back into idle base asset.
///
/// Layer 2 is unwound through its emergency path first, then layer 1 is left
/// with every receipt the strategy holds, capped to its position.
///
/// Returns the base asset returned by layer 1.
pub fn emergency_unstake_all<H>(host: &mut H) -> Result<u64, ProgramError>
where
    H: TokenLedger + IntermediateLayer + SecondaryLayer,
{
    if position_size(host, Layer::Secondary)? > 0 {
        host.emergency_withdraw_all()?;
    }

    let receipts = host.balance_of(Asset::Receipt)?;
    let principal = position_size(host, Layer::Intermediate)?;
    let amount = receipts.min(principal);
    unstake(host, Layer::Intermediate, amount)?;
    Ok(amount)
}

/// Current split of the claimable capital, read fresh from the ledger and
/// both layers.
pub fn capital_pool<H>(host: &H) -> Result<CapitalPool, ProgramError>
where
    H: TokenLedger + IntermediateLayer + SecondaryLayer,
{
    let idle = host.balance_of(Asset::Base)?;
    let principal = position_size(host, Layer::Intermediate)?;
    let secondary = position_size(host, Layer::Secondary)?;

    // Receipts beyond layer 1 principal are not backed by base asset
    let secondary = secondary.min(principal);
    Ok(CapitalPool {
        idle,
        intermediate: principal - secondary,
        secondary,
    })
}
