//! Token balances held by the strategy and the accounts it pays out to.

use bytemuck::{Pod, Zeroable};
use pinocchio::{ProgramResult, program_error::ProgramError};

use crate::StrategyError;

/// Assets the strategy holds a token account for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Asset {
    /// Base asset deposited by the vault
    Base,
    /// Intermediate layer receipt, minted 1:1 against staked base
    Receipt,
    /// Reward token paid by the secondary layer
    Reward,
    /// Routing asset fees are paid in
    Routing,
}

/// Destination of a transfer or swap output.
///
/// Every payee resolves to exactly one token account, so the asset is implied
/// by the payee except for [`Payee::Strategy`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Payee {
    /// The strategy's own account for an asset
    Strategy(Asset),
    /// Vault base token account
    Vault,
    /// Routing token account of the harvest caller
    HarvestCaller,
    /// Treasury routing token account
    Treasury,
    /// Treasury account for the treasury fee token
    TreasuryFeeToken,
    /// Reward pool routing token account
    RewardPool,
    /// Partner DAO token account
    PartnerDao,
}

/// Read-only view over the strategy's token balances.
pub trait TokenLedger {
    /// Current balance of `asset` held by the strategy.
    fn balance_of(&self, asset: Asset) -> Result<u64, ProgramError>;
}

/// Token movements out of the strategy's accounts.
pub trait TokenTransfers {
    /// Move `amount` of `asset` from the strategy to `to`.
    fn transfer(&mut self, asset: Asset, to: Payee, amount: u64) -> ProgramResult;

    /// Set the router's spending allowance over the strategy's `asset`
    /// account. Zero revokes it.
    fn set_router_allowance(&mut self, asset: Asset, amount: u64) -> ProgramResult;
}

/// Snapshot of the capital the vault can claim.
///
/// - `idle`: base asset held directly
/// - `intermediate`: intermediate layer principal whose receipt is not staked
/// - `secondary`: receipt tokens staked in the secondary layer
///
/// Receipts are minted 1:1 against intermediate principal, so
/// `idle + intermediate + secondary` equals idle plus the intermediate
/// layer position.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct CapitalPool {
    /// Base asset held directly
    pub idle: u64,
    /// Intermediate principal backed by unstaked receipts
    pub intermediate: u64,
    /// Receipts staked in the secondary layer
    pub secondary: u64,
}

impl CapitalPool {
    /// Size in bytes
    pub const SIZE: usize = core::mem::size_of::<Self>();

    /// Total claimable capital.
    pub fn total(&self) -> Result<u64, StrategyError> {
        self.idle
            .checked_add(self.intermediate)
            .and_then(|sum| sum.checked_add(self.secondary))
            .ok_or(StrategyError::ArithmeticOverflow)
    }

    /// Total staked across both layers.
    pub fn staked(&self) -> Result<u64, StrategyError> {
        self.intermediate
            .checked_add(self.secondary)
            .ok_or(StrategyError::ArithmeticOverflow)
    }
}
