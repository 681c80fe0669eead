//! Instruction layouts for the programs the strategy invokes.
//!
//! The strategy only depends on the shape of these instructions, not on the
//! programs behind them:
//! - Router: exact-input multi-hop swap with a minimum output and a deadline
//! - Intermediate layer: stake base asset, receive receipt tokens 1:1
//! - Secondary layer: stake receipt tokens, earn the reward token
//!
//! Both staking layers pay pending rewards on every position change, so an
//! `Enter`/`Deposit` of zero claims rewards without touching principal.

use bytemuck::{Pod, Zeroable};
use pinocchio::pubkey::Pubkey;

use crate::MAX_ROUTE_HOPS;

// ============================================================================
// Instruction Discriminators
// ============================================================================

/// Router instruction discriminators.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouterInstruction {
    /// Swap an exact input amount along a route
    SwapExactIn = 0,
}

/// Intermediate staking layer instruction discriminators.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntermediateLayerInstruction {
    /// Stake base asset, mint receipt tokens 1:1, pay pending rewards
    Enter = 0,
    /// Burn receipt tokens, return base asset 1:1, pay pending rewards
    Leave = 1,
}

/// Secondary staking layer instruction discriminators.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SecondaryLayerInstruction {
    /// Stake receipt tokens, pay pending rewards
    Deposit = 0,
    /// Unstake receipt tokens, pay pending rewards
    Withdraw = 1,
    /// Unstake everything and forfeit pending rewards
    EmergencyWithdraw = 2,
}

impl RouterInstruction {
    /// Convert to u8 discriminator
    pub const fn to_u8(self) -> u8 {
        self as u8
    }
}

impl IntermediateLayerInstruction {
    /// Convert to u8 discriminator
    pub const fn to_u8(self) -> u8 {
        self as u8
    }
}

impl SecondaryLayerInstruction {
    /// Convert to u8 discriminator
    pub const fn to_u8(self) -> u8 {
        self as u8
    }
}

// ============================================================================
// Swap Parameters
// ============================================================================

/// Parameters for an exact-input swap.
///
/// `hops[..hop_count]` is the asset path, source first and destination last.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct SwapExactInParams {
    /// Exact amount of the source asset to sell
    pub amount_in: u64,
    /// Minimum acceptable output, the router fails below it
    pub min_out: u64,
    /// Unix timestamp after which the router fails
    pub deadline: i64,
    /// Number of valid entries in `hops`
    pub hop_count: u8,
    /// Padding for 8-byte alignment
    pub _padding: [u8; 7],
    /// Asset path
    pub hops: [Pubkey; MAX_ROUTE_HOPS],
}

impl SwapExactInParams {
    /// Size in bytes
    pub const SIZE: usize = core::mem::size_of::<Self>();

    /// Asset path as a slice
    pub fn path(&self) -> &[Pubkey] {
        let len = (self.hop_count as usize).min(MAX_ROUTE_HOPS);
        &self.hops[..len]
    }
}

/// Instruction data length for a swap: discriminator + params
pub const SWAP_INSTRUCTION_LEN: usize = 1 + SwapExactInParams::SIZE;

/// Instruction data length for a stake/unstake: discriminator + amount
pub const STAKE_INSTRUCTION_LEN: usize = 9;

// ============================================================================
// Instruction Data Builders
// ============================================================================

/// Build instruction data for a router swap.
///
/// Layout: [discriminator: u8, params: SwapExactInParams]
pub fn build_swap_instruction_data(params: &SwapExactInParams) -> [u8; SWAP_INSTRUCTION_LEN] {
    let mut data = [0u8; SWAP_INSTRUCTION_LEN];
    data[0] = RouterInstruction::SwapExactIn.to_u8();
    data[1..].copy_from_slice(bytemuck::bytes_of(params));
    data
}

/// Build instruction data for an intermediate layer `Enter`/`Leave`.
///
/// Layout: [discriminator: u8, amount: u64 LE]
pub fn build_intermediate_instruction_data(
    instruction: IntermediateLayerInstruction,
    amount: u64,
) -> [u8; STAKE_INSTRUCTION_LEN] {
    build_amount_data(instruction.to_u8(), amount)
}

/// Build instruction data for a secondary layer `Deposit`/`Withdraw`.
///
/// `EmergencyWithdraw` ignores the amount; callers pass 0.
///
/// Layout: [discriminator: u8, amount: u64 LE]
pub fn build_secondary_instruction_data(
    instruction: SecondaryLayerInstruction,
    amount: u64,
) -> [u8; STAKE_INSTRUCTION_LEN] {
    build_amount_data(instruction.to_u8(), amount)
}

fn build_amount_data(discriminator: u8, amount: u64) -> [u8; STAKE_INSTRUCTION_LEN] {
    let mut data = [0u8; STAKE_INSTRUCTION_LEN];
    data[0] = discriminator;
    data[1..].copy_from_slice(&amount.to_le_bytes());
    data
}

/// Parse swap params from instruction data (including discriminator).
pub fn parse_swap_params(data: &[u8]) -> Option<SwapExactInParams> {
    if data.len() < SWAP_INSTRUCTION_LEN || data[0] != RouterInstruction::SwapExactIn.to_u8() {
        return None;
    }
    bytemuck::try_pod_read_unaligned(&data[1..SWAP_INSTRUCTION_LEN]).ok()
}

/// Parse the amount from stake instruction data (including discriminator).
pub fn parse_stake_amount(data: &[u8]) -> Option<(u8, u64)> {
    if data.len() < STAKE_INSTRUCTION_LEN {
        return None;
    }
    let amount = u64::from_le_bytes(data[1..9].try_into().ok()?);
    Some((data[0], amount))
}

// ============================================================================
// Account Layout Constants
// ============================================================================

/// Account indices for a router swap.
///
/// The router pulls `amount_in` from `SOURCE` through its delegate approval,
/// so the strategy does not sign swaps.
pub mod swap_accounts {
    /// Source token account (writable)
    pub const SOURCE: usize = 0;
    /// Destination token account (writable)
    pub const DESTINATION: usize = 1;
    /// Router delegate authority
    pub const DELEGATE: usize = 2;
    /// Token program
    pub const TOKEN_PROGRAM: usize = 3;
    /// Total number of accounts
    pub const COUNT: usize = 4;
}

/// Account indices for intermediate layer `Enter`/`Leave`.
pub mod intermediate_accounts {
    /// Staker position account (writable)
    pub const POSITION: usize = 0;
    /// Staker authority (signer)
    pub const AUTHORITY: usize = 1;
    /// Staker base token account (writable), also receives pending rewards
    pub const BASE_TOKEN: usize = 2;
    /// Staker receipt token account (writable)
    pub const RECEIPT_TOKEN: usize = 3;
    /// Token program
    pub const TOKEN_PROGRAM: usize = 4;
    /// Total number of accounts
    pub const COUNT: usize = 5;
}

/// Account indices for secondary layer `Deposit`/`Withdraw`/`EmergencyWithdraw`.
pub mod secondary_accounts {
    /// Staker position account (writable)
    pub const POSITION: usize = 0;
    /// Staker authority (signer)
    pub const AUTHORITY: usize = 1;
    /// Staker receipt token account (writable)
    pub const RECEIPT_TOKEN: usize = 2;
    /// Staker reward token account (writable), receives pending rewards
    pub const REWARD_TOKEN: usize = 3;
    /// Token program
    pub const TOKEN_PROGRAM: usize = 4;
    /// Total number of accounts
    pub const COUNT: usize = 5;
}

// ============================================================================
// Tests
// ============================================================================
