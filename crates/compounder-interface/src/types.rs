//! Core types for the compounder interface.

use bytemuck::{Pod, Zeroable};
use pinocchio::pubkey::Pubkey;

/// Denominator for harvest fee shares (1000 = 100% of the routing snapshot)
pub const MAX_FEE: u64 = 1_000;

/// Denominator for the withdrawal fee (10000 = 100%)
pub const WITHDRAWAL_MAX: u64 = 10_000;

/// Denominator for the harvest slice taken from the reward balance
pub const PER_MILLE: u64 = 1_000;

/// Maximum number of assets in a swap route (source and destination included)
pub const MAX_ROUTE_HOPS: usize = 4;

/// Seconds added to the current unix timestamp to form a swap deadline
pub const SWAP_DEADLINE_WINDOW: i64 = 600;

// ============================================================================
// Default Fee Schedule
// ============================================================================

/// Harvest caller share of the routing snapshot (per `MAX_FEE`)
pub const DEFAULT_CALL_FEE: u16 = 111;

/// Treasury share of the routing snapshot (per `MAX_FEE`), half paid directly
/// and half swapped into the treasury fee token
pub const DEFAULT_TREASURY_FEE: u16 = 111;

/// Reward pool share of the routing snapshot (per `MAX_FEE`)
pub const DEFAULT_REWARDS_FEE: u16 = 444;

/// Partner DAO share of the routing snapshot (per `MAX_FEE`)
pub const DEFAULT_PARTNER_FEE: u16 = 334;

/// Slice of the reward balance swapped to the routing asset (per mille, 4.5%)
pub const DEFAULT_HARVEST_SLICE: u16 = 45;

/// Withdrawal fee (per `WITHDRAWAL_MAX`, 0.1%)
pub const DEFAULT_WITHDRAWAL_FEE: u16 = 10;

// ============================================================================
// Fee Math
// ============================================================================

/// Floor of `balance × numerator / denominator`.
///
/// The product is taken in `u128` so it cannot overflow; the quotient is at
/// most `balance` whenever `numerator <= denominator`.
///
/// # Example
/// ```
/// use compounder_interface::fee_share;
///
/// // 111/1000 of 10_000 routing tokens
/// assert_eq!(fee_share(10_000, 111, 1_000), Some(1_110));
/// // rounds toward zero
/// assert_eq!(fee_share(7, 111, 1_000), Some(0));
/// ```
///
/// # Returns
/// `None` if `denominator` is zero or the quotient does not fit in `u64`
#[inline]
pub fn fee_share(balance: u64, numerator: u64, denominator: u64) -> Option<u64> {
    let share = (balance as u128)
        .checked_mul(numerator as u128)?
        .checked_div(denominator as u128)?;
    u64::try_from(share).ok()
}

/// Calculate the net output of a withdrawal.
///
/// `fee = amount × fee_rate / WITHDRAWAL_MAX`, `output = amount - fee`.
///
/// # Example
/// ```
/// use compounder_interface::calculate_withdrawal_output;
///
/// // 0.1% of 300 rounds to zero
/// assert_eq!(calculate_withdrawal_output(300, 10), Some((300, 0)));
/// assert_eq!(calculate_withdrawal_output(1_000_000, 10), Some((999_000, 1_000)));
/// ```
///
/// # Returns
/// `Some((output, fee))`, or `None` on arithmetic overflow
#[inline]
pub fn calculate_withdrawal_output(amount: u64, fee_rate: u16) -> Option<(u64, u64)> {
    let fee = fee_share(amount, fee_rate as u64, WITHDRAWAL_MAX)?;
    let output = amount.checked_sub(fee)?;
    Some((output, fee))
}

// ============================================================================
// Collaborator Position Layouts
// ============================================================================

/// Stake position account kept by either staking layer for each staker.
///
/// Both layers store this layout at offset 0 of the position account data.
/// `amount` is the principal staked; `reward_debt` is the layer's bookkeeping
/// value used to compute pending rewards.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct StakePosition {
    /// Staker that owns the position
    pub owner: Pubkey,
    /// Principal staked
    pub amount: u64,
    /// Reward debt at the last position change
    pub reward_debt: u64,
}

impl StakePosition {
    /// Size in bytes
    pub const SIZE: usize = core::mem::size_of::<Self>();

    /// Read a position from account data.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        bytemuck::try_pod_read_unaligned(&bytes[..Self::SIZE]).ok()
    }
}
