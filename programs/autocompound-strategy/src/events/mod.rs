//! Event definitions for the autocompound strategy.
//!
//! Events are emitted via self-invocation of the Log instruction, signed by
//! the strategy config PDA, so indexers can trust that only this program
//! produced them.
//!
//! # Wire Format
//!
//! ```text
//! [event type: u64 LE][event fields: Pod bytes]
//! ```

use bytemuck::{Pod, Zeroable};
use pinocchio::{
    ProgramResult,
    account_info::AccountInfo,
    cpi::invoke_signed,
    instruction::{AccountMeta, Instruction, Signer},
    program_error::ProgramError,
    pubkey::Pubkey,
};

use crate::ID;
use crate::instructions::StrategyInstruction;

/// Event type discriminators for identifying event types in logs.
///
/// # Ranges
/// - **1-15**: Capital events (deposit, withdraw, harvest)
/// - **16-31**: Admin events (lifecycle, ownership)
#[repr(u64)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::IntoStaticStr)]
pub enum EventType {
    // =========================================================================
    // Capital Events (1-15)
    // =========================================================================
    /// Idle capital staked
    Deposited = 1,
    /// Capital released to the vault
    Withdrawn = 2,
    /// Harvest cycle completed
    Harvested = 3,
    // Reserved: 4-15

    // =========================================================================
    // Admin Events (16-31)
    // =========================================================================
    /// Strategy config created
    StrategyInitialized = 16,
    /// Strategy paused or unpaused
    PauseChanged = 17,
    /// Emergency unwind
    Panicked = 18,
    /// Strategy retired to the vault
    Retired = 19,
    /// Ownership transfer started
    OwnershipTransferStarted = 20,
    /// Ownership transfer accepted
    OwnershipTransferred = 21,
}

/// A Pod event with a fixed type discriminator.
pub trait Event: Pod {
    /// Discriminator written ahead of the event bytes
    const EVENT_TYPE: EventType;
}

/// Largest encoded event, discriminator included
pub const MAX_EVENT_LEN: usize = 256;

/// Log instruction header: discriminator + u32 length
pub const LOG_HEADER_LEN: usize = 5;

macro_rules! impl_event {
    ($event:ty, $ty:expr) => {
        impl Event for $event {
            const EVENT_TYPE: EventType = $ty;
        }
    };
}

/// Emitted once when the strategy config is created.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct StrategyInitializedEvent {
    /// Strategy config PDA
    pub strategy: Pubkey,
    /// Vault identity
    pub vault: Pubkey,
    /// Initial owner
    pub owner: Pubkey,
    /// Unix timestamp
    pub timestamp: i64,
}
impl_event!(StrategyInitializedEvent, EventType::StrategyInitialized);

/// Emitted when idle capital is staked.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct DepositedEvent {
    /// Strategy config PDA
    pub strategy: Pubkey,
    /// Base asset staked into layer 1
    pub staked: u64,
    /// Claimable capital afterwards
    pub total_claimable: u64,
    /// Unix timestamp
    pub timestamp: i64,
}
impl_event!(DepositedEvent, EventType::Deposited);

/// Emitted when capital is released to the vault.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct WithdrawnEvent {
    /// Strategy config PDA
    pub strategy: Pubkey,
    /// Amount the vault asked for
    pub requested: u64,
    /// Amount released, before the fee
    pub released: u64,
    /// Withdrawal fee kept idle
    pub fee: u64,
    /// Amount transferred to the vault
    pub net: u64,
    /// Claimable capital afterwards
    pub total_claimable: u64,
    /// Unix timestamp
    pub timestamp: i64,
}
impl_event!(WithdrawnEvent, EventType::Withdrawn);

/// Emitted when a harvest completes.
///
/// Fee amounts are in routing asset units; `treasury_fee` counts both halves.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct HarvestedEvent {
    /// Strategy config PDA
    pub strategy: Pubkey,
    /// Identity that triggered the harvest
    pub caller: Pubkey,
    /// Reward balance before the fee slice was sold
    pub reward_snapshot: u64,
    /// Routing balance the shares were computed from
    pub routing_snapshot: u64,
    /// Paid to the caller
    pub caller_fee: u64,
    /// Paid to the treasury, directly and swapped
    pub treasury_fee: u64,
    /// Paid to the reward pool
    pub rewards_fee: u64,
    /// Swapped to the partner DAO
    pub partner_fee: u64,
    /// Unallocated share paid to the treasury
    pub residue: u64,
    /// Reward swapped back into the base asset
    pub compounded_reward: u64,
    /// Base asset restaked
    pub reinvested: u64,
    /// Claimable capital afterwards
    pub total_claimable: u64,
    /// Harvest sequence number
    pub harvest_count: u64,
    /// Unix timestamp
    pub timestamp: i64,
}
impl_event!(HarvestedEvent, EventType::Harvested);

/// Emitted on pause and unpause.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct PauseChangedEvent {
    /// Strategy config PDA
    pub strategy: Pubkey,
    /// Owner that changed the state
    pub owner: Pubkey,
    /// New paused flag
    pub is_paused: u8,
    /// Padding for 8-byte alignment
    pub _padding: [u8; 7],
    /// Unix timestamp
    pub timestamp: i64,
}
impl_event!(PauseChangedEvent, EventType::PauseChanged);

/// Emitted after an emergency unwind.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct PanickedEvent {
    /// Strategy config PDA
    pub strategy: Pubkey,
    /// Owner that triggered the panic
    pub owner: Pubkey,
    /// Idle balance afterwards
    pub idle: u64,
    /// Unix timestamp
    pub timestamp: i64,
}
impl_event!(PanickedEvent, EventType::Panicked);

/// Emitted when the vault retires the strategy.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct RetiredEvent {
    /// Strategy config PDA
    pub strategy: Pubkey,
    /// Vault identity
    pub vault: Pubkey,
    /// Base asset returned to the vault
    pub returned: u64,
    /// Unix timestamp
    pub timestamp: i64,
}
impl_event!(RetiredEvent, EventType::Retired);

/// Emitted when the owner nominates a successor.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct OwnershipTransferStartedEvent {
    /// Strategy config PDA
    pub strategy: Pubkey,
    /// Current owner
    pub owner: Pubkey,
    /// Nominated owner
    pub pending_owner: Pubkey,
}
impl_event!(OwnershipTransferStartedEvent, EventType::OwnershipTransferStarted);

/// Emitted when the nominated owner accepts.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct OwnershipTransferredEvent {
    /// Strategy config PDA
    pub strategy: Pubkey,
    /// Previous owner
    pub previous_owner: Pubkey,
    /// New owner
    pub new_owner: Pubkey,
}
impl_event!(OwnershipTransferredEvent, EventType::OwnershipTransferred);

/// Encode Log instruction data for `event` into `buf`.
///
/// Layout: [Log discriminator: u8, length: u32 LE, event type: u64 LE, event]
///
/// Returns the number of bytes written.
pub fn encode_log_data<T: Event>(
    event: &T,
    buf: &mut [u8; LOG_HEADER_LEN + MAX_EVENT_LEN],
) -> Result<usize, ProgramError> {
    let body = bytemuck::bytes_of(event);
    let len = 8 + body.len();
    if len > MAX_EVENT_LEN {
        return Err(ProgramError::InvalidInstructionData);
    }

    buf[0] = StrategyInstruction::Log as u8;
    buf[1..LOG_HEADER_LEN].copy_from_slice(&(len as u32).to_le_bytes());
    buf[LOG_HEADER_LEN..LOG_HEADER_LEN + 8].copy_from_slice(&(T::EVENT_TYPE as u64).to_le_bytes());
    buf[LOG_HEADER_LEN + 8..LOG_HEADER_LEN + len].copy_from_slice(body);
    Ok(LOG_HEADER_LEN + len)
}

/// Emit an event via self-invocation of the Log instruction.
///
/// # Arguments
/// * `strategy` - The strategy config PDA (used as signer)
/// * `strategy_program` - This program's account (required for self-CPI)
/// * `signer` - Signer seeds for the strategy config PDA
/// * `event` - The event to emit
pub fn emit_event<T: Event>(
    strategy: &AccountInfo,
    strategy_program: &AccountInfo,
    signer: Signer,
    event: &T,
) -> ProgramResult {
    let mut buf = [0u8; LOG_HEADER_LEN + MAX_EVENT_LEN];
    let written = encode_log_data(event, &mut buf)?;

    let instruction = Instruction {
        program_id: &ID,
        accounts: &[AccountMeta::readonly_signer(strategy.key())],
        data: &buf[..written],
    };

    invoke_signed(&instruction, &[strategy, strategy_program], &[signer])
}
