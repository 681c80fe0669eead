//! Instruction layouts for calling the strategy itself.
//!
//! The vault drives the strategy with `Withdraw` and `Retire`; keepers call
//! `Harvest`. Every capital instruction shares one account layout so the
//! same account list can be reused across calls.

use bytemuck::{Pod, Zeroable};

/// `Deposit` discriminator
pub const DEPOSIT_DISCRIMINATOR: u8 = 0;
/// `Withdraw` discriminator
pub const WITHDRAW_DISCRIMINATOR: u8 = 1;
/// `Harvest` discriminator
pub const HARVEST_DISCRIMINATOR: u8 = 2;
/// `QueryBalance` discriminator
pub const QUERY_BALANCE_DISCRIMINATOR: u8 = 3;
/// `Retire` discriminator
pub const RETIRE_DISCRIMINATOR: u8 = 68;

/// Instruction data length for `Withdraw`: discriminator + amount
pub const WITHDRAW_INSTRUCTION_LEN: usize = 9;

/// Build instruction data for a strategy `Withdraw`.
///
/// Layout: [discriminator: u8, amount: u64 LE]
pub fn build_withdraw_instruction_data(amount: u64) -> [u8; WITHDRAW_INSTRUCTION_LEN] {
    let mut data = [0u8; WITHDRAW_INSTRUCTION_LEN];
    data[0] = WITHDRAW_DISCRIMINATOR;
    data[1..].copy_from_slice(&amount.to_le_bytes());
    data
}

/// Parse the amount from `Withdraw` params (discriminator already stripped).
pub fn parse_withdraw_amount(data: &[u8]) -> Option<u64> {
    let bytes: [u8; 8] = data.get(..8)?.try_into().ok()?;
    Some(u64::from_le_bytes(bytes))
}

/// Return data set by `Withdraw`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct WithdrawReturnData {
    /// Amount released from the strategy, before the fee
    pub released: u64,
    /// Withdrawal fee kept by the strategy
    pub fee: u64,
    /// Amount transferred to the vault token account
    pub net: u64,
}

impl WithdrawReturnData {
    /// Size in bytes
    pub const SIZE: usize = core::mem::size_of::<Self>();

    /// Parse from return data.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        bytemuck::try_pod_read_unaligned(&bytes[..Self::SIZE]).ok()
    }
}

/// Account indices shared by every capital instruction
/// (`Deposit`, `Withdraw`, `Harvest`, `QueryBalance`, `Initialize`, `Pause`,
/// `Unpause`, `Panic`, `Retire`).
pub mod strategy_accounts {
    /// Strategy config PDA (writable), authority over every strategy token account
    pub const STRATEGY: usize = 0;
    /// Invoking identity (signer): owner, vault or harvest caller
    pub const AUTHORITY: usize = 1;
    /// Strategy program (for self-CPI events)
    pub const STRATEGY_PROGRAM: usize = 2;
    /// SPL Token program
    pub const TOKEN_PROGRAM: usize = 3;
    /// Strategy base token account (writable)
    pub const BASE_TOKEN: usize = 4;
    /// Strategy receipt token account (writable)
    pub const RECEIPT_TOKEN: usize = 5;
    /// Strategy reward token account (writable)
    pub const REWARD_TOKEN: usize = 6;
    /// Strategy routing token account (writable)
    pub const ROUTING_TOKEN: usize = 7;
    /// Vault base token account (writable)
    pub const VAULT_TOKEN: usize = 8;
    /// Swap router program
    pub const ROUTER_PROGRAM: usize = 9;
    /// Router delegate the strategy approves for swaps
    pub const ROUTER_DELEGATE: usize = 10;
    /// Intermediate layer program
    pub const INTERMEDIATE_PROGRAM: usize = 11;
    /// Strategy position in the intermediate layer (writable)
    pub const INTERMEDIATE_POSITION: usize = 12;
    /// Secondary layer program
    pub const SECONDARY_PROGRAM: usize = 13;
    /// Strategy position in the secondary layer (writable)
    pub const SECONDARY_POSITION: usize = 14;
    /// Treasury routing token account (writable)
    pub const TREASURY_TOKEN: usize = 15;
    /// Treasury fee token account (writable)
    pub const TREASURY_FEE_TOKEN: usize = 16;
    /// Reward pool routing token account (writable)
    pub const REWARD_POOL_TOKEN: usize = 17;
    /// Partner DAO token account (writable)
    pub const PARTNER_DAO_TOKEN: usize = 18;
    /// Number of accounts in the shared layout
    pub const COUNT: usize = 19;

    /// `Harvest` only: routing token account of the harvest caller (writable)
    pub const HARVEST_CALLER_TOKEN: usize = 19;
    /// `Harvest` account count
    pub const HARVEST_COUNT: usize = 20;

    /// `Initialize` only: system program
    pub const SYSTEM_PROGRAM: usize = 19;
    /// `Initialize` only: the vault the strategy serves (signer)
    pub const VAULT: usize = 20;
    /// `Initialize` account count
    pub const INITIALIZE_COUNT: usize = 21;
}

/// Account indices for `TransferOwnership` and `AcceptOwnership`.
pub mod ownership_accounts {
    /// Strategy config PDA (writable)
    pub const STRATEGY: usize = 0;
    /// Current owner or pending owner (signer)
    pub const AUTHORITY: usize = 1;
    /// Strategy program (for self-CPI events)
    pub const STRATEGY_PROGRAM: usize = 2;
    /// Total number of accounts for `AcceptOwnership`
    pub const COUNT: usize = 3;

    /// `TransferOwnership` only: nominated owner
    pub const NEW_OWNER: usize = 3;
    /// `TransferOwnership` account count
    pub const TRANSFER_COUNT: usize = 4;
}
