//! Strategy state account.

use bytemuck::{Pod, Zeroable};
use compounder_interface::authority::HasOwner;
use pinocchio::{
    ProgramResult, account_info::AccountInfo, program_error::ProgramError, pubkey::Pubkey,
};

use crate::{
    StrategyError,
    fees::FeeSchedule,
    ledger::{Asset, Payee},
    routes::{RouteEndpoints, RouteTable},
};

/// Account discriminators, stored as the first 8 bytes of account data.
///
/// 0 is never assigned so zeroed data cannot pass as an account.
#[repr(u64)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrategyAccount {
    /// Strategy configuration (per vault)
    StrategyConfig = 1,
}

/// Length of the account discriminator prefix
pub const DISCRIMINATOR_LEN: usize = 8;

/// Strategy configuration account.
///
/// Holds the identities allowed to drive the strategy, every account it moves
/// tokens between, the swap routes and fee schedule, lifecycle flags and
/// statistics. Balances are never cached here: the claimable capital is
/// always read from the token accounts and staking positions.
///
/// # Lifecycle
///
/// ```text
///            pause / panic
///   Active ────────────────▶ Paused
///          ◀────────────────
///               unpause
///
///   retire (vault, any state) → is_retired = 1, one way
/// ```
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct StrategyConfig {
    /// Number of completed harvests
    pub harvest_count: u64,
    /// Unix timestamp of the last harvest
    pub last_harvest_timestamp: i64,
    /// Cumulative amount released to the vault, before fees
    pub total_withdrawn: u64,
    /// Cumulative withdrawal fees kept idle
    pub total_withdrawal_fees: u64,
    /// Cumulative base asset restaked by deposits and harvests
    pub total_compounded: u64,

    /// Owner: may pause, unpause and panic
    pub owner: Pubkey,
    /// Pending owner for two-step transfer
    pub pending_owner: Pubkey,
    /// Vault identity: may withdraw and retire
    pub vault: Pubkey,
    /// Vault base token account, destination of every release
    pub vault_token: Pubkey,

    /// Base asset mint
    pub base_mint: Pubkey,
    /// Reward asset mint
    pub reward_mint: Pubkey,
    /// Routing asset mint
    pub routing_mint: Pubkey,
    /// Treasury fee token mint
    pub treasury_fee_mint: Pubkey,
    /// Partner DAO token mint
    pub partner_mint: Pubkey,

    /// Strategy base token account
    pub base_token: Pubkey,
    /// Strategy receipt token account
    pub receipt_token: Pubkey,
    /// Strategy reward token account
    pub reward_token: Pubkey,
    /// Strategy routing token account
    pub routing_token: Pubkey,

    /// Swap router program
    pub router_program: Pubkey,
    /// Router delegate approved over the reward and routing accounts
    pub router_delegate: Pubkey,
    /// Intermediate layer program
    pub intermediate_program: Pubkey,
    /// Strategy position in the intermediate layer
    pub intermediate_position: Pubkey,
    /// Secondary layer program
    pub secondary_program: Pubkey,
    /// Strategy position in the secondary layer
    pub secondary_position: Pubkey,

    /// Treasury routing token account
    pub treasury_token: Pubkey,
    /// Treasury fee token account
    pub treasury_fee_token: Pubkey,
    /// Reward pool routing token account
    pub reward_pool_token: Pubkey,
    /// Partner DAO token account
    pub partner_dao_token: Pubkey,

    /// Swap routes
    pub routes: RouteTable,
    /// Fee schedule
    pub fees: FeeSchedule,

    /// Paused flag (0 = active, 1 = paused)
    pub is_paused: u8,
    /// Retired flag (0 = live, 1 = retired), never cleared
    pub is_retired: u8,
    /// PDA bump seed
    pub bump: u8,
    /// Padding for 8-byte alignment
    pub _padding: [u8; 5],
}

impl StrategyConfig {
    /// Struct size
    pub const SIZE: usize = core::mem::size_of::<Self>();

    /// Account size, discriminator included
    pub const ACCOUNT_SIZE: usize = DISCRIMINATOR_LEN + Self::SIZE;

    /// Decode from raw account data.
    pub fn from_account_data(data: &[u8]) -> Result<Self, StrategyError> {
        if data.len() < Self::ACCOUNT_SIZE {
            return Err(StrategyError::InvalidStrategyAccount);
        }
        let discriminator = u64::from_le_bytes(
            data[..DISCRIMINATOR_LEN]
                .try_into()
                .map_err(|_| StrategyError::InvalidStrategyAccount)?,
        );
        if discriminator != StrategyAccount::StrategyConfig as u64 {
            return Err(StrategyError::InvalidStrategyAccount);
        }
        bytemuck::try_pod_read_unaligned(&data[DISCRIMINATOR_LEN..Self::ACCOUNT_SIZE])
            .map_err(|_| StrategyError::InvalidStrategyAccount)
    }

    /// Encode into raw account data, discriminator included.
    pub fn write_account_data(&self, data: &mut [u8]) -> Result<(), StrategyError> {
        if data.len() < Self::ACCOUNT_SIZE {
            return Err(StrategyError::InvalidStrategyAccount);
        }
        data[..DISCRIMINATOR_LEN]
            .copy_from_slice(&(StrategyAccount::StrategyConfig as u64).to_le_bytes());
        data[DISCRIMINATOR_LEN..Self::ACCOUNT_SIZE].copy_from_slice(bytemuck::bytes_of(self));
        Ok(())
    }

    /// Copy the config out of a program-owned account.
    pub fn load(account: &AccountInfo) -> Result<Self, ProgramError> {
        if account.owner() != &crate::ID {
            return Err(StrategyError::InvalidStrategyAccount.into());
        }
        let data = account.try_borrow_data()?;
        Ok(Self::from_account_data(&data)?)
    }

    /// Write the config back into its account.
    pub fn store(&self, account: &AccountInfo) -> ProgramResult {
        let mut data = account.try_borrow_mut_data()?;
        self.write_account_data(&mut data)?;
        Ok(())
    }

    /// Check if the strategy is paused
    pub fn is_paused(&self) -> bool {
        self.is_paused != 0
    }

    /// Check if the strategy is retired
    pub fn is_retired(&self) -> bool {
        self.is_retired != 0
    }

    /// Set the paused flag
    pub fn set_paused(&mut self, paused: bool) {
        self.is_paused = paused as u8;
    }

    /// Check the strategy accepts new capital: not retired, not paused.
    #[inline]
    pub fn require_active(&self) -> Result<(), StrategyError> {
        if self.is_retired() {
            return Err(StrategyError::StrategyRetired);
        }
        if self.is_paused() {
            return Err(StrategyError::StrategyPaused);
        }
        Ok(())
    }

    /// Check if signer is the owner.
    #[inline]
    pub fn require_owner(&self, signer: &Pubkey) -> Result<(), StrategyError> {
        if self.owner != *signer {
            return Err(StrategyError::NotOwner);
        }
        Ok(())
    }

    /// Check if signer is the vault.
    #[inline]
    pub fn require_vault(&self, signer: &Pubkey) -> Result<(), StrategyError> {
        if self.vault != *signer {
            return Err(StrategyError::NotVault);
        }
        Ok(())
    }

    /// Mints the route table has to connect.
    pub fn route_endpoints(&self) -> RouteEndpoints<'_> {
        RouteEndpoints {
            base: &self.base_mint,
            reward: &self.reward_mint,
            routing: &self.routing_mint,
            treasury_token: &self.treasury_fee_mint,
            partner_token: &self.partner_mint,
        }
    }

    /// Validate routes and fees against the configured mints.
    pub fn validate(&self) -> Result<(), StrategyError> {
        self.fees.validate()?;
        self.routes.validate(&self.route_endpoints())
    }

    /// Strategy token account holding `asset`.
    pub fn asset_account(&self, asset: Asset) -> &Pubkey {
        match asset {
            Asset::Base => &self.base_token,
            Asset::Receipt => &self.receipt_token,
            Asset::Reward => &self.reward_token,
            Asset::Routing => &self.routing_token,
        }
    }

    /// Token account a payee resolves to.
    ///
    /// The harvest caller is not stored, so it resolves to `None`.
    pub fn payee_account(&self, payee: Payee) -> Option<&Pubkey> {
        match payee {
            Payee::Strategy(asset) => Some(self.asset_account(asset)),
            Payee::Vault => Some(&self.vault_token),
            Payee::HarvestCaller => None,
            Payee::Treasury => Some(&self.treasury_token),
            Payee::TreasuryFeeToken => Some(&self.treasury_fee_token),
            Payee::RewardPool => Some(&self.reward_pool_token),
            Payee::PartnerDao => Some(&self.partner_dao_token),
        }
    }
}

impl HasOwner for StrategyConfig {
    fn owner(&self) -> &Pubkey {
        &self.owner
    }
    fn owner_mut(&mut self) -> &mut Pubkey {
        &mut self.owner
    }
    fn pending_owner(&self) -> &Pubkey {
        &self.pending_owner
    }
    fn pending_owner_mut(&mut self) -> &mut Pubkey {
        &mut self.pending_owner
    }
}
