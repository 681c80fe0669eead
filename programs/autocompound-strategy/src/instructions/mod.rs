//! Strategy instruction handlers.

use num_enum::TryFromPrimitive;
use pinocchio::{
    ProgramResult, account_info::AccountInfo, instruction::Signer, program_error::ProgramError,
};
use pinocchio_log::log;

use crate::{
    cpi_host::{CpiHost, HostAccounts},
    events::{Event, emit_event},
    gen_strategy_seeds,
    host::StrategyHost,
    state::StrategyConfig,
};

// Admin instructions (initialization, safety modes, ownership)
pub mod admin;

// Capital operations
mod deposit;
mod harvest;
mod query_balance;
mod retire;
mod withdraw;

// Internal
mod log;

pub use admin::*;
pub use deposit::process_deposit;
pub use harvest::process_harvest;
pub use log::process_log;
pub use query_balance::process_query_balance;
pub use retire::process_retire;
pub use withdraw::process_withdraw;

/// Strategy instruction set.
///
/// # Discriminator Ranges
/// - **0-31**: Capital operations (deposit, withdraw, harvest, query)
/// - **64-127**: Lifecycle operations (initialize, pause, panic, retire, log)
/// - **192-255**: Ownership operations
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromPrimitive)]
pub enum StrategyInstruction {
    // =========================================================================
    // Capital Operations (0-31)
    // =========================================================================
    /// Stake all idle base asset. Permissionless, requires an active strategy.
    Deposit = 0,

    /// Release capital to the vault, net of the withdrawal fee.
    ///
    /// Vault only; allowed while paused.
    Withdraw = 1,

    /// Claim rewards, distribute fees and compound the rest.
    ///
    /// Any transaction signer; rejected when invoked through another program.
    Harvest = 2,

    /// Set the current capital split as return data.
    QueryBalance = 3,
    // Reserved: 4-31

    // =========================================================================
    // Lifecycle Operations (64-127)
    // =========================================================================
    /// Create the strategy config and grant router allowances. The owner pays
    /// and the vault co-signs.
    Initialize = 64,

    /// Pause and revoke router allowances. Owner only.
    Pause = 65,

    /// Unpause and re-grant router allowances. Owner only.
    Unpause = 66,

    /// Pause and pull everything out of both layers. Owner only.
    Panic = 67,

    /// Unwind and return everything to the vault. Vault only.
    Retire = 68,

    /// Log an event via CPI (internal use only).
    ///
    /// Validates the caller is the program itself via PDA signer.
    Log = 69,
    // Reserved: 70-127

    // =========================================================================
    // Ownership Operations (192-255)
    // =========================================================================
    /// Initiate two-step ownership transfer by setting pending_owner.
    TransferOwnership = 192,

    /// Complete two-step ownership transfer. Must be signed by pending_owner.
    AcceptOwnership = 193,
}

/// Accounts and state shared by every capital and lifecycle instruction.
///
/// Account order follows `compounder_interface::strategy_accounts`.
pub struct StrategyContext<'a> {
    /// Strategy config PDA
    pub strategy: &'a AccountInfo,
    /// Invoking identity
    pub authority: &'a AccountInfo,
    /// This program, for self-CPI events
    pub strategy_program: &'a AccountInfo,
    /// Config copied out of `strategy`
    pub config: StrategyConfig,
    /// Collaborators
    pub host: CpiHost<'a>,
}

/// Split the shared account layout into the strategy, authority and program
/// accounts, the host accounts and whatever follows them.
pub fn parse_host_accounts(
    accounts: &[AccountInfo],
) -> Result<
    (
        &AccountInfo,
        &AccountInfo,
        &AccountInfo,
        HostAccounts<'_>,
        &[AccountInfo],
    ),
    ProgramError,
> {
    let [
        strategy,
        authority,
        strategy_program,
        token_program,
        base_token,
        receipt_token,
        reward_token,
        routing_token,
        vault_token,
        router_program,
        router_delegate,
        intermediate_program,
        intermediate_position,
        secondary_program,
        secondary_position,
        treasury_token,
        treasury_fee_token,
        reward_pool_token,
        partner_dao_token,
        rest @ ..,
    ] = accounts
    else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };

    if strategy_program.key() != &crate::ID {
        log!("accounts: invalid strategy program");
        return Err(ProgramError::IncorrectProgramId);
    }

    let host = HostAccounts {
        strategy,
        token_program,
        base_token,
        receipt_token,
        reward_token,
        routing_token,
        vault_token,
        router_program,
        router_delegate,
        intermediate_program,
        intermediate_position,
        secondary_program,
        secondary_position,
        treasury_token,
        treasury_fee_token,
        reward_pool_token,
        partner_dao_token,
        harvest_caller_token: None,
    };
    Ok((strategy, authority, strategy_program, host, rest))
}

impl<'a> StrategyContext<'a> {
    /// Load the config and build the host over the shared account layout.
    ///
    /// With `with_caller_token`, the account right after the shared layout is
    /// taken as the harvest caller's routing token account.
    pub fn load(accounts: &'a [AccountInfo], with_caller_token: bool) -> Result<Self, ProgramError> {
        let (strategy, authority, strategy_program, mut host_accounts, rest) =
            parse_host_accounts(accounts)?;

        if with_caller_token {
            host_accounts.harvest_caller_token =
                Some(rest.first().ok_or(ProgramError::NotEnoughAccountKeys)?);
        }

        let config = StrategyConfig::load(strategy)?;
        let host = CpiHost::new(&config, host_accounts)?;

        Ok(Self {
            strategy,
            authority,
            strategy_program,
            config,
            host,
        })
    }

    /// Fail unless the authority account signed.
    pub fn require_signer(&self) -> ProgramResult {
        if !self.authority.is_signer() {
            return Err(ProgramError::MissingRequiredSignature);
        }
        Ok(())
    }

    /// Current unix timestamp.
    pub fn now(&self) -> Result<i64, ProgramError> {
        self.host.unix_timestamp()
    }

    /// Write the config back into the strategy account.
    pub fn store(&self) -> ProgramResult {
        self.config.store(self.strategy)
    }

    /// Emit an event signed by the strategy PDA.
    pub fn emit<T: Event>(&self, event: &T) -> ProgramResult {
        let bump = [self.config.bump];
        let seeds = gen_strategy_seeds(&self.config.vault, &bump);
        emit_event(
            self.strategy,
            self.strategy_program,
            Signer::from(&seeds),
            event,
        )
    }
}
