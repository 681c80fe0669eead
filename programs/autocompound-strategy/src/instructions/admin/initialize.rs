//! Initialize a strategy for one vault.

use bytemuck::{Pod, Zeroable};
use pinocchio::{
    ProgramResult,
    account_info::AccountInfo,
    instruction::Signer,
    program_error::ProgramError,
    pubkey::Pubkey,
    sysvars::{Sysvar, clock::Clock, rent::Rent},
};
use pinocchio_log::log;
use pinocchio_system::instructions::CreateAccount;
use pinocchio_token::state::TokenAccount;

use crate::{
    StrategyError,
    cpi_host::CpiHost,
    events::{StrategyInitializedEvent, emit_event},
    fees::FeeSchedule,
    find_strategy_pda, gen_strategy_seeds,
    instructions::parse_host_accounts,
    lifecycle::LifecycleController,
    routes::RouteTable,
    state::StrategyConfig,
};

/// Instruction data for Initialize.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct InitializeData {
    /// Vault the strategy serves
    pub vault: Pubkey,
    /// Swap routes
    pub routes: RouteTable,
    /// Fee shares and withdrawal fee
    pub fees: FeeSchedule,
}

impl InitializeData {
    /// Size in bytes
    pub const SIZE: usize = core::mem::size_of::<Self>();

    /// Parse from instruction data (discriminator already stripped).
    pub fn from_bytes(data: &[u8]) -> Result<Self, ProgramError> {
        let bytes = data.get(..Self::SIZE).ok_or(StrategyError::InvalidInstructionData)?;
        bytemuck::try_pod_read_unaligned(bytes)
            .map_err(|_| StrategyError::InvalidInstructionData.into())
    }
}

fn token_mint(account: &AccountInfo) -> Result<Pubkey, ProgramError> {
    Ok(*TokenAccount::from_account_info(account)?.mint())
}

/// Process an initialize instruction.
///
/// The authority pays for the config account and becomes the owner. The vault
/// co-signs, so only the vault can bind a strategy to itself. Mints are read
/// from the token accounts rather than passed in.
///
/// # Accounts
/// Shared strategy layout, then:
/// 19. `[]` - System program
/// 20. `[signer]` - Vault
pub fn process_initialize(accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    let params = InitializeData::from_bytes(data)?;

    let (strategy, owner, strategy_program, host_accounts, rest) = parse_host_accounts(accounts)?;
    let [system_program, vault, ..] = rest else {
        return Err(ProgramError::NotEnoughAccountKeys);
    };
    if system_program.key() != &pinocchio_system::ID {
        log!("initialize: invalid system program");
        return Err(ProgramError::IncorrectProgramId);
    }

    if !owner.is_signer() {
        return Err(ProgramError::MissingRequiredSignature);
    }
    if vault.key() != &params.vault {
        log!("initialize: vault account does not match instruction data");
        return Err(StrategyError::NotVault.into());
    }
    if !vault.is_signer() {
        log!("initialize: vault must sign");
        return Err(ProgramError::MissingRequiredSignature);
    }

    let (expected, bump) = find_strategy_pda(&params.vault);
    if strategy.key() != &expected {
        log!("initialize: strategy is not the vault's config PDA");
        return Err(StrategyError::InvalidStrategyAccount.into());
    }
    if strategy.data_len() != 0 {
        return Err(StrategyError::AlreadyInitialized.into());
    }

    let a = &host_accounts;
    for (index, account) in [a.base_token, a.receipt_token, a.reward_token, a.routing_token]
        .iter()
        .enumerate()
    {
        if TokenAccount::from_account_info(account)?.owner() != &expected {
            log!("initialize: strategy token {} is not held by the config PDA", index);
            return Err(StrategyError::InvalidAccount.into());
        }
    }

    let base_mint = token_mint(a.base_token)?;
    let routing_mint = token_mint(a.routing_token)?;
    if token_mint(a.vault_token)? != base_mint {
        log!("initialize: vault token is not a base asset account");
        return Err(StrategyError::InvalidAccount.into());
    }
    if token_mint(a.treasury_token)? != routing_mint
        || token_mint(a.reward_pool_token)? != routing_mint
    {
        log!("initialize: fee recipients must hold the routing asset");
        return Err(StrategyError::InvalidAccount.into());
    }

    for (position, program) in [
        (a.intermediate_position, a.intermediate_program),
        (a.secondary_position, a.secondary_program),
    ] {
        if position.data_len() != 0 && position.owner() != program.key() {
            log!("initialize: position is not owned by its layer program");
            return Err(StrategyError::InvalidPosition.into());
        }
    }

    let mut config = StrategyConfig::zeroed();
    config.owner = *owner.key();
    config.vault = params.vault;
    config.vault_token = *a.vault_token.key();
    config.base_mint = base_mint;
    config.reward_mint = token_mint(a.reward_token)?;
    config.routing_mint = routing_mint;
    config.treasury_fee_mint = token_mint(a.treasury_fee_token)?;
    config.partner_mint = token_mint(a.partner_dao_token)?;
    config.base_token = *a.base_token.key();
    config.receipt_token = *a.receipt_token.key();
    config.reward_token = *a.reward_token.key();
    config.routing_token = *a.routing_token.key();
    config.router_program = *a.router_program.key();
    config.router_delegate = *a.router_delegate.key();
    config.intermediate_program = *a.intermediate_program.key();
    config.intermediate_position = *a.intermediate_position.key();
    config.secondary_program = *a.secondary_program.key();
    config.secondary_position = *a.secondary_position.key();
    config.treasury_token = *a.treasury_token.key();
    config.treasury_fee_token = *a.treasury_fee_token.key();
    config.reward_pool_token = *a.reward_pool_token.key();
    config.partner_dao_token = *a.partner_dao_token.key();
    config.routes = params.routes;
    config.fees = params.fees;
    config.bump = bump;

    if let Err(err) = config.validate() {
        log!("initialize: invalid routes or fees");
        return Err(err.into());
    }

    let bump_bytes = [bump];
    let seeds = gen_strategy_seeds(&params.vault, &bump_bytes);
    let lamports = Rent::get()?.minimum_balance(StrategyConfig::ACCOUNT_SIZE);
    CreateAccount {
        from: owner,
        to: strategy,
        lamports,
        space: StrategyConfig::ACCOUNT_SIZE as u64,
        owner: &crate::ID,
    }
    .invoke_signed(&[Signer::from(&seeds)])?;

    config.store(strategy)?;

    let mut host = CpiHost::new(&config, host_accounts)?;
    LifecycleController::new(&mut config, &mut host).grant_router_allowances()?;

    log!("initialize: strategy ready");

    emit_event(
        strategy,
        strategy_program,
        Signer::from(&seeds),
        &StrategyInitializedEvent {
            strategy: *strategy.key(),
            vault: params.vault,
            owner: *owner.key(),
            timestamp: Clock::get()?.unix_timestamp,
        },
    )
}
