//! [`StrategyHost`] backed by cross-program invocations.
//!
//! Every account is checked against the strategy config before any call is
//! made. The strategy config PDA signs every token movement and staking call;
//! swaps run through the router delegate's standing approval instead.

use compounder_interface::{
    IntermediateLayerInstruction, SecondaryLayerInstruction, StakePosition, SwapExactInParams,
    build_intermediate_instruction_data, build_secondary_instruction_data,
    build_swap_instruction_data,
};
use pinocchio::{
    ProgramResult,
    account_info::AccountInfo,
    cpi::{invoke, invoke_signed},
    instruction::{AccountMeta, Instruction, Signer},
    program_error::ProgramError,
    pubkey::Pubkey,
    sysvars::{Sysvar, clock::Clock},
};
use pinocchio_log::log;
use pinocchio_token::{
    instructions::{Approve, Revoke, Transfer},
    state::TokenAccount,
};

use crate::{
    StrategyError,
    gen_strategy_seeds,
    host::StrategyHost,
    ledger::{Asset, Payee, TokenLedger, TokenTransfers},
    routes::SwapRouter,
    stake::{IntermediateLayer, SecondaryLayer},
    state::StrategyConfig,
};

/// Accounts the strategy moves tokens between or calls into.
#[derive(Clone, Copy)]
pub struct HostAccounts<'a> {
    /// Strategy config PDA, authority over the strategy accounts
    pub strategy: &'a AccountInfo,
    /// SPL Token program
    pub token_program: &'a AccountInfo,
    /// Strategy base token account
    pub base_token: &'a AccountInfo,
    /// Strategy receipt token account
    pub receipt_token: &'a AccountInfo,
    /// Strategy reward token account
    pub reward_token: &'a AccountInfo,
    /// Strategy routing token account
    pub routing_token: &'a AccountInfo,
    /// Vault base token account
    pub vault_token: &'a AccountInfo,
    /// Swap router program
    pub router_program: &'a AccountInfo,
    /// Router delegate
    pub router_delegate: &'a AccountInfo,
    /// Intermediate layer program
    pub intermediate_program: &'a AccountInfo,
    /// Intermediate layer position
    pub intermediate_position: &'a AccountInfo,
    /// Secondary layer program
    pub secondary_program: &'a AccountInfo,
    /// Secondary layer position
    pub secondary_position: &'a AccountInfo,
    /// Treasury routing token account
    pub treasury_token: &'a AccountInfo,
    /// Treasury fee token account
    pub treasury_fee_token: &'a AccountInfo,
    /// Reward pool routing token account
    pub reward_pool_token: &'a AccountInfo,
    /// Partner DAO token account
    pub partner_dao_token: &'a AccountInfo,
    /// Harvest caller routing token account, `Harvest` only
    pub harvest_caller_token: Option<&'a AccountInfo>,
}

impl HostAccounts<'_> {
    /// Check every account is the one the config registered.
    pub fn validate(&self, config: &StrategyConfig) -> Result<(), ProgramError> {
        if self.token_program.key() != &pinocchio_token::ID {
            log!("host: invalid token program");
            return Err(ProgramError::IncorrectProgramId);
        }

        let expected: [(&AccountInfo, &Pubkey); 15] = [
            (self.base_token, &config.base_token),
            (self.receipt_token, &config.receipt_token),
            (self.reward_token, &config.reward_token),
            (self.routing_token, &config.routing_token),
            (self.vault_token, &config.vault_token),
            (self.router_program, &config.router_program),
            (self.router_delegate, &config.router_delegate),
            (self.intermediate_program, &config.intermediate_program),
            (self.intermediate_position, &config.intermediate_position),
            (self.secondary_program, &config.secondary_program),
            (self.secondary_position, &config.secondary_position),
            (self.treasury_token, &config.treasury_token),
            (self.treasury_fee_token, &config.treasury_fee_token),
            (self.reward_pool_token, &config.reward_pool_token),
            (self.partner_dao_token, &config.partner_dao_token),
        ];
        for (index, (account, key)) in expected.iter().enumerate() {
            if account.key() != *key {
                log!("host: account {} does not match config", index);
                return Err(StrategyError::InvalidAccount.into());
            }
        }

        if let Some(caller_token) = self.harvest_caller_token {
            let mint = *TokenAccount::from_account_info(caller_token)?.mint();
            if mint != config.routing_mint {
                log!("host: harvest caller account is not a routing token account");
                return Err(StrategyError::InvalidAccount.into());
            }
        }
        Ok(())
    }
}

/// On-chain [`StrategyHost`].
pub struct CpiHost<'a> {
    accounts: HostAccounts<'a>,
    vault: Pubkey,
    bump: [u8; 1],
}

impl<'a> CpiHost<'a> {
    /// Validate `accounts` against `config` and capture the PDA signer seeds.
    pub fn new(config: &StrategyConfig, accounts: HostAccounts<'a>) -> Result<Self, ProgramError> {
        accounts.validate(config)?;
        Ok(Self {
            accounts,
            vault: config.vault,
            bump: [config.bump],
        })
    }

    /// Accounts this host was built over.
    pub fn accounts(&self) -> &HostAccounts<'a> {
        &self.accounts
    }

    fn asset_account(&self, asset: Asset) -> &'a AccountInfo {
        match asset {
            Asset::Base => self.accounts.base_token,
            Asset::Receipt => self.accounts.receipt_token,
            Asset::Reward => self.accounts.reward_token,
            Asset::Routing => self.accounts.routing_token,
        }
    }

    fn payee_account(&self, payee: Payee) -> Result<&'a AccountInfo, ProgramError> {
        Ok(match payee {
            Payee::Strategy(asset) => self.asset_account(asset),
            Payee::Vault => self.accounts.vault_token,
            Payee::HarvestCaller => self
                .accounts
                .harvest_caller_token
                .ok_or(ProgramError::NotEnoughAccountKeys)?,
            Payee::Treasury => self.accounts.treasury_token,
            Payee::TreasuryFeeToken => self.accounts.treasury_fee_token,
            Payee::RewardPool => self.accounts.reward_pool_token,
            Payee::PartnerDao => self.accounts.partner_dao_token,
        })
    }

    fn read_position(position: &AccountInfo) -> Result<StakePosition, ProgramError> {
        let data = position.try_borrow_data()?;
        if data.is_empty() {
            return Ok(StakePosition::default());
        }
        StakePosition::from_bytes(&data).ok_or(StrategyError::InvalidPosition.into())
    }

    /// Invoke a staking layer with the strategy PDA as staker authority.
    ///
    /// Both layers share the same shape: position, authority, the token the
    /// layer takes in, the token it hands out, token program.
    fn invoke_layer(
        &self,
        program: &AccountInfo,
        position: &AccountInfo,
        token_in: &AccountInfo,
        token_out: &AccountInfo,
        data: &[u8],
    ) -> ProgramResult {
        let a = &self.accounts;
        let account_metas = [
            AccountMeta::writable(position.key()),
            AccountMeta::readonly_signer(a.strategy.key()),
            AccountMeta::writable(token_in.key()),
            AccountMeta::writable(token_out.key()),
            AccountMeta::readonly(a.token_program.key()),
            AccountMeta::readonly(program.key()),
        ];
        let instruction = Instruction {
            program_id: program.key(),
            accounts: &account_metas,
            data,
        };

        let seeds = gen_strategy_seeds(&self.vault, &self.bump);
        let signer = [Signer::from(&seeds)];

        // The layer program must be included for the runtime to find its executable
        invoke_signed(
            &instruction,
            &[position, a.strategy, token_in, token_out, a.token_program, program],
            &signer,
        )
    }

    fn invoke_intermediate(&self, instruction: IntermediateLayerInstruction, amount: u64) -> ProgramResult {
        let a = &self.accounts;
        let data = build_intermediate_instruction_data(instruction, amount);
        self.invoke_layer(
            a.intermediate_program,
            a.intermediate_position,
            a.base_token,
            a.receipt_token,
            &data,
        )
    }

    fn invoke_secondary(&self, instruction: SecondaryLayerInstruction, amount: u64) -> ProgramResult {
        let a = &self.accounts;
        let data = build_secondary_instruction_data(instruction, amount);
        self.invoke_layer(
            a.secondary_program,
            a.secondary_position,
            a.receipt_token,
            a.reward_token,
            &data,
        )
    }
}

impl TokenLedger for CpiHost<'_> {
    fn balance_of(&self, asset: Asset) -> Result<u64, ProgramError> {
        Ok(TokenAccount::from_account_info(self.asset_account(asset))?.amount())
    }
}

impl TokenTransfers for CpiHost<'_> {
    fn transfer(&mut self, asset: Asset, to: Payee, amount: u64) -> ProgramResult {
        let seeds = gen_strategy_seeds(&self.vault, &self.bump);
        let signer = [Signer::from(&seeds)];

        Transfer {
            from: self.asset_account(asset),
            to: self.payee_account(to)?,
            authority: self.accounts.strategy,
            amount,
        }
        .invoke_signed(&signer)
    }

    fn set_router_allowance(&mut self, asset: Asset, amount: u64) -> ProgramResult {
        let seeds = gen_strategy_seeds(&self.vault, &self.bump);
        let signer = [Signer::from(&seeds)];
        let source = self.asset_account(asset);

        if amount == 0 {
            Revoke {
                source,
                authority: self.accounts.strategy,
            }
            .invoke_signed(&signer)
        } else {
            Approve {
                source,
                delegate: self.accounts.router_delegate,
                authority: self.accounts.strategy,
                amount,
            }
            .invoke_signed(&signer)
        }
    }
}

impl SwapRouter for CpiHost<'_> {
    fn swap_exact_in(
        &mut self,
        from: Asset,
        params: &SwapExactInParams,
        recipient: Payee,
    ) -> ProgramResult {
        let a = &self.accounts;
        let source = self.asset_account(from);
        let destination = self.payee_account(recipient)?;

        let instruction_data = build_swap_instruction_data(params);
        let account_metas = [
            AccountMeta::writable(source.key()),
            AccountMeta::writable(destination.key()),
            AccountMeta::readonly(a.router_delegate.key()),
            AccountMeta::readonly(a.token_program.key()),
            AccountMeta::readonly(a.router_program.key()),
        ];
        let instruction = Instruction {
            program_id: a.router_program.key(),
            accounts: &account_metas,
            data: &instruction_data,
        };

        invoke(
            &instruction,
            &[source, destination, a.router_delegate, a.token_program, a.router_program],
        )
    }
}

impl IntermediateLayer for CpiHost<'_> {
    fn enter(&mut self, amount: u64) -> ProgramResult {
        self.invoke_intermediate(IntermediateLayerInstruction::Enter, amount)
    }

    fn leave(&mut self, amount: u64) -> ProgramResult {
        self.invoke_intermediate(IntermediateLayerInstruction::Leave, amount)
    }

    fn intermediate_position(&self) -> Result<StakePosition, ProgramError> {
        Self::read_position(self.accounts.intermediate_position)
    }
}

impl SecondaryLayer for CpiHost<'_> {
    fn deposit(&mut self, amount: u64) -> ProgramResult {
        self.invoke_secondary(SecondaryLayerInstruction::Deposit, amount)
    }

    fn withdraw(&mut self, amount: u64) -> ProgramResult {
        self.invoke_secondary(SecondaryLayerInstruction::Withdraw, amount)
    }

    fn emergency_withdraw_all(&mut self) -> ProgramResult {
        self.invoke_secondary(SecondaryLayerInstruction::EmergencyWithdraw, 0)
    }

    fn secondary_position(&self) -> Result<StakePosition, ProgramError> {
        Self::read_position(self.accounts.secondary_position)
    }
}

impl StrategyHost for CpiHost<'_> {
    fn unix_timestamp(&self) -> Result<i64, ProgramError> {
        Ok(Clock::get()?.unix_timestamp)
    }
}
