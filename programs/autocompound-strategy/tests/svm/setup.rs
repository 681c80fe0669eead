//! Program deployment and the strategy account fixture.

use std::path::PathBuf;

use autocompound_strategy::{
    STRATEGY_SEED, StrategyError,
    fees::FeeSchedule,
    instructions::InitializeData,
    routes::{RouteSpec, RouteTable},
};
use litesvm::{
    LiteSVM,
    types::{TransactionMetadata, TransactionResult},
};
use solana_instruction::AccountMeta;
use solana_keypair::Keypair;
use solana_pubkey::Pubkey;
use solana_signer::Signer;

use super::mock_accounts::{create_mock_mint, create_mock_token_account};

/// Strategy program ID (from compounder-program-ids via the program crate)
pub const STRATEGY_PROGRAM_ID: Pubkey = Pubkey::new_from_array(autocompound_strategy::ID);

/// SPL Token program ID
pub const SPL_TOKEN_PROGRAM_ID: Pubkey = Pubkey::new_from_array(pinocchio_token::ID);

/// System program ID
pub const SYSTEM_PROGRAM_ID: Pubkey = Pubkey::new_from_array(pinocchio_system::ID);

/// Deploy the strategy program built by `cargo build-sbf`.
pub fn deploy_strategy_program(svm: &mut LiteSVM) -> Pubkey {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../target/deploy/autocompound_strategy.so");
    let program_data = std::fs::read(&path).unwrap_or_else(|err| {
        panic!("{}: {err} (run `cargo build-sbf` first)", path.display())
    });
    let _ = svm.add_program(STRATEGY_PROGRAM_ID, &program_data);
    STRATEGY_PROGRAM_ID
}

/// Derive the strategy config PDA for a vault.
pub fn find_strategy_pda(vault: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[STRATEGY_SEED, vault.as_ref()], &STRATEGY_PROGRAM_ID)
}

/// A fresh address nobody controls.
pub fn unique_address() -> Pubkey {
    Keypair::new().pubkey()
}

/// Every account a strategy is initialized over.
///
/// Fields are public so a test can swap one account out before building an
/// instruction.
pub struct StrategyFixture {
    pub owner: Keypair,
    pub vault: Keypair,
    pub strategy: Pubkey,

    pub base_mint: Pubkey,
    pub receipt_mint: Pubkey,
    pub reward_mint: Pubkey,
    pub routing_mint: Pubkey,
    pub treasury_fee_mint: Pubkey,
    pub partner_mint: Pubkey,

    pub base_token: Pubkey,
    pub receipt_token: Pubkey,
    pub reward_token: Pubkey,
    pub routing_token: Pubkey,
    pub vault_token: Pubkey,

    pub router_program: Pubkey,
    pub router_delegate: Pubkey,
    pub intermediate_program: Pubkey,
    pub intermediate_position: Pubkey,
    pub secondary_program: Pubkey,
    pub secondary_position: Pubkey,

    pub treasury_token: Pubkey,
    pub treasury_fee_token: Pubkey,
    pub reward_pool_token: Pubkey,
    pub partner_dao_token: Pubkey,
}

impl StrategyFixture {
    /// Fund the owner and vault and create every mint and token account.
    pub fn new(svm: &mut LiteSVM) -> Self {
        let owner = Keypair::new();
        let vault = Keypair::new();
        svm.airdrop(&owner.pubkey(), 10_000_000_000).unwrap();
        svm.airdrop(&vault.pubkey(), 10_000_000_000).unwrap();

        let (strategy, _) = find_strategy_pda(&vault.pubkey());

        let base_mint = create_mock_mint(svm, 9);
        let receipt_mint = create_mock_mint(svm, 9);
        let reward_mint = create_mock_mint(svm, 9);
        let routing_mint = create_mock_mint(svm, 6);
        let treasury_fee_mint = create_mock_mint(svm, 6);
        let partner_mint = create_mock_mint(svm, 9);

        let treasury = unique_address();
        let reward_pool = unique_address();
        let partner_dao = unique_address();

        Self {
            base_token: create_mock_token_account(svm, &base_mint, &strategy, 0),
            receipt_token: create_mock_token_account(svm, &receipt_mint, &strategy, 0),
            reward_token: create_mock_token_account(svm, &reward_mint, &strategy, 0),
            routing_token: create_mock_token_account(svm, &routing_mint, &strategy, 0),
            vault_token: create_mock_token_account(svm, &base_mint, &vault.pubkey(), 0),

            router_program: unique_address(),
            router_delegate: unique_address(),
            intermediate_program: unique_address(),
            intermediate_position: unique_address(),
            secondary_program: unique_address(),
            secondary_position: unique_address(),

            treasury_token: create_mock_token_account(svm, &routing_mint, &treasury, 0),
            treasury_fee_token: create_mock_token_account(svm, &treasury_fee_mint, &treasury, 0),
            reward_pool_token: create_mock_token_account(svm, &routing_mint, &reward_pool, 0),
            partner_dao_token: create_mock_token_account(svm, &partner_mint, &partner_dao, 0),

            owner,
            vault,
            strategy,
            base_mint,
            receipt_mint,
            reward_mint,
            routing_mint,
            treasury_fee_mint,
            partner_mint,
        }
    }

    /// Routes over the fixture mints with the default fee schedule.
    pub fn initialize_data(&self) -> InitializeData {
        let base = self.base_mint.to_bytes();
        let reward = self.reward_mint.to_bytes();
        let routing = self.routing_mint.to_bytes();

        InitializeData {
            vault: self.vault.pubkey().to_bytes(),
            routes: RouteTable {
                reward_to_base: RouteSpec::new(&[reward, routing, base]).unwrap(),
                reward_to_routing: RouteSpec::new(&[reward, routing]).unwrap(),
                routing_to_treasury_token: RouteSpec::new(&[
                    routing,
                    self.treasury_fee_mint.to_bytes(),
                ])
                .unwrap(),
                routing_to_partner_token: RouteSpec::new(&[routing, self.partner_mint.to_bytes()])
                    .unwrap(),
            },
            fees: FeeSchedule::default(),
        }
    }

    /// The shared account layout, `authority` at index 1.
    pub fn shared_accounts(&self, authority: &Pubkey, authority_signs: bool) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.strategy, false),
            AccountMeta::new_readonly(*authority, authority_signs),
            AccountMeta::new_readonly(STRATEGY_PROGRAM_ID, false),
            AccountMeta::new_readonly(SPL_TOKEN_PROGRAM_ID, false),
            AccountMeta::new(self.base_token, false),
            AccountMeta::new(self.receipt_token, false),
            AccountMeta::new(self.reward_token, false),
            AccountMeta::new(self.routing_token, false),
            AccountMeta::new(self.vault_token, false),
            AccountMeta::new_readonly(self.router_program, false),
            AccountMeta::new_readonly(self.router_delegate, false),
            AccountMeta::new_readonly(self.intermediate_program, false),
            AccountMeta::new(self.intermediate_position, false),
            AccountMeta::new_readonly(self.secondary_program, false),
            AccountMeta::new(self.secondary_position, false),
            AccountMeta::new(self.treasury_token, false),
            AccountMeta::new(self.treasury_fee_token, false),
            AccountMeta::new(self.reward_pool_token, false),
            AccountMeta::new(self.partner_dao_token, false),
        ]
    }
}

/// Unwrap a successful transaction.
pub fn expect_success(result: TransactionResult) -> TransactionMetadata {
    match result {
        Ok(meta) => meta,
        Err(failed) => panic!("transaction failed: {:?}\nlogs: {:#?}", failed.err, failed.meta.logs),
    }
}

/// Whether the transaction logged at least one event.
pub fn emitted_event(meta: &TransactionMetadata) -> bool {
    meta.logs.iter().any(|line| line.starts_with("Program data: "))
}

/// Debug rendering of a failed transaction's error.
pub fn transaction_error(result: TransactionResult) -> String {
    match result {
        Ok(_) => panic!("transaction should have failed"),
        Err(failed) => format!("{:?}", failed.err),
    }
}

/// Assert the transaction failed with `error` from the strategy program.
pub fn assert_strategy_error(result: TransactionResult, error: StrategyError) {
    let err = transaction_error(result);
    assert!(
        err.ends_with(&format!("Custom({}))", error.to_u32())),
        "expected {error:?}, got {err}"
    );
}

/// Assert the transaction failed with a builtin program error, by name.
pub fn assert_program_error(result: TransactionResult, name: &str) {
    let err = transaction_error(result);
    assert!(err.ends_with(&format!("{name})")), "expected {name}, got {err}");
}
