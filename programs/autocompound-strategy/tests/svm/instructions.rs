//! Strategy instruction builders and transaction helpers.

use autocompound_strategy::{StrategyInstruction, instructions::InitializeData};
use compounder_interface::strategy::build_withdraw_instruction_data;
use litesvm::{LiteSVM, types::TransactionResult};
use solana_instruction::{AccountMeta, Instruction};
use solana_keypair::Keypair;
use solana_pubkey::Pubkey;
use solana_signer::Signer;
use solana_transaction::Transaction;

use super::setup::{STRATEGY_PROGRAM_ID, SYSTEM_PROGRAM_ID, StrategyFixture};

/// Sign and send one instruction, then expire the blockhash so an identical
/// instruction can be sent again.
pub fn send(
    svm: &mut LiteSVM,
    instruction: Instruction,
    payer: &Keypair,
    signers: &[&Keypair],
) -> TransactionResult {
    let tx = Transaction::new_signed_with_payer(
        &[instruction],
        Some(&payer.pubkey()),
        signers,
        svm.latest_blockhash(),
    );
    let result = svm.send_transaction(tx);
    svm.expire_blockhash();
    result
}

// ============================================================================
// Initialize
// ============================================================================

/// Build `Initialize`, paid by the fixture owner, with `vault` as the
/// co-signing vault account.
pub fn initialize_instruction(
    fixture: &StrategyFixture,
    data: &InitializeData,
    vault: &Pubkey,
    vault_signs: bool,
) -> Instruction {
    let mut accounts = fixture.shared_accounts(&fixture.owner.pubkey(), true);
    accounts.push(AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false));
    accounts.push(AccountMeta::new_readonly(*vault, vault_signs));

    let mut ix_data = vec![StrategyInstruction::Initialize as u8];
    ix_data.extend_from_slice(bytemuck::bytes_of(data));

    Instruction {
        program_id: STRATEGY_PROGRAM_ID,
        accounts,
        data: ix_data,
    }
}

/// Initialize the fixture strategy, signed by its owner and vault.
pub fn initialize_strategy(svm: &mut LiteSVM, fixture: &StrategyFixture) -> TransactionResult {
    let ix = initialize_instruction(
        fixture,
        &fixture.initialize_data(),
        &fixture.vault.pubkey(),
        true,
    );
    send(svm, ix, &fixture.owner, &[&fixture.owner, &fixture.vault])
}

// ============================================================================
// Capital operations
// ============================================================================

/// Build `Withdraw` with `authority` signing.
pub fn withdraw_instruction(fixture: &StrategyFixture, authority: &Pubkey, amount: u64) -> Instruction {
    Instruction {
        program_id: STRATEGY_PROGRAM_ID,
        accounts: fixture.shared_accounts(authority, true),
        data: build_withdraw_instruction_data(amount).to_vec(),
    }
}

/// Build `Harvest` with `caller` signing and `caller_token` receiving the
/// call fee.
pub fn harvest_instruction(
    fixture: &StrategyFixture,
    caller: &Pubkey,
    caller_token: &Pubkey,
) -> Instruction {
    let mut accounts = fixture.shared_accounts(caller, true);
    accounts.push(AccountMeta::new(*caller_token, false));

    Instruction {
        program_id: STRATEGY_PROGRAM_ID,
        accounts,
        data: vec![StrategyInstruction::Harvest as u8],
    }
}

/// Build `QueryBalance`; nobody needs to sign.
pub fn query_balance_instruction(fixture: &StrategyFixture) -> Instruction {
    Instruction {
        program_id: STRATEGY_PROGRAM_ID,
        accounts: fixture.shared_accounts(&fixture.owner.pubkey(), false),
        data: vec![StrategyInstruction::QueryBalance as u8],
    }
}

/// Build an owner or vault instruction that carries no data
/// (`Pause`, `Unpause`, `Panic`, `Retire`).
pub fn lifecycle_instruction(
    fixture: &StrategyFixture,
    instruction: StrategyInstruction,
    authority: &Pubkey,
) -> Instruction {
    Instruction {
        program_id: STRATEGY_PROGRAM_ID,
        accounts: fixture.shared_accounts(authority, true),
        data: vec![instruction as u8],
    }
}

// ============================================================================
// Log
// ============================================================================

/// Build a `Log` instruction carrying `event` bytes, signed by `authority`.
pub fn log_instruction(authority: &Pubkey, event: &[u8]) -> Instruction {
    let mut data = vec![StrategyInstruction::Log as u8];
    data.extend_from_slice(&(event.len() as u32).to_le_bytes());
    data.extend_from_slice(event);

    Instruction {
        program_id: STRATEGY_PROGRAM_ID,
        accounts: vec![AccountMeta::new_readonly(*authority, true)],
        data,
    }
}
