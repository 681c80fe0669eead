//! Mock SPL Token and staking position accounts, written straight into the VM.

use autocompound_strategy::StrategyConfig;
use compounder_interface::StakePosition;
use litesvm::LiteSVM;
use solana_account::Account;
use solana_pubkey::Pubkey;

use super::setup::{SPL_TOKEN_PROGRAM_ID, unique_address};

/// SPL Token account layout offsets (165 bytes)
pub mod token_account_offsets {
    pub const MINT: usize = 0;
    pub const OWNER: usize = 32;
    pub const AMOUNT: usize = 64;
    /// COption tag (u32) followed by the delegate key
    pub const DELEGATE: usize = 72;
    pub const STATE: usize = 108;
    pub const DELEGATED_AMOUNT: usize = 121;
    pub const LEN: usize = 165;
}

/// Create a mock SPL Token mint account
pub fn create_mock_mint(svm: &mut LiteSVM, decimals: u8) -> Pubkey {
    let mint = unique_address();

    // SPL Token mint layout (82 bytes)
    let mut data = vec![0u8; 82];
    // mint_authority: Some
    data[0] = 1;
    // decimals at offset 44, is_initialized at 45
    data[44] = decimals;
    data[45] = 1;

    svm.set_account(
        mint,
        Account {
            lamports: 1_000_000_000,
            data,
            owner: SPL_TOKEN_PROGRAM_ID,
            executable: false,
            rent_epoch: 0,
        },
    )
    .unwrap();

    mint
}

/// Create a mock SPL Token account
pub fn create_mock_token_account(
    svm: &mut LiteSVM,
    mint: &Pubkey,
    owner: &Pubkey,
    balance: u64,
) -> Pubkey {
    use token_account_offsets::*;

    let token_account = unique_address();

    let mut data = vec![0u8; LEN];
    data[MINT..MINT + 32].copy_from_slice(mint.as_ref());
    data[OWNER..OWNER + 32].copy_from_slice(owner.as_ref());
    data[AMOUNT..AMOUNT + 8].copy_from_slice(&balance.to_le_bytes());
    // AccountState::Initialized
    data[STATE] = 1;

    svm.set_account(
        token_account,
        Account {
            lamports: 1_000_000_000,
            data,
            owner: SPL_TOKEN_PROGRAM_ID,
            executable: false,
            rent_epoch: 0,
        },
    )
    .unwrap();

    token_account
}

/// Overwrite a token account's balance
pub fn set_token_balance(svm: &mut LiteSVM, token_account: &Pubkey, balance: u64) {
    use token_account_offsets::AMOUNT;

    let mut account = svm
        .get_account(token_account)
        .expect("token account should exist");
    account.data[AMOUNT..AMOUNT + 8].copy_from_slice(&balance.to_le_bytes());
    svm.set_account(*token_account, account).unwrap();
}

/// Read a token account's balance
pub fn get_token_balance(svm: &LiteSVM, token_account: &Pubkey) -> u64 {
    use token_account_offsets::AMOUNT;

    let account = svm
        .get_account(token_account)
        .expect("token account should exist");
    u64::from_le_bytes(account.data[AMOUNT..AMOUNT + 8].try_into().unwrap())
}

/// Read a token account's delegate and delegated amount
pub fn get_token_delegate(svm: &LiteSVM, token_account: &Pubkey) -> Option<(Pubkey, u64)> {
    use token_account_offsets::{DELEGATE, DELEGATED_AMOUNT};

    let account = svm
        .get_account(token_account)
        .expect("token account should exist");
    let data = &account.data;
    if data[DELEGATE..DELEGATE + 4] == [0, 0, 0, 0] {
        return None;
    }
    let delegate: [u8; 32] = data[DELEGATE + 4..DELEGATE + 36].try_into().unwrap();
    let amount = u64::from_le_bytes(data[DELEGATED_AMOUNT..DELEGATED_AMOUNT + 8].try_into().unwrap());
    Some((Pubkey::new_from_array(delegate), amount))
}

/// Write a staking layer position owned by `program`
pub fn set_position(
    svm: &mut LiteSVM,
    position: &Pubkey,
    program: &Pubkey,
    staker: &Pubkey,
    amount: u64,
) {
    let data = StakePosition {
        owner: staker.to_bytes(),
        amount,
        reward_debt: 0,
    };
    set_raw_position(svm, position, program, bytemuck::bytes_of(&data).to_vec());
}

/// Write arbitrary position account data owned by `program`
pub fn set_raw_position(svm: &mut LiteSVM, position: &Pubkey, program: &Pubkey, data: Vec<u8>) {
    svm.set_account(
        *position,
        Account {
            lamports: 1_000_000_000,
            data,
            owner: *program,
            executable: false,
            rent_epoch: 0,
        },
    )
    .unwrap();
}

/// Read the strategy config account
pub fn read_config(svm: &LiteSVM, strategy: &Pubkey) -> StrategyConfig {
    let account = svm
        .get_account(strategy)
        .expect("strategy config should exist");
    StrategyConfig::from_account_data(&account.data).unwrap()
}

/// Whether the strategy config account was never created
pub fn strategy_missing(svm: &LiteSVM, strategy: &Pubkey) -> bool {
    svm.get_account(strategy)
        .is_none_or(|account| account.data.is_empty())
}
