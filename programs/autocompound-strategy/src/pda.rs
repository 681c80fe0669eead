//! Program Derived Address (PDA) helpers
//!
//! One strategy config per vault, seeds `["strategy", vault]`. The config PDA
//! is also the authority over every strategy token account and staking
//! position.

use pinocchio::{instruction::Seed, pubkey::Pubkey};

/// Seed prefix of the strategy config PDA
pub const STRATEGY_SEED: &[u8] = b"strategy";

/// Derive the strategy config PDA and bump for a vault.
pub fn find_strategy_pda(vault: &Pubkey) -> (Pubkey, u8) {
    pinocchio::pubkey::find_program_address(&[STRATEGY_SEED, vault.as_ref()], &crate::ID)
}

/// Signer seeds for the strategy config PDA.
pub fn gen_strategy_seeds<'a>(vault: &'a Pubkey, bump: &'a [u8; 1]) -> [Seed<'a>; 3] {
    [
        Seed::from(STRATEGY_SEED),
        Seed::from(vault.as_ref()),
        Seed::from(bump.as_ref()),
    ]
}
