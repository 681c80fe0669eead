//! Compounder Interface
//!
//! Shared types between the autocompound strategy and the programs it drives.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    vault (owner of the claim)                 │
//! │  • withdraw / retire                                          │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    autocompound-strategy                      │
//! │  • reconciliation (withdraw routing)                          │
//! │  • harvest → fee split → reinvest                             │
//! │  • pause / panic / retire                                     │
//! └──────────────────────────────────────────────────────────────┘
//!        │                      │                       │
//!        ▼                      ▼                       ▼
//! ┌──────────────┐   ┌────────────────────┐   ┌────────────────────┐
//! │ swap router  │   │ intermediate layer │   │  secondary layer   │
//! │ exact-in     │   │ base → receipt     │   │ receipt → reward   │
//! └──────────────┘   └────────────────────┘   └────────────────────┘
//! ```
//!
//! # Fee Calculation
//!
//! Every fee is a floor of `balance × numerator / denominator` computed in
//! `u128`, so no share can ever exceed the balance it was taken from.
//!
//! # Modules
//!
//! - [`types`]: Fee constants and math, collaborator position layouts
//! - [`cpi`]: Instruction layouts for the router and both staking layers
//! - [`authority`]: Two-step ownership transfer helpers
//! - [`strategy`]: Instruction layouts for calling the strategy

#![no_std]

pub mod authority;
mod cpi;
pub mod strategy;
mod types;

pub use cpi::*;
pub use types::*;

use pinocchio::pubkey::Pubkey;

/// Autocompound strategy program ID for the selected network.
pub const STRATEGY_PROGRAM_ID: Pubkey =
    five8_const::decode_32_const(compounder_program_ids::STRATEGY_ID);
