//! Program IDs for the autocompound strategy.
//!
//! IDs are `&'static str` constants so they can be decoded at compile time
//! with `five8_const::decode_32_const` by any crate that needs a `Pubkey`.
//!
//! # Feature Flags
//!
//! - `devnet` - Use devnet program IDs
//! - `mainnet` - Use mainnet program IDs (default)
//! - `localnet` - Use localnet program IDs (same as mainnet)

#![no_std]

// =============================================================================
// Autocompound Strategy Program ID
// =============================================================================

/// Autocompound strategy program ID (devnet).
#[cfg(feature = "devnet")]
pub const STRATEGY_ID: &str = "AfWpKqappLTghhxNTSF4UpWCcy5v5pPxvD6yP8gpbHgz";

/// Autocompound strategy program ID (mainnet/localnet).
#[cfg(not(feature = "devnet"))]
pub const STRATEGY_ID: &str = "DjGGYpoC5piY1M72hEHYcYNWkXWny3JHRTzzXNRnpm3c";
