//! Two-step ownership transfer helpers.
//!
//! The owner nominates a successor with `transfer_ownership_impl`; the role only
//! moves once the successor signs `accept_ownership_impl`. A mistyped address
//! therefore can never lock the owner-only operations.
//!
//! # Example
//!
//! ```ignore
//! impl HasOwner for StrategyConfig {
//!     fn owner(&self) -> &Pubkey { &self.owner }
//!     fn owner_mut(&mut self) -> &mut Pubkey { &mut self.owner }
//!     fn pending_owner(&self) -> &Pubkey { &self.pending_owner }
//!     fn pending_owner_mut(&mut self) -> &mut Pubkey { &mut self.pending_owner }
//! }
//! ```

use pinocchio::{program_error::ProgramError, pubkey::Pubkey};

/// Trait for config types that support two-step ownership transfer.
pub trait HasOwner {
    /// Get the current owner pubkey.
    fn owner(&self) -> &Pubkey;
    /// Get mutable reference to owner pubkey.
    fn owner_mut(&mut self) -> &mut Pubkey;
    /// Get the pending owner pubkey.
    fn pending_owner(&self) -> &Pubkey;
    /// Get mutable reference to pending owner pubkey.
    fn pending_owner_mut(&mut self) -> &mut Pubkey;
}

/// Nominate `new_owner` as pending owner.
///
/// # Returns
/// * `Ok(())` if the transfer was initiated
/// * `Err(ProgramError::IllegalOwner)` if signer is not the current owner
#[inline]
pub fn transfer_ownership_impl<T: HasOwner>(
    config: &mut T,
    signer: &Pubkey,
    new_owner: &Pubkey,
) -> Result<(), ProgramError> {
    if config.owner() != signer {
        return Err(ProgramError::IllegalOwner);
    }

    *config.pending_owner_mut() = *new_owner;

    Ok(())
}

/// Complete the transfer by moving the pending owner into the owner slot.
///
/// # Returns
/// * `Ok(())` if the transfer was completed
/// * `Err(ProgramError::UninitializedAccount)` if no pending owner is set
/// * `Err(ProgramError::IllegalOwner)` if signer is not the pending owner
#[inline]
pub fn accept_ownership_impl<T: HasOwner>(
    config: &mut T,
    signer: &Pubkey,
) -> Result<(), ProgramError> {
    if *config.pending_owner() == Pubkey::default() {
        return Err(ProgramError::UninitializedAccount);
    }

    if config.pending_owner() != signer {
        return Err(ProgramError::IllegalOwner);
    }

    *config.owner_mut() = *config.pending_owner();
    *config.pending_owner_mut() = Pubkey::default();

    Ok(())
}
