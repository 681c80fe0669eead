//! Public operation surface: capital flows and safety-mode transitions.
//!
//! The controller works on a copy of the config so collaborator calls never
//! race a borrow of the config account; the caller stores it back once the
//! operation succeeds.

use pinocchio::{program_error::ProgramError, pubkey::Pubkey};

use crate::{
    StrategyError,
    fees::{self, FeeSplit},
    host::{Caller, StrategyHost},
    ledger::{Asset, CapitalPool, Payee},
    reconcile::{self, Release},
    stake::{self, Layer},
    state::StrategyConfig,
};

/// Assets the router may spend while the strategy is active.
const ROUTED_ASSETS: [Asset; 2] = [Asset::Reward, Asset::Routing];

/// Result of a completed harvest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HarvestReport {
    /// Fee distribution
    pub split: FeeSplit,
    /// Base asset restaked afterwards
    pub reinvested: u64,
    /// Claimable capital after the harvest
    pub pool: CapitalPool,
}

/// Drives the strategy against a [`StrategyHost`].
pub struct LifecycleController<'a, H: StrategyHost> {
    config: &'a mut StrategyConfig,
    host: &'a mut H,
}

impl<'a, H: StrategyHost> LifecycleController<'a, H> {
    /// Wrap a config and the host it runs against.
    pub fn new(config: &'a mut StrategyConfig, host: &'a mut H) -> Self {
        Self { config, host }
    }

    /// Current config.
    pub fn config(&self) -> &StrategyConfig {
        self.config
    }

    /// Claimable capital, read fresh from the ledger and both layers.
    pub fn balance_of(&self) -> Result<CapitalPool, ProgramError> {
        stake::capital_pool(&*self.host)
    }

    /// Stake every idle base asset into layer 1 and the receipts into layer 2.
    ///
    /// Returns the base asset staked.
    pub fn deposit(&mut self) -> Result<u64, ProgramError> {
        self.config.require_active()?;

        let staked = reconcile::reinvest_all(self.host)?;
        self.record_compounded(staked)?;
        Ok(staked)
    }

    /// Release up to `amount` to the vault. Allowed in every state.
    pub fn withdraw(&mut self, caller: &Pubkey, amount: u64) -> Result<Release, ProgramError> {
        self.config.require_vault(caller)?;

        let release = reconcile::satisfy(self.host, amount, self.config.fees.withdrawal_fee)?;

        self.config.total_withdrawn = self
            .config
            .total_withdrawn
            .checked_add(release.released)
            .ok_or(StrategyError::ArithmeticOverflow)?;
        self.config.total_withdrawal_fees = self
            .config
            .total_withdrawal_fees
            .checked_add(release.fee)
            .ok_or(StrategyError::ArithmeticOverflow)?;

        Ok(release)
    }

    /// Claim rewards from both layers, split the fees and restake the rest.
    pub fn harvest(&mut self, caller: &Caller) -> Result<HarvestReport, ProgramError> {
        self.config.require_active()?;
        if caller.is_contract() {
            return Err(StrategyError::ContractCaller.into());
        }

        stake::harvest_only(self.host, Layer::Secondary)?;
        stake::harvest_only(self.host, Layer::Intermediate)?;

        let split = fees::split(self.host, &self.config.routes, &self.config.fees)?;
        let reinvested = reconcile::reinvest_all(self.host)?;
        self.record_compounded(reinvested)?;

        self.config.harvest_count = self
            .config
            .harvest_count
            .checked_add(1)
            .ok_or(StrategyError::ArithmeticOverflow)?;
        self.config.last_harvest_timestamp = self.host.unix_timestamp()?;

        Ok(HarvestReport {
            split,
            reinvested,
            pool: self.balance_of()?,
        })
    }

    /// Pause and revoke the router's allowances.
    pub fn pause(&mut self, caller: &Pubkey) -> Result<(), ProgramError> {
        self.config.require_owner(caller)?;
        if self.config.is_paused() {
            return Err(StrategyError::StrategyPaused.into());
        }

        self.enter_paused()
    }

    /// Resume and re-grant the router's allowances.
    pub fn unpause(&mut self, caller: &Pubkey) -> Result<(), ProgramError> {
        self.config.require_owner(caller)?;
        if !self.config.is_paused() {
            return Err(StrategyError::StrategyNotPaused.into());
        }
        if self.config.is_retired() {
            return Err(StrategyError::StrategyRetired.into());
        }

        self.grant_router_allowances()?;
        self.config.set_paused(false);
        Ok(())
    }

    /// Let the router spend the reward and routing balances.
    pub fn grant_router_allowances(&mut self) -> Result<(), ProgramError> {
        for asset in ROUTED_ASSETS {
            self.host.set_router_allowance(asset, u64::MAX)?;
        }
        Ok(())
    }

    /// Pause, then pull everything out of both layers through the emergency
    /// path. Pending layer 2 rewards are forfeited and funds stay idle.
    ///
    /// Returns the claimable capital afterwards.
    pub fn panic(&mut self, caller: &Pubkey) -> Result<CapitalPool, ProgramError> {
        self.config.require_owner(caller)?;

        if !self.config.is_paused() {
            self.enter_paused()?;
        }
        stake::emergency_unstake_all(self.host)?;
        self.balance_of()
    }

    /// Unwind both layers and send the whole base balance to the vault, then
    /// revoke the router's allowances. Allowed in every state; capital
    /// operations stay closed afterwards.
    ///
    /// Returns the amount sent to the vault.
    pub fn retire(&mut self, caller: &Pubkey) -> Result<u64, ProgramError> {
        self.config.require_vault(caller)?;

        stake::emergency_unstake_all(self.host)?;
        let returned = self.host.balance_of(Asset::Base)?;
        if returned > 0 {
            self.host.transfer(Asset::Base, Payee::Vault, returned)?;
        }
        if !self.config.is_paused() {
            self.revoke_router_allowances()?;
        }
        self.config.is_retired = 1;
        Ok(returned)
    }

    fn enter_paused(&mut self) -> Result<(), ProgramError> {
        self.revoke_router_allowances()?;
        self.config.set_paused(true);
        Ok(())
    }

    fn revoke_router_allowances(&mut self) -> Result<(), ProgramError> {
        for asset in ROUTED_ASSETS {
            self.host.set_router_allowance(asset, 0)?;
        }
        Ok(())
    }

    fn record_compounded(&mut self, amount: u64) -> Result<(), StrategyError> {
        self.config.total_compounded = self
            .config
            .total_compounded
            .checked_add(amount)
            .ok_or(StrategyError::ArithmeticOverflow)?;
        Ok(())
    }
}
