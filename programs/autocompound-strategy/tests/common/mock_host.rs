//! In-memory collaborators for driving the strategy without a validator.
//!
//! Layer 1 mints receipts 1:1 and pays its pending reward in the base asset
//! on every `enter`/`leave`. Layer 2 pays its pending reward in the reward
//! token on every `deposit`/`withdraw`; the emergency path forfeits it.

use autocompound_strategy::{
    host::StrategyHost,
    ledger::{Asset, Payee, TokenLedger, TokenTransfers},
    routes::SwapRouter,
    stake::{IntermediateLayer, SecondaryLayer},
};
use compounder_interface::{StakePosition, SwapExactInParams};
use pinocchio::{ProgramResult, program_error::ProgramError, pubkey::Pubkey};

/// Router rejects a swap whose deadline has passed
pub const ROUTER_EXPIRED: u32 = 9_001;
/// Router rejects a swap that exceeds its allowance
pub const ROUTER_NOT_APPROVED: u32 = 9_002;
/// Router output fell below `min_out`
pub const ROUTER_SLIPPAGE: u32 = 9_003;
/// Router is down
pub const ROUTER_UNAVAILABLE: u32 = 9_004;

/// One collaborator call, in the order it was made.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Transfer { asset: Asset, to: Payee, amount: u64 },
    Allowance { asset: Asset, amount: u64 },
    Swap { from: Asset, amount_in: u64, min_out: u64, deadline: i64, hops: Vec<Pubkey>, recipient: Payee },
    Enter(u64),
    Leave(u64),
    Deposit(u64),
    Withdraw(u64),
    EmergencyWithdraw,
}

/// Token balances held by one owner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Balances {
    pub base: u64,
    pub receipt: u64,
    pub reward: u64,
    pub routing: u64,
}

impl Balances {
    pub fn get(&self, asset: Asset) -> u64 {
        match asset {
            Asset::Base => self.base,
            Asset::Receipt => self.receipt,
            Asset::Reward => self.reward,
            Asset::Routing => self.routing,
        }
    }

    pub fn get_mut(&mut self, asset: Asset) -> &mut u64 {
        match asset {
            Asset::Base => &mut self.base,
            Asset::Receipt => &mut self.receipt,
            Asset::Reward => &mut self.reward,
            Asset::Routing => &mut self.routing,
        }
    }
}

/// Amounts received by every external payee.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Payouts {
    pub vault: u64,
    pub harvest_caller: u64,
    pub treasury: u64,
    pub treasury_fee_token: u64,
    pub reward_pool: u64,
    pub partner_dao: u64,
}

/// In-memory [`StrategyHost`].
#[derive(Clone, Debug)]
pub struct MockHost {
    /// Current unix timestamp
    pub now: i64,
    /// Strategy token balances
    pub strategy: Balances,
    /// External payee balances
    pub payouts: Payouts,
    /// Router allowance per strategy asset
    pub allowances: Balances,
    /// Layer 1 principal
    pub intermediate: u64,
    /// Layer 2 principal
    pub secondary: u64,
    /// Base asset layer 1 pays on the next position change
    pub intermediate_pending: u64,
    /// Reward layer 2 pays on the next position change
    pub secondary_pending: u64,
    /// Swap output per 10_000 units in
    pub swap_rate_bps: u64,
    /// Fail every swap
    pub router_down: bool,
    /// Every collaborator call
    pub calls: Vec<Call>,
}

impl Default for MockHost {
    fn default() -> Self {
        Self {
            now: 1_700_000_000,
            strategy: Balances::default(),
            payouts: Payouts::default(),
            allowances: Balances::default(),
            intermediate: 0,
            secondary: 0,
            intermediate_pending: 0,
            secondary_pending: 0,
            swap_rate_bps: 10_000,
            router_down: false,
            calls: Vec::new(),
        }
    }
}

fn insufficient() -> ProgramError {
    ProgramError::InsufficientFunds
}

impl MockHost {
    /// Host holding `idle` base asset with router allowances granted.
    pub fn with_idle(idle: u64) -> Self {
        let mut host = Self::default();
        host.strategy.base = idle;
        host.allowances.reward = u64::MAX;
        host.allowances.routing = u64::MAX;
        host
    }

    /// Claimable capital computed straight from the simulated collaborators.
    pub fn independent_total(&self) -> u64 {
        self.strategy.base + self.intermediate
    }

    /// Forget every recorded call.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Recorded swaps.
    pub fn swaps(&self) -> Vec<&Call> {
        self.calls
            .iter()
            .filter(|call| matches!(call, Call::Swap { .. }))
            .collect()
    }

    /// Whether any call moved principal in or out of a layer.
    pub fn touched_layers(&self) -> bool {
        self.calls.iter().any(|call| {
            matches!(
                call,
                Call::Enter(amount) | Call::Leave(amount) | Call::Deposit(amount) | Call::Withdraw(amount)
                    if *amount > 0
            ) || matches!(call, Call::EmergencyWithdraw)
        })
    }

    fn debit(&mut self, asset: Asset, amount: u64) -> ProgramResult {
        let balance = self.strategy.get_mut(asset);
        *balance = balance.checked_sub(amount).ok_or_else(insufficient)?;
        Ok(())
    }

    fn credit(&mut self, payee: Payee, asset: Asset, amount: u64) {
        let slot = match payee {
            Payee::Strategy(held) => self.strategy.get_mut(held),
            Payee::Vault => {
                assert_eq!(asset, Asset::Base, "vault only takes the base asset");
                &mut self.payouts.vault
            }
            Payee::HarvestCaller => &mut self.payouts.harvest_caller,
            Payee::Treasury => &mut self.payouts.treasury,
            Payee::TreasuryFeeToken => &mut self.payouts.treasury_fee_token,
            Payee::RewardPool => &mut self.payouts.reward_pool,
            Payee::PartnerDao => &mut self.payouts.partner_dao,
        };
        *slot += amount;
    }

    fn pay_intermediate_reward(&mut self) {
        self.strategy.base += core::mem::take(&mut self.intermediate_pending);
    }

    fn pay_secondary_reward(&mut self) {
        self.strategy.reward += core::mem::take(&mut self.secondary_pending);
    }
}

impl TokenLedger for MockHost {
    fn balance_of(&self, asset: Asset) -> Result<u64, ProgramError> {
        Ok(self.strategy.get(asset))
    }
}

impl TokenTransfers for MockHost {
    fn transfer(&mut self, asset: Asset, to: Payee, amount: u64) -> ProgramResult {
        self.calls.push(Call::Transfer { asset, to, amount });
        self.debit(asset, amount)?;
        self.credit(to, asset, amount);
        Ok(())
    }

    fn set_router_allowance(&mut self, asset: Asset, amount: u64) -> ProgramResult {
        self.calls.push(Call::Allowance { asset, amount });
        *self.allowances.get_mut(asset) = amount;
        Ok(())
    }
}

impl SwapRouter for MockHost {
    fn swap_exact_in(
        &mut self,
        from: Asset,
        params: &SwapExactInParams,
        recipient: Payee,
    ) -> ProgramResult {
        self.calls.push(Call::Swap {
            from,
            amount_in: params.amount_in,
            min_out: params.min_out,
            deadline: params.deadline,
            hops: params.hops[..params.hop_count as usize].to_vec(),
            recipient,
        });

        if self.router_down {
            return Err(ProgramError::Custom(ROUTER_UNAVAILABLE));
        }
        if self.now > params.deadline {
            return Err(ProgramError::Custom(ROUTER_EXPIRED));
        }
        let allowance = self.allowances.get_mut(from);
        if *allowance < params.amount_in {
            return Err(ProgramError::Custom(ROUTER_NOT_APPROVED));
        }
        *allowance -= params.amount_in;

        let out = (params.amount_in as u128 * self.swap_rate_bps as u128 / 10_000) as u64;
        if out < params.min_out {
            return Err(ProgramError::Custom(ROUTER_SLIPPAGE));
        }

        self.debit(from, params.amount_in)?;
        let delivered = match recipient {
            Payee::Strategy(asset) => asset,
            _ => Asset::Routing,
        };
        self.credit(recipient, delivered, out);
        Ok(())
    }
}

impl IntermediateLayer for MockHost {
    fn enter(&mut self, amount: u64) -> ProgramResult {
        self.calls.push(Call::Enter(amount));
        self.debit(Asset::Base, amount)?;
        self.pay_intermediate_reward();
        self.intermediate += amount;
        self.strategy.receipt += amount;
        Ok(())
    }

    fn leave(&mut self, amount: u64) -> ProgramResult {
        self.calls.push(Call::Leave(amount));
        if amount > self.intermediate {
            return Err(insufficient());
        }
        self.debit(Asset::Receipt, amount)?;
        self.pay_intermediate_reward();
        self.intermediate -= amount;
        self.strategy.base += amount;
        Ok(())
    }

    fn intermediate_position(&self) -> Result<StakePosition, ProgramError> {
        Ok(StakePosition {
            amount: self.intermediate,
            ..StakePosition::default()
        })
    }
}

impl SecondaryLayer for MockHost {
    fn deposit(&mut self, amount: u64) -> ProgramResult {
        self.calls.push(Call::Deposit(amount));
        self.debit(Asset::Receipt, amount)?;
        self.pay_secondary_reward();
        self.secondary += amount;
        Ok(())
    }

    fn withdraw(&mut self, amount: u64) -> ProgramResult {
        self.calls.push(Call::Withdraw(amount));
        if amount > self.secondary {
            return Err(insufficient());
        }
        self.pay_secondary_reward();
        self.secondary -= amount;
        self.strategy.receipt += amount;
        Ok(())
    }

    fn emergency_withdraw_all(&mut self) -> ProgramResult {
        self.calls.push(Call::EmergencyWithdraw);
        self.secondary_pending = 0;
        self.strategy.receipt += core::mem::take(&mut self.secondary);
        Ok(())
    }

    fn secondary_position(&self) -> Result<StakePosition, ProgramError> {
        Ok(StakePosition {
            amount: self.secondary,
            ..StakePosition::default()
        })
    }
}

impl StrategyHost for MockHost {
    fn unix_timestamp(&self) -> Result<i64, ProgramError> {
        Ok(self.now)
    }
}
