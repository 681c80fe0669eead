//! Swap routes used by the harvest cycle.

use bytemuck::{Pod, Zeroable};
use compounder_interface::{MAX_ROUTE_HOPS, SwapExactInParams};
use pinocchio::{ProgramResult, pubkey::Pubkey};

use crate::{StrategyError, ledger::{Asset, Payee}};

/// Ordered asset path for one swap, source first and destination last.
///
/// Stored inline in the strategy config, so the capacity is fixed at
/// `MAX_ROUTE_HOPS`. Only `hops[..len]` is meaningful.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct RouteSpec {
    /// Asset mints along the path
    pub hops: [Pubkey; MAX_ROUTE_HOPS],
    /// Number of valid entries in `hops`
    pub len: u8,
    /// Padding
    pub _padding: [u8; 7],
}

impl RouteSpec {
    /// Build a route from a path of 2 to `MAX_ROUTE_HOPS` assets.
    pub fn new(path: &[Pubkey]) -> Result<Self, StrategyError> {
        if path.len() < 2 || path.len() > MAX_ROUTE_HOPS {
            return Err(StrategyError::InvalidRoute);
        }
        let mut hops = [Pubkey::default(); MAX_ROUTE_HOPS];
        hops[..path.len()].copy_from_slice(path);
        Ok(Self {
            hops,
            len: path.len() as u8,
            _padding: [0; 7],
        })
    }

    /// The valid part of the path.
    pub fn path(&self) -> &[Pubkey] {
        let len = (self.len as usize).min(MAX_ROUTE_HOPS);
        &self.hops[..len]
    }

    /// Source asset.
    pub fn source(&self) -> Option<&Pubkey> {
        self.path().first()
    }

    /// Destination asset.
    pub fn destination(&self) -> Option<&Pubkey> {
        self.path().last()
    }

    /// Check the route is well formed and connects `from` to `to`.
    pub fn validate(&self, from: &Pubkey, to: &Pubkey) -> Result<(), StrategyError> {
        let len = self.len as usize;
        if !(2..=MAX_ROUTE_HOPS).contains(&len) {
            return Err(StrategyError::InvalidRoute);
        }
        if self.source() != Some(from) || self.destination() != Some(to) {
            return Err(StrategyError::InvalidRoute);
        }
        Ok(())
    }

    /// Router parameters for swapping `amount_in` along this route.
    pub fn to_swap_params(&self, amount_in: u64, min_out: u64, deadline: i64) -> SwapExactInParams {
        SwapExactInParams {
            amount_in,
            min_out,
            deadline,
            hop_count: self.len,
            _padding: [0; 7],
            hops: self.hops,
        }
    }
}

/// The swaps the strategy performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteIntent {
    /// Compound the remaining reward balance back into the base asset
    RewardToBase,
    /// Sell the harvest slice into the routing asset
    RewardToRouting,
    /// Convert half of the treasury share into the treasury fee token
    RoutingToTreasuryToken,
    /// Convert the partner share into the partner DAO token
    RoutingToPartnerToken,
}

/// Static route configuration, one route per [`RouteIntent`].
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct RouteTable {
    /// reward → base
    pub reward_to_base: RouteSpec,
    /// reward → routing asset
    pub reward_to_routing: RouteSpec,
    /// routing asset → treasury fee token
    pub routing_to_treasury_token: RouteSpec,
    /// routing asset → partner DAO token
    pub routing_to_partner_token: RouteSpec,
}

/// Mints a [`RouteTable`] must connect.
#[derive(Clone, Copy, Debug)]
pub struct RouteEndpoints<'a> {
    /// Base asset mint
    pub base: &'a Pubkey,
    /// Reward asset mint
    pub reward: &'a Pubkey,
    /// Routing asset mint
    pub routing: &'a Pubkey,
    /// Treasury fee token mint
    pub treasury_token: &'a Pubkey,
    /// Partner DAO token mint
    pub partner_token: &'a Pubkey,
}

impl RouteTable {
    /// Route for an intent.
    pub fn route(&self, intent: RouteIntent) -> &RouteSpec {
        match intent {
            RouteIntent::RewardToBase => &self.reward_to_base,
            RouteIntent::RewardToRouting => &self.reward_to_routing,
            RouteIntent::RoutingToTreasuryToken => &self.routing_to_treasury_token,
            RouteIntent::RoutingToPartnerToken => &self.routing_to_partner_token,
        }
    }

    /// Check every route connects the assets its intent names.
    pub fn validate(&self, endpoints: &RouteEndpoints) -> Result<(), StrategyError> {
        self.reward_to_base
            .validate(endpoints.reward, endpoints.base)?;
        self.reward_to_routing
            .validate(endpoints.reward, endpoints.routing)?;
        self.routing_to_treasury_token
            .validate(endpoints.routing, endpoints.treasury_token)?;
        self.routing_to_partner_token
            .validate(endpoints.routing, endpoints.partner_token)?;
        Ok(())
    }
}

/// Exact-input swap facility.
pub trait SwapRouter {
    /// Sell `params.amount_in` of the strategy's `from` balance along
    /// `params.hops`, delivering the output to `recipient`.
    ///
    /// The router fails if the output is below `params.min_out` or the
    /// current time is past `params.deadline`.
    fn swap_exact_in(
        &mut self,
        from: Asset,
        params: &SwapExactInParams,
        recipient: Payee,
    ) -> ProgramResult;
}
