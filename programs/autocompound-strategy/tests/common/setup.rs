//! Strategy configs and pre-built states for tests.

use autocompound_strategy::{
    StrategyConfig,
    fees::FeeSchedule,
    host::Caller,
    lifecycle::LifecycleController,
    routes::{RouteSpec, RouteTable},
};
use bytemuck::Zeroable;
use pinocchio::pubkey::Pubkey;

use super::MockHost;

pub const OWNER: Pubkey = [0x0a; 32];
pub const VAULT: Pubkey = [0x0b; 32];
pub const KEEPER: Pubkey = [0x0c; 32];
pub const STRANGER: Pubkey = [0x0d; 32];

pub const BASE_MINT: Pubkey = [0x11; 32];
pub const REWARD_MINT: Pubkey = [0x12; 32];
pub const ROUTING_MINT: Pubkey = [0x13; 32];
pub const TREASURY_FEE_MINT: Pubkey = [0x14; 32];
pub const PARTNER_MINT: Pubkey = [0x15; 32];

/// Routes connecting the test mints; rewards compound through the routing asset.
pub fn route_table() -> RouteTable {
    RouteTable {
        reward_to_base: RouteSpec::new(&[REWARD_MINT, ROUTING_MINT, BASE_MINT]).unwrap(),
        reward_to_routing: RouteSpec::new(&[REWARD_MINT, ROUTING_MINT]).unwrap(),
        routing_to_treasury_token: RouteSpec::new(&[ROUTING_MINT, TREASURY_FEE_MINT]).unwrap(),
        routing_to_partner_token: RouteSpec::new(&[ROUTING_MINT, PARTNER_MINT]).unwrap(),
    }
}

/// Active strategy config with the default fee schedule.
pub fn strategy_config() -> StrategyConfig {
    strategy_config_with_fees(FeeSchedule::default())
}

/// Active strategy config with a custom fee schedule.
pub fn strategy_config_with_fees(fees: FeeSchedule) -> StrategyConfig {
    let mut config = StrategyConfig::zeroed();
    config.owner = OWNER;
    config.vault = VAULT;
    config.vault_token = [0x21; 32];
    config.base_mint = BASE_MINT;
    config.reward_mint = REWARD_MINT;
    config.routing_mint = ROUTING_MINT;
    config.treasury_fee_mint = TREASURY_FEE_MINT;
    config.partner_mint = PARTNER_MINT;
    config.routes = route_table();
    config.fees = fees;
    config.bump = 255;
    config
}

/// Strategy with `amount` deposited and fully staked.
pub fn deposited(amount: u64) -> (StrategyConfig, MockHost) {
    let mut config = strategy_config();
    let mut host = MockHost::with_idle(amount);
    LifecycleController::new(&mut config, &mut host)
        .deposit()
        .unwrap();
    host.clear_calls();
    (config, host)
}

/// Keeper signing a top-level transaction.
pub fn keeper() -> Caller {
    Caller::top_level(KEEPER)
}
