//! Capital routing between idle balance and the two staking layers.

use compounder_interface::calculate_withdrawal_output;
use pinocchio::program_error::ProgramError;

use crate::{
    StrategyError,
    host::StrategyHost,
    ledger::{Asset, Payee},
    stake::{self, Layer},
};

/// Outcome of [`satisfy`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Release {
    /// Amount the vault asked for
    pub requested: u64,
    /// Amount released, capped to what was available
    pub released: u64,
    /// Withdrawal fee kept idle
    pub fee: u64,
    /// Amount transferred to the vault
    pub net: u64,
}

/// Free up to `requested` base asset and send it to the vault, net of the
/// withdrawal fee.
///
/// Unstaking happens only when idle falls short:
///
/// 1. layer 2 gives back the shortfall not already covered by idle and
///    loose receipts, capped to its position
/// 2. layer 1 takes back `min(receipts, requested)`, capped to its position
/// 3. the release is `min(idle, requested)`
///
/// A request above the claimable total is filled partially. The fee stays in
/// the idle balance and is compounded by the next deposit or harvest.
pub fn satisfy<H: StrategyHost>(
    host: &mut H,
    requested: u64,
    withdrawal_fee: u16,
) -> Result<Release, ProgramError> {
    if requested == 0 {
        return Ok(Release::default());
    }

    let idle = host.balance_of(Asset::Base)?;
    if idle < requested {
        let loose = host.balance_of(Asset::Receipt)?;
        let needed = requested.saturating_sub(idle).saturating_sub(loose);
        let staked = stake::position_size(host, Layer::Secondary)?;
        stake::unstake(host, Layer::Secondary, needed.min(staked))?;

        let receipts = host.balance_of(Asset::Receipt)?;
        let principal = stake::position_size(host, Layer::Intermediate)?;
        stake::unstake(
            host,
            Layer::Intermediate,
            receipts.min(requested).min(principal),
        )?;
    }

    let released = host.balance_of(Asset::Base)?.min(requested);
    let (net, fee) = calculate_withdrawal_output(released, withdrawal_fee)
        .ok_or(StrategyError::ArithmeticOverflow)?;
    if net > 0 {
        host.transfer(Asset::Base, Payee::Vault, net)?;
    }

    Ok(Release {
        requested,
        released,
        fee,
        net,
    })
}

/// Stake the whole idle balance into layer 1, then every receipt into
/// layer 2.
///
/// Returns the base asset staked; zero idle makes no calls.
pub fn reinvest_all<H: StrategyHost>(host: &mut H) -> Result<u64, ProgramError> {
    let idle = host.balance_of(Asset::Base)?;
    if idle == 0 {
        return Ok(0);
    }

    stake::stake(host, Layer::Intermediate, idle)?;
    let receipts = host.balance_of(Asset::Receipt)?;
    stake::stake(host, Layer::Secondary, receipts)?;
    Ok(idle)
}
