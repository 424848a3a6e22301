use soroban_fixed_point_math::FixedPoint;
use soroban_sdk::{contracttype, panic_with_error, token, unwrap::UnwrapOptimized, Address, Env};
use yield_interface::{constants::SCALAR_7, CdpClient, CollateralPosition};

use crate::{
    errors::StrategyError,
    events::{MinRatioKept, MinRatioUpdated},
    math, storage,
};

/// Collateralized-debt parameters. Ratios are whole percentage points.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct CollateralConfig {
    pub cdp: Address,
    /// External vault the borrowed debt asset is parked in
    pub debt_vault: Address,
    pub router: Address,
    pub min_ratio: u32,
    /// Extra headroom above `min_ratio` targeted when borrowing (bps)
    pub ratio_buffer_bps: u32,
    /// Minimum quoted want for a surplus debt swap to go through
    pub min_swap_out: i128,
    pub slippage_bps: u32,
}

/// Capability for strategies that borrow a debt asset against want
/// deposited as collateral.
pub trait CollateralRatioKeeper {
    fn collateral_config(e: &Env) -> CollateralConfig;

    fn set_collateral_config(e: &Env, config: &CollateralConfig);

    /// Makes up to `amount` more of the debt asset idle; returns what was freed
    fn free_debt_asset(e: &Env, amount: i128) -> i128;

    fn debt_token(e: &Env) -> Address {
        CdpClient::new(e, &Self::collateral_config(e).cdp).debt_token()
    }

    fn idle_debt_balance(e: &Env) -> i128 {
        token::Client::new(e, &Self::debt_token(e)).balance(&e.current_contract_address())
    }

    fn current_ratio(e: &Env) -> u32 {
        CdpClient::new(e, &Self::collateral_config(e).cdp)
            .current_ratio(&e.current_contract_address())
    }

    /// Ratio the strategy borrows up to
    fn target_ratio(e: &Env) -> u32 {
        let config = Self::collateral_config(e);
        math::buffered_ratio(config.min_ratio, config.ratio_buffer_bps)
    }

    /// Debt-denominated value of `collateral`
    fn collateral_value(e: &Env, collateral: i128) -> i128 {
        let price = CdpClient::new(e, &Self::collateral_config(e).cdp).price();
        collateral.fixed_mul_floor(price, SCALAR_7).unwrap_optimized()
    }

    fn keep_min_ratio_mayday(e: &Env) -> bool {
        Self::current_ratio(e) < Self::collateral_config(e).min_ratio
    }

    /// Debt that must be repaid to restore `min_ratio`
    fn required_repayment(e: &Env) -> i128 {
        let config = Self::collateral_config(e);
        let account = CdpClient::new(e, &config.cdp).position(&e.current_contract_address());
        if account.debt == 0 {
            return 0;
        }
        let collateral_value = Self::collateral_value(e, account.collateral);
        let allowed_debt = math::max_debt_for_ratio(collateral_value, config.min_ratio);
        (account.debt - allowed_debt).max(0)
    }

    /// Pushes `amount` of idle debt asset to the CDP and repays it
    fn repay_debt(e: &Env, amount: i128) {
        if amount <= 0 {
            return;
        }
        let cdp = Self::collateral_config(e).cdp;
        let me = e.current_contract_address();
        token::Client::new(e, &Self::debt_token(e)).transfer(&me, &cdp, &amount);
        CdpClient::new(e, &cdp).repay(&me, &amount);
    }

    /// Repays exactly what restores `min_ratio`, or as much as the debt asset
    /// on hand allows. Returns the amount repaid.
    fn keep_min_ratio(e: &Env) -> i128 {
        let required = Self::required_repayment(e);
        if required <= 0 {
            return 0;
        }
        let idle = Self::idle_debt_balance(e);
        if idle < required {
            Self::free_debt_asset(e, required - idle);
        }
        let repaid = required.min(Self::idle_debt_balance(e));
        Self::repay_debt(e, repaid);

        MinRatioKept {
            repaid,
            ratio: Self::current_ratio(e),
        }
        .publish(e);
        repaid
    }

    fn set_min_ratio(e: &Env, min_ratio: u32) {
        let mut config = Self::collateral_config(e);
        if min_ratio < CdpClient::new(e, &config.cdp).liquidation_ratio() {
            panic_with_error!(e, StrategyError::InvalidRatio);
        }
        config.min_ratio = min_ratio;
        Self::set_collateral_config(e, &config);
        MinRatioUpdated { min_ratio }.publish(e);
    }

    fn collateral_position(e: &Env) -> CollateralPosition {
        let config = Self::collateral_config(e);
        let cdp = CdpClient::new(e, &config.cdp);
        let account = cdp.position(&e.current_contract_address());
        CollateralPosition {
            collateral_asset: storage::get_want(e),
            debt_asset: cdp.debt_token(),
            collateral: account.collateral,
            debt: account.debt,
            current_ratio: cdp.current_ratio(&e.current_contract_address()),
            min_ratio: config.min_ratio,
        }
    }
}
