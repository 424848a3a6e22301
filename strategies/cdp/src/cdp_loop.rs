use soroban_fixed_point_math::FixedPoint;
use soroban_sdk::{token, unwrap::UnwrapOptimized, Address, Env};
use yield_interface::{constants::SCALAR_7, CdpClient, ExternalVaultClient, RouterClient};
use yield_strategy::{
    base, math, storage, swap, CollateralConfig, CollateralRatioKeeper, Position,
};

const MAX_DELEVERAGE_ROUNDS: u32 = 16;

/// Want posted as collateral, borrowed debt asset parked in the debt vault
pub struct CdpLoop;

impl CdpLoop {
    fn cdp(e: &Env) -> CdpClient<'_> {
        CdpClient::new(e, &Self::collateral_config(e).cdp)
    }

    fn debt_vault(e: &Env) -> ExternalVaultClient<'_> {
        ExternalVaultClient::new(e, &Self::collateral_config(e).debt_vault)
    }

    /// Idle debt asset plus the value of every debt vault share
    pub fn debt_holdings(e: &Env) -> i128 {
        let debt_vault = Self::debt_vault(e);
        let shares = debt_vault.balance(&e.current_contract_address());
        Self::idle_debt_balance(e) + math::share_value(shares, debt_vault.price_per_full_share())
    }

    /// Want-denominated value of a debt asset amount; rounds toward zero
    fn debt_in_want(amount: i128, price: i128) -> i128 {
        if price <= 0 {
            return 0;
        }
        amount.fixed_div_floor(price, SCALAR_7).unwrap_optimized()
    }

    /// Collateral left free to withdraw while keeping `ratio`
    fn withdrawable_collateral(e: &Env, ratio: u32) -> i128 {
        let cdp = Self::cdp(e);
        let account = cdp.position(&e.current_contract_address());
        if account.debt == 0 {
            return account.collateral;
        }
        let price = cdp.price();
        if price <= 0 {
            return 0;
        }
        let required = math::min_value_for_ratio(account.debt, ratio)
            .fixed_mul_ceil(SCALAR_7, price)
            .unwrap_optimized();
        (account.collateral - required).max(0)
    }

    /// Borrows up to the target ratio and parks the proceeds in the debt vault
    fn borrow_to_target(e: &Env) {
        let me = e.current_contract_address();
        let cdp = Self::cdp(e);
        let account = cdp.position(&me);
        let max_debt = math::max_debt_for_ratio(
            Self::collateral_value(e, account.collateral),
            Self::target_ratio(e),
        );
        let borrow = max_debt - account.debt;
        if borrow <= 0 {
            return;
        }
        cdp.mint(&me, &borrow);

        let debt_vault = Self::debt_vault(e);
        token::Client::new(e, &Self::debt_token(e)).transfer(&me, &debt_vault.address, &borrow);
        debt_vault.deposit(&me, &borrow);
    }

    fn exit_debt_vault(e: &Env) {
        let me = e.current_contract_address();
        let debt_vault = Self::debt_vault(e);
        let shares = debt_vault.balance(&me);
        if shares > 0 {
            debt_vault.withdraw(&me, &shares);
        }
    }

    /// Sells `amount` of idle debt asset for want. Fails closed.
    fn sell_debt_asset(e: &Env, amount: i128) -> i128 {
        let config = Self::collateral_config(e);
        swap::swap_exact_in(
            e,
            &config.router,
            &Self::debt_token(e),
            &storage::get_want(e),
            amount,
            config.min_swap_out,
            config.slippage_bps,
        )
    }

    /// Want the router asks for `amount` of the debt asset; 0 when it cannot quote
    fn want_for_debt(e: &Env, amount: i128) -> i128 {
        let config = Self::collateral_config(e);
        let quoted = match RouterClient::new(e, &config.router).try_quote(
            &storage::get_want(e),
            &Self::debt_token(e),
            &amount,
        ) {
            Ok(Ok(quoted)) => quoted,
            _ => 0,
        };
        if quoted <= 0 {
            return 0;
        }
        amount.fixed_mul_ceil(amount, quoted).unwrap_optimized()
    }

    /// Buys the debt asset with `want_in`. Fails closed.
    fn buy_debt_asset(e: &Env, want_in: i128) -> i128 {
        let config = Self::collateral_config(e);
        swap::swap_exact_in(
            e,
            &config.router,
            &storage::get_want(e),
            &Self::debt_token(e),
            want_in,
            0,
            config.slippage_bps,
        )
    }

    /// Repays the whole debt. When the debt asset on hand falls short, frees
    /// collateral down to the liquidation ratio and buys the rest. Stops
    /// early if the router cannot fill; the next call picks up from there.
    fn repay_all_debt(e: &Env) {
        let me = e.current_contract_address();
        let cdp = Self::cdp(e);
        let liquidation_ratio = cdp.liquidation_ratio();
        for _ in 0..MAX_DELEVERAGE_ROUNDS {
            let debt = cdp.position(&me).debt;
            Self::repay_debt(e, debt.min(Self::idle_debt_balance(e)));
            let shortfall = cdp.position(&me).debt;
            if shortfall == 0 {
                return;
            }

            let want_in = Self::want_for_debt(e, shortfall);
            if want_in <= 0 {
                return;
            }
            let idle = base::want_balance(e);
            if idle < want_in {
                let free = Self::withdrawable_collateral(e, liquidation_ratio).min(want_in - idle);
                if free > 0 {
                    cdp.withdraw_collateral(&me, &free);
                }
            }
            if Self::buy_debt_asset(e, want_in.min(base::want_balance(e))) <= 0 {
                return;
            }
        }
    }
}

impl CollateralRatioKeeper for CdpLoop {
    fn collateral_config(e: &Env) -> CollateralConfig {
        storage::get_config::<CollateralConfig>(e)
    }

    fn set_collateral_config(e: &Env, config: &CollateralConfig) {
        storage::set_config(e, config);
    }

    fn free_debt_asset(e: &Env, amount: i128) -> i128 {
        if amount <= 0 {
            return 0;
        }
        let me = e.current_contract_address();
        let debt_vault = Self::debt_vault(e);
        let shares = math::shares_for_value(amount, debt_vault.price_per_full_share())
            .min(debt_vault.balance(&me));
        if shares <= 0 {
            return 0;
        }
        debt_vault.withdraw(&me, &shares)
    }
}

impl Position for CdpLoop {
    fn estimated_total_assets(e: &Env) -> i128 {
        let cdp = Self::cdp(e);
        let account = cdp.position(&e.current_contract_address());
        let price = cdp.price();
        let surplus = Self::debt_holdings(e) - account.debt;
        let net = if surplus >= 0 {
            Self::debt_in_want(surplus, price)
        } else {
            -Self::debt_in_want(-surplus, price)
        };
        (base::want_balance(e) + account.collateral + net).max(0)
    }

    fn harvest_yield(e: &Env) {
        Self::keep_min_ratio(e);

        let debt = Self::cdp(e).position(&e.current_contract_address()).debt;
        let surplus = Self::debt_holdings(e) - debt;
        if surplus <= 0 {
            return;
        }
        let idle = Self::idle_debt_balance(e);
        if idle < surplus {
            Self::free_debt_asset(e, surplus - idle);
        }
        Self::sell_debt_asset(e, surplus.min(Self::idle_debt_balance(e)));
    }

    fn adjust_position(e: &Env, debt_outstanding: i128) {
        let amount = base::want_balance(e) - debt_outstanding;
        if amount > 0 {
            let me = e.current_contract_address();
            let cdp = Self::cdp(e);
            token::Client::new(e, &storage::get_want(e)).transfer(&me, &cdp.address, &amount);
            cdp.deposit_collateral(&me, &amount);
        }
        Self::borrow_to_target(e);
    }

    fn liquidate_position(e: &Env, amount: i128) {
        let me = e.current_contract_address();
        let cdp = Self::cdp(e);
        let account = cdp.position(&me);
        let collateral_out = amount.min(account.collateral);
        if collateral_out <= 0 {
            return;
        }

        // repay whatever keeps the remaining collateral at the target ratio
        let target = Self::target_ratio(e);
        let remaining_value = Self::collateral_value(e, account.collateral - collateral_out);
        let repayment = account.debt - math::max_debt_for_ratio(remaining_value, target);
        if repayment > 0 {
            let idle = Self::idle_debt_balance(e);
            if idle < repayment {
                Self::free_debt_asset(e, repayment - idle);
            }
            Self::repay_debt(e, repayment.min(Self::idle_debt_balance(e)));
        }

        let withdrawable = Self::withdrawable_collateral(e, target).min(collateral_out);
        if withdrawable > 0 {
            cdp.withdraw_collateral(&me, &withdrawable);
        }
    }

    fn liquidate_all_positions(e: &Env) -> i128 {
        let me = e.current_contract_address();
        let cdp = Self::cdp(e);
        Self::exit_debt_vault(e);
        Self::repay_all_debt(e);

        let withdrawable = Self::withdrawable_collateral(e, Self::collateral_config(e).min_ratio);
        if withdrawable > 0 {
            cdp.withdraw_collateral(&me, &withdrawable);
        }
        if cdp.position(&me).debt == 0 {
            Self::sell_debt_asset(e, Self::idle_debt_balance(e));
        }
        base::want_balance(e)
    }

    fn prepare_migration(e: &Env, new_strategy: &Address) {
        // a CDP account cannot change owner: the debt is repaid from collateral
        // and the debt vault shares move over as they are
        let me = e.current_contract_address();
        let cdp = Self::cdp(e);
        Self::repay_all_debt(e);
        let withdrawable = Self::withdrawable_collateral(e, Self::collateral_config(e).min_ratio);
        if withdrawable > 0 {
            cdp.withdraw_collateral(&me, &withdrawable);
        }

        let debt_vault = Self::collateral_config(e).debt_vault;
        let shares = ExternalVaultClient::new(e, &debt_vault).balance(&me);
        if shares > 0 {
            token::Client::new(e, &debt_vault).transfer(&me, new_strategy, &shares);
        }
        let leftover = Self::idle_debt_balance(e);
        if leftover > 0 {
            token::Client::new(e, &Self::debt_token(e)).transfer(&me, new_strategy, &leftover);
        }
    }

    fn harvest_trigger(e: &Env) -> bool {
        Self::keep_min_ratio_mayday(e)
    }
}
