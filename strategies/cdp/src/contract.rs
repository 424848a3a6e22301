use soroban_sdk::{contract, contractimpl, Address, Env};
use yield_interface::{CollateralPosition, HarvestReport};
use yield_strategy::{base, storage, CollateralConfig, CollateralRatioKeeper, Position};

use crate::cdp_loop::CdpLoop;

#[contract]
pub struct CdpStrategy;

#[contractimpl]
impl CdpStrategy {
    /// Initializes the strategy
    ///
    /// # Arguments
    /// * `vault` - Vault lending want to this strategy; want is the CDP collateral
    /// * `strategist` - Manages the strategy alongside vault governance
    /// * `keeper` - Allowed to harvest and to keep the min ratio
    /// * `config` - CDP, debt vault, router and ratio settings
    pub fn __constructor(
        e: Env,
        vault: Address,
        strategist: Address,
        keeper: Address,
        config: CollateralConfig,
    ) {
        base::initialize(&e, &vault, &strategist, &keeper);
        CdpLoop::set_collateral_config(&e, &config);
    }

    // ==================== Vault-facing ====================

    pub fn want(e: Env) -> Address {
        storage::get_want(&e)
    }

    pub fn vault(e: Env) -> Address {
        storage::get_vault(&e)
    }

    pub fn estimated_total_assets(e: Env) -> i128 {
        CdpLoop::estimated_total_assets(&e)
    }

    pub fn withdraw(e: Env, amount: i128) -> i128 {
        let loss = base::withdraw::<CdpLoop>(&e, amount);
        storage::extend_instance(&e);
        loss
    }

    pub fn migrate(e: Env, new_strategy: Address) {
        base::migrate::<CdpLoop>(&e, &new_strategy);
    }

    // ==================== Keeper ====================

    pub fn harvest(e: Env, caller: Address) -> HarvestReport {
        let report = base::harvest::<CdpLoop>(&e, &caller);
        storage::extend_instance(&e);
        report
    }

    pub fn harvest_trigger(e: Env) -> bool {
        base::harvest_trigger::<CdpLoop>(&e)
    }

    /// True when the collateral ratio is below the configured minimum
    pub fn keep_min_ratio_mayday(e: Env) -> bool {
        CdpLoop::keep_min_ratio_mayday(&e)
    }

    /// Repays debt from the debt asset on hand until the min ratio holds.
    /// Returns the amount repaid.
    pub fn keep_min_ratio(e: Env, caller: Address) -> i128 {
        base::require_harvester(&e, &caller);
        let repaid = CdpLoop::keep_min_ratio(&e);
        storage::extend_instance(&e);
        repaid
    }

    // ==================== Management ====================

    pub fn set_min_ratio(e: Env, caller: Address, min_ratio: u32) {
        base::require_manager(&e, &caller);
        CdpLoop::set_min_ratio(&e, min_ratio);
        storage::extend_instance(&e);
    }

    pub fn set_emergency_exit(e: Env, caller: Address) {
        base::set_emergency_exit(&e, &caller);
        storage::extend_instance(&e);
    }

    pub fn set_keeper(e: Env, caller: Address, keeper: Address) {
        base::set_keeper(&e, &caller, &keeper);
        storage::extend_instance(&e);
    }

    pub fn set_strategist(e: Env, caller: Address, strategist: Address) {
        base::set_strategist(&e, &caller, &strategist);
        storage::extend_instance(&e);
    }

    // ==================== Views ====================

    pub fn emergency_exit(e: Env) -> bool {
        storage::is_emergency_exit(&e)
    }

    pub fn strategist(e: Env) -> Address {
        storage::get_strategist(&e)
    }

    pub fn keeper(e: Env) -> Address {
        storage::get_keeper(&e)
    }

    pub fn collateral_config(e: Env) -> CollateralConfig {
        CdpLoop::collateral_config(&e)
    }

    pub fn current_ratio(e: Env) -> u32 {
        CdpLoop::current_ratio(&e)
    }

    pub fn collateral_position(e: Env) -> CollateralPosition {
        CdpLoop::collateral_position(&e)
    }

    pub fn debt_holdings(e: Env) -> i128 {
        CdpLoop::debt_holdings(&e)
    }
}
