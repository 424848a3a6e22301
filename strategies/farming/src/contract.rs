use soroban_sdk::{contract, contractimpl, Address, Env};
use yield_interface::{FarmingPosition, HarvestReport};
use yield_strategy::{base, storage, FarmingAdapter, FarmingConfig, Position};

use crate::farm::Farm;

#[contract]
pub struct FarmingStrategy;

#[contractimpl]
impl FarmingStrategy {
    /// Initializes the strategy
    ///
    /// # Arguments
    /// * `vault` - Vault lending want to this strategy
    /// * `strategist` - Manages the strategy alongside vault governance
    /// * `keeper` - Allowed to harvest
    /// * `config` - External vault, farming pool and reward router
    pub fn __constructor(
        e: Env,
        vault: Address,
        strategist: Address,
        keeper: Address,
        config: FarmingConfig,
    ) {
        base::initialize(&e, &vault, &strategist, &keeper);
        Farm::set_farming_config(&e, &config);
    }

    // ==================== Vault-facing ====================

    pub fn want(e: Env) -> Address {
        storage::get_want(&e)
    }

    pub fn vault(e: Env) -> Address {
        storage::get_vault(&e)
    }

    pub fn estimated_total_assets(e: Env) -> i128 {
        Farm::estimated_total_assets(&e)
    }

    pub fn withdraw(e: Env, amount: i128) -> i128 {
        let loss = base::withdraw::<Farm>(&e, amount);
        storage::extend_instance(&e);
        loss
    }

    pub fn migrate(e: Env, new_strategy: Address) {
        base::migrate::<Farm>(&e, &new_strategy);
    }

    // ==================== Keeper ====================

    pub fn harvest(e: Env, caller: Address) -> HarvestReport {
        let report = base::harvest::<Farm>(&e, &caller);
        storage::extend_instance(&e);
        report
    }

    pub fn harvest_trigger(e: Env) -> bool {
        base::harvest_trigger::<Farm>(&e)
    }

    /// Deposits and stakes every idle want and share. Anyone may call.
    pub fn earn(e: Env) -> i128 {
        let staked = Farm::earn(&e);
        storage::extend_instance(&e);
        staked
    }

    // ==================== Management ====================

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

    /// Sets the minimum quoted want for which rewards are sold
    pub fn set_reward_threshold(e: Env, caller: Address, min_reward_out: i128) {
        base::require_manager(&e, &caller);
        let mut config = Farm::farming_config(&e);
        config.min_reward_out = min_reward_out.max(0);
        Farm::set_farming_config(&e, &config);
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

    pub fn farming_config(e: Env) -> FarmingConfig {
        Farm::farming_config(&e)
    }

    pub fn pending_reward(e: Env) -> i128 {
        Farm::pending_reward(&e)
    }

    pub fn harvestable(e: Env) -> bool {
        Farm::harvestable(&e)
    }

    pub fn farming_position(e: Env) -> FarmingPosition {
        Farm::farming_position(&e)
    }
}
