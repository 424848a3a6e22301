use soroban_sdk::{contract, contractimpl, log, panic_with_error, Address, Env, Vec};
use yield_interface::{CollateralizedStrategyClient, ExternalVaultClient, StrategyClient};

use crate::{
    errors::KeeperError,
    events::{
        EarnJobAdded, EarnJobRemoved, HarvestJobAdded, HarvestJobRemoved, JobWorked, JOB_EARN,
        JOB_HARVEST, JOB_KEEP_MIN_RATIO,
    },
    storage,
};

fn require_governance(e: &Env) {
    storage::get_governance(e).require_auth();
}

/// Removes `item` from `list`; false when it was not there
fn remove_from(list: &mut Vec<Address>, item: &Address) -> bool {
    match list.first_index_of(item) {
        Some(index) => {
            list.remove(index);
            true
        }
        None => false,
    }
}

#[contract]
pub struct KeeperContract;

#[contractimpl]
impl KeeperContract {
    pub fn __constructor(e: Env, governance: Address) {
        storage::set_governance(&e, &governance);
    }

    // ==================== Registry ====================

    /// Registers `strategy` for harvesting; `collateralized` strategies are
    /// also watched for their min collateral ratio.
    pub fn add_strategy(e: Env, strategy: Address, collateralized: bool) {
        require_governance(&e);
        let mut strategies = storage::get_strategies(&e);
        if strategies.contains(&strategy) {
            panic_with_error!(&e, KeeperError::AlreadyRegistered);
        }
        strategies.push_back(strategy.clone());
        storage::set_strategies(&e, &strategies);
        if collateralized {
            let mut collateralized_strategies = storage::get_collateralized(&e);
            collateralized_strategies.push_back(strategy.clone());
            storage::set_collateralized(&e, &collateralized_strategies);
        }
        storage::extend_instance(&e);

        HarvestJobAdded {
            strategy,
            collateralized,
        }
        .publish(&e);
    }

    pub fn remove_harvest_strategy(e: Env, strategy: Address) {
        require_governance(&e);
        let mut strategies = storage::get_strategies(&e);
        if !remove_from(&mut strategies, &strategy) {
            panic_with_error!(&e, KeeperError::NotRegistered);
        }
        storage::set_strategies(&e, &strategies);
        let mut collateralized = storage::get_collateralized(&e);
        if remove_from(&mut collateralized, &strategy) {
            storage::set_collateralized(&e, &collateralized);
        }
        storage::extend_instance(&e);

        HarvestJobRemoved { strategy }.publish(&e);
    }

    /// Registers an external vault whose `earn` is worth calling once at
    /// least `min_earn` is available
    pub fn add_vault(e: Env, vault: Address, min_earn: i128) {
        require_governance(&e);
        if min_earn < 0 {
            panic_with_error!(&e, KeeperError::InvalidAmount);
        }
        let mut vaults = storage::get_vaults(&e);
        if vaults.contains(&vault) {
            panic_with_error!(&e, KeeperError::AlreadyRegistered);
        }
        vaults.push_back(vault.clone());
        storage::set_vaults(&e, &vaults);
        storage::set_min_earn(&e, &vault, min_earn);
        storage::extend_instance(&e);

        EarnJobAdded { vault, min_earn }.publish(&e);
    }

    pub fn remove_earn_vault(e: Env, vault: Address) {
        require_governance(&e);
        let mut vaults = storage::get_vaults(&e);
        if !remove_from(&mut vaults, &vault) {
            panic_with_error!(&e, KeeperError::NotRegistered);
        }
        storage::set_vaults(&e, &vaults);
        storage::remove_min_earn(&e, &vault);
        storage::extend_instance(&e);

        EarnJobRemoved { vault }.publish(&e);
    }

    pub fn set_governance(e: Env, governance: Address) {
        require_governance(&e);
        storage::set_governance(&e, &governance);
        storage::extend_instance(&e);
    }

    pub fn governance(e: Env) -> Address {
        storage::get_governance(&e)
    }

    pub fn strategies(e: Env) -> Vec<Address> {
        storage::get_strategies(&e)
    }

    pub fn collateralized_strategies(e: Env) -> Vec<Address> {
        storage::get_collateralized(&e)
    }

    pub fn vaults(e: Env) -> Vec<Address> {
        storage::get_vaults(&e)
    }

    pub fn min_earn(e: Env, vault: Address) -> Option<i128> {
        storage::get_min_earn(&e, &vault)
    }

    // ==================== Probes ====================

    pub fn harvestable(e: Env, strategy: Address) -> bool {
        if !storage::get_strategies(&e).contains(&strategy) {
            return false;
        }
        matches!(
            StrategyClient::new(&e, &strategy).try_harvest_trigger(),
            Ok(Ok(true))
        )
    }

    pub fn earnable(e: Env, vault: Address) -> bool {
        let Some(min_earn) = storage::get_min_earn(&e, &vault) else {
            return false;
        };
        match ExternalVaultClient::new(&e, &vault).try_available() {
            Ok(Ok(available)) => available > 0 && available >= min_earn,
            _ => false,
        }
    }

    pub fn keep_min_ratio_mayday(e: Env, strategy: Address) -> bool {
        if !storage::get_collateralized(&e).contains(&strategy) {
            return false;
        }
        matches!(
            CollateralizedStrategyClient::new(&e, &strategy).try_keep_min_ratio_mayday(),
            Ok(Ok(true))
        )
    }

    // ==================== Jobs ====================

    /// Harvests `strategy` when its trigger fires. Anyone may call.
    pub fn harvest(e: Env, strategy: Address) -> bool {
        if !Self::harvestable(e.clone(), strategy.clone()) {
            return false;
        }
        let report = StrategyClient::new(&e, &strategy).harvest(&e.current_contract_address());
        log!(&e, "keeper harvest", strategy.clone(), report.profit, report.loss);
        JobWorked {
            target: strategy,
            job: JOB_HARVEST,
        }
        .publish(&e);
        true
    }

    /// Calls `earn` on `vault` once enough is available. Anyone may call.
    pub fn earn(e: Env, vault: Address) -> bool {
        if !Self::earnable(e.clone(), vault.clone()) {
            return false;
        }
        ExternalVaultClient::new(&e, &vault).earn();
        JobWorked {
            target: vault,
            job: JOB_EARN,
        }
        .publish(&e);
        true
    }

    /// Restores the min collateral ratio of `strategy` when it is breached.
    /// Anyone may call.
    pub fn keep_min_ratio(e: Env, strategy: Address) -> bool {
        if !Self::keep_min_ratio_mayday(e.clone(), strategy.clone()) {
            return false;
        }
        let repaid = CollateralizedStrategyClient::new(&e, &strategy)
            .keep_min_ratio(&e.current_contract_address());
        log!(&e, "keeper keep_min_ratio", strategy.clone(), repaid);
        JobWorked {
            target: strategy,
            job: JOB_KEEP_MIN_RATIO,
        }
        .publish(&e);
        true
    }
}
