use soroban_sdk::{contracttype, unwrap::UnwrapOptimized, Address, Env, Vec};
use stellar_tokens::fungible::{
    BALANCE_EXTEND_AMOUNT, BALANCE_TTL_THRESHOLD, INSTANCE_EXTEND_AMOUNT, INSTANCE_TTL_THRESHOLD,
};

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub enum KeeperStorageKey {
    Governance,
    Strategies,
    Collateralized,
    Vaults,
    MinEarn(Address),
}

pub fn extend_instance(e: &Env) {
    e.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_EXTEND_AMOUNT);
}

pub fn get_governance(e: &Env) -> Address {
    e.storage()
        .instance()
        .get::<KeeperStorageKey, Address>(&KeeperStorageKey::Governance)
        .unwrap_optimized()
}

pub fn set_governance(e: &Env, governance: &Address) {
    e.storage()
        .instance()
        .set::<KeeperStorageKey, Address>(&KeeperStorageKey::Governance, governance);
}

fn get_list(e: &Env, key: &KeeperStorageKey) -> Vec<Address> {
    e.storage()
        .instance()
        .get::<KeeperStorageKey, Vec<Address>>(key)
        .unwrap_or(Vec::new(e))
}

fn set_list(e: &Env, key: &KeeperStorageKey, list: &Vec<Address>) {
    e.storage()
        .instance()
        .set::<KeeperStorageKey, Vec<Address>>(key, list);
}

pub fn get_strategies(e: &Env) -> Vec<Address> {
    get_list(e, &KeeperStorageKey::Strategies)
}

pub fn set_strategies(e: &Env, strategies: &Vec<Address>) {
    set_list(e, &KeeperStorageKey::Strategies, strategies);
}

/// Subset of the harvest strategies that keep a collateral ratio
pub fn get_collateralized(e: &Env) -> Vec<Address> {
    get_list(e, &KeeperStorageKey::Collateralized)
}

pub fn set_collateralized(e: &Env, strategies: &Vec<Address>) {
    set_list(e, &KeeperStorageKey::Collateralized, strategies);
}

pub fn get_vaults(e: &Env) -> Vec<Address> {
    get_list(e, &KeeperStorageKey::Vaults)
}

pub fn set_vaults(e: &Env, vaults: &Vec<Address>) {
    set_list(e, &KeeperStorageKey::Vaults, vaults);
}

pub fn get_min_earn(e: &Env, vault: &Address) -> Option<i128> {
    let key = KeeperStorageKey::MinEarn(vault.clone());
    let result = e.storage().persistent().get::<KeeperStorageKey, i128>(&key);
    if result.is_some() {
        e.storage()
            .persistent()
            .extend_ttl(&key, BALANCE_TTL_THRESHOLD, BALANCE_EXTEND_AMOUNT);
    }
    result
}

pub fn set_min_earn(e: &Env, vault: &Address, min_earn: i128) {
    let key = KeeperStorageKey::MinEarn(vault.clone());
    e.storage()
        .persistent()
        .set::<KeeperStorageKey, i128>(&key, &min_earn);
    e.storage()
        .persistent()
        .extend_ttl(&key, BALANCE_TTL_THRESHOLD, BALANCE_EXTEND_AMOUNT);
}

pub fn remove_min_earn(e: &Env, vault: &Address) {
    e.storage()
        .persistent()
        .remove(&KeeperStorageKey::MinEarn(vault.clone()));
}
