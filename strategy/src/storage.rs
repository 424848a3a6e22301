use soroban_sdk::{
    contracttype, unwrap::UnwrapOptimized, Address, Env, IntoVal, TryFromVal, Val,
};
use stellar_tokens::fungible::{INSTANCE_EXTEND_AMOUNT, INSTANCE_TTL_THRESHOLD};

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub enum StrategyStorageKey {
    Vault,
    Want,
    Strategist,
    Keeper,
    EmergencyExit,
    Config,
}

pub fn extend_instance(e: &Env) {
    e.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_EXTEND_AMOUNT);
}

fn get_address(e: &Env, key: &StrategyStorageKey) -> Address {
    e.storage()
        .instance()
        .get::<StrategyStorageKey, Address>(key)
        .unwrap_optimized()
}

fn set_address(e: &Env, key: &StrategyStorageKey, address: &Address) {
    e.storage()
        .instance()
        .set::<StrategyStorageKey, Address>(key, address);
}

pub fn get_vault(e: &Env) -> Address {
    get_address(e, &StrategyStorageKey::Vault)
}

pub fn set_vault(e: &Env, vault: &Address) {
    set_address(e, &StrategyStorageKey::Vault, vault);
}

pub fn get_want(e: &Env) -> Address {
    get_address(e, &StrategyStorageKey::Want)
}

pub fn set_want(e: &Env, want: &Address) {
    set_address(e, &StrategyStorageKey::Want, want);
}

pub fn get_strategist(e: &Env) -> Address {
    get_address(e, &StrategyStorageKey::Strategist)
}

pub fn set_strategist(e: &Env, strategist: &Address) {
    set_address(e, &StrategyStorageKey::Strategist, strategist);
}

pub fn get_keeper(e: &Env) -> Address {
    get_address(e, &StrategyStorageKey::Keeper)
}

pub fn set_keeper(e: &Env, keeper: &Address) {
    set_address(e, &StrategyStorageKey::Keeper, keeper);
}

pub fn is_emergency_exit(e: &Env) -> bool {
    e.storage()
        .instance()
        .get::<StrategyStorageKey, bool>(&StrategyStorageKey::EmergencyExit)
        .unwrap_or(false)
}

pub fn set_emergency_exit(e: &Env, active: bool) {
    e.storage()
        .instance()
        .set::<StrategyStorageKey, bool>(&StrategyStorageKey::EmergencyExit, &active);
}

/// Strategy-specific configuration (farming or collateral parameters)
pub fn get_config<T: TryFromVal<Env, Val>>(e: &Env) -> T {
    e.storage()
        .instance()
        .get::<StrategyStorageKey, T>(&StrategyStorageKey::Config)
        .unwrap_optimized()
}

pub fn set_config<T: IntoVal<Env, Val>>(e: &Env, config: &T) {
    e.storage()
        .instance()
        .set::<StrategyStorageKey, T>(&StrategyStorageKey::Config, config);
}
