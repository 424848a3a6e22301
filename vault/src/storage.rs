use soroban_sdk::{contracttype, unwrap::UnwrapOptimized, Address, Env, Vec as SorobanVec};
use stellar_tokens::fungible::{
    BALANCE_EXTEND_AMOUNT, BALANCE_TTL_THRESHOLD, INSTANCE_EXTEND_AMOUNT, INSTANCE_TTL_THRESHOLD,
};
use yield_interface::StrategyParams;

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub enum VaultStorageKey {
    Token,
    Governance,
    Guardian,
    Rewards,
    Ledger,
    WithdrawalQueue,
    Strategy(Address),
}

/// Vault-wide accounting, loaded once at call entry and written back once at exit
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Ledger {
    pub total_idle: i128,
    pub total_debt: i128,
    /// Sum of the debt ratios of every registered strategy (bps)
    pub debt_ratio: u32,
    pub deposit_limit: i128,
    pub performance_fee: u32,
    pub management_fee: u32,
    pub emergency_shutdown: bool,
}

impl Ledger {
    pub fn total_assets(&self) -> i128 {
        self.total_idle + self.total_debt
    }
}

pub fn extend_instance(e: &Env) {
    e.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_EXTEND_AMOUNT);
}

fn get_address(e: &Env, key: &VaultStorageKey) -> Address {
    e.storage()
        .instance()
        .get::<VaultStorageKey, Address>(key)
        .unwrap_optimized()
}

pub fn get_token(e: &Env) -> Address {
    get_address(e, &VaultStorageKey::Token)
}

pub fn set_token(e: &Env, token: &Address) {
    e.storage()
        .instance()
        .set::<VaultStorageKey, Address>(&VaultStorageKey::Token, token);
}

pub fn get_governance(e: &Env) -> Address {
    get_address(e, &VaultStorageKey::Governance)
}

pub fn set_governance(e: &Env, governance: &Address) {
    e.storage()
        .instance()
        .set::<VaultStorageKey, Address>(&VaultStorageKey::Governance, governance);
}

pub fn get_guardian(e: &Env) -> Address {
    get_address(e, &VaultStorageKey::Guardian)
}

pub fn set_guardian(e: &Env, guardian: &Address) {
    e.storage()
        .instance()
        .set::<VaultStorageKey, Address>(&VaultStorageKey::Guardian, guardian);
}

pub fn get_rewards(e: &Env) -> Address {
    get_address(e, &VaultStorageKey::Rewards)
}

pub fn set_rewards(e: &Env, rewards: &Address) {
    e.storage()
        .instance()
        .set::<VaultStorageKey, Address>(&VaultStorageKey::Rewards, rewards);
}

pub fn get_ledger(e: &Env) -> Ledger {
    e.storage()
        .instance()
        .get::<VaultStorageKey, Ledger>(&VaultStorageKey::Ledger)
        .unwrap_optimized()
}

pub fn set_ledger(e: &Env, ledger: &Ledger) {
    e.storage()
        .instance()
        .set::<VaultStorageKey, Ledger>(&VaultStorageKey::Ledger, ledger);
}

pub fn get_withdrawal_queue(e: &Env) -> SorobanVec<Address> {
    e.storage()
        .instance()
        .get::<VaultStorageKey, SorobanVec<Address>>(&VaultStorageKey::WithdrawalQueue)
        .unwrap_or(SorobanVec::new(e))
}

pub fn set_withdrawal_queue(e: &Env, queue: &SorobanVec<Address>) {
    e.storage()
        .instance()
        .set::<VaultStorageKey, SorobanVec<Address>>(&VaultStorageKey::WithdrawalQueue, queue);
}

/********** Strategy params (persistent) **********/

pub fn get_strategy(e: &Env, strategy: &Address) -> Option<StrategyParams> {
    let key = VaultStorageKey::Strategy(strategy.clone());
    let result = e
        .storage()
        .persistent()
        .get::<VaultStorageKey, StrategyParams>(&key);
    if result.is_some() {
        e.storage()
            .persistent()
            .extend_ttl(&key, BALANCE_TTL_THRESHOLD, BALANCE_EXTEND_AMOUNT);
    }
    result
}

pub fn has_strategy(e: &Env, strategy: &Address) -> bool {
    e.storage()
        .persistent()
        .has(&VaultStorageKey::Strategy(strategy.clone()))
}

pub fn set_strategy(e: &Env, strategy: &Address, params: &StrategyParams) {
    let key = VaultStorageKey::Strategy(strategy.clone());
    e.storage()
        .persistent()
        .set::<VaultStorageKey, StrategyParams>(&key, params);
    e.storage()
        .persistent()
        .extend_ttl(&key, BALANCE_TTL_THRESHOLD, BALANCE_EXTEND_AMOUNT);
}

pub fn remove_strategy(e: &Env, strategy: &Address) {
    e.storage()
        .persistent()
        .remove(&VaultStorageKey::Strategy(strategy.clone()));
}
