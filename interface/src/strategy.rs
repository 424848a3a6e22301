use soroban_sdk::{contractclient, contracttype, Address, Env};

/// Outcome of a single harvest cycle
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HarvestReport {
    pub profit: i128,
    pub loss: i128,
    pub debt_payment: i128,
    pub debt_outstanding: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FarmingPosition {
    pub pool_id: u32,
    pub staked_amount: i128,
    pub unstaked_amount: i128,
    pub pending_reward: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CollateralPosition {
    pub collateral_asset: Address,
    pub debt_asset: Address,
    pub collateral: i128,
    pub debt: i128,
    pub current_ratio: u32,
    pub min_ratio: u32,
}

/// Surface every strategy exposes to the vault and to keepers
#[contractclient(name = "StrategyClient")]
pub trait StrategyInterface {
    fn want(env: Env) -> Address;

    fn vault(env: Env) -> Address;

    /// Receives the strategist's share of the performance fee
    fn strategist(env: Env) -> Address;

    fn estimated_total_assets(env: Env) -> i128;

    /// Frees up to `amount` of want, sends it to the vault and returns the loss
    /// realized while doing so. Only the vault may call this.
    fn withdraw(env: Env, amount: i128) -> i128;

    /// Hands every holding over to `new_strategy`. Only the vault may call this.
    fn migrate(env: Env, new_strategy: Address);

    fn harvest(env: Env, caller: Address) -> HarvestReport;

    fn harvest_trigger(env: Env) -> bool;
}

/// Extra surface of strategies that borrow against collateral
#[contractclient(name = "CollateralizedStrategyClient")]
pub trait CollateralizedStrategy {
    fn keep_min_ratio_mayday(env: Env) -> bool;

    fn keep_min_ratio(env: Env, caller: Address) -> i128;
}
