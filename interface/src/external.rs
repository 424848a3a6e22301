//! Clients for the third-party protocols strategies deploy capital into.
//!
//! Token movements into these protocols are push style: the caller transfers
//! first and then invokes the protocol, which accounts for the balance delta.

use soroban_sdk::{contractclient, contracttype, Address, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolUserInfo {
    pub amount: i128,
    pub pending: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CdpAccount {
    pub collateral: i128,
    pub debt: i128,
}

/// Share-issuing vault with a withdrawal fee and a reserve buffer.
/// Its shares are themselves a token living at the vault address.
#[contractclient(name = "ExternalVaultClient")]
pub trait ExternalVault {
    fn want(env: Env) -> Address;

    fn deposit(env: Env, from: Address, amount: i128) -> i128;

    fn withdraw(env: Env, to: Address, shares: i128) -> i128;

    /// Deploys everything above the reserve buffer
    fn earn(env: Env);

    /// Amount `earn` would deploy right now
    fn available(env: Env) -> i128;

    fn balance(env: Env, id: Address) -> i128;

    fn total_supply(env: Env) -> i128;

    fn underlying_balance(env: Env) -> i128;

    /// Underlying per share, scaled by `SCALAR_7`
    fn price_per_full_share(env: Env) -> i128;
}

#[contractclient(name = "FarmingPoolClient")]
pub trait FarmingPool {
    fn reward_token(env: Env) -> Address;

    fn pending_reward(env: Env, pool_id: u32, who: Address) -> i128;

    fn user_info(env: Env, pool_id: u32, who: Address) -> PoolUserInfo;

    fn stake(env: Env, who: Address, pool_id: u32, amount: i128);

    fn unstake(env: Env, who: Address, pool_id: u32, amount: i128);

    fn claim(env: Env, who: Address, pool_id: u32) -> i128;
}

#[contractclient(name = "CdpClient")]
pub trait Cdp {
    fn collateral_token(env: Env) -> Address;

    fn debt_token(env: Env) -> Address;

    /// Debt units per collateral unit, scaled by `SCALAR_7`
    fn price(env: Env) -> i128;

    /// Collateral ratio (percent) below which a position is liquidatable
    fn liquidation_ratio(env: Env) -> u32;

    fn position(env: Env, owner: Address) -> CdpAccount;

    /// Collateral ratio in percent, `u32::MAX` for a debt-free position
    fn current_ratio(env: Env, owner: Address) -> u32;

    fn deposit_collateral(env: Env, owner: Address, amount: i128);

    fn withdraw_collateral(env: Env, owner: Address, amount: i128);

    fn mint(env: Env, owner: Address, amount: i128);

    fn repay(env: Env, owner: Address, amount: i128);
}

#[contractclient(name = "RouterClient")]
pub trait Router {
    fn quote(env: Env, token_in: Address, token_out: Address, amount_in: i128) -> i128;

    fn swap(
        env: Env,
        to: Address,
        token_in: Address,
        token_out: Address,
        amount_in: i128,
        min_out: i128,
    ) -> i128;
}
