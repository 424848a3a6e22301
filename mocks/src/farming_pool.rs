//! Reward pool staking arbitrary share tokens

use soroban_sdk::{
    contract, contractimpl, contracttype, panic_with_error, token, unwrap::UnwrapOptimized,
    Address, Env,
};
use yield_interface::PoolUserInfo;

use crate::errors::MockError;

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
enum FarmingPoolKey {
    RewardToken,
    PoolCount,
    StakeToken(u32),
    TotalStaked(u32),
    User(u32, Address),
}

fn stake_token(e: &Env, pool_id: u32) -> Address {
    e.storage()
        .instance()
        .get(&FarmingPoolKey::StakeToken(pool_id))
        .unwrap_optimized()
}

fn total_staked(e: &Env, pool_id: u32) -> i128 {
    e.storage()
        .instance()
        .get(&FarmingPoolKey::TotalStaked(pool_id))
        .unwrap_or(0)
}

fn get_user(e: &Env, pool_id: u32, who: &Address) -> PoolUserInfo {
    e.storage()
        .persistent()
        .get(&FarmingPoolKey::User(pool_id, who.clone()))
        .unwrap_or(PoolUserInfo {
            amount: 0,
            pending: 0,
        })
}

fn set_user(e: &Env, pool_id: u32, who: &Address, info: &PoolUserInfo) {
    e.storage()
        .persistent()
        .set(&FarmingPoolKey::User(pool_id, who.clone()), info);
}

#[contract]
pub struct MockFarmingPool;

#[contractimpl]
impl MockFarmingPool {
    pub fn __constructor(e: Env, reward_token: Address) {
        e.storage()
            .instance()
            .set(&FarmingPoolKey::RewardToken, &reward_token);
    }

    pub fn reward_token(e: Env) -> Address {
        e.storage()
            .instance()
            .get(&FarmingPoolKey::RewardToken)
            .unwrap_optimized()
    }

    /// Opens a pool for `stake_token` and returns its id
    pub fn add_pool(e: Env, stake_token: Address) -> u32 {
        let pool_id: u32 = e
            .storage()
            .instance()
            .get(&FarmingPoolKey::PoolCount)
            .unwrap_or(0);
        e.storage()
            .instance()
            .set(&FarmingPoolKey::StakeToken(pool_id), &stake_token);
        e.storage()
            .instance()
            .set(&FarmingPoolKey::PoolCount, &(pool_id + 1));
        pool_id
    }

    pub fn pending_reward(e: Env, pool_id: u32, who: Address) -> i128 {
        get_user(&e, pool_id, &who).pending
    }

    pub fn user_info(e: Env, pool_id: u32, who: Address) -> PoolUserInfo {
        get_user(&e, pool_id, &who)
    }

    /// Stakes `amount` of the pool token already transferred in by `who`
    pub fn stake(e: Env, who: Address, pool_id: u32, amount: i128) {
        who.require_auth();
        if amount <= 0 {
            panic_with_error!(&e, MockError::InvalidAmount);
        }
        let staked = total_staked(&e, pool_id);
        let held = token::Client::new(&e, &stake_token(&e, pool_id))
            .balance(&e.current_contract_address());
        if held < staked + amount {
            panic_with_error!(&e, MockError::InsufficientPayment);
        }

        let mut info = get_user(&e, pool_id, &who);
        info.amount += amount;
        set_user(&e, pool_id, &who, &info);
        e.storage()
            .instance()
            .set(&FarmingPoolKey::TotalStaked(pool_id), &(staked + amount));
    }

    pub fn unstake(e: Env, who: Address, pool_id: u32, amount: i128) {
        who.require_auth();
        let mut info = get_user(&e, pool_id, &who);
        if amount <= 0 || amount > info.amount {
            panic_with_error!(&e, MockError::InsufficientBalance);
        }
        info.amount -= amount;
        set_user(&e, pool_id, &who, &info);
        e.storage().instance().set(
            &FarmingPoolKey::TotalStaked(pool_id),
            &(total_staked(&e, pool_id) - amount),
        );
        token::Client::new(&e, &stake_token(&e, pool_id)).transfer(
            &e.current_contract_address(),
            &who,
            &amount,
        );
    }

    /// Pays out every pending reward of `who`
    pub fn claim(e: Env, who: Address, pool_id: u32) -> i128 {
        who.require_auth();
        let mut info = get_user(&e, pool_id, &who);
        let pending = info.pending;
        if pending > 0 {
            info.pending = 0;
            set_user(&e, pool_id, &who, &info);
            token::Client::new(&e, &Self::reward_token(e.clone())).transfer(
                &e.current_contract_address(),
                &who,
                &pending,
            );
        }
        pending
    }

    /// Credits `amount` of (pre-funded) reward to `who`
    pub fn accrue(e: Env, pool_id: u32, who: Address, amount: i128) {
        let mut info = get_user(&e, pool_id, &who);
        info.pending += amount;
        set_user(&e, pool_id, &who, &info);
    }
}
