use soroban_sdk::{contracttype, token, Address, Env};
use yield_interface::{ExternalVaultClient, FarmingPoolClient, FarmingPosition};

use crate::{math, storage, swap};

/// Where a farming strategy deposits, stakes and sells its rewards
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct FarmingConfig {
    pub external_vault: Address,
    pub farming_pool: Address,
    pub pool_id: u32,
    pub router: Address,
    /// Minimum quoted want for a reward swap to go through
    pub min_reward_out: i128,
    pub slippage_bps: u32,
}

/// Capability for strategies that deposit want into an external vault and
/// stake the vault shares in a reward pool.
pub trait FarmingAdapter {
    fn farming_config(e: &Env) -> FarmingConfig;

    fn set_farming_config(e: &Env, config: &FarmingConfig);

    fn staked_shares(e: &Env) -> i128 {
        let config = Self::farming_config(e);
        FarmingPoolClient::new(e, &config.farming_pool)
            .user_info(&config.pool_id, &e.current_contract_address())
            .amount
    }

    fn unstaked_shares(e: &Env) -> i128 {
        let config = Self::farming_config(e);
        ExternalVaultClient::new(e, &config.external_vault).balance(&e.current_contract_address())
    }

    /// Want value of every external vault share held, staked or not
    fn farmed_value(e: &Env) -> i128 {
        let config = Self::farming_config(e);
        let price_per_share =
            ExternalVaultClient::new(e, &config.external_vault).price_per_full_share();
        math::share_value(
            Self::staked_shares(e) + Self::unstaked_shares(e),
            price_per_share,
        )
    }

    /// Rewards claimable from the pool; 0 when the pool cannot answer
    fn pending_reward(e: &Env) -> i128 {
        let config = Self::farming_config(e);
        match FarmingPoolClient::new(e, &config.farming_pool)
            .try_pending_reward(&config.pool_id, &e.current_contract_address())
        {
            Ok(Ok(pending)) => pending,
            _ => 0,
        }
    }

    fn harvestable(e: &Env) -> bool {
        Self::pending_reward(e) > 0
    }

    fn farming_position(e: &Env) -> FarmingPosition {
        let config = Self::farming_config(e);
        FarmingPosition {
            pool_id: config.pool_id,
            staked_amount: Self::staked_shares(e),
            unstaked_amount: Self::unstaked_shares(e),
            pending_reward: Self::pending_reward(e),
        }
    }

    /// Deposits up to `amount` of idle want and stakes every unstaked share.
    /// Returns the shares staked.
    fn deposit_and_stake(e: &Env, amount: i128) -> i128 {
        let config = Self::farming_config(e);
        let me = e.current_contract_address();
        let external_vault = ExternalVaultClient::new(e, &config.external_vault);

        if amount > 0 {
            token::Client::new(e, &storage::get_want(e)).transfer(
                &me,
                &config.external_vault,
                &amount,
            );
            external_vault.deposit(&me, &amount);
        }

        let shares = external_vault.balance(&me);
        if shares > 0 {
            token::Client::new(e, &config.external_vault).transfer(
                &me,
                &config.farming_pool,
                &shares,
            );
            FarmingPoolClient::new(e, &config.farming_pool).stake(&me, &config.pool_id, &shares);
        }
        shares
    }

    /// Puts all idle want to work; a no-op when nothing is idle
    fn earn(e: &Env) -> i128 {
        let me = e.current_contract_address();
        let idle = token::Client::new(e, &storage::get_want(e)).balance(&me);
        Self::deposit_and_stake(e, idle)
    }

    /// Claims pending rewards and sells the whole reward balance for want.
    /// Returns the want received.
    fn claim_and_convert(e: &Env) -> i128 {
        let config = Self::farming_config(e);
        let me = e.current_contract_address();
        let pool = FarmingPoolClient::new(e, &config.farming_pool);
        if Self::pending_reward(e) > 0 {
            pool.claim(&me, &config.pool_id);
        }

        let reward_token = pool.reward_token();
        let reward_balance = token::Client::new(e, &reward_token).balance(&me);
        swap::swap_exact_in(
            e,
            &config.router,
            &reward_token,
            &storage::get_want(e),
            reward_balance,
            config.min_reward_out,
            config.slippage_bps,
        )
    }

    fn unstake(e: &Env, shares: i128) {
        if shares <= 0 {
            return;
        }
        let config = Self::farming_config(e);
        FarmingPoolClient::new(e, &config.farming_pool).unstake(
            &e.current_contract_address(),
            &config.pool_id,
            &shares,
        );
    }

    /// Redeems enough external vault shares to free `amount` of want
    fn redeem_for(e: &Env, amount: i128) {
        let config = Self::farming_config(e);
        let me = e.current_contract_address();
        let external_vault = ExternalVaultClient::new(e, &config.external_vault);

        let wanted = math::shares_for_value(amount, external_vault.price_per_full_share());
        let unstaked = external_vault.balance(&me);
        if unstaked < wanted {
            Self::unstake(e, (wanted - unstaked).min(Self::staked_shares(e)));
        }
        let shares = wanted.min(external_vault.balance(&me));
        if shares > 0 {
            external_vault.withdraw(&me, &shares);
        }
    }

    /// Unstakes everything and redeems every external vault share
    fn exit_farm(e: &Env) {
        let config = Self::farming_config(e);
        let me = e.current_contract_address();
        Self::unstake(e, Self::staked_shares(e));
        let shares = ExternalVaultClient::new(e, &config.external_vault).balance(&me);
        if shares > 0 {
            ExternalVaultClient::new(e, &config.external_vault).withdraw(&me, &shares);
        }
    }
}
