use soroban_sdk::{token, Address, Env};
use yield_interface::{ExternalVaultClient, FarmingPoolClient};
use yield_strategy::{base, math, storage, FarmingAdapter, FarmingConfig, Position};

/// External vault shares staked in a farming pool
pub struct Farm;

impl FarmingAdapter for Farm {
    fn farming_config(e: &Env) -> FarmingConfig {
        storage::get_config::<FarmingConfig>(e)
    }

    fn set_farming_config(e: &Env, config: &FarmingConfig) {
        storage::set_config(e, config);
    }
}

impl Position for Farm {
    fn estimated_total_assets(e: &Env) -> i128 {
        base::want_balance(e) + Self::farmed_value(e)
    }

    fn harvest_yield(e: &Env) {
        Self::claim_and_convert(e);
    }

    fn adjust_position(e: &Env, debt_outstanding: i128) {
        let amount = base::want_balance(e) - debt_outstanding;
        if amount > 0 {
            Self::deposit_and_stake(e, amount);
        }
    }

    fn liquidate_position(e: &Env, amount: i128) {
        Self::redeem_for(e, amount);
    }

    fn liquidate_all_positions(e: &Env) -> i128 {
        Self::claim_and_convert(e);
        Self::exit_farm(e);
        base::want_balance(e)
    }

    fn prepare_migration(e: &Env, new_strategy: &Address) {
        let config = Self::farming_config(e);
        let me = e.current_contract_address();
        let pool = FarmingPoolClient::new(e, &config.farming_pool);
        if Self::pending_reward(e) > 0 {
            pool.claim(&me, &config.pool_id);
        }
        Self::unstake(e, Self::staked_shares(e));

        let shares = ExternalVaultClient::new(e, &config.external_vault).balance(&me);
        if shares > 0 {
            token::Client::new(e, &config.external_vault).transfer(&me, new_strategy, &shares);
        }
        let reward = token::Client::new(e, &pool.reward_token());
        let rewards = reward.balance(&me);
        if rewards > 0 {
            reward.transfer(&me, new_strategy, &rewards);
        }
    }

    fn rounding_tolerance(e: &Env) -> i128 {
        let config = Self::farming_config(e);
        let price_per_share =
            ExternalVaultClient::new(e, &config.external_vault).price_per_full_share();
        math::conversion_dust(
            Self::staked_shares(e) + Self::unstaked_shares(e),
            price_per_share,
        )
    }

    fn harvest_trigger(e: &Env) -> bool {
        Self::harvestable(e)
    }
}
