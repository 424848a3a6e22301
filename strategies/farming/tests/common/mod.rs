#![allow(dead_code)]

use farming_strategy::{FarmingStrategy, FarmingStrategyClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env, String,
};
use yield_mocks::{
    MockExternalVault, MockExternalVaultClient, MockFarmingPool, MockFarmingPoolClient, MockRouter,
    MockRouterClient,
};
use yield_strategy::FarmingConfig;
use yield_vault::{VaultContract, VaultContractClient};

// Constants
pub const SCALAR_7: i128 = 10_000_000;
pub const MAX_BPS: u32 = 10_000;
pub const ONE_DAY_LEDGERS: u32 = 17280; // assumes 5s a ledger

// Default configuration values
pub const DEFAULT_WITHDRAW_FEE_BPS: u32 = 20;
pub const DEFAULT_RESERVE_BPS: u32 = 500;
pub const DEFAULT_SLIPPAGE_BPS: u32 = 50;
pub const MIN_REWARD_OUT: i128 = SCALAR_7;
pub const USER_FUNDS: i128 = 100_000_000 * SCALAR_7;
pub const ROUTER_LIQUIDITY: i128 = 1_000_000 * SCALAR_7;

/// A vault with one farming strategy and all of its collaborators
pub struct FarmingTestEnv<'a> {
    pub env: Env,
    pub token: Address,
    pub reward_token: Address,
    pub vault: VaultContractClient<'a>,
    pub governance: Address,
    pub treasury: Address,
    pub external_vault: MockExternalVaultClient<'a>,
    pub farming_pool: MockFarmingPoolClient<'a>,
    pub router: MockRouterClient<'a>,
    pub strategy: FarmingStrategyClient<'a>,
    pub strategist: Address,
    pub keeper: Address,
    pub user: Address,
}

pub fn setup_farming<'a>(withdraw_fee_bps: u32) -> FarmingTestEnv<'a> {
    let env = Env::default();
    env.cost_estimate().budget().reset_unlimited();
    env.mock_all_auths();

    env.ledger().set_min_temp_entry_ttl(ONE_DAY_LEDGERS);
    env.ledger().set_min_persistent_entry_ttl(ONE_DAY_LEDGERS * 30);
    env.ledger().set_timestamp(1_700_000_000);

    let admin = Address::generate(&env);
    let governance = Address::generate(&env);
    let guardian = Address::generate(&env);
    let rewards = Address::generate(&env);
    let treasury = Address::generate(&env);
    let strategist = Address::generate(&env);
    let keeper = Address::generate(&env);
    let user = Address::generate(&env);

    let token = env.register_stellar_asset_contract_v2(admin.clone()).address();
    let reward_token = env.register_stellar_asset_contract_v2(admin).address();
    StellarAssetClient::new(&env, &token).mint(&user, &USER_FUNDS);

    let vault_address = env.register(
        VaultContract,
        (
            token.clone(),
            governance.clone(),
            guardian,
            rewards,
            String::from_str(&env, "Yield Vault Shares"),
            String::from_str(&env, "yvTKN"),
            USER_FUNDS,
        ),
    );
    let vault = VaultContractClient::new(&env, &vault_address);
    vault.set_performance_fee(&0);
    vault.set_management_fee(&0);

    let external_vault_address = env.register(
        MockExternalVault,
        (token.clone(), treasury.clone(), withdraw_fee_bps, DEFAULT_RESERVE_BPS),
    );
    let farming_pool = MockFarmingPoolClient::new(
        &env,
        &env.register(MockFarmingPool, (reward_token.clone(),)),
    );
    let pool_id = farming_pool.add_pool(&external_vault_address);

    // rewards sell 1:1 for want
    let router = MockRouterClient::new(&env, &env.register(MockRouter, ()));
    router.set_rate(&reward_token, &token, &SCALAR_7);
    StellarAssetClient::new(&env, &token).mint(&router.address, &ROUTER_LIQUIDITY);
    router.sync(&token);

    let config = FarmingConfig {
        external_vault: external_vault_address.clone(),
        farming_pool: farming_pool.address.clone(),
        pool_id,
        router: router.address.clone(),
        min_reward_out: MIN_REWARD_OUT,
        slippage_bps: DEFAULT_SLIPPAGE_BPS,
    };
    let strategy_address = env.register(
        FarmingStrategy,
        (
            vault_address.clone(),
            strategist.clone(),
            keeper.clone(),
            config,
        ),
    );
    vault.add_strategy(&strategy_address, &MAX_BPS, &0, &i128::MAX, &0);

    FarmingTestEnv {
        token,
        reward_token,
        vault,
        governance,
        treasury,
        external_vault: MockExternalVaultClient::new(&env, &external_vault_address),
        farming_pool,
        router,
        strategy: FarmingStrategyClient::new(&env, &strategy_address),
        strategist,
        keeper,
        user,
        env,
    }
}

impl<'a> FarmingTestEnv<'a> {
    pub fn token_balance(&self, id: &Address) -> i128 {
        TokenClient::new(&self.env, &self.token).balance(id)
    }

    pub fn reward_balance(&self, id: &Address) -> i128 {
        TokenClient::new(&self.env, &self.reward_token).balance(id)
    }

    pub fn mint_tokens(&self, to: &Address, amount: i128) {
        StellarAssetClient::new(&self.env, &self.token).mint(to, &amount);
    }

    pub fn deposit(&self, amount: i128) -> i128 {
        self.vault.deposit(&self.user, &amount)
    }

    /// Sends yield straight to the external vault and recognizes it
    pub fn simulate_yield(&self, amount: i128) {
        self.mint_tokens(&self.external_vault.address, amount);
        self.external_vault.report_yield();
    }

    /// Funds the pool and credits `amount` of reward to `strategy`
    pub fn accrue_reward(&self, strategy: &Address, amount: i128) {
        StellarAssetClient::new(&self.env, &self.reward_token)
            .mint(&self.farming_pool.address, &amount);
        self.farming_pool
            .accrue(&self.strategy.farming_config().pool_id, strategy, &amount);
    }

    /// Deploys a second farming strategy for the same vault and pool
    pub fn deploy_strategy(&self) -> FarmingStrategyClient<'a> {
        let address = self.env.register(
            FarmingStrategy,
            (
                self.vault.address.clone(),
                self.strategist.clone(),
                self.keeper.clone(),
                self.strategy.farming_config(),
            ),
        );
        FarmingStrategyClient::new(&self.env, &address)
    }
}

/// Asserts actual value is within a range
pub fn assert_in_range(actual: i128, min: i128, max: i128, msg: &str) {
    assert!(
        actual >= min && actual <= max,
        "{}: expected value in range [{}, {}], got {}",
        msg,
        min,
        max,
        actual
    );
}
