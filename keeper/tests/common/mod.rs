#![allow(dead_code)]

use cdp_strategy::{CdpStrategy, CdpStrategyClient};
use farming_strategy::{FarmingStrategy, FarmingStrategyClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token::StellarAssetClient,
    Address, Env, String,
};
use yield_keeper::{KeeperContract, KeeperContractClient};
use yield_mocks::{
    MockCdp, MockCdpClient, MockExternalVault, MockExternalVaultClient, MockFarmingPool,
    MockFarmingPoolClient, MockRouter, MockRouterClient,
};
use yield_strategy::{CollateralConfig, FarmingConfig};
use yield_vault::{VaultContract, VaultContractClient};

// Constants
pub const SCALAR_7: i128 = 10_000_000;
pub const ONE_DAY_LEDGERS: u32 = 17280; // assumes 5s a ledger

// Default configuration values
pub const DEFAULT_RESERVE_BPS: u32 = 500;
pub const MIN_RATIO: u32 = 180;
pub const USER_FUNDS: i128 = 100_000_000 * SCALAR_7;
pub const LIQUIDITY: i128 = 1_000_000 * SCALAR_7;

/// A vault running a farming and a CDP strategy, both keeping through the
/// keeper contract
pub struct KeeperTestEnv<'a> {
    pub env: Env,
    pub token: Address,
    pub vault: VaultContractClient<'a>,
    pub governance: Address,
    pub strategist: Address,
    pub user: Address,
    pub keeper: KeeperContractClient<'a>,
    pub external_vault: MockExternalVaultClient<'a>,
    pub farming_pool: MockFarmingPoolClient<'a>,
    pub cdp: MockCdpClient<'a>,
    pub router: MockRouterClient<'a>,
    pub farming: FarmingStrategyClient<'a>,
    pub cdp_strategy: CdpStrategyClient<'a>,
}

pub fn setup_keeper<'a>() -> KeeperTestEnv<'a> {
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
    let user = Address::generate(&env);

    let token = env.register_stellar_asset_contract_v2(admin.clone()).address();
    let reward_token = env.register_stellar_asset_contract_v2(admin.clone()).address();
    let debt_token = env.register_stellar_asset_contract_v2(admin).address();
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

    let keeper = KeeperContractClient::new(
        &env,
        &env.register(KeeperContract, (governance.clone(),)),
    );

    let router = MockRouterClient::new(&env, &env.register(MockRouter, ()));
    router.set_rate(&reward_token, &token, &SCALAR_7);
    router.set_rate(&debt_token, &token, &SCALAR_7);
    StellarAssetClient::new(&env, &token).mint(&router.address, &LIQUIDITY);
    router.sync(&token);

    // farming strategy
    let external_vault = MockExternalVaultClient::new(
        &env,
        &env.register(
            MockExternalVault,
            (token.clone(), treasury.clone(), 20u32, DEFAULT_RESERVE_BPS),
        ),
    );
    let farming_pool = MockFarmingPoolClient::new(
        &env,
        &env.register(MockFarmingPool, (reward_token.clone(),)),
    );
    let pool_id = farming_pool.add_pool(&external_vault.address);
    let farming = FarmingStrategyClient::new(
        &env,
        &env.register(
            FarmingStrategy,
            (
                vault_address.clone(),
                strategist.clone(),
                keeper.address.clone(),
                FarmingConfig {
                    external_vault: external_vault.address.clone(),
                    farming_pool: farming_pool.address.clone(),
                    pool_id,
                    router: router.address.clone(),
                    min_reward_out: 0,
                    slippage_bps: 50,
                },
            ),
        ),
    );

    // CDP strategy
    let cdp = MockCdpClient::new(
        &env,
        &env.register(MockCdp, (token.clone(), debt_token.clone(), SCALAR_7, 150u32)),
    );
    StellarAssetClient::new(&env, &debt_token).mint(&cdp.address, &LIQUIDITY);
    cdp.sync();
    let debt_vault = env.register(
        MockExternalVault,
        (debt_token.clone(), treasury, 0u32, 0u32),
    );
    let cdp_strategy = CdpStrategyClient::new(
        &env,
        &env.register(
            CdpStrategy,
            (
                vault_address.clone(),
                strategist.clone(),
                keeper.address.clone(),
                CollateralConfig {
                    cdp: cdp.address.clone(),
                    debt_vault,
                    router: router.address.clone(),
                    min_ratio: MIN_RATIO,
                    ratio_buffer_bps: 0,
                    min_swap_out: 0,
                    slippage_bps: 50,
                },
            ),
        ),
    );

    vault.add_strategy(&farming.address, &5_000, &0, &i128::MAX, &0);
    vault.add_strategy(&cdp_strategy.address, &5_000, &0, &i128::MAX, &0);
    keeper.add_strategy(&farming.address, &false);
    keeper.add_strategy(&cdp_strategy.address, &true);

    KeeperTestEnv {
        token,
        vault,
        governance,
        strategist,
        user,
        keeper,
        external_vault,
        farming_pool,
        cdp,
        router,
        farming,
        cdp_strategy,
        env,
    }
}
