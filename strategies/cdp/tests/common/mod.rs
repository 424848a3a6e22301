#![allow(dead_code)]

use cdp_strategy::{CdpStrategy, CdpStrategyClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env, String,
};
use yield_mocks::{
    MockCdp, MockCdpClient, MockExternalVault, MockExternalVaultClient, MockRouter,
    MockRouterClient,
};
use yield_strategy::CollateralConfig;
use yield_vault::{VaultContract, VaultContractClient};

// Constants
pub const SCALAR_7: i128 = 10_000_000;
pub const MAX_BPS: u32 = 10_000;
pub const ONE_DAY_LEDGERS: u32 = 17280; // assumes 5s a ledger

// Default configuration values
pub const LIQUIDATION_RATIO: u32 = 150;
pub const MIN_RATIO: u32 = 180;
pub const DEFAULT_SLIPPAGE_BPS: u32 = 50;
pub const USER_FUNDS: i128 = 100_000_000 * SCALAR_7;
pub const CDP_RESERVE: i128 = 1_000_000 * SCALAR_7;

/// A vault with one CDP strategy and all of its collaborators
pub struct CdpTestEnv<'a> {
    pub env: Env,
    pub token: Address,
    pub debt_token: Address,
    pub vault: VaultContractClient<'a>,
    pub governance: Address,
    pub treasury: Address,
    pub cdp: MockCdpClient<'a>,
    pub debt_vault: MockExternalVaultClient<'a>,
    pub router: MockRouterClient<'a>,
    pub strategy: CdpStrategyClient<'a>,
    pub strategist: Address,
    pub keeper: Address,
    pub user: Address,
}

/// Want and the debt asset trade 1:1 both on the CDP oracle and the router
pub fn setup_cdp<'a>(debt_vault_fee_bps: u32) -> CdpTestEnv<'a> {
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

    let cdp = MockCdpClient::new(
        &env,
        &env.register(
            MockCdp,
            (token.clone(), debt_token.clone(), SCALAR_7, LIQUIDATION_RATIO),
        ),
    );
    StellarAssetClient::new(&env, &debt_token).mint(&cdp.address, &CDP_RESERVE);
    cdp.sync();

    let debt_vault = MockExternalVaultClient::new(
        &env,
        &env.register(
            MockExternalVault,
            (debt_token.clone(), treasury.clone(), debt_vault_fee_bps, 0u32),
        ),
    );

    let router = MockRouterClient::new(&env, &env.register(MockRouter, ()));
    router.set_rate(&debt_token, &token, &SCALAR_7);
    router.set_rate(&token, &debt_token, &SCALAR_7);
    StellarAssetClient::new(&env, &token).mint(&router.address, &CDP_RESERVE);
    StellarAssetClient::new(&env, &debt_token).mint(&router.address, &CDP_RESERVE);
    router.sync(&token);
    router.sync(&debt_token);

    let config = CollateralConfig {
        cdp: cdp.address.clone(),
        debt_vault: debt_vault.address.clone(),
        router: router.address.clone(),
        min_ratio: MIN_RATIO,
        ratio_buffer_bps: 0,
        min_swap_out: 0,
        slippage_bps: DEFAULT_SLIPPAGE_BPS,
    };
    let strategy_address = env.register(
        CdpStrategy,
        (
            vault_address.clone(),
            strategist.clone(),
            keeper.clone(),
            config,
        ),
    );
    vault.add_strategy(&strategy_address, &MAX_BPS, &0, &i128::MAX, &0);

    CdpTestEnv {
        token,
        debt_token,
        vault,
        governance,
        treasury,
        cdp,
        debt_vault,
        router,
        strategy: CdpStrategyClient::new(&env, &strategy_address),
        strategist,
        keeper,
        user,
        env,
    }
}

impl<'a> CdpTestEnv<'a> {
    pub fn token_balance(&self, id: &Address) -> i128 {
        TokenClient::new(&self.env, &self.token).balance(id)
    }

    pub fn debt_balance(&self, id: &Address) -> i128 {
        TokenClient::new(&self.env, &self.debt_token).balance(id)
    }

    pub fn deposit(&self, amount: i128) -> i128 {
        self.vault.deposit(&self.user, &amount)
    }

    /// Deposits `amount` and lets the strategy borrow against it
    pub fn open_position(&self, amount: i128) -> i128 {
        let shares = self.deposit(amount);
        self.strategy.harvest(&self.keeper);
        shares
    }

    /// Sends debt asset yield straight to the debt vault and recognizes it
    pub fn simulate_debt_yield(&self, amount: i128) {
        StellarAssetClient::new(&self.env, &self.debt_token)
            .mint(&self.debt_vault.address, &amount);
        self.debt_vault.report_yield();
    }

    /// Deploys a second CDP strategy for the same vault
    pub fn deploy_strategy(&self) -> CdpStrategyClient<'a> {
        let address = self.env.register(
            CdpStrategy,
            (
                self.vault.address.clone(),
                self.strategist.clone(),
                self.keeper.clone(),
                self.strategy.collateral_config(),
            ),
        );
        CdpStrategyClient::new(&self.env, &address)
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
