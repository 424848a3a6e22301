#![allow(dead_code)]

use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env, String, Vec,
};
use yield_mocks::{MockExternalVault, MockExternalVaultClient, MockStrategy, MockStrategyClient};
use yield_vault::{VaultContract, VaultContractClient};

// Constants
pub const SCALAR_7: i128 = 10_000_000;
pub const MAX_BPS: u32 = 10_000;
pub const ONE_DAY_LEDGERS: u32 = 17280; // assumes 5s a ledger
pub const SECS_PER_YEAR: u64 = 31_556_952;

// Default configuration values
pub const DEFAULT_DEPOSIT_LIMIT: i128 = 1_000_000_000 * SCALAR_7;
pub const DEFAULT_WITHDRAW_FEE_BPS: u32 = 20;
pub const USER_FUNDS: i128 = 100_000_000 * SCALAR_7;

/// Test environment with all necessary components
pub struct TestEnv<'a> {
    pub env: Env,
    pub token: Address,
    pub vault: VaultContractClient<'a>,
    pub governance: Address,
    pub guardian: Address,
    pub rewards: Address,
    pub treasury: Address,
    pub users: Vec<Address>,
}

/// A mock strategy and the external vault it parks funds in
pub struct StrategyHandle<'a> {
    pub strategy: MockStrategyClient<'a>,
    pub external_vault: MockExternalVaultClient<'a>,
    pub strategist: Address,
    pub keeper: Address,
}

/// Configuration for vault setup
pub struct VaultConfig {
    pub deposit_limit: i128,
    pub performance_fee: u32,
    pub management_fee: u32,
    pub num_users: u32,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            deposit_limit: DEFAULT_DEPOSIT_LIMIT,
            performance_fee: 0,
            management_fee: 0,
            num_users: 2,
        }
    }
}

/// Creates a complete test environment with vault, token and funded users
pub fn setup_vault_with_config<'a>(config: VaultConfig) -> TestEnv<'a> {
    let env = Env::default();
    env.cost_estimate().budget().reset_unlimited();
    env.mock_all_auths();

    // Set TTL parameters
    env.ledger().set_min_temp_entry_ttl(ONE_DAY_LEDGERS);
    env.ledger().set_min_persistent_entry_ttl(ONE_DAY_LEDGERS * 30);
    env.ledger().set_timestamp(1_700_000_000);

    let admin = Address::generate(&env);
    let governance = Address::generate(&env);
    let guardian = Address::generate(&env);
    let rewards = Address::generate(&env);
    let treasury = Address::generate(&env);

    // Deploy underlying token
    let token = env.register_stellar_asset_contract_v2(admin.clone());

    let mut users = Vec::new(&env);
    for _ in 0..config.num_users {
        let user = Address::generate(&env);
        StellarAssetClient::new(&env, &token.address()).mint(&user, &USER_FUNDS);
        users.push_back(user);
    }

    // Deploy vault
    let vault_address = env.register(
        VaultContract,
        (
            token.address(),
            governance.clone(),
            guardian.clone(),
            rewards.clone(),
            String::from_str(&env, "Yield Vault Shares"),
            String::from_str(&env, "yvTKN"),
            config.deposit_limit,
        ),
    );
    let vault = VaultContractClient::new(&env, &vault_address);
    vault.set_performance_fee(&config.performance_fee);
    vault.set_management_fee(&config.management_fee);

    TestEnv {
        env,
        token: token.address(),
        vault,
        governance,
        guardian,
        rewards,
        treasury,
        users,
    }
}

/// Creates a basic test environment with default configuration
pub fn setup_vault<'a>() -> TestEnv<'a> {
    setup_vault_with_config(VaultConfig::default())
}

/// Helper functions for TestEnv
impl<'a> TestEnv<'a> {
    pub fn user(&self, index: u32) -> Address {
        self.users.get(index).unwrap()
    }

    /// Get token client for the underlying token
    pub fn token_client(&self) -> TokenClient<'a> {
        TokenClient::new(&self.env, &self.token)
    }

    /// Mint tokens to any address
    pub fn mint_tokens(&self, to: &Address, amount: i128) {
        StellarAssetClient::new(&self.env, &self.token).mint(to, &amount);
    }

    pub fn token_balance(&self, id: &Address) -> i128 {
        self.token_client().balance(id)
    }

    pub fn share_balance(&self, id: &Address) -> i128 {
        self.vault.balance(id)
    }

    /// Get vault's token balance
    pub fn vault_balance(&self) -> i128 {
        self.token_balance(&self.vault.address)
    }

    /// Advance time by seconds
    pub fn advance_time(&self, seconds: u64) {
        let current = self.env.ledger().timestamp();
        self.env.ledger().set_timestamp(current + seconds);
    }

    /// Deploys a mock strategy for this vault without registering it
    pub fn create_strategy(&self, withdraw_fee_bps: u32) -> StrategyHandle<'a> {
        self.create_strategy_for(&self.vault.address, withdraw_fee_bps)
    }

    pub fn create_strategy_for(
        &self,
        vault: &Address,
        withdraw_fee_bps: u32,
    ) -> StrategyHandle<'a> {
        let external_vault_address = self.env.register(
            MockExternalVault,
            (self.token.clone(), self.treasury.clone(), withdraw_fee_bps, 0u32),
        );
        self.create_strategy_on(vault, &external_vault_address)
    }

    /// Deploys a second strategy parking funds in the same external vault
    pub fn create_sibling_strategy(&self, handle: &StrategyHandle) -> StrategyHandle<'a> {
        self.create_strategy_on(&self.vault.address, &handle.external_vault.address)
    }

    fn create_strategy_on(
        &self,
        vault: &Address,
        external_vault_address: &Address,
    ) -> StrategyHandle<'a> {
        let strategist = Address::generate(&self.env);
        let keeper = Address::generate(&self.env);
        let strategy_address = self.env.register(
            MockStrategy,
            (
                vault.clone(),
                strategist.clone(),
                keeper.clone(),
                external_vault_address.clone(),
            ),
        );
        StrategyHandle {
            strategy: MockStrategyClient::new(&self.env, &strategy_address),
            external_vault: MockExternalVaultClient::new(&self.env, external_vault_address),
            strategist,
            keeper,
        }
    }

    /// Deploys and registers a mock strategy with unbounded harvest limits
    pub fn add_strategy(&self, debt_ratio: u32, withdraw_fee_bps: u32) -> StrategyHandle<'a> {
        let handle = self.create_strategy(withdraw_fee_bps);
        self.vault
            .add_strategy(&handle.strategy.address, &debt_ratio, &0, &i128::MAX, &0);
        handle
    }

    /// Deploys another vault over the same asset
    pub fn deploy_other_vault(&self) -> Address {
        self.env.register(
            VaultContract,
            (
                self.token.clone(),
                self.governance.clone(),
                self.guardian.clone(),
                self.rewards.clone(),
                String::from_str(&self.env, "Other Vault Shares"),
                String::from_str(&self.env, "ovTKN"),
                DEFAULT_DEPOSIT_LIMIT,
            ),
        )
    }

    pub fn deposit(&self, user: &Address, amount: i128) -> i128 {
        self.vault.deposit(user, &amount)
    }

    /// Sends yield straight to the strategy's external vault and recognizes it
    pub fn simulate_yield(&self, handle: &StrategyHandle, amount: i128) {
        self.mint_tokens(&handle.external_vault.address, amount);
        handle.external_vault.report_yield();
    }

    /// Checks the ledger aggregates against the per-strategy params
    pub fn assert_ledger_consistent(&self) {
        let mut total_debt = 0;
        let mut total_ratio = 0;
        for strategy in self.vault.withdrawal_queue().iter() {
            let params = self.vault.strategy(&strategy);
            total_debt += params.total_debt;
            total_ratio += params.debt_ratio;
        }
        assert_eq!(self.vault.total_debt(), total_debt, "total debt mismatch");
        assert_eq!(self.vault.debt_ratio(), total_ratio, "debt ratio mismatch");
        assert!(total_ratio <= MAX_BPS, "debt ratio above 100%");
        assert_eq!(
            self.vault_balance(),
            self.vault.total_idle(),
            "idle balance mismatch"
        );
    }
}

/// Asserts two values are approximately equal (within 0.01%)
pub fn assert_approx_eq(actual: i128, expected: i128, msg: &str) {
    let tolerance = expected.abs() / 10000; // 0.01%
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} ± {}, got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
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
