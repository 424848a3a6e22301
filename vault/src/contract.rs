//! Vault Contract - multi-strategy yield vault
//!
//! Depositors receive shares priced against `total_idle + total_debt`. Capital is
//! lent to registered strategies by debt ratio and reconciled on each strategy
//! `report`. The share token itself is an OpenZeppelin `FungibleToken`.

use soroban_sdk::{contract, contractimpl, token, Address, Env, MuxedAddress, String, Vec};
use stellar_tokens::fungible::{Base, FungibleToken};
use yield_interface::{
    constants::{MAX_BPS, MAX_STRATEGY_PERFORMANCE_FEE},
    StrategyParams,
};

use crate::{
    events::EmergencyShutdown,
    math::Converter,
    storage::{self, Ledger},
    strategy, validation, vault,
};

pub const DEFAULT_PERFORMANCE_FEE: u32 = 1_000;
pub const DEFAULT_MANAGEMENT_FEE: u32 = 200;

#[contract]
pub struct VaultContract;

#[contractimpl]
impl VaultContract {
    /// Initializes the vault
    ///
    /// # Arguments
    /// * `asset` - Address of the underlying token contract
    /// * `governance` - Manages strategies, fees and limits
    /// * `guardian` - May trigger emergency shutdown
    /// * `rewards` - Receives the vault's fee shares
    /// * `name` - Name for the vault share token
    /// * `symbol` - Symbol for the vault share token
    /// * `deposit_limit` - Cap on total assets accepted through deposits
    pub fn __constructor(
        e: Env,
        asset: Address,
        governance: Address,
        guardian: Address,
        rewards: Address,
        name: String,
        symbol: String,
        deposit_limit: i128,
    ) {
        let decimals = token::Client::new(&e, &asset).decimals();
        Base::set_metadata(&e, decimals, name, symbol);

        storage::set_token(&e, &asset);
        storage::set_governance(&e, &governance);
        storage::set_guardian(&e, &guardian);
        storage::set_rewards(&e, &rewards);
        storage::set_ledger(
            &e,
            &Ledger {
                total_idle: 0,
                total_debt: 0,
                debt_ratio: 0,
                deposit_limit,
                performance_fee: DEFAULT_PERFORMANCE_FEE,
                management_fee: DEFAULT_MANAGEMENT_FEE,
                emergency_shutdown: false,
            },
        );
        storage::set_withdrawal_queue(&e, &Vec::new(&e));
    }

    // ==================== Depositors ====================

    /// Deposits `amount` of the asset from `from` and returns the shares minted
    pub fn deposit(e: Env, from: Address, amount: i128) -> i128 {
        from.require_auth();
        let shares = vault::deposit(&e, &from, amount);
        storage::extend_instance(&e);
        shares
    }

    /// Redeems `shares` of `owner` to `recipient`, accepting at most
    /// `max_loss_bps` of realized strategy losses. Returns the amount sent.
    pub fn withdraw(
        e: Env,
        owner: Address,
        shares: i128,
        recipient: Address,
        max_loss_bps: u32,
    ) -> i128 {
        owner.require_auth();
        let amount = vault::withdraw(&e, &owner, shares, &recipient, max_loss_bps);
        storage::extend_instance(&e);
        amount
    }

    // ==================== Strategy callbacks ====================

    pub fn report(e: Env, strategy: Address, gain: i128, loss: i128, debt_payment: i128) -> i128 {
        let outstanding = strategy::report(&e, &strategy, gain, loss, debt_payment);
        storage::extend_instance(&e);
        outstanding
    }

    /// Revokes `strategy`; callable by governance or by the strategy itself
    pub fn revoke_strategy(e: Env, caller: Address, strategy: Address) {
        strategy::revoke_strategy(&e, &caller, &strategy);
        storage::extend_instance(&e);
    }

    // ==================== Governance ====================

    pub fn add_strategy(
        e: Env,
        strategy: Address,
        debt_ratio: u32,
        min_debt_per_harvest: i128,
        max_debt_per_harvest: i128,
        performance_fee: u32,
    ) {
        strategy::add_strategy(
            &e,
            &strategy,
            debt_ratio,
            min_debt_per_harvest,
            max_debt_per_harvest,
            performance_fee,
        );
        storage::extend_instance(&e);
    }

    pub fn update_strategy_debt_ratio(e: Env, strategy: Address, debt_ratio: u32) {
        strategy::update_debt_ratio(&e, &strategy, debt_ratio);
        storage::extend_instance(&e);
    }

    pub fn update_strategy_debt_bounds(
        e: Env,
        strategy: Address,
        min_debt_per_harvest: i128,
        max_debt_per_harvest: i128,
    ) {
        strategy::update_debt_bounds(&e, &strategy, min_debt_per_harvest, max_debt_per_harvest);
        storage::extend_instance(&e);
    }

    pub fn update_strategy_performance_fee(e: Env, strategy: Address, performance_fee: u32) {
        strategy::update_performance_fee(&e, &strategy, performance_fee);
        storage::extend_instance(&e);
    }

    pub fn migrate_strategy(e: Env, old_strategy: Address, new_strategy: Address) {
        strategy::migrate_strategy(&e, &old_strategy, &new_strategy);
        storage::extend_instance(&e);
    }

    pub fn set_withdrawal_queue(e: Env, queue: Vec<Address>) {
        strategy::set_withdrawal_queue(&e, &queue);
        storage::extend_instance(&e);
    }

    pub fn set_deposit_limit(e: Env, limit: i128) {
        validation::require_governance(&e);
        validation::require_non_negative_amount(&e, limit);
        let mut ledger = storage::get_ledger(&e);
        ledger.deposit_limit = limit;
        storage::set_ledger(&e, &ledger);
        storage::extend_instance(&e);
    }

    /// Sets the vault performance fee (bps of gain, paid to `rewards`)
    pub fn set_performance_fee(e: Env, fee: u32) {
        validation::require_governance(&e);
        validation::require_valid_fee(&e, fee, MAX_STRATEGY_PERFORMANCE_FEE);
        let mut ledger = storage::get_ledger(&e);
        ledger.performance_fee = fee;
        storage::set_ledger(&e, &ledger);
        storage::extend_instance(&e);
    }

    /// Sets the management fee (bps per year of strategy debt)
    pub fn set_management_fee(e: Env, fee: u32) {
        validation::require_governance(&e);
        validation::require_valid_fee(&e, fee, MAX_BPS as u32);
        let mut ledger = storage::get_ledger(&e);
        ledger.management_fee = fee;
        storage::set_ledger(&e, &ledger);
        storage::extend_instance(&e);
    }

    /// Activating is open to governance and guardian; deactivating only to governance
    pub fn set_emergency_shutdown(e: Env, caller: Address, active: bool) {
        if active {
            validation::require_role(
                &e,
                &caller,
                &[storage::get_governance(&e), storage::get_guardian(&e)],
            );
        } else {
            validation::require_role(&e, &caller, &[storage::get_governance(&e)]);
        }
        let mut ledger = storage::get_ledger(&e);
        ledger.emergency_shutdown = active;
        storage::set_ledger(&e, &ledger);
        EmergencyShutdown { active }.publish(&e);
        storage::extend_instance(&e);
    }

    pub fn set_governance(e: Env, governance: Address) {
        validation::require_governance(&e);
        storage::set_governance(&e, &governance);
        storage::extend_instance(&e);
    }

    pub fn set_guardian(e: Env, guardian: Address) {
        validation::require_governance(&e);
        storage::set_guardian(&e, &guardian);
        storage::extend_instance(&e);
    }

    pub fn set_rewards(e: Env, rewards: Address) {
        validation::require_governance(&e);
        storage::set_rewards(&e, &rewards);
        storage::extend_instance(&e);
    }

    // ==================== Views ====================

    pub fn token(e: Env) -> Address {
        storage::get_token(&e)
    }

    pub fn governance(e: Env) -> Address {
        storage::get_governance(&e)
    }

    pub fn guardian(e: Env) -> Address {
        storage::get_guardian(&e)
    }

    pub fn rewards(e: Env) -> Address {
        storage::get_rewards(&e)
    }

    pub fn ledger(e: Env) -> Ledger {
        storage::get_ledger(&e)
    }

    pub fn total_assets(e: Env) -> i128 {
        storage::get_ledger(&e).total_assets()
    }

    pub fn total_idle(e: Env) -> i128 {
        storage::get_ledger(&e).total_idle
    }

    pub fn total_debt(e: Env) -> i128 {
        storage::get_ledger(&e).total_debt
    }

    pub fn debt_ratio(e: Env) -> u32 {
        storage::get_ledger(&e).debt_ratio
    }

    pub fn emergency_shutdown(e: Env) -> bool {
        storage::get_ledger(&e).emergency_shutdown
    }

    /// Remaining room under the deposit limit
    pub fn available_deposit_limit(e: Env) -> i128 {
        let ledger = storage::get_ledger(&e);
        (ledger.deposit_limit - ledger.total_assets()).max(0)
    }

    /// Value of one whole share in asset units
    pub fn price_per_share(e: Env) -> i128 {
        let one_share = 10i128.pow(Base::decimals(&e));
        let total_supply = Base::total_supply(&e);
        if total_supply == 0 {
            return one_share;
        }
        Converter::new(total_supply, storage::get_ledger(&e).total_assets())
            .redemption_value(one_share)
    }

    /// Shares that could be redeemed if every strategy repaid its debt
    pub fn max_available_shares(e: Env) -> i128 {
        let ledger = storage::get_ledger(&e);
        let total_supply = Base::total_supply(&e);
        let mut available = ledger.total_idle;
        for address in storage::get_withdrawal_queue(&e).iter() {
            if let Some(params) = storage::get_strategy(&e, &address) {
                available += params.total_debt;
            }
        }
        Converter::new(total_supply, ledger.total_assets())
            .shares_from_tokens(available)
            .min(total_supply)
    }

    pub fn strategy(e: Env, strategy: Address) -> StrategyParams {
        validation::require_active_strategy(&e, &strategy)
    }

    pub fn withdrawal_queue(e: Env) -> Vec<Address> {
        storage::get_withdrawal_queue(&e)
    }

    pub fn debt_outstanding(e: Env, strategy: Address) -> i128 {
        let params = validation::require_active_strategy(&e, &strategy);
        strategy::debt_outstanding(&storage::get_ledger(&e), &params)
    }

    pub fn credit_available(e: Env, strategy: Address) -> i128 {
        let params = validation::require_active_strategy(&e, &strategy);
        strategy::credit_available(&storage::get_ledger(&e), &params)
    }
}

// Share token functionality
#[contractimpl(contracttrait)]
impl FungibleToken for VaultContract {
    type ContractType = Base;
}
