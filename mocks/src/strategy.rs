//! Minimal strategy parking its want in a single external vault

use soroban_sdk::{contract, contractimpl, token, Address, Env};
use yield_interface::{ExternalVaultClient, HarvestReport};
use yield_strategy::{base, math, storage, Position};

/// Shares of one external vault, held directly
pub struct ExternalDeposit;

impl ExternalDeposit {
    fn external_vault(e: &Env) -> ExternalVaultClient<'_> {
        ExternalVaultClient::new(e, &storage::get_config::<Address>(e))
    }

    fn shares(e: &Env) -> i128 {
        Self::external_vault(e).balance(&e.current_contract_address())
    }
}

impl Position for ExternalDeposit {
    fn estimated_total_assets(e: &Env) -> i128 {
        let price_per_share = Self::external_vault(e).price_per_full_share();
        base::want_balance(e) + math::share_value(Self::shares(e), price_per_share)
    }

    fn harvest_yield(_e: &Env) {}

    fn adjust_position(e: &Env, debt_outstanding: i128) {
        let amount = base::want_balance(e) - debt_outstanding;
        if amount <= 0 {
            return;
        }
        let me = e.current_contract_address();
        let external_vault = Self::external_vault(e);
        token::Client::new(e, &storage::get_want(e)).transfer(
            &me,
            &external_vault.address,
            &amount,
        );
        external_vault.deposit(&me, &amount);
    }

    fn liquidate_position(e: &Env, amount: i128) {
        let external_vault = Self::external_vault(e);
        let shares = math::shares_for_value(amount, external_vault.price_per_full_share())
            .min(Self::shares(e));
        if shares > 0 {
            external_vault.withdraw(&e.current_contract_address(), &shares);
        }
    }

    fn liquidate_all_positions(e: &Env) -> i128 {
        let shares = Self::shares(e);
        if shares > 0 {
            Self::external_vault(e).withdraw(&e.current_contract_address(), &shares);
        }
        base::want_balance(e)
    }

    fn rounding_tolerance(e: &Env) -> i128 {
        math::conversion_dust(
            Self::shares(e),
            Self::external_vault(e).price_per_full_share(),
        )
    }

    fn prepare_migration(e: &Env, new_strategy: &Address) {
        let shares = Self::shares(e);
        if shares > 0 {
            token::Client::new(e, &storage::get_config::<Address>(e)).transfer(
                &e.current_contract_address(),
                new_strategy,
                &shares,
            );
        }
    }
}

#[contract]
pub struct MockStrategy;

#[contractimpl]
impl MockStrategy {
    pub fn __constructor(
        e: Env,
        vault: Address,
        strategist: Address,
        keeper: Address,
        external_vault: Address,
    ) {
        base::initialize(&e, &vault, &strategist, &keeper);
        storage::set_config(&e, &external_vault);
    }

    pub fn want(e: Env) -> Address {
        storage::get_want(&e)
    }

    pub fn vault(e: Env) -> Address {
        storage::get_vault(&e)
    }

    pub fn strategist(e: Env) -> Address {
        storage::get_strategist(&e)
    }

    pub fn estimated_total_assets(e: Env) -> i128 {
        ExternalDeposit::estimated_total_assets(&e)
    }

    pub fn withdraw(e: Env, amount: i128) -> i128 {
        base::withdraw::<ExternalDeposit>(&e, amount)
    }

    pub fn migrate(e: Env, new_strategy: Address) {
        base::migrate::<ExternalDeposit>(&e, &new_strategy);
    }

    pub fn harvest(e: Env, caller: Address) -> HarvestReport {
        base::harvest::<ExternalDeposit>(&e, &caller)
    }

    pub fn harvest_trigger(e: Env) -> bool {
        base::harvest_trigger::<ExternalDeposit>(&e)
    }

    pub fn set_emergency_exit(e: Env, caller: Address) {
        base::set_emergency_exit(&e, &caller);
    }

    pub fn emergency_exit(e: Env) -> bool {
        storage::is_emergency_exit(&e)
    }

    pub fn set_keeper(e: Env, caller: Address, keeper: Address) {
        base::set_keeper(&e, &caller, &keeper);
    }
}
