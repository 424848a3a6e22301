//! Roles and the generic harvest engine shared by every strategy contract

use soroban_sdk::{log, panic_with_error, token, Address, Env};
use yield_interface::{HarvestReport, VaultClient};

use crate::{
    errors::StrategyError,
    events::{EmergencyExitEnabled, Harvested, Migrated, RoleUpdated},
    position::Position,
    storage,
};

pub const ROLE_STRATEGIST: u32 = 1;
pub const ROLE_KEEPER: u32 = 2;

/// Stores the strategy roles; the want token is read from the vault
pub fn initialize(e: &Env, vault: &Address, strategist: &Address, keeper: &Address) {
    let want = VaultClient::new(e, vault).token();
    storage::set_vault(e, vault);
    storage::set_want(e, &want);
    storage::set_strategist(e, strategist);
    storage::set_keeper(e, keeper);
}

pub fn governance(e: &Env) -> Address {
    VaultClient::new(e, &storage::get_vault(e)).governance()
}

fn require_one_of(e: &Env, caller: &Address, roles: &[Address]) {
    caller.require_auth();
    if !roles.contains(caller) {
        panic_with_error!(e, StrategyError::Unauthorized);
    }
}

/// Keeper, strategist or governance
pub fn require_harvester(e: &Env, caller: &Address) {
    require_one_of(
        e,
        caller,
        &[
            storage::get_keeper(e),
            storage::get_strategist(e),
            governance(e),
        ],
    );
}

/// Strategist or governance
pub fn require_manager(e: &Env, caller: &Address) {
    require_one_of(e, caller, &[storage::get_strategist(e), governance(e)]);
}

pub fn set_strategist(e: &Env, caller: &Address, strategist: &Address) {
    require_manager(e, caller);
    storage::set_strategist(e, strategist);
    RoleUpdated {
        role: ROLE_STRATEGIST,
        holder: strategist.clone(),
    }
    .publish(e);
}

pub fn set_keeper(e: &Env, caller: &Address, keeper: &Address) {
    require_manager(e, caller);
    storage::set_keeper(e, keeper);
    RoleUpdated {
        role: ROLE_KEEPER,
        holder: keeper.clone(),
    }
    .publish(e);
}

pub fn want_balance(e: &Env) -> i128 {
    token::Client::new(e, &storage::get_want(e)).balance(&e.current_contract_address())
}

fn send_want(e: &Env, to: &Address, amount: i128) {
    if amount > 0 {
        token::Client::new(e, &storage::get_want(e)).transfer(
            &e.current_contract_address(),
            to,
            &amount,
        );
    }
}

/// Frees up to `needed` want and returns `(freed, loss)`, where `loss` is the
/// drop in estimated assets caused by unwinding.
pub fn liquidate<P: Position>(e: &Env, needed: i128) -> (i128, i128) {
    let idle = want_balance(e);
    if idle >= needed {
        return (needed, 0);
    }
    let assets_before = P::estimated_total_assets(e);
    P::liquidate_position(e, needed - idle);
    let assets_after = P::estimated_total_assets(e);
    (
        needed.min(want_balance(e)),
        (assets_before - assets_after).max(0),
    )
}

/// Settles the strategy with its vault and reinvests
pub fn harvest<P: Position>(e: &Env, caller: &Address) -> HarvestReport {
    require_harvester(e, caller);

    let vault_address = storage::get_vault(e);
    let vault = VaultClient::new(e, &vault_address);
    let me = e.current_contract_address();
    let total_debt = vault.strategy(&me).total_debt;
    let debt_outstanding = vault.debt_outstanding(&me);
    let emergency_exit = storage::is_emergency_exit(e);

    let (profit, loss, debt_payment) = if emergency_exit {
        let freed = P::liquidate_all_positions(e);
        let loss = (debt_outstanding - freed).max(0);
        let profit = (freed - debt_outstanding).max(0);
        (profit, loss, debt_outstanding - loss)
    } else {
        P::harvest_yield(e);
        let assets = P::estimated_total_assets(e);
        let to_free = (assets - total_debt).max(0) + debt_outstanding;
        if to_free > 0 {
            liquidate::<P>(e, to_free);
        }

        let assets = P::estimated_total_assets(e);
        let idle = want_balance(e);
        let debt_payment = debt_outstanding.min(idle);
        if assets + P::rounding_tolerance(e) >= total_debt {
            let profit = (assets - total_debt).max(0).min(idle - debt_payment);
            (profit, 0, debt_payment)
        } else {
            (0, total_debt - assets, debt_payment)
        }
    };

    send_want(e, &vault_address, profit + debt_payment);
    let outstanding = vault.report(&me, &profit, &loss, &debt_payment);

    if !emergency_exit {
        P::adjust_position(e, outstanding);
    }

    log!(e, "harvest", profit, loss, debt_payment, outstanding);
    Harvested {
        vault: vault_address,
        profit,
        loss,
        debt_payment,
        debt_outstanding: outstanding,
    }
    .publish(e);

    HarvestReport {
        profit,
        loss,
        debt_payment,
        debt_outstanding: outstanding,
    }
}

/// Vault-only: frees up to `amount`, sends it to the vault and returns the loss
pub fn withdraw<P: Position>(e: &Env, amount: i128) -> i128 {
    let vault = storage::get_vault(e);
    vault.require_auth();
    if amount <= 0 {
        panic_with_error!(e, StrategyError::InvalidAmount);
    }
    let (freed, loss) = liquidate::<P>(e, amount);
    send_want(e, &vault, freed);
    loss
}

/// Vault-only: moves every holding to `new_strategy`
pub fn migrate<P: Position>(e: &Env, new_strategy: &Address) {
    storage::get_vault(e).require_auth();
    P::prepare_migration(e, new_strategy);
    let amount = want_balance(e);
    send_want(e, new_strategy, amount);
    Migrated {
        new_strategy: new_strategy.clone(),
        amount,
    }
    .publish(e);
}

/// Flags the strategy for unwinding and revokes it in the vault
pub fn set_emergency_exit(e: &Env, caller: &Address) {
    require_manager(e, caller);
    if storage::is_emergency_exit(e) {
        panic_with_error!(e, StrategyError::EmergencyExitActive);
    }
    storage::set_emergency_exit(e, true);
    let me = e.current_contract_address();
    VaultClient::new(e, &storage::get_vault(e)).revoke_strategy(&me, &me);
    EmergencyExitEnabled {
        caller: caller.clone(),
    }
    .publish(e);
}

/// True when a harvest would move funds or book earnings
pub fn harvest_trigger<P: Position>(e: &Env) -> bool {
    if P::harvest_trigger(e) {
        return true;
    }
    let vault = VaultClient::new(e, &storage::get_vault(e));
    let me = e.current_contract_address();
    let credit = match vault.try_credit_available(&me) {
        Ok(Ok(credit)) => credit,
        _ => return false,
    };
    credit > 0 || vault.debt_outstanding(&me) > 0
}
