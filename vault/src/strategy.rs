//! Strategy registry, debt allocation and the report/migrate callbacks

use soroban_fixed_point_math::FixedPoint;
use soroban_sdk::{log, panic_with_error, token, unwrap::UnwrapOptimized, Address, Env, Vec};
use stellar_tokens::fungible::Base;
use yield_interface::{
    constants::{MAX_BPS, MAXIMUM_STRATEGIES, MAX_STRATEGY_PERFORMANCE_FEE},
    StrategyClient, StrategyParams,
};

use crate::{
    errors::VaultError,
    events::{
        FeesAssessed, StrategyAdded, StrategyMigrated, StrategyReported, StrategyRevoked,
        StrategyUpdated, WithdrawalQueueUpdated,
    },
    math::{self, Converter},
    storage::{self, Ledger},
    validation,
};

fn limit_for_ratio(ledger: &Ledger, ratio: u32) -> i128 {
    ledger
        .total_assets()
        .fixed_mul_floor(ratio as i128, MAX_BPS)
        .unwrap_optimized()
}

/// Debt the strategy should hand back to the vault
pub fn debt_outstanding(ledger: &Ledger, params: &StrategyParams) -> i128 {
    if ledger.debt_ratio == 0 || ledger.emergency_shutdown {
        return params.total_debt;
    }
    let strategy_limit = limit_for_ratio(ledger, params.debt_ratio);
    (params.total_debt - strategy_limit).max(0)
}

/// Fresh funds the vault is willing to lend the strategy on its next report
pub fn credit_available(ledger: &Ledger, params: &StrategyParams) -> i128 {
    if ledger.emergency_shutdown {
        return 0;
    }
    let vault_limit = limit_for_ratio(ledger, ledger.debt_ratio);
    let strategy_limit = limit_for_ratio(ledger, params.debt_ratio);
    if strategy_limit <= params.total_debt || vault_limit <= ledger.total_debt {
        return 0;
    }

    let available = (strategy_limit - params.total_debt)
        .min(vault_limit - ledger.total_debt)
        .min(ledger.total_idle);
    if available < params.min_debt_per_harvest {
        0
    } else {
        available.min(params.max_debt_per_harvest)
    }
}

/// Books a realized loss against the strategy and shrinks its allocation
pub fn book_loss(env: &Env, ledger: &mut Ledger, params: &mut StrategyParams, loss: i128) {
    if loss > params.total_debt {
        panic_with_error!(env, VaultError::InvalidLoss);
    }
    if ledger.debt_ratio > 0 && ledger.total_debt > 0 {
        let ratio_change = loss
            .fixed_mul_floor(ledger.debt_ratio as i128, ledger.total_debt)
            .unwrap_optimized()
            .min(params.debt_ratio as i128) as u32;
        params.debt_ratio -= ratio_change;
        ledger.debt_ratio -= ratio_change;
    }
    params.total_loss += loss;
    params.total_debt -= loss;
    ledger.total_debt -= loss;
}

/// Mints fee shares at the pre-gain price; returns the fee in tokens
fn assess_fees(
    env: &Env,
    ledger: &Ledger,
    params: &StrategyParams,
    strategy: &Address,
    gain: i128,
) -> i128 {
    if gain == 0 {
        return 0;
    }
    let elapsed = env.ledger().timestamp().saturating_sub(params.last_report);
    let management_fee = math::management_fee(params.total_debt, elapsed, ledger.management_fee);
    let strategist_fee = math::bps_of(gain, params.performance_fee);
    let performance_fee = math::bps_of(gain, ledger.performance_fee);

    let total_fee = (management_fee + strategist_fee + performance_fee).min(gain);
    if total_fee <= 0 {
        return 0;
    }

    let converter = Converter::new(Base::total_supply(env), ledger.total_assets());
    let reward_shares = converter.shares_from_tokens(total_fee);
    if reward_shares <= 0 {
        return 0;
    }
    let strategist_shares = reward_shares
        .fixed_mul_floor(strategist_fee, management_fee + strategist_fee + performance_fee)
        .unwrap_optimized();
    if strategist_shares > 0 {
        let strategist = StrategyClient::new(env, strategy).strategist();
        Base::mint(env, &strategist, strategist_shares);
    }
    if reward_shares > strategist_shares {
        Base::mint(env, &storage::get_rewards(env), reward_shares - strategist_shares);
    }

    FeesAssessed {
        strategy: strategy.clone(),
        management_fee,
        performance_fee,
        strategist_fee,
        shares: reward_shares,
    }
    .publish(env);
    total_fee
}

fn require_matching_strategy(env: &Env, strategy: &Address) {
    let client = StrategyClient::new(env, strategy);
    if client.vault() != env.current_contract_address() || client.want() != storage::get_token(env)
    {
        panic_with_error!(env, VaultError::InvalidStrategy);
    }
}

fn publish_update(env: &Env, strategy: &Address, params: &StrategyParams) {
    StrategyUpdated {
        strategy: strategy.clone(),
        debt_ratio: params.debt_ratio,
        min_debt_per_harvest: params.min_debt_per_harvest,
        max_debt_per_harvest: params.max_debt_per_harvest,
        performance_fee: params.performance_fee,
    }
    .publish(env);
}

/// Registers a new strategy at the end of the withdrawal queue
pub fn add_strategy(
    env: &Env,
    strategy: &Address,
    debt_ratio: u32,
    min_debt_per_harvest: i128,
    max_debt_per_harvest: i128,
    performance_fee: u32,
) {
    validation::require_governance(env);
    let mut ledger = storage::get_ledger(env);
    validation::require_not_shutdown(env, &ledger);
    if storage::has_strategy(env, strategy) {
        panic_with_error!(env, VaultError::StrategyExists);
    }
    validation::require_valid_bps(env, debt_ratio);
    validation::require_debt_ratio_within_limit(env, ledger.debt_ratio + debt_ratio);
    validation::require_valid_debt_bounds(env, min_debt_per_harvest, max_debt_per_harvest);
    validation::require_valid_fee(env, performance_fee, MAX_STRATEGY_PERFORMANCE_FEE);
    let mut queue = storage::get_withdrawal_queue(env);
    validation::require_queue_capacity(env, queue.len());
    require_matching_strategy(env, strategy);

    let now = env.ledger().timestamp();
    let params = StrategyParams {
        performance_fee,
        activation: now,
        debt_ratio,
        min_debt_per_harvest,
        max_debt_per_harvest,
        last_report: now,
        total_debt: 0,
        total_gain: 0,
        total_loss: 0,
    };
    storage::set_strategy(env, strategy, &params);
    ledger.debt_ratio += debt_ratio;
    storage::set_ledger(env, &ledger);
    queue.push_back(strategy.clone());
    storage::set_withdrawal_queue(env, &queue);

    StrategyAdded {
        strategy: strategy.clone(),
        debt_ratio,
        min_debt_per_harvest,
        max_debt_per_harvest,
        performance_fee,
    }
    .publish(env);
}

pub fn update_debt_ratio(env: &Env, strategy: &Address, debt_ratio: u32) {
    validation::require_governance(env);
    let mut params = validation::require_active_strategy(env, strategy);
    let mut ledger = storage::get_ledger(env);
    validation::require_valid_bps(env, debt_ratio);

    let total_ratio = ledger.debt_ratio - params.debt_ratio + debt_ratio;
    validation::require_debt_ratio_within_limit(env, total_ratio);
    ledger.debt_ratio = total_ratio;
    params.debt_ratio = debt_ratio;

    storage::set_strategy(env, strategy, &params);
    storage::set_ledger(env, &ledger);
    publish_update(env, strategy, &params);
}

pub fn update_debt_bounds(
    env: &Env,
    strategy: &Address,
    min_debt_per_harvest: i128,
    max_debt_per_harvest: i128,
) {
    validation::require_governance(env);
    let mut params = validation::require_active_strategy(env, strategy);
    validation::require_valid_debt_bounds(env, min_debt_per_harvest, max_debt_per_harvest);
    params.min_debt_per_harvest = min_debt_per_harvest;
    params.max_debt_per_harvest = max_debt_per_harvest;
    storage::set_strategy(env, strategy, &params);
    publish_update(env, strategy, &params);
}

pub fn update_performance_fee(env: &Env, strategy: &Address, performance_fee: u32) {
    validation::require_governance(env);
    let mut params = validation::require_active_strategy(env, strategy);
    validation::require_valid_fee(env, performance_fee, MAX_STRATEGY_PERFORMANCE_FEE);
    params.performance_fee = performance_fee;
    storage::set_strategy(env, strategy, &params);
    publish_update(env, strategy, &params);
}

/// Zeroes the strategy's debt ratio so its next report hands back all debt
pub fn revoke_strategy(env: &Env, caller: &Address, strategy: &Address) {
    validation::require_role(
        env,
        caller,
        &[storage::get_governance(env), strategy.clone()],
    );
    let mut params = validation::require_active_strategy(env, strategy);
    let mut ledger = storage::get_ledger(env);

    ledger.debt_ratio -= params.debt_ratio;
    params.debt_ratio = 0;
    storage::set_strategy(env, strategy, &params);
    storage::set_ledger(env, &ledger);

    StrategyRevoked {
        strategy: strategy.clone(),
    }
    .publish(env);
}

/// Replaces the withdrawal order; every entry must be a registered strategy
pub fn set_withdrawal_queue(env: &Env, queue: &Vec<Address>) {
    validation::require_governance(env);
    if queue.len() > MAXIMUM_STRATEGIES {
        panic_with_error!(env, VaultError::QueueFull);
    }
    for (index, strategy) in queue.iter().enumerate() {
        validation::require_active_strategy(env, &strategy);
        if queue.first_index_of(&strategy) != Some(index as u32) {
            panic_with_error!(env, VaultError::StrategyExists);
        }
    }
    storage::set_withdrawal_queue(env, queue);

    WithdrawalQueueUpdated {
        queue: queue.clone(),
    }
    .publish(env);
}

/// Settles a strategy's harvest: the strategy has already pushed
/// `gain + debt_payment` to the vault before calling in.
///
/// Returns the debt the strategy still owes after the report.
pub fn report(env: &Env, strategy: &Address, gain: i128, loss: i128, debt_payment: i128) -> i128 {
    strategy.require_auth();
    let mut params = validation::require_active_strategy(env, strategy);
    validation::require_non_negative_amount(env, gain);
    validation::require_non_negative_amount(env, loss);
    validation::require_non_negative_amount(env, debt_payment);

    let mut ledger = storage::get_ledger(env);
    let vault = env.current_contract_address();
    let token = token::Client::new(env, &storage::get_token(env));
    if token.balance(&vault) < ledger.total_idle + gain + debt_payment {
        panic_with_error!(env, VaultError::InsufficientPayment);
    }

    if loss > 0 {
        book_loss(env, &mut ledger, &mut params, loss);
    }

    assess_fees(env, &ledger, &params, strategy, gain);

    // repayment beyond the strategy's whole debt stays in the vault as gain
    let debt_paid = debt_payment.min(params.total_debt);
    let gain = gain + (debt_payment - debt_paid);
    params.total_gain += gain;
    params.total_debt -= debt_paid;
    ledger.total_debt -= debt_paid;
    ledger.total_idle += gain + debt_paid;

    let credit = credit_available(&ledger, &params);
    if credit > 0 {
        params.total_debt += credit;
        ledger.total_debt += credit;
        ledger.total_idle -= credit;
    }
    params.last_report = env.ledger().timestamp();
    let outstanding = debt_outstanding(&ledger, &params);

    storage::set_strategy(env, strategy, &params);
    storage::set_ledger(env, &ledger);

    if credit > 0 {
        token.transfer(&vault, strategy, &credit);
    }

    log!(env, "report", strategy.clone(), gain, loss, debt_paid, credit);
    StrategyReported {
        strategy: strategy.clone(),
        gain,
        loss,
        debt_paid,
        credit,
        total_debt: params.total_debt,
        debt_ratio: params.debt_ratio,
    }
    .publish(env);

    outstanding
}

/// Hands `old`'s ledger entry and holdings over to `new`
pub fn migrate_strategy(env: &Env, old_strategy: &Address, new_strategy: &Address) {
    validation::require_governance(env);
    let params = validation::require_active_strategy(env, old_strategy);
    if storage::has_strategy(env, new_strategy) {
        panic_with_error!(env, VaultError::StrategyExists);
    }
    require_matching_strategy(env, new_strategy);

    let migrated = StrategyParams {
        performance_fee: params.performance_fee,
        activation: params.last_report,
        debt_ratio: params.debt_ratio,
        min_debt_per_harvest: params.min_debt_per_harvest,
        max_debt_per_harvest: params.max_debt_per_harvest,
        last_report: params.last_report,
        total_debt: params.total_debt,
        total_gain: 0,
        total_loss: 0,
    };
    storage::remove_strategy(env, old_strategy);
    storage::set_strategy(env, new_strategy, &migrated);

    let mut queue = storage::get_withdrawal_queue(env);
    if let Some(index) = queue.first_index_of(old_strategy) {
        queue.set(index, new_strategy.clone());
    } else {
        queue.push_back(new_strategy.clone());
    }
    storage::set_withdrawal_queue(env, &queue);

    let old_client = StrategyClient::new(env, old_strategy);
    let new_client = StrategyClient::new(env, new_strategy);
    let assets_before = old_client.estimated_total_assets();
    old_client.migrate(new_strategy);
    if new_client.estimated_total_assets() < assets_before {
        panic_with_error!(env, VaultError::MigrationShortfall);
    }

    StrategyMigrated {
        old_strategy: old_strategy.clone(),
        new_strategy: new_strategy.clone(),
        total_debt: migrated.total_debt,
    }
    .publish(env);
}
