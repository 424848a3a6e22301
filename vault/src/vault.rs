use soroban_sdk::{panic_with_error, token, Address, Env};
use stellar_tokens::fungible::Base;
use yield_interface::StrategyClient;

use crate::{
    errors::VaultError,
    events::{Deposit, Withdraw},
    math::Converter,
    storage, strategy, validation,
};

/// Deposits tokens and mints shares at the current price
pub fn deposit(env: &Env, from: &Address, amount: i128) -> i128 {
    validation::require_positive_amount(env, amount);

    let mut ledger = storage::get_ledger(env);
    validation::require_not_shutdown(env, &ledger);
    let total_assets = ledger.total_assets();
    if total_assets + amount > ledger.deposit_limit {
        panic_with_error!(env, VaultError::LimitExceeded);
    }

    let converter = Converter::new(Base::total_supply(env), total_assets);
    let shares = converter.shares_from_tokens(amount);
    validation::require_positive_result(env, shares);

    token::Client::new(env, &storage::get_token(env)).transfer(
        from,
        &env.current_contract_address(),
        &amount,
    );
    Base::mint(env, from, shares);

    ledger.total_idle += amount;
    storage::set_ledger(env, &ledger);

    Deposit {
        from: from.clone(),
        amount,
        shares,
    }
    .publish(env);

    shares
}

/// Burns `shares` and sends their value to `recipient`, pulling from
/// strategies in queue order when the idle balance falls short.
pub fn withdraw(
    env: &Env,
    owner: &Address,
    shares: i128,
    recipient: &Address,
    max_loss_bps: u32,
) -> i128 {
    validation::require_positive_amount(env, shares);
    validation::require_valid_bps(env, max_loss_bps);
    if shares > Base::balance(env, owner) {
        panic_with_error!(env, VaultError::InsufficientShares);
    }

    let mut ledger = storage::get_ledger(env);
    let converter = Converter::new(Base::total_supply(env), ledger.total_assets());
    let mut shares = shares;
    let mut value = converter.redemption_value(shares);
    validation::require_positive_result(env, value);

    let vault = env.current_contract_address();
    let token = token::Client::new(env, &storage::get_token(env));
    let mut total_loss = 0;

    if value > ledger.total_idle {
        for address in storage::get_withdrawal_queue(env).iter() {
            if value <= ledger.total_idle {
                break;
            }
            let Some(mut params) = storage::get_strategy(env, &address) else {
                continue;
            };
            let needed = (value - ledger.total_idle).min(params.total_debt);
            if needed <= 0 {
                continue;
            }

            let balance_before = token.balance(&vault);
            let loss = StrategyClient::new(env, &address).withdraw(&needed);
            let withdrawn = token.balance(&vault) - balance_before;

            if loss > 0 {
                value -= loss;
                total_loss += loss;
                strategy::book_loss(env, &mut ledger, &mut params, loss);
            }

            let repaid = withdrawn.min(params.total_debt);
            params.total_debt -= repaid;
            ledger.total_debt -= repaid;
            ledger.total_idle += withdrawn;
            storage::set_strategy(env, &address, &params);
        }

        // liquidity shortfall: pay out what is idle and burn only what that covers
        if value > ledger.total_idle {
            value = ledger.total_idle;
            shares = converter
                .shares_for_withdrawal(value + total_loss)
                .min(shares);
        }
    }

    validation::require_loss_within_tolerance(env, total_loss, value, max_loss_bps);

    Base::update(env, Some(owner), None, shares);
    ledger.total_idle -= value;
    storage::set_ledger(env, &ledger);

    token.transfer(&vault, recipient, &value);

    Withdraw {
        owner: owner.clone(),
        recipient: recipient.clone(),
        shares,
        amount: value,
        loss: total_loss,
    }
    .publish(env);

    value
}
