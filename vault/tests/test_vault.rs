mod common;
use common::*;

// ==================== Deposits ====================

#[test]
fn test_first_deposit_one_to_one() {
    let test_env = setup_vault();
    let user = test_env.user(0);

    let deposit_amount = 1000 * SCALAR_7;
    let shares = test_env.deposit(&user, deposit_amount);

    assert_eq!(shares, deposit_amount, "First deposit should be 1:1");
    assert_eq!(test_env.vault.total_supply(), deposit_amount);
    assert_eq!(test_env.vault.total_assets(), deposit_amount);
    assert_eq!(test_env.vault.total_idle(), deposit_amount);
    assert_eq!(test_env.token_balance(&user), USER_FUNDS - deposit_amount);
    assert_eq!(test_env.vault_balance(), deposit_amount);
    assert_eq!(test_env.vault.price_per_share(), SCALAR_7);
}

#[test]
fn test_deposit_after_profit() {
    let test_env = setup_vault();
    let user1 = test_env.user(0);
    let user2 = test_env.user(1);
    let handle = test_env.add_strategy(MAX_BPS, 0);

    test_env.deposit(&user1, 1000 * SCALAR_7);
    handle.strategy.harvest(&handle.keeper);

    // 25% profit, booked on the next harvest
    test_env.simulate_yield(&handle, 250 * SCALAR_7);
    assert_eq!(test_env.vault.total_assets(), 1000 * SCALAR_7);
    handle.strategy.harvest(&handle.keeper);
    assert_eq!(test_env.vault.total_assets(), 1250 * SCALAR_7);

    // Share price is now 1.25, so 500 tokens = 400 shares
    let shares2 = test_env.deposit(&user2, 500 * SCALAR_7);
    assert_eq!(shares2, 400 * SCALAR_7);
    assert_eq!(test_env.vault.total_supply(), 1400 * SCALAR_7);
    assert_eq!(test_env.vault.price_per_share(), 12_500_000);
    test_env.assert_ledger_consistent();
}

#[test]
#[should_panic(expected = "Error(Contract, #4044)")] // LimitExceeded
fn test_deposit_above_limit() {
    let test_env = setup_vault_with_config(VaultConfig {
        deposit_limit: 1000 * SCALAR_7,
        ..Default::default()
    });
    let user = test_env.user(0);

    test_env.deposit(&user, 600 * SCALAR_7);
    assert_eq!(test_env.vault.available_deposit_limit(), 400 * SCALAR_7);
    test_env.deposit(&user, 401 * SCALAR_7);
}

#[test]
#[should_panic(expected = "Error(Contract, #4041)")] // InvalidAmount
fn test_deposit_zero() {
    let test_env = setup_vault();
    test_env.deposit(&test_env.user(0), 0);
}

#[test]
#[should_panic(expected = "Error(Contract, #4054)")] // VaultShutdown
fn test_deposit_during_shutdown() {
    let test_env = setup_vault();
    test_env
        .vault
        .set_emergency_shutdown(&test_env.guardian, &true);
    test_env.deposit(&test_env.user(0), 100 * SCALAR_7);
}

// ==================== Withdrawals ====================

#[test]
fn test_withdraw_from_idle() {
    let test_env = setup_vault();
    let user = test_env.user(0);
    let recipient = test_env.user(1);

    let shares = test_env.deposit(&user, 1000 * SCALAR_7);
    let amount = test_env
        .vault
        .withdraw(&user, &(shares / 4), &recipient, &0);

    assert_eq!(amount, 250 * SCALAR_7);
    assert_eq!(test_env.share_balance(&user), 750 * SCALAR_7);
    assert_eq!(test_env.token_balance(&recipient), USER_FUNDS + 250 * SCALAR_7);
    assert_eq!(test_env.vault.total_idle(), 750 * SCALAR_7);
}

#[test]
fn test_round_trip_loses_only_external_fee() {
    let test_env = setup_vault();
    let user = test_env.user(0);
    let handle = test_env.add_strategy(MAX_BPS, DEFAULT_WITHDRAW_FEE_BPS);

    let deposit_amount = 10_000_000 * SCALAR_7;
    let shares = test_env.deposit(&user, deposit_amount);
    handle.strategy.harvest(&handle.keeper);
    assert_eq!(test_env.vault.total_idle(), 0);

    let amount = test_env.vault.withdraw(&user, &shares, &user, &21);

    let fee = deposit_amount * DEFAULT_WITHDRAW_FEE_BPS as i128 / MAX_BPS as i128;
    assert_eq!(amount, deposit_amount - fee);
    assert_eq!(test_env.token_balance(&user), USER_FUNDS - fee);
    assert_eq!(test_env.vault.total_supply(), 0);
    assert_eq!(test_env.vault.total_debt(), 0);
    assert_eq!(test_env.token_balance(&test_env.treasury), fee);
    test_env.assert_ledger_consistent();
}

#[test]
fn test_round_trip_without_strategy_is_exact() {
    let test_env = setup_vault();
    let user = test_env.user(0);

    let shares = test_env.deposit(&user, 1234 * SCALAR_7);
    let amount = test_env.vault.withdraw(&user, &shares, &user, &0);

    assert_eq!(amount, 1234 * SCALAR_7);
    assert_eq!(test_env.token_balance(&user), USER_FUNDS);
}

#[test]
fn test_withdraw_loss_above_tolerance_is_atomic() {
    let test_env = setup_vault();
    let user = test_env.user(0);
    let handle = test_env.add_strategy(MAX_BPS, DEFAULT_WITHDRAW_FEE_BPS);

    let shares = test_env.deposit(&user, 10_000_000 * SCALAR_7);
    handle.strategy.harvest(&handle.keeper);
    let debt_before = test_env.vault.total_debt();

    let result = test_env.vault.try_withdraw(&user, &shares, &user, &10);
    assert!(result.is_err());

    // Nothing burned, nothing pulled from the strategy
    assert_eq!(test_env.share_balance(&user), shares);
    assert_eq!(test_env.vault.total_debt(), debt_before);
    assert_eq!(test_env.vault.strategy(&handle.strategy.address).total_loss, 0);
    assert_eq!(handle.strategy.estimated_total_assets(), debt_before);
}

#[test]
#[should_panic(expected = "Error(Contract, #4053)")] // LossToleranceExceeded
fn test_withdraw_loss_above_tolerance() {
    let test_env = setup_vault();
    let user = test_env.user(0);
    let handle = test_env.add_strategy(MAX_BPS, DEFAULT_WITHDRAW_FEE_BPS);

    let shares = test_env.deposit(&user, 10_000_000 * SCALAR_7);
    handle.strategy.harvest(&handle.keeper);
    test_env.vault.withdraw(&user, &shares, &user, &10);
}

#[test]
fn test_withdraw_liquidity_shortfall_burns_only_paid_shares() {
    let test_env = setup_vault();
    let user = test_env.user(0);
    let handle = test_env.add_strategy(5_000, 0);

    let shares = test_env.deposit(&user, 1000 * SCALAR_7);
    handle.strategy.harvest(&handle.keeper);
    assert_eq!(test_env.vault.total_idle(), 500 * SCALAR_7);

    // Strategy is not reachable through the queue
    test_env
        .vault
        .set_withdrawal_queue(&soroban_sdk::Vec::new(&test_env.env));

    let amount = test_env.vault.withdraw(&user, &shares, &user, &0);
    assert_eq!(amount, 500 * SCALAR_7);
    assert_eq!(test_env.share_balance(&user), 500 * SCALAR_7);
    assert_eq!(test_env.vault.total_idle(), 0);
    assert_eq!(test_env.vault.total_debt(), 500 * SCALAR_7);
}

#[test]
#[should_panic(expected = "Error(Contract, #4052)")] // InsufficientShares
fn test_withdraw_more_than_owned() {
    let test_env = setup_vault();
    let user = test_env.user(0);

    let shares = test_env.deposit(&user, 100 * SCALAR_7);
    test_env.vault.withdraw(&user, &(shares + 1), &user, &0);
}

#[test]
#[should_panic(expected = "Error(Contract, #4046)")] // InvalidRatio
fn test_withdraw_invalid_max_loss() {
    let test_env = setup_vault();
    let user = test_env.user(0);

    let shares = test_env.deposit(&user, 100 * SCALAR_7);
    test_env.vault.withdraw(&user, &shares, &user, &(MAX_BPS + 1));
}

#[test]
fn test_shares_are_transferable() {
    let test_env = setup_vault();
    let user1 = test_env.user(0);
    let user2 = test_env.user(1);

    test_env.deposit(&user1, 100 * SCALAR_7);
    test_env.vault.transfer(&user1, &user2, &(40 * SCALAR_7));

    let amount = test_env
        .vault
        .withdraw(&user2, &(40 * SCALAR_7), &user2, &0);
    assert_eq!(amount, 40 * SCALAR_7);
}

// ==================== Administration ====================

#[test]
fn test_share_metadata() {
    let test_env = setup_vault();
    assert_eq!(
        test_env.vault.symbol(),
        soroban_sdk::String::from_str(&test_env.env, "yvTKN")
    );
    assert_eq!(test_env.vault.decimals(), 7);
}

#[test]
fn test_guardian_can_activate_but_not_deactivate_shutdown() {
    let test_env = setup_vault();

    test_env
        .vault
        .set_emergency_shutdown(&test_env.guardian, &true);
    assert!(test_env.vault.emergency_shutdown());

    let result = test_env
        .vault
        .try_set_emergency_shutdown(&test_env.guardian, &false);
    assert!(result.is_err());

    test_env
        .vault
        .set_emergency_shutdown(&test_env.governance, &false);
    assert!(!test_env.vault.emergency_shutdown());
}

#[test]
#[should_panic(expected = "Error(Contract, #4043)")] // Unauthorized
fn test_shutdown_by_stranger() {
    let test_env = setup_vault();
    test_env
        .vault
        .set_emergency_shutdown(&test_env.user(0), &true);
}

#[test]
#[should_panic(expected = "Error(Contract, #4047)")] // InvalidFee
fn test_performance_fee_cap() {
    let test_env = setup_vault();
    test_env.vault.set_performance_fee(&5_001);
}

#[test]
fn test_governance_handover() {
    let test_env = setup_vault();
    let new_governance = test_env.user(1);

    test_env.vault.set_governance(&new_governance);
    assert_eq!(test_env.vault.governance(), new_governance);
    test_env
        .vault
        .set_emergency_shutdown(&new_governance, &true);
    assert!(test_env.vault.emergency_shutdown());
}
