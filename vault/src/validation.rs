use soroban_sdk::{panic_with_error, Address, Env};
use yield_interface::{
    constants::{MAX_BPS, MAXIMUM_STRATEGIES},
    StrategyParams,
};

use crate::{
    errors::VaultError,
    math,
    storage::{self, Ledger},
};

/// Validates that an amount is positive (greater than zero)
pub fn require_positive_amount(env: &Env, amount: i128) {
    if amount <= 0 {
        panic_with_error!(env, VaultError::InvalidAmount);
    }
}

/// Validates that an amount is not negative
pub fn require_non_negative_amount(env: &Env, amount: i128) {
    if amount < 0 {
        panic_with_error!(env, VaultError::InvalidAmount);
    }
}

/// Validates that a calculated amount is positive
pub fn require_positive_result(env: &Env, amount: i128) {
    if amount <= 0 {
        panic_with_error!(env, VaultError::InvalidAmount);
    }
}

/// Validates a basis point value is within 0-100%
pub fn require_valid_bps(env: &Env, bps: u32) {
    if bps as i128 > MAX_BPS {
        panic_with_error!(env, VaultError::InvalidRatio);
    }
}

pub fn require_valid_fee(env: &Env, fee: u32, max_fee: u32) {
    if fee > max_fee {
        panic_with_error!(env, VaultError::InvalidFee);
    }
}

/// Validates per-harvest debt bounds
pub fn require_valid_debt_bounds(env: &Env, min_debt: i128, max_debt: i128) {
    if min_debt < 0 || min_debt > max_debt {
        panic_with_error!(env, VaultError::InvalidAmount);
    }
}

/// Validates the summed debt ratio stays within 100%
pub fn require_debt_ratio_within_limit(env: &Env, total_ratio: u32) {
    if total_ratio as i128 > MAX_BPS {
        panic_with_error!(env, VaultError::InvalidRatio);
    }
}

/// Validates that the withdrawal queue has room for another strategy
pub fn require_queue_capacity(env: &Env, queue_len: u32) {
    if queue_len >= MAXIMUM_STRATEGIES {
        panic_with_error!(env, VaultError::QueueFull);
    }
}

pub fn require_not_shutdown(env: &Env, ledger: &Ledger) {
    if ledger.emergency_shutdown {
        panic_with_error!(env, VaultError::VaultShutdown);
    }
}

/// Requires governance authorization
pub fn require_governance(env: &Env) -> Address {
    let governance = storage::get_governance(env);
    governance.require_auth();
    governance
}

/// Requires `caller` to be one of the given role holders and to have signed
pub fn require_role(env: &Env, caller: &Address, roles: &[Address]) {
    caller.require_auth();
    if !roles.contains(caller) {
        panic_with_error!(env, VaultError::Unauthorized);
    }
}

/// Validates that a strategy is registered and returns its params
pub fn require_active_strategy(env: &Env, strategy: &Address) -> StrategyParams {
    match storage::get_strategy(env, strategy) {
        Some(params) => params,
        None => panic_with_error!(env, VaultError::UnauthorizedStrategy),
    }
}

/// Validates that the realized loss is within the caller's tolerance
pub fn require_loss_within_tolerance(env: &Env, total_loss: i128, value: i128, max_loss_bps: u32) {
    if total_loss > math::bps_of(value + total_loss, max_loss_bps) {
        panic_with_error!(env, VaultError::LossToleranceExceeded);
    }
}
