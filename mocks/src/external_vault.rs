//! Yield-bearing vault with a withdrawal fee and a reserve buffer

use soroban_fixed_point_math::FixedPoint;
use soroban_sdk::{
    contract, contractimpl, contracttype, panic_with_error, token, unwrap::UnwrapOptimized,
    Address, Env, MuxedAddress,
};
use yield_interface::constants::{MAX_BPS, SCALAR_7};

use crate::errors::MockError;

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
enum ExternalVaultKey {
    Want,
    Treasury,
    WithdrawFee,
    ReserveBps,
    TotalUnderlying,
    Deployed,
    TotalSupply,
    Balance(Address),
}

fn get_i128(e: &Env, key: &ExternalVaultKey) -> i128 {
    e.storage().instance().get(key).unwrap_or(0)
}

fn set_i128(e: &Env, key: &ExternalVaultKey, value: i128) {
    e.storage().instance().set(key, &value);
}

fn get_u32(e: &Env, key: &ExternalVaultKey) -> u32 {
    e.storage().instance().get(key).unwrap_or(0)
}

fn get_address(e: &Env, key: &ExternalVaultKey) -> Address {
    e.storage().instance().get(key).unwrap_optimized()
}

fn balance_of(e: &Env, id: &Address) -> i128 {
    e.storage()
        .persistent()
        .get(&ExternalVaultKey::Balance(id.clone()))
        .unwrap_or(0)
}

fn set_balance(e: &Env, id: &Address, amount: i128) {
    e.storage()
        .persistent()
        .set(&ExternalVaultKey::Balance(id.clone()), &amount);
}

#[contract]
pub struct MockExternalVault;

#[contractimpl]
impl MockExternalVault {
    pub fn __constructor(
        e: Env,
        want: Address,
        treasury: Address,
        withdraw_fee_bps: u32,
        reserve_bps: u32,
    ) {
        e.storage().instance().set(&ExternalVaultKey::Want, &want);
        e.storage().instance().set(&ExternalVaultKey::Treasury, &treasury);
        e.storage()
            .instance()
            .set(&ExternalVaultKey::WithdrawFee, &withdraw_fee_bps);
        e.storage()
            .instance()
            .set(&ExternalVaultKey::ReserveBps, &reserve_bps);
    }

    pub fn want(e: Env) -> Address {
        get_address(&e, &ExternalVaultKey::Want)
    }

    /// Mints shares for `amount` of want already transferred in by `from`
    pub fn deposit(e: Env, from: Address, amount: i128) -> i128 {
        from.require_auth();
        if amount <= 0 {
            panic_with_error!(&e, MockError::InvalidAmount);
        }
        let total = get_i128(&e, &ExternalVaultKey::TotalUnderlying);
        let held = token::Client::new(&e, &get_address(&e, &ExternalVaultKey::Want))
            .balance(&e.current_contract_address());
        if held < total + amount {
            panic_with_error!(&e, MockError::InsufficientPayment);
        }

        let supply = get_i128(&e, &ExternalVaultKey::TotalSupply);
        let shares = if supply == 0 || total == 0 {
            amount
        } else {
            amount.fixed_mul_floor(supply, total).unwrap_optimized()
        };
        set_balance(&e, &from, balance_of(&e, &from) + shares);
        set_i128(&e, &ExternalVaultKey::TotalSupply, supply + shares);
        set_i128(&e, &ExternalVaultKey::TotalUnderlying, total + amount);
        shares
    }

    /// Burns `shares` of `to` and sends their value minus the withdrawal fee
    pub fn withdraw(e: Env, to: Address, shares: i128) -> i128 {
        to.require_auth();
        if shares <= 0 {
            panic_with_error!(&e, MockError::InvalidAmount);
        }
        let balance = balance_of(&e, &to);
        if shares > balance {
            panic_with_error!(&e, MockError::InsufficientBalance);
        }

        let total = get_i128(&e, &ExternalVaultKey::TotalUnderlying);
        let supply = get_i128(&e, &ExternalVaultKey::TotalSupply);
        let amount = shares.fixed_mul_floor(total, supply).unwrap_optimized();
        let fee = amount
            .fixed_mul_floor(get_u32(&e, &ExternalVaultKey::WithdrawFee) as i128, MAX_BPS)
            .unwrap_optimized();

        set_balance(&e, &to, balance - shares);
        set_i128(&e, &ExternalVaultKey::TotalSupply, supply - shares);
        set_i128(&e, &ExternalVaultKey::TotalUnderlying, total - amount);
        let deployed = get_i128(&e, &ExternalVaultKey::Deployed);
        set_i128(&e, &ExternalVaultKey::Deployed, deployed.min(total - amount));

        let want = token::Client::new(&e, &get_address(&e, &ExternalVaultKey::Want));
        let me = e.current_contract_address();
        if fee > 0 {
            want.transfer(&me, &get_address(&e, &ExternalVaultKey::Treasury), &fee);
        }
        want.transfer(&me, &to, &(amount - fee));
        amount - fee
    }

    /// Deploys everything above the reserve buffer
    pub fn earn(e: Env) {
        let available = Self::available(e.clone());
        let deployed = get_i128(&e, &ExternalVaultKey::Deployed);
        set_i128(&e, &ExternalVaultKey::Deployed, deployed + available);
    }

    pub fn available(e: Env) -> i128 {
        let idle = get_i128(&e, &ExternalVaultKey::TotalUnderlying)
            - get_i128(&e, &ExternalVaultKey::Deployed);
        let reserve = get_u32(&e, &ExternalVaultKey::ReserveBps) as i128;
        idle.fixed_mul_floor(MAX_BPS - reserve, MAX_BPS)
            .unwrap_optimized()
    }

    pub fn deployed(e: Env) -> i128 {
        get_i128(&e, &ExternalVaultKey::Deployed)
    }

    pub fn balance(e: Env, id: Address) -> i128 {
        balance_of(&e, &id)
    }

    pub fn total_supply(e: Env) -> i128 {
        get_i128(&e, &ExternalVaultKey::TotalSupply)
    }

    pub fn transfer(e: Env, from: Address, to: MuxedAddress, amount: i128) {
        from.require_auth();
        let to = to.address();
        let balance = balance_of(&e, &from);
        if amount < 0 || amount > balance {
            panic_with_error!(&e, MockError::InsufficientBalance);
        }
        set_balance(&e, &from, balance - amount);
        set_balance(&e, &to, balance_of(&e, &to) + amount);
    }

    pub fn underlying_balance(e: Env) -> i128 {
        get_i128(&e, &ExternalVaultKey::TotalUnderlying)
    }

    pub fn price_per_full_share(e: Env) -> i128 {
        let supply = get_i128(&e, &ExternalVaultKey::TotalSupply);
        if supply == 0 {
            return SCALAR_7;
        }
        get_i128(&e, &ExternalVaultKey::TotalUnderlying)
            .fixed_mul_floor(SCALAR_7, supply)
            .unwrap_optimized()
    }

    /// Recognizes want sent to the vault outside of deposits as yield
    pub fn report_yield(e: Env) -> i128 {
        let held = token::Client::new(&e, &get_address(&e, &ExternalVaultKey::Want))
            .balance(&e.current_contract_address());
        let total = get_i128(&e, &ExternalVaultKey::TotalUnderlying);
        set_i128(&e, &ExternalVaultKey::TotalUnderlying, held);
        held - total
    }

    /// Writes off `amount` of underlying to the treasury
    pub fn simulate_loss(e: Env, amount: i128) {
        let total = get_i128(&e, &ExternalVaultKey::TotalUnderlying);
        set_i128(&e, &ExternalVaultKey::TotalUnderlying, total - amount);
        token::Client::new(&e, &get_address(&e, &ExternalVaultKey::Want)).transfer(
            &e.current_contract_address(),
            &get_address(&e, &ExternalVaultKey::Treasury),
            &amount,
        );
    }

    pub fn set_withdraw_fee(e: Env, withdraw_fee_bps: u32) {
        e.storage()
            .instance()
            .set(&ExternalVaultKey::WithdrawFee, &withdraw_fee_bps);
    }
}
