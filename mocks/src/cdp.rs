//! Collateralized-debt position protocol with a fixed oracle price

use soroban_fixed_point_math::FixedPoint;
use soroban_sdk::{
    contract, contractimpl, contracttype, panic_with_error, token, unwrap::UnwrapOptimized,
    Address, Env,
};
use yield_interface::{
    constants::{RATIO_PRECISION, SCALAR_7},
    CdpAccount,
};

use crate::errors::MockError;

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
enum CdpKey {
    CollateralToken,
    DebtToken,
    Price,
    LiquidationRatio,
    TotalCollateral,
    DebtReserve,
    Account(Address),
}

fn get_address(e: &Env, key: &CdpKey) -> Address {
    e.storage().instance().get(key).unwrap_optimized()
}

fn get_i128(e: &Env, key: &CdpKey) -> i128 {
    e.storage().instance().get(key).unwrap_or(0)
}

fn get_account(e: &Env, owner: &Address) -> CdpAccount {
    e.storage()
        .persistent()
        .get(&CdpKey::Account(owner.clone()))
        .unwrap_or(CdpAccount {
            collateral: 0,
            debt: 0,
        })
}

fn set_account(e: &Env, owner: &Address, account: &CdpAccount) {
    e.storage()
        .persistent()
        .set(&CdpKey::Account(owner.clone()), account);
}

/// Collateral value over debt, in whole percent
fn ratio_of(e: &Env, account: &CdpAccount) -> u32 {
    if account.debt == 0 {
        return u32::MAX;
    }
    let value = account
        .collateral
        .fixed_mul_floor(get_i128(e, &CdpKey::Price), SCALAR_7)
        .unwrap_optimized();
    value
        .fixed_mul_floor(RATIO_PRECISION, account.debt)
        .unwrap_optimized()
        .min(u32::MAX as i128) as u32
}

fn require_healthy(e: &Env, account: &CdpAccount) {
    let liquidation_ratio: u32 = e
        .storage()
        .instance()
        .get(&CdpKey::LiquidationRatio)
        .unwrap_optimized();
    if ratio_of(e, account) < liquidation_ratio {
        panic_with_error!(e, MockError::RatioTooLow);
    }
}

#[contract]
pub struct MockCdp;

#[contractimpl]
impl MockCdp {
    /// `price` is debt units per collateral unit, scaled by 1e7
    pub fn __constructor(
        e: Env,
        collateral_token: Address,
        debt_token: Address,
        price: i128,
        liquidation_ratio: u32,
    ) {
        e.storage()
            .instance()
            .set(&CdpKey::CollateralToken, &collateral_token);
        e.storage().instance().set(&CdpKey::DebtToken, &debt_token);
        e.storage().instance().set(&CdpKey::Price, &price);
        e.storage()
            .instance()
            .set(&CdpKey::LiquidationRatio, &liquidation_ratio);
    }

    pub fn collateral_token(e: Env) -> Address {
        get_address(&e, &CdpKey::CollateralToken)
    }

    pub fn debt_token(e: Env) -> Address {
        get_address(&e, &CdpKey::DebtToken)
    }

    pub fn price(e: Env) -> i128 {
        get_i128(&e, &CdpKey::Price)
    }

    pub fn liquidation_ratio(e: Env) -> u32 {
        e.storage()
            .instance()
            .get(&CdpKey::LiquidationRatio)
            .unwrap_optimized()
    }

    pub fn position(e: Env, owner: Address) -> CdpAccount {
        get_account(&e, &owner)
    }

    pub fn current_ratio(e: Env, owner: Address) -> u32 {
        ratio_of(&e, &get_account(&e, &owner))
    }

    /// Books collateral already transferred in by `owner`
    pub fn deposit_collateral(e: Env, owner: Address, amount: i128) {
        owner.require_auth();
        if amount <= 0 {
            panic_with_error!(&e, MockError::InvalidAmount);
        }
        let total = get_i128(&e, &CdpKey::TotalCollateral);
        let held = token::Client::new(&e, &get_address(&e, &CdpKey::CollateralToken))
            .balance(&e.current_contract_address());
        if held < total + amount {
            panic_with_error!(&e, MockError::InsufficientPayment);
        }
        let mut account = get_account(&e, &owner);
        account.collateral += amount;
        set_account(&e, &owner, &account);
        e.storage()
            .instance()
            .set(&CdpKey::TotalCollateral, &(total + amount));
    }

    pub fn withdraw_collateral(e: Env, owner: Address, amount: i128) {
        owner.require_auth();
        let mut account = get_account(&e, &owner);
        if amount <= 0 || amount > account.collateral {
            panic_with_error!(&e, MockError::InsufficientBalance);
        }
        account.collateral -= amount;
        require_healthy(&e, &account);
        set_account(&e, &owner, &account);
        e.storage().instance().set(
            &CdpKey::TotalCollateral,
            &(get_i128(&e, &CdpKey::TotalCollateral) - amount),
        );
        token::Client::new(&e, &get_address(&e, &CdpKey::CollateralToken)).transfer(
            &e.current_contract_address(),
            &owner,
            &amount,
        );
    }

    /// Borrows `amount` of the debt token from the pre-funded reserve
    pub fn mint(e: Env, owner: Address, amount: i128) {
        owner.require_auth();
        if amount <= 0 {
            panic_with_error!(&e, MockError::InvalidAmount);
        }
        let mut account = get_account(&e, &owner);
        account.debt += amount;
        require_healthy(&e, &account);
        set_account(&e, &owner, &account);

        let debt_token = token::Client::new(&e, &get_address(&e, &CdpKey::DebtToken));
        let me = e.current_contract_address();
        debt_token.transfer(&me, &owner, &amount);
        e.storage()
            .instance()
            .set(&CdpKey::DebtReserve, &debt_token.balance(&me));
    }

    /// Repays with debt tokens already transferred in by `owner`
    pub fn repay(e: Env, owner: Address, amount: i128) {
        owner.require_auth();
        let mut account = get_account(&e, &owner);
        if amount <= 0 || amount > account.debt {
            panic_with_error!(&e, MockError::InvalidAmount);
        }
        let debt_token = token::Client::new(&e, &get_address(&e, &CdpKey::DebtToken));
        let me = e.current_contract_address();
        let held = debt_token.balance(&me);
        if held < get_i128(&e, &CdpKey::DebtReserve) + amount {
            panic_with_error!(&e, MockError::InsufficientPayment);
        }
        account.debt -= amount;
        set_account(&e, &owner, &account);
        e.storage().instance().set(&CdpKey::DebtReserve, &held);
    }

    pub fn set_price(e: Env, price: i128) {
        e.storage().instance().set(&CdpKey::Price, &price);
    }

    /// Re-reads the debt token reserve after it was topped up
    pub fn sync(e: Env) {
        let held = token::Client::new(&e, &get_address(&e, &CdpKey::DebtToken))
            .balance(&e.current_contract_address());
        e.storage().instance().set(&CdpKey::DebtReserve, &held);
    }
}
