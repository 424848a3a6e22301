//! Fixed-rate swap router

use soroban_fixed_point_math::FixedPoint;
use soroban_sdk::{
    contract, contractimpl, contracttype, panic_with_error, token, unwrap::UnwrapOptimized,
    Address, Env,
};
use yield_interface::constants::SCALAR_7;

use crate::errors::MockError;

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
enum RouterKey {
    Available,
    Rate(Address, Address),
    Reserve(Address),
}

fn reserve(e: &Env, token: &Address) -> i128 {
    e.storage()
        .instance()
        .get(&RouterKey::Reserve(token.clone()))
        .unwrap_or(0)
}

fn sync_reserve(e: &Env, token: &Address) -> i128 {
    let held = token::Client::new(e, token).balance(&e.current_contract_address());
    e.storage()
        .instance()
        .set(&RouterKey::Reserve(token.clone()), &held);
    held
}

#[contract]
pub struct MockRouter;

#[contractimpl]
impl MockRouter {
    pub fn __constructor(e: Env) {
        e.storage().instance().set(&RouterKey::Available, &true);
    }

    /// `rate` is `token_out` per `token_in`, scaled by 1e7
    pub fn set_rate(e: Env, token_in: Address, token_out: Address, rate: i128) {
        e.storage()
            .instance()
            .set(&RouterKey::Rate(token_in, token_out), &rate);
    }

    pub fn set_available(e: Env, available: bool) {
        e.storage().instance().set(&RouterKey::Available, &available);
    }

    pub fn quote(e: Env, token_in: Address, token_out: Address, amount_in: i128) -> i128 {
        let available: bool = e
            .storage()
            .instance()
            .get(&RouterKey::Available)
            .unwrap_or(false);
        if !available {
            panic_with_error!(&e, MockError::Unavailable);
        }
        let rate: i128 = match e
            .storage()
            .instance()
            .get(&RouterKey::Rate(token_in, token_out))
        {
            Some(rate) => rate,
            None => panic_with_error!(&e, MockError::NoRate),
        };
        amount_in.fixed_mul_floor(rate, SCALAR_7).unwrap_optimized()
    }

    /// Swaps `amount_in` already transferred in, paying out to `to`
    pub fn swap(
        e: Env,
        to: Address,
        token_in: Address,
        token_out: Address,
        amount_in: i128,
        min_amount_out: i128,
    ) -> i128 {
        let amount_out = Self::quote(e.clone(), token_in.clone(), token_out.clone(), amount_in);
        if amount_out < min_amount_out {
            panic_with_error!(&e, MockError::SlippageExceeded);
        }
        if token::Client::new(&e, &token_in).balance(&e.current_contract_address())
            < reserve(&e, &token_in) + amount_in
        {
            panic_with_error!(&e, MockError::InsufficientPayment);
        }
        sync_reserve(&e, &token_in);

        token::Client::new(&e, &token_out).transfer(
            &e.current_contract_address(),
            &to,
            &amount_out,
        );
        sync_reserve(&e, &token_out);
        amount_out
    }

    /// Re-reads the reserve of `token` after it was topped up
    pub fn sync(e: Env, token: Address) -> i128 {
        sync_reserve(&e, &token)
    }
}
