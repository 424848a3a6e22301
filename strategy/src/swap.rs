use soroban_sdk::{token, Address, Env};
use yield_interface::RouterClient;

use crate::{
    events::{RewardSwapSkipped, RewardSwapped},
    math,
};

/// Swaps `amount_in` of `token_in` into `token_out` through `router`.
///
/// Fails closed: when the router cannot quote, or the quote is below
/// `min_amount_out`, nothing moves and 0 is returned.
pub fn swap_exact_in(
    e: &Env,
    router: &Address,
    token_in: &Address,
    token_out: &Address,
    amount_in: i128,
    min_amount_out: i128,
    slippage_bps: u32,
) -> i128 {
    if amount_in <= 0 {
        return 0;
    }
    let router_client = RouterClient::new(e, router);
    let quoted = match router_client.try_quote(token_in, token_out, &amount_in) {
        Ok(Ok(quoted)) => quoted,
        _ => 0,
    };
    if quoted <= 0 || quoted < min_amount_out {
        RewardSwapSkipped {
            token_in: token_in.clone(),
            amount_in,
            quoted,
        }
        .publish(e);
        return 0;
    }

    let me = e.current_contract_address();
    token::Client::new(e, token_in).transfer(&me, router, &amount_in);
    let amount_out = router_client.swap(
        &me,
        token_in,
        token_out,
        &amount_in,
        &math::apply_slippage(quoted, slippage_bps),
    );

    RewardSwapped {
        token_in: token_in.clone(),
        amount_in,
        amount_out,
    }
    .publish(e);
    amount_out
}
