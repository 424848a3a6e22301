use soroban_fixed_point_math::FixedPoint;
use soroban_sdk::unwrap::UnwrapOptimized;
use yield_interface::constants::{MAX_BPS, RATIO_PRECISION, SCALAR_7};

/// Value of `shares` at a `SCALAR_7` price per share (rounded down)
pub fn share_value(shares: i128, price_per_share: i128) -> i128 {
    shares
        .fixed_mul_floor(price_per_share, SCALAR_7)
        .unwrap_optimized()
}

/// Shares needed to redeem at least `amount` (rounded up)
pub fn shares_for_value(amount: i128, price_per_share: i128) -> i128 {
    if price_per_share <= 0 {
        return 0;
    }
    amount
        .fixed_mul_ceil(SCALAR_7, price_per_share)
        .unwrap_optimized()
}

/// Want that `shares` can lose to rounding across a deposit and a `SCALAR_7`
/// price quote: one share's value plus the price truncation over all shares
pub fn conversion_dust(shares: i128, price_per_share: i128) -> i128 {
    let one_share = 1i128
        .fixed_mul_ceil(price_per_share, SCALAR_7)
        .unwrap_optimized();
    let truncation = shares.fixed_mul_ceil(1, SCALAR_7).unwrap_optimized();
    one_share + truncation + 1
}

/// `amount` reduced by `slippage_bps`
pub fn apply_slippage(amount: i128, slippage_bps: u32) -> i128 {
    amount
        .fixed_mul_floor(MAX_BPS - slippage_bps as i128, MAX_BPS)
        .unwrap_optimized()
}

/// Scales a whole-percent ratio by a bps buffer
pub fn buffered_ratio(ratio: u32, buffer_bps: u32) -> u32 {
    (ratio as i128)
        .fixed_mul_floor(MAX_BPS + buffer_bps as i128, MAX_BPS)
        .unwrap_optimized() as u32
}

/// Largest debt keeping `collateral_value / debt >= ratio` percent
pub fn max_debt_for_ratio(collateral_value: i128, ratio: u32) -> i128 {
    if ratio == 0 {
        return 0;
    }
    collateral_value
        .fixed_mul_floor(RATIO_PRECISION, ratio as i128)
        .unwrap_optimized()
}

/// Smallest collateral value keeping `collateral_value / debt >= ratio` percent
pub fn min_value_for_ratio(debt: i128, ratio: u32) -> i128 {
    debt.fixed_mul_ceil(ratio as i128, RATIO_PRECISION)
        .unwrap_optimized()
}
