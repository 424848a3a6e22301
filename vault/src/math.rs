use soroban_fixed_point_math::FixedPoint;
use soroban_sdk::unwrap::UnwrapOptimized;
use yield_interface::constants::{MAX_BPS, SECS_PER_YEAR};

/// Calculates share/token conversions at a fixed price snapshot
pub struct Converter {
    total_shares: i128,
    total_tokens: i128,
}

impl Converter {
    pub fn new(total_shares: i128, total_tokens: i128) -> Self {
        Self {
            total_shares,
            total_tokens,
        }
    }

    /// Calculates shares to mint for a given token deposit (rounded down)
    pub fn shares_from_tokens(&self, tokens: i128) -> i128 {
        if self.total_shares == 0 || self.total_tokens == 0 {
            tokens // First deposit gets 1:1 ratio
        } else {
            tokens
                .fixed_mul_floor(self.total_shares, self.total_tokens)
                .unwrap_optimized()
        }
    }

    /// Calculates shares to burn so that `tokens` leave the vault (rounded up)
    pub fn shares_for_withdrawal(&self, tokens: i128) -> i128 {
        if self.total_shares == 0 || self.total_tokens == 0 {
            tokens
        } else {
            tokens
                .fixed_mul_ceil(self.total_shares, self.total_tokens)
                .unwrap_optimized()
        }
    }

    /// Calculates tokens to return for share redemption (rounded down)
    pub fn redemption_value(&self, shares: i128) -> i128 {
        if self.total_shares == 0 {
            0
        } else {
            shares
                .fixed_mul_floor(self.total_tokens, self.total_shares)
                .unwrap_optimized()
        }
    }
}

/// `amount * bps / MAX_BPS`, rounded down
pub fn bps_of(amount: i128, bps: u32) -> i128 {
    amount
        .fixed_mul_floor(bps as i128, MAX_BPS)
        .unwrap_optimized()
}

/// Management fee accrued on `total_debt` over `elapsed` seconds
pub fn management_fee(total_debt: i128, elapsed: u64, fee_bps: u32) -> i128 {
    if elapsed == 0 || fee_bps == 0 {
        return 0;
    }
    total_debt
        .fixed_mul_floor(
            (elapsed as i128) * (fee_bps as i128),
            MAX_BPS * (SECS_PER_YEAR as i128),
        )
        .unwrap_optimized()
}
