/// Basis point denominator for ledger ratios and fees
pub const MAX_BPS: i128 = 10_000;

/// Fixed point scalar used for prices and share ratios
pub const SCALAR_7: i128 = 10_000_000;

/// Collateral ratios are expressed in whole percentage points
pub const RATIO_PRECISION: i128 = 100;

pub const SECS_PER_YEAR: u64 = 31_556_952;

/// Upper bound on the withdrawal queue length
pub const MAXIMUM_STRATEGIES: u32 = 20;

/// Largest performance fee a single strategy may charge, in bps
pub const MAX_STRATEGY_PERFORMANCE_FEE: u32 = 5_000;
