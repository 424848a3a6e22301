use soroban_sdk::{Address, Env};

/// External holdings of a strategy, driven by the generic harvest engine in
/// [`crate::base`].
pub trait Position {
    /// Idle want plus the want-denominated value of every external holding
    fn estimated_total_assets(e: &Env) -> i128;

    /// Claims, converts and compounds whatever the position has earned
    fn harvest_yield(e: &Env);

    /// Puts idle want beyond `debt_outstanding` to work
    fn adjust_position(e: &Env, debt_outstanding: i128);

    /// Frees up to `amount` of want. Best effort: may free less.
    fn liquidate_position(e: &Env, amount: i128);

    /// Unwinds every holding into want and returns the idle want balance
    fn liquidate_all_positions(e: &Env) -> i128;

    /// Hands every non-want holding over to `new_strategy`
    fn prepare_migration(e: &Env, new_strategy: &Address);

    /// Shortfall against the recorded debt that comes from share rounding
    /// rather than from a real loss
    fn rounding_tolerance(_e: &Env) -> i128 {
        0
    }

    /// Position-specific reason to harvest now
    fn harvest_trigger(_e: &Env) -> bool {
        false
    }
}
