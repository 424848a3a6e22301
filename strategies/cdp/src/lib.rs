#![no_std]

//! Strategy posting want as CDP collateral, borrowing the debt asset up to a
//! target collateral ratio and parking the borrowed funds in an external vault.

mod contract;
mod cdp_loop;

pub use cdp_loop::CdpLoop;
pub use contract::{CdpStrategy, CdpStrategyClient};
