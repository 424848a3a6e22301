#![no_std]

//! Strategy depositing want into an external vault and staking the vault
//! shares in a reward pool. Rewards are sold for want on every harvest.

mod contract;
mod farm;

pub use contract::{FarmingStrategy, FarmingStrategyClient};
pub use farm::Farm;
