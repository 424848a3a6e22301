#![no_std]

//! Keeper job registry.
//!
//! Governance registers the strategies to harvest and the external vaults to
//! `earn`. Every job exposes a pure probe and an action that is a no-op
//! returning `false` when the probe is negative, so an off-chain keeper can
//! call the actions blindly.

mod contract;
mod errors;
mod events;
mod storage;

pub use contract::{KeeperContract, KeeperContractClient};
pub use errors::KeeperError;
