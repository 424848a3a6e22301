#![no_std]

mod errors;
mod storage;
mod contract;
mod events;
mod vault;
mod strategy;
mod math;
mod validation;

pub use contract::{VaultContract, VaultContractClient};
pub use errors::VaultError;
pub use storage::Ledger;
