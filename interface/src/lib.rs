#![no_std]
//! Cross-contract surface shared by the vault, its strategies, the keeper job
//! and the external collaborators they talk to.

pub mod constants;
pub mod external;
pub mod strategy;
pub mod vault;

pub use external::{
    CdpAccount, CdpClient, ExternalVaultClient, FarmingPoolClient, PoolUserInfo, RouterClient,
};
pub use strategy::{
    CollateralPosition, CollateralizedStrategyClient, FarmingPosition, HarvestReport,
    StrategyClient,
};
pub use vault::{StrategyParams, VaultClient};
