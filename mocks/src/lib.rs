#![no_std]

mod cdp;
mod errors;
mod external_vault;
mod farming_pool;
mod router;
mod strategy;

pub use cdp::{MockCdp, MockCdpClient};
pub use errors::MockError;
pub use external_vault::{MockExternalVault, MockExternalVaultClient};
pub use farming_pool::{MockFarmingPool, MockFarmingPoolClient};
pub use router::{MockRouter, MockRouterClient};
pub use strategy::{MockStrategy, MockStrategyClient};
