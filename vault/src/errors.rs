use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum VaultError {
    InvalidAmount = 4041,
    InsufficientPayment = 4042,
    Unauthorized = 4043,
    LimitExceeded = 4044,
    UnauthorizedStrategy = 4045,
    InvalidRatio = 4046,
    InvalidFee = 4047,
    StrategyExists = 4048,
    QueueFull = 4049,
    InvalidStrategy = 4050,
    InvalidLoss = 4051,
    InsufficientShares = 4052,
    LossToleranceExceeded = 4053,
    VaultShutdown = 4054,
    MigrationShortfall = 4055,
}
