use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum StrategyError {
    Unauthorized = 4101,
    InvalidAmount = 4102,
    InvalidRatio = 4103,
    InvalidStrategy = 4104,
    EmergencyExitActive = 4105,
}
