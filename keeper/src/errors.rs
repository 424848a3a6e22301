use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum KeeperError {
    AlreadyRegistered = 4201,
    NotRegistered = 4202,
    InvalidAmount = 4203,
}
