use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum MockError {
    InvalidAmount = 4901,
    InsufficientPayment = 4902,
    InsufficientBalance = 4903,
    RatioTooLow = 4904,
    NoRate = 4905,
    Unavailable = 4906,
    SlippageExceeded = 4907,
}
