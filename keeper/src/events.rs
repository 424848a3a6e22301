use soroban_sdk::{contractevent, Address};

pub const JOB_HARVEST: u32 = 1;
pub const JOB_EARN: u32 = 2;
pub const JOB_KEEP_MIN_RATIO: u32 = 3;

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HarvestJobAdded {
    #[topic]
    pub strategy: Address,
    pub collateralized: bool,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HarvestJobRemoved {
    #[topic]
    pub strategy: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EarnJobAdded {
    #[topic]
    pub vault: Address,
    pub min_earn: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EarnJobRemoved {
    #[topic]
    pub vault: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct JobWorked {
    #[topic]
    pub target: Address,
    pub job: u32,
}
