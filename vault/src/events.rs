use soroban_sdk::{contractevent, Address, Vec};

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deposit {
    #[topic]
    pub from: Address,
    pub amount: i128,
    pub shares: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Withdraw {
    #[topic]
    pub owner: Address,
    #[topic]
    pub recipient: Address,
    pub shares: i128,
    pub amount: i128,
    pub loss: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StrategyAdded {
    #[topic]
    pub strategy: Address,
    pub debt_ratio: u32,
    pub min_debt_per_harvest: i128,
    pub max_debt_per_harvest: i128,
    pub performance_fee: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StrategyReported {
    #[topic]
    pub strategy: Address,
    pub gain: i128,
    pub loss: i128,
    pub debt_paid: i128,
    pub credit: i128,
    pub total_debt: i128,
    pub debt_ratio: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StrategyUpdated {
    #[topic]
    pub strategy: Address,
    pub debt_ratio: u32,
    pub min_debt_per_harvest: i128,
    pub max_debt_per_harvest: i128,
    pub performance_fee: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StrategyRevoked {
    #[topic]
    pub strategy: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StrategyMigrated {
    #[topic]
    pub old_strategy: Address,
    #[topic]
    pub new_strategy: Address,
    pub total_debt: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeesAssessed {
    #[topic]
    pub strategy: Address,
    pub management_fee: i128,
    pub performance_fee: i128,
    pub strategist_fee: i128,
    pub shares: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyShutdown {
    pub active: bool,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawalQueueUpdated {
    pub queue: Vec<Address>,
}
