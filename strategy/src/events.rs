use soroban_sdk::{contractevent, Address};

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Harvested {
    #[topic]
    pub vault: Address,
    pub profit: i128,
    pub loss: i128,
    pub debt_payment: i128,
    pub debt_outstanding: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyExitEnabled {
    #[topic]
    pub caller: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Migrated {
    #[topic]
    pub new_strategy: Address,
    pub amount: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleUpdated {
    #[topic]
    pub role: u32,
    pub holder: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MinRatioKept {
    pub repaid: i128,
    pub ratio: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MinRatioUpdated {
    pub min_ratio: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardSwapped {
    #[topic]
    pub token_in: Address,
    pub amount_in: i128,
    pub amount_out: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardSwapSkipped {
    #[topic]
    pub token_in: Address,
    pub amount_in: i128,
    pub quoted: i128,
}
