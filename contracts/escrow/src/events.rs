//! Escrow events. Every topic is `(name, campaign_id)`.

use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignCreated {
    pub campaign_id: u64,
    pub owner: Address,
    pub amount_needed: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DonationReceived {
    pub campaign_id: u64,
    pub donor: Address,
    pub amount: i128,
    pub total_received: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MilestoneSet {
    pub campaign_id: u64,
    pub owner: Address,
    pub index: u32,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MilestoneApproved {
    pub campaign_id: u64,
    pub owner: Address,
    pub index: u32,
    pub amount: i128,
    pub description: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundsWithdrawn {
    pub campaign_id: u64,
    pub owner: Address,
    pub amount: i128,
}

pub fn campaign_created(env: &Env, campaign_id: u64, owner: &Address, amount_needed: i128) {
    env.events().publish(
        (symbol_short!("created"), campaign_id),
        CampaignCreated {
            campaign_id,
            owner: owner.clone(),
            amount_needed,
        },
    );
}

pub fn donation_received(env: &Env, campaign_id: u64, donor: &Address, amount: i128, total_received: i128) {
    env.events().publish(
        (symbol_short!("donated"), campaign_id),
        DonationReceived {
            campaign_id,
            donor: donor.clone(),
            amount,
            total_received,
        },
    );
}

pub fn milestone_set(env: &Env, campaign_id: u64, owner: &Address, index: u32, amount: i128) {
    env.events().publish(
        (symbol_short!("ms_set"), campaign_id),
        MilestoneSet {
            campaign_id,
            owner: owner.clone(),
            index,
            amount,
        },
    );
}

pub fn milestone_approved(
    env: &Env,
    campaign_id: u64,
    owner: &Address,
    index: u32,
    amount: i128,
    description: &String,
) {
    env.events().publish(
        (symbol_short!("ms_apprv"), campaign_id),
        MilestoneApproved {
            campaign_id,
            owner: owner.clone(),
            index,
            amount,
            description: description.clone(),
        },
    );
}

pub fn funds_withdrawn(env: &Env, campaign_id: u64, owner: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("withdrawn"), campaign_id),
        FundsWithdrawn {
            campaign_id,
            owner: owner.clone(),
            amount,
        },
    );
}
