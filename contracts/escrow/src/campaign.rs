//! # Campaign
//!
//! Donation accounting and milestone gating for a single campaign.
//!
//! Operations here never move tokens; they record amounts the registry has
//! already taken into custody and decide when milestones may be approved.
//! Each operation loads what it needs, validates everything, and only then
//! writes, so an `Err` never leaves a half-updated campaign behind.
//!
//! ## Gating rules
//!
//! - `total_amount_received` only grows and never exceeds
//!   `total_amount_needed`.
//! - Only the first unapproved milestone can be approved, and only once
//!   `total_amount_received` has reached its threshold.
//! - The owner may draw down at most the highest approved threshold.

use soroban_sdk::{Address, Env, String};

use crate::storage::{
    bump_campaign, get_and_increment_campaign_id, load_campaign_config, load_campaign_state,
    load_donation, load_milestone, save_campaign, save_campaign_state, save_donation,
    save_milestone,
};
use crate::types::{CampaignConfig, CampaignState, Milestone};
use crate::{events, Error};

/// Load both halves of campaign `id`.
pub fn load(env: &Env, id: u64) -> Result<(CampaignConfig, CampaignState), Error> {
    let config = load_campaign_config(env, id).ok_or(Error::CampaignNotFound)?;
    let state = load_campaign_state(env, id).ok_or(Error::CampaignNotFound)?;
    Ok((config, state))
}

/// Load campaign `id` ahead of a mutation, extending all of its entries.
fn load_for_update(env: &Env, id: u64) -> Result<(CampaignConfig, CampaignState), Error> {
    let (config, state) = load(env, id)?;
    bump_campaign(env, id, state.milestone_count);
    Ok((config, state))
}

/// Register a new campaign owned by `owner` and return its index.
pub fn open(
    env: &Env,
    owner: &Address,
    name: String,
    description: String,
    total_amount_needed: i128,
) -> Result<u64, Error> {
    if total_amount_needed <= 0 {
        return Err(Error::InvalidAmount);
    }

    let id = get_and_increment_campaign_id(env);
    let config = CampaignConfig {
        id,
        owner: owner.clone(),
        name,
        description,
        total_amount_needed,
    };
    save_campaign(env, &config, &CampaignState::empty());

    events::campaign_created(env, id, owner, total_amount_needed);
    Ok(id)
}

/// What the campaign can still accept before hitting its goal.
pub fn remaining_need(config: &CampaignConfig, state: &CampaignState) -> i128 {
    config.total_amount_needed - state.total_amount_received
}

/// Tokens the owner may still withdraw.
pub fn withdrawable(state: &CampaignState) -> i128 {
    state.unlocked - state.total_withdrawn
}

fn require_owner(config: &CampaignConfig, caller: &Address) -> Result<(), Error> {
    if *caller != config.owner {
        return Err(Error::Unauthorized);
    }
    caller.require_auth();
    Ok(())
}

/// Append a milestone at cumulative threshold `amount`; returns its index.
pub fn set_milestone(env: &Env, caller: &Address, id: u64, amount: i128) -> Result<u32, Error> {
    let (config, mut state) = load_for_update(env, id)?;
    require_owner(&config, caller)?;
    if amount < 0 {
        return Err(Error::InvalidAmount);
    }

    let index = state.milestone_count;
    state.milestone_count = index.checked_add(1).ok_or(Error::Overflow)?;

    save_milestone(env, id, index, &Milestone::pending(env, amount));
    save_campaign_state(env, id, &state);

    events::milestone_set(env, id, caller, index, amount);
    Ok(index)
}

/// Record `amount` received from `donor`; returns the new total received.
///
/// Only the registry calls this, after it has taken the tokens into custody.
/// A donation that would overshoot the goal is rejected outright.
pub(crate) fn donated(env: &Env, id: u64, donor: &Address, amount: i128) -> Result<i128, Error> {
    let (config, mut state) = load_for_update(env, id)?;
    if amount <= 0 {
        return Err(Error::InvalidAmount);
    }
    if amount > remaining_need(&config, &state) {
        return Err(Error::DonationExceedsNeed);
    }

    let donor_total = load_donation(env, id, donor)
        .checked_add(amount)
        .ok_or(Error::Overflow)?;
    state.total_amount_received = state
        .total_amount_received
        .checked_add(amount)
        .ok_or(Error::Overflow)?;

    save_donation(env, id, donor, donor_total);
    save_campaign_state(env, id, &state);

    events::donation_received(env, id, donor, amount, state.total_amount_received);
    Ok(state.total_amount_received)
}

/// Approve the first unapproved milestone; returns its index.
pub fn approve_milestone(
    env: &Env,
    caller: &Address,
    id: u64,
    transaction_description: String,
) -> Result<u32, Error> {
    let (config, mut state) = load_for_update(env, id)?;
    require_owner(&config, caller)?;

    if state.milestone_count == 0 {
        return Err(Error::NoMilestonesDefined);
    }
    if state.approved_count >= state.milestone_count {
        return Err(Error::AllMilestonesApproved);
    }

    let index = state.approved_count;
    let mut milestone = load_milestone(env, id, index).ok_or(Error::MilestoneNotFound)?;
    if state.total_amount_received < milestone.amount {
        return Err(Error::MilestoneNotReached);
    }

    milestone.approved = true;
    milestone.transaction_description = transaction_description;
    state.approved_count = index + 1;
    if milestone.amount > state.unlocked {
        state.unlocked = milestone.amount;
    }

    save_milestone(env, id, index, &milestone);
    save_campaign_state(env, id, &state);

    events::milestone_approved(
        env,
        id,
        caller,
        index,
        milestone.amount,
        &milestone.transaction_description,
    );
    Ok(index)
}

/// Milestone `index` of campaign `id`.
pub fn milestone(env: &Env, id: u64, index: u32) -> Result<Milestone, Error> {
    load(env, id)?;
    load_milestone(env, id, index).ok_or(Error::MilestoneNotFound)
}

/// Book a withdrawal of `amount` against the unlocked total.
///
/// Returns the owner, who is the recipient of the payout.
pub fn withdraw(env: &Env, caller: &Address, id: u64, amount: i128) -> Result<Address, Error> {
    let (config, mut state) = load_for_update(env, id)?;
    require_owner(&config, caller)?;
    if amount <= 0 {
        return Err(Error::InvalidAmount);
    }
    if amount > withdrawable(&state) {
        return Err(Error::ExceedsUnlocked);
    }

    state.total_withdrawn = state
        .total_withdrawn
        .checked_add(amount)
        .ok_or(Error::Overflow)?;
    save_campaign_state(env, id, &state);

    events::funds_withdrawn(env, id, &config.owner, amount);
    Ok(config.owner)
}

pub fn donated_amount(env: &Env, id: u64, donor: &Address) -> Result<i128, Error> {
    load(env, id)?;
    Ok(load_donation(env, id, donor))
}
