//! # Types
//!
//! Shared data structures of the escrow registry.
//!
//! ## Config / State split
//!
//! A campaign is stored as two ledger entries:
//!
//! - [`CampaignConfig`]: owner, descriptive strings and goal; written once.
//! - [`CampaignState`]: running totals and milestone cursors; written on
//!   every donation, milestone change and withdrawal.
//!
//! The public API returns the reconstructed [`Campaign`].
//!
//! ## Milestones
//!
//! Milestones live in an append-only arena keyed by `(campaign_id, index)`.
//! Each one moves through exactly one transition:
//!
//! ```text
//! Pending("Not reached") ──► Approved(description)
//! ```
//!
//! Approval is strictly sequential, so the first unapproved milestone is
//! always `milestones[approved_count]`.

use soroban_sdk::{contracttype, Address, Env, String};

/// Description carried by a milestone until it is approved.
pub const NOT_REACHED: &str = "Not reached";

/// Immutable campaign configuration, written once at creation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignConfig {
    pub id: u64,
    pub owner: Address,
    pub name: String,
    pub description: String,
    pub total_amount_needed: i128,
}

/// Mutable campaign state.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignState {
    /// Sum of all recorded donations; never exceeds the goal.
    pub total_amount_received: i128,
    /// Tokens already paid out to the owner.
    pub total_withdrawn: i128,
    /// Number of milestones ever set.
    pub milestone_count: u32,
    /// Number of milestones approved; also the index of the next one.
    pub approved_count: u32,
    /// Highest approved milestone threshold.
    pub unlocked: i128,
}

impl CampaignState {
    pub fn empty() -> Self {
        Self {
            total_amount_received: 0,
            total_withdrawn: 0,
            milestone_count: 0,
            approved_count: 0,
            unlocked: 0,
        }
    }
}

/// Full view of a campaign.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Campaign {
    /// Creation index; doubles as the campaign's identity.
    pub id: u64,
    /// Address allowed to set, approve and draw down milestones.
    pub owner: Address,
    pub name: String,
    pub description: String,
    /// Funding goal, fixed at creation.
    pub total_amount_needed: i128,
    pub total_amount_received: i128,
    pub total_withdrawn: i128,
    pub milestone_count: u32,
    pub approved_count: u32,
    pub unlocked: i128,
}

impl Campaign {
    pub fn from_parts(config: CampaignConfig, state: CampaignState) -> Self {
        Self {
            id: config.id,
            owner: config.owner,
            name: config.name,
            description: config.description,
            total_amount_needed: config.total_amount_needed,
            total_amount_received: state.total_amount_received,
            total_withdrawn: state.total_withdrawn,
            milestone_count: state.milestone_count,
            approved_count: state.approved_count,
            unlocked: state.unlocked,
        }
    }
}

/// A cumulative-funding threshold of a campaign.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Milestone {
    /// Cumulative amount received that must be reached before approval.
    pub amount: i128,
    pub approved: bool,
    /// `"Not reached"` until approved, then the owner's description.
    pub transaction_description: String,
}

impl Milestone {
    pub fn pending(env: &Env, amount: i128) -> Self {
        Self {
            amount,
            approved: false,
            transaction_description: String::from_str(env, NOT_REACHED),
        }
    }
}
