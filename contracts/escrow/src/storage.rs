//! # Storage
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key             | Type      | Description                       |
//! |-----------------|-----------|-----------------------------------|
//! | `Ledger`        | `Address` | Token ledger used for all custody |
//! | `CampaignCount` | `u64`     | Auto-increment campaign counter   |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day
//! remaining. Every mutating entry point bumps it before doing anything else.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                        | Type             | Description                     |
//! |----------------------------|------------------|---------------------------------|
//! | `CampConfig(id)`           | `CampaignConfig` | Immutable campaign config       |
//! | `CampState(id)`            | `CampaignState`  | Mutable campaign state          |
//! | `Milestone(id, index)`     | `Milestone`      | Append-only milestone arena     |
//! | `Donation(id, donor)`      | `i128`           | Cumulative donor contribution   |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days
//! remaining. Writes bump their own entry, and [`bump_campaign`] keeps the
//! rest of a campaign alive whenever it is mutated. Plain loads are
//! side-effect free.

use soroban_sdk::{contracttype, Address, Env};

use crate::types::{CampaignConfig, CampaignState, Milestone};

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Token ledger address (Instance).
    Ledger,
    /// Global auto-increment counter for campaign IDs (Instance).
    CampaignCount,
    /// Immutable campaign configuration keyed by ID (Persistent).
    CampConfig(u64),
    /// Mutable campaign state keyed by ID (Persistent).
    CampState(u64),
    /// Milestone record keyed by campaign ID and position (Persistent).
    Milestone(u64, u32),
    /// Cumulative donation keyed by campaign ID and donor (Persistent).
    Donation(u64, Address),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn set_ledger(env: &Env, ledger: &Address) {
    env.storage().instance().set(&DataKey::Ledger, ledger);
    bump_instance(env);
}

/// The token ledger bound at construction.
/// Panics if no ledger has been bound, which `__constructor` rules out.
pub fn get_ledger(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::Ledger)
        .expect("ledger not set")
}

pub fn campaign_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::CampaignCount)
        .unwrap_or(0)
}

/// Reads, increments, and stores the campaign counter.
/// Returns the ID for the campaign being created (pre-increment value).
pub fn get_and_increment_campaign_id(env: &Env) -> u64 {
    let current = campaign_count(env);
    env.storage()
        .instance()
        .set(&DataKey::CampaignCount, &(current + 1));
    current
}

// ── Persistent Storage Helpers ───────────────────────────────────────

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Extend the config, the state and every milestone of campaign `id`.
///
/// The config is written once and milestones only on approval; neither
/// would otherwise outlive an active campaign.
pub fn bump_campaign(env: &Env, id: u64, milestone_count: u32) {
    bump_persistent(env, &DataKey::CampConfig(id));
    bump_persistent(env, &DataKey::CampState(id));
    for index in 0..milestone_count {
        bump_persistent(env, &DataKey::Milestone(id, index));
    }
}

/// Save the immutable config and the initial state of a new campaign.
pub fn save_campaign(env: &Env, config: &CampaignConfig, state: &CampaignState) {
    let config_key = DataKey::CampConfig(config.id);
    env.storage().persistent().set(&config_key, config);
    bump_persistent(env, &config_key);
    save_campaign_state(env, config.id, state);
}

pub fn load_campaign_config(env: &Env, id: u64) -> Option<CampaignConfig> {
    env.storage().persistent().get(&DataKey::CampConfig(id))
}

pub fn load_campaign_state(env: &Env, id: u64) -> Option<CampaignState> {
    env.storage().persistent().get(&DataKey::CampState(id))
}

pub fn save_campaign_state(env: &Env, id: u64, state: &CampaignState) {
    let key = DataKey::CampState(id);
    env.storage().persistent().set(&key, state);
    bump_persistent(env, &key);
}

pub fn load_milestone(env: &Env, id: u64, index: u32) -> Option<Milestone> {
    env.storage()
        .persistent()
        .get(&DataKey::Milestone(id, index))
}

pub fn save_milestone(env: &Env, id: u64, index: u32, milestone: &Milestone) {
    let key = DataKey::Milestone(id, index);
    env.storage().persistent().set(&key, milestone);
    bump_persistent(env, &key);
}

/// Cumulative amount `donor` has given to campaign `id`; zero if none.
pub fn load_donation(env: &Env, id: u64, donor: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Donation(id, donor.clone()))
        .unwrap_or(0)
}

pub fn save_donation(env: &Env, id: u64, donor: &Address, amount: i128) {
    let key = DataKey::Donation(id, donor.clone());
    env.storage().persistent().set(&key, &amount);
    bump_persistent(env, &key);
}
