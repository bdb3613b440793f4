//! # Storage
//!
//! Typed helpers over the two storage tiers used by the GiveCoin ledger.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key           | Type   | Description                              |
//! |---------------|--------|------------------------------------------|
//! | `TotalSupply` | `i128` | Supply credited at issuance              |
//! | `Issued`      | `bool` | Set once the single issuance has happened |
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                | Type   | Description                     |
//! |--------------------|--------|---------------------------------|
//! | `Balance(addr)`    | `i128` | Token balance of `addr`         |
//! | `Allowance(key)`   | `i128` | Remaining allowance for a pair  |
//!
//! Mutating entry points extend the instance TTL up front, and every
//! persistent write extends its entry. Queries never extend TTLs.

use soroban_sdk::{contracttype, Address, Env};

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

/// Owner/spender pair addressing one allowance entry.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AllowanceDataKey {
    pub from: Address,
    pub spender: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Fixed supply recorded at issuance (Instance).
    TotalSupply,
    /// Single-issuance flag (Instance).
    Issued,
    /// Balance per account (Persistent).
    Balance(Address),
    /// Allowance per owner/spender pair (Persistent).
    Allowance(AllowanceDataKey),
}

/// Keep the contract instance alive while it is in use.
pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

// ── Issuance ─────────────────────────────────────────────────────────

pub fn is_issued(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Issued)
        .unwrap_or(false)
}

/// Record the issued supply and close issuance for good.
pub fn mark_issued(env: &Env, supply: i128) {
    env.storage().instance().set(&DataKey::TotalSupply, &supply);
    env.storage().instance().set(&DataKey::Issued, &true);
    bump_instance(env);
}

pub fn read_total_supply(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(0)
}

// ── Balances ─────────────────────────────────────────────────────────

/// Balance of `account`; accounts never written to hold zero.
pub fn read_balance(env: &Env, account: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Balance(account.clone()))
        .unwrap_or(0)
}

pub fn write_balance(env: &Env, account: &Address, amount: i128) {
    let key = DataKey::Balance(account.clone());
    env.storage().persistent().set(&key, &amount);
    bump_persistent(env, &key);
}

// ── Allowances ───────────────────────────────────────────────────────

pub fn read_allowance(env: &Env, from: &Address, spender: &Address) -> i128 {
    let key = DataKey::Allowance(AllowanceDataKey {
        from: from.clone(),
        spender: spender.clone(),
    });
    env.storage().persistent().get(&key).unwrap_or(0)
}

pub fn write_allowance(env: &Env, from: &Address, spender: &Address, amount: i128) {
    let key = DataKey::Allowance(AllowanceDataKey {
        from: from.clone(),
        spender: spender.clone(),
    });
    env.storage().persistent().set(&key, &amount);
    bump_persistent(env, &key);
}
