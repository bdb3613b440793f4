//! # Escrow Registry Contract
//!
//! Creates campaigns, takes donor tokens into custody and gates their
//! release behind ordered milestones.
//!
//! | Phase        | Entry Point(s)                                        |
//! |--------------|-------------------------------------------------------|
//! | Bootstrap    | `__constructor` (binds the token ledger)               |
//! | Registration | [`Escrow::create_campaign`]                            |
//! | Issuance     | [`Escrow::issue_coin`]                                 |
//! | Funding      | [`Escrow::donate_coin`]                                |
//! | Milestones   | [`Escrow::set_milestone`], [`Escrow::approve_milestone`] |
//! | Disbursement | [`Escrow::withdraw`]                                   |
//! | Queries      | `campaigns`, `campaign_count`, `milestones`, `milestone_count`, `total_amount_received`, `donated_amount`, `remaining_need`, `withdrawable`, `ledger`, `error_message` |
//!
//! ## Architecture
//!
//! Campaign accounting lives in [`campaign`], storage access in
//! [`storage`]. This file holds the entry points and the calls into the
//! token ledger. Every entry point either applies all of its writes or
//! returns an error; the host rolls back everything an erroring invocation
//! touched, including writes made inside the ledger.

#![no_std]

use ledger_interface::{LedgerClient, LedgerError};
use soroban_sdk::{contract, contracterror, contractimpl, Address, Env, String};

mod campaign;
mod events;
mod storage;
mod types;

#[cfg(test)]
mod test_events;
#[cfg(test)]
mod test_milestones;

pub use events::{CampaignCreated, DonationReceived, FundsWithdrawn, MilestoneApproved, MilestoneSet};
pub use types::{Campaign, Milestone, NOT_REACHED};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    Unauthorized          = 1,
    CampaignNotFound      = 2,
    DonationExceedsNeed   = 3,
    MilestoneNotReached   = 4,
    NoMilestonesDefined   = 5,
    AllMilestonesApproved = 6,
    MilestoneNotFound     = 7,
    InsufficientBalance   = 8,
    InsufficientAllowance = 9,
    AlreadyIssued         = 10,
    InvalidAmount         = 11,
    ExceedsUnlocked       = 12,
    Overflow              = 13,
    LedgerFailure         = 14,
}

impl Error {
    /// Error kind for a contract error code, as seen by RPC clients.
    pub fn from_code(code: u32) -> Option<Error> {
        let err = match code {
            1 => Error::Unauthorized,
            2 => Error::CampaignNotFound,
            3 => Error::DonationExceedsNeed,
            4 => Error::MilestoneNotReached,
            5 => Error::NoMilestonesDefined,
            6 => Error::AllMilestonesApproved,
            7 => Error::MilestoneNotFound,
            8 => Error::InsufficientBalance,
            9 => Error::InsufficientAllowance,
            10 => Error::AlreadyIssued,
            11 => Error::InvalidAmount,
            12 => Error::ExceedsUnlocked,
            13 => Error::Overflow,
            14 => Error::LedgerFailure,
            _ => return None,
        };
        Some(err)
    }

    /// Human-readable reason, stable across releases.
    pub fn message(&self) -> &'static str {
        match self {
            Error::Unauthorized => "Caller is not the campaign owner",
            Error::CampaignNotFound => "Campaign does not exist",
            Error::DonationExceedsNeed => "Donation exceeds the amount the campaign still needs",
            Error::MilestoneNotReached => "Current Milestone has not been reached",
            Error::NoMilestonesDefined => "No milestones have been set",
            Error::AllMilestonesApproved => "Every milestone has already been approved",
            Error::MilestoneNotFound => "Milestone does not exist",
            Error::InsufficientBalance => "Insufficient token balance",
            Error::InsufficientAllowance => "Insufficient token allowance",
            Error::AlreadyIssued => "Tokens have already been issued",
            Error::InvalidAmount => "Amount must be positive",
            Error::ExceedsUnlocked => "Amount exceeds the funds unlocked by approved milestones",
            Error::Overflow => "Arithmetic overflow",
            Error::LedgerFailure => "Token ledger call failed",
        }
    }
}

impl From<LedgerError> for Error {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientBalance => Error::InsufficientBalance,
            LedgerError::InsufficientAllowance => Error::InsufficientAllowance,
            LedgerError::AlreadyIssued => Error::AlreadyIssued,
            LedgerError::NegativeAmount => Error::InvalidAmount,
            LedgerError::Overflow => Error::Overflow,
        }
    }
}

#[contract]
pub struct Escrow;

#[contractimpl]
impl Escrow {
    /// Bind the registry to the token ledger at `ledger`.
    pub fn __constructor(env: Env, ledger: Address) {
        storage::set_ledger(&env, &ledger);
    }

    /// Address of the token ledger used for all custody.
    pub fn ledger(env: Env) -> Address {
        storage::get_ledger(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Registration
    // ─────────────────────────────────────────────────────────

    /// Create a campaign owned by `creator`; returns its index.
    ///
    /// Any address may create a campaign. `amount_needed` must be positive.
    pub fn create_campaign(
        env: Env,
        creator: Address,
        name: String,
        description: String,
        amount_needed: i128,
    ) -> Result<u64, Error> {
        creator.require_auth();
        storage::bump_instance(&env);
        campaign::open(&env, &creator, name, description, amount_needed)
    }

    /// Campaign at creation index `index`.
    pub fn campaigns(env: Env, index: u64) -> Result<Campaign, Error> {
        let (config, state) = campaign::load(&env, index)?;
        Ok(Campaign::from_parts(config, state))
    }

    pub fn campaign_count(env: Env) -> u64 {
        storage::campaign_count(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Issuance
    // ─────────────────────────────────────────────────────────

    /// Ask the ledger for an issuance on `caller`'s behalf.
    ///
    /// The ledger issues its whole supply at deployment, so every call,
    /// the first one included, ends in `AlreadyIssued` without minting.
    /// Supply is fixed for the life of the ledger.
    pub fn issue_coin(env: Env, caller: Address) -> Result<(), Error> {
        caller.require_auth();
        let ledger = ledger_client(&env);
        settle(ledger.try_issue(&env.current_contract_address(), &caller))
    }

    // ─────────────────────────────────────────────────────────
    // Funding
    // ─────────────────────────────────────────────────────────

    /// Donate `amount` from `donor` to campaign `campaign_id`.
    ///
    /// The donor must have approved this contract on the ledger for at
    /// least `amount`. The cap is checked before any tokens move; a donation
    /// larger than the remaining need is rejected whole.
    pub fn donate_coin(env: Env, donor: Address, amount: i128, campaign_id: u64) -> Result<(), Error> {
        donor.require_auth();
        storage::bump_instance(&env);
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let (config, state) = campaign::load(&env, campaign_id)?;
        if amount > campaign::remaining_need(&config, &state) {
            return Err(Error::DonationExceedsNeed);
        }

        let ledger = ledger_client(&env);
        let registry = env.current_contract_address();
        settle(ledger.try_transfer_from(&registry, &donor, &registry, &amount))?;

        campaign::donated(&env, campaign_id, &donor, amount)?;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Milestones
    // ─────────────────────────────────────────────────────────

    /// Append a milestone at cumulative threshold `amount`.
    ///
    /// `caller` must be the campaign owner. Returns the milestone's index.
    pub fn set_milestone(env: Env, caller: Address, campaign_id: u64, amount: i128) -> Result<u32, Error> {
        storage::bump_instance(&env);
        campaign::set_milestone(&env, &caller, campaign_id, amount)
    }

    /// Approve the next pending milestone, recording `transaction_description`.
    ///
    /// `caller` must be the campaign owner. Fails with `MilestoneNotReached`
    /// until the campaign has received at least the milestone's threshold.
    pub fn approve_milestone(
        env: Env,
        caller: Address,
        campaign_id: u64,
        transaction_description: String,
    ) -> Result<u32, Error> {
        storage::bump_instance(&env);
        campaign::approve_milestone(&env, &caller, campaign_id, transaction_description)
    }

    pub fn milestones(env: Env, campaign_id: u64, index: u32) -> Result<Milestone, Error> {
        campaign::milestone(&env, campaign_id, index)
    }

    pub fn milestone_count(env: Env, campaign_id: u64) -> Result<u32, Error> {
        let (_, state) = campaign::load(&env, campaign_id)?;
        Ok(state.milestone_count)
    }

    // ─────────────────────────────────────────────────────────
    // Disbursement
    // ─────────────────────────────────────────────────────────

    /// Pay `amount` of unlocked funds out of custody to the campaign owner.
    pub fn withdraw(env: Env, caller: Address, campaign_id: u64, amount: i128) -> Result<(), Error> {
        storage::bump_instance(&env);
        let owner = campaign::withdraw(&env, &caller, campaign_id, amount)?;

        let ledger = ledger_client(&env);
        settle(ledger.try_transfer(&env.current_contract_address(), &owner, &amount))
    }

    pub fn withdrawable(env: Env, campaign_id: u64) -> Result<i128, Error> {
        let (_, state) = campaign::load(&env, campaign_id)?;
        Ok(campaign::withdrawable(&state))
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn total_amount_received(env: Env, campaign_id: u64) -> Result<i128, Error> {
        let (_, state) = campaign::load(&env, campaign_id)?;
        Ok(state.total_amount_received)
    }

    pub fn donated_amount(env: Env, campaign_id: u64, donor: Address) -> Result<i128, Error> {
        campaign::donated_amount(&env, campaign_id, &donor)
    }

    pub fn remaining_need(env: Env, campaign_id: u64) -> Result<i128, Error> {
        let (config, state) = campaign::load(&env, campaign_id)?;
        Ok(campaign::remaining_need(&config, &state))
    }

    /// Readable reason for an error code returned by this contract.
    pub fn error_message(env: Env, code: u32) -> Option<String> {
        Error::from_code(code).map(|err| String::from_str(&env, err.message()))
    }
}

fn ledger_client(env: &Env) -> LedgerClient<'_> {
    LedgerClient::new(env, &storage::get_ledger(env))
}

/// Collapse the result of a `try_*` ledger call into an escrow error.
fn settle<T, C, I>(result: Result<Result<T, C>, Result<LedgerError, I>>) -> Result<(), Error> {
    match result {
        Ok(Ok(_)) => Ok(()),
        Err(Ok(err)) => Err(err.into()),
        _ => Err(Error::LedgerFailure),
    }
}
