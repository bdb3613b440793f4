extern crate std;

use givecoin::{GiveCoin, GiveCoinClient, DECIMALS};
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    Address, Env, String,
};

use crate::invariants::{assert_all_campaign_invariants, assert_custody_matches, assert_milestones_approved_in_order};
use crate::{Error, Escrow, EscrowClient, NOT_REACHED};

fn tokens(whole: i128) -> i128 {
    whole * 10i128.pow(DECIMALS)
}

struct Fixture {
    env: Env,
    escrow: EscrowClient<'static>,
    token: GiveCoinClient<'static>,
    issuer: Address,
    owner: Address,
    campaign_id: u64,
}

/// A campaign needing 10 tokens, owned by a fresh address.
fn setup() -> Fixture {
    let env = Env::default();
    env.mock_all_auths();

    let issuer = Address::generate(&env);
    let token_id = env.register(GiveCoin, (issuer.clone(),));
    let token = GiveCoinClient::new(&env, &token_id);

    let escrow_id = env.register(Escrow, (token_id.clone(),));
    let escrow = EscrowClient::new(&env, &escrow_id);

    let owner = Address::generate(&env);
    let campaign_id = escrow.create_campaign(
        &owner,
        &String::from_str(&env, "Test Campaign"),
        &String::from_str(&env, "This is a test campaign."),
        &tokens(10),
    );

    Fixture {
        env,
        escrow,
        token,
        issuer,
        owner,
        campaign_id,
    }
}

impl Fixture {
    fn text(&self, s: &str) -> String {
        String::from_str(&self.env, s)
    }

    /// Fund `donor` from the issuer and donate `amount` through the registry.
    fn donate(&self, donor: &Address, amount: i128) {
        self.token.transfer(&self.issuer, donor, &amount);
        self.token.approve(donor, &self.escrow.address, &amount);
        self.escrow.donate_coin(donor, &amount, &self.campaign_id);
    }
}

#[test]
fn test_set_milestone_defaults() {
    let f = setup();

    let index = f.escrow.set_milestone(&f.owner, &f.campaign_id, &tokens(5));
    assert_eq!(index, 0);

    let milestone = f.escrow.milestones(&f.campaign_id, &0);
    assert_eq!(milestone.amount, tokens(5));
    assert!(!milestone.approved);
    assert_eq!(milestone.transaction_description, f.text(NOT_REACHED));
    assert_eq!(f.escrow.milestone_count(&f.campaign_id), 1);
}

#[test]
fn test_set_milestone_requires_owner() {
    let f = setup();
    let stranger = Address::generate(&f.env);

    let result = f.escrow.try_set_milestone(&stranger, &f.campaign_id, &tokens(5));
    assert_eq!(result, Err(Ok(Error::Unauthorized)));
    assert_eq!(f.escrow.milestone_count(&f.campaign_id), 0);
}

#[test]
fn test_set_milestone_rejects_negative_threshold() {
    let f = setup();

    let result = f.escrow.try_set_milestone(&f.owner, &f.campaign_id, &-1);
    assert_eq!(result, Err(Ok(Error::InvalidAmount)));
}

#[test]
fn test_set_milestone_is_not_bounded_by_goal() {
    let f = setup();

    f.escrow.set_milestone(&f.owner, &f.campaign_id, &tokens(50));
    assert_eq!(f.escrow.milestones(&f.campaign_id, &0).amount, tokens(50));
}

#[test]
fn test_approve_when_milestone_reached() {
    let f = setup();
    let donor1 = Address::generate(&f.env);

    f.escrow.set_milestone(&f.owner, &f.campaign_id, &tokens(5));
    f.donate(&donor1, tokens(5));
    assert!(!f.escrow.milestones(&f.campaign_id, &0).approved);

    let approved = f.escrow.approve_milestone(&f.owner, &f.campaign_id, &f.text("ok"));
    assert_eq!(approved, 0);

    let milestone = f.escrow.milestones(&f.campaign_id, &0);
    assert!(milestone.approved);
    assert_eq!(milestone.transaction_description, f.text("ok"));
}

#[test]
fn test_approve_fails_before_milestone_reached() {
    let f = setup();
    let donor1 = Address::generate(&f.env);

    f.escrow.set_milestone(&f.owner, &f.campaign_id, &tokens(5));
    f.donate(&donor1, tokens(2));

    let result = f.escrow.try_approve_milestone(
        &f.owner,
        &f.campaign_id,
        &f.text("Milestone reached and approved"),
    );
    assert_eq!(result, Err(Ok(Error::MilestoneNotReached)));
    assert!(Error::MilestoneNotReached
        .message()
        .contains("Current Milestone has not been reached"));

    let milestone = f.escrow.milestones(&f.campaign_id, &0);
    assert!(!milestone.approved);
    assert_eq!(milestone.transaction_description, f.text(NOT_REACHED));
}

#[test]
fn test_later_donations_keep_approved_milestone() {
    let f = setup();
    let donor1 = Address::generate(&f.env);
    let donor2 = Address::generate(&f.env);

    f.escrow.set_milestone(&f.owner, &f.campaign_id, &tokens(5));
    f.donate(&donor1, tokens(5));
    assert_eq!(f.escrow.total_amount_received(&f.campaign_id), tokens(5));

    f.escrow.approve_milestone(&f.owner, &f.campaign_id, &f.text("Milestone reached and approved"));
    f.donate(&donor2, tokens(3));

    assert_eq!(f.escrow.total_amount_received(&f.campaign_id), tokens(8));
    assert!(f.escrow.milestones(&f.campaign_id, &0).approved);
    assert_eq!(f.escrow.donated_amount(&f.campaign_id, &donor2), tokens(3));

    assert_all_campaign_invariants(&f.escrow, f.campaign_id, &[&donor1, &donor2]);
}

#[test]
fn test_approve_without_milestones() {
    let f = setup();

    let result = f.escrow.try_approve_milestone(&f.owner, &f.campaign_id, &f.text("ok"));
    assert_eq!(result, Err(Ok(Error::NoMilestonesDefined)));
}

#[test]
fn test_approve_requires_owner() {
    let f = setup();
    let donor = Address::generate(&f.env);
    let stranger = Address::generate(&f.env);

    f.escrow.set_milestone(&f.owner, &f.campaign_id, &tokens(1));
    f.donate(&donor, tokens(1));

    let result = f.escrow.try_approve_milestone(&stranger, &f.campaign_id, &f.text("ok"));
    assert_eq!(result, Err(Ok(Error::Unauthorized)));
    assert!(!f.escrow.milestones(&f.campaign_id, &0).approved);
}

#[test]
fn test_milestones_are_approved_one_at_a_time() {
    let f = setup();
    let donor = Address::generate(&f.env);

    f.escrow.set_milestone(&f.owner, &f.campaign_id, &tokens(3));
    f.escrow.set_milestone(&f.owner, &f.campaign_id, &tokens(6));
    f.donate(&donor, tokens(7));

    assert_eq!(f.escrow.approve_milestone(&f.owner, &f.campaign_id, &f.text("first")), 0);
    assert!(!f.escrow.milestones(&f.campaign_id, &1).approved);

    assert_eq!(f.escrow.approve_milestone(&f.owner, &f.campaign_id, &f.text("second")), 1);
    assert_eq!(f.escrow.milestones(&f.campaign_id, &0).transaction_description, f.text("first"));
    assert_eq!(f.escrow.milestones(&f.campaign_id, &1).transaction_description, f.text("second"));

    let result = f.escrow.try_approve_milestone(&f.owner, &f.campaign_id, &f.text("third"));
    assert_eq!(result, Err(Ok(Error::AllMilestonesApproved)));
    assert_milestones_approved_in_order(&f.escrow, f.campaign_id);
}

#[test]
fn test_later_milestone_waits_for_earlier_one() {
    let f = setup();
    let donor = Address::generate(&f.env);

    // The second threshold is met, the first is not.
    f.escrow.set_milestone(&f.owner, &f.campaign_id, &tokens(6));
    f.escrow.set_milestone(&f.owner, &f.campaign_id, &tokens(2));
    f.donate(&donor, tokens(3));

    let result = f.escrow.try_approve_milestone(&f.owner, &f.campaign_id, &f.text("skip"));
    assert_eq!(result, Err(Ok(Error::MilestoneNotReached)));
    assert!(!f.escrow.milestones(&f.campaign_id, &0).approved);
    assert!(!f.escrow.milestones(&f.campaign_id, &1).approved);

    f.donate(&donor, tokens(3));
    assert_eq!(f.escrow.approve_milestone(&f.owner, &f.campaign_id, &f.text("a")), 0);
    assert_eq!(f.escrow.approve_milestone(&f.owner, &f.campaign_id, &f.text("b")), 1);
    assert_milestones_approved_in_order(&f.escrow, f.campaign_id);
}

#[test]
fn test_milestone_out_of_range() {
    let f = setup();
    f.escrow.set_milestone(&f.owner, &f.campaign_id, &tokens(1));

    assert_eq!(
        f.escrow.try_milestones(&f.campaign_id, &1),
        Err(Ok(Error::MilestoneNotFound))
    );
    assert_eq!(f.escrow.try_milestones(&99, &0), Err(Ok(Error::CampaignNotFound)));
}

#[test]
fn test_milestone_reads_are_repeatable() {
    let f = setup();
    f.escrow.set_milestone(&f.owner, &f.campaign_id, &tokens(4));

    let first = f.escrow.milestones(&f.campaign_id, &0);
    let second = f.escrow.milestones(&f.campaign_id, &0);
    assert_eq!(first, second);
    assert_eq!(
        f.escrow.total_amount_received(&f.campaign_id),
        f.escrow.total_amount_received(&f.campaign_id)
    );
}

#[test]
fn test_withdraw_is_gated_by_approval() {
    let f = setup();
    let donor = Address::generate(&f.env);

    f.escrow.set_milestone(&f.owner, &f.campaign_id, &tokens(5));
    f.donate(&donor, tokens(8));
    assert_eq!(f.escrow.withdrawable(&f.campaign_id), 0);

    let result = f.escrow.try_withdraw(&f.owner, &f.campaign_id, &tokens(1));
    assert_eq!(result, Err(Ok(Error::ExceedsUnlocked)));

    f.escrow.approve_milestone(&f.owner, &f.campaign_id, &f.text("phase one"));
    assert_eq!(f.escrow.withdrawable(&f.campaign_id), tokens(5));

    f.escrow.withdraw(&f.owner, &f.campaign_id, &tokens(5));
    assert_eq!(f.token.balance_of(&f.owner), tokens(5));
    assert_eq!(f.token.balance_of(&f.escrow.address), tokens(3));
    assert_eq!(f.escrow.withdrawable(&f.campaign_id), 0);
    assert_eq!(f.escrow.campaigns(&f.campaign_id).total_withdrawn, tokens(5));

    let result = f.escrow.try_withdraw(&f.owner, &f.campaign_id, &1);
    assert_eq!(result, Err(Ok(Error::ExceedsUnlocked)));

    assert_custody_matches(&f.token, &f.escrow);
}

#[test]
fn test_withdraw_requires_owner() {
    let f = setup();
    let donor = Address::generate(&f.env);
    let stranger = Address::generate(&f.env);

    f.escrow.set_milestone(&f.owner, &f.campaign_id, &tokens(2));
    f.donate(&donor, tokens(2));
    f.escrow.approve_milestone(&f.owner, &f.campaign_id, &f.text("done"));

    let result = f.escrow.try_withdraw(&stranger, &f.campaign_id, &tokens(1));
    assert_eq!(result, Err(Ok(Error::Unauthorized)));
    assert_eq!(f.token.balance_of(&stranger), 0);
    assert_eq!(f.escrow.withdrawable(&f.campaign_id), tokens(2));
}

#[test]
fn test_campaign_survives_weeks_of_daily_donations() {
    let f = setup();
    let donor = Address::generate(&f.env);

    f.escrow.set_milestone(&f.owner, &f.campaign_id, &10);
    f.escrow.set_milestone(&f.owner, &f.campaign_id, &30);

    // Forty days with no new campaigns; only donations touch the registry.
    for _ in 0..40 {
        f.env.ledger().with_mut(|li| li.sequence_number += 17_280);
        f.donate(&donor, 1);
    }
    assert_eq!(f.escrow.total_amount_received(&f.campaign_id), 40);

    f.escrow.approve_milestone(&f.owner, &f.campaign_id, &f.text("first"));
    f.escrow.approve_milestone(&f.owner, &f.campaign_id, &f.text("second"));
    f.escrow.withdraw(&f.owner, &f.campaign_id, &30);

    assert_eq!(f.token.balance_of(&f.owner), 30);
    assert_eq!(f.escrow.withdrawable(&f.campaign_id), 0);
    assert_eq!(f.escrow.campaigns(&f.campaign_id).name, f.text("Test Campaign"));
    assert_milestones_approved_in_order(&f.escrow, f.campaign_id);
    assert_all_campaign_invariants(&f.escrow, f.campaign_id, &[&donor]);
    assert_custody_matches(&f.token, &f.escrow);
}
