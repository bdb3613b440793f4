extern crate std;

use givecoin::{GiveCoin, GiveCoinClient};
use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    vec, Address, Env, IntoVal, String, TryIntoVal,
};

use crate::events::{CampaignCreated, DonationReceived, FundsWithdrawn, MilestoneApproved, MilestoneSet};
use crate::{Escrow, EscrowClient};

fn setup() -> (Env, EscrowClient<'static>, GiveCoinClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let issuer = Address::generate(&env);
    let token_id = env.register(GiveCoin, (issuer.clone(),));
    let token = GiveCoinClient::new(&env, &token_id);

    let escrow_id = env.register(Escrow, (token_id.clone(),));
    let escrow = EscrowClient::new(&env, &escrow_id);

    (env, escrow, token, issuer)
}

fn open_campaign(env: &Env, escrow: &EscrowClient, owner: &Address, needed: i128) -> u64 {
    escrow.create_campaign(
        owner,
        &String::from_str(env, "Wells"),
        &String::from_str(env, "Clean water"),
        &needed,
    )
}

#[test]
fn test_campaign_created_event() {
    let (env, escrow, _, _) = setup();
    let owner = Address::generate(&env);

    let id = open_campaign(&env, &escrow, &owner, 5_000);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, escrow.address);
    let expected_topics = vec![
        &env,
        symbol_short!("created").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: CampaignCreated = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        CampaignCreated {
            campaign_id: id,
            owner: owner.clone(),
            amount_needed: 5_000,
        }
    );
}

#[test]
fn test_donation_received_event() {
    let (env, escrow, token, issuer) = setup();
    let owner = Address::generate(&env);
    let donor = Address::generate(&env);
    let id = open_campaign(&env, &escrow, &owner, 5_000);

    token.transfer(&issuer, &donor, &1_000);
    token.approve(&donor, &escrow.address, &1_000);
    escrow.donate_coin(&donor, &1_000, &id);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, escrow.address);
    let expected_topics = vec![
        &env,
        symbol_short!("donated").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: DonationReceived = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        DonationReceived {
            campaign_id: id,
            donor: donor.clone(),
            amount: 1_000,
            total_received: 1_000,
        }
    );
}

#[test]
fn test_milestone_events() {
    let (env, escrow, token, issuer) = setup();
    let owner = Address::generate(&env);
    let donor = Address::generate(&env);
    let id = open_campaign(&env, &escrow, &owner, 5_000);

    escrow.set_milestone(&owner, &id, &2_000);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");
    let expected_topics = vec![
        &env,
        symbol_short!("ms_set").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);
    let event_data: MilestoneSet = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        MilestoneSet {
            campaign_id: id,
            owner: owner.clone(),
            index: 0,
            amount: 2_000,
        }
    );

    token.transfer(&issuer, &donor, &2_000);
    token.approve(&donor, &escrow.address, &2_000);
    escrow.donate_coin(&donor, &2_000, &id);

    let description = String::from_str(&env, "wells dug");
    escrow.approve_milestone(&owner, &id, &description);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");
    let expected_topics = vec![
        &env,
        symbol_short!("ms_apprv").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);
    let event_data: MilestoneApproved = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        MilestoneApproved {
            campaign_id: id,
            owner: owner.clone(),
            index: 0,
            amount: 2_000,
            description,
        }
    );
}

#[test]
fn test_funds_withdrawn_event() {
    let (env, escrow, token, issuer) = setup();
    let owner = Address::generate(&env);
    let donor = Address::generate(&env);
    let id = open_campaign(&env, &escrow, &owner, 5_000);

    escrow.set_milestone(&owner, &id, &1_000);
    token.transfer(&issuer, &donor, &1_000);
    token.approve(&donor, &escrow.address, &1_000);
    escrow.donate_coin(&donor, &1_000, &id);
    escrow.approve_milestone(&owner, &id, &String::from_str(&env, "ok"));
    escrow.withdraw(&owner, &id, &400);

    // The payout's ledger transfer event is emitted after ours.
    let all_events = env.events().all();
    let ours = all_events
        .iter()
        .filter(|e| e.0 == escrow.address)
        .last()
        .expect("No escrow events found");

    let expected_topics = vec![
        &env,
        symbol_short!("withdrawn").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(ours.1, expected_topics);
    let event_data: FundsWithdrawn = ours.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        FundsWithdrawn {
            campaign_id: id,
            owner: owner.clone(),
            amount: 400,
        }
    );
}
