#![allow(dead_code)]

extern crate std;

use soroban_sdk::Address;

use crate::GiveCoinClient;

/// INV-1: the balances of every known holder sum to the total supply.
///
/// `holders` must cover every account that has ever received tokens.
pub fn assert_conservation(client: &GiveCoinClient, holders: &[&Address]) {
    let sum: i128 = holders.iter().map(|a| client.balance_of(a)).sum();
    assert_eq!(
        sum,
        client.total_supply(),
        "INV-1 violated: balances sum to {} but supply is {}",
        sum,
        client.total_supply()
    );
}

/// INV-2: no balance is ever negative.
pub fn assert_balances_non_negative(client: &GiveCoinClient, holders: &[&Address]) {
    for holder in holders {
        let balance = client.balance_of(holder);
        assert!(balance >= 0, "INV-2 violated: negative balance {}", balance);
    }
}

/// INV-3: a successful `transfer_from` lowers the allowance by exactly `amount`.
pub fn assert_allowance_spent(before: i128, after: i128, amount: i128) {
    assert_eq!(
        after,
        before - amount,
        "INV-3 violated: allowance {} - {} != {}",
        before,
        amount,
        after
    );
    assert!(after >= 0, "INV-3 violated: allowance went negative ({})", after);
}
