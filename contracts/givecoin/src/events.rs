//! Ledger events.
//!
//! | Topic                              | Data     |
//! |------------------------------------|----------|
//! | `("issued", to)`                   | `amount` |
//! | `("transfer", from, to)`           | `amount` |
//! | `("approve", owner, spender)`      | `amount` |

use soroban_sdk::{symbol_short, Address, Env};

pub fn issued(env: &Env, to: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("issued"), to.clone()), amount);
}

pub fn transfer(env: &Env, from: &Address, to: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("transfer"), from.clone(), to.clone()), amount);
}

pub fn approve(env: &Env, owner: &Address, spender: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("approve"), owner.clone(), spender.clone()), amount);
}
