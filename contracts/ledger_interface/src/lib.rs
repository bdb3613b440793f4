//! # Ledger Interface
//!
//! The cross-contract surface of the GiveCoin token ledger.
//!
//! The escrow registry never links against the ledger contract itself; it
//! talks to whichever ledger address it was constructed with through the
//! generated [`LedgerClient`]. Keeping the error codes here lets both sides
//! agree on what a rejected call means.

#![no_std]

use soroban_sdk::{contractclient, contracterror, Address, Env, String};

/// Rejection kinds of the token ledger.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum LedgerError {
    InsufficientBalance   = 1,
    InsufficientAllowance = 2,
    AlreadyIssued         = 3,
    NegativeAmount        = 4,
    Overflow              = 5,
}

#[contractclient(name = "LedgerClient")]
pub trait LedgerInterface {
    /// Move `amount` from `from` to `to`. `from` must authorize.
    fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), LedgerError>;

    /// Set (not add to) the allowance of `spender` over `owner`'s funds.
    fn approve(env: Env, owner: Address, spender: Address, amount: i128) -> Result<(), LedgerError>;

    /// Move `amount` from `from` to `to` on `spender`'s allowance.
    fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), LedgerError>;

    /// Single-shot issuance entry point.
    fn issue(env: Env, caller: Address, to: Address) -> Result<(), LedgerError>;

    fn balance_of(env: Env, account: Address) -> i128;

    fn allowance(env: Env, owner: Address, spender: Address) -> i128;

    fn total_supply(env: Env) -> i128;

    fn name(env: Env) -> String;

    fn symbol(env: Env) -> String;
}
