//! # GiveCoin Ledger Contract
//!
//! Fixed-supply fungible token backing the donation escrow.
//!
//! | Phase      | Entry Point(s)                                   |
//! |------------|--------------------------------------------------|
//! | Bootstrap  | `__constructor` (issues the whole supply once)   |
//! | Movement   | `transfer`, `transfer_from`                      |
//! | Authority  | `approve`                                        |
//! | Issuance   | `issue` (always rejected after construction)     |
//! | Queries    | `balance_of`, `allowance`, `total_supply`, `name`, `symbol`, `decimals`, `is_issued` |
//!
//! Every mutating entry point validates everything it needs before its first
//! storage write, so a rejected call leaves balances and allowances exactly
//! as they were.

#![no_std]

use soroban_sdk::{contract, contractimpl, panic_with_error, Address, Env, String};

mod events;
mod storage;

#[cfg(test)]
mod invariants;

pub use ledger_interface::LedgerError;

pub const NAME: &str = "GiveCoin";
pub const SYMBOL: &str = "GC";
pub const DECIMALS: u32 = 18;

/// One billion whole tokens in base units.
pub const TOTAL_SUPPLY: i128 = 1_000_000_000 * 10i128.pow(DECIMALS);

#[contract]
pub struct GiveCoin;

#[contractimpl]
impl GiveCoin {
    /// Issue the full supply to `creator`. Runs once, at deployment.
    pub fn __constructor(env: Env, creator: Address) {
        if let Err(e) = issue_supply(&env, &creator) {
            panic_with_error!(&env, e);
        }
    }

    /// Move `amount` from `from` to `to`.
    ///
    /// - `from` must authorize.
    /// - Fails with `InsufficientBalance` when `from` holds less than `amount`.
    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), LedgerError> {
        from.require_auth();
        storage::bump_instance(&env);
        check_non_negative(amount)?;

        move_balance(&env, &from, &to, amount)?;

        events::transfer(&env, &from, &to, amount);
        Ok(())
    }

    /// Set the allowance of `spender` over `owner`'s balance to `amount`.
    ///
    /// Overwrites any previous allowance for the same pair; other pairs are
    /// untouched.
    pub fn approve(env: Env, owner: Address, spender: Address, amount: i128) -> Result<(), LedgerError> {
        owner.require_auth();
        storage::bump_instance(&env);
        check_non_negative(amount)?;

        storage::write_allowance(&env, &owner, &spender, amount);

        events::approve(&env, &owner, &spender, amount);
        Ok(())
    }

    /// Move `amount` from `from` to `to`, spending `spender`'s allowance.
    ///
    /// The allowance is checked first (`InsufficientAllowance`), then the
    /// balance (`InsufficientBalance`). On success the allowance drops by
    /// exactly `amount`.
    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), LedgerError> {
        spender.require_auth();
        storage::bump_instance(&env);
        check_non_negative(amount)?;

        let allowance = storage::read_allowance(&env, &from, &spender);
        if allowance < amount {
            return Err(LedgerError::InsufficientAllowance);
        }

        move_balance(&env, &from, &to, amount)?;
        storage::write_allowance(&env, &from, &spender, allowance - amount);

        events::transfer(&env, &from, &to, amount);
        Ok(())
    }

    /// Single-shot issuance.
    ///
    /// The constructor performs the one issuance there will ever be, so even
    /// the first call after deployment fails with `AlreadyIssued`. Nothing is
    /// minted and the supply stays fixed.
    pub fn issue(env: Env, caller: Address, to: Address) -> Result<(), LedgerError> {
        caller.require_auth();
        issue_supply(&env, &to)
    }

    pub fn balance_of(env: Env, account: Address) -> i128 {
        storage::read_balance(&env, &account)
    }

    pub fn allowance(env: Env, owner: Address, spender: Address) -> i128 {
        storage::read_allowance(&env, &owner, &spender)
    }

    pub fn total_supply(env: Env) -> i128 {
        storage::read_total_supply(&env)
    }

    pub fn is_issued(env: Env) -> bool {
        storage::is_issued(&env)
    }

    pub fn name(env: Env) -> String {
        String::from_str(&env, NAME)
    }

    pub fn symbol(env: Env) -> String {
        String::from_str(&env, SYMBOL)
    }

    pub fn decimals(_env: Env) -> u32 {
        DECIMALS
    }
}

fn check_non_negative(amount: i128) -> Result<(), LedgerError> {
    if amount < 0 {
        return Err(LedgerError::NegativeAmount);
    }
    Ok(())
}

fn issue_supply(env: &Env, to: &Address) -> Result<(), LedgerError> {
    if storage::is_issued(env) {
        return Err(LedgerError::AlreadyIssued);
    }
    storage::write_balance(env, to, TOTAL_SUPPLY);
    storage::mark_issued(env, TOTAL_SUPPLY);
    events::issued(env, to, TOTAL_SUPPLY);
    Ok(())
}

/// Debit `from` and credit `to`. Both sides are computed with checked
/// arithmetic before either balance is written.
fn move_balance(env: &Env, from: &Address, to: &Address, amount: i128) -> Result<(), LedgerError> {
    let from_balance = storage::read_balance(env, from);
    if from_balance < amount {
        return Err(LedgerError::InsufficientBalance);
    }
    if from == to {
        return Ok(());
    }

    let debited = from_balance
        .checked_sub(amount)
        .ok_or(LedgerError::Overflow)?;
    let credited = storage::read_balance(env, to)
        .checked_add(amount)
        .ok_or(LedgerError::Overflow)?;

    storage::write_balance(env, from, debited);
    storage::write_balance(env, to, credited);
    Ok(())
}
