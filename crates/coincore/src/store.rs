//! In-memory account store
//!
//! Accounts live in a [`DashMap`] keyed by user id. Every mutation goes
//! through the map's entry guard, so concurrent updates to the same user are
//! serialized by the shard lock and no coin change is lost. Nothing is
//! persisted; a restart starts from an empty store.

use dashmap::DashMap;

use crate::account::Account;
use crate::error::{CoreError, CoreResult};
use crate::metrics::ACCOUNTS_CREATED_TOTAL;

/// Owned account storage, shared behind an `Arc` by the engine.
#[derive(Debug, Default)]
pub struct UserStore {
    accounts: DashMap<i64, Account>,
}

fn new_account(user_id: i64) -> Account {
    tracing::info!(user_id, "account created");
    ACCOUNTS_CREATED_TOTAL.inc();
    Account::default()
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the account for `user_id`, creating it with defaults on first
    /// contact. Repeat calls return the stored state untouched.
    pub fn ensure(&self, user_id: i64) -> Account {
        self.accounts
            .entry(user_id)
            .or_insert_with(|| new_account(user_id))
            .value()
            .clone()
    }

    /// Reads an account without creating it.
    pub fn get(&self, user_id: i64) -> CoreResult<Account> {
        self.accounts
            .get(&user_id)
            .map(|entry| entry.value().clone())
            .ok_or(CoreError::NotFound(user_id))
    }

    pub fn contains(&self, user_id: i64) -> bool {
        self.accounts.contains_key(&user_id)
    }

    /// Adds `delta` to the coin balance and returns the new balance.
    ///
    /// The balance never goes below zero.
    pub fn adjust_coins(&self, user_id: i64, delta: i64) -> CoreResult<u64> {
        let mut entry = self.accounts.get_mut(&user_id).ok_or(CoreError::NotFound(user_id))?;
        Ok(entry.apply_delta(delta))
    }

    /// Runs `f` against the account while holding its entry lock, creating the
    /// account first if needed.
    ///
    /// `f` must not touch the store again or it will deadlock on the shard.
    pub fn update<R>(&self, user_id: i64, f: impl FnOnce(&mut Account) -> R) -> R {
        let mut entry = self.accounts.entry(user_id).or_insert_with(|| new_account(user_id));
        f(entry.value_mut())
    }

    pub fn set_premium(&self, user_id: i64, premium: bool) -> Account {
        self.update(user_id, |account| {
            account.premium = premium;
            account.clone()
        })
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Sum of all coin balances.
    pub fn total_coins(&self) -> u64 {
        self.accounts
            .iter()
            .fold(0u64, |total, entry| total.saturating_add(entry.value().coins))
    }

    pub fn premium_count(&self) -> usize {
        self.accounts.iter().filter(|entry| entry.value().premium).count()
    }
}
