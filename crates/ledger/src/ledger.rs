//! Enumerable respect token ledger
//!
//! Holds token existence, value and ownership, and keeps these in lock-step:
//!
//! - `total_supply()` equals the sum of all live token values
//! - `token_supply()` equals the number of live tokens
//! - `balance_of(o)` equals the sum of values of tokens owned by `o`
//! - `token_supply_of_owner(o)` equals the number of tokens owned by `o`
//! - global and per-owner indices are dense (`0..count`)
//!
//! The only writers are [`TokenLedger::mint`], [`TokenLedger::mint_batch`] and
//! [`TokenLedger::burn`].

use crate::enumerable::EnumerableSet;
use crate::errors::*;
use respect_types::{Address, TokenId, TokenIdData};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// A single token to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintInstruction {
    pub token_id: TokenId,
    pub owner: Address,
    pub value: u64,
}

impl MintInstruction {
    pub fn new(data: TokenIdData, value: u64) -> Self {
        Self {
            token_id: data.pack(),
            owner: data.owner,
            value,
        }
    }
}

/// Anything that can apply a batch of mints atomically.
pub trait TokenMinter {
    /// Apply every instruction, or none of them.
    fn mint_batch(&mut self, mints: &[MintInstruction]) -> Result<()>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenLedger {
    all_tokens: EnumerableSet<TokenId>,
    owned_tokens: HashMap<Address, EnumerableSet<TokenId>>,
    values: HashMap<TokenId, u64>,
    balances: HashMap<Address, u128>,
    // Cannot overflow: fewer than 2^64 tokens, each below 2^64.
    total_supply: u128,
}

impl TokenLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a token. Fails if `id` is live, `value` is zero, or `owner`
    /// is not the owner encoded in `id`.
    pub fn mint(&mut self, id: TokenId, value: u64, owner: Address) -> Result<()> {
        self.check_mint(&MintInstruction {
            token_id: id,
            owner,
            value,
        })?;
        self.apply_mint(id, value, owner);
        Ok(())
    }

    /// Destroy a token, returning its value.
    pub fn burn(&mut self, id: &TokenId) -> Result<u64> {
        let value = self
            .values
            .remove(id)
            .ok_or(LedgerError::TokenNotFound { token_id: *id })?;
        let owner = id.owner();

        self.all_tokens.remove(id);
        if let Some(owned) = self.owned_tokens.get_mut(&owner) {
            owned.remove(id);
            if owned.is_empty() {
                self.owned_tokens.remove(&owner);
            }
        }

        let value_wide = value as u128;
        if let Some(balance) = self.balances.get_mut(&owner) {
            *balance -= value_wide;
            if *balance == 0 {
                self.balances.remove(&owner);
            }
        }
        self.total_supply -= value_wide;

        debug!(
            target: "ledger",
            "Burned token {} ({} respect) from {}",
            id, value, owner
        );
        Ok(value)
    }

    pub fn exists(&self, id: &TokenId) -> bool {
        self.values.contains_key(id)
    }

    pub fn token_by_index(&self, index: usize) -> Result<TokenId> {
        self.all_tokens
            .get(index)
            .ok_or(LedgerError::IndexOutOfRange {
                index,
                len: self.all_tokens.len(),
            })
    }

    pub fn token_of_owner_by_index(&self, owner: &Address, index: usize) -> Result<TokenId> {
        let owned = self.owned_tokens.get(owner);
        owned
            .and_then(|set| set.get(index))
            .ok_or(LedgerError::OwnerIndexOutOfRange {
                owner: *owner,
                index,
                len: owned.map_or(0, EnumerableSet::len),
            })
    }

    pub fn value_of_token(&self, id: &TokenId) -> Result<u64> {
        self.values
            .get(id)
            .copied()
            .ok_or(LedgerError::TokenNotFound { token_id: *id })
    }

    pub fn owner_of(&self, id: &TokenId) -> Result<Address> {
        if self.exists(id) {
            Ok(id.owner())
        } else {
            Err(LedgerError::TokenNotFound { token_id: *id })
        }
    }

    pub fn balance_of(&self, owner: &Address) -> u128 {
        self.balances.get(owner).copied().unwrap_or(0)
    }

    /// Number of live tokens.
    pub fn token_supply(&self) -> usize {
        self.all_tokens.len()
    }

    /// Sum of all live token values.
    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    pub fn token_supply_of_owner(&self, owner: &Address) -> usize {
        self.owned_tokens.get(owner).map_or(0, EnumerableSet::len)
    }

    /// Owner's token ids in index order.
    pub fn tokens_of_owner(&self, owner: &Address) -> Vec<TokenId> {
        self.owned_tokens
            .get(owner)
            .map(|set| set.as_slice().to_vec())
            .unwrap_or_default()
    }

    /// Respect earned by `owner` in the `period_count` periods ending at
    /// `current_period` (inclusive).
    pub fn earnings_per_last_periods(
        &self,
        owner: &Address,
        current_period: u64,
        period_count: u64,
    ) -> u128 {
        if period_count == 0 {
            return 0;
        }
        let first_period = current_period.saturating_sub(period_count - 1);
        self.owned_tokens
            .get(owner)
            .map(|owned| {
                owned
                    .iter()
                    .filter(|id| (first_period..=current_period).contains(&id.period_number()))
                    .filter_map(|id| self.values.get(id))
                    .map(|value| *value as u128)
                    .sum()
            })
            .unwrap_or(0)
    }

    /// Always fails: respect cannot change hands.
    pub fn transfer(&mut self, _from: &Address, _to: &Address, _id: &TokenId) -> Result<()> {
        Err(LedgerError::TransferNotSupported)
    }

    /// Always fails: there is nothing to approve.
    pub fn approve(&mut self, _spender: &Address, _id: &TokenId) -> Result<()> {
        Err(LedgerError::TransferNotSupported)
    }

    /// Always fails: there is nothing to approve.
    pub fn set_approval_for_all(&mut self, _operator: &Address, _approved: bool) -> Result<()> {
        Err(LedgerError::TransferNotSupported)
    }

    /// Recompute every aggregate from the token set and compare with the
    /// stored counters. Used after restoring a snapshot.
    pub fn verify_consistency(&self) -> Result<()> {
        if self.all_tokens.len() != self.values.len() {
            return Err(LedgerError::Inconsistent(format!(
                "{} indexed tokens but {} valued tokens",
                self.all_tokens.len(),
                self.values.len()
            )));
        }

        let mut total: u128 = 0;
        let mut balances: HashMap<Address, u128> = HashMap::new();
        let mut counts: HashMap<Address, usize> = HashMap::new();
        for id in self.all_tokens.iter() {
            let value = *self.values.get(id).ok_or_else(|| {
                LedgerError::Inconsistent(format!("indexed token {id} has no value"))
            })?;
            if value == 0 {
                return Err(LedgerError::Inconsistent(format!("token {id} has zero value")));
            }
            let owner = id.owner();
            total += value as u128;
            *balances.entry(owner).or_default() += value as u128;
            *counts.entry(owner).or_default() += 1;
            if !self
                .owned_tokens
                .get(&owner)
                .is_some_and(|owned| owned.contains(id))
            {
                return Err(LedgerError::Inconsistent(format!(
                    "token {id} missing from owner index of {owner}"
                )));
            }
        }

        if total != self.total_supply {
            return Err(LedgerError::Inconsistent(format!(
                "total supply {} but token values sum to {}",
                self.total_supply, total
            )));
        }
        if balances != self.balances {
            return Err(LedgerError::Inconsistent(
                "owner balances do not match token values".to_string(),
            ));
        }
        let indexed_counts: HashMap<Address, usize> = self
            .owned_tokens
            .iter()
            .map(|(owner, owned)| (*owner, owned.len()))
            .collect();
        if indexed_counts != counts {
            return Err(LedgerError::Inconsistent(
                "owner indices do not match token set".to_string(),
            ));
        }
        Ok(())
    }

    fn check_mint(&self, mint: &MintInstruction) -> Result<()> {
        if self.exists(&mint.token_id) {
            return Err(LedgerError::DuplicateToken {
                token_id: mint.token_id,
            });
        }
        if mint.value == 0 {
            return Err(LedgerError::ZeroValue {
                token_id: mint.token_id,
            });
        }
        if mint.token_id.owner() != mint.owner {
            return Err(LedgerError::OwnerMismatch {
                token_id: mint.token_id,
                owner: mint.owner,
            });
        }
        Ok(())
    }

    fn apply_mint(&mut self, id: TokenId, value: u64, owner: Address) {
        self.all_tokens.insert(id);
        self.owned_tokens.entry(owner).or_default().insert(id);
        self.values.insert(id, value);
        *self.balances.entry(owner).or_default() += value as u128;
        self.total_supply += value as u128;

        debug!(
            target: "ledger",
            "Minted token {} ({} respect) to {}",
            id, value, owner
        );
    }
}

impl TokenMinter for TokenLedger {
    /// Every instruction is checked against the ledger and against the rest
    /// of the batch before the first one is applied.
    fn mint_batch(&mut self, mints: &[MintInstruction]) -> Result<()> {
        let mut seen = HashSet::with_capacity(mints.len());
        for mint in mints {
            self.check_mint(mint)?;
            if !seen.insert(mint.token_id) {
                return Err(LedgerError::DuplicateToken {
                    token_id: mint.token_id,
                });
            }
        }

        for mint in mints {
            self.apply_mint(mint.token_id, mint.value, mint.owner);
        }

        if !mints.is_empty() {
            info!(
                target: "ledger",
                "Minted batch of {} tokens; token supply {}, total supply {}",
                mints.len(),
                self.token_supply(),
                self.total_supply
            );
        }
        Ok(())
    }
}
