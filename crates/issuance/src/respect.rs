//! Fractal Respect facade over the submission controller and the token ledger

use crate::config::IssuanceConfig;
use crate::controller::SubmissionController;
use crate::errors::*;
use parking_lot::RwLock;
use respect_distribution::DistributionReport;
use respect_ledger::TokenLedger;
use respect_types::{Address, Clock, GroupRanking, SystemClock, TokenId, TokenIdData};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Collection metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub base_uri: String,
}

/// Complete persisted state of one issuance instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuanceSnapshot {
    pub metadata: TokenMetadata,
    pub controller: SubmissionController,
    pub ledger: TokenLedger,
}

/// Respect issuance instance.
///
/// All calls are serialized through one lock: a mutation holds the write
/// guard from its first check until its last state change, so readers see
/// either none or all of it.
pub struct FractalRespect {
    state: RwLock<IssuanceSnapshot>,
    clock: Arc<dyn Clock>,
}

impl FractalRespect {
    pub fn new(config: IssuanceConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let controller = SubmissionController::new(&config)?;
        info!(
            target: "issuance",
            "Created {} ({}) with issuer {}, ranks delay {}s",
            config.name, config.symbol, config.issuer, config.ranks_delay
        );
        Ok(Self {
            state: RwLock::new(IssuanceSnapshot {
                metadata: TokenMetadata {
                    name: config.name,
                    symbol: config.symbol,
                    base_uri: config.base_uri,
                },
                controller,
                ledger: TokenLedger::new(),
            }),
            clock,
        })
    }

    pub fn with_system_clock(config: IssuanceConfig) -> Result<Self> {
        Self::new(config, Arc::new(SystemClock))
    }

    /// Restore from a snapshot, rejecting one whose ledger aggregates do not
    /// match its tokens.
    pub fn from_snapshot(snapshot: IssuanceSnapshot, clock: Arc<dyn Clock>) -> Result<Self> {
        if snapshot.controller.issuer().is_zero() {
            return Err(IssuanceError::ZeroAddress { role: "issuer" });
        }
        snapshot.ledger.verify_consistency()?;
        debug!(
            target: "issuance",
            "Restored at period {} with {} tokens",
            snapshot.controller.period_number(),
            snapshot.ledger.token_supply()
        );
        Ok(Self {
            state: RwLock::new(snapshot),
            clock,
        })
    }

    pub fn snapshot(&self) -> IssuanceSnapshot {
        self.state.read().clone()
    }

    // ---------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------

    /// Close the next period with the given rankings. Issuer or executor.
    pub fn submit_ranks(
        &self,
        caller: &Address,
        groups: &[GroupRanking],
    ) -> Result<DistributionReport> {
        let now = self.clock.now_secs();
        let mut state = self.state.write();
        let IssuanceSnapshot {
            controller, ledger, ..
        } = &mut *state;
        controller.submit_ranks(ledger, caller, now, groups)
    }

    pub fn set_ranks_delay(&self, caller: &Address, ranks_delay: u64) -> Result<()> {
        self.state.write().controller.set_ranks_delay(caller, ranks_delay)
    }

    pub fn set_executor(&self, caller: &Address, executor: Address) -> Result<()> {
        self.state.write().controller.set_executor(caller, executor)
    }

    pub fn set_base_uri(&self, caller: &Address, base_uri: impl Into<String>) -> Result<()> {
        let mut state = self.state.write();
        state.controller.require_issuer(caller, "set base uri")?;
        state.metadata.base_uri = base_uri.into();
        info!(target: "issuance", "Base URI set to {:?}", state.metadata.base_uri);
        Ok(())
    }

    /// Issue a single token outside the ranking schedule. Issuer only.
    pub fn mint(
        &self,
        caller: &Address,
        to: Address,
        value: u64,
        period_number: u64,
        mint_type: u8,
    ) -> Result<TokenId> {
        let mut state = self.state.write();
        state.controller.require_issuer(caller, "mint")?;
        if to.is_zero() {
            return Err(IssuanceError::ZeroAddress { role: "token owner" });
        }

        let id = TokenIdData::new(to, period_number, mint_type).pack();
        state.ledger.mint(id, value, to)?;
        info!(
            target: "issuance",
            "Minted {} respect to {} (period {}, type {})", value, to, period_number, mint_type
        );
        Ok(id)
    }

    /// Destroy a token, returning its value. Issuer only.
    pub fn burn(&self, caller: &Address, id: &TokenId) -> Result<u64> {
        let mut state = self.state.write();
        state.controller.require_issuer(caller, "burn")?;
        let value = state.ledger.burn(id)?;
        info!(target: "issuance", "Burned token {} worth {} respect", id, value);
        Ok(value)
    }

    /// Always fails: respect is not transferable.
    pub fn transfer_from(
        &self,
        caller: &Address,
        from: &Address,
        to: &Address,
        id: &TokenId,
    ) -> Result<()> {
        debug!(target: "issuance", "Transfer attempt by {}", caller);
        Ok(self.state.write().ledger.transfer(from, to, id)?)
    }

    /// Always fails: respect is not transferable.
    pub fn approve(&self, _caller: &Address, spender: &Address, id: &TokenId) -> Result<()> {
        Ok(self.state.write().ledger.approve(spender, id)?)
    }

    /// Always fails: respect is not transferable.
    pub fn set_approval_for_all(
        &self,
        _caller: &Address,
        operator: &Address,
        approved: bool,
    ) -> Result<()> {
        Ok(self
            .state
            .write()
            .ledger
            .set_approval_for_all(operator, approved)?)
    }

    // ---------------------------------------------------------------------
    // Views
    // ---------------------------------------------------------------------

    pub fn name(&self) -> String {
        self.state.read().metadata.name.clone()
    }

    pub fn symbol(&self) -> String {
        self.state.read().metadata.symbol.clone()
    }

    pub fn base_uri(&self) -> String {
        self.state.read().metadata.base_uri.clone()
    }

    /// `base_uri` followed by the decimal token id. Fails for absent tokens.
    pub fn token_uri(&self, id: &TokenId) -> Result<String> {
        let state = self.state.read();
        state.ledger.owner_of(id)?;
        Ok(format!("{}{}", state.metadata.base_uri, id))
    }

    pub fn issuer(&self) -> Address {
        self.state.read().controller.issuer()
    }

    pub fn executor(&self) -> Address {
        self.state.read().controller.executor()
    }

    pub fn period_number(&self) -> u64 {
        self.state.read().controller.period_number()
    }

    pub fn last_submission_time(&self) -> u64 {
        self.state.read().controller.last_submission_time()
    }

    pub fn ranks_delay(&self) -> u64 {
        self.state.read().controller.ranks_delay()
    }

    pub fn next_submission_time(&self) -> u64 {
        self.state.read().controller.schedule().next_allowed()
    }

    pub fn token_supply(&self) -> usize {
        self.state.read().ledger.token_supply()
    }

    pub fn total_supply(&self) -> u128 {
        self.state.read().ledger.total_supply()
    }

    pub fn balance_of(&self, owner: &Address) -> u128 {
        self.state.read().ledger.balance_of(owner)
    }

    pub fn token_supply_of_owner(&self, owner: &Address) -> usize {
        self.state.read().ledger.token_supply_of_owner(owner)
    }

    pub fn token_by_index(&self, index: usize) -> Result<TokenId> {
        Ok(self.state.read().ledger.token_by_index(index)?)
    }

    pub fn token_of_owner_by_index(&self, owner: &Address, index: usize) -> Result<TokenId> {
        Ok(self.state.read().ledger.token_of_owner_by_index(owner, index)?)
    }

    pub fn tokens_of_owner(&self, owner: &Address) -> Vec<TokenId> {
        self.state.read().ledger.tokens_of_owner(owner)
    }

    pub fn value_of_token(&self, id: &TokenId) -> Result<u64> {
        Ok(self.state.read().ledger.value_of_token(id)?)
    }

    pub fn owner_of(&self, id: &TokenId) -> Result<Address> {
        Ok(self.state.read().ledger.owner_of(id)?)
    }

    /// Respect `owner` earned over the last `period_count` periods, counting
    /// back from the current period.
    pub fn earnings_per_last_periods(&self, owner: &Address, period_count: u64) -> u128 {
        let state = self.state.read();
        let current = state.controller.period_number();
        state
            .ledger
            .earnings_per_last_periods(owner, current, period_count)
    }

    pub fn pack_token_id(&self, data: &TokenIdData) -> TokenId {
        data.pack()
    }

    pub fn unpack_token_id(&self, id: &TokenId) -> TokenIdData {
        TokenIdData::from(*id)
    }
}
