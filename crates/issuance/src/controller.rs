//! Submission controller: roles, period schedule and the ranking submission
//! state machine.

use crate::config::IssuanceConfig;
use crate::errors::*;
use respect_distribution::{distribute, DistributionReport, RANKS_MINT_TYPE};
use respect_ledger::TokenMinter;
use respect_types::{Address, GroupRanking};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Who may act on the issuance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roles {
    /// Fixed at construction.
    pub issuer: Address,
    /// Zero when unset.
    pub executor: Address,
}

impl Roles {
    pub fn is_issuer(&self, caller: &Address) -> bool {
        !caller.is_zero() && *caller == self.issuer
    }

    pub fn is_executor(&self, caller: &Address) -> bool {
        !caller.is_zero() && *caller == self.executor
    }

    pub fn can_submit(&self, caller: &Address) -> bool {
        self.is_issuer(caller) || self.is_executor(caller)
    }
}

/// Period counter and submission timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionSchedule {
    /// Number of the most recently completed period; 0 before the first.
    pub period_number: u64,
    /// Seconds timestamp of the last accepted submission; 0 before the first.
    pub last_submission_time: u64,
    pub ranks_delay: u64,
}

impl SubmissionSchedule {
    pub fn new(ranks_delay: u64) -> Self {
        Self {
            period_number: 0,
            last_submission_time: 0,
            ranks_delay,
        }
    }

    /// Earliest time the next submission is accepted. Before the first
    /// accepted submission there is no lower bound.
    pub fn next_allowed(&self) -> u64 {
        if self.period_number == 0 {
            return 0;
        }
        self.last_submission_time.saturating_add(self.ranks_delay)
    }

    pub fn is_open(&self, now: u64) -> bool {
        now >= self.next_allowed()
    }
}

/// Role- and time-gated submission state.
///
/// Every mutating call takes the caller and, where timing matters, the
/// current time explicitly; the controller holds no clock of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionController {
    roles: Roles,
    schedule: SubmissionSchedule,
}

impl SubmissionController {
    pub fn new(config: &IssuanceConfig) -> Result<Self> {
        if config.issuer.is_zero() {
            return Err(IssuanceError::ZeroAddress { role: "issuer" });
        }
        Ok(Self {
            roles: Roles {
                issuer: config.issuer,
                executor: config.executor,
            },
            schedule: SubmissionSchedule::new(config.ranks_delay),
        })
    }

    pub fn roles(&self) -> &Roles {
        &self.roles
    }

    pub fn schedule(&self) -> &SubmissionSchedule {
        &self.schedule
    }

    pub fn issuer(&self) -> Address {
        self.roles.issuer
    }

    pub fn executor(&self) -> Address {
        self.roles.executor
    }

    pub fn period_number(&self) -> u64 {
        self.schedule.period_number
    }

    pub fn last_submission_time(&self) -> u64 {
        self.schedule.last_submission_time
    }

    pub fn ranks_delay(&self) -> u64 {
        self.schedule.ranks_delay
    }

    pub fn require_issuer(&self, caller: &Address, action: &'static str) -> Result<()> {
        if self.roles.is_issuer(caller) {
            Ok(())
        } else {
            warn!(target: "issuance", "Rejected {} by {}: not the issuer", action, caller);
            Err(IssuanceError::Unauthorized {
                caller: *caller,
                action,
            })
        }
    }

    fn require_submitter(&self, caller: &Address, action: &'static str) -> Result<()> {
        if self.roles.can_submit(caller) {
            Ok(())
        } else {
            warn!(
                target: "issuance",
                "Rejected {} by {}: neither issuer nor executor", action, caller
            );
            Err(IssuanceError::Unauthorized {
                caller: *caller,
                action,
            })
        }
    }

    /// Distribute respect for the next period.
    ///
    /// Checks authorization, then timing, then the rankings themselves. The
    /// period counter and submission time only move once every token of the
    /// batch has been minted.
    pub fn submit_ranks(
        &mut self,
        ledger: &mut dyn TokenMinter,
        caller: &Address,
        now: u64,
        groups: &[GroupRanking],
    ) -> Result<DistributionReport> {
        self.require_submitter(caller, "submit ranks")?;

        if !self.schedule.is_open(now) {
            let next_allowed = self.schedule.next_allowed();
            warn!(
                target: "issuance",
                "Rejected ranks from {}: now {} < next allowed {}", caller, now, next_allowed
            );
            return Err(IssuanceError::TooEarly { now, next_allowed });
        }

        let next_period = self
            .schedule
            .period_number
            .checked_add(1)
            .ok_or(IssuanceError::PeriodOverflow)?;

        debug!(
            target: "issuance",
            "Submitting {} groups for period {}", groups.len(), next_period
        );
        let report = distribute(ledger, next_period, RANKS_MINT_TYPE, groups)?;

        self.schedule.period_number = next_period;
        self.schedule.last_submission_time = now;

        info!(
            target: "issuance",
            "Period {} closed by {} at {}: {} tokens, {} respect",
            next_period, caller, now, report.tokens_minted, report.respect_minted
        );
        Ok(report)
    }

    /// Issuer only.
    pub fn set_ranks_delay(&mut self, caller: &Address, ranks_delay: u64) -> Result<()> {
        self.require_issuer(caller, "set ranks delay")?;
        info!(
            target: "issuance",
            "Ranks delay changed from {} to {}", self.schedule.ranks_delay, ranks_delay
        );
        self.schedule.ranks_delay = ranks_delay;
        Ok(())
    }

    /// Issuer or current executor. Passing the zero address clears the
    /// executor.
    pub fn set_executor(&mut self, caller: &Address, executor: Address) -> Result<()> {
        self.require_submitter(caller, "set executor")?;
        info!(
            target: "issuance",
            "Executor changed from {} to {} by {}", self.roles.executor, executor, caller
        );
        self.roles.executor = executor;
        Ok(())
    }
}
