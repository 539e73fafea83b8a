//! Ranking to mint distribution logic

use crate::errors::*;
use respect_ledger::{MintInstruction, TokenMinter};
use respect_types::{GroupRanking, TokenIdData, RANKS_PER_GROUP};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Respect earned per rank slot, lowest (slot 0) to highest (slot 5).
pub const RESPECT_SCALE: [u64; RANKS_PER_GROUP] = [5, 8, 13, 21, 34, 55];

/// A group ranking with fewer participants than this is rejected.
pub const MIN_RANKED_PER_GROUP: usize = 3;

/// Mint type used for tokens issued from ranking submissions.
pub const RANKS_MINT_TYPE: u8 = 0;

/// Summary of a successful distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionReport {
    pub period_number: u64,
    pub groups: usize,
    pub tokens_minted: usize,
    pub respect_minted: u128,
}

/// Respect earned at `slot`, or `None` past the top slot.
pub fn respect_for_slot(slot: usize) -> Option<u64> {
    RESPECT_SCALE.get(slot).copied()
}

/// Reject any group that ranks fewer than [`MIN_RANKED_PER_GROUP`] people.
pub fn validate_groups(groups: &[GroupRanking]) -> Result<()> {
    for group in groups {
        let ranked = group.ranked_count();
        if ranked < MIN_RANKED_PER_GROUP {
            return Err(DistributionError::NotEnoughRanked {
                group_num: group.group_num,
                ranked,
                required: MIN_RANKED_PER_GROUP,
            });
        }
    }
    Ok(())
}

/// Compute the mints for a batch without touching any ledger.
///
/// Instructions come out in group order, then slot order (lowest first).
/// Empty slots produce nothing.
pub fn plan(
    period_number: u64,
    mint_type: u8,
    groups: &[GroupRanking],
) -> Result<Vec<MintInstruction>> {
    validate_groups(groups)?;

    let mut mints = Vec::with_capacity(groups.len() * RANKS_PER_GROUP);
    for group in groups {
        for (slot, owner) in group.ranked() {
            let Some(value) = respect_for_slot(slot) else {
                continue;
            };
            mints.push(MintInstruction::new(
                TokenIdData::new(owner, period_number, mint_type),
                value,
            ));
            debug!(
                target: "distribution",
                "Period {} group {}: slot {} -> {} ({} respect)",
                period_number, group.group_num, slot, owner, value
            );
        }
    }
    Ok(mints)
}

/// Validate, plan and apply a batch of rankings to `ledger`.
///
/// Uniqueness is enforced by the ledger: a participant ranked twice in the
/// batch, or already holding a token for this period and mint type, makes
/// the whole call fail with a duplicate-token error and nothing is minted.
pub fn distribute(
    ledger: &mut dyn TokenMinter,
    period_number: u64,
    mint_type: u8,
    groups: &[GroupRanking],
) -> Result<DistributionReport> {
    let mints = match plan(period_number, mint_type, groups) {
        Ok(mints) => mints,
        Err(err) => {
            warn!(target: "distribution", "Period {}: rejected rankings: {}", period_number, err);
            return Err(err);
        }
    };

    if let Err(err) = ledger.mint_batch(&mints) {
        warn!(target: "distribution", "Period {}: mint failed: {}", period_number, err);
        return Err(err.into());
    }

    let report = DistributionReport {
        period_number,
        groups: groups.len(),
        tokens_minted: mints.len(),
        respect_minted: mints.iter().map(|m| m.value as u128).sum(),
    };

    info!(
        target: "distribution",
        "Period {}: minted {} respect across {} tokens in {} groups",
        period_number, report.respect_minted, report.tokens_minted, report.groups
    );

    Ok(report)
}
