//! Append-only submission log

use crate::results::GroupResults;
use parking_lot::RwLock;
use respect_types::Address;
use serde::{Deserialize, Serialize};
use tracing::info;

/// One logged submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConsensusSubmission {
    Raw {
        submitter: Address,
        results: GroupResults,
    },
    Hashed {
        submitter: Address,
        #[serde(with = "hex::serde")]
        hash: [u8; 32],
    },
}

impl ConsensusSubmission {
    pub fn submitter(&self) -> Address {
        match self {
            ConsensusSubmission::Raw { submitter, .. } => *submitter,
            ConsensusSubmission::Hashed { submitter, .. } => *submitter,
        }
    }
}

/// Records consensus inputs in submission order. Anyone may submit.
#[derive(Debug, Default)]
pub struct InputsLogger {
    entries: RwLock<Vec<ConsensusSubmission>>,
}

impl InputsLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the full results.
    pub fn submit_cons(&self, submitter: Address, results: GroupResults) -> ConsensusSubmission {
        info!(
            target: "inputs_logger",
            "Consensus submission from {} for group {}", submitter, results.group_num
        );
        self.append(ConsensusSubmission::Raw { submitter, results })
    }

    /// Record only the Keccak-256 commitment of the results.
    pub fn submit_cons_hashed(
        &self,
        submitter: Address,
        results: &GroupResults,
    ) -> ConsensusSubmission {
        let hash = results.hash();
        info!(
            target: "inputs_logger",
            "Hashed consensus submission from {} for group {}: 0x{}",
            submitter,
            results.group_num,
            hex::encode(hash)
        );
        self.append(ConsensusSubmission::Hashed { submitter, hash })
    }

    fn append(&self, entry: ConsensusSubmission) -> ConsensusSubmission {
        self.entries.write().push(entry.clone());
        entry
    }

    pub fn entries(&self) -> Vec<ConsensusSubmission> {
        self.entries.read().clone()
    }

    pub fn entries_by(&self, submitter: &Address) -> Vec<ConsensusSubmission> {
        self.entries
            .read()
            .iter()
            .filter(|entry| entry.submitter() == *submitter)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
