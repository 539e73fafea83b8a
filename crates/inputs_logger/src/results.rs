//! Group consensus results and their packed hash

use respect_types::{Address, ADDRESS_BYTES, RANKS_PER_GROUP};
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

/// Width of one padded array element in the packed encoding.
const WORD_BYTES: usize = 32;

/// Ranking a group reached in its meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupResults {
    pub group_num: u8,
    /// Lowest rank first, zero address for an empty slot.
    pub ranks: [Address; RANKS_PER_GROUP],
    /// Member chosen to represent the group, if the group picked one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegate: Option<Address>,
}

impl GroupResults {
    pub fn new(group_num: u8, ranks: [Address; RANKS_PER_GROUP]) -> Self {
        Self {
            group_num,
            ranks,
            delegate: None,
        }
    }

    pub fn with_delegate(mut self, delegate: Address) -> Self {
        self.delegate = Some(delegate);
        self
    }

    /// Tightly packed encoding: the group number as one byte, each rank
    /// left-padded to 32 bytes, then the delegate's 20 bytes when present.
    pub fn packed_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(1 + RANKS_PER_GROUP * WORD_BYTES + ADDRESS_BYTES);
        out.push(self.group_num);
        for rank in &self.ranks {
            out.extend_from_slice(&[0u8; WORD_BYTES - ADDRESS_BYTES]);
            out.extend_from_slice(rank.as_bytes());
        }
        if let Some(delegate) = &self.delegate {
            out.extend_from_slice(delegate.as_bytes());
        }
        out
    }

    /// Keccak-256 of [`packed_bytes`](Self::packed_bytes).
    pub fn hash(&self) -> [u8; 32] {
        let mut hasher = Keccak256::new();
        hasher.update(self.packed_bytes());
        let digest = hasher.finalize();
        let mut result = [0u8; 32];
        result.copy_from_slice(&digest);
        result
    }
}
