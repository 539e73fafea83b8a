//! Group rankings submitted once per period

use crate::address::Address;
use serde::{Deserialize, Serialize};

/// Number of rank slots in one group ranking.
pub const RANKS_PER_GROUP: usize = 6;

/// Ordered ranking of one peer group.
///
/// `ranks[0]` is the lowest rank and `ranks[5]` the highest. A zero address
/// means nobody was placed at that position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRanking {
    /// Label used to tell groups apart; carries no weight in distribution.
    pub group_num: u8,
    pub ranks: [Address; RANKS_PER_GROUP],
}

impl GroupRanking {
    pub fn new(group_num: u8, ranks: [Address; RANKS_PER_GROUP]) -> Self {
        Self { group_num, ranks }
    }

    /// Build a ranking from the highest-ranked participant downwards.
    ///
    /// `ranked_top_down[0]` lands in slot 5, `ranked_top_down[1]` in slot 4
    /// and so on; unfilled low slots stay empty. Extra entries are ignored.
    pub fn from_top_down(group_num: u8, ranked_top_down: &[Address]) -> Self {
        let mut ranks = [Address::ZERO; RANKS_PER_GROUP];
        for (i, addr) in ranked_top_down.iter().take(RANKS_PER_GROUP).enumerate() {
            ranks[RANKS_PER_GROUP - 1 - i] = *addr;
        }
        Self { group_num, ranks }
    }

    /// Occupied slots as `(slot, address)`, lowest slot first.
    pub fn ranked(&self) -> impl Iterator<Item = (usize, Address)> + '_ {
        self.ranks
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, addr)| !addr.is_zero())
    }

    /// Number of non-zero slots.
    pub fn ranked_count(&self) -> usize {
        self.ranks.iter().filter(|addr| !addr.is_zero()).count()
    }
}
