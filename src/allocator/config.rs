//! Per-player-count allocation tables: tiles owed to each player, the
//! resource/influence budget pairs, and the special-tile quotas. The values
//! mirror the balanced-start tables the tool encodes for 4-6 players.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::allocator::error::AllocationError;

/// Exact resource/influence targets one player's tiles must sum to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Budget {
    pub resource: u32,
    pub influence: u32,
}

/// Special-tile quota for one player slot. `total` is the overall number of
/// special tiles the slot is owed; `anomalies` and `blanks` are exact
/// per-kind counts. The difference `total - anomalies - blanks` may be
/// covered by either kind drawn from the leftover pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialQuota {
    pub total: u32,
    pub anomalies: u32,
    pub blanks: u32,
}

impl SpecialQuota {
    /// Elementwise sum with a fixed quota, applied after the shuffle.
    pub fn combined(self, fixed: SpecialQuota) -> SpecialQuota {
        SpecialQuota {
            total: self.total + fixed.total,
            anomalies: self.anomalies + fixed.anomalies,
            blanks: self.blanks + fixed.blanks,
        }
    }
}

/// Full allocation table for one supported player count.
#[derive(Debug, Clone)]
pub struct PlayerCountConfig {
    pub tiles_per_player: usize,
    /// One budget pair per player slot, shuffled before assignment.
    pub budgets: Vec<Budget>,
    /// One quota per player slot, shuffled before assignment.
    pub specials_shuffled: Vec<SpecialQuota>,
    /// Slot-pinned quotas added elementwise to the shuffled copy.
    pub specials_fixed: Option<Vec<SpecialQuota>>,
}

fn budget(resource: u32, influence: u32) -> Budget {
    Budget {
        resource,
        influence,
    }
}

fn quota(total: u32, anomalies: u32, blanks: u32) -> SpecialQuota {
    SpecialQuota {
        total,
        anomalies,
        blanks,
    }
}

pub static ALLOCATIONS: Lazy<HashMap<u32, PlayerCountConfig>> = Lazy::new(|| {
    let mut table = HashMap::new();
    table.insert(
        4,
        PlayerCountConfig {
            tiles_per_player: 8,
            budgets: vec![
                budget(11, 13),
                budget(11, 12),
                budget(12, 12),
                budget(12, 12),
            ],
            specials_shuffled: vec![
                quota(3, 1, 1),
                quota(3, 1, 1),
                quota(2, 1, 1),
                quota(2, 1, 1),
            ],
            specials_fixed: None,
        },
    );
    table.insert(
        5,
        PlayerCountConfig {
            tiles_per_player: 6,
            budgets: vec![
                budget(9, 10),
                budget(9, 10),
                budget(9, 10),
                budget(9, 9),
                budget(9, 9),
            ],
            specials_shuffled: vec![
                quota(2, 1, 1),
                quota(2, 1, 1),
                quota(2, 1, 1),
                quota(1, 1, 0),
                quota(1, 1, 0),
            ],
            specials_fixed: Some(vec![
                quota(0, 0, 0),
                quota(0, 0, 0),
                quota(0, 0, 0),
                quota(0, 0, 0),
                quota(1, 0, 1),
            ]),
        },
    );
    table.insert(
        6,
        PlayerCountConfig {
            tiles_per_player: 5,
            budgets: vec![
                budget(8, 8),
                budget(8, 8),
                budget(8, 8),
                budget(8, 8),
                budget(7, 8),
                budget(7, 9),
            ],
            specials_shuffled: vec![
                quota(1, 1, 0),
                quota(1, 1, 0),
                quota(1, 1, 0),
                quota(1, 0, 1),
                quota(1, 0, 1),
                quota(1, 0, 1),
            ],
            specials_fixed: Some(vec![
                quota(0, 0, 0),
                quota(0, 0, 0),
                quota(0, 0, 0),
                quota(0, 0, 0),
                quota(1, 1, 0),
                quota(1, 1, 0),
            ]),
        },
    );
    table
});

/// Sorted list of supported player counts.
pub fn player_numbers() -> Vec<u32> {
    let mut counts: Vec<u32> = ALLOCATIONS.keys().copied().collect();
    counts.sort_unstable();
    counts
}

/// Look up the allocation table for a player count.
pub fn config_for(num_players: u32) -> Result<&'static PlayerCountConfig, AllocationError> {
    ALLOCATIONS
        .get(&num_players)
        .ok_or_else(|| AllocationError::UnsupportedPlayerCount {
            requested: num_players,
            supported: player_numbers(),
        })
}
