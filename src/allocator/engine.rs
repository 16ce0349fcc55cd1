//! The allocation engine. One randomized attempt shuffles the budget table,
//! deals wormholes round-robin, deals special tiles by quota, then fills
//! each player's remaining slots with an exact-match search over the
//! ordinary tiles. The convergence driver retries attempts up to a fixed
//! cap because the search can come up empty.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::allocator::config::{config_for, PlayerCountConfig};
use crate::allocator::error::AllocationError;
use crate::allocator::state::{AllocationState, Owner};
use crate::catalog::{TileId, ANOMALY_IDS, BLANK_IDS, TILE_CATALOG, WORMHOLE_IDS};

/// Attempt cap for the convergence driver.
pub const MAX_ATTEMPTS: usize = 100;

/// Allocate a full galaxy for `num_players`, retrying the randomized
/// attempt up to [`MAX_ATTEMPTS`] times and returning the first success.
pub fn allocate<R: Rng>(
    num_players: u32,
    rng: &mut R,
) -> Result<AllocationState, AllocationError> {
    let cfg = config_for(num_players)?;
    allocate_with(cfg, rng)
}

/// Same driver against an explicit allocation table. The table must be
/// well-shaped: quota columns within the special tile supply, one budget
/// per player slot. Invariant violations propagate immediately; only
/// infeasible fills are retried.
pub fn allocate_with<R: Rng>(
    cfg: &PlayerCountConfig,
    rng: &mut R,
) -> Result<AllocationState, AllocationError> {
    for attempt in 1..=MAX_ATTEMPTS {
        if let Some(mut state) = attempt_allocation(cfg, rng)? {
            state.sweep_leftovers()?;
            tracing::debug!(attempt, "allocation converged");
            return Ok(state);
        }
    }
    Err(AllocationError::Convergence {
        attempts: MAX_ATTEMPTS,
    })
}

/// One full attempt. `Ok(None)` means the exact-match fill found no
/// solution for some player and the whole attempt must be discarded.
pub fn attempt_allocation<R: Rng>(
    cfg: &PlayerCountConfig,
    rng: &mut R,
) -> Result<Option<AllocationState>, AllocationError> {
    let num_players = cfg.budgets.len();

    let mut budgets = cfg.budgets.clone();
    budgets.shuffle(rng);
    let mut state = AllocationState::new(&budgets, cfg.tiles_per_player)?;

    distribute_wormholes(&mut state, num_players)?;
    distribute_specials(&mut state, cfg, rng)?;

    for player in 0..num_players {
        if !fill_player(&mut state, player, rng)? {
            tracing::trace!(player, "exact fill came up empty, discarding attempt");
            return Ok(None);
        }
    }
    Ok(Some(state))
}

/// Wormholes go to players in strict round-robin from player 0, in catalog
/// order. The shared pool never holds a wormhole.
fn distribute_wormholes(
    state: &mut AllocationState,
    num_players: usize,
) -> Result<(), AllocationError> {
    for (ii, &tile) in WORMHOLE_IDS.iter().enumerate() {
        state.assign(tile, Owner::Player(ii % num_players))?;
    }
    Ok(())
}

/// Deal special tiles: exact anomaly counts from a shuffled pool, exact
/// blank counts in catalog order, then the shuffled leftovers of both kinds
/// up to each player's remaining total. Whatever survives goes shared.
fn distribute_specials<R: Rng>(
    state: &mut AllocationState,
    cfg: &PlayerCountConfig,
    rng: &mut R,
) -> Result<(), AllocationError> {
    let mut quotas = cfg.specials_shuffled.clone();
    quotas.shuffle(rng);
    if let Some(fixed) = &cfg.specials_fixed {
        for (q, f) in quotas.iter_mut().zip(fixed) {
            *q = q.combined(*f);
        }
    }
    let mut remaining_total: Vec<i64> = quotas.iter().map(|q| q.total as i64).collect();

    let mut anomaly_pool: Vec<TileId> = ANOMALY_IDS.clone();
    anomaly_pool.shuffle(rng);
    let mut next_anomaly = 0;
    for (player, q) in quotas.iter().enumerate() {
        for _ in 0..q.anomalies {
            state.assign(anomaly_pool[next_anomaly], Owner::Player(player))?;
            next_anomaly += 1;
            remaining_total[player] -= 1;
        }
    }

    let mut next_blank = 0;
    for (player, q) in quotas.iter().enumerate() {
        for _ in 0..q.blanks {
            state.assign(BLANK_IDS[next_blank], Owner::Player(player))?;
            next_blank += 1;
            remaining_total[player] -= 1;
        }
    }

    let mut overflow: Vec<TileId> = anomaly_pool[next_anomaly..].to_vec();
    overflow.extend_from_slice(&BLANK_IDS[next_blank..]);
    overflow.shuffle(rng);
    let mut next_overflow = 0;
    for (player, &total) in remaining_total.iter().enumerate() {
        for _ in 0..total.max(0) {
            state.assign(overflow[next_overflow], Owner::Player(player))?;
            next_overflow += 1;
        }
    }
    for &tile in &overflow[next_overflow..] {
        state.assign(tile, Owner::Shared)?;
    }
    Ok(())
}

/// One node of the fill search. Owns the candidate list it may still try,
/// pre-filtered against the needs that remain at this depth.
struct SearchFrame {
    candidates: Vec<TileId>,
    cursor: usize,
    resource: i64,
    influence: i64,
    slots: usize,
}

impl SearchFrame {
    /// Filters the inherited candidates against the remaining needs. The
    /// filter is a bound, not a feasibility guarantee. A node with no slots
    /// left gets no children.
    fn new(candidates: Vec<TileId>, resource: i64, influence: i64, slots: usize) -> Self {
        let candidates = if slots == 0 {
            Vec::new()
        } else {
            candidates
                .into_iter()
                .filter(|&id| {
                    let tile = &TILE_CATALOG[id];
                    (tile.resource as i64) <= resource && (tile.influence as i64) <= influence
                })
                .collect()
        };
        Self {
            candidates,
            cursor: 0,
            resource,
            influence,
            slots,
        }
    }

    fn solved(&self) -> bool {
        self.slots == 0 && self.resource == 0 && self.influence == 0
    }

    fn next_candidate(&mut self) -> Option<TileId> {
        let tile = self.candidates.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(tile)
    }

    /// Candidates not yet tried at this node; the child searches these.
    fn tail(&self) -> Vec<TileId> {
        self.candidates[self.cursor..].to_vec()
    }
}

/// Fill one player's remaining slots with unused ordinary tiles whose
/// yields sum exactly to the remaining budgets.
///
/// Linear-scan backtracking over a once-shuffled candidate list: each node
/// tries every remaining candidate, in order, as the next inclusion, and
/// the child node searches the tail after the tried candidate. Expressed
/// as an explicit stack; ordering matches the recursive formulation.
fn fill_player<R: Rng>(
    state: &mut AllocationState,
    player: usize,
    rng: &mut R,
) -> Result<bool, AllocationError> {
    let mut candidates = state.unused_tiles();
    candidates.retain(|&id| !TILE_CATALOG[id].is_special());
    candidates.shuffle(rng);

    let slots = state.tiles_per_player() - state.player_tiles(player).len();
    let mut chosen: Vec<TileId> = Vec::with_capacity(slots);
    let mut stack = vec![SearchFrame::new(
        candidates,
        state.remaining_resource(player),
        state.remaining_influence(player),
        slots,
    )];

    loop {
        let Some(frame) = stack.last_mut() else {
            return Ok(false);
        };
        if frame.solved() {
            for &tile in &chosen {
                state.assign(tile, Owner::Player(player))?;
            }
            return Ok(true);
        }
        match frame.next_candidate() {
            Some(tile) => {
                let yields = &TILE_CATALOG[tile];
                let child = SearchFrame::new(
                    frame.tail(),
                    frame.resource - yields.resource as i64,
                    frame.influence - yields.influence as i64,
                    frame.slots - 1,
                );
                chosen.push(tile);
                stack.push(child);
            }
            None => {
                stack.pop();
                chosen.pop();
            }
        }
    }
}
