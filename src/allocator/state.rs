//! Working allocation state: which tile belongs to which owner and how much
//! of each player's budget remains. One state is owned by exactly one
//! allocation attempt and discarded if that attempt fails.

use crate::allocator::config::Budget;
use crate::allocator::error::AllocationError;
use crate::catalog::{TileId, MECATOL_REX, TILE_CATALOG};

/// Owner of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    Player(usize),
    Shared,
}

#[derive(Debug, Clone)]
pub struct AllocationState {
    used: Vec<bool>,
    player_resource: Vec<i64>,
    player_influence: Vec<i64>,
    player_tiles: Vec<Vec<TileId>>,
    shared_tiles: Vec<TileId>,
    tiles_per_player: usize,
}

impl AllocationState {
    /// Fresh state with budgets already shuffled into slot order. Mecatol
    /// Rex starts in the shared pool; it is never part of the search.
    pub fn new(budgets: &[Budget], tiles_per_player: usize) -> Result<Self, AllocationError> {
        let mut state = Self {
            used: vec![false; TILE_CATALOG.len()],
            player_resource: budgets.iter().map(|b| b.resource as i64).collect(),
            player_influence: budgets.iter().map(|b| b.influence as i64).collect(),
            player_tiles: vec![Vec::new(); budgets.len()],
            shared_tiles: Vec::new(),
            tiles_per_player,
        };
        state.assign(MECATOL_REX, Owner::Shared)?;
        Ok(state)
    }

    /// Hand a tile to an owner. A player assignment decrements that player's
    /// remaining budgets by the tile's yields.
    pub fn assign(&mut self, tile: TileId, owner: Owner) -> Result<(), AllocationError> {
        if self.used[tile] {
            return Err(AllocationError::TileAlreadyUsed { tile });
        }
        self.used[tile] = true;
        match owner {
            Owner::Player(player) => {
                if self.player_tiles[player].len() >= self.tiles_per_player {
                    return Err(AllocationError::PlayerQuotaExceeded {
                        player,
                        quota: self.tiles_per_player,
                    });
                }
                self.player_tiles[player].push(tile);
                let yields = &TILE_CATALOG[tile];
                self.player_resource[player] -= yields.resource as i64;
                self.player_influence[player] -= yields.influence as i64;
            }
            Owner::Shared => self.shared_tiles.push(tile),
        }
        Ok(())
    }

    /// Every tile never assigned during the attempt goes to the shared pool.
    /// Runs once, after all players have been filled.
    pub fn sweep_leftovers(&mut self) -> Result<(), AllocationError> {
        for tile in 0..self.used.len() {
            if !self.used[tile] {
                self.assign(tile, Owner::Shared)?;
            }
        }
        Ok(())
    }

    /// Unused tile ids in catalog order.
    pub fn unused_tiles(&self) -> Vec<TileId> {
        self.used
            .iter()
            .enumerate()
            .filter(|&(_, used)| !used)
            .map(|(id, _)| id)
            .collect()
    }

    pub fn num_players(&self) -> usize {
        self.player_tiles.len()
    }

    pub fn tiles_per_player(&self) -> usize {
        self.tiles_per_player
    }

    pub fn player_tiles(&self, player: usize) -> &[TileId] {
        &self.player_tiles[player]
    }

    pub fn shared_tiles(&self) -> &[TileId] {
        &self.shared_tiles
    }

    /// Budget still unmet for a player; zero once the fill succeeds.
    pub fn remaining_resource(&self, player: usize) -> i64 {
        self.player_resource[player]
    }

    pub fn remaining_influence(&self, player: usize) -> i64 {
        self.player_influence[player]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn budgets(n: usize) -> Vec<Budget> {
        vec![
            Budget {
                resource: 10,
                influence: 10,
            };
            n
        ]
    }

    #[test]
    fn test_mecatol_rex_starts_shared() {
        let state = AllocationState::new(&budgets(4), 8).unwrap();
        assert_eq!(state.shared_tiles(), &[MECATOL_REX]);
        assert!(!state.unused_tiles().contains(&MECATOL_REX));
    }

    #[test]
    fn test_assign_decrements_budgets() {
        let mut state = AllocationState::new(&budgets(4), 8).unwrap();
        // Tile 1 is Bereg, Lirta IV (5/4).
        state.assign(1, Owner::Player(0)).unwrap();
        assert_eq!(state.player_tiles(0), &[1]);
        assert_eq!(state.remaining_resource(0), 5);
        assert_eq!(state.remaining_influence(0), 6);
    }

    #[test]
    fn test_double_assignment_is_fatal() {
        let mut state = AllocationState::new(&budgets(4), 8).unwrap();
        state.assign(3, Owner::Player(1)).unwrap();
        let err = state.assign(3, Owner::Shared).unwrap_err();
        assert_eq!(err, AllocationError::TileAlreadyUsed { tile: 3 });
    }

    #[test]
    fn test_quota_overflow_is_fatal() {
        let mut state = AllocationState::new(&budgets(4), 2).unwrap();
        state.assign(1, Owner::Player(0)).unwrap();
        state.assign(2, Owner::Player(0)).unwrap();
        let err = state.assign(3, Owner::Player(0)).unwrap_err();
        assert_eq!(
            err,
            AllocationError::PlayerQuotaExceeded {
                player: 0,
                quota: 2,
            }
        );
    }

    #[test]
    fn test_sweep_moves_everything_unused_to_shared() {
        let mut state = AllocationState::new(&budgets(4), 8).unwrap();
        state.assign(1, Owner::Player(0)).unwrap();
        state.sweep_leftovers().unwrap();
        assert!(state.unused_tiles().is_empty());
        // Everything except the one player tile ended up shared.
        assert_eq!(state.shared_tiles().len(), TILE_CATALOG.len() - 1);
    }
}
