//! Allocation failure taxonomy. Every variant is terminal at the point it
//! occurs; the convergence driver only retries infeasible fills, which are
//! an attempt outcome rather than an error value.

use thiserror::Error;

use crate::catalog::TileId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    /// Requested player count has no allocation table.
    #[error("unsupported player count {requested}, valid choices are {supported:?}")]
    UnsupportedPlayerCount { requested: u32, supported: Vec<u32> },

    /// Algorithm defect: a tile was handed out twice.
    #[error("attempt to allocate already used tile: {tile}")]
    TileAlreadyUsed { tile: TileId },

    /// Algorithm defect: a player was dealt past its tile quota.
    #[error("too many tiles allocated to player: {player} (quota {quota})")]
    PlayerQuotaExceeded { player: usize, quota: usize },

    /// The randomized search found no feasible assignment within the cap.
    #[error("unable to converge in {attempts} iterations")]
    Convergence { attempts: usize },
}
