//! Randomized galaxy tile allocation for Twilight Imperium 4.
//!
//! The allocator partitions the fixed 33-tile catalog among N players and a
//! shared pool so that every player's owned yields hit an exact
//! resource/influence budget, with wormholes, anomalies, and blank tiles
//! distributed by rule rather than by search.

pub mod allocator;
pub mod catalog;
pub mod format;
