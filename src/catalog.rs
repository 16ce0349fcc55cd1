//! Tile catalog for the TI4 base game: 33 system tiles with fixed
//! resource/influence yields. A tile's identity everywhere else is its
//! index into [`TILE_CATALOG`].

use once_cell::sync::Lazy;
use serde::Serialize;

/// Index into [`TILE_CATALOG`].
pub type TileId = usize;

/// Mecatol Rex sits at the galactic center and is always shared.
pub const MECATOL_REX: TileId = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    /// Ordinary planet system, allocated by the exact-match search.
    Planet,
    Wormhole,
    Anomaly,
    Blank,
}

/// One system tile. Yields are fixed per tile; `kind` decides which
/// distribution rule applies during allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub name: &'static str,
    pub resource: u32,
    pub influence: u32,
    pub kind: TileKind,
}

impl Tile {
    pub fn is_special(&self) -> bool {
        matches!(self.kind, TileKind::Anomaly | TileKind::Blank)
    }
}

fn planet(name: &'static str, resource: u32, influence: u32) -> Tile {
    Tile {
        name,
        resource,
        influence,
        kind: TileKind::Planet,
    }
}

fn wormhole(name: &'static str, resource: u32, influence: u32) -> Tile {
    Tile {
        name,
        resource,
        influence,
        kind: TileKind::Wormhole,
    }
}

fn anomaly(name: &'static str) -> Tile {
    Tile {
        name,
        resource: 0,
        influence: 0,
        kind: TileKind::Anomaly,
    }
}

fn blank() -> Tile {
    Tile {
        name: "Blank",
        resource: 0,
        influence: 0,
        kind: TileKind::Blank,
    }
}

pub static TILE_CATALOG: Lazy<Vec<Tile>> = Lazy::new(|| {
    vec![
        planet("Mecatol Rex", 1, 6),
        planet("Bereg, Lirta IV", 5, 4),
        planet("Abyz, Fria", 5, 0),
        planet("New Albion, Starpoint", 4, 2),
        planet("Arnor, Lor", 3, 3),
        planet("Mellon, Zohbat", 3, 3),
        planet("Corneeq, Resculon", 3, 2),
        wormhole("Lodor", 3, 1),
        planet("Lazar, Sakulag", 3, 1),
        planet("Centauri, Gral", 2, 4),
        planet("Tequ'ran, Torkan", 2, 3),
        planet("Vefut II", 2, 2),
        planet("Saudor", 2, 2),
        wormhole("Quann", 2, 1),
        planet("Arinam, Meer", 1, 6),
        planet("Qucen'n, Rarron", 1, 5),
        planet("Mehar Xull", 1, 3),
        planet("Dal Bootha, Xxehan", 1, 3),
        planet("Wellon", 1, 2),
        planet("Tar'mann", 1, 1),
        planet("Thibah", 1, 1),
        wormhole("A Wormhole", 0, 0),
        wormhole("B Wormhole", 0, 0),
        anomaly("Asteroid Field"),
        anomaly("Asteroid Field"),
        anomaly("Supernova"),
        anomaly("Nebula"),
        anomaly("Gravity Rift"),
        blank(),
        blank(),
        blank(),
        blank(),
        blank(),
    ]
});

fn ids_of(kind: TileKind) -> Vec<TileId> {
    TILE_CATALOG
        .iter()
        .enumerate()
        .filter(|(_, tile)| tile.kind == kind)
        .map(|(id, _)| id)
        .collect()
}

/// Wormhole tile ids in catalog order.
pub static WORMHOLE_IDS: Lazy<Vec<TileId>> = Lazy::new(|| ids_of(TileKind::Wormhole));

/// Anomaly tile ids in catalog order.
pub static ANOMALY_IDS: Lazy<Vec<TileId>> = Lazy::new(|| ids_of(TileKind::Anomaly));

/// Blank tile ids in catalog order.
pub static BLANK_IDS: Lazy<Vec<TileId>> = Lazy::new(|| ids_of(TileKind::Blank));

/// Total resource yield across the whole catalog.
pub fn total_resource() -> u32 {
    TILE_CATALOG.iter().map(|t| t.resource).sum()
}

/// Total influence yield across the whole catalog.
pub fn total_influence() -> u32 {
    TILE_CATALOG.iter().map(|t| t.influence).sum()
}
