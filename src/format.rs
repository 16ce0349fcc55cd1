//! Rendering of finished allocations: template-driven text/HTML blocks plus
//! a serializable report for machine consumption. Named format profiles can
//! be loaded from a TOML file.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::allocator::state::AllocationState;
use crate::catalog::{TileId, TileKind, TILE_CATALOG};

/// Template strings for one output style. `name_format` wraps the bare tile
/// name at its `{}` placeholder; the other six bracket the title, each
/// system entry, and the summary line. Missing keys in a loaded profile
/// fall back to the HTML defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormatProfile {
    pub title_open: String,
    pub title_close: String,
    pub entry_open: String,
    pub entry_close: String,
    pub summary_open: String,
    pub summary_close: String,
    pub name_format: String,
}

impl Default for FormatProfile {
    /// Basic HTML.
    fn default() -> Self {
        Self {
            title_open: "<h2>".into(),
            title_close: "</h2>".into(),
            entry_open: "<p>".into(),
            entry_close: "</p>".into(),
            summary_open: "<p><i>".into(),
            summary_close: "</i></p>".into(),
            name_format: "{}".into(),
        }
    }
}

impl FormatProfile {
    /// Plain text, one line per entry.
    pub fn text() -> Self {
        Self {
            title_open: String::new(),
            title_close: "\n".into(),
            entry_open: String::new(),
            entry_close: "\n".into(),
            summary_open: String::new(),
            summary_close: "\n".into(),
            name_format: "{}".into(),
        }
    }

    /// Resolve a built-in profile by name.
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "html" => Some(Self::default()),
            "text" => Some(Self::text()),
            _ => None,
        }
    }
}

/// Render one labeled group of tiles: header, one entry per tile with
/// W/A/B markers, then the count/totals summary.
pub fn render_group(label: &str, tiles: &[TileId], profile: &FormatProfile) -> String {
    let mut output = format!("{}{}{}", profile.title_open, label, profile.title_close);
    let mut total_resource = 0u32;
    let mut total_influence = 0u32;
    for &id in tiles {
        let tile = &TILE_CATALOG[id];
        let worm = if tile.kind == TileKind::Wormhole { 'W' } else { ' ' };
        let anom = if tile.kind == TileKind::Anomaly { 'A' } else { ' ' };
        let blank = if tile.kind == TileKind::Blank { 'B' } else { ' ' };
        total_resource += tile.resource;
        total_influence += tile.influence;
        let name = profile.name_format.replace("{}", tile.name);
        output.push_str(&format!(
            "{}Name: {}; Resource: {}; Influence: {}; {}{}{}{}",
            profile.entry_open,
            name,
            tile.resource,
            tile.influence,
            worm,
            anom,
            blank,
            profile.entry_close,
        ));
    }
    output.push_str(&format!(
        "{}Number of systems {}, total resource: {}, total influence {}{}",
        profile.summary_open,
        tiles.len(),
        total_resource,
        total_influence,
        profile.summary_close,
    ));
    output
}

/// Render a full allocation: the shared pool first, then one section per
/// player, concatenated.
pub fn render_allocation(state: &AllocationState, profile: &FormatProfile) -> String {
    let mut output = render_group("Shared planets:", state.shared_tiles(), profile);
    for player in 0..state.num_players() {
        output.push_str(&render_group(
            &format!("Player {}", player + 1),
            state.player_tiles(player),
            profile,
        ));
    }
    output
}

// ---------------------------------------------------------------------------
// Named profile files
// ---------------------------------------------------------------------------

/// Top-level TOML file structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormatProfilesFile {
    #[serde(default)]
    pub profiles: HashMap<String, FormatProfile>,
}

impl FormatProfilesFile {
    /// Named profile from the file, falling back to the built-ins.
    pub fn resolve(&self, name: &str) -> Option<FormatProfile> {
        self.profiles
            .get(name)
            .cloned()
            .or_else(|| FormatProfile::builtin(name))
    }
}

/// Load named profiles from a TOML file at the given path.
pub fn load_profiles(path: &Path) -> Result<FormatProfilesFile, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    toml::from_str(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

/// Try well-known paths, falling back to the built-ins only.
pub fn load_default_profiles() -> FormatProfilesFile {
    let candidates = ["format_profiles.toml", "../format_profiles.toml"];
    for path in &candidates {
        let p = Path::new(path);
        if p.exists() {
            match load_profiles(p) {
                Ok(profiles) => {
                    tracing::info!(
                        path = %p.display(),
                        count = profiles.profiles.len(),
                        "loaded format profiles"
                    );
                    return profiles;
                }
                Err(e) => {
                    tracing::warn!(path = %p.display(), error = %e, "failed to load format profiles");
                }
            }
        }
    }
    FormatProfilesFile::default()
}

// ---------------------------------------------------------------------------
// Machine-readable report
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct TileEntry {
    pub id: TileId,
    pub name: &'static str,
    pub resource: u32,
    pub influence: u32,
    pub kind: TileKind,
}

#[derive(Debug, Serialize)]
pub struct GroupReport {
    pub label: String,
    pub tiles: Vec<TileEntry>,
    pub total_resource: u32,
    pub total_influence: u32,
}

impl GroupReport {
    fn new(label: String, tiles: &[TileId]) -> Self {
        let tiles: Vec<TileEntry> = tiles
            .iter()
            .map(|&id| {
                let tile = &TILE_CATALOG[id];
                TileEntry {
                    id,
                    name: tile.name,
                    resource: tile.resource,
                    influence: tile.influence,
                    kind: tile.kind,
                }
            })
            .collect();
        let total_resource = tiles.iter().map(|t| t.resource).sum();
        let total_influence = tiles.iter().map(|t| t.influence).sum();
        Self {
            label,
            tiles,
            total_resource,
            total_influence,
        }
    }
}

/// Serializable view of a finished allocation, shared pool first.
#[derive(Debug, Serialize)]
pub struct AllocationReport {
    pub groups: Vec<GroupReport>,
}

impl AllocationReport {
    pub fn from_state(state: &AllocationState) -> Self {
        let mut groups = vec![GroupReport::new(
            "Shared planets:".to_string(),
            state.shared_tiles(),
        )];
        for player in 0..state.num_players() {
            groups.push(GroupReport::new(
                format!("Player {}", player + 1),
                state.player_tiles(player),
            ));
        }
        Self { groups }
    }
}
