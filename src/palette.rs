/// Block palette loading, filtering, and nearest-colour matching
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use log::warn;
use serde::Deserialize;
use thiserror::Error;

use crate::color::Rgba;

#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("no blocks survive the configured filters")]
    EmptyPalette,
}

/// A placeable block with its representative colour.
/// Colours are averaged texture colours, alpha included.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Block {
    #[serde(rename = "block")]
    pub id: String,
    pub color: Rgba,
}

/// The palette-facing slice of the run settings.
#[derive(Debug, Clone, Default)]
pub struct PaletteConfig {
    pub theme: Option<String>,
    pub allow_list: Option<Vec<String>>,
    pub categories_enabled: HashMap<String, bool>,
}

/// Full block catalogue: every known block, its category memberships,
/// and the predefined theme allow-lists.
#[derive(Debug, Clone)]
pub struct Palette {
    blocks: Vec<Block>,
    categories: HashMap<String, Vec<String>>,
    themes: HashMap<String, Vec<String>>,
}

impl Palette {
    pub fn new(
        blocks: Vec<Block>,
        categories: HashMap<String, Vec<String>>,
        themes: HashMap<String, Vec<String>>,
    ) -> Self {
        Self {
            blocks,
            categories,
            themes,
        }
    }

    /// Load the catalogue from its three data files.
    /// Block order in `blocks.json` is the canonical palette order.
    pub fn load(
        blocks_path: &Path,
        blocktypes_path: &Path,
        themes_path: &Path,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let blocks: Vec<Block> = serde_json::from_str(&fs::read_to_string(blocks_path)?)?;
        let categories: HashMap<String, Vec<String>> =
            serde_json::from_str(&fs::read_to_string(blocktypes_path)?)?;
        let themes: HashMap<String, Vec<String>> =
            serde_json::from_str(&fs::read_to_string(themes_path)?)?;

        Ok(Self::new(blocks, categories, themes))
    }

    /// Members of a category; unknown categories are simply empty.
    pub fn category_members(&self, name: &str) -> &[String] {
        self.categories.get(name).map_or(&[], Vec::as_slice)
    }

    /// Resolve the active palette for one configuration snapshot.
    ///
    /// Allow-list priority: custom list, then theme list, then the full
    /// catalogue. Disabled categories are subtracted afterward. An empty
    /// result is always an error, never widened back to the full set.
    pub fn resolve(&self, config: &PaletteConfig) -> Result<ActivePalette, PaletteError> {
        let allowed: Option<HashSet<&str>> = if let Some(list) = &config.allow_list {
            Some(self.known_ids("custom allow-list", list))
        } else if let Some(theme) = &config.theme {
            match self.themes.get(theme) {
                Some(list) => Some(self.known_ids(&format!("theme '{theme}'"), list)),
                None => {
                    warn!("unknown theme '{theme}', no blocks selected");
                    Some(HashSet::new())
                }
            }
        } else {
            None
        };

        let mut disabled: HashSet<&str> = HashSet::new();
        for (category, enabled) in &config.categories_enabled {
            if !enabled {
                disabled.extend(self.category_members(category).iter().map(String::as_str));
            }
        }

        let blocks: Vec<Block> = self
            .blocks
            .iter()
            .filter(|b| allowed.as_ref().is_none_or(|set| set.contains(b.id.as_str())))
            .filter(|b| !disabled.contains(b.id.as_str()))
            .cloned()
            .collect();

        if blocks.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }

        let active_ids: HashSet<&str> = blocks.iter().map(|b| b.id.as_str()).collect();
        let categories = self
            .categories
            .iter()
            .map(|(name, members)| {
                let members = members
                    .iter()
                    .filter(|id| active_ids.contains(id.as_str()))
                    .cloned()
                    .collect();
                (name.clone(), members)
            })
            .collect();

        Ok(ActivePalette { blocks, categories })
    }

    /// Intersect an allow-list with the catalogue, warning on unknown ids.
    fn known_ids<'a>(&self, origin: &str, list: &'a [String]) -> HashSet<&'a str> {
        let catalogue: HashSet<&str> = self.blocks.iter().map(|b| b.id.as_str()).collect();
        let mut known = HashSet::new();
        for id in list {
            if catalogue.contains(id.as_str()) {
                known.insert(id.as_str());
            } else {
                warn!("{origin} names unknown block '{id}', ignoring it");
            }
        }
        known
    }
}

/// The resolved subset of blocks eligible for matching.
/// Iteration order is the catalogue order, so matching is deterministic.
#[derive(Debug, Clone)]
pub struct ActivePalette {
    blocks: Vec<Block>,
    categories: HashMap<String, HashSet<String>>,
}

impl ActivePalette {
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn in_category(&self, id: &str, category: &str) -> bool {
        self.categories
            .get(category)
            .is_some_and(|members| members.contains(id))
    }

    /// The block whose colour has minimum Manhattan distance to `color`.
    /// Ties resolve to the block seen first in palette order.
    pub fn nearest_block(&self, color: Rgba) -> Option<&str> {
        self.nearest(color, None)
    }

    /// Like `nearest_block`, skipping every member of `category`.
    pub fn nearest_block_excluding(&self, color: Rgba, category: &str) -> Option<&str> {
        self.nearest(color, Some(category))
    }

    fn nearest(&self, color: Rgba, exclude: Option<&str>) -> Option<&str> {
        let excluded = exclude.and_then(|category| self.categories.get(category));

        let mut best: Option<&str> = None;
        let mut best_diff = u32::MAX;
        for block in &self.blocks {
            if excluded.is_some_and(|members| members.contains(&block.id)) {
                continue;
            }
            let diff = color.distance(block.color);
            if diff < best_diff {
                best = Some(&block.id);
                best_diff = diff;
            }
        }

        best
    }
}
