/// Skin-to-structure assembly engine
use std::collections::HashMap;

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use serde::Serialize;
use thiserror::Error;

use crate::color::Rgba;
use crate::constants::FALLING_CATEGORY;
use crate::palette::ActivePalette;
use crate::schematic::{Occupancy, Position, Schematic};
use crate::skin::Skin;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("no blocks available in palette for colour {color:?}")]
    NoMatch { color: Rgba },
    #[error("no non-falling block available for colour {color:?} at {position:?}")]
    NoSupportedMatch { color: Rgba, position: Position },
}

/// Tallies for the non-fatal per-entry outcomes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConversionStats {
    pub placed: usize,
    pub skipped_transparent: usize,
    pub skipped_out_of_bounds: usize,
}

/// One finished conversion: the populated structure, net per-block
/// usage counts, and the skip statistics.
#[derive(Debug)]
pub struct Conversion {
    pub schematic: Schematic,
    pub usage: HashMap<String, u64>,
    pub stats: ConversionStats,
}

/// Assemble the voxel structure for one skin.
///
/// Entries are processed strictly in mapping order: blocks placed at lower
/// coordinates by earlier entries count as support for later entries.
pub fn convert_skin(
    skin: &Skin,
    mapping: &[(usize, Position)],
    palette: &ActivePalette,
) -> Result<Conversion, ConvertError> {
    info!(
        "converting skin: {} mapped positions, {} palette blocks, {} skin pixels",
        mapping.len(),
        palette.len(),
        skin.pixel_count()
    );

    let mut schematic = Schematic::new();
    let mut usage: HashMap<String, u64> = HashMap::new();
    let mut stats = ConversionStats::default();

    let pb = ProgressBar::new(mapping.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{bar:40.green/blue}] {pos}/{len} positions ({percent}%) {msg}")
            .unwrap()
            .progress_chars("▉▊▋▌▍▎▏ "),
    );
    pb.set_message("Placing blocks");

    for &(index, position) in mapping {
        pb.inc(1);

        let Some(color) = skin.pixel(index) else {
            warn!(
                "mapping index {index} out of bounds (skin has {} pixels), position {position:?} skipped",
                skin.pixel_count()
            );
            stats.skipped_out_of_bounds += 1;
            continue;
        };

        if color.is_transparent() {
            stats.skipped_transparent += 1;
            continue;
        }

        let mut block = palette
            .nearest_block(color)
            .ok_or(ConvertError::NoMatch { color })?;

        if palette.in_category(block, FALLING_CATEGORY) {
            // An unanswerable support query counts as no support.
            let supported = match schematic.occupant_below(position) {
                Ok(Occupancy::Filled(_)) => true,
                Ok(Occupancy::Void) => false,
                Err(err) => {
                    debug!("cannot check support at {position:?}: {err}");
                    false
                }
            };

            if !supported {
                block = palette
                    .nearest_block_excluding(color, FALLING_CATEGORY)
                    .ok_or(ConvertError::NoSupportedMatch { color, position })?;
            }
        }

        if let Some(displaced) = schematic.set_block(position, block) {
            decrement(&mut usage, &displaced);
        }
        *usage.entry(block.to_string()).or_insert(0) += 1;
        stats.placed += 1;
    }

    pb.finish_with_message("Blocks placed");
    info!(
        "conversion complete: {} blocks placed, {} transparent pixels skipped, {} out-of-bounds positions skipped",
        stats.placed, stats.skipped_transparent, stats.skipped_out_of_bounds
    );

    Ok(Conversion {
        schematic,
        usage,
        stats,
    })
}

/// Net counting: overwrites must not leave stale counts behind.
fn decrement(usage: &mut HashMap<String, u64>, id: &str) {
    if let Some(count) = usage.get_mut(id) {
        *count -= 1;
        if *count == 0 {
            usage.remove(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{Block, Palette, PaletteConfig};
    use std::collections::HashMap;

    fn block(id: &str, color: [u8; 4]) -> Block {
        Block {
            id: id.to_string(),
            color: Rgba::from(color),
        }
    }

    fn palette_of(blocks: Vec<Block>, falling: &[&str]) -> ActivePalette {
        let categories = HashMap::from([(
            FALLING_CATEGORY.to_string(),
            falling.iter().map(|id| id.to_string()).collect(),
        )]);
        Palette::new(blocks, categories, HashMap::new())
            .resolve(&PaletteConfig::default())
            .unwrap()
    }

    fn opaque(r: u8, g: u8, b: u8) -> Rgba {
        Rgba::new(r, g, b, 255)
    }

    #[test]
    fn stacked_placement_keeps_a_supported_falling_block() {
        // Pixel 0 places dark block A at the base; pixel 1 matches falling
        // block B directly above it, so B keeps its support and stays.
        let palette = palette_of(
            vec![
                block("minecraft:a", [0, 0, 0, 255]),
                block("minecraft:b", [255, 255, 255, 255]),
            ],
            &["minecraft:b"],
        );
        let skin = Skin::from_pixels(vec![opaque(10, 10, 10), opaque(240, 240, 240)]);
        let mapping = vec![(0, (0, 0, 0)), (1, (0, 1, 0))];

        let conversion = convert_skin(&skin, &mapping, &palette).unwrap();

        assert_eq!(conversion.schematic.block_at((0, 0, 0)), Some("minecraft:a"));
        assert_eq!(conversion.schematic.block_at((0, 1, 0)), Some("minecraft:b"));
        assert_eq!(conversion.usage.get("minecraft:a"), Some(&1));
        assert_eq!(conversion.usage.get("minecraft:b"), Some(&1));
        assert_eq!(conversion.stats.placed, 2);
    }

    #[test]
    fn unsupported_falling_block_is_substituted() {
        let palette = palette_of(
            vec![
                block("minecraft:solid", [200, 200, 200, 255]),
                block("minecraft:falling", [255, 255, 255, 255]),
            ],
            &["minecraft:falling"],
        );
        let skin = Skin::from_pixels(vec![opaque(250, 250, 250)]);
        let mapping = vec![(0, (0, 5, 0))];

        let conversion = convert_skin(&skin, &mapping, &palette).unwrap();

        assert_eq!(
            conversion.schematic.block_at((0, 5, 0)),
            Some("minecraft:solid")
        );
        assert!(!conversion.usage.contains_key("minecraft:falling"));
    }

    #[test]
    fn unanswerable_support_query_is_treated_as_no_support() {
        let palette = palette_of(
            vec![
                block("minecraft:solid", [200, 200, 200, 255]),
                block("minecraft:falling", [255, 255, 255, 255]),
            ],
            &["minecraft:falling"],
        );
        let skin = Skin::from_pixels(vec![opaque(250, 250, 250)]);
        let mapping = vec![(0, (0, i32::MIN, 0))];

        let conversion = convert_skin(&skin, &mapping, &palette).unwrap();
        assert_eq!(
            conversion.schematic.block_at((0, i32::MIN, 0)),
            Some("minecraft:solid")
        );
    }

    #[test]
    fn missing_substitute_for_a_falling_block_is_fatal() {
        let palette = palette_of(
            vec![block("minecraft:falling", [255, 255, 255, 255])],
            &["minecraft:falling"],
        );
        let skin = Skin::from_pixels(vec![opaque(250, 250, 250)]);
        let mapping = vec![(0, (0, 1, 0))];

        let result = convert_skin(&skin, &mapping, &palette);
        assert!(matches!(
            result,
            Err(ConvertError::NoSupportedMatch {
                position: (0, 1, 0),
                ..
            })
        ));
    }

    #[test]
    fn out_of_bounds_and_transparent_entries_are_counted_not_fatal() {
        let palette = palette_of(vec![block("minecraft:stone", [125, 125, 125, 255])], &[]);
        let skin = Skin::from_pixels(vec![
            opaque(120, 120, 120),
            Rgba::new(0, 0, 0, 0),
            opaque(130, 130, 130),
        ]);
        let mapping = vec![
            (0, (0, 0, 0)),
            (1, (1, 0, 0)),  // transparent
            (7, (2, 0, 0)),  // out of bounds
            (2, (3, 0, 0)),
            (9, (4, 0, 0)),  // out of bounds
        ];

        let conversion = convert_skin(&skin, &mapping, &palette).unwrap();

        assert_eq!(conversion.stats.placed, 2);
        assert_eq!(conversion.stats.skipped_transparent, 1);
        assert_eq!(conversion.stats.skipped_out_of_bounds, 2);
        assert_eq!(conversion.schematic.block_count(), 2);
        assert_eq!(conversion.usage.get("minecraft:stone"), Some(&2));
    }

    #[test]
    fn overwriting_a_coordinate_keeps_net_counts() {
        let palette = palette_of(
            vec![
                block("minecraft:dark", [0, 0, 0, 255]),
                block("minecraft:light", [255, 255, 255, 255]),
            ],
            &[],
        );
        let skin = Skin::from_pixels(vec![opaque(10, 10, 10), opaque(240, 240, 240)]);
        let mapping = vec![(0, (0, 0, 0)), (1, (0, 0, 0))];

        let conversion = convert_skin(&skin, &mapping, &palette).unwrap();

        assert_eq!(
            conversion.schematic.block_at((0, 0, 0)),
            Some("minecraft:light")
        );
        assert_eq!(conversion.schematic.block_count(), 1);
        assert!(!conversion.usage.contains_key("minecraft:dark"));
        assert_eq!(conversion.usage.get("minecraft:light"), Some(&1));
        // Two commits happened even though only one block remains.
        assert_eq!(conversion.stats.placed, 2);
    }

    #[test]
    fn mapping_order_establishes_support_for_later_entries() {
        // The base entry comes first in mapping order even though it was
        // emitted for a later skin pixel; the falling block above survives.
        let palette = palette_of(
            vec![
                block("minecraft:base", [0, 0, 0, 255]),
                block("minecraft:falling", [255, 255, 255, 255]),
            ],
            &["minecraft:falling"],
        );
        let skin = Skin::from_pixels(vec![opaque(250, 250, 250), opaque(5, 5, 5)]);
        let mapping = vec![(1, (2, 0, 2)), (0, (2, 1, 2))];

        let conversion = convert_skin(&skin, &mapping, &palette).unwrap();
        assert_eq!(
            conversion.schematic.block_at((2, 1, 2)),
            Some("minecraft:falling")
        );
    }

    #[test]
    fn empty_mapping_produces_an_empty_structure() {
        let palette = palette_of(vec![block("minecraft:stone", [125, 125, 125, 255])], &[]);
        let skin = Skin::from_pixels(vec![opaque(1, 1, 1)]);

        let conversion = convert_skin(&skin, &[], &palette).unwrap();
        assert!(conversion.schematic.is_empty());
        assert!(conversion.usage.is_empty());
        assert_eq!(conversion.stats, ConversionStats::default());
    }
}
