/// Output writing for converted structures
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::constants::STACK_SIZE;
use crate::converter::{Conversion, ConversionStats};

/// Exported structure manifest linking placements, usage, and statistics.
#[derive(Serialize)]
struct StructureManifest<'a> {
    version: &'a str,
    block_count: usize,
    stats: ConversionStats,
    usage: BTreeMap<&'a str, u64>,
    placements: Vec<Placement<'a>>,
}

#[derive(Serialize)]
struct Placement<'a> {
    position: [i32; 3],
    block: &'a str,
}

/// Write the structure manifest as pretty-printed JSON.
pub fn write_structure_manifest(
    conversion: &Conversion,
    version: &str,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let placements: Vec<Placement> = conversion
        .schematic
        .placements()
        .map(|((x, y, z), block)| Placement {
            position: [x, y, z],
            block,
        })
        .collect();

    let manifest = StructureManifest {
        version,
        block_count: conversion.schematic.block_count(),
        stats: conversion.stats,
        usage: conversion
            .usage
            .iter()
            .map(|(id, count)| (id.as_str(), *count))
            .collect(),
        placements,
    };

    let json = serde_json::to_string_pretty(&manifest)?;
    fs::write(path, json)?;
    println!("Saved {} ({} blocks)", path.display(), manifest.block_count);

    Ok(())
}

/// Write the human-readable material list, most-used blocks first.
pub fn write_material_report(
    usage: &HashMap<String, u64>,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut lines: Vec<(&str, u64)> = usage.iter().map(|(id, n)| (id.as_str(), *n)).collect();
    lines.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    let mut report = String::new();
    for (id, count) in lines {
        report.push_str(&format!("{id}: {count} ({})\n", format_stacks(count)));
    }

    fs::write(path, report)?;
    println!("Saved {}", path.display());

    Ok(())
}

/// Format a block count in inventory-stack notation, e.g. "3x64 + 12".
pub fn format_stacks(n: u64) -> String {
    let stacks = n / STACK_SIZE;
    let rest = n % STACK_SIZE;
    if stacks == 0 {
        return format!("{rest}");
    }
    if rest == 0 {
        return format!("{stacks}x{STACK_SIZE}");
    }
    format!("{stacks}x{STACK_SIZE} + {rest}")
}
