/// Skin to voxel structure converter main entry point
mod color;
mod constants;
mod converter;
mod export;
mod mapping;
mod palette;
mod schematic;
mod settings;
mod skin;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use constants::{
    BLOCKS_PATH, BLOCKTYPES_PATH, DEFAULT_OUTPUT_DIR, DEFAULT_SETTINGS_PATH, MAPPING_PATH,
    THEMES_PATH,
};
use palette::Palette;
use settings::Settings;
use skin::Skin;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <skin.png> [settings.json]", args[0]);
        std::process::exit(1);
    }

    let skin_path = Path::new(&args[1]);
    let settings_path = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH));

    let settings = Settings::load(&settings_path)?;

    let mut skin = Skin::from_file(skin_path)?;
    if settings.grayscale {
        skin.grayscale();
    }

    let mapping = mapping::load_mapping(Path::new(MAPPING_PATH))?;

    let catalogue = Palette::load(
        Path::new(BLOCKS_PATH),
        Path::new(BLOCKTYPES_PATH),
        Path::new(THEMES_PATH),
    )?;
    let active = catalogue.resolve(&settings.palette_config())?;

    let conversion = converter::convert_skin(&skin, &mapping, &active)?;

    let output_dir = settings
        .save_location
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
    fs::create_dir_all(&output_dir)?;

    let stem = skin_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "skin".to_string());

    export::write_structure_manifest(
        &conversion,
        &settings.version,
        &output_dir.join(format!("{stem}.structure.json")),
    )?;
    export::write_material_report(
        &conversion.usage,
        &output_dir.join(format!("{stem}_materials.txt")),
    )?;

    Ok(())
}
