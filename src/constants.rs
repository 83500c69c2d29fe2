/// Shared configuration for skin conversion

/// Expected skin texture width in pixels
pub const SKIN_WIDTH: u32 = 64;

/// Expected skin texture height in pixels
pub const SKIN_HEIGHT: u32 = 64;

/// Alpha channel value marking a fully transparent pixel
pub const TRANSPARENT_ALPHA: u8 = 0;

/// Category of blocks that fall without support underneath
pub const FALLING_CATEGORY: &str = "falling_blocks";

/// Y-axis offset applied when querying the supporting block
pub const SUPPORT_CHECK_OFFSET: i32 = -1;

/// Items per inventory stack for the material report
pub const STACK_SIZE: u64 = 64;

/// Theme name treated as "no theme selected"
pub const THEME_NONE: &str = "none";

/// Default data and asset locations relative to the working directory
pub const DEFAULT_SETTINGS_PATH: &str = "data/settings.json";
pub const BLOCKS_PATH: &str = "data/blocks.json";
pub const BLOCKTYPES_PATH: &str = "data/blocktypes.json";
pub const THEMES_PATH: &str = "data/themes.json";
pub const MAPPING_PATH: &str = "assets/mapping_4px.png";

/// Default output directory when settings do not name one
pub const DEFAULT_OUTPUT_DIR: &str = "out";
