//! Driver configuration read from the process environment.
use std::env;
use std::path::PathBuf;

/// Settings for one headless skirmish run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    pub turns: u32,
    pub grid_width: u32,
    pub grid_height: u32,
    /// TOML file with unit defaults. Built-in defaults when unset.
    pub config_path: Option<PathBuf>,
    /// Directory with `abilities.ron` and `status_effects.ron`. Embedded
    /// content when unset.
    pub content_dir: Option<PathBuf>,
    /// Directory for the log file. Logs go to stderr only when unset.
    pub log_dir: Option<PathBuf>,
}

impl SimConfig {
    pub const DEFAULT_TURNS: u32 = 12;
    pub const DEFAULT_GRID_WIDTH: u32 = 10;
    pub const DEFAULT_GRID_HEIGHT: u32 = 8;
    /// Smallest board that still fits both starting lines.
    pub const MIN_GRID_SIDE: u32 = 4;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SIM_TURNS` - Number of rounds to play (default: 12)
    /// - `SIM_GRID_WIDTH` - Board width in tiles (default: 10, minimum 4)
    /// - `SIM_GRID_HEIGHT` - Board height in tiles (default: 8, minimum 4)
    /// - `SIM_CONFIG_PATH` - Unit defaults TOML file (optional)
    /// - `SIM_CONTENT_DIR` - Content data directory (optional)
    /// - `SIM_LOG_DIR` - Log file directory (optional)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(turns) = read_env::<u32>("SIM_TURNS") {
            config.turns = turns;
        }
        if let Some(width) = read_env::<u32>("SIM_GRID_WIDTH") {
            config.grid_width = width.max(Self::MIN_GRID_SIDE);
        }
        if let Some(height) = read_env::<u32>("SIM_GRID_HEIGHT") {
            config.grid_height = height.max(Self::MIN_GRID_SIDE);
        }

        config.config_path = env::var("SIM_CONFIG_PATH").ok().map(PathBuf::from);
        config.content_dir = env::var("SIM_CONTENT_DIR").ok().map(PathBuf::from);
        config.log_dir = env::var("SIM_LOG_DIR").ok().map(PathBuf::from);

        config
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            turns: Self::DEFAULT_TURNS,
            grid_width: Self::DEFAULT_GRID_WIDTH,
            grid_height: Self::DEFAULT_GRID_HEIGHT,
            config_path: None,
            content_dir: None,
            log_dir: None,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
