use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const CONFIG_DIRNAME: &str = ".codetray";
pub const SNIPPETS_FILENAME: &str = "snippets.json";
pub const CONFIG_FILENAME: &str = "config.json";
pub const LOG_FILENAME: &str = "codetray.log";

/// Delay between a pointer leaving the tray and the tray collapsing.
pub const COLLAPSE_DELAY: Duration = Duration::from_millis(500);
/// Delay between focusing the previous window and sending the paste keystroke.
pub const PASTE_DELAY: Duration = Duration::from_millis(150);

const SIDE_KEY: &str = "side";

/// Get the codetray configuration directory
pub fn get_config_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(CONFIG_DIRNAME))
        .unwrap_or_else(|| PathBuf::from(CONFIG_DIRNAME))
}

/// Screen edge the tray is anchored to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    Left,
    #[default]
    Right,
    Top,
    Bottom,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Left, Side::Right, Side::Top, Side::Bottom];

    /// Next side in the Left, Right, Top, Bottom cycle.
    pub fn next(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Top,
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Side::Left => "Left",
            Side::Right => "Right",
            Side::Top => "Top",
            Side::Bottom => "Bottom",
        };
        f.write_str(name)
    }
}

/// Persisted tray configuration.
///
/// Keys other than `side` are carried in `extra` so a rewrite does not drop
/// settings written by other tooling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub side: Side,
    pub extra: Map<String, Value>,
}

impl Config {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            extra: Map::new(),
        }
    }

    /// Build a config from a raw JSON object. A missing or unrecognized
    /// `side` falls back to the default.
    pub fn from_record(mut record: Map<String, Value>) -> Self {
        let side = record
            .remove(SIDE_KEY)
            .and_then(|value| serde_json::from_value(value).ok())
            .unwrap_or_default();
        Self {
            side,
            extra: record,
        }
    }

    /// Raw JSON object for this config. `side` wins over a `side` key in
    /// `extra`.
    pub fn to_record(&self) -> Map<String, Value> {
        let mut record = self.extra.clone();
        record.insert(SIDE_KEY.to_string(), Value::String(self.side.to_string()));
        record
    }
}

/// Sizes of the tray strip, in screen units.
///
/// Widths apply when anchored to Left/Right, heights when anchored to
/// Top/Bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrayDimensions {
    pub expanded_width: u32,
    pub collapsed_width: u32,
    pub expanded_height: u32,
    pub collapsed_height: u32,
}

impl Default for TrayDimensions {
    fn default() -> Self {
        Self {
            expanded_width: 300,
            collapsed_width: 10,
            expanded_height: 260,
            collapsed_height: 10,
        }
    }
}
