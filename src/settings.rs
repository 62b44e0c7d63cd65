//! Settings persistence using TOML
//!
//! Stores settings in ~/.config/block-game/settings.toml (or platform equivalent)

use crate::bag::{PieceMode, PieceSource};
use crate::game::GameConfig;
use crate::tetromino::TetrominoType;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Game settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub board: BoardSettings,
    pub gameplay: GameplaySettings,
    pub keys: KeyBindings,
    pub visual: VisualSettings,
}

/// Board dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    pub width: usize,
    pub height: usize,
}

/// Gameplay settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplaySettings {
    /// Milliseconds between automatic drops
    pub gravity_ms: u64,
    /// Delayed Auto Shift in milliseconds
    pub das_ms: u64,
    /// Auto Repeat Rate in milliseconds
    pub arr_ms: u64,
    /// "test" deals `test_piece` every time, "bag" uses the 7-bag
    pub pieces: PieceMode,
    pub test_piece: TetrominoType,
    /// Bag seed; random when absent
    pub seed: Option<u64>,
}

/// Key bindings (stored as strings for easy editing)
/// Each action can have one or more keys bound to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub move_left: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub move_right: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub move_down: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub rotate: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub rotate_ccw: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub restart: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub quit: Vec<String>,
}

/// Deserialize keys as either a single string or array of strings
fn deserialize_keys<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct KeysVisitor;

    impl<'de> Visitor<'de> for KeysVisitor {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a string or array of strings")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![v.to_string()])
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: de::SeqAccess<'de>,
        {
            let mut keys = Vec::new();
            while let Some(key) = seq.next_element::<String>()? {
                keys.push(key);
            }
            Ok(keys)
        }
    }

    deserializer.deserialize_any(KeysVisitor)
}

/// Serialize keys: single key as string, multiple as array
#[allow(clippy::ptr_arg)]
fn serialize_keys<S>(keys: &Vec<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeSeq;

    if keys.len() == 1 {
        serializer.serialize_str(&keys[0])
    } else {
        let mut seq = serializer.serialize_seq(Some(keys.len()))?;
        for key in keys {
            seq.serialize_element(key)?;
        }
        seq.end()
    }
}

/// Visual settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualSettings {
    /// Block style: "solid", "bracket", "round"
    pub block_style: String,
    /// Show where the piece will land
    pub show_ghost: bool,
    /// Show the upcoming piece next to the board
    pub show_preview: bool,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            width: crate::board::BOARD_WIDTH,
            height: crate::board::BOARD_HEIGHT,
        }
    }
}

impl Default for GameplaySettings {
    fn default() -> Self {
        Self {
            gravity_ms: 800,
            das_ms: 170,
            arr_ms: 50,
            pieces: PieceMode::Test,
            test_piece: TetrominoType::T,
            seed: None,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_left: vec!["Left".to_string()],
            move_right: vec!["Right".to_string()],
            move_down: vec!["Down".to_string()],
            rotate: vec!["Up".to_string(), "x".to_string()],
            rotate_ccw: vec!["z".to_string()],
            restart: vec!["r".to_string()],
            quit: vec!["q".to_string(), "Esc".to_string()],
        }
    }
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self {
            block_style: "solid".to_string(),
            show_ghost: true,
            show_preview: true,
        }
    }
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "block-game", "block-game")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the default settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("settings.toml"))
    }

    /// Load settings from the default location, or create default
    pub fn load() -> Self {
        match Self::settings_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load settings from a file; a missing or broken file yields defaults
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents).unwrap_or_else(|e| {
                tracing::warn!("Ignoring invalid settings in {}: {}", path.display(), e);
                Self::default()
            }),
            Err(e) => {
                tracing::debug!("No settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse settings from TOML text
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Save settings to a file, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| format!("Failed to create config dir: {}", e))?;
        }

        let contents =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize: {}", e))?;

        fs::write(path, contents).map_err(|e| format!("Failed to write settings: {}", e))?;

        Ok(())
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<(), String> {
        let Some(path) = Self::settings_path() else {
            return Err("Could not determine settings path".to_string());
        };
        self.save_to(&path)
    }

    /// Controller parameters described by these settings
    pub fn game_config(&self) -> GameConfig {
        let source = match self.gameplay.pieces {
            PieceMode::Test => PieceSource::fixed(self.gameplay.test_piece),
            PieceMode::Bag => PieceSource::bag(self.gameplay.seed.unwrap_or_else(rand::random)),
        };
        GameConfig {
            width: self.board.width,
            height: self.board.height,
            source,
        }
    }
}

impl VisualSettings {
    /// Get the block and ghost characters based on style
    pub fn block_chars(&self) -> (&'static str, &'static str) {
        match self.block_style.as_str() {
            "bracket" => ("[]", ".."),
            "round" => ("()", ".."),
            _ => ("██", "░░"), // "solid" or default
        }
    }
}
