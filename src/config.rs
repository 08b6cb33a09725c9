/// Configuration system: TOML-based with sensible defaults.
/// Config file: `~/.config/quadterm/config.toml`

use serde::Deserialize;
use std::path::PathBuf;

/// An RGB color, parsed from `#rrggbb` hex strings in the config file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };
    pub const WHITE: Self = Self { r: 255, g: 255, b: 255 };
    pub const GREEN: Self = Self { r: 0, g: 255, b: 0 };

    /// Normalized components for vertex data.
    pub fn to_f32(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

pub fn hex_to_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color { r, g, b })
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub font: FontConfig,
    pub window: WindowConfig,
    pub colors: ColorConfig,
    pub shell: ShellConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub path: String,
    pub size: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub background: String,
    pub output: String,
    pub prompt: String,
    pub cursor: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            font: FontConfig::default(),
            window: WindowConfig::default(),
            colors: ColorConfig::default(),
            shell: ShellConfig::default(),
        }
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            path: "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf".into(),
            size: 24.0,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "quadterm".into(),
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: "#000000".into(),
            output: "#ffffff".into(),
            prompt: "#00ff00".into(),
            cursor: "#ffffff".into(),
        }
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            program: "/bin/sh".into(),
            args: vec!["-c".into()],
        }
    }
}

impl ColorConfig {
    pub fn background_color(&self) -> Color {
        hex_to_color(&self.background).unwrap_or(Color::BLACK)
    }

    pub fn output_color(&self) -> Color {
        hex_to_color(&self.output).unwrap_or(Color::WHITE)
    }

    pub fn prompt_color(&self) -> Color {
        hex_to_color(&self.prompt).unwrap_or(Color::GREEN)
    }

    pub fn cursor_color(&self) -> Color {
        hex_to_color(&self.cursor).unwrap_or(Color::WHITE)
    }
}

impl Config {
    /// Config file path: `~/.config/quadterm/config.toml`
    pub fn path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// Load config from file, falling back to defaults.
    pub fn load() -> Self {
        let path = Self::path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::from_str(&contents),
            Err(_) => Self::default(),
        }
    }

    /// Parse config from TOML string.
    pub fn from_str(s: &str) -> Self {
        toml::from_str(s).unwrap_or_default()
    }
}

fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
    PathBuf::from(home).join(".config").join("quadterm")
}
