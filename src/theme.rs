//! Color theme, read from `~/.steep/theme.toml` at startup.
//!
//! Unlike the tea store, the theme file is required: a missing file aborts
//! startup with [`Error::ThemeMissing`]. `steep init` writes the default
//! theme so a fresh install can start.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::{slog_debug, Error, Result};

/// Default theme written by `steep init`.
pub const DEFAULT_THEME_TOML: &str = "\
# steep color theme
# Background fades from `start` to `end` over the course of one infusion.
start = \"#f5ffce\"
end = \"#c9f621\"
accent = \"#5c6f2d\"
text = \"#2f3a16\"
";

/// An RGB color, serialized as a `#rrggbb` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn parse(s: &str) -> Result<Self> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| Error::InvalidColor(s.to_string()))?;
        if hex.len() != 6 {
            return Err(Error::InvalidColor(s.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| Error::InvalidColor(s.to_string()))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> String {
        c.to_string()
    }
}

impl From<Rgb> for ratatui::style::Color {
    fn from(c: Rgb) -> Self {
        ratatui::style::Color::Rgb(c.r, c.g, c.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Background at rest and at infusion start.
    pub start: Rgb,
    /// Background when an infusion completes.
    pub end: Rgb,
    /// Highlight color for selections and the focused menu field.
    pub accent: Rgb,
    /// Foreground text color.
    pub text: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            start: Rgb::new(245, 255, 206),
            end: Rgb::new(201, 246, 33),
            accent: Rgb::new(92, 111, 45),
            text: Rgb::new(47, 58, 22),
        }
    }
}

impl Theme {
    pub fn load() -> Result<Self> {
        Self::load_from(&Config::theme_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        slog_debug!("Theme::load_from path={}", path.display());
        if !path.exists() {
            return Err(Error::ThemeMissing(path.to_path_buf()));
        }
        let theme: Theme = toml::from_str(&fs::read_to_string(path)?)?;
        slog_debug!("Theme loaded: start={} end={}", theme.start, theme.end);
        Ok(theme)
    }

    /// Write the default theme file. Refuses to overwrite unless `force`.
    pub fn write_default(path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            return Err(Error::Validation(format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            )));
        }
        fs::write(path, DEFAULT_THEME_TOML)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_rgb_parse() {
        assert_eq!(Rgb::parse("#f5ffce").unwrap(), Rgb::new(245, 255, 206));
        assert_eq!(Rgb::parse("#000000").unwrap(), Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_rgb_parse_rejects_garbage() {
        assert!(Rgb::parse("f5ffce").is_err()); // no '#'
        assert!(Rgb::parse("#f5ffc").is_err()); // too short
        assert!(Rgb::parse("#zzffce").is_err()); // not hex
    }

    #[test]
    fn test_rgb_display_roundtrip() {
        let c = Rgb::new(201, 246, 33);
        assert_eq!(c.to_string(), "#c9f621");
        assert_eq!(Rgb::parse(&c.to_string()).unwrap(), c);
    }

    #[test]
    fn test_default_theme_toml_parses_to_default() {
        let theme: Theme = toml::from_str(DEFAULT_THEME_TOML).unwrap();
        assert_eq!(theme, Theme::default());
    }

    #[test]
    fn test_missing_theme_is_fatal() {
        let dir = TempDir::new().unwrap();
        let result = Theme::load_from(&dir.path().join("theme.toml"));
        assert!(matches!(result.unwrap_err(), Error::ThemeMissing(_)));
    }

    #[test]
    fn test_write_default_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("theme.toml");
        Theme::write_default(&path, false).unwrap();
        assert_eq!(Theme::load_from(&path).unwrap(), Theme::default());
    }

    #[test]
    fn test_write_default_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("theme.toml");
        Theme::write_default(&path, false).unwrap();
        assert!(Theme::write_default(&path, false).is_err());
        assert!(Theme::write_default(&path, true).is_ok());
    }
}
