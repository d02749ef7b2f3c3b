//! Colour theme for the legacy-admin console.
//!
//! Themes are TOML files embedded in the binary via [`include_str!`], so the
//! console works without any files on disk. Pick one at startup with
//! [`Theme::by_name`] and pass it through the application by reference.
//!
//! # Status colours
//!
//! Every entity carries some kind of status label (`Active`, `Pending`,
//! `Overdue`, `cancelled`, …). Labels are bucketed into positive, warning and
//! negative so each table can colour its status columns the same way.

use config::{Config, File, FileFormat};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");
const GRUVBOX_DARK_THEME_SRC: &str = include_str!("themes/gruvbox_dark.toml");

/// Names accepted by [`Theme::by_name`].
pub const THEME_NAMES: &[&str] = &["default", "gruvbox"];

// ---------------------------------------------------------------------------
// Raw (serde) types — mirror the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawStyle {
    fg: Option<String>,
    bg: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    dim: bool,
    #[serde(default)]
    reversed: bool,
}

impl RawStyle {
    fn into_style(self) -> Style {
        let mut style = Style::default();
        if let Some(c) = self.fg.as_deref().and_then(parse_color) {
            style = style.fg(c);
        }
        if let Some(c) = self.bg.as_deref().and_then(parse_color) {
            style = style.bg(c);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.dim {
            style = style.add_modifier(Modifier::DIM);
        }
        if self.reversed {
            style = style.add_modifier(Modifier::REVERSED);
        }
        style
    }
}

#[derive(Debug, Deserialize)]
struct RawStatus {
    positive: RawStyle,
    warning: RawStyle,
    negative: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawBorders {
    focused: RawStyle,
    command_bar: RawStyle,
    unfocused: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawTable {
    header: RawStyle,
    cursor: RawStyle,
    muted: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawFilters {
    active: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawPalette {
    colors: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    status: RawStatus,
    borders: RawBorders,
    table: RawTable,
    filters: RawFilters,
    palette: RawPalette,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Application colour theme. All styles are resolved once at load time.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,

    pub status_positive: Style,
    pub status_warning: Style,
    pub status_negative: Style,

    pub border_focused: Style,
    pub border_command_bar: Style,
    pub border_unfocused: Style,

    pub table_header: Style,
    /// Row under the table cursor.
    pub table_cursor: Style,
    /// Placeholder text, empty cells and secondary counters.
    pub muted: Style,

    /// A filter row whose selection is not the sentinel.
    pub filter_active: Style,

    palette: Vec<Color>,
}

impl Theme {
    /// Load and parse the embedded default theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_default() -> Self {
        Self::from_toml_str("default", DEFAULT_THEME_SRC)
            .expect("embedded default theme must be valid TOML")
    }

    /// Load and parse the embedded Gruvbox Dark theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_gruvbox_dark() -> Self {
        Self::from_toml_str("gruvbox", GRUVBOX_DARK_THEME_SRC)
            .expect("embedded gruvbox dark theme must be valid TOML")
    }

    /// Look up an embedded theme by the name used in config and the
    /// `theme` command.
    pub fn by_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "default" => Some(Self::load_default()),
            "gruvbox" | "gruvbox-dark" | "gruvbox_dark" => Some(Self::load_gruvbox_dark()),
            _ => None,
        }
    }

    /// Parse a theme from a TOML string. Unknown keys are ignored.
    pub fn from_toml_str(name: &'static str, src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        Ok(Self {
            name,
            status_positive: raw.status.positive.into_style(),
            status_warning: raw.status.warning.into_style(),
            status_negative: raw.status.negative.into_style(),
            border_focused: raw.borders.focused.into_style(),
            border_command_bar: raw.borders.command_bar.into_style(),
            border_unfocused: raw.borders.unfocused.into_style(),
            table_header: raw.table.header.into_style(),
            table_cursor: raw.table.cursor.into_style(),
            muted: raw.table.muted.into_style(),
            filter_active: raw.filters.active.into_style(),
            palette: raw.palette.colors.iter().filter_map(|s| parse_color(s)).collect(),
        })
    }

    /// Style for a status-like label. Unrecognised labels are unstyled.
    pub fn status_style(&self, label: &str) -> Style {
        match label.trim().to_ascii_lowercase().as_str() {
            "active" | "approved" | "up to date" | "completed" | "verified" | "outstanding"
            | "excellent" => self.status_positive,
            "pending" | "average" => self.status_warning,
            "inactive" | "overdue" | "cancelled" | "rejected" => self.status_negative,
            _ => Style::default(),
        }
    }

    /// Stable colour for a free-form label such as a project name, so the
    /// same project reads the same colour on every tab.
    pub fn label_style(&self, label: &str) -> Style {
        if self.palette.is_empty() {
            return Style::default();
        }
        let idx = stable_hash(label) % self.palette.len();
        Style::default().fg(self.palette[idx])
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// djb2-style hash, stable across Rust versions and process restarts.
fn stable_hash(s: &str) -> usize {
    s.bytes()
        .fold(5381usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize))
}

/// Parse a colour name into a ratatui [`Color`].
///
/// Accepts named terminal colours (`red`, `dark_gray`, …), hex `#rrggbb`
/// and 256-colour `indexed:N`.
fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "darkgray" | "dark_grey" | "darkgrey" => Some(Color::DarkGray),
        "light_red" => Some(Color::LightRed),
        "light_green" => Some(Color::LightGreen),
        "light_yellow" => Some(Color::LightYellow),
        "light_blue" => Some(Color::LightBlue),
        "light_magenta" => Some(Color::LightMagenta),
        "light_cyan" => Some(Color::LightCyan),
        "white" => Some(Color::White),
        s if s.starts_with('#') && s.len() == 7 => {
            let r = u8::from_str_radix(&s[1..3], 16).ok()?;
            let g = u8::from_str_radix(&s[3..5], 16).ok()?;
            let b = u8::from_str_radix(&s[5..7], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        s if s.starts_with("indexed:") => s["indexed:".len()..].parse().ok().map(Color::Indexed),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_themes_load() {
        for name in THEME_NAMES {
            let theme = Theme::by_name(name).unwrap();
            assert_ne!(theme.status_positive, Style::default(), "{name}");
            assert_ne!(theme.border_focused, Style::default(), "{name}");
            assert_ne!(theme.table_cursor, Style::default(), "{name}");
            assert!(!theme.palette.is_empty(), "{name}");
        }
    }

    #[test]
    fn unknown_theme_name() {
        assert!(Theme::by_name("solarized").is_none());
    }

    #[test]
    fn status_buckets() {
        let theme = Theme::load_default();
        assert_eq!(theme.status_style("Active"), theme.status_positive);
        assert_eq!(theme.status_style("Up to Date"), theme.status_positive);
        assert_eq!(theme.status_style("Pending"), theme.status_warning);
        assert_eq!(theme.status_style("cancelled"), theme.status_negative);
        assert_eq!(theme.status_style("Overdue"), theme.status_negative);
        assert_eq!(theme.status_style("Cement"), Style::default());
    }

    #[test]
    fn label_style_is_stable() {
        let theme = Theme::load_default();
        assert_eq!(theme.label_style("Sunrise Towers"), theme.label_style("Sunrise Towers"));
    }

    #[test]
    fn parse_colors() {
        assert_eq!(parse_color("#ff0080"), Some(Color::Rgb(255, 0, 128)));
        assert_eq!(parse_color("indexed:42"), Some(Color::Indexed(42)));
        assert_eq!(parse_color("chartreuse"), None);
    }
}
