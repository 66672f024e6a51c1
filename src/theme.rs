use anyhow::Result;
use ratatui::style::Color;
use ratatui::widgets::BorderType;
use serde::{Deserialize, Serialize};

use crate::config::config_dir;

pub fn hex_to_color(hex: &str) -> Color {
    let h = hex.trim_start_matches('#');
    if h.len() != 6 || !h.is_ascii() { return Color::Reset; }
    let r = u8::from_str_radix(&h[0..2], 16).unwrap_or(0);
    let g = u8::from_str_radix(&h[2..4], 16).unwrap_or(0);
    let b = u8::from_str_radix(&h[4..6], 16).unwrap_or(0);
    Color::Rgb(r, g, b)
}

fn default_border_style() -> String { "rounded".to_owned() }

/// Palette for the form screen and the picker popup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub name: String,
    // Backgrounds
    pub bg_primary: String, pub bg_secondary: String, pub bg_popup: String,
    // Borders
    pub border_normal: String, pub border_focused: String,
    // Text
    pub text_primary: String, pub text_muted: String, pub text_accent: String,
    /// Cell matching the calendar date's day of month.
    pub day_highlight_bg: String, pub day_highlight_fg: String,
    /// Keyboard focus inside the grid.
    pub focus_bg: String, pub focus_fg: String,
    /// Dated cells that can't be picked (excluded weekdays).
    pub disabled_fg: String,
    /// Border style: "rounded" | "double" | "thick" | "plain"
    #[serde(default = "default_border_style")]
    pub border_style: String,
}

impl ThemeConfig {
    // ── Color accessors ───────────────────────────────────────────────────────
    pub fn bg(&self)            -> Color { hex_to_color(&self.bg_primary) }
    pub fn bg2(&self)           -> Color { hex_to_color(&self.bg_secondary) }
    pub fn popup_bg(&self)      -> Color { hex_to_color(&self.bg_popup) }
    pub fn border(&self)        -> Color { hex_to_color(&self.border_normal) }
    pub fn border_active(&self) -> Color { hex_to_color(&self.border_focused) }
    pub fn fg(&self)            -> Color { hex_to_color(&self.text_primary) }
    pub fn fg_dim(&self)        -> Color { hex_to_color(&self.text_muted) }
    pub fn accent(&self)        -> Color { hex_to_color(&self.text_accent) }
    pub fn disabled(&self)      -> Color { hex_to_color(&self.disabled_fg) }

    pub fn day_highlight(&self) -> (Color, Color) {
        (hex_to_color(&self.day_highlight_bg), hex_to_color(&self.day_highlight_fg))
    }
    pub fn focus_highlight(&self) -> (Color, Color) {
        (hex_to_color(&self.focus_bg), hex_to_color(&self.focus_fg))
    }

    pub fn border_type(&self) -> BorderType {
        match self.border_style.as_str() {
            "double" => BorderType::Double,
            "thick"  => BorderType::Thick,
            "plain"  => BorderType::Plain,
            _        => BorderType::Rounded,
        }
    }

    // ── Persistence ───────────────────────────────────────────────────────────
    pub fn load() -> Result<Self> {
        let path = config_dir().join("theme.toml");
        if path.exists() {
            Ok(toml::from_str(&std::fs::read_to_string(&path)?)?)
        } else {
            let t = ThemeConfig::default();
            t.save()?;
            Ok(t)
        }
    }

    pub fn save(&self) -> Result<()> {
        let dir = config_dir();
        std::fs::create_dir_all(&dir)?;
        std::fs::write(dir.join("theme.toml"), toml::to_string_pretty(self)?)?;
        Ok(())
    }

    // ── Theme catalogue ───────────────────────────────────────────────────────
    pub fn all_themes() -> Vec<ThemeConfig> {
        vec![
            ThemeConfig::default(),    // Catppuccin Mocha
            ThemeConfig::classic(),
            ThemeConfig::dark(),
            ThemeConfig::mahogany(),
            ThemeConfig::nord(),
        ]
    }

    pub fn by_name(name: &str) -> Option<ThemeConfig> {
        Self::all_themes().into_iter().find(|t| t.name == name)
    }

    // ── Built-in themes ───────────────────────────────────────────────────────

    /// White panel, blue text, yellow day highlight.
    pub fn classic() -> Self { Self {
        name: "classic".into(),
        bg_primary: "#ffffff".into(), bg_secondary: "#e8e8f0".into(), bg_popup: "#ffffff".into(),
        border_normal: "#8080c0".into(), border_focused: "#0000ff".into(),
        text_primary: "#0000ff".into(), text_muted: "#a0a0c8".into(), text_accent: "#0000ff".into(),
        day_highlight_bg: "#ffff00".into(), day_highlight_fg: "#0000ff".into(),
        focus_bg: "#0000ff".into(), focus_fg: "#ffffff".into(),
        disabled_fg: "#b0b0d0".into(),
        border_style: "plain".into(),
    }}

    /// Black panel, white text, red day highlight.
    pub fn dark() -> Self { Self {
        name: "dark".into(),
        bg_primary: "#000000".into(), bg_secondary: "#111111".into(), bg_popup: "#000000".into(),
        border_normal: "#444444".into(), border_focused: "#ffffff".into(),
        text_primary: "#ffffff".into(), text_muted: "#777777".into(), text_accent: "#ffffff".into(),
        day_highlight_bg: "#ff0000".into(), day_highlight_fg: "#ffffff".into(),
        focus_bg: "#ffffff".into(), focus_fg: "#000000".into(),
        disabled_fg: "#555555".into(),
        border_style: "thick".into(),
    }}

    /// Brown panel, silver text, olive day highlight.
    pub fn mahogany() -> Self { Self {
        name: "mahogany".into(),
        bg_primary: "#a52a2a".into(), bg_secondary: "#7a1f1f".into(), bg_popup: "#a52a2a".into(),
        border_normal: "#c08080".into(), border_focused: "#c0c0c0".into(),
        text_primary: "#c0c0c0".into(), text_muted: "#d8a0a0".into(), text_accent: "#f0f0f0".into(),
        day_highlight_bg: "#808000".into(), day_highlight_fg: "#f0f0f0".into(),
        focus_bg: "#c0c0c0".into(), focus_fg: "#a52a2a".into(),
        disabled_fg: "#7a4040".into(),
        border_style: "double".into(),
    }}

    pub fn nord() -> Self { Self {
        name: "nord".into(),
        bg_primary: "#2e3440".into(), bg_secondary: "#3b4252".into(), bg_popup: "#434c5e".into(),
        border_normal: "#4c566a".into(), border_focused: "#88c0d0".into(),
        text_primary: "#eceff4".into(), text_muted: "#4c566a".into(), text_accent: "#88c0d0".into(),
        day_highlight_bg: "#88c0d0".into(), day_highlight_fg: "#2e3440".into(),
        focus_bg: "#81a1c1".into(), focus_fg: "#2e3440".into(),
        disabled_fg: "#616e88".into(),
        border_style: "rounded".into(),
    }}
}

impl Default for ThemeConfig {
    fn default() -> Self { Self {
        name: "catppuccin-mocha".into(),
        bg_primary: "#1e1e2e".into(), bg_secondary: "#181825".into(), bg_popup: "#313244".into(),
        border_normal: "#45475a".into(), border_focused: "#89b4fa".into(),
        text_primary: "#cdd6f4".into(), text_muted: "#6c7086".into(), text_accent: "#89b4fa".into(),
        day_highlight_bg: "#cba6f7".into(), day_highlight_fg: "#1e1e2e".into(),
        focus_bg: "#89b4fa".into(), focus_fg: "#1e1e2e".into(),
        disabled_fg: "#585b70".into(),
        border_style: "rounded".into(),
    }}
}
