//! Theme configuration options for gotry
//!
//! This module defines the `[theme]` section of `config.toml`. The resolved [Theme] is a plain
//! value handed to the renderer by reference; nothing about styling is global.

use crate::utils::parse_color;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

use std::sync::LazyLock;

const PINK: Color = Color::Indexed(212);
const GRAY: Color = Color::Indexed(241);
const BRIGHT: Color = Color::Indexed(255);
const RED: Color = Color::Indexed(196);

/// Theme configuration options
/// # Examples
/// ```toml
/// [theme]
/// cursor_icon = ">"
/// [theme.selection]
/// fg = "#ff79c6"
/// [theme.dim]
/// fg = "darkgray"
/// ```
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Theme {
    title: ColorPair,
    prompt: ColorPair,
    input: ColorPair,
    selection: ColorPair,
    entry: ColorPair,
    dim: ColorPair,
    danger: ColorPair,
    hint_key: ColorPair,
    hint_desc: ColorPair,
    cursor_icon: String,
    dir_icon: String,
    marked_icon: String,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            title: ColorPair::fg(PINK),
            prompt: ColorPair::fg(GRAY),
            input: ColorPair::fg(BRIGHT),
            selection: ColorPair::fg(PINK),
            entry: ColorPair::fg(BRIGHT),
            dim: ColorPair::fg(GRAY),
            danger: ColorPair::fg(RED),
            hint_key: ColorPair::fg(PINK),
            hint_desc: ColorPair::fg(GRAY),
            cursor_icon: "→".into(),
            dir_icon: "📁".into(),
            marked_icon: "🗑️".into(),
        }
    }
}

impl Theme {
    /// Internal default theme, used as the fallback whenever a configured colour is `default`.
    pub fn internal_defaults() -> &'static Self {
        static DEFAULT: LazyLock<Theme> = LazyLock::new(Theme::default);
        &DEFAULT
    }

    // _style methods resolve against the internal defaults

    pub fn title_style(&self) -> Style {
        self.title
            .style_or(&Theme::internal_defaults().title)
            .add_modifier(Modifier::BOLD)
    }

    pub fn prompt_style(&self) -> Style {
        self.prompt.style_or(&Theme::internal_defaults().prompt)
    }

    pub fn input_style(&self) -> Style {
        self.input.style_or(&Theme::internal_defaults().input)
    }

    pub fn selection_style(&self) -> Style {
        self.selection
            .style_or(&Theme::internal_defaults().selection)
            .add_modifier(Modifier::BOLD)
    }

    pub fn entry_style(&self) -> Style {
        self.entry.style_or(&Theme::internal_defaults().entry)
    }

    pub fn dim_style(&self) -> Style {
        self.dim.style_or(&Theme::internal_defaults().dim)
    }

    pub fn danger_style(&self) -> Style {
        self.danger.style_or(&Theme::internal_defaults().danger)
    }

    /// Name of an entry staged for deletion.
    pub fn marked_style(&self) -> Style {
        self.danger_style().add_modifier(Modifier::CROSSED_OUT)
    }

    pub fn hint_key_style(&self) -> Style {
        self.hint_key.style_or(&Theme::internal_defaults().hint_key)
    }

    pub fn hint_desc_style(&self) -> Style {
        self.hint_desc
            .style_or(&Theme::internal_defaults().hint_desc)
    }

    pub fn cursor_icon(&self) -> &str {
        &self.cursor_icon
    }

    pub fn dir_icon(&self) -> &str {
        &self.dir_icon
    }

    pub fn marked_icon(&self) -> &str {
        &self.marked_icon
    }
}

/// Foreground and background colour of one UI element.
///
/// Colours are names (`"cyan"`), hex codes (`"#RRGGBB"`, `"#RGB"`), 256-colour indices (`"212"`)
/// or `"default"`.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorPair {
    #[serde(default, deserialize_with = "deserialize_color_field")]
    fg: Color,
    #[serde(default, deserialize_with = "deserialize_color_field")]
    bg: Color,
}

impl ColorPair {
    pub const fn fg(fg: Color) -> Self {
        Self {
            fg,
            bg: Color::Reset,
        }
    }

    /// Resolves the ColorPair by replacing Reset colors with those from another ColorPair.
    pub fn resolve(&self, other: &ColorPair) -> Self {
        let pick = |mine: Color, theirs: Color| if mine == Color::Reset { theirs } else { mine };
        Self {
            fg: pick(self.fg, other.fg),
            bg: pick(self.bg, other.bg),
        }
    }

    /// Converts the ColorPair to a Style, falling back to the provided fallback ColorPair for Reset colors.
    pub fn style_or(&self, fallback: &ColorPair) -> Style {
        let resolved = self.resolve(fallback);
        Style::default().fg(resolved.fg).bg(resolved.bg)
    }
}

fn deserialize_color_field<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(parse_color(&s))
}
