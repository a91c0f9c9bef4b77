//! Helpers for gotry.
//!
//! - Color parsing from names, hex codes or 256-colour indices
//! - Locating the home directory and expanding or shortening `~` in paths

use ratatui::style::Color;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Parses a string (color name, hex or index) into a ratatui::style::Color
///
/// Supports standard names (red, green, etc.), hex values (#RRGGBB or #RGB) and
/// 256-colour palette indices ("212"). Anything else falls back to [Color::Reset].
pub fn parse_color(s: &str) -> Color {
    match s.to_lowercase().as_str() {
        "default" | "reset" => Color::Reset,
        "yellow" => Color::Yellow,
        "red" => Color::Red,
        "blue" => Color::Blue,
        "green" => Color::Green,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "black" => Color::Black,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        other => {
            if let Ok(idx) = other.parse::<u8>() {
                return Color::Indexed(idx);
            }
            if let Some(hex) = other.strip_prefix('#') {
                let expanded = match hex.len() {
                    6 => hex.to_string(),
                    3 => hex.chars().flat_map(|c| [c, c]).collect(),
                    _ => return Color::Reset,
                };
                if let Ok(rgb) = u32::from_str_radix(&expanded, 16) {
                    return Color::Rgb(
                        ((rgb >> 16) & 0xFF) as u8,
                        ((rgb >> 8) & 0xFF) as u8,
                        (rgb & 0xFF) as u8,
                    );
                }
            }
            // fallback
            Color::Reset
        }
    }
}

#[inline]
pub fn get_home() -> Option<PathBuf> {
    dirs::home_dir()
}

/// Expands a leading `~` or `~/` to the home directory.
/// Paths without one, or without a known home, are returned unchanged.
pub fn expand_home_path(raw: &str) -> PathBuf {
    let rest = if raw == "~" {
        Some("")
    } else {
        raw.strip_prefix("~/")
            .or_else(|| raw.strip_prefix(&format!("~{MAIN_SEPARATOR}")))
    };

    match (rest, get_home()) {
        (Some(rest), Some(home)) if rest.is_empty() => home,
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(raw),
    }
}

/// Util function to shorten home directory to ~.
pub fn shorten_home_path<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    if let Some(home_dir) = get_home()
        && let Ok(stripped) = path.strip_prefix(&home_dir)
    {
        if stripped.as_os_str().is_empty() {
            return "~".to_string();
        }
        let mut short = stripped.display().to_string();
        if short.starts_with(MAIN_SEPARATOR) {
            short.remove(0);
        }
        return format!("~{}{}", MAIN_SEPARATOR, short);
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_colour_notations() {
        assert_eq!(parse_color("Cyan"), Color::Cyan);
        assert_eq!(parse_color("default"), Color::Reset);
        assert_eq!(parse_color("212"), Color::Indexed(212));
        assert_eq!(parse_color("#ff8000"), Color::Rgb(255, 128, 0));
        assert_eq!(parse_color("#f80"), Color::Rgb(255, 136, 0));
        assert_eq!(parse_color("#12345"), Color::Reset);
        assert_eq!(parse_color("not-a-colour"), Color::Reset);
    }

    #[test]
    fn expands_and_shortens_home() {
        let Some(home) = get_home() else {
            return;
        };
        assert_eq!(expand_home_path("~"), home);
        assert_eq!(expand_home_path("~/tries"), home.join("tries"));
        assert_eq!(expand_home_path("/abs/tries"), PathBuf::from("/abs/tries"));
        assert_eq!(expand_home_path("~other/x"), PathBuf::from("~other/x"));

        assert_eq!(shorten_home_path(&home), "~");
        assert_eq!(
            shorten_home_path(home.join("tries")),
            format!("~{}tries", MAIN_SEPARATOR)
        );
    }
}
