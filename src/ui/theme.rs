use crate::config::ThemeConfig;
use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;
use tracing::warn;

/// Configurable colours shared by every pane, plus fixed widget styles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub text: Color,
    pub font: Modifier,
    pub bg_primary: Color,
    pub bg_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

impl Theme {
    pub const TEXT_MUTED: Color = Color::Rgb(120, 120, 140);
    pub const ACCENT: Color = Color::Rgb(97, 119, 200);
    pub const HP: Color = Color::Rgb(200, 70, 70);
    pub const MP: Color = Color::Rgb(70, 120, 210);

    const BUTTON_TEXT: Color = Color::Rgb(0x44, 0x44, 0x44);
    const BUTTON_BORDER: Color = Color::Rgb(0x61, 0x77, 0xc8);
    const BUTTON_BG: Color = Color::Rgb(0x87, 0x9a, 0xde);

    /// Unparseable entries fall back to the default value and are logged.
    pub fn from_config(cfg: &ThemeConfig) -> Self {
        let fallback = ThemeConfig {
            text: "#e0e0e0".into(),
            font: "normal".into(),
            bg_primary: "#1e1e2e".into(),
            bg_secondary: "#2a2a3c".into(),
        };
        Self {
            text: parse_color("text", &cfg.text, &fallback.text),
            font: parse_font(&cfg.font),
            bg_primary: parse_color("bg_primary", &cfg.bg_primary, &fallback.bg_primary),
            bg_secondary: parse_color("bg_secondary", &cfg.bg_secondary, &fallback.bg_secondary),
        }
    }

    /// Base style for the whole game row.
    pub fn base(&self) -> Style {
        Style::default().fg(self.text).add_modifier(self.font)
    }

    pub fn primary(&self) -> Style {
        self.base().bg(self.bg_primary)
    }

    pub fn secondary(&self) -> Style {
        self.base().bg(self.bg_secondary)
    }

    pub fn border() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn title() -> Style {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    }

    pub fn timestamp() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn echo_line() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn system_message() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn error_message() -> Style {
        Style::default().fg(Color::Red)
    }

    pub fn button() -> Style {
        Style::default().fg(Self::BUTTON_TEXT).bg(Self::BUTTON_BG)
    }

    pub fn button_border() -> Style {
        Style::default().fg(Self::BUTTON_BORDER).bg(Self::BUTTON_BG)
    }

    pub fn button_selected() -> Style {
        Style::default()
            .fg(Color::White)
            .bg(Self::BUTTON_BORDER)
            .add_modifier(Modifier::BOLD)
    }

    pub fn connected() -> Style {
        Style::default().fg(Color::Green)
    }

    pub fn connecting() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn disconnected() -> Style {
        Style::default().fg(Color::Red)
    }

    pub fn input_text() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    }
}

fn parse_color(field: &str, value: &str, fallback: &str) -> Color {
    Color::from_str(value.trim()).unwrap_or_else(|_| {
        warn!("theme.{}: unknown colour {:?}", field, value);
        Color::from_str(fallback).unwrap_or(Color::Reset)
    })
}

fn parse_font(value: &str) -> Modifier {
    value
        .split_whitespace()
        .fold(Modifier::empty(), |acc, word| {
            acc | match word.to_lowercase().as_str() {
                "bold" => Modifier::BOLD,
                "dim" => Modifier::DIM,
                "italic" => Modifier::ITALIC,
                "underlined" | "underline" => Modifier::UNDERLINED,
                "normal" => Modifier::empty(),
                other => {
                    warn!("theme.font: unknown modifier {:?}", other);
                    Modifier::empty()
                }
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_parses_names_and_hex() {
        let theme = Theme::from_config(&ThemeConfig {
            text: "white".into(),
            font: "bold italic".into(),
            bg_primary: "#102030".into(),
            bg_secondary: "blue".into(),
        });
        assert_eq!(theme.text, Color::White);
        assert_eq!(theme.font, Modifier::BOLD | Modifier::ITALIC);
        assert_eq!(theme.bg_primary, Color::Rgb(0x10, 0x20, 0x30));
        assert_eq!(theme.bg_secondary, Color::Blue);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let theme = Theme::from_config(&ThemeConfig {
            text: "not-a-colour".into(),
            font: "sparkly".into(),
            bg_primary: "#1e1e2e".into(),
            bg_secondary: "#2a2a3c".into(),
        });
        assert_eq!(theme.text, Color::Rgb(0xe0, 0xe0, 0xe0));
        assert_eq!(theme.font, Modifier::empty());
    }

    #[test]
    fn test_panel_styles_carry_text_and_font() {
        let theme = Theme::default();
        assert_eq!(theme.primary().bg, Some(theme.bg_primary));
        assert_eq!(theme.secondary().bg, Some(theme.bg_secondary));
        assert_eq!(theme.secondary().fg, Some(theme.text));
    }
}
