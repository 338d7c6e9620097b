//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML persistence.
//! Every field has a sensible default so the client works out of the box.

use serde::{Deserialize, Serialize};

use super::guest::generate_guest_name;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// The game server to play on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Character name sent with `@login`.
    #[serde(default = "generate_guest_name")]
    pub character: String,
    #[serde(default = "default_true")]
    pub auto_connect: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            character: generate_guest_name(),
            auto_connect: true,
        }
    }
}

/// Layout and scrollback settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Fixed width of the middle pane, in columns.
    #[serde(default = "default_middle_width")]
    pub middle_width: u16,
    #[serde(default = "default_max_scrollback")]
    pub max_scrollback: usize,
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
    #[serde(default)]
    pub show_timestamps: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            middle_width: default_middle_width(),
            max_scrollback: default_max_scrollback(),
            timestamp_format: default_timestamp_format(),
            show_timestamps: false,
        }
    }
}

/// Colours accept ratatui colour names (`"gray"`, `"lightblue"`) or
/// `#rrggbb`. `font` is a space separated list of text modifiers
/// (`"bold italic"`); `"normal"` means none.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    #[serde(default = "default_text")]
    pub text: String,
    #[serde(default = "default_font")]
    pub font: String,
    #[serde(default = "default_bg_primary")]
    pub bg_primary: String,
    #[serde(default = "default_bg_secondary")]
    pub bg_secondary: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            text: default_text(),
            font: default_font(),
            bg_primary: default_bg_primary(),
            bg_secondary: default_bg_secondary(),
        }
    }
}

/// Diagnostics and transcript settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default `tracing` filter when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,
    /// Diagnostics file. Nothing is written when unset.
    #[serde(default)]
    pub log_file: Option<String>,
    /// Write game output to daily transcript files.
    #[serde(default)]
    pub transcript: bool,
    #[serde(default = "default_transcript_dir")]
    pub transcript_dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            log_file: None,
            transcript: false,
            transcript_dir: default_transcript_dir(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    4000
}
fn default_true() -> bool {
    true
}
fn default_middle_width() -> u16 {
    80
}
fn default_max_scrollback() -> usize {
    5000
}
fn default_timestamp_format() -> String {
    "%H:%M".to_string()
}
fn default_text() -> String {
    "#e0e0e0".to_string()
}
fn default_font() -> String {
    "normal".to_string()
}
fn default_bg_primary() -> String {
    "#1e1e2e".to_string()
}
fn default_bg_secondary() -> String {
    "#2a2a3c".to_string()
}
fn default_level() -> String {
    "info".to_string()
}
fn default_transcript_dir() -> String {
    "~/.local/share/playhud/transcripts".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            host = "mud.example.org"

            [theme]
            font = "bold"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.host, "mud.example.org");
        assert_eq!(cfg.server.port, 4000);
        assert!(cfg.server.auto_connect);
        assert!(!cfg.server.character.is_empty());
        assert_eq!(cfg.theme.font, "bold");
        assert_eq!(cfg.theme.bg_primary, "#1e1e2e");
        assert_eq!(cfg.ui.middle_width, 80);
        assert!(!cfg.logging.transcript);
    }

    #[test]
    fn test_empty_config_parses() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.ui.max_scrollback, 5000);
        assert_eq!(cfg.logging.level, "info");
        assert!(cfg.logging.log_file.is_none());
    }
}
