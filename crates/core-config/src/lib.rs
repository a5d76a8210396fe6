//! Configuration loading and parsing.
//!
//! Parses `bric.toml` (or an override path provided by the binary). Every
//! field has a default, so a missing file, a missing section or a parse
//! error all yield a usable [`Config`]. Unknown fields are ignored.
//!
//! ```toml
//! [editor]
//! tab_width = 4
//! line_numbers = true
//! indent = "tabs"          # or "spaces"
//! quit_times = 3
//! message_timeout_secs = 5
//!
//! [input]
//! escape_timeout_ms = 100
//!
//! [colours]                # SGR foreground codes
//! keyword_return = 91
//! ```

use anyhow::Result;
use core_syntax::Highlight;
use serde::Deserialize;
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "bric.toml";
pub const MAX_TAB_WIDTH: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Indent {
    #[default]
    Tabs,
    Spaces,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    #[serde(default = "EditorConfig::default_tab_width")]
    pub tab_width: usize,
    #[serde(default = "EditorConfig::default_line_numbers")]
    pub line_numbers: bool,
    #[serde(default)]
    pub indent: Indent,
    #[serde(default = "EditorConfig::default_quit_times")]
    pub quit_times: u32,
    #[serde(default = "EditorConfig::default_message_timeout_secs")]
    pub message_timeout_secs: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_width: Self::default_tab_width(),
            line_numbers: Self::default_line_numbers(),
            indent: Indent::default(),
            quit_times: Self::default_quit_times(),
            message_timeout_secs: Self::default_message_timeout_secs(),
        }
    }
}

impl EditorConfig {
    const fn default_tab_width() -> usize {
        4
    }
    const fn default_line_numbers() -> bool {
        true
    }
    const fn default_quit_times() -> u32 {
        3
    }
    const fn default_message_timeout_secs() -> u64 {
        5
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct InputConfig {
    #[serde(default = "InputConfig::default_escape_timeout_ms")]
    pub escape_timeout_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            escape_timeout_ms: Self::default_escape_timeout_ms(),
        }
    }
}

impl InputConfig {
    const fn default_escape_timeout_ms() -> u64 {
        100
    }
}

/// SGR codes per highlight class. `default` is the foreground reset used for
/// `Normal` text, `background` the background applied to the text area.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ColourConfig {
    pub comment: u8,
    pub block_comment: u8,
    pub keyword_cond: u8,
    pub keyword_type: u8,
    pub keyword_pp: u8,
    pub keyword_return: u8,
    pub keyword_adapter: u8,
    pub keyword_loop: u8,
    pub string: u8,
    pub number: u8,
    #[serde(rename = "match")]
    pub match_: u8,
    pub default: u8,
    pub background: u8,
}

impl Default for ColourConfig {
    fn default() -> Self {
        Self {
            comment: 36,
            block_comment: 36,
            keyword_cond: 33,
            keyword_type: 32,
            keyword_pp: 35,
            keyword_return: 91,
            keyword_adapter: 96,
            keyword_loop: 93,
            string: 35,
            number: 31,
            match_: 34,
            default: 39,
            background: 49,
        }
    }
}

impl ColourConfig {
    /// Foreground SGR code for a highlight class.
    pub fn sgr(&self, hl: Highlight) -> u8 {
        match hl {
            Highlight::Normal => self.default,
            Highlight::Comment => self.comment,
            Highlight::BlockComment => self.block_comment,
            Highlight::KeywordCond => self.keyword_cond,
            Highlight::KeywordType => self.keyword_type,
            Highlight::KeywordPreprocessor => self.keyword_pp,
            Highlight::KeywordReturn => self.keyword_return,
            Highlight::KeywordAdapter => self.keyword_adapter,
            Highlight::KeywordLoop => self.keyword_loop,
            Highlight::String => self.string,
            Highlight::Number => self.number,
            Highlight::Match => self.match_,
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub colours: ColourConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
    pub source: Option<PathBuf>,
}

/// Best-effort config path: `./bric.toml` first, then the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("bric").join(CONFIG_FILE_NAME);
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            let mut cfg = Config {
                raw: Some(content),
                file,
                source: Some(path),
            };
            cfg.normalize();
            info!(target: "config", path = %cfg.source_display(), "config_loaded");
            Ok(cfg)
        }
        Err(e) => {
            warn!(
                target: "config",
                path = %path.display(),
                error = %e,
                "config_parse_failed_using_defaults"
            );
            Ok(Config::default())
        }
    }
}

impl Config {
    pub fn escape_timeout(&self) -> Duration {
        Duration::from_millis(self.file.input.escape_timeout_ms)
    }

    pub fn message_timeout(&self) -> Duration {
        Duration::from_secs(self.file.editor.message_timeout_secs)
    }

    fn source_display(&self) -> String {
        self.source
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default()
    }

    /// Clamp out-of-range values to something the editor can work with.
    fn normalize(&mut self) {
        let raw = self.file.editor.tab_width;
        let clamped = raw.clamp(1, MAX_TAB_WIDTH);
        if clamped != raw {
            info!(target: "config", raw, clamped, "tab_width_clamped");
            self.file.editor.tab_width = clamped;
        }
    }
}
