//! Configuration types for versed.
//!
//! [`Config::load`] reads `~/.config/versed/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use crate::types::MatchMode;
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[corpus]
path      = "data.csv"
column    = "VERS"
delimiter = "\t"

[search]
default_mode = "AND"

[ui]
show_line_numbers = false
max_column_width  = 24
theme             = "default"

[keybindings]
query_focus = "/"
toggle_mode = "m"
"#;

/// Prefix for environment overrides, e.g. `VERSED__CORPUS__PATH=poems.tsv`.
const ENV_PREFIX: &str = "VERSED";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/versed/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

/// `[corpus]` section: where the verse table lives and how to read it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CorpusConfig {
    #[serde(default = "default_corpus_path")]
    pub path: PathBuf,
    /// Name of the column searched and highlighted.
    #[serde(default = "default_column")]
    pub column: String,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

fn default_corpus_path() -> PathBuf { PathBuf::from("data.csv") }
fn default_column() -> String { "VERS".to_string() }
fn default_delimiter() -> char { '\t' }

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            path: default_corpus_path(),
            column: default_column(),
            delimiter: default_delimiter(),
        }
    }
}

impl CorpusConfig {
    /// A config for `path` with the default column and delimiter.
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

/// `[search]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// `"AND"` or `"OR"`; parsed with [`SearchConfig::mode`].
    #[serde(default = "default_mode")]
    pub default_mode: String,
}

fn default_mode() -> String { "AND".to_string() }

impl Default for SearchConfig {
    fn default() -> Self {
        Self { default_mode: default_mode() }
    }
}

impl SearchConfig {
    /// The configured mode, falling back to AND for unrecognised values.
    pub fn mode(&self) -> MatchMode {
        self.default_mode.parse().unwrap_or_else(|err| {
            tracing::warn!(%err, "invalid search.default_mode, using AND");
            MatchMode::All
        })
    }
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub show_line_numbers: bool,
    /// Width cap for every column except the searched one.
    #[serde(default = "default_max_column_width")]
    pub max_column_width: u16,
    /// Built-in theme name: `default` or `gruvbox`.
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_max_column_width() -> u16 { 24 }
fn default_theme() -> String { "default".to_string() }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_line_numbers: false,
            max_column_width: default_max_column_width(),
            theme: default_theme(),
        }
    }
}

/// `[keybindings]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct KeybindingsConfig {
    #[serde(default = "default_query_focus")]
    pub query_focus: String,
    #[serde(default = "default_toggle_mode")]
    pub toggle_mode: String,
}

fn default_query_focus() -> String { "/".to_string() }
fn default_toggle_mode() -> String { "m".to_string() }

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            query_focus: default_query_focus(),
            toggle_mode: default_toggle_mode(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/versed/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    ///
    /// Precedence, lowest first: built-in defaults, the user config file,
    /// `explicit` (a `--config` file, which must exist), `VERSED__*`
    /// environment variables.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
            tracing::info!(path = %path.display(), "wrote default config");
        }

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_path()).required(false));

        if let Some(explicit) = explicit {
            builder = builder.add_source(config::File::from(explicit).required(true));
        }

        builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        Self::from_toml_str(DEFAULT_CONFIG).expect("built-in default config must be valid TOML")
    }

    /// Parse a config from TOML text, layered on top of the built-in defaults.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from_str(src, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("versed")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load() {
        let cfg = Config::defaults();
        assert_eq!(cfg.corpus.path, PathBuf::from("data.csv"));
        assert_eq!(cfg.corpus.column, "VERS");
        assert_eq!(cfg.corpus.delimiter, '\t');
        assert_eq!(cfg.search.mode(), MatchMode::All);
        assert!(!cfg.ui.show_line_numbers);
        assert_eq!(cfg.ui.theme, "default");
        assert_eq!(cfg.keybindings.query_focus, "/");
    }

    #[test]
    fn user_toml_overrides_defaults() {
        let cfg = Config::from_toml_str(
            r#"
            [corpus]
            path = "poems.tsv"

            [search]
            default_mode = "OR"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.corpus.path, PathBuf::from("poems.tsv"));
        assert_eq!(cfg.corpus.column, "VERS");
        assert_eq!(cfg.search.mode(), MatchMode::Any);
    }

    #[test]
    fn bad_mode_falls_back_to_and() {
        let search = SearchConfig { default_mode: "sometimes".to_string() };
        assert_eq!(search.mode(), MatchMode::All);
    }

    #[test]
    fn explicit_file_is_layered() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("versed.toml");
        std::fs::write(&file, "[corpus]\ncolumn = \"TEXT\"\n").unwrap();
        // Keep the user config inside the temp dir.
        std::env::set_var("XDG_CONFIG_HOME", dir.path());
        let cfg = Config::load(Some(&file)).unwrap();
        assert_eq!(cfg.corpus.column, "TEXT");
        assert!(dir.path().join("versed").join("config.toml").exists());
    }
}
