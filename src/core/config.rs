//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.binsim/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! The log file and level are themselves config values, so loading and
//! resolution run before any logger exists. Their messages go into a
//! [`ConfigLog`] that `main` replays once the logger is installed.

use log::Level;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use crate::core::logic::InputPolicy;
use crate::core::state::{
    DECODER_ADDRESS_BITS, DEFAULT_MAX_WIDTH, ENCODER_ADDRESS_BITS, MUX_SELECT_BITS, View,
};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BinsimConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ripple: RippleConfig,
    #[serde(default)]
    pub mux: MuxConfig,
    #[serde(default)]
    pub demux: DemuxConfig,
    #[serde(default)]
    pub decoder: DecoderConfig,
    #[serde(default)]
    pub encoder: EncoderConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_view: Option<View>,
    pub log_level: Option<String>,
    pub log_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RippleConfig {
    pub default_a: Option<String>,
    pub default_b: Option<String>,
    pub input_policy: Option<InputPolicy>,
    pub max_width: Option<usize>,
}

/// Sizes are line counts: 2, 4, 8 or 16.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MuxConfig {
    pub default_size: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DemuxConfig {
    pub default_size: Option<usize>,
}

/// Number of address inputs: 2, 3 or 4.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DecoderConfig {
    pub default_inputs: Option<usize>,
}

/// Number of one-hot input lines: 4 or 8.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EncoderConfig {
    pub default_inputs: Option<usize>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_OPERAND_A: &str = "1011";
pub const DEFAULT_OPERAND_B: &str = "0110";
pub const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Debug;
pub const DEFAULT_LOG_FILE: &str = "binsim.log";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub view: View,
    pub ripple_a: String,
    pub ripple_b: String,
    pub input_policy: InputPolicy,
    pub max_width: usize,
    pub mux_select_bits: usize,
    pub demux_select_bits: usize,
    pub decoder_address_bits: usize,
    pub encoder_address_bits: usize,
    pub log_level: log::LevelFilter,
    pub log_file: PathBuf,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Deferred Log
// ============================================================================

/// Log records held back until the file logger is up.
#[derive(Debug, Default)]
pub struct ConfigLog {
    entries: Vec<(Level, String)>,
}

impl ConfigLog {
    fn push(&mut self, level: Level, message: String) {
        self.entries.push((level, message));
    }

    fn debug(&mut self, message: String) {
        self.push(Level::Debug, message);
    }

    fn info(&mut self, message: String) {
        self.push(Level::Info, message);
    }

    fn warn(&mut self, message: String) {
        self.push(Level::Warn, message);
    }

    pub fn entries(&self) -> &[(Level, String)] {
        &self.entries
    }

    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(level, _)| *level == Level::Warn)
            .map(|(_, message)| message.as_str())
    }

    /// Emit everything through the installed logger, oldest first.
    pub fn flush(self) {
        for (level, message) in self.entries {
            log::log!(level, "{}", message);
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.binsim/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".binsim").join("config.toml"))
}

/// Load config from `~/.binsim/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `BinsimConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config(notes: &mut ConfigLog) -> Result<BinsimConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            notes.warn("Could not determine home directory, using default config".into());
            return Ok(BinsimConfig::default());
        }
    };

    if !path.exists() {
        notes.info(format!(
            "No config file found, generating default at {}",
            path.display()
        ));
        generate_default_config(&path, notes);
        return Ok(BinsimConfig::default());
    }

    let config = load_config_from(&path)?;
    notes.info(format!("Loaded config from {}", path.display()));
    notes.debug(format!("Config: {:?}", config));
    Ok(config)
}

/// Parse a config file at an explicit path.
pub fn load_config_from(path: &Path) -> Result<BinsimConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&contents).map_err(ConfigError::Parse)
}

const DEFAULT_CONFIG: &str = r#"# BinSim Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_view = "half-adder"   # half-adder, full-adder, ripple-carry, mux,
#                               # demux, decoder, encoder, docs  (env: BINSIM_VIEW)
# log_level = "debug"           # off, error, warn, info, debug, trace  (env: BINSIM_LOG_LEVEL)
# log_file = "binsim.log"

# [ripple]
# default_a = "1011"
# default_b = "0110"
# input_policy = "permissive"   # "permissive" strips non-binary chars,
#                               # "strict" rejects them  (env: BINSIM_INPUT_POLICY)
# max_width = 16

# [mux]
# default_size = 4              # 2, 4, 8 or 16 data inputs

# [demux]
# default_size = 4              # 2, 4, 8 or 16 outputs

# [decoder]
# default_inputs = 2            # 2, 3 or 4 address inputs

# [encoder]
# default_inputs = 4            # 4 or 8 input lines
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path, notes: &mut ConfigLog) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        notes.warn(format!("Failed to create config directory: {}", e));
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG) {
        notes.warn(format!("Failed to write default config: {}", e));
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_view` is `--view` (None = not specified); `cli_strict` is `--strict`.
pub fn resolve(
    config: &BinsimConfig,
    cli_view: Option<View>,
    cli_strict: bool,
    notes: &mut ConfigLog,
) -> ResolvedConfig {
    resolve_with_env(config, cli_view, cli_strict, |key| std::env::var(key).ok(), notes)
}

/// [`resolve`] with the environment lookup supplied by the caller.
pub fn resolve_with_env(
    config: &BinsimConfig,
    cli_view: Option<View>,
    cli_strict: bool,
    env: impl Fn(&str) -> Option<String>,
    notes: &mut ConfigLog,
) -> ResolvedConfig {
    // View: CLI → env → config → default
    let view = cli_view
        .or_else(|| {
            env("BINSIM_VIEW").and_then(|name| {
                let parsed = View::parse(&name);
                if parsed.is_none() {
                    notes.warn(format!("Ignoring unknown BINSIM_VIEW value {:?}", name));
                }
                parsed
            })
        })
        .or(config.general.default_view)
        .unwrap_or_default();

    // Input policy: --strict → env → config → permissive
    let input_policy = if cli_strict {
        InputPolicy::Strict
    } else {
        env("BINSIM_INPUT_POLICY")
            .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
                "strict" => Some(InputPolicy::Strict),
                "permissive" => Some(InputPolicy::Permissive),
                _ => {
                    notes.warn(format!("Ignoring unknown BINSIM_INPUT_POLICY value {:?}", raw));
                    None
                }
            })
            .or(config.ripple.input_policy)
            .unwrap_or_default()
    };

    // Log level: env → config → default
    let log_level = env("BINSIM_LOG_LEVEL")
        .or_else(|| config.general.log_level.clone())
        .and_then(|raw| match raw.trim().parse() {
            Ok(level) => Some(level),
            Err(_) => {
                notes.warn(format!("Ignoring unknown log level {:?}", raw));
                None
            }
        })
        .unwrap_or(DEFAULT_LOG_LEVEL);

    let max_width = match config.ripple.max_width {
        Some(0) => {
            notes.warn(format!(
                "ripple.max_width must be at least 1, using {}",
                DEFAULT_MAX_WIDTH
            ));
            DEFAULT_MAX_WIDTH
        }
        Some(width) => width,
        None => DEFAULT_MAX_WIDTH,
    };

    let mux_select_bits = size_to_bits(
        "mux.default_size",
        config.mux.default_size,
        &MUX_SELECT_BITS,
        notes,
    );
    let demux_select_bits = size_to_bits(
        "demux.default_size",
        config.demux.default_size,
        &MUX_SELECT_BITS,
        notes,
    );
    let decoder_address_bits = clamp_setting(
        "decoder.default_inputs",
        config.decoder.default_inputs.unwrap_or(2),
        &DECODER_ADDRESS_BITS,
        notes,
    );
    let encoder_address_bits = size_to_bits(
        "encoder.default_inputs",
        config.encoder.default_inputs,
        &ENCODER_ADDRESS_BITS,
        notes,
    );

    ResolvedConfig {
        view,
        ripple_a: config
            .ripple
            .default_a
            .clone()
            .unwrap_or_else(|| DEFAULT_OPERAND_A.to_string()),
        ripple_b: config
            .ripple
            .default_b
            .clone()
            .unwrap_or_else(|| DEFAULT_OPERAND_B.to_string()),
        input_policy,
        max_width,
        mux_select_bits,
        demux_select_bits,
        decoder_address_bits,
        encoder_address_bits,
        log_level,
        log_file: PathBuf::from(
            config
                .general
                .log_file
                .as_deref()
                .unwrap_or(DEFAULT_LOG_FILE),
        ),
    }
}

/// Line count (`2^n`) → `n`, rounding up to the next power of two and
/// clamping into `range`. Unset sizes give 4 lines.
fn size_to_bits(
    key: &str,
    size: Option<usize>,
    range: &RangeInclusive<usize>,
    notes: &mut ConfigLog,
) -> usize {
    let Some(size) = size else {
        return 2;
    };
    let bits = size
        .max(1)
        .checked_next_power_of_two()
        .map_or(usize::BITS as usize, |lines| lines.trailing_zeros() as usize);
    let clamped = bits.clamp(*range.start(), *range.end());
    if clamped != bits || !size.is_power_of_two() {
        notes.warn(format!(
            "{} = {} is not supported, using {}",
            key,
            size,
            1usize << clamped
        ));
    }
    clamped
}

fn clamp_setting(
    key: &str,
    value: usize,
    range: &RangeInclusive<usize>,
    notes: &mut ConfigLog,
) -> usize {
    let clamped = value.clamp(*range.start(), *range.end());
    if clamped != value {
        notes.warn(format!("{} out of range ({}), clamped to {}", key, value, clamped));
    }
    clamped
}
