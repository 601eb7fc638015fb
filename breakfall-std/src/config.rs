//! Instrumentation settings.
//!
//! Decide which handling units an interception point reports incidents for.
//! The registry never looks at these settings; they only gate the
//! [`Supervisor`](crate::supervisor::Supervisor) and the tower layer.
//!
//! ## Sources
//! - Code: build an [`Instrumentation`] directly.
//! - Environment: [`BreakfallConfig::from_env`]
//!   - `BREAKFALL_ENABLED`: `true`/`false` (default `true`)
//!   - `BREAKFALL_UNITS`: comma separated unit names, `*` for all units
//!     (default all; an empty value counts as unset)
//! - TOML (feature `config`): [`BreakfallConfig::from_toml_str`] and
//!   [`BreakfallConfig::from_file`]. Keys may sit at the top level or under
//!   a `[breakfall]` table:
//!
//! ```toml
//! [breakfall]
//! enabled = true
//! units = ["UsersController", "OrdersController"]
//! ```
//!
//! Unlike a list-only setup, where nothing is instrumented until units are
//! named, the default here is every unit. An absent or empty unit list means
//! all units; turn instrumentation off with `enabled = false`.

use breakfall_core::{ConfigError, HandlerId};
use std::collections::HashSet;

/// Environment variable toggling instrumentation.
pub const ENV_ENABLED: &str = "BREAKFALL_ENABLED";
/// Environment variable listing instrumented units.
pub const ENV_UNITS: &str = "BREAKFALL_UNITS";

const ALL_UNITS: &str = "*";

/// Which handling units are instrumented.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Instrumentation {
    /// Every unit.
    #[default]
    All,
    /// Only the listed units.
    Only(HashSet<HandlerId>),
    /// No unit; interception points pass errors through silently.
    Disabled,
}

impl Instrumentation {
    /// Instrument only the given units.
    pub fn only<I, T>(units: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<HandlerId>,
    {
        Self::Only(units.into_iter().map(Into::into).collect())
    }

    /// Whether incidents from `handler_id` should be dispatched.
    pub fn covers(&self, handler_id: &str) -> bool {
        match self {
            Instrumentation::All => true,
            Instrumentation::Only(units) => units.contains(handler_id),
            Instrumentation::Disabled => false,
        }
    }

    fn from_parts(enabled: bool, units: Option<Vec<String>>) -> Self {
        if !enabled {
            return Instrumentation::Disabled;
        }
        match units {
            None => Instrumentation::All,
            Some(units) if units.is_empty() || units.iter().any(|u| u == ALL_UNITS) => {
                Instrumentation::All
            }
            Some(units) => Self::only(units),
        }
    }
}

/// Settings for interception points.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreakfallConfig {
    /// Units to report incidents for.
    pub instrumentation: Instrumentation,
}

impl BreakfallConfig {
    /// Load settings from `BREAKFALL_ENABLED` and `BREAKFALL_UNITS`.
    ///
    /// # Errors
    /// Returns [`ConfigError::Env`] if `BREAKFALL_ENABLED` is not a boolean.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let enabled = match lookup(ENV_ENABLED) {
            None => true,
            Some(raw) => parse_bool(&raw).ok_or_else(|| ConfigError::Env {
                var: ENV_ENABLED,
                reason: format!("expected true or false, got `{raw}`"),
            })?,
        };

        let units = lookup(ENV_UNITS).map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .map(String::from)
                .collect::<Vec<_>>()
        });

        let instrumentation = Instrumentation::from_parts(enabled, units);
        tracing::debug!(?instrumentation, "Instrumentation loaded from environment");
        Ok(Self { instrumentation })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(feature = "config")]
mod file {
    use super::{BreakfallConfig, Instrumentation};
    use breakfall_core::ConfigError;
    use serde::Deserialize;
    use std::path::Path;

    #[derive(Debug, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct RawConfig {
        #[serde(default = "enabled_by_default")]
        enabled: bool,
        #[serde(default)]
        units: Option<Vec<String>>,
    }

    fn enabled_by_default() -> bool {
        true
    }

    impl BreakfallConfig {
        /// Parse settings from TOML text.
        ///
        /// # Errors
        /// Returns [`ConfigError::Parse`] if the text is not valid TOML or
        /// holds unknown keys, including keys beside a `[breakfall]` table.
        pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
            let mut table: toml::Table = contents
                .parse()
                .map_err(|e: toml::de::Error| ConfigError::Parse(e.to_string()))?;

            let section = match table.remove("breakfall") {
                Some(toml::Value::Table(section)) if table.is_empty() => section,
                Some(toml::Value::Table(_)) => {
                    let stray: Vec<_> = table.keys().map(String::as_str).collect();
                    return Err(ConfigError::Parse(format!(
                        "unknown keys outside `[breakfall]`: {}",
                        stray.join(", ")
                    )));
                }
                Some(_) => {
                    return Err(ConfigError::Parse(
                        "`breakfall` must be a table".to_string(),
                    ));
                }
                None => table,
            };

            let raw: RawConfig = toml::Value::Table(section)
                .try_into()
                .map_err(|e: toml::de::Error| ConfigError::Parse(e.to_string()))?;

            Ok(Self {
                instrumentation: Instrumentation::from_parts(raw.enabled, raw.units),
            })
        }

        /// Read and parse a TOML settings file.
        ///
        /// # Errors
        /// Returns [`ConfigError::Io`] if the file cannot be read, or
        /// [`ConfigError::Parse`] if its contents are invalid.
        pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
            let path = path.as_ref();
            tracing::info!(path = %path.display(), "Loading breakfall settings from file");
            let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            Self::from_toml_str(&contents)
        }
    }
}
