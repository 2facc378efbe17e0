// Copyright (c) The pspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Config file loading and resolution.

use super::symbols::{GlyphMode, GlyphProfile, ProfileSymbols, SymbolConfig, SymbolOverrides};
use crate::{
    errors::{ConfigParseError, ConfigParseErrorKind},
    input::InputFormat,
};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use std::{collections::BTreeSet, io};
use tracing::{debug, warn};

/// Special value for `--config-file` and `PSPEC_CONFIG_FILE` that skips config
/// loading entirely.
pub const CONFIG_NONE: &str = "none";

/// Config file names searched for in the working directory, in order.
pub const CONFIG_FILE_CANDIDATES: [&str; 2] = ["pspec.toml", ".config/pspec.toml"];

/// Specifies where to load configuration from.
#[derive(Clone, Copy, Debug)]
pub enum ConfigLocation<'a> {
    /// Discover the config file in the working directory.
    Default,

    /// Skip config loading entirely, using only built-in defaults.
    Isolated,

    /// Load config from an explicit path.
    ///
    /// Returns an error if the file does not exist.
    Explicit(&'a Utf8Path),
}

impl<'a> ConfigLocation<'a> {
    /// Creates a config location from a CLI or environment variable value.
    ///
    /// Returns `Default` if `None`, `Isolated` if `"none"`, otherwise
    /// `Explicit` with the path.
    pub fn from_cli_or_env(s: Option<&'a str>) -> Self {
        match s {
            None => Self::Default,
            Some(s) if s == CONFIG_NONE => Self::Isolated,
            Some(s) => Self::Explicit(Utf8Path::new(s)),
        }
    }
}

/// Settings passed in on the command line or through the environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct CliSettings {
    /// Forces the plaintext glyph profile.
    pub plaintext: bool,

    /// The dialect of the event stream, which determines the default module
    /// suffix.
    pub input_format: InputFormat,
}

/// The contents of a pspec config file, before defaults are applied.
#[derive(Clone, Debug, Default)]
pub struct PspecConfig {
    config_file: Option<Utf8PathBuf>,
    pspec: DeserializedPspecSection,
}

impl PspecConfig {
    /// Loads the config file from `location`, relative to `cwd`.
    ///
    /// A missing config file in the default location is not an error.
    pub fn from_location(
        location: ConfigLocation<'_>,
        cwd: &Utf8Path,
    ) -> Result<Self, ConfigParseError> {
        Self::from_location_with_warnings(location, cwd, &mut DefaultConfigWarnings)
    }

    fn from_location_with_warnings(
        location: ConfigLocation<'_>,
        cwd: &Utf8Path,
        warnings: &mut impl ConfigWarnings,
    ) -> Result<Self, ConfigParseError> {
        match location {
            ConfigLocation::Isolated => {
                debug!("config: skipping (isolated)");
                Ok(Self::default())
            }
            ConfigLocation::Explicit(path) => {
                let path = cwd.join(path);
                debug!("config: loading from explicit path {path}");
                match Self::from_path_with_warnings(&path, warnings)? {
                    Some(config) => Ok(config),
                    None => Err(ConfigParseError::new(path, ConfigParseErrorKind::NotFound)),
                }
            }
            ConfigLocation::Default => {
                for candidate in CONFIG_FILE_CANDIDATES {
                    if let Some(config) =
                        Self::from_path_with_warnings(&cwd.join(candidate), warnings)?
                    {
                        return Ok(config);
                    }
                }
                debug!("config: no config file found in {cwd}");
                Ok(Self::default())
            }
        }
    }

    /// Returns `Ok(None)` if the file does not exist.
    fn from_path_with_warnings(
        path: &Utf8Path,
        warnings: &mut impl ConfigWarnings,
    ) -> Result<Option<Self>, ConfigParseError> {
        debug!("config: attempting to load from {path}");
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                debug!("config: file does not exist at {path}");
                return Ok(None);
            }
            Err(error) => {
                return Err(ConfigParseError::new(
                    path,
                    ConfigParseErrorKind::Read(error),
                ));
            }
        };

        let (config, unknown) = DeserializedConfig::deserialize_toml(&contents)
            .map_err(|error| ConfigParseError::new(path, ConfigParseErrorKind::Parse(error)))?;

        if !unknown.is_empty() {
            warnings.unknown_config_keys(path, &unknown);
        }

        debug!("config: loaded successfully from {path}");
        Ok(Some(Self {
            config_file: Some(path.to_owned()),
            pspec: config.pspec,
        }))
    }

    /// Returns the path the config was loaded from, if any.
    pub fn config_file(&self) -> Option<&Utf8Path> {
        self.config_file.as_deref()
    }

    /// Applies CLI settings and built-in defaults.
    pub fn resolve(&self, cli: CliSettings) -> ReportConfig {
        let defaults = DefaultConfig::from_embedded();
        let pspec = &self.pspec;

        let plaintext = cli.plaintext || pspec.plaintext.unwrap_or(defaults.pspec.plaintext);
        let profile = if plaintext {
            GlyphProfile::Plaintext
        } else {
            GlyphProfile::Unicode
        };

        let symbols = SymbolConfig::new(defaults.profile(profile).clone())
            .with_shared(SymbolOverrides {
                passed: symbol_value("passed", pspec.passed.as_ref()),
                failed: symbol_value("failed", pspec.failed.as_ref()),
                skipped: symbol_value("skipped", pspec.skipped.as_ref()),
            })
            .with_mode_overrides(
                GlyphMode::Compact,
                SymbolOverrides {
                    passed: symbol_value("short-passed", pspec.short_passed.as_ref()),
                    failed: symbol_value("short-failed", pspec.short_failed.as_ref()),
                    skipped: symbol_value("short-skipped", pspec.short_skipped.as_ref()),
                },
            )
            .with_mode_overrides(
                GlyphMode::Expanded,
                SymbolOverrides {
                    passed: symbol_value("verbose-passed", pspec.verbose_passed.as_ref()),
                    failed: symbol_value("verbose-failed", pspec.verbose_failed.as_ref()),
                    skipped: symbol_value("verbose-skipped", pspec.verbose_skipped.as_ref()),
                },
            );

        let module_suffix = match (&pspec.module_suffix, cli.input_format) {
            (Some(suffix), _) => suffix.clone(),
            (None, InputFormat::Pspec) => defaults.pspec.module_suffix,
            (None, InputFormat::Libtest) => String::new(),
        };

        ReportConfig {
            symbols,
            module_suffix,
            indent_width: pspec.indent_width.unwrap_or(defaults.pspec.indent_width),
            strip_prefixes: pspec
                .strip_prefixes
                .clone()
                .unwrap_or(defaults.pspec.strip_prefixes),
        }
    }
}

/// Configuration for a report, after CLI settings and defaults have been
/// applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportConfig {
    /// The outcome glyphs.
    pub symbols: SymbolConfig,

    /// Appended to module names that don't have an extension.
    pub module_suffix: String,

    /// The number of spaces per indent level in expanded mode.
    pub indent_width: usize,

    /// Prefixes stripped from leaf names to form fallback descriptions.
    pub strip_prefixes: Vec<String>,
}

impl ReportConfig {
    /// Returns the configuration used when no config file is present.
    pub fn builtin(cli: CliSettings) -> Self {
        PspecConfig::default().resolve(cli)
    }
}

// Symbols are read as raw values so that a wrongly-typed entry only loses that
// one slot.
fn symbol_value(key: &str, value: Option<&toml::Value>) -> Option<String> {
    match value {
        None => None,
        Some(toml::Value::String(s)) => Some(s.clone()),
        Some(other) => {
            debug!(
                "config: ignoring non-string value for `{key}` ({}), using default",
                other.type_str()
            );
            None
        }
    }
}

trait ConfigWarnings {
    fn unknown_config_keys(&mut self, config_file: &Utf8Path, unknown: &BTreeSet<String>);
}

struct DefaultConfigWarnings;

impl ConfigWarnings for DefaultConfigWarnings {
    fn unknown_config_keys(&mut self, config_file: &Utf8Path, unknown: &BTreeSet<String>) {
        let mut unknown_str = String::new();
        match unknown.first() {
            Some(key) if unknown.len() == 1 => {
                // Print this on the same line.
                unknown_str.push_str("key: ");
                unknown_str.push_str(key);
            }
            _ => {
                unknown_str.push_str("keys:\n");
                for ignored_key in unknown {
                    unknown_str.push('\n');
                    unknown_str.push_str("  - ");
                    unknown_str.push_str(ignored_key);
                }
            }
        }

        warn!("in config file {config_file}, ignoring unknown configuration {unknown_str}");
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct DeserializedConfig {
    #[serde(default)]
    pspec: DeserializedPspecSection,
}

impl DeserializedConfig {
    fn deserialize_toml(contents: &str) -> Result<(Self, BTreeSet<String>), toml::de::Error> {
        let deserializer = toml::Deserializer::parse(contents)?;
        let mut unknown = BTreeSet::new();
        let config: DeserializedConfig = serde_ignored::deserialize(deserializer, |path| {
            unknown.insert(path.to_string());
        })?;
        Ok((config, unknown))
    }
}

/// The `[pspec]` table of a config file.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct DeserializedPspecSection {
    #[serde(default)]
    passed: Option<toml::Value>,
    #[serde(default)]
    failed: Option<toml::Value>,
    #[serde(default)]
    skipped: Option<toml::Value>,
    #[serde(default)]
    short_passed: Option<toml::Value>,
    #[serde(default)]
    short_failed: Option<toml::Value>,
    #[serde(default)]
    short_skipped: Option<toml::Value>,
    #[serde(default)]
    verbose_passed: Option<toml::Value>,
    #[serde(default)]
    verbose_failed: Option<toml::Value>,
    #[serde(default)]
    verbose_skipped: Option<toml::Value>,

    #[serde(default)]
    plaintext: Option<bool>,
    #[serde(default)]
    module_suffix: Option<String>,
    #[serde(default)]
    indent_width: Option<usize>,
    #[serde(default)]
    strip_prefixes: Option<Vec<String>>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct DefaultProfiles {
    unicode: ProfileSymbols,
    plaintext: ProfileSymbols,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct DefaultPspecSection {
    plaintext: bool,
    module_suffix: String,
    indent_width: usize,
    strip_prefixes: Vec<String>,
}

/// The default configuration, parsed from the embedded TOML.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct DefaultConfig {
    profiles: DefaultProfiles,
    pspec: DefaultPspecSection,
}

impl DefaultConfig {
    const DEFAULT_CONFIG: &'static str = include_str!("../../default-config.toml");

    /// Panics if the embedded TOML is invalid or contains unknown keys.
    fn from_embedded() -> Self {
        let deserializer = toml::Deserializer::parse(Self::DEFAULT_CONFIG)
            .expect("embedded default config should parse");
        let mut unknown = BTreeSet::new();
        let config: DefaultConfig =
            serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
                unknown.insert(path.to_string());
            })
            .expect("embedded default config should be valid");

        // The default config is shipped with this binary, so unknown keys are
        // always a bug.
        if !unknown.is_empty() {
            panic!(
                "found unknown keys in default config: {}",
                unknown.into_iter().collect::<Vec<_>>().join(", ")
            );
        }

        config
    }

    fn profile(&self, profile: GlyphProfile) -> &ProfileSymbols {
        match profile {
            GlyphProfile::Unicode => &self.profiles.unicode,
            GlyphProfile::Plaintext => &self.profiles.plaintext,
        }
    }
}
