//! Configuration for the `vcounsel` CLI

use crate::engine::{CreditPolicy, GradeScale, ThresholdPreset};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Placeholder expanded to the config directory in path values
const DIR_VARIABLE: &str = "$VIRTUAL_COUNSELOR";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Grading tables used by the calculators
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GradingConfig {
    /// Grade-point scale (`standard` or `no-d-minus`)
    #[serde(default)]
    pub scale: String,
    /// Percentage threshold preset (`standard` or `inline`)
    #[serde(default)]
    pub thresholds: String,
}

/// Credit increments for sizing a degree
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreditsConfig {
    /// Credits for the primary degree
    #[serde(default)]
    pub base: f32,
    /// Extra credits per additional major
    #[serde(default)]
    pub additional_major: f32,
    /// Extra credits per minor
    #[serde(default)]
    pub minor: f32,
    /// Extra credits per certificate
    #[serde(default)]
    pub certificate: f32,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory of the file-backed plan store
    #[serde(default)]
    pub data_dir: String,
    /// Directory for report output files
    #[serde(default)]
    pub reports_dir: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Grading settings
    #[serde(default)]
    pub grading: GradingConfig,
    /// Credit policy settings
    #[serde(default)]
    pub credits: CreditsConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override grade-point scale
    pub scale: Option<String>,
    /// Override threshold preset
    pub thresholds: Option<String>,
    /// Override plan store directory
    pub data_dir: Option<String>,
    /// Override reports output directory
    pub reports_dir: Option<String>,
}

fn fill_str(target: &mut String, default: &str) -> bool {
    if target.is_empty() && !default.is_empty() {
        default.clone_into(target);
        return true;
    }
    false
}

fn fill_num(target: &mut f32, default: f32) -> bool {
    if *target <= 0.0 && default > 0.0 {
        *target = default;
        return true;
    }
    false
}

fn parse_credits(key: &str, value: &str) -> Result<f32, String> {
    value
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
        .ok_or_else(|| format!("Invalid credit value for '{key}': '{value}' (must be positive)"))
}

impl Config {
    /// Get the `$VIRTUAL_COUNSELOR` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/virtual-counselor`
    /// - macOS: `~/Library/Application Support/virtual-counselor`
    /// - Windows: `%APPDATA%\virtual-counselor`
    #[must_use]
    pub fn get_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("virtual-counselor")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Fields that are empty (or non-positive for credit values) take the
    /// default. Returns `true` if anything changed.
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let results = [
            fill_str(&mut self.logging.level, &defaults.logging.level),
            fill_str(&mut self.logging.file, &defaults.logging.file),
            fill_str(&mut self.grading.scale, &defaults.grading.scale),
            fill_str(&mut self.grading.thresholds, &defaults.grading.thresholds),
            fill_num(&mut self.credits.base, defaults.credits.base),
            fill_num(
                &mut self.credits.additional_major,
                defaults.credits.additional_major,
            ),
            fill_num(&mut self.credits.minor, defaults.credits.minor),
            fill_num(&mut self.credits.certificate, defaults.credits.certificate),
            fill_str(&mut self.paths.data_dir, &defaults.paths.data_dir),
            fill_str(&mut self.paths.reports_dir, &defaults.paths.reports_dir),
        ];
        results.contains(&true)
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Only non-`None` values replace config values; the file on disk is
    /// left untouched.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(scale) = &overrides.scale {
            self.grading.scale.clone_from(scale);
        }
        if let Some(thresholds) = &overrides.thresholds {
            self.grading.thresholds.clone_from(thresholds);
        }
        if let Some(data_dir) = &overrides.data_dir {
            self.paths.data_dir.clone_from(data_dir);
        }
        if let Some(reports_dir) = &overrides.reports_dir {
            self.paths.reports_dir.clone_from(reports_dir);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds,
    /// inside [`get_config_dir`](Self::get_config_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_config_dir().join(CONFIG_FILE_NAME)
    }

    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_config_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Expands `$VIRTUAL_COUNSELOR` in path values. Missing fields use their
    /// serde defaults (empty strings, zero, false).
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.data_dir = Self::expand_variables(&config.paths.data_dir);
        config.paths.reports_dir = Self::expand_variables(&config.paths.reports_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML. The
    /// defaults are compiled into the binary and covered by tests.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// An existing file is merged with defaults (and re-saved if fields were
    /// added). On first run the directory and file are created. Any read or
    /// parse failure falls back to defaults.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to file
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized, or the directory
    /// or file cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `scale`, `thresholds`,
    /// `base_credits`, `major_credits`, `minor_credits`,
    /// `certificate_credits`, `data_dir`, `reports_dir`. Underscores may be
    /// written as hyphens.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key.replace('-', "_").as_str() {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "scale" => Some(self.grading.scale.clone()),
            "thresholds" => Some(self.grading.thresholds.clone()),
            "base_credits" => Some(self.credits.base.to_string()),
            "major_credits" => Some(self.credits.additional_major.to_string()),
            "minor_credits" => Some(self.credits.minor.to_string()),
            "certificate_credits" => Some(self.credits.certificate.to_string()),
            "data_dir" => Some(self.paths.data_dir.clone()),
            "reports_dir" => Some(self.paths.reports_dir.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Values are validated: `verbose` must be a boolean, `scale` and
    /// `thresholds` must name a known preset, credit values must be
    /// positive numbers. Call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized or the value is invalid.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key.replace('-', "_").as_str() {
            "level" => {
                value.parse::<crate::logger::Level>()?;
                self.logging.level = value.to_string();
            }
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "scale" => self.grading.scale = value.parse::<GradeScale>()?.to_string(),
            "thresholds" => self.grading.thresholds = value.parse::<ThresholdPreset>()?.to_string(),
            "base_credits" => self.credits.base = parse_credits(key, value)?,
            "major_credits" => self.credits.additional_major = parse_credits(key, value)?,
            "minor_credits" => self.credits.minor = parse_credits(key, value)?,
            "certificate_credits" => self.credits.certificate = parse_credits(key, value)?,
            "data_dir" => self.paths.data_dir = value.to_string(),
            "reports_dir" => self.paths.reports_dir = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key.replace('-', "_").as_str() {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "scale" => self.grading.scale.clone_from(&defaults.grading.scale),
            "thresholds" => self
                .grading
                .thresholds
                .clone_from(&defaults.grading.thresholds),
            "base_credits" => self.credits.base = defaults.credits.base,
            "major_credits" => self.credits.additional_major = defaults.credits.additional_major,
            "minor_credits" => self.credits.minor = defaults.credits.minor,
            "certificate_credits" => self.credits.certificate = defaults.credits.certificate,
            "data_dir" => self.paths.data_dir.clone_from(&defaults.paths.data_dir),
            "reports_dir" => self
                .paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file so the next [`load()`](Config::load)
    /// recreates it. Succeeds if the file does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }

    /// Grade-point scale named by `[grading] scale`, standard if unknown
    #[must_use]
    pub fn grade_scale(&self) -> GradeScale {
        self.grading.scale.parse().unwrap_or_else(|e| {
            crate::warn!("{e}; using the standard scale");
            GradeScale::default()
        })
    }

    /// Threshold preset named by `[grading] thresholds`, standard if unknown
    #[must_use]
    pub fn threshold_preset(&self) -> ThresholdPreset {
        self.grading.thresholds.parse().unwrap_or_else(|e| {
            crate::warn!("{e}; using the standard thresholds");
            ThresholdPreset::default()
        })
    }

    /// Credit policy from `[credits]`, falling back per field to 120/40/20/15
    #[must_use]
    pub fn credit_policy(&self) -> CreditPolicy {
        let fallback = CreditPolicy::default();
        let pick = |value: f32, default: f32| if value > 0.0 { value } else { default };
        CreditPolicy {
            base: pick(self.credits.base, fallback.base),
            additional_major: pick(self.credits.additional_major, fallback.additional_major),
            minor: pick(self.credits.minor, fallback.minor),
            certificate: pick(self.credits.certificate, fallback.certificate),
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[grading]")?;
        writeln!(f, "  scale = \"{}\"", self.grading.scale)?;
        writeln!(f, "  thresholds = \"{}\"", self.grading.thresholds)?;

        writeln!(f, "\n[credits]")?;
        writeln!(f, "  base = {}", self.credits.base)?;
        writeln!(f, "  additional_major = {}", self.credits.additional_major)?;
        writeln!(f, "  minor = {}", self.credits.minor)?;
        writeln!(f, "  certificate = {}", self.credits.certificate)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  data_dir = \"{}\"", self.paths.data_dir)?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;

        Ok(())
    }
}
