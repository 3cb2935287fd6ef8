//! Default run settings from `scalebench.toml` and the environment.
//!
//! Precedence, lowest to highest: builtin defaults, the `[defaults]` table
//! of `scalebench.toml` in the working directory, `SCALEBENCH_*` environment
//! variables. Explicit CLI flags override all of these (the CLI applies
//! them on top of the loaded config). A missing file is fine; a malformed
//! file or value is an error.

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;

use crate::protocol::OutputFormat;

pub const CONFIG_FILE: &str = "scalebench.toml";

/// Resolved defaults for the run command.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub iterations: usize,
    pub min_duration: Option<f64>,
    pub max_duration: Option<f64>,
    pub format: OutputFormat,
    pub pin_cpu: Option<usize>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            iterations: 1,
            min_duration: None,
            max_duration: None,
            format: OutputFormat::Pretty,
            pin_cpu: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    defaults: Defaults,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct Defaults {
    iterations: Option<usize>,
    min_duration: Option<f64>,
    max_duration: Option<f64>,
    format: Option<OutputFormat>,
    pin_cpu: Option<usize>,
}

impl Config {
    /// Loads `scalebench.toml` from the working directory if present, then
    /// applies environment overrides.
    pub fn load() -> io::Result<Config> {
        let mut config = if Path::new(CONFIG_FILE).exists() {
            Config::from_file(CONFIG_FILE)?
        } else {
            Config::default()
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Config> {
        let contents = fs::read_to_string(path)?;
        let file: ConfigFile = toml::from_str(&contents)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;

        let builtin = Config::default();
        Ok(Config {
            iterations: file.defaults.iterations.unwrap_or(builtin.iterations),
            min_duration: file.defaults.min_duration,
            max_duration: file.defaults.max_duration,
            format: file.defaults.format.unwrap_or(builtin.format),
            pin_cpu: file.defaults.pin_cpu,
        })
    }

    /// Applies `SCALEBENCH_*` overrides on top of the current values.
    pub fn apply_env_overrides(&mut self) -> io::Result<()> {
        if let Some(value) = env_value("SCALEBENCH_ITERATIONS")? {
            self.iterations = value;
        }
        if let Some(value) = env_value("SCALEBENCH_MIN_DURATION")? {
            self.min_duration = Some(value);
        }
        if let Some(value) = env_value("SCALEBENCH_MAX_DURATION")? {
            self.max_duration = Some(value);
        }
        if let Some(value) = env_value("SCALEBENCH_FORMAT")? {
            self.format = value;
        }
        if let Some(value) = env_value("SCALEBENCH_PIN_CPU")? {
            self.pin_cpu = Some(value);
        }
        Ok(())
    }
}

fn env_value<T>(name: &str) -> io::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw.parse().map(Some).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("invalid value for {}: {}", name, e),
            )
        }),
        Err(_) => Ok(None),
    }
}
