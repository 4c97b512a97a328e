//! Layered server configuration.
//!
//! Precedence, lowest first:
//! 1) built-in defaults -> 2) YAML file (if provided) -> 3) `CALC__SECTION__KEY`
//! environment -> 4) the flat variables the service has always honoured
//! (`PORT`, `ALLOW_CORS`, `ENABLE_SWAGGER`, `ARTIFICIAL_DELAY_MS`) -> 5) CLI flags.

use std::path::Path;

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::value::Value;
use serde::{Deserialize, Serialize};

/// Prefix of nested environment overrides, e.g. `CALC__SERVER__PORT`.
pub const ENV_PREFIX: &str = "CALC__";

/// A flat variable and the config key it sets.
struct LegacyVar {
    name: &'static str,
    key: &'static str,
    flag: bool,
}

const LEGACY_ENV: [LegacyVar; 4] = [
    LegacyVar {
        name: "PORT",
        key: "server.port",
        flag: false,
    },
    LegacyVar {
        name: "ALLOW_CORS",
        key: "cors.enabled",
        flag: true,
    },
    LegacyVar {
        name: "ENABLE_SWAGGER",
        key: "docs.enabled",
        flag: true,
    },
    LegacyVar {
        name: "ARTIFICIAL_DELAY_MS",
        key: "server.artificial_delay_ms",
        flag: false,
    },
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub docs: DocsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound (exclusive) of a random per-request delay; 0 disables it.
    pub artificial_delay_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 3001,
            artificial_delay_ms: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsConfig {
    pub enabled: bool,
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub allow_credentials: bool,
    pub max_age_seconds: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            allowed_origins: vec!["*".to_owned()],
            allowed_methods: vec!["POST".to_owned(), "OPTIONS".to_owned()],
            allowed_headers: vec!["Content-Type".to_owned()],
            allow_credentials: false,
            max_age_seconds: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocsConfig {
    /// Mount `/openapi.json` and `/docs`.
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Pretty,
        }
    }
}

/// CLI values that override the layered configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub verbose: u8,
}

impl AppConfig {
    /// Assemble the provider stack without extracting it.
    #[must_use]
    pub fn figment(config_path: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));
        if let Some(path) = config_path {
            figment = figment.merge(Yaml::file(path));
        }
        merge_legacy_env(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Load the layered configuration.
    ///
    /// # Errors
    /// Returns an error if an explicitly given file does not exist or any layer
    /// holds a value of the wrong type.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_path
            && !path.is_file()
        {
            anyhow::bail!("config file does not exist: {}", path.display());
        }

        Self::figment(config_path)
            .extract()
            .context("invalid configuration")
    }

    pub fn apply_cli_overrides(&mut self, cli: CliOverrides) {
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        match cli.verbose {
            0 => {}
            1 => "info".clone_into(&mut self.logging.level),
            2 => "debug".clone_into(&mut self.logging.level),
            _ => "trace".clone_into(&mut self.logging.level),
        }
    }

    /// Render the effective configuration for `--print-config`.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Layer the flat variables on top. An empty value counts as unset.
fn merge_legacy_env(figment: Figment) -> Figment {
    LEGACY_ENV.iter().fold(figment, |figment, var| {
        match std::env::var(var.name) {
            Ok(raw) if !raw.is_empty() => {
                figment.merge(Serialized::default(var.key, legacy_value(var, &raw)))
            }
            _ => figment,
        }
    })
}

/// Flags take the spellings `1 t T TRUE true True` and `0 f F FALSE false
/// False`. Anything else is passed through as-is so extraction reports it
/// against the config key.
fn legacy_value(var: &LegacyVar, raw: &str) -> Value {
    if var.flag
        && let Some(flag) = parse_flag(raw)
    {
        return Value::from(flag);
    }
    raw.parse().unwrap_or_else(|_| Value::from(raw.to_owned()))
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
