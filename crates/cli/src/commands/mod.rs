pub mod batch;
pub mod catalog;
pub mod config;
pub mod doctor;
pub mod recommend;
pub mod stats;

use std::fs;
use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use giftwise_core::config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions};
use giftwise_core::ApplicationError;
use giftwise_core::persona::record::parse_records;
use giftwise_core::PersonaProfile;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

pub const EXIT_UNSUCCESSFUL: u8 = 1;
pub const EXIT_CONFIG: u8 = 2;
pub const EXIT_RUNTIME: u8 = 3;
pub const EXIT_INPUT: u8 = 4;
pub const EXIT_INVALID_REQUEST: u8 = 5;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
}

impl CommandResult {
    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    /// Pretty JSON document on stdout, e.g. a recommendation result.
    pub fn document<T: Serialize>(command: &str, document: &T, exit_code: u8) -> Self {
        match serde_json::to_string_pretty(document) {
            Ok(output) => Self { exit_code, output },
            Err(error) => Self::failure(command, "serialization", error.to_string(), EXIT_RUNTIME),
        }
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\
             \"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

/// Loads configuration. `offline` switches the completion provider off.
pub(crate) fn load_config(command: &str, offline: bool) -> Result<AppConfig, CommandResult> {
    let overrides =
        ConfigOverrides { llm_enabled: offline.then_some(false), ..ConfigOverrides::default() };
    AppConfig::load(LoadOptions { overrides, ..LoadOptions::default() })
        .map_err(|error| config_failure(command, &error))
}

pub(crate) fn config_failure(command: &str, error: &ConfigError) -> CommandResult {
    let interface = ApplicationError::Configuration(error.to_string()).into_interface(command);
    CommandResult::failure(command, interface.class(), interface.to_string(), EXIT_CONFIG)
}

/// Reads a JSON file holding one persona object or an array of them.
pub(crate) fn read_personas(
    command: &str,
    path: &Path,
) -> Result<Vec<PersonaProfile>, CommandResult> {
    load_personas(path)
        .map_err(|error| CommandResult::failure(command, "input", format!("{error:#}"), EXIT_INPUT))
}

fn load_personas(path: &Path) -> anyhow::Result<Vec<PersonaProfile>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("could not read `{}`", path.display()))?;
    let records =
        parse_records(&raw).with_context(|| format!("could not parse `{}`", path.display()))?;
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            record.into_profile().with_context(|| format!("persona #{}", index + 1))
        })
        .collect()
}

pub(crate) fn parse_now(command: &str, raw: Option<&str>) -> Result<DateTime<Utc>, CommandResult> {
    match raw {
        None => Ok(Utc::now()),
        Some(raw) => DateTime::parse_from_rfc3339(raw.trim())
            .map(|at| at.with_timezone(&Utc))
            .map_err(|error| {
                CommandResult::failure(
                    command,
                    "invalid_argument",
                    format!("--now expects an RFC 3339 timestamp: {error}"),
                    EXIT_INVALID_REQUEST,
                )
            }),
    }
}

pub(crate) fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

pub(crate) fn runtime(command: &str) -> Result<tokio::runtime::Runtime, CommandResult> {
    tokio::runtime::Builder::new_current_thread().enable_all().build().map_err(|error| {
        CommandResult::failure(
            command,
            "runtime_init",
            format!("failed to initialize async runtime: {error}"),
            EXIT_RUNTIME,
        )
    })
}
