//! Typed settings with layered precedence (file → env → CLI).

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

use crate::session::DEFAULT_LOGIN_DELAY;

const CONFIG_FILE_NAME: &str = "config.toml";
const ENV_PREFIX: &str = "VAGAS";
const DEFAULT_LINK_BASE: &str = "https://vagas.app/convite";

#[derive(Debug, Clone)]
pub struct Settings {
    pub backend: BackendSettings,
    pub logging: LoggingSettings,
    pub session: SessionSettings,
    pub invitations: InvitationSettings,
}

#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub url: Url,
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub json: bool,
}

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub login_delay: Duration,
}

#[derive(Debug, Clone)]
pub struct InvitationSettings {
    pub link_base: Url,
}

/// Values given on the command line; they beat every other source.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub backend_url: Option<String>,
    pub log_level: Option<String>,
    pub log_json: Option<bool>,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Where the optional per-user config file lives.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "vagas").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

pub fn load(config_file: Option<&Path>, overrides: &Overrides) -> Result<Settings, LoadError> {
    load_layers(default_config_path().as_deref(), config_file, overrides)
}

fn load_layers(
    user_file: Option<&Path>,
    config_file: Option<&Path>,
    overrides: &Overrides,
) -> Result<Settings, LoadError> {
    let mut builder = Config::builder();

    if let Some(path) = user_file {
        builder = builder.add_source(File::from(path).required(false));
    }
    if let Some(path) = config_file {
        builder = builder.add_source(File::from(path).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_overrides(overrides);
    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    backend: RawBackendSettings,
    logging: RawLoggingSettings,
    session: RawSessionSettings,
    invitations: RawInvitationSettings,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawBackendSettings {
    url: Option<String>,
    api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSessionSettings {
    login_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawInvitationSettings {
    link_base: Option<String>,
}

impl RawSettings {
    fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(url) = overrides.backend_url.as_ref() {
            self.backend.url = Some(url.clone());
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            backend,
            logging,
            session,
            invitations,
        } = raw;

        Ok(Self {
            backend: build_backend_settings(backend)?,
            logging: build_logging_settings(logging)?,
            session: SessionSettings {
                login_delay: session
                    .login_delay_ms
                    .map_or(DEFAULT_LOGIN_DELAY, Duration::from_millis),
            },
            invitations: build_invitation_settings(invitations)?,
        })
    }
}

fn build_backend_settings(backend: RawBackendSettings) -> Result<BackendSettings, LoadError> {
    let url = non_blank(backend.url).ok_or_else(|| {
        LoadError::invalid(
            "backend.url",
            format!("missing; set it in {CONFIG_FILE_NAME}, {ENV_PREFIX}__BACKEND__URL or --backend-url"),
        )
    })?;
    let url = parse_http_url("backend.url", &url)?;

    let api_key = non_blank(backend.api_key).ok_or_else(|| {
        LoadError::invalid(
            "backend.api_key",
            format!("missing; set it in {CONFIG_FILE_NAME} or {ENV_PREFIX}__BACKEND__API_KEY"),
        )
    })?;

    Ok(BackendSettings { url, api_key })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str())
            .map_err(|err| LoadError::invalid("logging.level", format!("failed to parse: {err}")))?,
        None => LevelFilter::INFO,
    };

    Ok(LoggingSettings {
        level,
        json: logging.json.unwrap_or(false),
    })
}

fn build_invitation_settings(invitations: RawInvitationSettings) -> Result<InvitationSettings, LoadError> {
    let link_base = non_blank(invitations.link_base).unwrap_or_else(|| DEFAULT_LINK_BASE.to_string());
    Ok(InvitationSettings {
        link_base: parse_http_url("invitations.link_base", &link_base)?,
    })
}

fn parse_http_url(key: &'static str, value: &str) -> Result<Url, LoadError> {
    let url = Url::parse(value).map_err(|err| LoadError::invalid(key, format!("failed to parse: {err}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(LoadError::invalid(key, format!("unsupported scheme `{other}`"))),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn raw_with_backend() -> RawSettings {
        let mut raw = RawSettings::default();
        raw.backend.url = Some("https://project.supabase.co".to_string());
        raw.backend.api_key = Some("anon-key".to_string());
        raw
    }

    #[test]
    fn test_defaults_fill_optional_settings() {
        let settings = Settings::from_raw(raw_with_backend()).expect("valid settings");

        assert_eq!(settings.logging.level, LevelFilter::INFO);
        assert!(!settings.logging.json);
        assert_eq!(settings.session.login_delay, Duration::from_millis(1200));
        assert_eq!(settings.invitations.link_base.as_str(), "https://vagas.app/convite");
    }

    #[test]
    fn test_cli_overrides_take_highest_precedence() {
        let mut raw = raw_with_backend();
        raw.logging.level = Some("warn".to_string());

        raw.apply_overrides(&Overrides {
            backend_url: Some("http://localhost:54321".to_string()),
            log_level: Some("debug".to_string()),
            log_json: Some(true),
        });
        let settings = Settings::from_raw(raw).expect("valid settings");

        assert_eq!(settings.backend.url.as_str(), "http://localhost:54321/");
        assert_eq!(settings.logging.level, LevelFilter::DEBUG);
        assert!(settings.logging.json);
    }

    #[test]
    fn test_missing_backend_is_reported_by_key() {
        let err = Settings::from_raw(RawSettings::default()).unwrap_err();
        assert!(matches!(err, LoadError::Invalid { key: "backend.url", .. }));

        let mut raw = raw_with_backend();
        raw.backend.api_key = Some("   ".to_string());
        let err = Settings::from_raw(raw).unwrap_err();
        assert!(matches!(err, LoadError::Invalid { key: "backend.api_key", .. }));
    }

    #[test]
    fn test_rejects_non_http_backend_url() {
        let mut raw = raw_with_backend();
        raw.backend.url = Some("ftp://example.com".to_string());
        let err = Settings::from_raw(raw).unwrap_err();
        assert!(err.to_string().contains("unsupported scheme `ftp`"));
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let mut raw = raw_with_backend();
        raw.logging.level = Some("loud".to_string());
        let err = Settings::from_raw(raw).unwrap_err();
        assert!(matches!(err, LoadError::Invalid { key: "logging.level", .. }));
    }

    #[test]
    fn test_explicit_config_file_is_read() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[backend]
url = "https://project.supabase.co"
api_key = "from-file"

[session]
login_delay_ms = 0

[invitations]
link_base = "https://example.com/i"
"#
        )
        .unwrap();

        let settings = load_layers(None, Some(file.path()), &Overrides::default()).expect("valid settings");
        assert_eq!(settings.backend.api_key, "from-file");
        assert_eq!(settings.session.login_delay, Duration::ZERO);
        assert_eq!(settings.invitations.link_base.as_str(), "https://example.com/i");
    }

    #[test]
    fn test_explicit_config_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let err = load_layers(None, Some(&missing), &Overrides::default()).unwrap_err();
        assert!(matches!(err, LoadError::Build(_)));
    }
}
