//! Configuration loading and representation.
//!
//! The service reads `<config_dir>/config.json`. String values may contain the
//! `%CONFIG_DIR%` placeholder; it is substituted here, once, so that the auth
//! core only ever sees resolved paths.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use inkpost_auth::{
    ConfigError, KdfParams, MechanismDescriptor, MechanismSettings, parse_mechanism_descriptor,
};

pub const CONFIG_DIR_PLACEHOLDER: &str = "%CONFIG_DIR%";
pub const CONFIG_FILE_NAME: &str = "config.json";
/// Overrides the default `<exe dir>/config` location.
pub const CONFIG_DIR_ENV: &str = "INKPOST_CONFIG_DIR";
pub const DEFAULT_AUTH_HEADER: &str = "X-Auth-Token";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://%CONFIG_DIR%/blogs.db?mode=rwc";

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("cannot determine config directory: {0}")]
    NoConfigDir(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid {field}: {source}")]
    Mechanism {
        field: &'static str,
        #[source]
        source: ConfigError,
    },

    #[error("invalid tcpPort '{0}': expected ':PORT', 'PORT' or 'HOST:PORT'")]
    ListenAddr(String),

    #[error("invalid authHeader '{0}'")]
    AuthHeader(String),

    #[error("maxTokenRecords must be at least 1")]
    ZeroTokenRecords,
}

/// On-disk shape of `config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    api_auth_mech: String,
    tcp_port: String,
    #[serde(default)]
    web_auth_mech: Option<String>,
    #[serde(default)]
    database_url: Option<String>,
    #[serde(default)]
    max_token_records: Option<usize>,
    #[serde(default)]
    auth_header: Option<String>,
}

/// Validated, placeholder-free service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub config_dir: PathBuf,
    /// Mechanism guarding the mutating API routes.
    pub api_auth: MechanismDescriptor,
    /// Reserved for the web UI; validated but not wired to any route.
    pub web_auth: Option<MechanismDescriptor>,
    pub listen_addr: String,
    pub database_url: String,
    pub max_token_records: Option<usize>,
    pub auth_header: String,
}

impl AppConfig {
    /// Load `<config_dir>/config.json`.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigLoadError> {
        let path = config_dir.join(CONFIG_FILE_NAME);
        let json = std::fs::read_to_string(&path).map_err(|source| ConfigLoadError::Io {
            path: path.clone(),
            source,
        })?;
        Self::from_json(&json, config_dir).map_err(|e| match e {
            ConfigLoadError::Parse { source, .. } => ConfigLoadError::Parse { path, source },
            other => other,
        })
    }

    pub fn from_json(json: &str, config_dir: &Path) -> Result<Self, ConfigLoadError> {
        let raw: RawConfig = serde_json::from_str(json).map_err(|source| ConfigLoadError::Parse {
            path: config_dir.join(CONFIG_FILE_NAME),
            source,
        })?;
        Self::from_raw(raw, config_dir)
    }

    fn from_raw(raw: RawConfig, config_dir: &Path) -> Result<Self, ConfigLoadError> {
        let api_auth = resolve_descriptor("apiAuthMech", &raw.api_auth_mech, config_dir)?;
        let web_auth = raw
            .web_auth_mech
            .as_deref()
            .map(|m| resolve_descriptor("webAuthMech", m, config_dir))
            .transpose()?;

        let database_url = resolve_placeholders(
            raw.database_url.as_deref().unwrap_or(DEFAULT_DATABASE_URL),
            config_dir,
        );

        let auth_header = raw
            .auth_header
            .unwrap_or_else(|| DEFAULT_AUTH_HEADER.to_string());
        if auth_header.is_empty()
            || !auth_header
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            return Err(ConfigLoadError::AuthHeader(auth_header));
        }

        if raw.max_token_records == Some(0) {
            return Err(ConfigLoadError::ZeroTokenRecords);
        }

        Ok(Self {
            config_dir: config_dir.to_path_buf(),
            api_auth,
            web_auth,
            listen_addr: normalize_listen_addr(&raw.tcp_port)?,
            database_url,
            max_token_records: raw.max_token_records,
            auth_header,
        })
    }

    /// Settings for resolving `api_auth` into a validator.
    pub fn mechanism_settings(&self) -> MechanismSettings {
        MechanismSettings {
            kdf: KdfParams::STORE_FORMAT_V1,
            max_records: self.max_token_records,
        }
    }
}

/// Substitute `%CONFIG_DIR%` with the configuration directory.
pub fn resolve_placeholders(template: &str, config_dir: &Path) -> String {
    template.replace(CONFIG_DIR_PLACEHOLDER, &config_dir.to_string_lossy())
}

/// `$INKPOST_CONFIG_DIR`, else `config/` next to the running executable.
pub fn default_config_dir() -> Result<PathBuf, ConfigLoadError> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }

    let exe = std::env::current_exe().map_err(|e| ConfigLoadError::NoConfigDir(e.to_string()))?;
    let app_dir = exe
        .parent()
        .ok_or_else(|| ConfigLoadError::NoConfigDir(format!("{} has no parent", exe.display())))?;
    Ok(app_dir.join("config"))
}

fn resolve_descriptor(
    field: &'static str,
    raw: &str,
    config_dir: &Path,
) -> Result<MechanismDescriptor, ConfigLoadError> {
    let descriptor = parse_mechanism_descriptor(raw)
        .map_err(|source| ConfigLoadError::Mechanism { field, source })?;
    let target = resolve_placeholders(descriptor.target(), config_dir);
    Ok(descriptor.with_target(target))
}

/// Accepts gin-style `:8080`, a bare `8080`, or `host:8080`.
fn normalize_listen_addr(tcp_port: &str) -> Result<String, ConfigLoadError> {
    let invalid = || ConfigLoadError::ListenAddr(tcp_port.to_string());
    let trimmed = tcp_port.trim();

    let (host, port) = match trimmed.rsplit_once(':') {
        Some((host, port)) => (host, port),
        None => ("", trimmed),
    };
    port.parse::<u16>().map_err(|_| invalid())?;

    let host = if host.is_empty() { "0.0.0.0" } else { host };
    Ok(format!("{host}:{port}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dir() -> PathBuf {
        PathBuf::from("/srv/inkpost/config")
    }

    #[test]
    fn resolves_placeholders_in_descriptor_targets() {
        let cfg = AppConfig::from_json(
            r#"{"apiAuthMech": "file|%CONFIG_DIR%/tokens.db", "tcpPort": ":8080"}"#,
            &dir(),
        )
        .unwrap();

        assert_eq!(cfg.api_auth.kind(), "file");
        assert_eq!(cfg.api_auth.target(), "/srv/inkpost/config/tokens.db");
        assert_eq!(cfg.listen_addr, "0.0.0.0:8080");
        assert_eq!(cfg.auth_header, DEFAULT_AUTH_HEADER);
        assert_eq!(cfg.database_url, "sqlite:///srv/inkpost/config/blogs.db?mode=rwc");
        assert_eq!(cfg.web_auth, None);
        assert_eq!(cfg.mechanism_settings().kdf, KdfParams::STORE_FORMAT_V1);
    }

    #[test]
    fn optional_fields_are_honored() {
        let cfg = AppConfig::from_json(
            r#"{
                "apiAuthMech": "file|/etc/inkpost/tokens.db",
                "webAuthMech": "file|%CONFIG_DIR%/web.db",
                "tcpPort": "127.0.0.1:9000",
                "databaseUrl": "sqlite::memory:",
                "maxTokenRecords": 500,
                "authHeader": "X-Api-Key"
            }"#,
            &dir(),
        )
        .unwrap();

        assert_eq!(cfg.api_auth.target(), "/etc/inkpost/tokens.db");
        assert_eq!(cfg.web_auth.unwrap().target(), "/srv/inkpost/config/web.db");
        assert_eq!(cfg.listen_addr, "127.0.0.1:9000");
        assert_eq!(cfg.database_url, "sqlite::memory:");
        assert_eq!(cfg.max_token_records, Some(500));
        assert_eq!(cfg.auth_header, "X-Api-Key");
    }

    #[test]
    fn zero_token_record_bound_is_rejected() {
        let err = AppConfig::from_json(
            r#"{"apiAuthMech": "file|/t.db", "tcpPort": ":8080", "maxTokenRecords": 0}"#,
            &dir(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigLoadError::ZeroTokenRecords), "{err:?}");
    }

    #[test]
    fn malformed_descriptor_is_fatal() {
        let err = AppConfig::from_json(r#"{"apiAuthMech": "file", "tcpPort": ":8080"}"#, &dir())
            .unwrap_err();
        match err {
            ConfigLoadError::Mechanism { field, source } => {
                assert_eq!(field, "apiAuthMech");
                assert_eq!(source, ConfigError::MissingDelimiter);
            }
            other => panic!("expected mechanism error, got {other:?}"),
        }
    }

    #[test]
    fn unsupported_kind_still_loads() {
        // Fail-closed happens at resolution time, not at config load.
        let cfg = AppConfig::from_json(
            r#"{"apiAuthMech": "ldap|ldap://dir", "tcpPort": "8080"}"#,
            &dir(),
        )
        .unwrap();
        assert_eq!(cfg.api_auth.kind(), "ldap");
        assert_eq!(cfg.listen_addr, "0.0.0.0:8080");
    }

    #[test]
    fn rejects_bad_ports_and_headers() {
        for port in ["", ":http", "host:99999"] {
            let json = format!(r#"{{"apiAuthMech": "file|x", "tcpPort": "{port}"}}"#);
            assert!(
                matches!(AppConfig::from_json(&json, &dir()), Err(ConfigLoadError::ListenAddr(_))),
                "port {port:?}"
            );
        }

        let json = r#"{"apiAuthMech": "file|x", "tcpPort": ":1", "authHeader": "Bad Header"}"#;
        assert!(matches!(
            AppConfig::from_json(json, &dir()),
            Err(ConfigLoadError::AuthHeader(_))
        ));
    }

    #[test]
    fn missing_required_field_is_a_parse_error() {
        assert!(matches!(
            AppConfig::from_json(r#"{"tcpPort": ":8080"}"#, &dir()),
            Err(ConfigLoadError::Parse { .. })
        ));
    }

    #[test]
    fn load_reads_config_json_from_directory() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            r#"{"apiAuthMech": "file|%CONFIG_DIR%/tokens.db", "tcpPort": ":8000"}"#,
        )
        .unwrap();

        let cfg = AppConfig::load(tmp.path()).unwrap();
        assert_eq!(cfg.config_dir, tmp.path());
        assert_eq!(
            PathBuf::from(cfg.api_auth.target()),
            tmp.path().join("tokens.db")
        );
    }

    #[test]
    fn load_reports_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        match AppConfig::load(tmp.path()) {
            Err(ConfigLoadError::Io { path, .. }) => {
                assert_eq!(path, tmp.path().join(CONFIG_FILE_NAME))
            }
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
