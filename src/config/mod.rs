//! Configuration system (layered: defaults < TOML file < environment).

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{LettricsError, Result};
use crate::history::DEFAULT_CAPACITY;
use crate::request::tool_spec;
use crate::types::ToolKind;

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_ENDPOINT_BASE: &str = "https://fallmodz.in/jsw";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
const DEFAULT_CONFIG_FILE: &str = "lettrics.toml";

/// HTTP verb used to reach a generation endpoint.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
}

/// Where and how one tool's remote resource is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    pub url: String,
    pub method: HttpMethod,
}

/// Runtime configuration.
///
/// Resolution order, later layers winning:
/// 1. built-in defaults
/// 2. a TOML file (`LETTRICS_CONFIG`, else `./lettrics.toml` when present)
/// 3. `LETTRICS_*` environment variables (a `.env` file is honoured)
#[derive(Debug, Clone)]
pub struct LettricsConfig {
    bind: SocketAddr,
    endpoint_base: String,
    endpoints: HashMap<ToolKind, EndpointOverride>,
    request_timeout: Duration,
    history_path: PathBuf,
    history_capacity: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct EndpointOverride {
    url: Option<String>,
    method: Option<HttpMethod>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    bind: Option<String>,
    endpoint_base: Option<String>,
    timeout_secs: Option<u64>,
    history: HistorySection,
    endpoints: HashMap<String, EndpointOverride>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct HistorySection {
    path: Option<PathBuf>,
    capacity: Option<usize>,
}

impl Default for LettricsConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl LettricsConfig {
    /// Built-in defaults only.
    pub fn new() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            endpoint_base: DEFAULT_ENDPOINT_BASE.to_string(),
            endpoints: HashMap::new(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            history_path: default_history_path(),
            history_capacity: DEFAULT_CAPACITY,
        }
    }

    /// Load every layer: defaults, config file, then process environment.
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        let mut config = Self::new();

        match std::env::var("LETTRICS_CONFIG") {
            Ok(path) => config.apply_file(Path::new(&path))?,
            Err(_) => {
                let local = Path::new(DEFAULT_CONFIG_FILE);
                if local.is_file() {
                    config.apply_file(local)?;
                }
            }
        }

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Defaults overlaid with a single TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut config = Self::new();
        config.apply_file(path)?;
        Ok(config)
    }

    /// Overlay settings from a TOML file.
    pub fn apply_file(&mut self, path: &Path) -> Result<()> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            LettricsError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        let file: ConfigFile = toml::from_str(&raw).map_err(|e| {
            LettricsError::Configuration(format!("invalid {}: {e}", path.display()))
        })?;

        if let Some(bind) = file.bind {
            self.bind = parse_bind(&bind)?;
        }
        if let Some(base) = file.endpoint_base {
            self.endpoint_base = base;
        }
        if let Some(secs) = file.timeout_secs {
            self.request_timeout = Duration::from_secs(secs);
        }
        if let Some(path) = file.history.path {
            self.history_path = path;
        }
        if let Some(capacity) = file.history.capacity {
            self.history_capacity = validate_capacity(capacity)?;
        }
        for (name, endpoint) in file.endpoints {
            let tool = ToolKind::parse(&name).ok_or_else(|| {
                LettricsError::Configuration(format!("unknown tool in [endpoints.{name}]"))
            })?;
            let entry = self.endpoints.entry(tool).or_default();
            if endpoint.url.is_some() {
                entry.url = endpoint.url;
            }
            if endpoint.method.is_some() {
                entry.method = endpoint.method;
            }
        }
        Ok(())
    }

    /// Overlay `LETTRICS_*` variables resolved through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup("LETTRICS_BIND") {
            self.bind = parse_bind(&bind)?;
        }
        if let Some(base) = lookup("LETTRICS_ENDPOINT_BASE") {
            self.endpoint_base = base;
        }
        if let Some(secs) = lookup("LETTRICS_TIMEOUT_SECS") {
            let secs = secs.trim().parse::<u64>().map_err(|_| {
                LettricsError::Configuration(format!("LETTRICS_TIMEOUT_SECS is not a number: {secs}"))
            })?;
            self.request_timeout = Duration::from_secs(secs);
        }
        if let Some(path) = lookup("LETTRICS_HISTORY_PATH") {
            self.history_path = PathBuf::from(path);
        }
        if let Some(capacity) = lookup("LETTRICS_HISTORY_CAPACITY") {
            let parsed = capacity.trim().parse::<usize>().map_err(|_| {
                LettricsError::Configuration(format!(
                    "LETTRICS_HISTORY_CAPACITY is not a number: {capacity}"
                ))
            })?;
            self.history_capacity = validate_capacity(parsed)?;
        }

        for tool in ToolKind::ALL {
            let prefix = format!("LETTRICS_{}", tool.as_str().to_ascii_uppercase());
            if let Some(url) = lookup(&format!("{prefix}_URL")) {
                self.endpoints.entry(tool).or_default().url = Some(url);
            }
            if let Some(method) = lookup(&format!("{prefix}_METHOD")) {
                let parsed = method.trim().parse::<HttpMethod>().map_err(|_| {
                    LettricsError::Configuration(format!("{prefix}_METHOD must be get or post"))
                })?;
                self.endpoints.entry(tool).or_default().method = Some(parsed);
            }
        }
        Ok(())
    }

    pub fn bind(&self) -> SocketAddr {
        self.bind
    }

    pub fn set_bind(&mut self, bind: SocketAddr) {
        self.bind = bind;
    }

    pub fn endpoint_base(&self) -> &str {
        &self.endpoint_base
    }

    /// Point every relative resource at `base` (used by tests and mirrors).
    pub fn with_endpoint_base(mut self, base: impl Into<String>) -> Self {
        self.endpoint_base = base.into();
        self
    }

    /// Override one tool's endpoint.
    pub fn with_endpoint(mut self, tool: ToolKind, endpoint: EndpointConfig) -> Self {
        self.endpoints.insert(
            tool,
            EndpointOverride {
                url: Some(endpoint.url),
                method: Some(endpoint.method),
            },
        );
        self
    }

    /// Resolved endpoint for `tool`.
    ///
    /// Relative catalog resources are joined onto the endpoint base;
    /// absolute ones are used as-is unless overridden.
    pub fn endpoint(&self, tool: ToolKind) -> EndpointConfig {
        let overrides = self.endpoints.get(&tool);
        let url = overrides
            .and_then(|o| o.url.clone())
            .unwrap_or_else(|| join_resource(&self.endpoint_base, tool_spec(tool).resource));
        let method = overrides.and_then(|o| o.method).unwrap_or_default();
        EndpointConfig { url, method }
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn history_path(&self) -> &Path {
        &self.history_path
    }

    pub fn with_history_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_path = path.into();
        self
    }

    pub fn history_capacity(&self) -> usize {
        self.history_capacity
    }
}

fn join_resource(base: &str, resource: &str) -> String {
    if resource.starts_with("http://") || resource.starts_with("https://") {
        return resource.to_string();
    }
    format!("{}/{}", base.trim_end_matches('/'), resource)
}

fn parse_bind(raw: &str) -> Result<SocketAddr> {
    raw.trim()
        .parse()
        .map_err(|_| LettricsError::Configuration(format!("invalid bind address: {raw}")))
}

fn validate_capacity(capacity: usize) -> Result<usize> {
    if capacity == 0 {
        return Err(LettricsError::Configuration(
            "history capacity must be at least 1".into(),
        ));
    }
    Ok(capacity)
}

fn default_history_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "lettrics")
        .map(|dirs| dirs.data_dir().join("history.json"))
        .unwrap_or_else(|| PathBuf::from(".lettrics").join("history.json"))
}
