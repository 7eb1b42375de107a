use std::{env, fs, io::ErrorKind, path::Path, time::Duration};

use anyhow::{bail, Context};
use client_core::{ControllerOptions, PermissionTable};
use serde::Deserialize;
use shared::domain::{PermissionKind, ScreenToken};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_base_url: String,
    pub page_size: usize,
    pub search_debounce_ms: u64,
    pub request_timeout_secs: u64,
    /// Grants on the registry screen for this operator.
    pub permissions: Vec<PermissionKind>,
}

impl Default for Settings {
    fn default() -> Self {
        let options = ControllerOptions::default();
        Self {
            api_base_url: "http://127.0.0.1:8080/api".into(),
            page_size: options.page_size,
            search_debounce_ms: options.search_debounce.as_millis() as u64,
            request_timeout_secs: 30,
            permissions: Vec::new(),
        }
    }
}

impl Settings {
    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            page_size: self.page_size,
            search_debounce: Duration::from_millis(self.search_debounce_ms),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn permission_table(&self) -> PermissionTable {
        PermissionTable::new().grant_all(
            ScreenToken::VeiculosReboques,
            self.permissions.iter().copied(),
        )
    }
}

/// Defaults, then `path` if it exists, then environment overrides.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    load_settings_with(path, |key| env::var(key).ok())
}

fn load_settings_with(
    path: &Path,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = match fs::read_to_string(path) {
        Ok(raw) => toml::from_str::<Settings>(&raw)
            .with_context(|| format!("failed to parse settings file '{}'", path.display()))?,
        Err(err) if err.kind() == ErrorKind::NotFound => Settings::default(),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read settings file '{}'", path.display()))
        }
    };

    if let Some(v) = lookup("VEICULOS_API_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = lookup("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(parsed) = lookup("APP__PAGE_SIZE").and_then(|v| v.parse().ok()) {
        settings.page_size = parsed;
    }
    if let Some(parsed) = lookup("APP__SEARCH_DEBOUNCE_MS").and_then(|v| v.parse().ok()) {
        settings.search_debounce_ms = parsed;
    }
    if let Some(parsed) = lookup("APP__REQUEST_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
        settings.request_timeout_secs = parsed;
    }

    if let Some(v) = lookup("APP__PERMISSIONS") {
        settings.permissions = v
            .split(',')
            .filter(|raw| !raw.trim().is_empty())
            .filter_map(|raw| {
                let kind = PermissionKind::parse(raw);
                if kind.is_none() {
                    tracing::warn!(permission = raw.trim(), "ignoring unknown permission");
                }
                kind
            })
            .collect();
    }

    if settings.page_size == 0 {
        bail!("page_size must be greater than zero");
    }

    Ok(settings)
}
