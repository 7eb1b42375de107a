use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::{
    domain::{PermissionKind, ScreenToken, VehicleCode},
    protocol::{VehicleListQuery, VehiclePage, VehiclePatch},
};

mod controller;
pub mod debounce;
pub mod error;
pub mod http_service;
pub mod permissions;
pub mod signals;
mod state;

pub use controller::{ControllerOptions, VehiclesListController, RELOAD_SIGNAL};
pub use http_service::HttpVehicleService;
pub use permissions::PermissionTable;
pub use signals::StickySignals;
pub use state::ListState;

/// Listing and update endpoints of the vehicle registry.
#[async_trait]
pub trait VehicleService: Send + Sync {
    async fn list_vehicles(&self, query: &VehicleListQuery) -> Result<VehiclePage>;
    async fn update_vehicle(&self, code: VehicleCode, patch: &VehiclePatch) -> Result<()>;
}

pub trait PermissionChecker: Send + Sync {
    fn is_permission_enabled(&self, screen: ScreenToken, kind: PermissionKind) -> bool;
}

pub trait Navigator: Send + Sync {
    fn navigate_to(&self, screen: ScreenToken, replace: bool, params: serde_json::Value);
}

/// Prompt shown before a destructive action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub title: String,
    pub text: String,
    pub confirm_label: String,
}

#[async_trait]
pub trait DialogHost: Send + Sync {
    fn show_message(&self, title: Option<&str>, text: &str);
    /// Resolves to `true` once the user accepts the prompt.
    async fn confirm(&self, confirmation: &Confirmation) -> bool;
}

/// Process-wide sticky flags used for cross-screen invalidation.
pub trait SignalBus: Send + Sync {
    /// Clears `name` and reports whether it was set.
    fn remove_sticky(&self, name: &str) -> bool;
}

pub struct MissingVehicleService;

#[async_trait]
impl VehicleService for MissingVehicleService {
    async fn list_vehicles(&self, _query: &VehicleListQuery) -> Result<VehiclePage> {
        Err(anyhow!("vehicle service is unavailable"))
    }

    async fn update_vehicle(&self, code: VehicleCode, _patch: &VehiclePatch) -> Result<()> {
        Err(anyhow!("vehicle service is unavailable (vehicle {code})"))
    }
}

pub struct DenyAllPermissions;

impl PermissionChecker for DenyAllPermissions {
    fn is_permission_enabled(&self, _screen: ScreenToken, _kind: PermissionKind) -> bool {
        false
    }
}

pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn navigate_to(&self, screen: ScreenToken, _replace: bool, _params: serde_json::Value) {
        tracing::debug!(%screen, "navigation requested without a navigator");
    }
}

pub struct SilentDialogHost;

#[async_trait]
impl DialogHost for SilentDialogHost {
    fn show_message(&self, _title: Option<&str>, text: &str) {
        tracing::debug!(text, "dialog message dropped");
    }

    async fn confirm(&self, _confirmation: &Confirmation) -> bool {
        false
    }
}

/// Everything the list controller talks to. `Default` wires placeholders that
/// fail, deny or drop, so callers only replace what they have.
#[derive(Clone)]
pub struct Collaborators {
    pub service: Arc<dyn VehicleService>,
    pub permissions: Arc<dyn PermissionChecker>,
    pub navigator: Arc<dyn Navigator>,
    pub dialogs: Arc<dyn DialogHost>,
    pub signals: Arc<dyn SignalBus>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            service: Arc::new(MissingVehicleService),
            permissions: Arc::new(DenyAllPermissions),
            navigator: Arc::new(NoopNavigator),
            dialogs: Arc::new(SilentDialogHost),
            signals: Arc::new(StickySignals::new()),
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
