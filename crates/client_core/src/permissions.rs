use std::collections::HashSet;

use shared::domain::{PermissionKind, ScreenToken};

use crate::PermissionChecker;

/// Fixed set of grants, e.g. loaded from configuration.
#[derive(Debug, Clone, Default)]
pub struct PermissionTable {
    grants: HashSet<(ScreenToken, PermissionKind)>,
}

impl PermissionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(mut self, screen: ScreenToken, kind: PermissionKind) -> Self {
        self.grants.insert((screen, kind));
        self
    }

    pub fn grant_all(self, screen: ScreenToken, kinds: impl IntoIterator<Item = PermissionKind>) -> Self {
        kinds
            .into_iter()
            .fold(self, |table, kind| table.grant(screen, kind))
    }
}

impl PermissionChecker for PermissionTable {
    fn is_permission_enabled(&self, screen: ScreenToken, kind: PermissionKind) -> bool {
        self.grants.contains(&(screen, kind))
    }
}
