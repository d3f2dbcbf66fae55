//! Session/state provider seam.
//!
//! The browsing-session manager owns realms, docks and tabs. This crate only
//! reads snapshots from it and asks it to switch realm/tab or to store a
//! committed reorder. [`MemorySession`] is the in-process implementation used
//! by the CLI and by tests.

use std::path::Path;

use crate::error::{RealmsError, RealmsResult};
use crate::model::Snapshot;

/// Access to the external session/state store.
pub trait SessionProvider {
    /// Current snapshot of realms, docks and tabs
    fn snapshot(&self) -> RealmsResult<Snapshot>;

    /// Make the realm with this id the active one
    fn set_active_realm(&mut self, realm_id: &str) -> RealmsResult<()>;

    /// Focus the tab with this id
    fn switch_tab(&mut self, tab_id: &str) -> RealmsResult<()>;

    /// Replace the stored ordering with a committed snapshot
    fn commit(&mut self, snapshot: Snapshot) -> RealmsResult<()>;
}

/// Session state held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySession {
    snapshot: Snapshot,
    active_realm: Option<String>,
    active_tab: Option<String>,
}

impl MemorySession {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            ..Default::default()
        }
    }

    /// Load and validate a JSON snapshot file
    pub fn load(path: &Path) -> RealmsResult<Self> {
        let snapshot = Snapshot::load(path)?;
        snapshot.validate()?;
        tracing::debug!(
            path = %path.display(),
            realms = snapshot.realms.len(),
            docks = snapshot.docks.len(),
            tabs = snapshot.tabs.len(),
            "Loaded session snapshot"
        );
        Ok(Self::new(snapshot))
    }

    pub fn active_realm(&self) -> Option<&str> {
        self.active_realm.as_deref()
    }

    pub fn active_tab(&self) -> Option<&str> {
        self.active_tab.as_deref()
    }

    pub fn current(&self) -> &Snapshot {
        &self.snapshot
    }
}

impl SessionProvider for MemorySession {
    fn snapshot(&self) -> RealmsResult<Snapshot> {
        Ok(self.snapshot.clone())
    }

    fn set_active_realm(&mut self, realm_id: &str) -> RealmsResult<()> {
        if self.snapshot.realm(realm_id).is_none() {
            return Err(RealmsError::Snapshot(format!("unknown realm '{}'", realm_id)));
        }
        self.active_realm = Some(realm_id.to_string());
        Ok(())
    }

    fn switch_tab(&mut self, tab_id: &str) -> RealmsResult<()> {
        if self.snapshot.tab(tab_id).is_none() {
            return Err(RealmsError::Snapshot(format!("unknown tab '{}'", tab_id)));
        }
        self.active_tab = Some(tab_id.to_string());
        Ok(())
    }

    fn commit(&mut self, snapshot: Snapshot) -> RealmsResult<()> {
        snapshot.validate()?;
        self.snapshot = snapshot;
        Ok(())
    }
}
