//! Session snapshot types: realms, docks and tabs.
//!
//! A [`Snapshot`] is what the external session manager hands to the search and
//! reorder core on every keystroke or drag frame. It is plain data; nothing in
//! this crate mutates a snapshot it was given.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{RealmsError, RealmsResult};

/// Closed color palette shared by realms and docks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeColor {
    #[default]
    Blue,
    Purple,
    Pink,
    Red,
    Orange,
    Yellow,
    Green,
    Teal,
    Cyan,
    Gray,
}

impl ThemeColor {
    pub const ALL: [ThemeColor; 10] = [
        ThemeColor::Blue,
        ThemeColor::Purple,
        ThemeColor::Pink,
        ThemeColor::Red,
        ThemeColor::Orange,
        ThemeColor::Yellow,
        ThemeColor::Green,
        ThemeColor::Teal,
        ThemeColor::Cyan,
        ThemeColor::Gray,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ThemeColor::Blue => "blue",
            ThemeColor::Purple => "purple",
            ThemeColor::Pink => "pink",
            ThemeColor::Red => "red",
            ThemeColor::Orange => "orange",
            ThemeColor::Yellow => "yellow",
            ThemeColor::Green => "green",
            ThemeColor::Teal => "teal",
            ThemeColor::Cyan => "cyan",
            ThemeColor::Gray => "gray",
        }
    }
}

/// An open browser tab
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub favicon: Option<String>,
    #[serde(default)]
    pub is_loading: bool,
    #[serde(default)]
    pub realm_id: Option<String>,
    /// `None` means the tab is not part of any dock.
    #[serde(default)]
    pub dock_id: Option<String>,
}

/// A top-level workspace
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Realm {
    pub id: String,
    pub name: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default)]
    pub color: ThemeColor,
}

/// A named, collapsible, ordered container of tabs inside a realm
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dock {
    pub id: String,
    pub name: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default)]
    pub color: ThemeColor,
    #[serde(default)]
    pub is_collapsed: bool,
    /// Persisted tab ordering
    #[serde(default)]
    pub tab_ids: Vec<String>,
    #[serde(default)]
    pub realm_id: Option<String>,
}

fn default_icon() -> String {
    "globe".to_string()
}

/// Everything the session manager knows about realms, docks and tabs.
///
/// The order of `docks` is the dock-level ordering shown in the sidebar.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    pub realms: Vec<Realm>,
    pub docks: Vec<Dock>,
    pub tabs: Vec<Tab>,
}

impl Snapshot {
    pub fn new(realms: Vec<Realm>, docks: Vec<Dock>, tabs: Vec<Tab>) -> Self {
        Self {
            realms,
            docks,
            tabs,
        }
    }

    /// Parse a snapshot from its JSON form
    pub fn from_json(json: &str) -> RealmsResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a snapshot from a JSON file
    pub fn load(path: &Path) -> RealmsResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Write the snapshot as pretty JSON
    pub fn save(&self, path: &Path) -> RealmsResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty() && self.docks.is_empty() && self.realms.is_empty()
    }

    pub fn realm(&self, id: &str) -> Option<&Realm> {
        self.realms.iter().find(|r| r.id == id)
    }

    pub fn dock(&self, id: &str) -> Option<&Dock> {
        self.docks.iter().find(|d| d.id == id)
    }

    pub fn tab(&self, id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    /// Position of a dock in the dock-level ordering
    pub fn dock_index(&self, id: &str) -> Option<usize> {
        self.docks.iter().position(|d| d.id == id)
    }

    /// Dock whose sequence holds the tab, with the tab's position in it
    pub fn locate_tab(&self, tab_id: &str) -> Option<(&Dock, usize)> {
        self.docks.iter().find_map(|dock| {
            dock.tab_ids
                .iter()
                .position(|id| id == tab_id)
                .map(|index| (dock, index))
        })
    }

    /// Tabs of a dock in dock order, skipping ids with no tab behind them
    pub fn dock_tabs(&self, dock_id: &str) -> Vec<&Tab> {
        self.dock(dock_id)
            .map(|dock| dock.tab_ids.iter().filter_map(|id| self.tab(id)).collect())
            .unwrap_or_default()
    }

    /// Check the snapshot invariants, reporting the first violation
    pub fn validate(&self) -> RealmsResult<()> {
        let mut seen = HashSet::new();
        for tab in &self.tabs {
            if !seen.insert(tab.id.as_str()) {
                return Err(RealmsError::Snapshot(format!(
                    "duplicate tab id '{}'",
                    tab.id
                )));
            }
        }

        for dock in &self.docks {
            let mut in_dock = HashSet::new();
            for id in &dock.tab_ids {
                if !in_dock.insert(id.as_str()) {
                    return Err(RealmsError::Snapshot(format!(
                        "dock '{}' lists tab '{}' more than once",
                        dock.id, id
                    )));
                }
            }
        }

        for tab in &self.tabs {
            let Some(dock_id) = tab.dock_id.as_deref() else {
                continue;
            };
            let Some(dock) = self.dock(dock_id) else {
                return Err(RealmsError::Snapshot(format!(
                    "tab '{}' references unknown dock '{}'",
                    tab.id, dock_id
                )));
            };
            if !dock.tab_ids.iter().any(|id| *id == tab.id) {
                return Err(RealmsError::Snapshot(format!(
                    "tab '{}' is not listed in dock '{}'",
                    tab.id, dock_id
                )));
            }
        }

        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_parse_camel_case_json() {
        let json = r#"{
            "realms": [{"id": "r1", "name": "Work", "icon": "briefcase", "color": "purple"}],
            "docks": [{"id": "d1", "name": "Docs", "isCollapsed": true, "tabIds": ["t1"], "realmId": "r1"}],
            "tabs": [{"id": "t1", "title": "Spec", "url": "https://example.com", "isLoading": false,
                      "realmId": "r1", "dockId": "d1"}]
        }"#;

        let snapshot = Snapshot::from_json(json).unwrap();
        assert_eq!(snapshot.realms[0].color, ThemeColor::Purple);
        assert!(snapshot.docks[0].is_collapsed);
        assert_eq!(snapshot.docks[0].icon, "globe");
        assert_eq!(snapshot.tabs[0].dock_id.as_deref(), Some("d1"));
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("snapshot.json");
        let snapshot = Docked::new().dock("a", &["t1"]).build();

        snapshot.save(&path).unwrap();
        assert_eq!(Snapshot::load(&path).unwrap(), snapshot);
    }

    #[test]
    fn test_missing_collections_are_empty() {
        let snapshot = Snapshot::from_json("{}").unwrap();
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_lookups() {
        let snapshot = Docked::new().dock("a", &["t1", "t2"]).dock("b", &["t3"]).build();

        assert_eq!(snapshot.dock_index("b"), Some(1));
        let (dock, index) = snapshot.locate_tab("t2").unwrap();
        assert_eq!((dock.id.as_str(), index), ("a", 1));
        assert!(snapshot.locate_tab("missing").is_none());
        assert_eq!(snapshot.dock_tabs("a").len(), 2);
        assert!(snapshot.dock_tabs("missing").is_empty());
    }

    #[test]
    fn test_validate_duplicate_tab_id() {
        let mut snapshot = Docked::new().dock("a", &["t1"]).build();
        snapshot.tabs.push(tab("t1", "again", ""));
        assert!(matches!(snapshot.validate(), Err(RealmsError::Snapshot(_))));
    }

    #[test]
    fn test_validate_duplicate_in_dock() {
        let mut snapshot = Docked::new().dock("a", &["t1"]).build();
        snapshot.docks[0].tab_ids.push("t1".to_string());
        assert!(snapshot.validate().is_err());
    }

    #[test]
    fn test_validate_dangling_dock_reference() {
        let mut snapshot = Docked::new().dock("a", &["t1"]).build();
        snapshot.tabs[0].dock_id = Some("ghost".to_string());
        assert!(snapshot.validate().is_err());

        snapshot.tabs[0].dock_id = Some("a".to_string());
        snapshot.docks[0].tab_ids.clear();
        assert!(snapshot.validate().is_err());
    }

    #[test]
    fn test_palette_serializes_lowercase() {
        for color in ThemeColor::ALL {
            let json = serde_json::to_string(&color).unwrap();
            assert_eq!(json, format!("\"{}\"", color.name()));
        }
    }
}
