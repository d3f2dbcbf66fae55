//! Drop-target resolution and reorder commits for the dock sidebar.
//!
//! Two sortable scopes share the sidebar and never mix:
//!
//! - the dock list, where a dragged dock moves among the other docks;
//! - each dock's tab list, where a dragged tab lands at an insertion index,
//!   possibly in a different dock.
//!
//! A dock is both a sortable item (its header) and a drop container (its tab
//! list). The drag-and-drop runtime tags every hovered region with its role
//! ([`DropRegion`]), and [`classify`] turns the dragged item plus that region
//! into an explicit [`MoveKind`] before anything is resolved.
//!
//! Nothing here mutates the snapshot it is given. [`commit`] returns a new
//! snapshot with the ordering and the tab's dock reference updated together.

use serde::{Deserialize, Serialize};

use crate::model::Snapshot;

/// The item picked up by the pointer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum DragItem {
    Dock { dock_id: String },
    Tab { tab_id: String },
}

impl DragItem {
    pub fn dock(id: impl Into<String>) -> Self {
        DragItem::Dock { dock_id: id.into() }
    }

    pub fn tab(id: impl Into<String>) -> Self {
        DragItem::Tab { tab_id: id.into() }
    }
}

/// The region under the pointer, tagged with its drop role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum DropRegion {
    /// Dock header: the dock as a sortable item
    Dock { dock_id: String },
    /// Dock tab list outside any row: the dock as a tab container
    #[serde(rename = "dock-drop")]
    DockBody { dock_id: String },
    /// A tab row inside a dock
    Tab { dock_id: String, tab_id: String },
}

/// A drag classified into one of the two sortable scopes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveKind {
    DockMove,
    TabMove { target_dock: String },
}

/// Sequence a drop lands in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "dockId", rename_all = "kebab-case")]
pub enum Container {
    /// The dock-level ordering
    DockList,
    /// The tab ordering of one dock
    Dock(String),
}

/// Where the dragged item would land if released now
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropTarget {
    pub container: Container,
    pub index: usize,
}

impl DropTarget {
    fn in_dock(dock_id: &str, index: usize) -> Self {
        Self {
            container: Container::Dock(dock_id.to_string()),
            index,
        }
    }

    /// Whether a tab-list indicator belongs at `index` of `dock_id`
    pub fn indicator_at(&self, dock_id: &str, index: usize) -> bool {
        self.index == index && matches!(&self.container, Container::Dock(id) if id == dock_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOpReason {
    /// The pointer is over the dragged item itself
    SelfDrop,
    /// An id no longer resolves in the current snapshot
    Stale,
    /// The region belongs to the other sortable scope
    Mismatch,
    /// The drop would leave the ordering as it is
    Unchanged,
    /// The drag ended outside any drop region
    NoTarget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Drop(DropTarget),
    NoOp(NoOpReason),
}

impl Resolution {
    pub fn target(&self) -> Option<&DropTarget> {
        match self {
            Resolution::Drop(target) => Some(target),
            Resolution::NoOp(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    Committed(Snapshot),
    NoOp(NoOpReason),
}

impl CommitOutcome {
    pub fn snapshot(self) -> Option<Snapshot> {
        match self {
            CommitOutcome::Committed(snapshot) => Some(snapshot),
            CommitOutcome::NoOp(_) => None,
        }
    }
}

/// Decide which sortable scope a hover belongs to.
///
/// Docks only move among dock headers and tabs only drop into tab lists;
/// any other combination is `None`.
pub fn classify(item: &DragItem, region: &DropRegion) -> Option<MoveKind> {
    match (item, region) {
        (DragItem::Dock { .. }, DropRegion::Dock { .. }) => Some(MoveKind::DockMove),
        (DragItem::Tab { .. }, DropRegion::DockBody { dock_id })
        | (DragItem::Tab { .. }, DropRegion::Tab { dock_id, .. }) => Some(MoveKind::TabMove {
            target_dock: dock_id.clone(),
        }),
        _ => None,
    }
}

/// Compute the drop target for `item` hovering over `region`
pub fn resolve(snapshot: &Snapshot, item: &DragItem, region: &DropRegion) -> Resolution {
    let resolution = match classify(item, region) {
        None => Resolution::NoOp(NoOpReason::Mismatch),
        Some(MoveKind::DockMove) => resolve_dock_move(snapshot, item, region),
        Some(MoveKind::TabMove { target_dock }) => {
            resolve_tab_move(snapshot, item, region, &target_dock)
        }
    };

    tracing::trace!(?item, ?region, ?resolution, "Resolved drop target");
    resolution
}

fn resolve_dock_move(snapshot: &Snapshot, item: &DragItem, region: &DropRegion) -> Resolution {
    let (DragItem::Dock { dock_id }, DropRegion::Dock { dock_id: over }) = (item, region) else {
        return Resolution::NoOp(NoOpReason::Mismatch);
    };

    let (Some(_), Some(index)) = (snapshot.dock_index(dock_id), snapshot.dock_index(over)) else {
        return Resolution::NoOp(NoOpReason::Stale);
    };

    if dock_id == over {
        return Resolution::NoOp(NoOpReason::SelfDrop);
    }

    Resolution::Drop(DropTarget {
        container: Container::DockList,
        index,
    })
}

fn resolve_tab_move(
    snapshot: &Snapshot,
    item: &DragItem,
    region: &DropRegion,
    target_dock: &str,
) -> Resolution {
    let DragItem::Tab { tab_id } = item else {
        return Resolution::NoOp(NoOpReason::Mismatch);
    };

    if !tab_is_known(snapshot, tab_id) {
        return Resolution::NoOp(NoOpReason::Stale);
    }

    // Collapsed docks stay valid targets
    let Some(dock) = snapshot.dock(target_dock) else {
        return Resolution::NoOp(NoOpReason::Stale);
    };

    match region {
        DropRegion::Tab { tab_id: over, .. } => {
            let Some(index) = dock.tab_ids.iter().position(|id| id == over) else {
                return Resolution::NoOp(NoOpReason::Stale);
            };
            if over == tab_id {
                return Resolution::NoOp(NoOpReason::SelfDrop);
            }
            Resolution::Drop(DropTarget::in_dock(target_dock, index))
        }
        _ => Resolution::Drop(DropTarget::in_dock(target_dock, dock.tab_ids.len())),
    }
}

fn tab_is_known(snapshot: &Snapshot, tab_id: &str) -> bool {
    snapshot.tab(tab_id).is_some() || snapshot.locate_tab(tab_id).is_some()
}

/// Apply a drop to `snapshot`, returning the reordered copy.
///
/// Tab targets are "insert before" positions counted before the dragged tab
/// is removed. Dock targets are the final position of the moved dock.
pub fn commit(snapshot: &Snapshot, item: &DragItem, target: &DropTarget) -> CommitOutcome {
    let outcome = match (item, &target.container) {
        (DragItem::Dock { dock_id }, Container::DockList) => {
            commit_dock_move(snapshot, dock_id, target.index)
        }
        (DragItem::Tab { tab_id }, Container::Dock(target_dock)) => {
            commit_tab_move(snapshot, tab_id, target_dock, target.index)
        }
        _ => CommitOutcome::NoOp(NoOpReason::Mismatch),
    };

    match &outcome {
        CommitOutcome::Committed(_) => tracing::debug!(?item, ?target, "Committed reorder"),
        CommitOutcome::NoOp(reason) => tracing::debug!(?item, ?target, ?reason, "Reorder skipped"),
    }
    outcome
}

fn commit_dock_move(snapshot: &Snapshot, dock_id: &str, index: usize) -> CommitOutcome {
    let Some(from) = snapshot.dock_index(dock_id) else {
        return CommitOutcome::NoOp(NoOpReason::Stale);
    };

    let to = index.min(snapshot.docks.len() - 1);
    if from == to {
        return CommitOutcome::NoOp(NoOpReason::Unchanged);
    }

    let mut next = snapshot.clone();
    let dock = next.docks.remove(from);
    next.docks.insert(to, dock);
    CommitOutcome::Committed(next)
}

fn commit_tab_move(
    snapshot: &Snapshot,
    tab_id: &str,
    target_dock: &str,
    index: usize,
) -> CommitOutcome {
    let Some(target_pos) = snapshot.dock_index(target_dock) else {
        return CommitOutcome::NoOp(NoOpReason::Stale);
    };
    if !tab_is_known(snapshot, tab_id) {
        return CommitOutcome::NoOp(NoOpReason::Stale);
    }

    let source = snapshot.docks.iter().enumerate().find_map(|(pos, dock)| {
        dock.tab_ids
            .iter()
            .position(|id| id == tab_id)
            .map(|index| (pos, index))
    });

    let mut insert_at = index.min(snapshot.docks[target_pos].tab_ids.len());
    if let Some((source_pos, source_index)) = source {
        if source_pos == target_pos {
            if source_index < insert_at {
                insert_at -= 1;
            }
            if source_index == insert_at {
                return CommitOutcome::NoOp(NoOpReason::Unchanged);
            }
        }
    }

    let mut next = snapshot.clone();
    if let Some((source_pos, source_index)) = source {
        next.docks[source_pos].tab_ids.remove(source_index);
    }
    next.docks[target_pos]
        .tab_ids
        .insert(insert_at, tab_id.to_string());

    if let Some(tab) = next.tabs.iter_mut().find(|t| t.id == tab_id) {
        tab.dock_id = Some(target_dock.to_string());
    }

    CommitOutcome::Committed(next)
}

/// Resolve and commit in one step
pub fn move_item(snapshot: &Snapshot, item: &DragItem, region: &DropRegion) -> CommitOutcome {
    match resolve(snapshot, item, region) {
        Resolution::Drop(target) => commit(snapshot, item, &target),
        Resolution::NoOp(reason) => CommitOutcome::NoOp(reason),
    }
}

/// State carried from drag-start to drag-end.
///
/// Owned by the caller; every call takes the latest snapshot so external
/// changes during the drag are picked up.
#[derive(Debug, Clone)]
pub struct DragSession {
    item: DragItem,
    origin: Option<DropTarget>,
    target: Option<DropTarget>,
}

impl DragSession {
    /// Start dragging `item`; `None` if it is not in the snapshot
    pub fn start(snapshot: &Snapshot, item: DragItem) -> Option<Self> {
        let origin = match &item {
            DragItem::Dock { dock_id } => Some(DropTarget {
                container: Container::DockList,
                index: snapshot.dock_index(dock_id)?,
            }),
            DragItem::Tab { tab_id } => {
                if !tab_is_known(snapshot, tab_id) {
                    return None;
                }
                snapshot
                    .locate_tab(tab_id)
                    .map(|(dock, index)| DropTarget::in_dock(&dock.id, index))
            }
        };

        Some(Self {
            item,
            origin,
            target: None,
        })
    }

    pub fn item(&self) -> &DragItem {
        &self.item
    }

    /// Position the item was picked up from; `None` for undocked tabs
    pub fn origin(&self) -> Option<&DropTarget> {
        self.origin.as_ref()
    }

    pub fn target(&self) -> Option<&DropTarget> {
        self.target.as_ref()
    }

    /// Update the target for a drag-over frame. `None` means no region is hovered.
    pub fn over(&mut self, snapshot: &Snapshot, region: Option<&DropRegion>) -> Option<&DropTarget> {
        self.target = region.and_then(|region| match resolve(snapshot, &self.item, region) {
            Resolution::Drop(target) => Some(target),
            Resolution::NoOp(_) => None,
        });
        self.target.as_ref()
    }

    /// Finish the drag, committing against `snapshot`
    pub fn end(self, snapshot: &Snapshot) -> CommitOutcome {
        match &self.target {
            Some(target) => commit(snapshot, &self.item, target),
            None => CommitOutcome::NoOp(NoOpReason::NoTarget),
        }
    }

    pub fn cancel(self) {
        tracing::trace!(item = ?self.item, "Drag cancelled");
    }
}
