//! Core engine module - pure logic over session snapshots.
//!
//! Nothing in here performs I/O or keeps state between calls:
//! - Fuzzy scoring of tab titles and URLs
//! - Tab search ranking and the last-query-wins search session
//! - Drop-target resolution and reorder commits for docks and tabs

pub mod fuzzy;
pub mod reorder;
pub mod search;

pub use reorder::{
    classify, commit, move_item, resolve, CommitOutcome, Container, DragItem, DragSession,
    DropRegion, DropTarget, MoveKind, NoOpReason, Resolution,
};
pub use search::{activate, favicon_url, rank, SearchEngine, SearchResult, SearchSession};
