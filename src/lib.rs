//! Realms - tab search and dock reordering for a multi-realm browser shell.
//!
//! The browser shell groups tabs into realms (workspaces) and docks (ordered,
//! collapsible tab containers). This crate holds the UI-independent logic
//! behind its search palette and its drag-and-drop sidebar.
//!
//! # Architecture
//!
//! - [`model`] - Snapshot types (realms, docks, tabs) and invariant checks
//! - [`core`] - Fuzzy scoring, tab ranking, drop-target resolution
//! - [`services`] - Session provider seam and wheel swipe forwarding
//! - [`config`] - Configuration loading and management
//! - [`cli`] - The `realms` command-line tool
//!
//! # Example
//!
//! ```ignore
//! use realms::{Config, SearchEngine, Snapshot};
//!
//! let config = Config::load();
//! let snapshot = Snapshot::load(&config.session.resolved_snapshot_path())?;
//!
//! let engine = SearchEngine::new(&config.search);
//! for result in engine.rank(&snapshot, "docs") {
//!     println!("{} ({})", result.display_title("New Tab"), result.breadcrumb());
//! }
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod model;
pub mod services;

mod error;

// Re-export commonly used types for convenience
pub use config::Config;
pub use crate::core::reorder::{CommitOutcome, DragItem, DragSession, DropRegion, DropTarget};
pub use crate::core::search::{SearchEngine, SearchResult, SearchSession};
pub use error::{RealmsError, RealmsResult};
pub use model::{Dock, Realm, Snapshot, Tab, ThemeColor};
pub use services::{MemorySession, SessionProvider, SwipeFilter};
