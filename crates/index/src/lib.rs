//! In-memory index of Dojo module declarations across source trees.
//!
//! The [`ModuleIndex`] maps every scanned file to the declarations found in
//! it, and flattens those into the two views a definition/completion
//! feature needs: all fully-qualified module names, and all
//! (short name, fully-qualified name) pairs.
//!
//! The index is rebuilt on demand, never watched: callers trigger either a
//! sequential per-root scan ([`ModuleIndex::scan_path`]) that adds to the
//! cache, or a full concurrent rescan ([`ModuleIndex::scan_all`]) that
//! clears it first and is the only point at which entries for deleted
//! files are pruned. Nothing is persisted across restarts; the source
//! trees themselves are the source of truth and the index can always be
//! rebuilt from them.

pub mod error;
mod index;
mod walk;

pub use crate::index::{FileEntry, ModuleIndex};
pub use crate::walk::{Completion, ScanSummary};
