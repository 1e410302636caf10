use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Declarations found in one file: short name → fully-qualified name.
pub type FileEntry = HashMap<String, String>;

/// Cache of module declarations across all scanned files.
///
/// One instance per workspace or editing session, threaded explicitly
/// through every operation rather than living in a process-wide global.
/// Interior mutability lets concurrent scan workers share it behind an
/// `Arc`; each write replaces a whole file's entry under the lock, so
/// overlapping workers can never interleave half-finished entries.
#[derive(Debug, Default)]
pub struct ModuleIndex {
    entries: RwLock<HashMap<PathBuf, FileEntry>>,
}

impl ModuleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every cached entry.
    pub fn clear(&self) {
        self.write().clear();
    }

    /// Number of files currently cached.
    pub fn file_count(&self) -> usize {
        self.read().len()
    }

    /// All fully-qualified module names across every cached file
    /// (e.g. `com.spam.Eggs`).
    ///
    /// A snapshot, in no significant order; the same name declared in two
    /// files appears twice.
    pub fn modules(&self) -> Vec<String> {
        self.read().values().flat_map(|entry| entry.values().cloned()).collect()
    }

    /// All (short name, fully-qualified name) pairs across every cached
    /// file (e.g. `(Eggs, com.spam.Eggs)`), in no significant order.
    pub fn modules_by_name(&self) -> Vec<(String, String)> {
        self.read()
            .values()
            .flat_map(|entry| entry.iter().map(|(s, q)| (s.clone(), q.clone())))
            .collect()
    }

    /// Scans one file and replaces its cached entry.
    ///
    /// The previous entry for `path` is fully discarded, never merged, so
    /// declarations removed from the file also disappear from the index.
    /// Returns the fully-qualified names found, in order of appearance.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read; the index keeps whatever entry it
    /// had for the path in that case.
    pub async fn scan_file(&self, path: &Path) -> Result<Vec<String>> {
        let provides = dojoscout_scan::scan_file(path)
            .await
            .or_raise(|| ErrorKind::Scan(path.to_path_buf()))?;
        let qualified: Vec<String> = provides.iter().map(|p| p.qualified.clone()).collect();
        // Within one file, a later declaration of the same short name wins.
        let entry: FileEntry = provides.into_iter().map(|p| (p.short, p.qualified)).collect();
        self.write().insert(path.to_path_buf(), entry);
        Ok(qualified)
    }

    // A panicking worker can't leave the map structurally broken (every
    // mutation is a single insert or clear), so poisoning is ignored
    // rather than propagated.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<PathBuf, FileEntry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<PathBuf, FileEntry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}
