use crate::index::ModuleIndex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::oneshot;
use tokio::task::JoinSet;

/// Totals handed to the completion signal after a full rescan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Distinct root paths that were scanned.
    pub roots: usize,
    /// Files visited and scanned across all roots.
    pub files: u64,
}

/// Signal that fires once every worker of a [`ModuleIndex::scan_all`] call
/// has finished.
#[derive(Debug)]
pub struct Completion {
    rx: oneshot::Receiver<ScanSummary>,
}

impl Completion {
    /// Waits for the rescan to finish.
    ///
    /// Returns an empty summary in the degenerate case where the runtime is
    /// torn down before the supervising task gets to fire the signal.
    pub async fn wait(self) -> ScanSummary {
        self.rx.await.unwrap_or_default()
    }
}

impl ModuleIndex {
    /// Recursively scans one directory tree for `.js` files and their
    /// declarations.
    ///
    /// Can be called many times; each call adds to the cache, replacing
    /// entries only for the files it actually visits. Entries for files
    /// deleted since a previous scan are *not* pruned here; only
    /// [`ModuleIndex::scan_all`] does that.
    ///
    /// A root that is missing or not a directory logs a warning and
    /// contributes nothing. Directories or files that fail mid-walk are
    /// logged and skipped; the walk always runs to the end. Returns the
    /// number of files scanned.
    pub async fn scan_path(&self, root: &Path) -> u64 {
        match fs::metadata(root).await {
            Ok(meta) if meta.is_dir() => {},
            _ => {
                tracing::warn!(path = %root.display(), "search path not found");
                return 0;
            },
        }

        let mut scanned = 0u64;
        let mut stack = vec![root.to_path_buf()];
        while let Some(current) = stack.pop() {
            tracing::debug!(path = %current.display(), "visiting directory");
            let mut entries = match fs::read_dir(&current).await {
                Ok(entries) => entries,
                Err(err) => {
                    tracing::warn!(path = %current.display(), %err, "cannot enumerate directory");
                    continue;
                },
            };
            loop {
                let entry = match entries.next_entry().await {
                    Ok(Some(entry)) => entry,
                    Ok(None) => break,
                    Err(err) => {
                        tracing::warn!(path = %current.display(), %err, "cannot read directory entry");
                        break;
                    },
                };
                let path = entry.path();
                match entry.file_type().await {
                    Ok(kind) if kind.is_dir() => stack.push(path),
                    Ok(kind) if kind.is_file() && has_js_extension(&path) => {
                        match self.scan_file(&path).await {
                            Ok(_) => scanned += 1,
                            Err(err) => {
                                tracing::warn!(path = %path.display(), %err, "skipping unreadable file");
                            },
                        }
                    },
                    // Other kinds (sockets, broken symlinks) are dropped,
                    // and symlinked directories are not followed.
                    Ok(_) => {},
                    Err(err) => {
                        tracing::warn!(path = %path.display(), %err, "cannot stat directory entry");
                    },
                }
            }
        }
        scanned
    }

    /// Rescans every given root from scratch, concurrently.
    ///
    /// Clears the whole index first — the only point at which entries for
    /// deleted files are pruned — then launches one worker per distinct
    /// root (duplicate roots collapse) and returns immediately. Completion
    /// is observable only through the returned [`Completion`] signal,
    /// fired exactly once from a supervising task after the last worker
    /// finishes.
    ///
    /// There is no cancellation: a rescan triggered while a previous one
    /// is still running does not interrupt it. Both run to completion and
    /// the last write per path wins, which is acceptable because every
    /// scan is self-contained.
    ///
    /// Must be called from within a tokio runtime.
    pub fn scan_all(self: &Arc<Self>, roots: impl IntoIterator<Item = PathBuf>) -> Completion {
        // Clearing before any worker is spawned gives the required
        // happens-before ordering between the clear and the first write.
        self.clear();

        let roots: HashSet<PathBuf> = roots.into_iter().collect();
        let root_count = roots.len();
        let mut workers = JoinSet::new();
        for root in roots {
            let index = Arc::clone(self);
            workers.spawn(async move { index.scan_path(&root).await });
        }

        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let mut files = 0u64;
            while let Some(joined) = workers.join_next().await {
                match joined {
                    Ok(count) => files += count,
                    Err(err) => tracing::warn!(%err, "scan worker panicked"),
                }
            }
            tracing::info!(roots = root_count, files, "module scan complete");
            // The caller may have dropped the signal without waiting.
            let _ = tx.send(ScanSummary { roots: root_count, files });
        });
        Completion { rx }
    }
}

fn has_js_extension(path: &Path) -> bool {
    // Case-sensitive on purpose: `.JS` files are not Dojo modules.
    path.extension().is_some_and(|ext| ext == "js")
}
