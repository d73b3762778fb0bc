use crate::document::Document;
use crate::error::Result;
use crate::fingerprint::Fingerprint;
use parking_lot::RwLock;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const POST_EXTENSIONS: &[&str] = &["html", "htm"];

/// Documents together with the directory state that produced them.
/// Always replaced as a unit.
struct Snapshot {
    documents: Arc<[Document]>,
    fingerprint: Fingerprint,
}

/// Parsed posts of a single directory, refreshed lazily.
///
/// Reads compare a fresh [`Fingerprint`] of the directory with the one taken
/// at the last refresh and rescan everything on mismatch. Readers share the
/// lock; a refresh holds it exclusively. Transient filesystem errors during
/// a read fall back to the last good snapshot.
pub struct PostCache {
    post_dir: PathBuf,
    state: RwLock<Snapshot>,
    refreshes: AtomicUsize,
}

impl PostCache {
    /// Scan `post_dir` once. Fails if the directory cannot be walked or
    /// listed; no empty cache is created in that case.
    pub fn new<P: AsRef<Path>>(post_dir: P) -> Result<Self> {
        let post_dir = post_dir.as_ref().to_path_buf();
        log::info!("scanning posts in {}", post_dir.display());

        let fingerprint = Fingerprint::of(&post_dir)?;
        let snapshot = scan(&post_dir, fingerprint)?;

        Ok(Self {
            post_dir,
            state: RwLock::new(snapshot),
            refreshes: AtomicUsize::new(1),
        })
    }

    pub fn post_dir(&self) -> &Path {
        self.post_dir.as_path()
    }

    /// Number of refreshes performed, including the initial scan.
    pub fn refresh_count(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }

    /// All posts, refreshed first if the directory changed.
    pub fn get_all(&self) -> Arc<[Document]> {
        {
            let state = self.state.read();
            match Fingerprint::of(&self.post_dir) {
                Ok(current) if current == state.fingerprint => {
                    return state.documents.clone();
                }
                Ok(_) => {}
                Err(error) => {
                    log::warn!(
                        "unable to check {}, serving stale posts: {}",
                        self.post_dir.display(),
                        error
                    );
                    return state.documents.clone();
                }
            }
        }

        let mut state = self.state.write();
        self.refresh(&mut state);
        state.documents.clone()
    }

    /// Rescan if the directory still differs from `state`. Returns whether
    /// `state` was replaced; on any failure it is left untouched. Callers
    /// must hold the write lock.
    fn refresh(&self, state: &mut Snapshot) -> bool {
        // Another caller may have refreshed while we waited for the lock.
        let current = match Fingerprint::of(&self.post_dir) {
            Ok(current) if current == state.fingerprint => return false,
            Ok(current) => current,
            Err(error) => {
                log::warn!(
                    "unable to check {}, serving stale posts: {}",
                    self.post_dir.display(),
                    error
                );
                return false;
            }
        };

        for path in state.fingerprint.changed_paths(&current) {
            log::debug!("changed: {}", path.display());
        }
        log::info!("{} changed, refreshing posts", self.post_dir.display());

        match scan(&self.post_dir, current) {
            Ok(snapshot) => {
                *state = snapshot;
                self.refreshes.fetch_add(1, Ordering::SeqCst);
                true
            }
            Err(error) => {
                log::error!("refresh failed, serving stale posts: {}", error);
                false
            }
        }
    }

    /// The post with `id`, after the same change check as [`get_all`].
    ///
    /// [`get_all`]: PostCache::get_all
    pub fn get_by_id(&self, id: usize) -> Option<Document> {
        self.get_all().iter().find(|doc| doc.id == id).cloned()
    }
}

fn is_post(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            POST_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or_default()
}

// `fingerprint` must be taken before the files are read, so a write that
// races the scan shows up as a mismatch on the next read.
fn scan(post_dir: &Path, fingerprint: Fingerprint) -> Result<Snapshot> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(post_dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            continue;
        }

        let path = entry.path();
        if is_post(&path) {
            paths.push(path);
        }
    }
    paths.sort();

    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(error) => {
                log::warn!("skipping {}: {}", path.display(), error);
                continue;
            }
        };
        let body = match String::from_utf8(bytes) {
            Ok(body) => body,
            Err(error) => {
                log::warn!("{} is not valid UTF-8, decoding lossily", path.display());
                String::from_utf8_lossy(error.as_bytes()).into_owned()
            }
        };

        let id = documents.len();
        log::debug!("post {} <- {}", id, path.display());
        documents.push(Document::parse(id, body));
    }

    log::info!("loaded {} posts from {}", documents.len(), post_dir.display());

    Ok(Snapshot {
        documents: documents.into(),
        fingerprint,
    })
}
