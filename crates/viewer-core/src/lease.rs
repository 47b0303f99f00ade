use std::{
    collections::HashMap,
    fmt, fs, io,
    path::Path,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, MutexGuard,
    },
};

use log::debug;

const URL_SCHEME: &str = "blob:betterread/";

#[derive(Default)]
struct Registry {
    next_id: AtomicU64,
    revoked: AtomicU64,
    live: Mutex<HashMap<String, Arc<[u8]>>>,
}

impl Registry {
    fn live(&self) -> MutexGuard<'_, HashMap<String, Arc<[u8]>>> {
        match self.live.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// In-memory references to opened files, handed to the renderer as URLs.
/// Cloning shares the same registry.
#[derive(Clone, Default)]
pub struct ObjectUrls {
    registry: Arc<Registry>,
}

impl ObjectUrls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, bytes: Vec<u8>) -> ObjectUrl {
        let id = self.registry.next_id.fetch_add(1, Ordering::Relaxed);
        let url = format!("{URL_SCHEME}{id}");
        debug!("object url {} created ({} bytes)", url, bytes.len());
        self.registry.live().insert(url.clone(), Arc::from(bytes));
        ObjectUrl {
            url,
            registry: Arc::clone(&self.registry),
        }
    }

    pub fn create_from_path(&self, path: &Path) -> io::Result<ObjectUrl> {
        let bytes = fs::read(path)?;
        Ok(self.create(bytes))
    }

    /// Bytes behind a live URL; `None` once it has been released.
    pub fn resolve(&self, url: &str) -> Option<Arc<[u8]>> {
        self.registry.live().get(url).cloned()
    }

    pub fn live_count(&self) -> usize {
        self.registry.live().len()
    }

    pub fn revoked_count(&self) -> u64 {
        self.registry.revoked.load(Ordering::Relaxed)
    }
}

/// Scoped handle on a registered file: released when dropped.
pub struct ObjectUrl {
    url: String,
    registry: Arc<Registry>,
}

impl ObjectUrl {
    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl fmt::Debug for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObjectUrl").field(&self.url).finish()
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        if self.registry.live().remove(&self.url).is_some() {
            self.registry.revoked.fetch_add(1, Ordering::Relaxed);
            debug!("object url {} released", self.url);
        }
    }
}
