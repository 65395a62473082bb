//! Fingerprinted AST cache.
//!
//! Parsing is cheap but not free; callers that compile the same document
//! repeatedly (watch modes, template previews) can memoize the parsed tree
//! keyed by a fingerprint of the source text. Entries expire after a TTL
//! and are swept opportunistically on insert. Nothing is persisted.

use crate::error::ParseError;
use crate::node::MjmlNode;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};
use std::time::{Duration, Instant};

const DEFAULT_TTL: Duration = Duration::from_secs(300);
const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// Stable 64-bit FNV-1a fingerprint of the source text.
///
/// Deliberately not `DefaultHasher`: the fingerprint must be identical
/// across processes so that observed cache behavior is reproducible.
pub fn fingerprint(source: &str) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    let mut hash = OFFSET;
    for byte in source.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

struct Entry {
    tree: Arc<MjmlNode>,
    inserted: Instant,
}

/// TTL-bounded map from source fingerprint to parsed tree.
pub struct AstCache {
    entries: Mutex<HashMap<u64, Entry>>,
    ttl: OnceLock<Duration>,
    cleanup_interval: OnceLock<Duration>,
    last_cleanup: Mutex<Instant>,
}

impl AstCache {
    /// Creates an empty cache with the default TTL and cleanup interval.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl: OnceLock::new(),
            cleanup_interval: OnceLock::new(),
            last_cleanup: Mutex::new(Instant::now()),
        }
    }

    /// Sets the entry TTL. Only the first call has any effect; later
    /// calls are silent no-ops, not errors.
    pub fn set_ttl_once(&self, ttl: Duration) {
        let _ = self.ttl.set(ttl);
    }

    /// Sets the sweep interval. Only the first call has any effect.
    pub fn set_cleanup_interval_once(&self, interval: Duration) {
        let _ = self.cleanup_interval.set(interval);
    }

    fn ttl(&self) -> Duration {
        *self.ttl.get().unwrap_or(&DEFAULT_TTL)
    }

    fn cleanup_interval(&self) -> Duration {
        *self.cleanup_interval.get().unwrap_or(&DEFAULT_CLEANUP_INTERVAL)
    }

    /// Parses `source` through the cache.
    pub fn parse(&self, source: &str) -> Result<Arc<MjmlNode>, ParseError> {
        let key = fingerprint(source);
        if let Some(tree) = self.get(key) {
            log::debug!("ast cache hit for fingerprint {key:016x}");
            return Ok(tree);
        }
        let tree = Arc::new(crate::parser::parse(source)?);
        self.insert(key, Arc::clone(&tree));
        Ok(tree)
    }

    /// Looks up a live entry.
    pub fn get(&self, key: u64) -> Option<Arc<MjmlNode>> {
        let entries = self.entries.lock().expect("ast cache poisoned");
        let entry = entries.get(&key)?;
        if entry.inserted.elapsed() > self.ttl() {
            return None;
        }
        Some(Arc::clone(&entry.tree))
    }

    /// Inserts a parsed tree, sweeping expired entries if the cleanup
    /// interval has elapsed.
    pub fn insert(&self, key: u64, tree: Arc<MjmlNode>) {
        let mut entries = self.entries.lock().expect("ast cache poisoned");
        let mut last_cleanup = self.last_cleanup.lock().expect("ast cache poisoned");
        if last_cleanup.elapsed() > self.cleanup_interval() {
            let ttl = self.ttl();
            let before = entries.len();
            entries.retain(|_, entry| entry.inserted.elapsed() <= ttl);
            log::debug!("ast cache sweep removed {} entries", before - entries.len());
            *last_cleanup = Instant::now();
        }
        entries.insert(
            key,
            Entry {
                tree,
                inserted: Instant::now(),
            },
        );
    }

    /// Number of entries currently held, expired or not.
    pub fn len(&self) -> usize {
        self.entries.lock().expect("ast cache poisoned").len()
    }

    /// Returns true when the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for AstCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide cache instance used by the CLI's `--cache` flag.
pub fn global_cache() -> &'static AstCache {
    static CACHE: OnceLock<AstCache> = OnceLock::new();
    CACHE.get_or_init(AstCache::new)
}
