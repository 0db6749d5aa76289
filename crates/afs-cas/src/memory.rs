use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::sync::RwLock;

use afs_sri::Integrity;
use tracing::debug;

use crate::config::CasConfig;
use crate::error::{CasError, CasResult};
use crate::traits::{CasReader, CasWriter};

/// In-memory, HashMap-based content store.
///
/// Intended for tests and embedding. Content is held behind a `RwLock` for
/// safe concurrent access and is cloned on read.
pub struct InMemoryCas {
    objects: RwLock<HashMap<String, Vec<u8>>>,
    config: CasConfig,
}

impl InMemoryCas {
    /// Create an empty store with the default configuration.
    pub fn new() -> Self {
        Self::with_config(CasConfig::default())
    }

    pub fn with_config(config: CasConfig) -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
            config,
        }
    }

    pub fn config(&self) -> &CasConfig {
        &self.config
    }

    /// Hash `data` with the configured algorithm, store it, and return its
    /// integrity string.
    pub fn insert_bytes(&self, data: &[u8]) -> CasResult<String> {
        let sri = Integrity::from_bytes(self.config.algorithm, data).to_string();
        self.write(&sri, &mut &data[..])?;
        Ok(sri)
    }

    /// Number of stored payloads.
    pub fn len(&self) -> usize {
        self.objects.read().expect("lock poisoned").len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.objects.read().expect("lock poisoned").is_empty()
    }

    /// Returns `true` if content is stored under `sri`.
    pub fn contains(&self, sri: &str) -> bool {
        self.objects.read().expect("lock poisoned").contains_key(sri)
    }

    /// Total bytes across all stored payloads.
    pub fn total_bytes(&self) -> u64 {
        self.objects
            .read()
            .expect("lock poisoned")
            .values()
            .map(|data| data.len() as u64)
            .sum()
    }

    /// Sorted list of every stored integrity string.
    pub fn all_keys(&self) -> Vec<String> {
        let map = self.objects.read().expect("lock poisoned");
        let mut keys: Vec<String> = map.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Remove all content.
    pub fn clear(&self) {
        self.objects.write().expect("lock poisoned").clear();
    }

    fn verify(sri: &str, data: &[u8]) -> CasResult<()> {
        let expected = Integrity::parse(sri).map_err(|source| CasError::InvalidIntegrity {
            sri: sri.to_string(),
            source,
        })?;
        let computed = Integrity::from_bytes(expected.algorithm(), data);
        if computed != expected {
            return Err(CasError::IntegrityMismatch {
                expected: sri.to_string(),
                computed: computed.to_string(),
            });
        }
        Ok(())
    }
}

impl Default for InMemoryCas {
    fn default() -> Self {
        Self::new()
    }
}

impl CasReader for InMemoryCas {
    fn open(&self, sri: &str) -> CasResult<Box<dyn Read + Send>> {
        let map = self.objects.read().expect("lock poisoned");
        let data = map
            .get(sri)
            .cloned()
            .ok_or_else(|| CasError::NotFound(sri.to_string()))?;
        Ok(Box::new(Cursor::new(data)))
    }

    fn exists(&self, sri: &str) -> CasResult<bool> {
        Ok(self.contains(sri))
    }
}

impl CasWriter for InMemoryCas {
    fn write(&self, sri: &str, payload: &mut dyn Read) -> CasResult<()> {
        if self.config.read_only {
            return Err(CasError::ReadOnly);
        }
        let mut data = Vec::new();
        payload.read_to_end(&mut data)?;
        if self.config.verify_writes {
            Self::verify(sri, &data)?;
        }

        let bytes = data.len();
        let mut map = self.objects.write().expect("lock poisoned");
        // Idempotent: the same key always names the same content.
        map.entry(sri.to_string()).or_insert(data);
        debug!(sri, bytes, "stored content");
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryCas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryCas")
            .field("object_count", &self.len())
            .field("config", &self.config)
            .finish()
    }
}
