//! Generative Content Cache: lookup → (miss/expired) prompt → LLM → parse →
//! persist → assemble.
//!
//! One `ContentCache` per content type, each with its own `DiskStore`. Fresh
//! entries are never regenerated inside the TTL window, across restarts
//! included. Expired entries are evicted lazily when read.
//!
//! Concurrency: a per-key single-flight lock collapses concurrent misses on the
//! same key into one upstream call, and a per-store lock serializes every
//! load-modify-save cycle so writers to different keys never lose updates.

use std::marker::PhantomData;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::content::assemble::as_payload;
use crate::content::parser::{parse_payload, Payload};
use crate::content::single_flight::KeyedLocks;
use crate::content::store::{CacheEntry, DiskStore, StoreError};
use crate::llm_client::{LlmError, TextGenerator};

/// Validity window for every cached text artifact: 10 days.
pub const CACHE_TTL_SECS: f64 = 10.0 * 24.0 * 60.0 * 60.0;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Generation failed: {0}")]
    Generation(#[from] LlmError),

    #[error("Cache store failed: {0}")]
    Store(#[from] StoreError),
}

/// One generated content type: how to key it, prompt for it, recover from an
/// unparsable reply, and assemble the typed result.
pub trait ContentKind: Send + Sync + 'static {
    /// Request context: identity for the key plus descriptive fields for the prompt.
    type Source: Send + Sync;
    /// Fully assembled, schema-valid entity returned to callers.
    type Output;

    /// Human label used in log lines, e.g. "item detail".
    const LABEL: &'static str;
    const SYSTEM_PROMPT: &'static str;
    const MAX_TOKENS: u32;

    fn cache_key(source: &Self::Source) -> String;

    fn build_prompt(source: &Self::Source) -> String;

    /// Deterministic substitute used when the model reply is not a JSON object.
    /// Must depend on `source` only.
    fn fallback_payload(source: &Self::Source) -> Payload;

    /// Records generation-time context into the payload before it is persisted.
    fn annotate(_source: &Self::Source, _payload: &mut Payload, _generated_at: DateTime<Utc>) {}

    fn assemble(payload: &Payload, source: &Self::Source) -> Self::Output;
}

/// Wall-clock seconds since the epoch, with millisecond precision.
pub fn now_secs() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}

/// True while `now - cached_at` is strictly inside the TTL window.
pub fn is_fresh(entry: &CacheEntry, now: f64) -> bool {
    entry.age_secs(now) < CACHE_TTL_SECS
}

pub struct ContentCache<K: ContentKind> {
    store: DiskStore,
    llm: Arc<dyn TextGenerator>,
    model: String,
    store_lock: Mutex<()>,
    in_flight: KeyedLocks,
    _kind: PhantomData<fn() -> K>,
}

impl<K: ContentKind> ContentCache<K> {
    pub fn new(store: DiskStore, llm: Arc<dyn TextGenerator>, model: impl Into<String>) -> Self {
        Self {
            store,
            llm,
            model: model.into(),
            store_lock: Mutex::new(()),
            in_flight: KeyedLocks::new(),
            _kind: PhantomData,
        }
    }

    #[cfg(test)]
    pub fn store(&self) -> &DiskStore {
        &self.store
    }

    /// Returns the entity for `source`, generating and caching it on a miss.
    ///
    /// Unparsable model output is replaced by the fallback payload; upstream
    /// call failures propagate as `ContentError::Generation`.
    pub async fn get_or_generate(&self, source: &K::Source) -> Result<K::Output, ContentError> {
        let key = K::cache_key(source);

        if let Some(payload) = self.lookup(&key).await? {
            return Ok(K::assemble(&payload, source));
        }

        let _flight = self.in_flight.acquire(&key).await;

        // Another caller may have filled the entry while we waited for the key.
        if let Some(payload) = self.lookup(&key).await? {
            return Ok(K::assemble(&payload, source));
        }

        info!("Generating {} for {} via LLM...", K::LABEL, key);
        let prompt = K::build_prompt(source);
        let raw = self
            .llm
            .generate(&prompt, K::SYSTEM_PROMPT, K::MAX_TOKENS, &self.model)
            .await?;

        let mut payload = parse_payload(&raw, || K::fallback_payload(source));
        K::annotate(source, &mut payload, Utc::now());

        self.persist(&key, &payload).await?;
        info!(
            "Cached {} for {} (TTL {} days)",
            K::LABEL,
            key,
            (CACHE_TTL_SECS / 86_400.0) as u64
        );

        Ok(K::assemble(&payload, source))
    }

    /// Fresh payload for `key`, if any. A stale entry is deleted and the store
    /// rewritten before returning `None`.
    pub async fn lookup(&self, key: &str) -> Result<Option<Payload>, StoreError> {
        let _guard = self.store_lock.lock().await;
        let mut map = self.store.load();
        let now = now_secs();

        let Some(entry) = map.get(key) else {
            return Ok(None);
        };

        if is_fresh(entry, now) {
            info!(
                "Cache hit for {} (age {:.1} hrs)",
                key,
                entry.age_secs(now) / 3600.0
            );
            return Ok(Some(as_payload(&entry.data)));
        }

        warn!("Evicting expired {} entry {}", K::LABEL, key);
        map.remove(key);
        self.store.save(&map)?;
        Ok(None)
    }

    /// All fresh entries, without evicting anything.
    pub async fn fresh_entries(&self) -> Vec<(String, CacheEntry)> {
        let _guard = self.store_lock.lock().await;
        let now = now_secs();
        self.store
            .load()
            .into_iter()
            .filter(|(_, entry)| is_fresh(entry, now))
            .collect()
    }

    async fn persist(&self, key: &str, payload: &Payload) -> Result<(), StoreError> {
        let _guard = self.store_lock.lock().await;
        let mut map = self.store.load();
        map.insert(
            key.to_string(),
            CacheEntry::new(now_secs(), Value::Object(payload.clone())),
        );
        self.store.save(&map)
    }

    /// Number of keys with a generation currently in progress or queued.
    #[cfg(test)]
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }
}
