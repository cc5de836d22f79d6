use crate::models::ClassifierResult;
use moka::future::Cache;
use sha2::{Digest, Sha256};
use std::time::Duration;

/// Cache of AI classifications keyed by the prompt that produced them.
///
/// Keys are SHA-256 digests (hex encoded) of the full prompt, so an edit to
/// the offer or to any lead field yields a fresh entry. Only AI-derived
/// results belong here; fallback results are never inserted.
#[derive(Clone)]
pub struct ClassificationCache {
    inner: Cache<String, ClassifierResult>,
}

impl ClassificationCache {
    /// Returns `None` when `ttl_secs` is 0 (cache disabled).
    pub fn from_ttl(ttl_secs: u64) -> Option<Self> {
        if ttl_secs == 0 {
            return None;
        }

        let inner = Cache::builder()
            .time_to_live(Duration::from_secs(ttl_secs))
            .max_capacity(10_000)
            .build();
        tracing::info!(
            "Classification cache initialized ({}s TTL, 10k capacity)",
            ttl_secs
        );

        Some(Self { inner })
    }

    /// Computes the cache key for a prompt.
    pub fn key_for(prompt: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(prompt.as_bytes());
        hex::encode(hasher.finalize())
    }

    pub async fn get(&self, prompt: &str) -> Option<ClassifierResult> {
        self.inner.get(&Self::key_for(prompt)).await
    }

    pub async fn insert(&self, prompt: &str, result: ClassifierResult) {
        self.inner.insert(Self::key_for(prompt), result).await;
    }
}
