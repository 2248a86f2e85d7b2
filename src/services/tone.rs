use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::{
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::Tone,
};

/// Per-user persisted explanation tone
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ToneStore: Send + Sync {
    /// Stored tone for the user, `None` when never set
    async fn get_tone(&self, user_id: &str) -> AppResult<Option<Tone>>;

    async fn set_tone(&self, user_id: &str, tone: Tone) -> AppResult<()>;
}

fn normalize_user_id(user_id: &str) -> AppResult<&str> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        return Err(AppError::InvalidInput("user id must not be empty".to_string()));
    }
    Ok(user_id)
}

#[derive(Debug, Default)]
pub struct InMemoryToneStore {
    tones: RwLock<HashMap<String, Tone>>,
}

impl InMemoryToneStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ToneStore for InMemoryToneStore {
    async fn get_tone(&self, user_id: &str) -> AppResult<Option<Tone>> {
        let user_id = normalize_user_id(user_id)?;
        Ok(self.tones.read().await.get(user_id).copied())
    }

    async fn set_tone(&self, user_id: &str, tone: Tone) -> AppResult<()> {
        let user_id = normalize_user_id(user_id)?;
        self.tones.write().await.insert(user_id.to_string(), tone);
        Ok(())
    }
}

/// Tone settings kept in Redis under `tone:{user_id}`
#[derive(Clone)]
pub struct RedisToneStore {
    cache: Cache,
    ttl: u64,
}

impl RedisToneStore {
    pub fn new(cache: Cache, ttl: u64) -> Self {
        Self { cache, ttl }
    }
}

#[async_trait::async_trait]
impl ToneStore for RedisToneStore {
    async fn get_tone(&self, user_id: &str) -> AppResult<Option<Tone>> {
        let user_id = normalize_user_id(user_id)?;
        self.cache
            .get_from_cache(&CacheKey::Tone(user_id.to_string()))
            .await
    }

    async fn set_tone(&self, user_id: &str, tone: Tone) -> AppResult<()> {
        let user_id = normalize_user_id(user_id)?;
        // Written synchronously so the next explanation request sees it.
        self.cache
            .set(&CacheKey::Tone(user_id.to_string()), &tone, self.ttl)
            .await
    }
}

/// Tone to use for one explanation request
///
/// Precedence: the explicit request tone, then the user's stored setting,
/// then `default`. The store is consulted on every call, never memoized.
pub async fn resolve_tone(
    store: &dyn ToneStore,
    explicit: Option<Tone>,
    user_id: Option<&str>,
    default: Tone,
) -> AppResult<Tone> {
    if let Some(tone) = explicit {
        return Ok(tone);
    }

    let Some(user_id) = user_id.map(str::trim).filter(|u| !u.is_empty()) else {
        return Ok(default);
    };

    let stored = store.get_tone(user_id).await?;
    if stored.is_none() {
        tracing::debug!(user_id, default = %default, "No stored tone, using default");
    }
    Ok(stored.unwrap_or(default))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_in_memory_roundtrip() {
        let store = InMemoryToneStore::new();
        assert_eq!(store.get_tone("u1").await.unwrap(), None);

        store.set_tone(" u1 ", Tone::Editorial).await.unwrap();
        assert_eq!(store.get_tone("u1").await.unwrap(), Some(Tone::Editorial));
    }

    #[tokio::test]
    async fn test_empty_user_id_rejected() {
        let store = InMemoryToneStore::new();
        let err = store.set_tone("  ", Tone::Playful).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_explicit_tone_wins_without_store_lookup() {
        let mut store = MockToneStore::new();
        store.expect_get_tone().never();

        let tone = resolve_tone(&store, Some(Tone::Playful), Some("u1"), Tone::Minimal)
            .await
            .unwrap();
        assert_eq!(tone, Tone::Playful);
    }

    #[tokio::test]
    async fn test_stored_tone_used_when_present() {
        let mut store = MockToneStore::new();
        store
            .expect_get_tone()
            .with(eq("u1"))
            .times(1)
            .returning(|_| Ok(Some(Tone::Editorial)));

        let tone = resolve_tone(&store, None, Some("u1"), Tone::Minimal)
            .await
            .unwrap();
        assert_eq!(tone, Tone::Editorial);
    }

    #[tokio::test]
    async fn test_default_when_nothing_stored() {
        let mut store = MockToneStore::new();
        store.expect_get_tone().returning(|_| Ok(None));

        let tone = resolve_tone(&store, None, Some("u2"), Tone::Playful)
            .await
            .unwrap();
        assert_eq!(tone, Tone::Playful);
    }

    #[tokio::test]
    async fn test_anonymous_request_uses_default() {
        let mut store = MockToneStore::new();
        store.expect_get_tone().never();

        let tone = resolve_tone(&store, None, None, Tone::Minimal).await.unwrap();
        assert_eq!(tone, Tone::Minimal);
    }

    #[tokio::test]
    async fn test_tone_change_visible_on_next_call() {
        let store = InMemoryToneStore::new();
        store.set_tone("u1", Tone::Minimal).await.unwrap();
        assert_eq!(
            resolve_tone(&store, None, Some("u1"), Tone::Playful).await.unwrap(),
            Tone::Minimal
        );

        store.set_tone("u1", Tone::Editorial).await.unwrap();
        assert_eq!(
            resolve_tone(&store, None, Some("u1"), Tone::Playful).await.unwrap(),
            Tone::Editorial
        );
    }

    #[tokio::test]
    #[ignore = "requires a running Redis"]
    async fn test_redis_tone_store_roundtrip() {
        let redis_url =
            std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
        let client = crate::db::create_redis_client(&redis_url).unwrap();
        let (cache, _handle) = Cache::new(client).await;
        let store = RedisToneStore::new(cache, 5);

        store.set_tone("tone_store_user", Tone::Playful).await.unwrap();
        assert_eq!(
            store.get_tone("tone_store_user").await.unwrap(),
            Some(Tone::Playful)
        );
    }
}
