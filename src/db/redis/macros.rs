/// Read-through caching over [`Cache`](crate::db::Cache).
///
/// Returns the cached value for `$key` when present. Otherwise awaits
/// `$fetch`, queues the result for a background write with `$ttl` seconds
/// to live, and returns it. Evaluates to an `AppResult`.
///
/// # Example
/// ```rust,ignore
/// let products: Vec<Product> =
///     cached!(cache, CacheKey::Products, 300, self.fetch_products())?;
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $fetch:expr) => {{
        if let Some(hit) = $cache.get_from_cache(&$key).await? {
            ::tracing::debug!(key = %$key, "Cache hit");
            Ok(hit)
        } else {
            let value = $fetch.await?;
            $cache.set_in_background(&$key, &value, $ttl);
            Ok(value)
        }
    }};
}
