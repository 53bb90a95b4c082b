/// Read-through caching for an optional [`Cache`](crate::db::Cache).
///
/// With no cache configured the block is simply awaited. Otherwise a hit is
/// returned directly, and a miss runs the block and queues the value for a
/// background write. Cache read failures are logged and treated as misses, so
/// Redis trouble never fails the underlying fetch.
///
/// # Arguments
/// * `$cache`: `Option<&Cache>` (or anything with `as_ref()` yielding one).
/// * `$key`: the [`CacheKey`](crate::db::CacheKey) to read and write.
/// * `$ttl`: time-to-live in seconds for newly written values.
/// * `$block`: future producing `AppResult<T>` on a miss.
///
/// # Example
/// ```rust,ignore
/// let poster: String = cached!(self.cache.as_ref(), CacheKey::Poster(id), POSTER_TTL, async move {
///     self.resolve_poster(id).await
/// })?;
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        match $cache {
            None => $block.await,
            Some(cache) => {
                let key = $key;
                match cache.get_from_cache(&key).await {
                    Ok(Some(cached)) => Ok(cached),
                    result => {
                        if let Err(e) = result {
                            tracing::warn!(error = %e, key = %key, "Cache read failed, fetching upstream");
                        }
                        let value = $block.await?;
                        cache.set_in_background(&key, &value, $ttl);
                        Ok(value)
                    }
                }
            }
        }
    }};
}
