//! Tests for the null cache provider

use slc_domain::ports::providers::CacheProvider;
use slc_providers::cache::{CacheEntryConfig, NullCacheProvider};

#[tokio::test]
async fn test_null_cache_always_misses() {
    let cache = NullCacheProvider::new();

    cache
        .set_json("Salesloft|r|s|q|Account|acme.com", "[]", CacheEntryConfig::default())
        .await
        .expect("set should succeed");

    assert!(
        cache
            .get_json("Salesloft|r|s|q|Account|acme.com")
            .await
            .expect("get should succeed")
            .is_none()
    );
    assert!(!cache.exists("Salesloft|r|s|q|Account|acme.com").await.unwrap());
    assert!(!cache.delete("Salesloft|r|s|q|Account|acme.com").await.unwrap());
    assert_eq!(cache.provider_name(), "null");
}
