//! Tests for the caching CRM client

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use slc_application::caching::{CachingCrmClient, ScopedCache};
use slc_domain::ports::providers::crm::{
    AccountProvider, CallProvider, CrmActivityProvider, PersonProvider,
};
use slc_domain::value_objects::{
    AccountRequest, CacheKey, CallRequest, EntityKind, PersonRequest, Record,
};

use crate::support::{FailingStore, FlakyStore, InMemoryStore, RecordingCrm, fields, scope};

const TTL: Duration = Duration::from_secs(600);

fn acme_crm() -> RecordingCrm {
    RecordingCrm::new()
        .with_account(json!({ "id": 1, "name": "Acme", "domain": "acme.com" }))
        .with_account(json!({ "id": 2, "name": "Globex", "domain": "globex.com" }))
        .with_person(json!({ "id": 7, "email_address": "ada@acme.com", "first_name": "Ada" }))
}

fn caching(crm: RecordingCrm, store: &Arc<InMemoryStore>) -> CachingCrmClient<RecordingCrm> {
    CachingCrmClient::new(crm, ScopedCache::new(store.clone(), scope("req-1"), TTL))
}

fn registry(store: &InMemoryStore, client: &CachingCrmClient<RecordingCrm>) -> Vec<CacheKey> {
    store
        .raw(client.cache().scope().registry_key().as_str())
        .map(|json| serde_json::from_str(&json).unwrap())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_acme_lookup_is_served_from_cache_until_an_update() {
    let store = Arc::new(InMemoryStore::new());
    let client = caching(acme_crm(), &store);
    let key = scope("req-1").entry_key(EntityKind::Account, "acme.com");

    let first = client.find_account_by_domain("acme.com").await.unwrap();
    assert_eq!(client.inner().calls_to("find_account_by_domain"), 1);
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].id(), Some(1));
    assert_eq!(first[0].get_str("name"), Some("Acme"));

    let cached: Vec<Record> = serde_json::from_str(&store.raw(key.as_str()).unwrap()).unwrap();
    assert_eq!(cached, first);

    let second = client.find_account_by_domain("acme.com").await.unwrap();
    assert_eq!(second, first);
    assert_eq!(client.inner().calls_to("find_account_by_domain"), 1);

    let update = AccountRequest::from_fields(fields(json!({ "name": "Acme Corp" })));
    client.update_account(1, &update).await.unwrap();

    let third = client.find_account_by_domain("acme.com").await.unwrap();
    assert_eq!(client.inner().calls_to("find_account_by_domain"), 2);
    assert_eq!(third[0].get_str("name"), Some("Acme Corp"));
}

#[tokio::test]
async fn test_empty_results_are_not_cached() {
    let store = Arc::new(InMemoryStore::new());
    let client = caching(acme_crm(), &store);
    let key = scope("req-1").entry_key(EntityKind::Account, "initech.com");

    assert!(client.find_account_by_domain("initech.com").await.unwrap().is_empty());
    assert!(!store.contains(key.as_str()));
    assert!(registry(&store, &client).is_empty());

    client.find_account_by_domain("initech.com").await.unwrap();
    assert_eq!(client.inner().calls_to("find_account_by_domain"), 2);
}

#[tokio::test]
async fn test_entity_found_after_an_empty_lookup_gets_cached() {
    let store = Arc::new(InMemoryStore::new());
    let client = caching(acme_crm(), &store);

    assert!(client.find_person_by_email("bob@acme.com").await.unwrap().is_empty());

    let person = PersonRequest::from_fields(fields(json!({ "email_address": "bob@acme.com" })));
    client.create_person(&person).await.unwrap();

    let found = client.find_person_by_email("bob@acme.com").await.unwrap();
    assert_eq!(found.len(), 1);
    client.find_person_by_email("bob@acme.com").await.unwrap();
    assert_eq!(client.inner().calls_to("find_person_by_email"), 2);
}

#[tokio::test]
async fn test_different_scopes_do_not_share_entries() {
    let store = Arc::new(InMemoryStore::new());
    let first = caching(acme_crm(), &store);
    let second = CachingCrmClient::new(
        acme_crm(),
        ScopedCache::new(store.clone(), scope("req-2"), TTL),
    );

    first.find_account_by_domain("acme.com").await.unwrap();
    second.find_account_by_domain("acme.com").await.unwrap();

    assert_eq!(first.inner().calls_to("find_account_by_domain"), 1);
    assert_eq!(second.inner().calls_to("find_account_by_domain"), 1);
    assert_ne!(
        scope("req-1").entry_key(EntityKind::Account, "acme.com"),
        scope("req-2").entry_key(EntityKind::Account, "acme.com")
    );
}

#[tokio::test]
async fn test_same_scope_shares_entries() {
    let store = Arc::new(InMemoryStore::new());
    let first = caching(acme_crm(), &store);
    let second = caching(acme_crm(), &store);

    first.find_account_by_domain("acme.com").await.unwrap();
    let from_cache = second.find_account_by_domain("acme.com").await.unwrap();

    assert_eq!(second.inner().calls_to("find_account_by_domain"), 0);
    assert_eq!(from_cache[0].id(), Some(1));
}

#[tokio::test]
async fn test_delete_removes_only_its_own_entry() {
    let store = Arc::new(InMemoryStore::new());
    let client = caching(acme_crm(), &store);
    let acme = scope("req-1").entry_key(EntityKind::Account, "acme.com");
    let globex = scope("req-1").entry_key(EntityKind::Account, "globex.com");
    let ada = scope("req-1").entry_key(EntityKind::Person, "ada@acme.com");

    client.find_account_by_domain("acme.com").await.unwrap();
    client.find_account_by_domain("globex.com").await.unwrap();
    client.find_person_by_email("ada@acme.com").await.unwrap();

    client.delete_account(1, "acme.com").await.unwrap();

    assert_eq!(store.deleted(), vec![acme.as_str().to_string()]);
    assert!(!store.contains(acme.as_str()));
    assert!(store.contains(globex.as_str()));
    assert!(store.contains(ada.as_str()));

    assert!(client.find_account_by_domain("acme.com").await.unwrap().is_empty());
    assert_eq!(client.inner().calls_to("find_account_by_domain"), 3);
}

#[tokio::test]
async fn test_person_delete_removes_only_its_own_entry() {
    let store = Arc::new(InMemoryStore::new());
    let client = caching(acme_crm(), &store);
    let acme = scope("req-1").entry_key(EntityKind::Account, "acme.com");
    let ada = scope("req-1").entry_key(EntityKind::Person, "ada@acme.com");

    client.find_account_by_domain("acme.com").await.unwrap();
    client.find_person_by_email("ada@acme.com").await.unwrap();

    client.delete_person(7, "ada@acme.com").await.unwrap();

    assert!(!store.contains(ada.as_str()));
    assert!(store.contains(acme.as_str()));
}

#[tokio::test]
async fn test_create_invalidates_every_registered_key() {
    let store = Arc::new(InMemoryStore::new());
    let client = caching(acme_crm(), &store);
    let acme = scope("req-1").entry_key(EntityKind::Account, "acme.com");
    let ada = scope("req-1").entry_key(EntityKind::Person, "ada@acme.com");

    client.find_account_by_domain("acme.com").await.unwrap();
    client.find_person_by_email("ada@acme.com").await.unwrap();
    assert_eq!(registry(&store, &client), vec![acme.clone(), ada.clone()]);

    let account = AccountRequest::from_fields(fields(json!({
        "name": "Initech",
        "domain": "initech.com",
    })));
    client.create_account(&account).await.unwrap();

    assert!(!store.contains(acme.as_str()));
    assert!(!store.contains(ada.as_str()));
    assert_eq!(
        store.raw(client.cache().scope().registry_key().as_str()).as_deref(),
        Some("[]")
    );
}

#[tokio::test]
async fn test_update_person_and_call_invalidate_the_scope() {
    let store = Arc::new(InMemoryStore::new());
    let client = caching(acme_crm(), &store);
    let acme = scope("req-1").entry_key(EntityKind::Account, "acme.com");

    client.find_account_by_domain("acme.com").await.unwrap();
    let person = PersonRequest::from_fields(fields(json!({ "title": "CTO" })));
    client.update_person(7, &person).await.unwrap();
    assert!(!store.contains(acme.as_str()));

    client.find_account_by_domain("acme.com").await.unwrap();
    assert!(store.contains(acme.as_str()));
    let call = CallRequest {
        person_id: 7,
        sentiment: "Positive".to_string(),
        disposition: "Connected".to_string(),
        notes: None,
        crm_params: serde_json::Map::new(),
    };
    client.create_call(&call).await.unwrap();
    assert!(!store.contains(acme.as_str()));
}

#[tokio::test]
async fn test_failed_write_propagates_and_keeps_cache() {
    let store = Arc::new(InMemoryStore::new());
    let crm = RecordingCrm::failing_writes()
        .with_account(json!({ "id": 1, "name": "Acme", "domain": "acme.com" }));
    let client = caching(crm, &store);
    let acme = scope("req-1").entry_key(EntityKind::Account, "acme.com");

    client.find_account_by_domain("acme.com").await.unwrap();

    let update = AccountRequest::from_fields(fields(json!({ "name": "Acme Corp" })));
    let err = client.update_account(1, &update).await.unwrap_err();
    assert_eq!(err.crm_status(), Some(422));

    let err = client.delete_account(1, "acme.com").await.unwrap_err();
    assert_eq!(err.crm_status(), Some(422));

    assert!(store.contains(acme.as_str()));
    assert!(store.deleted().is_empty());
}

#[tokio::test]
async fn test_bulk_invalidation_clears_linked_scopes() {
    let store = Arc::new(InMemoryStore::new());
    let own = scope("req-1");
    let salesforce = own.sibling("Salesforce");
    let client = caching(acme_crm(), &store).with_linked_scopes([salesforce.clone(), own.clone()]);

    assert_eq!(client.linked_scopes().collect::<Vec<_>>(), vec![&salesforce]);

    let sibling_cache = client.cache().for_scope(salesforce.clone());
    let sibling_key = salesforce.entry_key(EntityKind::Account, "acme.com");
    sibling_cache.populate(&sibling_key, &vec!["cached elsewhere"]).await;
    assert!(store.contains(sibling_key.as_str()));

    let person = PersonRequest::from_fields(fields(json!({ "email_address": "new@acme.com" })));
    client.create_person(&person).await.unwrap();

    assert!(!store.contains(sibling_key.as_str()));
    assert!(sibling_cache.registered_keys().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_store_failures_never_reach_the_caller() {
    let client = CachingCrmClient::new(
        acme_crm(),
        ScopedCache::new(Arc::new(FailingStore), scope("req-1"), TTL),
    )
    .with_linked_scopes([scope("req-1").sibling("Salesforce")]);

    assert_eq!(client.find_account_by_domain("acme.com").await.unwrap().len(), 1);
    assert_eq!(client.find_account_by_domain("acme.com").await.unwrap().len(), 1);
    assert_eq!(client.inner().calls_to("find_account_by_domain"), 2);

    assert_eq!(client.find_person_by_email("ada@acme.com").await.unwrap().len(), 1);

    let account = AccountRequest::from_fields(fields(json!({ "name": "Initech", "domain": "initech.com" })));
    let created = client.create_account(&account).await.unwrap();
    let id = created.id().unwrap();
    client.update_account(id, &account).await.unwrap();
    client.delete_account(id, "initech.com").await.unwrap();
    client.delete_person(7, "ada@acme.com").await.unwrap();
    client.list_crm_activities().await.unwrap();
}

#[tokio::test]
async fn test_unreadable_cached_value_is_a_miss() {
    let store = Arc::new(InMemoryStore::new());
    let client = caching(acme_crm(), &store);
    let key = scope("req-1").entry_key(EntityKind::Account, "acme.com");
    store.put_raw(key.as_str(), "{not json");

    let accounts = client.find_account_by_domain("acme.com").await.unwrap();

    assert_eq!(accounts[0].id(), Some(1));
    assert_eq!(client.inner().calls_to("find_account_by_domain"), 1);
    let repaired: Vec<Record> = serde_json::from_str(&store.raw(key.as_str()).unwrap()).unwrap();
    assert_eq!(repaired, accounts);
}

#[tokio::test]
async fn test_registry_lists_each_key_once() {
    let store = Arc::new(InMemoryStore::new());
    let client = caching(acme_crm(), &store);
    let acme = scope("req-1").entry_key(EntityKind::Account, "acme.com");

    client.find_account_by_domain("acme.com").await.unwrap();
    client.delete_account(2, "acme.com").await.unwrap();
    client.find_account_by_domain("acme.com").await.unwrap();

    assert_eq!(registry(&store, &client), vec![acme]);
}

#[tokio::test]
async fn test_activity_listing_is_never_cached() {
    let store = Arc::new(InMemoryStore::new());
    let crm = acme_crm().with_activity(json!({ "id": 3, "activity_type": "email" }));
    let client = caching(crm, &store);

    client.list_crm_activities().await.unwrap();
    client.list_crm_activities().await.unwrap();

    assert_eq!(client.inner().calls_to("list_crm_activities"), 2);
    assert!(registry(&store, &client).is_empty());
}

#[tokio::test]
async fn test_entries_expire_after_the_scope_ttl() {
    let store = Arc::new(InMemoryStore::new());
    let client = CachingCrmClient::new(
        acme_crm(),
        ScopedCache::new(store.clone(), scope("req-1"), Duration::from_millis(50)),
    );

    client.find_account_by_domain("acme.com").await.unwrap();
    tokio::time::sleep(Duration::from_millis(120)).await;
    client.find_account_by_domain("acme.com").await.unwrap();

    assert_eq!(client.inner().calls_to("find_account_by_domain"), 2);
}

#[tokio::test]
async fn test_works_over_moka_store() {
    let store = Arc::new(slc_providers::cache::MokaCacheProvider::new());
    let client = CachingCrmClient::new(acme_crm(), ScopedCache::new(store, scope("req-1"), TTL));

    client.find_account_by_domain("acme.com").await.unwrap();
    client.find_account_by_domain("acme.com").await.unwrap();
    assert_eq!(client.inner().calls_to("find_account_by_domain"), 1);

    client.delete_account(1, "acme.com").await.unwrap();
    assert!(client.find_account_by_domain("acme.com").await.unwrap().is_empty());
    assert_eq!(client.inner().calls_to("find_account_by_domain"), 2);
}

#[tokio::test]
async fn test_registry_read_failure_never_serves_pre_update_data() {
    let store = Arc::new(FlakyStore::new());
    let client = CachingCrmClient::new(
        acme_crm(),
        ScopedCache::new(store.clone(), scope("req-1"), TTL),
    );
    let registry = client.cache().scope().registry_key();

    client.find_account_by_domain("acme.com").await.unwrap();

    // An unrelated populate hits a transient registry failure
    store.fail_reads(registry.as_str(), 1);
    let people = client.find_person_by_email("ada@acme.com").await.unwrap();
    assert_eq!(people.len(), 1);

    let update = AccountRequest::from_fields(fields(json!({ "name": "Acme Corp" })));
    client.update_account(1, &update).await.unwrap();

    let after = client.find_account_by_domain("acme.com").await.unwrap();
    assert_eq!(after[0].get_str("name"), Some("Acme Corp"));
    assert_eq!(client.inner().calls_to("find_account_by_domain"), 2);
}
