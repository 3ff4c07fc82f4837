//! Bootstrap wiring tests

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Map, Value, json};
use slc_domain::error::Result;
use slc_domain::ports::providers::crm::AccountProvider;
use slc_domain::value_objects::{AccountRequest, EntityKind, Record, RecordId, ScopeIdentity};
use slc_infrastructure::CrmBootstrap;
use slc_infrastructure::cache::CacheProviderFactory;
use slc_infrastructure::config::AppConfig;

/// Account-only CRM double counting lookups
#[derive(Debug, Default)]
struct Accounts {
    lookups: Mutex<usize>,
}

impl Accounts {
    fn lookups(&self) -> usize {
        *self.lookups.lock().unwrap()
    }
}

fn acme() -> Record {
    let mut fields = Map::new();
    fields.insert("id".to_string(), json!(1));
    fields.insert("domain".to_string(), json!("acme.com"));
    Record::new(fields)
}

#[async_trait]
impl AccountProvider for Accounts {
    async fn find_account_by_domain(&self, _domain: &str) -> Result<Vec<Record>> {
        *self.lookups.lock().unwrap() += 1;
        Ok(vec![acme()])
    }

    async fn create_account(&self, _account: &AccountRequest) -> Result<Record> {
        Ok(acme())
    }

    async fn update_account(&self, _id: RecordId, _account: &AccountRequest) -> Result<Record> {
        Ok(acme())
    }

    async fn delete_account(&self, _id: RecordId, _domain: &str) -> Result<()> {
        Ok(())
    }
}

fn identity(request_id: &str) -> ScopeIdentity {
    ScopeIdentity::new(request_id, "scenario-1", "requestor-1")
}

fn bootstrap(linked: &[&str]) -> CrmBootstrap {
    let mut config = AppConfig::default();
    config.cache.linked_systems = linked.iter().map(|s| (*s).to_string()).collect();
    CrmBootstrap::new(config).unwrap()
}

#[test]
fn test_scope_uses_configured_system() {
    let bootstrap = bootstrap(&[]);
    let scope = bootstrap.scope(identity("req-1"));

    assert_eq!(scope.prefix(), r"Salesloft|req-1|scenario-1|requestor-1|\-");
    assert_eq!(bootstrap.store().provider_name(), "moka");
}

#[test]
fn test_linked_scopes_share_identity_and_skip_own_system() {
    let bootstrap = bootstrap(&["Salesforce", "Salesloft"]);
    let scope = bootstrap.scope(identity("req-1"));

    let linked = bootstrap.linked_scopes(&scope);
    assert_eq!(linked.len(), 1);
    assert_eq!(linked[0].system, "Salesforce");
    assert_eq!(linked[0].identity, scope.identity);
}

#[tokio::test]
async fn test_clients_for_one_identity_share_entries() {
    let bootstrap = bootstrap(&[]);

    let first = bootstrap.caching_client(Accounts::default(), identity("req-1"));
    first.find_account_by_domain("acme.com").await.unwrap();

    let second = bootstrap.caching_client(Accounts::default(), identity("req-1"));
    second.find_account_by_domain("acme.com").await.unwrap();
    assert_eq!(second.inner().lookups(), 0);

    let other = bootstrap.caching_client(Accounts::default(), identity("req-2"));
    other.find_account_by_domain("acme.com").await.unwrap();
    assert_eq!(other.inner().lookups(), 1);
}

#[tokio::test]
async fn test_writes_clear_linked_system_scope() {
    let bootstrap = bootstrap(&["Salesforce"]);
    let own = bootstrap.scoped_cache(identity("req-1"));
    let salesforce = own.for_scope(own.scope().sibling("Salesforce"));
    let key = salesforce.entry_key(EntityKind::Account, "acme.com");
    salesforce.populate(&key, &vec![Value::from(1)]).await;

    let client = bootstrap.caching_client(Accounts::default(), identity("req-1"));
    client
        .create_account(&AccountRequest::from_fields(Map::new()))
        .await
        .unwrap();

    assert!(salesforce.get::<Vec<Value>>(&key).await.is_none());
    assert!(salesforce.registered_keys().await.unwrap().is_empty());
}

#[test]
fn test_disabled_cache_still_bootstraps() {
    let mut config = AppConfig::default();
    config.cache.enabled = false;

    let bootstrap = CrmBootstrap::new(config).unwrap();
    assert_eq!(bootstrap.store().provider_name(), "null");
}

#[test]
fn test_salesloft_client_needs_api_key() {
    let bootstrap =
        CrmBootstrap::with_store(AppConfig::default(), CacheProviderFactory::create_null());
    assert!(bootstrap.salesloft_client(identity("req-1")).is_err());

    let mut config = AppConfig::default();
    config.crm.api_key = "key".to_string();
    let bootstrap = CrmBootstrap::with_store(config, CacheProviderFactory::create_null());
    let client = bootstrap.salesloft_client(identity("req-1")).unwrap();
    assert_eq!(client.cache().scope().system, "Salesloft");
}
