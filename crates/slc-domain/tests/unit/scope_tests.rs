//! Unit tests for cache scopes and keys

use slc_domain::{CacheScope, EntityKind, ScopeIdentity};

fn scope(request: &str) -> CacheScope {
    CacheScope::new("Salesloft", ScopeIdentity::new(request, "scenario", "requestor"))
}

#[test]
fn test_identical_inputs_give_identical_keys() {
    assert_eq!(
        scope("r1").entry_key(EntityKind::Person, "a@b.com"),
        scope("r1").entry_key(EntityKind::Person, "a@b.com")
    );
}

#[test]
fn test_scopes_never_share_keys() {
    let a = scope("r1");
    let b = scope("r2");

    assert_ne!(
        a.entry_key(EntityKind::Account, "acme.com"),
        b.entry_key(EntityKind::Account, "acme.com")
    );
    assert_ne!(a.registry_key(), b.registry_key());
}

#[test]
fn test_kinds_and_discriminators_never_collide() {
    let s = scope("r1");

    assert_ne!(
        s.entry_key(EntityKind::Account, "acme.com"),
        s.entry_key(EntityKind::Person, "acme.com")
    );
    assert_ne!(
        s.entry_key(EntityKind::Account, "acme.com"),
        s.entry_key(EntityKind::Account, "acme.co")
    );
    // A discriminator can not masquerade as another kind's key
    assert_ne!(
        s.entry_key(EntityKind::Account, "Person|x"),
        s.entry_key(EntityKind::Person, "x")
    );
}

#[test]
fn test_registry_key_is_not_an_entry_key() {
    let s = scope("r1");
    assert!(s.registry_key().as_str().starts_with("cachekeys|"));
    assert!(!s.entry_key(EntityKind::Account, "x").as_str().starts_with("cachekeys|"));
}

#[test]
fn test_discriminator_is_used_verbatim() {
    let s = scope("r1");
    let key = s.entry_key(EntityKind::Person, " Gene@Example.com ");
    assert!(key.as_str().ends_with("|Person| Gene@Example.com "));
}

#[test]
fn test_connection_id_separates_scopes() {
    let plain = scope("r1");
    let connected = CacheScope::new(
        "Salesloft",
        ScopeIdentity::new("r1", "scenario", "requestor").with_connection_id("conn"),
    );
    assert_ne!(plain.registry_key(), connected.registry_key());
}

#[test]
fn test_separator_inside_an_identifier_can_not_fake_a_connection() {
    let connected = CacheScope::new(
        "Salesloft",
        ScopeIdentity::new("r", "s", "q").with_connection_id("x"),
    );
    let embedded = CacheScope::new("Salesloft", ScopeIdentity::new("r", "s", "q|x"));

    assert_ne!(connected.prefix(), embedded.prefix());
    assert_ne!(
        connected.entry_key(EntityKind::Account, "acme.com"),
        embedded.entry_key(EntityKind::Account, "acme.com")
    );
    assert_ne!(connected.registry_key(), embedded.registry_key());
}

#[test]
fn test_missing_connection_keeps_segment_count_fixed() {
    // Without a placeholder this connection id would line up with the kind
    let plain = scope("r1");
    let connected = CacheScope::new(
        "Salesloft",
        ScopeIdentity::new("r1", "scenario", "requestor").with_connection_id("Account"),
    );

    assert_ne!(
        plain.entry_key(EntityKind::Account, "Account|acme.com"),
        connected.entry_key(EntityKind::Account, "acme.com")
    );
    assert_ne!(
        plain.entry_key(EntityKind::Account, "x"),
        CacheScope::new(
            "Salesloft",
            ScopeIdentity::new("r1", "scenario", "requestor").with_connection_id(r"\-"),
        )
        .entry_key(EntityKind::Account, "x")
    );
}

#[test]
fn test_escapes_do_not_merge_neighbouring_identifiers() {
    let a = CacheScope::new("Salesloft", ScopeIdentity::new(r"r\", "s", "q"));
    let b = CacheScope::new("Salesloft", ScopeIdentity::new("r", r"\s", "q"));
    assert_ne!(a.registry_key(), b.registry_key());
}
