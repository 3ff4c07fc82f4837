//! Cache scopes and the keys derived from them
//!
//! A scope is the isolation boundary of cached CRM reads. Every key the
//! caching layer touches embeds the full scope, so two scopes sharing one
//! cache store never see each other's entries.

use crate::constants::{
    CACHE_KEY_ESCAPE, CACHE_KEY_SEPARATOR, CACHE_REGISTRY_PREFIX, NO_CONNECTION_SEGMENT,
};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Identifiers of the run a cache belongs to
///
/// Supplied by the host for every request and treated as opaque: any
/// identifier may contain [`CACHE_KEY_SEPARATOR`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ScopeIdentity {
    /// Host request id
    pub request_id: String,
    /// Scenario the request belongs to
    pub scenario_id: String,
    /// User or system that issued the request
    pub requestor_id: String,
    /// Connection the credentials came from, when the host supplies one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<String>,
}

impl ScopeIdentity {
    /// Create an identity without a connection id
    pub fn new(
        request_id: impl Into<String>,
        scenario_id: impl Into<String>,
        requestor_id: impl Into<String>,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            scenario_id: scenario_id.into(),
            requestor_id: requestor_id.into(),
            connection_id: None,
        }
    }

    /// Set the connection id
    pub fn with_connection_id(mut self, connection_id: impl Into<String>) -> Self {
        self.connection_id = Some(connection_id.into());
        self
    }

    /// Escaped key segments in key order, always four of them
    fn segments(&self) -> [Cow<'_, str>; 4] {
        [
            escape_segment(&self.request_id),
            escape_segment(&self.scenario_id),
            escape_segment(&self.requestor_id),
            self.connection_id
                .as_deref()
                .map_or(Cow::Borrowed(NO_CONNECTION_SEGMENT), escape_segment),
        ]
    }
}

/// Prefix separators and escapes with [`CACHE_KEY_ESCAPE`]
fn escape_segment(segment: &str) -> Cow<'_, str> {
    if !segment.contains([CACHE_KEY_SEPARATOR, CACHE_KEY_ESCAPE]) {
        return Cow::Borrowed(segment);
    }
    let mut escaped = String::with_capacity(segment.len() + 2);
    for c in segment.chars() {
        if c == CACHE_KEY_SEPARATOR || c == CACHE_KEY_ESCAPE {
            escaped.push(CACHE_KEY_ESCAPE);
        }
        escaped.push(c);
    }
    Cow::Owned(escaped)
}

/// A scope identity bound to the system whose reads are cached
///
/// Two systems caching for the same run (e.g. Salesloft and Salesforce cogs)
/// share a [`ScopeIdentity`] but own separate scopes and registries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheScope {
    /// System name, e.g. "Salesloft"
    pub system: String,
    /// Run identifiers
    pub identity: ScopeIdentity,
}

impl CacheScope {
    /// Create a scope for `system`
    pub fn new(system: impl Into<String>, identity: ScopeIdentity) -> Self {
        Self {
            system: system.into(),
            identity,
        }
    }

    /// Same identity, different system
    pub fn sibling(&self, system: impl Into<String>) -> Self {
        Self::new(system, self.identity.clone())
    }

    /// Key prefix shared by every entry of this scope
    ///
    /// Five segments: system, request, scenario, requestor and connection.
    /// Each is escaped, and a missing connection id becomes
    /// [`NO_CONNECTION_SEGMENT`].
    pub fn prefix(&self) -> String {
        let [request, scenario, requestor, connection] = self.identity.segments();
        [
            escape_segment(&self.system),
            request,
            scenario,
            requestor,
            connection,
        ]
        .join(CACHE_KEY_SEPARATOR.to_string().as_str())
    }

    /// Key of the cached read for `kind` and `discriminator`
    ///
    /// The discriminator is used verbatim. It is always the last segment,
    /// after a fixed number of escaped ones, so it can not shift a boundary.
    pub fn entry_key(&self, kind: EntityKind, discriminator: &str) -> CacheKey {
        CacheKey(format!(
            "{prefix}{sep}{kind}{sep}{discriminator}",
            prefix = self.prefix(),
            sep = CACHE_KEY_SEPARATOR,
            kind = kind.as_str(),
        ))
    }

    /// Key of this scope's registry entry
    pub fn registry_key(&self) -> CacheKey {
        CacheKey(format!(
            "{CACHE_REGISTRY_PREFIX}{CACHE_KEY_SEPARATOR}{}",
            self.prefix()
        ))
    }
}

impl fmt::Display for CacheScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix())
    }
}

/// Entity kinds with a cached lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Accounts, looked up by domain
    Account,
    /// People, looked up by email address
    Person,
}

impl EntityKind {
    /// Key segment for this kind
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Account => "Account",
            Self::Person => "Person",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully qualified cache store key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    /// The key as stored
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
