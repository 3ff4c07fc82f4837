//! Value objects shared across layers

pub mod record;
pub mod requests;
pub mod scope;

pub use record::{Record, RecordId};
pub use requests::{
    ACCOUNT_STANDARD_FIELDS, AccountRequest, CallRequest, PERSON_STANDARD_FIELDS, PersonRequest,
};
pub use scope::{CacheKey, CacheScope, EntityKind, ScopeIdentity};
