//! Error handling types
//!
//! Store failures surface as [`Error::Cache`] or [`Error::Infrastructure`]
//! from the providers, but the caching layer swallows them. Only CRM,
//! network and configuration errors ever reach a caller.

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error kept as the cause of a wrapped failure
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error type shared by every crate of the workspace
#[derive(Error, Debug)]
pub enum Error {
    /// The CRM answered with an error, or with a body it should not have sent
    #[error("CRM error: {message}")]
    Crm {
        /// What went wrong
        message: String,
        /// HTTP status, when the CRM answered at all
        status: Option<u16>,
    },

    /// The CRM could not be reached
    #[error("Network error: {message}")]
    Network {
        /// What went wrong
        message: String,
        /// Transport error
        #[source]
        source: Option<BoxError>,
    },

    /// A cache store rejected an operation
    #[error("Cache error: {message}")]
    Cache {
        /// What went wrong
        message: String,
    },

    /// Invalid or unreadable configuration
    #[error("Configuration error: {message}")]
    Configuration {
        /// What went wrong
        message: String,
        /// Parser or I/O error
        #[source]
        source: Option<BoxError>,
    },

    /// A backing service or local resource failed
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// What went wrong
        message: String,
        /// Underlying error
        #[source]
        source: Option<BoxError>,
    },

    /// JSON could not be encoded or decoded
    #[error("JSON error: {source}")]
    Json {
        /// Serde error
        #[from]
        source: serde_json::Error,
    },

    /// Broken internal state, e.g. a poisoned lock
    #[error("Internal error: {message}")]
    Internal {
        /// What went wrong
        message: String,
    },
}

impl Error {
    /// CRM error without an HTTP status
    pub fn crm<S: Into<String>>(message: S) -> Self {
        Self::Crm {
            message: message.into(),
            status: None,
        }
    }

    /// CRM error carrying the HTTP status the CRM answered with
    pub fn crm_with_status<S: Into<String>>(message: S, status: u16) -> Self {
        Self::Crm {
            message: message.into(),
            status: Some(status),
        }
    }

    /// HTTP status of a CRM error, if any
    pub fn crm_status(&self) -> Option<u16> {
        match self {
            Self::Crm { status, .. } => *status,
            _ => None,
        }
    }

    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
            source: None,
        }
    }

    pub fn network_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Network {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn cache<S: Into<String>>(message: S) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    pub fn configuration_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn infrastructure_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Infrastructure {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
