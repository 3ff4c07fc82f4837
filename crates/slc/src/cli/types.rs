//! CLI type definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use slc_domain::value_objects::ScopeIdentity;

#[derive(Parser, Debug)]
#[command(name = "slc")]
#[command(about = "Salesloft cog cache - request-scoped CRM read cache")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub scope: ScopeArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Identifiers of the scope to operate on
#[derive(Args, Debug, Clone)]
pub struct ScopeArgs {
    /// Request id
    #[arg(long = "request")]
    pub request_id: String,

    /// Scenario id
    #[arg(long = "scenario")]
    pub scenario_id: String,

    /// Requestor id
    #[arg(long = "requestor")]
    pub requestor_id: String,

    /// Connection id, when the run uses a named connection
    #[arg(long = "connection")]
    pub connection_id: Option<String>,
}

impl ScopeArgs {
    /// Scope identity built from the arguments
    pub fn identity(&self) -> ScopeIdentity {
        let identity = ScopeIdentity::new(
            self.request_id.clone(),
            self.scenario_id.clone(),
            self.requestor_id.clone(),
        );
        match &self.connection_id {
            Some(connection) => identity.with_connection_id(connection.clone()),
            None => identity,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Account lookups and deletes
    #[command(subcommand)]
    Account(AccountCommands),

    /// Person lookups and deletes
    #[command(subcommand)]
    Person(PersonCommands),

    /// Scope cache inspection
    #[command(subcommand)]
    Cache(CacheCommands),
}

#[derive(Subcommand, Debug)]
pub enum AccountCommands {
    /// List accounts on a domain, through the cache
    Find {
        /// Account domain
        #[arg(short, long)]
        domain: String,
    },
    /// Delete the account with this name on a domain
    Delete {
        /// Account name
        #[arg(short, long)]
        name: String,
        /// Account domain
        #[arg(short, long)]
        domain: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum PersonCommands {
    /// Show the person with this email address, through the cache
    Find {
        /// Email address
        #[arg(short, long)]
        email: String,
    },
    /// Delete the person with this email address
    Delete {
        /// Email address
        #[arg(short, long)]
        email: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Show the keys registered for the scope and store statistics
    Inspect,
}
