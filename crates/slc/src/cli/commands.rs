//! Command execution

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use slc_application::use_cases::{AccountService, Outcome, OutcomeStatus, PersonService};
use slc_domain::ports::providers::{AccountProvider, CacheStats, CrmClient};
use slc_domain::value_objects::{CacheKey, ScopeIdentity};
use slc_infrastructure::logging::init_logging;
use slc_infrastructure::{ConfigLoader, CrmBootstrap};
use tracing::debug;

use super::types::{AccountCommands, CacheCommands, Cli, Commands, PersonCommands};

/// Load configuration, install logging and execute the command
///
/// Outcomes map to the exit code: passed is success, failed is 1 and
/// errored is 2.
pub async fn run(cli: Cli) -> Result<ExitCode> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let config = loader.load().context("Failed to load configuration")?;
    init_logging(&config.logging).context("Failed to initialize logging")?;

    let bootstrap = CrmBootstrap::new(config).context("Failed to set up the cache store")?;
    let identity = cli.scope.identity();

    match cli.command {
        Commands::Account(command) => account(&bootstrap, identity, command).await,
        Commands::Person(command) => person(&bootstrap, identity, command).await,
        Commands::Cache(CacheCommands::Inspect) => inspect(&bootstrap, identity).await,
    }
}

fn client(bootstrap: &CrmBootstrap, identity: ScopeIdentity) -> Result<Arc<dyn CrmClient>> {
    let client = bootstrap
        .salesloft_client(identity)
        .context("Failed to create the Salesloft client")?;
    debug!(scope = %client.cache().scope(), "Salesloft client ready");
    Ok(Arc::new(client))
}

async fn account(
    bootstrap: &CrmBootstrap,
    identity: ScopeIdentity,
    command: AccountCommands,
) -> Result<ExitCode> {
    let client = client(bootstrap, identity)?;
    match command {
        AccountCommands::Find { domain } => {
            let accounts = client
                .find_account_by_domain(&domain)
                .await
                .with_context(|| format!("Failed to look up accounts on {domain}"))?;
            print_json(&accounts)?;
            Ok(ExitCode::SUCCESS)
        }
        AccountCommands::Delete { name, domain } => {
            let outcome = AccountService::new(client).delete(&name, &domain).await;
            report(&outcome)
        }
    }
}

async fn person(
    bootstrap: &CrmBootstrap,
    identity: ScopeIdentity,
    command: PersonCommands,
) -> Result<ExitCode> {
    let service = PersonService::new(client(bootstrap, identity)?);
    let outcome = match command {
        PersonCommands::Find { email } => service.discover(&email).await,
        PersonCommands::Delete { email } => service.delete(&email).await,
    };
    report(&outcome)
}

#[derive(Serialize)]
struct ScopeReport {
    scope: String,
    registry_key: CacheKey,
    store: String,
    /// `None` when the registry could not be read
    keys: Option<Vec<CacheKey>>,
    stats: Option<CacheStats>,
}

async fn inspect(bootstrap: &CrmBootstrap, identity: ScopeIdentity) -> Result<ExitCode> {
    let cache = bootstrap.scoped_cache(identity);
    let store = bootstrap.store();

    let report = ScopeReport {
        scope: cache.scope().prefix(),
        registry_key: cache.scope().registry_key(),
        store: store.provider_name().to_string(),
        keys: cache.registered_keys().await,
        stats: store.stats().await.ok(),
    };
    print_json(&report)?;
    Ok(ExitCode::SUCCESS)
}

fn report(outcome: &Outcome) -> Result<ExitCode> {
    print_json(outcome)?;
    Ok(match outcome.status {
        OutcomeStatus::Passed => ExitCode::SUCCESS,
        OutcomeStatus::Failed => ExitCode::from(1),
        OutcomeStatus::Error => ExitCode::from(2),
    })
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to render output")?;
    println!("{text}");
    Ok(())
}
