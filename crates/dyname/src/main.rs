// # dyname - name.com dynamic DNS updater
//
// This binary is a THIN integration layer:
// - DO NOT add reconciliation, DNS or HTTP logic here
// - All record logic lives in dyname-core, all wire logic in the
//   provider and IP source crates
//
// Each invocation performs exactly one pass and exits; schedule it with a
// systemd timer or cron.
//
// 1. Read process settings from environment variables
// 2. Load and validate the YAML configuration
// 3. Resolve the current IPv4 and IPv6 addresses
// 4. Reconcile every sentinel-TTL record on the account
//
// ## Environment
//
// - `DYNAME_CONFIG`: configuration file (default `/etc/dyname.yaml`)
// - `DYNAME_LOG_LEVEL`: trace, debug, info, warn, error (default info)
// - `DYNAME_MODE`: `dry-run` or `live`, overrides `dryRun` from the file
//
// ## Example
//
// ```bash
// DYNAME_MODE=dry-run DYNAME_LOG_LEVEL=debug dyname
// ```

use anyhow::{Context, Result};
use dyname_core::{CurrentAddresses, DynameConfig, Reconciler};
use dyname_ip_http::HttpIpSource;
use dyname_provider_namecom::NameComClient;
use std::env;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
///
/// - 0: Run completed
/// - 1: Configuration or startup error
/// - 2: Runtime error (network, registrar, malformed data)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DynameExitCode {
    Success = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<DynameExitCode> for ExitCode {
    fn from(code: DynameExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Process-level settings taken from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
struct Settings {
    config_path: Option<String>,
    log_level: Level,
    /// `Some` when DYNAME_MODE overrides the file's dryRun
    dry_run: Option<bool>,
}

impl Settings {
    /// Load settings from environment variables
    fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let log_level = match lookup("DYNAME_LOG_LEVEL") {
            Some(level) => parse_log_level(&level)?,
            None => Level::INFO,
        };
        let dry_run = lookup("DYNAME_MODE").map(|m| parse_mode(&m)).transpose()?;

        Ok(Self {
            config_path: lookup("DYNAME_CONFIG").filter(|p| !p.is_empty()),
            log_level,
            dry_run,
        })
    }
}

fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!(
            "DYNAME_LOG_LEVEL '{}' is not valid. \
            Valid levels: trace, debug, info, warn, error",
            level
        ),
    }
}

/// `dry-run` -> true, `live` -> false
fn parse_mode(mode: &str) -> Result<bool> {
    match mode.to_lowercase().as_str() {
        "dry-run" => Ok(true),
        "live" => Ok(false),
        _ => anyhow::bail!(
            "DYNAME_MODE '{}' is not valid. Valid modes: dry-run, live",
            mode
        ),
    }
}

/// Load the file configuration and apply the environment overrides
fn load_config(settings: &Settings) -> Result<DynameConfig> {
    let mut config = DynameConfig::load(settings.config_path.as_deref())?;
    config.validate()?;

    if let Some(dry_run) = settings.dry_run {
        config.dry_run = dry_run;
    }
    Ok(config)
}

fn main() -> ExitCode {
    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return DynameExitCode::ConfigError.into();
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(settings.log_level)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return DynameExitCode::ConfigError.into();
    }

    let config = match load_config(&settings) {
        Ok(config) => config,
        Err(e) => {
            error!("{:#}", e);
            return DynameExitCode::ConfigError.into();
        }
    };

    info!("Starting dyname");
    info!("Configuration loaded: {:?}", config);

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return DynameExitCode::RuntimeError.into();
        }
    };

    // HTTP clients are built inside the runtime context
    let clients = {
        let _guard = rt.enter();
        build_clients(&config)
    };
    let (ip_source, reconciler) = match clients {
        Ok(clients) => clients,
        Err(e) => {
            error!("Startup error: {:#}", e);
            return DynameExitCode::ConfigError.into();
        }
    };

    rt.block_on(async {
        match run_once(&ip_source, &reconciler).await {
            Ok(()) => DynameExitCode::Success,
            Err(e) => {
                error!("{:#}", e);
                DynameExitCode::RuntimeError
            }
        }
    })
    .into()
}

/// Build the address lookup and the registrar-backed reconciler
fn build_clients(config: &DynameConfig) -> Result<(HttpIpSource, Reconciler)> {
    let ip_source = HttpIpSource::from_config(&config.ip_lookup)
        .context("Failed to build address lookup client")?;

    let client = NameComClient::from_config(config).context("Failed to build name.com client")?;
    info!("Using registrar API at {}", client.base_url());

    Ok((
        ip_source,
        Reconciler::new(Box::new(client), config.ttl_to_update),
    ))
}

/// Perform one reconciliation pass
async fn run_once(ip_source: &HttpIpSource, reconciler: &Reconciler) -> Result<()> {
    let addresses = CurrentAddresses::resolve(ip_source)
        .await
        .context("Failed to determine current addresses")?;

    info!(
        "Reconciling records with TTL {} against {}",
        reconciler.ttl_sentinel(),
        addresses
    );
    let report = reconciler
        .run(&addresses)
        .await
        .context("Reconciliation aborted")?;

    info!("Done: {}", report);
    Ok(())
}
