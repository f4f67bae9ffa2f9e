//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `bulk_resolve` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Reading hostnames from a file or stdin and writing JSON lines to stdout
//!
//! All resolution logic is implemented in the library crate.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use bulk_resolve::app::read_candidates;
use bulk_resolve::config::{DEFAULT_MAX_CONCURRENCY, DNS_LIFETIME, DNS_TIMEOUT, LOGGING_INTERVAL};
use bulk_resolve::initialization::init_logger_with;
use bulk_resolve::{run_bulk_query, Backend, Config, LogFormat, LogLevel, ResolverSettings};

const DEFAULT_TIMEOUT_MS: u64 = DNS_TIMEOUT.as_millis() as u64;
const DEFAULT_LIFETIME_MS: u64 = DNS_LIFETIME.as_millis() as u64;

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Resolve through the system resolver configuration
/// bulk_resolve hosts.txt
///
/// # Specific nameservers, tighter timeouts, fewer lookups in flight
/// bulk_resolve hosts.txt -n 1.1.1.1 -n 8.8.8.8 --timeout-ms 2000 --lifetime-ms 5000 --max-concurrency 50
///
/// # Read from stdin
/// cat hosts.txt | bulk_resolve -
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "bulk_resolve",
    about = "Resolves candidate hostnames to IPv4 addresses concurrently."
)]
struct Opt {
    /// File with one hostname (or JSON record) per line, or `-` for stdin
    #[arg(value_parser)]
    file: PathBuf,

    /// Nameserver to query (`IP` or `IP:port`); repeatable. Defaults to the system configuration
    #[arg(short = 'n', long = "nameserver")]
    nameservers: Vec<String>,

    /// Per-query timeout in milliseconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,

    /// Upper bound on one resolution, retries included, in milliseconds
    #[arg(long, default_value_t = DEFAULT_LIFETIME_MS)]
    lifetime_ms: u64,

    /// Maximum lookups in flight at once
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    max_concurrency: usize,

    /// Lookup backend: dns|system
    #[arg(long, value_enum, default_value_t = Backend::Dns)]
    backend: Backend,

    /// Seconds between progress log lines (0 disables)
    #[arg(long, default_value_t = LOGGING_INTERVAL)]
    progress_interval: u64,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    log_format: LogFormat,
}

impl Opt {
    fn into_config(self) -> Result<(PathBuf, Config)> {
        let resolver = ResolverSettings::new(
            &self.nameservers,
            Duration::from_millis(self.timeout_ms),
            Duration::from_millis(self.lifetime_ms),
        )
        .context("Invalid resolver settings")?;

        let config = Config {
            resolver,
            max_concurrency: self.max_concurrency,
            backend: self.backend,
            progress_interval: self.progress_interval,
            log_level: self.log_level,
            log_format: self.log_format,
        };
        config.validate().context("Invalid configuration")?;
        Ok((self.file, config))
    }
}

fn run(opt: Opt) -> Result<()> {
    let (file, config) = opt.into_config()?;

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    let records = if file.as_os_str() == "-" {
        info!("Reading hostnames from stdin");
        read_candidates(io::stdin().lock()).context("Failed to read stdin")?
    } else {
        let input = File::open(&file)
            .with_context(|| format!("Failed to open input file {}", file.display()))?;
        read_candidates(BufReader::new(input)).context("Failed to read input file")?
    };
    info!("Loaded {} candidate records", records.len());

    let resolved = run_bulk_query(records, &config).context("Failed to resolve batch")?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for record in &resolved {
        serde_json::to_writer(&mut out, record).context("Failed to serialize record")?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    let valid = resolved.iter().filter(|r| r.is_valid()).count();
    info!(
        "{} records written ({} valid, {} invalid)",
        resolved.len(),
        valid,
        resolved.len() - valid
    );
    Ok(())
}

fn main() {
    let opt = Opt::parse();
    if let Err(e) = run(opt) {
        eprintln!("bulk_resolve error: {:#}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_library_config() {
        let opt = Opt::parse_from(["bulk_resolve", "hosts.txt"]);
        let (file, config) = opt.into_config().expect("defaults are valid");
        let defaults = Config::default();

        assert_eq!(file, PathBuf::from("hosts.txt"));
        assert_eq!(config.resolver.timeout(), DNS_TIMEOUT);
        assert_eq!(config.resolver.lifetime(), DNS_LIFETIME);
        assert_eq!(config.resolver.timeout(), defaults.resolver.timeout());
        assert_eq!(config.resolver.lifetime(), defaults.resolver.lifetime());
        assert_eq!(config.max_concurrency, defaults.max_concurrency);
        assert_eq!(config.progress_interval, defaults.progress_interval);
    }

    #[test]
    fn test_lifetime_below_timeout_is_rejected() {
        let opt = Opt::parse_from([
            "bulk_resolve",
            "hosts.txt",
            "--timeout-ms",
            "3000",
            "--lifetime-ms",
            "1000",
        ]);
        assert!(opt.into_config().is_err());
    }
}
