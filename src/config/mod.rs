use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

/// Claim routing engine configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "claimroute")]
#[command(about = "Deterministic FNOL claim assessment and routing engine")]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info", env = "CLAIMROUTE_LOG_LEVEL")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true, default_value = "false", env = "CLAIMROUTE_LOG_JSON")]
    pub log_json: bool,

    /// Path to routing policy YAML file (built-in policy if not set)
    #[arg(long, global = true, env = "CLAIMROUTE_POLICY_PATH")]
    pub policy_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Serve the assessment HTTP API
    Serve(ServeArgs),

    /// Assess every document in a directory
    Batch(BatchArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// HTTP server listen address
    #[arg(long, default_value = "0.0.0.0:8080", env = "CLAIMROUTE_LISTEN_ADDR")]
    pub listen_addr: String,

    /// Policy reload check interval in seconds
    #[arg(long, default_value = "30", env = "CLAIMROUTE_POLICY_RELOAD_SECS")]
    pub policy_reload_secs: u64,

    /// Latency budget in milliseconds for the assessment endpoint
    #[arg(long, default_value = "100", env = "CLAIMROUTE_LATENCY_BUDGET_MS")]
    pub latency_budget_ms: u64,

    /// Enable graceful shutdown
    #[arg(long, default_value = "true", env = "CLAIMROUTE_GRACEFUL_SHUTDOWN")]
    pub graceful_shutdown: bool,

    /// Graceful shutdown timeout in seconds
    #[arg(long, default_value = "30", env = "CLAIMROUTE_SHUTDOWN_TIMEOUT_SECS")]
    pub shutdown_timeout_secs: u64,
}

#[derive(Debug, Clone, Args)]
pub struct BatchArgs {
    /// Directory holding FNOL documents
    #[arg(long, default_value = "InputDocs", env = "CLAIMROUTE_INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Directory receiving `<stem>_Result.json` files
    #[arg(long, default_value = "Output", env = "CLAIMROUTE_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Accepted document extensions
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "txt,json",
        env = "CLAIMROUTE_EXTENSIONS"
    )]
    pub extensions: Vec<String>,

    /// Maximum documents processed at once
    #[arg(long, default_value = "4", env = "CLAIMROUTE_CONCURRENCY")]
    pub concurrency: usize,
}

impl ServeArgs {
    /// Get policy reload interval as Duration.
    pub fn policy_reload_interval(&self) -> Duration {
        Duration::from_secs(self.policy_reload_secs)
    }

    /// Get shutdown timeout as Duration.
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

impl Default for ServeArgs {
    fn default() -> Self {
        ServeArgs {
            listen_addr: "0.0.0.0:8080".to_string(),
            policy_reload_secs: 30,
            latency_budget_ms: 100,
            graceful_shutdown: true,
            shutdown_timeout_secs: 30,
        }
    }
}

impl Default for BatchArgs {
    fn default() -> Self {
        BatchArgs {
            input_dir: PathBuf::from("InputDocs"),
            output_dir: PathBuf::from("Output"),
            extensions: vec!["txt".to_string(), "json".to_string()],
            concurrency: 4,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: "info".to_string(),
            log_json: false,
            policy_path: None,
            command: Command::Serve(ServeArgs::default()),
        }
    }
}
