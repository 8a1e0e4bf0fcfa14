use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "form-autofill",
    version,
    about = "Synchronize HTML form fields with an autofill endpoint"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: form-autofill.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the request payload collected from a form
    Payload {
        /// HTML file containing the form
        #[arg(long)]
        html: String,
    },

    /// Collect, send and apply autofill values for a form
    Sync {
        /// HTML file containing the form
        #[arg(long)]
        html: String,

        /// Base URL of the autofill endpoint (overrides config)
        #[arg(long)]
        endpoint: Option<String>,

        /// Resolve values in-process instead of calling the endpoint
        #[arg(long, default_value_t = false)]
        offline: bool,

        /// Write the resulting field values here instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Answer an autofill request JSON file with the built-in rules
    Resolve {
        /// Path to the request JSON
        #[arg(long)]
        request: String,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `form-autofill.yaml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// JSONL file receiving one event per sync. Tracing is off when unset.
    #[serde(default)]
    pub trace_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            trace_file: None,
        }
    }
}

fn default_endpoint() -> String { "http://localhost:8080".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("form-autofill.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}

/// Endpoint precedence: CLI flag, then config file.
pub fn resolve_endpoint(cli_endpoint: Option<&str>, config: &AppConfig) -> String {
    cli_endpoint
        .map(str::to_string)
        .unwrap_or_else(|| config.endpoint.clone())
}
