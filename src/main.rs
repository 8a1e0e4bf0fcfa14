use clap::Parser;
use form_autofill::cli::commands::{cmd_payload, cmd_resolve, cmd_sync};
use form_autofill::cli::config::{Cli, Commands, load_config, resolve_endpoint};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Payload { html } => cmd_payload(&html)?,
        Commands::Sync {
            html,
            endpoint,
            offline,
            output,
        } => {
            let endpoint = resolve_endpoint(endpoint.as_deref(), &config);
            let ok = cmd_sync(&html, &endpoint, offline, output.as_deref(), &config, cli.verbose)?;
            if !ok {
                std::process::exit(1);
            }
        }
        Commands::Resolve { request } => cmd_resolve(&request)?,
    }

    Ok(())
}

/// RUST_LOG wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
