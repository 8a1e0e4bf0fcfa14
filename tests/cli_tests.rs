use clap::Parser;
use form_autofill::cli::commands::{cmd_payload, cmd_resolve, cmd_sync};
use form_autofill::cli::config::{AppConfig, Cli, Commands, load_config, resolve_endpoint};

// ============================================================================
// CLI Argument Parsing Tests
// ============================================================================

#[test]
fn cli_parse_sync_minimal() {
    let cli = Cli::parse_from(["form-autofill", "sync", "--html", "form.html"]);
    match cli.command {
        Commands::Sync {
            html,
            endpoint,
            offline,
            output,
        } => {
            assert_eq!(html, "form.html");
            assert_eq!(endpoint, None);
            assert!(!offline);
            assert_eq!(output, None);
        }
        _ => panic!("Expected Sync command"),
    }
    assert_eq!(cli.verbose, 0);
}

#[test]
fn cli_parse_sync_all_args() {
    let cli = Cli::parse_from([
        "form-autofill",
        "sync",
        "--html",
        "form.html",
        "--endpoint",
        "http://grid.local:9000",
        "--offline",
        "-o",
        "values.json",
        "-vv",
    ]);
    match cli.command {
        Commands::Sync {
            html,
            endpoint,
            offline,
            output,
        } => {
            assert_eq!(html, "form.html");
            assert_eq!(endpoint.as_deref(), Some("http://grid.local:9000"));
            assert!(offline);
            assert_eq!(output.as_deref(), Some("values.json"));
        }
        _ => panic!("Expected Sync command"),
    }
    assert_eq!(cli.verbose, 2);
}

#[test]
fn cli_parse_payload_and_resolve() {
    let cli = Cli::parse_from(["form-autofill", "payload", "--html", "a.html"]);
    assert!(matches!(cli.command, Commands::Payload { ref html } if html == "a.html"));

    let cli = Cli::parse_from(["form-autofill", "--config", "c.yaml", "resolve", "--request", "r.json"]);
    assert!(matches!(cli.command, Commands::Resolve { ref request } if request == "r.json"));
    assert_eq!(cli.config.as_deref(), Some("c.yaml"));
}

#[test]
fn cli_sync_requires_html() {
    assert!(Cli::try_parse_from(["form-autofill", "sync"]).is_err());
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn config_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.endpoint, "http://localhost:8080");
    assert_eq!(config.trace_file, None);
}

#[test]
fn config_missing_file_gives_defaults() {
    let config = load_config(Some("/nonexistent/form-autofill.yaml"));
    assert_eq!(config.endpoint, "http://localhost:8080");
}

#[test]
fn config_parses_yaml() {
    let yaml = "endpoint: http://grid.local:9000\ntrace_file: sync.jsonl\n";
    let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.endpoint, "http://grid.local:9000");
    assert_eq!(config.trace_file.as_deref(), Some("sync.jsonl"));
}

#[test]
fn config_partial_yaml_keeps_defaults() {
    let config: AppConfig = serde_yaml::from_str("trace_file: t.jsonl\n").unwrap();
    assert_eq!(config.endpoint, "http://localhost:8080");
}

#[test]
fn config_malformed_file_gives_defaults() {
    let path = std::env::temp_dir().join(format!("form-autofill-bad-{}.yaml", std::process::id()));
    std::fs::write(&path, "endpoint: [unclosed").unwrap();
    let config = load_config(path.to_str());
    assert_eq!(config.endpoint, "http://localhost:8080");
    let _ = std::fs::remove_file(&path);
}

#[test]
fn cli_endpoint_overrides_config() {
    let config = AppConfig {
        endpoint: "http://from-config".into(),
        trace_file: None,
    };
    assert_eq!(resolve_endpoint(Some("http://from-cli"), &config), "http://from-cli");
    assert_eq!(resolve_endpoint(None, &config), "http://from-config");
}

// ============================================================================
// Command Tests
// ============================================================================

fn fixture_path(name: &str) -> String {
    let base = std::env::current_dir().unwrap();
    base.join("tests").join("fixtures").join(name).display().to_string()
}

#[test]
fn payload_command_reads_html() {
    assert!(cmd_payload(&fixture_path("line_form.html")).is_ok());
}

#[test]
fn payload_command_fails_without_kind() {
    let err = cmd_payload(&fixture_path("no_kind_form.html")).unwrap_err();
    assert!(err.to_string().contains("type-select"));
}

#[test]
fn resolve_command_reads_request() {
    assert!(cmd_resolve(&fixture_path("resolve_request.json")).is_ok());
    assert!(cmd_resolve(&fixture_path("missing.json")).is_err());
}

#[test]
fn offline_sync_writes_values() {
    let out = std::env::temp_dir().join(format!("form-autofill-values-{}.json", std::process::id()));
    let config = AppConfig::default();

    let ok = cmd_sync(
        &fixture_path("line_form.html"),
        &config.endpoint,
        true,
        out.to_str(),
        &config,
        0,
    )
    .unwrap();
    assert!(ok);

    let values: std::collections::BTreeMap<String, String> =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(values["R-value"], "0.5");
    assert_eq!(values["ShortName-value"], "Demlinno1");
    assert_eq!(values["type-select"], "ACLineSegment");

    let _ = std::fs::remove_file(&out);
}

#[test]
fn sync_without_kind_reports_failure() {
    let config = AppConfig::default();
    let ok = cmd_sync(&fixture_path("no_kind_form.html"), &config.endpoint, true, None, &config, 0).unwrap();
    assert!(!ok);
}
