//! ALB API key guard
//!
//! Post-processes a compiled serverless template so that every function whose
//! `alb` event declares an `apiKey` is only reachable with a matching
//! `x-api-key` header.
//!
//! # Architecture Overview
//!
//! ```text
//!   serverless.yml ──▶ service ──┐
//!                                ├──▶ lifecycle (provider check, hook)
//!   template.json ──▶ template ──┘            │
//!                                             ▼
//!                                  transform::apply
//!                                   ├─ enumerator  (alb + apiKey events)
//!                                   ├─ listener    (+ x-api-key condition)
//!                                   └─ rule        (+ InvalidApiKeyRule, 403)
//!                                             │
//!                                             ▼
//!                                  template.json (output)
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use alb_api_key_guard::config::validation::{validate_config, validate_watch};
use alb_api_key_guard::config::watcher::InputWatcher;
use alb_api_key_guard::config::{parse_config_or_default, ConfigError, GuardConfig};
use alb_api_key_guard::lifecycle::hooks::{AlbApiKeyPlugin, USAGE};
use alb_api_key_guard::lifecycle::{apply_files, plan_files, signals};
use alb_api_key_guard::observability::logging;
use alb_api_key_guard::service::load_service;

#[derive(Parser)]
#[command(name = "alb-api-key-guard", version)]
#[command(about = USAGE, long_about = None)]
struct Cli {
    /// Configuration file (defaults are used if it does not exist).
    #[arg(short, long, default_value = "alb-api-key.toml")]
    config: PathBuf,

    /// Service definition (overrides paths.service).
    #[arg(long, global = true)]
    service: Option<PathBuf>,

    /// Compiled template (overrides paths.template).
    #[arg(long, global = true)]
    template: Option<PathBuf>,

    /// Output file (overrides paths.output).
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add api key rules to the compiled template
    Apply,
    /// Show which listener rules would change
    Plan,
    /// Show plugin usage and lifecycle hooks
    Hooks,
    /// Re-apply whenever the service or template changes
    Watch,
}

impl Cli {
    fn apply_overrides(&self, config: &mut GuardConfig) {
        if let Some(service) = &self.service {
            config.paths.service = service.clone();
        }
        if let Some(template) = &self.template {
            config.paths.template = template.clone();
        }
        if let Some(output) = &self.output {
            config.paths.output = Some(output.clone());
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = parse_config_or_default(&cli.config)?;
    cli.apply_overrides(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init(&config.observability);
    tracing::debug!(
        config = %cli.config.display(),
        from_file = cli.config.exists(),
        service = %config.paths.service.display(),
        template = %config.paths.template.display(),
        output = %config.output_path().display(),
        "Configuration loaded"
    );

    match cli.command {
        Commands::Apply => {
            let report = apply_files(&config)?;
            for name in &report.listener_rules_updated {
                println!("updated  {}", name);
            }
            for name in &report.invalid_key_rules_created {
                println!("created  {}", name);
            }
        }
        Commands::Plan => {
            let specs = plan_files(&config)?;
            if specs.is_empty() {
                println!("No alb events with apiKey");
            }
            for spec in specs {
                println!(
                    "{}: update {}, create {} (priority {})",
                    spec.function_name,
                    spec.listener_rule_name(),
                    spec.invalid_key_rule_name(),
                    spec.resource_priority()
                );
            }
        }
        Commands::Hooks => {
            let service = load_service(&config.paths.service)?;
            let plugin = AlbApiKeyPlugin::new(&service.provider, &config.provider.expected)?;
            let commands = plugin.commands();
            println!("usage: {}", commands.usage);
            println!("deploy lifecycle events: {}", commands.deploy_lifecycle_events.join(", "));
            println!("hooks: {}", plugin.hooks().join(", "));
        }
        Commands::Watch => {
            validate_watch(&config).map_err(ConfigError::Validation)?;
            watch(&config).await?;
        }
    }

    Ok(())
}

/// Apply once, then again on every input change until Ctrl+C.
async fn watch(config: &GuardConfig) -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = apply_files(config) {
        tracing::error!(error = %e, "Apply failed");
    }

    let (watcher, mut changes) =
        InputWatcher::new(&[config.paths.service.as_path(), config.paths.template.as_path()]);
    let _watcher = watcher.run()?;

    let shutdown = signals::shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            changed = changes.recv() => {
                let Some(path) = changed else { break };
                // Editors emit several events per save.
                while changes.try_recv().is_ok() {}

                tracing::info!(path = %path.display(), "Input changed, re-applying");
                match apply_files(config) {
                    Ok(report) => tracing::info!(
                        invalid_key_rules = report.invalid_key_rules_created.len(),
                        "Re-applied"
                    ),
                    Err(e) => tracing::error!(error = %e, "Apply failed"),
                }
            }
            _ = &mut shutdown => break,
        }
    }

    Ok(())
}
