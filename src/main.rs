use std::sync::Arc;
use std::time::Duration;

use clap::error::ErrorKind;
use clap::Parser;
use snake_team::utils::error::ErrorSeverity;
use snake_team::utils::monitor::SystemMonitor;
use snake_team::utils::{logger, validation::Validate};
use snake_team::{CliConfig, LaunchEngine, ProcessRunner, TeamPlan};

const USAGE: &str = "Usage: snake-team <hex_value> <port>";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match CliConfig::try_parse() {
        Ok(config) => config,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            if matches!(e.kind(), ErrorKind::ValueValidation | ErrorKind::InvalidValue) {
                eprintln!("❌ {}", e);
            }
            println!("{}", USAGE);
            std::process::exit(1);
        }
    };

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting snake-team launcher");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let plan = match TeamPlan::from_config(&config) {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    let monitor = Arc::new(SystemMonitor::new(monitor_enabled));
    let runner = if monitor_enabled {
        ProcessRunner::with_monitor(monitor.clone())
    } else {
        ProcessRunner::new()
    };

    let sampler = monitor_enabled.then(|| {
        let monitor = monitor.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(2));
            loop {
                ticker.tick().await;
                monitor.log_stats("running");
            }
        })
    });

    let engine = LaunchEngine::new(runner);
    match engine.run(plan).await {
        Ok(report) => {
            if let Some(handle) = sampler {
                handle.abort();
            }
            monitor.log_final_stats();

            for outcome in &report.outcomes {
                if outcome.is_success() {
                    tracing::info!("Agent on port {} finished", outcome.port);
                } else {
                    tracing::warn!("Agent on port {} failed: {:?}", outcome.port, outcome.status);
                }
            }

            // Child failures are reported but never change the exit status.
            println!("✅ Team finished: {}", report.summary());
        }
        Err(e) => {
            if let Some(handle) = sampler {
                handle.abort();
            }
            tracing::error!(
                "❌ Launch failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
