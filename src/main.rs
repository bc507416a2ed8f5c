use clap::Parser;
use shoppies::core::ConfigProvider;
use shoppies::utils::error::ErrorSeverity;
use shoppies::utils::{logger, validation::Validate};
use shoppies::{app, AppConfig, CliConfig, LocalStorage, NominationSession, OmdbClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("Starting shoppies with command {:?}", cli.command);

    let config = match AppConfig::resolve(&cli).and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    tracing::debug!("Resolved config: {:?}", config);

    let source = OmdbClient::from_config(&config);
    let storage = LocalStorage::new(config.storage_path());
    let mut session = NominationSession::new(source, storage);

    let mut stdout = std::io::stdout();
    if let Err(e) = app::run_command(&mut session, &cli.command, &config, &mut stdout).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::debug!("💡 Recovery suggestion: {}", e.recovery_suggestion());

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

    Ok(())
}
