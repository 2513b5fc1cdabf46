use clap::Parser;
use stipend_refs::app::MenuSession;
use stipend_refs::utils::{logger, validation::Validate};
use stipend_refs::{CliConfig, LocalStorage};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    let log_format = if config.json_logging() {
        logger::LogFormat::Json
    } else {
        logger::LogFormat::Compact
    };
    logger::init_logger(cli.verbose, log_format);

    tracing::info!("Starting stipend-refs");
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let storage = match config.base_dir() {
        Some(base_dir) => LocalStorage::new(base_dir),
        None => LocalStorage::current_dir(),
    };
    tracing::info!("Data file: {}", config.data_file());

    let stdin = std::io::stdin();
    let mut session = MenuSession::new(stdin.lock(), std::io::stdout(), storage, config.data_file());
    session.run()?;

    tracing::info!("Session finished");
    Ok(())
}
