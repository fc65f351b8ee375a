use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use wordscope::cli::{Cli, Commands};
use wordscope::types::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration first (no logging yet)
    let config = if cli.config.exists() {
        Config::load(&cli.config)
            .with_context(|| format!("Failed to load {}", cli.config.display()))?
    } else {
        Config::load_or_default()
    };

    // Determine log level: CLI flags take precedence over config
    let log_level = if cli.quiet {
        "error".to_string()
    } else if cli.verbose {
        "debug".to_string()
    } else {
        config.general.log_level.clone()
    };

    let filter = EnvFilter::from_default_env().add_directive(
        format!("wordscope={}", log_level)
            .parse()
            .unwrap_or_else(|_| "wordscope=info".parse().expect("fallback directive is valid")),
    );

    let registry = tracing_subscriber::registry().with(filter);
    if config.general.log_format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::debug!("Configuration loaded from: {}", cli.config.display());

    match cli.command {
        Commands::Init { path } => {
            wordscope::cli::commands::init(path).await?;
        }
        Commands::Lookup { word, pretty } => {
            wordscope::cli::commands::lookup(&word, pretty, &config).await?;
        }
        Commands::Serve { port, host } => {
            wordscope::cli::commands::serve(port, host, &config).await?;
        }
        Commands::Sources => {
            wordscope::cli::commands::sources(&config).await?;
        }
        Commands::Doctor => {
            wordscope::cli::commands::doctor(&cli.config).await?;
        }
        Commands::Version => {
            wordscope::cli::commands::version();
        }
    }

    Ok(())
}
