use clap::Parser;
use revio::cli::{RevioArgs, RevioSubCommand};
use revio::command_processing::review::{handle_detect, handle_review};
use revio::config::AppConfig;
use revio::errors::AppError;
use revio::server::start_server;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = RevioArgs::parse();

    let result = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| AppError::IO("starting the async runtime".to_string(), e))
        .and_then(|runtime| runtime.block_on(run_app(args)));

    if let Err(e) = result {
        tracing::error!("Application failed: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run_app(args: RevioArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    match args.command {
        RevioSubCommand::Review(review_args) => {
            tracing::info!("Running review subcommand");
            handle_review(review_args, &config).await?;
        }
        RevioSubCommand::Detect(detect_args) => {
            handle_detect(detect_args)?;
        }
        RevioSubCommand::Serve(serve_args) => {
            if let Some(host) = serve_args.host {
                config.server.host = host;
            }
            if let Some(port) = serve_args.port {
                config.server.port = port;
            }
            start_server(config).await?;
        }
    }

    Ok(())
}
