use color_eyre::Result;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use securesocial::api::AuthenticatedClient;
use securesocial::cli::{parse_args, report, run_command, version_line, CliCommand};
use securesocial::config::ClientConfig;

/// Logs go to stderr so command output on stdout stays clean.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Level::INFO.as_str()))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(verbose)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = parse_args(std::env::args());

    // Handle --version before touching the credentials file
    if args.command == CliCommand::Version {
        println!("{}", version_line());
        return Ok(());
    }

    init_logging(args.verbose);

    let config = ClientConfig::from_env();
    tracing::debug!("Using API at {}", config.base_url);

    let client = AuthenticatedClient::from_config(&config).map_err(report)?;
    run_command(args.command, &client, &mut std::io::stdout()).await
}
