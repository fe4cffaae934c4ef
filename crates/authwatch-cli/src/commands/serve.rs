//! Start the AuthWatch server.

use clap::Args;

use authwatch_core::error::AppError;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Do not run pending migrations on start-up
    #[arg(long)]
    pub skip_migrations: bool,

    /// Do not start the scheduled alert scan
    #[arg(long)]
    pub no_worker: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, config_path: &str) -> Result<(), AppError> {
    let mut config = super::load_config(config_path)?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if args.skip_migrations {
        config.database.run_migrations = false;
    }
    if args.no_worker {
        config.worker.enabled = false;
    }

    println!("Starting AuthWatch server...");
    println!("  Host: {}", config.server.host);
    println!("  Port: {}", config.server.port);

    authwatch_api::run_server(config).await
}
