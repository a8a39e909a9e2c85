use anyhow::Context;
use clap::{Parser, Subcommand};
use superstore_kernel::settings::Settings;

#[derive(Parser)]
#[command(name = "superstore-cli", about = "Superstore BI database tooling")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the resolved connection URI.
    Uri {
        /// Print the password instead of masking it.
        #[arg(long)]
        show_password: bool,
        /// Percent-encode user, password, and database.
        #[arg(long, requires = "show_password")]
        encoded: bool,
    },
    /// Build the engine and optionally run a round trip against it.
    Connect {
        /// Execute `SELECT 1` through the pool.
        #[arg(long)]
        ping: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load Superstore settings")?;
    superstore_telemetry::init(&settings.telemetry)?;

    tracing::debug!(env = ?settings.environment, "superstore-cli starting");

    match cli.command {
        Command::Uri {
            show_password,
            encoded,
        } => {
            let config = &settings.database;
            let uri = match (show_password, encoded) {
                (true, false) => superstore_db::connection_uri(config),
                (true, true) => superstore_db::encoded_connection_uri(config),
                (false, _) => superstore_db::Redacted(config).to_string(),
            };
            println!("{uri}");
        }
        Command::Connect { ping } => {
            let pool = superstore_db::get_connection(&settings.database)?;
            tracing::info!(
                db = %superstore_db::Redacted(&settings.database),
                "engine created"
            );

            if ping {
                let one: i32 = sqlx::query_scalar("SELECT 1")
                    .fetch_one(&pool)
                    .await
                    .with_context(|| "ping failed")?;
                tracing::info!(result = one, "ping succeeded");
                println!("ok");
            } else {
                println!("engine ready");
            }

            pool.close().await;
        }
    }

    Ok(())
}
