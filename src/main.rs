use anyhow::Context;
use superstore_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load Superstore settings")?;
    superstore_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        db = %superstore_db::Redacted(&settings.database),
        "superstore-bi bootstrap starting"
    );

    let pool = superstore_db::get_connection(&settings.database)?;

    tracing::info!(
        open_connections = pool.size(),
        "superstore-bi engine ready"
    );
    Ok(())
}
