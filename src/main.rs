//! Development server: loads settings from env/.env, applies pending migrations, serves until Ctrl-C.

use blog_api::{create_app_from, Config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(config.log_directive().parse()?))
        .init();

    let app = create_app_from(config, None)?;
    let applied = app.migrate().upgrade().await?;
    if applied.is_empty() {
        tracing::info!(version = ?app.migrate().current().await?, "schema up to date");
    }
    app.run().await?;
    Ok(())
}
