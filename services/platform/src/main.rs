use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use platform::email::{SmtpConfig, SmtpEmailSender};
use platform::state::AppState;
use platform::templates::TemplateEngine;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting event platform");

    // Initialize database connection pool
    let db_config = common::database::DatabaseConfig::from_env()?;
    let pool = common::database::init_pool(&db_config).await?;
    common::database::initialize_schema(&pool).await?;

    if common::database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    let mut state = AppState::build(pool);

    // The notification sender is optional; redemption works without it.
    match SmtpConfig::from_env() {
        Ok(smtp_config) => {
            let mailer = SmtpEmailSender::new(&smtp_config)?;
            let templates = TemplateEngine::new("templates").ok();
            state = state.with_mailer(Arc::new(mailer), templates);
            info!("SMTP notifications enabled via {}", smtp_config.host);
        }
        Err(e) => warn!("SMTP notifications disabled: {}", e),
    }

    info!(
        "Event platform initialized successfully ({} pooled connections)",
        state.db_pool.size()
    );

    Ok(())
}
