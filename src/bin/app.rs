use adapter::database::connect_database_with;
use anyhow::{Context, Result};
use console::{route::run_main_menu, terminal::Terminal};
use registry::AppRegistry;
use shared::config::AppConfig;
use shared::env::{which, Environment};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_logger()?;
    bootstrap()
}

fn init_logger() -> Result<()> {
    let log_level = match which() {
        Environment::Development => "debug",
        Environment::Production => "info",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| log_level.into());

    // メニューは stdout に出すので、ログは stderr へ
    let subscriber = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(subscriber)
        .with(env_filter)
        .try_init()?;

    Ok(())
}

fn bootstrap() -> Result<()> {
    let app_config = AppConfig::new()?;
    if app_config.admin.is_none() {
        tracing::warn!("administrator credentials are not configured, admin login is disabled");
    }
    let db = connect_database_with(&app_config.storage).with_context(|| {
        format!(
            "failed to load data files from {}",
            app_config.storage.data_dir.display()
        )
    })?;

    let registry = AppRegistry::new(db, app_config);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut term = Terminal::new(stdin.lock(), stdout.lock());

    run_main_menu(&registry, &mut term)
        .context("Unexpected error happened in the console")
        .inspect_err(|e| {
            tracing::error!(
                error.cause_chain = ?e, error.message = %e, "Unexpected error"
            )
        })
}
