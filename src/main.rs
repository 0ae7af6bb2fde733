//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here.

use dotenv::dotenv;
use lesson_sync::adapters::http::HttpSchoolApi;
use lesson_sync::adapters::memory::InMemorySchoolApi;
use lesson_sync::adapters::report::CsvReportWriter;
use lesson_sync::adapters::ui::tui::{TuiInputPort, prompt_session};
use lesson_sync::ports::{InputPort, ReportPort, SchoolApi};
use lesson_sync::shared::config::AppConfig;
use lesson_sync::usecases::{
    AttendanceSyncEngine, ObjectiveCatalog, ObjectiveService, RosterService,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!("no .env found"),
    }

    lesson_sync::adapters::ui::init_ui();

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "config could not be loaded, using defaults");
        AppConfig::default()
    });

    // --- Backend: real API when configured, seeded in-memory class otherwise ---
    let api: Arc<dyn SchoolApi> = match cfg.api_base_url() {
        Some(url) => {
            if cfg.api_token.is_none() {
                warn!("LESSON_SYNC_API_TOKEN is not set; requests are sent unauthenticated");
            }
            info!(url = %url, "using school backend");
            Arc::new(HttpSchoolApi::new(url, cfg.api_token.clone()))
        }
        None => {
            warn!("LESSON_SYNC_API_BASE_URL not set, using in-memory demo backend");
            Arc::new(InMemorySchoolApi::demo())
        }
    };

    let timeout = cfg.request_timeout();
    info!(
        timeout_secs = timeout.map(|d| d.as_secs()).unwrap_or(0),
        "per-request timeout"
    );

    let session = prompt_session(&cfg.session_defaults()).map_err(|e| anyhow::anyhow!("{}", e))?;
    info!(session = %session, "lesson session");

    // --- Services ---
    let roster = Arc::new(RosterService::new(Arc::clone(&api), timeout));
    let sync = Arc::new(AttendanceSyncEngine::new(Arc::clone(&api), timeout));
    let catalog = Arc::new(ObjectiveCatalog::new(Arc::clone(&api), timeout));
    let objectives = Arc::new(ObjectiveService::new(Arc::clone(&api), timeout));
    let report: Arc<dyn ReportPort> = Arc::new(CsvReportWriter::new(cfg.report_dir_or_default()));

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(
        session, roster, sync, catalog, objectives, report,
    ));

    // --- Run (main menu -> Attendance / Objectives) ---
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
