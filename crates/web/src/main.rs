use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use storage::Database;
use storage::services::AdmissionSource;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod routes;
mod state;

use config::Config;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::admission::handlers::trigger_allocation,
        features::admission::handlers::list_latest_results,
        features::reports::handlers::get_program_enrollment,
        features::reports::handlers::get_faculty_results,
    ),
    components(
        schemas(
            storage::dto::allocation::AllocationSummary,
            storage::dto::allocation::AllocationOutcome,
            storage::dto::allocation::AllocationStatus,
            storage::dto::report::ProgramEnrollmentRow,
            storage::dto::report::FacultyResultRow,
        )
    ),
    tags(
        (name = "allocation", description = "Admission allocation runs and their results"),
        (name = "reports", description = "Reports derived from the latest allocation results"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting admissions allocation API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!("Connecting to database at: {}", config.database_host());
    let db = Database::with_max_connections(&config.database_url, config.max_connections)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    let source: Arc<dyn AdmissionSource> = Arc::new(db);
    let state = AppState::new(source);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    let app = routes::router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors);

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", bind_address);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    axum::serve(listener, app).await?;

    Ok(())
}
