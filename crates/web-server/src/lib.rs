use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use analytics::AnalyticsEngine;
use chrono::NaiveDate;
use configuration::{Config, ServerSettings};
use database::SensorStore;
use renderer::{DocumentRenderer, PdfRenderer};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;
pub mod reports;

/// The shared application state that all handlers can access.
pub struct AppState<S> {
    pub store: S,
    pub engine: AnalyticsEngine,
    pub renderer: Arc<dyn DocumentRenderer>,
    pub config: Config,
    /// Pins the date periods are resolved against. `None` follows the clock.
    reference_date: Option<NaiveDate>,
}

impl<S: SensorStore> AppState<S> {
    pub fn new(store: S, config: Config) -> Self {
        Self {
            store,
            engine: AnalyticsEngine::new(),
            renderer: Arc::new(PdfRenderer::new()),
            config,
            reference_date: None,
        }
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn DocumentRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    /// The date `today` / `last7` / `month` are resolved against.
    pub fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

/// Builds the CORS layer from the configured origins. Origins that are not
/// valid header values are skipped with a warning.
pub fn cors_layer(settings: &ServerSettings) -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .cors_origins()
        .into_iter()
        .filter_map(|origin| match HeaderValue::from_str(&origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin.");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Defines the application routes on top of `state`.
pub fn router<S: SensorStore>(state: Arc<AppState<S>>) -> Router {
    let cors = cors_layer(&state.config.server);

    let api = Router::new()
        .route("/health", get(handlers::health))
        .route("/sensors/:sensor", post(handlers::create_reading::<S>))
        .route("/sensors/:sensor/all", get(handlers::list_readings::<S>))
        .route(
            "/sensors/:sensor/statistics/:period",
            get(handlers::get_statistics::<S>),
        )
        .route(
            "/sensors/:sensor/report/:period",
            get(handlers::get_report::<S>),
        )
        .route("/sensors/:sensor/pdf/:period", get(handlers::get_pdf::<S>))
        .route("/latest/:sensor", get(handlers::get_latest::<S>));

    Router::new()
        .nest("/api", api)
        .with_state(state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// Serves the API on `addr` until the process is stopped.
pub async fn run_server<S: SensorStore>(
    state: AppState<S>,
    addr: SocketAddr,
) -> anyhow::Result<()> {
    let app = router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
