//! Server bootstrap: tracing, adapter wiring, tower-http layers, serve.

use std::future::Future;
use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use axum::Router;
use thiserror::Error;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::adapters::ai::{
    AgentFlavor, ConnectorAgentRunner, HttpActionsClient, HttpActionsConfig,
    UnconfiguredActionsClient,
};
use crate::adapters::auth::StaticSessionValidator;
use crate::adapters::http::{create_router, AppState};
use crate::adapters::memory::{
    InMemoryConversationsDataClient, InMemoryEntityDiscovery, InMemoryInferenceEndpoints,
    InMemorySavedQueryRepository, StaticKnowledgeBase,
};
use crate::adapters::platform::{
    StaticCapabilityRegistry, StaticLicensingService, TracingTelemetryReporter,
};
use crate::config::{AppConfig, ConfigError, LogFormat, ServerConfig, ValidationError};
use crate::domain::licensing::License;
use crate::ports::{ActionError, ActionsClient, KnowledgeBaseDataClient};

/// Errors that stop the server from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid static token table: {0}")]
    StaticTokens(#[from] crate::domain::foundation::ValidationError),

    #[error("Failed to build actions client: {0}")]
    ActionsClient(#[from] ActionError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over `server.log_level` when set.
pub fn init_tracing(config: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = match config.log_format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
    if let Err(e) = result {
        warn!(error = %e, "Tracing subscriber already installed");
    }
}

/// Wires every port to its adapter.
///
/// Storage is in-memory. Connectors go through the actions API when
/// `assistant.actions_base_url` is set and fail with `NotConfigured` otherwise.
pub fn build_state(config: &AppConfig) -> Result<AppState, StartupError> {
    let assistant = &config.assistant;

    let actions: Arc<dyn ActionsClient> =
        match (&assistant.actions_base_url, &assistant.actions_api_key) {
            (Some(base_url), Some(api_key)) => {
                info!(base_url = %base_url, "Using actions API");
                let http_config = HttpActionsConfig::new(base_url.clone(), api_key.clone())
                    .with_timeout(assistant.actions_timeout());
                Arc::new(HttpActionsClient::new(http_config)?)
            }
            _ => {
                warn!("No actions API configured; connector executions will fail");
                Arc::new(UnconfiguredActionsClient)
            }
        };

    let knowledge_base = assistant.knowledge_base_alias.as_ref().map(|alias| {
        Arc::new(StaticKnowledgeBase::new(alias.clone(), assistant.elser_model_id.clone()))
            as Arc<dyn KnowledgeBaseDataClient>
    });

    let capabilities =
        StaticCapabilityRegistry::security_solution(config.features.assistant_features());
    let session_validator = StaticSessionValidator::from_pairs(&config.auth.static_tokens)?;
    info!(tokens = session_validator.token_count(), "Loaded static session tokens");

    let entity_discovery = Arc::new(InMemoryEntityDiscovery::new());

    Ok(AppState {
        conversations: Arc::new(InMemoryConversationsDataClient::new()),
        agent_executor: Arc::new(ConnectorAgentRunner::new(
            actions.clone(),
            AgentFlavor::AgentExecutor,
        )),
        assistant_graph: Arc::new(ConnectorAgentRunner::new(
            actions.clone(),
            AgentFlavor::AssistantGraph,
        )),
        actions,
        licensing: Arc::new(StaticLicensingService::new(License::active(
            assistant.license_type,
        ))),
        capabilities: Arc::new(capabilities),
        knowledge_base,
        telemetry: Arc::new(TracingTelemetryReporter),
        saved_queries: Arc::new(InMemorySavedQueryRepository::new()),
        inference: Arc::new(InMemoryInferenceEndpoints::new()),
        entity_key_store: entity_discovery.clone(),
        api_keys: entity_discovery.clone(),
        entity_definitions: entity_discovery,
        session_validator: Arc::new(session_validator),
        default_plugin_name: assistant.default_plugin_name.clone(),
    })
}

/// The API router wrapped in request id, tracing, CORS, and timeout layers.
///
/// Without configured origins CORS allows any origin, except in production
/// where no cross-origin request is allowed.
pub fn build_app(state: AppState, config: &ServerConfig) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(cors_layer(config))
        .layer(TimeoutLayer::new(config.request_timeout()));

    create_router(state).layer(middleware)
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins_list()
        .into_iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    // Production never falls back to a wildcard origin.
    let allow_origin = if !origins.is_empty() {
        AllowOrigin::list(origins)
    } else if config.is_production() {
        warn!("No CORS origins configured, cross-origin requests are rejected");
        AllowOrigin::list(Vec::<HeaderValue>::new())
    } else {
        AllowOrigin::from(Any)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}

/// Start the HTTP server with graceful shutdown support.
///
/// The server stops accepting new connections when `shutdown` completes.
///
/// # Errors
/// Returns an error if the state cannot be built or the listener fails.
pub async fn run_with_shutdown<F>(config: AppConfig, shutdown: F) -> Result<(), StartupError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.server.socket_addr()?;
    let state = build_state(&config)?;
    let app = build_app(state, &config.server);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Assistant console listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Completes on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use crate::config::Environment;
    use secrecy::SecretString;
    use tower::ServiceExt;

    #[test]
    fn default_config_builds_state() {
        let state = build_state(&AppConfig::default()).unwrap();
        assert_eq!(state.default_plugin_name, "securitySolutionUI");
        assert!(state.knowledge_base.is_none());
    }

    #[test]
    fn knowledge_base_alias_wires_knowledge_base() {
        let mut config = AppConfig::default();
        config.assistant.knowledge_base_alias = Some("kb-alias".to_string());

        let state = build_state(&config).unwrap();

        let kb = state.knowledge_base.unwrap();
        assert_eq!(kb.index_alias(), "kb-alias");
    }

    #[test]
    fn actions_api_settings_build_http_client() {
        let mut config = AppConfig::default();
        config.assistant.actions_base_url = Some("http://localhost:5601".to_string());
        config.assistant.actions_api_key = Some(SecretString::new("key".to_string()));

        assert!(build_state(&config).is_ok());
    }

    #[test]
    fn malformed_static_tokens_fail_startup() {
        let mut config = AppConfig::default();
        config.auth.static_tokens = "no-separator".to_string();

        assert!(matches!(
            build_state(&config),
            Err(StartupError::StaticTokens(_))
        ));
    }

    #[tokio::test]
    async fn app_sets_request_id_header() {
        let config = AppConfig::default();
        let app = build_app(build_state(&config).unwrap(), &config.server);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/entities/ping")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    async fn allow_origin_for(config: &AppConfig) -> Option<String> {
        let app = build_app(build_state(config).unwrap(), &config.server);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/entities/ping")
                    .header("origin", "http://kibana.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        response
            .headers()
            .get("access-control-allow-origin")
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn development_cors_allows_any_origin() {
        let config = AppConfig::default();
        assert_eq!(allow_origin_for(&config).await.as_deref(), Some("*"));
    }

    #[tokio::test]
    async fn production_cors_without_origins_allows_none() {
        let mut config = AppConfig::default();
        config.server.environment = Environment::Production;
        assert_eq!(allow_origin_for(&config).await, None);
    }

    #[tokio::test]
    async fn production_cors_allows_configured_origin() {
        let mut config = AppConfig::default();
        config.server.environment = Environment::Production;
        config.server.cors_origins = Some("http://kibana.example".to_string());
        assert_eq!(
            allow_origin_for(&config).await.as_deref(),
            Some("http://kibana.example")
        );
    }

    #[tokio::test]
    async fn app_keeps_caller_request_id() {
        let config = AppConfig::default();
        let app = build_app(build_state(&config).unwrap(), &config.server);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/entities/ping")
                    .header("x-request-id", "req-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers()["x-request-id"], "req-42");
    }
}
