//! Shared harness for the HTTP integration tests.
//!
//! Builds the full application (router plus tower-http layers) over
//! in-memory adapters and a mock actions client, keeping handles to each
//! adapter so tests can seed data and inspect side effects.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use assistant_console::adapters::ai::{AgentFlavor, ConnectorAgentRunner, MockActionsClient};
use assistant_console::adapters::auth::StaticSessionValidator;
use assistant_console::adapters::http::AppState;
use assistant_console::adapters::memory::{
    InMemoryConversationsDataClient, InMemoryEntityDiscovery, InMemoryInferenceEndpoints,
    InMemorySavedQueryRepository,
};
use assistant_console::adapters::platform::{
    RecordingTelemetryReporter, StaticCapabilityRegistry, StaticLicensingService,
};
use assistant_console::config::ServerConfig;
use assistant_console::domain::capabilities::AssistantFeatures;
use assistant_console::domain::licensing::{License, LicenseType};
use assistant_console::server::build_app;

/// Token accepted for the `elastic` user.
pub const TOKEN: &str = "test-token";

pub struct TestApp {
    pub actions: MockActionsClient,
    pub conversations: InMemoryConversationsDataClient,
    pub licensing: Arc<StaticLicensingService>,
    pub saved_queries: InMemorySavedQueryRepository,
    pub inference: InMemoryInferenceEndpoints,
    pub entity_discovery: InMemoryEntityDiscovery,
    pub telemetry: RecordingTelemetryReporter,
    state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_features(AssistantFeatures::default())
    }

    pub fn with_features(features: AssistantFeatures) -> Self {
        Self::build(MockActionsClient::new(), features)
    }

    pub fn with_actions(actions: MockActionsClient) -> Self {
        Self::build(actions, AssistantFeatures::default())
    }

    fn build(actions: MockActionsClient, features: AssistantFeatures) -> Self {
        let conversations = InMemoryConversationsDataClient::new();
        let licensing = Arc::new(StaticLicensingService::new(License::active(
            LicenseType::Enterprise,
        )));
        let saved_queries = InMemorySavedQueryRepository::new();
        let inference = InMemoryInferenceEndpoints::new();
        let entity_discovery = InMemoryEntityDiscovery::new();
        let telemetry = RecordingTelemetryReporter::new();
        let shared_actions = Arc::new(actions.clone());

        let state = AppState {
            conversations: Arc::new(conversations.clone()),
            actions: shared_actions.clone(),
            agent_executor: Arc::new(ConnectorAgentRunner::new(
                shared_actions.clone(),
                AgentFlavor::AgentExecutor,
            )),
            assistant_graph: Arc::new(ConnectorAgentRunner::new(
                shared_actions,
                AgentFlavor::AssistantGraph,
            )),
            licensing: licensing.clone(),
            capabilities: Arc::new(StaticCapabilityRegistry::security_solution(features)),
            knowledge_base: None,
            telemetry: Arc::new(telemetry.clone()),
            saved_queries: Arc::new(saved_queries.clone()),
            inference: Arc::new(inference.clone()),
            entity_key_store: Arc::new(entity_discovery.clone()),
            api_keys: Arc::new(entity_discovery.clone()),
            entity_definitions: Arc::new(entity_discovery.clone()),
            session_validator: Arc::new(
                StaticSessionValidator::new().with_test_user(TOKEN, "elastic"),
            ),
            default_plugin_name: "securitySolutionUI".to_string(),
        };

        Self {
            actions,
            conversations,
            licensing,
            saved_queries,
            inference,
            entity_discovery,
            telemetry,
            state,
        }
    }

    pub fn router(&self) -> Router {
        build_app(self.state.clone(), &ServerConfig::default())
    }

    /// Sends an authenticated request; `body` is sent as JSON when present.
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        self.send_request(request(method, uri, Some(TOKEN), body)).await
    }

    /// Sends a request without an `Authorization` header.
    pub async fn send_anonymous(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> TestResponse {
        self.send_request(request(method, uri, None, body)).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> TestResponse {
        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        TestResponse {
            status,
            content_type,
            text: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

/// Builds a request, optionally with a bearer token and JSON body.
pub fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub text: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.text)
            .unwrap_or_else(|e| panic!("body is not JSON ({e}): {}", self.text))
    }

    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.starts_with("application/json"))
            .unwrap_or(false)
    }
}
