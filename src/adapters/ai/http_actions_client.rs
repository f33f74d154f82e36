//! HTTP actions client - executes connectors through the actions API.
//!
//! Posts `{ params: { subAction, subActionParams } }` to
//! `{base_url}/api/actions/connector/{id}/_execute`, authenticated with an
//! `ApiKey` authorization header.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpActionsConfig::new("https://kibana.internal:5601", api_key)
//!     .with_timeout(Duration::from_secs(120));
//!
//! let client = HttpActionsClient::new(config)?;
//! ```

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use crate::domain::conversation::TraceData;
use crate::ports::{ActionError, ActionRequest, ActionResult, ActionStatus, ActionsClient};

/// Configuration for the HTTP actions client.
#[derive(Debug, Clone)]
pub struct HttpActionsConfig {
    pub base_url: String,
    api_key: SecretString,
    pub timeout: Duration,
}

impl HttpActionsConfig {
    pub fn new(base_url: impl Into<String>, api_key: SecretString) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            timeout: Duration::from_secs(120),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Actions API client over reqwest.
pub struct HttpActionsClient {
    config: HttpActionsConfig,
    client: Client,
}

impl HttpActionsClient {
    pub fn new(config: HttpActionsConfig) -> Result<Self, ActionError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ActionError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn execute_url(&self, connector_id: &str) -> String {
        format!(
            "{}/api/actions/connector/{}/_execute",
            self.config.base_url,
            urlencoding::encode(connector_id)
        )
    }

    async fn send(&self, request: &ActionRequest) -> Result<Response, ActionError> {
        self.client
            .post(self.execute_url(&request.connector_id))
            .header("Authorization", format!("ApiKey {}", self.config.api_key()))
            .header("kbn-xsrf", "true")
            .json(&json!({ "params": request.params() }))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ActionError::Network(format!(
                        "Request timed out after {}s",
                        self.config.timeout.as_secs()
                    ))
                } else if e.is_connect() {
                    ActionError::Network(format!("Connection failed: {}", e))
                } else {
                    ActionError::Network(e.to_string())
                }
            })
    }

    async fn handle_response_status(
        connector_id: &str,
        response: Response,
    ) -> Result<Response, ActionError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        match status.as_u16() {
            404 => Err(ActionError::ConnectorNotFound(connector_id.to_string())),
            code => Err(ActionError::Connector {
                status: code,
                message: error_body,
            }),
        }
    }

    async fn parse_response(
        request: &ActionRequest,
        response: Response,
    ) -> Result<ActionResult, ActionError> {
        let response = Self::handle_response_status(&request.connector_id, response).await?;

        if request.sub_action.is_stream() {
            let mut stream = response.bytes_stream();
            let mut buffer = Vec::new();
            while let Some(chunk) = stream.next().await {
                let chunk = chunk.map_err(|e| ActionError::Network(format!("Stream error: {}", e)))?;
                buffer.extend_from_slice(&chunk);
            }
            let body = String::from_utf8(buffer)
                .map_err(|e| ActionError::Parse(format!("Stream is not valid UTF-8: {}", e)))?;
            return Ok(ActionResult::ok(request.connector_id.clone(), body));
        }

        let body: ExecuteResponse = response
            .json()
            .await
            .map_err(|e| ActionError::Parse(format!("Failed to parse response: {}", e)))?;
        Ok(body.into_result(&request.connector_id))
    }
}

#[async_trait]
impl ActionsClient for HttpActionsClient {
    async fn execute(&self, request: ActionRequest) -> Result<ActionResult, ActionError> {
        debug!(
            connector_id = %request.connector_id,
            sub_action = request.sub_action.as_str(),
            "Executing connector"
        );

        let cancellation = request.cancellation.clone();
        tokio::select! {
            _ = cancellation.cancelled() => Err(ActionError::Cancelled),
            result = async {
                let response = self.send(&request).await?;
                Self::parse_response(&request, response).await
            } => result,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Actions API types
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
struct ExecuteResponse {
    status: ActionStatus,
    #[serde(default)]
    connector_id: Option<String>,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    service_message: Option<String>,
}

impl ExecuteResponse {
    fn into_result(self, requested_connector_id: &str) -> ActionResult {
        let trace_data = self
            .data
            .as_ref()
            .and_then(|d| d.get("trace_data"))
            .and_then(|t| serde_json::from_value::<TraceData>(t.clone()).ok())
            .filter(|t| !t.is_empty());

        // invokeAI answers `{ message }`; older connectors answer a bare string.
        let data = match self.data {
            Some(Value::String(s)) => Some(s),
            Some(Value::Object(map)) => map
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        };

        ActionResult {
            connector_id: self
                .connector_id
                .unwrap_or_else(|| requested_connector_id.to_string()),
            status: self.status,
            data,
            message: self.service_message.or(self.message),
            trace_data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    #[test]
    fn config_builder_works() {
        let config = HttpActionsConfig::new("https://kibana.local/", Secret::new("key".into()))
            .with_timeout(Duration::from_secs(30));

        assert_eq!(config.base_url, "https://kibana.local");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.api_key(), "key");
    }

    #[test]
    fn execute_url_encodes_connector_id() {
        let config = HttpActionsConfig::new("http://localhost:5601", Secret::new("k".into()));
        let client = HttpActionsClient::new(config).unwrap();

        assert_eq!(
            client.execute_url("my connector"),
            "http://localhost:5601/api/actions/connector/my%20connector/_execute"
        );
    }

    #[test]
    fn parses_invoke_ai_object_data() {
        let body: ExecuteResponse = serde_json::from_value(json!({
            "status": "ok",
            "connector_id": "c1",
            "data": { "message": "Hello", "trace_data": { "traceId": "t1" } }
        }))
        .unwrap();

        let result = body.into_result("c1");
        assert!(result.is_ok());
        assert_eq!(result.data.as_deref(), Some("Hello"));
        assert_eq!(
            result.trace_data.and_then(|t| t.trace_id).as_deref(),
            Some("t1")
        );
    }

    #[test]
    fn parses_error_status_with_service_message() {
        let body: ExecuteResponse = serde_json::from_value(json!({
            "status": "error",
            "message": "an error occurred",
            "service_message": "rate limited"
        }))
        .unwrap();

        let result = body.into_result("c2");
        assert!(!result.is_ok());
        assert_eq!(result.connector_id, "c2");
        assert_eq!(result.data, None);
        assert_eq!(result.message.as_deref(), Some("rate limited"));
    }

    #[test]
    fn parses_bare_string_data() {
        let body: ExecuteResponse =
            serde_json::from_value(json!({ "status": "ok", "data": "plain" })).unwrap();
        assert_eq!(body.into_result("c").data.as_deref(), Some("plain"));
    }
}
