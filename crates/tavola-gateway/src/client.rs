//! HTTP implementation of the recommendation gateway.
//!
//! Talks to two host endpoints: the chat-completion wrapper (POST, free
//! text mode) and the precomputed budget-recommendation store (GET,
//! bucket mode). Transport and upstream failures always surface as
//! typed gateway errors with a retryable classification; nothing from
//! `reqwest` crosses the boundary.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tavola_core::config::GatewayConfig;
use tavola_core::error::{Result, TavolaError};
use tavola_core::menu::{BudgetRecommendation, MenuCatalog, PriceValue};
use tavola_core::session::{ChatMessage, MessageRole, RecommendationGateway};
use tracing::debug;

/// Gateway implementation that talks to the host's HTTP endpoints.
#[derive(Clone)]
pub struct HttpRecommendationGateway {
    client: Client,
    config: GatewayConfig,
    system: Option<String>,
}

impl HttpRecommendationGateway {
    /// Creates a gateway from configuration.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| TavolaError::config(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            config,
            system: None,
        })
    }

    /// Overrides the system prompt sent with chat requests. By default
    /// it is rendered per-catalog by [`crate::prompt::system_prompt`].
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    fn build_chat_request<'a>(
        &'a self,
        messages: &'a [ChatMessage],
        catalog: &'a MenuCatalog,
    ) -> ChatRequest<'a> {
        // The configured identity is canonical; the catalog name is the
        // fallback for hosts that configure nothing.
        let restaurant_name = self
            .config
            .restaurant
            .as_ref()
            .map(|r| r.name.as_str())
            .unwrap_or(&catalog.restaurant_name);

        ChatRequest {
            messages: messages.iter().map(WireMessage::from).collect(),
            restaurant_data: RestaurantData {
                name: restaurant_name,
                menu: catalog.items.iter().map(WireMenuItem::from).collect(),
            },
            system: Some(
                self.system
                    .clone()
                    .unwrap_or_else(|| crate::prompt::system_prompt(catalog)),
            ),
        }
    }
}

#[async_trait]
impl RecommendationGateway for HttpRecommendationGateway {
    async fn chat(&self, messages: &[ChatMessage], catalog: &MenuCatalog) -> Result<String> {
        let request = self.build_chat_request(messages, catalog);

        debug!(url = %self.config.chat_url, turns = messages.len(), "sending chat request");
        let response = self
            .client
            .post(&self.config.chat_url)
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(map_http_error(status, body));
        }

        let parsed: ChatResponse = response.json().await.map_err(|err| {
            TavolaError::gateway(format!("failed to parse chat response: {err}"))
        })?;

        Ok(parsed.response)
    }

    async fn budget_lookup(&self, budget: f64) -> Result<Option<BudgetRecommendation>> {
        let bucket = bucket_for(budget);

        debug!(url = %self.config.budget_url, bucket, "looking up budget bucket");
        let response = self
            .client
            .get(&self.config.budget_url)
            .query(&[("budget", bucket)])
            .send()
            .await
            .map_err(map_transport_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(bucket, "no precomputed recommendation for bucket");
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(map_http_error(status, body));
        }

        let recommendation: BudgetRecommendation = response.json().await.map_err(|err| {
            TavolaError::gateway(format!("failed to parse budget recommendation: {err}"))
        })?;

        Ok(Some(recommendation))
    }
}

/// Rounds a budget down to its lookup bucket (nearest multiple of 10).
pub fn bucket_for(budget: f64) -> i64 {
    ((budget / 10.0).floor() * 10.0) as i64
}

fn map_transport_error(err: reqwest::Error) -> TavolaError {
    if err.is_connect() || err.is_timeout() {
        TavolaError::gateway_retryable(format!("gateway request failed: {err}"))
    } else {
        TavolaError::gateway(format!("gateway request failed: {err}"))
    }
}

fn map_http_error(status: StatusCode, body: String) -> TavolaError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error)
        .unwrap_or(body);

    let is_retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    TavolaError::gateway_status(status.as_u16(), message, is_retryable)
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: Vec<WireMessage<'a>>,
    #[serde(rename = "restaurantData")]
    restaurant_data: RestaurantData<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> From<&'a ChatMessage> for WireMessage<'a> {
    fn from(message: &'a ChatMessage) -> Self {
        Self {
            role: match message.role {
                MessageRole::User => "user",
                MessageRole::Assistant => "assistant",
            },
            content: &message.content,
        }
    }
}

#[derive(Serialize)]
struct RestaurantData<'a> {
    name: &'a str,
    menu: Vec<WireMenuItem<'a>>,
}

#[derive(Serialize)]
struct WireMenuItem<'a> {
    name: &'a str,
    price: &'a PriceValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'a str>,
}

impl<'a> From<&'a tavola_core::menu::MenuItem> for WireMenuItem<'a> {
    fn from(item: &'a tavola_core::menu::MenuItem) -> Self {
        Self {
            name: &item.name,
            price: &item.price,
            description: item.description.as_deref(),
            category: item.tags.first().map(String::as_str),
        }
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    response: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}
