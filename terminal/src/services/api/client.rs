//! # API Client
//!
//! The HTTP transport every service goes through.
//!
//! For each request it:
//! 1. injects `Authorization: Bearer <token>` when the local store holds an
//!    `authToken`,
//! 2. sends JSON and reads the body as JSON,
//! 3. handles 401 out of band: the login URL goes into the local store, an
//!    [`AppEvent::LoginRequired`] is broadcast, and the caller gets
//!    [`AppError::LoginRequired`] instead of an API error,
//! 4. coalesces every other failure into an [`ApiError`] and unwraps
//!    successful bodies through [`envelope::unwrap_data`].

use async_channel::Sender;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

use super::envelope;
use super::leaderboard::LeaderboardEntry;
use super::stocks::{Stock, StockDetail};
use crate::app::events::AppEvent;
use crate::config::ClientConfig;
use crate::core::error::{ApiError, AppError, Result};
use crate::services::cache::TtlCache;
use crate::services::storage::{KeyValueStore, AUTH_TOKEN_KEY, LOGIN_URL_KEY};

/// Trim and check a user id before it goes into a URL path.
pub(crate) fn user_path(user_id: &str) -> Result<String> {
    let user_id = user_id.trim();
    if user_id.is_empty() || user_id.contains('/') {
        return Err(AppError::Validation(format!("Invalid user id '{}'", user_id)));
    }
    Ok(user_id.to_string())
}

/// HTTP client for the stock simulator backend.
///
/// Wrap it in an `Arc` to share it; `reqwest::Client` pools connections
/// internally.
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
    login_url: String,
    store: Arc<dyn KeyValueStore>,
    events: Option<Sender<AppEvent>>,
    pub(crate) stock_lists: TtlCache<Vec<Stock>>,
    pub(crate) stock_details: TtlCache<StockDetail>,
    pub(crate) leaderboards: TtlCache<Vec<LeaderboardEntry>>,
}

impl ApiClient {
    /// Create a client from validated configuration.
    pub fn new(config: &ClientConfig, store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            login_url: config.login_url.clone(),
            store,
            events: None,
            stock_lists: TtlCache::new(config.cache_ttl),
            stock_details: TtlCache::new(config.cache_ttl),
            leaderboards: TtlCache::new(config.cache_ttl),
        })
    }

    /// Attach the channel that receives [`AppEvent::LoginRequired`].
    pub fn with_events(mut self, events: Sender<AppEvent>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Drop every cached quote and leaderboard.
    pub fn invalidate_caches(&self) {
        self.stock_lists.clear();
        self.stock_details.clear();
        self.leaderboards.clear();
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.store.get(AUTH_TOKEN_KEY) {
            Some(token) if !token.is_empty() => builder.bearer_auth(token),
            _ => builder,
        }
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let builder = self.client.get(self.url(path)).query(query);
        let body = self.send(builder, "GET", path).await?;
        envelope::unwrap_data(body).map_err(|e| self.log_failure("GET", path, e))
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, payload: &B) -> Result<T> {
        let builder = self.client.post(self.url(path)).json(payload);
        let body = self.send(builder, "POST", path).await?;
        envelope::unwrap_data(body).map_err(|e| self.log_failure("POST", path, e))
    }

    pub(crate) async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, payload: &B) -> Result<T> {
        let builder = self.client.put(self.url(path)).json(payload);
        let body = self.send(builder, "PUT", path).await?;
        envelope::unwrap_data(body).map_err(|e| self.log_failure("PUT", path, e))
    }

    /// POST whose answer is only checked for an explicit failure.
    pub(crate) async fn post_ack<B: Serialize + ?Sized>(&self, path: &str, payload: &B) -> Result<()> {
        let builder = self.client.post(self.url(path)).json(payload);
        let body = self.send(builder, "POST", path).await?;
        envelope::check_success(&body).map_err(|e| self.log_failure("POST", path, e))
    }

    pub(crate) async fn delete_ack(&self, path: &str) -> Result<()> {
        let builder = self.client.delete(self.url(path));
        let body = self.send(builder, "DELETE", path).await?;
        envelope::check_success(&body).map_err(|e| self.log_failure("DELETE", path, e))
    }

    /// Send a request and return its JSON body (or `Null` when empty).
    ///
    /// Non-2xx statuses come back as errors; a 401 additionally triggers the
    /// login side channel.
    async fn send(&self, builder: RequestBuilder, method: &str, path: &str) -> Result<Value> {
        let start = Instant::now();
        let builder = self.authorize(builder.header(reqwest::header::ACCEPT, "application/json"));

        let response = builder.send().await.map_err(|e| {
            tracing::error!(
                method = method,
                path = %path,
                error = %e,
                duration_ms = start.elapsed().as_millis(),
                "Request network error"
            );
            AppError::Api(envelope::error_from_transport(&e))
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AppError::Api(envelope::error_from_transport(&e)))?;
        let duration = start.elapsed();

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str::<Value>(&text) {
                Ok(body) => body,
                Err(e) if status.is_success() => {
                    tracing::error!(method = method, path = %path, error = %e, "Response parse error");
                    return Err(AppError::Api(ApiError::generic(format!("Invalid response body: {}", e))));
                }
                Err(_) => Value::String(text),
            }
        };

        if status == StatusCode::UNAUTHORIZED {
            return Err(self.handle_unauthorized(&body));
        }

        if !status.is_success() {
            let err = envelope::error_from_body(status.as_u16(), &body);
            tracing::warn!(
                method = method,
                path = %path,
                status = status.as_u16(),
                code = %err.code,
                error = %err.message,
                duration_ms = duration.as_millis(),
                "Request failed"
            );
            return Err(AppError::Api(err));
        }

        tracing::debug!(
            method = method,
            path = %path,
            status = status.as_u16(),
            duration_ms = duration.as_millis(),
            "Request succeeded"
        );
        Ok(body)
    }

    fn handle_unauthorized(&self, body: &Value) -> AppError {
        let login_url = envelope::login_url_from_body(body).unwrap_or_else(|| self.login_url.clone());

        if let Err(e) = self.store.set(LOGIN_URL_KEY, &login_url) {
            tracing::warn!(error = %e, "Failed to store login URL");
        }

        if let Some(events) = &self.events {
            let event = AppEvent::LoginRequired {
                login_url: login_url.clone(),
            };
            if let Err(e) = events.try_send(event) {
                tracing::debug!(error = %e, "No listener for login-required event");
            }
        }

        tracing::info!(login_url = %login_url, "Backend requires login");
        AppError::LoginRequired { login_url }
    }

    fn log_failure(&self, method: &str, path: &str, err: ApiError) -> AppError {
        tracing::warn!(method = method, path = %path, code = %err.code, error = %err.message, "Response rejected");
        AppError::Api(err)
    }
}
