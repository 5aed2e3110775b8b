//! HTTP client for the SnailPay payment API

use crate::types::*;
use crate::{Result, SnailPayError};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "SNAILPAY_API_KEY";

/// Environment variable overriding the base URL
pub const BASE_URL_ENV: &str = "SNAILPAY_BASE_URL";

/// Authenticated client for the SnailPay API.
///
/// Every request carries `Authorization: <api key>` and
/// `Content-Type: application/json`. Calls are independent of each other and
/// can be issued concurrently from a shared reference.
#[derive(Clone)]
pub struct SnailPayClient {
    /// Underlying HTTP client
    client: Client,
    /// Base URL and timeout
    config: ClientConfig,
    /// Headers attached to every request
    headers: HeaderMap,
}

impl std::fmt::Debug for SnailPayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnailPayClient")
            .field("config", &self.config)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl SnailPayClient {
    /// Create a client against the public SnailPay API
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, ClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(api_key: impl Into<String>, config: ClientConfig) -> Result<Self> {
        let mut client_builder = Client::builder();

        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder
            .build()
            .map_err(|e| SnailPayError::config(format!("Failed to create HTTP client: {}", e)))?;

        Self::with_http_client(api_key, config, client)
    }

    /// Create a client on top of an existing `reqwest::Client`.
    ///
    /// The config timeout is applied per request, so it holds even when the
    /// supplied client has none of its own.
    pub fn with_http_client(
        api_key: impl Into<String>,
        config: ClientConfig,
        client: Client,
    ) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(SnailPayError::config("API key is required"));
        }

        config.validate()?;

        let mut authorization = HeaderValue::from_str(&api_key)
            .map_err(|_| SnailPayError::config("API key is not a valid header value"))?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(Self {
            client,
            config,
            headers,
        })
    }

    /// Create a client from `SNAILPAY_API_KEY` and, if set, `SNAILPAY_BASE_URL`
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| {
            SnailPayError::config(format!("Missing credentials: {} must be set", API_KEY_ENV))
        })?;

        let config = match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.is_empty() => ClientConfig::new(url),
            _ => ClientConfig::default(),
        };

        Self::with_config(api_key, config)
    }

    /// Get the base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.config.url
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Redeem a verification code.
    ///
    /// Returns `Ok(None)` when the code is not exactly ten characters long
    /// (no request is made) or when the server answers with anything other
    /// than 200. Only transport failures surface as errors.
    pub async fn verify_payment(&self, code: &str) -> Result<Option<Payment>> {
        if code.chars().count() != VERIFICATION_CODE_LEN {
            debug!(
                length = code.chars().count(),
                "verification code has wrong length, skipping request"
            );
            return Ok(None);
        }

        let response = self
            .request(Method::GET, endpoints::VERIFY_PAYMENT)
            .query(&[("code", code)])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            debug!(status = %response.status(), "payment not verified");
            return Ok(None);
        }

        let payment: Payment = response.json().await?;
        Ok(Some(payment))
    }

    /// Create a one-time checkout link, returning its URL
    pub async fn create_payment_link(&self, request: &LinkRequest) -> Result<String> {
        self.create_link(endpoints::PAYMENT_LINK, request).await
    }

    /// Create a recurring checkout link, returning its URL
    pub async fn create_subscription_link(&self, request: &LinkRequest) -> Result<String> {
        self.create_link(endpoints::SUBSCRIPTION_LINK, request).await
    }

    /// List payments received on the account
    pub async fn list_payments(&self) -> Result<Vec<Payment>> {
        self.get_list(endpoints::PAYMENT_LIST).await
    }

    /// List active subscriptions
    pub async fn list_subscriptions(&self) -> Result<Vec<Subscription>> {
        self.get_list(endpoints::SUBSCRIPTION_LIST).await
    }

    /// List subscription checkout links
    pub async fn list_subscription_links(&self) -> Result<Vec<SubscriptionLink>> {
        self.get_list(endpoints::SUBSCRIPTION_LINK_LIST).await
    }

    /// List payment checkout links
    pub async fn list_payment_links(&self) -> Result<Vec<PaymentLink>> {
        self.get_list(endpoints::PAYMENT_LINK_LIST).await
    }

    /// List past payouts
    pub async fn list_payouts(&self) -> Result<Vec<Payout>> {
        self.get_list(endpoints::PAYOUT).await
    }

    /// Request a payout of `amount` USD
    pub async fn new_payout(&self, amount: Decimal) -> Result<()> {
        let body = PayoutRequest { amount };
        self.post_void(endpoints::NEW_PAYOUT, &body).await
    }

    /// Refund the given payments
    pub async fn refund_payment<I, S>(&self, payment_ids: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let body = RefundRequest {
            payments: payment_ids.into_iter().map(Into::into).collect(),
        };
        self.post_void(endpoints::REFUND_PAYMENT, &body).await
    }

    async fn create_link(&self, path: &str, request: &LinkRequest) -> Result<String> {
        request.validate()?;

        let response = self
            .request(Method::POST, path)
            .json(request)
            .send()
            .await?;
        let response = Self::ensure_ok(response).await?;

        Ok(response.text().await?)
    }

    async fn get_list<T>(&self, path: &str) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let response = self.request(Method::GET, path).send().await?;
        let response = Self::ensure_ok(response).await?;

        Ok(response.json().await?)
    }

    async fn post_void<B>(&self, path: &str, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let response = self.request(Method::POST, path).json(body).send().await?;
        Self::ensure_ok(response).await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(method = method.as_str(), path, "sending request");

        let mut request = self
            .client
            .request(method, self.config.endpoint(path))
            .headers(self.headers.clone());

        if let Some(timeout) = self.config.timeout {
            request = request.timeout(timeout);
        }

        request
    }

    /// Pass through a 200 response; anything else becomes a remote error
    async fn ensure_ok(response: Response) -> Result<Response> {
        let status = response.status();
        debug!(%status, path = response.url().path(), "received response");

        if status == StatusCode::OK {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!(%status, "request rejected by server");
        Err(SnailPayError::remote(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_client_creation() {
        let client = SnailPayClient::new("sk_test").unwrap();
        assert_eq!(client.base_url(), "https://snailpay.app");
    }

    #[test]
    fn test_client_rejects_empty_key() {
        let err = SnailPayClient::new("").unwrap_err();
        assert!(matches!(err, SnailPayError::Config { .. }));

        // Any non-empty key is accepted, whitespace included
        assert!(SnailPayClient::new(" ").is_ok());
        assert!(SnailPayClient::new("   ").is_ok());
    }

    #[test]
    fn test_client_rejects_unencodable_key() {
        let err = SnailPayClient::new("key\nwith-newline").unwrap_err();
        assert!(err.to_string().contains("header value"));
    }

    #[test]
    fn test_client_with_config() {
        let config =
            ClientConfig::new("http://localhost:4021").with_timeout(Duration::from_secs(5));
        let client = SnailPayClient::with_config("sk_test", config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:4021");
        assert_eq!(client.config().timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_client_rejects_bad_base_url() {
        let result = SnailPayClient::with_config("sk_test", ClientConfig::new("not a url"));
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let client = SnailPayClient::new("sk_live_secret").unwrap();
        let rendered = format!("{:?}", client);
        assert!(!rendered.contains("sk_live_secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[tokio::test]
    async fn test_verify_short_circuits_on_bad_length() {
        // Unroutable base URL: any request attempt would fail with a transport error.
        let config =
            ClientConfig::new("http://10.255.255.1:9").with_timeout(Duration::from_millis(200));
        let client = SnailPayClient::with_config("sk_test", config).unwrap();

        for code in ["", "abc", "ABCDEFGHIJK"] {
            assert_eq!(client.verify_payment(code).await.unwrap(), None);
        }
    }
}
