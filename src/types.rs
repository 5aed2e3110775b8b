//! Request and response types for the SnailPay API

use base64::Engine;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Default SnailPay API authority
pub const DEFAULT_BASE_URL: &str = "https://snailpay.app";

/// Required length of a payment verification code
pub const VERIFICATION_CODE_LEN: usize = 10;

/// A payment returned by the server. Its shape is owned by the server.
pub type Payment = Value;

/// A subscription returned by the server
pub type Subscription = Value;

/// A one-time checkout link returned by the server
pub type PaymentLink = Value;

/// A recurring checkout link returned by the server
pub type SubscriptionLink = Value;

/// A payout record returned by the server
pub type Payout = Value;

/// Fixed endpoint paths
pub mod endpoints {
    pub const VERIFY_PAYMENT: &str = "/verify-payment";
    pub const PAYMENT_LINK: &str = "/payment-link";
    pub const SUBSCRIPTION_LINK: &str = "/subscription-link";
    pub const PAYMENT_LIST: &str = "/payment-list";
    pub const SUBSCRIPTION_LIST: &str = "/subscription-list";
    pub const SUBSCRIPTION_LINK_LIST: &str = "/subscription-link-list";
    pub const PAYMENT_LINK_LIST: &str = "/payment-link-list";
    pub const PAYOUT: &str = "/payout";
    pub const NEW_PAYOUT: &str = "/new-payout";
    pub const REFUND_PAYMENT: &str = "/refund-payment";
}

/// USD amounts on the wire.
///
/// A `Decimal` is written as a JSON number holding its normalized decimal
/// text, so `5` goes out as `5`, `5.50` as `5.5`, and no digits are lost to
/// `f64` rounding.
mod amount {
    use rust_decimal::Decimal;
    use serde::{ser, Serialize, Serializer};
    use std::str::FromStr;

    pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serde_json::Number::from_str(&value.normalize().to_string())
            .map_err(ser::Error::custom)?
            .serialize(serializer)
    }

    pub mod option {
        use rust_decimal::Decimal;
        use serde::Serializer;

        pub fn serialize<S>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(amount) => super::serialize(amount, serializer),
                None => serializer.serialize_none(),
            }
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the SnailPay API
    pub url: String,
    /// Request timeout; `None` waits for the transport indefinitely
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a new client config
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: None,
        }
    }

    /// Validate the client configuration
    pub fn validate(&self) -> crate::Result<()> {
        if self.url.is_empty() {
            return Err(crate::SnailPayError::config("Base URL cannot be empty"));
        }

        let parsed = url::Url::parse(&self.url)
            .map_err(|e| crate::SnailPayError::config(format!("Invalid base URL: {e}")))?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(crate::SnailPayError::config(
                "Base URL must start with http:// or https://",
            ));
        }

        Ok(())
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Join an endpoint path onto the base URL
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.url.trim_end_matches('/'), path)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Body of a payment-link or subscription-link creation request.
///
/// `name` and `price` are required by the server; they are optional here so
/// that an incomplete request is representable and rejected by
/// [`LinkRequest::validate`] before anything is sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LinkRequest {
    /// Base64-encoded product image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Product name shown at checkout
    pub name: Option<String>,
    /// Price in USD
    #[serde(serialize_with = "amount::option::serialize")]
    pub price: Option<Decimal>,
}

impl LinkRequest {
    /// Create a complete link request
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            image: None,
            name: Some(name.into()),
            price: Some(price),
        }
    }

    /// Attach an already base64-encoded image
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Attach raw image bytes, base64-encoding them
    pub fn with_image_bytes(mut self, bytes: &[u8]) -> Self {
        self.image = Some(base64::engine::general_purpose::STANDARD.encode(bytes));
        self
    }

    /// Check that `name` and `price` are present. An empty name counts as
    /// missing; any other name is left for the server to judge.
    pub fn validate(&self) -> crate::Result<()> {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => {}
            _ => return Err(crate::SnailPayError::validation("name")),
        }

        if self.price.is_none() {
            return Err(crate::SnailPayError::validation("price"));
        }

        Ok(())
    }
}

/// Body of a payout request
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayoutRequest {
    /// Amount in USD
    #[serde(serialize_with = "amount::serialize")]
    pub amount: Decimal,
}

/// Body of a refund request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundRequest {
    /// IDs of the payments to refund, in caller order
    pub payments: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.url, "https://snailpay.app");
        assert_eq!(config.timeout, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        assert!(ClientConfig::new("").validate().is_err());
        assert!(ClientConfig::new("snailpay.app").validate().is_err());
        assert!(ClientConfig::new("ftp://snailpay.app").validate().is_err());
        assert!(ClientConfig::new("http://127.0.0.1:8080").validate().is_ok());
    }

    #[test]
    fn test_config_endpoint_join() {
        let config = ClientConfig::new("https://snailpay.app/");
        assert_eq!(
            config.endpoint(endpoints::PAYMENT_LIST),
            "https://snailpay.app/payment-list"
        );
    }

    #[test]
    fn test_link_request_serialization() {
        let request = LinkRequest::new("Widget", Decimal::new(550, 2));
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({ "name": "Widget", "price": 5.5 }));

        let whole = LinkRequest::new("Widget", Decimal::from(5));
        assert_eq!(
            serde_json::to_string(&whole).unwrap(),
            r#"{"name":"Widget","price":5}"#
        );

        let with_image = request.with_image("aGVsbG8=");
        let value = serde_json::to_value(&with_image).unwrap();
        assert_eq!(value["image"], "aGVsbG8=");
    }

    #[test]
    fn test_link_request_image_bytes() {
        let request = LinkRequest::new("Widget", Decimal::from(5)).with_image_bytes(b"hello");
        assert_eq!(request.image.as_deref(), Some("aGVsbG8="));
    }

    #[test]
    fn test_link_request_validation() {
        assert!(LinkRequest::new("Widget", Decimal::from(5)).validate().is_ok());

        let err = LinkRequest::default().validate().unwrap_err();
        assert!(matches!(err, crate::SnailPayError::Validation { field: "name" }));

        let missing_price = LinkRequest {
            name: Some("Widget".to_string()),
            ..Default::default()
        };
        let err = missing_price.validate().unwrap_err();
        assert!(matches!(err, crate::SnailPayError::Validation { field: "price" }));

        let empty_name = LinkRequest::new("", Decimal::from(5));
        assert!(empty_name.validate().is_err());

        let blank_name = LinkRequest::new("   ", Decimal::from(5));
        assert!(blank_name.validate().is_ok());
    }

    #[test]
    fn test_payout_and_refund_bodies() {
        let payout = PayoutRequest {
            amount: Decimal::from(5),
        };
        assert_eq!(serde_json::to_value(payout).unwrap(), json!({ "amount": 5 }));
        assert_eq!(serde_json::to_string(&payout).unwrap(), r#"{"amount":5}"#);

        let refund = RefundRequest {
            payments: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(
            serde_json::to_value(&refund).unwrap(),
            json!({ "payments": ["a", "b"] })
        );
    }

    #[test]
    fn test_large_amount_keeps_every_digit() {
        let amount = Decimal::from_str_exact("12345678901234567.89").unwrap();
        let payout = PayoutRequest { amount };
        assert_eq!(
            serde_json::to_string(&payout).unwrap(),
            r#"{"amount":12345678901234567.89}"#
        );

        let request = LinkRequest::new("Bulk order", Decimal::new(1000, 2));
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"name":"Bulk order","price":10}"#
        );
    }
}
