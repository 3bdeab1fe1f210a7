//! Stripe Checkout client.
//!
//! Creates hosted payment sessions through `POST /v1/checkout/sessions`.
//! Stripe expects `application/x-www-form-urlencoded` bodies with bracketed
//! keys for nested fields (`line_items[0][price_data][currency]`), so the
//! request is built as a flat list of key/value pairs.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;

use crate::{config::PaymentConfig, dto::orders::CheckoutSession};

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Stripe API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Amount out of range: {0}")]
    Amount(Decimal),
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CreatedSession {
    pub id: String,
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    message: Option<String>,
}

#[derive(Clone)]
pub struct StripeClient {
    inner: Arc<StripeClientInner>,
}

struct StripeClientInner {
    client: reqwest::Client,
    api_base: String,
    client_url: String,
    currency: String,
}

impl StripeClient {
    pub fn new(config: &PaymentConfig) -> Result<Self, PaymentError> {
        let key = config
            .secret_key
            .as_ref()
            .ok_or_else(|| PaymentError::Config("STRIPE_SECRET_KEY is not set".into()))?;

        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", key.expose_secret());
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth_value)
                .map_err(|e| PaymentError::Config(format!("Invalid API key format: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(StripeClientInner {
                client,
                api_base: config.api_base.trim_end_matches('/').to_string(),
                client_url: config.client_url.trim_end_matches('/').to_string(),
                currency: config.currency.clone(),
            }),
        })
    }

    pub async fn create_checkout_session(
        &self,
        session: &CheckoutSession,
    ) -> Result<CreatedSession, PaymentError> {
        let form = checkout_form(session, &self.inner.client_url, &self.inner.currency)?;
        let url = format!("{}/v1/checkout/sessions", self.inner.api_base);
        let response = self.inner.client.post(&url).form(&form).send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<CreatedSession>().await?);
        }

        let message = response
            .json::<StripeErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error.message)
            .unwrap_or_else(|| "unknown error".to_string());
        Err(PaymentError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// Smallest currency unit, e.g. 12.35 -> 1235.
pub fn unit_amount(price: Decimal) -> Result<i64, PaymentError> {
    (price * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(PaymentError::Amount(price))
}

pub fn checkout_form(
    session: &CheckoutSession,
    client_url: &str,
    currency: &str,
) -> Result<Vec<(String, String)>, PaymentError> {
    let mut form = vec![
        ("mode".to_string(), "payment".to_string()),
        ("payment_method_types[0]".to_string(), "card".to_string()),
        (
            "success_url".to_string(),
            format!("{client_url}/dashboard/user/orders?success=true"),
        ),
        (
            "cancel_url".to_string(),
            format!("{client_url}/addcart?canceled=true"),
        ),
        ("customer_email".to_string(), session.user_email.clone()),
        (
            "client_reference_id".to_string(),
            session.user_id.to_string(),
        ),
    ];

    for (i, line) in session.lines.iter().enumerate() {
        let prefix = format!("line_items[{i}]");
        form.push((format!("{prefix}[quantity]"), line.quantity.to_string()));
        form.push((
            format!("{prefix}[price_data][currency]"),
            currency.to_string(),
        ));
        form.push((
            format!("{prefix}[price_data][unit_amount]"),
            unit_amount(line.unit_price)?.to_string(),
        ));
        form.push((
            format!("{prefix}[price_data][product_data][name]"),
            line.name.clone(),
        ));
        if let Some(image) = &line.image {
            form.push((
                format!("{prefix}[price_data][product_data][images][0]"),
                image.clone(),
            ));
        }
        if let Some(description) = &line.description {
            form.push((
                format!("{prefix}[price_data][product_data][description]"),
                description.clone(),
            ));
        }
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::orders::CheckoutLine;

    fn value<'a>(form: &'a [(String, String)], key: &str) -> Option<&'a str> {
        form.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn unit_amount_rounds_to_cents() {
        assert_eq!(unit_amount(Decimal::new(1299, 2)).unwrap(), 1299);
        assert_eq!(unit_amount(Decimal::new(10005, 3)).unwrap(), 1001);
        assert_eq!(unit_amount(Decimal::new(7, 0)).unwrap(), 700);
    }

    #[test]
    fn form_encodes_line_items_and_customer() {
        let session = CheckoutSession {
            user_id: 42,
            user_email: "ana@example.com".into(),
            lines: vec![
                CheckoutLine {
                    name: "Ramen".into(),
                    image: Some("https://img/ramen.png".into()),
                    description: None,
                    unit_price: Decimal::new(1250, 2),
                    quantity: 2,
                },
                CheckoutLine {
                    name: "Gyoza".into(),
                    image: None,
                    description: Some("Pan fried".into()),
                    unit_price: Decimal::new(600, 2),
                    quantity: 1,
                },
            ],
        };

        let form = checkout_form(&session, "http://localhost:5173", "usd").unwrap();

        assert_eq!(value(&form, "mode"), Some("payment"));
        assert_eq!(value(&form, "client_reference_id"), Some("42"));
        assert_eq!(value(&form, "customer_email"), Some("ana@example.com"));
        assert_eq!(
            value(&form, "success_url"),
            Some("http://localhost:5173/dashboard/user/orders?success=true")
        );
        assert_eq!(
            value(&form, "line_items[0][price_data][unit_amount]"),
            Some("1250")
        );
        assert_eq!(value(&form, "line_items[0][quantity]"), Some("2"));
        assert_eq!(
            value(&form, "line_items[0][price_data][product_data][images][0]"),
            Some("https://img/ramen.png")
        );
        assert_eq!(
            value(&form, "line_items[1][price_data][product_data][description]"),
            Some("Pan fried")
        );
        assert!(value(&form, "line_items[1][price_data][product_data][images][0]").is_none());
    }
}
