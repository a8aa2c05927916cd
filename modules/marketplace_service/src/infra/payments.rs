//! Stripe customer API client

use crate::domain::providers::PaymentProvider;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use uuid::Uuid;

pub const DEFAULT_STRIPE_API_BASE: &str = "https://api.stripe.com";

/// Minimal Stripe client covering customer creation
pub struct StripeClient {
    client: reqwest::Client,
    api_base: String,
    secret_key: String,
}

#[derive(Deserialize)]
struct CustomerResponse {
    id: String,
}

impl StripeClient {
    pub fn new(api_base: impl Into<String>, secret_key: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("failed to build Stripe HTTP client")?;

        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            secret_key: secret_key.into(),
        })
    }
}

#[async_trait]
impl PaymentProvider for StripeClient {
    async fn create_customer(&self, email: &str, name: Option<&str>, user_id: Uuid) -> Result<String> {
        let user_id = user_id.to_string();
        let mut form = vec![("email", email), ("metadata[user_id]", user_id.as_str())];
        if let Some(name) = name {
            form.push(("name", name));
        }

        let response = self
            .client
            .post(format!("{}/v1/customers", self.api_base))
            .bearer_auth(&self.secret_key)
            .form(&form)
            .send()
            .await
            .context("Stripe customer request failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("Stripe customer creation returned {status}");
        }

        let customer: CustomerResponse = response
            .json()
            .await
            .context("Stripe customer response was not valid JSON")?;
        tracing::info!(customer_id = %customer.id, "Stripe customer created");
        Ok(customer.id)
    }
}
