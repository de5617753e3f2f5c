use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::BillingProvider;

pub struct StripeBillingProvider {
    secret_key: String,
    client: reqwest::Client,
}

impl StripeBillingProvider {
    pub fn new(secret_key: String) -> Self {
        Self {
            secret_key,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl BillingProvider for StripeBillingProvider {
    async fn cancel_at_period_end(
        &self,
        subscription_id: &str,
    ) -> anyhow::Result<DateTime<Utc>> {
        let url = format!("https://api.stripe.com/v1/subscriptions/{subscription_id}");

        let resp = self
            .client
            .post(&url)
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&[("cancel_at_period_end", "true")])
            .send()
            .await
            .context("failed to call Stripe API")?;

        let status = resp.status();
        let data: serde_json::Value = resp
            .json()
            .await
            .context("failed to parse Stripe response")?;

        if !status.is_success() {
            anyhow::bail!("Stripe API error ({status}): {data}");
        }

        let period_end = data["current_period_end"]
            .as_i64()
            .context("missing current_period_end in Stripe response")?;

        DateTime::<Utc>::from_timestamp(period_end, 0)
            .context("invalid current_period_end timestamp")
    }
}
