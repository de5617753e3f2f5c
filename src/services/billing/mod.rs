pub mod stripe;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait BillingProvider: Send + Sync {
    /// Flag the subscription to end at the close of the current period.
    /// Returns when access actually lapses.
    async fn cancel_at_period_end(&self, subscription_id: &str)
        -> anyhow::Result<DateTime<Utc>>;
}
