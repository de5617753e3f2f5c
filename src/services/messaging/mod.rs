pub mod twilio;

use async_trait::async_trait;

#[async_trait]
pub trait MessagingProvider: Send + Sync {
    /// Each business texts from its own assigned number, so the sender is
    /// per-message rather than fixed at construction.
    async fn send_message(&self, to: &str, from: &str, body: &str) -> anyhow::Result<()>;
}
