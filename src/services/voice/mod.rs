pub mod bland;

use async_trait::async_trait;

/// Vendor failures the provisioning flow branches on. Anything the vendor
/// reports that isn't a billing condition collapses into `Api`.
#[derive(Debug, thiserror::Error)]
pub enum VoiceAgentError {
    #[error("subscription not active: {0}")]
    SubscriptionNotActive(String),

    #[error("missing payment method: {0}")]
    MissingPaymentMethod(String),

    #[error("{0}")]
    Api(String),
}

/// Inbound-number configuration registered with the voice vendor.
pub struct InboundConfig {
    pub prompt: String,
    /// Number the agent transfers to when the caller asks for a human.
    pub transfer_number: String,
    /// Callback hit with the transcript when a call completes.
    pub webhook_url: String,
    pub record: bool,
}

#[async_trait]
pub trait VoiceAgentProvider: Send + Sync {
    /// Numbers already owned on the vendor account.
    async fn list_numbers(&self) -> Result<Vec<String>, VoiceAgentError>;

    async fn purchase_number(&self) -> Result<String, VoiceAgentError>;

    async fn configure_inbound(
        &self,
        number: &str,
        config: &InboundConfig,
    ) -> Result<(), VoiceAgentError>;

    /// Hand a live inbound caller to the agent; returns the vendor call id
    /// the telephony side bridges to.
    async fn dispatch_inbound_call(
        &self,
        caller: &str,
        agent_number: &str,
        telephony_call_sid: &str,
    ) -> Result<String, VoiceAgentError>;
}
