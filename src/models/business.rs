use serde::{Deserialize, Serialize};

/// One row per registered account. Created at signup completion, mutated by
/// settings saves, the provisioning handler (assigns `twilio_number`) and
/// subscription webhooks (status changes). Never hard-deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Business {
    pub id: String,
    /// Bearer credential presented by the dashboard on authenticated calls.
    pub user_token: String,
    pub business_name: String,
    pub owner_name: String,
    pub industry: String,
    pub service_area: String,
    pub services_offered: Vec<String>,
    /// Number calls are transferred to when the owner picks up.
    pub business_phone: String,
    /// AI agent's assigned inbound number, set by provisioning.
    pub twilio_number: Option<String>,
    pub notification_phone: String,
    pub notification_email: Option<String>,
    pub plan_tier: String,
    pub stripe_customer_id: Option<String>,
    pub stripe_subscription_id: Option<String>,
    pub subscription_status: String,
}
