use async_trait::async_trait;
use serde_json::json;

use super::{InboundConfig, VoiceAgentError, VoiceAgentProvider};

const BASE_URL: &str = "https://api.bland.ai";

pub struct BlandProvider {
    api_key: String,
    client: reqwest::Client,
}

impl BlandProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
        }
    }

    async fn read_body(resp: reqwest::Response) -> String {
        resp.text().await.unwrap_or_default()
    }
}

/// Map a failed purchase response onto the billing conditions the
/// provisioning flow branches on. Bland reports these as error strings in
/// the body, so classification is by substring.
fn classify_purchase_error(status: reqwest::StatusCode, body: &str) -> VoiceAgentError {
    let lowered = body.to_lowercase();

    if lowered.contains("subscription") && (lowered.contains("not active") || lowered.contains("inactive")) {
        return VoiceAgentError::SubscriptionNotActive(body.to_string());
    }
    if lowered.contains("payment method") {
        return VoiceAgentError::MissingPaymentMethod(body.to_string());
    }
    VoiceAgentError::Api(format!("purchase failed ({status}): {body}"))
}

/// Dispatch failures keep the raw vendor body, which is not always JSON.
fn dispatch_failure(status: reqwest::StatusCode, body: &str) -> VoiceAgentError {
    VoiceAgentError::Api(format!("dispatch call failed ({status}): {body}"))
}

#[async_trait]
impl VoiceAgentProvider for BlandProvider {
    async fn list_numbers(&self) -> Result<Vec<String>, VoiceAgentError> {
        let resp = self
            .client
            .get(format!("{BASE_URL}/v1/inbound"))
            .header("Authorization", &self.api_key)
            .send()
            .await
            .map_err(|e| VoiceAgentError::Api(format!("failed to list inbound numbers: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = Self::read_body(resp).await;
            return Err(VoiceAgentError::Api(format!(
                "list inbound numbers failed ({status}): {body}"
            )));
        }

        let data: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| VoiceAgentError::Api(format!("invalid inbound numbers response: {e}")))?;

        let numbers = data["inbound_numbers"]
            .as_array()
            .or_else(|| data["numbers"].as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|n| n["phone_number"].as_str().map(|s| s.to_string()))
                    .collect()
            })
            .unwrap_or_default();

        Ok(numbers)
    }

    async fn purchase_number(&self) -> Result<String, VoiceAgentError> {
        let resp = self
            .client
            .post(format!("{BASE_URL}/v1/inbound/purchase"))
            .header("Authorization", &self.api_key)
            .json(&json!({ "country_code": "US" }))
            .send()
            .await
            .map_err(|e| VoiceAgentError::Api(format!("failed to purchase number: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = Self::read_body(resp).await;
            return Err(classify_purchase_error(status, &body));
        }

        let data: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| VoiceAgentError::Api(format!("invalid purchase response: {e}")))?;

        data["phone_number"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| {
                VoiceAgentError::Api(format!("missing phone_number in purchase response: {data}"))
            })
    }

    async fn configure_inbound(
        &self,
        number: &str,
        config: &InboundConfig,
    ) -> Result<(), VoiceAgentError> {
        let body = json!({
            "prompt": config.prompt,
            "transfer_phone_number": config.transfer_number,
            "webhook": config.webhook_url,
            "record": config.record,
            "language": "en",
            "max_duration": 5,
        });

        let resp = self
            .client
            .post(format!("{BASE_URL}/v1/inbound/{number}"))
            .header("Authorization", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| VoiceAgentError::Api(format!("failed to configure inbound number: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = Self::read_body(resp).await;
            return Err(VoiceAgentError::Api(format!(
                "configure inbound number failed ({status}): {body}"
            )));
        }

        Ok(())
    }

    async fn dispatch_inbound_call(
        &self,
        caller: &str,
        agent_number: &str,
        telephony_call_sid: &str,
    ) -> Result<String, VoiceAgentError> {
        let body = json!({
            "phone_number": caller,
            "from": agent_number,
            "task": "answer_inbound",
            "wait_for_greeting": true,
            "record": true,
            "metadata": { "twilio_call_sid": telephony_call_sid },
        });

        let resp = self
            .client
            .post(format!("{BASE_URL}/v1/calls"))
            .header("Authorization", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| VoiceAgentError::Api(format!("failed to dispatch call: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = Self::read_body(resp).await;
            return Err(dispatch_failure(status, &body));
        }

        let data: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| VoiceAgentError::Api(format!("invalid dispatch response: {e}")))?;

        data["call_id"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| {
                VoiceAgentError::Api(format!("missing call_id in dispatch response: {data}"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_subscription_not_active() {
        let err = classify_purchase_error(
            reqwest::StatusCode::PAYMENT_REQUIRED,
            r#"{"error":"SUBSCRIPTION_NOT_ACTIVE","message":"Your subscription is not active"}"#,
        );
        assert!(matches!(err, VoiceAgentError::SubscriptionNotActive(_)));
    }

    #[test]
    fn test_classify_missing_payment_method() {
        let err = classify_purchase_error(
            reqwest::StatusCode::PAYMENT_REQUIRED,
            r#"{"message":"No payment method on file"}"#,
        );
        assert!(matches!(err, VoiceAgentError::MissingPaymentMethod(_)));
    }

    #[test]
    fn test_dispatch_failure_keeps_plain_text_body() {
        let err = dispatch_failure(reqwest::StatusCode::BAD_GATEWAY, "upstream timed out");
        let msg = err.to_string();
        assert!(msg.contains("502"));
        assert!(msg.contains("upstream timed out"));
    }

    #[test]
    fn test_classify_generic_error() {
        let err = classify_purchase_error(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            "something broke",
        );
        assert!(matches!(err, VoiceAgentError::Api(_)));
    }
}
