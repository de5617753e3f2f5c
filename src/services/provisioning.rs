use std::sync::Arc;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::Business;
use crate::services::prompt;
use crate::services::voice::{InboundConfig, VoiceAgentError};
use crate::state::AppState;

/// Ensure the business has a working inbound number wired to the voice
/// agent. Acquires (or reuses) a number, registers the agent configuration
/// against it, then persists it onto the business row — the commit point.
/// A vendor number purchased before a failed persist is left orphaned; the
/// log line below is the only trail for manual reconciliation.
pub async fn provision_number(
    state: &Arc<AppState>,
    business: &Business,
    force_new: bool,
) -> Result<String, AppError> {
    let number = acquire_number(state, business, force_new).await?;

    tracing::info!(business_id = %business.id, number = %number, "acquired inbound number");

    let config = InboundConfig {
        prompt: prompt::agent_prompt(business),
        transfer_number: business.business_phone.clone(),
        webhook_url: format!("{}/webhook/call-completed", state.config.public_base_url),
        record: true,
    };

    state
        .voice
        .configure_inbound(&number, &config)
        .await
        .map_err(|e| AppError::Voice(e.to_string()))?;

    {
        let db = state.db.lock().unwrap();
        queries::set_twilio_number(&db, &business.id, &number)?;
    }

    tracing::info!(business_id = %business.id, number = %number, "provisioning complete");

    Ok(number)
}

/// Ordered acquisition policy: keep the assigned number, then reuse a
/// vendor-owned one, then purchase. Billing failures on purchase are
/// distinguished so the dashboard can route the operator to the vendor's
/// billing page.
async fn acquire_number(
    state: &Arc<AppState>,
    business: &Business,
    force_new: bool,
) -> Result<String, AppError> {
    if !force_new {
        if let Some(number) = &business.twilio_number {
            tracing::info!(business_id = %business.id, number = %number, "reusing assigned number");
            return Ok(number.clone());
        }

        let owned = state
            .voice
            .list_numbers()
            .await
            .map_err(|e| AppError::Voice(e.to_string()))?;
        if let Some(number) = owned.into_iter().next() {
            tracing::info!(business_id = %business.id, number = %number, "reusing vendor-owned number");
            return Ok(number);
        }
    }

    match state.voice.purchase_number().await {
        Ok(number) => Ok(number),
        Err(VoiceAgentError::SubscriptionNotActive(msg)) => {
            // Fatal: the operator has to reactivate the vendor subscription.
            Err(AppError::SubscriptionRequired(msg))
        }
        Err(VoiceAgentError::MissingPaymentMethod(msg)) => {
            // A number can exist on the account despite the billing gap
            // (e.g. purchased before the card lapsed), so look again before
            // giving up.
            let owned = state
                .voice
                .list_numbers()
                .await
                .map_err(|e| AppError::Voice(e.to_string()))?;
            match owned.into_iter().next() {
                Some(number) => {
                    tracing::warn!(
                        business_id = %business.id,
                        number = %number,
                        "purchase blocked on payment method, falling back to existing vendor number"
                    );
                    Ok(number)
                }
                None => Err(AppError::MissingPaymentMethod(msg)),
            }
        }
        Err(e) => Err(AppError::Voice(e.to_string())),
    }
}
