use crate::models::Business;

/// Natural-language instructions registered against the business's inbound
/// number. Describes the fixed information-gathering flow the agent walks a
/// caller through.
pub fn agent_prompt(business: &Business) -> String {
    let services = business.services_offered.join(", ");

    format!(
        "You are an AI voicemail assistant for {name}, a {industry} business serving {area}.

Your job is to answer calls when the business owner is busy and collect customer information. Be friendly, professional, and efficient.

Services offered: {services}

When a customer calls:
1. Greet them warmly and let them know you're the AI assistant
2. Ask for their name
3. Ask for their phone number (confirm it back to them)
4. Ask what service they need
5. Ask for their address if it's a service that requires a visit
6. Ask about urgency (ASAP, within a day, within a week, flexible)
7. Ask if they have any additional notes or details
8. Thank them and let them know {name} will call them back soon

Keep the conversation natural and brief. If the customer seems in a hurry, prioritize getting their phone number and service needed.",
        name = business.business_name,
        industry = business.industry,
        area = business.service_area,
        services = services,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_business_profile() {
        let business = Business {
            id: "b1".to_string(),
            user_token: "tok".to_string(),
            business_name: "Acme Roofing".to_string(),
            owner_name: "Jo".to_string(),
            industry: "roofing".to_string(),
            service_area: "Springfield".to_string(),
            services_offered: vec!["roofing".to_string(), "gutters".to_string()],
            business_phone: "+15550001111".to_string(),
            twilio_number: None,
            notification_phone: "+15550002222".to_string(),
            notification_email: None,
            plan_tier: "starter".to_string(),
            stripe_customer_id: None,
            stripe_subscription_id: None,
            subscription_status: "active".to_string(),
        };

        let prompt = agent_prompt(&business);
        assert!(prompt.contains("Acme Roofing"));
        assert!(prompt.contains("roofing business serving Springfield"));
        assert!(prompt.contains("roofing, gutters"));
        // The closing step names the business again.
        assert!(prompt.contains("Acme Roofing will call them back soon"));
    }
}
