use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Asap,
    WithinDay,
    WithinWeek,
    Flexible,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Asap => "asap",
            Urgency::WithinDay => "within_day",
            Urgency::WithinWeek => "within_week",
            Urgency::Flexible => "flexible",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "asap" => Urgency::Asap,
            "within_day" => Urgency::WithinDay,
            "within_week" => Urgency::WithinWeek,
            _ => Urgency::Flexible,
        }
    }

    /// Severity marker used in owner notifications.
    pub fn marker(&self) -> &'static str {
        match self {
            Urgency::Asap => "🔴",
            Urgency::WithinDay => "🟡",
            Urgency::WithinWeek | Urgency::Flexible => "🟢",
        }
    }
}

/// One speaker-tagged utterance of a call transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptTurn {
    pub speaker: String,
    pub text: String,
}

/// One row per inbound call event. Insert-only: redelivery of the same
/// vendor event produces a second row, there is no dedup key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Call {
    pub id: String,
    pub business_id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub service_needed: String,
    pub urgency: Urgency,
    pub call_status: String,
    pub call_duration_seconds: i64,
    pub call_transcript: Vec<TranscriptTurn>,
    pub call_recording_url: Option<String>,
    pub created_at: NaiveDateTime,
}
