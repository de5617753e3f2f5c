use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Urgency;

/// Best-effort lead fields pulled out of a call transcript. Extraction is
/// heuristic and not guaranteed correct; defaults are applied by the caller's
/// contract (`Unknown` name, `Not specified` service, vendor `from` phone).
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedLead {
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    pub service_needed: Option<String>,
    pub urgency: Urgency,
}

/// Seam for swapping the extraction strategy (regex today, model-based
/// later) without touching persistence or notification logic.
pub trait TranscriptExtractor: Send + Sync {
    fn extract(&self, transcript: &str, services_offered: &[String]) -> ExtractedLead;
}

static NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:my name is|i'm|i am|this is)\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)?)").unwrap()
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{3}[-.\s]?\d{3}[-.\s]?\d{4}").unwrap());

static ADDRESS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(\d{1,5}(?:\s+[A-Za-z]+){1,4}\s+(?:st|street|ave|avenue|rd|road|dr|drive|ln|lane|blvd|boulevard|ct|court|way))\b",
    )
    .unwrap()
});

static URGENCY_ASAP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)asap|urgent|emergency|right away|immediately").unwrap());
static URGENCY_DAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)today|within a day").unwrap());
static URGENCY_WEEK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)week|few days").unwrap());

pub struct RegexExtractor;

impl TranscriptExtractor for RegexExtractor {
    fn extract(&self, transcript: &str, services_offered: &[String]) -> ExtractedLead {
        ExtractedLead {
            customer_name: extract_name(transcript),
            customer_phone: extract_phone(transcript),
            customer_address: extract_address(transcript),
            service_needed: extract_service(transcript, services_offered),
            urgency: classify_urgency(transcript),
        }
    }
}

fn extract_name(text: &str) -> Option<String> {
    NAME_RE
        .captures(text)
        .map(|c| c[1].trim().to_string())
}

fn extract_phone(text: &str) -> Option<String> {
    PHONE_RE.find(text).map(|m| m.as_str().to_string())
}

fn extract_address(text: &str) -> Option<String> {
    ADDRESS_RE
        .captures(text)
        .map(|c| c[1].trim().to_string())
}

/// First configured service tag appearing in the transcript,
/// case-insensitive. Returns the configured tag so persisted values are
/// canonical regardless of transcript casing.
fn extract_service(text: &str, services_offered: &[String]) -> Option<String> {
    let haystack = text.to_lowercase();

    services_offered
        .iter()
        .filter_map(|tag| {
            let needle = tag.to_lowercase();
            if needle.is_empty() {
                return None;
            }
            haystack.find(&needle).map(|pos| (pos, tag))
        })
        .min_by_key(|(pos, _)| *pos)
        .map(|(_, tag)| tag.clone())
}

/// Keyword scan in priority order: emergency phrases win over everything,
/// then same-day, then same-week.
fn classify_urgency(text: &str) -> Urgency {
    if URGENCY_ASAP_RE.is_match(text) {
        Urgency::Asap
    } else if URGENCY_DAY_RE.is_match(text) {
        Urgency::WithinDay
    } else if URGENCY_WEEK_RE.is_match(text) {
        Urgency::WithinWeek
    } else {
        Urgency::Flexible
    }
}
