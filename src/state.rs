use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::config::AppConfig;
use crate::services::billing::BillingProvider;
use crate::services::extract::TranscriptExtractor;
use crate::services::messaging::MessagingProvider;
use crate::services::voice::VoiceAgentProvider;

pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub config: AppConfig,
    pub messaging: Box<dyn MessagingProvider>,
    pub voice: Box<dyn VoiceAgentProvider>,
    pub billing: Box<dyn BillingProvider>,
    pub extractor: Box<dyn TranscriptExtractor>,
}
