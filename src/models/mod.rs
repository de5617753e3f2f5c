pub mod business;
pub mod call;
pub mod enterprise;

pub use business::Business;
pub use call::{Call, TranscriptTurn, Urgency};
pub use enterprise::EnterpriseInquiry;
