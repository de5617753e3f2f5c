pub mod billing;
pub mod extract;
pub mod intake;
pub mod messaging;
pub mod prompt;
pub mod provisioning;
pub mod voice;
