use serde::{Deserialize, Serialize};

/// Contact-sales form submission. Write-once, read by back-office tooling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnterpriseInquiry {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company_name: String,
    pub num_locations: Option<String>,
    pub estimated_calls: Option<String>,
    pub current_solution: Option<String>,
    pub message: Option<String>,
}
