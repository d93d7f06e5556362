use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Applicant details captured by value when an application is submitted.
///
/// These are copied into the `applications` row so the employer's view stays
/// stable even if the seeker later edits or deletes their profile. This is a
/// deliberate capture-at-creation pattern, not a join to live data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ApplicantSnapshot {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub experience: Option<String>,
}

/// Name an employer presents under: company name when one is on file,
/// otherwise the personal name.
pub fn employer_display_name(company_name: Option<&str>, personal_name: &str) -> String {
    match company_name {
        Some(company) if !company.trim().is_empty() => company.trim().to_string(),
        _ => personal_name.to_string(),
    }
}
