//! Education enrollment letter models.

use serde::{Deserialize, Serialize};

use super::common::{Signer, University};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationStudent {
    pub student_number: String,
    pub certificate_number: String,
    pub first_name: String,
    pub last_name: String,
    pub national_id: String,
    pub issued_by: String,
    /// ISO date, e.g. `2004-02-01`.
    pub birth_date: String,
    pub father_name: String,
    pub field_of_study: String,
    pub entry_term: String,
    pub entry_year: String,
    pub education_level: String,
    pub education_system: String,
    pub university: University,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationRecord {
    pub student: EducationStudent,
    pub signer: Signer,
    pub academic_term: String,
    pub academic_year: String,
    /// ISO date.
    pub expiration_date: String,
    /// Recipient/organization the letter is addressed to. The backend field
    /// name carries a typo.
    #[serde(rename = "certifcate")]
    pub certificate: String,
    pub description: String,
    pub qr_code_image: String,
    #[serde(default)]
    pub qr_url: Option<String>,
    /// ISO issue date.
    pub date: String,
    #[serde(default)]
    pub tracking_number: Option<String>,
}

/// POST body for an education letter request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationRequestModel {
    pub student_number: String,
    pub academic_term: String,
    pub academic_year: String,
    pub certificate: String,
    pub description: String,
    // Compatibility shim: the backend still requires these ids even though it
    // derives them from the student; slated for removal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faculty: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signer: Option<i64>,
}
