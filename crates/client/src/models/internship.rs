//! Internship letter models.

use serde::{Deserialize, Serialize};

use super::common::{Signer, University};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternshipStudent {
    pub student_number: String,
    pub certificate_number: String,
    pub first_name: String,
    pub last_name: String,
    pub university: University,
    pub entry_term: String,
    pub entry_year: String,
    pub education_level: String,
    pub education_system: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternshipCompany {
    pub address: String,
    pub phone: String,
    pub hr_email: String,
    pub postal_code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub department: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternshipRecord {
    pub student: InternshipStudent,
    pub company: InternshipCompany,
    /// Internship duration, as free text.
    pub time: String,
    pub teacher: String,
    pub disciplinarian: bool,
    pub signer: Signer,
    pub qr_code_image: String,
    #[serde(default)]
    pub qr_url: Option<String>,
    /// ISO issue date.
    pub date: String,
    #[serde(default)]
    pub tracking_number: Option<String>,
}

/// POST body for an internship letter request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternshipRequestModel {
    pub student_number: String,
    pub company_name: String,
    pub company_postal_code: String,
    pub company_address: String,
    pub time: String,
    pub course: String,
    pub teacher: String,
    pub disciplinarian: bool,
    pub department: String,
    // Compatibility shim fields, same story as the education model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signer: Option<i64>,
}
