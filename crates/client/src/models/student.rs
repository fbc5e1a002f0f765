//! Student lookup models.

use serde::{Deserialize, Serialize};

use super::common::University;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faculty {
    pub id: i64,
    pub university_detail: University,
    pub name: String,
    pub phone: Option<String>,
    pub address: String,
    pub university: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentInfo {
    pub student_number: String,
    pub certificate_number: Option<String>,
    pub national_id: String,
    pub first_name: String,
    pub last_name: String,
    pub father_name: String,
    pub full_name: String,
    pub field_of_study: String,
    /// ISO date, e.g. `2004-02-01`.
    pub birth_date: String,
    pub entry_term: String,
    pub entry_year: String,
    pub issued_by: String,
    pub education_level: String,
    pub education_system: String,
    pub university: University,
    pub faculty: Faculty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckStudentResponse {
    pub exists: bool,
    #[serde(default)]
    pub student_info: Option<StudentInfo>,
}
