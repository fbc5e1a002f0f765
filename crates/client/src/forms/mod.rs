//! Printable-form snapshots and their mappings to/from wire models.
//!
//! A form is the editable, display-oriented view of a certificate request.
//! Dates stay in ISO form here; locale-aware rendering (Jalali display) is
//! the embedding application's concern.

pub mod education;
pub mod internship;

pub use education::EducationFormData;
pub use internship::InternshipFormData;

use serde::{Deserialize, Serialize};

/// Empty display slot in a freshly created form.
pub const EMPTY_SLOT: &str = "-";

/// Letterhead block shared by both form kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormHeader {
    pub university: String,
    pub city: String,
    pub date: String,
    /// Letter number; the tracking number once one is issued.
    pub number: String,
    pub attachment: String,
}

impl Default for FormHeader {
    fn default() -> Self {
        Self {
            university: String::new(),
            city: String::new(),
            date: EMPTY_SLOT.to_string(),
            number: EMPTY_SLOT.to_string(),
            attachment: EMPTY_SLOT.to_string(),
        }
    }
}

/// Signature block shared by both form kinds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureSection {
    pub title: String,
    pub name: String,
    pub image_url: String,
}

pub(crate) fn full_name(first: &str, last: &str) -> String {
    format!("{first} {last}").trim().to_string()
}
