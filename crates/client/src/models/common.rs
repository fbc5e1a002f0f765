//! Types shared between education and internship records.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct University {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub address: String,
    pub phone: String,
}

/// The official who signs an issued letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signer {
    pub title: String,
    pub full_name: String,
    /// URL of the signature image rendered on the printable letter.
    pub signature_image: String,
}
