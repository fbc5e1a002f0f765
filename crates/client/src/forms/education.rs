//! Education enrollment letter form.

use serde::{Deserialize, Serialize};

use crate::models::{EducationRecord, EducationRequestModel};

use super::{EMPTY_SLOT, FormHeader, SignatureSection, full_name};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationStudentSection {
    /// Student number.
    pub code: String,
    pub full_name: String,
    pub father_name: String,
    /// Certificate number when present, national id otherwise.
    pub id_number: String,
    pub birth_place: String,
    /// ISO date.
    pub birth_date: String,
    pub photo_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationSection {
    pub field: String,
    pub degree_type: String,
    /// Education system (full-time, distance, ...).
    pub method: String,
    pub entry_semester: String,
    pub entry_academic_year: String,
    pub current_semester: String,
    pub current_academic_year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateSection {
    /// Organization the letter is addressed to.
    pub recipient: String,
    /// ISO date the letter stays valid until.
    pub validity_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationFormData {
    pub header: FormHeader,
    pub student: EducationStudentSection,
    pub education: EducationSection,
    pub certificate: CertificateSection,
    pub description: String,
    pub signature: SignatureSection,
}

impl EducationFormData {
    /// Populate a form from a fetched record.
    pub fn from_record(record: &EducationRecord) -> Self {
        let student = &record.student;
        Self {
            header: FormHeader {
                university: student.university.name.clone(),
                city: student.university.city.clone(),
                date: record.date.clone(),
                number: record
                    .tracking_number
                    .clone()
                    .unwrap_or_else(|| EMPTY_SLOT.to_string()),
                attachment: EMPTY_SLOT.to_string(),
            },
            student: EducationStudentSection {
                code: student.student_number.clone(),
                full_name: full_name(&student.first_name, &student.last_name),
                father_name: student.father_name.clone(),
                id_number: if student.certificate_number.is_empty() {
                    student.national_id.clone()
                } else {
                    student.certificate_number.clone()
                },
                birth_place: student.issued_by.clone(),
                birth_date: student.birth_date.clone(),
                photo_url: String::new(),
            },
            education: EducationSection {
                field: student.field_of_study.clone(),
                degree_type: student.education_level.clone(),
                method: student.education_system.clone(),
                entry_semester: student.entry_term.clone(),
                entry_academic_year: student.entry_year.clone(),
                current_semester: record.academic_term.clone(),
                current_academic_year: record.academic_year.clone(),
            },
            certificate: CertificateSection {
                recipient: record.certificate.clone(),
                validity_date: record.expiration_date.clone(),
            },
            description: record.description.clone(),
            signature: SignatureSection {
                title: record.signer.title.clone(),
                name: record.signer.full_name.clone(),
                image_url: record.signer.signature_image.clone(),
            },
        }
    }

    /// Build the submission body from the edited form.
    pub fn to_request(&self) -> EducationRequestModel {
        EducationRequestModel {
            student_number: self.student.code.clone(),
            academic_term: self.education.current_semester.clone(),
            academic_year: self.education.current_academic_year.clone(),
            certificate: self.certificate.recipient.clone(),
            description: self.description.clone(),
            // Compatibility shim until the backend derives these itself.
            university: Some(1),
            faculty: Some(1),
            signer: Some(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EducationStudent, Signer, University};

    fn sample_record() -> EducationRecord {
        EducationRecord {
            student: EducationStudent {
                student_number: "40123456".to_string(),
                certificate_number: "C-778".to_string(),
                first_name: "Sara".to_string(),
                last_name: "Ahmadi".to_string(),
                national_id: "0012345678".to_string(),
                issued_by: "Tehran".to_string(),
                birth_date: "2004-02-01".to_string(),
                father_name: "Reza".to_string(),
                field_of_study: "Computer Engineering".to_string(),
                entry_term: "1".to_string(),
                entry_year: "2022".to_string(),
                education_level: "BSc".to_string(),
                education_system: "full-time".to_string(),
                university: University {
                    id: 1,
                    name: "Sharif".to_string(),
                    city: "Tehran".to_string(),
                    address: "Azadi St".to_string(),
                    phone: "021".to_string(),
                },
            },
            signer: Signer {
                title: "Registrar".to_string(),
                full_name: "M. Karimi".to_string(),
                signature_image: "https://cdn.example.com/sig.png".to_string(),
            },
            academic_term: "2".to_string(),
            academic_year: "2025-2026".to_string(),
            expiration_date: "2026-02-08".to_string(),
            certificate: "Embassy of Italy".to_string(),
            description: "Issued upon request.".to_string(),
            qr_code_image: String::new(),
            qr_url: None,
            date: "2026-01-15".to_string(),
            tracking_number: Some("4313955399".to_string()),
        }
    }

    #[test]
    fn test_from_record_maps_display_fields() {
        let form = EducationFormData::from_record(&sample_record());
        assert_eq!(form.header.university, "Sharif");
        assert_eq!(form.header.number, "4313955399");
        assert_eq!(form.student.full_name, "Sara Ahmadi");
        assert_eq!(form.student.id_number, "C-778");
        assert_eq!(form.education.current_semester, "2");
        assert_eq!(form.certificate.recipient, "Embassy of Italy");
    }

    #[test]
    fn test_national_id_fallback_when_no_certificate_number() {
        let mut record = sample_record();
        record.student.certificate_number = String::new();
        let form = EducationFormData::from_record(&record);
        assert_eq!(form.student.id_number, "0012345678");
    }

    #[test]
    fn test_round_trip_record_to_request() {
        let record = sample_record();
        let request = EducationFormData::from_record(&record).to_request();

        assert_eq!(request.student_number, record.student.student_number);
        assert_eq!(request.academic_term, record.academic_term);
        assert_eq!(request.academic_year, record.academic_year);
        assert_eq!(request.certificate, record.certificate);
        assert_eq!(request.description, record.description);
    }

    #[test]
    fn test_default_form_uses_placeholder_slots() {
        let form = EducationFormData::default();
        assert_eq!(form.header.number, "-");
        assert_eq!(form.header.date, "-");
        assert!(form.student.code.is_empty());
    }
}
