//! Internship letter form.

use serde::{Deserialize, Serialize};

use crate::models::{InternshipRecord, InternshipRequestModel};

use super::{EMPTY_SLOT, FormHeader, SignatureSection, full_name};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternshipStudentSection {
    /// Student number.
    pub code: String,
    pub full_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternshipEducationSection {
    pub field: String,
    pub entry_academic_year: String,
    pub degree_type: String,
    pub system: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternshipSection {
    pub course: String,
    pub duration: String,
    pub instructor: String,
    pub company_name: String,
    pub address: String,
    pub postal_code: String,
    pub department: String,
    pub disciplinarian: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternshipFormData {
    pub header: FormHeader,
    pub student: InternshipStudentSection,
    pub education: InternshipEducationSection,
    pub internship: InternshipSection,
    pub signature: SignatureSection,
}

impl InternshipFormData {
    /// Populate a form from a fetched record.
    ///
    /// The GET payload does not yet carry the field of study or course; those
    /// slots stay empty until the student edits them.
    pub fn from_record(record: &InternshipRecord) -> Self {
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
            student: InternshipStudentSection {
                code: student.student_number.clone(),
                full_name: full_name(&student.first_name, &student.last_name),
            },
            education: InternshipEducationSection {
                field: String::new(),
                entry_academic_year: student.entry_year.clone(),
                degree_type: student.education_level.clone(),
                system: student.education_system.clone(),
            },
            internship: InternshipSection {
                course: String::new(),
                duration: record.time.clone(),
                instructor: record.teacher.clone(),
                company_name: record.company.name.clone(),
                address: record.company.address.clone(),
                postal_code: record.company.postal_code.clone(),
                department: record.company.department.clone(),
                disciplinarian: record.disciplinarian,
            },
            signature: SignatureSection {
                title: record.signer.title.clone(),
                name: record.signer.full_name.clone(),
                image_url: record.signer.signature_image.clone(),
            },
        }
    }

    /// Build the submission body from the edited form.
    pub fn to_request(&self) -> InternshipRequestModel {
        InternshipRequestModel {
            student_number: self.student.code.clone(),
            company_name: self.internship.company_name.clone(),
            company_postal_code: self.internship.postal_code.clone(),
            company_address: self.internship.address.clone(),
            time: self.internship.duration.clone(),
            course: self.internship.course.clone(),
            teacher: self.internship.instructor.clone(),
            disciplinarian: self.internship.disciplinarian,
            department: self.internship.department.clone(),
            // Compatibility shim until the backend drops these.
            description: Some(String::new()),
            signer: Some(1),
        }
    }
}
