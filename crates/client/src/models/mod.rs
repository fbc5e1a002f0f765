//! Wire models for the certificate request API.

pub mod auth;
pub mod common;
pub mod education;
pub mod internship;
pub mod student;

pub use auth::{LoginRequest, LoginResponse, RefreshRequest, RefreshResponse};
pub use common::{Signer, University};
pub use education::{EducationRecord, EducationRequestModel, EducationStudent};
pub use internship::{
    InternshipCompany, InternshipRecord, InternshipRequestModel, InternshipStudent,
};
pub use student::{CheckStudentResponse, Faculty, StudentInfo};
