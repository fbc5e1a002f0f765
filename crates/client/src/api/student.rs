//! Student existence lookup.

use crate::error::ApiError;
use crate::models::CheckStudentResponse;

use super::{ApiClient, validated_identifier};

/// How a student is being looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    StudentNumber,
    /// Not yet supported by the backend; rejected locally.
    NationalId,
}

impl ApiClient {
    /// Check whether a student exists, returning their record when found.
    pub async fn check_student(
        &self,
        identifier: &str,
        kind: IdentifierKind,
    ) -> Result<CheckStudentResponse, ApiError> {
        if kind == IdentifierKind::NationalId {
            return Err(ApiError::Validation(
                "national id lookup is not supported".to_string(),
            ));
        }
        let identifier = validated_identifier(identifier)?;
        self.inner()
            .get(&self.config().check_student_url(identifier))
            .await
    }
}
