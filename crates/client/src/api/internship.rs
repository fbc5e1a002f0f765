//! Internship letter endpoints.

use crate::error::ApiError;
use crate::models::{InternshipRecord, InternshipRequestModel};

use super::{ApiClient, validated_identifier};

impl ApiClient {
    /// Fetch the internship record for a student.
    pub async fn internship_record(
        &self,
        student_number: &str,
    ) -> Result<InternshipRecord, ApiError> {
        let student_number = validated_identifier(student_number)?;
        self.inner()
            .get(&self.config().internship_record_url(student_number))
            .await
    }

    /// Submit an internship letter request.
    pub async fn submit_internship(
        &self,
        request: &InternshipRequestModel,
    ) -> Result<InternshipRecord, ApiError> {
        self.inner()
            .post(&self.config().internship_submit_url(), request)
            .await
    }
}
