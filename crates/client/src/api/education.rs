//! Education enrollment letter endpoints.

use crate::error::ApiError;
use crate::models::{EducationRecord, EducationRequestModel};

use super::{ApiClient, validated_identifier};

impl ApiClient {
    /// Fetch the education record backing a student's enrollment letter.
    pub async fn education_record(
        &self,
        student_number: &str,
    ) -> Result<EducationRecord, ApiError> {
        let student_number = validated_identifier(student_number)?;
        self.inner()
            .get(&self.config().education_record_url(student_number))
            .await
    }

    /// Submit an education letter request; the response carries the issued
    /// tracking number.
    pub async fn submit_education(
        &self,
        request: &EducationRequestModel,
    ) -> Result<EducationRecord, ApiError> {
        self.inner()
            .post(&self.config().education_submit_url(), request)
            .await
    }
}
