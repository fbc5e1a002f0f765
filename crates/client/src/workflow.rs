//! Submission workflow state machine.
//!
//! One workflow instance owns the life cycle of a single certificate request
//! form: `Editing → Submitting → Submitted`, back to `Editing` on failure or
//! `reset`. The `Editing → Submitting` transition is taken atomically, so a
//! double-tapped submit issues exactly one backend call.

use std::marker::PhantomData;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::client::AuthenticatedClient;
use crate::config::ApiConfig;
use crate::error::NormalizedError;
use crate::forms::{EducationFormData, InternshipFormData};
use crate::models::{
    EducationRecord, EducationRequestModel, InternshipRecord, InternshipRequestModel,
};

/// Compatibility shim: stands in for a missing `tracking_number` until the
/// backend contract stabilizes. Remove once the field is guaranteed.
pub const PLACEHOLDER_TRACKING_NUMBER: &str = "0000000000";

/// A kind of certificate request the workflow can drive.
pub trait SubmissionKind {
    type FormData;
    type RequestModel: Serialize + Send + Sync;
    type Record: DeserializeOwned;

    /// Kind name for logging.
    fn name() -> &'static str;
    fn validate(form: &Self::FormData) -> Result<(), String>;
    fn to_request(form: &Self::FormData) -> Self::RequestModel;
    fn submit_url(config: &ApiConfig) -> String;
    fn tracking_number(record: &Self::Record) -> Option<&str>;
}

pub struct EducationSubmission;

impl SubmissionKind for EducationSubmission {
    type FormData = EducationFormData;
    type RequestModel = EducationRequestModel;
    type Record = EducationRecord;

    fn name() -> &'static str {
        "education"
    }

    fn validate(form: &Self::FormData) -> Result<(), String> {
        if form.student.code.trim().is_empty() {
            return Err("student number is required".to_string());
        }
        Ok(())
    }

    fn to_request(form: &Self::FormData) -> Self::RequestModel {
        form.to_request()
    }

    fn submit_url(config: &ApiConfig) -> String {
        config.education_submit_url()
    }

    fn tracking_number(record: &Self::Record) -> Option<&str> {
        record.tracking_number.as_deref()
    }
}

pub struct InternshipSubmission;

impl SubmissionKind for InternshipSubmission {
    type FormData = InternshipFormData;
    type RequestModel = InternshipRequestModel;
    type Record = InternshipRecord;

    fn name() -> &'static str {
        "internship"
    }

    fn validate(form: &Self::FormData) -> Result<(), String> {
        if form.student.code.trim().is_empty() {
            return Err("student number is required".to_string());
        }
        Ok(())
    }

    fn to_request(form: &Self::FormData) -> Self::RequestModel {
        form.to_request()
    }

    fn submit_url(config: &ApiConfig) -> String {
        config.internship_submit_url()
    }

    fn tracking_number(record: &Self::Record) -> Option<&str> {
        record.tracking_number.as_deref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Editing,
    Submitting,
    /// Terminal until `reset`; the form is ready to print.
    Submitted,
}

#[derive(Debug)]
struct WorkflowInner {
    state: SubmissionState,
    tracking_number: Option<String>,
    last_error: Option<NormalizedError>,
}

/// Drives one form's submission. Clones share state, so a UI can hold one
/// handle for the submit button and another for status display.
pub struct SubmissionWorkflow<K: SubmissionKind> {
    client: Arc<AuthenticatedClient>,
    inner: Arc<Mutex<WorkflowInner>>,
    _kind: PhantomData<K>,
}

impl<K: SubmissionKind> Clone for SubmissionWorkflow<K> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            inner: Arc::clone(&self.inner),
            _kind: PhantomData,
        }
    }
}

impl<K: SubmissionKind> SubmissionWorkflow<K> {
    pub fn new(client: Arc<AuthenticatedClient>) -> Self {
        Self {
            client,
            inner: Arc::new(Mutex::new(WorkflowInner {
                state: SubmissionState::Editing,
                tracking_number: None,
                last_error: None,
            })),
            _kind: PhantomData,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.inner.lock().state
    }

    pub fn tracking_number(&self) -> Option<String> {
        self.inner.lock().tracking_number.clone()
    }

    pub fn last_error(&self) -> Option<NormalizedError> {
        self.inner.lock().last_error.clone()
    }

    /// Submit the form, returning the state the workflow settled in.
    ///
    /// No-op while a submission is already in flight or after one succeeded.
    /// A validation failure records the error and never reaches the network.
    pub async fn submit(&self, form: &K::FormData) -> SubmissionState {
        if let Err(reason) = K::validate(form) {
            debug!(kind = K::name(), reason = %reason, "submission rejected by validation");
            let mut inner = self.inner.lock();
            inner.last_error = Some(NormalizedError::from_message(reason, None));
            return inner.state;
        }

        {
            let mut inner = self.inner.lock();
            match inner.state {
                SubmissionState::Editing => {
                    inner.state = SubmissionState::Submitting;
                    inner.last_error = None;
                }
                // Duplicate submit, or already submitted: nothing to do.
                other => return other,
            }
        }

        let request = K::to_request(form);
        let url = K::submit_url(self.client.config());
        let result = self.client.post::<K::Record, _>(&url, &request).await;

        let mut inner = self.inner.lock();
        match result {
            Ok(record) => {
                let tracking = match K::tracking_number(&record) {
                    Some(tracking) => tracking.to_string(),
                    None => {
                        warn!(
                            kind = K::name(),
                            "response missing tracking number; using placeholder"
                        );
                        PLACEHOLDER_TRACKING_NUMBER.to_string()
                    }
                };
                debug!(kind = K::name(), tracking = %tracking, "submission accepted");
                inner.tracking_number = Some(tracking);
                inner.state = SubmissionState::Submitted;
            }
            Err(err) => {
                debug!(kind = K::name(), error = %err, "submission failed");
                inner.last_error = Some(err.to_normalized());
                inner.state = SubmissionState::Editing;
            }
        }
        inner.state
    }

    /// Return a submitted form to editing, clearing the tracking number.
    pub fn reset(&self) {
        let mut inner = self.inner.lock();
        if inner.state == SubmissionState::Submitting {
            // An in-flight submission keeps its guard; it settles on its own.
            return;
        }
        inner.state = SubmissionState::Editing;
        inner.tracking_number = None;
        inner.last_error = None;
    }
}

impl<K: SubmissionKind> std::fmt::Debug for SubmissionWorkflow<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("SubmissionWorkflow")
            .field("kind", &K::name())
            .field("state", &inner.state)
            .field("tracking_number", &inner.tracking_number)
            .finish()
    }
}
