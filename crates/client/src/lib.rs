//! Client library for the student certificate request service.
//!
//! The service lets students request issuance of official certificates
//! (education enrollment letters, internship letters) through a REST API.
//! This crate covers the authenticated access layer and the submission
//! workflow:
//!
//! - [`CredentialStore`] holds the access/refresh token pair and persists it
//!   through a pluggable [`auth::TokenStorage`].
//! - [`AuthenticatedClient`] attaches the bearer token to every request,
//!   detects 401 responses and recovers the session through a single-flight
//!   token refresh, retrying the original request exactly once.
//! - [`NormalizedError`] collapses the backend's heterogeneous error payload
//!   shapes into one message list.
//! - [`SubmissionWorkflow`] drives a certificate request from editing through
//!   submission to a tracking number, guarding against duplicate submits.
//!
//! Rendering, persisted-storage media beyond a key-value file, and date
//! localization are left to the embedding application.

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod forms;
pub mod models;
pub mod workflow;

pub use api::ApiClient;
pub use auth::{CredentialPair, CredentialStore};
pub use client::{AuthenticatedClient, SessionEvent};
pub use config::ApiConfig;
pub use error::{ApiError, NormalizedError};
pub use workflow::{
    EducationSubmission, InternshipSubmission, SubmissionState, SubmissionWorkflow,
};
