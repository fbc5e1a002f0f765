//! API base URL and endpoint catalog.

use std::env;

/// Environment variable consulted by [`ApiConfig::from_env`].
pub const API_BASE_URL_ENV: &str = "CERTREQ_API_BASE_URL";

/// Path prefix shared by every backend route.
const API_PREFIX: &str = "/api";

/// Resolved API configuration.
///
/// All endpoint paths are relative to `<base>/api`, where `<base>` is the
/// configured backend origin with any trailing slashes removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    pub fn new<S: AsRef<str>>(api_base_url: S) -> Self {
        let trimmed = api_base_url.as_ref().trim_end_matches('/');
        Self {
            base_url: format!("{trimmed}{API_PREFIX}"),
        }
    }

    /// Read the backend origin from `CERTREQ_API_BASE_URL`.
    ///
    /// An unset variable yields a relative `/api` base, which only works when
    /// the embedding application resolves URLs against its own origin.
    pub fn from_env() -> Self {
        Self::new(env::var(API_BASE_URL_ENV).unwrap_or_default())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn login_url(&self) -> String {
        format!("{}/token/", self.base_url)
    }

    pub fn logout_url(&self) -> String {
        format!("{}/logout/", self.base_url)
    }

    pub fn refresh_url(&self) -> String {
        format!("{}/token/refresh/", self.base_url)
    }

    pub fn check_student_url(&self, student_number: &str) -> String {
        format!("{}/check-student/{}/", self.base_url, student_number)
    }

    pub fn education_record_url(&self, student_number: &str) -> String {
        format!("{}/education/student/{}/", self.base_url, student_number)
    }

    pub fn education_submit_url(&self) -> String {
        format!("{}/education/", self.base_url)
    }

    pub fn internship_record_url(&self, student_number: &str) -> String {
        format!("{}/intern/student/{}/", self.base_url, student_number)
    }

    pub fn internship_submit_url(&self) -> String {
        format!("{}/intern/", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slashes_are_trimmed() {
        let config = ApiConfig::new("https://backend.example.com///");
        assert_eq!(config.base_url(), "https://backend.example.com/api");
    }

    #[test]
    fn test_endpoint_paths() {
        let config = ApiConfig::new("https://backend.example.com");
        assert_eq!(
            config.login_url(),
            "https://backend.example.com/api/token/"
        );
        assert_eq!(
            config.refresh_url(),
            "https://backend.example.com/api/token/refresh/"
        );
        assert_eq!(
            config.check_student_url("40123456"),
            "https://backend.example.com/api/check-student/40123456/"
        );
        assert_eq!(
            config.education_record_url("40123456"),
            "https://backend.example.com/api/education/student/40123456/"
        );
        assert_eq!(
            config.internship_submit_url(),
            "https://backend.example.com/api/intern/"
        );
    }
}
