use std::fmt;

use url::Url;

use crate::domain::common::entities::app_errors::CoreError;

/// An absolute URL with a host, ready to be encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedUrl(String);

impl NormalizedUrl {
    /// Trims the input, prepends `https://` when it has no http(s) scheme and
    /// validates the result.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(CoreError::MissingUrl);
        }

        let candidate = if has_http_scheme(trimmed) {
            trimmed.to_string()
        } else {
            format!("https://{trimmed}")
        };

        let parsed = Url::parse(&candidate).map_err(|e| CoreError::InvalidUrl(e.to_string()))?;
        if !parsed.has_host() {
            return Err(CoreError::InvalidUrl("missing host".to_string()));
        }

        Ok(Self(candidate))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn has_http_scheme(input: &str) -> bool {
    let lower = input.get(..8).unwrap_or(input).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
