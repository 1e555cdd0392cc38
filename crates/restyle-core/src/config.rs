//! Style service endpoint configuration.
//!
//! The base URL is supplied from the environment at build time (the app
//! crate's build script captures [`API_URL_ENV`]). There is no built-in
//! default: an unset or blank value leaves the panel unconfigured, and
//! every submission then fails as a request error.

/// Environment variable holding the style service base URL.
pub const API_URL_ENV: &str = "RESTYLE_API_URL";

/// Path of the generate endpoint, appended to the base URL.
pub const GENERATE_PATH: &str = "/generate";

/// Errors from validating a configured base URL.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The value contains whitespace inside the URL.
    #[error("base URL must not contain whitespace: {0:?}")]
    Whitespace(String),

    /// The value is neither an absolute `http(s)` URL nor a root-relative path.
    #[error("base URL must start with http://, https://, or /: {0:?}")]
    UnsupportedScheme(String),
}

/// Where generate requests are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    base_url: String,
}

impl ServiceConfig {
    /// Validate and normalize a base URL.
    ///
    /// Surrounding whitespace and trailing slashes are stripped. A
    /// root-relative value such as `/api` targets the page's own origin.
    /// A bare `/` normalizes to the empty base, so requests go to
    /// `/generate`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Whitespace`] if the URL contains inner
    /// whitespace, or [`ConfigError::UnsupportedScheme`] if it is not
    /// `http://`, `https://`, or root-relative.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim();
        if trimmed.chars().any(char::is_whitespace) {
            return Err(ConfigError::Whitespace(trimmed.to_owned()));
        }

        let lower = trimmed.to_ascii_lowercase();
        let supported = lower.starts_with("http://")
            || lower.starts_with("https://")
            || trimmed.starts_with('/');
        if !supported {
            return Err(ConfigError::UnsupportedScheme(trimmed.to_owned()));
        }

        Ok(Self {
            base_url: trimmed.trim_end_matches('/').to_owned(),
        })
    }

    /// Build a config from an optional environment value.
    ///
    /// `None` and blank strings mean "not configured" and yield
    /// `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Propagates [`ServiceConfig::new`] validation errors for non-blank
    /// values.
    pub fn from_env_value(value: Option<&str>) -> Result<Option<Self>, ConfigError> {
        match value.map(str::trim) {
            None | Some("") => Ok(None),
            Some(url) => Self::new(url).map(Some),
        }
    }

    /// The normalized base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of the generate endpoint.
    #[must_use]
    pub fn generate_url(&self) -> String {
        format!("{}{GENERATE_PATH}", self.base_url)
    }
}
