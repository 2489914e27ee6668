//! Startup configuration for the Gemini gateway
//!
//! Everything is read once from the environment and then handed to the
//! gateway explicitly. The credential is optional at this stage: its
//! absence disables the analysis action instead of aborting startup.

use diagnosis_core::ConfigurationError;
use std::fmt;

/// Preferred credential variable
pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";
/// Fallback credential variable
pub const FALLBACK_API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Optional transport timeout, in whole seconds
pub const TIMEOUT_VAR: &str = "GEMINI_TIMEOUT_SECS";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// API key for Google Gemini
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a key, rejecting blank values
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(****)")
    }
}

/// Configuration for Gemini API client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    /// API root, without the version segment
    pub base_url: String,
    /// Model to use (default: gemini-2.5-flash)
    pub model: String,
    /// Transport timeout in seconds; unset means the HTTP client default
    pub timeout_secs: Option<u64>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: None,
        }
    }
}

/// Everything the gateway needs, resolved at startup
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub credential: Option<Credential>,
    pub gemini: GeminiConfig,
}

impl Settings {
    /// Read settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let credential = lookup(API_KEY_VAR)
            .and_then(Credential::new)
            .or_else(|| lookup(FALLBACK_API_KEY_VAR).and_then(Credential::new));

        let defaults = GeminiConfig::default();
        let gemini = GeminiConfig {
            base_url: lookup("GEMINI_BASE_URL")
                .filter(|v| !v.trim().is_empty())
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            model: lookup("GEMINI_MODEL")
                .filter(|v| !v.trim().is_empty())
                .map(|v| v.trim().to_string())
                .unwrap_or(defaults.model),
            timeout_secs: parse_timeout(lookup(TIMEOUT_VAR)),
        };

        Self { credential, gemini }
    }

    /// The credential, or the configuration error that disables analysis
    pub fn require_credential(&self) -> Result<&Credential, ConfigurationError> {
        self.credential
            .as_ref()
            .ok_or(ConfigurationError::MissingCredential)
    }
}

/// Blank and `0` mean no timeout; anything unparseable is ignored with a warning
fn parse_timeout(raw: Option<String>) -> Option<u64> {
    let raw = raw?;
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    match value.parse::<u64>() {
        Ok(0) => {
            tracing::warn!("{}=0 ignored; using the HTTP client default", TIMEOUT_VAR);
            None
        }
        Ok(secs) => Some(secs),
        Err(e) => {
            tracing::warn!(
                "Ignoring {}={:?} ({}); using the HTTP client default",
                TIMEOUT_VAR,
                value,
                e
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_gemini_config_default() {
        let config = GeminiConfig::default();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.base_url, "https://generativelanguage.googleapis.com");
        assert_eq!(config.timeout_secs, None);
    }

    #[test]
    fn test_credential_absent() {
        let settings = Settings::from_lookup(lookup(&[]));
        assert!(settings.credential.is_none());
        assert_eq!(
            settings.require_credential(),
            Err(ConfigurationError::MissingCredential)
        );
    }

    #[test]
    fn test_blank_credential_counts_as_absent() {
        let settings = Settings::from_lookup(lookup(&[(API_KEY_VAR, "   ")]));
        assert!(settings.credential.is_none());
    }

    #[test]
    fn test_credential_precedence() {
        let settings = Settings::from_lookup(lookup(&[
            (API_KEY_VAR, "google-key"),
            (FALLBACK_API_KEY_VAR, "gemini-key"),
        ]));
        assert_eq!(settings.require_credential().unwrap().expose(), "google-key");

        let settings = Settings::from_lookup(lookup(&[
            (API_KEY_VAR, ""),
            (FALLBACK_API_KEY_VAR, "gemini-key"),
        ]));
        assert_eq!(settings.require_credential().unwrap().expose(), "gemini-key");
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            ("GEMINI_BASE_URL", "http://localhost:9999/"),
            ("GEMINI_MODEL", "gemini-2.5-pro"),
            ("GEMINI_TIMEOUT_SECS", "30"),
        ]));
        assert_eq!(settings.gemini.base_url, "http://localhost:9999");
        assert_eq!(settings.gemini.model, "gemini-2.5-pro");
        assert_eq!(settings.gemini.timeout_secs, Some(30));
    }

    #[test]
    fn test_timeout_zero_and_garbage_are_unset() {
        for raw in ["0", " 0 ", "abc", "-5", "1.5", ""] {
            let settings = Settings::from_lookup(lookup(&[(TIMEOUT_VAR, raw)]));
            assert_eq!(settings.gemini.timeout_secs, None, "{raw:?}");
        }

        let settings = Settings::from_lookup(lookup(&[(TIMEOUT_VAR, " 45 ")]));
        assert_eq!(settings.gemini.timeout_secs, Some(45));
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let credential = Credential::new("secret-value").unwrap();
        assert!(!format!("{:?}", credential).contains("secret-value"));
    }
}
