//! Error types shared across the workspace

use thiserror::Error;

/// Static message shown when the credential is absent at startup
pub const MISSING_CREDENTIAL_NOTICE: &str = "请配置 API Key";

/// Message shown when the analysis action is triggered without a credential
pub const MISSING_CREDENTIAL_ACTION: &str = "API Key 未配置，无法运行。";

/// Prefix shown in front of every invocation failure
pub const INVOCATION_FAILURE_PREFIX: &str = "连接超时，请重试。";

/// Startup configuration problems
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Neither credential variable holds a usable value
    #[error("{}", MISSING_CREDENTIAL_ACTION)]
    MissingCredential,
}

/// Any failure while talking to the inference endpoint.
///
/// Transport errors, authentication rejections and malformed responses
/// all collapse into this one opaque value; the message carries the
/// underlying detail for display.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct InvocationError {
    pub message: String,
}

impl InvocationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Text rendered by the shell, with the raw detail appended
    pub fn user_message(&self) -> String {
        format!("{}\n错误: {}", INVOCATION_FAILURE_PREFIX, self.message)
    }
}

/// Rejected uploads
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("uploaded file is empty")]
    Empty,

    #[error("file extension '{0}' is not allowed (expected jpg, jpeg, png or webp)")]
    UnsupportedExtension(String),

    #[error("image format {0} is not allowed (expected JPEG, PNG or WebP)")]
    UnsupportedFormat(String),

    #[error("image could not be decoded: {0}")]
    Undecodable(String),

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Unknown mode selector
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mode '{0}' (expected 锐评 or 洞悉)")]
pub struct ModeError(pub String);
