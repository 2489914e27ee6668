//! Presentation shell states and the JSON exchanged with the browser

use crate::error::{InvocationError, MISSING_CREDENTIAL_ACTION, MISSING_CREDENTIAL_NOTICE};
use crate::types::{Mode, ALLOWED_EXTENSIONS};
use serde::{Deserialize, Serialize};

/// Banner shown under a successful diagnosis
pub const SUCCESS_NOTICE: &str = "分析完成！截图分享给朋友吧！";
pub const STATUS_UNAVAILABLE_NOTICE: &str = "无法连接服务器，请刷新重试。";

/// Where the shell is in the upload → diagnose cycle
///
/// The shell moves from `AwaitingInput` to `AwaitingResponse` on the user's
/// trigger, then to one of the two terminal states when the call returns.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ShellState {
    #[default]
    AwaitingInput,
    AwaitingResponse,
    ShowingResult { markdown: String, notice: String },
    ShowingError { message: String },
}

impl ShellState {
    /// Terminal state for a completed gateway call
    pub fn from_outcome(outcome: Result<String, InvocationError>) -> Self {
        match outcome {
            Ok(markdown) => ShellState::ShowingResult {
                markdown,
                notice: SUCCESS_NOTICE.to_string(),
            },
            Err(err) => ShellState::ShowingError {
                message: err.user_message(),
            },
        }
    }

    /// Terminal state when the action is triggered without a credential
    pub fn configuration_error() -> Self {
        ShellState::ShowingError {
            message: MISSING_CREDENTIAL_ACTION.to_string(),
        }
    }

    pub fn input_error(detail: impl std::fmt::Display) -> Self {
        ShellState::ShowingError {
            message: detail.to_string(),
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, ShellState::AwaitingResponse)
    }
}

/// A selectable mode as shown by the radio control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeInfo {
    pub mode: Mode,
    pub label: String,
}

impl From<Mode> for ModeInfo {
    fn from(mode: Mode) -> Self {
        Self {
            mode,
            label: mode.label().to_string(),
        }
    }
}

/// Response of `GET /api/status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    /// False when no credential was configured at startup
    pub analysis_enabled: bool,
    /// Static configuration message, present only when analysis is disabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    pub modes: Vec<ModeInfo>,
    pub formats: Vec<String>,
}

impl StatusResponse {
    pub fn new(analysis_enabled: bool) -> Self {
        Self {
            analysis_enabled,
            notice: (!analysis_enabled).then(|| MISSING_CREDENTIAL_NOTICE.to_string()),
            modes: Mode::ALL.into_iter().map(ModeInfo::from).collect(),
            formats: ALLOWED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Stand-in for when the status request itself failed
    ///
    /// Analysis stays disabled and the notice carries the failure detail.
    pub fn unavailable(detail: impl std::fmt::Display) -> Self {
        Self {
            notice: Some(format!("{}\n错误: {}", STATUS_UNAVAILABLE_NOTICE, detail)),
            ..Self::new(false)
        }
    }
}
