//! Core types for 见心AI
//!
//! This crate provides the data model shared by every part of the
//! workspace: the observation mode, the uploaded screenshot, the fixed
//! instruction text sent to the model, and the states the presentation
//! shell moves through while a diagnosis is in flight.

pub mod error;
pub mod prompt;
pub mod shell;
pub mod types;

pub use error::{
    ConfigurationError, ImageError, InvocationError, ModeError, INVOCATION_FAILURE_PREFIX,
    MISSING_CREDENTIAL_ACTION, MISSING_CREDENTIAL_NOTICE,
};
pub use prompt::{mode_directive, Instruction, SYSTEM_PROMPT};
pub use shell::{ModeInfo, ShellState, StatusResponse, SUCCESS_NOTICE};
pub use types::*;
