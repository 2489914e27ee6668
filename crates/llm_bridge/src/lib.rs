//! LLM Bridge for Gemini integration
//!
//! Provides the inference gateway: it sends the fixed diagnosis
//! instruction, the mode directive and the screenshot to Google's
//! hosted Gemini API and returns the generated text untouched.
//!
//! The gateway is configured explicitly at construction; nothing in this
//! crate reads the environment except [`Settings::from_env`].

pub mod config;
pub mod gateway;
pub mod gemini;

pub use config::{Credential, GeminiConfig, Settings};
pub use gateway::{GeminiGateway, InferenceGateway};
pub use gemini::GeminiClient;
