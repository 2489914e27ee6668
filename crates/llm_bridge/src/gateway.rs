//! Inference gateway: one screenshot in, one diagnosis out

use crate::config::{Credential, GeminiConfig};
use crate::gemini::{GeminiClient, GeminiPart};
use anyhow::Result;
use async_trait::async_trait;
use diagnosis_core::{Instruction, InvocationError, Mode, Screenshot};
use uuid::Uuid;

/// Anything that can turn a screenshot and a mode into report text
///
/// Every call is independent: implementations must not cache results.
#[async_trait]
pub trait InferenceGateway: Send + Sync {
    async fn diagnose(&self, image: &Screenshot, mode: Mode) -> Result<String, InvocationError>;
}

/// Gateway backed by the hosted Gemini API
pub struct GeminiGateway {
    client: GeminiClient,
}

impl GeminiGateway {
    pub fn new(config: GeminiConfig, credential: Credential) -> Result<Self> {
        Ok(Self {
            client: GeminiClient::new(config, credential)?,
        })
    }

    pub fn model(&self) -> &str {
        &self.client.config().model
    }
}

/// Request parts in send order: instruction, directive, image
pub fn request_parts(image: &Screenshot, mode: Mode) -> Vec<GeminiPart> {
    let instruction = Instruction::for_mode(mode);
    vec![
        GeminiPart::text(instruction.system),
        GeminiPart::text(instruction.directive),
        GeminiPart::image(image.format().mime_type(), image.bytes()),
    ]
}

#[async_trait]
impl InferenceGateway for GeminiGateway {
    async fn diagnose(&self, image: &Screenshot, mode: Mode) -> Result<String, InvocationError> {
        let request_id = Uuid::new_v4();
        tracing::info!(
            %request_id,
            mode = mode.keyword(),
            format = image.format().mime_type(),
            bytes = image.len(),
            model = self.model(),
            "Requesting diagnosis"
        );

        match self.client.generate_content(request_parts(image, mode)).await {
            Ok(text) => {
                tracing::info!(%request_id, chars = text.chars().count(), "Diagnosis received");
                Ok(text)
            }
            Err(e) => {
                tracing::warn!(%request_id, error = %format!("{:#}", e), "Diagnosis failed");
                Err(InvocationError::new(format!("{:#}", e)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png() -> Screenshot {
        let img = image::RgbImage::from_pixel(2, 2, image::Rgb([0, 0, 0]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        Screenshot::from_bytes(out.into_inner()).unwrap()
    }

    #[test]
    fn test_request_parts_order() {
        let parts = serde_json::to_value(request_parts(&png(), Mode::Insight)).unwrap();
        let parts = parts.as_array().unwrap();
        assert_eq!(parts.len(), 3);
        assert!(parts[0]["text"].as_str().unwrap().contains("# Role"));
        assert_eq!(parts[1]["text"], "[洞悉]");
        assert_eq!(parts[2]["inline_data"]["mime_type"], "image/png");
    }

    #[test]
    fn test_gateway_creation() {
        let gateway =
            GeminiGateway::new(GeminiConfig::default(), Credential::new("test-key").unwrap())
                .unwrap();
        assert_eq!(gateway.model(), "gemini-2.5-flash");
    }
}
