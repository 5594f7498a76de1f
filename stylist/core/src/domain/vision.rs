// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Image Analysis Domain Interface (Anti-Corruption Layer)
//
// Vision backends translate a clothing photo into DetectedAttributes.
// Implementations live in infrastructure/llm/.

use async_trait::async_trait;
use std::path::Path;

use crate::domain::wardrobe::DetectedAttributes;

/// Image bytes received at ingestion
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,

    /// Client-supplied file name; only its extension is trusted
    pub file_name: String,

    /// Client-supplied MIME type, if any
    pub content_type: Option<String>,
}

const ALLOWED_TYPES: [&str; 4] = ["jpeg", "jpg", "png", "webp"];

impl ImageUpload {
    /// Lowercased extension including the leading dot, or empty
    pub fn extension(&self) -> String {
        Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_lowercase()))
            .unwrap_or_default()
    }

    /// Both the extension and the declared MIME type must name an image type we accept
    pub fn is_supported_image(&self) -> bool {
        let extension = self.extension();
        let ext_ok = ALLOWED_TYPES.iter().any(|t| extension == format!(".{}", t));
        let mime_ok = self
            .content_type
            .as_deref()
            .map(|m| {
                let m = m.to_lowercase();
                ALLOWED_TYPES.iter().any(|t| m.contains(t))
            })
            .unwrap_or(false);
        ext_ok && mime_ok
    }

    /// MIME type sent to vision backends
    pub fn mime_type(&self) -> &'static str {
        match self.extension().as_str() {
            ".png" => "image/png",
            ".webp" => "image/webp",
            _ => "image/jpeg",
        }
    }
}

#[async_trait]
pub trait ImageAnalyzer: Send + Sync {
    /// Detect clothing attributes from an image
    async fn analyze(&self, image: &ImageUpload) -> Result<DetectedAttributes, AnalysisError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Malformed analysis response: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str, mime: Option<&str>) -> ImageUpload {
        ImageUpload {
            bytes: vec![1, 2, 3],
            file_name: name.to_string(),
            content_type: mime.map(|m| m.to_string()),
        }
    }

    #[test]
    fn test_supported_image_requires_extension_and_mime() {
        assert!(upload("shirt.PNG", Some("image/png")).is_supported_image());
        assert!(upload("shirt.jpg", Some("image/jpeg")).is_supported_image());
        assert!(!upload("shirt.gif", Some("image/gif")).is_supported_image());
        assert!(!upload("shirt.png", Some("text/plain")).is_supported_image());
        assert!(!upload("shirt.png", None).is_supported_image());
    }

    #[test]
    fn test_mime_type_from_extension() {
        assert_eq!(upload("a.png", None).mime_type(), "image/png");
        assert_eq!(upload("a.webp", None).mime_type(), "image/webp");
        assert_eq!(upload("a.jpeg", None).mime_type(), "image/jpeg");
    }
}
