use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

/// Largest image accepted for text extraction (6 MiB)
pub const MAX_IMAGE_BYTES: usize = 6 * 1024 * 1024;

/// Recognition language passed to the engine
pub const OCR_LANGUAGE: &str = "eng";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OcrError {
    #[error("Please select a valid image file.")]
    NotAnImage(String),

    #[error("Image is too large. Please choose a file under 6 MB.")]
    TooLarge(usize),

    #[error("No clear text found in the image.")]
    Unreadable,

    #[error("Image reading engine failed to load: {0}")]
    EngineUnavailable(String),
}

#[derive(Debug, Clone)]
pub struct ImageInput {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageInput {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn validate(&self) -> Result<(), OcrError> {
        if !self.mime_type.starts_with("image/") {
            return Err(OcrError::NotAnImage(self.mime_type.clone()));
        }
        if self.bytes.len() > MAX_IMAGE_BYTES {
            return Err(OcrError::TooLarge(self.bytes.len()));
        }
        Ok(())
    }
}

/// OCR engine
#[async_trait]
pub trait ImageTextExtractor: Send + Sync {
    async fn extract(&self, image: &ImageInput, language: &str) -> Result<String, OcrError>;
}

/// Validate the image, run the engine and return the trimmed text
pub async fn read_image_text(
    extractor: &dyn ImageTextExtractor,
    image: &ImageInput,
) -> Result<String, OcrError> {
    image.validate()?;

    let text = extractor.extract(image, OCR_LANGUAGE).await?;
    let text = text.trim();
    if text.is_empty() {
        return Err(OcrError::Unreadable);
    }

    debug!(chars = text.chars().count(), "extracted text from image");
    Ok(text.to_string())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) struct FixedText(pub &'static str);

    #[async_trait]
    impl ImageTextExtractor for FixedText {
        async fn extract(&self, _image: &ImageInput, language: &str) -> Result<String, OcrError> {
            assert_eq!(language, OCR_LANGUAGE);
            Ok(self.0.to_string())
        }
    }

    #[tokio::test]
    async fn rejects_non_images() {
        let image = ImageInput::new("application/pdf", vec![1, 2, 3]);
        let err = read_image_text(&FixedText("text"), &image).await.unwrap_err();
        assert!(matches!(err, OcrError::NotAnImage(_)));
    }

    #[tokio::test]
    async fn rejects_oversized_images() {
        let image = ImageInput::new("image/png", vec![0; MAX_IMAGE_BYTES + 1]);
        let err = read_image_text(&FixedText("text"), &image).await.unwrap_err();
        assert_eq!(err, OcrError::TooLarge(MAX_IMAGE_BYTES + 1));

        let image = ImageInput::new("image/png", vec![0; MAX_IMAGE_BYTES]);
        assert!(image.validate().is_ok());
    }

    #[tokio::test]
    async fn blank_text_is_unreadable() {
        let image = ImageInput::new("image/jpeg", vec![0; 16]);
        let err = read_image_text(&FixedText("  \n "), &image).await.unwrap_err();
        assert_eq!(err, OcrError::Unreadable);
    }

    #[tokio::test]
    async fn returns_trimmed_text() {
        let image = ImageInput::new("image/jpeg", vec![0; 16]);
        let text = read_image_text(&FixedText("\n Exit only \n"), &image).await.unwrap();
        assert_eq!(text, "Exit only");
    }
}
