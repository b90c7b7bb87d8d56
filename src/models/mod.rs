/// Prefix put in front of every fault message shown to the user.
pub const ERROR_PREFIX: &str = "⚠️ Error: ";

/// Shown when a submission carries neither a question nor an image.
pub const MISSING_INPUT_WARNING: &str = "Please enter a question or upload an image first.";

/// Raw bytes of an uploaded image, exactly as the browser sent them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub file_name: Option<String>,
}

/// One form submission: free text plus an optional image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserQuery {
    pub text: String,
    pub image: Option<ImageUpload>,
}

impl UserQuery {
    /// Empty uploads (a file control left blank) are dropped here so the
    /// rest of the pipeline only sees images that actually carry data.
    pub fn new(text: impl Into<String>, image: Option<ImageUpload>) -> Self {
        Self {
            text: text.into(),
            image: image.filter(|upload| !upload.bytes.is_empty()),
        }
    }

    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_text() && !self.has_image()
    }
}

/// An image ready to travel alongside the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// One typed element of the payload handed to the inference service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    Text(String),
    InlineImage { mime_type: String, data: Vec<u8> },
}

impl From<EncodedImage> for ContentPart {
    fn from(image: EncodedImage) -> Self {
        ContentPart::InlineImage {
            mime_type: image.mime_type,
            data: image.data,
        }
    }
}

/// Result of a single dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdviceOutcome {
    Success(String),
    Failure(String),
}

/// What the page renders: either the model text or a formatted error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdviceResponse {
    pub text: String,
    pub is_error: bool,
}

impl From<AdviceOutcome> for AdviceResponse {
    fn from(outcome: AdviceOutcome) -> Self {
        match outcome {
            AdviceOutcome::Success(text) => AdviceResponse {
                text,
                is_error: false,
            },
            AdviceOutcome::Failure(reason) => AdviceResponse {
                text: format!("{}{}", ERROR_PREFIX, reason),
                is_error: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_and_empty_upload_make_empty_query() {
        let upload = ImageUpload {
            bytes: Vec::new(),
            file_name: Some(String::new()),
        };
        let query = UserQuery::new("   \n\t", Some(upload));

        assert!(query.image.is_none());
        assert!(query.is_empty());
    }

    #[test]
    fn test_image_only_query_is_not_empty() {
        let upload = ImageUpload {
            bytes: vec![1, 2, 3],
            file_name: Some("lunch.png".to_string()),
        };
        let query = UserQuery::new("", Some(upload));

        assert!(!query.has_text());
        assert!(query.has_image());
        assert!(!query.is_empty());
    }

    #[test]
    fn test_success_passes_through_unchanged() {
        let response = AdviceResponse::from(AdviceOutcome::Success("Eat more greens.".to_string()));

        assert!(!response.is_error);
        assert_eq!(response.text, "Eat more greens.");
    }

    #[test]
    fn test_failure_gets_warning_prefix() {
        let response = AdviceResponse::from(AdviceOutcome::Failure("quota exceeded".to_string()));

        assert!(response.is_error);
        assert!(response.text.starts_with(ERROR_PREFIX));
        assert!(response.text.contains("quota exceeded"));
    }
}
