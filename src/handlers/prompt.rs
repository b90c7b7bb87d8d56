use anyhow::Result;

use crate::models::{ContentPart, EncodedImage, UserQuery, MISSING_INPUT_WARNING};
use crate::services::image_encoder;

/// Substituted for the question when only an image was submitted.
pub const IMAGE_ONLY_QUERY: &str = "Analyze this image for nutritional content.";

/// Instruction template with two slots: the user's question and, optionally,
/// the image the question is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NutritionPrompt {
    query_text: String,
    image: Option<EncodedImage>,
}

impl NutritionPrompt {
    /// Validate the query and fill the slots. Fails if there is nothing to
    /// ask or if the uploaded image cannot be decoded.
    pub fn build(query: &UserQuery) -> Result<Self> {
        if query.is_empty() {
            anyhow::bail!(MISSING_INPUT_WARNING);
        }

        let query_text = if query.has_text() {
            query.text.clone()
        } else {
            IMAGE_ONLY_QUERY.to_string()
        };

        let image = match &query.image {
            Some(upload) => Some(image_encoder::encode_png(&upload.bytes)?),
            None => None,
        };

        Ok(Self { query_text, image })
    }

    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn render_text(&self) -> String {
        let image_instructions = if self.has_image() {
            "\n\
             An image of food is attached. Identify each food item you can see, \
             estimate the calories of each item, and finish with a line of the form \
             \"Total calories: <number> kcal\".\n"
        } else {
            ""
        };

        format!(
            "You are a certified nutritionist chatbot. Please help the user based on their question below.\n\
             \n\
             Question: {}\n\
             {}\n\
             Respond in a friendly, clear, and helpful way. Suggest healthy foods, diet tips, or explanations as needed.",
            self.query_text, image_instructions
        )
    }

    /// Text part first, then the image part if there is one.
    pub fn into_parts(self) -> Vec<ContentPart> {
        let mut parts = vec![ContentPart::Text(self.render_text())];
        if let Some(image) = self.image {
            parts.push(image.into());
        }
        parts
    }
}
