pub mod ai_service; // Inference backend seam
pub mod gemini; // Google Gemini generateContent client
pub mod image_encoder;

pub use ai_service::InferenceService;
pub use gemini::GeminiService;
