pub mod advice_handler;
pub mod prompt;

pub use advice_handler::{AdviceHandler, Submission};
pub use prompt::NutritionPrompt;
