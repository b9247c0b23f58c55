// Service exports
pub mod gemini;
pub mod huggingface;

pub use gemini::{GeminiClient, GeneratorError};
pub use huggingface::{ClassifierError, HuggingFaceClient};
