pub mod gemini;
pub mod payload;

use crate::error::AppError;
use std::future::Future;

pub use gemini::{GeminiClient, IDENTIFY_PROMPT};
pub use payload::ImagePayload;

/// Vision-language model that describes a plant photo in free text
pub trait VisionModel: Send + Sync {
    /// Send one image with the identification prompt, returning the raw reply
    fn describe(
        &self,
        image: &ImagePayload,
    ) -> impl Future<Output = Result<String, AppError>> + Send;
}
