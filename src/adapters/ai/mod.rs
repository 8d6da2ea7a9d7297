//! Vision model adapters - Implementations of the CodeGenerator port.
//!
//! - `OpenAIVisionGenerator` - OpenAI chat completions with image input
//! - `MockCodeGenerator` - Configurable mock for testing

mod mock_generator;
mod openai_vision;

pub use mock_generator::MockCodeGenerator;
pub use openai_vision::{OpenAIVisionConfig, OpenAIVisionGenerator};
