pub mod client;
pub mod error;
#[cfg(test)]
pub mod mock;
pub mod types;

pub use client::{ContentGenerator, GeminiClient};
pub use error::GeminiError;
pub use types::GenerateContentRequest;
