//! Model client implementations

pub mod base;
pub mod openai;

pub use openai::OpenAIClient;
