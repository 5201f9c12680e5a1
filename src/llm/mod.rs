//! Generative model integration

pub mod client;
pub mod prompts;
pub mod response;

pub use client::{GeminiClient, LanguageModel, ModelError, ModelRequest};
pub use response::{ModelAssessment, ModelReply};
