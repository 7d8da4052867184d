//! Shiplog LLM - Natural-language title classifier
//!
//! Implements the [`shiplog_core::TitleClassifier`] port against an
//! OpenAI-compatible chat-completions endpoint. Model output is validated
//! against the closed category set before anything reaches the pipeline;
//! unparseable answers classify nothing.

pub mod classifier;

pub use classifier::OpenAiClassifier;
