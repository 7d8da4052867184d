//! Shiplog Core - Shared types and collaborator ports
//!
//! This crate defines the data model flowing through the changelog pipeline,
//! the error taxonomy for upstream sources, and the traits implemented by
//! infrastructure crates (`shiplog-github`, `shiplog-llm`).

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::{GithubConfig, LlmConfig, PipelineConfig, ShiplogConfig};
pub use error::{Result, SourceError};
pub use traits::{ChangeSource, TitleClassifier};
pub use types::{Category, CompareResult, RawChange, ReleaseEntry, TagEntry};
