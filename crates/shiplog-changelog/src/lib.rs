//! Shiplog Changelog - Categorization and markdown rendering
//!
//! This crate holds the pure core of the changelog pipeline: rule-based
//! categorization with optional classifier refinement, title normalization,
//! and markdown rendering for changelogs and release listings.

pub mod categorize;
pub mod normalize;
pub mod pipeline;
pub mod render;
pub mod tags;
pub mod types;

pub use categorize::categorize;
pub use normalize::normalize_title;
pub use pipeline::ChangelogPipeline;
pub use render::render_changelog;
pub use types::CategorizedChange;
